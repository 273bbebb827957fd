use super::engine::SessionEngine;
use super::ticker::TickSource;
use crate::events::EventSink;

/// Feed ticks into `engine` until it stops running or `ticks` runs dry.
///
/// The engine must already be started. Every event produced is forwarded to
/// `sink`. Returns the number of ticks consumed.
pub async fn drive<T, S>(engine: &mut SessionEngine, ticks: &mut T, sink: &mut S) -> u64
where
    T: TickSource,
    S: EventSink,
{
    let mut consumed = 0;
    while engine.is_running() {
        if !ticks.next_tick().await {
            break;
        }
        consumed += 1;
        for event in engine.tick() {
            sink.emit(event);
        }
    }
    consumed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Event;
    use crate::timer::{Phase, ScriptedTicks, SessionPlan};

    #[tokio::test]
    async fn stops_when_session_completes() {
        let plan = SessionPlan {
            study_minutes: 0,
            study_seconds: 3,
            total_cycles: 1,
            ..SessionPlan::default()
        };
        let mut engine = SessionEngine::new(plan);
        engine.start();

        let mut ticks = ScriptedTicks::new(100);
        let mut events: Vec<Event> = Vec::new();
        let consumed = drive(&mut engine, &mut ticks, &mut events).await;

        assert_eq!(consumed, 3);
        assert_eq!(ticks.remaining(), 97);
        assert_eq!(engine.phase(), Phase::Complete);
        assert!(matches!(events.last(), Some(Event::SessionComplete { .. })));
    }

    #[tokio::test]
    async fn does_nothing_when_not_running() {
        let mut engine = SessionEngine::default();
        let mut ticks = ScriptedTicks::new(5);
        let mut events: Vec<Event> = Vec::new();
        assert_eq!(drive(&mut engine, &mut ticks, &mut events).await, 0);
        assert!(events.is_empty());
    }
}

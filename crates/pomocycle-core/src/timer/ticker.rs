//! Tick sources.
//!
//! A [`TickSource`] decides *when* the engine advances. The engine itself
//! only knows "one tick = one second".

use std::time::Duration;

use tokio::time::{self, Instant, Interval, MissedTickBehavior};

/// Something that yields ticks.
#[allow(async_fn_in_trait)]
pub trait TickSource {
    /// Wait for the next tick. Returns `false` once the source is exhausted.
    async fn next_tick(&mut self) -> bool;

    /// Re-arm the schedule after a pause so the next tick lands one full
    /// period from now. Missed time is not caught up.
    fn restart(&mut self);
}

/// Wall-clock ticks backed by a tokio interval.
///
/// Must be created inside a tokio runtime with the time driver enabled.
#[derive(Debug)]
pub struct IntervalTicks {
    interval: Interval,
}

impl IntervalTicks {
    pub fn new(period: Duration) -> Self {
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }

    pub fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl TickSource for IntervalTicks {
    async fn next_tick(&mut self) -> bool {
        self.interval.tick().await;
        true
    }

    fn restart(&mut self) {
        self.interval.reset();
    }
}

/// A fixed number of ticks, delivered immediately.
#[derive(Debug, Clone)]
pub struct ScriptedTicks {
    remaining: u64,
}

impl ScriptedTicks {
    pub fn new(count: u64) -> Self {
        Self { remaining: count }
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl TickSource for ScriptedTicks {
    async fn next_tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }

    fn restart(&mut self) {}
}

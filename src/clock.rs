use std::time::{Duration, Instant};

/// Schedules simulation ticks at a fixed period, independent of how often the
/// screen is redrawn or input arrives.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Ticker {
    period: Duration,
    next_tick: Option<Instant>,
}

impl Ticker {
    pub(crate) fn new(period: Duration) -> Ticker {
        Ticker {
            period,
            next_tick: None,
        }
    }

    /// Return the time left until the next tick is due, starting a new period
    /// if the ticker is not currently armed.
    pub(crate) fn remaining(&mut self) -> Duration {
        let when = *self
            .next_tick
            .get_or_insert_with(|| Instant::now() + self.period);
        when.saturating_duration_since(Instant::now())
    }

    /// Returns `true` if a tick is due, in which case the ticker is disarmed
    /// and the next call to `remaining()` starts a fresh period.
    pub(crate) fn fire(&mut self) -> bool {
        if self.remaining().is_zero() {
            self.next_tick = None;
            true
        } else {
            false
        }
    }

    /// Forget any pending deadline, e.g. while the game is paused
    pub(crate) fn stop(&mut self) {
        self.next_tick = None;
    }
}

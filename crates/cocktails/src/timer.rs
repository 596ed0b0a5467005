use std::time::{Duration, Instant};

use tracing::debug;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerState {
    pub remaining_seconds: u32,
    pub phase: Phase,
}

impl Default for TimerState {
    fn default() -> Self {
        Self {
            remaining_seconds: 0,
            phase: Phase::Idle,
        }
    }
}

/// Periodic deadline schedule. Holding one is holding the tick source;
/// dropping it cancels every future tick.
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    next_due: Instant,
}

impl Ticker {
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next_due: now + period,
        }
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Consumes one elapsed period if `now` has reached the next deadline.
    /// Ticks that were missed (e.g. a stalled event loop) are delivered one
    /// call at a time, oldest first.
    pub fn fire(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due += self.period;
        true
    }
}

/// Countdown state machine for the detail screen.
///
/// All time is in whole seconds. The controller owns at most one [`Ticker`];
/// every transition that starts a countdown replaces it in one assignment and
/// every transition that leaves `Running` drops it.
#[derive(Debug)]
pub struct TimerController {
    state: TimerState,
    resumable: u32,
    ticker: Option<Ticker>,
    period: Duration,
}

impl Default for TimerController {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerController {
    pub fn new() -> Self {
        Self::with_period(TICK_PERIOD)
    }

    pub fn with_period(period: Duration) -> Self {
        Self {
            state: TimerState::default(),
            resumable: 0,
            ticker: None,
            period,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.state.remaining_seconds
    }

    pub fn resumable_seconds(&self) -> u32 {
        self.resumable
    }

    pub fn is_running(&self) -> bool {
        self.state.phase == Phase::Running
    }

    pub fn has_tick_source(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.ticker.as_ref().map(Ticker::next_due)
    }

    pub fn start(&mut self, duration_seconds: u32, now: Instant) {
        if duration_seconds == 0 {
            debug!("timer start ignored (zero duration)");
            return;
        }
        // Replacing the Option drops the previous ticker before any tick of the
        // new one can be observed.
        self.ticker = Some(Ticker::new(self.period, now));
        self.state = TimerState {
            remaining_seconds: duration_seconds,
            phase: Phase::Running,
        };
        self.resumable = duration_seconds;
        debug!(duration_seconds, "timer started");
    }

    pub fn stop(&mut self) {
        if self.state.phase != Phase::Running {
            return;
        }
        self.ticker = None;
        self.resumable = self.state.remaining_seconds;
        self.state.phase = Phase::Paused;
        debug!(remaining = self.resumable, "timer stopped");
    }

    pub fn resume(&mut self, now: Instant) {
        if self.state.phase != Phase::Paused {
            return;
        }
        if self.resumable == 0 {
            debug!("timer resume ignored (nothing left)");
            return;
        }
        debug!(remaining = self.resumable, "timer resuming");
        self.start(self.resumable, now);
    }

    pub fn interrupt(&mut self) {
        self.ticker = None;
        self.state = TimerState::default();
        self.resumable = 0;
        debug!("timer interrupted");
    }

    /// Delivers every tick due at `now`, in order, and returns the remaining
    /// time after each one.
    pub fn poll(&mut self, now: Instant) -> Vec<u32> {
        let mut emitted = Vec::new();
        loop {
            let due = match self.ticker.as_mut() {
                Some(t) => t.fire(now),
                None => false,
            };
            if !due {
                break;
            }
            emitted.push(self.tick());
        }
        emitted
    }

    fn tick(&mut self) -> u32 {
        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
        if self.state.remaining_seconds == 0 {
            self.ticker = None;
            self.resumable = 0;
            self.state.phase = Phase::Finished;
            debug!("timer finished");
        }
        self.state.remaining_seconds
    }

    pub fn formatted_time(&self) -> String {
        format_mmss(self.state.remaining_seconds)
    }

    /// Fraction of `total_seconds` still remaining, for the progress gauge.
    pub fn progress(&self, total_seconds: u32) -> f64 {
        if total_seconds == 0 {
            return 0.0;
        }
        (self.state.remaining_seconds as f64 / total_seconds as f64).clamp(0.0, 1.0)
    }
}

impl Drop for TimerController {
    fn drop(&mut self) {
        if self.ticker.take().is_some() {
            debug!(
                remaining = self.state.remaining_seconds,
                "released active tick source on teardown"
            );
        }
    }
}

pub fn format_mmss(total_seconds: u32) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_boundaries() {
        assert_eq!(format_mmss(0), "00:00");
        assert_eq!(format_mmss(59), "00:59");
        assert_eq!(format_mmss(60), "01:00");
        assert_eq!(format_mmss(3599), "59:59");
    }

    #[test]
    fn ticker_does_not_fire_early() {
        let t0 = Instant::now();
        let mut t = Ticker::new(Duration::from_secs(1), t0);
        assert!(!t.fire(t0 + Duration::from_millis(999)));
        assert!(t.fire(t0 + Duration::from_secs(1)));
        assert!(!t.fire(t0 + Duration::from_secs(1)));
        assert_eq!(t.next_due(), t0 + Duration::from_secs(2));
    }

    #[test]
    fn progress_is_clamped() {
        let t0 = Instant::now();
        let mut c = TimerController::new();
        assert_eq!(c.progress(0), 0.0);
        c.start(30, t0);
        assert_eq!(c.progress(60), 0.5);
        assert_eq!(c.progress(10), 1.0);
    }

    #[test]
    fn idle_controller_never_ticks() {
        let t0 = Instant::now();
        let mut c = TimerController::new();
        assert!(c.poll(t0 + Duration::from_secs(10)).is_empty());
        assert_eq!(c.phase(), Phase::Idle);
    }
}

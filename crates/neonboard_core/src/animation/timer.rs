//! Polled timers over an external millisecond clock.
//!
//! Timers never own callbacks. Owners poll them with the current time and
//! act on the number of ticks that fell due, which keeps store access in
//! the caller's hands at fire time.

/// Fixed-period repeating timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalTimer {
    period_ms: u64,
    next_due_ms: u64,
    fired: u64,
    cancelled: bool,
}

impl IntervalTimer {
    /// Starts a timer whose first tick is one period after `now_ms`.
    ///
    /// A zero period is treated as one millisecond.
    pub fn start(period_ms: u64, now_ms: u64) -> Self {
        let period_ms = period_ms.max(1);
        Self {
            period_ms,
            next_due_ms: now_ms.saturating_add(period_ms),
            fired: 0,
            cancelled: false,
        }
    }

    /// Returns how many ticks fell due up to `now_ms` and consumes them.
    pub fn poll(&mut self, now_ms: u64) -> u32 {
        if self.cancelled || now_ms < self.next_due_ms {
            return 0;
        }
        let due = (now_ms - self.next_due_ms) / self.period_ms + 1;
        self.next_due_ms = self
            .next_due_ms
            .saturating_add(due.saturating_mul(self.period_ms));
        self.fired = self.fired.saturating_add(due);
        u32::try_from(due).unwrap_or(u32::MAX)
    }

    /// Timestamps of the ticks due up to `now_ms`, consumed in order.
    pub fn drain_due(&mut self, now_ms: u64) -> Vec<u64> {
        let first = self.next_due_ms;
        let count = self.poll(now_ms);
        (0..u64::from(count))
            .map(|index| first + index * self.period_ms)
            .collect()
    }

    /// Fires at most once per call, however many periods elapsed.
    ///
    /// Returns the latest period boundary at or before `now_ms`; earlier
    /// missed ticks are dropped and the next tick lands on the first
    /// boundary after `now_ms`.
    pub fn poll_latest(&mut self, now_ms: u64) -> Option<u64> {
        if self.cancelled || now_ms < self.next_due_ms {
            return None;
        }
        let skipped = (now_ms - self.next_due_ms) / self.period_ms;
        let fired_at = self
            .next_due_ms
            .saturating_add(skipped.saturating_mul(self.period_ms));
        self.next_due_ms = fired_at.saturating_add(self.period_ms);
        self.fired = self.fired.saturating_add(1);
        Some(fired_at)
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn next_due_ms(&self) -> Option<u64> {
        (!self.cancelled).then_some(self.next_due_ms)
    }

    /// Total ticks reported since start.
    pub fn fired(&self) -> u64 {
        self.fired
    }
}

/// One-shot timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeout {
    due_ms: u64,
    done: bool,
}

impl Timeout {
    pub fn after(delay_ms: u64, now_ms: u64) -> Self {
        Self {
            due_ms: now_ms.saturating_add(delay_ms),
            done: false,
        }
    }

    /// Returns `true` exactly once, on the first poll at or after the due time.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if self.done || now_ms < self.due_ms {
            return false;
        }
        self.done = true;
        true
    }

    pub fn cancel(&mut self) {
        self.done = true;
    }

    pub fn is_pending(&self) -> bool {
        !self.done
    }

    pub fn due_ms(&self) -> u64 {
        self.due_ms
    }
}

#[cfg(test)]
mod tests {
    use super::{IntervalTimer, Timeout};

    #[test]
    fn interval_reports_each_elapsed_period() {
        let mut timer = IntervalTimer::start(5_000, 0);
        assert_eq!(timer.poll(4_999), 0);
        assert_eq!(timer.poll(5_000), 1);
        assert_eq!(timer.poll(5_001), 0);
        assert_eq!(timer.poll(20_000), 3);
        assert_eq!(timer.fired(), 4);
        assert_eq!(timer.next_due_ms(), Some(25_000));
    }

    #[test]
    fn drain_due_lists_tick_times() {
        let mut timer = IntervalTimer::start(100, 50);
        assert_eq!(timer.drain_due(420), vec![150, 250, 350]);
        assert!(timer.drain_due(420).is_empty());
    }

    #[test]
    fn poll_latest_coalesces_missed_periods() {
        let mut timer = IntervalTimer::start(5_000, 0);
        assert_eq!(timer.poll_latest(4_999), None);
        assert_eq!(timer.poll_latest(23_000), Some(20_000));
        assert_eq!(timer.next_due_ms(), Some(25_000));
        assert_eq!(timer.poll_latest(24_999), None);
        assert_eq!(timer.poll_latest(25_000), Some(25_000));
        assert_eq!(timer.fired(), 2);
    }

    #[test]
    fn cancelled_interval_never_fires() {
        let mut timer = IntervalTimer::start(10, 0);
        timer.cancel();
        assert!(timer.is_cancelled());
        assert_eq!(timer.poll(1_000), 0);
        assert_eq!(timer.poll_latest(1_000), None);
        assert_eq!(timer.next_due_ms(), None);
    }

    #[test]
    fn timeout_fires_once() {
        let mut timeout = Timeout::after(100, 0);
        assert!(!timeout.poll(99));
        assert!(timeout.poll(150));
        assert!(!timeout.poll(200));
        assert!(!timeout.is_pending());
    }
}

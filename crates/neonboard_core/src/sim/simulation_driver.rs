use crate::animation::random::chance;
use crate::animation::timer::IntervalTimer;
use crate::config::DashboardConfig;
use crate::model::metrics::{SiteStats, SiteStatsPatch};
use crate::model::notification::{NewNotification, NotificationId, NotificationKind};
use crate::store::DashboardStore;
use log::{debug, info};
use rand::Rng;

pub const ORDER_NOTIFICATION_MESSAGE: &str = "New order received!";

/// Random metric drift for one stats tick, applied on top of `current`.
///
/// Visitors move by `[-5, 4]`, revenue by `[-50, 49]`, orders by `[-2, 2]`
/// and conversion by `[-0.1, 0.1)`.
pub fn stats_delta<R: Rng + ?Sized>(current: &SiteStats, rng: &mut R) -> SiteStatsPatch {
    let mut draw = |scale: f64, shift: f64| (rng.gen::<f64>() * scale - shift).floor() as i64;
    let visitors = draw(10.0, 5.0);
    let revenue = draw(100.0, 50.0);
    let orders = draw(5.0, 2.0);
    let conversion = rng.gen::<f64>() * 0.2 - 0.1;
    SiteStatsPatch {
        visitors: Some(current.visitors + visitors),
        revenue: Some(current.revenue + revenue),
        orders: Some(current.orders + orders),
        conversion: Some(current.conversion + conversion),
    }
}

/// What a single `tick` call did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub stats_updates: u32,
    pub notifications: Vec<NotificationId>,
}

impl TickReport {
    pub fn is_empty(&self) -> bool {
        self.stats_updates == 0 && self.notifications.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Job {
    Stats,
    Notification,
}

/// Owns the two periodic jobs that feed the dashboard store.
#[derive(Debug)]
pub struct SimulationDriver {
    stats_timer: IntervalTimer,
    notification_timer: IntervalTimer,
    notification_probability: f64,
}

impl SimulationDriver {
    /// Schedules both jobs; the first ticks land one period after `now_ms`.
    pub fn start(config: &DashboardConfig, now_ms: u64) -> Self {
        info!(
            "event=sim_start module=sim status=ok stats_interval_ms={} notification_interval_ms={}",
            config.stats_interval_ms, config.notification_interval_ms
        );
        Self {
            stats_timer: IntervalTimer::start(config.stats_interval_ms, now_ms),
            notification_timer: IntervalTimer::start(config.notification_interval_ms, now_ms),
            notification_probability: config.notification_probability,
        }
    }

    /// Runs each job at most once if its period elapsed by `now_ms`.
    ///
    /// A gap spanning several periods yields a single tick per job; missed
    /// ticks are not replayed.
    pub fn tick<R>(&mut self, now_ms: u64, store: &mut DashboardStore, rng: &mut R) -> TickReport
    where
        R: Rng + ?Sized,
    {
        let mut report = TickReport::default();
        if !self.is_running() {
            return report;
        }

        let mut due: Vec<(u64, Job)> = [
            self.stats_timer
                .poll_latest(now_ms)
                .map(|at| (at, Job::Stats)),
            self.notification_timer
                .poll_latest(now_ms)
                .map(|at| (at, Job::Notification)),
        ]
        .into_iter()
        .flatten()
        .collect();
        due.sort_unstable();

        for (at_ms, job) in due {
            match job {
                Job::Stats => {
                    let patch = stats_delta(store.stats(), rng);
                    store.update_stats(&patch);
                    report.stats_updates += 1;
                }
                Job::Notification => {
                    if chance(rng, self.notification_probability) {
                        let id = store.add_notification(
                            NewNotification::new(
                                ORDER_NOTIFICATION_MESSAGE,
                                NotificationKind::Success,
                            ),
                            at_ms,
                        );
                        report.notifications.push(id);
                    }
                }
            }
        }

        if !report.is_empty() {
            debug!(
                "event=sim_tick module=sim now_ms={now_ms} stats_updates={} notifications={}",
                report.stats_updates,
                report.notifications.len()
            );
        }
        report
    }

    /// Cancels both jobs. Idempotent.
    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }
        self.stats_timer.cancel();
        self.notification_timer.cancel();
        info!(
            "event=sim_stop module=sim status=ok stats_ticks={} notification_ticks={}",
            self.stats_timer.fired(),
            self.notification_timer.fired()
        );
    }

    pub fn is_running(&self) -> bool {
        !self.stats_timer.is_cancelled()
    }

    /// Earliest pending tick across both jobs.
    pub fn next_due_ms(&self) -> Option<u64> {
        match (
            self.stats_timer.next_due_ms(),
            self.notification_timer.next_due_ms(),
        ) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{stats_delta, SimulationDriver};
    use crate::animation::random::seeded_rng;
    use crate::config::DashboardConfig;
    use crate::model::metrics::SiteStats;
    use crate::store::DashboardStore;

    #[test]
    fn deltas_stay_within_documented_ranges() {
        let mut rng = seeded_rng(3);
        let base = SiteStats::default();
        for _ in 0..500 {
            let patch = stats_delta(&base, &mut rng);
            let visitors = patch.visitors.expect("visitors") - base.visitors;
            let revenue = patch.revenue.expect("revenue") - base.revenue;
            let orders = patch.orders.expect("orders") - base.orders;
            let conversion = patch.conversion.expect("conversion") - base.conversion;
            assert!((-5..=4).contains(&visitors));
            assert!((-50..=49).contains(&revenue));
            assert!((-2..=2).contains(&orders));
            assert!(conversion.abs() <= 0.1 + 1e-9);
        }
    }

    #[test]
    fn nothing_happens_before_first_period() {
        let mut store = DashboardStore::new();
        let mut rng = seeded_rng(1);
        let mut driver = SimulationDriver::start(&DashboardConfig::default(), 0);
        let before = store.snapshot();

        assert!(driver.tick(4_999, &mut store, &mut rng).is_empty());
        assert_eq!(store.snapshot(), before);
        assert_eq!(driver.next_due_ms(), Some(5_000));
    }

    #[test]
    fn stop_is_idempotent() {
        let mut driver = SimulationDriver::start(&DashboardConfig::default(), 0);
        driver.stop();
        driver.stop();
        assert!(!driver.is_running());
        assert_eq!(driver.next_due_ms(), None);
    }
}

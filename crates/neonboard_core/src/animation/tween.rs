//! Eased numeric interpolation.

/// Easing curves used by the effect engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    Power2In,
    Power2Out,
    Power2InOut,
}

impl Easing {
    /// Maps linear progress `t` in `[0, 1]` to eased progress.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Power2In => t * t,
            Self::Power2Out => 1.0 - (1.0 - t) * (1.0 - t),
            Self::Power2InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// One-shot interpolation from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub start_ms: u64,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: f64, to: f64, start_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms,
            easing,
        }
    }

    /// A tween that already sits at `value`.
    pub fn hold(value: f64, now_ms: u64) -> Self {
        Self::new(value, value, now_ms, 0, Easing::Linear)
    }

    /// Linear progress in `[0, 1]`; zero-length tweens are always complete.
    pub fn progress(&self, now_ms: u64) -> f64 {
        if self.duration_ms == 0 || now_ms >= self.end_ms() {
            return 1.0;
        }
        if now_ms <= self.start_ms {
            return 0.0;
        }
        (now_ms - self.start_ms) as f64 / self.duration_ms as f64
    }

    pub fn value_at(&self, now_ms: u64) -> f64 {
        let eased = self.easing.apply(self.progress(now_ms));
        self.from + (self.to - self.from) * eased
    }

    pub fn end_ms(&self) -> u64 {
        self.start_ms.saturating_add(self.duration_ms)
    }

    pub fn is_complete(&self, now_ms: u64) -> bool {
        now_ms >= self.end_ms()
    }

    /// Restarts from the current value towards `to`.
    pub fn retarget(&self, to: f64, now_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self::new(self.value_at(now_ms), to, now_ms, duration_ms, easing)
    }
}

/// Endless back-and-forth oscillation between `from` and `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Yoyo {
    pub from: f64,
    pub to: f64,
    pub start_ms: u64,
    pub half_period_ms: u64,
    pub easing: Easing,
}

impl Yoyo {
    pub fn new(from: f64, to: f64, start_ms: u64, half_period_ms: u64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start_ms,
            half_period_ms: half_period_ms.max(1),
            easing,
        }
    }

    /// Completed one-way legs since start.
    pub fn legs_completed(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.start_ms) / self.half_period_ms
    }

    pub fn value_at(&self, now_ms: u64) -> f64 {
        let elapsed = now_ms.saturating_sub(self.start_ms);
        let leg = elapsed / self.half_period_ms;
        let t = (elapsed % self.half_period_ms) as f64 / self.half_period_ms as f64;
        let eased = self.easing.apply(t);
        if leg % 2 == 0 {
            self.from + (self.to - self.from) * eased
        } else {
            self.to + (self.from - self.to) * eased
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Easing, Tween, Yoyo};

    #[test]
    fn easings_hit_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::Power2In,
            Easing::Power2Out,
            Easing::Power2InOut,
        ] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
        }
        assert!(Easing::Power2Out.apply(0.5) > 0.5);
        assert!(Easing::Power2In.apply(0.5) < 0.5);
        assert_eq!(Easing::Power2InOut.apply(0.5), 0.5);
    }

    #[test]
    fn tween_clamps_outside_window() {
        let tween = Tween::new(10.0, 20.0, 100, 200, Easing::Linear);
        assert_eq!(tween.value_at(0), 10.0);
        assert_eq!(tween.value_at(200), 15.0);
        assert_eq!(tween.value_at(1_000), 20.0);
        assert!(tween.is_complete(300));
        assert!(!tween.is_complete(299));
    }

    #[test]
    fn zero_length_tween_is_complete() {
        let tween = Tween::hold(3.0, 50);
        assert!(tween.is_complete(50));
        assert_eq!(tween.value_at(0), 3.0);
    }

    #[test]
    fn yoyo_returns_to_origin_every_full_period() {
        let yoyo = Yoyo::new(0.0, 1.0, 0, 2_000, Easing::Power2InOut);
        assert_eq!(yoyo.value_at(0), 0.0);
        assert_eq!(yoyo.value_at(2_000), 1.0);
        assert_eq!(yoyo.value_at(4_000), 0.0);
        assert_eq!(yoyo.legs_completed(5_000), 2);
    }
}

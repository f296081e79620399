//! Glitch text engine.
//!
//! # Responsibility
//! - Periodically roll for a glitch and, on success, scramble characters
//!   with symbol glyphs while skewing the text element.
//! - Restore the original text and an identity transform when the cycle
//!   ends.
//!
//! # Invariants
//! - A glitch in progress suppresses new triggers.
//! - A completed cycle leaves the displayed text equal to the mounted text.

use crate::animation::random::{chance, pick, uniform};
use crate::animation::timer::IntervalTimer;
use crate::animation::tween::{Easing, Tween};
use crate::effects::surface::{TextSurface, Transform};
use crate::effects::{require_unit, EffectConfigError};
use log::{debug, info};
use rand::Rng;

/// Replacement glyphs for scrambled characters.
pub const GLITCH_GLYPHS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";
/// Translation and skew are drawn from `[-MAX_DISTORTION, MAX_DISTORTION)`.
pub const MAX_DISTORTION: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct GlitchConfig {
    /// Per-character replacement probability.
    pub intensity: f64,
    /// Length of each half of the cycle (distort, then restore).
    pub duration_ms: u64,
    pub interval_ms: u64,
    /// Chance that one interval tick actually glitches.
    pub trigger_probability: f64,
    pub enable_hover: bool,
}

impl Default for GlitchConfig {
    fn default() -> Self {
        Self {
            intensity: 0.1,
            duration_ms: 200,
            interval_ms: 3_000,
            trigger_probability: 0.3,
            enable_hover: true,
        }
    }
}

impl GlitchConfig {
    pub fn validate(&self) -> Result<(), EffectConfigError> {
        require_unit("intensity", self.intensity)?;
        require_unit("trigger_probability", self.trigger_probability)?;
        if self.interval_ms == 0 {
            return Err(EffectConfigError::ZeroDuration("interval_ms"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TransformTween {
    x: Tween,
    y: Tween,
    skew_x: Tween,
    skew_y: Tween,
}

impl TransformTween {
    fn between(from: Transform, to: Transform, start_ms: u64, duration_ms: u64) -> Self {
        let tween = |a: f64, b: f64| Tween::new(a, b, start_ms, duration_ms, Easing::Power2InOut);
        Self {
            x: tween(from.x, to.x),
            y: tween(from.y, to.y),
            skew_x: tween(from.skew_x, to.skew_x),
            skew_y: tween(from.skew_y, to.skew_y),
        }
    }

    fn at(&self, now_ms: u64) -> Transform {
        Transform {
            x: self.x.value_at(now_ms),
            y: self.y.value_at(now_ms),
            skew_x: self.skew_x.value_at(now_ms),
            skew_y: self.skew_y.value_at(now_ms),
            scale: 1.0,
        }
    }

    fn target(&self) -> Transform {
        Transform {
            x: self.x.to,
            y: self.y.to,
            skew_x: self.skew_x.to,
            skew_y: self.skew_y.to,
            scale: 1.0,
        }
    }

    fn end_ms(&self) -> u64 {
        self.x.end_ms()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Distorting(TransformTween),
    Restoring(TransformTween),
}

/// Glitch driver bound to one text element.
#[derive(Debug)]
pub struct GlitchText {
    config: GlitchConfig,
    original: String,
    displayed: String,
    phase: Phase,
    timer: IntervalTimer,
    mounted: bool,
    cycles_completed: u64,
}

impl GlitchText {
    /// Renders `text` and starts the periodic glitch roll.
    ///
    /// # Errors
    /// - Returns `EffectConfigError` when `config` fails validation.
    pub fn mount<S>(
        text: impl Into<String>,
        config: GlitchConfig,
        surface: &mut S,
        now_ms: u64,
    ) -> Result<Self, EffectConfigError>
    where
        S: TextSurface + ?Sized,
    {
        config.validate()?;
        let original = text.into();
        surface.set_text(original.as_str());
        surface.set_transform(Transform::IDENTITY);
        info!(
            "event=effect_mount module=glitch status=ok interval_ms={}",
            config.interval_ms
        );
        Ok(Self {
            timer: IntervalTimer::start(config.interval_ms, now_ms),
            displayed: original.clone(),
            original,
            phase: Phase::Idle,
            mounted: true,
            cycles_completed: 0,
            config,
        })
    }

    /// Processes due interval rolls and the running cycle up to `now_ms`.
    pub fn update<S, R>(&mut self, now_ms: u64, surface: &mut S, rng: &mut R)
    where
        S: TextSurface + ?Sized,
        R: Rng + ?Sized,
    {
        if !self.mounted {
            return;
        }
        for tick_ms in self.timer.drain_due(now_ms) {
            self.settle(tick_ms, surface);
            if chance(rng, self.config.trigger_probability) {
                self.start_cycle(tick_ms, surface, rng);
            }
        }
        self.settle(now_ms, surface);
        match self.phase {
            Phase::Idle => {}
            Phase::Distorting(tween) | Phase::Restoring(tween) => {
                surface.set_transform(tween.at(now_ms));
            }
        }
    }

    /// Starts a glitch unless one is already running.
    pub fn trigger<S, R>(&mut self, now_ms: u64, surface: &mut S, rng: &mut R) -> bool
    where
        S: TextSurface + ?Sized,
        R: Rng + ?Sized,
    {
        if !self.mounted {
            return false;
        }
        self.settle(now_ms, surface);
        self.start_cycle(now_ms, surface, rng)
    }

    /// Pointer entered the element.
    pub fn hover<S, R>(&mut self, now_ms: u64, surface: &mut S, rng: &mut R) -> bool
    where
        S: TextSurface + ?Sized,
        R: Rng + ?Sized,
    {
        if !self.config.enable_hover {
            return false;
        }
        self.trigger(now_ms, surface, rng)
    }

    /// Clicks always trigger, regardless of `enable_hover`.
    pub fn click<S, R>(&mut self, now_ms: u64, surface: &mut S, rng: &mut R) -> bool
    where
        S: TextSurface + ?Sized,
        R: Rng + ?Sized,
    {
        self.trigger(now_ms, surface, rng)
    }

    /// Stops the interval and restores the original text immediately.
    pub fn unmount<S>(&mut self, surface: &mut S)
    where
        S: TextSurface + ?Sized,
    {
        if !self.mounted {
            return;
        }
        self.timer.cancel();
        if self.phase != Phase::Idle {
            self.finish_cycle(surface);
        }
        self.mounted = false;
        info!(
            "event=effect_unmount module=glitch status=ok cycles={}",
            self.cycles_completed
        );
    }

    pub fn is_glitching(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn original_text(&self) -> &str {
        self.original.as_str()
    }

    /// Text currently pushed to the surface.
    pub fn displayed_text(&self) -> &str {
        self.displayed.as_str()
    }

    pub fn cycles_completed(&self) -> u64 {
        self.cycles_completed
    }

    fn start_cycle<S, R>(&mut self, now_ms: u64, surface: &mut S, rng: &mut R) -> bool
    where
        S: TextSurface + ?Sized,
        R: Rng + ?Sized,
    {
        if self.phase != Phase::Idle {
            return false;
        }
        self.displayed = scramble(self.original.as_str(), self.config.intensity, rng);
        surface.set_text(self.displayed.as_str());
        let target = Transform {
            x: uniform(rng, -MAX_DISTORTION, MAX_DISTORTION),
            y: uniform(rng, -MAX_DISTORTION, MAX_DISTORTION),
            skew_x: uniform(rng, -MAX_DISTORTION, MAX_DISTORTION),
            skew_y: uniform(rng, -MAX_DISTORTION, MAX_DISTORTION),
            scale: 1.0,
        };
        self.phase = Phase::Distorting(TransformTween::between(
            Transform::IDENTITY,
            target,
            now_ms,
            self.config.duration_ms,
        ));
        debug!("event=glitch_start module=glitch at_ms={now_ms}");
        true
    }

    /// Moves the cycle through every phase boundary at or before `now_ms`.
    fn settle<S>(&mut self, now_ms: u64, surface: &mut S)
    where
        S: TextSurface + ?Sized,
    {
        loop {
            match self.phase {
                Phase::Distorting(tween) if tween.end_ms() <= now_ms => {
                    self.phase = Phase::Restoring(TransformTween::between(
                        tween.target(),
                        Transform::IDENTITY,
                        tween.end_ms(),
                        self.config.duration_ms,
                    ));
                }
                Phase::Restoring(tween) if tween.end_ms() <= now_ms => {
                    self.finish_cycle(surface);
                }
                _ => return,
            }
        }
    }

    fn finish_cycle<S>(&mut self, surface: &mut S)
    where
        S: TextSurface + ?Sized,
    {
        self.displayed.clone_from(&self.original);
        surface.set_text(self.original.as_str());
        surface.set_transform(Transform::IDENTITY);
        self.phase = Phase::Idle;
        self.cycles_completed += 1;
    }
}

/// Replaces each character with a random glyph with probability `intensity`.
pub fn scramble<R: Rng + ?Sized>(text: &str, intensity: f64, rng: &mut R) -> String {
    let glyphs: Vec<char> = GLITCH_GLYPHS.chars().collect();
    text.chars()
        .map(|ch| {
            if chance(rng, intensity) {
                pick(rng, &glyphs).copied().unwrap_or(ch)
            } else {
                ch
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{scramble, GlitchConfig, GlitchText, GLITCH_GLYPHS};
    use crate::animation::random::seeded_rng;
    use crate::effects::surface::MemoryTextSurface;
    use crate::effects::EffectConfigError;

    #[test]
    fn scramble_keeps_length_and_uses_glyphs() {
        let mut rng = seeded_rng(11);
        let scrambled = scramble("NEON CITY", 1.0, &mut rng);
        assert_eq!(scrambled.chars().count(), 9);
        assert!(scrambled.chars().all(|ch| GLITCH_GLYPHS.contains(ch)));
        assert_eq!(scramble("NEON CITY", 0.0, &mut rng), "NEON CITY");
    }

    #[test]
    fn rejects_probability_above_one() {
        let mut surface = MemoryTextSurface::new();
        let err = GlitchText::mount(
            "x",
            GlitchConfig {
                trigger_probability: 1.2,
                ..GlitchConfig::default()
            },
            &mut surface,
            0,
        )
        .expect_err("probability above one must fail");
        assert!(matches!(err, EffectConfigError::InvalidProbability { .. }));
    }

    #[test]
    fn hover_respects_flag_but_click_does_not() {
        let mut surface = MemoryTextSurface::new();
        let mut rng = seeded_rng(4);
        let mut glitch = GlitchText::mount(
            "SYSTEM",
            GlitchConfig {
                enable_hover: false,
                ..GlitchConfig::default()
            },
            &mut surface,
            0,
        )
        .expect("mount");

        assert!(!glitch.hover(10, &mut surface, &mut rng));
        assert!(glitch.click(10, &mut surface, &mut rng));
        assert!(glitch.is_glitching());
    }
}

//! Neon glow text engine.
//!
//! # Responsibility
//! - Pulse a layered glow between the resting and peak intensity forever.
//! - Blend towards a stronger, scaled-up glow while hovered.
//! - Optionally type the text out one character per interval.
//!
//! # Invariants
//! - Typing runs at most once per mount and is never restarted.
//! - Hover transitions start from the current blended value, so rapid
//!   enter/leave pairs never jump.

use crate::animation::timer::IntervalTimer;
use crate::animation::tween::{Easing, Tween, Yoyo};
use crate::effects::surface::{GlowStyle, TextSurface, Transform};
use crate::effects::EffectConfigError;
use log::info;

/// Shadow blur radii at rest, innermost first.
pub const BASE_GLOW_RADII: [f64; 4] = [5.0, 10.0, 15.0, 20.0];
/// Radius multiplier while hovered.
pub const HOVER_GLOW_FACTOR: f64 = 2.0;
pub const HOVER_SCALE: f64 = 1.1;
pub const HOVER_TRANSITION_MS: u64 = 300;

#[derive(Debug, Clone, PartialEq)]
pub struct NeonConfig {
    pub color: String,
    /// Peak radius multiplier of the idle pulse; `1.0` disables pulsing.
    pub glow_intensity: f64,
    /// Duration of one pulse leg (rest to peak).
    pub pulse_half_period_ms: u64,
    pub enable_hover: bool,
    pub enable_typing: bool,
    pub typing_interval_ms: u64,
}

impl Default for NeonConfig {
    fn default() -> Self {
        Self {
            color: "#00ffff".to_string(),
            glow_intensity: 2.0,
            pulse_half_period_ms: 2_000,
            enable_hover: true,
            enable_typing: false,
            typing_interval_ms: 100,
        }
    }
}

impl NeonConfig {
    pub fn validate(&self) -> Result<(), EffectConfigError> {
        if !(self.glow_intensity.is_finite() && self.glow_intensity > 0.0) {
            return Err(EffectConfigError::InvalidRange {
                field: "glow_intensity",
                min: 0.0,
                max: self.glow_intensity,
            });
        }
        if self.pulse_half_period_ms == 0 {
            return Err(EffectConfigError::ZeroDuration("pulse_half_period_ms"));
        }
        if self.enable_typing && self.typing_interval_ms == 0 {
            return Err(EffectConfigError::ZeroDuration("typing_interval_ms"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Typing {
    revealed: usize,
    timer: IntervalTimer,
}

/// Neon driver bound to one text element.
#[derive(Debug)]
pub struct NeonText {
    config: NeonConfig,
    chars: Vec<char>,
    pulse: Yoyo,
    /// 0 at rest, 1 fully hovered.
    hover_level: Tween,
    hovered: bool,
    typing: Option<Typing>,
    mounted: bool,
}

impl NeonText {
    /// Renders the element and starts the pulse (and typing, if enabled).
    ///
    /// # Errors
    /// - Returns `EffectConfigError` when `config` fails validation.
    pub fn mount<S>(
        text: &str,
        config: NeonConfig,
        surface: &mut S,
        now_ms: u64,
    ) -> Result<Self, EffectConfigError>
    where
        S: TextSurface + ?Sized,
    {
        config.validate()?;
        let chars: Vec<char> = text.chars().collect();
        let typing = config.enable_typing.then(|| Typing {
            // The first character appears immediately.
            revealed: chars.len().min(1),
            timer: IntervalTimer::start(config.typing_interval_ms, now_ms),
        });
        let neon = Self {
            pulse: Yoyo::new(
                1.0,
                config.glow_intensity,
                now_ms,
                config.pulse_half_period_ms,
                Easing::Power2InOut,
            ),
            hover_level: Tween::hold(0.0, now_ms),
            hovered: false,
            typing,
            mounted: true,
            chars,
            config,
        };
        surface.set_text(neon.visible_text().as_str());
        surface.set_glow(&neon.glow_at(now_ms));
        surface.set_transform(neon.transform_at(now_ms));
        info!(
            "event=effect_mount module=neon status=ok chars={} typing={}",
            neon.chars.len(),
            neon.typing.is_some()
        );
        Ok(neon.finish_typing_if_done())
    }

    /// Advances typing, pulse and hover blend to `now_ms`.
    pub fn update<S>(&mut self, now_ms: u64, surface: &mut S)
    where
        S: TextSurface + ?Sized,
    {
        if !self.mounted {
            return;
        }
        let total = self.chars.len();
        let mut typed = false;
        if let Some(typing) = self.typing.as_mut() {
            let due = typing.timer.poll(now_ms) as usize;
            if due > 0 && typing.revealed < total {
                typing.revealed = (typing.revealed + due).min(total);
                typed = true;
            }
            if typing.revealed >= total {
                typing.timer.cancel();
            }
        }
        if typed {
            surface.set_text(self.visible_text().as_str());
        }
        surface.set_glow(&self.glow_at(now_ms));
        surface.set_transform(self.transform_at(now_ms));
    }

    pub fn hover_enter(&mut self, now_ms: u64) {
        if !self.mounted || !self.config.enable_hover || self.hovered {
            return;
        }
        self.hovered = true;
        self.hover_level =
            self.hover_level
                .retarget(1.0, now_ms, HOVER_TRANSITION_MS, Easing::Power2Out);
    }

    pub fn hover_leave(&mut self, now_ms: u64) {
        if !self.mounted || !self.config.enable_hover || !self.hovered {
            return;
        }
        self.hovered = false;
        self.hover_level =
            self.hover_level
                .retarget(0.0, now_ms, HOVER_TRANSITION_MS, Easing::Power2Out);
    }

    /// Stops typing and pulsing; the element keeps its last rendered text.
    pub fn unmount(&mut self) {
        if let Some(typing) = self.typing.as_mut() {
            typing.timer.cancel();
        }
        if self.mounted {
            info!("event=effect_unmount module=neon status=ok");
        }
        self.mounted = false;
    }

    /// Glow radii blended from the pulse and the hover level.
    pub fn glow_at(&self, now_ms: u64) -> GlowStyle {
        let hover = self.hover_level.value_at(now_ms);
        let pulse = self.pulse.value_at(now_ms);
        let factor = pulse * (1.0 - hover) + HOVER_GLOW_FACTOR * hover;
        GlowStyle {
            color: self.config.color.clone(),
            radii: BASE_GLOW_RADII.map(|radius| radius * factor),
        }
    }

    pub fn transform_at(&self, now_ms: u64) -> Transform {
        let hover = self.hover_level.value_at(now_ms);
        Transform {
            scale: 1.0 + (HOVER_SCALE - 1.0) * hover,
            ..Transform::IDENTITY
        }
    }

    /// Text currently visible, honouring typing progress.
    pub fn visible_text(&self) -> String {
        match &self.typing {
            Some(typing) => self.chars.iter().take(typing.revealed).collect(),
            None => self.chars.iter().collect(),
        }
    }

    pub fn typing_complete(&self) -> bool {
        self.typing
            .as_ref()
            .map_or(true, |typing| typing.revealed >= self.chars.len())
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn finish_typing_if_done(mut self) -> Self {
        let total = self.chars.len();
        if let Some(typing) = self.typing.as_mut() {
            if typing.revealed >= total {
                typing.timer.cancel();
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{NeonConfig, NeonText, BASE_GLOW_RADII, HOVER_SCALE};
    use crate::effects::surface::MemoryTextSurface;

    #[test]
    fn pulse_peaks_at_configured_intensity() {
        let mut surface = MemoryTextSurface::new();
        let neon = NeonText::mount("HELLO", NeonConfig::default(), &mut surface, 0)
            .expect("mount");
        assert_eq!(neon.glow_at(0).radii, BASE_GLOW_RADII);
        assert_eq!(neon.glow_at(2_000).radii, [10.0, 20.0, 30.0, 40.0]);
        assert_eq!(neon.glow_at(4_000).radii, BASE_GLOW_RADII);
    }

    #[test]
    fn hover_scales_up_and_back() {
        let mut surface = MemoryTextSurface::new();
        let mut neon = NeonText::mount("HELLO", NeonConfig::default(), &mut surface, 0)
            .expect("mount");
        neon.hover_enter(100);
        assert_eq!(neon.transform_at(400).scale, HOVER_SCALE);
        assert_eq!(neon.glow_at(400).radii, [10.0, 20.0, 30.0, 40.0]);

        neon.hover_leave(400);
        assert_eq!(neon.transform_at(700).scale, 1.0);
    }

    #[test]
    fn disabled_hover_is_ignored() {
        let mut surface = MemoryTextSurface::new();
        let mut neon = NeonText::mount(
            "HELLO",
            NeonConfig {
                enable_hover: false,
                ..NeonConfig::default()
            },
            &mut surface,
            0,
        )
        .expect("mount");
        neon.hover_enter(0);
        assert!(!neon.is_hovered());
        assert_eq!(neon.transform_at(1_000).scale, 1.0);
    }
}

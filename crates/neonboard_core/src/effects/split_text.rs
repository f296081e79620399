//! Staggered per-character reveal for page titles.

use crate::animation::tween::{Easing, Tween};
use crate::effects::surface::Point;
use crate::effects::EffectConfigError;

/// Offset of a hidden character for slide variants.
pub const SLIDE_DISTANCE: f64 = 50.0;
/// Scale of a hidden character for the `Scale` variant.
pub const HIDDEN_SCALE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealVariant {
    FadeIn,
    SlideUp,
    SlideDown,
    SlideLeft,
    SlideRight,
    Scale,
}

impl RevealVariant {
    fn hidden_offset(self) -> Point {
        match self {
            Self::SlideUp => Point::new(0.0, SLIDE_DISTANCE),
            Self::SlideDown => Point::new(0.0, -SLIDE_DISTANCE),
            Self::SlideLeft => Point::new(SLIDE_DISTANCE, 0.0),
            Self::SlideRight => Point::new(-SLIDE_DISTANCE, 0.0),
            Self::FadeIn | Self::Scale => Point::default(),
        }
    }

    fn hidden_scale(self) -> f64 {
        match self {
            Self::Scale => HIDDEN_SCALE,
            _ => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitTextConfig {
    pub delay_ms: u64,
    pub stagger_ms: u64,
    pub duration_ms: u64,
    pub variant: RevealVariant,
}

impl Default for SplitTextConfig {
    fn default() -> Self {
        Self {
            delay_ms: 0,
            stagger_ms: 50,
            duration_ms: 500,
            variant: RevealVariant::FadeIn,
        }
    }
}

/// Render state of one character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharState {
    pub ch: char,
    pub opacity: f64,
    pub offset: Point,
    pub scale: f64,
    /// Whitespace stays inline so words keep their spacing.
    pub inline: bool,
}

/// Reveal schedule for one string. Starts once and never replays.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitText {
    chars: Vec<char>,
    config: SplitTextConfig,
    started_at_ms: Option<u64>,
}

impl SplitText {
    /// # Errors
    /// - Returns `EffectConfigError::ZeroDuration` for a zero `duration_ms`.
    pub fn new(text: &str, config: SplitTextConfig) -> Result<Self, EffectConfigError> {
        if config.duration_ms == 0 {
            return Err(EffectConfigError::ZeroDuration("duration_ms"));
        }
        Ok(Self {
            chars: text.chars().collect(),
            config,
            started_at_ms: None,
        })
    }

    /// Starts the reveal when the text first enters view. Later calls are
    /// ignored.
    pub fn reveal(&mut self, now_ms: u64) -> bool {
        if self.started_at_ms.is_some() {
            return false;
        }
        self.started_at_ms = Some(now_ms);
        true
    }

    pub fn is_started(&self) -> bool {
        self.started_at_ms.is_some()
    }

    /// Time at which the last character finishes.
    pub fn end_ms(&self) -> Option<u64> {
        let started = self.started_at_ms?;
        let last_index = self.chars.len().saturating_sub(1) as u64;
        Some(
            started
                + self.config.delay_ms
                + last_index * self.config.stagger_ms
                + self.config.duration_ms,
        )
    }

    pub fn is_complete(&self, now_ms: u64) -> bool {
        self.end_ms().is_some_and(|end| now_ms >= end)
    }

    pub fn char_states(&self, now_ms: u64) -> Vec<CharState> {
        let hidden_offset = self.config.variant.hidden_offset();
        let hidden_scale = self.config.variant.hidden_scale();
        self.chars
            .iter()
            .enumerate()
            .map(|(index, &ch)| {
                let progress = match self.started_at_ms {
                    None => 0.0,
                    Some(started) => {
                        let start =
                            started + self.config.delay_ms + index as u64 * self.config.stagger_ms;
                        Tween::new(0.0, 1.0, start, self.config.duration_ms, Easing::Power2Out)
                            .value_at(now_ms)
                    }
                };
                CharState {
                    ch,
                    opacity: progress,
                    offset: Point::new(
                        hidden_offset.x * (1.0 - progress),
                        hidden_offset.y * (1.0 - progress),
                    ),
                    scale: hidden_scale + (1.0 - hidden_scale) * progress,
                    inline: ch == ' ',
                }
            })
            .collect()
    }
}

//! Procedural visual effect engines.
//!
//! # Responsibility
//! - Drive particle, glitch, neon and staggered-reveal animations from an
//!   external clock and an injected random source.
//! - Touch visuals only through the `surface` traits.
//!
//! # Invariants
//! - Every engine owns its per-frame state exclusively.
//! - `unmount` cancels all timers and leaves no live visuals behind.
//!
//! # See also
//! - `crate::animation` for the timers and tweens the engines share.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod glitch;
pub mod neon;
pub mod particles;
pub mod split_text;
pub mod surface;

/// Invalid effect-engine parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum EffectConfigError {
    /// Particles requested but no colours to pick from.
    EmptyPalette,
    /// A `(min, max)` pair is reversed or outside its domain.
    InvalidRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
    /// A probability or intensity is outside `[0, 1]`.
    InvalidProbability { field: &'static str, value: f64 },
    /// A period that must be positive is zero.
    ZeroDuration(&'static str),
}

impl Display for EffectConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPalette => write!(f, "particle colour palette must not be empty"),
            Self::InvalidRange { field, min, max } => {
                write!(f, "{field} range ({min}, {max}) is invalid")
            }
            Self::InvalidProbability { field, value } => {
                write!(f, "{field} must be in [0, 1], got {value}")
            }
            Self::ZeroDuration(field) => write!(f, "{field} must be greater than zero"),
        }
    }
}

impl Error for EffectConfigError {}

pub(crate) fn require_unit(field: &'static str, value: f64) -> Result<(), EffectConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(EffectConfigError::InvalidProbability { field, value })
    }
}

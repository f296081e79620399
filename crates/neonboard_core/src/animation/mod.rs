//! Shared frame-scheduling utilities for store drivers and effect engines.
//!
//! # Responsibility
//! - Abstract time behind an injectable clock so tests advance virtual time.
//! - Provide polled interval/timeout timers, eased tweens and a frame loop.
//! - Provide small random helpers over an injected `rand::Rng`.
//!
//! # Invariants
//! - Nothing here reads wall time except `SystemClock`.
//! - Cancelled timers never report due ticks.

pub mod clock;
pub mod frame;
pub mod random;
pub mod timer;
pub mod tween;

pub use clock::{Clock, ManualClock, SystemClock};
pub use frame::FrameLoop;
pub use random::{chance, entropy_rng, pick, seeded_rng, uniform};
pub use timer::{IntervalTimer, Timeout};
pub use tween::{Easing, Tween, Yoyo};

//! Headless dashboard session.
//!
//! # Responsibility
//! - Wire the store, the simulation driver and every effect engine together.
//! - Advance them from one clock, frame by frame, over in-memory surfaces.
//!
//! # Invariants
//! - `shutdown` stops the driver and leaves no live particle visuals.
//! - Time only moves forward; stale readings are ignored.

use crate::animation::clock::Clock;
use crate::animation::frame::FrameLoop;
use crate::config::{ConfigError, DashboardConfig};
use crate::effects::glitch::{GlitchConfig, GlitchText};
use crate::effects::neon::{NeonConfig, NeonText};
use crate::effects::particles::{ParticleField, ParticleFieldConfig};
use crate::effects::split_text::{RevealVariant, SplitText, SplitTextConfig};
use crate::effects::surface::{MemorySurface, MemoryTextSurface, Point, Size};
use crate::effects::EffectConfigError;
use crate::sim::SimulationDriver;
use crate::store::DashboardStore;
use log::info;
use rand::Rng;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_BRAND_TEXT: &str = "CYBER DASH";
pub const DEFAULT_WELCOME_TEXT: &str = "Welcome back, Admin";

/// Engine parameters for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectsConfig {
    pub viewport: Size,
    pub particles: ParticleFieldConfig,
    pub glitch: GlitchConfig,
    pub neon: NeonConfig,
    pub reveal: SplitTextConfig,
    pub brand_text: String,
    pub welcome_text: String,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            viewport: Size::new(1440.0, 900.0),
            particles: ParticleFieldConfig::default(),
            glitch: GlitchConfig::default(),
            neon: NeonConfig::default(),
            reveal: SplitTextConfig {
                variant: RevealVariant::SlideRight,
                ..SplitTextConfig::default()
            },
            brand_text: DEFAULT_BRAND_TEXT.to_string(),
            welcome_text: DEFAULT_WELCOME_TEXT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeError {
    Config(ConfigError),
    Effect(EffectConfigError),
}

impl Display for RuntimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid dashboard config: {err}"),
            Self::Effect(err) => write!(f, "invalid effect config: {err}"),
        }
    }
}

impl Error for RuntimeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Effect(err) => Some(err),
        }
    }
}

impl From<ConfigError> for RuntimeError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<EffectConfigError> for RuntimeError {
    fn from(value: EffectConfigError) -> Self {
        Self::Effect(value)
    }
}

/// Counters describing a session so far.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuntimeSummary {
    pub now_ms: u64,
    pub frames: u64,
    pub stats_updates: u64,
    pub notifications_enqueued: u64,
    pub live_particles: usize,
    pub particle_respawns: u64,
    pub glitch_cycles: u64,
    pub brand_text: String,
    pub welcome_revealed: bool,
}

/// One dashboard session driven by `clock` and `rng`.
pub struct DashboardRuntime<R: Rng, C: Clock> {
    clock: C,
    rng: R,
    store: DashboardStore,
    driver: SimulationDriver,
    frames: FrameLoop,
    particles: ParticleField,
    particle_surface: MemorySurface,
    glitch: GlitchText,
    glitch_surface: MemoryTextSurface,
    neon: NeonText,
    neon_surface: MemoryTextSurface,
    welcome: SplitText,
    now_ms: u64,
    stats_updates: u64,
    notifications_enqueued: u64,
    running: bool,
}

impl<R: Rng, C: Clock> DashboardRuntime<R, C> {
    /// Validates both configs, mounts every engine and starts the driver at
    /// the clock's current reading.
    ///
    /// # Errors
    /// - Returns `RuntimeError::Config` when `config` is invalid.
    /// - Returns `RuntimeError::Effect` when an engine rejects its parameters.
    pub fn start(
        config: &DashboardConfig,
        effects: EffectsConfig,
        clock: C,
        mut rng: R,
    ) -> Result<Self, RuntimeError> {
        config.validate()?;
        let now_ms = clock.now_ms();

        let mut store = DashboardStore::with_config(config);
        let mut particle_surface = MemorySurface::new(effects.viewport);
        let mut glitch_surface = MemoryTextSurface::new();
        let mut neon_surface = MemoryTextSurface::new();

        let particles =
            ParticleField::mount(effects.particles, &mut particle_surface, &mut rng, now_ms)?;
        let glitch = GlitchText::mount(
            effects.brand_text.as_str(),
            effects.glitch,
            &mut glitch_surface,
            now_ms,
        )?;
        let neon = NeonText::mount(
            effects.brand_text.as_str(),
            effects.neon,
            &mut neon_surface,
            now_ms,
        )?;
        let mut welcome = SplitText::new(effects.welcome_text.as_str(), effects.reveal)?;
        welcome.reveal(now_ms);

        store.set_animating(true);
        let driver = SimulationDriver::start(config, now_ms);
        info!(
            "event=runtime_start module=runtime status=ok now_ms={now_ms} frame_ms={}",
            config.frame_interval_ms
        );

        Ok(Self {
            clock,
            rng,
            store,
            driver,
            frames: FrameLoop::new(config.frame_interval_ms),
            particles,
            particle_surface,
            glitch,
            glitch_surface,
            neon,
            neon_surface,
            welcome,
            now_ms,
            stats_updates: 0,
            notifications_enqueued: 0,
            running: true,
        })
    }

    /// Advances to the clock's current reading.
    pub fn advance(&mut self) {
        let now_ms = self.clock.now_ms();
        self.advance_to(now_ms);
    }

    /// Runs the simulation jobs and every frame due up to `now_ms`.
    pub fn advance_to(&mut self, now_ms: u64) {
        if !self.running || now_ms < self.now_ms {
            return;
        }
        self.now_ms = now_ms;

        let report = self.driver.tick(now_ms, &mut self.store, &mut self.rng);
        self.stats_updates += u64::from(report.stats_updates);
        self.notifications_enqueued += report.notifications.len() as u64;

        for frame_ms in self.frames.frames_until(now_ms) {
            self.particles
                .update(frame_ms, &mut self.particle_surface, &mut self.rng);
            self.glitch
                .update(frame_ms, &mut self.glitch_surface, &mut self.rng);
            self.neon.update(frame_ms, &mut self.neon_surface);
        }
    }

    /// Forwards a pointer position to the particle field.
    pub fn pointer_move(&mut self, pointer: Point) -> usize {
        if !self.running {
            return 0;
        }
        self.particles.pointer_move(pointer, self.now_ms)
    }

    /// Clicks the brand title, forcing a glitch unless one is running.
    pub fn click_brand(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.glitch
            .click(self.now_ms, &mut self.glitch_surface, &mut self.rng)
    }

    pub fn hover_brand(&mut self, hovered: bool) {
        if !self.running {
            return;
        }
        if hovered {
            self.neon.hover_enter(self.now_ms);
            self.glitch
                .hover(self.now_ms, &mut self.glitch_surface, &mut self.rng);
        } else {
            self.neon.hover_leave(self.now_ms);
        }
    }

    /// Stops the driver and unmounts every engine. Idempotent.
    pub fn shutdown(&mut self) {
        if !self.running {
            return;
        }
        self.driver.stop();
        let removed = self.particles.unmount(&mut self.particle_surface);
        self.glitch.unmount(&mut self.glitch_surface);
        self.neon.unmount();
        self.store.set_animating(false);
        self.running = false;
        info!(
            "event=runtime_stop module=runtime status=ok now_ms={} particles_removed={removed}",
            self.now_ms
        );
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn store(&self) -> &DashboardStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut DashboardStore {
        &mut self.store
    }

    pub fn particle_surface(&self) -> &MemorySurface {
        &self.particle_surface
    }

    pub fn glitch_surface(&self) -> &MemoryTextSurface {
        &self.glitch_surface
    }

    pub fn neon_surface(&self) -> &MemoryTextSurface {
        &self.neon_surface
    }

    pub fn welcome(&self) -> &SplitText {
        &self.welcome
    }

    pub fn summary(&self) -> RuntimeSummary {
        RuntimeSummary {
            now_ms: self.now_ms,
            frames: self.frames.frame_count(),
            stats_updates: self.stats_updates,
            notifications_enqueued: self.notifications_enqueued,
            live_particles: self.particle_surface.live_nodes(),
            particle_respawns: self.particles.respawns(),
            glitch_cycles: self.glitch.cycles_completed(),
            brand_text: self.glitch.displayed_text().to_string(),
            welcome_revealed: self.welcome.is_complete(self.now_ms),
        }
    }
}

impl<R: Rng, C: Clock> Drop for DashboardRuntime<R, C> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::{DashboardRuntime, EffectsConfig, RuntimeError};
    use crate::animation::clock::ManualClock;
    use crate::animation::random::seeded_rng;
    use crate::config::DashboardConfig;

    #[test]
    fn rejects_invalid_dashboard_config() {
        let config = DashboardConfig {
            stats_interval_ms: 0,
            ..DashboardConfig::default()
        };
        let result = DashboardRuntime::start(
            &config,
            EffectsConfig::default(),
            ManualClock::new(),
            seeded_rng(1),
        );
        assert!(matches!(result, Err(RuntimeError::Config(_))));
    }

    #[test]
    fn shutdown_clears_particles_and_animating_flag() {
        let mut runtime = DashboardRuntime::start(
            &DashboardConfig::default(),
            EffectsConfig::default(),
            ManualClock::new(),
            seeded_rng(2),
        )
        .expect("start");
        assert!(runtime.store().is_animating());
        runtime.advance_to(1_000);

        runtime.shutdown();
        assert!(!runtime.is_running());
        assert!(!runtime.store().is_animating());
        assert_eq!(runtime.particle_surface().live_nodes(), 0);
    }
}

//! Core logic for the Neonboard dashboard.
//! This crate owns the dashboard state, its simulation drivers and the
//! procedural effect engines; hosts only render what it reports.

pub mod animation;
pub mod config;
pub mod effects;
pub mod logging;
pub mod model;
pub mod runtime;
pub mod sim;
pub mod store;

pub use config::{ConfigError, DashboardConfig, SettingsPolicy};
pub use effects::EffectConfigError;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::settings::{SettingsError, UiSettings, UiSettingsPatch};
pub use runtime::{DashboardRuntime, EffectsConfig, RuntimeError, RuntimeSummary};
pub use sim::SimulationDriver;
pub use store::{DashboardState, DashboardStore, StoreChange, StoreResult};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

//! UI display preferences and fluid-simulation parameters.
//!
//! # Responsibility
//! - Define the canonical `UiSettings` record with total defaults.
//! - Define partial patches and their shallow-merge semantics.
//! - Provide range validation used by the strict settings policy.
//!
//! # Invariants
//! - Every field has an always-valid default.
//! - Applying a patch never drops sibling fields; only fields present in the
//!   patch change.
//! - The nested fluid block merges one level deeper than the top record.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Lower bound of the sidebar width slider.
pub const SIDEBAR_WIDTH_MIN: u32 = 200;
/// Upper bound of the sidebar width slider.
pub const SIDEBAR_WIDTH_MAX: u32 = 400;
/// Upper bound of the animation speed slider.
pub const ANIMATION_SPEED_MAX: u32 = 100;

/// Named colour palette for the whole dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeId {
    Cyberpunk,
    Nature,
    Sunset,
    Ocean,
}

impl ThemeId {
    /// Gradient stops `(from, to)` used for theme previews and accents.
    pub fn palette(self) -> (&'static str, &'static str) {
        match self {
            Self::Cyberpunk => ("#a855f7", "#22d3ee"),
            Self::Nature => ("#22c55e", "#16a34a"),
            Self::Sunset => ("#f97316", "#ea580c"),
            Self::Ocean => ("#3b82f6", "#1d4ed8"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cyberpunk => "cyberpunk",
            Self::Nature => "nature",
            Self::Sunset => "sunset",
            Self::Ocean => "ocean",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontSize {
    Small,
    Medium,
    Large,
    #[serde(rename = "xlarge")]
    XLarge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderRadius {
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Spacing {
    Compact,
    Normal,
    Spacious,
}

/// Normalized RGB triple, each channel expected in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl ColorRgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

/// Parameter block for the splash-cursor fluid simulation.
///
/// Wire names keep the upper-case constant style the renderer expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct FluidSettings {
    pub sim_resolution: u32,
    pub dye_resolution: u32,
    pub capture_resolution: u32,
    pub density_dissipation: f64,
    pub velocity_dissipation: f64,
    pub pressure: f64,
    pub pressure_iterations: u32,
    pub curl: f64,
    pub splat_radius: f64,
    pub splat_force: f64,
    pub shading: bool,
    pub color_update_speed: f64,
    pub back_color: ColorRgb,
    pub transparent: bool,
}

impl Default for FluidSettings {
    fn default() -> Self {
        Self {
            sim_resolution: 128,
            dye_resolution: 1440,
            capture_resolution: 512,
            density_dissipation: 3.5,
            velocity_dissipation: 2.0,
            pressure: 0.1,
            pressure_iterations: 20,
            curl: 3.0,
            splat_radius: 0.2,
            splat_force: 6000.0,
            shading: true,
            color_update_speed: 10.0,
            back_color: ColorRgb::new(0.5, 0.0, 0.0),
            transparent: true,
        }
    }
}

/// Partial fluid-settings update. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct FluidSettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sim_resolution: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dye_resolution: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capture_resolution: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density_dissipation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub velocity_dissipation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure_iterations: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curl: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub splat_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub splat_force: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shading: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_update_speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back_color: Option<ColorRgb>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transparent: Option<bool>,
}

impl FluidSettingsPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl FluidSettings {
    /// Merges `patch` over the current values.
    pub fn apply(&mut self, patch: &FluidSettingsPatch) {
        merge(&mut self.sim_resolution, patch.sim_resolution);
        merge(&mut self.dye_resolution, patch.dye_resolution);
        merge(&mut self.capture_resolution, patch.capture_resolution);
        merge(&mut self.density_dissipation, patch.density_dissipation);
        merge(&mut self.velocity_dissipation, patch.velocity_dissipation);
        merge(&mut self.pressure, patch.pressure);
        merge(&mut self.pressure_iterations, patch.pressure_iterations);
        merge(&mut self.curl, patch.curl);
        merge(&mut self.splat_radius, patch.splat_radius);
        merge(&mut self.splat_force, patch.splat_force);
        merge(&mut self.shading, patch.shading);
        merge(&mut self.color_update_speed, patch.color_update_speed);
        merge(&mut self.back_color, patch.back_color);
        merge(&mut self.transparent, patch.transparent);
    }

    /// Checks numeric ranges the renderer can actually honour.
    pub fn validate(&self) -> Result<(), SettingsError> {
        require_positive("fluid.sim_resolution", f64::from(self.sim_resolution))?;
        require_positive("fluid.dye_resolution", f64::from(self.dye_resolution))?;
        require_positive(
            "fluid.capture_resolution",
            f64::from(self.capture_resolution),
        )?;
        require_positive(
            "fluid.pressure_iterations",
            f64::from(self.pressure_iterations),
        )?;
        require_non_negative("fluid.density_dissipation", self.density_dissipation)?;
        require_non_negative("fluid.velocity_dissipation", self.velocity_dissipation)?;
        require_non_negative("fluid.splat_radius", self.splat_radius)?;
        require_non_negative("fluid.splat_force", self.splat_force)?;
        require_within("fluid.back_color.r", self.back_color.r, 0.0, 1.0)?;
        require_within("fluid.back_color.g", self.back_color.g, 0.0, 1.0)?;
        require_within("fluid.back_color.b", self.back_color.b, 0.0, 1.0)?;
        Ok(())
    }
}

/// Cross-page display preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiSettings {
    pub theme: ThemeId,
    /// Slider value in `1..=100`; transitions last `speed / 100` seconds.
    pub animation_speed: u32,
    pub font_size: FontSize,
    pub compact_mode: bool,
    pub blur_effect: bool,
    pub glow_effect: bool,
    pub particle_effect: bool,
    pub splash_cursor: bool,
    pub fluid_settings: FluidSettings,
    /// Pixels; the settings page slider spans `200..=400`.
    pub sidebar_width: u32,
    pub border_radius: BorderRadius,
    pub spacing: Spacing,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            theme: ThemeId::Cyberpunk,
            animation_speed: 50,
            font_size: FontSize::Medium,
            compact_mode: false,
            blur_effect: true,
            glow_effect: true,
            particle_effect: true,
            splash_cursor: true,
            fluid_settings: FluidSettings::default(),
            sidebar_width: 280,
            border_radius: BorderRadius::Medium,
            spacing: Spacing::Normal,
        }
    }
}

/// Partial UI-settings update.
///
/// `fluid_settings` is itself a patch, so a caller can change one fluid
/// coefficient without restating the whole block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation_speed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<FontSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compact_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blur_effect: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glow_effect: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub particle_effect: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub splash_cursor: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fluid_settings: Option<FluidSettingsPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<BorderRadius>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<Spacing>,
}

impl UiSettingsPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl UiSettings {
    /// Shallow merge of `patch`; the fluid block merges one level deeper.
    pub fn apply(&mut self, patch: &UiSettingsPatch) {
        merge(&mut self.theme, patch.theme);
        merge(&mut self.animation_speed, patch.animation_speed);
        merge(&mut self.font_size, patch.font_size);
        merge(&mut self.compact_mode, patch.compact_mode);
        merge(&mut self.blur_effect, patch.blur_effect);
        merge(&mut self.glow_effect, patch.glow_effect);
        merge(&mut self.particle_effect, patch.particle_effect);
        merge(&mut self.splash_cursor, patch.splash_cursor);
        if let Some(fluid) = &patch.fluid_settings {
            self.fluid_settings.apply(fluid);
        }
        merge(&mut self.sidebar_width, patch.sidebar_width);
        merge(&mut self.border_radius, patch.border_radius);
        merge(&mut self.spacing, patch.spacing);
    }

    /// Checks slider bounds and the nested fluid block.
    pub fn validate(&self) -> Result<(), SettingsError> {
        require_within(
            "animation_speed",
            f64::from(self.animation_speed),
            1.0,
            f64::from(ANIMATION_SPEED_MAX),
        )?;
        require_within(
            "sidebar_width",
            f64::from(self.sidebar_width),
            f64::from(SIDEBAR_WIDTH_MIN),
            f64::from(SIDEBAR_WIDTH_MAX),
        )?;
        self.fluid_settings.validate()
    }

    /// Duration of a standard widget transition.
    ///
    /// The animation speed slider is divided by 100 to get seconds, so the
    /// default speed of 50 yields a 500 ms transition.
    pub fn transition_duration_ms(&self) -> u64 {
        u64::from(self.animation_speed) * 1000 / u64::from(ANIMATION_SPEED_MAX)
    }
}

fn merge<T: Copy>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Out-of-range settings input rejected by the strict policy.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsError {
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: Option<f64>,
    },
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange {
                field,
                value,
                min,
                max: Some(max),
            } => write!(f, "{field} = {value} is outside [{min}, {max}]"),
            Self::OutOfRange {
                field,
                value,
                min,
                max: None,
            } => write!(f, "{field} = {value} must be >= {min}"),
        }
    }
}

impl Error for SettingsError {}

fn require_within(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), SettingsError> {
    if value.is_finite() && value >= min && value <= max {
        return Ok(());
    }
    Err(SettingsError::OutOfRange {
        field,
        value,
        min,
        max: Some(max),
    })
}

fn require_non_negative(field: &'static str, value: f64) -> Result<(), SettingsError> {
    if value.is_finite() && value >= 0.0 {
        return Ok(());
    }
    Err(SettingsError::OutOfRange {
        field,
        value,
        min: 0.0,
        max: None,
    })
}

fn require_positive(field: &'static str, value: f64) -> Result<(), SettingsError> {
    if value >= 1.0 {
        return Ok(());
    }
    Err(SettingsError::OutOfRange {
        field,
        value,
        min: 1.0,
        max: None,
    })
}

#[cfg(test)]
mod tests {
    use super::{FluidSettingsPatch, SettingsError, ThemeId, UiSettings, UiSettingsPatch};

    #[test]
    fn theme_names_match_wire_form() {
        for theme in [
            ThemeId::Cyberpunk,
            ThemeId::Nature,
            ThemeId::Sunset,
            ThemeId::Ocean,
        ] {
            let wire = serde_json::to_value(theme).expect("theme serializes");
            assert_eq!(wire, theme.as_str());
        }
    }

    #[test]
    fn defaults_pass_validation() {
        UiSettings::default()
            .validate()
            .expect("defaults must always be valid");
    }

    #[test]
    fn nested_fluid_patch_keeps_sibling_coefficients() {
        let mut settings = UiSettings::default();
        settings.apply(&UiSettingsPatch {
            fluid_settings: Some(FluidSettingsPatch {
                curl: Some(30.0),
                ..FluidSettingsPatch::default()
            }),
            ..UiSettingsPatch::default()
        });

        assert_eq!(settings.fluid_settings.curl, 30.0);
        assert_eq!(settings.fluid_settings.splat_force, 6000.0);
        assert_eq!(settings.fluid_settings.pressure_iterations, 20);
    }

    #[test]
    fn validate_reports_field_name() {
        let settings = UiSettings {
            sidebar_width: 50,
            ..UiSettings::default()
        };
        let err = settings.validate().expect_err("50px sidebar is out of range");
        assert!(matches!(
            err,
            SettingsError::OutOfRange {
                field: "sidebar_width",
                ..
            }
        ));
        assert!(err.to_string().contains("[200, 400]"));
    }

    #[test]
    fn transition_duration_follows_speed_slider() {
        let mut settings = UiSettings::default();
        assert_eq!(settings.transition_duration_ms(), 500);
        settings.animation_speed = 100;
        assert_eq!(settings.transition_duration_ms(), 1000);
    }

    #[test]
    fn every_theme_has_a_palette() {
        for theme in [
            ThemeId::Cyberpunk,
            ThemeId::Nature,
            ThemeId::Sunset,
            ThemeId::Ocean,
        ] {
            let (from, to) = theme.palette();
            assert!(from.starts_with('#') && to.starts_with('#'));
        }
    }
}

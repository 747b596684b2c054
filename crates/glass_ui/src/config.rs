//! Engine configuration.
//!
//! Every constant the overlay engine uses can be overridden from a TOML file
//! loaded once at startup. Missing tables and keys fall back to the defaults
//! below.
//!
//! ```toml
//! [geometry]
//! min_width = 26.0
//! min_height = 30.0
//! width_padding = 12.0
//! inset = 12.0
//!
//! [tracker]
//! flex = 0.08
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GlassError, GlassResult};

/// Overlay geometry constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Minimum overlay width.
    pub min_width: f32,
    /// Minimum overlay height.
    pub min_height: f32,
    /// Extra width added around the target.
    pub width_padding: f32,
    /// Horizontal inset the overlay keeps from the container edges.
    pub inset: f32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            min_width: 26.0,
            min_height: 30.0,
            width_padding: 12.0,
            inset: 12.0,
        }
    }
}

/// Pointer-follow smoothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Fraction of the remaining distance covered per frame, in `(0, 1]`.
    pub flex: f32,
    /// Steps at or below this size (in percent) snap onto the target.
    pub epsilon: f32,
    /// Minimum time between applied frames, in milliseconds.
    pub frame_interval_ms: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            flex: 0.08,
            epsilon: 0.1,
            frame_interval_ms: 16.0,
        }
    }
}

/// Ambient highlight look.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookConfig {
    /// Overall highlight strength.
    pub intensity: f32,
    /// Corner radius of the glass surface.
    pub radius: f32,
    /// Draw the small bright core on top of the soft halo.
    pub hotspot: bool,
    /// Viewports at or below this width use the mobile look.
    pub mobile_breakpoint: f32,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            intensity: 1.0,
            radius: 20.0,
            hotspot: true,
            mobile_breakpoint: 768.0,
        }
    }
}

/// Magnifier overlay behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MagnifierConfig {
    /// Width of the free-floating highlight that follows a bare pointer.
    pub free_width: f32,
    /// Height of the free-floating highlight.
    pub free_height: f32,
    /// Horizontal margin of the default (resting) overlay.
    pub rest_margin: f32,
    /// Corner radius of the rendered overlay.
    pub corner_radius: f32,
}

impl Default for MagnifierConfig {
    fn default() -> Self {
        Self {
            free_width: 120.0,
            free_height: 34.0,
            rest_margin: 12.0,
            corner_radius: 16.0,
        }
    }
}

/// Typewriter timing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterConfig {
    /// Delay before each character.
    pub typing_speed_ms: f64,
    /// Delay between finishing one line and starting the next.
    pub pause_between_lines_ms: f64,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            typing_speed_ms: 40.0,
            pause_between_lines_ms: 600.0,
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GlassConfig {
    /// Overlay geometry.
    pub geometry: GeometryConfig,
    /// Pointer-follow smoothing.
    pub tracker: TrackerConfig,
    /// Ambient highlight look.
    pub look: LookConfig,
    /// Magnifier overlay.
    pub magnifier: MagnifierConfig,
    /// Typewriter timing.
    pub typewriter: TypewriterConfig,
    /// Honour the user's reduced-motion preference.
    pub reduced_motion: bool,
}

impl GlassConfig {
    /// Parses and validates a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`GlassError::Parse`] for malformed TOML and
    /// [`GlassError::InvalidConfig`] for out-of-range values.
    pub fn from_toml_str(text: &str) -> GlassResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`GlassError::Io`] if the file cannot be read, otherwise the
    /// errors of [`GlassConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> GlassResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| GlassError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks every value is in range.
    ///
    /// # Errors
    ///
    /// Returns [`GlassError::InvalidConfig`] naming the first bad key.
    pub fn validate(&self) -> GlassResult<()> {
        let flex = self.tracker.flex;
        if !(flex > 0.0 && flex <= 1.0) {
            return Err(GlassError::InvalidConfig(format!(
                "tracker.flex must be in (0, 1], got {flex}"
            )));
        }
        if self.tracker.epsilon < 0.0 {
            return Err(GlassError::InvalidConfig("tracker.epsilon must be >= 0".into()));
        }
        if self.tracker.frame_interval_ms < 0.0 {
            return Err(GlassError::InvalidConfig(
                "tracker.frame_interval_ms must be >= 0".into(),
            ));
        }

        let sizes = [
            ("geometry.min_width", self.geometry.min_width),
            ("geometry.min_height", self.geometry.min_height),
            ("geometry.width_padding", self.geometry.width_padding),
            ("geometry.inset", self.geometry.inset),
            ("magnifier.free_width", self.magnifier.free_width),
            ("magnifier.free_height", self.magnifier.free_height),
            ("magnifier.rest_margin", self.magnifier.rest_margin),
            ("look.intensity", self.look.intensity),
        ];
        if let Some((key, value)) = sizes.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
            return Err(GlassError::InvalidConfig(format!(
                "{key} must be a non-negative number, got {value}"
            )));
        }

        if self.typewriter.typing_speed_ms < 0.0 || self.typewriter.pause_between_lines_ms < 0.0 {
            return Err(GlassError::InvalidConfig("typewriter delays must be >= 0".into()));
        }
        Ok(())
    }

    /// Returns a copy tuned for navigation bars: slower pointer follow and a
    /// tighter magnifier around the tabs.
    #[must_use]
    pub fn navigation(mut self) -> Self {
        self.tracker.flex = 0.05;
        self.look.radius = 24.0;
        self.geometry.width_padding = 4.0;
        self.geometry.min_width = 22.0;
        self.geometry.min_height = 22.0;
        self
    }
}

//! Application configuration.
//!
//! The configuration is loaded from a JSON file at
//! `$XDG_CONFIG_HOME/hyprousel/config.json`.  The top-level schema uses a
//! `"carousel"` key so the file can be extended with additional sections
//! later without breaking backward compatibility.
//!
//! # Example
//!
//! ```json
//! {
//!   "carousel": {
//!     "radius": 800.0,
//!     "spacing": 1.2,
//!     "transparency_gradient": 0.3,
//!     "animation_duration_ms": 300
//!   }
//! }
//! ```

use log::warn;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration.
///
/// Every field is optional — a minimal `{}` file is valid and all sections
/// fall back to their compiled-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Carousel geometry and animation settings.
    #[serde(default)]
    pub carousel: CarouselConfig,
}

/// Carousel geometry and animation tunables.
///
/// The snapshot is taken once at startup and never mutated mid-frame;
/// changing a value requires restarting the daemon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Ring radius in pixels.  Must be positive.
    pub radius: f32,
    /// Angular multiplier applied to slot azimuths; `1.0` distributes the
    /// slots evenly, larger values spread them further apart.
    pub spacing: f32,
    /// Depth-based opacity falloff.  `0.0` disables the fade entirely;
    /// larger values dim far slots more aggressively (floored at 0.3
    /// opacity so no slot ever disappears).
    pub transparency_gradient: f32,
    /// Duration of the rotation (and grow) animation in milliseconds.
    /// Must be positive.
    pub animation_duration_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            radius: 800.0,
            spacing: 1.2,
            transparency_gradient: 0.3,
            animation_duration_ms: 300,
        }
    }
}

impl CarouselConfig {
    /// Return a copy with out-of-range values replaced by their defaults.
    ///
    /// The carousel requires `radius > 0`, `transparency_gradient >= 0` and
    /// `animation_duration_ms > 0`; anything else (including NaN) is
    /// replaced and logged rather than rejected, so a bad config file never
    /// prevents startup.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let mut cfg = self.clone();
        if !(cfg.radius > 0.0) || !cfg.radius.is_finite() {
            warn!("invalid carousel.radius {}, using {}", cfg.radius, defaults.radius);
            cfg.radius = defaults.radius;
        }
        if !cfg.spacing.is_finite() || cfg.spacing <= 0.0 {
            warn!("invalid carousel.spacing {}, using {}", cfg.spacing, defaults.spacing);
            cfg.spacing = defaults.spacing;
        }
        if !(cfg.transparency_gradient >= 0.0) || !cfg.transparency_gradient.is_finite() {
            warn!(
                "invalid carousel.transparency_gradient {}, using {}",
                cfg.transparency_gradient, defaults.transparency_gradient
            );
            cfg.transparency_gradient = defaults.transparency_gradient;
        }
        if cfg.animation_duration_ms == 0 {
            warn!(
                "invalid carousel.animation_duration_ms 0, using {}",
                defaults.animation_duration_ms
            );
            cfg.animation_duration_ms = defaults.animation_duration_ms;
        }
        cfg
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full_config() {
        let json = r#"{
            "carousel": {
                "radius": 600.0,
                "spacing": 1.5,
                "transparency_gradient": 0.5,
                "animation_duration_ms": 250
            }
        }"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.carousel.radius, 600.0);
        assert_eq!(cfg.carousel.spacing, 1.5);
        assert_eq!(cfg.carousel.transparency_gradient, 0.5);
        assert_eq!(cfg.carousel.animation_duration_ms, 250);
    }

    #[test]
    fn deserialize_empty_uses_defaults() {
        let json = "{}";
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.carousel, CarouselConfig::default());
    }

    #[test]
    fn deserialize_partial_carousel() {
        let json = r#"{ "carousel": { "radius": 500.0 } }"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.carousel.radius, 500.0);
        let defaults = CarouselConfig::default();
        assert_eq!(cfg.carousel.spacing, defaults.spacing);
        assert_eq!(cfg.carousel.animation_duration_ms, defaults.animation_duration_ms);
    }

    #[test]
    fn unknown_top_level_keys_ignored() {
        let json = r#"{ "carousel": {}, "future_section": { "key": 42 } }"#;
        // Should not fail — unknown keys are silently ignored.
        let _cfg: Config = serde_json::from_str(json).unwrap();
    }

    #[test]
    fn sanitize_rejects_nonpositive_radius() {
        let cfg = CarouselConfig {
            radius: -10.0,
            ..Default::default()
        };
        assert_eq!(cfg.sanitized().radius, CarouselConfig::default().radius);
    }

    #[test]
    fn sanitize_rejects_nan() {
        let cfg = CarouselConfig {
            radius: f32::NAN,
            transparency_gradient: f32::NAN,
            ..Default::default()
        };
        let clean = cfg.sanitized();
        assert_eq!(clean.radius, CarouselConfig::default().radius);
        assert_eq!(
            clean.transparency_gradient,
            CarouselConfig::default().transparency_gradient
        );
    }

    #[test]
    fn sanitize_rejects_zero_duration() {
        let cfg = CarouselConfig {
            animation_duration_ms: 0,
            ..Default::default()
        };
        assert_eq!(
            cfg.sanitized().animation_duration_ms,
            CarouselConfig::default().animation_duration_ms
        );
    }

    #[test]
    fn sanitize_keeps_valid_values() {
        let cfg = CarouselConfig {
            radius: 512.0,
            spacing: 2.0,
            transparency_gradient: 0.0,
            animation_duration_ms: 150,
        };
        assert_eq!(cfg.sanitized(), cfg);
    }
}

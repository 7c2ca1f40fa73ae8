use serde::Deserialize;
use thiserror::Error;

use crate::ring::{Color, ColorRamp, RingGeometry};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Radar tunables. Every field has a default matching the 36-pixel
/// reference board, so an empty file is a valid config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    pub ring: RingConfig,
    pub colors: ColorConfig,
    pub thresholds: ThresholdConfig,
    pub brightness: BrightnessConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    pub size: usize,
    pub mount_offset_pixels: f64,
    pub top_offset: usize,
}

impl Default for RingConfig {
    fn default() -> Self {
        let ring = RingGeometry::default();
        Self {
            size: ring.ring_size,
            mount_offset_pixels: ring.mount_offset_pixels,
            top_offset: ring.top_offset,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub north: Color,
    pub aircraft_near: Color,
    pub aircraft_far: Color,
    pub home: Color,
    pub home_near: Color,
    pub altimeter: Color,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            north: Color::white(),
            aircraft_near: Color::red(),
            aircraft_far: Color::blue(),
            home: Color::new(64, 255, 30),
            home_near: Color::new(64, 255, 255),
            altimeter: Color::new(255, 142, 43),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Aircraft further than this are never shown.
    pub squelch_km: f64,
    /// Aircraft colors fade from far to near inside this range.
    pub warning_km: f64,
    /// Closer than this counts as "here": aircraft are hidden (most likely
    /// our own transmitter) and home is pinned to due south.
    pub ignore_closer_than_km: f64,
    pub flight_vertical_sep_ft: f64,
    pub flight_horizontal_sep_km: f64,
    pub altimeter_min_ft: f64,
    pub altimeter_max_ft: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            squelch_km: 30.0,
            warning_km: 15.0,
            ignore_closer_than_km: 15.0 / 1000.0,
            flight_vertical_sep_ft: 3000.0,
            flight_horizontal_sep_km: 15.0,
            altimeter_min_ft: 20.0,
            altimeter_max_ft: 1000.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrightnessConfig {
    pub high: f64,
    pub low: f64,
    pub self_test: f64,
}

impl Default for BrightnessConfig {
    fn default() -> Self {
        Self {
            high: 1.0,
            low: 0.6,
            self_test: 0.03,
        }
    }
}

impl RadarConfig {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        // an empty document parses as null rather than an empty mapping
        let config: RadarConfig = if yaml.trim().is_empty() {
            RadarConfig::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.into()));

        if self.ring.size == 0 {
            return invalid("ring.size must be at least 1");
        }
        if self.ring.top_offset >= self.ring.size {
            return invalid("ring.top_offset must be inside the ring");
        }
        if !self.ring.mount_offset_pixels.is_finite() {
            return invalid("ring.mount_offset_pixels must be finite");
        }

        let t = &self.thresholds;
        if t.warning_km <= 0.0 {
            return invalid("thresholds.warning_km must be positive");
        }
        if t.altimeter_max_ft <= t.altimeter_min_ft {
            return invalid("thresholds.altimeter_max_ft must exceed altimeter_min_ft");
        }
        if t.squelch_km < 0.0 || t.ignore_closer_than_km < 0.0 {
            return invalid("distance thresholds must not be negative");
        }

        let b = &self.brightness;
        for level in [b.high, b.low, b.self_test] {
            if !(0.0..=1.0).contains(&level) {
                return invalid("brightness levels must be within 0.0..=1.0");
            }
        }

        Ok(())
    }

    pub fn geometry(&self) -> RingGeometry {
        RingGeometry {
            ring_size: self.ring.size,
            mount_offset_pixels: self.ring.mount_offset_pixels,
            top_offset: self.ring.top_offset,
        }
    }

    pub fn ramp(&self) -> ColorRamp {
        ColorRamp {
            near: self.colors.aircraft_near,
            far: self.colors.aircraft_far,
            warning_km: self.thresholds.warning_km,
        }
    }
}

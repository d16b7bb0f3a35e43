// Sortvis Settings
//
// Visualizer constants (speed, density, canvas and bar sizing) and the live
// settings object shared by every animation host. Speed and density are the
// two global sliders; hosts read them fresh on every step.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use crate::errors::{ConfigError, ConfigResult};

/// Speed slider domain and the delay range it maps onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedConfig {
    pub slider_min: u32,
    pub slider_max: u32,
    pub slider_default: u32,
    pub default_delay_ms: u32,
    pub delay_min_ms: u32,
    pub delay_max_ms: u32,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            slider_min: 1,
            slider_max: 100,
            slider_default: 40,
            default_delay_ms: 80,
            delay_min_ms: 20,
            delay_max_ms: 120,
        }
    }
}

/// Density slider domain. Density is the pixel spacing between bars, so a
/// lower value means more bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityConfig {
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

impl Default for DensityConfig {
    fn default() -> Self {
        Self {
            min: 3,
            max: 30,
            default: 8,
        }
    }
}

/// Drawing surface sizing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub min_width: u32,
    pub padding: u32,
    /// Quiet period before a resize regenerates bars
    pub resize_debounce_ms: u64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            min_width: 300,
            padding: 2,
            resize_debounce_ms: 120,
        }
    }
}

/// Bar stroke sizing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarConfig {
    pub min_line_width: f32,
    pub line_width_divisor: f32,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            min_line_width: 1.0,
            line_width_divisor: 4.0,
        }
    }
}

impl BarConfig {
    /// Stroke width for bars drawn `spacing` pixels apart
    pub fn line_width(&self, spacing: u32) -> f32 {
        (spacing as f32 / self.line_width_divisor).max(self.min_line_width)
    }
}

/// All visualizer constants. Every section falls back to its defaults when
/// omitted from a config file.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    pub speed: SpeedConfig,
    pub density: DensityConfig,
    pub canvas: CanvasConfig,
    pub bar: BarConfig,
}

impl VisualizerConfig {
    /// Parse a JSON document and validate it
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: VisualizerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check that every range is ordered and contains its default
    pub fn validate(&self) -> ConfigResult<()> {
        check_range(
            "speed",
            self.speed.slider_min,
            self.speed.slider_default,
            self.speed.slider_max,
        )?;
        check_range(
            "delay",
            self.speed.delay_min_ms,
            self.speed.default_delay_ms,
            self.speed.delay_max_ms,
        )?;
        check_range(
            "density",
            self.density.min,
            self.density.default,
            self.density.max,
        )?;
        if self.density.min == 0 {
            return Err(ConfigError::Zero("density.min"));
        }
        if self.bar.line_width_divisor <= 0.0 {
            return Err(ConfigError::Zero("bar.line_width_divisor"));
        }
        Ok(())
    }
}

fn check_range(name: &'static str, min: u32, default: u32, max: u32) -> ConfigResult<()> {
    if min <= default && default <= max {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange {
            name,
            min,
            default,
            max,
        })
    }
}

/// Live global sliders shared by every host on a board.
///
/// Values are stored in atomics so a host can read the current delay on
/// every tick while the slider is moved from elsewhere.
#[derive(Debug)]
pub struct SortingSettings {
    config: VisualizerConfig,
    speed: AtomicU32,
    density: AtomicU32,
}

impl SortingSettings {
    /// Start both sliders at their defaults.
    ///
    /// # Returns
    ///
    /// * `Err(ConfigError)` - If `config` fails [`VisualizerConfig::validate`]
    pub fn new(config: VisualizerConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: VisualizerConfig) -> Self {
        Self {
            speed: AtomicU32::new(config.speed.slider_default),
            density: AtomicU32::new(config.density.default),
            config,
        }
    }

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    pub fn speed(&self) -> u32 {
        self.speed.load(Ordering::Relaxed)
    }

    /// Set the speed slider, clamped into the slider domain
    pub fn set_speed(&self, speed: u32) -> u32 {
        let speed = speed.clamp(self.config.speed.slider_min, self.config.speed.slider_max);
        self.speed.store(speed, Ordering::Relaxed);
        speed
    }

    pub fn density(&self) -> u32 {
        self.density.load(Ordering::Relaxed)
    }

    /// Set the density slider, clamped into the density domain
    pub fn set_density(&self, density: u32) -> u32 {
        let density = density.clamp(self.config.density.min, self.config.density.max);
        self.density.store(density, Ordering::Relaxed);
        density
    }

    /// Pause between animation steps: `delay_max - speed`, kept inside the
    /// configured delay range
    pub fn current_delay(&self) -> Duration {
        let speed = &self.config.speed;
        let ms = speed
            .delay_max_ms
            .saturating_sub(self.speed())
            .clamp(speed.delay_min_ms, speed.delay_max_ms);
        Duration::from_millis(u64::from(ms))
    }

    /// Restore both sliders to their defaults
    pub fn reset(&self) {
        self.speed
            .store(self.config.speed.slider_default, Ordering::Relaxed);
        self.density
            .store(self.config.density.default, Ordering::Relaxed);
    }
}

impl Default for SortingSettings {
    fn default() -> Self {
        Self::from_valid(VisualizerConfig::default())
    }
}

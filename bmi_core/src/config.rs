//! Configuration file support for the BMI calculator.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/bmi/config.toml`.

use crate::{Error, Result, UnitSystem};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub form: FormConfig,

    #[serde(default)]
    pub chart: ChartConfig,
}

/// Bounds, default and step for one numeric input field
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct InputRange {
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
}

impl InputRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(&self, name: &str) -> Result<()> {
        if !(self.min < self.max) {
            return Err(Error::Config(format!(
                "{}: min ({}) must be below max ({})",
                name, self.min, self.max
            )));
        }
        if !self.contains(self.default) {
            return Err(Error::Config(format!(
                "{}: default ({}) outside {}..={}",
                name, self.default, self.min, self.max
            )));
        }
        if !(self.step > 0.0) {
            return Err(Error::Config(format!(
                "{}: step must be positive",
                name
            )));
        }
        Ok(())
    }
}

/// Weight and height inputs for one unit system
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct UnitLimits {
    pub weight: InputRange,
    pub height: InputRange,
}

/// Input form configuration
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FormConfig {
    #[serde(default)]
    pub default_units: UnitSystem,

    #[serde(default = "default_metric_limits")]
    pub metric: UnitLimits,

    #[serde(default = "default_imperial_limits")]
    pub imperial: UnitLimits,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            default_units: UnitSystem::default(),
            metric: default_metric_limits(),
            imperial: default_imperial_limits(),
        }
    }
}

impl FormConfig {
    /// Input limits for the given unit system
    pub fn limits(&self, units: UnitSystem) -> &UnitLimits {
        match units {
            UnitSystem::Metric => &self.metric,
            UnitSystem::Imperial => &self.imperial,
        }
    }
}

/// Band chart output configuration
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChartConfig {
    /// SVG width in pixels
    #[serde(default = "default_chart_width")]
    pub width: u32,

    /// SVG height in pixels
    #[serde(default = "default_chart_height")]
    pub height: u32,

    /// Columns used by the terminal strip
    #[serde(default = "default_text_width")]
    pub text_width: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_chart_width(),
            height: default_chart_height(),
            text_width: default_text_width(),
        }
    }
}

// Default value functions
fn default_metric_limits() -> UnitLimits {
    UnitLimits {
        weight: InputRange {
            min: 20.0,
            max: 300.0,
            default: 70.0,
            step: 0.1,
        },
        height: InputRange {
            min: 0.5,
            max: 3.0,
            default: 1.7,
            step: 0.01,
        },
    }
}

fn default_imperial_limits() -> UnitLimits {
    UnitLimits {
        weight: InputRange {
            min: 40.0,
            max: 650.0,
            default: 150.0,
            step: 0.1,
        },
        height: InputRange {
            min: 2.0,
            max: 9.0,
            default: 5.5,
            step: 0.1,
        },
    }
}

fn default_chart_width() -> u32 {
    1000
}

fn default_chart_height() -> u32 {
    160
}

fn default_text_width() -> usize {
    50
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            std::env::var("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|_| PathBuf::from(".config"))
        });
        base.join("bmi").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Check ranges and chart sizes for consistency
    pub fn validate(&self) -> Result<()> {
        self.form.metric.weight.validate("form.metric.weight")?;
        self.form.metric.height.validate("form.metric.height")?;
        self.form.imperial.weight.validate("form.imperial.weight")?;
        self.form.imperial.height.validate("form.imperial.height")?;

        if self.chart.width == 0 || self.chart.height == 0 {
            return Err(Error::Config("chart width and height must be positive".into()));
        }
        if self.chart.text_width == 0 {
            return Err(Error::Config("chart.text_width must be positive".into()));
        }
        Ok(())
    }
}

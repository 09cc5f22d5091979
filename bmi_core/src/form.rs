//! Input form state: unit selector plus bounded weight and height fields.
//!
//! Values are held in the selected system's own units and converted to
//! metric only when a measurement is requested.

use crate::config::{FormConfig, InputRange, UnitLimits};
use crate::units::to_metric;
use crate::{Error, Measurement, Result, UnitSystem};

/// Current contents of the input form
#[derive(Clone, Debug, PartialEq)]
pub struct FormState {
    units: UnitSystem,
    weight: f64,
    height: f64,
    config: FormConfig,
}

impl FormState {
    /// Form for `units`, filled with that system's defaults
    pub fn new(units: UnitSystem, config: &FormConfig) -> Self {
        let limits = config.limits(units);
        Self {
            units,
            weight: limits.weight.default,
            height: limits.height.default,
            config: config.clone(),
        }
    }

    pub fn units(&self) -> UnitSystem {
        self.units
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn limits(&self) -> &UnitLimits {
        self.config.limits(self.units)
    }

    /// Field label including its unit, e.g. "Weight (kg)"
    pub fn weight_label(&self) -> String {
        format!("Weight ({})", self.units.weight_unit())
    }

    pub fn height_label(&self) -> String {
        format!("Height ({})", self.units.height_unit())
    }

    /// Switch unit system; both fields take the new system's defaults
    pub fn select_units(&mut self, units: UnitSystem) {
        self.units = units;
        self.reset();
    }

    pub fn set_weight(&mut self, value: f64) -> Result<()> {
        let range = self.limits().weight;
        self.weight = check_range(self.weight_label(), &range, value)?;
        Ok(())
    }

    pub fn set_height(&mut self, value: f64) -> Result<()> {
        let range = self.limits().height;
        self.height = check_range(self.height_label(), &range, value)?;
        Ok(())
    }

    /// Restore the current system's default values
    pub fn reset(&mut self) {
        let limits = *self.limits();
        self.weight = limits.weight.default;
        self.height = limits.height.default;
    }

    /// Current values normalized to kilograms and metres
    pub fn measurement(&self) -> Measurement {
        to_metric(self.weight, self.height, self.units)
    }
}

fn check_range(field: String, range: &InputRange, value: f64) -> Result<f64> {
    if range.contains(value) {
        Ok(value)
    } else {
        tracing::warn!("Rejected {} = {}", field, value);
        Err(Error::OutOfRange {
            field,
            value,
            min: range.min,
            max: range.max,
        })
    }
}

//! BMI engine: the pure calculation and classification logic.
//!
//! - BMI is `weight_kg / height_m²`, rounded to one decimal from its exact
//!   binary value
//! - Category is decided on the unrounded value, so 24.96 displays as 25.0
//!   but still classifies as Normal Weight
//! - A zero height is the only rejected input

use crate::{BmiCategory, BmiReading, Error, Measurement, Result};

/// Lower bound (inclusive) of the Normal Weight band
pub const NORMAL_WEIGHT_MIN: f64 = 18.5;
/// Lower bound (inclusive) of the Overweight band
pub const OVERWEIGHT_MIN: f64 = 25.0;
/// Lower bound (inclusive) of the Obese band
pub const OBESE_MIN: f64 = 30.0;

/// Compute BMI and its category from metric inputs
///
/// Returns [`Error::ZeroHeight`] when `height_m` is zero. Negative or
/// implausible values are not rejected here; range checks belong to the
/// input layer (see [`crate::form`]).
pub fn compute(weight_kg: f64, height_m: f64) -> Result<BmiReading> {
    if height_m == 0.0 {
        tracing::debug!(weight_kg, "Rejected BMI calculation with zero height");
        return Err(Error::ZeroHeight);
    }

    let raw = weight_kg / (height_m * height_m);
    let reading = BmiReading {
        bmi: round_one_decimal(raw),
        category: classify(raw),
    };

    tracing::debug!(
        weight_kg,
        height_m,
        raw,
        bmi = reading.bmi,
        category = %reading.category,
        "Computed BMI"
    );

    Ok(reading)
}

/// Compute BMI for an already normalized measurement
pub fn compute_measurement(measurement: &Measurement) -> Result<BmiReading> {
    compute(measurement.weight_kg, measurement.height_m)
}

/// Classify a BMI value on half-open intervals
pub fn classify(bmi: f64) -> BmiCategory {
    if bmi < NORMAL_WEIGHT_MIN {
        BmiCategory::Underweight
    } else if bmi < OVERWEIGHT_MIN {
        BmiCategory::NormalWeight
    } else if bmi < OBESE_MIN {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Round to one decimal place
///
/// Formatting rounds the exact value of `value`, so inputs just below a
/// half (e.g. 15.34999…) round down. Scaling by 10 first would not.
pub fn round_one_decimal(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}

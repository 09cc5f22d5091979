//! Unit conversion adapter.
//!
//! Normalizes imperial input (pounds, feet) to the metric values the
//! engine works with.

use crate::{Measurement, UnitSystem};

/// Kilograms per pound
pub const KG_PER_LB: f64 = 0.453592;

/// Metres per foot
pub const M_PER_FT: f64 = 0.3048;

/// Convert a weight/height pair in `system` units to kilograms and metres
pub fn to_metric(weight: f64, height: f64, system: UnitSystem) -> Measurement {
    match system {
        UnitSystem::Metric => Measurement {
            weight_kg: weight,
            height_m: height,
        },
        UnitSystem::Imperial => Measurement {
            weight_kg: weight * KG_PER_LB,
            height_m: height * M_PER_FT,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_passthrough() {
        let m = to_metric(70.0, 1.7, UnitSystem::Metric);
        assert_eq!(m.weight_kg, 70.0);
        assert_eq!(m.height_m, 1.7);
    }

    #[test]
    fn test_imperial_conversion() {
        let m = to_metric(150.0, 5.5, UnitSystem::Imperial);
        assert!((m.weight_kg - 68.0388).abs() < 1e-9);
        assert!((m.height_m - 1.6764).abs() < 1e-9);
    }

    #[test]
    fn test_imperial_uses_exact_factors() {
        let m = to_metric(150.0, 5.5, UnitSystem::Imperial);
        assert_eq!(m.weight_kg, 150.0 * 0.453592);
        assert_eq!(m.height_m, 5.5 * 0.3048);
    }
}

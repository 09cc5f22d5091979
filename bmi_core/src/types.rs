//! Core domain types for the BMI calculator.
//!
//! This module defines the fundamental types used throughout the system:
//! - Unit systems and normalized measurements
//! - BMI categories and readings
//! - History entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Units and Measurements
// ============================================================================

/// Unit system the user enters values in
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    /// Kilograms and metres
    #[default]
    Metric,
    /// Pounds and feet
    Imperial,
}

impl UnitSystem {
    pub fn weight_unit(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "kg",
            UnitSystem::Imperial => "lb",
        }
    }

    pub fn height_unit(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "m",
            UnitSystem::Imperial => "ft",
        }
    }

    /// Label used by the unit selector, e.g. "Metric (kg, m)"
    pub fn label(&self) -> String {
        let name = match self {
            UnitSystem::Metric => "Metric",
            UnitSystem::Imperial => "Imperial",
        };
        format!("{} ({}, {})", name, self.weight_unit(), self.height_unit())
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSystem::Metric => write!(f, "metric"),
            UnitSystem::Imperial => write!(f, "imperial"),
        }
    }
}

impl FromStr for UnitSystem {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "metric" | "si" => Ok(UnitSystem::Metric),
            "imperial" | "us" => Ok(UnitSystem::Imperial),
            other => Err(crate::Error::InvalidUnits(other.to_string())),
        }
    }
}

/// A weight/height pair normalized to kilograms and metres
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Measurement {
    pub weight_kg: f64,
    pub height_m: f64,
}

// ============================================================================
// Categories and Readings
// ============================================================================

/// BMI classification
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BmiCategory {
    Underweight,
    #[serde(rename = "Normal Weight")]
    NormalWeight,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// All categories in ascending BMI order
    pub const ALL: [BmiCategory; 4] = [
        BmiCategory::Underweight,
        BmiCategory::NormalWeight,
        BmiCategory::Overweight,
        BmiCategory::Obese,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::NormalWeight => "Normal Weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }

    /// Name of the colour this category is drawn with on the band chart
    pub fn colour_name(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Blue",
            BmiCategory::NormalWeight => "Green",
            BmiCategory::Overweight => "Yellow",
            BmiCategory::Obese => "Red",
        }
    }

    /// Human-readable BMI range for the legend
    pub fn range_text(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "< 18.5",
            BmiCategory::NormalWeight => "18.5 - 24.9",
            BmiCategory::Overweight => "25 - 29.9",
            BmiCategory::Obese => "≥ 30",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A successful BMI calculation
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct BmiReading {
    /// BMI rounded to one decimal place
    pub bmi: f64,
    pub category: BmiCategory,
}

impl fmt::Display for BmiReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Your BMI: {:.1} | Category: {}", self.bmi, self.category)
    }
}

// ============================================================================
// History
// ============================================================================

/// One past calculation kept for the lifetime of a session
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub bmi: f64,
    pub category: BmiCategory,
    pub recorded_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(reading: BmiReading, recorded_at: DateTime<Utc>) -> Self {
        Self {
            bmi: reading.bmi,
            category: reading.category,
            recorded_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unit_system() {
        assert_eq!("metric".parse::<UnitSystem>().unwrap(), UnitSystem::Metric);
        assert_eq!(" Imperial ".parse::<UnitSystem>().unwrap(), UnitSystem::Imperial);
        assert_eq!("us".parse::<UnitSystem>().unwrap(), UnitSystem::Imperial);
        assert!(matches!(
            "stone".parse::<UnitSystem>(),
            Err(crate::Error::InvalidUnits(s)) if s == "stone"
        ));
    }

    #[test]
    fn test_unit_labels() {
        assert_eq!(UnitSystem::Metric.label(), "Metric (kg, m)");
        assert_eq!(UnitSystem::Imperial.label(), "Imperial (lb, ft)");
    }

    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&BmiCategory::NormalWeight).unwrap();
        assert_eq!(json, "\"Normal Weight\"");
        for category in BmiCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.label()));
        }
    }

    #[test]
    fn test_reading_display() {
        let reading = BmiReading {
            bmi: 24.2,
            category: BmiCategory::NormalWeight,
        };
        assert_eq!(
            reading.to_string(),
            "Your BMI: 24.2 | Category: Normal Weight"
        );
    }
}

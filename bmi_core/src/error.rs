//! Error types for the bmi_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for bmi_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// BMI is undefined for a zero height
    #[error("Height cannot be zero")]
    ZeroHeight,

    /// A form value fell outside its allowed range
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Malformed command or argument from an interactive front end
    #[error("{0}")]
    Usage(String),

    /// Unit system text could not be parsed
    #[error("Unknown unit system: {0}")]
    InvalidUnits(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Chart rendering error
    #[error("Chart error: {0}")]
    Chart(String),
}

impl Error {
    /// Text shown inline to the user in place of a result
    pub fn user_message(&self) -> String {
        format!("Error: {}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_height_user_message() {
        assert_eq!(
            Error::ZeroHeight.user_message(),
            "Error: Height cannot be zero"
        );
    }

    #[test]
    fn test_out_of_range_message() {
        let err = Error::OutOfRange {
            field: "Weight (kg)".into(),
            value: 10.0,
            min: 20.0,
            max: 300.0,
        };
        assert_eq!(
            err.to_string(),
            "Weight (kg) must be between 20 and 300 (got 10)"
        );
    }
}

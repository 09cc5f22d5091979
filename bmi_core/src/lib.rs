#![forbid(unsafe_code)]

//! Core domain model and logic for the BMI calculator.
//!
//! This crate provides:
//! - BMI computation and classification
//! - Metric/imperial unit conversion
//! - Session-scoped history
//! - Band chart input and renderers
//! - Form and session state for interactive front ends

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod units;
pub mod engine;
pub mod history;
pub mod chart;
pub mod form;
pub mod session;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use units::to_metric;
pub use engine::{classify, compute};
pub use history::HistoryStore;
pub use chart::BandChart;
pub use form::FormState;
pub use session::{Event, Outcome, Session, SessionView};

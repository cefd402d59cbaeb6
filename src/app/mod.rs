//! Application orchestration layer
//!
//! This module coordinates between the page, the domain calculator and the
//! renderer. It owns the displayed outputs and the calculation state.

pub mod controller;
pub mod state;

pub use controller::{App, AxisError, CalculateError, CalculationReport, SetupError};
pub use state::{AppState, OutputValue};

//! Application state management
//!
//! Tracks what the calculator currently shows. Outputs are either a value, an
//! explicit error marker, or empty before the first calculation.

use std::fmt;

/// Text shown in one of the pane size outputs
#[derive(Debug, Clone, PartialEq)]
pub enum OutputValue {
    Empty,
    Value(f64),
    Error(String),
}

impl fmt::Display for OutputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputValue::Empty => Ok(()),
            OutputValue::Value(value) => write!(f, "{value:.2}"),
            OutputValue::Error(reason) => write!(f, "Error: {reason}"),
        }
    }
}

/// Outcome of the most recent calculate-and-render cycle
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AppState {
    /// Nothing calculated yet, or the form was reset
    #[default]
    Idle,
    /// Both pane sizes were valid and the frame was drawn
    Rendered {
        pane_width: f64,
        pane_height: f64,
        pane_count: usize,
    },
    /// The last cycle stopped before or during rendering
    Failed { width: OutputValue, height: OutputValue },
}

//! Pane layout calculator for divided window frames
//!
//! Computes the size of each pane from a window opening, its frame widths and
//! the pane grid, then draws a labelled schematic of the frame.

pub mod app;
pub mod config;
pub mod domain;
pub mod ui;

pub use app::{App, CalculateError, SetupError};
pub use config::{CanvasWindowSettings, RenderConfig};
pub use domain::{Axis, LayoutError, ResolvedWindow, WindowSettings};

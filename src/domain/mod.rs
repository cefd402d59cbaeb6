//! Domain logic and core data structures
//!
//! This module contains the pure pane layout arithmetic. It is independent
//! of pages, canvases and any rendering backend.

pub mod core;
pub mod layout;
pub mod settings;

pub use layout::{Axis, LayoutError};
pub use settings::{PanePosition, ResolvedWindow, WindowSettings};

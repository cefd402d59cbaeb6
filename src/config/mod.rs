//! Configuration module for paneframe
//!
//! Holds the TOML render configuration and the canvas-bound window settings
//! shared between the application layer and the renderer.

pub mod canvas;
pub mod render;

pub use canvas::CanvasWindowSettings;
pub use render::{ConfigError, Palette, RenderConfig, RenderStyle};

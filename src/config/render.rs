use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tiny_skia::Color;

/// Element id of the canvas on the calculator page
pub const DEFAULT_CANVAS_ELEMENT_ID: &str = "window-canvas";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file {}: {source}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
    #[error("Invalid colour for {field}: {value:?} (expected #RRGGBB or #RRGGBBAA)")]
    InvalidColor { field: &'static str, value: String },
}

/// Colours used when painting the frame schematic, as hex strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: String,
    pub border: String,
    pub pane_fill: String,
    pub pane_stroke: String,
    pub label: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: "#EEEEEE".to_string(),
            border: "#999999".to_string(),
            pane_fill: "#AAEEFF".to_string(),
            pane_stroke: "#88AABB".to_string(),
            label: "#88AABB".to_string(),
        }
    }
}

/// User-facing render configuration, loaded from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Id of the canvas element the schematic is drawn on
    pub canvas_element_id: String,
    /// Device pixels per logical unit
    pub pixel_ratio: f64,
    /// Label font size in device pixels
    pub font_size: f32,
    /// Font file for coordinate labels; system fonts are tried when unset
    pub font_path: Option<PathBuf>,
    /// Gap between the bottom-right label baseline and the pane edge
    pub label_inset: f32,
    pub palette: Palette,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas_element_id: DEFAULT_CANVAS_ELEMENT_ID.to_string(),
            pixel_ratio: 0.5,
            font_size: 20.0,
            font_path: None,
            label_inset: 5.0,
            palette: Palette::default(),
        }
    }
}

impl RenderConfig {
    /// Loads and validates a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&contents)?;
        info!("Loaded render configuration from {}", path.display());
        Ok(config)
    }

    /// Parses and validates a configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: RenderConfig = toml::from_str(contents)?;
        config.validate()?;
        debug!("Render configuration: {:?}", config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_element_id.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "canvas_element_id",
                reason: "must not be empty".to_string(),
            });
        }
        if !self.pixel_ratio.is_finite() || self.pixel_ratio <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "pixel_ratio",
                reason: format!("must be a positive number, got {}", self.pixel_ratio),
            });
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "font_size",
                reason: format!("must be a positive number, got {}", self.font_size),
            });
        }
        if !self.label_inset.is_finite() || self.label_inset < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "label_inset",
                reason: format!("must not be negative, got {}", self.label_inset),
            });
        }
        self.style().map(|_| ())
    }

    /// Resolves the palette and text metrics into paint-ready values
    pub fn style(&self) -> Result<RenderStyle, ConfigError> {
        Ok(RenderStyle {
            background: parse_hex_color("palette.background", &self.palette.background)?,
            border: parse_hex_color("palette.border", &self.palette.border)?,
            pane_fill: parse_hex_color("palette.pane_fill", &self.palette.pane_fill)?,
            pane_stroke: parse_hex_color("palette.pane_stroke", &self.palette.pane_stroke)?,
            label: parse_hex_color("palette.label", &self.palette.label)?,
            font_size: self.font_size,
            label_inset: self.label_inset,
        })
    }
}

/// Paint-ready rendering style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub background: Color,
    pub border: Color,
    pub pane_fill: Color,
    pub pane_stroke: Color,
    pub label: Color,
    pub font_size: f32,
    pub label_inset: f32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background: Color::from_rgba8(0xEE, 0xEE, 0xEE, 0xFF),
            border: Color::from_rgba8(0x99, 0x99, 0x99, 0xFF),
            pane_fill: Color::from_rgba8(0xAA, 0xEE, 0xFF, 0xFF),
            pane_stroke: Color::from_rgba8(0x88, 0xAA, 0xBB, 0xFF),
            label: Color::from_rgba8(0x88, 0xAA, 0xBB, 0xFF),
            font_size: 20.0,
            label_inset: 5.0,
        }
    }
}

/// Parses `#RRGGBB` or `#RRGGBBAA`
pub fn parse_hex_color(field: &'static str, value: &str) -> Result<Color, ConfigError> {
    let invalid = || ConfigError::InvalidColor {
        field,
        value: value.to_string(),
    };

    let hex = value.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !(hex.len() == 6 || hex.len() == 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    let alpha = if hex.len() == 8 { channel(6)? } else { 0xFF };

    Ok(Color::from_rgba8(channel(0)?, channel(2)?, channel(4)?, alpha))
}

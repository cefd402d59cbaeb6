use crate::config::render::RenderConfig;
use crate::domain::settings::WindowSettings;

/// Window settings plus the surface they are drawn on
///
/// Owned by the rendering layer. The pixel ratio maps logical units to
/// device pixels for both surface sizing and pane geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasWindowSettings {
    pub canvas_element_id: String,
    pub pixel_ratio: f64,
    pub window: WindowSettings,
}

impl CanvasWindowSettings {
    pub fn new(canvas_element_id: impl Into<String>, pixel_ratio: f64) -> Self {
        Self {
            canvas_element_id: canvas_element_id.into(),
            pixel_ratio,
            window: WindowSettings::default(),
        }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(config.canvas_element_id.clone(), config.pixel_ratio)
    }
}

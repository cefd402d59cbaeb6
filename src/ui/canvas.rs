//! Drawing surface backed by a tiny-skia pixmap
//!
//! A canvas starts without any pixels. `resize` allocates a fresh, fully
//! transparent pixmap, so resizing always clears previous content.

use std::path::Path;

use tiny_skia::Pixmap;

#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    #[error("Invalid canvas dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Failed to create pixmap for rendering")]
    PixmapCreationFailed,

    #[error("Canvas has not been sized yet")]
    Unsized,

    #[error("Failed to write PNG: {0}")]
    Png(String),
}

#[derive(Debug, Default)]
pub struct Canvas {
    pixmap: Option<Pixmap>,
}

impl Canvas {
    /// Largest accepted edge length in device pixels
    pub const MAX_DIMENSION: u32 = 16_384;

    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the surface with a cleared one of the given size
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), CanvasError> {
        if width == 0 || height == 0 || width > Self::MAX_DIMENSION || height > Self::MAX_DIMENSION {
            return Err(CanvasError::InvalidDimensions { width, height });
        }

        let pixmap = Pixmap::new(width, height).ok_or(CanvasError::PixmapCreationFailed)?;
        self.pixmap = Some(pixmap);
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.pixmap.as_ref().map_or(0, Pixmap::width)
    }

    pub fn height(&self) -> u32 {
        self.pixmap.as_ref().map_or(0, Pixmap::height)
    }

    pub fn is_sized(&self) -> bool {
        self.pixmap.is_some()
    }

    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }

    pub fn pixmap_mut(&mut self) -> Result<&mut Pixmap, CanvasError> {
        self.pixmap.as_mut().ok_or(CanvasError::Unsized)
    }

    pub fn save_png(&self, path: &Path) -> Result<(), CanvasError> {
        let pixmap = self.pixmap.as_ref().ok_or(CanvasError::Unsized)?;
        pixmap
            .save_png(path)
            .map_err(|err| CanvasError::Png(err.to_string()))
    }
}

//! Label text measurement and rasterisation
//!
//! Uses ab_glyph to outline glyphs and tiny-skia to composite them. When no
//! font can be loaded the renderer still lays labels out using an estimated
//! advance width, it just cannot paint them.

use std::path::{Path, PathBuf};

use ab_glyph::{point, Font, FontVec, GlyphId, PxScale, ScaleFont};
use log::{debug, info, warn};
use tiny_skia::{Color, Pixmap, PixmapPaint, Transform};

/// Advance width per character, relative to the pixel size, used without a font
const FALLBACK_ADVANCE: f32 = 0.6;

const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

#[derive(Debug, thiserror::Error)]
pub enum TextError {
    #[error("Failed to read font {}: {source}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },

    #[error("Font file {} is not a usable TrueType/OpenType font", .path.display())]
    InvalidFont { path: PathBuf },
}

/// Measures the advance width of a label in device pixels
pub trait TextMeasure {
    fn measure(&self, text: &str, px: f32) -> f32;
}

/// Font used for coordinate labels
pub struct LabelFont {
    font: Option<FontVec>,
}

impl std::fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelFont")
            .field("loaded", &self.font.is_some())
            .finish()
    }
}

impl LabelFont {
    /// A font-less instance; labels are measured by estimate and not painted
    pub fn fallback() -> Self {
        Self { font: None }
    }

    /// Loads the configured font, or the first usable system font
    ///
    /// A configured path that cannot be loaded is an error. Without a
    /// configured path a missing system font only downgrades to
    /// [`LabelFont::fallback`].
    pub fn load(configured: Option<&Path>) -> Result<Self, TextError> {
        if let Some(path) = configured {
            let font = Self::read_font(path)?;
            info!("Loaded label font from: {}", path.display());
            return Ok(Self { font: Some(font) });
        }

        for candidate in SYSTEM_FONT_PATHS {
            let path = Path::new(candidate);
            if !path.exists() {
                continue;
            }
            match Self::read_font(path) {
                Ok(font) => {
                    info!("Loaded label font from: {}", path.display());
                    return Ok(Self { font: Some(font) });
                }
                Err(err) => debug!("Skipping system font: {}", err),
            }
        }

        warn!("No label font found; coordinate labels will not be painted");
        Ok(Self::fallback())
    }

    fn read_font(path: &Path) -> Result<FontVec, TextError> {
        let data = std::fs::read(path).map_err(|source| TextError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        FontVec::try_from_vec(data).map_err(|_| TextError::InvalidFont {
            path: path.to_path_buf(),
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.font.is_some()
    }

    /// Paints `text` with its baseline starting at (`x`, `baseline`)
    ///
    /// Returns false when there is no font to paint with.
    pub fn draw(
        &self,
        pixmap: &mut Pixmap,
        text: &str,
        x: f32,
        baseline: f32,
        px: f32,
        color: Color,
    ) -> bool {
        let Some(font) = &self.font else {
            return false;
        };

        let scaled = font.as_scaled(PxScale::from(px));
        let mut caret = x;
        let mut previous: Option<GlyphId> = None;

        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(px, point(caret, baseline));
            caret += scaled.h_advance(id);
            previous = Some(id);

            let Some(outlined) = font.outline_glyph(glyph) else {
                continue; // whitespace has no outline
            };

            let bounds = outlined.px_bounds();
            let width = (bounds.width().ceil() as u32).max(1);
            let height = (bounds.height().ceil() as u32).max(1);
            let Some(mut glyph_pixmap) = Pixmap::new(width, height) else {
                continue;
            };

            let pixels = glyph_pixmap.pixels_mut();
            outlined.draw(|gx, gy, coverage| {
                let index = (gy * width + gx) as usize;
                if let Some(pixel) = pixels.get_mut(index) {
                    let mut tinted = color;
                    tinted.apply_opacity(coverage.clamp(0.0, 1.0));
                    *pixel = tinted.premultiply().to_color_u8();
                }
            });

            pixmap.draw_pixmap(
                bounds.min.x.floor() as i32,
                bounds.min.y.floor() as i32,
                glyph_pixmap.as_ref(),
                &PixmapPaint::default(),
                Transform::identity(),
                None,
            );
        }

        true
    }
}

impl TextMeasure for LabelFont {
    fn measure(&self, text: &str, px: f32) -> f32 {
        let Some(font) = &self.font else {
            return text.chars().count() as f32 * px * FALLBACK_ADVANCE;
        };

        let scaled = font.as_scaled(PxScale::from(px));
        let mut width = 0.0;
        let mut previous: Option<GlyphId> = None;
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            previous = Some(id);
        }
        width
    }
}

/// Formats a logical coordinate for a label: two decimals at most, no
/// trailing zeros
pub fn format_coordinate(value: f64) -> String {
    let rounded = ((value + f64::EPSILON) * 100.0).round() / 100.0;
    let text = format!("{rounded:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// Formats a corner position as `XxY`
pub fn format_position(x: f64, y: f64) -> String {
    format!("{}x{}", format_coordinate(x), format_coordinate(y))
}

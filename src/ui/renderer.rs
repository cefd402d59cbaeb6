//! Frame schematic rendering
//!
//! Draws the window opening, its outer border and a row-major grid of
//! labelled panes onto a canvas using tiny-skia. Layout calculation is kept
//! apart from painting so the geometry can be tested without a surface.

use log::debug;
use tiny_skia::{BlendMode, Color, Paint, PathBuilder, Pixmap, Rect as SkiaRect, Stroke, Transform};

use crate::config::canvas::CanvasWindowSettings;
use crate::config::render::RenderStyle;
use crate::domain::core::Rect;
use crate::domain::layout::LayoutError;
use crate::domain::settings::{ResolvedWindow, WindowSettings};
use crate::ui::canvas::{Canvas, CanvasError};
use crate::ui::page::Page;
use crate::ui::text::{format_position, LabelFont, TextMeasure};

/// Most panes a single render pass will lay out
pub const MAX_PANES: u64 = 10_000;

/// Smallest drawable pane edge in device pixels
const MIN_PANE_PIXELS: f64 = 1.0;

/// Rendering errors
#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    #[error("Canvas element with ID {id} not found")]
    SurfaceNotFound { id: String },

    #[error("Invalid pixel ratio: {ratio}")]
    InvalidPixelRatio { ratio: f64 },

    #[error("Invalid window settings provided: {0}")]
    InvalidSettings(#[from] LayoutError),

    #[error("Invalid pane geometry at row {row}, column {col}")]
    InvalidGeometry { row: u32, col: u32 },

    #[error("Too many panes to draw: {count} (at most {max})")]
    TooManyPanes { count: u64, max: u64 },

    #[error("Panes are too small to draw: {width:.2}x{height:.2} pixels")]
    PaneTooSmall { width: f64, height: f64 },

    #[error(transparent)]
    Canvas(#[from] CanvasError),
}

/// A text label positioned in device pixels
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    /// Left edge of the text
    pub x: f32,
    /// Baseline of the text
    pub baseline: f32,
    pub font_size: f32,
}

/// Geometry of one pane in both coordinate spaces
#[derive(Debug, Clone, PartialEq)]
pub struct PaneLayout {
    pub row: u32,
    pub col: u32,
    /// Pane in logical units
    pub logical: Rect,
    /// Pane in device pixels
    pub device: Rect,
    pub top_left_label: Label,
    pub bottom_right_label: Label,
}

/// Pre-calculated layout for one render pass
#[derive(Debug, Clone, PartialEq)]
pub struct FrameLayout {
    pub surface_width: u32,
    pub surface_height: u32,
    /// Panes in row-major order
    pub panes: Vec<PaneLayout>,
}

impl FrameLayout {
    /// Lays out every pane of `window` at the given pixel ratio
    ///
    /// The grid is checked before any pane is built: it must hold at most
    /// [`MAX_PANES`] panes, each at least one device pixel on both edges.
    pub fn from_window(
        window: &ResolvedWindow,
        pixel_ratio: f64,
        style: &RenderStyle,
        measure: &dyn TextMeasure,
    ) -> Result<Self, RendererError> {
        check_grid(window, pixel_ratio)?;

        let panes = window
            .panes()
            .map(|pane| {
                let logical = pane.rect;
                let device = logical.scaled(pixel_ratio);

                let top_left_label = Label {
                    text: format_position(logical.x, logical.y),
                    x: device.x as f32,
                    baseline: device.y as f32 + style.font_size,
                    font_size: style.font_size,
                };

                let text = format_position(logical.right(), logical.bottom());
                let text_width = measure.measure(&text, style.font_size);
                let bottom_right_label = Label {
                    x: device.right() as f32 - text_width,
                    baseline: device.bottom() as f32 - style.label_inset,
                    font_size: style.font_size,
                    text,
                };

                PaneLayout {
                    row: pane.row,
                    col: pane.col,
                    logical,
                    device,
                    top_left_label,
                    bottom_right_label,
                }
            })
            .collect();

        Ok(Self {
            surface_width: device_length(window.window_opening_width(), pixel_ratio),
            surface_height: device_length(window.window_opening_height(), pixel_ratio),
            panes,
        })
    }
}

fn check_grid(window: &ResolvedWindow, pixel_ratio: f64) -> Result<(), RendererError> {
    let count = window.number_of_panes();
    if count > MAX_PANES {
        return Err(RendererError::TooManyPanes { count, max: MAX_PANES });
    }

    let width = window.pane_width() * pixel_ratio;
    let height = window.pane_height() * pixel_ratio;
    if width < MIN_PANE_PIXELS || height < MIN_PANE_PIXELS {
        return Err(RendererError::PaneTooSmall { width, height });
    }
    Ok(())
}

/// Converts a logical length to whole device pixels, rounding up so the
/// surface always covers the full opening
fn device_length(logical: f64, pixel_ratio: f64) -> u32 {
    let scaled = logical * pixel_ratio;
    let nearest = scaled.round();
    let pixels = if (scaled - nearest).abs() < 1e-6 { nearest } else { scaled.ceil() };
    pixels.clamp(0.0, f64::from(u32::MAX)) as u32
}

/// Renders window frames onto a canvas
///
/// Holds the canvas exclusively for the lifetime of the renderer.
pub struct CanvasWindowRenderer<'a> {
    canvas: &'a mut Canvas,
    pixel_ratio: f64,
    style: RenderStyle,
    font: &'a LabelFont,
}

impl<'a> CanvasWindowRenderer<'a> {
    pub fn new(
        canvas: &'a mut Canvas,
        pixel_ratio: f64,
        style: RenderStyle,
        font: &'a LabelFont,
    ) -> Result<Self, RendererError> {
        if !pixel_ratio.is_finite() || pixel_ratio <= 0.0 {
            return Err(RendererError::InvalidPixelRatio { ratio: pixel_ratio });
        }

        Ok(Self {
            canvas,
            pixel_ratio,
            style,
            font,
        })
    }

    /// Finds the canvas named by `settings` on the page and binds to it
    pub fn attach(
        page: &'a mut Page,
        settings: &CanvasWindowSettings,
        style: RenderStyle,
        font: &'a LabelFont,
    ) -> Result<Self, RendererError> {
        let id = settings.canvas_element_id.as_str();
        let canvas = page
            .canvas_mut(id)
            .ok_or_else(|| RendererError::SurfaceNotFound { id: id.to_string() })?;

        debug!("CanvasWindowRenderer initialized for element: {}", id);
        Self::new(canvas, settings.pixel_ratio, style, font)
    }

    /// Resolves `settings` and renders them; invalid settings fail before
    /// any geometry is computed or the canvas is touched
    pub fn render_settings(&mut self, settings: &WindowSettings) -> Result<FrameLayout, RendererError> {
        let window = settings.resolve()?;
        self.render(&window)
    }

    /// Runs a full render pass: resize, background, border, panes
    pub fn render(&mut self, window: &ResolvedWindow) -> Result<FrameLayout, RendererError> {
        let layout = self.layout(window)?;

        self.resize_to(&layout)?;
        self.paint_background()?;
        self.paint_border()?;
        self.paint_layout(&layout)?;

        debug!(
            "Window frame drawn with pane dimensions: {} x {}",
            window.pane_width(),
            window.pane_height()
        );
        Ok(layout)
    }

    /// Computes the layout this renderer would paint for `window`
    pub fn layout(&self, window: &ResolvedWindow) -> Result<FrameLayout, RendererError> {
        FrameLayout::from_window(window, self.pixel_ratio, &self.style, self.font)
    }

    /// Sizes the canvas to the scaled window opening, clearing it
    pub fn resize(&mut self, window: &ResolvedWindow) -> Result<(), RendererError> {
        let width = device_length(window.window_opening_width(), self.pixel_ratio);
        let height = device_length(window.window_opening_height(), self.pixel_ratio);
        self.resize_surface(width, height)
    }

    fn resize_to(&mut self, layout: &FrameLayout) -> Result<(), RendererError> {
        self.resize_surface(layout.surface_width, layout.surface_height)
    }

    fn resize_surface(&mut self, width: u32, height: u32) -> Result<(), RendererError> {
        self.canvas.resize(width, height)?;
        debug!("Canvas resized to {} x {}", width, height);
        Ok(())
    }

    /// Fills the whole surface behind anything already drawn
    pub fn paint_background(&mut self) -> Result<(), RendererError> {
        let color = self.style.background;
        let pixmap = self.canvas.pixmap_mut()?;
        let bounds = surface_rect(pixmap)?;

        let mut paint = solid_paint(color);
        paint.blend_mode = BlendMode::DestinationOver;
        pixmap.fill_rect(bounds, &paint, Transform::identity(), None);

        debug!("Drawing window background");
        Ok(())
    }

    /// Strokes a one pixel border around the surface bounds
    pub fn paint_border(&mut self) -> Result<(), RendererError> {
        let color = self.style.border;
        let pixmap = self.canvas.pixmap_mut()?;
        let bounds = surface_rect(pixmap)?;

        let mut paint = solid_paint(color);
        paint.blend_mode = BlendMode::SourceOver;
        let stroke = Stroke {
            width: 1.0,
            ..Stroke::default()
        };
        pixmap.stroke_path(&PathBuilder::from_rect(bounds), &paint, &stroke, Transform::identity(), None);

        debug!("Drawing window border");
        Ok(())
    }

    /// Paints every pane of `window` with its corner labels
    ///
    /// Returns the number of panes painted.
    pub fn paint_panes(&mut self, window: &ResolvedWindow) -> Result<usize, RendererError> {
        let layout = self.layout(window)?;
        self.paint_layout(&layout)
    }

    fn paint_layout(&mut self, layout: &FrameLayout) -> Result<usize, RendererError> {
        let style = self.style;
        let font = self.font;
        let pixmap = self.canvas.pixmap_mut()?;

        let mut fill = solid_paint(style.pane_fill);
        fill.blend_mode = BlendMode::SourceOver;
        let mut outline = solid_paint(style.pane_stroke);
        outline.blend_mode = BlendMode::SourceOver;
        let stroke = Stroke {
            width: 1.0,
            ..Stroke::default()
        };

        let mut labels_painted = 0;
        for pane in &layout.panes {
            let rect = SkiaRect::from_xywh(
                pane.device.x as f32,
                pane.device.y as f32,
                pane.device.w as f32,
                pane.device.h as f32,
            )
            .ok_or(RendererError::InvalidGeometry {
                row: pane.row,
                col: pane.col,
            })?;

            pixmap.fill_rect(rect, &fill, Transform::identity(), None);
            pixmap.stroke_path(&PathBuilder::from_rect(rect), &outline, &stroke, Transform::identity(), None);

            for label in [&pane.top_left_label, &pane.bottom_right_label] {
                if paint_label(pixmap, font, label, style.label) {
                    labels_painted += 1;
                }
            }
        }

        debug!(
            "Drawing window panes: {} panes, {} labels",
            layout.panes.len(),
            labels_painted
        );
        Ok(layout.panes.len())
    }
}

fn paint_label(pixmap: &mut Pixmap, font: &LabelFont, label: &Label, color: Color) -> bool {
    font.draw(pixmap, &label.text, label.x, label.baseline, label.font_size, color)
}

fn solid_paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    paint
}

fn surface_rect(pixmap: &Pixmap) -> Result<SkiaRect, RendererError> {
    SkiaRect::from_xywh(0.0, 0.0, pixmap.width() as f32, pixmap.height() as f32).ok_or(
        RendererError::Canvas(CanvasError::InvalidDimensions {
            width: pixmap.width(),
            height: pixmap.height(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::page::ids;

    fn settings(width: f64, height: f64, cols: u32, rows: u32, outer: f64, inner: f64) -> WindowSettings {
        let mut settings = WindowSettings::new();
        settings
            .set_window_opening_width(width)
            .set_window_opening_height(height)
            .set_number_of_pane_columns(cols)
            .set_number_of_pane_rows(rows)
            .set_outer_frame_width(outer)
            .set_inner_frame_width(inner);
        settings
    }

    fn scenario() -> ResolvedWindow {
        settings(1000.0, 800.0, 3, 2, 20.0, 10.0).resolve().unwrap()
    }

    fn rgb(pixmap: &Pixmap, x: u32, y: u32) -> (u8, u8, u8, u8) {
        let pixel = pixmap.pixel(x, y).unwrap();
        (pixel.red(), pixel.green(), pixel.blue(), pixel.alpha())
    }

    #[test]
    fn scenario_layout_has_six_labelled_panes() {
        let font = LabelFont::fallback();
        let layout = FrameLayout::from_window(&scenario(), 1.0, &RenderStyle::default(), &font).unwrap();

        assert_eq!((layout.surface_width, layout.surface_height), (1000, 800));
        assert_eq!(layout.panes.len(), 6);

        let first = &layout.panes[0];
        assert_eq!(first.top_left_label.text, "20x20");
        assert_eq!(first.bottom_right_label.text, "333.33x395");

        let last = &layout.panes[5];
        assert_eq!((last.row, last.col), (1, 2));
        assert_eq!(last.top_left_label.text, "666.67x405");
        assert_eq!(last.bottom_right_label.text, "980x780");
    }

    #[test]
    fn labels_anchor_to_pane_corners() {
        let font = LabelFont::fallback();
        let style = RenderStyle::default();
        let layout = FrameLayout::from_window(&scenario(), 0.5, &style, &font).unwrap();
        let pane = &layout.panes[0];

        assert_eq!(pane.top_left_label.x, pane.device.x as f32);
        assert_eq!(pane.top_left_label.baseline, pane.device.y as f32 + style.font_size);

        let width = font.measure(&pane.bottom_right_label.text, style.font_size);
        let right = pane.bottom_right_label.x + width;
        assert!((right - pane.device.right() as f32).abs() < 1e-3);
        assert_eq!(
            pane.bottom_right_label.baseline,
            pane.device.bottom() as f32 - style.label_inset
        );
    }

    #[test]
    fn device_geometry_scales_logical_geometry() {
        let font = LabelFont::fallback();
        let layout = FrameLayout::from_window(&scenario(), 0.5, &RenderStyle::default(), &font).unwrap();

        assert_eq!((layout.surface_width, layout.surface_height), (500, 400));
        for pane in &layout.panes {
            assert_eq!(pane.device, pane.logical.scaled(0.5));
            assert!(pane.device.x >= 10.0 && pane.device.y >= 10.0);
        }
    }

    #[test]
    fn grid_is_exhaustive_and_non_overlapping() {
        let font = LabelFont::fallback();
        for (cols, rows) in [(1, 1), (4, 1), (1, 5), (3, 3)] {
            let window = settings(900.0, 600.0, cols, rows, 15.0, 5.0).resolve().unwrap();
            let layout = FrameLayout::from_window(&window, 1.0, &RenderStyle::default(), &font).unwrap();

            assert_eq!(layout.panes.len(), (cols * rows) as usize);
            let right_limit = f64::from(layout.surface_width) - 15.0;
            let bottom_limit = f64::from(layout.surface_height) - 15.0;
            for (i, a) in layout.panes.iter().enumerate() {
                assert!(a.device.x >= 15.0 - 1e-9 && a.device.y >= 15.0 - 1e-9);
                assert!(a.device.right() <= right_limit + 1e-9, "{a:?}");
                assert!(a.device.bottom() <= bottom_limit + 1e-9, "{a:?}");
                for b in &layout.panes[i + 1..] {
                    assert!(a.device.intersection(&b.device).is_none());
                }
            }
        }
    }

    #[test]
    fn fractional_surface_size_rounds_up() {
        assert_eq!(device_length(1000.0, 0.5), 500);
        assert_eq!(device_length(1001.0, 0.5), 501);
        assert_eq!(device_length(100.0, 0.1), 10);
    }

    #[test]
    fn render_paints_frame_and_panes() {
        // 300x200 opening, two panes of 120x160 at x=20 and x=160
        let window = settings(300.0, 200.0, 2, 1, 20.0, 20.0).resolve().unwrap();
        let font = LabelFont::fallback();
        let mut canvas = Canvas::new();
        let style = RenderStyle::default();

        let mut renderer = CanvasWindowRenderer::new(&mut canvas, 1.0, style, &font).unwrap();
        let layout = renderer.render(&window).unwrap();
        assert_eq!(layout.panes.len(), 2);

        let pixmap = canvas.pixmap().unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (300, 200));

        // Pane interiors
        assert_eq!(rgb(pixmap, 80, 100), (0xAA, 0xEE, 0xFF, 0xFF));
        assert_eq!(rgb(pixmap, 220, 100), (0xAA, 0xEE, 0xFF, 0xFF));
        // Outer frame and inner divider show the background
        assert_eq!(rgb(pixmap, 10, 100), (0xEE, 0xEE, 0xEE, 0xFF));
        assert_eq!(rgb(pixmap, 150, 100), (0xEE, 0xEE, 0xEE, 0xFF));
        assert_eq!(rgb(pixmap, 150, 5), (0xEE, 0xEE, 0xEE, 0xFF));
    }

    #[test]
    fn background_goes_behind_existing_content() {
        let window = settings(100.0, 100.0, 1, 1, 10.0, 0.0).resolve().unwrap();
        let font = LabelFont::fallback();
        let mut canvas = Canvas::new();
        let mut renderer = CanvasWindowRenderer::new(&mut canvas, 1.0, RenderStyle::default(), &font).unwrap();

        renderer.resize(&window).unwrap();
        assert_eq!(renderer.paint_panes(&window).unwrap(), 1);
        renderer.paint_background().unwrap();

        let pixmap = canvas.pixmap().unwrap();
        assert_eq!(rgb(pixmap, 50, 50), (0xAA, 0xEE, 0xFF, 0xFF));
        assert_eq!(rgb(pixmap, 5, 50), (0xEE, 0xEE, 0xEE, 0xFF));
    }

    #[test]
    fn painting_requires_a_sized_canvas() {
        let font = LabelFont::fallback();
        let mut canvas = Canvas::new();
        let mut renderer = CanvasWindowRenderer::new(&mut canvas, 1.0, RenderStyle::default(), &font).unwrap();

        assert!(matches!(
            renderer.paint_background(),
            Err(RendererError::Canvas(CanvasError::Unsized))
        ));
    }

    #[test]
    fn invalid_settings_fail_before_touching_canvas() {
        let font = LabelFont::fallback();
        let mut canvas = Canvas::new();
        let mut renderer = CanvasWindowRenderer::new(&mut canvas, 1.0, RenderStyle::default(), &font).unwrap();

        let result = renderer.render_settings(&WindowSettings::default());
        assert!(matches!(result, Err(RendererError::InvalidSettings(_))));
        assert!(!canvas.is_sized());
    }

    #[test]
    fn invalid_pixel_ratio_is_rejected() {
        let font = LabelFont::fallback();
        let mut canvas = Canvas::new();
        assert!(matches!(
            CanvasWindowRenderer::new(&mut canvas, 0.0, RenderStyle::default(), &font),
            Err(RendererError::InvalidPixelRatio { .. })
        ));
    }

    #[test]
    fn attach_finds_canvas_by_id() {
        let font = LabelFont::fallback();
        let mut page = Page::calculator();
        let settings = CanvasWindowSettings::new(ids::WINDOW_CANVAS, 0.25);

        let mut renderer = CanvasWindowRenderer::attach(&mut page, &settings, RenderStyle::default(), &font).unwrap();
        renderer.render(&scenario()).unwrap();

        let canvas = page.canvas(ids::WINDOW_CANVAS).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (250, 200));
    }

    #[test]
    fn attach_fails_for_unknown_surface() {
        let font = LabelFont::fallback();
        let mut page = Page::calculator();
        let settings = CanvasWindowSettings::new("missing-canvas", 1.0);

        let err = CanvasWindowRenderer::attach(&mut page, &settings, RenderStyle::default(), &font)
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "Canvas element with ID missing-canvas not found");
    }

    #[test]
    fn grid_check_scales_with_pixel_ratio() {
        // Panes of 400x300 logical units
        let window = settings(500.0, 400.0, 1, 1, 50.0, 0.0).resolve().unwrap();
        assert!(check_grid(&window, 1.0).is_ok());
        assert!(check_grid(&window, 0.004).is_ok());
        assert!(matches!(
            check_grid(&window, 0.003),
            Err(RendererError::PaneTooSmall { .. })
        ));
    }

    #[test]
    fn oversized_grid_is_rejected_before_layout() {
        let font = LabelFont::fallback();
        let mut canvas = Canvas::new();
        let mut renderer = CanvasWindowRenderer::new(&mut canvas, 0.5, RenderStyle::default(), &font).unwrap();

        // 70000 x 70000 panes of about 0.23 units each
        let window = settings(16_000.0, 16_000.0, 70_000, 70_000, 0.0, 0.0).resolve().unwrap();
        assert!(matches!(
            renderer.render(&window),
            Err(RendererError::TooManyPanes { count: 4_900_000_000, max: MAX_PANES })
        ));
        assert!(!canvas.is_sized());
    }

    #[test]
    fn sub_pixel_panes_are_rejected() {
        let font = LabelFont::fallback();
        let mut canvas = Canvas::new();
        let mut renderer = CanvasWindowRenderer::new(&mut canvas, 0.5, RenderStyle::default(), &font).unwrap();

        // 1000 columns of 1 unit each are half a pixel wide at ratio 0.5
        let window = settings(1000.0, 100.0, 1000, 1, 0.0, 0.0).resolve().unwrap();
        let err = renderer.render(&window).unwrap_err();
        assert!(matches!(err, RendererError::PaneTooSmall { .. }));
        assert_eq!(err.to_string(), "Panes are too small to draw: 0.50x50.00 pixels");
        assert!(!canvas.is_sized());
    }

    #[test]
    fn unrepresentable_pane_geometry_is_reported() {
        let font = LabelFont::fallback();
        let mut canvas = Canvas::new();
        let mut renderer = CanvasWindowRenderer::new(&mut canvas, 1.0, RenderStyle::default(), &font).unwrap();
        renderer.resize(&settings(10.0, 10.0, 1, 1, 0.0, 0.0).resolve().unwrap()).unwrap();

        // Finite in f64 but infinite once converted to f32 device space
        let window = settings(1e40, 1e40, 1, 1, 0.0, 0.0).resolve().unwrap();
        let err = renderer.paint_panes(&window).unwrap_err();
        assert!(matches!(err, RendererError::InvalidGeometry { row: 0, col: 0 }));
        assert_eq!(err.to_string(), "Invalid pane geometry at row 0, column 0");
    }

    #[test]
    fn rerender_resizes_and_clears() {
        let font = LabelFont::fallback();
        let mut canvas = Canvas::new();
        {
            let mut renderer = CanvasWindowRenderer::new(&mut canvas, 1.0, RenderStyle::default(), &font).unwrap();
            renderer.render(&settings(300.0, 200.0, 2, 1, 20.0, 20.0).resolve().unwrap()).unwrap();
            renderer.render(&settings(120.0, 80.0, 1, 1, 10.0, 0.0).resolve().unwrap()).unwrap();
        }
        assert_eq!((canvas.width(), canvas.height()), (120, 80));
    }
}

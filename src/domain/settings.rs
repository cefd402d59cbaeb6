//! Window settings value object
//!
//! `WindowSettings` is filled in field by field by the calling layer. Pane
//! sizes are never stored: they are derived from the current inputs on every
//! call, so a changed input can never leave a stale pane size behind.
//! `ResolvedWindow` is the validated snapshot the renderer consumes.

use crate::domain::core::Rect;
use crate::domain::layout::{self, LayoutError};

/// Inputs of one pane size calculation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowSettings {
    window_opening_height: f64,
    window_opening_width: f64,
    number_of_pane_columns: u32,
    number_of_pane_rows: u32,
    outer_frame_width: f64,
    inner_frame_width: f64,
}

impl WindowSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the opening height in logical units
    pub fn set_window_opening_height(&mut self, height: f64) -> &mut Self {
        self.window_opening_height = height;
        self
    }

    /// Sets the opening width in logical units
    pub fn set_window_opening_width(&mut self, width: f64) -> &mut Self {
        self.window_opening_width = width;
        self
    }

    /// Sets how many panes sit side by side
    pub fn set_number_of_pane_columns(&mut self, columns: u32) -> &mut Self {
        self.number_of_pane_columns = columns;
        self
    }

    /// Sets how many panes are stacked vertically
    pub fn set_number_of_pane_rows(&mut self, rows: u32) -> &mut Self {
        self.number_of_pane_rows = rows;
        self
    }

    /// Sets the frame width around the whole opening
    pub fn set_outer_frame_width(&mut self, width: f64) -> &mut Self {
        self.outer_frame_width = width;
        self
    }

    /// Sets the divider width between adjacent panes
    pub fn set_inner_frame_width(&mut self, width: f64) -> &mut Self {
        self.inner_frame_width = width;
        self
    }

    /// Returns the opening height
    pub fn window_opening_height(&self) -> f64 {
        self.window_opening_height
    }

    /// Returns the opening width
    pub fn window_opening_width(&self) -> f64 {
        self.window_opening_width
    }

    /// Returns the number of pane columns
    pub fn number_of_pane_columns(&self) -> u32 {
        self.number_of_pane_columns
    }

    /// Returns the number of pane rows
    pub fn number_of_pane_rows(&self) -> u32 {
        self.number_of_pane_rows
    }

    pub fn outer_frame_width(&self) -> f64 {
        self.outer_frame_width
    }

    pub fn inner_frame_width(&self) -> f64 {
        self.inner_frame_width
    }

    /// Total number of panes in the grid
    pub fn number_of_panes(&self) -> u64 {
        u64::from(self.number_of_pane_columns) * u64::from(self.number_of_pane_rows)
    }

    /// Width of a single pane for the current inputs
    pub fn pane_width(&self) -> Result<f64, LayoutError> {
        layout::compute_pane_width(
            self.window_opening_width,
            self.outer_frame_width,
            self.inner_frame_width,
            self.number_of_pane_columns,
        )
    }

    /// Height of a single pane for the current inputs
    pub fn pane_height(&self) -> Result<f64, LayoutError> {
        layout::compute_pane_height(
            self.window_opening_height,
            self.outer_frame_width,
            self.inner_frame_width,
            self.number_of_pane_rows,
        )
    }

    /// Validates both axes and freezes the geometry for rendering
    pub fn resolve(&self) -> Result<ResolvedWindow, LayoutError> {
        let pane_width = self.pane_width()?;
        let pane_height = self.pane_height()?;

        Ok(ResolvedWindow {
            window_opening_height: self.window_opening_height,
            window_opening_width: self.window_opening_width,
            number_of_pane_columns: self.number_of_pane_columns,
            number_of_pane_rows: self.number_of_pane_rows,
            outer_frame_width: self.outer_frame_width,
            inner_frame_width: self.inner_frame_width,
            pane_width,
            pane_height,
        })
    }
}

/// Validated window geometry with its derived pane size
///
/// Only obtainable through [`WindowSettings::resolve`], so every instance
/// satisfies the layout constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedWindow {
    window_opening_height: f64,
    window_opening_width: f64,
    number_of_pane_columns: u32,
    number_of_pane_rows: u32,
    outer_frame_width: f64,
    inner_frame_width: f64,
    pane_width: f64,
    pane_height: f64,
}

/// One pane of the grid in logical coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanePosition {
    pub row: u32,
    pub col: u32,
    pub rect: Rect,
}

impl ResolvedWindow {
    pub fn window_opening_height(&self) -> f64 {
        self.window_opening_height
    }

    pub fn window_opening_width(&self) -> f64 {
        self.window_opening_width
    }

    pub fn number_of_pane_columns(&self) -> u32 {
        self.number_of_pane_columns
    }

    pub fn number_of_pane_rows(&self) -> u32 {
        self.number_of_pane_rows
    }

    pub fn outer_frame_width(&self) -> f64 {
        self.outer_frame_width
    }

    pub fn inner_frame_width(&self) -> f64 {
        self.inner_frame_width
    }

    pub fn pane_width(&self) -> f64 {
        self.pane_width
    }

    pub fn pane_height(&self) -> f64 {
        self.pane_height
    }

    pub fn number_of_panes(&self) -> u64 {
        u64::from(self.number_of_pane_columns) * u64::from(self.number_of_pane_rows)
    }

    /// Logical rectangle of the pane at (`row`, `col`)
    pub fn pane_rect(&self, row: u32, col: u32) -> Rect {
        let x = layout::pane_offset(col, self.pane_width, self.outer_frame_width, self.inner_frame_width);
        let y = layout::pane_offset(row, self.pane_height, self.outer_frame_width, self.inner_frame_width);
        Rect::new(x, y, self.pane_width, self.pane_height)
    }

    /// All panes in row-major order
    pub fn panes(&self) -> impl Iterator<Item = PanePosition> + '_ {
        (0..self.number_of_pane_rows).flat_map(move |row| {
            (0..self.number_of_pane_columns).map(move |col| PanePosition {
                row,
                col,
                rect: self.pane_rect(row, col),
            })
        })
    }
}

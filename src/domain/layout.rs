//! Pane size arithmetic
//!
//! Converts a window opening, its frame widths and a pane count along one
//! axis into the size of a single pane. The outer frame sits on both edges
//! of the axis, the inner frame only between adjacent panes:
//!
//! ```text
//! pane = (opening - 2 * outer - inner * (count - 1)) / count
//! ```

use std::fmt;

use thiserror::Error;

/// Axis along which a pane size is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal axis, panes counted in columns
    Width,
    /// Vertical axis, panes counted in rows
    Height,
}

impl Axis {
    /// Name of the pane count along this axis
    pub fn count_name(self) -> &'static str {
        match self {
            Axis::Width => "columns",
            Axis::Height => "rows",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Width => f.write_str("width"),
            Axis::Height => f.write_str("height"),
        }
    }
}

/// Reasons a pane layout cannot be computed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("{name} is not a finite number ({value})")]
    NonFiniteInput { name: &'static str, value: f64 },

    #[error("window opening {axis} must be positive, got {size}")]
    InvalidOpening { axis: Axis, size: f64 },

    #[error("{name} must not be negative, got {value}")]
    NegativeFrameWidth { name: &'static str, value: f64 },

    #[error("number of pane {} must be at least 1", count_name(.axis))]
    InvalidCount { axis: Axis },

    #[error("calculated pane {axis} is not valid ({size:.2})")]
    NonPositivePane { axis: Axis, size: f64 },
}

/// Computes the size of one pane along `axis`
///
/// All inputs are validated before the formula runs; a result that is not
/// strictly positive is reported as [`LayoutError::NonPositivePane`] rather
/// than returned.
pub fn compute_pane_size(
    axis: Axis,
    opening: f64,
    outer_frame_width: f64,
    inner_frame_width: f64,
    count: u32,
) -> Result<f64, LayoutError> {
    ensure_finite("window opening", opening)?;
    ensure_finite("outer frame width", outer_frame_width)?;
    ensure_finite("inner frame width", inner_frame_width)?;

    if opening <= 0.0 {
        return Err(LayoutError::InvalidOpening { axis, size: opening });
    }
    if outer_frame_width < 0.0 {
        return Err(LayoutError::NegativeFrameWidth {
            name: "outer frame width",
            value: outer_frame_width,
        });
    }
    if inner_frame_width < 0.0 {
        return Err(LayoutError::NegativeFrameWidth {
            name: "inner frame width",
            value: inner_frame_width,
        });
    }
    if count == 0 {
        return Err(LayoutError::InvalidCount { axis });
    }

    let total_outer = outer_frame_width * 2.0;
    let total_inner = inner_frame_width * f64::from(count - 1);
    let size = (opening - total_outer - total_inner) / f64::from(count);

    if !size.is_finite() || size <= 0.0 {
        return Err(LayoutError::NonPositivePane { axis, size });
    }

    Ok(size)
}

/// Computes the width of one pane from the opening width and column count
pub fn compute_pane_width(
    window_opening_width: f64,
    outer_frame_width: f64,
    inner_frame_width: f64,
    number_of_pane_columns: u32,
) -> Result<f64, LayoutError> {
    compute_pane_size(
        Axis::Width,
        window_opening_width,
        outer_frame_width,
        inner_frame_width,
        number_of_pane_columns,
    )
}

/// Computes the height of one pane from the opening height and row count
pub fn compute_pane_height(
    window_opening_height: f64,
    outer_frame_width: f64,
    inner_frame_width: f64,
    number_of_pane_rows: u32,
) -> Result<f64, LayoutError> {
    compute_pane_size(
        Axis::Height,
        window_opening_height,
        outer_frame_width,
        inner_frame_width,
        number_of_pane_rows,
    )
}

/// Offset of the pane at `index` from the opening edge along one axis
///
/// The first pane starts right after the outer frame; each later pane is
/// pushed along by the panes and inner frames before it.
pub fn pane_offset(index: u32, pane_size: f64, outer_frame_width: f64, inner_frame_width: f64) -> f64 {
    let index = f64::from(index);
    let mut offset = outer_frame_width + index * pane_size;
    if index > 0.0 {
        offset += inner_frame_width * index;
    }
    offset
}

fn count_name(axis: &Axis) -> &'static str {
    axis.count_name()
}

fn ensure_finite(name: &'static str, value: f64) -> Result<(), LayoutError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(LayoutError::NonFiniteInput { name, value })
    }
}

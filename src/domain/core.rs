//! Core domain types and operations
//!
//! This module defines pure geometric types in logical units (for example
//! millimetres). Nothing here knows about pixels or drawing surfaces.

/// Rectangle in logical coordinates
///
/// This is the fundamental building block for all pane calculations.
/// Coordinates are unrounded; rounding only ever happens at display time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    /// Creates a new rectangle
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Returns the right edge coordinate
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    /// Returns the bottom edge coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Returns the overlapping region of two rectangles, or None if they only
    /// touch or are disjoint
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if left < right && top < bottom {
            Some(Rect::new(left, top, right - left, bottom - top))
        } else {
            None
        }
    }

    /// Returns the rectangle scaled by a uniform factor
    pub fn scaled(&self, factor: f64) -> Rect {
        Rect::new(self.x * factor, self.y * factor, self.w * factor, self.h * factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_basic_properties() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.bottom(), 70.0);
    }

    #[test]
    fn rect_intersection() {
        let rect1 = Rect::new(0.0, 0.0, 20.0, 20.0);
        let rect2 = Rect::new(10.0, 10.0, 20.0, 20.0);
        let intersection = rect1.intersection(&rect2).unwrap();
        assert_eq!(intersection, Rect::new(10.0, 10.0, 10.0, 10.0));

        // No intersection
        let rect3 = Rect::new(30.0, 30.0, 10.0, 10.0);
        assert!(rect1.intersection(&rect3).is_none());
    }

    #[test]
    fn touching_rects_do_not_intersect() {
        let left = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(left.intersection(&right).is_none());
    }

    #[test]
    fn rect_scaled() {
        let rect = Rect::new(20.0, 20.0, 313.5, 375.0).scaled(2.0);
        assert_eq!(rect, Rect::new(40.0, 40.0, 627.0, 750.0));
    }
}

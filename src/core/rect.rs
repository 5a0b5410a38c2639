//! Axis-Aligned Rectangles
//!
//! Geometry primitives for actor and block collision.
//! Y grows downward (screen space), so a rectangle's `top` is its `y`.

use serde::{Serialize, Deserialize};

/// Axis-aligned rectangle in world space.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width (must be positive to collide).
    pub width: f64,
    /// Height (must be positive to collide).
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether this rectangle has finite coordinates and a positive area.
    ///
    /// Malformed rectangles never collide.
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    /// Strict horizontal overlap of `[left, left + width)` with this rectangle.
    #[inline]
    pub fn overlaps_x_span(&self, left: f64, width: f64) -> bool {
        left < self.right() && left + width > self.x
    }

    /// Strict vertical overlap of `[top, top + height)` with this rectangle.
    #[inline]
    pub fn overlaps_y_span(&self, top: f64, height: f64) -> bool {
        top < self.bottom() && top + height > self.y
    }

    /// Strict interior overlap: touching edges do not count.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.overlaps_x_span(other.x, other.width) && self.overlaps_y_span(other.y, other.height)
    }

    /// Inclusive overlap: shared edges and corners count as touching.
    #[inline]
    pub fn touches(&self, other: &Rect) -> bool {
        let vertical = self.bottom() >= other.y && self.y <= other.bottom();
        let horizontal = self.right().min(other.right()) >= self.x.max(other.x);
        vertical && horizontal
    }

    /// Bounding box of two rectangles.
    ///
    /// Used as the swept volume of a box moving from `self` to `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        let left = self.x.min(other.x);
        let top = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(left, top, right - left, bottom - top)
    }
}

/// Swept volume of a box of size `width` x `height` moving from
/// `(old_x, old_y)` to `(new_x, new_y)` within one tick.
#[inline]
pub fn swept_rect(old_x: f64, old_y: f64, new_x: f64, new_y: f64, width: f64, height: f64) -> Rect {
    Rect::new(old_x, old_y, width, height).union(&Rect::new(new_x, new_y, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
    }

    #[test]
    fn test_strict_overlap_excludes_edges() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let touching = Rect::new(10.0, 0.0, 10.0, 10.0);
        let inside = Rect::new(5.0, 5.0, 10.0, 10.0);

        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
    }

    #[test]
    fn test_inclusive_touch_counts_edges() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let touching = Rect::new(10.0, 10.0, 5.0, 5.0);
        let apart = Rect::new(10.5, 0.0, 5.0, 5.0);

        assert!(a.touches(&touching));
        assert!(!a.touches(&apart));
    }

    #[test]
    fn test_malformed_rects() {
        assert!(Rect::new(0.0, 0.0, 1.0, 1.0).is_well_formed());
        assert!(!Rect::new(0.0, 0.0, 0.0, 1.0).is_well_formed());
        assert!(!Rect::new(0.0, 0.0, 5.0, -1.0).is_well_formed());
        assert!(!Rect::new(f64::NAN, 0.0, 5.0, 5.0).is_well_formed());
    }

    #[test]
    fn test_swept_rect_covers_both_positions() {
        let swept = swept_rect(0.0, 0.0, 100.0, -20.0, 25.0, 20.0);
        assert_eq!(swept, Rect::new(0.0, -20.0, 125.0, 40.0));

        // A thin block between the two positions is inside the sweep
        let thin = Rect::new(50.0, 0.0, 10.0, 10.0);
        assert!(swept.touches(&thin));
        assert!(!Rect::new(0.0, 0.0, 25.0, 20.0).touches(&thin));
        assert!(!Rect::new(100.0, -20.0, 25.0, 20.0).touches(&thin));
    }
}

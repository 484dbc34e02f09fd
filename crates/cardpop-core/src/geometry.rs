#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All values are layout points (`f64`), origin at top-left, `y` growing
//! downward. Rectangles are half-open in the sense that `max_x()` and
//! `max_y()` are the far edges; containment of one rectangle in another is
//! inclusive on every edge.

use bitflags::bitflags;

/// A point in layout space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Zero size.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether both components are zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }

    /// Component along `axis`.
    #[inline]
    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

/// Symmetric per-axis inset: `width` is applied to the left and right
/// edges, `height` to the top and bottom edges.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insets {
    pub width: f64,
    pub height: f64,
}

impl Insets {
    /// No inset.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Same inset on both axes.
    #[inline]
    pub const fn all(value: f64) -> Self {
        Self::new(value, value)
    }

    /// Inset along `axis`.
    #[inline]
    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

impl From<(f64, f64)> for Insets {
    fn from((width, height): (f64, f64)) -> Self {
        Self::new(width, height)
    }
}

/// A layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    Horizontal,
    Vertical,
}

bitflags! {
    /// A set of rectangle edges.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Edges: u8 {
        const TOP = 1 << 0;
        const LEFT = 1 << 1;
        const BOTTOM = 1 << 2;
        const RIGHT = 1 << 3;
    }
}

/// A rectangle in layout space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width in points.
    pub width: f64,
    /// Height in points.
    pub height: f64,
}

impl Rect {
    /// The zero rectangle.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Create a rectangle from an origin and a size.
    #[inline]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    #[inline]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    #[inline]
    pub fn min_x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn min_y(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn mid_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    #[inline]
    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Check if the rectangle has no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point lies inside the rectangle (far edges exclusive).
    #[inline]
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.min_x()
            && point.x < self.max_x()
            && point.y >= self.min_y()
            && point.y < self.max_y()
    }

    /// Check if `other` lies entirely within this rectangle, edges inclusive.
    #[inline]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.min_x() >= self.min_x()
            && other.min_y() >= self.min_y()
            && other.max_x() <= self.max_x()
            && other.max_y() <= self.max_y()
    }

    /// Edges of `inner` that cross outside this rectangle.
    pub fn overflowing_edges(&self, inner: &Rect) -> Edges {
        let mut edges = Edges::empty();
        if inner.min_y() < self.min_y() {
            edges |= Edges::TOP;
        }
        if inner.min_x() < self.min_x() {
            edges |= Edges::LEFT;
        }
        if inner.max_y() > self.max_y() {
            edges |= Edges::BOTTOM;
        }
        if inner.max_x() > self.max_x() {
            edges |= Edges::RIGHT;
        }
        edges
    }

    /// Translate the rectangle.
    #[inline]
    pub fn offset_by(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Shrink (positive) or grow (negative) the rectangle symmetrically.
    #[inline]
    pub fn inset_by(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(
            self.x + dx,
            self.y + dy,
            self.width - dx * 2.0,
            self.height - dy * 2.0,
        )
    }

    /// Grow the rectangle on every side by `amount`.
    #[inline]
    pub fn outset(&self, amount: f64) -> Rect {
        self.inset_by(-amount, -amount)
    }

    /// Compute the intersection with another rectangle, returning `None` if
    /// they do not overlap with positive area.
    #[inline]
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        let x = self.min_x().max(other.min_x());
        let y = self.min_y().max(other.min_y());
        let right = self.max_x().min(other.max_x());
        let bottom = self.max_y().min(other.max_y());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Compute the intersection, or [`Rect::ZERO`] when they don't overlap.
    #[inline]
    pub fn intersection(&self, other: &Rect) -> Rect {
        self.intersection_opt(other).unwrap_or_default()
    }

    /// The smallest rectangle containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.min_x().min(other.min_x());
        let y = self.min_y().min(other.min_y());
        let right = self.max_x().max(other.max_x());
        let bottom = self.max_y().max(other.max_y());
        Rect::new(x, y, right - x, bottom - y)
    }

    /// Linear interpolation between two rectangles, component-wise.
    pub fn lerp(&self, to: &Rect, t: f64) -> Rect {
        Rect::new(
            lerp(self.x, to.x, t),
            lerp(self.y, to.y, t),
            lerp(self.width, to.width, t),
            lerp(self.height, to.height, t),
        )
    }
}

/// A pure translation transform. Identity is `(0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Translation {
    pub dx: f64,
    pub dy: f64,
}

impl Translation {
    /// The identity transform.
    pub const IDENTITY: Self = Self::new(0.0, 0.0);

    #[inline]
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }

    /// Apply to a rectangle (moves it, keeps its size).
    #[inline]
    pub fn apply(&self, rect: &Rect) -> Rect {
        rect.offset_by(self.dx, self.dy)
    }

    pub fn lerp(&self, to: &Translation, t: f64) -> Translation {
        Translation::new(lerp(self.dx, to.dx, t), lerp(self.dy, to.dy, t))
    }
}

#[inline]
pub(crate) fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::{Edges, Insets, Point, Rect, Size, Translation};

    #[test]
    fn rect_edges() {
        let rect = Rect::new(2.0, 3.0, 4.0, 5.0);
        assert_eq!(rect.max_x(), 6.0);
        assert_eq!(rect.max_y(), 8.0);
        assert_eq!(rect.mid_x(), 4.0);
        assert_eq!(rect.mid_y(), 5.5);
    }

    #[test]
    fn rect_contains_point_edges() {
        let rect = Rect::new(2.0, 3.0, 4.0, 5.0);
        assert!(rect.contains_point(Point::new(2.0, 3.0)));
        assert!(rect.contains_point(Point::new(5.9, 7.9)));
        assert!(!rect.contains_point(Point::new(6.0, 3.0)));
        assert!(!rect.contains_point(Point::new(2.0, 8.0)));
    }

    #[test]
    fn contains_rect_is_edge_inclusive() {
        let outer = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(outer.contains_rect(&outer));
        assert!(outer.contains_rect(&Rect::new(0.0, 0.0, 10.0, 5.0)));
        assert!(!outer.contains_rect(&Rect::new(0.0, 0.0, 10.5, 5.0)));
        assert!(!outer.contains_rect(&Rect::new(-0.5, 0.0, 1.0, 1.0)));
    }

    #[test]
    fn overflowing_edges_reports_each_side() {
        let outer = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(
            outer.overflowing_edges(&Rect::new(1.0, 1.0, 2.0, 2.0)),
            Edges::empty()
        );
        assert_eq!(
            outer.overflowing_edges(&Rect::new(-1.0, -1.0, 20.0, 20.0)),
            Edges::all()
        );
        assert_eq!(
            outer.overflowing_edges(&Rect::new(5.0, 5.0, 6.0, 2.0)),
            Edges::RIGHT
        );
    }

    #[test]
    fn intersection_overlaps() {
        let a = Rect::new(0.0, 0.0, 4.0, 4.0);
        let b = Rect::new(2.0, 2.0, 4.0, 4.0);
        assert_eq!(a.intersection(&b), Rect::new(2.0, 2.0, 2.0, 2.0));
    }

    #[test]
    fn touching_rects_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 4.0, 4.0);
        let b = Rect::new(0.0, 4.0, 4.0, 4.0);
        assert_eq!(a.intersection_opt(&b), None);
        assert_eq!(a.intersection(&b), Rect::ZERO);
    }

    #[test]
    fn inset_by_negative_grows() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert_eq!(rect.inset_by(0.0, -5.0), Rect::new(10.0, 5.0, 20.0, 30.0));
        assert_eq!(rect.outset(2.0), Rect::new(8.0, 8.0, 24.0, 24.0));
    }

    #[test]
    fn union_covers_both() {
        let a = Rect::new(0.0, 0.0, 2.0, 2.0);
        let b = Rect::new(5.0, 1.0, 2.0, 4.0);
        assert_eq!(a.union(&b), Rect::new(0.0, 0.0, 7.0, 5.0));
    }

    #[test]
    fn lerp_midpoint() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 20.0, 30.0, 10.0);
        assert_eq!(a.lerp(&b, 0.5), Rect::new(5.0, 10.0, 20.0, 10.0));
        let t = Translation::new(-16.0, 0.0).lerp(&Translation::IDENTITY, 0.25);
        assert_eq!(t, Translation::new(-12.0, 0.0));
    }

    #[test]
    fn size_and_insets_helpers() {
        assert!(Size::ZERO.is_zero());
        assert!(!Size::new(0.0, 1.0).is_zero());
        assert_eq!(Insets::from((14.0, 44.0)), Insets::new(14.0, 44.0));
        assert_eq!(Insets::all(3.0), Insets::new(3.0, 3.0));
        assert!(Translation::IDENTITY.is_identity());
        assert_eq!(
            Translation::new(1.0, 2.0).apply(&Rect::new(0.0, 0.0, 3.0, 3.0)),
            Rect::new(1.0, 2.0, 3.0, 3.0)
        );
    }
}

//! Axis-aligned rectangles in integer or floating-point coordinates.

use crate::vector::{parse_components, ParseGeometryError, Point2};
use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Axis-aligned rectangle stored as top-left position plus size.
///
/// Size components are expected to be non-negative. Zero-sized rectangles
/// are valid and still overlap anything they touch.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect<P> {
    /// Minimum corner.
    pub position: P,
    /// Extent along each axis.
    pub size: P,
}

/// Floating-point rectangle.
pub type FRect = Rect<Vec2>;

/// Integer rectangle.
pub type IRect = Rect<IVec2>;

impl<P: Point2> Rect<P> {
    /// Create a rectangle from position and size.
    pub fn new(position: P, size: P) -> Self {
        Self { position, size }
    }

    /// Create a rectangle from scalar `x, y, w, h`.
    pub fn from_xywh(x: P::Scalar, y: P::Scalar, w: P::Scalar, h: P::Scalar) -> Self {
        Self::new(P::from_xy(x, y), P::from_xy(w, h))
    }

    /// Create a rectangle spanning two corners (`min <= max` per axis).
    pub fn from_corners(min: P, max: P) -> Self {
        debug_assert!(min.x() <= max.x() && min.y() <= max.y());
        Self::new(min, P::from_xy(max.x() - min.x(), max.y() - min.y()))
    }

    /// Minimum corner.
    pub fn min(&self) -> P {
        self.position
    }

    /// Maximum corner (`position + size`).
    pub fn max(&self) -> P {
        P::from_xy(
            self.position.x() + self.size.x(),
            self.position.y() + self.size.y(),
        )
    }

    /// True when either extent is zero.
    pub fn is_empty(&self) -> bool {
        let zero = P::Scalar::default();
        self.size.x() == zero || self.size.y() == zero
    }

    /// Whether every component is finite.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.size.is_finite()
    }

    /// Closed containment test (edges count as inside).
    pub fn contains_point(&self, point: P) -> bool {
        let max = self.max();
        point.x() >= self.position.x()
            && point.x() <= max.x()
            && point.y() >= self.position.y()
            && point.y() <= max.y()
    }

    /// Tests overlap with another rectangle over closed intervals.
    pub fn intersects(&self, other: &Self) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x() <= b_max.x()
            && a_max.x() >= b_min.x()
            && a_min.y() <= b_max.y()
            && a_max.y() >= b_min.y()
    }

    /// Convert to a floating-point rectangle.
    pub fn to_frect(&self) -> FRect {
        FRect::new(self.position.to_vec2(), self.size.to_vec2())
    }
}

impl FRect {
    /// Centre point.
    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }
}

impl<P: Point2> FromStr for Rect<P> {
    type Err = ParseGeometryError;

    /// Parses `"x,y,w,h"`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let [x, y, w, h] = parse_components::<P::Scalar, 4>(input)?;
        Ok(Self::from_xywh(x, y, w, h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_and_size_agree() {
        let rect = IRect::from_corners(IVec2::new(1, 2), IVec2::new(4, 6));
        assert_eq!(rect.size, IVec2::new(3, 4));
        assert_eq!(rect.max(), IVec2::new(4, 6));
        assert!(!rect.is_empty());
    }

    #[test]
    fn zero_sized_rect_still_overlaps() {
        let line = FRect::from_xywh(0.0, 5.0, 10.0, 0.0);
        let target = FRect::from_xywh(4.0, 4.0, 2.0, 2.0);
        assert!(line.is_empty());
        assert!(line.intersects(&target));
        assert!(target.intersects(&line));
    }

    #[test]
    fn touching_edges_overlap_and_gaps_do_not() {
        let a = IRect::from_xywh(0, 0, 2, 2);
        let b = IRect::from_xywh(2, 0, 2, 2);
        let c = IRect::from_xywh(3, 3, 1, 1);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn contains_point_is_closed() {
        let rect = FRect::from_xywh(0.0, 0.0, 1.0, 1.0);
        assert!(rect.contains_point(Vec2::new(1.0, 1.0)));
        assert!(!rect.contains_point(Vec2::new(1.0, 1.01)));
    }

    #[test]
    fn parses_from_str() {
        let rect: FRect = "4, 4, 2, 2".parse().unwrap();
        assert_eq!(rect, FRect::from_xywh(4.0, 4.0, 2.0, 2.0));
        assert_eq!(rect.center(), Vec2::new(5.0, 5.0));

        let rect: IRect = "1,2,3,4".parse().unwrap();
        assert_eq!(rect.to_frect(), FRect::from_xywh(1.0, 2.0, 3.0, 4.0));
        assert!("1,2,3".parse::<IRect>().is_err());
        assert!("1,2,3,x".parse::<IRect>().is_err());
    }
}

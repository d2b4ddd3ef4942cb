#![warn(missing_docs)]
//! 2D geometry primitives (points, rectangles) and ray-vs-rectangle casting.

pub mod ray;
pub mod rect;
pub mod vector;

pub use glam::{IVec2, Vec2};
pub use ray::{cast_nearest, CastOptions, Contact, CornerNormal, NegativeTime, Ray};
pub use rect::{FRect, IRect, Rect};
pub use vector::{parse_vec2, ParseGeometryError, Point2, Scalar};

//! Coordinate abstractions over glam's float and integer vectors.
//!
//! Rectangles come in integer and floating-point flavours. Both are written
//! once against [`Point2`] and converted to [`Vec2`] when casting.

use glam::{IVec2, Vec2};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when parsing comma-separated coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseGeometryError {
    /// Wrong number of comma-separated components.
    #[error("expected {expected} comma-separated components, found {found}")]
    ComponentCount {
        /// Components required by the target type.
        expected: usize,
        /// Components present in the input.
        found: usize,
    },
    /// A component was not a valid number.
    #[error("invalid component {value:?}")]
    InvalidComponent {
        /// The offending text.
        value: String,
    },
}

/// Numeric scalar a [`Point2`] is built from.
pub trait Scalar:
    Copy + PartialOrd + Default + fmt::Debug + FromStr + Add<Output = Self> + Sub<Output = Self>
{
    /// Widen to `f32` for casting.
    fn to_f32(self) -> f32;

    /// Whether the value is finite (always true for integers).
    fn is_finite(self) -> bool;
}

impl Scalar for f32 {
    fn to_f32(self) -> f32 {
        self
    }

    fn is_finite(self) -> bool {
        f32::is_finite(self)
    }
}

impl Scalar for i32 {
    fn to_f32(self) -> f32 {
        self as f32
    }

    fn is_finite(self) -> bool {
        true
    }
}

/// A two-component point or size.
pub trait Point2: Copy + PartialEq + fmt::Debug {
    /// Component type.
    type Scalar: Scalar;

    /// Build from components.
    fn from_xy(x: Self::Scalar, y: Self::Scalar) -> Self;

    /// Horizontal component.
    fn x(self) -> Self::Scalar;

    /// Vertical component.
    fn y(self) -> Self::Scalar;

    /// Convert to a float vector.
    fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x().to_f32(), self.y().to_f32())
    }

    /// Whether both components are finite.
    fn is_finite(self) -> bool {
        self.x().is_finite() && self.y().is_finite()
    }
}

impl Point2 for Vec2 {
    type Scalar = f32;

    fn from_xy(x: f32, y: f32) -> Self {
        Vec2::new(x, y)
    }

    fn x(self) -> f32 {
        self.x
    }

    fn y(self) -> f32 {
        self.y
    }

    fn to_vec2(self) -> Vec2 {
        self
    }
}

impl Point2 for IVec2 {
    type Scalar = i32;

    fn from_xy(x: i32, y: i32) -> Self {
        IVec2::new(x, y)
    }

    fn x(self) -> i32 {
        self.x
    }

    fn y(self) -> i32 {
        self.y
    }

    fn to_vec2(self) -> Vec2 {
        self.as_vec2()
    }
}

/// Split `input` on commas into exactly `N` parsed components.
pub(crate) fn parse_components<T: FromStr, const N: usize>(
    input: &str,
) -> Result<[T; N], ParseGeometryError> {
    let parts: Vec<&str> = input.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(ParseGeometryError::ComponentCount {
            expected: N,
            found: parts.len(),
        });
    }

    let mut values = Vec::with_capacity(N);
    for part in parts {
        let value = part
            .parse::<T>()
            .map_err(|_| ParseGeometryError::InvalidComponent {
                value: part.to_string(),
            })?;
        values.push(value);
    }

    values
        .try_into()
        .map_err(|_| ParseGeometryError::ComponentCount { expected: N, found: N })
}

/// Parse `"x,y"` into a float vector.
pub fn parse_vec2(input: &str) -> Result<Vec2, ParseGeometryError> {
    let [x, y] = parse_components::<f32, 2>(input)?;
    Ok(Vec2::new(x, y))
}

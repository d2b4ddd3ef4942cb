//! Ray-vs-rectangle intersection using the slab method.
//!
//! A [`Ray`] is a finite segment from `origin` to `origin + dir`. Parametric
//! time `t` maps to `origin + dir * t`, so a contact is only reported for
//! `t <= 1`. Queries are pure: every call returns a fresh `Option<Contact>`.

use crate::rect::{FRect, Rect};
use crate::vector::Point2;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// What to do with contacts whose time is negative.
///
/// A negative entry time means the origin already lies inside the rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativeTime {
    /// Drop the contact.
    #[default]
    Reject,
    /// Report the contact with its negative time.
    Accept,
}

/// Normal reported when a general-direction ray enters both slabs at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CornerNormal {
    /// Resolve to the horizontal face.
    #[default]
    XAxis,
    /// Set both components, producing a diagonal normal.
    Diagonal,
}

/// Policy knobs for a cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CastOptions {
    /// Handling of contacts behind the origin.
    pub negative_time: NegativeTime,
    /// Handling of exact corner entries.
    pub corner_normal: CornerNormal,
}

impl CastOptions {
    fn accepts(&self, contact: &Contact) -> bool {
        match self.negative_time {
            NegativeTime::Reject => contact.time >= 0.0,
            NegativeTime::Accept => true,
        }
    }
}

/// First point where a ray touches a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// World-space contact position.
    pub point: Vec2,
    /// Outward face normal (axis-aligned unit vector, diagonal on corner ties).
    pub normal: Vec2,
    /// Parametric time along the ray.
    pub time: f32,
}

impl Contact {
    /// Fraction of the segment left after the contact.
    pub fn remaining_time(&self) -> f32 {
        1.0 - self.time
    }

    /// The rest of `ray` past this contact, mirrored off the struck face.
    pub fn reflect(&self, ray: &Ray) -> Ray {
        let flip = Vec2::new(
            if self.normal.x != 0.0 { -1.0 } else { 1.0 },
            if self.normal.y != 0.0 { -1.0 } else { 1.0 },
        );
        Ray::new(self.point, ray.dir * self.remaining_time() * flip)
    }
}

/// A finite ray segment.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Ray {
    /// Start of the segment.
    pub origin: Vec2,
    /// Offset from start to end; may be zero or axis-aligned.
    pub dir: Vec2,
}

impl Ray {
    /// Create a ray from origin and direction.
    pub const fn new(origin: Vec2, dir: Vec2) -> Self {
        Self { origin, dir }
    }

    /// Create the segment running from `from` to `to`.
    pub fn between(from: Vec2, to: Vec2) -> Self {
        Self::new(from, to - from)
    }

    /// Segment end point.
    pub fn end(&self) -> Vec2 {
        self.origin + self.dir
    }

    /// Point at parametric time `t`.
    pub fn point_at(&self, t: f32) -> Vec2 {
        self.origin + self.dir * t
    }

    /// A zero-length ray never hits anything.
    pub fn is_degenerate(&self) -> bool {
        self.dir == Vec2::ZERO
    }

    /// Whether origin and direction are finite.
    pub fn is_finite(&self) -> bool {
        self.origin.is_finite() && self.dir.is_finite()
    }

    /// Broad-phase box covering the whole segment.
    pub fn bounds(&self) -> FRect {
        FRect::new(self.origin.min(self.end()), self.dir.abs())
    }

    /// Existence test with default options.
    pub fn intersects_rect<P: Point2>(&self, rect: &Rect<P>) -> bool {
        self.intersects_rect_with(rect, &CastOptions::default())
    }

    /// Existence test. Always agrees with [`Ray::intersect_rect_with`].
    pub fn intersects_rect_with<P: Point2>(&self, rect: &Rect<P>, options: &CastOptions) -> bool {
        self.intersect_rect_with(rect, options).is_some()
    }

    /// Detailed test with default options.
    pub fn intersect_rect<P: Point2>(&self, rect: &Rect<P>) -> Option<Contact> {
        self.intersect_rect_with(rect, &CastOptions::default())
    }

    /// Detailed test returning the first contact, if any.
    pub fn intersect_rect_with<P: Point2>(
        &self,
        rect: &Rect<P>,
        options: &CastOptions,
    ) -> Option<Contact> {
        let contact = self.cast(&rect.to_frect(), options)?;
        options.accepts(&contact).then_some(contact)
    }

    fn cast(&self, rect: &FRect, options: &CastOptions) -> Option<Contact> {
        if self.is_degenerate() {
            return None;
        }
        if !self.is_finite() || !rect.is_finite() {
            trace!(ray = ?self, rect = ?rect, "rejecting non-finite cast input");
            return None;
        }
        if !self.bounds().intersects(rect) {
            return None;
        }

        if self.dir.x == 0.0 || self.dir.y == 0.0 {
            // The broad-phase box of an axis-aligned segment is the segment
            // itself, so passing it already proves contact.
            Some(self.cast_axis_aligned(rect))
        } else {
            self.cast_slabs(rect, options.corner_normal)
        }
    }

    fn cast_axis_aligned(&self, rect: &FRect) -> Contact {
        let (min, max) = (rect.min(), rect.max());
        let (near, far, normal) = if self.dir.y == 0.0 {
            (
                (min.x - self.origin.x) / self.dir.x,
                (max.x - self.origin.x) / self.dir.x,
                Vec2::new(-self.dir.x.signum(), 0.0),
            )
        } else {
            (
                (min.y - self.origin.y) / self.dir.y,
                (max.y - self.origin.y) / self.dir.y,
                Vec2::new(0.0, -self.dir.y.signum()),
            )
        };

        let time = near.min(far);
        Contact {
            point: self.point_at(time),
            normal,
            time,
        }
    }

    fn cast_slabs(&self, rect: &FRect, corner: CornerNormal) -> Option<Contact> {
        let t0 = (rect.min() - self.origin) / self.dir;
        let t1 = (rect.max() - self.origin) / self.dir;
        let near = t0.min(t1);
        let far = t0.max(t1);

        // Separating axis: one slab is left before the other is entered.
        if near.x > far.y || near.y > far.x {
            return None;
        }

        let time = near.max_element();
        if time > 1.0 {
            return None;
        }

        let x_face = Vec2::new(-self.dir.x.signum(), 0.0);
        let y_face = Vec2::new(0.0, -self.dir.y.signum());
        let normal = if near.x > near.y {
            x_face
        } else if near.x < near.y {
            y_face
        } else {
            match corner {
                CornerNormal::XAxis => x_face,
                CornerNormal::Diagonal => x_face + y_face,
            }
        };

        Some(Contact {
            point: self.point_at(time),
            normal,
            time,
        })
    }
}

/// Cast `ray` against every rect and return the earliest contact with its index.
///
/// Ties keep the lower index.
pub fn cast_nearest<P: Point2>(
    ray: &Ray,
    rects: &[Rect<P>],
    options: &CastOptions,
) -> Option<(usize, Contact)> {
    let mut best: Option<(usize, Contact)> = None;
    for (index, rect) in rects.iter().enumerate() {
        let Some(contact) = ray.intersect_rect_with(rect, options) else {
            continue;
        };
        if best.map_or(true, |(_, current)| contact.time < current.time) {
            best = Some((index, contact));
        }
    }

    trace!(candidates = rects.len(), hit = ?best.map(|(index, _)| index), "cast_nearest");
    best
}

pub use super::*;

/// Axis-aligned bounding box.
///
/// `min` is the lower left corner and `max` the upper right one, boxes with zero width or height are valid.
/// `tag` is an optional index into the caller's shape sequence, it is only carried around and
/// never interpreted by the box itself.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AABB {
    /// Lower left of the AABB
    pub min: Vec2,
    /// Upper right of the AABB
    pub max: Vec2,
    /// Index of the shape this box was computed from, if any
    pub tag: Option<usize>,
}

impl AABB {
    /// Creates the box spanned by two arbitrary corners.
    pub fn new(p1: impl Into<Vec2>, p2: impl Into<Vec2>) -> Self {
        let p1 = p1.into();
        let p2 = p2.into();
        AABB {
            min: p1.min(p2),
            max: p1.max(p2),
            tag: None,
        }
    }

    /// Creates a box from its corners, checking that `min <= max` on both axes and that every
    /// coordinate is finite.
    pub fn try_new(min: impl Into<Vec2>, max: impl Into<Vec2>) -> Result<Self, ShapeError> {
        let min = min.into();
        let max = max.into();
        if !min.is_finite() || !max.is_finite() {
            return Err(ShapeError::NotFinite);
        }
        if min.x > max.x || min.y > max.y {
            return Err(ShapeError::InvertedBounds {
                min_x: min.x,
                min_y: min.y,
                max_x: max.x,
                max_y: max.y,
            });
        }
        Ok(AABB {
            min,
            max,
            tag: None,
        })
    }

    pub fn from_center_half_extents(center: impl Into<Vec2>, hw: f32, hh: f32) -> Self {
        debug_assert!(hw >= 0.0 && hh >= 0.0);
        let center = center.into();
        let he = Vec2::new(hw, hh);
        AABB {
            min: center - he,
            max: center + he,
            tag: None,
        }
    }

    /// Smallest box containing every point.
    /// Returns `None` if `points` is empty.
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(min, max), &p| (min.min(p), max.max(p)));
        Some(AABB {
            min,
            max,
            tag: None,
        })
    }

    /// Tight bound of the four corners of an oriented box.
    pub fn from_obb(obb: &OBB) -> Self {
        let [a, b, c, d] = obb.corners();
        AABB {
            min: a.min(b).min(c).min(d),
            max: a.max(b).max(c).max(d),
            tag: None,
        }
    }

    pub fn with_tag(mut self, tag: usize) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Closed-interval overlap test: boxes sharing an edge or a corner overlap.
    ///
    /// ```rust
    /// use isect2d::AABB;
    /// let a = AABB::new([0.0, 0.0], [1.0, 1.0]);
    /// let b = AABB::new([1.0, 1.0], [2.0, 2.0]);
    /// assert!(a.overlaps(&b));
    /// ```
    pub fn overlaps(&self, other: &AABB) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    /// Smallest box containing both boxes. The tag is dropped.
    pub fn union(&self, other: &AABB) -> AABB {
        AABB {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
            tag: None,
        }
    }

    /// Grows the box by `margin` in every direction, keeping the tag.
    pub fn inflate(&self, margin: f32) -> AABB {
        let delta = Vec2::new(margin, margin);
        AABB {
            min: self.min - delta,
            max: self.max + delta,
            tag: self.tag,
        }
    }

    /// Returns true if `other` is entirely inside this box (edges included).
    pub fn encloses(&self, other: &AABB) -> bool {
        self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && other.max.x <= self.max.x
            && other.max.y <= self.max.y
    }

    pub fn contains(&self, p: impl Into<Vec2>) -> bool {
        let p = p.into();
        p.x >= self.min.x && p.y >= self.min.y && p.x <= self.max.x && p.y <= self.max.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Width and height of the box.
    pub fn extent(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn area(&self) -> f32 {
        let e = self.extent();
        e.x * e.y
    }

    pub fn min_on(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.min.x,
            Axis::Y => self.min.y,
        }
    }

    pub fn max_on(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.max.x,
            Axis::Y => self.max.y,
        }
    }
}

impl Shape for AABB {
    fn bbox(&self) -> AABB {
        *self
    }
}

impl Intersect<AABB> for AABB {
    fn intersects(&self, b: &AABB) -> bool {
        self.overlaps(b)
    }
}

impl Intersect<OBB> for AABB {
    fn intersects(&self, shape: &OBB) -> bool {
        shape.intersects(self)
    }
}

#[cfg(feature = "euclid")]
impl<U> From<euclid::Box2D<f32, U>> for AABB {
    fn from(b: euclid::Box2D<f32, U>) -> Self {
        AABB::new(Vec2::from(b.min), Vec2::from(b.max))
    }
}

#[cfg(feature = "euclid")]
impl<U> From<AABB> for euclid::Box2D<f32, U> {
    fn from(b: AABB) -> Self {
        euclid::Box2D::new(b.min.into(), b.max.into())
    }
}

#[cfg(test)]
mod tests {
    use super::{Axis, ShapeError, Vec2, AABB, OBB};
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn overlap_is_closed_and_symmetric() {
        let a = AABB::new([0.0, 0.0], [2.0, 2.0]);
        let touching = AABB::new([2.0, 0.0], [3.0, 1.0]);
        let apart = AABB::new([2.1, 0.0], [3.0, 1.0]);
        let point = AABB::new([1.0, 1.0], [1.0, 1.0]);

        assert!(a.overlaps(&touching));
        assert!(touching.overlaps(&a));
        assert!(!a.overlaps(&apart));
        assert!(!apart.overlaps(&a));
        assert!(a.overlaps(&point));
        assert!(point.overlaps(&a));
        assert!(point.overlaps(&point));
    }

    #[test]
    fn new_orders_corners() {
        let a = AABB::new([3.0, -1.0], [1.0, 4.0]);
        assert_eq!(a.min, Vec2::new(1.0, -1.0));
        assert_eq!(a.max, Vec2::new(3.0, 4.0));
        assert_eq!(a.tag, None);
    }

    #[test]
    fn try_new_validates() {
        assert!(AABB::try_new([0.0, 0.0], [0.0, 0.0]).is_ok());
        assert!(matches!(
            AABB::try_new([1.0, 0.0], [0.0, 1.0]),
            Err(ShapeError::InvertedBounds { .. })
        ));
        assert_eq!(
            AABB::try_new([f32::NAN, 0.0], [0.0, 1.0]),
            Err(ShapeError::NotFinite)
        );
    }

    #[test]
    fn union_encloses_both() {
        let a = AABB::new([0.0, 0.0], [1.0, 1.0]).with_tag(3);
        let b = AABB::new([-2.0, 0.5], [0.5, 4.0]);
        let u = a.union(&b);
        assert_eq!(u.min, Vec2::new(-2.0, 0.0));
        assert_eq!(u.max, Vec2::new(1.0, 4.0));
        assert!(u.encloses(&a) && u.encloses(&b));
        assert_eq!(u.tag, None);
    }

    #[test]
    fn inflate_keeps_tag() {
        let a = AABB::new([0.0, 0.0], [1.0, 1.0]).with_tag(7).inflate(0.5);
        assert_eq!(a.min, Vec2::new(-0.5, -0.5));
        assert_eq!(a.max, Vec2::new(1.5, 1.5));
        assert_eq!(a.tag, Some(7));
    }

    #[test]
    fn from_points() {
        assert_eq!(AABB::from_points(&[]), None);
        let b = AABB::from_points(&[
            Vec2::new(1.0, 5.0),
            Vec2::new(-1.0, 2.0),
            Vec2::new(0.0, 7.0),
        ])
        .unwrap();
        assert_eq!(b.min, Vec2::new(-1.0, 2.0));
        assert_eq!(b.max, Vec2::new(1.0, 7.0));
    }

    #[test]
    fn from_rotated_obb() {
        let obb = OBB::new([10.0, 10.0], FRAC_PI_4, 1.0, 1.0);
        let b = AABB::from_obb(&obb);
        let h = std::f32::consts::SQRT_2;
        assert!((b.min.x - (10.0 - h)).abs() < 1e-5);
        assert!((b.max.y - (10.0 + h)).abs() < 1e-5);
        for c in obb.corners() {
            assert!(b.contains(c));
        }
    }

    #[test]
    fn axis_accessors() {
        let a = AABB::new([1.0, 2.0], [3.0, 4.0]);
        assert_eq!(a.min_on(Axis::X), 1.0);
        assert_eq!(a.min_on(Axis::Y), 2.0);
        assert_eq!(a.max_on(Axis::X), 3.0);
        assert_eq!(a.max_on(Axis::Y), 4.0);
        assert_eq!(a.area(), 4.0);
        assert_eq!(a.center(), Vec2::new(2.0, 3.0));
    }

    #[cfg(feature = "euclid")]
    #[test]
    fn euclid_roundtrip() {
        let b: euclid::Box2D<f32, ()> = euclid::Box2D::new((0.0, 1.0).into(), (2.0, 3.0).into());
        let a: AABB = b.into();
        assert_eq!(a.min, Vec2::new(0.0, 1.0));
        let back: euclid::Box2D<f32, ()> = a.into();
        assert_eq!(back, b);
    }
}

pub use super::*;

/// Oriented bounding box.
///
/// Defined by its center, a rotation angle in radians and half extents along its local axes.
/// Corners and axes are recomputed on demand, so the box stays small and cheap to mutate every tick.
///
/// ```rust
/// use isect2d::OBB;
/// let a = OBB::new([0.0, 0.0], 0.0, 5.0, 5.0);
/// let b = OBB::new([9.0, 0.0], 0.0, 5.0, 5.0);
/// let c = OBB::new([11.0, 0.0], 0.0, 5.0, 5.0);
/// assert!(a.overlaps(&b));
/// assert!(!a.overlaps(&c));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OBB {
    center: Vec2,
    angle: f32,
    half_width: f32,
    half_height: f32,
}

impl OBB {
    pub fn new(center: impl Into<Vec2>, angle: f32, half_width: f32, half_height: f32) -> Self {
        debug_assert!(
            half_width >= 0.0 && half_height >= 0.0,
            "OBB half extents cannot be negative"
        );
        Self {
            center: center.into(),
            angle,
            half_width,
            half_height,
        }
    }

    /// Same as `new` but rejects negative or non finite parameters.
    pub fn try_new(
        center: impl Into<Vec2>,
        angle: f32,
        half_width: f32,
        half_height: f32,
    ) -> Result<Self, ShapeError> {
        let center = center.into();
        if !center.is_finite()
            || !angle.is_finite()
            || !half_width.is_finite()
            || !half_height.is_finite()
        {
            return Err(ShapeError::NotFinite);
        }
        if half_width < 0.0 || half_height < 0.0 {
            return Err(ShapeError::NegativeExtents {
                half_width,
                half_height,
            });
        }
        Ok(Self {
            center,
            angle,
            half_width,
            half_height,
        })
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn half_width(&self) -> f32 {
        self.half_width
    }

    pub fn half_height(&self) -> f32 {
        self.half_height
    }

    /// Sets the center. Absolute, not a translation.
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.center = Vec2::new(x, y);
    }

    /// Sets the angle. Absolute, calling it twice with the same value is a no-op.
    pub fn rotate(&mut self, angle: f32) {
        self.angle = angle;
    }

    /// Local x and y directions in world space, both unit length.
    pub fn axes(&self) -> [Vec2; 2] {
        let (sin, cos) = self.angle.sin_cos();
        let x = Vec2::new(cos, sin);
        [x, x.perp()]
    }

    /// World space corners in counter-clockwise order, starting from the local (-w, -h) corner.
    pub fn corners(&self) -> [Vec2; 4] {
        let [ax, ay] = self.axes();
        let w = ax * self.half_width;
        let h = ay * self.half_height;
        let c = self.center;
        [c - w - h, c + w - h, c + w + h, c - w + h]
    }

    /// Alias of [`corners`](Self::corners), the quad an edge walking consumer draws.
    pub fn quad(&self) -> [Vec2; 4] {
        self.corners()
    }

    /// Half of the box's shadow on `axis` (which must be unit length).
    fn projected_radius(&self, axes: &[Vec2; 2], axis: Vec2) -> f32 {
        self.half_width * axes[0].dot(axis).abs() + self.half_height * axes[1].dot(axis).abs()
    }

    /// Interval covered by the box once projected onto a unit `axis`.
    pub fn project(&self, axis: Vec2) -> (f32, f32) {
        let c = self.center.dot(axis);
        let r = self.projected_radius(&self.axes(), axis);
        (c - r, c + r)
    }

    /// Exact overlap test using the separating axis theorem.
    /// Only the two edge directions of each box need to be tried.
    /// Touching boxes overlap.
    pub fn overlaps(&self, other: &OBB) -> bool {
        let axes_a = self.axes();
        let axes_b = other.axes();
        let d = other.center - self.center;

        axes_a.iter().chain(axes_b.iter()).all(|&axis| {
            let ra = self.projected_radius(&axes_a, axis);
            let rb = other.projected_radius(&axes_b, axis);
            d.dot(axis).abs() <= ra + rb
        })
    }

    pub fn contains(&self, p: impl Into<Vec2>) -> bool {
        let d = p.into() - self.center;
        let [ax, ay] = self.axes();
        d.dot(ax).abs() <= self.half_width && d.dot(ay).abs() <= self.half_height
    }

    pub fn extent(&self) -> AABB {
        AABB::from_obb(self)
    }
}

impl Shape for OBB {
    fn bbox(&self) -> AABB {
        self.extent()
    }
}

impl Intersect<OBB> for OBB {
    fn intersects(&self, other: &OBB) -> bool {
        self.overlaps(other)
    }
}

impl Intersect<AABB> for OBB {
    fn intersects(&self, aabb: &AABB) -> bool {
        self.overlaps(&OBB::from(*aabb))
    }
}

impl From<AABB> for OBB {
    fn from(aabb: AABB) -> Self {
        let e = aabb.extent();
        OBB::new(aabb.center(), 0.0, e.x * 0.5, e.y * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::{Intersect, ShapeError, Vec2, AABB, OBB};
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn separation_along_x() {
        let a = OBB::new([0.0, 0.0], 0.0, 5.0, 5.0);
        assert!(!a.overlaps(&OBB::new([11.0, 0.0], 0.0, 5.0, 5.0)));
        assert!(a.overlaps(&OBB::new([9.0, 0.0], 0.0, 5.0, 5.0)));
        assert!(a.overlaps(&OBB::new([10.0, 0.0], 0.0, 5.0, 5.0)));
    }

    #[test]
    fn rotation_changes_outcome() {
        let a = OBB::new([0.0, 0.0], 0.0, 0.5, 0.5);
        let mut b = OBB::new([0.99, 0.99], 0.0, 0.5, 0.5);
        assert!(a.overlaps(&b));

        // Turned into a diamond, the corner no longer reaches across the diagonal.
        b.rotate(FRAC_PI_4);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));

        // Axis-aligned AABBs of both still overlap: a broad-phase false positive.
        assert!(a.extent().overlaps(&b.extent()));
    }

    #[test]
    fn rotated_overlap_is_symmetric() {
        let shapes = [
            OBB::new([0.0, 0.0], 0.3, 4.0, 1.0),
            OBB::new([3.0, 2.5], 1.2, 2.0, 0.5),
            OBB::new([-5.0, 1.0], PI / 3.0, 1.0, 3.0),
            OBB::new([4.5, 0.0], FRAC_PI_2, 0.1, 0.1),
            OBB::new([0.0, 0.0], 0.0, 0.0, 0.0),
        ];
        for a in &shapes {
            for b in &shapes {
                assert_eq!(a.overlaps(b), b.overlaps(a), "{:?} vs {:?}", a, b);
            }
        }
    }

    #[test]
    fn corners_are_counter_clockwise() {
        let obb = OBB::new([1.0, 2.0], FRAC_PI_2, 2.0, 1.0);
        let q = obb.corners();
        assert!(close(q[0], Vec2::new(2.0, 0.0)));
        assert!(close(q[1], Vec2::new(2.0, 4.0)));
        assert!(close(q[2], Vec2::new(0.0, 4.0)));
        assert!(close(q[3], Vec2::new(0.0, 0.0)));

        for i in 0..4 {
            let e1 = q[(i + 1) % 4] - q[i];
            let e2 = q[(i + 2) % 4] - q[(i + 1) % 4];
            assert!(e1.cross(e2) > 0.0);
        }
        assert_eq!(obb.quad(), q);
    }

    #[test]
    fn axes_are_unit_and_orthogonal() {
        let [x, y] = OBB::new([0.0, 0.0], 0.7, 1.0, 1.0).axes();
        assert!((x.length() - 1.0).abs() < 1e-6);
        assert!((y.length() - 1.0).abs() < 1e-6);
        assert!(x.dot(y).abs() < 1e-6);
    }

    #[test]
    fn move_and_rotate_are_idempotent() {
        let mut obb = OBB::new([0.0, 0.0], 0.0, 1.0, 2.0);
        obb.move_to(3.0, 4.0);
        obb.rotate(0.5);
        let once = obb;
        obb.move_to(3.0, 4.0);
        obb.rotate(0.5);
        assert_eq!(obb, once);
        assert_eq!(obb.center(), Vec2::new(3.0, 4.0));
        assert_eq!(obb.angle(), 0.5);
    }

    #[test]
    fn extent_of_axis_aligned_box() {
        let e = OBB::new([1.0, 1.0], 0.0, 2.0, 0.5).extent();
        assert_eq!(e.min, Vec2::new(-1.0, 0.5));
        assert_eq!(e.max, Vec2::new(3.0, 1.5));
    }

    #[test]
    fn projection_and_contains() {
        let obb = OBB::new([0.0, 0.0], FRAC_PI_4, 1.0, 1.0);
        let (lo, hi) = obb.project(Vec2::new(1.0, 0.0));
        assert!((hi - std::f32::consts::SQRT_2).abs() < 1e-5);
        assert!((lo + std::f32::consts::SQRT_2).abs() < 1e-5);

        assert!(obb.contains([0.0, 1.3]));
        assert!(!obb.contains([0.9, 0.9]));
    }

    #[test]
    fn against_aabb() {
        let obb = OBB::new([0.0, 0.0], FRAC_PI_4, 1.0, 1.0);
        let near = AABB::new([1.0, -0.1], [2.0, 0.1]);
        let corner = AABB::new([0.8, 0.8], [2.0, 2.0]);
        assert!(obb.intersects(&near));
        assert!(near.intersects(&obb));
        assert!(!obb.intersects(&corner));
    }

    #[test]
    fn try_new_rejects_bad_input() {
        assert!(OBB::try_new([0.0, 0.0], 0.0, 0.0, 0.0).is_ok());
        assert!(matches!(
            OBB::try_new([0.0, 0.0], 0.0, -1.0, 1.0),
            Err(ShapeError::NegativeExtents { .. })
        ));
        assert_eq!(
            OBB::try_new([0.0, f32::INFINITY], 0.0, 1.0, 1.0),
            Err(ShapeError::NotFinite)
        );
    }
}

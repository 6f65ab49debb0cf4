pub use crate::error::ShapeError;

mod aabb;
mod obb;
mod vec2;

pub use aabb::*;
pub use obb::*;
pub use vec2::*;

/// Axis along which a sweep or a split is performed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    #[default]
    X,
    Y,
}

/// Exact intersection test against a shape of type `T`.
pub trait Intersect<T> {
    fn intersects(&self, shape: &T) -> bool;
}

/// Anything that can be bounded by an [`AABB`], which is all the broad phase needs.
pub trait Shape {
    fn bbox(&self) -> AABB;
}

//!
//! isect2d is a crate dedicated to finding which pairs of 2D shapes overlap, every tick, in a
//! collection of moving oriented boxes.
//!
//! A query runs in two phases. The broad phase bounds every shape with an [`AABB`] and finds the
//! pairs of overlapping boxes, either by testing them all, with a bounding volume hierarchy ([`Bvh`])
//! or with a sweep and prune ([`SweepAndPrune`]). The narrow phase then re-tests those candidates
//! exactly, using the separating axis theorem on the [`OBB`]s.
//!
//! All three broad phases give the same final result.
//!

pub mod bvh;
pub mod config;
pub mod error;
pub mod intersect;
pub mod sap;
pub mod shape;

pub use bvh::{Bvh, BvhNode, NodeId, NodeKind};
pub use config::{IntersectConfig, Strategy};
pub use error::{ConfigError, ParseStrategyError, ShapeError};
pub use intersect::{
    broad_phase_brute_force, extents, intersect, intersect_brute_force, intersect_bvh,
    intersect_sap, narrow_phase, Intersector, PairSet,
};
pub use sap::SweepAndPrune;
pub use shape::{Axis, Intersect, Shape, Vec2, AABB, OBB};

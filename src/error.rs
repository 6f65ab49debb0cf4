use thiserror::Error;

/// Returned by the validating shape constructors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("invalid AABB: min ({min_x}, {min_y}) is greater than max ({max_x}, {max_y})")]
    InvertedBounds {
        min_x: f32,
        min_y: f32,
        max_x: f32,
        max_y: f32,
    },

    #[error("negative half extents: ({half_width}, {half_height})")]
    NegativeExtents { half_width: f32, half_height: f32 },

    #[error("non finite value in shape definition")]
    NotFinite,
}

/// Returned when parsing a [`Strategy`](crate::Strategy) from a string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown broad-phase strategy: {0:?} (expected one of brute-force, bvh, sap)")]
pub struct ParseStrategyError(pub String);

/// Returned by [`IntersectConfig::validate`](crate::IntersectConfig::validate).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("bvh margin must be finite and non negative, got {0}")]
    InvalidMargin(f32),
}

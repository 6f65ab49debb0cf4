use crate::error::{ConfigError, ParseStrategyError};
use crate::shape::Axis;
use std::fmt;
use std::str::FromStr;

/// Broad-phase algorithm used to find candidate pairs before the exact test.
///
/// All strategies report the same final pairs, they only differ in how many
/// candidates they have to go through to find them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Strategy {
    /// Test every pair of boxes, O(n^2). Reference implementation.
    BruteForce,
    /// Bounding volume hierarchy rebuilt on every query.
    Bvh,
    /// Sweep and prune along one axis.
    #[default]
    Sap,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::BruteForce, Strategy::Bvh, Strategy::Sap];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::BruteForce => "brute-force",
            Strategy::Bvh => "bvh",
            Strategy::Sap => "sap",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "brute-force" | "bruteforce" | "brute_force" | "brute" => Ok(Strategy::BruteForce),
            "bvh" => Ok(Strategy::Bvh),
            "sap" | "sweep-and-prune" | "sweep_and_prune" => Ok(Strategy::Sap),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

/// Settings of an [`Intersector`](crate::Intersector).
///
/// ```rust
/// use isect2d::{Axis, IntersectConfig, Strategy};
///
/// let config = IntersectConfig::default()
///     .strategy("bvh".parse().unwrap())
///     .bvh_margin(2.0);
/// assert_eq!(config.strategy, Strategy::Bvh);
/// assert_eq!(config.sweep_axis, Axis::X);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IntersectConfig {
    pub strategy: Strategy,
    /// Axis swept by the SAP strategy
    pub sweep_axis: Axis,
    /// Inflation of BVH leaf boxes, does not change results
    pub bvh_margin: f32,
}

impl Default for IntersectConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Sap,
            sweep_axis: Axis::X,
            bvh_margin: 0.0,
        }
    }
}

impl IntersectConfig {
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn sweep_axis(mut self, axis: Axis) -> Self {
        self.sweep_axis = axis;
        self
    }

    pub fn bvh_margin(mut self, margin: f32) -> Self {
        self.bvh_margin = margin;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.bvh_margin.is_finite() || self.bvh_margin < 0.0 {
            return Err(ConfigError::InvalidMargin(self.bvh_margin));
        }
        Ok(())
    }
}

//! Tunables for a contouring run.

use serde::{Deserialize, Serialize};

use crate::contour::SaddleRule;
use crate::error::{ContourError, ContourResult};
use crate::levels::{beaufort_levels, validate_levels};
use crate::vectors::DEFAULT_VECTOR_PRECISION;

/// Largest accepted number of fractional digits in output coordinates.
pub const MAX_PRECISION: u32 = 12;

/// What to do when two samples land on the same grid cell with different
/// magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Fail the slice.
    #[default]
    Reject,
    /// Keep the magnitude of the sample that appears last in the slice.
    LastWriteWins,
    /// Use the mean magnitude of all colliding samples.
    Average,
}

/// What to do when a single time slice cannot be contoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliceErrorPolicy {
    /// Log a warning and leave the slice out of the output.
    #[default]
    Skip,
    /// Fail the whole run.
    Abort,
}

/// Settings for one contouring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourSettings {
    /// Threshold levels, strictly ascending
    pub levels: Vec<f64>,
    /// Fractional digits kept in output coordinates
    pub precision: u32,
    /// Fractional digits in vector field strings
    pub vector_precision: u32,
    pub collision_policy: CollisionPolicy,
    pub on_slice_error: SliceErrorPolicy,
    pub saddle_rule: SaddleRule,
    /// Contour slices and levels on the rayon pool
    pub parallel: bool,
}

impl Default for ContourSettings {
    fn default() -> Self {
        Self {
            levels: beaufort_levels(),
            precision: 5,
            vector_precision: DEFAULT_VECTOR_PRECISION,
            collision_policy: CollisionPolicy::default(),
            on_slice_error: SliceErrorPolicy::default(),
            saddle_rule: SaddleRule::default(),
            parallel: true,
        }
    }
}

impl ContourSettings {
    pub fn validate(&self) -> ContourResult<()> {
        validate_levels(&self.levels)?;
        for (name, value) in [
            ("precision", self.precision),
            ("vector_precision", self.vector_precision),
        ] {
            if value > MAX_PRECISION {
                return Err(ContourError::InvalidConfig(format!(
                    "{} {} exceeds maximum of {}",
                    name, value, MAX_PRECISION
                )));
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for CollisionPolicy {
    type Err = ContourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "reject" => Ok(CollisionPolicy::Reject),
            "last_write_wins" | "last" => Ok(CollisionPolicy::LastWriteWins),
            "average" | "mean" => Ok(CollisionPolicy::Average),
            other => Err(ContourError::InvalidConfig(format!(
                "unknown collision policy '{}'",
                other
            ))),
        }
    }
}

impl std::str::FromStr for SliceErrorPolicy {
    type Err = ContourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skip" => Ok(SliceErrorPolicy::Skip),
            "abort" => Ok(SliceErrorPolicy::Abort),
            other => Err(ContourError::InvalidConfig(format!(
                "unknown slice error policy '{}'",
                other
            ))),
        }
    }
}

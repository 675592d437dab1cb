//! Error types for the contour engine.

use thiserror::Error;

/// Result type alias using ContourError.
pub type ContourResult<T> = Result<T, ContourError>;

/// Primary error type for contour extraction.
///
/// An empty isoline is never an error: a level that crosses no cell yields
/// zero polylines and the slice still succeeds.
#[derive(Debug, Error)]
pub enum ContourError {
    // === Malformed input ===
    #[error("Non-finite {field} in sample #{index} at ({x}, {y})")]
    NonFiniteSample {
        index: usize,
        field: &'static str,
        x: f64,
        y: f64,
    },

    #[error("Axis '{axis}' has {distinct} distinct value(s), at least 2 are required")]
    DegenerateAxis { axis: &'static str, distinct: usize },

    #[error("Grid is incomplete: {missing} of {total} cells have no sample (first gap at ({x}, {y}))")]
    IncompleteGrid {
        missing: usize,
        total: usize,
        x: f64,
        y: f64,
    },

    // === Data quality ===
    #[error("Coordinate collision at ({x}, {y}): magnitude {existing} vs {incoming}")]
    CoordinateCollision {
        x: f64,
        y: f64,
        existing: f64,
        incoming: f64,
    },

    // === Configuration ===
    #[error("Invalid threshold levels: {0}")]
    InvalidLevels(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ContourError {
    /// True for errors where a sample cannot be placed on a resolvable grid.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            ContourError::NonFiniteSample { .. }
                | ContourError::DegenerateAxis { .. }
                | ContourError::IncompleteGrid { .. }
        )
    }
}

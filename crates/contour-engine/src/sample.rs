//! Input records handed over by the upstream decoder.

use serde::{Deserialize, Serialize};

/// One wind-vector sample at a grid coordinate.
///
/// `x`/`y` are treated as flat Cartesian coordinates (typically longitude
/// and latitude in decimal degrees); `u`/`v` are the eastward and northward
/// components in m/s.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    pub u: f64,
    pub v: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64, u: f64, v: f64) -> Self {
        Self { x, y, u, v }
    }

    /// Wind speed, `sqrt(u² + v²)`.
    pub fn magnitude(&self) -> f64 {
        self.u.hypot(self.v)
    }
}

/// All samples valid at one timestamp. No ordering is assumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlice {
    pub timestamp: String,
    #[serde(rename = "data")]
    pub samples: Vec<Sample>,
}

impl TimeSlice {
    pub fn new(timestamp: impl Into<String>, samples: Vec<Sample>) -> Self {
        Self {
            timestamp: timestamp.into(),
            samples,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

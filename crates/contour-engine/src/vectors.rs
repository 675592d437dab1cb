//! Raw vector field output: the samples of each slice reshaped for map
//! clients, numbers formatted as fixed-precision decimal strings.

use serde::{Deserialize, Serialize};

use crate::sample::TimeSlice;

/// Default fractional digits for vector field values.
pub const DEFAULT_VECTOR_PRECISION: u32 = 4;

/// One wind vector as emitted to clients. `lat` is the sample's y, `lng` its x.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorSample {
    pub lat: String,
    pub lng: String,
    pub u: String,
    pub v: String,
}

/// All vectors of one time slice, in the order they were received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    pub timestamp: String,
    pub data: Vec<VectorSample>,
}

pub fn encode_vector_field(slices: &[TimeSlice], precision: u32) -> Vec<VectorRecord> {
    let digits = precision as usize;
    let fmt = |value: f64| format!("{:.*}", digits, value);

    slices
        .iter()
        .map(|slice| VectorRecord {
            timestamp: slice.timestamp.clone(),
            data: slice
                .samples
                .iter()
                .map(|s| VectorSample {
                    lat: fmt(s.y),
                    lng: fmt(s.x),
                    u: fmt(s.u),
                    v: fmt(s.v),
                })
                .collect(),
        })
        .collect()
}

//! Common test fixtures for wind-contours tests.

use contour_engine::{Sample, TimeSlice};

/// Common timestamps for testing.
pub mod timestamps {
    pub const FIRST: &str = "2024-10-04T05:00:00Z";
    pub const SECOND: &str = "2024-10-04T06:00:00Z";
    pub const THIRD: &str = "2024-10-04T07:00:00Z";
}

/// 2x2 slice on x, y in {0, 1}: magnitude 1.0 on the x = 0 column and 3.0
/// on the x = 1 column.
pub fn two_column_ramp(timestamp: &str) -> TimeSlice {
    TimeSlice::new(
        timestamp,
        vec![
            Sample::new(0.0, 0.0, 1.0, 0.0),
            Sample::new(1.0, 0.0, 3.0, 0.0),
            Sample::new(0.0, 1.0, 0.0, 1.0),
            Sample::new(1.0, 1.0, 0.0, 3.0),
        ],
    )
}

/// 3x3 slice with a single strong point in the middle of a calm field.
pub fn single_peak(timestamp: &str, peak: f64) -> TimeSlice {
    let mut samples = Vec::with_capacity(9);
    for y in 0..3 {
        for x in 0..3 {
            let u = if x == 1 && y == 1 { peak } else { 0.0 };
            samples.push(Sample::new(x as f64, y as f64, u, 0.0));
        }
    }
    TimeSlice::new(timestamp, samples)
}

/// Slice missing the sample at (1, 1), so the axis cross product has a gap.
pub fn slice_with_gap(timestamp: &str) -> TimeSlice {
    let mut slice = two_column_ramp(timestamp);
    slice.samples.retain(|s| !(s.x == 1.0 && s.y == 1.0));
    slice
}

/// Slice with all samples on one latitude.
pub fn single_row(timestamp: &str) -> TimeSlice {
    TimeSlice::new(
        timestamp,
        (0..4)
            .map(|i| Sample::new(i as f64, 52.0, i as f64, 0.0))
            .collect(),
    )
}

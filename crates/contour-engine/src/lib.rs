//! Wind-speed isoline extraction for gridded or scattered model output.
//!
//! Pipeline per time slice:
//! - Resolve scattered samples onto a regular grid ([`grid`])
//! - Trace isolines at each threshold level with marching squares ([`contour`])
//! - Round coordinates for output ([`encode`])
//! - Assemble one record per slice ([`series`])

pub mod config;
pub mod contour;
pub mod encode;
pub mod error;
pub mod grid;
pub mod levels;
pub mod sample;
pub mod series;
pub mod vectors;

pub use config::{CollisionPolicy, ContourSettings, SliceErrorPolicy};
pub use contour::{extract_isolines, Isoline, Point, Polyline, SaddleRule};
pub use encode::{encode_isolines, round_coordinate, EncodedContours};
pub use error::{ContourError, ContourResult};
pub use grid::{resolve_grid, Axis, MagnitudeGrid};
pub use levels::BEAUFORT_LEVELS;
pub use sample::{Sample, TimeSlice};
pub use series::{ContourRecord, ContourSeriesBuilder};
pub use vectors::{encode_vector_field, VectorRecord, VectorSample};

//! Per-timestamp contour records for a whole series of time slices.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{ContourSettings, SliceErrorPolicy};
use crate::contour::extract_isolines;
use crate::encode::{encode_isolines, EncodedContours};
use crate::error::ContourResult;
use crate::grid::resolve_grid;
use crate::sample::TimeSlice;

/// Contours for one time slice. `contours[n]` belongs to `levels[n]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContourRecord {
    pub timestamp: String,
    pub levels: Vec<f64>,
    pub contours: EncodedContours,
}

impl ContourRecord {
    /// Total number of polylines over all levels.
    pub fn polyline_count(&self) -> usize {
        self.contours.iter().map(Vec::len).sum()
    }
}

/// Builds contour records from time slices with a fixed set of settings.
#[derive(Debug, Clone)]
pub struct ContourSeriesBuilder {
    settings: ContourSettings,
}

impl ContourSeriesBuilder {
    /// Create a builder, validating the settings first.
    pub fn new(settings: ContourSettings) -> ContourResult<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &ContourSettings {
        &self.settings
    }

    /// Grid, trace and encode a single slice.
    pub fn build_record(&self, slice: &TimeSlice) -> ContourResult<ContourRecord> {
        let grid = resolve_grid(&slice.samples, self.settings.collision_policy)?;

        let isolines = extract_isolines(
            &grid,
            &self.settings.levels,
            self.settings.saddle_rule,
            self.settings.parallel,
        );

        let (min, max) = grid.range();
        debug!(
            timestamp = %slice.timestamp,
            nx = grid.nx(),
            ny = grid.ny(),
            min_magnitude = min,
            max_magnitude = max,
            polylines = isolines.iter().map(|i| i.polylines.len()).sum::<usize>(),
            "Contoured time slice"
        );

        Ok(ContourRecord {
            timestamp: slice.timestamp.clone(),
            levels: self.settings.levels.clone(),
            contours: encode_isolines(&isolines, self.settings.precision),
        })
    }

    /// Build one record per slice, in input order.
    ///
    /// A failing slice is skipped with a warning or aborts the run,
    /// according to [`SliceErrorPolicy`].
    pub fn build(&self, slices: &[TimeSlice]) -> ContourResult<Vec<ContourRecord>> {
        let results: Vec<ContourResult<ContourRecord>> = if self.settings.parallel {
            slices.par_iter().map(|s| self.build_record(s)).collect()
        } else {
            slices.iter().map(|s| self.build_record(s)).collect()
        };

        let mut records = Vec::with_capacity(slices.len());
        let mut skipped = 0usize;

        for (slice, result) in slices.iter().zip(results) {
            match result {
                Ok(record) => records.push(record),
                Err(e) => match self.settings.on_slice_error {
                    SliceErrorPolicy::Abort => return Err(e),
                    SliceErrorPolicy::Skip => {
                        warn!(
                            timestamp = %slice.timestamp,
                            error = %e,
                            "Skipping time slice"
                        );
                        skipped += 1;
                    }
                },
            }
        }

        info!(
            slices = slices.len(),
            records = records.len(),
            skipped = skipped,
            "Built contour series"
        );

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::Sample;

    fn two_by_two(timestamp: &str) -> TimeSlice {
        TimeSlice::new(
            timestamp,
            vec![
                Sample::new(0.0, 0.0, 1.0, 0.0),
                Sample::new(1.0, 0.0, 3.0, 0.0),
                Sample::new(0.0, 1.0, 1.0, 0.0),
                Sample::new(1.0, 1.0, 3.0, 0.0),
            ],
        )
    }

    #[test]
    fn test_record_levels_match_contours() {
        let builder = ContourSeriesBuilder::new(ContourSettings::default()).unwrap();
        let record = builder.build_record(&two_by_two("t0")).unwrap();
        assert_eq!(record.levels.len(), record.contours.len());
        // Only 1.5 falls between the two magnitudes
        assert_eq!(record.contours[1].len(), 1);
        assert_eq!(record.polyline_count(), 1);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = ContourSettings {
            levels: vec![],
            ..Default::default()
        };
        assert!(ContourSeriesBuilder::new(settings).is_err());
    }
}

//! Resolve scattered samples onto a regular rectangular magnitude grid.
//!
//! Axes are built from the distinct coordinates seen in a slice, so the grid
//! may be irregularly spaced. Axis lookup is exact: coordinates that differ
//! by rounding noise produce separate axis entries and usually an
//! incomplete grid.

use std::cmp::Ordering;

use tracing::{debug, warn};

use crate::config::CollisionPolicy;
use crate::error::{ContourError, ContourResult};
use crate::sample::Sample;

/// Strictly increasing coordinate values along one dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    values: Vec<f64>,
}

impl Axis {
    /// Build an axis from the distinct finite values in `coords`.
    pub fn from_coords(coords: impl IntoIterator<Item = f64>) -> Self {
        let mut values: Vec<f64> = coords.into_iter().collect();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        values.dedup();
        Self { values }
    }

    /// Index of `coord` in the axis, exact match only.
    pub fn position(&self, coord: f64) -> Option<usize> {
        self.values
            .binary_search_by(|probe| probe.partial_cmp(&coord).unwrap_or(Ordering::Less))
            .ok()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Dense magnitude values indexed by (x-axis index, y-axis index).
///
/// Read-only once resolved.
#[derive(Debug, Clone)]
pub struct MagnitudeGrid {
    x_axis: Axis,
    y_axis: Axis,
    /// x-major: value(i, j) lives at `i * ny + j`
    values: Vec<f64>,
}

impl MagnitudeGrid {
    /// Build a grid from axes and x-major values.
    pub fn new(x_axis: Axis, y_axis: Axis, values: Vec<f64>) -> ContourResult<Self> {
        check_axis("x", &x_axis)?;
        check_axis("y", &y_axis)?;

        let expected = x_axis.len() * y_axis.len();
        if values.len() != expected {
            return Err(ContourError::InvalidConfig(format!(
                "grid has {} values, axes require {}",
                values.len(),
                expected
            )));
        }

        Ok(Self {
            x_axis,
            y_axis,
            values,
        })
    }

    pub fn x_axis(&self) -> &Axis {
        &self.x_axis
    }

    pub fn y_axis(&self) -> &Axis {
        &self.y_axis
    }

    pub fn nx(&self) -> usize {
        self.x_axis.len()
    }

    pub fn ny(&self) -> usize {
        self.y_axis.len()
    }

    /// Magnitude at grid position (i, j). Panics when out of range.
    pub fn value(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.ny() + j]
    }

    /// Coordinates of grid position (i, j).
    pub fn coord(&self, i: usize, j: usize) -> (f64, f64) {
        (self.x_axis.values[i], self.y_axis.values[j])
    }

    /// (min, max) magnitude over the whole grid.
    pub fn range(&self) -> (f64, f64) {
        self.values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}

fn check_axis(name: &'static str, axis: &Axis) -> ContourResult<()> {
    if axis.len() < 2 {
        return Err(ContourError::DegenerateAxis {
            axis: name,
            distinct: axis.len(),
        });
    }
    Ok(())
}

/// Resolve one slice's samples onto a magnitude grid.
///
/// Fails when a sample is not finite, when either axis has fewer than two
/// distinct values, when a cell of the axis cross product has no sample, or
/// (under [`CollisionPolicy::Reject`]) when two samples share a cell with
/// different magnitudes.
pub fn resolve_grid(samples: &[Sample], policy: CollisionPolicy) -> ContourResult<MagnitudeGrid> {
    for (index, s) in samples.iter().enumerate() {
        let fields = [("x", s.x), ("y", s.y), ("u", s.u), ("v", s.v)];
        if let Some((field, _)) = fields.into_iter().find(|(_, value)| !value.is_finite()) {
            return Err(ContourError::NonFiniteSample {
                index,
                field,
                x: s.x,
                y: s.y,
            });
        }
    }

    let x_axis = Axis::from_coords(samples.iter().map(|s| s.x));
    let y_axis = Axis::from_coords(samples.iter().map(|s| s.y));
    check_axis("x", &x_axis)?;
    check_axis("y", &y_axis)?;

    let nx = x_axis.len();
    let ny = y_axis.len();
    let mut cells = CellAccumulator::new(nx * ny, policy);

    for s in samples {
        // Both lookups succeed: the axes were built from these coordinates
        let (Some(i), Some(j)) = (x_axis.position(s.x), y_axis.position(s.y)) else {
            continue;
        };
        cells.insert(i * ny + j, s)?;
    }

    if let Some(first_gap) = cells.counts.iter().position(|&c| c == 0) {
        let missing = cells.counts.iter().filter(|&&c| c == 0).count();
        return Err(ContourError::IncompleteGrid {
            missing,
            total: nx * ny,
            x: x_axis.values[first_gap / ny],
            y: y_axis.values[first_gap % ny],
        });
    }

    if cells.collisions > 0 {
        warn!(
            collisions = cells.collisions,
            policy = ?policy,
            "Resolved coordinate collisions"
        );
    }

    let values = cells.into_values();

    debug!(nx = nx, ny = ny, samples = samples.len(), "Resolved grid");

    Ok(MagnitudeGrid {
        x_axis,
        y_axis,
        values,
    })
}

/// Per-cell magnitude sums, applying a collision policy as samples arrive.
struct CellAccumulator {
    policy: CollisionPolicy,
    sums: Vec<f64>,
    counts: Vec<u32>,
    /// Samples that disagreed with the value already in their cell
    collisions: usize,
}

impl CellAccumulator {
    fn new(cells: usize, policy: CollisionPolicy) -> Self {
        Self {
            policy,
            sums: vec![0.0; cells],
            counts: vec![0; cells],
            collisions: 0,
        }
    }

    fn current(&self, idx: usize) -> f64 {
        self.sums[idx] / self.counts[idx] as f64
    }

    fn insert(&mut self, idx: usize, sample: &Sample) -> ContourResult<()> {
        let magnitude = sample.magnitude();

        if self.counts[idx] == 0 {
            self.sums[idx] = magnitude;
            self.counts[idx] = 1;
            return Ok(());
        }

        // Same magnitude leaves the cell unchanged under every policy
        let existing = self.current(idx);
        if existing == magnitude {
            return Ok(());
        }

        self.collisions += 1;
        match self.policy {
            CollisionPolicy::Reject => Err(ContourError::CoordinateCollision {
                x: sample.x,
                y: sample.y,
                existing,
                incoming: magnitude,
            }),
            CollisionPolicy::LastWriteWins => {
                self.sums[idx] = magnitude;
                self.counts[idx] = 1;
                Ok(())
            }
            CollisionPolicy::Average => {
                self.sums[idx] += magnitude;
                self.counts[idx] += 1;
                Ok(())
            }
        }
    }

    fn into_values(self) -> Vec<f64> {
        self.sums
            .iter()
            .zip(&self.counts)
            .map(|(&sum, &count)| sum / count as f64)
            .collect()
    }
}

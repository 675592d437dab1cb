//! Isoline extraction using the marching squares algorithm.
//!
//! Each grid cell is classified by which of its four corners are at or above
//! the level (`value >= level`). Crossing points are linearly interpolated on
//! the cell edges whose endpoints disagree, and the per-cell segments are
//! stitched into polylines through the grid edges they share, so no
//! floating-point tolerance is involved in joining them.
//!
//! Corner naming uses a y-up frame: for cell (i, j), bottom-left is grid
//! point (i, j) and top-right is (i + 1, j + 1).

use std::collections::HashMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::grid::MagnitudeGrid;

/// A point in grid coordinate space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A grid edge between two adjacent grid points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeId {
    /// Between (i, j) and (i + 1, j)
    Horizontal { i: usize, j: usize },
    /// Between (i, j) and (i, j + 1)
    Vertical { i: usize, j: usize },
}

/// A line segment inside one cell, between crossings on two of its edges
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: EdgeId,
    pub end: EdgeId,
}

/// Edges visited by a stitched polyline, in order
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeChain {
    pub edges: Vec<EdgeId>,
    pub closed: bool,
}

/// A complete contour line. Closed polylines repeat the first point at the end.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub closed: bool,
}

/// All polylines for one threshold level
#[derive(Debug, Clone, PartialEq)]
pub struct Isoline {
    pub level: f64,
    pub polylines: Vec<Polyline>,
}

impl Isoline {
    pub fn is_empty(&self) -> bool {
        self.polylines.is_empty()
    }
}

/// How to connect the segments of a saddle cell, where diagonally opposite
/// corners agree and adjacent corners disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaddleRule {
    /// Mean of the four corners (the bilinear cell-centre value). A centre at
    /// or above the level joins the above-level corners.
    #[default]
    CenterAverage,
    /// Always keep the above-level corners apart.
    SeparateAbove,
}

/// Marching squares over every cell of the grid for one level.
///
/// Segments are emitted in cell order (x index outer, y index inner).
pub fn march_squares(grid: &MagnitudeGrid, level: f64, saddle_rule: SaddleRule) -> Vec<Segment> {
    let mut segments = Vec::new();

    for i in 0..grid.nx() - 1 {
        for j in 0..grid.ny() - 1 {
            let bl = grid.value(i, j);
            let br = grid.value(i + 1, j);
            let tl = grid.value(i, j + 1);
            let tr = grid.value(i + 1, j + 1);

            // Calculate cell index (0-15) based on which corners are above the threshold
            let mut cell_index = 0u8;
            if tl >= level {
                cell_index |= 1;
            }
            if tr >= level {
                cell_index |= 2;
            }
            if br >= level {
                cell_index |= 4;
            }
            if bl >= level {
                cell_index |= 8;
            }

            if cell_index == 0 || cell_index == 15 {
                continue;
            }

            let center_above = match saddle_rule {
                SaddleRule::CenterAverage => (tl + tr + br + bl) / 4.0 >= level,
                SaddleRule::SeparateAbove => false,
            };

            push_cell_segments(&mut segments, cell_index, i, j, center_above);
        }
    }

    segments
}

/// Append the segments for one cell according to the 16-case lookup table.
fn push_cell_segments(
    segments: &mut Vec<Segment>,
    cell_index: u8,
    i: usize,
    j: usize,
    center_above: bool,
) {
    let top = EdgeId::Horizontal { i, j: j + 1 };
    let bottom = EdgeId::Horizontal { i, j };
    let left = EdgeId::Vertical { i, j };
    let right = EdgeId::Vertical { i: i + 1, j };

    let mut push = |start, end| segments.push(Segment { start, end });

    match cell_index {
        1 | 14 => push(left, top),
        2 | 13 => push(top, right),
        3 | 12 => push(left, right),
        4 | 11 => push(right, bottom),
        6 | 9 => push(top, bottom),
        7 | 8 => push(left, bottom),
        // Saddle: top-left and bottom-right above
        5 => {
            if center_above {
                push(top, right);
                push(left, bottom);
            } else {
                push(left, top);
                push(right, bottom);
            }
        }
        // Saddle: top-right and bottom-left above
        10 => {
            if center_above {
                push(left, top);
                push(right, bottom);
            } else {
                push(top, right);
                push(left, bottom);
            }
        }
        _ => {}
    }
}

/// Linearly interpolate the level crossing between two edge endpoints.
///
/// A level equal to an endpoint value returns that endpoint exactly, so a
/// grid node on the level maps to one point from every edge that touches
/// it. Equal endpoint values put the crossing on `p0`.
fn interpolate_edge(p0: (f64, f64), p1: (f64, f64), v0: f64, v1: f64, level: f64) -> Point {
    if level == v0 || v1 == v0 {
        return Point::new(p0.0, p0.1);
    }
    if level == v1 {
        return Point::new(p1.0, p1.1);
    }

    let t = (level - v0) / (v1 - v0);
    Point::new(p0.0 + t * (p1.0 - p0.0), p0.1 + t * (p1.1 - p0.1))
}

/// Crossing point on a grid edge, always interpolated from the lower index
/// endpoint so both neighbouring cells see the same point.
pub fn edge_point(grid: &MagnitudeGrid, edge: EdgeId, level: f64) -> Point {
    let ((i0, j0), (i1, j1)) = match edge {
        EdgeId::Horizontal { i, j } => ((i, j), (i + 1, j)),
        EdgeId::Vertical { i, j } => ((i, j), (i, j + 1)),
    };

    interpolate_edge(
        grid.coord(i0, j0),
        grid.coord(i1, j1),
        grid.value(i0, j0),
        grid.value(i1, j1),
        level,
    )
}

/// Connect cell segments into continuous chains of edges.
///
/// Every crossed edge is shared by at most two segments. Chains that end on
/// the grid boundary are traced first, starting at the boundary edge of the
/// first segment (in input order) that touches one; the remaining segments
/// form closed loops. The result depends only on segment order.
pub fn connect_segments(segments: &[Segment]) -> Vec<EdgeChain> {
    if segments.is_empty() {
        return vec![];
    }

    let mut incidence: HashMap<EdgeId, Vec<usize>> = HashMap::with_capacity(segments.len() * 2);
    for (idx, seg) in segments.iter().enumerate() {
        incidence.entry(seg.start).or_default().push(idx);
        incidence.entry(seg.end).or_default().push(idx);
    }

    let is_boundary = |edge: &EdgeId| incidence.get(edge).map_or(false, |ids| ids.len() == 1);

    let mut used = vec![false; segments.len()];
    let mut chains = Vec::new();

    for idx in 0..segments.len() {
        if used[idx] {
            continue;
        }
        let seg = segments[idx];
        let start = if is_boundary(&seg.start) {
            seg.start
        } else if is_boundary(&seg.end) {
            seg.end
        } else {
            continue;
        };
        chains.push(trace_chain(segments, &incidence, &mut used, idx, start));
    }

    for idx in 0..segments.len() {
        if !used[idx] {
            chains.push(trace_chain(segments, &incidence, &mut used, idx, segments[idx].start));
        }
    }

    chains
}

fn trace_chain(
    segments: &[Segment],
    incidence: &HashMap<EdgeId, Vec<usize>>,
    used: &mut [bool],
    first: usize,
    start: EdgeId,
) -> EdgeChain {
    let mut edges = vec![start];
    let mut current = first;
    let mut at = start;

    loop {
        used[current] = true;
        let seg = segments[current];
        let next = if seg.start == at { seg.end } else { seg.start };
        edges.push(next);

        let following = incidence
            .get(&next)
            .and_then(|ids| ids.iter().copied().find(|&id| !used[id]));

        match following {
            Some(id) => {
                current = id;
                at = next;
            }
            None => break,
        }
    }

    let closed = edges.len() > 2 && edges.first() == edges.last();
    EdgeChain { edges, closed }
}

/// Extract the isoline for a single level.
///
/// Consecutive coincident points (a contour running through a grid point
/// exactly at the level) are merged, and polylines that collapse to a
/// single point are dropped.
pub fn extract_isoline(grid: &MagnitudeGrid, level: f64, saddle_rule: SaddleRule) -> Isoline {
    let segments = march_squares(grid, level, saddle_rule);
    let chains = connect_segments(&segments);

    let polylines: Vec<Polyline> = chains
        .into_iter()
        .filter_map(|chain| {
            let mut points: Vec<Point> = chain
                .edges
                .iter()
                .map(|&edge| edge_point(grid, edge, level))
                .collect();
            points.dedup();

            if points.len() < 2 {
                return None;
            }
            Some(Polyline {
                points,
                closed: chain.closed,
            })
        })
        .collect();

    debug!(
        level = level,
        segments = segments.len(),
        polylines = polylines.len(),
        "Extracted isoline"
    );

    Isoline { level, polylines }
}

/// Extract isolines for every level, in level order.
///
/// With `parallel` set, levels are traced on the rayon pool; the output is
/// identical to the sequential path.
pub fn extract_isolines(
    grid: &MagnitudeGrid,
    levels: &[f64],
    saddle_rule: SaddleRule,
    parallel: bool,
) -> Vec<Isoline> {
    if parallel {
        levels
            .par_iter()
            .map(|&level| extract_isoline(grid, level, saddle_rule))
            .collect()
    } else {
        levels
            .iter()
            .map(|&level| extract_isoline(grid, level, saddle_rule))
            .collect()
    }
}

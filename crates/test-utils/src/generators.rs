//! Synthetic wind sample generators.
//!
//! These generators create predictable, verifiable time slices on a regular
//! lon/lat lattice that can be used across the test suite.

use contour_engine::{Sample, TimeSlice};

/// Regular lattice description: `nx` by `ny` points starting at
/// (`lon0`, `lat0`) with `step` degrees between neighbours.
#[derive(Debug, Clone, Copy)]
pub struct Lattice {
    pub nx: usize,
    pub ny: usize,
    pub lon0: f64,
    pub lat0: f64,
    pub step: f64,
}

impl Lattice {
    pub fn new(nx: usize, ny: usize) -> Self {
        Self {
            nx,
            ny,
            lon0: 4.0,
            lat0: 52.0,
            step: 0.25,
        }
    }

    pub fn lon(&self, i: usize) -> f64 {
        self.lon0 + i as f64 * self.step
    }

    pub fn lat(&self, j: usize) -> f64 {
        self.lat0 + j as f64 * self.step
    }

    /// Build samples row by row (latitude outer), the order GRIB decoders
    /// hand them over in.
    pub fn samples(&self, mut wind: impl FnMut(usize, usize) -> (f64, f64)) -> Vec<Sample> {
        let mut samples = Vec::with_capacity(self.nx * self.ny);
        for j in 0..self.ny {
            for i in 0..self.nx {
                let (u, v) = wind(i, j);
                samples.push(Sample::new(self.lon(i), self.lat(j), u, v));
            }
        }
        samples
    }
}

/// Creates a slice with a cyclonic vortex: calm at the centre, speed
/// growing linearly with distance up to `max_speed` at the corners.
pub fn create_vortex_slice(timestamp: &str, lattice: Lattice, max_speed: f64) -> TimeSlice {
    let cx = (lattice.nx - 1) as f64 / 2.0;
    let cy = (lattice.ny - 1) as f64 / 2.0;
    let max_dist = (cx * cx + cy * cy).sqrt().max(1.0);
    let k = max_speed / max_dist;

    let samples = lattice.samples(|i, j| {
        let dx = i as f64 - cx;
        let dy = j as f64 - cy;
        // Counter-clockwise rotation, |(u, v)| = k * dist
        (-dy * k, dx * k)
    });
    TimeSlice::new(timestamp, samples)
}

/// Creates a slice where u varies by latitude and v by longitude,
/// simulating a trade winds pattern.
pub fn create_trade_wind_slice(timestamp: &str, lattice: Lattice) -> TimeSlice {
    let samples = lattice.samples(|i, j| {
        let lat_factor = (j as f64 / lattice.ny as f64 - 0.5) * 2.0;
        let lon_factor = (i as f64 / lattice.nx as f64 - 0.5) * 2.0;
        (lat_factor * 20.0, lon_factor * 15.0)
    });
    TimeSlice::new(timestamp, samples)
}

/// Creates a slice with the same eastward wind everywhere.
pub fn create_uniform_slice(timestamp: &str, lattice: Lattice, speed: f64) -> TimeSlice {
    TimeSlice::new(timestamp, lattice.samples(|_, _| (speed, 0.0)))
}

/// Hourly ISO-8601 timestamps starting at 2024-10-04T00:00:00Z.
pub fn hourly_timestamps(count: usize) -> Vec<String> {
    (0..count)
        .map(|h| format!("2024-10-{:02}T{:02}:00:00Z", 4 + h / 24, h % 24))
        .collect()
}

/// Creates `count` vortex slices whose strength grows each hour.
pub fn create_vortex_series(count: usize, lattice: Lattice) -> Vec<TimeSlice> {
    hourly_timestamps(count)
        .iter()
        .enumerate()
        .map(|(n, ts)| create_vortex_slice(ts, lattice, 10.0 + 2.0 * n as f64))
        .collect()
}

/// Deterministically reorder samples (Fisher-Yates driven by a hash).
pub fn shuffle_samples(samples: &mut [Sample], seed: u32) {
    for idx in (1..samples.len()).rev() {
        let swap = simple_hash(idx as u32, samples.len() as u32, seed) as usize % (idx + 1);
        samples.swap(idx, swap);
    }
}

/// Simple deterministic hash for reproducible test data.
fn simple_hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_mul(31).wrapping_add(x);
    h = h.wrapping_mul(31).wrapping_add(y);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lattice_sample_count() {
        let slice = create_uniform_slice("t", Lattice::new(4, 3), 5.0);
        assert_eq!(slice.len(), 12);
        assert_eq!(slice.samples[0].x, 4.0);
        assert_eq!(slice.samples[4].y, 52.25);
    }

    #[test]
    fn test_vortex_is_calm_at_centre() {
        let slice = create_vortex_slice("t", Lattice::new(5, 5), 20.0);
        let centre = slice.samples[2 * 5 + 2];
        assert_eq!(centre.magnitude(), 0.0);
        let corner = slice.samples[0];
        assert!((corner.magnitude() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_shuffle_is_deterministic_permutation() {
        let original = create_trade_wind_slice("t", Lattice::new(6, 6)).samples;
        let mut a = original.clone();
        let mut b = original.clone();
        shuffle_samples(&mut a, 7);
        shuffle_samples(&mut b, 7);
        assert_eq!(a, b);
        assert_ne!(a, original);
        assert_eq!(a.len(), original.len());
        for s in &original {
            assert!(a.contains(s));
        }
    }

    #[test]
    fn test_hourly_timestamps() {
        let ts = hourly_timestamps(26);
        assert_eq!(ts[0], "2024-10-04T00:00:00Z");
        assert_eq!(ts[25], "2024-10-05T01:00:00Z");
    }
}

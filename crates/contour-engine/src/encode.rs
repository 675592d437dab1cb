//! Output geometry encoding: fixed-precision coordinates nested as
//! `levels -> polylines -> points -> [x, y]`.

use crate::contour::Isoline;

/// Encoded contours, indexed `[level][polyline][point]`.
pub type EncodedContours = Vec<Vec<Vec<[f64; 2]>>>;

/// Round to `precision` fractional digits, half away from zero.
pub fn round_coordinate(value: f64, precision: u32) -> f64 {
    let scale = 10f64.powi(precision as i32);
    let rounded = (value * scale).round() / scale;
    if rounded.is_finite() {
        rounded
    } else {
        value
    }
}

/// Round every coordinate of the isolines, preserving level, polyline and
/// point order.
pub fn encode_isolines(isolines: &[Isoline], precision: u32) -> EncodedContours {
    isolines
        .iter()
        .map(|isoline| {
            isoline
                .polylines
                .iter()
                .map(|polyline| {
                    polyline
                        .points
                        .iter()
                        .map(|p| {
                            [
                                round_coordinate(p.x, precision),
                                round_coordinate(p.y, precision),
                            ]
                        })
                        .collect()
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contour::{Point, Polyline};

    #[test]
    fn test_round_coordinate() {
        assert_eq!(round_coordinate(4.123456789, 5), 4.12346);
        assert_eq!(round_coordinate(-52.000004, 5), -52.0);
        assert_eq!(round_coordinate(1.5, 0), 2.0);
    }

    #[test]
    fn test_round_is_idempotent() {
        for &v in &[0.1234567, 52.3088171, -4.7779081, 1.0 / 3.0, 179.999995] {
            let once = round_coordinate(v, 5);
            assert_eq!(round_coordinate(once, 5), once);
        }
    }

    #[test]
    fn test_encode_shape() {
        let isolines = vec![
            Isoline {
                level: 1.0,
                polylines: vec![Polyline {
                    points: vec![Point::new(0.123456, 1.0), Point::new(0.5, 0.0000049)],
                    closed: false,
                }],
            },
            Isoline {
                level: 2.0,
                polylines: vec![],
            },
        ];

        let encoded = encode_isolines(&isolines, 5);
        assert_eq!(encoded.len(), 2);
        assert_eq!(encoded[0], vec![vec![[0.12346, 1.0], [0.5, 0.0]]]);
        assert!(encoded[1].is_empty());
    }
}

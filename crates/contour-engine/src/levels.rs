//! Threshold levels used for isoline extraction.

use crate::error::{ContourError, ContourResult};

/// Beaufort scale cut points in m/s (upper bound of force 0 through force 11).
pub const BEAUFORT_LEVELS: [f64; 12] = [
    0.2, 1.5, 3.3, 5.4, 7.9, 10.7, 13.8, 17.1, 20.7, 24.2, 28.4, 32.6,
];

/// Default level list as an owned vector.
pub fn beaufort_levels() -> Vec<f64> {
    BEAUFORT_LEVELS.to_vec()
}

/// Check that levels are non-empty, finite and strictly ascending.
pub fn validate_levels(levels: &[f64]) -> ContourResult<()> {
    if levels.is_empty() {
        return Err(ContourError::InvalidLevels(
            "at least one level is required".to_string(),
        ));
    }

    if let Some(bad) = levels.iter().find(|l| !l.is_finite()) {
        return Err(ContourError::InvalidLevels(format!(
            "level {} is not finite",
            bad
        )));
    }

    for pair in levels.windows(2) {
        if pair[1] <= pair[0] {
            return Err(ContourError::InvalidLevels(format!(
                "levels must be strictly ascending ({} followed by {})",
                pair[0], pair[1]
            )));
        }
    }

    Ok(())
}

/// Parse a comma separated level list such as `"0.2, 1.5, 3.3"`.
pub fn parse_levels(list: &str) -> ContourResult<Vec<f64>> {
    let levels = list
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .map_err(|e| ContourError::InvalidLevels(format!("'{}': {}", s, e)))
        })
        .collect::<ContourResult<Vec<f64>>>()?;

    validate_levels(&levels)?;
    Ok(levels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beaufort_levels_are_valid() {
        assert!(validate_levels(&BEAUFORT_LEVELS).is_ok());
        assert_eq!(beaufort_levels().len(), 12);
    }

    #[test]
    fn test_validate_levels_rejects_bad_lists() {
        assert!(validate_levels(&[]).is_err());
        assert!(validate_levels(&[1.0, 1.0]).is_err());
        assert!(validate_levels(&[2.0, 1.0]).is_err());
        assert!(validate_levels(&[1.0, f64::NAN]).is_err());
    }

    #[test]
    fn test_parse_levels() {
        let levels = parse_levels("0.5, 2,4.25").unwrap();
        assert_eq!(levels, vec![0.5, 2.0, 4.25]);

        assert!(parse_levels("1, abc").is_err());
        assert!(parse_levels("").is_err());
    }
}

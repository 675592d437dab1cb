//! Runtime configuration: optional YAML file, then environment overrides.

use std::env;
use std::path::Path;

use anyhow::{Context, Result};
use contour_engine::levels::parse_levels;
use contour_engine::ContourSettings;
use tracing::{debug, info};

/// Environment variables that override file settings.
pub const ENV_LEVELS: &str = "CONTOUR_LEVELS";
pub const ENV_PRECISION: &str = "CONTOUR_PRECISION";
pub const ENV_COLLISION_POLICY: &str = "CONTOUR_COLLISION_POLICY";
pub const ENV_ON_SLICE_ERROR: &str = "CONTOUR_ON_SLICE_ERROR";

/// Load settings from `path` (if any) and the process environment.
pub fn load_settings(path: Option<&Path>) -> Result<ContourSettings> {
    let settings = match path {
        Some(path) => from_yaml_file(path)?,
        None => ContourSettings::default(),
    };

    let settings = apply_overrides(settings, |key| env::var(key).ok())?;
    settings.validate().context("Invalid contour settings")?;

    info!(
        levels = settings.levels.len(),
        precision = settings.precision,
        collision_policy = ?settings.collision_policy,
        on_slice_error = ?settings.on_slice_error,
        "Loaded configuration"
    );
    Ok(settings)
}

/// Parse a YAML settings file; missing keys fall back to defaults.
pub fn from_yaml_file(path: &Path) -> Result<ContourSettings> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    from_yaml_str(&content).with_context(|| format!("Failed to parse config file {}", path.display()))
}

pub fn from_yaml_str(content: &str) -> Result<ContourSettings> {
    Ok(serde_yaml::from_str(content)?)
}

/// Apply overrides looked up by variable name.
pub fn apply_overrides<F>(mut settings: ContourSettings, lookup: F) -> Result<ContourSettings>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(levels) = lookup(ENV_LEVELS) {
        settings.levels = parse_levels(&levels).with_context(|| format!("{} is invalid", ENV_LEVELS))?;
        debug!(levels = ?settings.levels, "Levels overridden from environment");
    }

    if let Some(precision) = lookup(ENV_PRECISION) {
        settings.precision = precision
            .trim()
            .parse()
            .with_context(|| format!("{} must be a non-negative integer", ENV_PRECISION))?;
    }

    if let Some(policy) = lookup(ENV_COLLISION_POLICY) {
        settings.collision_policy = policy.trim().parse()?;
    }

    if let Some(policy) = lookup(ENV_ON_SLICE_ERROR) {
        settings.on_slice_error = policy.trim().parse()?;
    }

    Ok(settings)
}

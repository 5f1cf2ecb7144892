//! Generation tunables
//!
//! Every probability and size the generators use lives here so a layout can
//! be tuned without touching the algorithms. Configs load from JSON; any
//! field left out takes its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH, PALETTE_SIZE};
use crate::error::ConfigError;

/// Longest street length a config may ask for
pub const MAX_STREET_LENGTH: i32 = 4096;
/// Largest building side a config may ask for
pub const MAX_BUILDING_SIDE: i32 = 256;
/// Largest angle or bend in degrees
const MAX_DEGREES: i32 = 360;
/// Largest number of street cells skipped at once
const MAX_SKIP: i32 = 4096;

/// Street network tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreetConfig {
    /// Main street length range, inclusive
    pub main_length: (i32, i32),
    /// Main street angle range in degrees, inclusive
    pub main_angle: (i32, i32),
    /// Chance per main street cell to spawn a side street
    pub main_branch_chance: f32,
    /// Initial side street length range, inclusive
    pub branch_length: (i32, i32),
    /// Chance per side street cell to spawn a further branch
    pub branch_chance: f32,
    /// Cells skipped after a branch is spawned
    pub branch_spacing: usize,
    /// Chance a side street is bent off its axis
    pub jitter_chance: f32,
    /// Maximum bend in degrees
    pub jitter_degrees: i32,
    pub initial_momentum: f32,
    /// Branching stops once momentum drops to this value
    pub momentum_floor: f32,
    /// Hard cap on branch nesting
    pub max_depth: u32,
    /// Hard cap on the number of streets per town
    pub max_streets: usize,
    /// Clamp street endpoints onto the grid instead of failing
    pub clamp_projections: bool,
    pub road_color: u8,
}

impl Default for StreetConfig {
    fn default() -> Self {
        Self {
            main_length: (30, 90),
            main_angle: (-10, 10),
            main_branch_chance: 0.25,
            branch_length: (8, 24),
            branch_chance: 0.1,
            branch_spacing: 5,
            jitter_chance: 0.1,
            jitter_degrees: 10,
            initial_momentum: 1.0,
            momentum_floor: 0.1,
            max_depth: 12,
            max_streets: 512,
            clamp_projections: true,
            road_color: 7,
        }
    }
}

/// Building placement tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingConfig {
    pub max_width: i32,
    pub max_height: i32,
    pub min_width: i32,
    pub min_height: i32,
    /// Chance to take a fitting footprint without looking for a larger one
    pub quick_accept_chance: f32,
    /// Setback ring thickness range, inclusive
    pub setback: (i32, i32),
    /// Extra street cells skipped after a placement, `0..=skip_jitter`
    pub skip_jitter: i32,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            max_width: 7,
            max_height: 7,
            min_width: 3,
            min_height: 3,
            quick_accept_chance: 0.1,
            setback: (1, 2),
            skip_jitter: 2,
        }
    }
}

/// Retry policy for the caller-side generation loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Failed attempts tolerated before giving up
    pub max_retries: u32,
    /// Added to the seed after every failed attempt
    pub seed_step: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 16,
            seed_step: 1,
        }
    }
}

/// Complete town generation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TownConfig {
    pub width: usize,
    pub height: usize,
    pub streets: StreetConfig,
    pub buildings: BuildingConfig,
    /// Chance a leftover blank cell becomes grass
    pub grass_chance: f32,
    pub grass_color: u8,
    /// Color of the fallback fill after a failed attempt
    pub error_color: u8,
    pub retry: RetryConfig,
}

impl Default for TownConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            streets: StreetConfig::default(),
            buildings: BuildingConfig::default(),
            grass_chance: 0.2,
            grass_color: 3,
            error_color: 8,
            retry: RetryConfig::default(),
        }
    }
}

impl TownConfig {
    /// Config with default tunables on a grid of the given size
    pub fn with_size(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Load and validate a config from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Parse and validate a config from a JSON string
    pub fn from_json_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the generators cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(invalid("width/height", "grid must be at least 1x1"));
        }
        if self.width > i32::MAX as usize || self.height > i32::MAX as usize {
            return Err(invalid("width/height", "grid is too large"));
        }

        let s = &self.streets;
        check_range("streets.main_length", s.main_length)?;
        check_range("streets.main_angle", s.main_angle)?;
        check_range("streets.branch_length", s.branch_length)?;
        if s.main_length.0 < 0 || s.branch_length.0 < 0 {
            return Err(invalid("streets", "lengths must not be negative"));
        }
        check_at_most("streets.main_length", s.main_length.1, MAX_STREET_LENGTH)?;
        check_at_most("streets.branch_length", s.branch_length.1, MAX_STREET_LENGTH)?;
        if s.main_angle.0 < -MAX_DEGREES || s.main_angle.1 > MAX_DEGREES {
            return Err(invalid("streets.main_angle", "angles must lie within -360..=360"));
        }
        if s.branch_spacing > MAX_SKIP as usize {
            return Err(invalid("streets.branch_spacing", format!("must be at most {MAX_SKIP}")));
        }
        check_probability("streets.main_branch_chance", s.main_branch_chance)?;
        check_probability("streets.branch_chance", s.branch_chance)?;
        check_probability("streets.jitter_chance", s.jitter_chance)?;
        if s.jitter_degrees < 0 {
            return Err(invalid("streets.jitter_degrees", "must not be negative"));
        }
        check_at_most("streets.jitter_degrees", s.jitter_degrees, MAX_DEGREES)?;
        if s.max_streets == 0 {
            return Err(invalid("streets.max_streets", "must allow the main street"));
        }
        check_color("streets.road_color", s.road_color)?;

        let b = &self.buildings;
        if b.min_width < 1 || b.min_height < 1 {
            return Err(invalid("buildings.min_*", "minimum size must be positive"));
        }
        check_at_most("buildings.max_width", b.max_width, MAX_BUILDING_SIDE)?;
        check_at_most("buildings.max_height", b.max_height, MAX_BUILDING_SIDE)?;
        if b.min_width > b.max_width || b.min_height > b.max_height {
            return Err(invalid(
                "buildings",
                format!(
                    "minimum {}x{} exceeds maximum {}x{}",
                    b.min_width, b.min_height, b.max_width, b.max_height
                ),
            ));
        }
        check_probability("buildings.quick_accept_chance", b.quick_accept_chance)?;
        check_range("buildings.setback", b.setback)?;
        if b.setback.0 < 0 || b.skip_jitter < 0 {
            return Err(invalid("buildings", "setback and skip jitter must not be negative"));
        }
        check_at_most("buildings.setback", b.setback.1, MAX_BUILDING_SIDE)?;
        check_at_most("buildings.skip_jitter", b.skip_jitter, MAX_SKIP)?;

        check_probability("grass_chance", self.grass_chance)?;
        check_color("grass_color", self.grass_color)?;
        check_color("error_color", self.error_color)?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn check_range(field: &'static str, (lo, hi): (i32, i32)) -> Result<(), ConfigError> {
    if lo > hi {
        return Err(invalid(field, format!("range {lo}..={hi} is inverted")));
    }
    Ok(())
}

fn check_at_most(field: &'static str, value: i32, max: i32) -> Result<(), ConfigError> {
    if value > max {
        return Err(invalid(field, format!("{value} exceeds the limit of {max}")));
    }
    Ok(())
}

fn check_probability(field: &'static str, p: f32) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(invalid(field, format!("{p} is not a probability")));
    }
    Ok(())
}

fn check_color(field: &'static str, color: u8) -> Result<(), ConfigError> {
    if color >= PALETTE_SIZE {
        return Err(invalid(field, format!("color {color} is outside the palette")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TownConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.width, 128);
        assert_eq!(config.height, 64);
        assert_eq!(config.buildings.max_width, 7);
        assert_eq!(config.buildings.min_height, 3);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            TownConfig::from_json_str(r#"{ "width": 40, "streets": { "branch_chance": 0.2 } }"#)
                .unwrap();
        assert_eq!(config.width, 40);
        assert_eq!(config.height, 64);
        assert_eq!(config.streets.branch_chance, 0.2);
        assert_eq!(config.streets.branch_spacing, 5);
    }

    #[test]
    fn test_roundtrip() {
        let mut config = TownConfig::with_size(20, 10);
        config.grass_chance = 0.5;
        let json = config.to_json_string().unwrap();
        let back = TownConfig::from_json_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_rejects_bad_probability() {
        let err = TownConfig::from_json_str(r#"{ "grass_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "grass_chance", .. }));
    }

    #[test]
    fn test_rejects_min_above_max() {
        let mut config = TownConfig::default();
        config.buildings.min_width = 9;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unbounded_ranges() {
        let err = TownConfig::from_json_str(r#"{ "streets": { "main_angle": [-10, 2147483647] } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "streets.main_angle", .. }));

        let err =
            TownConfig::from_json_str(r#"{ "streets": { "main_length": [30, 2147483647] } }"#)
                .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "streets.main_length", .. }));

        let err = TownConfig::from_json_str(r#"{ "streets": { "jitter_degrees": 2147483647 } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "streets.jitter_degrees", .. }));

        let err = TownConfig::from_json_str(r#"{ "buildings": { "skip_jitter": 2147483647 } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "buildings.skip_jitter", .. }));
    }

    #[test]
    fn test_rejects_oversized_buildings() {
        let mut config = TownConfig::default();
        config.buildings.max_width = 70000;
        config.buildings.max_height = 70000;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "buildings.max_width", .. }));

        config.buildings.max_width = MAX_BUILDING_SIDE;
        config.buildings.max_height = MAX_BUILDING_SIDE;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_grid() {
        assert!(TownConfig::with_size(0, 10).validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = TownConfig::from_json_str("{ width: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = TownConfig::load_from_file(Path::new("/nonexistent/hamlet.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}

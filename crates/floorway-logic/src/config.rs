//! Corridor synthesis configuration.
//!
//! All knobs have working defaults; hosts typically override only
//! `corridor_width` and the priority weights. Validation happens once at
//! construction time via [`validate_config`] — the pipeline itself never
//! re-checks, so a host that skips validation gets the documented
//! garbage-in/empty-out behavior instead of panics.

use serde::{Deserialize, Serialize};

/// Tunable parameters for row detection and corridor synthesis.
/// Distances are meters in floor-plan coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorridorConfig {
    /// Target thickness of horizontal aisles.
    pub corridor_width: f64,
    /// Minimum clearance before a vertical gap is considered usable.
    pub margin: f64,
    /// Shortest vertical gap corridor worth emitting.
    pub min_corridor_length: f64,
    /// How far an ilot center may drift from the running row average and
    /// still join the row.
    pub row_tolerance: f64,
    /// Facing-row distance band, lower bound.
    pub min_row_distance: f64,
    /// Facing-row distance band, upper bound.
    pub max_row_distance: f64,
    /// Minimum horizontal overlap ratio for two rows to face each other.
    pub min_overlap: f64,
    /// Priority multiplier for horizontal candidates in conflict
    /// resolution.
    pub horizontal_priority: f64,
    /// Flat priority assigned to vertical candidates.
    pub vertical_priority: f64,
    /// Slack for treating two same-orientation candidates as adjacent
    /// during merging.
    pub adjacency_tolerance: f64,
    /// Maximum tolerated ilot-cut ratio is `1 - overlap_tolerance`.
    pub overlap_tolerance: f64,
    pub generate_horizontal: bool,
    pub generate_vertical: bool,
}

impl Default for CorridorConfig {
    fn default() -> Self {
        Self {
            corridor_width: 1.5,
            margin: 0.5,
            min_corridor_length: 1.0,
            row_tolerance: 3.0,
            min_row_distance: 2.0,
            max_row_distance: 8.0,
            min_overlap: 0.6,
            horizontal_priority: 1.5,
            vertical_priority: 1.0,
            adjacency_tolerance: 0.15,
            overlap_tolerance: 0.2,
            generate_horizontal: true,
            generate_vertical: true,
        }
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `min_row_distance` exceeds `max_row_distance`.
    InvertedDistanceBand(f64, f64),
    /// Corridor width must be positive.
    NonPositiveCorridorWidth(f64),
    /// `min_overlap` must lie in [0, 1].
    InvalidMinOverlap(f64),
    /// `overlap_tolerance` must lie in [0, 1].
    InvalidOverlapTolerance(f64),
    /// Margin may not be negative.
    NegativeMargin(f64),
    /// Priority weights must be positive.
    NonPositivePriority(f64),
}

/// Validate a configuration, returning all errors found.
pub fn validate_config(config: &CorridorConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if config.min_row_distance > config.max_row_distance {
        errors.push(ConfigError::InvertedDistanceBand(
            config.min_row_distance,
            config.max_row_distance,
        ));
    }
    if !(config.corridor_width > 0.0) {
        errors.push(ConfigError::NonPositiveCorridorWidth(config.corridor_width));
    }
    if !(0.0..=1.0).contains(&config.min_overlap) {
        errors.push(ConfigError::InvalidMinOverlap(config.min_overlap));
    }
    if !(0.0..=1.0).contains(&config.overlap_tolerance) {
        errors.push(ConfigError::InvalidOverlapTolerance(config.overlap_tolerance));
    }
    if config.margin < 0.0 {
        errors.push(ConfigError::NegativeMargin(config.margin));
    }
    if !(config.horizontal_priority > 0.0) {
        errors.push(ConfigError::NonPositivePriority(config.horizontal_priority));
    }
    if !(config.vertical_priority > 0.0) {
        errors.push(ConfigError::NonPositivePriority(config.vertical_priority));
    }

    errors
}

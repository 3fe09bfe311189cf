//! Pure corridor-synthesis logic for Floorway.
//!
//! This crate contains the full circulation pipeline, independent of any
//! file format, database, or transport. Functions take plain data and
//! return results, making them unit-testable and portable across server
//! hosts, CLI tools, and batch processors. The engine is stateless: every
//! invocation rebuilds its transient structures (rows, facing pairs) and
//! returns corridors as the sole output artifact.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`access`] | Entrance→network access connectors (post-pass) |
//! | [`arrows`] | Directional circulation markers along corridors |
//! | [`config`] | Synthesis configuration, defaults, and validation |
//! | [`corridors`] | Candidate generation, merging, conflicts, validation |
//! | [`geometry`] | Points, polygons, axis-aligned box arithmetic |
//! | [`plan`] | Boundary data model (ilots, floor-plan context) |
//! | [`rows`] | Row clustering and facing-pair scoring |
//!
//! # Typical flow
//!
//! ```
//! use floorway_logic::config::{validate_config, CorridorConfig};
//! use floorway_logic::corridors;
//! use floorway_logic::plan::{FloorPlanContext, Ilot};
//!
//! let config = CorridorConfig::default();
//! assert!(validate_config(&config).is_empty());
//!
//! let ilots = vec![
//!     Ilot { id: "a".into(), kind: "desk".into(), x: 0.0, y: 0.0, width: 10.0, height: 2.0 },
//!     Ilot { id: "b".into(), kind: "desk".into(), x: 0.0, y: 6.0, width: 10.0, height: 2.0 },
//! ];
//! let result = corridors::generate(&ilots, &FloorPlanContext::default(), &config);
//! assert_eq!(result.corridors.len(), 1);
//! ```

pub mod access;
pub mod arrows;
pub mod config;
pub mod corridors;
pub mod geometry;
pub mod plan;
pub mod rows;

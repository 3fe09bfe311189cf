//! Integration tests for the full corridor-synthesis pipeline.
//!
//! Exercises: Ilots → Rows → FacingPairs → candidates → optimize →
//! resolve_conflicts → validate, plus the marker and access post-passes.
//!
//! All tests are pure logic — no file formats, no transport, no rendering.

use floorway_logic::access::access_connectors;
use floorway_logic::arrows::{corridor_markers, entrance_flow, ArrowKind, DEFAULT_SPACING};
use floorway_logic::config::{validate_config, ConfigError, CorridorConfig};
use floorway_logic::corridors::{self, Orientation};
use floorway_logic::geometry::Polygon;
use floorway_logic::plan::{FloorPlanContext, Ilot};
use floorway_logic::rows;
use serde::Deserialize;

// ── Shared fixture (same JSON the harness uses) ─────────────────────────

const SAMPLE_PLAN_JSON: &str = include_str!("../../../data/sample_floor_plan.json");

#[derive(Debug, Deserialize)]
struct SamplePlan {
    plan: FloorPlanContext,
    ilots: Vec<Ilot>,
}

fn sample_plan() -> SamplePlan {
    serde_json::from_str(SAMPLE_PLAN_JSON).expect("sample floor plan must parse")
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn make_ilot(id: &str, x: f64, y: f64, w: f64, h: f64) -> Ilot {
    Ilot {
        id: id.to_string(),
        kind: "desk".into(),
        x,
        y,
        width: w,
        height: h,
    }
}

/// Two facing rows with member centers at Y ∈ {0, 2} and {6, 8}, both
/// sides spanning X = 0..10.
fn facing_rows() -> Vec<Ilot> {
    vec![
        make_ilot("a", 0.0, -1.0, 5.0, 2.0),
        make_ilot("b", 5.0, 1.0, 5.0, 2.0),
        make_ilot("c", 0.0, 5.0, 5.0, 2.0),
        make_ilot("d", 5.0, 7.0, 5.0, 2.0),
    ]
}

fn assert_no_pairwise_overlap(corridors: &[floorway_logic::corridors::Corridor]) {
    for i in 0..corridors.len() {
        for j in (i + 1)..corridors.len() {
            assert!(
                !corridors[i].bounds().intersects(&corridors[j].bounds()),
                "corridors {} and {} overlap in final output",
                corridors[i].id,
                corridors[j].id
            );
        }
    }
}

// ── Spec scenarios ──────────────────────────────────────────────────────

#[test]
fn two_facing_rows_produce_one_centered_corridor() {
    let config = CorridorConfig {
        min_row_distance: 2.0,
        max_row_distance: 8.0,
        min_overlap: 0.5,
        ..Default::default()
    };
    let ilots = facing_rows();

    let detected = rows::group_into_rows(&ilots, &config);
    let pairs = rows::find_facing_pairs(&detected, &config);
    assert_eq!(pairs.len(), 1);
    assert!((pairs[0].distance - 4.0).abs() < 1e-9);
    assert!((pairs[0].overlap_ratio - 1.0).abs() < 1e-9);

    let result = corridors::generate(&ilots, &FloorPlanContext::default(), &config);
    let horizontal: Vec<_> = result
        .corridors
        .iter()
        .filter(|c| c.orientation == Orientation::Horizontal)
        .collect();
    assert_eq!(horizontal.len(), 1);
    let center_y = horizontal[0].bounds().center().y;
    assert!(
        (center_y - 4.0).abs() < 0.5,
        "horizontal corridor should be centered near Y=4, got {}",
        center_y
    );
}

#[test]
fn vertical_gap_below_margin_emits_nothing() {
    let config = CorridorConfig {
        margin: 0.5,
        generate_horizontal: false,
        ..Default::default()
    };
    let ilots = vec![
        make_ilot("a", 2.0, 0.0, 4.0, 2.0),
        make_ilot("b", 2.0, 2.3, 4.0, 2.0), // 0.3 gap
    ];
    let result = corridors::generate(&ilots, &FloorPlanContext::default(), &config);
    assert!(result.corridors.is_empty());
    assert_eq!(result.statistics.vertical_count, 0);
}

#[test]
fn conflicting_candidates_prefer_horizontal() {
    // One facing pair and one column gap claiming the same space: the
    // horizontal candidate carries the priority multiplier and wins.
    let ilots = vec![
        make_ilot("a", 0.0, 0.0, 10.0, 2.0),
        make_ilot("b", 0.0, 6.0, 10.0, 2.0),
    ];
    let result = corridors::generate(
        &ilots,
        &FloorPlanContext::default(),
        &CorridorConfig::default(),
    );

    assert_eq!(result.corridors.len(), 1);
    assert_eq!(result.corridors[0].orientation, Orientation::Horizontal);
    assert_eq!(result.statistics.removed_due_to_conflicts, 1);
}

#[test]
fn corridor_cutting_an_ilot_is_rejected() {
    let candidate = corridors::generate_horizontal(
        &facing_rows(),
        &CorridorConfig {
            min_overlap: 0.5,
            ..Default::default()
        },
    );
    assert_eq!(candidate.len(), 1);

    // An ilot sitting almost entirely inside the candidate region.
    let blocker = make_ilot("blocker", 2.0, 3.3, 1.0, 1.4);
    let (valid, invalid) = corridors::validate(
        candidate,
        &FloorPlanContext::default(),
        &[blocker],
        0.2,
    );
    assert!(valid.is_empty());
    assert_eq!(invalid.len(), 1);
}

// ── Properties ──────────────────────────────────────────────────────────

#[test]
fn row_partition_covers_every_ilot_once() {
    let config = CorridorConfig::default();
    let ilots: Vec<Ilot> = (0..30)
        .map(|i| {
            make_ilot(
                &format!("ilot_{}", i),
                (i % 6) as f64 * 5.0,
                (i / 6) as f64 * 7.0 + (i % 3) as f64 * 0.4,
                4.0,
                2.0,
            )
        })
        .collect();

    let detected = rows::group_into_rows(&ilots, &config);
    let mut assigned: Vec<usize> = detected.iter().flat_map(|r| r.members.clone()).collect();
    assigned.sort_unstable();
    let expected: Vec<usize> = (0..ilots.len()).collect();
    assert_eq!(assigned, expected, "rows must partition the ilot set");
}

#[test]
fn facing_pairs_stay_inside_configured_bounds() {
    let config = CorridorConfig::default();
    let ilots: Vec<Ilot> = (0..5)
        .map(|i| make_ilot(&format!("r{}", i), 0.0, i as f64 * 5.0, 12.0, 2.0))
        .collect();

    let detected = rows::group_into_rows(&ilots, &config);
    for pair in rows::find_facing_pairs(&detected, &config) {
        assert!(pair.distance >= config.min_row_distance);
        assert!(pair.distance <= config.max_row_distance);
        assert!(pair.overlap_ratio >= config.min_overlap);
        assert!(pair.quality > 0.0 && pair.quality <= 1.0);
    }
}

#[test]
fn final_corridors_never_overlap() {
    let sample = sample_plan();
    let result = corridors::generate(&sample.ilots, &sample.plan, &CorridorConfig::default());
    assert_no_pairwise_overlap(&result.corridors);
}

#[test]
fn optimization_is_idempotent_on_generated_candidates() {
    let config = CorridorConfig::default();
    let sample = sample_plan();
    let raw = corridors::generate_vertical(&sample.ilots, &config);

    let once = corridors::optimize(raw, config.adjacency_tolerance);
    let twice = corridors::optimize(once.clone(), config.adjacency_tolerance);

    assert_eq!(once.len(), twice.len());
    for (a, b) in once.iter().zip(twice.iter()) {
        assert_eq!(a.id, b.id);
        assert!((a.x - b.x).abs() < 1e-9);
        assert!((a.y - b.y).abs() < 1e-9);
        assert!((a.width - b.width).abs() < 1e-9);
        assert!((a.height - b.height).abs() < 1e-9);
    }
}

#[test]
fn priorities_are_never_negative() {
    let sample = sample_plan();
    let result = corridors::generate(&sample.ilots, &sample.plan, &CorridorConfig::default());
    for corridor in result.corridors.iter().chain(result.invalid.iter()) {
        assert!(corridor.priority >= 0.0, "{} has negative priority", corridor.id);
    }
}

// ── Sample plan end to end ──────────────────────────────────────────────

#[test]
fn sample_plan_synthesizes_three_main_aisles() {
    let sample = sample_plan();
    let result = corridors::generate(&sample.ilots, &sample.plan, &CorridorConfig::default());

    assert_eq!(result.corridors.len(), 3);
    assert!(result
        .corridors
        .iter()
        .all(|c| c.orientation == Orientation::Horizontal));
    assert!(result.invalid.is_empty());

    // Four desk rows → three aisles in the gaps at Y ≈ 6, 12, 18.
    let mut centers: Vec<f64> = result
        .corridors
        .iter()
        .map(|c| c.bounds().center().y)
        .collect();
    centers.sort_by(f64::total_cmp);
    assert!((centers[0] - 6.0).abs() < 1e-9);
    assert!((centers[1] - 12.0).abs() < 1e-9);
    assert!((centers[2] - 18.0).abs() < 1e-9);

    let s = &result.statistics;
    assert_eq!(s.horizontal_count, 3);
    assert_eq!(s.vertical_count, 12);
    assert_eq!(s.removed_due_to_conflicts, 12);
    assert!((s.total_area - 85.5).abs() < 1e-9);
}

#[test]
fn sample_plan_corridors_avoid_zones_and_entrances() {
    let sample = sample_plan();
    let result = corridors::generate(&sample.ilots, &sample.plan, &CorridorConfig::default());

    let zone_boxes: Vec<_> = sample
        .plan
        .forbidden_zones
        .iter()
        .chain(sample.plan.entrances.iter())
        .filter_map(Polygon::bounds)
        .collect();
    for corridor in &result.corridors {
        for zone in &zone_boxes {
            assert!(
                !corridor.bounds().intersects(zone),
                "{} intersects a restricted region",
                corridor.id
            );
        }
    }
}

#[test]
fn forbidden_zone_over_an_aisle_invalidates_it() {
    let sample = sample_plan();
    let mut plan = sample.plan;
    // Drop a zone straight onto the middle aisle (Y ≈ 12).
    plan.forbidden_zones
        .push(Polygon::rect(8.0, 11.0, 4.0, 2.0));

    let result = corridors::generate(&sample.ilots, &plan, &CorridorConfig::default());
    assert_eq!(result.corridors.len(), 2);
    assert_eq!(result.invalid.len(), 1);
    let rejected_y = result.invalid[0].bounds().center().y;
    assert!((rejected_y - 12.0).abs() < 1e-9);
}

// ── Post-passes ─────────────────────────────────────────────────────────

#[test]
fn markers_and_access_cover_the_sample_network() {
    let sample = sample_plan();
    let result = corridors::generate(&sample.ilots, &sample.plan, &CorridorConfig::default());

    let markers = corridor_markers(&result.corridors, DEFAULT_SPACING);
    // 19m aisles at 4m spacing → 4 pairs each, 3 aisles.
    assert_eq!(markers.len(), 3 * 4 * 2);
    assert!(markers.iter().all(|m| m.kind == ArrowKind::Circulation));

    let flow = entrance_flow(&sample.plan, &result.corridors, DEFAULT_SPACING);
    assert!(!flow.is_empty());

    let connectors = access_connectors(&sample.plan, &result.corridors, 1.5);
    assert_eq!(connectors.len(), 1, "one entrance, one connector");
}

// ── Degenerate input and configuration ──────────────────────────────────

#[test]
fn empty_and_degenerate_inputs_short_circuit() {
    let config = CorridorConfig::default();
    let empty = corridors::generate(&[], &FloorPlanContext::default(), &config);
    assert!(empty.corridors.is_empty());

    let junk = vec![
        make_ilot("nan", f64::NAN, 0.0, 4.0, 2.0),
        make_ilot("flat", 0.0, 0.0, 4.0, 0.0),
        make_ilot("inf", f64::INFINITY, 0.0, 4.0, 2.0),
    ];
    let result = corridors::generate(&junk, &FloorPlanContext::default(), &config);
    assert!(result.corridors.is_empty());
    assert!(result.invalid.is_empty());
}

#[test]
fn inverted_band_is_a_construction_time_error() {
    let config = CorridorConfig {
        min_row_distance: 10.0,
        max_row_distance: 4.0,
        ..Default::default()
    };
    let errors = validate_config(&config);
    assert_eq!(errors, vec![ConfigError::InvertedDistanceBand(10.0, 4.0)]);
}

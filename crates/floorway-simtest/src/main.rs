//! Floorway Headless Validation Harness
//!
//! Validates the pure corridor-synthesis logic without any host — no file
//! parsing beyond the bundled sample, no networking, no rendering.
//!
//! Usage:
//!   cargo run -p floorway-simtest
//!   cargo run -p floorway-simtest -- --verbose

use floorway_logic::access::access_connectors;
use floorway_logic::arrows::{corridor_markers, entrance_flow, DEFAULT_SPACING};
use floorway_logic::config::{validate_config, CorridorConfig};
use floorway_logic::corridors::{self, Corridor, Orientation, SynthesisResult};
use floorway_logic::plan::{FloorPlanContext, Ilot};
use floorway_logic::rows;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

// ── Sample plan (same JSON the integration tests use) ───────────────────

const SAMPLE_PLAN_JSON: &str = include_str!("../../../data/sample_floor_plan.json");

#[derive(Debug, Deserialize)]
struct SamplePlan {
    plan: FloorPlanContext,
    ilots: Vec<Ilot>,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn new(name: &str, passed: bool, detail: String) -> Self {
        Self {
            name: name.to_string(),
            passed,
            detail,
        }
    }
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Floorway Corridor Harness ===\n");

    let mut results = Vec::new();

    // 1. Configuration defaults
    results.extend(validate_configuration(verbose));

    // 2. Sample plan end to end
    results.extend(validate_sample_plan(verbose));

    // 3. Scenario sweep (facing rows, column gaps, conflicts, zones)
    results.extend(validate_scenarios(verbose));

    // 4. Randomized layouts never violate pipeline invariants
    results.extend(validate_randomized_layouts(verbose));

    // 5. Post-passes (markers, access connectors)
    results.extend(validate_post_passes(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── Shared checks ───────────────────────────────────────────────────────

fn overlapping_pair(corridors: &[Corridor]) -> Option<(String, String)> {
    for i in 0..corridors.len() {
        for j in (i + 1)..corridors.len() {
            if corridors[i].bounds().intersects(&corridors[j].bounds()) {
                return Some((corridors[i].id.clone(), corridors[j].id.clone()));
            }
        }
    }
    None
}

fn statistics_consistent(result: &SynthesisResult) -> bool {
    let s = &result.statistics;
    s.final_count == result.corridors.len()
        && s.horizontal_count + s.vertical_count
            == result.corridors.len() + result.invalid.len() + s.removed_due_to_conflicts
}

// ── 1. Configuration ────────────────────────────────────────────────────

fn validate_configuration(_verbose: bool) -> Vec<TestResult> {
    println!("--- Configuration ---");
    let mut results = Vec::new();

    let errors = validate_config(&CorridorConfig::default());
    results.push(TestResult::new(
        "default_config_valid",
        errors.is_empty(),
        format!("{} errors on defaults", errors.len()),
    ));

    let inverted = CorridorConfig {
        min_row_distance: 9.0,
        max_row_distance: 3.0,
        ..Default::default()
    };
    let errors = validate_config(&inverted);
    results.push(TestResult::new(
        "inverted_band_rejected",
        !errors.is_empty(),
        format!("{} errors reported", errors.len()),
    ));

    results
}

// ── 2. Sample plan ──────────────────────────────────────────────────────

fn validate_sample_plan(verbose: bool) -> Vec<TestResult> {
    println!("--- Sample Plan ---");
    let mut results = Vec::new();

    let sample: SamplePlan = match serde_json::from_str(SAMPLE_PLAN_JSON) {
        Ok(s) => s,
        Err(e) => {
            results.push(TestResult::new(
                "sample_plan_parse",
                false,
                format!("JSON parse error: {}", e),
            ));
            return results;
        }
    };
    results.push(TestResult::new(
        "sample_plan_parse",
        true,
        format!(
            "{} ilots, {} zones, {} entrances",
            sample.ilots.len(),
            sample.plan.forbidden_zones.len(),
            sample.plan.entrances.len()
        ),
    ));

    let config = CorridorConfig::default();
    let result = corridors::generate(&sample.ilots, &sample.plan, &config);
    if verbose {
        println!(
            "    {} corridors, {} invalid, {:?}",
            result.corridors.len(),
            result.invalid.len(),
            result.statistics
        );
    }

    results.push(TestResult::new(
        "sample_plan_has_aisles",
        result.corridors.len() == 3,
        format!("{} final corridors (expected 3)", result.corridors.len()),
    ));
    results.push(TestResult::new(
        "sample_plan_no_overlaps",
        overlapping_pair(&result.corridors).is_none(),
        "final corridors pairwise disjoint".into(),
    ));
    results.push(TestResult::new(
        "sample_plan_statistics",
        statistics_consistent(&result),
        format!(
            "h={} v={} removed={} final={}",
            result.statistics.horizontal_count,
            result.statistics.vertical_count,
            result.statistics.removed_due_to_conflicts,
            result.statistics.final_count
        ),
    ));

    // Same input twice must give identical output.
    let again = corridors::generate(&sample.ilots, &sample.plan, &config);
    let identical = serde_json::to_string(&result.corridors).ok()
        == serde_json::to_string(&again.corridors).ok();
    results.push(TestResult::new(
        "sample_plan_deterministic",
        identical,
        "two runs serialize identically".into(),
    ));

    results
}

// ── 3. Scenario sweep ───────────────────────────────────────────────────

fn make_ilot(x: f64, y: f64, w: f64, h: f64) -> Ilot {
    Ilot {
        id: String::new(),
        kind: "desk".into(),
        x,
        y,
        width: w,
        height: h,
    }
}

fn validate_scenarios(_verbose: bool) -> Vec<TestResult> {
    println!("--- Scenarios ---");
    let mut results = Vec::new();
    let config = CorridorConfig::default();

    // Facing rows with centers at Y ∈ {0, 2} and {6, 8}.
    let facing = vec![
        make_ilot(0.0, -1.0, 5.0, 2.0),
        make_ilot(5.0, 1.0, 5.0, 2.0),
        make_ilot(0.0, 5.0, 5.0, 2.0),
        make_ilot(5.0, 7.0, 5.0, 2.0),
    ];
    let detected = rows::group_into_rows(&facing, &config);
    let pairs = rows::find_facing_pairs(&detected, &config);
    results.push(TestResult::new(
        "facing_rows_detected",
        detected.len() == 2 && pairs.len() == 1,
        format!("{} rows, {} pairs", detected.len(), pairs.len()),
    ));
    if let Some(pair) = pairs.first() {
        results.push(TestResult::new(
            "facing_pair_distance",
            (pair.distance - 4.0).abs() < 1e-9 && (pair.overlap_ratio - 1.0).abs() < 1e-9,
            format!(
                "distance={:.2} overlap={:.2}",
                pair.distance, pair.overlap_ratio
            ),
        ));
    }

    // 0.3m column gap with 0.5 margin → nothing.
    let tight = vec![
        make_ilot(2.0, 0.0, 4.0, 2.0),
        make_ilot(2.0, 2.3, 4.0, 2.0),
    ];
    let vertical = corridors::generate_vertical(&tight, &config);
    results.push(TestResult::new(
        "tight_gap_skipped",
        vertical.is_empty(),
        format!("{} vertical corridors (expected 0)", vertical.len()),
    ));

    // Contested space goes to the horizontal candidate.
    let contested = vec![
        make_ilot(0.0, 0.0, 10.0, 2.0),
        make_ilot(0.0, 6.0, 10.0, 2.0),
    ];
    let result = corridors::generate(&contested, &FloorPlanContext::default(), &config);
    let horizontal_won = result.corridors.len() == 1
        && result.corridors[0].orientation == Orientation::Horizontal;
    results.push(TestResult::new(
        "horizontal_wins_conflict",
        horizontal_won,
        format!(
            "{} corridors, removed={}",
            result.corridors.len(),
            result.statistics.removed_due_to_conflicts
        ),
    ));

    // Degenerate input short-circuits to empty, no panic.
    let junk = vec![
        make_ilot(f64::NAN, 0.0, 4.0, 2.0),
        make_ilot(0.0, 0.0, 0.0, 2.0),
    ];
    let result = corridors::generate(&junk, &FloorPlanContext::default(), &config);
    results.push(TestResult::new(
        "degenerate_input_short_circuits",
        result.corridors.is_empty() && result.invalid.is_empty(),
        "empty result, no panic".into(),
    ));

    results
}

// ── 4. Randomized layouts ───────────────────────────────────────────────

fn validate_randomized_layouts(verbose: bool) -> Vec<TestResult> {
    println!("--- Randomized Layouts ---");
    let mut results = Vec::new();
    let config = CorridorConfig::default();

    let mut overlap_failures = 0;
    let mut stat_failures = 0;
    let mut total_corridors = 0;

    for seed in 0..50u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let count = rng.gen_range(5..40);
        let ilots: Vec<Ilot> = (0..count)
            .map(|i| Ilot {
                id: format!("ilot_{}", i),
                kind: "desk".into(),
                x: rng.gen_range(0.0..90.0),
                y: rng.gen_range(0.0..90.0),
                width: rng.gen_range(1.0..8.0),
                height: rng.gen_range(1.0..4.0),
            })
            .collect();

        let result = corridors::generate(&ilots, &FloorPlanContext::default(), &config);
        total_corridors += result.corridors.len();

        if let Some((a, b)) = overlapping_pair(&result.corridors) {
            overlap_failures += 1;
            if verbose {
                println!("    seed {}: {} overlaps {}", seed, a, b);
            }
        }
        if !statistics_consistent(&result) {
            stat_failures += 1;
        }
    }

    results.push(TestResult::new(
        "random_no_final_overlaps",
        overlap_failures == 0,
        format!("{} seeds with overlapping output", overlap_failures),
    ));
    results.push(TestResult::new(
        "random_statistics_consistent",
        stat_failures == 0,
        format!("{} seeds with inconsistent statistics", stat_failures),
    ));
    results.push(TestResult::new(
        "random_produces_corridors",
        total_corridors > 0,
        format!("{} corridors across 50 seeds", total_corridors),
    ));

    results
}

// ── 5. Post-passes ──────────────────────────────────────────────────────

fn validate_post_passes(_verbose: bool) -> Vec<TestResult> {
    println!("--- Post-passes ---");
    let mut results = Vec::new();

    let sample: SamplePlan =
        serde_json::from_str(SAMPLE_PLAN_JSON).expect("sample plan parsed earlier");
    let config = CorridorConfig::default();
    let result = corridors::generate(&sample.ilots, &sample.plan, &config);

    let markers = corridor_markers(&result.corridors, DEFAULT_SPACING);
    results.push(TestResult::new(
        "markers_cover_network",
        !result.corridors.is_empty() && markers.len() >= result.corridors.len() * 6,
        format!(
            "{} markers across {} corridors",
            markers.len(),
            result.corridors.len()
        ),
    ));

    let flow = entrance_flow(&sample.plan, &result.corridors, DEFAULT_SPACING);
    results.push(TestResult::new(
        "entrance_flow_present",
        !flow.is_empty(),
        format!("{} flow markers", flow.len()),
    ));

    let connectors = access_connectors(&sample.plan, &result.corridors, config.corridor_width);
    results.push(TestResult::new(
        "access_connectors_present",
        connectors.len() == sample.plan.entrances.len(),
        format!(
            "{} connectors for {} entrances",
            connectors.len(),
            sample.plan.entrances.len()
        ),
    ));

    results
}

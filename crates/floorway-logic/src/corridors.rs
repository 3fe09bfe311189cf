//! Corridor synthesis: candidate generation, optimization, conflict
//! resolution, and validation.
//!
//! Pipeline (one `generate` call, stateless between invocations):
//!   1. generate_horizontal -- facing-pair recommendations → candidates
//!   2. generate_vertical   -- within-column gaps → candidates
//!   3. optimize            -- per orientation: dedup + greedy merge
//!   4. resolve_conflicts   -- cross-orientation, priority-greedy
//!   5. validate            -- forbidden zones, entrances, ilot cuts
//!
//! Candidates are immutable value types rebuilt at each stage; merging
//! constructs new corridors instead of mutating shared ones, and all
//! "connects" relationships are expressed through indices.

use crate::config::CorridorConfig;
use crate::geometry::{BoundingBox, Polygon};
use crate::plan::{FloorPlanContext, Ilot};
use crate::rows;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Fixed-precision key scale for deduplication (3 decimals).
const DEDUP_SCALE: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A rectangular circulation region. The polygon is a 4-corner
/// axis-aligned ring in floor-plan coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Corridor {
    pub id: String,
    pub orientation: Orientation,
    pub polygon: Polygon,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub area: f64,
    /// Tie-break scalar for contested space; always >= 0.
    pub priority: f64,
    /// Row indices for horizontal corridors, ilot indices for vertical
    /// ones, entrance indices for access connectors.
    pub connects: Vec<usize>,
    /// Ids of candidates absorbed during merging.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub merged_from: Vec<String>,
}

impl Corridor {
    fn from_bounds(
        id: String,
        orientation: Orientation,
        bounds: BoundingBox,
        priority: f64,
        connects: Vec<usize>,
    ) -> Self {
        Self {
            id,
            orientation,
            polygon: Polygon::rect(bounds.min_x, bounds.min_y, bounds.width(), bounds.height()),
            x: bounds.min_x,
            y: bounds.min_y,
            width: bounds.width(),
            height: bounds.height(),
            area: bounds.area(),
            priority,
            connects,
            merged_from: Vec::new(),
        }
    }

    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_rect(self.x, self.y, self.width, self.height)
    }
}

/// Per-run observability counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub horizontal_count: usize,
    pub vertical_count: usize,
    pub horizontal_area: f64,
    pub vertical_area: f64,
    pub final_count: usize,
    pub removed_due_to_conflicts: usize,
    pub total_area: f64,
}

/// Output of one synthesis run. `invalid` keeps the rejected survivors so
/// hosts can surface why space stayed unconnected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisResult {
    pub corridors: Vec<Corridor>,
    pub invalid: Vec<Corridor>,
    pub statistics: Statistics,
}

/// Horizontal corridor candidates from facing-row recommendations.
/// Priority is the pair quality scaled by the horizontal weight, which is
/// how horizontal aisles win contested space later.
pub fn generate_horizontal(ilots: &[Ilot], config: &CorridorConfig) -> Vec<Corridor> {
    let detected = rows::group_into_rows(ilots, config);
    let pairs = rows::find_facing_pairs(&detected, config);
    let recommendations =
        rows::corridor_recommendations(&detected, &pairs, config.corridor_width);

    recommendations
        .into_iter()
        .enumerate()
        .map(|(i, rec)| {
            Corridor::from_bounds(
                format!("h_corridor_{}", i),
                Orientation::Horizontal,
                rec.bounds,
                rec.priority * config.horizontal_priority,
                vec![rec.rows.0, rec.rows.1],
            )
        })
        .collect()
}

/// Vertical corridor candidates from within-column gaps.
///
/// Columns are approximated by bucketing ilot X positions to one decimal;
/// a column needs at least two members. Each consecutive vertical gap that
/// still clears `margin` by `min_corridor_length` yields one candidate
/// spanning the union of both ilots' X extents, centered in the gap.
pub fn generate_vertical(ilots: &[Ilot], config: &CorridorConfig) -> Vec<Corridor> {
    let mut columns: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (i, ilot) in ilots.iter().enumerate() {
        if ilot.is_degenerate() {
            continue;
        }
        let bucket = (ilot.x * 10.0).round() as i64;
        columns.entry(bucket).or_default().push(i);
    }

    let mut corridors = Vec::new();
    for members in columns.values() {
        if members.len() < 2 {
            continue;
        }
        let mut sorted = members.clone();
        sorted.sort_by(|&a, &b| ilots[a].y.total_cmp(&ilots[b].y));

        for pair in sorted.windows(2) {
            let (below, above) = (&ilots[pair[0]], &ilots[pair[1]]);
            let gap_start = below.y + below.height;
            let gap = above.y - gap_start;
            let usable = gap - config.margin;
            if usable < config.min_corridor_length {
                continue;
            }

            let x0 = below.x.min(above.x);
            let x1 = (below.x + below.width).max(above.x + above.width);
            let center_y = (gap_start + above.y) / 2.0;

            corridors.push(Corridor::from_bounds(
                format!("v_corridor_{}", corridors.len()),
                Orientation::Vertical,
                BoundingBox::from_rect(x0, center_y - usable / 2.0, x1 - x0, usable),
                config.vertical_priority,
                vec![pair[0], pair[1]],
            ));
        }
    }

    corridors
}

/// Deduplicate and greedily merge one orientation's candidate list.
///
/// Dedup keys round geometry to 3 decimals; colliding candidates keep the
/// higher priority. The merge loop pops the highest-priority remaining
/// candidate and absorbs every candidate that overlaps it or sits within
/// `adjacency_tolerance`, rescanning until the current candidate stops
/// growing. Merging is what bounds candidate explosion from near-duplicate
/// aisle segments produced by row-detection noise.
pub fn optimize(candidates: Vec<Corridor>, adjacency_tolerance: f64) -> Vec<Corridor> {
    let mut pool = deduplicate(candidates);
    pool.sort_by(|a, b| b.priority.total_cmp(&a.priority));

    let mut optimized = Vec::new();
    while !pool.is_empty() {
        let mut current = pool.remove(0);
        loop {
            let mut absorbed_any = false;
            let mut i = 0;
            while i < pool.len() {
                if can_merge(&current, &pool[i], adjacency_tolerance) {
                    let other = pool.remove(i);
                    current = absorb(current, other);
                    absorbed_any = true;
                } else {
                    i += 1;
                }
            }
            if !absorbed_any {
                break;
            }
        }
        optimized.push(current);
    }

    optimized
}

fn deduplicate(candidates: Vec<Corridor>) -> Vec<Corridor> {
    let mut kept: Vec<Corridor> = Vec::new();
    let mut index: HashMap<(Orientation, i64, i64, i64, i64), usize> = HashMap::new();

    for candidate in candidates {
        let key = (
            candidate.orientation,
            (candidate.x * DEDUP_SCALE).round() as i64,
            (candidate.y * DEDUP_SCALE).round() as i64,
            (candidate.width * DEDUP_SCALE).round() as i64,
            (candidate.height * DEDUP_SCALE).round() as i64,
        );
        match index.get(&key) {
            Some(&slot) => {
                if candidate.priority > kept[slot].priority {
                    kept[slot] = candidate;
                }
            }
            None => {
                index.insert(key, kept.len());
                kept.push(candidate);
            }
        }
    }

    kept
}

/// Same-orientation candidates merge when their boxes overlap or their
/// parallel edges sit within the adjacency tolerance.
fn can_merge(a: &Corridor, b: &Corridor, tolerance: f64) -> bool {
    a.orientation == b.orientation && a.bounds().expanded(tolerance).intersects(&b.bounds())
}

/// Build the expanded corridor covering both inputs. Priority is the max
/// of the merged priorities; provenance lands in `merged_from`.
fn absorb(current: Corridor, other: Corridor) -> Corridor {
    let bounds = current.bounds().union(&other.bounds());
    let mut connects = current.connects;
    for c in other.connects {
        if !connects.contains(&c) {
            connects.push(c);
        }
    }
    let mut merged_from = current.merged_from;
    merged_from.push(other.id);
    merged_from.extend(other.merged_from);

    Corridor {
        merged_from,
        ..Corridor::from_bounds(
            current.id,
            current.orientation,
            bounds,
            current.priority.max(other.priority),
            connects,
        )
    }
}

/// Cross-orientation conflict resolution: sort everything by descending
/// priority (stable, so ties break by input order) and keep a corridor
/// only if it does not overlap anything already kept.
pub fn resolve_conflicts(horizontal: Vec<Corridor>, vertical: Vec<Corridor>) -> Vec<Corridor> {
    let mut all: Vec<Corridor> = horizontal.into_iter().chain(vertical).collect();
    all.sort_by(|a, b| b.priority.total_cmp(&a.priority));

    let mut kept: Vec<Corridor> = Vec::new();
    for candidate in all {
        let boxed = candidate.bounds();
        if kept.iter().all(|k| !k.bounds().intersects(&boxed)) {
            kept.push(candidate);
        }
    }
    kept
}

/// Partition candidates into (valid, invalid).
///
/// A corridor is invalid when its box intersects any forbidden-zone or
/// entrance bounding region, or when it covers more of an ilot than
/// `1 - overlap_tolerance` allows. Zone checks are box-vs-zone-box, which
/// mirrors the upstream CAD stage's own approximation.
pub fn validate(
    candidates: Vec<Corridor>,
    plan: &FloorPlanContext,
    ilots: &[Ilot],
    overlap_tolerance: f64,
) -> (Vec<Corridor>, Vec<Corridor>) {
    let zone_boxes: Vec<BoundingBox> = plan
        .forbidden_zones
        .iter()
        .chain(plan.entrances.iter())
        .filter_map(|polygon| polygon.bounds())
        .filter(|b| !b.is_degenerate())
        .collect();
    let max_cut = 1.0 - overlap_tolerance;

    let mut valid = Vec::new();
    let mut invalid = Vec::new();
    for candidate in candidates {
        let boxed = candidate.bounds();
        let hits_zone = zone_boxes.iter().any(|z| z.intersects(&boxed));
        let cuts_ilot = ilots.iter().any(|ilot| {
            if ilot.is_degenerate() {
                return false;
            }
            let cut = boxed.intersection_area(&ilot.bounds()) / ilot.area();
            cut > max_cut
        });

        if hits_zone || cuts_ilot {
            invalid.push(candidate);
        } else {
            valid.push(candidate);
        }
    }
    (valid, invalid)
}

/// Run the full synthesis pipeline over one floor plan.
///
/// Degenerate inputs never abort the run: each stage degrades to an empty
/// result and the caller gets a well-formed (if empty) `SynthesisResult`.
pub fn generate(
    ilots: &[Ilot],
    plan: &FloorPlanContext,
    config: &CorridorConfig,
) -> SynthesisResult {
    let usable = ilots.iter().filter(|i| !i.is_degenerate()).count();
    if usable < ilots.len() {
        log::warn!(
            "skipping {} degenerate ilots out of {}",
            ilots.len() - usable,
            ilots.len()
        );
    }

    let horizontal = if config.generate_horizontal {
        optimize(generate_horizontal(ilots, config), config.adjacency_tolerance)
    } else {
        Vec::new()
    };
    let vertical = if config.generate_vertical {
        optimize(generate_vertical(ilots, config), config.adjacency_tolerance)
    } else {
        Vec::new()
    };
    log::debug!(
        "optimized candidates: {} horizontal, {} vertical",
        horizontal.len(),
        vertical.len()
    );

    let statistics_base = Statistics {
        horizontal_count: horizontal.len(),
        vertical_count: vertical.len(),
        horizontal_area: horizontal.iter().map(|c| c.area).sum(),
        vertical_area: vertical.iter().map(|c| c.area).sum(),
        ..Default::default()
    };
    let optimized_total = horizontal.len() + vertical.len();

    let resolved = resolve_conflicts(horizontal, vertical);
    let removed = optimized_total - resolved.len();
    log::debug!("conflict resolution removed {} candidates", removed);

    let (corridors, invalid) = validate(resolved, plan, ilots, config.overlap_tolerance);
    log::debug!(
        "validation kept {} corridors, rejected {}",
        corridors.len(),
        invalid.len()
    );

    let statistics = Statistics {
        final_count: corridors.len(),
        removed_due_to_conflicts: removed,
        total_area: corridors.iter().map(|c| c.area).sum(),
        ..statistics_base
    };

    SynthesisResult {
        corridors,
        invalid,
        statistics,
    }
}

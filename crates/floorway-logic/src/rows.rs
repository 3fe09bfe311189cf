//! Row and facing-pair detection over placed ilots.
//!
//! First stage of corridor synthesis. Ilots are clustered into horizontal
//! rows with a single Y-sorted sweep, then every unordered row pair is
//! scored for whether the two rows plausibly face each other across a
//! walkable aisle. The best-scoring pairs drive horizontal corridor
//! generation downstream.
//!
//! Rows and pairs are transient value types rebuilt on every invocation;
//! they reference ilots by index, never by pointer.

use crate::config::CorridorConfig;
use crate::geometry::{BoundingBox, EPSILON};
use crate::plan::Ilot;

/// Weighted quality-score components for a facing pair. Fixed design
/// constants; they must sum to 1.
const WEIGHT_DISTANCE: f64 = 0.35;
const WEIGHT_OVERLAP: f64 = 0.35;
const WEIGHT_ALIGNMENT: f64 = 0.20;
const WEIGHT_DENSITY: f64 = 0.10;

/// A horizontal cluster of ilots whose vertical centers sit within the
/// configured tolerance of the cluster's running average.
#[derive(Debug, Clone)]
pub struct Row {
    /// Member indices into the ilot slice, sorted by center X.
    pub members: Vec<usize>,
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    /// Running average of member center-Y values.
    pub avg_y: f64,
    /// Members per meter of row width.
    pub density: f64,
    /// Inverse variance of member center-Y values, in (0, 1].
    pub alignment: f64,
}

impl Row {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center_x(&self) -> f64 {
        (self.min_x + self.max_x) / 2.0
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Two rows judged to face each other across a walkable gap.
#[derive(Debug, Clone)]
pub struct FacingPair {
    /// Row index with the smaller average Y.
    pub lower: usize,
    /// Row index with the larger average Y.
    pub upper: usize,
    /// Mean of center-to-center distance and edge gap.
    pub distance: f64,
    /// X-span intersection width over the wider row's width.
    pub overlap_ratio: f64,
    /// Composite quality in [0, 1]. Higher is a better aisle.
    pub quality: f64,
}

/// Recommended corridor region for one facing pair.
#[derive(Debug, Clone)]
pub struct CorridorRecommendation {
    pub bounds: BoundingBox,
    /// Equal to the pair's quality score.
    pub priority: f64,
    /// (lower, upper) row indices for traceability.
    pub rows: (usize, usize),
    /// Total member count across both rows.
    pub ilot_count: usize,
}

/// Cluster ilots into horizontal rows with one Y-ascending sweep.
///
/// Degenerate ilots are skipped. Every usable ilot lands in exactly one
/// row: the sweep either absorbs it into the running row or closes that
/// row and starts a new one.
pub fn group_into_rows(ilots: &[Ilot], config: &CorridorConfig) -> Vec<Row> {
    let mut order: Vec<usize> = (0..ilots.len())
        .filter(|&i| !ilots[i].is_degenerate())
        .collect();
    order.sort_by(|&a, &b| ilots[a].center_y().total_cmp(&ilots[b].center_y()));

    let mut rows = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut running_sum = 0.0;

    for idx in order {
        let cy = ilots[idx].center_y();
        if current.is_empty() {
            current.push(idx);
            running_sum = cy;
            continue;
        }
        let running_avg = running_sum / current.len() as f64;
        if (cy - running_avg).abs() <= config.row_tolerance {
            current.push(idx);
            running_sum += cy;
        } else {
            rows.push(finalize_row(ilots, std::mem::take(&mut current)));
            current.push(idx);
            running_sum = cy;
        }
    }
    if !current.is_empty() {
        rows.push(finalize_row(ilots, current));
    }

    rows
}

fn finalize_row(ilots: &[Ilot], mut members: Vec<usize>) -> Row {
    members.sort_by(|&a, &b| ilots[a].center_x().total_cmp(&ilots[b].center_x()));

    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    let mut sum_cy = 0.0;
    for &i in &members {
        let b = ilots[i].bounds();
        min_x = min_x.min(b.min_x);
        max_x = max_x.max(b.max_x);
        min_y = min_y.min(b.min_y);
        max_y = max_y.max(b.max_y);
        sum_cy += ilots[i].center_y();
    }

    let count = members.len() as f64;
    let avg_y = sum_cy / count;
    let variance = members
        .iter()
        .map(|&i| {
            let d = ilots[i].center_y() - avg_y;
            d * d
        })
        .sum::<f64>()
        / count;

    let width = max_x - min_x;
    let density = if width > EPSILON { count / width } else { count };

    Row {
        members,
        min_x,
        max_x,
        min_y,
        max_y,
        avg_y,
        density,
        alignment: 1.0 / (1.0 + variance),
    }
}

/// Score every unordered row pair and keep the ones that face each other.
/// The result is sorted by descending quality (stable), so downstream
/// greedy logic naturally favors the best aisles.
pub fn find_facing_pairs(rows: &[Row], config: &CorridorConfig) -> Vec<FacingPair> {
    let mut pairs = Vec::new();

    for i in 0..rows.len() {
        for j in (i + 1)..rows.len() {
            let (lower, upper) = if rows[i].avg_y <= rows[j].avg_y {
                (i, j)
            } else {
                (j, i)
            };
            let (lo, hi) = (&rows[lower], &rows[upper]);

            let center_distance = hi.avg_y - lo.avg_y;
            let edge_gap = (hi.min_y - lo.max_y).max(0.0);
            let distance = (center_distance + edge_gap) / 2.0;

            let overlap = lo.max_x.min(hi.max_x) - lo.min_x.max(hi.min_x);
            let wider = lo.width().max(hi.width());
            let overlap_ratio = if wider > EPSILON {
                (overlap / wider).max(0.0)
            } else {
                0.0
            };

            let facing = distance >= config.min_row_distance
                && distance <= config.max_row_distance
                && overlap_ratio >= config.min_overlap;
            if !facing {
                continue;
            }

            let quality = WEIGHT_DISTANCE * distance_score(distance, config)
                + WEIGHT_OVERLAP * overlap_ratio
                + WEIGHT_ALIGNMENT * (lo.alignment + hi.alignment) / 2.0
                + WEIGHT_DENSITY * density_balance(lo.density, hi.density);

            pairs.push(FacingPair {
                lower,
                upper,
                distance,
                overlap_ratio,
                quality,
            });
        }
    }

    pairs.sort_by(|a, b| b.quality.total_cmp(&a.quality));
    pairs
}

/// Peaks at the midpoint of the allowed distance band and decays linearly
/// with deviation, clamped at zero.
fn distance_score(distance: f64, config: &CorridorConfig) -> f64 {
    let half_band = (config.max_row_distance - config.min_row_distance) / 2.0;
    if half_band <= EPSILON {
        return 1.0;
    }
    let midpoint = (config.min_row_distance + config.max_row_distance) / 2.0;
    (1.0 - (distance - midpoint).abs() / half_band).max(0.0)
}

/// Rewards similar unit density on both sides of the aisle. Two rows that
/// are both widthless degenerate the same way and score 1.
fn density_balance(a: f64, b: f64) -> f64 {
    let max = a.max(b);
    if max > EPSILON {
        a.min(b) / max
    } else {
        1.0
    }
}

/// Turn facing pairs into recommended corridor regions.
///
/// The candidate thickness is clamped to 80% of the available gap height
/// (never exceeding the requested width) and centered in the gap. Pairs
/// whose rows overlap vertically, or whose X-spans barely touch, yield
/// nothing.
pub fn corridor_recommendations(
    rows: &[Row],
    pairs: &[FacingPair],
    corridor_width: f64,
) -> Vec<CorridorRecommendation> {
    let mut recommendations = Vec::new();

    for pair in pairs {
        let lo = &rows[pair.lower];
        let hi = &rows[pair.upper];

        let gap_start = lo.max_y;
        let gap_end = hi.min_y;
        let gap_height = gap_end - gap_start;
        if gap_height <= EPSILON {
            continue;
        }

        let x0 = lo.min_x.max(hi.min_x);
        let x1 = lo.max_x.min(hi.max_x);
        if x1 - x0 <= EPSILON {
            continue;
        }

        let thickness = corridor_width.min(0.8 * gap_height);
        if thickness <= EPSILON {
            continue;
        }
        let center_y = (gap_start + gap_end) / 2.0;

        recommendations.push(CorridorRecommendation {
            bounds: BoundingBox::from_rect(x0, center_y - thickness / 2.0, x1 - x0, thickness),
            priority: pair.quality,
            rows: (pair.lower, pair.upper),
            ilot_count: lo.len() + hi.len(),
        });
    }

    recommendations
}

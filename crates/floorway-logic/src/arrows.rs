//! Directional circulation markers along finished corridors.
//!
//! Downstream presentation data: reads the final corridor list plus
//! entrance context and places arrow markers along each corridor's
//! centerline at a fixed spacing, in opposing pairs so renderers can show
//! two-way flow. Nothing here feeds back into synthesis.

use crate::corridors::{Corridor, Orientation};
use crate::geometry::{Point, EPSILON};
use crate::plan::FloorPlanContext;
use serde::{Deserialize, Serialize};

/// Default centerline spacing between markers, in meters.
pub const DEFAULT_SPACING: f64 = 4.0;

/// Minimum markers per corridor regardless of length.
const MIN_MARKERS: usize = 3;

/// Lateral offset between the two opposing markers of a pair.
const PAIR_OFFSET: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrowDirection {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrowKind {
    /// Two-way traffic along a corridor centerline.
    Circulation,
    /// Flow from an entrance toward the nearest corridor.
    EntranceFlow,
}

/// One directional marker in floor-plan coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arrow {
    pub position: Point,
    pub direction: ArrowDirection,
    pub kind: ArrowKind,
}

/// Markers along every corridor centerline: one pair per `spacing`
/// meters of corridor length, at least [`MIN_MARKERS`] pairs each.
pub fn corridor_markers(corridors: &[Corridor], spacing: f64) -> Vec<Arrow> {
    if spacing <= 0.0 {
        return Vec::new();
    }

    let mut arrows = Vec::new();
    for corridor in corridors {
        let center = corridor.bounds().center();
        match corridor.orientation {
            Orientation::Horizontal => {
                let count = MIN_MARKERS.max((corridor.width / spacing) as usize);
                for i in 0..count {
                    let x = corridor.x + corridor.width * (i as f64 + 0.5) / count as f64;
                    arrows.push(Arrow {
                        position: Point::new(x, center.y),
                        direction: ArrowDirection::Right,
                        kind: ArrowKind::Circulation,
                    });
                    arrows.push(Arrow {
                        position: Point::new(x, center.y + PAIR_OFFSET),
                        direction: ArrowDirection::Left,
                        kind: ArrowKind::Circulation,
                    });
                }
            }
            Orientation::Vertical => {
                let count = MIN_MARKERS.max((corridor.height / spacing) as usize);
                for i in 0..count {
                    let y = corridor.y + corridor.height * (i as f64 + 0.5) / count as f64;
                    arrows.push(Arrow {
                        position: Point::new(center.x, y),
                        direction: ArrowDirection::Up,
                        kind: ArrowKind::Circulation,
                    });
                    arrows.push(Arrow {
                        position: Point::new(center.x + PAIR_OFFSET, y),
                        direction: ArrowDirection::Down,
                        kind: ArrowKind::Circulation,
                    });
                }
            }
        }
    }
    arrows
}

/// Flow markers from each entrance toward the nearest corridor center,
/// one every `spacing` meters along the straight connecting segment.
/// Entrances without usable geometry, or plans without corridors, yield
/// nothing.
pub fn entrance_flow(
    plan: &FloorPlanContext,
    corridors: &[Corridor],
    spacing: f64,
) -> Vec<Arrow> {
    if spacing <= 0.0 || corridors.is_empty() {
        return Vec::new();
    }

    let mut arrows = Vec::new();
    for entrance in &plan.entrances {
        let Some(from) = entrance.centroid() else {
            continue;
        };
        let Some(target) = nearest_corridor_center(&from, corridors) else {
            continue;
        };

        let distance = from.distance_to(&target);
        if distance <= EPSILON {
            continue;
        }
        let (dx, dy) = ((target.x - from.x) / distance, (target.y - from.y) / distance);
        let direction = if dx.abs() > dy.abs() {
            if dx > 0.0 {
                ArrowDirection::Right
            } else {
                ArrowDirection::Left
            }
        } else if dy > 0.0 {
            ArrowDirection::Up
        } else {
            ArrowDirection::Down
        };

        let count = 2usize.max((distance / spacing) as usize);
        for i in 0..count {
            let t = distance * (i as f64 + 0.5) / count as f64;
            arrows.push(Arrow {
                position: Point::new(from.x + dx * t, from.y + dy * t),
                direction,
                kind: ArrowKind::EntranceFlow,
            });
        }
    }
    arrows
}

pub(crate) fn nearest_corridor_center(point: &Point, corridors: &[Corridor]) -> Option<Point> {
    corridors
        .iter()
        .map(|c| c.bounds().center())
        .min_by(|a, b| point.distance_to(a).total_cmp(&point.distance_to(b)))
}

//! Entrance access connectors.
//!
//! Optional post-pass: links each entrance center to the nearest corridor
//! with a straight axis-aligned connector. Connectors join the network
//! they point at, so they are exempt from the synthesized set's
//! no-overlap invariant and are returned separately rather than folded
//! into `generate()`.

use crate::arrows::nearest_corridor_center;
use crate::corridors::{Corridor, Orientation};
use crate::geometry::{BoundingBox, Polygon};
use crate::plan::FloorPlanContext;

/// One connector per entrance with usable geometry, oriented along the
/// dominant axis between the entrance center and the nearest corridor
/// center. Thickness is `corridor_width`; priority is zero (connectors
/// never compete for space).
pub fn access_connectors(
    plan: &FloorPlanContext,
    corridors: &[Corridor],
    corridor_width: f64,
) -> Vec<Corridor> {
    if corridors.is_empty() || corridor_width <= 0.0 {
        return Vec::new();
    }

    let mut connectors = Vec::new();
    for (entrance_idx, entrance) in plan.entrances.iter().enumerate() {
        let Some(from) = entrance.centroid() else {
            continue;
        };
        let Some(target) = nearest_corridor_center(&from, corridors) else {
            continue;
        };

        let dx = (target.x - from.x).abs();
        let dy = (target.y - from.y).abs();
        if dx.max(dy) <= corridor_width {
            continue; // entrance already sits on the network
        }

        let (bounds, orientation) = if dx > dy {
            (
                BoundingBox::from_rect(
                    from.x.min(target.x),
                    from.y - corridor_width / 2.0,
                    dx,
                    corridor_width,
                ),
                Orientation::Horizontal,
            )
        } else {
            (
                BoundingBox::from_rect(
                    from.x - corridor_width / 2.0,
                    from.y.min(target.y),
                    corridor_width,
                    dy,
                ),
                Orientation::Vertical,
            )
        };

        connectors.push(connector(
            format!("access_corridor_{}", connectors.len()),
            orientation,
            bounds,
            entrance_idx,
        ));
    }
    connectors
}

fn connector(
    id: String,
    orientation: Orientation,
    bounds: BoundingBox,
    entrance_idx: usize,
) -> Corridor {
    Corridor {
        id,
        orientation,
        polygon: Polygon::rect(
            bounds.min_x,
            bounds.min_y,
            bounds.width(),
            bounds.height(),
        ),
        x: bounds.min_x,
        y: bounds.min_y,
        width: bounds.width(),
        height: bounds.height(),
        area: bounds.area(),
        priority: 0.0,
        connects: vec![entrance_idx],
        merged_from: Vec::new(),
    }
}

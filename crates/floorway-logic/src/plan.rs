//! Boundary data model consumed from the upstream placement and CAD stages.
//!
//! These types mirror the JSON the host hands over. They are read-only
//! inputs: the pipeline never repairs or mutates them, it only skips
//! entries it cannot use. Missing context fields deserialize to empty
//! collections rather than errors.

use crate::geometry::{BoundingBox, Point, Polygon};
use serde::{Deserialize, Serialize};

/// A placed rectangular workspace unit, owned by the upstream placement
/// stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ilot {
    /// Opaque identifier assigned upstream.
    #[serde(default)]
    pub id: String,
    /// Opaque unit type (e.g. "desk", "meeting"); never interpreted here.
    #[serde(default)]
    pub kind: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Ilot {
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_rect(self.x, self.y, self.width, self.height)
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Units with non-finite coordinates or non-positive dimensions are
    /// skipped at every stage rather than rejected with an error.
    pub fn is_degenerate(&self) -> bool {
        !(self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }
}

/// A wall segment from the CAD ingestion stage. Carried for context;
/// corridor validation works on zone and entrance boxes only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wall {
    pub start: Point,
    pub end: Point,
}

/// Architectural context consumed only for validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FloorPlanContext {
    #[serde(default)]
    pub bounds: Option<BoundingBox>,
    #[serde(default)]
    pub walls: Vec<Wall>,
    #[serde(default)]
    pub forbidden_zones: Vec<Polygon>,
    #[serde(default)]
    pub entrances: Vec<Polygon>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ilot_derived_attributes() {
        let ilot = Ilot {
            id: "ilot_0".into(),
            kind: "desk".into(),
            x: 2.0,
            y: 3.0,
            width: 4.0,
            height: 2.0,
        };
        assert_eq!(ilot.area(), 8.0);
        assert_eq!(ilot.center_x(), 4.0);
        assert_eq!(ilot.center_y(), 4.0);
        assert!(!ilot.is_degenerate());
    }

    #[test]
    fn zero_and_nan_ilots_are_degenerate() {
        let zero = Ilot {
            id: String::new(),
            kind: String::new(),
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 2.0,
        };
        assert!(zero.is_degenerate());

        let nan = Ilot {
            id: String::new(),
            kind: String::new(),
            x: f64::NAN,
            y: 0.0,
            width: 1.0,
            height: 1.0,
        };
        assert!(nan.is_degenerate());
    }

    #[test]
    fn context_fields_default_to_empty() {
        let ctx: FloorPlanContext = serde_json::from_str("{}").unwrap();
        assert!(ctx.bounds.is_none());
        assert!(ctx.walls.is_empty());
        assert!(ctx.forbidden_zones.is_empty());
        assert!(ctx.entrances.is_empty());
    }

    #[test]
    fn context_parses_upstream_shape() {
        let json = r#"{
            "bounds": {"minX": 0.0, "minY": 0.0, "maxX": 40.0, "maxY": 30.0},
            "walls": [{"start": {"x": 0.0, "y": 0.0}, "end": {"x": 40.0, "y": 0.0}}],
            "forbidden_zones": [[{"x": 1.0, "y": 1.0}, {"x": 3.0, "y": 1.0}, {"x": 3.0, "y": 4.0}, {"x": 1.0, "y": 4.0}]],
            "entrances": []
        }"#;
        let ctx: FloorPlanContext = serde_json::from_str(json).unwrap();
        assert_eq!(ctx.walls.len(), 1);
        assert_eq!(ctx.forbidden_zones.len(), 1);
        let zone = ctx.forbidden_zones[0].bounds().unwrap();
        assert_eq!(zone.max_y, 4.0);
    }
}

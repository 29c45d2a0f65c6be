//! The floor-plan document: points, walls and the persisted room list.

use crate::error::{Result, TopologyError};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A coordinate on the plan plane. `z` is the second plan axis, matching the
/// render convention where `y` points up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanCoord {
    pub x: f64,
    pub z: f64,
}

impl PlanCoord {
    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.z.is_finite()
    }

    pub fn distance_to(&self, other: &PlanCoord) -> f64 {
        (self.x - other.x).hypot(self.z - other.z)
    }
}

/// Exact-coordinate lookup key. No rounding: two points are the same point
/// only if both coordinates compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointKey {
    x: OrderedFloat<f64>,
    z: OrderedFloat<f64>,
}

impl From<&PlanCoord> for PointKey {
    fn from(coord: &PlanCoord) -> Self {
        PointKey {
            x: OrderedFloat(coord.x),
            z: OrderedFloat(coord.z),
        }
    }
}

impl From<&Point> for PointKey {
    fn from(point: &Point) -> Self {
        PointKey::from(&point.coord())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Point {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub x: f64,
    pub z: f64,
    #[serde(default)]
    pub selected: bool,
}

impl Point {
    pub fn new(x: f64, z: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            x,
            z,
            selected: false,
        }
    }

    pub fn coord(&self) -> PlanCoord {
        PlanCoord { x: self.x, z: self.z }
    }
}

/// A wall segment between two points, referenced by coordinate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wall {
    pub from: PlanCoord,
    pub to: PlanCoord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
    /// Handle of the rendered wall, refreshed on every walls rebuild.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh: Option<Uuid>,
}

impl Wall {
    pub fn new(from: PlanCoord, to: PlanCoord) -> Self {
        Self {
            from,
            to,
            texture: None,
            mesh: None,
        }
    }

    pub fn length(&self) -> f64 {
        self.from.distance_to(&self.to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A persisted room. `center` is the plan-projected identity key produced by
/// the containment filter; `id` stays stable for as long as the centre does.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub center: Vec3,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh: Option<Uuid>,
    pub texture: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FloorPlan {
    #[serde(default)]
    pub points: Vec<Point>,
    #[serde(default)]
    pub walls: Vec<Wall>,
    #[serde(default)]
    pub rooms: Vec<Room>,
}

impl FloorPlan {
    /// Map every point coordinate to its index in `points`.
    pub fn point_index(&self) -> Result<HashMap<PointKey, usize>> {
        index_points(&self.points)
    }

    /// Check the invariants every derivation relies on: finite coordinates,
    /// unique points, and wall endpoints that resolve to a point.
    pub fn validate(&self) -> Result<()> {
        for (i, point) in self.points.iter().enumerate() {
            if !point.coord().is_finite() {
                return Err(TopologyError::NonFiniteCoordinate {
                    owner: format!("point {}", i),
                });
            }
        }

        for (i, wall) in self.walls.iter().enumerate() {
            if !wall.from.is_finite() || !wall.to.is_finite() {
                return Err(TopologyError::NonFiniteCoordinate {
                    owner: format!("wall {}", i),
                });
            }
        }

        let index = self.point_index()?;
        for (i, wall) in self.walls.iter().enumerate() {
            resolve_endpoint(&index, i, &wall.from)?;
            resolve_endpoint(&index, i, &wall.to)?;
        }

        Ok(())
    }
}

/// Map point coordinates to positions in `points`; duplicate coordinates make
/// the lookup ambiguous and are rejected.
pub fn index_points(points: &[Point]) -> Result<HashMap<PointKey, usize>> {
    let mut index = HashMap::with_capacity(points.len());

    for (i, point) in points.iter().enumerate() {
        if let Some(&first) = index.get(&PointKey::from(point)) {
            return Err(TopologyError::DuplicatePoint {
                first,
                second: i,
                x: point.x,
                z: point.z,
            });
        }
        index.insert(PointKey::from(point), i);
    }

    Ok(index)
}

/// Look up the point index behind a wall endpoint.
pub(crate) fn resolve_endpoint(
    index: &HashMap<PointKey, usize>,
    wall: usize,
    coord: &PlanCoord,
) -> Result<usize> {
    index
        .get(&PointKey::from(coord))
        .copied()
        .ok_or(TopologyError::DanglingWall {
            wall,
            x: coord.x,
            z: coord.z,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_plan() -> FloorPlan {
        let corners = [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)];
        FloorPlan {
            points: corners.iter().map(|&(x, z)| Point::new(x, z)).collect(),
            walls: (0..4)
                .map(|i| {
                    let (ax, az) = corners[i];
                    let (bx, bz) = corners[(i + 1) % 4];
                    Wall::new(PlanCoord::new(ax, az), PlanCoord::new(bx, bz))
                })
                .collect(),
            rooms: vec![],
        }
    }

    #[test]
    fn test_document_without_ids_deserializes() {
        let json = r#"{
            "points": [{"x": 0, "z": 0, "selected": true}, {"x": 1, "z": 0}],
            "walls": [{"from": {"x": 0, "z": 0}, "to": {"x": 1, "z": 0}, "texture": "brick"}]
        }"#;

        let plan: FloorPlan = serde_json::from_str(json).unwrap();

        assert_eq!(plan.points.len(), 2);
        assert!(plan.points[0].selected);
        assert!(!plan.points[1].selected);
        assert_ne!(plan.points[0].id, plan.points[1].id);
        assert_eq!(plan.walls[0].texture.as_deref(), Some("brick"));
        assert!(plan.rooms.is_empty());
    }

    #[test]
    fn test_validate_accepts_consistent_plan() {
        assert!(square_plan().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_dangling_wall() {
        let mut plan = square_plan();
        plan.walls
            .push(Wall::new(PlanCoord::new(0.0, 0.0), PlanCoord::new(9.0, 9.0)));

        assert_eq!(
            plan.validate(),
            Err(TopologyError::DanglingWall {
                wall: 4,
                x: 9.0,
                z: 9.0
            })
        );
    }

    #[test]
    fn test_validate_rejects_duplicate_point() {
        let mut plan = square_plan();
        plan.points.push(Point::new(4.0, 4.0));

        assert!(matches!(
            plan.validate(),
            Err(TopologyError::DuplicatePoint {
                first: 2,
                second: 4,
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_nan() {
        let mut plan = square_plan();
        plan.points[1].x = f64::NAN;

        assert!(matches!(
            plan.validate(),
            Err(TopologyError::NonFiniteCoordinate { .. })
        ));
    }

    #[test]
    fn test_negative_zero_matches_zero() {
        let index = square_plan().point_index().unwrap();

        assert_eq!(index.get(&PointKey::from(&PlanCoord::new(-0.0, 0.0))), Some(&0));
    }
}

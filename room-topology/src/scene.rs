//! Render-facing records derived from a plan.
//!
//! Nothing here draws anything. Each record carries what a renderer needs to
//! build its object plus the mesh handle that was written back to the plan.

use crate::config::TopologyConfig;
use crate::containment::{filter_nested, RoomCandidate};
use crate::cycle_finder::find_cycles;
use crate::cycle_reducer::reduce_cycles;
use crate::error::Result;
use crate::graph_builder::build_graph;
use crate::plan::{index_points, resolve_endpoint, FloorPlan, PlanCoord, Vec3};
use crate::reconciler::{reconcile_rooms, ReconcileReport};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

/// Skirting boards are this fraction of the wall height.
const SKIRTING_HEIGHT_RATIO: f64 = 1.0 / 20.0;
/// Skirting boards stand this much proud of the wall depth.
const SKIRTING_DEPTH_RATIO: f64 = 1.2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloorSurface {
    pub room_id: Uuid,
    pub mesh: Uuid,
    pub texture: String,
    pub outline: Vec<PlanCoord>,
    pub center: Vec3,
    pub area: f64,
    pub extrusion_depth: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FloorGroup {
    pub surfaces: Vec<FloorSurface>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CenterMarker {
    pub position: Vec3,
    pub radius: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CenterMarkers {
    pub markers: Vec<CenterMarker>,
}

/// Result of one room recomputation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomTopology {
    pub floor: FloorGroup,
    pub centers: CenterMarkers,
    pub report: ReconcileReport,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WallModel {
    pub mesh: Option<Uuid>,
    pub texture: Option<String>,
    pub length: f64,
    pub position: Vec3,
    /// Rotation about the vertical axis, in radians.
    pub rotation_y: f64,
    pub height: f64,
    pub depth: f64,
}

/// Cylinder placed at every point so wall joints look closed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnModel {
    pub position: Vec3,
    pub radius: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WallsGroup {
    pub skirting: bool,
    pub walls: Vec<WallModel>,
    pub columns: Vec<ColumnModel>,
}

/// Run graph building, cycle enumeration, reduction and containment
/// filtering. Leaves the plan untouched.
pub fn derive_rooms(plan: &FloorPlan, config: &TopologyConfig) -> Result<Vec<RoomCandidate>> {
    plan.validate()?;

    let graph = build_graph(&plan.points, &plan.walls)?;
    let cycles = find_cycles(&graph, config)?;
    let candidates = reduce_cycles(cycles);

    Ok(filter_nested(&plan.points, candidates, config))
}

/// Recompute the rooms of `plan` and reconcile `plan.rooms` with them.
///
/// On error the plan is left as it was. On success the caller is expected to
/// persist the plan.
pub fn create_floor_model(plan: &mut FloorPlan, config: &TopologyConfig) -> Result<RoomTopology> {
    let rooms = derive_rooms(plan, config)?;
    let reconciliation = reconcile_rooms(&mut plan.rooms, &rooms, &config.default_floor_texture);

    let mut floor = FloorGroup::default();
    let mut centers = CenterMarkers::default();

    for (room, assignment) in rooms.into_iter().zip(reconciliation.assignments) {
        centers.markers.push(CenterMarker {
            position: room.marker_position(),
            radius: config.marker_radius,
        });
        floor.surfaces.push(FloorSurface {
            room_id: assignment.room_id,
            mesh: assignment.mesh,
            texture: assignment.texture,
            outline: room.outline,
            center: room.center,
            area: room.area,
            extrusion_depth: config.floor_depth,
        });
    }

    info!("Floor model has {} rooms", floor.surfaces.len());

    Ok(RoomTopology {
        floor,
        centers,
        report: reconciliation.report,
    })
}

/// Build wall boxes and joint columns for every wall and point.
///
/// The regular pass gives each untextured wall the default wall texture and
/// writes a fresh mesh handle to every wall. The skirting pass only reads.
pub fn create_walls_model(
    plan: &mut FloorPlan,
    skirting: bool,
    config: &TopologyConfig,
) -> Result<WallsGroup> {
    plan.validate()?;
    let index = index_points(&plan.points)?;

    let (height, depth) = if skirting {
        (
            config.wall_height * SKIRTING_HEIGHT_RATIO,
            config.wall_depth * SKIRTING_DEPTH_RATIO,
        )
    } else {
        (config.wall_height, config.wall_depth)
    };

    let mut group = WallsGroup {
        skirting,
        ..WallsGroup::default()
    };

    for (i, wall) in plan.walls.iter_mut().enumerate() {
        let start = plan.points[resolve_endpoint(&index, i, &wall.from)?].coord();
        let end = plan.points[resolve_endpoint(&index, i, &wall.to)?].coord();
        let offset_x = start.x - end.x;
        let offset_z = start.z - end.z;
        // A zero-length wall has no direction; leave it unrotated.
        let rotation_y = if offset_x == 0.0 && offset_z == 0.0 {
            0.0
        } else {
            -(offset_z / offset_x).atan()
        };

        let (mesh, texture) = if skirting {
            (None, None)
        } else {
            let mesh = Uuid::new_v4();
            let texture = wall
                .texture
                .get_or_insert_with(|| config.default_wall_texture.clone())
                .clone();
            wall.mesh = Some(mesh);
            (Some(mesh), Some(texture))
        };

        group.walls.push(WallModel {
            mesh,
            texture,
            length: wall.length(),
            position: Vec3::new(end.x + offset_x / 2.0, height / 2.0, end.z + offset_z / 2.0),
            rotation_y,
            height,
            depth,
        });
    }

    group.columns = plan
        .points
        .iter()
        .map(|point| ColumnModel {
            position: Vec3::new(point.x, height / 2.0, point.z),
            radius: depth / 2.0,
            height,
        })
        .collect();

    Ok(group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TopologyError;
    use crate::plan::{Point, Wall};

    fn rectangle(width: f64, depth: f64) -> FloorPlan {
        let corners = [(0.0, 0.0), (width, 0.0), (width, depth), (0.0, depth)];
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
    fn test_floor_model_for_single_room() {
        let mut plan = rectangle(6.0, 4.0);
        let config = TopologyConfig::default();

        let topology = create_floor_model(&mut plan, &config).unwrap();

        assert_eq!(topology.floor.surfaces.len(), 1);
        assert_eq!(topology.centers.markers.len(), 1);
        let surface = &topology.floor.surfaces[0];
        assert_eq!(surface.texture, "wood2");
        assert_eq!(surface.center, Vec3::new(3.0, 2.0, 0.015));
        assert_eq!(surface.area, 24.0);
        assert_eq!(surface.outline.len(), 4);
        assert_eq!(topology.centers.markers[0].position, Vec3::new(3.0, 0.015, 2.0));
        assert_eq!(plan.rooms.len(), 1);
        assert_eq!(plan.rooms[0].id, surface.room_id);
        assert_eq!(plan.rooms[0].mesh, Some(surface.mesh));
    }

    #[test]
    fn test_floor_model_error_leaves_rooms_alone() {
        let mut plan = rectangle(6.0, 4.0);
        let config = TopologyConfig::default();
        create_floor_model(&mut plan, &config).unwrap();
        plan.walls
            .push(Wall::new(PlanCoord::new(0.0, 0.0), PlanCoord::new(-3.0, 0.0)));

        let err = create_floor_model(&mut plan, &config).unwrap_err();

        assert!(matches!(err, TopologyError::DanglingWall { wall: 4, .. }));
        assert_eq!(plan.rooms.len(), 1);
    }

    #[test]
    fn test_open_plan_has_no_rooms() {
        let mut plan = rectangle(6.0, 4.0);
        plan.walls.pop();

        let topology = create_floor_model(&mut plan, &TopologyConfig::default()).unwrap();

        assert!(topology.floor.surfaces.is_empty());
        assert!(topology.centers.markers.is_empty());
    }

    #[test]
    fn test_walls_model_assigns_default_texture() {
        let mut plan = rectangle(6.0, 4.0);
        plan.walls[0].texture = Some("brick".to_string());

        let group = create_walls_model(&mut plan, false, &TopologyConfig::default()).unwrap();

        assert_eq!(group.walls.len(), 4);
        assert_eq!(group.columns.len(), 4);
        assert_eq!(group.walls[0].texture.as_deref(), Some("brick"));
        assert_eq!(group.walls[1].texture.as_deref(), Some("plaster"));
        assert_eq!(plan.walls[1].texture.as_deref(), Some("plaster"));
        for (model, wall) in group.walls.iter().zip(&plan.walls) {
            assert!(model.mesh.is_some());
            assert_eq!(model.mesh, wall.mesh);
        }
    }

    #[test]
    fn test_wall_placement() {
        let mut plan = rectangle(6.0, 4.0);

        let group = create_walls_model(&mut plan, false, &TopologyConfig::default()).unwrap();

        let bottom = &group.walls[0];
        assert_eq!(bottom.length, 6.0);
        assert_eq!(bottom.position, Vec3::new(3.0, 0.65, 0.0));
        assert_eq!(bottom.rotation_y, 0.0);

        let right = &group.walls[1];
        assert_eq!(right.length, 4.0);
        assert_eq!(right.position, Vec3::new(6.0, 0.65, 2.0));
        assert!((right.rotation_y.abs() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_zero_length_wall_is_unrotated() {
        let mut plan = rectangle(6.0, 4.0);
        plan.walls
            .push(Wall::new(PlanCoord::new(6.0, 4.0), PlanCoord::new(6.0, 4.0)));

        let group = create_walls_model(&mut plan, false, &TopologyConfig::default()).unwrap();

        let stub = &group.walls[4];
        assert_eq!(stub.length, 0.0);
        assert_eq!(stub.rotation_y, 0.0);
        assert_eq!(stub.position, Vec3::new(6.0, 0.65, 4.0));
    }

    #[test]
    fn test_skirting_is_read_only() {
        let mut plan = rectangle(6.0, 4.0);

        let group = create_walls_model(&mut plan, true, &TopologyConfig::default()).unwrap();

        assert!(group.skirting);
        assert!(plan.walls.iter().all(|w| w.texture.is_none() && w.mesh.is_none()));
        assert!(group.walls.iter().all(|w| w.mesh.is_none()));
        assert!((group.walls[0].height - 0.065).abs() < 1e-12);
        assert!((group.walls[0].depth - 0.06).abs() < 1e-12);
        assert!((group.columns[0].radius - 0.03).abs() < 1e-12);
    }
}

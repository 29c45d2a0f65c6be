//! Room topology for interactive floor plans.
//!
//! Walls drawn between points form an undirected planar graph. Every enclosed
//! wall loop is a candidate room; redundant and nested loops are discarded and
//! the survivors are reconciled against the rooms persisted in the plan so
//! their appearance survives edits.

pub mod config;
pub mod containment;
pub mod cycle_finder;
pub mod cycle_reducer;
pub mod error;
pub mod graph_builder;
pub mod plan;
pub mod reconciler;
pub mod scene;
pub mod session;

pub use config::TopologyConfig;
pub use containment::{filter_nested, inside, RoomCandidate};
pub use cycle_finder::{find_cycles, Cycle};
pub use cycle_reducer::reduce_cycles;
pub use error::{Result, TopologyError};
pub use graph_builder::{adjacency, build_graph, WallGraph};
pub use plan::{FloorPlan, PlanCoord, Point, PointKey, Room, Vec3, Wall};
pub use reconciler::{reconcile_rooms, ReconcileReport, Reconciliation, RoomAssignment};
pub use scene::{
    create_floor_model, create_walls_model, derive_rooms, CenterMarker, CenterMarkers, ColumnModel,
    FloorGroup, FloorSurface, RoomTopology, WallModel, WallsGroup,
};
pub use session::{PlanSession, SceneModel};

use crate::config::TopologyConfig;
use crate::error::Result;
use crate::plan::FloorPlan;
use crate::scene::{create_floor_model, create_walls_model, RoomTopology, WallsGroup};
use serde::Serialize;
use tracing::info;

/// Everything derived from the plan during the last rebuild.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SceneModel {
    pub floor: Option<RoomTopology>,
    pub skirting: Option<WallsGroup>,
    pub walls: Option<WallsGroup>,
}

/// Owns one floor-plan document and the artifacts derived from it.
///
/// Sessions share nothing, so several plans can be edited side by side. A
/// session must not be recomputed from two places at once; `&mut self` on
/// every derivation enforces that.
#[derive(Debug, Clone, Default)]
pub struct PlanSession {
    plan: FloorPlan,
    config: TopologyConfig,
    scene: SceneModel,
}

impl PlanSession {
    pub fn new(plan: FloorPlan, config: TopologyConfig) -> Self {
        Self {
            plan,
            config,
            scene: SceneModel::default(),
        }
    }

    pub fn plan(&self) -> &FloorPlan {
        &self.plan
    }

    /// Mutable access for editors. Derived artifacts go stale until the next
    /// recompute.
    pub fn plan_mut(&mut self) -> &mut FloorPlan {
        &mut self.plan
    }

    pub fn into_plan(self) -> FloorPlan {
        self.plan
    }

    pub fn scene(&self) -> &SceneModel {
        &self.scene
    }

    /// Re-derive rooms only, after points or walls changed.
    pub fn recompute_rooms(&mut self) -> Result<&RoomTopology> {
        let topology = create_floor_model(&mut self.plan, &self.config)?;
        Ok(&*self.scene.floor.insert(topology))
    }

    /// Re-derive floors, skirting and walls. Either all three are replaced or,
    /// on error, none are.
    pub fn rebuild(&mut self) -> Result<&SceneModel> {
        self.plan.validate()?;

        let floor = create_floor_model(&mut self.plan, &self.config)?;
        let skirting = create_walls_model(&mut self.plan, true, &self.config)?;
        let walls = create_walls_model(&mut self.plan, false, &self.config)?;

        info!(
            "Rebuilt scene: {} rooms, {} walls, {} columns",
            floor.floor.surfaces.len(),
            walls.walls.len(),
            walls.columns.len()
        );

        self.scene = SceneModel {
            floor: Some(floor),
            skirting: Some(skirting),
            walls: Some(walls),
        };
        Ok(&self.scene)
    }
}

use serde::{Deserialize, Serialize};

/// Tunables for room derivation and the scene records built from it.
///
/// Every field has a default so a partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyConfig {
    /// Upper bound on enumerated cycles before the pass is rejected.
    #[serde(default = "default_max_cycles")]
    pub max_cycles: usize,
    /// Extrusion depth of floor slabs. Also fixes the `z` of every room centre.
    #[serde(default = "default_floor_depth")]
    pub floor_depth: f64,
    #[serde(default = "default_wall_height")]
    pub wall_height: f64,
    #[serde(default = "default_wall_depth")]
    pub wall_depth: f64,
    #[serde(default = "default_floor_texture")]
    pub default_floor_texture: String,
    #[serde(default = "default_wall_texture")]
    pub default_wall_texture: String,
    /// Radius of the sphere drawn at each room centre and each point.
    #[serde(default = "default_marker_radius")]
    pub marker_radius: f64,
}

fn default_max_cycles() -> usize {
    10_000
}

fn default_floor_depth() -> f64 {
    0.03
}

fn default_wall_height() -> f64 {
    1.3
}

fn default_wall_depth() -> f64 {
    0.05
}

fn default_floor_texture() -> String {
    "wood2".to_string()
}

fn default_wall_texture() -> String {
    "plaster".to_string()
}

fn default_marker_radius() -> f64 {
    0.06
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            max_cycles: default_max_cycles(),
            floor_depth: default_floor_depth(),
            wall_height: default_wall_height(),
            wall_depth: default_wall_depth(),
            default_floor_texture: default_floor_texture(),
            default_wall_texture: default_wall_texture(),
            marker_radius: default_marker_radius(),
        }
    }
}

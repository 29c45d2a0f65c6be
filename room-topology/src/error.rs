//! Error types for room topology derivation.

/// Result type alias for topology operations.
pub type Result<T> = std::result::Result<T, TopologyError>;

/// Local data-consistency failures. None of these are transient; the caller
/// has to hand in a self-consistent plan.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TopologyError {
    /// A wall endpoint matches no point of the plan.
    #[error("wall {wall} references ({x}, {z}) which matches no point")]
    DanglingWall { wall: usize, x: f64, z: f64 },

    /// Two points share the same coordinates, so lookups are ambiguous.
    #[error("points {first} and {second} share coordinates ({x}, {z})")]
    DuplicatePoint {
        first: usize,
        second: usize,
        x: f64,
        z: f64,
    },

    /// A point or wall endpoint holds NaN or an infinity.
    #[error("{owner} has a non-finite coordinate")]
    NonFiniteCoordinate { owner: String },

    /// Enumeration stopped before completing; partial results would hide rooms.
    #[error("wall graph has more than {limit} simple cycles")]
    TooManyCycles { limit: usize },
}

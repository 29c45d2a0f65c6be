use crate::error::Result;
use crate::plan::{index_points, resolve_endpoint, Point, PointKey, Wall};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Wall graph: node `i` carries the index of `points[i]`, and every wall is
/// stored as two directed edges, one per traversal direction. The edge
/// weight is nominal.
pub type WallGraph = DiGraph<usize, u32>;

const EDGE_WEIGHT: u32 = 1;

/// Build the wall graph for a plan snapshot.
///
/// Walls whose endpoints match no point fail the whole build; dropping them
/// would quietly open rooms that are actually closed.
pub fn build_graph(points: &[Point], walls: &[Wall]) -> Result<WallGraph> {
    let index = index_points(points)?;
    build_graph_with_index(points.len(), walls, &index)
}

fn build_graph_with_index(
    point_count: usize,
    walls: &[Wall],
    index: &HashMap<PointKey, usize>,
) -> Result<WallGraph> {
    let mut graph = DiGraph::with_capacity(point_count, walls.len() * 2);

    for i in 0..point_count {
        graph.add_node(i);
    }

    for (i, wall) in walls.iter().enumerate() {
        let from = resolve_endpoint(index, i, &wall.from)?;
        let to = resolve_endpoint(index, i, &wall.to)?;

        // Skip degenerate walls (from == to)
        if from == to {
            warn!("Skipping zero-length wall {} at point {}", i, from);
            continue;
        }

        graph.add_edge(NodeIndex::new(from), NodeIndex::new(to), EDGE_WEIGHT);
        graph.add_edge(NodeIndex::new(to), NodeIndex::new(from), EDGE_WEIGHT);
    }

    debug!(
        "Built wall graph with {} nodes and {} directed edges",
        graph.node_count(),
        graph.edge_count()
    );

    Ok(graph)
}

/// Neighbour lists per vertex, sorted and without duplicates. Parallel walls
/// collapse into a single adjacency.
pub fn adjacency(graph: &WallGraph) -> Vec<Vec<usize>> {
    graph
        .node_indices()
        .map(|node| {
            let mut neighbors: Vec<usize> = graph.neighbors(node).map(|n| graph[n]).collect();
            neighbors.sort_unstable();
            neighbors.dedup();
            neighbors
        })
        .collect()
}

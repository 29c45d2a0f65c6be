use crate::config::TopologyConfig;
use crate::error::{Result, TopologyError};
use crate::graph_builder::{adjacency, WallGraph};
use tracing::debug;

/// A closed simple walk: at least three distinct point indices, the last
/// one connected back to the first.
pub type Cycle = Vec<usize>;

/// Enumerate every simple cycle of the wall graph exactly once.
///
/// Each cycle is rooted at its smallest vertex and only larger vertices are
/// explored from that root. Of the two traversal directions only the one
/// whose second vertex is smaller than its last is kept. Walking a wall and
/// straight back never yields a cycle since the path needs three vertices.
///
/// Order is deterministic: roots ascending, then neighbours ascending.
pub fn find_cycles(graph: &WallGraph, config: &TopologyConfig) -> Result<Vec<Cycle>> {
    let adj = adjacency(graph);
    let mut search = CycleSearch {
        adj: &adj,
        on_path: vec![false; adj.len()],
        path: Vec::new(),
        cycles: Vec::new(),
        limit: config.max_cycles,
    };

    for start in 0..adj.len() {
        search.walk(start, start)?;
    }

    debug!("Enumerated {} simple cycles", search.cycles.len());
    Ok(search.cycles)
}

struct CycleSearch<'a> {
    adj: &'a [Vec<usize>],
    on_path: Vec<bool>,
    path: Vec<usize>,
    cycles: Vec<Cycle>,
    limit: usize,
}

impl CycleSearch<'_> {
    fn walk(&mut self, start: usize, current: usize) -> Result<()> {
        self.path.push(current);
        self.on_path[current] = true;

        let adj = self.adj;
        for &neighbor in &adj[current] {
            if neighbor == start {
                if self.path.len() >= 3 && self.path[1] < self.path[self.path.len() - 1] {
                    if self.cycles.len() >= self.limit {
                        return Err(TopologyError::TooManyCycles { limit: self.limit });
                    }
                    self.cycles.push(self.path.clone());
                }
            } else if neighbor > start && !self.on_path[neighbor] {
                self.walk(start, neighbor)?;
            }
        }

        // Backtrack
        self.path.pop();
        self.on_path[current] = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph_builder::build_graph;
    use crate::plan::{Point, Wall};

    fn plan_graph(points: &[(f64, f64)], walls: &[(usize, usize)]) -> WallGraph {
        let points: Vec<Point> = points.iter().map(|&(x, z)| Point::new(x, z)).collect();
        let walls: Vec<Wall> = walls
            .iter()
            .map(|&(a, b)| Wall::new(points[a].coord(), points[b].coord()))
            .collect();
        build_graph(&points, &walls).unwrap()
    }

    fn sorted(cycle: &[usize]) -> Vec<usize> {
        let mut v = cycle.to_vec();
        v.sort_unstable();
        v
    }

    #[test]
    fn test_cycle_detection_empty_graph() {
        let graph = plan_graph(&[], &[]);
        let cycles = find_cycles(&graph, &TopologyConfig::default()).unwrap();

        assert!(cycles.is_empty(), "Empty graph should have no cycles");
    }

    #[test]
    fn test_single_wall_has_no_cycle() {
        // The two directed edges of one wall must not count as a 2-cycle
        let graph = plan_graph(&[(0.0, 0.0), (1.0, 0.0)], &[(0, 1)]);
        let cycles = find_cycles(&graph, &TopologyConfig::default()).unwrap();

        assert!(cycles.is_empty());
    }

    #[test]
    fn test_cycle_detection_triangle() {
        let graph = plan_graph(&[(0.0, 0.0), (1.0, 0.0), (0.5, 0.8)], &[(0, 1), (1, 2), (2, 0)]);
        let cycles = find_cycles(&graph, &TopologyConfig::default()).unwrap();

        assert_eq!(cycles, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_square_with_diagonal() {
        let graph = plan_graph(
            &[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)],
            &[(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)],
        );
        let cycles = find_cycles(&graph, &TopologyConfig::default()).unwrap();

        let mut sets: Vec<Vec<usize>> = cycles.iter().map(|c| sorted(c)).collect();
        sets.sort();
        assert_eq!(sets, vec![vec![0, 1, 2], vec![0, 1, 2, 3], vec![0, 2, 3]]);
    }

    #[test]
    fn test_complete_graph_cycle_count() {
        // K4 has 4 triangles and 3 Hamiltonian 4-cycles
        let graph = plan_graph(
            &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)],
            &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)],
        );
        let cycles = find_cycles(&graph, &TopologyConfig::default()).unwrap();

        assert_eq!(cycles.iter().filter(|c| c.len() == 3).count(), 4);
        assert_eq!(cycles.iter().filter(|c| c.len() == 4).count(), 3);
    }

    #[test]
    fn test_cycles_are_simple_and_closed() {
        let graph = plan_graph(
            &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (2.0, 1.0), (1.0, 1.0), (0.0, 1.0)],
            &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0), (1, 4)],
        );
        let adj = adjacency(&graph);
        let cycles = find_cycles(&graph, &TopologyConfig::default()).unwrap();

        assert_eq!(cycles.len(), 3);
        for cycle in &cycles {
            assert_eq!(sorted(cycle).windows(2).filter(|w| w[0] == w[1]).count(), 0);
            for i in 0..cycle.len() {
                let next = cycle[(i + 1) % cycle.len()];
                assert!(adj[cycle[i]].contains(&next));
            }
        }
    }

    #[test]
    fn test_enumeration_is_deterministic() {
        let graph = plan_graph(
            &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)],
            &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)],
        );
        let config = TopologyConfig::default();

        assert_eq!(
            find_cycles(&graph, &config).unwrap(),
            find_cycles(&graph, &config).unwrap()
        );
    }

    #[test]
    fn test_cycle_limit_fails_instead_of_truncating() {
        let graph = plan_graph(
            &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)],
            &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)],
        );
        let config = TopologyConfig {
            max_cycles: 5,
            ..TopologyConfig::default()
        };

        assert_eq!(
            find_cycles(&graph, &config),
            Err(TopologyError::TooManyCycles { limit: 5 })
        );
    }
}

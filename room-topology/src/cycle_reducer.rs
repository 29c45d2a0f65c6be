use crate::cycle_finder::Cycle;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Drop cycles that wrap around another candidate.
///
/// A cycle whose vertex set wholly includes another candidate's vertex set is
/// a larger loop traversed around a chord, not a room of its own. Among
/// cycles with identical vertex sets the first one enumerated is kept.
///
/// Loops that share no vertex never affect each other here, even when one is
/// drawn inside the other; that case belongs to the containment filter.
pub fn reduce_cycles(cycles: Vec<Cycle>) -> Vec<Cycle> {
    let vertex_sets: Vec<BTreeSet<usize>> = cycles
        .iter()
        .map(|cycle| cycle.iter().copied().collect())
        .collect();

    // vertex -> cycles passing through it
    let mut by_vertex: HashMap<usize, Vec<usize>> = HashMap::new();
    for (i, set) in vertex_sets.iter().enumerate() {
        for &v in set {
            by_vertex.entry(v).or_default().push(i);
        }
    }

    // Every superset of `inner` passes through its least shared vertex, so
    // only that vertex's cycles need the subset test.
    let mut dropped = vec![false; cycles.len()];
    for (j, inner) in vertex_sets.iter().enumerate() {
        let Some(holders) = inner
            .iter()
            .filter_map(|v| by_vertex.get(v))
            .min_by_key(|holders| holders.len())
        else {
            continue;
        };

        for &i in holders {
            let outer = &vertex_sets[i];
            if i == j || dropped[i] || outer.len() < inner.len() {
                continue;
            }
            if outer.len() == inner.len() && i < j {
                continue;
            }
            if inner.is_subset(outer) {
                dropped[i] = true;
            }
        }
    }

    let total = cycles.len();
    let reduced: Vec<Cycle> = cycles
        .into_iter()
        .zip(dropped)
        .filter(|(_, dropped)| !dropped)
        .map(|(cycle, _)| cycle)
        .collect();

    debug!("Reduced {} cycles to {} candidates", total, reduced.len());
    reduced
}

//! Discovery of connected clusters of logic-bearing blocks.

use crate::grid::Grid;
use indexmap::IndexSet;
use std::collections::VecDeque;
use voxlogic_core::{BlockPos, Direction};

/// Partition every block with a behavior into face-connected clusters.
///
/// Seeds are taken in grid iteration order (z, then y, then x) and each
/// cluster is grown breadth-first through [`Direction::ALL`], so member order
/// is deterministic. Clusters made only of wire carry no logic and are
/// skipped.
pub fn discover_clusters(grid: &dyn Grid) -> Vec<Vec<BlockPos>> {
    let mut visited: IndexSet<BlockPos> = IndexSet::new();
    let mut clusters = Vec::new();

    for seed in grid.bounds().positions() {
        if visited.contains(&seed) || grid.behavior(seed).is_none() {
            continue;
        }
        visited.insert(seed);
        let mut queue = VecDeque::from([seed]);
        let mut members = Vec::new();
        while let Some(here) = queue.pop_front() {
            members.push(here);
            for d in Direction::ALL {
                let next = here.offset(d);
                if grid.behavior(next).is_some() && visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        let has_logic = members
            .iter()
            .any(|&p| grid.behavior(p).is_some_and(|b| !b.is_wire()));
        if has_logic {
            clusters.push(members);
        }
    }
    clusters
}

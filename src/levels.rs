//! Topological level partitioning: Kahn's algorithm assigning every net
//! a longest-path rank from its sources.

use std::collections::VecDeque;

use petgraph::graph::NodeIndex;

use crate::error::StaError;
use crate::graph::NetGraph;
use crate::netlist::NetId;

/// `levels[l]` holds every node whose longest path from a source has length
/// `l`: for every edge `u → v`, `level(v) > level(u)`.
pub struct LevelList {
    levels: Vec<Vec<NodeIndex>>,
}

impl LevelList {
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn level(&self, l: usize) -> &[NodeIndex] {
        &self.levels[l]
    }

    pub fn iter(&self) -> impl Iterator<Item = &[NodeIndex]> {
        self.levels.iter().map(Vec::as_slice)
    }
}

/// Kahn-style BFS level assignment. Returns [`StaError::CyclicGraph`]
/// naming every net that never reached in-degree zero — a real cycle
/// survived the defensive removal pass in [`crate::graph::build_graph`].
pub fn partition_levels(g: &NetGraph) -> Result<LevelList, StaError> {
    let bound = g.node_bound();
    let mut remaining_in_degree = vec![0usize; bound];
    for node in g.node_indices() {
        remaining_in_degree[node.index()] = g.in_degree(node);
    }

    let mut frontier: VecDeque<NodeIndex> = g
        .node_indices()
        .filter(|&n| remaining_in_degree[n.index()] == 0)
        .collect();

    let mut levels: Vec<Vec<NodeIndex>> = Vec::new();
    let mut assigned = vec![false; bound];

    let mut current_level: Vec<NodeIndex> = Vec::new();
    let mut next_frontier: VecDeque<NodeIndex> = VecDeque::new();

    while !frontier.is_empty() {
        current_level.clear();
        while let Some(node) = frontier.pop_front() {
            assigned[node.index()] = true;
            current_level.push(node);
            for succ in g.successors(node) {
                let d = &mut remaining_in_degree[succ.index()];
                *d -= 1;
                if *d == 0 {
                    next_frontier.push_back(succ);
                }
            }
        }
        levels.push(std::mem::take(&mut current_level));
        std::mem::swap(&mut frontier, &mut next_frontier);
    }

    let stranded: Vec<NetId> = g
        .node_indices()
        .filter(|n| !assigned[n.index()])
        .map(|n| g.net_of(n))
        .collect();

    if !stranded.is_empty() {
        return Err(StaError::CyclicGraph { stranded });
    }

    Ok(LevelList { levels })
}

//! Net-level DAG construction and defensive cycle removal.
//!
//! Turns a flat cell list into a `petgraph` graph keyed by a compact index:
//! nodes are nets, and edges are emitted input→output per non-sequential
//! cell.

use std::collections::{HashMap, HashSet};

use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::stable_graph::StableGraph;
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::netlist::{Netlist, NetId};

/// The net-level DAG: nodes are nets (weighted by their [`NetId`] for
/// reverse lookup), edges are combinational fan-in→fan-out pairs.
///
/// Node indices are dense (`petgraph` assigns them on insertion), so they
/// double as a compact `[0, N)` index for sizing per-net arrays — no
/// separate `NetId → usize` table is needed beyond `net_to_node`.
pub struct NetGraph {
    graph: StableGraph<NetId, ()>,
    net_to_node: HashMap<NetId, NodeIndex>,
}

impl NetGraph {
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Upper bound on node index, suitable for sizing dense per-net arrays.
    pub fn node_bound(&self) -> usize {
        self.graph.node_bound()
    }

    pub fn node_of(&self, net: NetId) -> Option<NodeIndex> {
        self.net_to_node.get(&net).copied()
    }

    pub fn net_of(&self, node: NodeIndex) -> NetId {
        self.graph[node]
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn successors(&self, node: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors_directed(node, Direction::Outgoing)
    }

    pub fn predecessors(&self, node: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors_directed(node, Direction::Incoming)
    }

    pub fn in_degree(&self, node: NodeIndex) -> usize {
        self.graph.neighbors_directed(node, Direction::Incoming).count()
    }

    /// Upper bound on edge index, for sizing a dense per-edge `EdgeTiming`
    /// array.
    pub fn edge_bound(&self) -> usize {
        self.graph.edge_bound()
    }

    /// Outgoing `(edge index, target node)` pairs of `node`, the row STAGE_RC
    /// and STAGE_SLEW each own exclusively while processing `node`'s level.
    pub fn outgoing_edges(&self, node: NodeIndex) -> impl Iterator<Item = (EdgeIndex, NodeIndex)> + '_ {
        self.graph
            .edges_directed(node, Direction::Outgoing)
            .map(|e| (e.id(), e.target()))
    }

    fn node_for(&mut self, net: NetId) -> NodeIndex {
        *self
            .net_to_node
            .entry(net)
            .or_insert_with(|| {
                let idx = self.graph.add_node(net);
                idx
            })
    }
}

/// Build the net-level DAG from a [`Netlist`] and run the defensive back-edge
/// removal pass.
///
/// Sequential cells never contribute edges here: a flip-flop's D input and Q output
/// each become a standalone node with no combinational link between them.
/// The DFS back-edge pass below exists purely to tolerate malformed input
/// that slips a genuine cycle through anyway.
pub fn build_graph(netlist: &Netlist) -> NetGraph {
    let mut g = NetGraph {
        graph: StableGraph::new(),
        net_to_node: HashMap::new(),
    };

    // Make sure every net the netlist knows about gets a node, even ones
    // with no edges (isolated primary inputs/outputs, undriven stragglers).
    for &net in netlist.primary_inputs() {
        g.node_for(net);
    }
    for &net in netlist.primary_outputs() {
        g.node_for(net);
    }
    for cell in netlist.cells() {
        for &net in cell.inputs.iter().chain(cell.outputs.iter()) {
            g.node_for(net);
        }
    }

    let mut seen_edges = HashSet::new();
    for cell in netlist.cells() {
        if cell.kind.is_sequential() {
            continue;
        }
        for &u in &cell.inputs {
            for &v in &cell.outputs {
                if u == v {
                    continue;
                }
                if seen_edges.insert((u, v)) {
                    let un = g.node_for(u);
                    let vn = g.node_for(v);
                    g.graph.add_edge(un, vn, ());
                }
            }
        }
    }

    remove_back_edges(&mut g);
    g
}

/// DFS-based back-edge removal: any edge reaching a node still on the
/// recursion stack is a cycle and is erased in place, with a warning.
fn remove_back_edges(g: &mut NetGraph) {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Unvisited,
        OnStack,
        Done,
    }

    let bound = g.graph.node_bound();
    let mut mark = vec![Mark::Unvisited; bound];
    let roots: Vec<NodeIndex> = g.graph.node_indices().collect();

    for root in roots {
        if mark[root.index()] != Mark::Unvisited {
            continue;
        }
        let mut stack = vec![(root, g.graph.neighbors_directed(root, Direction::Outgoing).collect::<Vec<_>>().into_iter())];
        mark[root.index()] = Mark::OnStack;

        while let Some((node, iter)) = stack.last_mut() {
            let node = *node;
            if let Some(next) = iter.next() {
                match mark[next.index()] {
                    Mark::OnStack => {
                        tracing::warn!(
                            from = g.graph[node],
                            to = g.graph[next],
                            "removing back-edge detected during cycle-removal pass"
                        );
                        if let Some(edge) = g.graph.find_edge(node, next) {
                            g.graph.remove_edge(edge);
                        }
                    }
                    Mark::Unvisited => {
                        mark[next.index()] = Mark::OnStack;
                        let children = g
                            .graph
                            .neighbors_directed(next, Direction::Outgoing)
                            .collect::<Vec<_>>();
                        stack.push((next, children.into_iter()));
                    }
                    Mark::Done => {}
                }
            } else {
                mark[node.index()] = Mark::Done;
                stack.pop();
            }
        }
    }
}

/// Build a raw graph straight from an edge list, bypassing cell ingestion
/// and the back-edge removal pass. Used to exercise the level partitioner
/// against a graph that is cyclic on purpose.
#[cfg(test)]
pub(crate) fn test_graph_from_edges(edges: &[(NetId, NetId)]) -> NetGraph {
    let mut g = NetGraph {
        graph: StableGraph::new(),
        net_to_node: HashMap::new(),
    };
    for &(u, v) in edges {
        let un = g.node_for(u);
        let vn = g.node_for(v);
        g.graph.add_edge(un, vn, ());
    }
    g
}

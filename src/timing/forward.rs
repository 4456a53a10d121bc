//! The forward engine: the three-stage RC → slew → arrival pipeline,
//! pipelined across levels with a rayon fork-join barrier per wave.

use std::sync::atomic::Ordering as AtomicOrdering;

use petgraph::graph::NodeIndex;

use crate::config::RC_TO_PS;
use crate::graph::NetGraph;
use crate::netlist::Netlist;
use crate::timing::atomic_float::AtomicF64;

/// Per-edge `(rc_delay, slew)` in seconds, both initialized to zero.
struct EdgeTimingSlot {
    rc: AtomicF64,
    slew: AtomicF64,
}

impl EdgeTimingSlot {
    fn zero() -> Self {
        EdgeTimingSlot {
            rc: AtomicF64::new(0.0),
            slew: AtomicF64::new(0.0),
        }
    }
}

/// Outcome of the forward pass: worst-case arrival time (picoseconds) per
/// net, densely indexed by the graph's compact node index.
pub struct ForwardResult {
    arrival_ps: Vec<f64>,
}

impl ForwardResult {
    pub fn arrival_at(&self, node: NodeIndex) -> f64 {
        self.arrival_ps[node.index()]
    }
}

/// Per-node driver electricals, sized once before the parallel region.
struct DriverParams {
    resistance_ohms: Vec<f64>,
    capacitance_farads: Vec<f64>,
    delay_ps: Vec<f64>,
}

fn collect_driver_params(graph: &NetGraph, netlist: &Netlist) -> DriverParams {
    let bound = graph.node_bound();
    let mut resistance_ohms = vec![0.0; bound];
    let mut capacitance_farads = vec![0.0; bound];
    let mut delay_ps = vec![0.0; bound];

    for node in graph.node_indices() {
        let net = graph.net_of(node);
        if let Some(cell) = netlist.driver(net) {
            let idx = node.index();
            resistance_ohms[idx] = cell.resistance_ohms;
            capacitance_farads[idx] = cell.capacitance_farads;
            delay_ps[idx] = cell.delay_ps as f64;
        }
    }

    DriverParams {
        resistance_ohms,
        capacitance_farads,
        delay_ps,
    }
}

/// Run the forward pass on `pool`. `levels` must already satisfy the
/// topological-monotonicity invariant the level partitioner guarantees.
pub fn run_forward_pass(
    graph: &NetGraph,
    netlist: &Netlist,
    levels: &crate::levels::LevelList,
    pool: &rayon::ThreadPool,
) -> ForwardResult {
    let driver = collect_driver_params(graph, netlist);
    let arrival: Vec<AtomicF64> = (0..graph.node_bound()).map(|_| AtomicF64::new(0.0)).collect();
    let edge_timing: Vec<EdgeTimingSlot> = (0..graph.edge_bound()).map(|_| EdgeTimingSlot::zero()).collect();

    if !levels.is_empty() {
        let l_max = levels.len() as i64 - 1;
        pool.install(|| {
            for i in 0..=(l_max + 2) {
                rayon::scope(|scope| {
                    if i <= l_max {
                        for &node in levels.level(i as usize) {
                            scope.spawn(|_| stage_rc(graph, node, &driver, &edge_timing));
                        }
                    }
                    if i - 1 >= 0 && i - 1 <= l_max {
                        for &node in levels.level((i - 1) as usize) {
                            scope.spawn(|_| stage_slew(graph, node, &edge_timing));
                        }
                    }
                    if i - 2 >= 0 && i - 2 <= l_max {
                        for &node in levels.level((i - 2) as usize) {
                            scope.spawn(|_| stage_arrival(graph, node, &driver, &edge_timing, &arrival));
                        }
                    }
                });
            }
        });
    }

    ForwardResult {
        arrival_ps: arrival.iter().map(|a| a.load(AtomicOrdering::Relaxed)).collect(),
    }
}

/// STAGE_RC: `rc(u,v) = R(u) * C(v)`, written into the row `u` owns
/// exclusively this wave.
fn stage_rc(graph: &NetGraph, u: NodeIndex, driver: &DriverParams, edge_timing: &[EdgeTimingSlot]) {
    let r_u = driver.resistance_ohms[u.index()];
    for (edge, v) in graph.outgoing_edges(u) {
        let c_v = driver.capacitance_farads[v.index()];
        edge_timing[edge.index()].rc.store(r_u * c_v, AtomicOrdering::Relaxed);
    }
}

/// STAGE_SLEW: slew time equals the rc delay in this model.
fn stage_slew(graph: &NetGraph, u: NodeIndex, edge_timing: &[EdgeTimingSlot]) {
    for (edge, _v) in graph.outgoing_edges(u) {
        let rc = edge_timing[edge.index()].rc.load(AtomicOrdering::Relaxed);
        edge_timing[edge.index()].slew.store(rc, AtomicOrdering::Relaxed);
    }
}

/// STAGE_ARRIVAL: `arrival[v] <- max(arrival[v], arrival[u] + total(u,v))`.
/// Multiple fan-in edges may target the same `v`, so this is the one
/// CAS-guarded shared write in the forward pass.
fn stage_arrival(
    graph: &NetGraph,
    u: NodeIndex,
    driver: &DriverParams,
    edge_timing: &[EdgeTimingSlot],
    arrival: &[AtomicF64],
) {
    let arrival_u = arrival[u.index()].load(AtomicOrdering::Relaxed);
    for (edge, v) in graph.outgoing_edges(u) {
        let rc = edge_timing[edge.index()].rc.load(AtomicOrdering::Relaxed);
        let slew = edge_timing[edge.index()].slew.load(AtomicOrdering::Relaxed);
        let d_cell_v = driver.delay_ps[v.index()];
        let total = (rc + slew) * RC_TO_PS + d_cell_v;
        arrival[v.index()].fetch_max(arrival_u + total, AtomicOrdering::Relaxed);
    }
}

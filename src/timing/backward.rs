//! The backward engine: required-time propagation and slack.
//!
//! Mirrors the level-synchronous shape of [`crate::timing::forward`] but
//! walks levels in descending order and reduces with `min` instead of `max`.

use std::sync::atomic::Ordering as AtomicOrdering;

use petgraph::graph::NodeIndex;

use crate::config::AnalysisConfig;
use crate::graph::NetGraph;
use crate::netlist::Netlist;
use crate::timing::atomic_float::AtomicF64;
use crate::timing::forward::ForwardResult;

/// Per-net required arrival time and slack.
pub struct BackwardResult {
    required_ps: Vec<Option<f64>>,
    slack_ps: Vec<f64>,
}

impl BackwardResult {
    /// `required[n]`, defaulting to the clock period when never reached by
    /// backward propagation.
    pub fn required_at(&self, node: NodeIndex, config: &AnalysisConfig) -> f64 {
        self.required_ps[node.index()].unwrap_or(config.clock_period_ps)
    }

    pub fn slack_at(&self, node: NodeIndex) -> f64 {
        self.slack_ps[node.index()]
    }
}

/// Run the backward pass on `pool`, given the forward pass's arrival
/// times and the net-level DAG's reverse adjacency.
///
/// `required` has no persisted "unset" sentinel: a net never written by
/// propagation (disconnected from any primary output) simply has no entry,
/// which is mathematically the same as initializing it to +∞ before the
/// min-reduction runs — the public accessor applies the clock-period default
/// only at read time.
pub fn run_backward_pass(
    graph: &NetGraph,
    netlist: &Netlist,
    levels: &crate::levels::LevelList,
    forward: &ForwardResult,
    config: &AnalysisConfig,
    pool: &rayon::ThreadPool,
) -> BackwardResult {
    let bound = graph.node_bound();
    let mut delay_ps = vec![0.0f64; bound];
    for node in graph.node_indices() {
        let net = graph.net_of(node);
        if let Some(cell) = netlist.driver(net) {
            delay_ps[node.index()] = cell.delay_ps as f64;
        }
    }

    let required: Vec<AtomicF64> = (0..bound).map(|_| AtomicF64::new(f64::INFINITY)).collect();
    let touched: Vec<std::sync::atomic::AtomicBool> =
        (0..bound).map(|_| std::sync::atomic::AtomicBool::new(false)).collect();

    let primary_output_required = config.output_required_time();
    for &net in netlist.primary_outputs() {
        if let Some(node) = graph.node_of(net) {
            required[node.index()].fetch_min(primary_output_required, AtomicOrdering::Relaxed);
            touched[node.index()].store(true, AtomicOrdering::Relaxed);
        }
    }

    if !levels.is_empty() {
        pool.install(|| {
            for l in (0..levels.len()).rev() {
                rayon::scope(|scope| {
                    for &n in levels.level(l) {
                        scope.spawn(|_| {
                            // An untouched net behaves as +∞ so it
                            // cannot spuriously constrain its fan-ins.
                            let required_n = required[n.index()].load(AtomicOrdering::Relaxed);
                            let candidate = required_n - delay_ps[n.index()];
                            for u in graph.predecessors(n) {
                                required[u.index()].fetch_min(candidate, AtomicOrdering::Relaxed);
                                touched[u.index()].store(true, AtomicOrdering::Relaxed);
                            }
                        });
                    }
                });
            }
        });
    }

    let required_ps: Vec<Option<f64>> = (0..bound)
        .map(|i| {
            if touched[i].load(AtomicOrdering::Relaxed) {
                Some(required[i].load(AtomicOrdering::Relaxed))
            } else {
                None
            }
        })
        .collect();

    let slack_ps: Vec<f64> = (0..bound)
        .map(|i| {
            let required = required_ps[i].unwrap_or(config.clock_period_ps);
            required - forward.arrival_at(NodeIndex::new(i))
        })
        .collect();

    BackwardResult { required_ps, slack_ps }
}

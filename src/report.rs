//! Report interface: the final slack map plus violation/critical-path
//! classification. No analysis logic lives here — only formatting and
//! lookups over already-computed forward/backward results.

use std::collections::HashMap;

use ordered_float::OrderedFloat;
use prettytable::*;

use crate::config::AnalysisConfig;
use crate::graph::NetGraph;
use crate::netlist::{Netlist, NetId};
use crate::timing::{BackwardResult, ForwardResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetTiming {
    pub arrival_ps: f64,
    pub required_ps: f64,
    pub slack_ps: f64,
}

impl NetTiming {
    pub fn is_violation(&self) -> bool {
        self.slack_ps < 0.0
    }

    pub fn is_critical(&self) -> bool {
        self.slack_ps == 0.0
    }
}

/// Immutable snapshot of every net's final timing, built once after the
/// backward pass completes; nothing mutates after that.
pub struct Report {
    timing: HashMap<NetId, NetTiming>,
}

impl Report {
    pub fn build(
        graph: &NetGraph,
        forward: &ForwardResult,
        backward: &BackwardResult,
        config: &AnalysisConfig,
    ) -> Self {
        let mut timing = HashMap::with_capacity(graph.node_count());
        for node in graph.node_indices() {
            let net = graph.net_of(node);
            timing.insert(
                net,
                NetTiming {
                    arrival_ps: forward.arrival_at(node),
                    required_ps: backward.required_at(node, config),
                    slack_ps: backward.slack_at(node),
                },
            );
        }
        Report { timing }
    }

    pub fn get_slack(&self) -> HashMap<NetId, f64> {
        self.timing.iter().map(|(&net, t)| (net, t.slack_ps)).collect()
    }

    pub fn timing_of(&self, net: NetId) -> Option<NetTiming> {
        self.timing.get(&net).copied()
    }

    pub fn is_violation(&self, net: NetId) -> bool {
        self.timing.get(&net).is_some_and(NetTiming::is_violation)
    }

    pub fn is_critical(&self, net: NetId) -> bool {
        self.timing.get(&net).is_some_and(NetTiming::is_critical)
    }

    pub fn violations(&self) -> Vec<NetId> {
        let mut nets: Vec<NetId> = self
            .timing
            .iter()
            .filter(|(_, t)| t.is_violation())
            .map(|(&net, _)| net)
            .collect();
        nets.sort_by_key(|&net| (OrderedFloat(self.timing[&net].slack_ps), net));
        nets
    }

    pub fn critical_path(&self) -> Vec<NetId> {
        let mut nets: Vec<NetId> = self
            .timing
            .iter()
            .filter(|(_, t)| t.is_critical())
            .map(|(&net, _)| net)
            .collect();
        nets.sort_unstable();
        nets
    }

    /// Worst (most negative) slack across the design, if any net was
    /// reached by the analysis.
    pub fn worst_slack(&self) -> Option<f64> {
        self.timing
            .values()
            .map(|t| OrderedFloat(t.slack_ps))
            .min()
            .map(|v| v.0)
    }

    /// Render a human-readable table sorted from worst to best slack.
    pub fn format_table(&self, netlist: &Netlist) -> Table {
        let mut rows: Vec<(NetId, NetTiming)> = self.timing.iter().map(|(&n, &t)| (n, t)).collect();
        rows.sort_by_key(|(_, t)| OrderedFloat(t.slack_ps));

        let mut table = Table::new();
        table.set_titles(row!["Net", "Name", "Arrival (ps)", "Required (ps)", "Slack (ps)", "Status"]);
        for (net, t) in rows {
            let name = netlist.net_name(net).unwrap_or("-");
            let status = if t.is_violation() {
                "VIOLATION"
            } else if t.is_critical() {
                "critical"
            } else {
                ""
            };
            table.add_row(row![
                net,
                name,
                format!("{:.3}", t.arrival_ps),
                format!("{:.3}", t.required_ps),
                format!("{:.3}", t.slack_ps),
                status
            ]);
        }
        table
    }
}

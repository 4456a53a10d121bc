//! Static timing analysis (STA) for synthesized gate-level netlists.
//!
//! Given a synthesis-tool JSON netlist, this crate builds a net-level DAG,
//! partitions it into topological levels, and runs a pipelined forward pass
//! (RC delay → slew → arrival time) followed by a level-synchronous backward
//! pass (required time → slack), exposing per-net violation and
//! critical-path classification.
//!
//! # Pipeline
//!
//! 1. [`netlist::parse_netlist`]: JSON → [`netlist::Netlist`].
//! 2. [`graph::build_graph`]: `Netlist` → [`graph::NetGraph`].
//! 3. [`levels::partition_levels`]: `NetGraph` → [`levels::LevelList`].
//! 4. [`timing::run_forward_pass`]: arrival times.
//! 5. [`timing::run_backward_pass`]: required times and slack.
//! 6. [`report::Report`]: the final, immutable view over all of it.
//!
//! [`run_analysis`] drives all six steps for callers that just want a
//! [`report::Report`] back from a JSON string and a [`config::AnalysisConfig`].

pub mod cell;
pub mod config;
pub mod error;
pub mod graph;
pub mod levels;
pub mod netlist;
pub mod report;
pub mod timing;

use anyhow::Result;

use config::AnalysisConfig;
use report::Report;

/// Run the full pipeline over `json_text` and return the ingested netlist
/// (for net-name lookups when reporting) alongside the final report.
///
/// Fails only on malformed JSON at the outermost parse (not on recoverable
/// per-cell/port/bit issues, which are logged and skipped) or on
/// [`error::StaError::CyclicGraph`] if a real cycle survives
/// [`graph::build_graph`]'s defensive removal pass.
#[tracing::instrument(skip(json_text, config))]
pub fn run_analysis(json_text: &str, config: &AnalysisConfig) -> Result<(netlist::Netlist, Report)> {
    let netlist = netlist::parse_netlist(json_text)?;
    let graph = graph::build_graph(&netlist);
    let levels = levels::partition_levels(&graph)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers)
        .build()?;

    let forward = timing::run_forward_pass(&graph, &netlist, &levels, &pool);
    let backward = timing::run_backward_pass(&graph, &netlist, &levels, &forward, config, &pool);

    let report = Report::build(&graph, &forward, &backward, config);
    Ok((netlist, report))
}

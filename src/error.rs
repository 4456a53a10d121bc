//! Domain error types: a small, hand-rolled enum with manual
//! `Display`/`Error` impls rather than a `thiserror` derive, propagated
//! through `anyhow::Result` at the library/CLI boundary.
//!
//! Only [`StaError::CyclicGraph`] is fatal. Malformed cells, ports, netnames
//! and bits are recovered in place during ingestion (logged via
//! `tracing::warn!`, the offending entry skipped) and never reach this
//! type — see [`crate::netlist::parse_netlist`].

use std::fmt;

use crate::netlist::NetId;

/// Fatal errors surfaced to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum StaError {
    /// The level partitioner could not assign a level to every net
    /// after cycle removal: a real, unremovable cycle remains.
    CyclicGraph {
        /// Nets that retained positive in-degree after the Kahn BFS.
        stranded: Vec<NetId>,
    },
}

impl fmt::Display for StaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaError::CyclicGraph { stranded } => write!(
                f,
                "graph is cyclic: {} net(s) never reached in-degree zero ({:?})",
                stranded.len(),
                stranded
            ),
        }
    }
}

impl std::error::Error for StaError {}

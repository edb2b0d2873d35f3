//! Graphsync: Social Graph Reconciliation
//!
//! Keeps a social account's follows, lists and meta-lists in step with a
//! human-edited YAML document. `download` snapshots the remote account into the
//! document; `upload` reconciles the remote account toward it, gating every
//! batch of changes behind a confirmation decision.

pub mod cli;
pub mod config;
pub mod diff;
pub mod document;
pub mod error;
pub mod gate;
pub mod logging;
pub mod model;
pub mod reconcile;
pub mod remote;

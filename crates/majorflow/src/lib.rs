//! majorflow: circular network view of migration flows between majors.
//!
//! Modules:
//!   network      // layout, flow aggregation, curve routing, render datasets
//!   interaction  // hover / click / filter state machine
//!   dataset      // YAML input records

pub mod dataset;
pub mod interaction;
pub mod network;

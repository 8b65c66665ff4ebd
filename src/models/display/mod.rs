//! Display model implementations for table and JSON output
//!
//! Display models transform snapshots and cache entries into CLI-friendly
//! rows with appropriate column names and serialization.

mod cache;
mod common;
mod org;

pub use cache::CacheEntryDisplay;
pub use org::{
    RootDisplay, RootSummaryDisplay, TreeRowDisplay, TreeRowKind, UnitSummaryDisplay, node_rows,
    root_rows, root_summary_rows, tree_rows, unit_summary_rows,
};

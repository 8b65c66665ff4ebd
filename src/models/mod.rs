//! Display models for CLI output

pub mod display;

pub use display::{
    CacheEntryDisplay, RootDisplay, RootSummaryDisplay, TreeRowDisplay, UnitSummaryDisplay,
    node_rows, root_rows, root_summary_rows, tree_rows, unit_summary_rows,
};

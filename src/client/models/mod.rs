//! AWS Organizations data models
//!
//! Types returned by the remote list operations, trimmed to the fields the
//! tree and its renderers need.

mod org;

pub use org::{Account, NodeDescriptor};

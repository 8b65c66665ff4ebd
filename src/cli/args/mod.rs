//! Shared CLI argument types

mod cache_age;
mod common;
mod global;

pub use cache_age::CacheAge;
pub use common::OutputFormat;
pub use global::GlobalOptions;

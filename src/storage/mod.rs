//! Run input and output on disk
//!
//! - [`input`] - Identifier list loading
//! - [`layout`] - Per-run file naming
//! - [`sink`] - Shared, lock-serialized category files

pub mod input;
pub mod layout;
pub mod sink;

pub use input::{load_ids, parse_ids};
pub use layout::RunLayout;
pub use sink::{CategoryCounts, CategorySink};

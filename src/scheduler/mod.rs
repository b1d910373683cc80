//! Work distribution across workers
//!
//! - [`partition`](mod@partition) - Contiguous, deterministic splitting of the input ids

pub mod partition;

pub use partition::{partition, partition_sizes};

//! friendlang - Steam account classification by friends' name scripts
//!
//! Given a list of Steam ids, fetches each account's friend list, checks
//! every friend's display name for CJK and Cyrillic characters, and sorts
//! both the friends and the accounts themselves into category files.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration loading and validation
//! - [`scheduler`] - Partitioning of the input across workers
//! - [`classifier`] - Script detection and classification rules
//! - [`crawler`] - Steam API client, per-worker analyzer and pipeline
//! - [`storage`] - Input loading and the shared category files
//! - [`models`] - Core data structures and types
//! - [`utils`] - Common utilities and helpers
//!
//! # Example
//!
//! ```no_run
//! use friendlang::config::AppConfig;
//! use friendlang::crawler::ClassificationPipeline;
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::from_file(Path::new("app-settings.json"))?;
//!     let pipeline = ClassificationPipeline::from_config(&config)?;
//!     println!("{} workers", pipeline.worker_count());
//!     Ok(())
//! }
//! ```

pub mod classifier;
pub mod config;
pub mod crawler;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod storage;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::AppConfig;
    pub use crate::crawler::{ClassificationPipeline, RunReport, SteamApi, SteamClient};
    pub use crate::error::{Error, ErrorCategory, Result};
    pub use crate::models::{Category, SteamId, Thresholds};
    pub use crate::storage::{CategorySink, RunLayout};
}

// Direct re-exports for convenience
pub use models::{Category, SteamId};

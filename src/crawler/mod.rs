//! Steam friend-graph crawling with rate limiting
//!
//! This module implements the classification run: the API client, the
//! per-worker account loop, its pacing, and the orchestration of workers.

pub mod analyzer;
pub mod fetcher;
pub mod pacing;
pub mod pipeline;

pub use analyzer::{AccountAnalyzer, AccountOutcome, WorkerStats};
pub use fetcher::{SteamApi, SteamClient};
pub use pacing::{Pacing, PausePoint};
pub use pipeline::{ClassificationPipeline, RunReport, WorkerReport};

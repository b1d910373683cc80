//! Partitioned classification pipeline
//!
//! Splits the identifier list into one contiguous partition per worker and
//! runs an [`AccountAnalyzer`] for each on its own tokio task. Every worker
//! has its own API key and proxy; the only shared state is the
//! [`CategorySink`].
//!
//! # Architecture
//!
//! ```text
//!                 ┌──────────────┐
//!   ids ────────▶ │  partition   │
//!                 └──────┬───────┘
//!          ┌─────────────┼─────────────┐
//!          ▼             ▼             ▼
//!    ┌──────────┐  ┌──────────┐  ┌──────────┐
//!    │ worker 0 │  │ worker 1 │  │ worker N │   key + proxy each
//!    └────┬─────┘  └────┬─────┘  └────┬─────┘
//!         └─────────────┼─────────────┘
//!                       ▼
//!              ┌─────────────────┐
//!              │  CategorySink   │   one lock, eight files
//!              └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use friendlang::config::AppConfig;
//! use friendlang::crawler::pipeline::ClassificationPipeline;
//! use friendlang::storage::{load_ids, RunLayout};
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = AppConfig::from_file(Path::new("app-settings.json"))?;
//! let ids = load_ids(Path::new("check_ids.txt")).await?;
//!
//! let pipeline = ClassificationPipeline::from_config(&config)?;
//! let report = pipeline
//!     .execute(&ids, &RunLayout::timestamped(&config.output_dir))
//!     .await?;
//!
//! println!("Processed {} accounts", report.totals().processed);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::AppConfig;
use crate::crawler::analyzer::{AccountAnalyzer, WorkerStats};
use crate::crawler::fetcher::{SteamApi, SteamClient};
use crate::crawler::pacing::Pacing;
use crate::error::{Error, Result};
use crate::models::{Category, SteamId, Thresholds};
use crate::scheduler::partition;
use crate::storage::{CategoryCounts, CategorySink, RunLayout};

// ============================================================================
// Reports
// ============================================================================

/// Result of one worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerReport {
    pub worker: usize,

    /// Size of the partition handed to this worker
    pub assigned: usize,

    /// `None` if the worker task panicked
    pub stats: Option<WorkerStats>,
}

impl WorkerReport {
    pub fn panicked(&self) -> bool {
        self.stats.is_none()
    }
}

/// Result of a whole run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub elapsed: Duration,
    pub workers: Vec<WorkerReport>,
    pub counts: CategoryCounts,
}

impl RunReport {
    /// Stats summed over all workers that finished
    pub fn totals(&self) -> WorkerStats {
        self.workers
            .iter()
            .filter_map(|w| w.stats.as_ref())
            .fold(WorkerStats::default(), |mut acc, stats| {
                acc.merge(stats);
                acc
            })
    }

    pub fn panicked_workers(&self) -> usize {
        self.workers.iter().filter(|w| w.panicked()).count()
    }
}

// ============================================================================
// Pipeline Implementation
// ============================================================================

/// Fixed bank of workers, one per API client
pub struct ClassificationPipeline {
    apis: Vec<Arc<dyn SteamApi>>,
    thresholds: Thresholds,
    pacing: Pacing,
    failure_category: Category,
}

impl ClassificationPipeline {
    /// Build one Steam client per configured key/proxy pair.
    ///
    /// Fails before anything is written if the configuration is invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        config.validate()?;

        let apis = (0..config.partition_count())
            .map(|worker| {
                SteamClient::from_config(config, worker)
                    .map(|client| Arc::new(client) as Arc<dyn SteamApi>)
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self::with_apis(apis, config.thresholds(), Pacing::from(config.pacing))
            .separate_failures(config.separate_failures))
    }

    /// Pipeline over already-built API clients, one worker each
    pub fn with_apis(apis: Vec<Arc<dyn SteamApi>>, thresholds: Thresholds, pacing: Pacing) -> Self {
        Self {
            apis,
            thresholds,
            pacing,
            failure_category: Category::FriendNoFriends,
        }
    }

    /// Send failed accounts to self-no-data instead of friend-no-friends
    pub fn separate_failures(mut self, enabled: bool) -> Self {
        self.failure_category = if enabled {
            Category::SelfNoData
        } else {
            Category::FriendNoFriends
        };
        self
    }

    pub fn worker_count(&self) -> usize {
        self.apis.len()
    }

    /// Run every worker against `sink` and wait for all of them.
    ///
    /// Panics inside an account are absorbed by the analyzer; a worker task
    /// that still panics is reported and does not stop the others.
    pub async fn run(&self, ids: &[SteamId], sink: Arc<CategorySink>) -> Vec<WorkerReport> {
        let partitions = partition(ids, self.apis.len());

        let (assignments, handles): (Vec<_>, Vec<_>) = partitions
            .into_iter()
            .zip(&self.apis)
            .enumerate()
            .map(|(worker, (part, api))| {
                let analyzer = AccountAnalyzer::new(
                    worker,
                    Arc::clone(api),
                    Arc::clone(&sink),
                    self.thresholds,
                    self.pacing,
                )
                .with_failure_category(self.failure_category);

                let assigned = part.len();
                tracing::debug!(worker, assigned, "Spawning worker");

                let handle = tokio::spawn(async move { analyzer.run(&part).await });
                ((worker, assigned), handle)
            })
            .unzip();

        let results = futures::future::join_all(handles).await;

        assignments
            .into_iter()
            .zip(results)
            .map(|((worker, assigned), result)| {
                let stats = match result {
                    Ok(stats) => Some(stats),
                    Err(e) => {
                        tracing::error!(worker, error = %e, "Worker task panicked");
                        None
                    }
                };
                WorkerReport {
                    worker,
                    assigned,
                    stats,
                }
            })
            .collect()
    }

    /// Open the category files for `layout`, run all workers, then close the
    /// files once every worker has finished.
    pub async fn execute(&self, ids: &[SteamId], layout: &RunLayout) -> Result<RunReport> {
        if self.apis.is_empty() {
            return Err(Error::config("pipeline has no workers"));
        }

        let start = Instant::now();

        tracing::info!(
            workers = self.apis.len(),
            total = ids.len(),
            output = %layout.root().display(),
            stamp = %layout.stamp(),
            "Starting classification run"
        );

        let sink = Arc::new(CategorySink::create(layout).await?);
        let workers = self.run(ids, Arc::clone(&sink)).await;
        let counts = sink.close().await?;

        let report = RunReport {
            elapsed: start.elapsed(),
            workers,
            counts,
        };

        tracing::info!(
            elapsed_ms = report.elapsed.as_millis() as u64,
            records = report.counts.total(),
            panicked = report.panicked_workers(),
            "Classification run finished"
        );

        Ok(report)
    }
}

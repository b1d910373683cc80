//! Shared category output streams
//!
//! All eight category files sit behind a single mutex. Every record is one
//! `"{id} \n"` line written with a single `write_all` while the lock is held,
//! so lines from different workers never interleave.
//!
//! One lock covers all categories, so total output throughput is bounded by
//! a single critical section. Negligible next to paced network calls at a
//! few workers; a bottleneck if the worker count grows large.

use std::io;
use std::path::PathBuf;
use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::sync::Mutex;

use crate::models::{Category, SteamId};
use crate::storage::layout::RunLayout;

/// Records written per category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategoryCounts([u64; Category::ALL.len()]);

impl CategoryCounts {
    pub fn get(&self, category: Category) -> u64 {
        self.0[category.index()]
    }

    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    /// `(category, count)` pairs in category order
    pub fn iter(&self) -> impl Iterator<Item = (Category, u64)> + '_ {
        Category::ALL.iter().map(|c| (*c, self.get(*c)))
    }

    fn increment(&mut self, category: Category) {
        self.0[category.index()] += 1;
    }
}

struct SinkState {
    /// `None` once the sink is closed
    writers: Option<Vec<BufWriter<File>>>,
    counts: CategoryCounts,
}

/// Append-only category files shared by every worker
pub struct CategorySink {
    state: Mutex<SinkState>,
    paths: Vec<PathBuf>,
}

impl CategorySink {
    /// Create the directories and (truncated) files described by `layout`
    pub async fn create(layout: &RunLayout) -> io::Result<Self> {
        for dir in layout.directories() {
            fs::create_dir_all(&dir).await?;
        }

        let mut writers = Vec::with_capacity(Category::ALL.len());
        let mut paths = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            let path = layout.path(category);
            writers.push(BufWriter::new(File::create(&path).await?));
            paths.push(path);
        }

        tracing::debug!(
            root = %layout.root().display(),
            stamp = %layout.stamp(),
            "Opened category files"
        );

        Ok(Self {
            state: Mutex::new(SinkState {
                writers: Some(writers),
                counts: CategoryCounts::default(),
            }),
            paths,
        })
    }

    /// Append one record for `id` to `category`
    pub async fn record(&self, category: Category, id: SteamId) -> io::Result<()> {
        let line = format!("{id} \n");

        let mut state = self.state.lock().await;
        let writers = state
            .writers
            .as_mut()
            .ok_or_else(|| io::Error::other("category sink is closed"))?;

        writers[category.index()].write_all(line.as_bytes()).await?;
        state.counts.increment(category);
        Ok(())
    }

    /// Snapshot of records written so far
    pub async fn counts(&self) -> CategoryCounts {
        self.state.lock().await.counts
    }

    /// Path of the file backing `category`
    pub fn path(&self, category: Category) -> &PathBuf {
        &self.paths[category.index()]
    }

    /// Flush and close every stream. Later writes fail; closing twice is a no-op.
    ///
    /// Every stream is flushed even if an earlier one fails; the first error
    /// is returned.
    pub async fn close(&self) -> io::Result<CategoryCounts> {
        let mut state = self.state.lock().await;
        let mut first_err = None;

        if let Some(writers) = state.writers.take() {
            for (category, mut writer) in Category::ALL.into_iter().zip(writers) {
                let result = match writer.flush().await {
                    Ok(()) => writer.into_inner().sync_all().await,
                    Err(e) => Err(e),
                };
                if let Err(e) = result {
                    tracing::error!(category = %category, error = %e, "Failed to flush category file");
                    first_err.get_or_insert(e);
                }
            }
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(state.counts),
        }
    }
}

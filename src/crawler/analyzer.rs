//! Per-partition account analysis
//!
//! One [`AccountAnalyzer`] runs per worker and walks its partition strictly
//! in order. For each account it fetches the friend list, classifies every
//! friend's display name, writes friend records, then writes exactly one
//! record for the account itself.
//!
//! Any API or write failure abandons the current account only: its counters
//! are dropped, the id goes to the failure bucket, and the loop moves on.
//! A panic while analyzing an account is caught and handled the same way.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;

use crate::classifier::{classify, classify_self, route_friend, SelfVerdict};
use crate::crawler::fetcher::SteamApi;
use crate::crawler::pacing::{Pacing, PausePoint};
use crate::error::Result;
use crate::models::{Category, PlayerSummary, ScriptCounters, SteamId, Thresholds};
use crate::storage::CategorySink;

/// What happened to one account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountOutcome {
    /// Empty friend list
    NoFriends,
    /// Friends classified and a self-category written
    Classified {
        verdict: SelfVerdict,
        friends_routed: u32,
        friends_skipped: u32,
    },
    /// Abandoned after an error
    Failed,
}

/// Totals for one worker's partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorkerStats {
    pub processed: u64,
    pub classified: u64,
    pub no_friends: u64,
    pub failed: u64,
    pub friends_routed: u64,
    pub friends_skipped: u64,
}

impl WorkerStats {
    pub fn record(&mut self, outcome: &AccountOutcome) {
        self.processed += 1;
        match outcome {
            AccountOutcome::NoFriends => self.no_friends += 1,
            AccountOutcome::Classified {
                friends_routed,
                friends_skipped,
                ..
            } => {
                self.classified += 1;
                self.friends_routed += u64::from(*friends_routed);
                self.friends_skipped += u64::from(*friends_skipped);
            }
            AccountOutcome::Failed => self.failed += 1,
        }
    }

    /// Sum of two workers' stats
    pub fn merge(&mut self, other: &WorkerStats) {
        self.processed += other.processed;
        self.classified += other.classified;
        self.no_friends += other.no_friends;
        self.failed += other.failed;
        self.friends_routed += other.friends_routed;
        self.friends_skipped += other.friends_skipped;
    }
}

/// Sequential analyzer bound to one API client
pub struct AccountAnalyzer {
    worker: usize,
    api: Arc<dyn SteamApi>,
    sink: Arc<CategorySink>,
    thresholds: Thresholds,
    pacing: Pacing,
    failure_category: Category,
}

impl AccountAnalyzer {
    /// Analyzer for worker `worker`; failures go to friend-no-friends
    pub fn new(
        worker: usize,
        api: Arc<dyn SteamApi>,
        sink: Arc<CategorySink>,
        thresholds: Thresholds,
        pacing: Pacing,
    ) -> Self {
        Self {
            worker,
            api,
            sink,
            thresholds,
            pacing,
            failure_category: Category::FriendNoFriends,
        }
    }

    /// Route failed accounts to `category` instead
    pub fn with_failure_category(mut self, category: Category) -> Self {
        self.failure_category = category;
        self
    }

    /// Analyze every id in order
    pub async fn run(&self, ids: &[SteamId]) -> WorkerStats {
        let mut stats = WorkerStats::default();
        for &id in ids {
            let outcome = self.analyze(id).await;
            stats.record(&outcome);
        }

        tracing::info!(
            worker = self.worker,
            processed = stats.processed,
            classified = stats.classified,
            no_friends = stats.no_friends,
            failed = stats.failed,
            "Worker finished"
        );
        stats
    }

    /// Analyze one account, absorbing any error or panic
    pub async fn analyze(&self, id: SteamId) -> AccountOutcome {
        tracing::info!(worker = self.worker, steam_id = id, "Analyzing account");

        self.pacing.pause(PausePoint::BeforeFriendList).await;

        match AssertUnwindSafe(self.try_analyze(id)).catch_unwind().await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(e)) => {
                tracing::warn!(
                    worker = self.worker,
                    steam_id = id,
                    error = %e,
                    bucket = %self.failure_category,
                    "Account failed"
                );
                self.record_failure(id).await
            }
            Err(panic) => {
                tracing::error!(
                    worker = self.worker,
                    steam_id = id,
                    panic = panic_message(panic.as_ref()),
                    bucket = %self.failure_category,
                    "Account analysis panicked"
                );
                self.record_failure(id).await
            }
        }
    }

    async fn record_failure(&self, id: SteamId) -> AccountOutcome {
        if let Err(write_err) = self.sink.record(self.failure_category, id).await {
            tracing::error!(
                worker = self.worker,
                steam_id = id,
                error = %write_err,
                "Failed to record failed account"
            );
        }
        self.pacing.pause(PausePoint::AfterError).await;
        AccountOutcome::Failed
    }

    async fn try_analyze(&self, id: SteamId) -> Result<AccountOutcome> {
        let friends = self.api.friend_list(id).await?;

        if friends.is_empty() {
            self.sink.record(Category::FriendNoFriends, id).await?;
            return Ok(AccountOutcome::NoFriends);
        }

        let mut counters = ScriptCounters::default();
        let mut friends_routed = 0;
        let mut friends_skipped = 0;

        for friend in &friends {
            self.pacing.pause(PausePoint::BeforeSummary).await;
            let summary = self.api.player_summary(friend.steam_id).await?;
            self.pacing.pause(PausePoint::AfterSummary).await;

            let Some(name) = summary.as_ref().and_then(PlayerSummary::usable_name) else {
                tracing::debug!(steam_id = friend.steam_id, "Skipping friend without display name");
                friends_skipped += 1;
                continue;
            };

            let category = route_friend(classify(name), &mut counters);
            self.sink.record(category, friend.steam_id).await?;
            friends_routed += 1;
        }

        let verdict = classify_self(counters, self.thresholds);
        self.sink.record(verdict.category(), id).await?;

        tracing::debug!(
            steam_id = id,
            ru = counters.ru,
            cjk = counters.cjk,
            category = %verdict.category(),
            "Account classified"
        );

        if !verdict.settles_early() {
            self.pacing.pause(PausePoint::AfterAccount).await;
        }

        Ok(AccountOutcome::Classified {
            verdict,
            friends_routed,
            friends_skipped,
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

//! Static request pacing
//!
//! Fixed pauses around each API call, on top of the client's token bucket.
//! All pauses are cooperative `tokio` sleeps.

use std::time::Duration;

use crate::config::PacingConfig;

/// Points in the per-account loop where a pause applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PausePoint {
    BeforeFriendList,
    BeforeSummary,
    AfterSummary,
    AfterAccount,
    AfterError,
}

/// Pause durations for one worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    before_friend_list: Duration,
    before_summary: Duration,
    after_summary: Duration,
    after_account: Duration,
    after_error: Duration,
}

impl Pacing {
    /// No pauses
    pub fn none() -> Self {
        Self::from(PacingConfig::none())
    }

    /// Duration configured for `point`
    pub fn duration(&self, point: PausePoint) -> Duration {
        match point {
            PausePoint::BeforeFriendList => self.before_friend_list,
            PausePoint::BeforeSummary => self.before_summary,
            PausePoint::AfterSummary => self.after_summary,
            PausePoint::AfterAccount => self.after_account,
            PausePoint::AfterError => self.after_error,
        }
    }

    /// Sleep for the pause configured at `point`
    pub async fn pause(&self, point: PausePoint) {
        let duration = self.duration(point);
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::from(PacingConfig::default())
    }
}

impl From<PacingConfig> for Pacing {
    fn from(config: PacingConfig) -> Self {
        Self {
            before_friend_list: Duration::from_millis(config.before_friend_list_ms),
            before_summary: Duration::from_millis(config.before_summary_ms),
            after_summary: Duration::from_millis(config.after_summary_ms),
            after_account: Duration::from_millis(config.after_account_ms),
            after_error: Duration::from_millis(config.after_error_ms),
        }
    }
}

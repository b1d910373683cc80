// Core data structures for the friendlang classifier

use serde::{Deserialize, Serialize};
use std::fmt;

/// 64-bit Steam account identifier
pub type SteamId = u64;

/// One friend entry from a friend list response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Friend {
    pub steam_id: SteamId,
}

/// Profile summary for a single account
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub steam_id: SteamId,
    pub display_name: Option<String>,
}

impl PlayerSummary {
    /// Display name if present and not blank
    pub fn usable_name(&self) -> Option<&str> {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
    }
}

/// Script signals found in a display name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScriptFlags {
    pub has_cjk: bool,
    pub has_cyrillic: bool,
}

/// Output bucket. Each maps to exactly one file for the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    SelfChinese,
    SelfRu,
    SelfBurjui,
    SelfNoData,
    FriendRu,
    FriendChinese,
    FriendBurjui,
    FriendNoFriends,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Self::SelfChinese,
        Self::SelfRu,
        Self::SelfBurjui,
        Self::SelfNoData,
        Self::FriendRu,
        Self::FriendChinese,
        Self::FriendBurjui,
        Self::FriendNoFriends,
    ];

    /// Stable index into per-category arrays
    pub fn index(self) -> usize {
        self as usize
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SelfChinese => "self-chinese",
            Self::SelfRu => "self-ru",
            Self::SelfBurjui => "self-burjui",
            Self::SelfNoData => "self-no-data",
            Self::FriendRu => "friend-ru",
            Self::FriendChinese => "friend-chinese",
            Self::FriendBurjui => "friend-burjui",
            Self::FriendNoFriends => "friend-no-friends",
        }
    }

    /// Whether this bucket holds friend-level records (grouped in subdirectories)
    pub fn is_friend_level(&self) -> bool {
        matches!(
            self,
            Self::FriendRu | Self::FriendChinese | Self::FriendBurjui | Self::FriendNoFriends
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Running friend counts for the account currently being analyzed.
///
/// Created fresh per account and dropped after the self-classification
/// decision, so nothing carries over between accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScriptCounters {
    pub ru: u32,
    pub cjk: u32,
}

/// Per-account thresholds for self-classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub min_ru: u32,
    pub min_chinese: u32,
}

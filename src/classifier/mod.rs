//! Script detection and classification rules
//!
//! Everything in here is pure: the analyzer feeds display names and counters
//! in and gets categories back. Safe to call from any worker without locking.

use std::ops::RangeInclusive;

use crate::models::{Category, ScriptCounters, ScriptFlags, Thresholds};

/// CJK Unified Ideographs
const CJK_RANGE: RangeInclusive<char> = '\u{4E00}'..='\u{9FFF}';

/// Cyrillic block
const CYRILLIC_RANGE: RangeInclusive<char> = '\u{0400}'..='\u{04FF}';

/// Report which scripts appear anywhere in `name`.
pub fn classify(name: &str) -> ScriptFlags {
    let mut flags = ScriptFlags::default();
    for ch in name.chars() {
        flags.has_cjk |= CJK_RANGE.contains(&ch);
        flags.has_cyrillic |= CYRILLIC_RANGE.contains(&ch);
        if flags.has_cjk && flags.has_cyrillic {
            break;
        }
    }
    flags
}

/// Route one friend to its bucket and bump the matching counter.
///
/// Cyrillic wins over CJK for mixed names.
pub fn route_friend(flags: ScriptFlags, counters: &mut ScriptCounters) -> Category {
    match (flags.has_cjk, flags.has_cyrillic) {
        (_, true) => {
            counters.ru += 1;
            Category::FriendRu
        }
        (true, false) => {
            counters.cjk += 1;
            Category::FriendChinese
        }
        (false, false) => Category::FriendBurjui,
    }
}

/// Outcome of the self-classification rule for one account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfVerdict {
    /// Neither threshold reached
    Burjui,
    /// Only the Cyrillic threshold reached
    Ru,
    /// Only the CJK threshold reached
    Chinese,
    /// Both thresholds reached; resolves to the Chinese bucket
    Both,
}

impl SelfVerdict {
    /// Bucket the account itself is written to
    pub fn category(self) -> Category {
        match self {
            Self::Burjui => Category::SelfBurjui,
            Self::Ru => Category::SelfRu,
            Self::Chinese | Self::Both => Category::SelfChinese,
        }
    }

    /// Ru and Chinese settle the account immediately and skip the
    /// post-account pause.
    pub fn settles_early(self) -> bool {
        matches!(self, Self::Ru | Self::Chinese)
    }
}

/// Apply the per-account thresholds to the accumulated friend counts.
pub fn classify_self(counters: ScriptCounters, thresholds: Thresholds) -> SelfVerdict {
    let ru_met = counters.ru >= thresholds.min_ru;
    let cjk_met = counters.cjk >= thresholds.min_chinese;

    match (ru_met, cjk_met) {
        (false, false) => SelfVerdict::Burjui,
        (true, false) => SelfVerdict::Ru,
        (false, true) => SelfVerdict::Chinese,
        (true, true) => SelfVerdict::Both,
    }
}

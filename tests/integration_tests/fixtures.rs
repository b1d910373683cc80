//! Test fixtures: a small social graph and pipeline builders

use std::sync::Arc;

use friendlang::crawler::{ClassificationPipeline, Pacing, SteamApi, SteamClient};
use friendlang::models::{SteamId, Thresholds};
use wiremock::MockServer;

use crate::common::{mount_friends, mount_summary};

pub const THRESHOLDS: Thresholds = Thresholds {
    min_ru: 2,
    min_chinese: 2,
};

/// Accounts under test and the friends they have
pub const ACCOUNT_RU: SteamId = 100;
pub const ACCOUNT_CHINESE: SteamId = 200;
pub const ACCOUNT_BOTH: SteamId = 300;
pub const ACCOUNT_NEUTRAL: SteamId = 400;
pub const ACCOUNT_LONELY: SteamId = 500;

pub const RU_NAMES: &[(SteamId, &str)] = &[(1001, "Иван"), (1002, "Сергей"), (1003, "Ольга")];
pub const CJK_NAMES: &[(SteamId, &str)] = &[(2001, "张三"), (2002, "李四")];
pub const MIXED_NAMES: &[(SteamId, &str)] = &[(3001, "张Иван")];
pub const LATIN_NAMES: &[(SteamId, &str)] = &[(4001, "bob"), (4002, "さくら")];
pub const BLANK_NAMES: &[(SteamId, &str)] = &[(5001, "  ")];

fn ids(names: &[(SteamId, &str)]) -> Vec<SteamId> {
    names.iter().map(|(id, _)| *id).collect()
}

/// Mount every summary plus the five fixture accounts
pub async fn mount_graph(server: &MockServer) {
    for (id, name) in RU_NAMES
        .iter()
        .chain(CJK_NAMES)
        .chain(MIXED_NAMES)
        .chain(LATIN_NAMES)
        .chain(BLANK_NAMES)
    {
        mount_summary(server, *id, Some(*name)).await;
    }
    // Friend with no profile data
    mount_summary(server, 6001, None).await;

    // Three Cyrillic friends, one CJK friend, a blank name and no data
    let mut ru = ids(RU_NAMES);
    ru.extend([2001, 5001, 6001]);
    mount_friends(server, ACCOUNT_RU, &ru).await;

    // Two CJK friends, one Latin
    mount_friends(server, ACCOUNT_CHINESE, &[2001, 2002, 4001]).await;

    // Mixed name counts as Cyrillic: 1 mixed + 1 ru = 2 ru, 2 cjk
    mount_friends(server, ACCOUNT_BOTH, &[3001, 1001, 2001, 2002]).await;

    // Only non-CJK, non-Cyrillic names
    mount_friends(server, ACCOUNT_NEUTRAL, &ids(LATIN_NAMES)).await;

    mount_friends(server, ACCOUNT_LONELY, &[]).await;
}

/// Proxy-less client against the mock server
pub fn client(server: &MockServer, key: &str) -> Arc<dyn SteamApi> {
    Arc::new(SteamClient::with_base_url(&server.uri(), key, 1000).unwrap())
}

/// Pipeline with `workers` clients, keys `KEY0..`
pub fn pipeline(server: &MockServer, workers: usize) -> ClassificationPipeline {
    let apis = (0..workers)
        .map(|i| client(server, &format!("KEY{i}")))
        .collect();
    ClassificationPipeline::with_apis(apis, THRESHOLDS, Pacing::none())
}

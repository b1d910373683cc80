//! Pipeline integration tests
//!
//! Runs the full pipeline against a mock Steam API and checks the eight
//! category files it leaves behind.

use std::collections::BTreeSet;

use friendlang::crawler::{ClassificationPipeline, Pacing};
use friendlang::models::{Category, SteamId};
use friendlang::storage::RunLayout;
use tempfile::TempDir;
use wiremock::MockServer;

use super::fixtures::*;
use crate::common::{mount_friends_for_key, mount_summary, read_id_set, read_lines};

const ALL_ACCOUNTS: [SteamId; 5] = [
    ACCOUNT_RU,
    ACCOUNT_CHINESE,
    ACCOUNT_BOTH,
    ACCOUNT_NEUTRAL,
    ACCOUNT_LONELY,
];

fn set(ids: &[SteamId]) -> BTreeSet<SteamId> {
    ids.iter().copied().collect()
}

#[tokio::test]
async fn test_full_run_single_worker() {
    let server = MockServer::start().await;
    mount_graph(&server).await;
    let dir = TempDir::new().unwrap();
    let layout = RunLayout::new(dir.path(), "run");

    let report = pipeline(&server, 1)
        .execute(&ALL_ACCOUNTS, &layout)
        .await
        .unwrap();

    assert_eq!(read_id_set(&layout.path(Category::SelfRu)), set(&[ACCOUNT_RU]));
    assert_eq!(
        read_id_set(&layout.path(Category::SelfChinese)),
        set(&[ACCOUNT_CHINESE, ACCOUNT_BOTH])
    );
    assert_eq!(
        read_id_set(&layout.path(Category::SelfBurjui)),
        set(&[ACCOUNT_NEUTRAL])
    );
    assert_eq!(
        read_id_set(&layout.path(Category::FriendNoFriends)),
        set(&[ACCOUNT_LONELY])
    );
    assert!(read_lines(&layout.path(Category::SelfNoData)).is_empty());

    // Friends are recorded once per account that lists them
    assert_eq!(read_lines(&layout.path(Category::FriendRu)).len(), 5);
    assert_eq!(
        read_id_set(&layout.path(Category::FriendRu)),
        set(&[1001, 1002, 1003, 3001])
    );
    assert_eq!(read_lines(&layout.path(Category::FriendChinese)).len(), 5);
    assert_eq!(
        read_id_set(&layout.path(Category::FriendChinese)),
        set(&[2001, 2002])
    );
    assert_eq!(
        read_id_set(&layout.path(Category::FriendBurjui)),
        set(&[4001, 4002])
    );

    // Blank and missing names never reach a file
    for category in Category::ALL {
        let ids = read_id_set(&layout.path(category));
        assert!(!ids.contains(&5001), "blank name recorded in {category}");
        assert!(!ids.contains(&6001), "missing profile recorded in {category}");
    }

    let totals = report.totals();
    assert_eq!(totals.processed, 5);
    assert_eq!(totals.classified, 4);
    assert_eq!(totals.no_friends, 1);
    assert_eq!(totals.failed, 0);
    assert_eq!(totals.friends_skipped, 2);
    assert_eq!(report.counts.get(Category::SelfChinese), 2);
    assert_eq!(report.counts.get(Category::FriendBurjui), 3);
}

#[tokio::test]
async fn test_every_account_lands_in_exactly_one_account_bucket() {
    let server = MockServer::start().await;
    mount_graph(&server).await;
    let dir = TempDir::new().unwrap();
    let layout = RunLayout::new(dir.path(), "run");

    pipeline(&server, 2)
        .execute(&ALL_ACCOUNTS, &layout)
        .await
        .unwrap();

    let account_buckets = [
        Category::SelfChinese,
        Category::SelfRu,
        Category::SelfBurjui,
        Category::SelfNoData,
        Category::FriendNoFriends,
    ];
    for account in ALL_ACCOUNTS {
        let hits = account_buckets
            .iter()
            .filter(|c| read_id_set(&layout.path(**c)).contains(&account))
            .count();
        assert_eq!(hits, 1, "account {account} in {hits} buckets");
    }
}

#[tokio::test]
async fn test_worker_count_does_not_change_results() {
    let server = MockServer::start().await;
    mount_graph(&server).await;

    let single = TempDir::new().unwrap();
    let single_layout = RunLayout::new(single.path(), "one");
    pipeline(&server, 1)
        .execute(&ALL_ACCOUNTS, &single_layout)
        .await
        .unwrap();

    let many = TempDir::new().unwrap();
    let many_layout = RunLayout::new(many.path(), "many");
    pipeline(&server, 3)
        .execute(&ALL_ACCOUNTS, &many_layout)
        .await
        .unwrap();

    for category in Category::ALL {
        let mut a = read_lines(&single_layout.path(category));
        let mut b = read_lines(&many_layout.path(category));
        a.sort();
        b.sort();
        assert_eq!(a, b, "{category} differs between worker counts");
    }
}

#[tokio::test]
async fn test_rerun_is_idempotent() {
    let server = MockServer::start().await;
    mount_graph(&server).await;
    let dir = TempDir::new().unwrap();

    let first = RunLayout::new(dir.path(), "first");
    let second = RunLayout::new(dir.path(), "second");
    let pipeline = pipeline(&server, 2);
    pipeline.execute(&ALL_ACCOUNTS, &first).await.unwrap();
    pipeline.execute(&ALL_ACCOUNTS, &second).await.unwrap();

    for category in Category::ALL {
        assert_ne!(first.path(category), second.path(category));
        assert_eq!(
            read_id_set(&first.path(category)),
            read_id_set(&second.path(category))
        );
    }
}

#[tokio::test]
async fn test_each_worker_uses_its_own_key() {
    let server = MockServer::start().await;
    // Worker 0 gets [10, 11], worker 1 gets [12]
    mount_friends_for_key(&server, "KEY0", 10, &[]).await;
    mount_friends_for_key(&server, "KEY0", 11, &[]).await;
    mount_friends_for_key(&server, "KEY1", 12, &[]).await;

    let dir = TempDir::new().unwrap();
    let layout = RunLayout::new(dir.path(), "keys");
    let report = pipeline(&server, 2)
        .execute(&[10, 11, 12], &layout)
        .await
        .unwrap();

    // A key mismatch would 404 and turn into a failure
    assert_eq!(report.totals().failed, 0);
    assert_eq!(report.totals().no_friends, 3);
    assert_eq!(
        read_id_set(&layout.path(Category::FriendNoFriends)),
        set(&[10, 11, 12])
    );
}

#[tokio::test]
async fn test_lines_stay_intact_under_concurrency() {
    let server = MockServer::start().await;

    let accounts: Vec<SteamId> = (1..=24).collect();
    let friends: Vec<SteamId> = (9000..9010).collect();
    for friend in &friends {
        mount_summary(&server, *friend, Some("Дмитрий")).await;
    }
    for account in &accounts {
        crate::common::mount_friends(&server, *account, &friends).await;
    }

    let dir = TempDir::new().unwrap();
    let layout = RunLayout::new(dir.path(), "lines");
    pipeline(&server, 6)
        .execute(&accounts, &layout)
        .await
        .unwrap();

    let content = std::fs::read_to_string(layout.path(Category::FriendRu)).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), accounts.len() * friends.len());
    for line in lines {
        let id = line.strip_suffix(' ').expect("trailing space");
        assert!(friends.contains(&id.parse().unwrap()), "corrupt line {line:?}");
    }

    assert_eq!(read_id_set(&layout.path(Category::SelfRu)), set(&accounts));
}

#[tokio::test]
async fn test_empty_input_creates_empty_files() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let layout = RunLayout::new(dir.path(), "empty");

    let report = pipeline(&server, 3).execute(&[], &layout).await.unwrap();

    assert_eq!(report.totals().processed, 0);
    assert_eq!(report.counts.total(), 0);
    for category in Category::ALL {
        assert!(layout.path(category).exists(), "{category} file missing");
    }
}

#[tokio::test]
async fn test_more_workers_than_ids() {
    let server = MockServer::start().await;
    mount_graph(&server).await;
    let dir = TempDir::new().unwrap();
    let layout = RunLayout::new(dir.path(), "sparse");

    let report = ClassificationPipeline::with_apis(
        (0..4).map(|i| client(&server, &format!("KEY{i}"))).collect(),
        THRESHOLDS,
        Pacing::none(),
    )
    .execute(&[ACCOUNT_LONELY, ACCOUNT_RU], &layout)
    .await
    .unwrap();

    let assigned: Vec<usize> = report.workers.iter().map(|w| w.assigned).collect();
    assert_eq!(assigned, vec![1, 1, 0, 0]);
    assert_eq!(report.totals().processed, 2);
}

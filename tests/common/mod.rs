//! Common test utilities: a mock Steam Web API on top of wiremock

#![allow(dead_code)]

use friendlang::models::SteamId;
use serde_json::json;
use std::collections::BTreeSet;
use std::path::Path;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const FRIEND_LIST: &str = "/ISteamUser/GetFriendList/v0001/";
pub const PLAYER_SUMMARIES: &str = "/ISteamUser/GetPlayerSummaries/v0002/";

/// Serve `friends` as the friend list of `id`
pub async fn mount_friends(server: &MockServer, id: SteamId, friends: &[SteamId]) {
    let entries: Vec<_> = friends
        .iter()
        .map(|f| json!({ "steamid": f.to_string(), "relationship": "friend", "friend_since": 0 }))
        .collect();

    Mock::given(method("GET"))
        .and(path(FRIEND_LIST))
        .and(query_param("steamid", id.to_string()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "friendslist": { "friends": entries } })),
        )
        .mount(server)
        .await;
}

/// Serve `friends` for `id`, but only when requested with `key`
pub async fn mount_friends_for_key(server: &MockServer, key: &str, id: SteamId, friends: &[SteamId]) {
    let entries: Vec<_> = friends
        .iter()
        .map(|f| json!({ "steamid": f.to_string(), "relationship": "friend", "friend_since": 0 }))
        .collect();

    Mock::given(method("GET"))
        .and(path(FRIEND_LIST))
        .and(query_param("key", key))
        .and(query_param("steamid", id.to_string()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "friendslist": { "friends": entries } })),
        )
        .mount(server)
        .await;
}

/// Answer the friend list request for `id` with a bare status code
pub async fn mount_friends_status(server: &MockServer, id: SteamId, status: u16) {
    Mock::given(method("GET"))
        .and(path(FRIEND_LIST))
        .and(query_param("steamid", id.to_string()))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Serve a player summary for `id`; `None` yields an empty players array
pub async fn mount_summary(server: &MockServer, id: SteamId, name: Option<&str>) {
    let players = match name {
        Some(name) => json!([{ "steamid": id.to_string(), "personaname": name }]),
        None => json!([]),
    };

    Mock::given(method("GET"))
        .and(path(PLAYER_SUMMARIES))
        .and(query_param("steamids", id.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": { "players": players } })))
        .mount(server)
        .await;
}

/// Answer the summary request for `id` with a bare status code
pub async fn mount_summary_status(server: &MockServer, id: SteamId, status: u16) {
    Mock::given(method("GET"))
        .and(path(PLAYER_SUMMARIES))
        .and(query_param("steamids", id.to_string()))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Lines of a category file, trailing space stripped
pub fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(|line| line.trim_end().to_string())
        .collect()
}

/// Ids in a category file, ignoring order
pub fn read_id_set(path: &Path) -> BTreeSet<SteamId> {
    read_lines(path)
        .iter()
        .map(|line| line.parse().expect("line is a steam id"))
        .collect()
}

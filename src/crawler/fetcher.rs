//! Steam Web API client with rate limiting and proxy support
//!
//! This module provides the two read operations the analyzer needs:
//! - `GetFriendList` for an account
//! - `GetPlayerSummaries` for a single friend
//!
//! Each worker owns one [`SteamClient`], bound to one API key and one
//! outbound proxy. Requests go through a governor token bucket so a single
//! key never exceeds its configured request rate.

use async_trait::async_trait;
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use reqwest::{Client, Proxy};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::num::NonZeroU32;
use std::time::Duration;

use crate::config::{AppConfig, ProxyConfig};
use crate::models::{Friend, PlayerSummary, SteamId};
use crate::utils::error::ApiError;

const FRIEND_LIST_PATH: &str = "/ISteamUser/GetFriendList/v0001/";
const PLAYER_SUMMARIES_PATH: &str = "/ISteamUser/GetPlayerSummaries/v0002/";

/// Read operations consumed from the remote social graph
#[async_trait]
pub trait SteamApi: Send + Sync {
    /// Friends of `steam_id`; an empty list means "no friends"
    async fn friend_list(&self, steam_id: SteamId) -> Result<Vec<Friend>, ApiError>;

    /// Profile summary of `steam_id`, or `None` if the API returned no player
    async fn player_summary(&self, steam_id: SteamId) -> Result<Option<PlayerSummary>, ApiError>;
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Deserialize)]
struct FriendListEnvelope {
    #[serde(default)]
    friendslist: Option<FriendListBody>,
}

#[derive(Debug, Deserialize)]
struct FriendListBody {
    #[serde(default)]
    friends: Vec<FriendEntry>,
}

#[derive(Debug, Deserialize)]
struct FriendEntry {
    steamid: String,
}

#[derive(Debug, Deserialize)]
struct SummariesEnvelope {
    #[serde(default)]
    response: Option<SummariesBody>,
}

#[derive(Debug, Deserialize)]
struct SummariesBody {
    #[serde(default)]
    players: Vec<PlayerEntry>,
}

#[derive(Debug, Deserialize)]
struct PlayerEntry {
    steamid: String,
    #[serde(default)]
    personaname: Option<String>,
}

fn parse_steam_id(raw: &str) -> Result<SteamId, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::InvalidSteamId(raw.to_string()))
}

// ============================================================================
// HTTP client
// ============================================================================

/// Steam Web API client for one worker
pub struct SteamClient {
    /// HTTP client, routed through the worker's proxy
    client: Client,

    /// API key sent with every request
    api_key: String,

    /// Base URL, overridable for mock servers
    base_url: String,

    /// Rate limiter to control request frequency
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl SteamClient {
    /// Create a client
    ///
    /// # Arguments
    ///
    /// * `api_key` - Steam Web API key
    /// * `base_url` - API base URL without trailing slash
    /// * `proxy` - Optional outbound proxy
    /// * `timeout` - Request timeout
    /// * `requests_per_second` - Token-bucket rate; zero is treated as one
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidProxy` if the proxy URL is rejected, or
    /// `ApiError::Http` if the HTTP client cannot be created
    pub fn new(
        api_key: &str,
        base_url: &str,
        proxy: Option<&ProxyConfig>,
        timeout: Duration,
        requests_per_second: u32,
    ) -> Result<Self, ApiError> {
        let mut builder = Client::builder().timeout(timeout).gzip(true);

        if let Some(proxy) = proxy {
            builder = builder.proxy(build_proxy(proxy)?);
        }

        let client = builder.build()?;

        let rate = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = RateLimiter::direct(Quota::per_second(rate));

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            rate_limiter,
        })
    }

    /// Create the client for worker `worker` from the run configuration
    ///
    /// # Errors
    ///
    /// Fails if `worker` has no key or proxy, or the proxy is invalid
    pub fn from_config(config: &AppConfig, worker: usize) -> Result<Self, ApiError> {
        let (Some(api_key), Some(proxy)) = (config.api_keys.get(worker), config.proxies.get(worker))
        else {
            return Err(ApiError::InvalidProxy {
                host: format!("worker #{worker}"),
                reason: "no key/proxy pair configured".to_string(),
            });
        };

        Self::new(
            api_key,
            &config.api_base_url,
            Some(proxy),
            config.request_timeout(),
            config.requests_per_second,
        )
    }

    /// Create a direct (proxy-less) client against `base_url`, for testing
    pub fn with_base_url(
        base_url: &str,
        api_key: &str,
        requests_per_second: u32,
    ) -> Result<Self, ApiError> {
        Self::new(api_key, base_url, None, Duration::from_secs(10), requests_per_second)
    }

    /// Rate-limited GET returning a decoded JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.rate_limiter.until_ready().await;

        let url = format!("{}{path}", self.base_url);
        tracing::debug!(url = %url, "Requesting Steam API");

        let response = self
            .client
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(query)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(ApiError::from_reqwest)?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

fn build_proxy(config: &ProxyConfig) -> Result<Proxy, ApiError> {
    let proxy = Proxy::all(&config.host).map_err(|e| ApiError::InvalidProxy {
        host: config.host.clone(),
        reason: e.to_string(),
    })?;

    Ok(match &config.username {
        Some(user) => proxy.basic_auth(user, config.password.as_deref().unwrap_or_default()),
        None => proxy,
    })
}

#[async_trait]
impl SteamApi for SteamClient {
    async fn friend_list(&self, steam_id: SteamId) -> Result<Vec<Friend>, ApiError> {
        let envelope: FriendListEnvelope = self
            .get_json(
                FRIEND_LIST_PATH,
                &[
                    ("steamid", steam_id.to_string()),
                    ("relationship", "friend".to_string()),
                ],
            )
            .await?;

        envelope
            .friendslist
            .map(|list| list.friends)
            .unwrap_or_default()
            .iter()
            .map(|entry| {
                Ok(Friend {
                    steam_id: parse_steam_id(&entry.steamid)?,
                })
            })
            .collect()
    }

    async fn player_summary(&self, steam_id: SteamId) -> Result<Option<PlayerSummary>, ApiError> {
        let envelope: SummariesEnvelope = self
            .get_json(PLAYER_SUMMARIES_PATH, &[("steamids", steam_id.to_string())])
            .await?;

        let Some(player) = envelope
            .response
            .and_then(|body| body.players.into_iter().next())
        else {
            return Ok(None);
        };

        Ok(Some(PlayerSummary {
            steam_id: parse_steam_id(&player.steamid)?,
            display_name: player.personaname,
        }))
    }
}

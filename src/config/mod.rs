//! Configuration management for the friendlang classifier
//!
//! This module handles loading and validating the run configuration. Both
//! JSON (`app-settings.json`, the historical format with PascalCase keys) and
//! TOML files are accepted.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::models::Thresholds;
use crate::utils::mask_secret;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// One Steam Web API key per worker
    #[serde(alias = "SteamApiKeys", deserialize_with = "deserialize_api_keys")]
    pub api_keys: Vec<String>,

    /// Cyrillic friends needed to classify an account as self-ru
    #[serde(alias = "Rus")]
    pub min_ru: u32,

    /// CJK friends needed to classify an account as self-chinese
    #[serde(alias = "Chinese")]
    pub min_chinese: u32,

    /// One outbound proxy per worker; its length sets the worker count
    #[serde(alias = "Proxies")]
    pub proxies: Vec<ProxyConfig>,

    /// Steam Web API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Token-bucket cap on requests per second, per worker
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,

    /// Static pauses around API calls
    #[serde(default)]
    pub pacing: PacingConfig,

    /// Directory receiving the category files
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Write failed accounts to self-no-data instead of friend-no-friends
    #[serde(default)]
    pub separate_failures: bool,
}

/// Outbound HTTP proxy for one worker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Proxy URL, e.g. `http://10.0.0.1:3128`
    #[serde(alias = "Host")]
    pub host: String,

    #[serde(default, alias = "UserName", alias = "Username")]
    pub username: Option<String>,

    #[serde(default, alias = "Password")]
    pub password: Option<String>,
}

/// Pauses in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub before_friend_list_ms: u64,
    pub before_summary_ms: u64,
    pub after_summary_ms: u64,
    pub after_account_ms: u64,
    pub after_error_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            before_friend_list_ms: 350,
            before_summary_ms: 100,
            after_summary_ms: 120,
            after_account_ms: 300,
            after_error_ms: 50,
        }
    }
}

impl PacingConfig {
    /// No pauses at all
    pub fn none() -> Self {
        Self {
            before_friend_list_ms: 0,
            before_summary_ms: 0,
            after_summary_ms: 0,
            after_account_ms: 0,
            after_error_ms: 0,
        }
    }
}

fn default_api_base_url() -> String {
    String::from("https://api.steampowered.com")
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_requests_per_second() -> u32 {
    5
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Accept either a comma-separated string or a list of keys
fn deserialize_api_keys<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Keys {
        Joined(String),
        List(Vec<String>),
    }

    let keys = match Keys::deserialize(deserializer)? {
        Keys::Joined(joined) => joined.split(',').map(str::to_string).collect::<Vec<_>>(),
        Keys::List(list) => list,
    };

    Ok(keys.into_iter().map(|k| k.trim().to_string()).collect())
}

impl AppConfig {
    /// Load configuration from a file; `.json` is parsed as JSON, anything else as TOML
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Parse a JSON document
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Number of workers the run will use
    pub fn partition_count(&self) -> usize {
        self.proxies.len()
    }

    /// Validate configuration values
    ///
    /// Every worker needs its own key and its own proxy, so the key count,
    /// proxy count and partition count must all agree.
    pub fn validate(&self) -> Result<()> {
        if self.proxies.is_empty() {
            return Err(Error::config("at least one proxy must be configured"));
        }

        if self.api_keys.len() != self.proxies.len() {
            return Err(Error::config(format!(
                "expected one API key per proxy: {} keys, {} proxies",
                self.api_keys.len(),
                self.proxies.len()
            )));
        }

        if let Some(pos) = self.api_keys.iter().position(|k| k.is_empty()) {
            return Err(Error::config(format!("API key #{} is empty", pos + 1)));
        }

        if let Some(pos) = self.proxies.iter().position(|p| p.host.trim().is_empty()) {
            return Err(Error::config(format!("proxy #{} has no host", pos + 1)));
        }

        if self.requests_per_second == 0 {
            return Err(Error::config("requests_per_second must be greater than 0"));
        }

        if self.request_timeout_secs == 0 {
            return Err(Error::config("request_timeout_secs must be greater than 0"));
        }

        Ok(())
    }

    /// Classification thresholds
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            min_ru: self.min_ru,
            min_chinese: self.min_chinese,
        }
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Display configuration (with secrets masked)
    pub fn display(&self) -> String {
        let mut out = format!(
            "Run Configuration\n\
             {:-<50}\n\
             Workers: {}\n\
             Thresholds: ru >= {}, chinese >= {}\n\
             API: {}\n\
             Timeout: {}s\n\
             Rate Limit: {} req/s per worker\n\
             Output: {}\n\
             Separate failures: {}\n",
            "",
            self.partition_count(),
            self.min_ru,
            self.min_chinese,
            self.api_base_url,
            self.request_timeout_secs,
            self.requests_per_second,
            self.output_dir.display(),
            self.separate_failures,
        );

        for (i, (key, proxy)) in self.api_keys.iter().zip(&self.proxies).enumerate() {
            let auth = match (&proxy.username, &proxy.password) {
                (Some(user), Some(pass)) => format!(" ({user}:{})", mask_secret(pass)),
                (Some(user), None) => format!(" ({user})"),
                _ => String::new(),
            };
            out.push_str(&format!(
                "  [{i}] key {} via {}{auth}\n",
                mask_secret(key),
                proxy.host
            ));
        }

        out
    }
}

//! TOML file configuration structures.
//!
//! These structs directly map to the `autoreply.toml` file format.

use serde::Deserialize;
use std::path::PathBuf;
use url::Url;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Deserialize)]
pub struct FileConfig {
    /// Application (consumer) key pair.
    pub api_key: KeyPair,
    /// User access token pair.
    pub token: KeyPair,
    pub files: FilesConfig,
    #[serde(default)]
    pub stream: StreamConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Clone, Deserialize)]
pub struct KeyPair {
    pub key: String,
    pub secret: String,
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Files the bot reads and writes.
#[derive(Debug, Clone, Deserialize)]
pub struct FilesConfig {
    /// Reply corpus, one reply per line.
    pub status_file: PathBuf,
    /// Stream parameters (`[params]` table).
    pub parameters_file: PathBuf,
    /// Persisted set of actors already replied to.
    #[serde(default = "default_mentioned_file")]
    pub mentioned_file: PathBuf,
}

fn default_mentioned_file() -> PathBuf {
    PathBuf::from("mentioned.txt")
}

#[derive(Debug, Clone, Deserialize)]
pub struct StreamConfig {
    /// `sample` or `filter`. Kept as a string so an unknown mode gets its
    /// own error instead of a generic parse failure.
    #[serde(default = "default_mode")]
    pub mode: String,
}

fn default_mode() -> String {
    "filter".to_string()
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
        }
    }
}

/// Endpoint overrides and transport options.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiConfig {
    pub stream_url: Option<Url>,
    pub rest_url: Option<Url>,
    pub proxy: Option<Url>,
    pub request_timeout_secs: Option<u64>,
}

//! Stream request modes and parameters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which live stream to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamMode {
    /// Unfiltered sample of all public events.
    Sample,
    /// Events matching the supplied track terms.
    Filter,
}

impl StreamMode {
    /// Endpoint path relative to the stream base URL.
    pub fn endpoint(self) -> &'static str {
        match self {
            StreamMode::Sample => "statuses/sample.json",
            StreamMode::Filter => "statuses/filter.json",
        }
    }
}

impl fmt::Display for StreamMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamMode::Sample => write!(f, "sample"),
            StreamMode::Filter => write!(f, "filter"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("mode {0:?} is not available")]
pub struct UnknownStreamMode(pub String);

impl FromStr for StreamMode {
    type Err = UnknownStreamMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sample" => Ok(StreamMode::Sample),
            "filter" => Ok(StreamMode::Filter),
            other => Err(UnknownStreamMode(other.to_owned())),
        }
    }
}

/// A fully specified stream request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamRequest {
    pub mode: StreamMode,
    /// Request parameters, e.g. `("track", "rust,tokio")`. Ignored in
    /// sample mode.
    pub params: Vec<(String, String)>,
}

impl StreamRequest {
    pub fn sample() -> Self {
        Self {
            mode: StreamMode::Sample,
            params: Vec::new(),
        }
    }

    pub fn filter(params: Vec<(String, String)>) -> Self {
        Self {
            mode: StreamMode::Filter,
            params,
        }
    }
}

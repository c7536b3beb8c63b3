//! HTTP client settings.

use std::time::Duration;
use url::Url;

/// Endpoints and transport options for the platform client.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Base URL of the streaming API (must end with `/`).
    pub stream_url: Url,
    /// Base URL of the REST API (must end with `/`).
    pub rest_url: Url,
    /// Optional proxy applied to every request.
    pub proxy: Option<Url>,
    /// Timeout for REST calls. The stream connection never times out.
    pub request_timeout: Duration,
}

impl ClientSettings {
    pub const DEFAULT_STREAM_URL: &str = "https://stream.twitter.com/1.1/";
    pub const DEFAULT_REST_URL: &str = "https://api.twitter.com/1.1/";
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Settings pointing both APIs at `base`; handy for local mocks.
    pub fn with_base(base: Url) -> Self {
        Self {
            stream_url: base.clone(),
            rest_url: base,
            proxy: None,
            request_timeout: Self::DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        #[allow(clippy::expect_used)]
        Self {
            stream_url: Url::parse(Self::DEFAULT_STREAM_URL).expect("valid default stream url"),
            rest_url: Url::parse(Self::DEFAULT_REST_URL).expect("valid default rest url"),
            proxy: None,
            request_timeout: Self::DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

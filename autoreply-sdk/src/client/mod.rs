//! HTTP client for the social platform API.
//!
//! Gated behind the `client` cargo feature so crates that only need the
//! shared objects do not pull in `reqwest`.

mod status;
mod stream;

pub use stream::{LineBuffer, MessageStream, decode_stream};

use reqwest::{Client, StatusCode};
use url::Url;

use crate::config::{ClientSettings, Credentials};
use crate::oauth::{AUTHORIZATION_HEADER, authorization_header};

/// Errors produced by the platform client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (DNS, TLS, connection reset).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The platform returned a non-2xx status code.
    #[error("api error: status {status}, body: {body}")]
    Api { status: StatusCode, body: String },

    /// A stream line was not valid JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The base URL could not be joined with the endpoint path.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// The configured proxy was rejected by the HTTP stack.
    #[error("invalid proxy {proxy}: {source}")]
    InvalidProxy {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },

    /// The stream sent a line longer than the framing limit.
    #[error("stream line exceeds {limit} bytes without a newline")]
    LineTooLong { limit: usize },

    /// The reply endpoint answered without the `text` success marker.
    #[error("response missing success marker: {body}")]
    MissingMarker { body: String },
}

/// Typed, OAuth-signing HTTP client for the platform API.
///
/// Holds two `reqwest` clients: the streaming one has no timeout since the
/// connection is meant to stay open indefinitely.
#[derive(Debug, Clone)]
pub struct PlatformClient {
    stream_http: Client,
    rest_http: Client,
    settings: ClientSettings,
    credentials: Credentials,
}

impl PlatformClient {
    /// Create a new `PlatformClient`.
    pub fn new(credentials: Credentials, settings: ClientSettings) -> Result<Self, ClientError> {
        let mut stream_builder = Client::builder();
        let mut rest_builder = Client::builder().timeout(settings.request_timeout);
        if let Some(proxy) = &settings.proxy {
            let proxy = reqwest::Proxy::all(proxy.as_str()).map_err(|source| {
                ClientError::InvalidProxy {
                    proxy: proxy.to_string(),
                    source,
                }
            })?;
            stream_builder = stream_builder.proxy(proxy.clone());
            rest_builder = rest_builder.proxy(proxy);
        }

        Ok(Self {
            stream_http: stream_builder.build()?,
            rest_http: rest_builder.build()?,
            settings,
            credentials,
        })
    }

    fn sign(&self, method: &str, url: &Url, params: &[(String, String)]) -> String {
        authorization_header(&self.credentials, method, url, params)
    }
}

/// Turn a non-2xx response into [`ClientError::Api`].
async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Api { status, body });
    }
    Ok(resp)
}

/// Attach the signed `Authorization` header to a request.
fn authorized(builder: reqwest::RequestBuilder, header: String) -> reqwest::RequestBuilder {
    builder.header(AUTHORIZATION_HEADER, header)
}

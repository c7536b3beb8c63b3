//! OAuth 1.0a request signing.
//!
//! Every platform request carries an `Authorization` header of the form:
//!
//! ```text
//! OAuth oauth_consumer_key="...", oauth_nonce="...", oauth_signature="...", ...
//! ```
//!
//! The signature is `HMAC-SHA1(base_string, "{consumer_secret}&{token_secret}")`
//! where the base string is `METHOD&{url}&{sorted params}`, every component
//! percent-encoded per RFC 5849 §3.6.

use itertools::Itertools;
use url::Url;

use crate::config::Credentials;

/// Header name carrying the OAuth signature.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
pub const OAUTH_VERSION: &str = "1.0";

/// Per-request values that make a signature unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nonce {
    pub nonce: String,
    pub timestamp: i64,
}

impl Nonce {
    /// Fresh random nonce stamped with the current time.
    pub fn generate() -> Self {
        Self {
            nonce: uuid::Uuid::new_v4().simple().to_string(),
            timestamp: time::OffsetDateTime::now_utc().unix_timestamp(),
        }
    }
}

/// RFC 3986 percent-encoding, leaving only unreserved characters intact.
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

// ---------------------------------------------------------------------------
// Signing
// ---------------------------------------------------------------------------

/// Build the `Authorization` header value for a request.
///
/// `params` must contain every query and form parameter of the request.
pub fn authorization_header(
    credentials: &Credentials,
    method: &str,
    url: &Url,
    params: &[(String, String)],
) -> String {
    authorization_header_with(credentials, method, url, params, &Nonce::generate())
}

/// Same as [`authorization_header`] with an explicit nonce.
pub fn authorization_header_with(
    credentials: &Credentials,
    method: &str,
    url: &Url,
    params: &[(String, String)],
    nonce: &Nonce,
) -> String {
    let mut oauth_params = protocol_params(credentials, nonce);

    let all_params: Vec<(String, String)> = params
        .iter()
        .cloned()
        .chain(oauth_params.iter().cloned())
        .collect();
    let base_string = signature_base_string(method, url, &all_params);
    let signature = sign(
        &base_string,
        &credentials.consumer_secret,
        &credentials.access_token_secret,
    );
    oauth_params.push(("oauth_signature".to_owned(), signature));

    let fields = oauth_params
        .iter()
        .sorted()
        .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
        .join(", ");
    format!("OAuth {fields}")
}

fn protocol_params(credentials: &Credentials, nonce: &Nonce) -> Vec<(String, String)> {
    vec![
        (
            "oauth_consumer_key".to_owned(),
            credentials.consumer_key.clone(),
        ),
        ("oauth_nonce".to_owned(), nonce.nonce.clone()),
        (
            "oauth_signature_method".to_owned(),
            SIGNATURE_METHOD.to_owned(),
        ),
        ("oauth_timestamp".to_owned(), nonce.timestamp.to_string()),
        ("oauth_token".to_owned(), credentials.access_token.clone()),
        ("oauth_version".to_owned(), OAUTH_VERSION.to_owned()),
    ]
}

/// Build the signature base string: `METHOD&{base url}&{param string}`.
///
/// Query and fragment of `url` are dropped; query parameters must be passed
/// in `params` instead.
pub fn signature_base_string(method: &str, url: &Url, params: &[(String, String)]) -> String {
    let mut base_url = url.clone();
    base_url.set_query(None);
    base_url.set_fragment(None);

    let param_string = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .sorted()
        .map(|(k, v)| format!("{k}={v}"))
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        percent_encode(base_url.as_str()),
        percent_encode(&param_string)
    )
}

/// `base64(HMAC-SHA1(base_string, "{consumer_secret}&{token_secret}"))`.
pub fn sign(base_string: &str, consumer_secret: &str, token_secret: &str) -> String {
    let key = format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    );
    let tag = ring::hmac::sign(
        &ring::hmac::Key::new(ring::hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY, key.as_bytes()),
        base_string.as_bytes(),
    );
    encode_base64_padded(tag.as_ref())
}

fn encode_base64_padded(bytes: &[u8]) -> String {
    let mut encoded = fast32::base64::RFC4648_NOPAD.encode(bytes);
    let padding = (4 - encoded.len() % 4) % 4;
    encoded.extend(std::iter::repeat_n('=', padding));
    encoded
}

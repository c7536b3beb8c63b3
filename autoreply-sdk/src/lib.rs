//! Shared types and HTTP client for the social platform API.
//!
//! The `objects` module mirrors the JSON shapes the platform streams and
//! accepts. The `oauth` module signs requests. The typed HTTP client lives
//! in `client` and is only compiled with the `client` feature.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![forbid(unsafe_code)]

#[cfg(feature = "client")]
pub mod client;
pub mod config;
pub mod oauth;
pub mod objects;

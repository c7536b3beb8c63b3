//! Runtime configuration types for the platform client.
//!
//! These are the validated values; reading them from disk is handled by
//! the bot crate.

mod client;
mod credentials;

pub use client::ClientSettings;
pub use credentials::Credentials;

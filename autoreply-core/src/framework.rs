//! Seams between the pipeline and the platform API.
//!
//! The producer only needs something that can open a message stream and the
//! scheduler only needs something that can post a reply. `PlatformClient`
//! implements both; tests substitute in-memory fakes.

use async_trait::async_trait;
use autoreply_sdk::client::{ClientError, MessageStream, PlatformClient};
use autoreply_sdk::objects::{PostedStatus, ReplyRequest, StreamRequest};

/// Failure opening or reading the event stream.
pub type SourceError = ClientError;
/// Failure posting a reply.
pub type SinkError = ClientError;

/// Source of the live event stream.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Open one streaming connection.
    async fn open(&self, request: &StreamRequest) -> Result<MessageStream, SourceError>;
}

/// Destination for automated replies.
#[async_trait]
pub trait ActionSink: Send + Sync {
    /// Post `reply`; `Ok` only for a confirmed success.
    async fn post_reply(&self, reply: &ReplyRequest) -> Result<PostedStatus, SinkError>;
}

#[async_trait]
impl EventSource for PlatformClient {
    async fn open(&self, request: &StreamRequest) -> Result<MessageStream, SourceError> {
        self.open_stream(request).await
    }
}

#[async_trait]
impl ActionSink for PlatformClient {
    async fn post_reply(&self, reply: &ReplyRequest) -> Result<PostedStatus, SinkError> {
        PlatformClient::post_reply(self, reply).await
    }
}

//! In-memory stand-ins for the platform API.

use crate::framework::{ActionSink, EventSource};
use async_trait::async_trait;
use autoreply_sdk::client::{ClientError, MessageStream};
use autoreply_sdk::objects::{
    Actor, Event, EventId, PostedStatus, ReplyRequest, StreamMessage, StreamRequest,
};
use futures_util::stream::{self, StreamExt};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

pub(crate) fn event(id: EventId, actor: &str, followers_count: u64) -> Event {
    Event {
        id,
        created_at: "Wed Oct 10 20:19:24 +0000 2018".to_owned(),
        user: Actor {
            screen_name: actor.into(),
            followers_count,
        },
        text: None,
    }
}

pub(crate) fn message(value: serde_json::Value) -> Result<StreamMessage, ClientError> {
    Ok(StreamMessage(value))
}

pub(crate) fn event_message(id: EventId, actor: &str, followers_count: u64) -> Result<StreamMessage, ClientError> {
    message(serde_json::to_value(event(id, actor, followers_count)).unwrap())
}

pub(crate) fn stream_failure() -> ClientError {
    ClientError::Json(serde_json::from_str::<serde_json::Value>("{").unwrap_err())
}

/// Replays a fixed list of messages, optionally hanging afterwards.
pub(crate) struct FakeSource {
    messages: Mutex<Option<Vec<Result<StreamMessage, ClientError>>>>,
    fail_open: bool,
    hang_after: bool,
}

impl FakeSource {
    pub(crate) fn new(messages: Vec<Result<StreamMessage, ClientError>>) -> Self {
        Self {
            messages: Mutex::new(Some(messages)),
            fail_open: false,
            hang_after: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail_open: true,
            ..Self::new(Vec::new())
        }
    }

    pub(crate) fn hanging(messages: Vec<Result<StreamMessage, ClientError>>) -> Self {
        Self {
            hang_after: true,
            ..Self::new(messages)
        }
    }
}

#[async_trait]
impl EventSource for FakeSource {
    async fn open(&self, _request: &StreamRequest) -> Result<MessageStream, ClientError> {
        if self.fail_open {
            return Err(stream_failure());
        }
        let messages = self.messages.lock().unwrap().take().unwrap_or_default();
        let replay = stream::iter(messages);
        if self.hang_after {
            Ok(replay.chain(stream::pending()).boxed())
        } else {
            Ok(replay.boxed())
        }
    }
}

/// Records every post together with the (virtual) time it started.
#[derive(Clone, Default)]
pub(crate) struct RecordingSink {
    pub(crate) posts: Arc<Mutex<Vec<(Instant, ReplyRequest)>>>,
    pub(crate) delay: Duration,
    pub(crate) fail: bool,
}

impl RecordingSink {
    pub(crate) fn posts(&self) -> Vec<ReplyRequest> {
        self.posts.lock().unwrap().iter().map(|(_, r)| r.clone()).collect()
    }

    pub(crate) fn post_times(&self) -> Vec<Instant> {
        self.posts.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }
}

#[async_trait]
impl ActionSink for RecordingSink {
    async fn post_reply(&self, reply: &ReplyRequest) -> Result<PostedStatus, ClientError> {
        self.posts.lock().unwrap().push((Instant::now(), reply.clone()));
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            return Err(ClientError::MissingMarker {
                body: r#"{"errors":[]}"#.to_owned(),
            });
        }
        Ok(PostedStatus {
            id: None,
            text: reply.status.clone(),
        })
    }
}

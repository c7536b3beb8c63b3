//! Reply posting objects.

use serde::{Deserialize, Serialize};

use super::event::EventId;

/// A status posted in reply to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyRequest {
    /// Full status body, including the leading `@handle`.
    pub status: String,
    pub in_reply_to_status_id: EventId,
}

impl ReplyRequest {
    /// Compose a reply addressed to `screen_name`.
    pub fn compose(screen_name: &str, body: &str, in_reply_to_status_id: EventId) -> Self {
        Self {
            status: format!("@{screen_name} {body}"),
            in_reply_to_status_id,
        }
    }

    /// Form fields sent to the update endpoint.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        vec![
            ("status".to_owned(), self.status.clone()),
            (
                "in_reply_to_status_id".to_owned(),
                self.in_reply_to_status_id.to_string(),
            ),
        ]
    }
}

/// The platform's acknowledgement of a posted status.
///
/// A post only counts as successful when the response carries `text`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostedStatus {
    #[serde(default)]
    pub id: Option<EventId>,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_reply() {
        let reply = ReplyRequest::compose("alice", "hi", 42);
        assert_eq!(reply.status, "@alice hi");
        assert_eq!(reply.in_reply_to_status_id, 42);
        assert_eq!(
            reply.form_fields(),
            vec![
                ("status".to_owned(), "@alice hi".to_owned()),
                ("in_reply_to_status_id".to_owned(), "42".to_owned()),
            ]
        );
    }

    #[test]
    fn test_posted_status_requires_text() {
        let ok: Result<PostedStatus, _> = serde_json::from_str(r#"{"id":7,"text":"@alice hi"}"#);
        assert_eq!(ok.unwrap().text, "@alice hi");

        let err: Result<PostedStatus, _> =
            serde_json::from_str(r#"{"errors":[{"code":187,"message":"Status is a duplicate."}]}"#);
        assert!(err.is_err());
    }
}

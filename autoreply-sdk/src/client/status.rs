//! `POST statuses/update.json` – post a reply.

use super::{ClientError, PlatformClient, authorized, check_status};
use crate::objects::{PostedStatus, ReplyRequest};

impl PlatformClient {
    /// Post `reply` and confirm the platform accepted it.
    ///
    /// Succeeds only when the response body carries the `text` marker.
    pub async fn post_reply(&self, reply: &ReplyRequest) -> Result<PostedStatus, ClientError> {
        let url = self.settings.rest_url.join("statuses/update.json")?;
        let fields = reply.form_fields();
        let header = self.sign("POST", &url, &fields);

        let resp = authorized(self.rest_http.post(url), header)
            .form(&fields)
            .send()
            .await?;
        let body = check_status(resp).await?.text().await?;

        serde_json::from_str(&body).map_err(|_| ClientError::MissingMarker { body })
    }
}

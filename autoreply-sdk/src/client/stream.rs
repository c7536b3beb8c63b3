//! Live event stream: connection and newline-delimited JSON framing.

use bytes::{Bytes, BytesMut};
use futures_util::stream::{self, BoxStream, Stream, StreamExt};

use super::{ClientError, PlatformClient, authorized, check_status};
use crate::objects::{StreamMessage, StreamMode, StreamRequest};

/// Lazily decoded, effectively unbounded sequence of stream messages.
///
/// Malformed lines surface as `Err` items; the stream ends after a
/// transport error or when the connection closes.
pub type MessageStream = BoxStream<'static, Result<StreamMessage, ClientError>>;

impl PlatformClient {
    /// Open one streaming connection for `request`.
    ///
    /// Sample mode is a signed `GET` without parameters; filter mode is a
    /// signed form `POST` carrying the track terms.
    pub async fn open_stream(&self, request: &StreamRequest) -> Result<MessageStream, ClientError> {
        let url = self.settings.stream_url.join(request.mode.endpoint())?;

        let builder = match request.mode {
            StreamMode::Sample => {
                let header = self.sign("GET", &url, &[]);
                authorized(self.stream_http.get(url), header)
            }
            StreamMode::Filter => {
                let header = self.sign("POST", &url, &request.params);
                authorized(self.stream_http.post(url), header).form(&request.params)
            }
        };

        let resp = check_status(builder.send().await?).await?;
        tracing::debug!(mode = %request.mode, "Stream connection established");
        Ok(decode_stream(resp.bytes_stream()))
    }
}

/// Accumulates raw chunks and yields complete, non-blank lines.
///
/// Blank lines are keep-alives and are skipped. A partial line longer than
/// `max_line` is an error.
#[derive(Debug)]
pub struct LineBuffer {
    buf: BytesMut,
    /// Bytes already searched for a newline.
    scanned: usize,
    max_line: usize,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::with_max_line(Self::DEFAULT_MAX_LINE)
    }
}

impl LineBuffer {
    pub const DEFAULT_MAX_LINE: usize = 1024 * 1024;

    pub fn with_max_line(max_line: usize) -> Self {
        Self {
            buf: BytesMut::new(),
            scanned: 0,
            max_line,
        }
    }

    pub fn extend(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Next complete line, trimmed.
    pub fn next_line(&mut self) -> Result<Option<String>, ClientError> {
        loop {
            let Some(offset) = self.buf[self.scanned..].iter().position(|b| *b == b'\n') else {
                self.scanned = self.buf.len();
                if self.buf.len() > self.max_line {
                    return Err(ClientError::LineTooLong {
                        limit: self.max_line,
                    });
                }
                return Ok(None);
            };
            let line = self.buf.split_to(self.scanned + offset + 1);
            self.scanned = 0;
            let text = String::from_utf8_lossy(&line);
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_owned()));
            }
        }
    }

    /// Whatever is left once the connection has closed.
    pub fn finish(&mut self) -> Option<String> {
        let rest = self.buf.split();
        self.scanned = 0;
        let text = String::from_utf8_lossy(&rest);
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_owned())
    }
}

/// Decode a chunked byte stream into [`StreamMessage`]s, one per line.
pub fn decode_stream<S, E>(chunks: S) -> MessageStream
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Send + 'static,
    ClientError: From<E>,
{
    let initial = Some((chunks.boxed(), LineBuffer::default()));

    stream::unfold(initial, |state| async move {
        let (mut chunks, mut buffer) = state?;
        loop {
            match buffer.next_line() {
                Ok(Some(line)) => return Some((parse_line(&line), Some((chunks, buffer)))),
                Ok(None) => {}
                Err(e) => return Some((Err(e), None)),
            }
            match chunks.next().await {
                Some(Ok(chunk)) => buffer.extend(&chunk),
                Some(Err(e)) => return Some((Err(ClientError::from(e)), None)),
                None => {
                    let line = buffer.finish()?;
                    return Some((parse_line(&line), None));
                }
            }
        }
    })
    .boxed()
}

fn parse_line(line: &str) -> Result<StreamMessage, ClientError> {
    serde_json::from_str(line).map_err(ClientError::from)
}

//! Channel factory for the producer → consumer hand-off.

use super::types::StreamItem;
use tokio::sync::mpsc;

/// Default buffer size for the stream channel.
///
/// The producer only waits on the consumer once this many items are
/// in flight.
pub const DEFAULT_CHANNEL_BUFFER: usize = 256;

/// Sender handle for StreamItem values.
pub type StreamItemSender = mpsc::Sender<StreamItem>;
/// Receiver handle for StreamItem values.
pub type StreamItemReceiver = mpsc::Receiver<StreamItem>;

/// Create the one-way StreamItem channel.
pub fn stream_item_channel() -> (StreamItemSender, StreamItemReceiver) {
    mpsc::channel(DEFAULT_CHANNEL_BUFFER)
}

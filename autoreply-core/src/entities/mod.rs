//! File-backed state: the persisted dedup set and the reply corpus.

pub mod dedup_cache;
pub mod reply_corpus;

pub use dedup_cache::{DedupCache, DedupError, DedupSettings};
pub use reply_corpus::{CorpusError, ReplyCorpus};

//! Candidate reply bodies, one per line.
//!
//! The file is read again on every use so edits take effect without a
//! restart.

use rand::Rng;
use rand::seq::IndexedRandom;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read reply corpus {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("reply corpus {0:?} has no usable lines")]
    Empty(PathBuf),
}

#[derive(Debug, Clone)]
pub struct ReplyCorpus {
    path: PathBuf,
}

impl ReplyCorpus {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all non-blank lines from disk.
    pub fn load(&self) -> Result<Vec<String>, CorpusError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| CorpusError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(content
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty())
            .map(str::to_owned)
            .collect())
    }

    /// Reload the corpus and pick one line uniformly at random.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String, CorpusError> {
        let lines = self.load()?;
        lines
            .choose(rng)
            .cloned()
            .ok_or_else(|| CorpusError::Empty(self.path.clone()))
    }
}

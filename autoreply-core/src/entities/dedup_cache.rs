//! Set of actors already replied to.
//!
//! The set is persisted as plain text, one actor per line. The file's
//! modification time is the only freshness signal: a file older than the
//! TTL is deleted on load and the session starts from scratch.

use compact_str::CompactString;
use itertools::Itertools;
use std::collections::HashSet;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum DedupError {
    #[error("dedup file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DedupError {
    fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| DedupError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Where the dedup set lives and how long it stays valid.
#[derive(Debug, Clone)]
pub struct DedupSettings {
    pub path: PathBuf,
    pub ttl: time::Duration,
}

impl DedupSettings {
    pub const DEFAULT_FILE: &str = "mentioned.txt";
    pub const DEFAULT_TTL: time::Duration = time::Duration::days(2);

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ttl: Self::DEFAULT_TTL,
        }
    }
}

impl Default for DedupSettings {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FILE)
    }
}

/// Actors replied to during this session (plus a fresh previous one).
///
/// Has a single owner at any time; actors are only ever added.
#[derive(Debug, Clone)]
pub struct DedupCache {
    path: PathBuf,
    actors: HashSet<CompactString>,
}

impl DedupCache {
    /// An empty cache that will be saved to `path`.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            actors: HashSet::new(),
        }
    }

    /// Load the persisted set if it is younger than the TTL.
    ///
    /// A stale file is removed; a missing file yields an empty cache.
    pub fn load(settings: &DedupSettings) -> Result<Self, DedupError> {
        let path = settings.path.as_path();
        let metadata = match std::fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No dedup file, starting empty");
                return Ok(Self::empty(path));
            }
            Err(e) => return Err(DedupError::io(path)(e)),
        };

        let modified = metadata.modified().map_err(DedupError::io(path))?;
        let age = time::OffsetDateTime::now_utc() - time::OffsetDateTime::from(modified);
        if age > settings.ttl {
            info!(path = %path.display(), %age, "Dedup file expired, discarding");
            std::fs::remove_file(path).map_err(DedupError::io(path))?;
            return Ok(Self::empty(path));
        }

        let content = std::fs::read_to_string(path).map_err(DedupError::io(path))?;
        let actors: HashSet<CompactString> = content
            .lines()
            .filter(|line| !line.is_empty())
            .map(CompactString::from)
            .collect();
        info!(path = %path.display(), actors = actors.len(), "Loaded dedup file");

        Ok(Self {
            path: path.to_path_buf(),
            actors,
        })
    }

    pub fn contains(&self, actor: &str) -> bool {
        self.actors.contains(actor)
    }

    /// Mark `actor` as handled. Returns `false` if it already was.
    pub fn record(&mut self, actor: impl Into<CompactString>) -> bool {
        self.actors.insert(actor.into())
    }

    /// Overwrite the dedup file with the current set.
    ///
    /// Writes to a sibling temp file and renames it into place. Returns the
    /// number of actors written.
    pub fn save(&self) -> Result<usize, DedupError> {
        let mut content = self.actors.iter().sorted().join("\n");
        if !content.is_empty() {
            content.push('\n');
        }

        let temp_path = self.temp_path();
        std::fs::write(&temp_path, content).map_err(DedupError::io(&temp_path))?;
        std::fs::rename(&temp_path, &self.path).map_err(DedupError::io(&self.path))?;

        Ok(self.actors.len())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}

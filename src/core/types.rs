//! VG-001: Core data model.
//!
//! Defines the configuration record, the persisted sentinel state (watch set,
//! known-object index, scan history), and the integrity events produced by a
//! scan. All persisted types derive Serialize/Deserialize for the state codec.

use super::error::{Result, VigilError};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration
// ============================================================================

/// Typed configuration, supplied once at `init`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VigilConfig {
    /// Files and directories to monitor, in order
    #[serde(alias = "watchPaths", alias = "WatchFiles")]
    pub watch_paths: Vec<String>,

    /// Follow symlinks found while recursing into watched directories
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Content digest algorithm
    #[serde(default)]
    pub digest: DigestAlgorithm,
}

/// Hash function used for file digests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    #[default]
    Sha256,
    Blake3,
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DigestAlgorithm::Sha256 => write!(f, "sha256"),
            DigestAlgorithm::Blake3 => write!(f, "blake3"),
        }
    }
}

/// Scan behaviour fixed at initialization and persisted with the state, so
/// every later scan compares digests produced the same way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanOptions {
    pub digest: DigestAlgorithm,
    pub follow_symlinks: bool,
}

// ============================================================================
// Events
// ============================================================================

/// Classification of a detected change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Created,
    Modified,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Created => write!(f, "created"),
            EventKind::Modified => write!(f, "modified"),
        }
    }
}

/// A single file integrity event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Event {
    pub kind: EventKind,
    #[serde(with = "super::pathenc")]
    pub path: PathBuf,
    /// Digest before the change; empty for `Created`
    pub old_digest: String,
    pub new_digest: String,
}

impl Event {
    pub fn created(path: PathBuf, digest: String) -> Self {
        Event {
            kind: EventKind::Created,
            path,
            old_digest: String::new(),
            new_digest: digest,
        }
    }

    pub fn modified(path: PathBuf, old_digest: String, new_digest: String) -> Self {
        Event {
            kind: EventKind::Modified,
            path,
            old_digest,
            new_digest,
        }
    }
}

/// Events recorded by one scan invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanRecord {
    pub timestamp: DateTime<Utc>,
    pub events: Vec<Event>,
}

// ============================================================================
// Sentinel state
// ============================================================================

/// Everything vigil persists: the watch set, the known-object index, and the
/// append-only scan history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SentinelState {
    #[serde(with = "super::pathenc::list")]
    pub(crate) watch_paths: Vec<PathBuf>,
    pub(crate) options: ScanOptions,
    /// Absolute file path → last observed digest
    #[serde(with = "super::pathenc::keys")]
    pub(crate) known_objects: IndexMap<PathBuf, String>,
    pub(crate) history: Vec<ScanRecord>,
}

impl SentinelState {
    /// Create a fresh state with an empty index and history. Relative watch
    /// paths are resolved against the current directory here, once, so later
    /// scans see the same watch set wherever they are started from.
    pub fn new(config: &VigilConfig) -> Result<Self> {
        let watch_paths = config
            .watch_paths
            .iter()
            .map(|p| std::path::absolute(p).map_err(|e| VigilError::read(p, e)))
            .collect::<Result<Vec<_>>>()?;
        Ok(SentinelState {
            watch_paths,
            options: ScanOptions {
                digest: config.digest,
                follow_symlinks: config.follow_symlinks,
            },
            known_objects: IndexMap::new(),
            history: Vec::new(),
        })
    }

    /// Create a fresh state watching `paths`, as given, with default scan
    /// options.
    pub fn with_watch_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        SentinelState {
            watch_paths: paths.into_iter().map(Into::into).collect(),
            options: ScanOptions::default(),
            known_objects: IndexMap::new(),
            history: Vec::new(),
        }
    }

    pub fn watch_paths(&self) -> &[PathBuf] {
        &self.watch_paths
    }

    pub fn options(&self) -> ScanOptions {
        self.options
    }

    pub fn known_objects(&self) -> &IndexMap<PathBuf, String> {
        &self.known_objects
    }

    /// Last observed digest for `path`, if it has ever been scanned.
    pub fn known_digest(&self, path: &Path) -> Option<&str> {
        self.known_objects.get(path).map(String::as_str)
    }

    /// All scan records, oldest first.
    pub fn history(&self) -> &[ScanRecord] {
        &self.history
    }
}

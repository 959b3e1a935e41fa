//! VG-011: Integrity scan — walk the watch set, digest every reachable file,
//! and classify changes against the known-object index.
//!
//! A scan is computed against a read-only view of the state and only touches
//! the state in [`ScanOutcome::commit`], so a read failure anywhere in the walk
//! leaves the index and history exactly as they were.

use crate::core::error::{Result, VigilError};
use crate::core::types::{DigestAlgorithm, Event, ScanRecord, SentinelState};
use crate::tripwire::hasher;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Uncommitted result of one pass over the watch set.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Events in visit order
    pub events: Vec<Event>,
    /// Digest for every file visited, changed or not
    pub updates: IndexMap<PathBuf, String>,
}

impl ScanOutcome {
    pub fn files_scanned(&self) -> usize {
        self.updates.len()
    }

    /// Apply the index delta and append a scan record stamped `timestamp`.
    /// Returns the events of this scan.
    pub fn commit(self, state: &mut SentinelState, timestamp: DateTime<Utc>) -> Vec<Event> {
        state.known_objects.extend(self.updates);
        state.history.push(ScanRecord {
            timestamp,
            events: self.events.clone(),
        });
        self.events
    }
}

/// Scan every watch entry. Nothing in `state` is modified.
pub fn scan(state: &SentinelState) -> Result<ScanOutcome> {
    let options = state.options();
    let mut outcome = ScanOutcome::default();

    for entry in state.watch_paths() {
        let root = std::path::absolute(entry).map_err(|e| VigilError::read(entry, e))?;
        let meta = std::fs::metadata(&root).map_err(|e| VigilError::read(&root, e))?;

        if meta.is_dir() {
            for file in walk_files(&root, options.follow_symlinks)? {
                visit(state, &mut outcome, file, options.digest)?;
            }
        } else if meta.is_file() {
            visit(state, &mut outcome, root, options.digest)?;
        } else {
            log::debug!("skipping non-regular watch entry {}", root.display());
        }
    }

    Ok(outcome)
}

/// Every regular file below `root`, depth first with children sorted by name.
fn walk_files(root: &Path, follow_symlinks: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(follow_symlinks)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            // Cycle through a followed symlink: the ancestor is already walked.
            Err(e) if e.loop_ancestor().is_some() => continue,
            Err(e) => {
                let path = e.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf);
                if follow_symlinks && is_dangling_link(&path) {
                    log::debug!("skipping dangling symlink {}", path.display());
                    continue;
                }
                return Err(VigilError::read(path, e.into()));
            }
        };
        // Unfollowed symlinks, directories, and special files are never diff targets.
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

fn is_dangling_link(path: &Path) -> bool {
    let is_link = std::fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false);
    is_link && std::fs::metadata(path).is_err()
}

fn visit(
    state: &SentinelState,
    outcome: &mut ScanOutcome,
    path: PathBuf,
    algorithm: DigestAlgorithm,
) -> Result<()> {
    let digest = hasher::hash_file(&path, algorithm)?;

    // A file reachable from two watch entries is compared against what this
    // scan already saw, so it yields at most one event.
    let known = outcome
        .updates
        .get(&path)
        .or_else(|| state.known_objects.get(&path));

    let event = match known {
        None => Some(Event::created(path.clone(), digest.clone())),
        Some(old) if *old != digest => {
            Some(Event::modified(path.clone(), old.clone(), digest.clone()))
        }
        Some(_) => None,
    };

    if let Some(event) = event {
        outcome.events.push(event);
    }
    outcome.updates.insert(path, digest);
    Ok(())
}

impl SentinelState {
    /// Run one scan and commit it: update the index for every visited file and
    /// append a scan record. On error nothing is committed.
    pub fn scan(&mut self) -> Result<Vec<Event>> {
        let outcome = scan(self)?;
        log::debug!(
            "scanned {} file(s) across {} watch path(s), {} event(s)",
            outcome.files_scanned(),
            self.watch_paths.len(),
            outcome.events.len()
        );
        Ok(outcome.commit(self, Utc::now()))
    }
}

//! Source watching for rebuild-on-change
//!
//! Polls mtime snapshots of the package sources and reports change sets.
//! Polling keeps the tool dependency-light and is plenty responsive at a
//! one-second interval for a tree of this size.

use chrono::Local;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use walkdir::WalkDir;

/// File extensions that trigger a rebuild when touched
const WATCHED_EXTENSIONS: &[&str] = &["py", "pyx", "cpp", "c", "h", "hpp"];

/// Mtimes of every watched file at one point in time
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    entries: BTreeMap<PathBuf, SystemTime>,
}

impl Snapshot {
    /// Capture the watched files under `root`.
    /// Compiled binaries and generated C do not count as sources, so the
    /// build's own outputs never retrigger it: generated `.c`/`.cpp` files
    /// are excluded via the artifact classifier.
    #[must_use]
    pub fn capture(root: &Path) -> Self {
        let mut entries = BTreeMap::new();

        for entry in WalkDir::new(root).into_iter().flatten() {
            let path = entry.path();
            if !entry.file_type().is_file() || !is_watched(path) {
                continue;
            }
            if let Ok(metadata) = entry.metadata()
                && let Ok(mtime) = metadata.modified()
            {
                entries.insert(path.to_path_buf(), mtime);
            }
        }

        Self { entries }
    }

    /// Number of watched files
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no files are watched
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Paths that differ between `self` (older) and `newer`
    #[must_use]
    pub fn diff(&self, newer: &Self) -> ChangeSet {
        let mut changes = ChangeSet::default();

        for (path, mtime) in &newer.entries {
            match self.entries.get(path) {
                None => changes.added.push(path.clone()),
                Some(old_mtime) if old_mtime != mtime => changes.modified.push(path.clone()),
                Some(_) => {}
            }
        }

        for path in self.entries.keys() {
            if !newer.entries.contains_key(path) {
                changes.removed.push(path.clone());
            }
        }

        changes
    }
}

fn is_watched(path: &Path) -> bool {
    let watched_ext = path
        .extension()
        .is_some_and(|ext| WATCHED_EXTENSIONS.contains(&ext.to_string_lossy().as_ref()));
    watched_ext && !crate::artifacts::is_generated_source(path)
}

/// Files that changed between two snapshots
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChangeSet {
    pub added: Vec<PathBuf>,
    pub modified: Vec<PathBuf>,
    pub removed: Vec<PathBuf>,
}

impl ChangeSet {
    /// Whether anything changed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.removed.is_empty()
    }

    /// Total number of changed paths
    #[must_use]
    pub fn len(&self) -> usize {
        self.added.len() + self.modified.len() + self.removed.len()
    }
}

/// Rebuild-on-change poller
#[derive(Debug)]
pub struct Watcher {
    root: PathBuf,
    interval: Duration,
}

impl Watcher {
    /// Watch the tree under `root` at a one-second interval
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            interval: Duration::from_secs(1),
        }
    }

    /// Override the polling interval
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Poll until the process is interrupted, invoking `on_change` for each
    /// nonempty change set.
    pub fn run<F>(&self, mut on_change: F) -> !
    where
        F: FnMut(&ChangeSet) -> anyhow::Result<()>,
    {
        let mut current = Snapshot::capture(&self.root);
        println!(
            "[{}] watching {} source file(s) under {}",
            timestamp(),
            current.len(),
            self.root.display()
        );

        loop {
            std::thread::sleep(self.interval);
            self.poll_once(&mut current, &mut on_change);
        }
    }

    /// One poll cycle: capture a fresh snapshot, diff it against `current`,
    /// and invoke `on_change` when anything changed. A failed rebuild is
    /// reported on stderr and does not stop polling; the snapshot still
    /// advances so the same change is not replayed next cycle.
    pub fn poll_once<F>(&self, current: &mut Snapshot, on_change: &mut F) -> ChangeSet
    where
        F: FnMut(&ChangeSet) -> anyhow::Result<()>,
    {
        let next = Snapshot::capture(&self.root);
        let changes = current.diff(&next);
        *current = next;

        if !changes.is_empty() {
            println!("[{}] {} file(s) changed, rebuilding", timestamp(), changes.len());
            if let Err(err) = on_change(&changes) {
                eprintln!("[{}] rebuild failed: {err}", timestamp());
            } else {
                println!("[{}] rebuild ok", timestamp());
            }
        }

        changes
    }
}

fn timestamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

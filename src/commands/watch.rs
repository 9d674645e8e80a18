//! Watch command
//!
//! Rebuild the extension modules whenever a package source changes. Runs
//! until interrupted.

use anyhow::Result;
use rudev::Watcher;
use rudev::runner::RunOptions;
use rudev::{Project, Python};

use super::build;

/// Poll the package sources and rerun the extension build on change
pub(crate) fn run(project: &Project, python: &Python, opts: &RunOptions) -> Result<()> {
    // Build once up front so the watcher starts from a good state; a broken
    // tree is reported but still watched.
    if let Err(err) = build::run(project, python, false, None, opts) {
        eprintln!("initial build failed: {err}");
    }

    Watcher::new(project.package_dir())
        .run(|_changes| build::run(project, python, false, None, opts))
}

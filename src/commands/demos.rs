//! Demos command
//!
//! Run every bundled example program: the top-level scripts in `demo/` plus
//! each demo subdirectory's `main.py`. Programs run sequentially and the
//! batch halts at the first failure. Underscore-prefixed helper files are
//! not entry points.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rudev::runner::{RunOptions, Step};
use rudev::{Project, Python};
use std::fs;
use std::path::{Path, PathBuf};

/// Run every demo program, halting on the first failure.
pub(crate) fn run(project: &Project, python: &Python, opts: &RunOptions) -> Result<()> {
    let demos = discover_demos(&project.demo_dir())
        .with_context(|| format!("Failed to list demos in {}", project.demo_dir().display()))?;

    if demos.is_empty() {
        anyhow::bail!("no demo programs found in {}", project.demo_dir().display());
    }

    let progress = if opts.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(demos.len() as u64)
    };
    if let Ok(style) = ProgressStyle::with_template("{pos}/{len} {msg}") {
        progress.set_style(style);
    }

    for demo in &demos {
        let name = demo
            .file_stem()
            .map_or_else(|| demo.display().to_string(), |s| s.to_string_lossy().into_owned());
        progress.set_message(name.clone());

        let mut cmd = python.script(demo);
        // Demos load assets relative to their own directory
        if let Some(dir) = demo.parent() {
            cmd.current_dir(dir);
        }
        progress.suspend(|| Step::new(format!("demo: {name}"), cmd).run(opts))?;
        progress.inc(1);
    }

    progress.finish_with_message("all demos passed");
    Ok(())
}

/// Enumerate demo entry points in a stable order.
///
/// Top-level `*.py` files count, as does `main.py` inside each
/// subdirectory. Files starting with `_` are batch helpers, not demos.
pub(crate) fn discover_demos(demo_dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut demos = Vec::new();

    if !demo_dir.is_dir() {
        return Ok(demos);
    }

    for entry in fs::read_dir(demo_dir)? {
        let entry = entry?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();

        if name.starts_with('_') {
            continue;
        }

        if path.is_file() && path.extension().is_some_and(|ext| ext == "py") {
            demos.push(path);
        } else if path.is_dir() {
            let main = path.join("main.py");
            if main.is_file() {
                demos.push(main);
            }
        }
    }

    demos.sort();
    Ok(demos)
}

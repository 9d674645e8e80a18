//! Docs commands
//!
//! Sphinx documentation builds in four modes: `save` (clean one-shot build
//! into `docs/build/html`), `test` (warnings-as-errors build into a
//! throwaway directory), `live` (sphinx-autobuild with browser reload,
//! runs until interrupted), and `clear` (delete the build directory).
//!
//! Every saving build clears its output directory first so no stale page
//! survives a rebuild.

use anyhow::{Context, Result};
use rudev::runner::{RunOptions, Step, StepError};
use rudev::{Project, Python, artifacts};

/// Documentation build modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Clean build into `docs/build/html`
    Save,
    /// Warnings-as-errors build into a scratch directory
    Test,
    /// Live-reload build, runs until interrupted
    Live,
}

/// Run a docs build step
pub(crate) fn run(project: &Project, python: &Python, mode: Mode, opts: &RunOptions) -> Result<()> {
    match mode {
        Mode::Save => save(project, python, opts),
        Mode::Test => test(project, python, opts),
        Mode::Live => live(project, python, opts),
    }
}

fn save(project: &Project, python: &Python, opts: &RunOptions) -> Result<()> {
    clear(project, opts)?;

    let mut cmd = python.module("sphinx");
    cmd.arg("-b").arg("html");
    cmd.arg(project.docs_source_dir());
    cmd.arg(project.docs_build_dir().join("html"));
    cmd.current_dir(project.root());

    Step::new("sphinx build", cmd).run(opts)?;
    Ok(())
}

fn test(project: &Project, python: &Python, opts: &RunOptions) -> Result<()> {
    let scratch = project.docs_scratch_dir();
    artifacts::clear_dir(&scratch)
        .with_context(|| format!("Failed to clear {}", scratch.display()))?;

    let mut cmd = python.module("sphinx");
    // -W promotes warnings to errors; the output is thrown away
    cmd.arg("-b").arg("html").arg("-W");
    cmd.arg(project.docs_source_dir());
    cmd.arg(&scratch);
    cmd.current_dir(project.root());

    Step::new("sphinx build (warnings as errors)", cmd).run(opts)?;
    Ok(())
}

fn live(project: &Project, python: &Python, opts: &RunOptions) -> Result<()> {
    let mut cmd = python.module("sphinx_autobuild");
    cmd.arg(project.docs_source_dir());
    cmd.arg(project.docs_build_dir().join("html"));
    cmd.current_dir(project.root());

    // The child shares our foreground process group, so Ctrl-C reaches it
    // directly. Dying by signal is how this tool is normally stopped.
    match Step::new("sphinx-autobuild", cmd).run(opts) {
        Err(StepError::Interrupted { .. }) | Ok(()) => Ok(()),
        Err(err) => Err(err.into()),
    }
}

/// Delete the docs build directory (also runs before every saving build)
pub(crate) fn clear(project: &Project, opts: &RunOptions) -> Result<()> {
    let build_dir = project.docs_build_dir();
    let report = artifacts::clear_dir(&build_dir)
        .with_context(|| format!("Failed to clear {}", build_dir.display()))?;
    if !opts.quiet {
        println!("docs build cleared: {}", report.summary());
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests can panic")]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fake_project() -> (TempDir, Project) {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("setup.py"), "").unwrap();
        fs::create_dir_all(temp.path().join("rubato")).unwrap();
        let project = Project::discover_from(temp.path()).unwrap();
        (temp, project)
    }

    fn quiet() -> RunOptions {
        RunOptions {
            verbose: false,
            quiet: true,
        }
    }

    #[test]
    fn clear_removes_stale_output() {
        let (temp, project) = fake_project();
        let html = temp.path().join("docs/build/html");
        fs::create_dir_all(&html).unwrap();
        fs::write(html.join("stale.html"), "<html/>").unwrap();

        clear(&project, &quiet()).unwrap();

        assert!(!temp.path().join("docs/build").exists());
    }

    #[test]
    fn clear_without_build_dir_is_fine() {
        let (_temp, project) = fake_project();

        assert!(clear(&project, &quiet()).is_ok());
    }
}

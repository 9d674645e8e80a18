//! Build command
//!
//! Compile the Cython extension modules in-place so the package is
//! importable straight from the checkout:
//! ```bash
//! python setup.py build_ext --inplace
//! ```

use anyhow::{Context, Result};
use rudev::runner::{RunOptions, Step};
use rudev::{Project, Python, artifacts};
use std::process::Command;

/// Build the extension modules in-place.
///
/// `force` clears compiled binaries and generated C sources first, so the
/// whole tree is re-cythonized. `jobs` caps parallel compiler processes.
pub(crate) fn run(
    project: &Project,
    python: &Python,
    force: bool,
    jobs: Option<usize>,
    opts: &RunOptions,
) -> Result<()> {
    if force {
        let mut report = artifacts::remove_compiled_binaries(&project.package_dir())
            .context("Failed to clear compiled binaries before rebuild")?;
        report.absorb(
            artifacts::remove_generated_sources(&project.package_dir())
                .context("Failed to clear generated sources before rebuild")?,
        );
        if !opts.quiet {
            println!("cleared stale artifacts: {}", report.summary());
        }
    }

    Step::new("build extensions", command(project, python, jobs)).run(opts)?;
    Ok(())
}

/// The extension build invocation, reusable by the aggregate pipeline
pub(crate) fn command(project: &Project, python: &Python, jobs: Option<usize>) -> Command {
    let mut cmd = python.script(&project.setup_py());
    cmd.arg("build_ext").arg("--inplace");
    if let Some(jobs) = jobs {
        cmd.arg(format!("--parallel={jobs}"));
    }
    cmd.current_dir(project.root());
    cmd
}

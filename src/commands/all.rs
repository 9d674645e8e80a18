//! Aggregate pipeline
//!
//! The full gate: build, then tests, then lint, then the demo batch, in
//! that order. The first tool that exits nonzero halts the run.

use anyhow::Result;
use rudev::runner::{Pipeline, RunOptions};
use rudev::{Project, Python};

use super::{build, demos, lint, test};

/// Run build -> test -> lint -> demos, halting at the first failure
pub(crate) fn run(project: &Project, python: &Python, opts: &RunOptions) -> Result<()> {
    Pipeline::new()
        .step("build extensions", build::command(project, python, None))
        .step(
            "pytest",
            test::command(project, python, &test::Selection::All),
        )
        .step("pylint", lint::command(project, python))
        .run(opts)?;

    demos::run(project, python, opts)
}

//! Pipeline step execution
//!
//! Every command this tool exposes boils down to running external tools in
//! order. A `Step` is one labelled tool invocation; a `Pipeline` is an
//! ordered list of steps that halts at the first failure. There are no
//! retries and no partial-failure recovery: a tool's nonzero exit aborts the
//! run and the tool's own output (streamed to the inherited stdio) is the
//! user-visible error.

use crate::debug;
use std::process::Command;
use thiserror::Error;

/// Step execution errors
#[derive(Debug, Error)]
pub enum StepError {
    #[error("{label}: failed to start `{program}`: {source}")]
    Spawn {
        label: String,
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{label}: exited with status {code}")]
    Failed { label: String, code: i32 },

    #[error("{label}: terminated by signal")]
    Interrupted { label: String },
}

/// One labelled invocation of an external tool
#[derive(Debug)]
pub struct Step {
    label: String,
    command: Command,
}

impl Step {
    /// Pair a human-readable label with a prepared command
    #[must_use]
    pub fn new(label: impl Into<String>, command: Command) -> Self {
        Self {
            label: label.into(),
            command,
        }
    }

    /// The command line this step will run, for `--verbose` echo
    #[must_use]
    pub fn render(&self) -> String {
        let mut rendered = self.command.get_program().to_string_lossy().into_owned();
        for arg in self.command.get_args() {
            rendered.push(' ');
            rendered.push_str(&arg.to_string_lossy());
        }
        rendered
    }

    /// Run the step, streaming output through the inherited stdio.
    ///
    /// Blocks until the child exits. Nonzero exit and signal termination
    /// both map to errors; `docs-live` is the one caller that downgrades
    /// `Interrupted` back to success.
    pub fn run(&mut self, opts: &RunOptions) -> Result<(), StepError> {
        if !opts.quiet {
            println!("==> {}", self.label);
        }
        if opts.verbose {
            println!("    $ {}", self.render());
        }
        debug::debug_log(&format!("running step: {}", self.render()));

        let status = self.command.status().map_err(|source| StepError::Spawn {
            label: self.label.clone(),
            program: self.command.get_program().to_string_lossy().into_owned(),
            source,
        })?;

        if status.success() {
            return Ok(());
        }

        match status.code() {
            Some(code) => Err(StepError::Failed {
                label: self.label.clone(),
                code,
            }),
            None => Err(StepError::Interrupted {
                label: self.label.clone(),
            }),
        }
    }
}

/// Output controls shared by every step
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Echo each command line before running it
    pub verbose: bool,
    /// Suppress step banners
    pub quiet: bool,
}

/// An ordered list of steps, halted by the first failure
#[derive(Debug, Default)]
pub struct Pipeline {
    steps: Vec<Step>,
}

impl Pipeline {
    /// Create an empty pipeline
    #[must_use]
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a step
    #[must_use]
    pub fn step(mut self, label: impl Into<String>, command: Command) -> Self {
        self.steps.push(Step::new(label, command));
        self
    }

    /// Whether the pipeline has no steps
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step in order; the first failure aborts the remainder.
    pub fn run(&mut self, opts: &RunOptions) -> Result<(), StepError> {
        for step in &mut self.steps {
            step.run(opts)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests can panic")]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sh(script: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(script);
        cmd
    }

    fn silent() -> RunOptions {
        RunOptions {
            verbose: false,
            quiet: true,
        }
    }

    #[test]
    fn successful_step() {
        let mut step = Step::new("noop", sh("true"));
        assert!(step.run(&silent()).is_ok());
    }

    #[test]
    fn failing_step_carries_label_and_code() {
        let mut step = Step::new("broken tool", sh("exit 3"));
        let err = step.run(&silent()).unwrap_err();

        assert!(matches!(
            err,
            StepError::Failed { ref label, code: 3 } if label == "broken tool"
        ));
    }

    #[test]
    #[cfg(unix)]
    fn signal_death_is_interrupted() {
        let mut step = Step::new("killed tool", sh("kill -TERM $$"));
        let err = step.run(&silent()).unwrap_err();

        assert!(matches!(
            err,
            StepError::Interrupted { ref label } if label == "killed tool"
        ));
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let mut step = Step::new("ghost", Command::new("definitely-not-a-real-tool"));
        let err = step.run(&silent()).unwrap_err();

        assert!(matches!(err, StepError::Spawn { .. }));
    }

    #[test]
    fn render_joins_program_and_args() {
        let mut cmd = Command::new("python3");
        cmd.args(["-m", "pytest", "rubato/tests"]);
        let step = Step::new("test", cmd);

        assert_eq!(step.render(), "python3 -m pytest rubato/tests");
    }

    #[test]
    fn pipeline_runs_steps_in_order() {
        let temp = TempDir::new().unwrap();
        let journal = temp.path().join("journal");
        let append = |word: &str| {
            sh(&format!("echo {word} >> {}", journal.display()))
        };

        let mut pipeline = Pipeline::new()
            .step("first", append("first"))
            .step("second", append("second"))
            .step("third", append("third"));
        pipeline.run(&silent()).unwrap();

        let log = fs::read_to_string(&journal).unwrap();
        assert_eq!(log, "first\nsecond\nthird\n");
    }

    #[test]
    fn pipeline_halts_at_first_failure() {
        let temp = TempDir::new().unwrap();
        let journal = temp.path().join("journal");

        let mut pipeline = Pipeline::new()
            .step(
                "first",
                sh(&format!("echo first >> {}", journal.display())),
            )
            .step("second", sh("exit 1"))
            .step(
                "third",
                sh(&format!("echo third >> {}", journal.display())),
            );
        let err = pipeline.run(&silent()).unwrap_err();

        assert!(matches!(err, StepError::Failed { ref label, .. } if label == "second"));
        let log = fs::read_to_string(&journal).unwrap();
        assert_eq!(log, "first\n", "steps after the failure must not run");
    }

    #[test]
    fn empty_pipeline_succeeds() {
        let mut pipeline = Pipeline::new();
        assert!(pipeline.is_empty());
        assert!(pipeline.run(&silent()).is_ok());
    }
}

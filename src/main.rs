//! Rudev command-line interface
//!
//! Build, test, and docs task runner for the rubato game engine

use anyhow::Result;
use clap::{Parser, Subcommand};
use rudev::runner::RunOptions;
use rudev::{Project, Python};
use std::process;

use crate::commands::docs;
use crate::commands::test::Selection;

/// Display an error with optional backtrace information
fn display_error(err: &anyhow::Error, backtrace_enabled: bool) {
    eprintln!("error: {err}");

    // Show error chain
    let mut source = err.source();
    while let Some(err) = source {
        eprintln!("caused by: {err}");
        source = err.source();
    }

    // Show backtrace if enabled
    if backtrace_enabled {
        let backtrace = err.backtrace();
        if backtrace.status() == std::backtrace::BacktraceStatus::Captured {
            eprintln!("\nBacktrace:");
            eprintln!("{backtrace}");
        }
    }
}

#[derive(Parser)]
#[command(name = "rudev")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Build, test, and docs task runner for the rubato game engine", long_about = None)]
#[command(disable_version_flag = true)]
pub(crate) struct Cli {
    /// Print version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    _version: Option<bool>,

    /// Echo each command line before running it
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress step banners and summaries
    #[arg(long, short, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Enable internal debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Show error backtraces (requires RUST_BACKTRACE)
    #[arg(long, global = true)]
    backtrace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile the extension modules in-place
    Build {
        /// Clear compiled binaries and generated sources first
        #[arg(long)]
        force: bool,

        /// Number of parallel compiler processes
        #[arg(long, short = 'j')]
        jobs: Option<usize>,
    },

    /// Build, then run the full test suite with coverage
    Test,

    /// Run only tests marked `rub`
    TestRub,

    /// Run only tests marked `sdl`
    TestSdl,

    /// Run tests not marked `rub`
    TestNoRub,

    /// Run tests not marked `sdl`
    TestNoSdl,

    /// Run tests whose name matches a filter
    TestIndiv {
        /// pytest -k expression
        name: String,
    },

    /// Static-analysis pass over the package tree
    Lint,

    /// Run every bundled demo program, halting on the first failure
    Demos,

    /// Rebuild the extension modules whenever a source file changes
    Watch,

    /// Prepare a fresh checkout: sync submodules and install dev extras
    Setup,

    /// Run the aggregate pipeline: build, test, lint, demos
    All,

    /// Clean one-shot documentation build into docs/build/html
    DocsSave,

    /// Documentation build with warnings treated as errors
    DocsTest,

    /// Live-reload documentation build (runs until interrupted)
    DocsLive,

    /// Delete the documentation build directory
    DocsClear,

    /// Delete compiled extension binaries from the package tree
    DeleteBin,

    /// Delete Cython-generated C/C++ sources from the package tree
    DeleteC,

    /// Delete the setuptools build directory
    DeleteBuild,

    /// Build sdist and wheel into dist/
    PypiBuild {
        /// Release version to stamp (exported as RUBATO_VERSION)
        #[arg(long)]
        package_version: Option<String>,
    },

    /// Upload the artifacts in dist/ to the package index
    PypiPublishWheels,

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    rudev::init_debug(cli.debug);

    let opts = RunOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    if let Err(e) = dispatch(cli.command, &opts) {
        display_error(&e, cli.backtrace);
        process::exit(1);
    }
}

/// Locate the checkout and the interpreter every pipeline step needs
fn toolchain() -> Result<(Project, Python)> {
    let project = Project::discover()?;
    let python = Python::locate()?;
    Ok((project, python))
}

fn dispatch(command: Commands, opts: &RunOptions) -> Result<()> {
    match command {
        Commands::Build { force, jobs } => {
            let (project, python) = toolchain()?;
            commands::build::run(&project, &python, force, jobs, opts)
        }
        Commands::Test => run_tests(&Selection::All, opts),
        Commands::TestRub => run_tests(&Selection::Marker("rub"), opts),
        Commands::TestSdl => run_tests(&Selection::Marker("sdl"), opts),
        Commands::TestNoRub => run_tests(&Selection::NotMarker("rub"), opts),
        Commands::TestNoSdl => run_tests(&Selection::NotMarker("sdl"), opts),
        Commands::TestIndiv { name } => run_tests(&Selection::Keyword(name), opts),
        Commands::Lint => {
            let (project, python) = toolchain()?;
            commands::lint::run(&project, &python, opts)
        }
        Commands::Demos => {
            let (project, python) = toolchain()?;
            commands::demos::run(&project, &python, opts)
        }
        Commands::Watch => {
            let (project, python) = toolchain()?;
            commands::watch::run(&project, &python, opts)
        }
        Commands::Setup => {
            let (project, python) = toolchain()?;
            commands::setup::run(&project, &python, opts)
        }
        Commands::All => {
            let (project, python) = toolchain()?;
            commands::all::run(&project, &python, opts)
        }
        Commands::DocsSave => run_docs(docs::Mode::Save, opts),
        Commands::DocsTest => run_docs(docs::Mode::Test, opts),
        Commands::DocsLive => run_docs(docs::Mode::Live, opts),
        Commands::DocsClear => {
            let project = Project::discover()?;
            commands::docs::clear(&project, opts)
        }
        Commands::DeleteBin => {
            let project = Project::discover()?;
            commands::clean::delete_bin(&project, opts)
        }
        Commands::DeleteC => {
            let project = Project::discover()?;
            commands::clean::delete_c(&project, opts)
        }
        Commands::DeleteBuild => {
            let project = Project::discover()?;
            commands::clean::delete_build(&project, opts)
        }
        Commands::PypiBuild { package_version } => {
            let (project, python) = toolchain()?;
            commands::pypi::build(&project, &python, package_version.as_deref(), opts)
        }
        Commands::PypiPublishWheels => {
            let (project, python) = toolchain()?;
            commands::pypi::publish_wheels(&project, &python, opts)
        }
        Commands::Completion { shell } => commands::completion::run(shell),
    }
}

fn run_tests(selection: &Selection, opts: &RunOptions) -> Result<()> {
    let (project, python) = toolchain()?;
    commands::test::run(&project, &python, selection, opts)
}

fn run_docs(mode: docs::Mode, opts: &RunOptions) -> Result<()> {
    let (project, python) = toolchain()?;
    commands::docs::run(&project, &python, mode, opts)
}

mod commands;

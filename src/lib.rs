//! Rudev CLI internal library code

/// Name of the Python package this tool orchestrates
pub const PACKAGE_NAME: &str = "rubato";

/// Environment variable consumed by setup.py to stamp the release version
pub const VERSION_ENV_VAR: &str = "RUBATO_VERSION";

pub mod artifacts;
pub mod debug;
pub mod env_vars;
pub mod project;
pub mod python;
pub mod runner;
pub mod watch;

// Re-export common types for convenience
pub use artifacts::{
    CleanReport, clear_dir, human_bytes, remove_compiled_binaries, remove_generated_sources,
};
pub use debug::{debug_log, init_debug, is_debug_enabled};
pub use project::{Project, ProjectError};
pub use python::Python;
pub use runner::{Pipeline, Step, StepError};
pub use watch::{ChangeSet, Snapshot, Watcher};

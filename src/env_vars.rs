//! Environment variable access
//!
//! Centralizes every environment variable the tool consults so the full
//! override surface is visible in one place.

use std::env;

/// `RUBATO_ROOT`: overrides project-root discovery entirely.
#[must_use]
pub fn project_root() -> Option<String> {
    non_empty(env::var("RUBATO_ROOT").ok())
}

/// `RUBATO_PYTHON`: interpreter override specific to this tool.
#[must_use]
pub fn rubato_python() -> Option<String> {
    non_empty(env::var("RUBATO_PYTHON").ok())
}

/// `PYTHON`: conventional interpreter override, lower priority.
#[must_use]
pub fn python() -> Option<String> {
    non_empty(env::var("PYTHON").ok())
}

/// `RUBATO_VERSION`: release version stamped into built distributions.
/// setup.py falls back to "0.0.0" when unset.
#[must_use]
pub fn package_version() -> Option<String> {
    non_empty(env::var("RUBATO_VERSION").ok())
}

/// Treat empty values the same as unset ones.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

//! Common test utilities and helpers
//!
//! This module provides shared functionality used across integration tests:
//! - Scrubbed binary invocation (via `rudev_command`)
//! - Fixture checkout and stub-tool utilities (via `helpers`)

pub(crate) mod helpers;

// Re-export rudev_command for convenient access
pub(crate) use helpers::rudev_command;

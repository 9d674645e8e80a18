//! Pipeline step commands
//!
//! One module per command surface entry; each exposes a `run` taking the
//! located project, the resolved interpreter, and the shared output options.

pub(crate) mod all;
pub(crate) mod build;
pub(crate) mod clean;
pub(crate) mod completion;
pub(crate) mod demos;
pub(crate) mod docs;
pub(crate) mod lint;
pub(crate) mod pypi;
pub(crate) mod setup;
pub(crate) mod watch;

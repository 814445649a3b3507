//! Command implementations
//!
//! Commands are split the way git splits them:
//!
//! - `plumbing`: direct object manipulation (hash-object, cat-file)
//! - `porcelain`: user-facing workflows (init, add, ls-files, status)
//!
//! Each command is an `impl Repository` block so the front end only ever
//! talks to a repository handle.

pub mod plumbing;
pub mod porcelain;

//! A minimal content-addressable object store with a git-compatible on-disk
//! format: loose zlib-compressed objects addressed by SHA-1, a binary "DIRC"
//! index describing tracked files, and a status engine reconciling the two
//! against the working tree.

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;

//! Core data structures and algorithms
//!
//! - `index`: binary index format (header, entries, integrity checksum)
//! - `objects`: object kinds, addresses, and the envelope codec
//! - `status`: working-tree reconciliation against the index

pub mod index;
pub mod objects;
pub mod status;

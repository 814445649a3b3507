//! Working-tree status
//!
//! Reconciles the index against the files actually on disk:
//!
//! - `inspector`: the reconciliation itself
//! - `report`: the resulting path classifications

pub mod inspector;
pub mod report;

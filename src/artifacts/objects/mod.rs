//! Object types and the on-disk codec
//!
//! All stored content is an object identified by a SHA-1 address. There are
//! three kinds:
//!
//! - **Blob**: file content (raw bytes)
//! - **Tree**: directory listing payload
//! - **Commit**: snapshot metadata payload
//!
//! Every object serializes to the same envelope: `<kind> <size>\0<payload>`.
//! The address is the SHA-1 of that envelope, so identical content always
//! lands at the same place in the store.

pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 address in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

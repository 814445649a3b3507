//! Typed errors for the object store and the index codec.
//!
//! Every failure the content-addressable store or the binary index codec can
//! produce is a variant here, carrying the offending prefix, address, offset,
//! or reason in its payload so callers can match on the kind and render a
//! precise message.

use crate::artifacts::objects::object_type::ObjectType;
use thiserror::Error;

/// Failures produced by the content-addressable object store.
#[derive(Debug, Error)]
pub enum ObjectError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid object id {id:?}: {reason}")]
    InvalidId { reason: String, id: String },

    #[error("invalid prefix {prefix:?}: an address prefix needs at least 2 characters")]
    InvalidPrefix { prefix: String },

    #[error("object not found for prefix {prefix:?}")]
    NotFound { prefix: String },

    #[error("prefix {prefix:?} is ambiguous: {count} objects match")]
    AmbiguousPrefix { prefix: String, count: usize },

    #[error("corrupt object: {reason}")]
    Corrupt { reason: String },

    #[error("unknown object kind {kind:?}")]
    UnknownKind { kind: String },

    #[error("object {address} is a {actual}, expected a {expected}")]
    TypeMismatch {
        address: String,
        expected: ObjectType,
        actual: ObjectType,
    },
}

/// Failures produced while encoding or decoding the binary index.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("index truncated at offset {offset}: {reason}")]
    Truncated { offset: usize, reason: String },

    #[error("invalid index signature: found {found:?}")]
    InvalidSignature { found: String },

    #[error("unsupported index version {0}")]
    UnsupportedVersion(u32),

    #[error("index checksum mismatch: stored {stored}, computed {computed}")]
    ChecksumMismatch { stored: String, computed: String },

    #[error("malformed index entry: {reason}")]
    MalformedEntry { reason: String },

    #[error("entry count mismatch: header declares {declared}, parsed {parsed}")]
    CountMismatch { declared: u32, parsed: u32 },
}

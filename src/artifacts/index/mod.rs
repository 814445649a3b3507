//! Binary index file format
//!
//! The index records the last-known state of every tracked file. Its layout
//! (version 2) is:
//!
//! ```text
//! Header (12 bytes):
//!   - Signature: "DIRC" (4 bytes)
//!   - Version: 2 (4 bytes, big-endian)
//!   - Entry count (4 bytes, big-endian)
//!
//! Entries (variable length):
//!   - Ten 32-bit stat fields, a 20-byte content hash, 16 bits of flags
//!   - NUL-terminated path, padded with NULs to 8-byte alignment
//!
//! Checksum (20 bytes):
//!   - SHA-1 over every preceding byte
//! ```

pub mod checksum;
pub mod entry_mode;
pub mod index_entry;
pub mod index_header;

/// Size of the trailing SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of the index header in bytes
pub const HEADER_SIZE: usize = 12;

/// Magic signature identifying index files
pub const SIGNATURE: &[u8; 4] = b"DIRC";

/// The only index file format version this codec accepts
pub const VERSION: u32 = 2;

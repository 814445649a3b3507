//! Integrity trailer for the index file
//!
//! Every byte written through [`Checksum`] feeds a running SHA-1; the digest
//! is appended last. Readers verify the trailer over the whole byte stream
//! before parsing anything, so a single flipped byte anywhere before the
//! digest is always reported as a checksum failure.

use crate::artifacts::index::CHECKSUM_SIZE;
use crate::errors::IndexError;
use sha1::{Digest, Sha1};
use std::io::Write;

/// Writer that hashes everything passing through it.
pub struct Checksum<W: Write> {
    writer: W,
    hasher: Sha1,
}

impl<W: Write> Checksum<W> {
    pub fn new(writer: W) -> Self {
        Checksum {
            writer,
            hasher: Sha1::new(),
        }
    }

    pub fn write(&mut self, data: &[u8]) -> std::io::Result<()> {
        self.hasher.update(data);
        self.writer.write_all(data)
    }

    /// Append the digest over everything written so far and flush.
    pub fn write_checksum(mut self) -> std::io::Result<()> {
        let digest = self.hasher.finalize();
        self.writer.write_all(&digest)?;
        self.writer.flush()
    }
}

/// Split a byte stream into body and trailing digest, verifying that the
/// digest covers every preceding byte.
pub fn split_verified(data: &[u8]) -> Result<&[u8], IndexError> {
    if data.len() < CHECKSUM_SIZE {
        return Err(IndexError::Truncated {
            offset: data.len(),
            reason: format!("no room for a {CHECKSUM_SIZE}-byte trailing checksum"),
        });
    }

    let (body, stored) = data.split_at(data.len() - CHECKSUM_SIZE);
    let computed = Sha1::digest(body);
    if computed.as_slice() != stored {
        return Err(IndexError::ChecksumMismatch {
            stored: to_hex(stored),
            computed: to_hex(&computed),
        });
    }

    Ok(body)
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}

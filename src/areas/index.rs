//! Index area (tracked-file states)
//!
//! The index is the persisted record of the last-known state of every
//! tracked file, used as the comparison baseline for status. On disk it is
//! the checksummed binary stream described in [`crate::artifacts::index`].
//!
//! Entries are kept in the order they were parsed; the writer always emits
//! them sorted by path, and the status engine sorts its own output, so
//! neither depends on the in-memory order.

use crate::artifacts::index::checksum::{self, Checksum};
use crate::artifacts::index::index_entry::{ENTRY_BLOCK, ENTRY_FIXED_SIZE, IndexEntry};
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::{CHECKSUM_SIZE, HEADER_SIZE, VERSION};
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::errors::IndexError;
use std::io::Read;
use std::ops::DerefMut;
use std::path::Path;

/// In-memory view of the index file.
#[derive(Debug, Clone)]
pub struct Index {
    path: Box<Path>,
    entries: Vec<IndexEntry>,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load the index from disk, replacing the in-memory entries.
    ///
    /// A missing or empty index file is an empty index, not an error.
    /// Reading holds a shared lock so a concurrent writer cannot interleave.
    pub fn rehydrate(&mut self) -> Result<(), IndexError> {
        self.entries.clear();

        if !self.path.exists() {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new().read(true).open(&self.path)?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        if lock.deref_mut().metadata()?.len() == 0 {
            return Ok(());
        }

        let mut data = Vec::new();
        lock.deref_mut().read_to_end(&mut data)?;
        self.entries = Self::parse(&data)?;

        Ok(())
    }

    /// Parse a complete index byte stream into its entries.
    ///
    /// The trailing checksum is verified over the whole stream first, then
    /// the header, then each 8-byte-aligned entry, and finally the entry
    /// count is reconciled against the header's declaration.
    pub fn parse(data: &[u8]) -> Result<Vec<IndexEntry>, IndexError> {
        if data.len() < HEADER_SIZE + CHECKSUM_SIZE {
            return Err(IndexError::Truncated {
                offset: data.len(),
                reason: format!(
                    "an index needs at least {} bytes of header and checksum",
                    HEADER_SIZE + CHECKSUM_SIZE
                ),
            });
        }

        let body = checksum::split_verified(data)?;
        let header = IndexHeader::deserialize(body)?;

        let mut entries = Vec::with_capacity(header.entries_count as usize);
        let mut offset = HEADER_SIZE;
        while offset < body.len() {
            let remaining = &body[offset..];
            if remaining.len() < ENTRY_FIXED_SIZE {
                return Err(IndexError::Truncated {
                    offset,
                    reason: format!(
                        "{} bytes left, a fixed-width record needs {ENTRY_FIXED_SIZE}",
                        remaining.len()
                    ),
                });
            }

            let path_len = remaining[ENTRY_FIXED_SIZE..]
                .iter()
                .position(|&byte| byte == 0)
                .ok_or_else(|| IndexError::Truncated {
                    offset,
                    reason: "entry path is not NUL-terminated".to_string(),
                })?;
            let entry_len =
                (ENTRY_FIXED_SIZE + path_len + 1).div_ceil(ENTRY_BLOCK) * ENTRY_BLOCK;
            if entry_len > remaining.len() {
                return Err(IndexError::Truncated {
                    offset,
                    reason: "entry padding runs past the end of the index".to_string(),
                });
            }

            entries.push(IndexEntry::deserialize(&remaining[..entry_len])?);
            offset += entry_len;
        }

        if entries.len() as u32 != header.entries_count {
            return Err(IndexError::CountMismatch {
                declared: header.entries_count,
                parsed: entries.len() as u32,
            });
        }

        Ok(entries)
    }

    /// Insert an entry, replacing any previous entry for the same path.
    pub fn add(&mut self, entry: IndexEntry) {
        match self.entries.iter_mut().find(|existing| existing.path == entry.path) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Persist the in-memory entries, sorted by path and checksummed.
    ///
    /// Writing holds an exclusive lock for the duration.
    pub fn write_updates(&mut self) -> Result<(), IndexError> {
        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)?;

        self.entries.sort();

        let mut writer = Checksum::new(lock.deref_mut());
        let header = IndexHeader::new(VERSION, self.entries.len() as u32);
        writer.write(&header.serialize()?)?;
        for entry in &self.entries {
            writer.write(&entry.serialize()?)?;
        }
        writer.write_checksum()?;

        Ok(())
    }
}

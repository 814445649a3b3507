//! Index entry representation
//!
//! Each entry records one tracked file: its path, the address of its content
//! blob at index time, and the stat metadata captured when it was staged.
//!
//! ## Entry Format
//!
//! Ten 32-bit stat fields, the packed 20-byte content hash, and 16 bits of
//! flags, followed by the NUL-terminated path and NUL padding up to the next
//! 8-byte boundary.

use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::IndexError;
use byteorder::{ByteOrder, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use is_executable::IsExecutable;
use std::fs::Metadata;
use std::io::Write;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

/// Maximum path length recordable in the flags field
pub const MAX_PATH_SIZE: usize = 0xFFF;

/// Block size for entry alignment (8 bytes)
pub const ENTRY_BLOCK: usize = 8;

/// Width of the fixed-size portion of an entry: ten 32-bit stat fields,
/// a 20-byte hash, and 16 bits of flags
pub const ENTRY_FIXED_SIZE: usize = 62;

/// Bit position of the 2-bit merge stage inside the flags field
const STAGE_SHIFT: u16 = 12;
const STAGE_MASK: u16 = 0b11;

/// One tracked file's last-known state.
#[derive(Debug, Clone, Default, new)]
pub struct IndexEntry {
    /// File path relative to the repository root
    pub path: PathBuf,
    /// Address of the file's content blob at index time
    pub oid: ObjectId,
    /// Stat metadata captured when the entry was written
    pub metadata: EntryMetadata,
}

impl IndexEntry {
    /// Merge stage number (flags bits 12-13). Always 0 outside a merge.
    pub fn stage(&self) -> u8 {
        ((self.metadata.flags >> STAGE_SHIFT) & STAGE_MASK) as u8
    }
}

impl PartialEq for IndexEntry {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for IndexEntry {}

impl PartialOrd for IndexEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IndexEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.path.cmp(&other.path)
    }
}

/// Stat fields stored alongside each entry, truncated to the 32-bit widths
/// the on-disk format uses.
#[derive(Debug, Clone, Default)]
pub struct EntryMetadata {
    pub ctime_s: u32,
    pub ctime_n: u32,
    pub mtime_s: u32,
    pub mtime_n: u32,
    pub dev: u32,
    pub ino: u32,
    pub mode: EntryMode,
    pub uid: u32,
    pub gid: u32,
    pub size: u32,
    /// Path length in the low 12 bits, merge stage in bits 12-13
    pub flags: u16,
}

impl EntryMetadata {
    /// Capture metadata for a live file.
    ///
    /// `relative` is the workspace-relative path recorded in the flags
    /// field; `absolute` is where the file actually lives.
    pub fn from_fs(
        relative: &Path,
        absolute: &Path,
        metadata: &Metadata,
    ) -> Result<Self, IndexError> {
        if !metadata.is_file() {
            return Err(IndexError::MalformedEntry {
                reason: format!("{} is not a regular file", relative.display()),
            });
        }
        let name_length = relative
            .to_str()
            .ok_or_else(|| IndexError::MalformedEntry {
                reason: format!("path {relative:?} is not valid UTF-8"),
            })?
            .len();
        let mode = if absolute.is_executable() {
            EntryMode::Executable
        } else {
            EntryMode::Regular
        };

        Ok(Self {
            ctime_s: metadata.ctime() as u32,
            ctime_n: metadata.ctime_nsec() as u32,
            mtime_s: metadata.mtime() as u32,
            mtime_n: metadata.mtime_nsec() as u32,
            dev: metadata.dev() as u32,
            ino: metadata.ino() as u32,
            mode,
            uid: metadata.uid(),
            gid: metadata.gid(),
            size: metadata.size() as u32,
            flags: name_length.min(MAX_PATH_SIZE) as u16,
        })
    }
}

impl Packable for IndexEntry {
    type Error = IndexError;

    fn serialize(&self) -> Result<Bytes, IndexError> {
        let path = self.path.to_str().ok_or_else(|| IndexError::MalformedEntry {
            reason: format!("path {:?} is not valid UTF-8", self.path),
        })?;

        let mut bytes = Vec::new();
        bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.ctime_s)?;
        bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.ctime_n)?;
        bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.mtime_s)?;
        bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.mtime_n)?;
        bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.dev)?;
        bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.ino)?;
        bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.mode.as_u32())?;
        bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.uid)?;
        bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.gid)?;
        bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.size)?;
        self.oid.write_binary_to(&mut bytes)?;
        bytes.write_u16::<byteorder::NetworkEndian>(self.metadata.flags)?;
        bytes.write_all(path.as_bytes())?;

        // NUL-terminate, then pad to the 8-byte boundary
        bytes.push(0);
        while bytes.len() % ENTRY_BLOCK != 0 {
            bytes.push(0);
        }

        Ok(Bytes::from(bytes))
    }
}

impl Unpackable for IndexEntry {
    type Error = IndexError;

    fn deserialize(data: &[u8]) -> Result<Self, IndexError> {
        if data.len() < ENTRY_FIXED_SIZE {
            return Err(IndexError::Truncated {
                offset: data.len(),
                reason: format!("a fixed-width record needs {ENTRY_FIXED_SIZE} bytes"),
            });
        }

        let ctime_s = byteorder::NetworkEndian::read_u32(&data[0..4]);
        let ctime_n = byteorder::NetworkEndian::read_u32(&data[4..8]);
        let mtime_s = byteorder::NetworkEndian::read_u32(&data[8..12]);
        let mtime_n = byteorder::NetworkEndian::read_u32(&data[12..16]);
        let dev = byteorder::NetworkEndian::read_u32(&data[16..20]);
        let ino = byteorder::NetworkEndian::read_u32(&data[20..24]);
        let mode = EntryMode::try_from(byteorder::NetworkEndian::read_u32(&data[24..28]))?;
        let uid = byteorder::NetworkEndian::read_u32(&data[28..32]);
        let gid = byteorder::NetworkEndian::read_u32(&data[32..36]);
        let size = byteorder::NetworkEndian::read_u32(&data[36..40]);
        let hash: [u8; 20] = data[40..60]
            .try_into()
            .map_err(|_| IndexError::MalformedEntry {
                reason: "content hash is not 20 bytes".to_string(),
            })?;
        let oid = ObjectId::from_digest(hash);
        let flags = byteorder::NetworkEndian::read_u16(&data[60..62]);

        let path_end = data[ENTRY_FIXED_SIZE..]
            .iter()
            .position(|&byte| byte == 0)
            .ok_or_else(|| IndexError::Truncated {
                offset: data.len(),
                reason: "entry path is not NUL-terminated".to_string(),
            })?;
        let path_bytes = &data[ENTRY_FIXED_SIZE..ENTRY_FIXED_SIZE + path_end];
        let path = PathBuf::from(std::str::from_utf8(path_bytes).map_err(|_| {
            IndexError::MalformedEntry {
                reason: "entry path is not valid UTF-8".to_string(),
            }
        })?);

        Ok(IndexEntry {
            path,
            oid,
            metadata: EntryMetadata {
                ctime_s,
                ctime_n,
                mtime_s,
                mtime_n,
                dev,
                ino,
                mode,
                uid,
                gid,
                size,
                flags,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use sha1::{Digest, Sha1};

    #[fixture]
    fn oid() -> ObjectId {
        ObjectId::from_digest(Sha1::digest(b"test data").into())
    }

    fn metadata_with_flags(flags: u16) -> EntryMetadata {
        EntryMetadata {
            flags,
            ..Default::default()
        }
    }

    #[rstest]
    fn entry_round_trips(oid: ObjectId) {
        let entry = IndexEntry::new(
            PathBuf::from("src/lib.rs"),
            oid,
            EntryMetadata {
                ctime_s: 100,
                mtime_s: 200,
                dev: 3,
                ino: 4,
                uid: 1000,
                gid: 1000,
                size: 512,
                flags: 10,
                ..Default::default()
            },
        );

        let bytes = entry.serialize().unwrap();
        let parsed = IndexEntry::deserialize(&bytes).unwrap();

        assert_eq!(parsed.path, entry.path);
        assert_eq!(parsed.oid, entry.oid);
        assert_eq!(parsed.metadata.mtime_s, 200);
        assert_eq!(parsed.metadata.size, 512);
    }

    #[rstest]
    #[case("a")]
    #[case("a/b/c.txt")]
    #[case("exactly-one-full-padding-block")]
    fn serialized_entries_are_block_aligned(oid: ObjectId, #[case] path: &str) {
        let entry = IndexEntry::new(PathBuf::from(path), oid, metadata_with_flags(path.len() as u16));
        let bytes = entry.serialize().unwrap();

        assert_eq!(bytes.len() % ENTRY_BLOCK, 0);
        // the terminator itself must survive padding
        assert_eq!(bytes[ENTRY_FIXED_SIZE + path.len()], 0);
    }

    #[rstest]
    fn stage_lives_in_flag_bits_twelve_and_thirteen(oid: ObjectId) {
        let entry = IndexEntry::new(
            PathBuf::from("conflicted.txt"),
            oid,
            metadata_with_flags(0b0010_0000_0000_1110),
        );
        assert_eq!(entry.stage(), 2);
    }

    #[rstest]
    fn unterminated_path_is_truncated(oid: ObjectId) {
        let entry = IndexEntry::new(PathBuf::from("some/file"), oid, metadata_with_flags(9));
        let bytes = entry.serialize().unwrap();

        let err = IndexEntry::deserialize(&bytes[..ENTRY_FIXED_SIZE + 2]).unwrap_err();
        assert!(matches!(err, IndexError::Truncated { .. }));
    }

    #[rstest]
    fn invalid_mode_word_is_rejected(oid: ObjectId) {
        let entry = IndexEntry::new(PathBuf::from("f"), oid, metadata_with_flags(1));
        let mut bytes = entry.serialize().unwrap().to_vec();
        // overwrite the mode field with a directory mode
        bytes[24..28].copy_from_slice(&0o040000u32.to_be_bytes());

        let err = IndexEntry::deserialize(&bytes).unwrap_err();
        assert!(matches!(err, IndexError::MalformedEntry { .. }));
    }
}

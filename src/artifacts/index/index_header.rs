use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::errors::IndexError;
use byteorder::{ByteOrder, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;

/// Fixed 12-byte index preamble: signature, version, entry count.
#[derive(Debug, Clone, new)]
pub struct IndexHeader {
    pub version: u32,
    pub entries_count: u32,
}

impl Packable for IndexHeader {
    type Error = IndexError;

    fn serialize(&self) -> Result<Bytes, IndexError> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE);
        bytes.extend_from_slice(SIGNATURE);
        bytes.write_u32::<byteorder::NetworkEndian>(self.version)?;
        bytes.write_u32::<byteorder::NetworkEndian>(self.entries_count)?;
        Ok(Bytes::from(bytes))
    }
}

impl Unpackable for IndexHeader {
    type Error = IndexError;

    fn deserialize(data: &[u8]) -> Result<Self, IndexError> {
        if data.len() < HEADER_SIZE {
            return Err(IndexError::Truncated {
                offset: data.len(),
                reason: format!("an index header needs {HEADER_SIZE} bytes"),
            });
        }
        if &data[0..4] != SIGNATURE {
            return Err(IndexError::InvalidSignature {
                found: String::from_utf8_lossy(&data[0..4]).into_owned(),
            });
        }

        let version = byteorder::NetworkEndian::read_u32(&data[4..8]);
        if version != VERSION {
            return Err(IndexError::UnsupportedVersion(version));
        }

        let entries_count = byteorder::NetworkEndian::read_u32(&data[8..12]);
        Ok(Self::new(version, entries_count))
    }
}

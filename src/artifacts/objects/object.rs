//! The object envelope codec
//!
//! On disk every object is `<kind> <size>\0<payload>`, zlib-compressed by the
//! database. The address is the SHA-1 of the uncompressed envelope, so it is
//! derived from kind and payload and never assigned independently.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::ObjectError;
use bytes::Bytes;
use derive_new::new;
use sha1::{Digest, Sha1};

/// Serialize a value into its on-disk byte form.
pub trait Packable {
    type Error;

    fn serialize(&self) -> Result<Bytes, Self::Error>;
}

/// Parse a value back out of its on-disk byte form.
pub trait Unpackable: Sized {
    type Error;

    fn deserialize(data: &[u8]) -> Result<Self, Self::Error>;
}

/// An immutable unit of stored content: a kind plus a raw payload.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Object {
    object_type: ObjectType,
    payload: Bytes,
}

impl Object {
    /// Wrap raw bytes as a blob.
    pub fn blob(payload: impl Into<Bytes>) -> Self {
        Self::new(ObjectType::Blob, payload.into())
    }

    pub fn object_type(&self) -> ObjectType {
        self.object_type
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    pub fn size(&self) -> usize {
        self.payload.len()
    }

    fn header(&self) -> Vec<u8> {
        format!("{} {}\0", self.object_type, self.payload.len()).into_bytes()
    }

    /// Content address: SHA-1 over the full envelope.
    pub fn object_id(&self) -> ObjectId {
        let mut hasher = Sha1::new();
        hasher.update(self.header());
        hasher.update(&self.payload);
        ObjectId::from_digest(hasher.finalize().into())
    }
}

impl Packable for Object {
    type Error = ObjectError;

    fn serialize(&self) -> Result<Bytes, ObjectError> {
        let mut bytes = self.header();
        bytes.extend_from_slice(&self.payload);
        Ok(Bytes::from(bytes))
    }
}

impl Unpackable for Object {
    type Error = ObjectError;

    fn deserialize(data: &[u8]) -> Result<Self, ObjectError> {
        let nul = data
            .iter()
            .position(|&byte| byte == 0)
            .ok_or_else(|| ObjectError::Corrupt {
                reason: "missing NUL separator after header".to_string(),
            })?;
        let header = std::str::from_utf8(&data[..nul]).map_err(|_| ObjectError::Corrupt {
            reason: "header is not valid UTF-8".to_string(),
        })?;
        let (kind, size) = header.split_once(' ').ok_or_else(|| ObjectError::Corrupt {
            reason: format!("malformed header {header:?}"),
        })?;
        let object_type = kind.parse::<ObjectType>().map_err(|_| ObjectError::Corrupt {
            reason: format!("unknown object kind {kind:?}"),
        })?;
        let size = size.parse::<usize>().map_err(|_| ObjectError::Corrupt {
            reason: format!("malformed payload length {size:?}"),
        })?;

        let payload = &data[nul + 1..];
        if payload.len() != size {
            return Err(ObjectError::Corrupt {
                reason: format!("header declares {size} bytes, payload has {}", payload.len()),
            });
        }

        Ok(Self::new(object_type, Bytes::copy_from_slice(payload)))
    }
}

//! Object address (SHA-1 hash)
//!
//! Addresses are 40-character hexadecimal strings. On disk an object lives at
//! `<objects>/<first-2-chars>/<remaining-38-chars>`; inside index entries the
//! same address is packed as 20 raw bytes.

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::errors::ObjectError;
use std::io;
use std::path::PathBuf;

/// Content address of a stored object.
///
/// Always a validated 40-character hex string; constructed either from a
/// digest or by parsing user input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an address from a string.
    pub fn try_parse(id: String) -> Result<Self, ObjectError> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(ObjectError::InvalidId {
                reason: format!("expected {OBJECT_ID_LENGTH} characters, got {}", id.len()),
                id,
            });
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ObjectError::InvalidId {
                reason: "not a hexadecimal string".to_string(),
                id,
            });
        }
        Ok(Self(id))
    }

    /// Hex-encode a raw 20-byte digest.
    pub fn from_digest(digest: [u8; 20]) -> Self {
        Self(digest.iter().map(|byte| format!("{byte:02x}")).collect())
    }

    /// Write the address in packed binary form (20 bytes).
    pub fn write_binary_to<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        for i in (0..OBJECT_ID_LENGTH).step_by(2) {
            let byte = u8::from_str_radix(&self.0[i..i + 2], 16)
                .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "invalid hex digit"))?;
            writer.write_all(&[byte])?;
        }
        Ok(())
    }

    /// Storage path for this address: `XX/YYYY...` with a 2-character
    /// fan-out directory.
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// Abbreviated form (first 7 characters).
    pub fn to_short_id(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

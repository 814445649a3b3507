use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::ObjectError;
use std::io::{Read, Write};
use std::path::Path;

/// Loose-object database.
///
/// Each object lives at `<objects>/<first-2-chars>/<remaining-38-chars>`,
/// zlib-compressed. Content addressing makes the store write-once: the same
/// content always resolves to the same path, so an existing record is
/// trusted and never rewritten.
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Write an object unless its address already exists, and return the
    /// address either way.
    ///
    /// The record is written to a temporary file in the fan-out directory
    /// and renamed into place, so a concurrent reader never observes a
    /// partially written record.
    pub fn store(&self, object: &Object) -> Result<ObjectId, ObjectError> {
        let id = object.object_id();
        let object_path = self.path.join(id.to_path());

        if !object_path.exists() {
            let object_dir = self.path.join(&id.as_ref()[..2]);
            std::fs::create_dir_all(&object_dir)?;

            let compressed = Self::compress(&object.serialize()?)?;
            let mut temp = tempfile::NamedTempFile::new_in(&object_dir)?;
            temp.write_all(&compressed)?;
            temp.persist(&object_path)
                .map_err(|persist| ObjectError::Io(persist.error))?;
        }

        Ok(id)
    }

    /// Resolve an address prefix of at least 2 characters to the single
    /// object it identifies.
    ///
    /// Only the fan-out directory named by the first two characters is
    /// scanned; a missing directory means no object can match.
    pub fn resolve_prefix(&self, prefix: &str) -> Result<ObjectId, ObjectError> {
        if prefix.len() < 2 {
            return Err(ObjectError::InvalidPrefix {
                prefix: prefix.to_string(),
            });
        }

        let (dir_name, rest) = prefix.split_at(2);
        let dir_path = self.path.join(dir_name);
        if !dir_path.is_dir() {
            return Err(ObjectError::NotFound {
                prefix: prefix.to_string(),
            });
        }

        let mut matches = Vec::new();
        for entry in std::fs::read_dir(&dir_path)? {
            let file_name = entry?.file_name();
            let file_name = file_name.to_string_lossy();
            if file_name.starts_with(rest) {
                if let Ok(id) = ObjectId::try_parse(format!("{dir_name}{file_name}")) {
                    matches.push(id);
                }
            }
        }

        match matches.len() {
            0 => Err(ObjectError::NotFound {
                prefix: prefix.to_string(),
            }),
            1 => Ok(matches.remove(0)),
            count => Err(ObjectError::AmbiguousPrefix {
                prefix: prefix.to_string(),
                count,
            }),
        }
    }

    /// Read and decode the object stored at a full address.
    pub fn load(&self, id: &ObjectId) -> Result<Object, ObjectError> {
        let object_path = self.path.join(id.to_path());
        let compressed = std::fs::read(&object_path)?;
        let raw = Self::decompress(&compressed).map_err(|_| ObjectError::Corrupt {
            reason: format!("{id}: invalid zlib stream"),
        })?;

        Object::deserialize(&raw).map_err(|err| Self::at_address(err, id))
    }

    /// Resolve a prefix and load the object it names.
    pub fn read(&self, prefix: &str) -> Result<Object, ObjectError> {
        let id = self.resolve_prefix(prefix)?;
        self.load(&id)
    }

    /// As [`read`](Self::read), but require a specific kind.
    pub fn read_typed(&self, prefix: &str, expected: ObjectType) -> Result<Object, ObjectError> {
        let id = self.resolve_prefix(prefix)?;
        let object = self.load(&id)?;

        if object.object_type() != expected {
            return Err(ObjectError::TypeMismatch {
                address: id.to_string(),
                expected,
                actual: object.object_type(),
            });
        }

        Ok(object)
    }

    fn at_address(err: ObjectError, id: &ObjectId) -> ObjectError {
        match err {
            ObjectError::Corrupt { reason } => ObjectError::Corrupt {
                reason: format!("{id}: {reason}"),
            },
            other => other,
        }
    }

    fn compress(data: &[u8]) -> Result<Vec<u8>, ObjectError> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(data)?;
        Ok(encoder.finish()?)
    }

    fn decompress(data: &[u8]) -> std::io::Result<Vec<u8>> {
        let mut decoder = flate2::read::ZlibDecoder::new(data);
        let mut raw = Vec::new();
        decoder.read_to_end(&mut raw)?;
        Ok(raw)
    }
}

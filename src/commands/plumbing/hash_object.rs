use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_type::ObjectType;
use std::io::Write;

impl Repository {
    /// Hash a file as an object of the given kind and print the address,
    /// optionally writing the object to the database.
    pub fn hash_object(
        &mut self,
        file: &str,
        object_type: ObjectType,
        write: bool,
    ) -> anyhow::Result<()> {
        let data = self.workspace().read_file(file.as_ref())?;
        let object = Object::new(object_type, data);

        let id = if write {
            self.ensure_initialized()?;
            self.database().store(&object)?
        } else {
            object.object_id()
        };

        writeln!(self.writer(), "{id}")?;

        Ok(())
    }
}

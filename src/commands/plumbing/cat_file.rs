use crate::areas::repository::Repository;
use crate::artifacts::objects::object_type::ObjectType;
use std::io::Write;

impl Repository {
    /// Print the payload of (or facts about) the object named by an address
    /// prefix.
    ///
    /// A kind word as the mode (`blob`, `tree`, `commit`) requires the
    /// stored object to have that kind; `type` and `size` print metadata;
    /// `pretty` prints the raw payload of any kind.
    pub fn cat_file(&mut self, mode: &str, prefix: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        match mode {
            "blob" | "tree" | "commit" => {
                let expected = mode.parse::<ObjectType>()?;
                let object = self.database().read_typed(prefix, expected)?;
                self.writer().write_all(object.payload())?;
            }
            "pretty" => {
                let object = self.database().read(prefix)?;
                self.writer().write_all(object.payload())?;
            }
            "type" => {
                let object = self.database().read(prefix)?;
                writeln!(self.writer(), "{}", object.object_type())?;
            }
            "size" => {
                let object = self.database().read(prefix)?;
                writeln!(self.writer(), "{}", object.size())?;
            }
            other => anyhow::bail!("unexpected cat-file mode {other:?}"),
        }

        Ok(())
    }
}

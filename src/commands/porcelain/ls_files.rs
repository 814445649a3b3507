use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    /// List index entry paths in their stored (path-sorted) order.
    ///
    /// With `stage`, each line carries the mode, address, and merge stage
    /// the way `git ls-files -s` does.
    pub fn ls_files(&mut self, stage: bool) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let index = self.index();
        let mut index = index.borrow_mut();
        index.rehydrate()?;

        for entry in index.entries() {
            if stage {
                writeln!(
                    self.writer(),
                    "{} {} {}\t{}",
                    entry.metadata.mode,
                    entry.oid,
                    entry.stage(),
                    entry.path.display()
                )?;
            } else {
                writeln!(self.writer(), "{}", entry.path.display())?;
            }
        }

        Ok(())
    }
}

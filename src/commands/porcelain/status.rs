use crate::areas::repository::Repository;
use crate::artifacts::status::inspector::Inspector;
use colored::Colorize;
use std::collections::BTreeMap;
use std::io::Write;

impl Repository {
    /// Print the working-tree status: one ` M`/` D` line per tracked change
    /// in path order, then `??` lines for untracked files.
    pub fn status(&mut self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let index = self.index();
        let mut index = index.borrow_mut();
        index.rehydrate()?;

        let report = Inspector::new(self).compute(&index)?;
        if report.is_clean() {
            return Ok(());
        }

        let mut tracked_changes = BTreeMap::new();
        for path in &report.changed {
            tracked_changes.insert(path, "M");
        }
        for path in &report.deleted {
            tracked_changes.insert(path, "D");
        }

        for (path, label) in &tracked_changes {
            writeln!(self.writer(), " {} {}", label.red(), path)?;
        }
        for path in &report.untracked {
            writeln!(self.writer(), "{} {}", "??".red(), path)?;
        }

        Ok(())
    }
}

use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::status::report::StatusReport;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};

// Terminology:
// - untracked files: on disk but absent from the index
// - changed files: tracked by the index but with drifted content
// - deleted files: tracked by the index but no longer on disk
#[derive(new)]
pub struct Inspector<'r> {
    repository: &'r Repository,
}

impl Inspector<'_> {
    /// Classify every path known to either the index or the working tree.
    ///
    /// The walk and the index need not observe an atomic snapshot; the
    /// classification reflects the filesystem as seen at walk time.
    pub fn compute(&self, index: &Index) -> anyhow::Result<StatusReport> {
        let workspace = self.repository.workspace();

        let mut tree_paths = BTreeSet::new();
        for path in workspace.list_files(None)? {
            tree_paths.insert(Workspace::relative_name(&path)?);
        }

        let mut entry_paths = BTreeMap::new();
        for entry in index.entries() {
            entry_paths.insert(Workspace::relative_name(&entry.path)?, entry);
        }

        let mut report = StatusReport::default();
        for (name, entry) in &entry_paths {
            if tree_paths.contains(name) {
                if self.is_content_changed(entry)? {
                    report.changed.push(name.clone());
                }
            } else {
                report.deleted.push(name.clone());
            }
        }
        report.untracked = tree_paths
            .iter()
            .filter(|name| !entry_paths.contains_key(*name))
            .cloned()
            .collect();

        // BTree iteration already yields lexicographic order
        Ok(report)
    }

    fn is_content_changed(&self, entry: &IndexEntry) -> anyhow::Result<bool> {
        let blob = self.repository.workspace().load_blob(&entry.path)?;
        Ok(blob.object_id() != entry.oid)
    }
}

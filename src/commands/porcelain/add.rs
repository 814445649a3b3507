use crate::areas::repository::Repository;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object::Object;
use anyhow::Context;
use std::path::Path;

impl Repository {
    /// Stage the given paths: store each file's content blob and replace the
    /// matching index entries, then persist the index.
    pub fn add(&mut self, paths: &[String]) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let index = self.index();
        let mut index = index.borrow_mut();
        index.rehydrate()?;

        // expand each argument: directories become their contained files
        let paths = paths
            .iter()
            .map(|path| {
                let absolute = Path::new(path)
                    .canonicalize()
                    .with_context(|| format!("pathspec {path:?} did not match any files"))?;
                self.workspace().list_files(Some(absolute))
            })
            .collect::<anyhow::Result<Vec<_>>>()?
            .into_iter()
            .flatten();

        for path in paths {
            let data = self.workspace().read_file(&path)?;
            let stat = self.workspace().stat_file(&path)?;

            let blob = Object::blob(data);
            let blob_id = self.database().store(&blob)?;

            index.add(IndexEntry::new(path, blob_id, stat));
        }

        index.write_updates()?;

        Ok(())
    }
}

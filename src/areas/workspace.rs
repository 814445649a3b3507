use crate::areas::repository::METADATA_DIR;
use crate::artifacts::index::index_entry::EntryMetadata;
use crate::artifacts::objects::object::Object;
use anyhow::Context;
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Working-tree file access, rooted at the repository directory.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    /// List every file under `root` (the whole tree when `None`), relative
    /// to the workspace root, skipping the metadata directory at any depth.
    ///
    /// An unreadable directory or file aborts the walk instead of being
    /// silently skipped.
    pub fn list_files(&self, root: Option<PathBuf>) -> anyhow::Result<Vec<PathBuf>> {
        let root = match root {
            Some(p) => std::fs::canonicalize(&p)
                .with_context(|| format!("The specified path does not exist: {p:?}"))?,
            None => self.path.clone().into(),
        };

        if !root.is_dir() {
            return Ok(vec![
                root.strip_prefix(self.path.as_ref())
                    .map(PathBuf::from)
                    .unwrap_or_default(),
            ]);
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(&root)
            .into_iter()
            .filter_entry(|entry| entry.file_name() != METADATA_DIR);
        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            files.push(entry.path().strip_prefix(self.path.as_ref())?.to_path_buf());
        }

        Ok(files)
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(file_path);
        let content = std::fs::read(&file_path)
            .with_context(|| format!("Unable to read file {}", file_path.display()))?;

        Ok(content.into())
    }

    /// Read a file and wrap it as an unwritten blob, for content hashing.
    pub fn load_blob(&self, file_path: &Path) -> anyhow::Result<Object> {
        Ok(Object::blob(self.read_file(file_path)?))
    }

    pub fn stat_file(&self, file_path: &Path) -> anyhow::Result<EntryMetadata> {
        let absolute = self.path.join(file_path);
        let metadata = std::fs::metadata(&absolute)
            .with_context(|| format!("Unable to stat file {}", absolute.display()))?;

        Ok(EntryMetadata::from_fs(file_path, &absolute, &metadata)?)
    }

    /// Forward-slash-relative name with no leading `./` component.
    pub fn relative_name(path: &Path) -> anyhow::Result<String> {
        let mut parts = Vec::new();
        for component in path.components() {
            match component {
                Component::Normal(name) => parts.push(
                    name.to_str()
                        .with_context(|| format!("Path {path:?} is not valid UTF-8"))?,
                ),
                Component::CurDir => {}
                other => anyhow::bail!("Unexpected component {other:?} in path {path:?}"),
            }
        }
        Ok(parts.join("/"))
    }
}

use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::workspace::Workspace;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

/// Name of the repository metadata directory
pub const METADATA_DIR: &str = ".ruck";

/// Handle over one repository: the workspace root plus the object database
/// and index that live under its metadata directory.
///
/// Every operation goes through a handle; nothing consults the process
/// working directory after construction.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    index: RefCell<Index>,
    workspace: Workspace,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path);
        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }
        let path = path.canonicalize()?;
        let metadata_path = path.join(METADATA_DIR);

        Ok(Repository {
            database: Database::new(metadata_path.join("objects").into_boxed_path()),
            index: RefCell::new(Index::new(metadata_path.join("index").into_boxed_path())),
            workspace: Workspace::new(path.clone().into_boxed_path()),
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.path.join(METADATA_DIR)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn index(&self) -> &RefCell<Index> {
        &self.index
    }

    /// Commands other than `init` only make sense inside a repository.
    pub fn ensure_initialized(&self) -> anyhow::Result<()> {
        if !self.metadata_path().is_dir() {
            anyhow::bail!(
                "not a ruck repository: {} not found",
                self.metadata_path().display()
            );
        }
        Ok(())
    }
}

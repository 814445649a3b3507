use crate::areas::repository::Repository;
use anyhow::Context;
use std::fs;
use std::io::Write;

const DEFAULT_BRANCH: &str = "master";

impl Repository {
    /// Create the metadata directory scaffolding: object root, ref
    /// directories, HEAD, and an empty index.
    pub fn init(&mut self) -> anyhow::Result<()> {
        let metadata_path = self.metadata_path();
        if metadata_path.exists() {
            anyhow::bail!(
                "repository already initialized at {}",
                metadata_path.display()
            );
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create objects directory")?;

        fs::create_dir_all(metadata_path.join("refs").join("heads"))
            .context("Failed to create refs/heads directory")?;

        fs::write(
            metadata_path.join("HEAD"),
            format!("ref: refs/heads/{DEFAULT_BRANCH}\n"),
        )
        .context("Failed to create initial HEAD reference")?;

        fs::write(self.index().borrow().path(), b"").context("Failed to create index file")?;

        writeln!(
            self.writer(),
            "Initialized empty ruck repository in {}",
            self.path().display()
        )?;

        Ok(())
    }
}

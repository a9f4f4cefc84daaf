//! Temporary bundle trees for store and catalog tests.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use tempfile::TempDir;

/// A temporary directory laid out like a bundle root.
///
/// Files are written relative to the root, so `errors/db_es.properties`
/// becomes the Spanish bundle of the `errors.db` store. The directory is
/// removed when the value drops.
#[derive(Debug)]
pub struct BundleDir {
    _temp: TempDir,
    root: Utf8PathBuf,
    dir: Dir,
}

impl BundleDir {
    /// Create an empty bundle root.
    ///
    /// # Errors
    ///
    /// Fails when the temporary directory cannot be created or its path is
    /// not UTF-8.
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create bundle root")?;
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .map_err(|path| anyhow::anyhow!("non UTF-8 temp path {}", path.display()))?;
        let dir = Dir::open_ambient_dir(&root, ambient_authority())
            .with_context(|| format!("open bundle root {root}"))?;
        Ok(Self {
            _temp: temp,
            root,
            dir,
        })
    }

    /// Root of the tree.
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Write `contents` to `relative`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Fails when the file or its parents cannot be written.
    pub fn write(&self, relative: &str, contents: &str) -> Result<Utf8PathBuf> {
        let path = Utf8Path::new(relative);
        if let Some(parent) = path.parent().filter(|parent| !parent.as_str().is_empty()) {
            self.dir
                .create_dir_all(parent)
                .with_context(|| format!("create {parent} under {}", self.root))?;
        }
        self.dir
            .write(path, contents)
            .with_context(|| format!("write {relative} under {}", self.root))?;
        Ok(self.root.join(path))
    }

    /// Write several files at once.
    ///
    /// # Errors
    ///
    /// As [`BundleDir::write`].
    pub fn with_files<'a>(self, files: impl IntoIterator<Item = (&'a str, &'a str)>) -> Result<Self> {
        for (relative, contents) in files {
            self.write(relative, contents)?;
        }
        Ok(self)
    }
}

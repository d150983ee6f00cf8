//! # Patch Source
//!
//! Reads an ordered sequence of patch files from a directory and turns it
//! into a single mailbox-format payload for `git am`.
//!
//! Patch files are identified by the `.patch` extension; everything else in
//! the directory (README files, editor droppings) is ignored. Application
//! order is ascending lexicographic filename order, which is why patch files
//! carry zero-padded sequence numbers in their names. The ordering is stable
//! and deterministic across runs.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A directory of sequenced `.patch` files forming one logical changeset.
#[derive(Debug, Clone)]
pub struct PatchDirectory {
    root: PathBuf,
}

impl PatchDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// List the patch files in application order.
    ///
    /// A missing or unreadable directory is a fatal configuration error,
    /// never a soft skip. An existing directory with no patch files yields
    /// an empty list.
    pub fn patch_files(&self) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.root).map_err(|e| Error::PatchDir {
            dir: self.root.clone(),
            message: e.to_string(),
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::PatchDir {
                dir: self.root.clone(),
                message: e.to_string(),
            })?;
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "patch") {
                files.push(path);
            }
        }

        // Lexicographic filename order is the application order.
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }

    /// Concatenate every patch file into one mailbox series payload.
    ///
    /// The concatenation is lossless and order-preserving: each file's bytes
    /// are reproduced exactly, in filename order. `git mailsplit` finds the
    /// message boundaries itself, so no separator is inserted. An empty
    /// directory yields an empty payload.
    pub fn changeset(&self) -> Result<Vec<u8>> {
        let mut series = Vec::new();
        for file in self.patch_files()? {
            let content = fs::read(&file).map_err(|e| Error::PatchDir {
                dir: self.root.clone(),
                message: format!("{}: {}", file.display(), e),
            })?;
            series.extend_from_slice(&content);
        }
        Ok(series)
    }
}

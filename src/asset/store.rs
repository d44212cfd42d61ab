//! # Store
//!
//! Resolves an asset's dependency graph against an asset directory and writes
//! the generated files back into it.
//!
//! Resolution is depth-first. Every asset is first offered the chance to load
//! itself from disk; only when nothing was loaded is it generated. Each asset
//! type is resolved at most once per store.

use crate::asset::{Asset, AssetError, DirFileFetcher, Parents};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug)]
pub struct Store {
    fetcher: DirFileFetcher,
    parents: Parents,
}

impl Store {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            fetcher: DirFileFetcher::new(dir),
            parents: Parents::new(),
        }
    }

    /// Asset directory the store reads from and writes to
    pub fn dir(&self) -> &Path {
        self.fetcher.dir()
    }

    /// Dependencies resolved so far
    pub fn parents(&self) -> &Parents {
        &self.parents
    }

    /// Resolve `asset` and, recursively, everything it depends on
    ///
    /// # Errors
    ///
    /// Returns the first [`AssetError`] raised while loading or generating any
    /// asset in the graph.
    pub fn fetch(&mut self, asset: &mut dyn Asset) -> Result<(), AssetError> {
        debug!(asset = asset.name(), "Fetching asset");

        for mut dependency in asset.dependencies() {
            if self.parents.contains(dependency.as_ref()) {
                debug!(
                    asset = asset.name(),
                    dependency = dependency.name(),
                    "Dependency already resolved"
                );
                continue;
            }
            self.fetch(dependency.as_mut())?;
            self.parents.add(dependency);
        }

        if asset.load(&self.fetcher)? {
            info!(asset = asset.name(), "Loaded asset from disk");
            return Ok(());
        }

        debug!(asset = asset.name(), "Generating asset");
        asset.generate(&self.parents)
    }

    /// Write every file of `asset` below the asset directory
    ///
    /// Returns the paths written, empty when the asset produced no files.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::Io`] if a directory or file cannot be written.
    pub fn persist(&self, asset: &dyn Asset) -> Result<Vec<PathBuf>, AssetError> {
        let mut written = Vec::new();
        for file in asset.files() {
            let path = self.dir().join(&file.filename);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|source| AssetError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            std::fs::write(&path, &file.data).map_err(|source| AssetError::Io {
                path: path.clone(),
                source,
            })?;
            debug!(asset = asset.name(), path = %path.display(), "Wrote asset file");
            written.push(path);
        }
        Ok(written)
    }
}

//! # Assets
//!
//! Dependency-graph building blocks for manifest generation.
//!
//! An [`Asset`] declares the assets it depends on, generates itself from the
//! resolved [`Parents`], lists the [`File`]s it produced and can optionally be
//! reconstructed from files already on disk. The [`Store`] walks the graph.
//!
//! ## Modules
//!
//! - `installconfig`: The user supplied `install-config.yaml`
//! - `manifests`: Generated Kubernetes manifests
//! - `store`: Dependency resolution and persistence

pub mod installconfig;
pub mod manifests;
pub mod store;

pub use installconfig::{InstallConfig, InstallConfigSpec};
pub use store::Store;

use crate::certificates::CertificateBundleError;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for resolving, generating and persisting assets
#[derive(Debug, Error)]
pub enum AssetError {
    #[error(transparent)]
    TrustBundle(#[from] CertificateBundleError),
    #[error("failed to create {asset} manifest: {source}")]
    Serialization {
        asset: &'static str,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("{} not found in the asset directory, create it before generating manifests", path.display())]
    MissingInstallConfig { path: PathBuf },
    #[error("failed to parse {}: {source}", path.display())]
    InvalidInstallConfig {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("dependency {0} has not been resolved")]
    MissingDependency(&'static str),
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A file produced by (or loaded for) an asset
///
/// `filename` is relative to the asset directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub filename: PathBuf,
    pub data: Vec<u8>,
}

/// Read access to files previously written to the asset directory
pub trait FileFetcher {
    /// Fetch a single file by its path relative to the asset directory
    ///
    /// Returns `Ok(None)` if the file does not exist.
    fn fetch_by_name(&self, name: &Path) -> Result<Option<File>, AssetError>;
}

/// [`FileFetcher`] backed by a directory on the local filesystem
#[derive(Debug, Clone)]
pub struct DirFileFetcher {
    dir: PathBuf,
}

impl DirFileFetcher {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FileFetcher for DirFileFetcher {
    fn fetch_by_name(&self, name: &Path) -> Result<Option<File>, AssetError> {
        let path = self.dir.join(name);
        match std::fs::read(&path) {
            Ok(data) => Ok(Some(File {
                filename: name.to_path_buf(),
                data,
            })),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(AssetError::Io { path, source }),
        }
    }
}

/// Upcast to [`Any`] so resolved assets can be looked up by concrete type
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A node in the manifest dependency graph
pub trait Asset: AsAny + fmt::Debug {
    /// Human friendly name of the asset
    fn name(&self) -> &'static str;

    /// Fresh instances of the assets directly needed to generate this one
    fn dependencies(&self) -> Vec<Box<dyn Asset>>;

    /// Generate the asset from its resolved dependencies
    ///
    /// # Errors
    ///
    /// Returns an [`AssetError`] if the asset cannot be generated; nothing is
    /// written in that case.
    fn generate(&mut self, parents: &Parents) -> Result<(), AssetError>;

    /// Files generated by the asset, empty if it produced none
    fn files(&self) -> Vec<&File>;

    /// Reconstruct the asset from files already on disk
    ///
    /// Returns `Ok(false)` when nothing was loaded and the asset must be generated.
    ///
    /// # Errors
    ///
    /// Returns an [`AssetError`] if files exist but cannot be read or parsed.
    fn load(&mut self, fetcher: &dyn FileFetcher) -> Result<bool, AssetError>;
}

/// Resolved dependencies, keyed by the concrete asset type
#[derive(Debug, Default)]
pub struct Parents {
    assets: HashMap<TypeId, Box<dyn Asset>>,
}

impl Parents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a resolved asset, replacing any earlier asset of the same type
    pub fn add(&mut self, asset: Box<dyn Asset>) {
        self.assets.insert(type_key(asset.as_ref()), asset);
    }

    /// Whether an asset of the same concrete type has been resolved
    pub fn contains(&self, asset: &dyn Asset) -> bool {
        self.assets.contains_key(&type_key(asset))
    }

    /// Look up the resolved asset of type `A`
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::MissingDependency`] if `A` was not resolved.
    pub fn get<A: Asset>(&self) -> Result<&A, AssetError> {
        self.assets
            .get(&TypeId::of::<A>())
            .and_then(|asset| (**asset).as_any().downcast_ref::<A>())
            .ok_or(AssetError::MissingDependency(std::any::type_name::<A>()))
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

fn type_key(asset: &dyn Asset) -> TypeId {
    asset.as_any().type_id()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[derive(Debug, Default)]
    struct Leaf {
        generated: bool,
    }

    impl Asset for Leaf {
        fn name(&self) -> &'static str {
            "Leaf"
        }

        fn dependencies(&self) -> Vec<Box<dyn Asset>> {
            Vec::new()
        }

        fn generate(&mut self, _parents: &Parents) -> Result<(), AssetError> {
            self.generated = true;
            Ok(())
        }

        fn files(&self) -> Vec<&File> {
            Vec::new()
        }

        fn load(&mut self, _fetcher: &dyn FileFetcher) -> Result<bool, AssetError> {
            Ok(false)
        }
    }

    mod parents_tests {
        use super::*;

        #[test]
        fn test_get_returns_added_asset() {
            let mut parents = Parents::new();
            parents.add(Box::new(Leaf { generated: true }));

            let leaf = parents.get::<Leaf>().unwrap();
            assert!(leaf.generated);
            assert_eq!(parents.len(), 1);
        }

        #[test]
        fn test_get_missing_asset() {
            let parents = Parents::new();
            let result = parents.get::<Leaf>();
            assert!(matches!(result, Err(AssetError::MissingDependency(_))));
        }

        #[test]
        fn test_contains_uses_concrete_type() {
            let mut parents = Parents::new();
            assert!(!parents.contains(&Leaf::default()));
            parents.add(Box::new(Leaf::default()));
            assert!(parents.contains(&Leaf::default()));
        }

        #[test]
        fn test_add_replaces_same_type() {
            let mut parents = Parents::new();
            parents.add(Box::new(Leaf { generated: false }));
            parents.add(Box::new(Leaf { generated: true }));
            assert_eq!(parents.len(), 1);
            assert!(parents.get::<Leaf>().unwrap().generated);
        }
    }

    mod fetcher_tests {
        use super::*;

        #[test]
        fn test_fetch_missing_file() {
            let temp_dir = TempDir::new().unwrap();
            let fetcher = DirFileFetcher::new(temp_dir.path());
            let file = fetcher.fetch_by_name(Path::new("absent.yaml")).unwrap();
            assert!(file.is_none());
        }

        #[test]
        fn test_fetch_existing_file() {
            let temp_dir = TempDir::new().unwrap();
            std::fs::write(temp_dir.path().join("present.yaml"), b"key: value\n").unwrap();

            let fetcher = DirFileFetcher::new(temp_dir.path());
            let file = fetcher
                .fetch_by_name(Path::new("present.yaml"))
                .unwrap()
                .unwrap();
            assert_eq!(file.filename, PathBuf::from("present.yaml"));
            assert_eq!(file.data, b"key: value\n");
        }
    }
}

//! # Prelude
//!
//! Re-exports commonly used types and traits for convenience.
//!
//! ## Usage
//!
//! ```rust
//! use trust_bundle_manifests::prelude::*;
//! ```
//!
//! This brings into scope:
//! - The asset trait and framework types (Asset, Store, Parents, File)
//! - The concrete assets (InstallConfig, AdditionalTrustBundleConfig)
//! - The certificate filter and its error type
//! - Config types (GeneratorConfig, LogFormat)

// Asset framework
pub use crate::asset::{
    Asset, AssetError, DirFileFetcher, File, FileFetcher, Parents, Store,
};

// Concrete assets
pub use crate::asset::manifests::AdditionalTrustBundleConfig;
pub use crate::asset::{InstallConfig, InstallConfigSpec};

// Certificate filtering
pub use crate::certificates::{filter_ca_certificates, CertificateBundleError};

// Config types
pub use crate::config::{GeneratorConfig, LogFormat};

//! # Constants
//!
//! Shared constants used throughout the generator.
//!
//! File names are relative to the asset directory passed on the command line.

/// Directory (relative to the asset directory) that generated manifests are written to
pub const MANIFEST_DIR: &str = "manifests";

/// File name of the trust bundle manifest inside [`MANIFEST_DIR`]
pub const TRUST_BUNDLE_CONFIG_FILE_NAME: &str = "user-ca-bundle-config.yaml";

/// Key in the ConfigMap `data` holding the filtered PEM bundle
pub const TRUST_BUNDLE_CONFIG_DATA_KEY: &str = "ca-bundle.crt";

/// Name of the generated ConfigMap
pub const TRUST_BUNDLE_CONFIG_MAP_NAME: &str = "user-ca-bundle";

/// Namespace of the generated ConfigMap
pub const TRUST_BUNDLE_CONFIG_MAP_NAMESPACE: &str = "openshift-config";

/// Install-time configuration file, read from the asset directory
pub const INSTALL_CONFIG_FILE_NAME: &str = "install-config.yaml";

/// Default log filter target for this crate
pub const DEFAULT_LOG_TARGET: &str = "trust_bundle_manifests";

/// Default asset directory
pub const DEFAULT_ASSET_DIR: &str = ".";

//! # Install Config
//!
//! The user supplied `install-config.yaml`.
//!
//! Only the fields manifests are generated from are modelled; anything else in
//! the file is ignored. The file has to exist in the asset directory, it is never
//! generated.

use crate::asset::{Asset, AssetError, File, FileFetcher, Parents};
use crate::constants::INSTALL_CONFIG_FILE_NAME;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Contents of `install-config.yaml`
///
/// # Example
///
/// ```yaml
/// apiVersion: v1
/// baseDomain: example.com
/// metadata:
///   name: test-cluster
/// additionalTrustBundle: |
///   -----BEGIN CERTIFICATE-----
///   ...
///   -----END CERTIFICATE-----
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallConfigSpec {
    #[serde(default)]
    pub api_version: Option<String>,
    #[serde(default)]
    pub metadata: InstallConfigMetadata,
    #[serde(default)]
    pub base_domain: Option<String>,
    /// PEM-encoded certificates to add to the cluster trust store
    /// Only certificate authorities are kept
    #[serde(default)]
    pub additional_trust_bundle: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallConfigMetadata {
    #[serde(default)]
    pub name: Option<String>,
}

/// Install config asset, loaded from disk
#[derive(Debug, Clone, Default)]
pub struct InstallConfig {
    pub config: Option<InstallConfigSpec>,
    pub file: Option<File>,
}

impl InstallConfig {
    /// Build an already-resolved install config from its parsed contents
    pub fn from_spec(config: InstallConfigSpec) -> Self {
        Self {
            config: Some(config),
            file: None,
        }
    }

    /// The additional trust bundle, if one is configured and non-empty
    pub fn additional_trust_bundle(&self) -> Option<&str> {
        self.config
            .as_ref()
            .and_then(|config| config.additional_trust_bundle.as_deref())
            .filter(|bundle| !bundle.is_empty())
    }
}

impl Asset for InstallConfig {
    fn name(&self) -> &'static str {
        "Install Config"
    }

    fn dependencies(&self) -> Vec<Box<dyn Asset>> {
        Vec::new()
    }

    fn generate(&mut self, _parents: &Parents) -> Result<(), AssetError> {
        // Interactive creation is not supported, the file must already exist
        Err(AssetError::MissingInstallConfig {
            path: PathBuf::from(INSTALL_CONFIG_FILE_NAME),
        })
    }

    fn files(&self) -> Vec<&File> {
        self.file.iter().collect()
    }

    fn load(&mut self, fetcher: &dyn FileFetcher) -> Result<bool, AssetError> {
        let path = PathBuf::from(INSTALL_CONFIG_FILE_NAME);
        let Some(file) = fetcher.fetch_by_name(&path)? else {
            debug!("No {} in asset directory", INSTALL_CONFIG_FILE_NAME);
            return Ok(false);
        };

        let config: InstallConfigSpec = serde_yaml::from_slice(&file.data)
            .map_err(|source| AssetError::InvalidInstallConfig { path, source })?;

        debug!(
            cluster = config.metadata.name.as_deref().unwrap_or("unknown"),
            trust_bundle = config.additional_trust_bundle.is_some(),
            "Loaded install config"
        );
        self.config = Some(config);
        self.file = Some(file);
        Ok(true)
    }
}

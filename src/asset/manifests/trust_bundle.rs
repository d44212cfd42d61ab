//! # Additional Trust Bundle Config
//!
//! Generates `manifests/user-ca-bundle-config.yaml`, a ConfigMap carrying the
//! CA certificates from the install config's `additionalTrustBundle`.
//!
//! ```yaml
//! apiVersion: v1
//! kind: ConfigMap
//! data:
//!   ca-bundle.crt: |
//!     -----BEGIN CERTIFICATE-----
//!     ...
//! metadata:
//!   name: user-ca-bundle
//!   namespace: openshift-config
//! ```

use crate::asset::{Asset, AssetError, File, FileFetcher, InstallConfig, Parents};
use crate::certificates::filter_ca_certificates;
use crate::constants::{
    MANIFEST_DIR, TRUST_BUNDLE_CONFIG_FILE_NAME, TRUST_BUNDLE_CONFIG_MAP_NAME,
    TRUST_BUNDLE_CONFIG_MAP_NAMESPACE,
};
use k8s_openapi::api::core::v1::ConfigMap;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::path::PathBuf;
use tracing::info;

/// Trust bundle ConfigMap asset
///
/// Both fields stay `None` when the install config has no trust bundle.
#[derive(Debug, Clone, Default)]
pub struct AdditionalTrustBundleConfig {
    pub config_map: Option<ConfigMap>,
    pub file: Option<File>,
}

impl AdditionalTrustBundleConfig {
    /// Path of the generated manifest, relative to the asset directory
    pub fn file_name() -> PathBuf {
        PathBuf::from(MANIFEST_DIR).join(TRUST_BUNDLE_CONFIG_FILE_NAME)
    }
}

impl Asset for AdditionalTrustBundleConfig {
    fn name(&self) -> &'static str {
        "Additional Trust Bundle Config"
    }

    fn dependencies(&self) -> Vec<Box<dyn Asset>> {
        vec![Box::new(InstallConfig::default())]
    }

    fn generate(&mut self, parents: &Parents) -> Result<(), AssetError> {
        let install_config = parents.get::<InstallConfig>()?;

        let Some(bundle) = install_config.additional_trust_bundle() else {
            info!("No additionalTrustBundle configured, skipping {}", self.name());
            return Ok(());
        };

        let data = filter_ca_certificates(bundle)?;

        let config_map = ConfigMap {
            metadata: ObjectMeta {
                name: Some(TRUST_BUNDLE_CONFIG_MAP_NAME.to_string()),
                namespace: Some(TRUST_BUNDLE_CONFIG_MAP_NAMESPACE.to_string()),
                ..ObjectMeta::default()
            },
            data: Some(data),
            ..ConfigMap::default()
        };

        let manifest =
            serde_yaml::to_string(&config_map).map_err(|source| AssetError::Serialization {
                asset: self.name(),
                source,
            })?;

        let filename = Self::file_name();
        info!(
            file = %filename.display(),
            "Generated {} manifest",
            self.name()
        );
        self.config_map = Some(config_map);
        self.file = Some(File {
            filename,
            data: manifest.into_bytes(),
        });
        Ok(())
    }

    fn files(&self) -> Vec<&File> {
        self.file.iter().collect()
    }

    /// Always regenerated from the install config, never read back from disk
    fn load(&mut self, _fetcher: &dyn FileFetcher) -> Result<bool, AssetError> {
        Ok(false)
    }
}

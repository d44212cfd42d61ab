//! # Manifests
//!
//! Kubernetes manifests generated from the install config.

pub mod trust_bundle;

pub use trust_bundle::AdditionalTrustBundleConfig;

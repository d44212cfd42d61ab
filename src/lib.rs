//! Trust Bundle Manifests Library
//!
//! Generates the `user-ca-bundle` ConfigMap manifest from the
//! `additionalTrustBundle` of an `install-config.yaml`.
//! Tests are included in the module files and under `tests/`.
//!
//! ## Quick Start
//!
//! ```rust
//! use trust_bundle_manifests::prelude::*;
//! ```

pub mod asset;
pub mod certificates;
pub mod config;
pub mod constants;
pub mod logging;
pub mod prelude;

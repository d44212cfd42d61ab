//! Common test utilities for trust bundle tests
//!
//! Mints throwaway certificates and writes install-config.yaml fixtures.

#![allow(dead_code, reason = "Each test binary uses a subset of the helpers")]

use rcgen::{BasicConstraints, CertificateParams, DnType, IsCa, KeyPair};
use std::path::Path;
use trust_bundle_manifests::asset::InstallConfigSpec;

/// Self-signed certificate authority, PEM encoded
pub fn ca_certificate_pem(common_name: &str) -> String {
    let mut params = CertificateParams::default();
    params
        .distinguished_name
        .push(DnType::CommonName, common_name);
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    self_signed_pem(&params)
}

/// Leaf certificate without a basic constraints extension, PEM encoded
pub fn leaf_certificate_pem(common_name: &str) -> String {
    let mut params = CertificateParams::new(vec![format!("{common_name}.example.com")])
        .expect("Failed to build leaf certificate params");
    params
        .distinguished_name
        .push(DnType::CommonName, common_name);
    self_signed_pem(&params)
}

/// Certificate with basic constraints present and `CA:FALSE`, PEM encoded
pub fn explicit_non_ca_certificate_pem(common_name: &str) -> String {
    let mut params = CertificateParams::default();
    params
        .distinguished_name
        .push(DnType::CommonName, common_name);
    params.is_ca = IsCa::ExplicitNoCa;
    self_signed_pem(&params)
}

/// Self-signed certificate authority, DER encoded
pub fn ca_certificate_der(common_name: &str) -> Vec<u8> {
    let mut params = CertificateParams::default();
    params
        .distinguished_name
        .push(DnType::CommonName, common_name);
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    self_signed(&params).der().to_vec()
}

fn self_signed_pem(params: &CertificateParams) -> String {
    self_signed(params).pem()
}

fn self_signed(params: &CertificateParams) -> rcgen::Certificate {
    let key = KeyPair::generate().expect("Failed to generate key pair");
    params
        .clone()
        .self_signed(&key)
        .expect("Failed to self-sign certificate")
}

/// Write an install-config.yaml into `dir`
pub fn write_install_config(dir: &Path, additional_trust_bundle: Option<&str>) {
    let config = InstallConfigSpec {
        api_version: Some("v1".to_string()),
        base_domain: Some("example.com".to_string()),
        additional_trust_bundle: additional_trust_bundle.map(str::to_string),
        ..InstallConfigSpec::default()
    };
    let yaml = serde_yaml::to_string(&config).expect("Failed to serialize install config");
    std::fs::write(dir.join("install-config.yaml"), yaml).expect("Failed to write install config");
}

//! # Certificate Bundle Filter
//!
//! Filters a concatenated PEM bundle down to the certificate authorities it contains.
//!
//! The input is walked block by block. Every block must decode as PEM and parse as
//! an X.509 certificate, otherwise the whole bundle is rejected. Blocks whose
//! basic constraints mark them as a CA are re-encoded and kept in input order;
//! everything else is dropped.
//!
//! ## Block framing
//!
//! A block starts with `-----BEGIN <label>-----` at the start of the input or of a
//! line, and ends with `-----END <label>-----` carrying the same label. Spaces and
//! tabs anywhere in the body are ignored, as are CR/LF line endings. A candidate
//! whose END label differs, whose END line carries extra text or whose body is not
//! valid base64 is skipped and the search resumes after its BEGIN line.

use crate::constants::TRUST_BUNDLE_CONFIG_DATA_KEY;
use base64::alphabet;
use base64::engine::{GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use pem::{EncodeConfig, LineEnding, Pem};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;
use x509_parser::nom;
use x509_parser::prelude::{FromDer, X509Certificate, X509Error};

const PEM_BEGIN: &str = "-----BEGIN ";
const PEM_BEGIN_LINE: &str = "\n-----BEGIN ";
const PEM_END: &str = "-----END ";
const PEM_END_LINE: &str = "\n-----END ";
const PEM_DASHES: &str = "-----";

/// Standard alphabet with padding, tolerant of non-zero trailing bits
const PEM_BODY: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Error type for filtering a certificate bundle
#[derive(Debug, Error)]
pub enum CertificateBundleError {
    /// No PEM block could be decoded where one was expected
    #[error(
        "unable to parse certificate, please check the additionalTrustBundle section of install-config.yaml"
    )]
    Parse,
    /// A PEM block was found but its payload is not an X.509 certificate
    #[error("failed to decode certificate: {0}")]
    CertificateDecode(#[source] X509Error),
}

/// A decoded PEM block borrowing its label from the input
#[derive(Debug)]
struct PemBlock<'a> {
    label: &'a str,
    contents: Vec<u8>,
}

/// Filter `certificates` down to its CA certificates
///
/// Returns a mapping with the single key `ca-bundle.crt` whose value is the PEM
/// encoding of every CA certificate, in input order. The value is empty when the
/// bundle holds no CA.
///
/// # Errors
///
/// - [`CertificateBundleError::Parse`] if no PEM block can be decoded from the
///   remaining input, including an empty input.
/// - [`CertificateBundleError::CertificateDecode`] if a block is not a valid
///   certificate, or carries bytes after the certificate.
pub fn filter_ca_certificates(
    certificates: &str,
) -> Result<BTreeMap<String, String>, CertificateBundleError> {
    let mut rest = certificates;
    let mut bundle = String::new();
    let mut index = 0usize;

    loop {
        let Some((block, remaining)) = next_pem_block(rest) else {
            debug!(block = index, "No PEM block found");
            return Err(CertificateBundleError::Parse);
        };

        if is_certificate_authority(&block.contents)
            .map_err(CertificateBundleError::CertificateDecode)?
        {
            let encoded = Pem::new(block.label, block.contents);
            bundle.push_str(&pem::encode_config(
                &encoded,
                EncodeConfig::new().set_line_ending(LineEnding::LF),
            ));
        } else {
            debug!(block = index, "Dropping non-CA certificate from bundle");
        }

        rest = remaining;
        index += 1;
        if rest.is_empty() {
            break;
        }
    }

    Ok(BTreeMap::from([(
        TRUST_BUNDLE_CONFIG_DATA_KEY.to_string(),
        bundle,
    )]))
}

/// Find and decode the next PEM block in `input`
///
/// Returns the block and the input following its END line, or `None` when no
/// further block can be decoded.
fn next_pem_block(input: &str) -> Option<(PemBlock<'_>, &str)> {
    let mut rest = input;

    loop {
        rest = match rest.strip_prefix(PEM_BEGIN) {
            Some(after) => after,
            None => rest.split_once(PEM_BEGIN_LINE)?.1,
        };

        let (type_line, after_type) = split_line(rest);
        rest = after_type;
        let Some(label) = type_line.strip_suffix(PEM_DASHES) else {
            continue;
        };

        // Encapsulated headers (`Proc-Type: ...`) are skipped
        let mut has_headers = false;
        loop {
            if rest.is_empty() {
                return None;
            }
            let (line, next) = split_line(rest);
            if !line.contains(':') {
                break;
            }
            has_headers = true;
            rest = next;
        }

        // Without headers an empty body puts END directly after the BEGIN line
        let (body_end, trailer_start) = if !has_headers && rest.starts_with(PEM_END) {
            (0, PEM_END.len())
        } else {
            let Some(end) = rest.find(PEM_END_LINE) else {
                continue;
            };
            (end, end + PEM_END_LINE.len())
        };

        let Some(after_end) = rest[trailer_start..]
            .strip_prefix(label)
            .and_then(|trailer| trailer.strip_prefix(PEM_DASHES))
        else {
            debug!(label, "Skipping PEM block with mismatched END line");
            continue;
        };
        let (end_line_tail, remaining) = split_line(after_end);
        if !end_line_tail.is_empty() {
            continue;
        }

        let body: String = rest[..body_end]
            .chars()
            .filter(|&c| !matches!(c, ' ' | '\t' | '\r' | '\n'))
            .collect();
        match PEM_BODY.decode(body) {
            Ok(contents) => return Some((PemBlock { label, contents }, remaining)),
            Err(e) => debug!(label, error = %e, "Skipping PEM block with invalid base64 body"),
        }
    }
}

/// Split off the first line of `data`
///
/// The line excludes its `\n` or `\r\n` terminator and trailing spaces and tabs.
fn split_line(data: &str) -> (&str, &str) {
    let (line, rest) = data.split_once('\n').unwrap_or((data, ""));
    let line = line.strip_suffix('\r').unwrap_or(line);
    (line.trim_end_matches([' ', '\t']), rest)
}

/// Parse `der` as X.509 and report whether its basic constraints mark it as a CA
///
/// A certificate without a basic constraints extension is not a CA. Bytes after
/// the certificate are rejected.
fn is_certificate_authority(der: &[u8]) -> Result<bool, X509Error> {
    let (trailing, certificate) = X509Certificate::from_der(der).map_err(|e| match e {
        nom::Err::Error(e) | nom::Err::Failure(e) => e,
        nom::Err::Incomplete(_) => X509Error::InvalidCertificate,
    })?;
    if !trailing.is_empty() {
        return Err(X509Error::InvalidCertificate);
    }

    Ok(certificate
        .basic_constraints()?
        .is_some_and(|constraints| constraints.value.ca))
}

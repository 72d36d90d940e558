//! Certificate information types

use crate::utils::DecodeError;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// An encoded certificate as presented by the peer (DER bytes)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCertificate(Vec<u8>);

impl RawCertificate {
    pub fn from_der(der: impl Into<Vec<u8>>) -> Self {
        Self(der.into())
    }

    /// Parse every `CERTIFICATE` block of a PEM bundle, in order
    pub fn from_pem_bundle(input: &[u8]) -> Result<Vec<Self>, DecodeError> {
        let blocks = ::pem::parse_many(input).map_err(|e| DecodeError::ParseFailed {
            reason: e.to_string(),
        })?;

        Ok(blocks
            .into_iter()
            .filter(|block| block.tag() == "CERTIFICATE")
            .map(|block| Self(block.into_contents()))
            .collect())
    }

    /// Read a certificate file that is either a PEM bundle or a single DER blob
    pub fn from_file_bytes(input: &[u8]) -> Result<Vec<Self>, DecodeError> {
        let start = input
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .unwrap_or(input.len());
        if input[start..].starts_with(b"-----BEGIN") {
            Self::from_pem_bundle(input)
        } else {
            Ok(vec![Self::from_der(input)])
        }
    }

    pub fn as_der(&self) -> &[u8] {
        &self.0
    }

    pub fn to_pem(&self) -> String {
        ::pem::encode(&::pem::Pem::new("CERTIFICATE", self.0.clone()))
    }
}

/// Organization and common name of a distinguished name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NameDetails {
    pub org: Option<String>,
    #[serde(rename = "commonName")]
    pub common_name: Option<String>,
}

impl NameDetails {
    pub fn is_empty(&self) -> bool {
        self.org.is_none() && self.common_name.is_none()
    }
}

/// Colon-separated upper-case hex digests of the DER encoding
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Fingerprints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

/// Decoded fields of one certificate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateDetails {
    pub issuer: NameDetails,
    pub subject: NameDetails,
    /// Not valid before; `None` if the bound could not be read
    pub valid_from: Option<DateTime<Utc>>,
    /// Not valid after; `None` if the bound could not be read
    pub valid_to: Option<DateTime<Utc>>,
    pub fingerprints: Fingerprints,
    /// Whole days until `valid_to`, rounded; negative once expired
    pub days_left: Option<i64>,
}

impl CertificateDetails {
    /// Check if the certificate is expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.valid_to.is_some_and(|to| now > to)
    }
}

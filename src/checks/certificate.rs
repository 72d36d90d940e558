//! Certificate decoding
//!
//! Decodes X.509 certificates using x509-parser.

use crate::models::{CertificateDetails, Fingerprints, NameDetails, RawCertificate};
use crate::utils::DecodeError;
use chrono::{DateTime, TimeZone, Utc};
use sha1::Sha1;
use sha2::{Digest, Sha256};
use x509_parser::nom;
use x509_parser::prelude::*;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Certificate decoder
#[derive(Debug, Clone, Copy, Default)]
pub struct CertificateDecoder;

impl CertificateDecoder {
    /// Create a new certificate decoder
    pub fn new() -> Self {
        Self
    }

    /// Decode a single certificate, counting days left from the current time
    pub fn decode(&self, raw: &RawCertificate) -> Result<CertificateDetails, DecodeError> {
        self.decode_at(raw, Utc::now())
    }

    /// Decode a single certificate, counting days left from `now`
    pub fn decode_at(
        &self,
        raw: &RawCertificate,
        now: DateTime<Utc>,
    ) -> Result<CertificateDetails, DecodeError> {
        let der = raw.as_der();
        let (_, cert) = X509Certificate::from_der(der).map_err(classify_parse_error)?;

        // A bound that does not map onto a calendar date is treated as missing
        let valid_from = asn1_time_to_datetime(cert.validity().not_before);
        let valid_to = asn1_time_to_datetime(cert.validity().not_after);
        if valid_from.is_none() && valid_to.is_none() {
            return Err(DecodeError::NoDates);
        }

        let issuer = extract_name(cert.issuer());
        let subject = extract_name(cert.subject());
        if issuer.is_empty() && subject.is_empty() {
            return Err(DecodeError::NoSubjectOrIssuer);
        }

        let fingerprints = Fingerprints {
            sha1: Some(fingerprint::<Sha1>(der)),
            sha256: Some(fingerprint::<Sha256>(der)),
        };

        Ok(CertificateDetails {
            issuer,
            subject,
            valid_from,
            valid_to,
            fingerprints,
            days_left: valid_to.map(|to| days_left(to, now)),
        })
    }
}

/// Whole days between `now` and `valid_to`, rounded to the nearest day.
///
/// Halves round up, so half a day past expiry still counts as day zero.
pub fn days_left(valid_to: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = valid_to.signed_duration_since(now).num_milliseconds();
    (millis as f64 / MILLIS_PER_DAY + 0.5).floor() as i64
}

/// x509-parser rejects the whole certificate when a validity bound or a name
/// is unreadable, so those failures are sorted back into their own kinds
fn classify_parse_error(error: nom::Err<X509Error>) -> DecodeError {
    match error {
        nom::Err::Error(X509Error::InvalidDate) | nom::Err::Failure(X509Error::InvalidDate) => {
            DecodeError::NoDates
        }
        nom::Err::Error(X509Error::InvalidX509Name)
        | nom::Err::Failure(X509Error::InvalidX509Name) => DecodeError::NoSubjectOrIssuer,
        other => DecodeError::ParseFailed {
            reason: other.to_string(),
        },
    }
}

/// Whether the certificate's issuer and subject are the same name
pub fn is_self_issued(raw: &RawCertificate) -> bool {
    X509Certificate::from_der(raw.as_der())
        .map(|(_, cert)| cert.subject().as_raw() == cert.issuer().as_raw())
        .unwrap_or(false)
}

fn extract_name(name: &X509Name) -> NameDetails {
    // Values in non-UTF8 string types are skipped
    NameDetails {
        org: name
            .iter_organization()
            .find_map(|attr| attr.as_str().ok())
            .map(str::to_string),
        common_name: name
            .iter_common_name()
            .find_map(|attr| attr.as_str().ok())
            .map(str::to_string),
    }
}

fn asn1_time_to_datetime(time: ASN1Time) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(time.timestamp(), 0).single()
}

fn fingerprint<D: Digest>(der: &[u8]) -> String {
    D::digest(der)
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(":")
}

//! Chain-level status derived from verification and the leaf certificate

use crate::models::{CertificateDetails, VerifyOutcome};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Coarse classification of a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusText {
    Ok,
    Expired,
    Error,
}

impl StatusText {
    /// Classify a verify outcome: expiry is reported separately from other failures
    pub fn classify(verify: &VerifyOutcome) -> Self {
        if verify.is_ok() {
            StatusText::Ok
        } else if verify.is_expired() {
            StatusText::Expired
        } else {
            StatusText::Error
        }
    }
}

/// Verification status of a retrieved chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainStatus {
    pub verify_code: u32,
    pub verify_text: String,
    pub text: StatusText,
    /// Copied from the leaf certificate once decoded
    pub days_left: Option<i64>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_updated: DateTime<Utc>,
}

impl ChainStatus {
    /// Status straight from the transport stage, before any decoding
    pub fn from_verify(verify: &VerifyOutcome) -> Self {
        Self {
            verify_code: verify.code,
            verify_text: verify.text.clone(),
            text: StatusText::classify(verify),
            days_left: None,
            last_updated: Utc::now(),
        }
    }

    /// Merge in the decoded leaf and stamp a fresh update time
    pub fn with_leaf(mut self, leaf: Option<&CertificateDetails>) -> Self {
        self.days_left = leaf.and_then(|cert| cert.days_left);
        self.last_updated = Utc::now();
        self
    }
}

//! Error records returned to callers

use crate::models::ChainStatus;
use serde::{Serialize, Serializer};
use std::fmt;

/// Stable error codes, usable by clients for branching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConnectFailed,
    NoResponse,
    UnexpectedResponse,
    NoCertificates,
    ParseFailed,
    ParseNoDates,
    ParseNoSubjectOrIssuer,
    InvalidInput,
    InvalidHosts,
    UnexpectedError,
    CertificateVerifyFail,
}

impl ErrorCode {
    /// Every code, in numeric order
    pub const ALL: [ErrorCode; 11] = [
        ErrorCode::ConnectFailed,
        ErrorCode::NoResponse,
        ErrorCode::UnexpectedResponse,
        ErrorCode::NoCertificates,
        ErrorCode::ParseFailed,
        ErrorCode::ParseNoDates,
        ErrorCode::ParseNoSubjectOrIssuer,
        ErrorCode::InvalidInput,
        ErrorCode::InvalidHosts,
        ErrorCode::UnexpectedError,
        ErrorCode::CertificateVerifyFail,
    ];

    /// Symbolic name used on the wire.
    ///
    /// Three names were shortened from earlier releases of the service:
    /// `E_CONNECT_COMMAND_FAILED` is now `E_CONNECT_FAILED`,
    /// `E_PARSE_COMMAND_FAILED` is now `E_PARSE_FAILED` and `E_INVALID_INPUT_M`
    /// is now `E_INVALID_HOSTS`. Their numeric ids are unchanged, so clients
    /// that need to span both can branch on [`ErrorCode::number`].
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConnectFailed => "E_CONNECT_FAILED",
            ErrorCode::NoResponse => "E_CONNECT_NO_RESPONSE",
            ErrorCode::UnexpectedResponse => "E_CONNECT_UNEXPECTED_RESPONSE",
            ErrorCode::NoCertificates => "E_NO_CERTIFICATES",
            ErrorCode::ParseFailed => "E_PARSE_FAILED",
            ErrorCode::ParseNoDates => "E_PARSE_NO_DATES",
            ErrorCode::ParseNoSubjectOrIssuer => "E_PARSE_NO_SUBJECT_OR_ISSUER",
            ErrorCode::InvalidInput => "E_INVALID_INPUT",
            ErrorCode::InvalidHosts => "E_INVALID_HOSTS",
            ErrorCode::UnexpectedError => "E_UNEXPECTED_ERROR",
            ErrorCode::CertificateVerifyFail => "E_CERTIFICATE_VERIFY_FAIL",
        }
    }

    /// Numeric id, stable across releases
    pub fn number(&self) -> u16 {
        match self {
            ErrorCode::ConnectFailed => 1,
            ErrorCode::NoResponse => 2,
            ErrorCode::UnexpectedResponse => 3,
            ErrorCode::NoCertificates => 4,
            ErrorCode::ParseFailed => 5,
            ErrorCode::ParseNoDates => 6,
            ErrorCode::ParseNoSubjectOrIssuer => 7,
            ErrorCode::InvalidInput => 8,
            ErrorCode::InvalidHosts => 9,
            ErrorCode::UnexpectedError => 10,
            ErrorCode::CertificateVerifyFail => 11,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Verification sub-detail: numeric X.509 verify code and its symbolic name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyDetail {
    pub code: u32,
    pub message: String,
}

/// A failure, constructed once at the failure site
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDetail {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify: Option<VerifyDetail>,
}

/// Status block of a failed query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureStatus {
    /// Numeric id of the error code
    pub code: u16,
    pub text: String,
}

/// Terminal result for a target whose pipeline did not complete
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedQuery {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub status: FailureStatus,
    pub error: ErrorDetail,
    /// Chain verification status, when the chain was retrieved before failing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_status: Option<ChainStatus>,
}

impl FailedQuery {
    pub fn new(
        host: Option<String>,
        port: Option<u16>,
        error: ErrorDetail,
        chain_status: Option<ChainStatus>,
    ) -> Self {
        Self {
            host,
            port,
            status: FailureStatus {
                code: error.code.number(),
                text: "error".to_string(),
            },
            error,
            chain_status,
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.error.code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        let mut numbers: Vec<u16> = ErrorCode::ALL.iter().map(|c| c.number()).collect();
        numbers.sort_unstable();
        numbers.dedup();
        assert_eq!(numbers, (1..=11).collect::<Vec<_>>());
    }

    #[test]
    fn test_renamed_codes_keep_their_ids() {
        assert_eq!(ErrorCode::ConnectFailed.as_str(), "E_CONNECT_FAILED");
        assert_eq!(ErrorCode::ConnectFailed.number(), 1);
        assert_eq!(ErrorCode::ParseFailed.as_str(), "E_PARSE_FAILED");
        assert_eq!(ErrorCode::ParseFailed.number(), 5);
        assert_eq!(ErrorCode::InvalidHosts.as_str(), "E_INVALID_HOSTS");
        assert_eq!(ErrorCode::InvalidHosts.number(), 9);
    }

    #[test]
    fn test_failure_serialization() {
        let failure = FailedQuery::new(
            Some("example.com".to_string()),
            Some(443),
            ErrorDetail {
                code: ErrorCode::ConnectFailed,
                message: "Couldn't connect to example.com:443".to_string(),
                reason: None,
                verify: None,
            },
            None,
        );
        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json["error"]["code"], "E_CONNECT_FAILED");
        assert_eq!(json["status"]["code"], 1);
        assert_eq!(json["status"]["text"], "error");
        assert!(json["error"].get("reason").is_none());
        assert!(json.get("chainStatus").is_none());
    }
}

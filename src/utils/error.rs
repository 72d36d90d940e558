//! Custom error types for chainscope
//!
//! Each stage of the pipeline has its own `thiserror` enum. User-facing
//! messages are rendered from the error's own fields, and every error that can
//! reach a caller converts into the stable [`ErrorDetail`] record.

use crate::models::{ChainStatus, ErrorCode, ErrorDetail, FailedQuery, VerifyDetail, VerifyOutcome};
use thiserror::Error;

/// Top-level error type for the chainscope binary and library setup
#[derive(Error, Debug)]
pub enum ChainscopeError {
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Certificate error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Certificate {index} in {path}: {source}")]
    DecodeFile {
        path: String,
        index: usize,
        #[source]
        source: DecodeError,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rejected user input, raised before any network activity
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid input provided for {host}:{port}")]
    InvalidTarget { host: String, port: u16 },

    #[error("Couldn't parse hosts specification")]
    NoHosts,
}

/// Transport failures while retrieving a chain
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RetrieveError {
    #[error("Couldn't connect to {host}:{port}")]
    ConnectFailed {
        host: String,
        port: u16,
        reason: String,
    },

    #[error("Did not receive a response from {host}:{port}")]
    NoResponse {
        host: String,
        port: u16,
        reason: Option<String>,
    },

    #[error("Unexpected response when reading certificates from {host}:{port}")]
    UnexpectedResponse {
        host: String,
        port: u16,
        reason: String,
    },

    #[error("{host}:{port} did not return any certificates")]
    NoCertificates { host: String, port: u16 },
}

impl RetrieveError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RetrieveError::ConnectFailed { .. } => ErrorCode::ConnectFailed,
            RetrieveError::NoResponse { .. } => ErrorCode::NoResponse,
            RetrieveError::UnexpectedResponse { .. } => ErrorCode::UnexpectedResponse,
            RetrieveError::NoCertificates { .. } => ErrorCode::NoCertificates,
        }
    }

    fn reason(&self) -> Option<String> {
        match self {
            RetrieveError::ConnectFailed { reason, .. }
            | RetrieveError::UnexpectedResponse { reason, .. } => Some(reason.clone()),
            RetrieveError::NoResponse { reason, .. } => reason.clone(),
            RetrieveError::NoCertificates { .. } => None,
        }
    }
}

/// Failure to decode a single certificate, independent of where it came from
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("certificate could not be parsed: {reason}")]
    ParseFailed { reason: String },

    #[error("no validity period dates found")]
    NoDates,

    #[error("no subject or issuer found")]
    NoSubjectOrIssuer,
}

impl DecodeError {
    /// Locate this failure at chain position `index` of `host:port`
    pub fn at(self, host: &str, port: u16, index: usize) -> CertificateError {
        let host = host.to_string();
        match self {
            DecodeError::ParseFailed { reason } => CertificateError::ParseFailed {
                host,
                port,
                index,
                reason,
            },
            DecodeError::NoDates => CertificateError::NoDates { host, port, index },
            DecodeError::NoSubjectOrIssuer => {
                CertificateError::NoSubjectOrIssuer { host, port, index }
            }
        }
    }
}

/// A decode failure at a known position in a retrieved chain
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CertificateError {
    #[error("Couldn't parse certificate {index} retrieved from {host}:{port}")]
    ParseFailed {
        host: String,
        port: u16,
        index: usize,
        reason: String,
    },

    #[error("Couldn't find validity period dates in certificate {index} from {host}:{port}")]
    NoDates {
        host: String,
        port: u16,
        index: usize,
    },

    #[error("Couldn't find subject or issuer in certificate {index} from {host}:{port}")]
    NoSubjectOrIssuer {
        host: String,
        port: u16,
        index: usize,
    },
}

impl CertificateError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CertificateError::ParseFailed { .. } => ErrorCode::ParseFailed,
            CertificateError::NoDates { .. } => ErrorCode::ParseNoDates,
            CertificateError::NoSubjectOrIssuer { .. } => ErrorCode::ParseNoSubjectOrIssuer,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            CertificateError::ParseFailed { index, .. }
            | CertificateError::NoDates { index, .. }
            | CertificateError::NoSubjectOrIssuer { index, .. } => *index,
        }
    }
}

/// A chain that was retrieved but did not pass verification.
///
/// This is never terminal: it is attached to an otherwise successful result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("The certificate chain for {host}:{port} didn't pass verification")]
pub struct VerificationError {
    pub host: String,
    pub port: u16,
    pub verify: VerifyOutcome,
}

impl VerificationError {
    pub fn detail(&self) -> ErrorDetail {
        ErrorDetail {
            code: ErrorCode::CertificateVerifyFail,
            message: self.to_string(),
            reason: Some(self.verify.text.clone()),
            verify: Some(VerifyDetail {
                code: self.verify.code,
                message: self.verify.name().to_string(),
            }),
        }
    }
}

/// Any failure that terminates one target's pipeline
#[derive(Error, Debug, Clone)]
pub enum QueryError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Retrieve(#[from] RetrieveError),

    /// Decoding failed after the chain status was already derived
    #[error("{error}")]
    Certificate {
        error: CertificateError,
        status: Box<ChainStatus>,
    },

    #[error("Unexpected error")]
    Unexpected { reason: String },
}

impl QueryError {
    pub fn code(&self) -> ErrorCode {
        match self {
            QueryError::Input(InputError::InvalidTarget { .. }) => ErrorCode::InvalidInput,
            QueryError::Input(InputError::NoHosts) => ErrorCode::InvalidHosts,
            QueryError::Retrieve(e) => e.code(),
            QueryError::Certificate { error, .. } => error.code(),
            QueryError::Unexpected { .. } => ErrorCode::UnexpectedError,
        }
    }

    pub fn detail(&self) -> ErrorDetail {
        let reason = match self {
            QueryError::Input(_) => None,
            QueryError::Retrieve(e) => e.reason(),
            QueryError::Certificate {
                error: CertificateError::ParseFailed { reason, .. },
                ..
            } => Some(reason.clone()),
            QueryError::Certificate { .. } => None,
            QueryError::Unexpected { reason } => Some(reason.clone()),
        };

        ErrorDetail {
            code: self.code(),
            message: self.to_string(),
            reason,
            verify: None,
        }
    }

    /// Wrap this error as the terminal result for a target
    pub fn into_failure(self, host: Option<String>, port: Option<u16>) -> FailedQuery {
        let error = self.detail();
        let chain_status = match self {
            QueryError::Certificate { status, .. } => Some(*status),
            _ => None,
        };
        FailedQuery::new(host, port, error, chain_status)
    }
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias using ChainscopeError
pub type Result<T> = std::result::Result<T, ChainscopeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_target() {
        let err = RetrieveError::ConnectFailed {
            host: "example.com".to_string(),
            port: 443,
            reason: "connection refused".to_string(),
        };
        assert_eq!(err.to_string(), "Couldn't connect to example.com:443");

        let detail = QueryError::from(err).detail();
        assert_eq!(detail.code, ErrorCode::ConnectFailed);
        assert_eq!(detail.reason.as_deref(), Some("connection refused"));
    }

    #[test]
    fn test_certificate_error_names_index() {
        let err = DecodeError::NoDates.at("example.com", 443, 2);
        assert_eq!(
            err.to_string(),
            "Couldn't find validity period dates in certificate 2 from example.com:443"
        );
        assert_eq!(err.code(), ErrorCode::ParseNoDates);
        assert_eq!(err.index(), 2);
    }

    #[test]
    fn test_verification_detail() {
        let err = VerificationError {
            host: "expired.badssl.com".to_string(),
            port: 443,
            verify: VerifyOutcome::from_code(10),
        };
        let detail = err.detail();
        assert_eq!(detail.code, ErrorCode::CertificateVerifyFail);
        assert_eq!(detail.reason.as_deref(), Some("certificate has expired"));
        let verify = detail.verify.unwrap();
        assert_eq!(verify.code, 10);
        assert_eq!(verify.message, "X509_V_ERR_CERT_HAS_EXPIRED");
    }
}

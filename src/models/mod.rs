//! Data models for chainscope
//!
//! This module contains all the data structures passed between pipeline
//! stages and returned to callers.

pub mod certificate;
pub mod failure;
pub mod result;
pub mod status;
pub mod target;
pub mod verify;

pub use certificate::{CertificateDetails, Fingerprints, NameDetails, RawCertificate};
pub use failure::{ErrorCode, ErrorDetail, FailedQuery, FailureStatus, VerifyDetail};
pub use result::{HostResult, QueryOutcome};
pub use status::{ChainStatus, StatusText};
pub use target::Target;
pub use verify::{VerifyOutcome, VERIFY_REASONS};

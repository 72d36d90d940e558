//! Per-target query results

use crate::models::{CertificateDetails, ChainStatus, ErrorDetail, FailedQuery};
use serde::Serialize;

/// Result of a completed pipeline for one target.
///
/// `error` may be set alongside `certificates`: a chain that fails
/// verification is still decoded and reported.
#[derive(Debug, Clone, Serialize)]
pub struct HostResult {
    pub host: String,
    pub port: u16,
    pub status: ChainStatus,
    pub certificates: Vec<CertificateDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}

/// One entry of a query response: either a result or a failure
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum QueryOutcome {
    Success(HostResult),
    Failure(FailedQuery),
}

impl QueryOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, QueryOutcome::Success(_))
    }

    pub fn host_result(&self) -> Option<&HostResult> {
        match self {
            QueryOutcome::Success(result) => Some(result),
            QueryOutcome::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&FailedQuery> {
        match self {
            QueryOutcome::Success(_) => None,
            QueryOutcome::Failure(failure) => Some(failure),
        }
    }

    /// The error attached to this entry, terminal or not
    pub fn error(&self) -> Option<&ErrorDetail> {
        match self {
            QueryOutcome::Success(result) => result.error.as_ref(),
            QueryOutcome::Failure(failure) => Some(&failure.error),
        }
    }
}

impl From<HostResult> for QueryOutcome {
    fn from(result: HostResult) -> Self {
        QueryOutcome::Success(result)
    }
}

impl From<FailedQuery> for QueryOutcome {
    fn from(failure: FailedQuery) -> Self {
        QueryOutcome::Failure(failure)
    }
}

//! Query-string boundary
//!
//! Accepts the raw query strings a web handler would receive and hands them to
//! the [`Runner`]. Parameters are decoded with `url::form_urlencoded`.

use crate::models::{FailedQuery, QueryOutcome};
use crate::runner::Runner;
use crate::utils::QueryError;
use url::form_urlencoded;

/// Look up a single target from `host` and `port` parameters.
///
/// A missing parameter is treated like an unusable one.
pub async fn fetch_certificate(runner: &Runner, query: &str) -> QueryOutcome {
    let mut host = None;
    let mut port = None;
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match &*key {
            "host" if host.is_none() => host = Some(value.into_owned()),
            "port" if port.is_none() => port = Some(value.into_owned()),
            _ => {}
        }
    }

    runner.query_one(host.as_deref(), port.as_deref()).await
}

/// Look up every target named by a repeated `hosts` parameter.
///
/// Without any `hosts` entry the whole request fails with
/// `E_INVALID_HOSTS` and nothing is contacted.
pub async fn fetch_certificates(
    runner: &Runner,
    query: &str,
) -> Result<Vec<QueryOutcome>, FailedQuery> {
    let hosts = parse_hosts(query);
    runner
        .query_all(&hosts)
        .await
        .map_err(|e| QueryError::from(e).into_failure(None, None))
}

/// Every `hosts` value in order, including empty ones
pub fn parse_hosts(query: &str) -> Vec<String> {
    form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| key == "hosts")
        .map(|(_, value)| value.into_owned())
        .collect()
}

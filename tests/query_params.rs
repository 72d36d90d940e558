//! Integration tests for the query-string boundary

mod common;

use chainscope::config::BatchSettings;
use chainscope::models::ErrorCode;
use chainscope::query::{fetch_certificate, fetch_certificates};
use chainscope::Runner;
use common::*;
use std::sync::Arc;

fn runner(source: &Arc<FakeSource>) -> Runner {
    Runner::with_source(source.clone(), BatchSettings::default())
}

#[tokio::test]
async fn test_single_lookup_reads_host_and_port() {
    let leaf = self_signed_leaf("example.com", CURRENT);
    let source = Arc::new(FakeSource::new().with("example.com", chain(vec![leaf.raw()], 0)));

    let outcome = fetch_certificate(&runner(&source), "host=example.com&port=443").await;
    let result = outcome.host_result().unwrap();

    assert_eq!(result.host, "example.com");
    assert_eq!(result.port, 443);
    assert_eq!(result.certificates.len(), 1);
}

#[tokio::test]
async fn test_single_lookup_rejects_unusable_port() {
    let source = Arc::new(FakeSource::new());

    for query in ["host=example.com&port=abc", "host=example.com", "port=443"] {
        let outcome = fetch_certificate(&runner(&source), query).await;
        assert_eq!(outcome.failure().unwrap().code(), ErrorCode::InvalidInput, "{}", query);
    }
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_multi_lookup_fails_entries_in_place() {
    let leaf = self_signed_leaf("example.com", CURRENT);
    let source = Arc::new(FakeSource::new().with("example.com", chain(vec![leaf.raw()], 0)));

    let outcomes = fetch_certificates(&runner(&source), "hosts=example.com:443&hosts=:443")
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes[0].is_success());
    let failure = outcomes[1].failure().unwrap();
    assert_eq!(failure.code(), ErrorCode::InvalidInput);
    assert_eq!(failure.port, Some(443));
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn test_multi_lookup_without_hosts() {
    let source = Arc::new(FakeSource::new());

    let failure = fetch_certificates(&runner(&source), "host=example.com&port=443")
        .await
        .unwrap_err();

    assert_eq!(failure.code(), ErrorCode::InvalidHosts);
    assert_eq!(failure.status.code, 9);
    assert_eq!(failure.error.message, "Couldn't parse hosts specification");
    assert!(failure.host.is_none());
    assert_eq!(source.calls(), 0);
}

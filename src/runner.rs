//! Query orchestration engine
//!
//! Runs the retrieve → decode → aggregate pipeline for a target, and fans a
//! batch of targets out as independent tasks. Batch results come back in
//! input order whatever order the tasks finish in, and one target's failure
//! never touches another's slot.

use crate::checks::{CertificateDecoder, ChainSource, TlsChainSource};
use crate::config::{BatchSettings, Settings};
use crate::models::{
    CertificateDetails, ChainStatus, HostResult, QueryOutcome, RawCertificate, Target,
};
use crate::utils::{ConfigError, InputError, QueryError, VerificationError};
use futures::future;
use futures::stream::{self, StreamExt};
use std::sync::Arc;

/// Drives queries against a chain source
pub struct Runner {
    source: Arc<dyn ChainSource>,
    decoder: CertificateDecoder,
    batch: BatchSettings,
}

impl Runner {
    /// Create a runner that retrieves chains over TLS
    pub fn new(settings: &Settings) -> Result<Self, ConfigError> {
        let source = TlsChainSource::new(settings.retrieval.clone())?;
        Ok(Self::with_source(Arc::new(source), settings.batch.clone()))
    }

    /// Create a runner over any chain source
    pub fn with_source(source: Arc<dyn ChainSource>, batch: BatchSettings) -> Self {
        Self {
            source,
            decoder: CertificateDecoder::new(),
            batch,
        }
    }

    /// Sanitise raw input and query a single target.
    ///
    /// Invalid input is answered without touching the network.
    pub async fn query_one(&self, raw_host: Option<&str>, raw_port: Option<&str>) -> QueryOutcome {
        match Target::sanitise(raw_host, raw_port) {
            Ok(target) => self.query(target).await,
            Err(e) => input_failure(e),
        }
    }

    /// Query a single, already sanitised target
    pub async fn query(&self, target: Target) -> QueryOutcome {
        let (host, port) = (target.host.clone(), target.port);
        match run_pipeline(self.source.as_ref(), self.decoder, target).await {
            Ok(result) => result.into(),
            Err(e) => {
                tracing::warn!("Query for {}:{} failed: {}", host, port, e);
                e.into_failure(Some(host), Some(port)).into()
            }
        }
    }

    /// Query every `host:port` specification concurrently.
    ///
    /// Fails as a whole only when `specs` is empty. A malformed entry yields an
    /// input failure in its own slot and the rest of the batch proceeds.
    pub async fn query_all(&self, specs: &[String]) -> Result<Vec<QueryOutcome>, InputError> {
        if specs.is_empty() {
            return Err(InputError::NoHosts);
        }

        tracing::debug!("Querying {} target(s)", specs.len());
        let targets = specs.iter().map(|spec| Target::parse_spec(spec));
        let outcomes: Vec<QueryOutcome> = stream::iter(targets)
            .map(|parsed| {
                let source = Arc::clone(&self.source);
                let decoder = self.decoder;
                async move {
                    match parsed {
                        Ok(target) => spawn_pipeline(source, decoder, target).await,
                        Err(e) => input_failure(e),
                    }
                }
            })
            .buffered(self.batch.max_concurrency.max(1))
            .collect()
            .await;

        Ok(outcomes)
    }
}

fn input_failure(error: InputError) -> QueryOutcome {
    let (host, port) = match &error {
        InputError::InvalidTarget { host, port } => (Some(host.clone()), Some(*port)),
        InputError::NoHosts => (None, None),
    };
    tracing::debug!("Rejected input: {}", error);
    QueryError::from(error).into_failure(host, port).into()
}

/// Run one target's pipeline as its own task
async fn spawn_pipeline(
    source: Arc<dyn ChainSource>,
    decoder: CertificateDecoder,
    target: Target,
) -> QueryOutcome {
    let (host, port) = (target.host.clone(), target.port);
    let task = tokio::spawn(async move { run_pipeline(source.as_ref(), decoder, target).await });

    let error = match task.await {
        Ok(Ok(result)) => return result.into(),
        Ok(Err(e)) => {
            tracing::warn!("Query for {}:{} failed: {}", host, port, e);
            e
        }
        Err(join_error) => {
            tracing::error!("Query task for {}:{} aborted: {}", host, port, join_error);
            QueryError::Unexpected {
                reason: join_error.to_string(),
            }
        }
    };
    error.into_failure(Some(host), Some(port)).into()
}

async fn run_pipeline(
    source: &dyn ChainSource,
    decoder: CertificateDecoder,
    target: Target,
) -> Result<HostResult, QueryError> {
    let chain = source.retrieve(&target).await?;

    // Verification status comes from the transport stage alone
    let status = ChainStatus::from_verify(&chain.verify);
    let verification = (!chain.verify.is_ok()).then(|| VerificationError {
        host: target.host.clone(),
        port: target.port,
        verify: chain.verify.clone(),
    });
    if let Some(v) = &verification {
        tracing::warn!("{} ({}: {})", v, v.verify.code, v.verify.text);
    }

    let certificates = decode_chain(decoder, chain.certificates, &target, &status).await?;
    let status = status.with_leaf(certificates.first());

    Ok(HostResult {
        host: target.host,
        port: target.port,
        status,
        certificates,
        error: verification.map(|v| v.detail()),
    })
}

/// Decode every certificate of a chain concurrently, keeping chain order.
///
/// Any single failure fails the whole chain and names the certificate index.
async fn decode_chain(
    decoder: CertificateDecoder,
    raw: Vec<RawCertificate>,
    target: &Target,
    status: &ChainStatus,
) -> Result<Vec<CertificateDetails>, QueryError> {
    let tasks = raw
        .into_iter()
        .map(|cert| tokio::task::spawn_blocking(move || decoder.decode(&cert)));
    let decoded = future::join_all(tasks).await;

    let mut certificates = Vec::with_capacity(decoded.len());
    for (index, joined) in decoded.into_iter().enumerate() {
        let details = joined
            .map_err(|e| QueryError::Unexpected {
                reason: e.to_string(),
            })?
            .map_err(|e| QueryError::Certificate {
                error: e.at(&target.host, target.port, index),
                status: Box::new(status.clone()),
            })?;
        certificates.push(details);
    }

    Ok(certificates)
}

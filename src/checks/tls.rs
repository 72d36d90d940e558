//! TLS chain retrieval
//!
//! Performs a TLS handshake and captures the complete certificate chain the
//! peer presents. Verification runs against the Mozilla root store, but a
//! rejected chain does not abort the handshake: the rejection is recorded as a
//! verify code and the chain is still returned.

use crate::checks::certificate::is_self_issued;
use crate::config::RetrievalSettings;
use crate::models::verify::codes;
use crate::models::{RawCertificate, Target, VerifyOutcome};
use crate::utils::{ConfigError, RetrieveError};
use async_trait::async_trait;
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::client::WebPkiServerVerifier;
use rustls::crypto::CryptoProvider;
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{
    CertificateError, ClientConfig, DigitallySignedStruct, Error as RustlsError, RootCertStore,
    SignatureScheme,
};
use std::io;
use std::sync::{Arc, Mutex};
use tokio::net::TcpStream;

/// A chain as presented by the peer, leaf first, with its verification outcome
#[derive(Debug, Clone)]
pub struct RetrievedChain {
    pub certificates: Vec<RawCertificate>,
    pub verify: VerifyOutcome,
}

/// Source of certificate chains for a target
#[async_trait]
pub trait ChainSource: Send + Sync {
    /// Connect to `target` and return its chain, even if verification fails
    async fn retrieve(&self, target: &Target) -> Result<RetrievedChain, RetrieveError>;
}

/// A verifier wrapper that records the inner verifier's verdict and then
/// accepts the certificate, so the handshake completes either way.
#[derive(Debug)]
struct RecordingVerifier {
    inner: Arc<WebPkiServerVerifier>,
    rejection: Arc<Mutex<Option<RustlsError>>>,
}

impl ServerCertVerifier for RecordingVerifier {
    fn verify_server_cert(
        &self,
        end_entity: &CertificateDer<'_>,
        intermediates: &[CertificateDer<'_>],
        server_name: &ServerName<'_>,
        ocsp_response: &[u8],
        now: UnixTime,
    ) -> Result<ServerCertVerified, RustlsError> {
        let verdict =
            self.inner
                .verify_server_cert(end_entity, intermediates, server_name, ocsp_response, now);

        if let Err(e) = verdict {
            let mut stored = self.rejection.lock().unwrap_or_else(|e| e.into_inner());
            *stored = Some(e);
        }
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, RustlsError> {
        self.inner.verify_tls12_signature(message, cert, dss)
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, RustlsError> {
        self.inner.verify_tls13_signature(message, cert, dss)
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.inner.supported_verify_schemes()
    }
}

/// Retrieves chains over TLS with rustls
pub struct TlsChainSource {
    settings: RetrievalSettings,
    provider: Arc<CryptoProvider>,
    verifier: Arc<WebPkiServerVerifier>,
}

impl TlsChainSource {
    /// Create a source trusting the Mozilla root store
    pub fn new(settings: RetrievalSettings) -> Result<Self, ConfigError> {
        let roots = RootCertStore::from_iter(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        Self::with_roots(settings, roots)
    }

    /// Create a source trusting the given roots
    pub fn with_roots(
        settings: RetrievalSettings,
        roots: RootCertStore,
    ) -> Result<Self, ConfigError> {
        let provider = Arc::new(rustls::crypto::ring::default_provider());
        let verifier =
            WebPkiServerVerifier::builder_with_provider(Arc::new(roots), Arc::clone(&provider))
                .build()
                .map_err(|e| ConfigError::InvalidValue {
                    key: "trust_store".to_string(),
                    message: e.to_string(),
                })?;

        Ok(Self {
            settings,
            provider,
            verifier,
        })
    }

    fn client_config(
        &self,
        rejection: Arc<Mutex<Option<RustlsError>>>,
    ) -> Result<ClientConfig, RustlsError> {
        let verifier = RecordingVerifier {
            inner: Arc::clone(&self.verifier),
            rejection,
        };

        Ok(ClientConfig::builder_with_provider(Arc::clone(&self.provider))
            .with_safe_default_protocol_versions()?
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(verifier))
            .with_no_client_auth())
    }
}

#[async_trait]
impl ChainSource for TlsChainSource {
    async fn retrieve(&self, target: &Target) -> Result<RetrievedChain, RetrieveError> {
        let host = target.host.clone();
        let port = target.port;
        let connect_failed = |reason: String| RetrieveError::ConnectFailed {
            host: host.clone(),
            port,
            reason,
        };

        let rejection = Arc::new(Mutex::new(None));
        let config = self
            .client_config(Arc::clone(&rejection))
            .map_err(|e| connect_failed(e.to_string()))?;
        let connector = tokio_rustls::TlsConnector::from(Arc::new(config));

        let server_name = ServerName::try_from(host.clone())
            .map_err(|_| connect_failed(format!("invalid server name: {}", host)))?;

        // Connect TCP
        tracing::debug!("Connecting to {}", target);
        let stream = tokio::time::timeout(
            self.settings.connect_timeout(),
            TcpStream::connect((host.as_str(), port)),
        )
        .await
        .map_err(|_| connect_failed("TCP connection timed out".to_string()))?
        .map_err(|e| connect_failed(e.to_string()))?;

        // Perform TLS handshake
        let tls_stream = tokio::time::timeout(
            self.settings.handshake_timeout(),
            connector.connect(server_name, stream),
        )
        .await
        .map_err(|_| connect_failed("TLS handshake timed out".to_string()))?
        .map_err(|e| classify_handshake_error(target, e))?;

        let (_, client_connection) = tls_stream.get_ref();
        let certificates: Vec<RawCertificate> = client_connection
            .peer_certificates()
            .map(|certs| {
                certs
                    .iter()
                    .map(|c| RawCertificate::from_der(c.as_ref()))
                    .collect()
            })
            .unwrap_or_default();

        if certificates.is_empty() {
            return Err(RetrieveError::NoCertificates { host, port });
        }

        let rejection = rejection.lock().unwrap_or_else(|e| e.into_inner()).take();
        let verify = verify_outcome(rejection.as_ref(), &certificates);
        tracing::debug!(
            "Retrieved {} certificate(s) from {} (verify code {})",
            certificates.len(),
            target,
            verify.code
        );

        Ok(RetrievedChain {
            certificates,
            verify,
        })
    }
}

/// Sort a failed handshake into "nothing came back" and "something that was not TLS"
fn classify_handshake_error(target: &Target, error: io::Error) -> RetrieveError {
    let host = target.host.clone();
    let port = target.port;
    match error.kind() {
        io::ErrorKind::UnexpectedEof
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::BrokenPipe => RetrieveError::NoResponse {
            host,
            port,
            reason: Some(error.to_string()),
        },
        _ => RetrieveError::UnexpectedResponse {
            host,
            port,
            reason: error.to_string(),
        },
    }
}

/// Map a rustls verification failure onto the X.509 verify code table
pub fn verify_outcome(rejection: Option<&RustlsError>, chain: &[RawCertificate]) -> VerifyOutcome {
    let Some(error) = rejection else {
        return VerifyOutcome::ok();
    };

    let code = match error {
        RustlsError::InvalidCertificate(cert_error) => match cert_error {
            CertificateError::Expired | CertificateError::ExpiredContext { .. } => {
                codes::CERT_HAS_EXPIRED
            }
            CertificateError::NotValidYet | CertificateError::NotValidYetContext { .. } => {
                codes::CERT_NOT_YET_VALID
            }
            CertificateError::BadSignature => codes::CERT_SIGNATURE_FAILURE,
            CertificateError::Revoked => codes::CERT_REVOKED,
            CertificateError::UnhandledCriticalExtension => codes::UNHANDLED_CRITICAL_EXTENSION,
            CertificateError::UnknownIssuer => unknown_issuer_code(chain),
            CertificateError::UnknownRevocationStatus => codes::UNABLE_TO_GET_CRL,
            CertificateError::ExpiredRevocationList
            | CertificateError::ExpiredRevocationListContext { .. } => codes::CRL_HAS_EXPIRED,
            CertificateError::NotValidForName
            | CertificateError::NotValidForNameContext { .. } => codes::HOSTNAME_MISMATCH,
            CertificateError::InvalidPurpose | CertificateError::InvalidPurposeContext { .. } => {
                codes::INVALID_PURPOSE
            }
            CertificateError::ApplicationVerificationFailure => codes::APPLICATION_VERIFICATION,
            _ => codes::UNSPECIFIED,
        },
        _ => codes::UNSPECIFIED,
    };

    VerifyOutcome::from_code(code)
}

fn unknown_issuer_code(chain: &[RawCertificate]) -> u32 {
    match chain {
        [leaf] if is_self_issued(leaf) => codes::DEPTH_ZERO_SELF_SIGNED_CERT,
        [_, .., root] if is_self_issued(root) => codes::SELF_SIGNED_CERT_IN_CHAIN,
        _ => codes::UNABLE_TO_GET_ISSUER_CERT_LOCALLY,
    }
}

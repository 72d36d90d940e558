//! Shared fixtures: certificates minted with rcgen and local TLS endpoints

#![allow(dead_code)]

use async_trait::async_trait;
use chainscope::checks::{ChainSource, RetrievedChain};
use chainscope::models::{RawCertificate, Target, VerifyOutcome};
use chainscope::utils::RetrieveError;
use rcgen::{
    BasicConstraints, Certificate, CertificateParams, DistinguishedName, DnType, IsCa, KeyPair,
};
use rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};
use rustls::ServerConfig;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;

/// A certificate together with the key that signs for it
pub struct Issued {
    pub cert: Certificate,
    pub key: KeyPair,
}

impl Issued {
    pub fn der(&self) -> CertificateDer<'static> {
        self.cert.der().clone()
    }

    pub fn raw(&self) -> RawCertificate {
        RawCertificate::from_der(self.cert.der().to_vec())
    }

    pub fn private_key(&self) -> PrivateKeyDer<'static> {
        PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(self.key.serialize_der()))
    }
}

fn params(
    names: &[&str],
    common_name: &str,
    org: &str,
    validity: ((i32, u8, u8), (i32, u8, u8)),
) -> CertificateParams {
    let names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
    let mut params = CertificateParams::new(names).unwrap();

    let mut dn = DistinguishedName::new();
    dn.push(DnType::CommonName, common_name);
    dn.push(DnType::OrganizationName, org);
    params.distinguished_name = dn;

    let ((fy, fm, fd), (ty, tm, td)) = validity;
    params.not_before = rcgen::date_time_ymd(fy, fm, fd);
    params.not_after = rcgen::date_time_ymd(ty, tm, td);
    params
}

pub const CURRENT: ((i32, u8, u8), (i32, u8, u8)) = ((2020, 1, 1), (2099, 1, 1));
pub const LAPSED: ((i32, u8, u8), (i32, u8, u8)) = ((2019, 1, 1), (2020, 1, 1));

/// Self-signed leaf valid for localhost and 127.0.0.1
pub fn self_signed_leaf(
    common_name: &str,
    validity: ((i32, u8, u8), (i32, u8, u8)),
) -> Issued {
    let key = KeyPair::generate().unwrap();
    let cert = params(&["localhost", "127.0.0.1"], common_name, "Chainscope Tests", validity)
        .self_signed(&key)
        .unwrap();
    Issued { cert, key }
}

/// Self-signed leaf whose subject and issuer names are both empty
pub fn anonymous_leaf() -> Issued {
    let key = KeyPair::generate().unwrap();
    let mut params = CertificateParams::new(vec!["anonymous.test".to_string()]).unwrap();
    params.distinguished_name = DistinguishedName::new();
    params.not_before = rcgen::date_time_ymd(2020, 1, 1);
    params.not_after = rcgen::date_time_ymd(2099, 1, 1);
    let cert = params.self_signed(&key).unwrap();
    Issued { cert, key }
}

/// Self-signed certificate authority
pub fn certificate_authority(common_name: &str) -> Issued {
    let key = KeyPair::generate().unwrap();
    let mut params = params(&[], common_name, "Chainscope Test CA", CURRENT);
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    let cert = params.self_signed(&key).unwrap();
    Issued { cert, key }
}

/// Leaf signed by `ca` for the given names
pub fn leaf_signed_by(ca: &Issued, names: &[&str], common_name: &str) -> Issued {
    let key = KeyPair::generate().unwrap();
    let cert = params(names, common_name, "Chainscope Tests", CURRENT)
        .signed_by(&key, &ca.cert, &ca.key)
        .unwrap();
    Issued { cert, key }
}

/// Serve TLS on an ephemeral loopback port, presenting `chain` to every client
pub async fn serve_tls(
    chain: Vec<CertificateDer<'static>>,
    key: PrivateKeyDer<'static>,
) -> SocketAddr {
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let config = ServerConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .unwrap()
        .with_no_client_auth()
        .with_single_cert(chain, key)
        .unwrap();
    let acceptor = TlsAcceptor::from(Arc::new(config));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let acceptor = acceptor.clone();
            tokio::spawn(async move {
                if let Ok(mut tls) = acceptor.accept(stream).await {
                    let _ = tls.shutdown().await;
                }
            });
        }
    });
    addr
}

/// Accept connections and close them without a byte of reply
pub async fn serve_hangup() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            drop(stream);
        }
    });
    addr
}

/// Answer every ClientHello with a plain HTTP response
pub async fn serve_plaintext() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf).await;
                let _ = stream
                    .write_all(b"HTTP/1.1 400 Bad Request\r\nContent-Length: 0\r\n\r\n")
                    .await;
                let _ = stream.flush().await;
                tokio::time::sleep(Duration::from_secs(2)).await;
            });
        }
    });
    addr
}

/// Accept connections and never say anything
pub async fn serve_silent() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(30)).await;
                drop(stream);
            });
        }
    });
    addr
}

/// A port with nothing listening on it
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

/// What a fake source answers for one host
#[derive(Clone)]
pub enum Scripted {
    Chain {
        certificates: Vec<RawCertificate>,
        verify: u32,
        delay: Duration,
    },
    Fail(RetrieveError),
    Panic,
}

/// In-memory chain source that counts calls
#[derive(Default)]
pub struct FakeSource {
    scripts: HashMap<String, Scripted>,
    calls: AtomicUsize,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, host: &str, script: Scripted) -> Self {
        self.scripts.insert(host.to_string(), script);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChainSource for FakeSource {
    async fn retrieve(&self, target: &Target) -> Result<RetrievedChain, RetrieveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.scripts.get(&target.host).cloned() {
            Some(Scripted::Chain {
                certificates,
                verify,
                delay,
            }) => {
                tokio::time::sleep(delay).await;
                Ok(RetrievedChain {
                    certificates,
                    verify: VerifyOutcome::from_code(verify),
                })
            }
            Some(Scripted::Fail(error)) => Err(error),
            Some(Scripted::Panic) => panic!("scripted panic for {}", target),
            None => Err(RetrieveError::ConnectFailed {
                host: target.host.clone(),
                port: target.port,
                reason: "no script".to_string(),
            }),
        }
    }
}

/// A chain answer with no delay
pub fn chain(certificates: Vec<RawCertificate>, verify: u32) -> Scripted {
    delayed_chain(certificates, verify, Duration::ZERO)
}

pub fn delayed_chain(certificates: Vec<RawCertificate>, verify: u32, delay: Duration) -> Scripted {
    Scripted::Chain {
        certificates,
        verify,
        delay,
    }
}

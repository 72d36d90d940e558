//! Check modules for chainscope
//!
//! The network stage (chain retrieval over TLS) and the decode stage
//! (X.509 field extraction).

pub mod certificate;
pub mod tls;

pub use certificate::CertificateDecoder;
pub use tls::{ChainSource, RetrievedChain, TlsChainSource};

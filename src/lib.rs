//! Chainscope Library
//!
//! Retrieves the certificate chain a TLS endpoint presents, decodes every
//! certificate in it, and reports the chain's verification status:
//! - Input sanitising for untrusted host and port values
//! - Chain retrieval over rustls that keeps the chain even when it fails verification
//! - X.509 decoding into issuer, subject, validity and fingerprints
//! - Concurrent batch lookups with per-target failure isolation
//!
//! # Usage
//!
//! ```rust,ignore
//! use chainscope::{Runner, Settings};
//!
//! #[tokio::main]
//! async fn main() {
//!     let runner = Runner::new(&Settings::default()).unwrap();
//!     let outcome = runner.query_one(Some("example.com"), Some("443")).await;
//!     println!("{}", serde_json::to_string_pretty(&outcome).unwrap());
//! }
//! ```

pub mod checks;
pub mod cli;
pub mod commands;
pub mod config;
pub mod models;
pub mod output;
pub mod query;
pub mod runner;
pub mod utils;

// Re-export commonly used types
pub use cli::Cli;
pub use config::Settings;
pub use models::{ErrorCode, FailedQuery, HostResult, QueryOutcome, Target};
pub use runner::Runner;
pub use utils::{ChainscopeError, Result};

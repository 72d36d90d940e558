//! Utility modules for chainscope
//!
//! This module contains the error types shared by every pipeline stage.

pub mod error;

pub use error::{
    CertificateError, ChainscopeError, ConfigError, DecodeError, InputError, QueryError, Result,
    RetrieveError, VerificationError,
};

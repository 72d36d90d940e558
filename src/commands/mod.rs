//! Command implementations for chainscope

pub mod batch;
pub mod check;
pub mod decode;
pub mod query;

pub use batch::run_batch;
pub use check::run_check;
pub use decode::run_decode;
pub use query::run_query;

use crate::models::{ErrorCode, QueryOutcome};
use crate::utils::{InputError, Result};

/// Turn an invalid-input outcome back into an error so the binary exits non-zero
pub(crate) fn reject_invalid_input(outcome: &QueryOutcome) -> Result<()> {
    match outcome.failure() {
        Some(failure) if failure.code() == ErrorCode::InvalidInput => {
            Err(InputError::InvalidTarget {
                host: failure.host.clone().unwrap_or_default(),
                port: failure.port.unwrap_or(0),
            }
            .into())
        }
        _ => Ok(()),
    }
}

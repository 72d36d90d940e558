//! Query command implementation

use crate::output::print_json;
use crate::query::{fetch_certificate, fetch_certificates};
use crate::runner::Runner;
use crate::utils::{InputError, Result};

/// Answer a raw query string the way the HTTP boundary would
pub async fn run_query(runner: &Runner, query: &str, multi: bool, pretty: bool) -> Result<()> {
    if !multi {
        let outcome = fetch_certificate(runner, query).await;
        print_json(&outcome, pretty)?;
        return super::reject_invalid_input(&outcome);
    }

    match fetch_certificates(runner, query).await {
        Ok(outcomes) => print_json(&outcomes, pretty),
        Err(failure) => {
            print_json(&failure, pretty)?;
            Err(InputError::NoHosts.into())
        }
    }
}

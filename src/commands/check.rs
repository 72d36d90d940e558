//! Check command implementation

use crate::output::print_json;
use crate::runner::Runner;
use crate::utils::Result;

/// Run the check command
pub async fn run_check(runner: &Runner, host: &str, port: &str, pretty: bool) -> Result<()> {
    let outcome = runner.query_one(Some(host), Some(port)).await;
    print_json(&outcome, pretty)?;
    super::reject_invalid_input(&outcome)
}

//! Batch command implementation

use crate::output::print_json;
use crate::runner::Runner;
use crate::utils::{ChainscopeError, QueryError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Run the batch command over command-line targets and an optional target file
pub async fn run_batch(
    runner: &Runner,
    hosts: &[String],
    file: Option<&Path>,
    pretty: bool,
) -> Result<()> {
    let mut specs = hosts.to_vec();
    if let Some(path) = file {
        specs.extend(read_targets(path)?);
    }

    match runner.query_all(&specs).await {
        Ok(outcomes) => {
            let failed = outcomes.iter().filter(|o| !o.is_success()).count();
            tracing::debug!("Batch finished: {} of {} failed", failed, outcomes.len());
            print_json(&outcomes, pretty)
        }
        Err(e) => {
            print_json(&QueryError::from(e.clone()).into_failure(None, None), pretty)?;
            Err(e.into())
        }
    }
}

/// Read `host:port` lines, skipping blanks and `#` comments
fn read_targets(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(ChainscopeError::Io)?;
    let reader = BufReader::new(file);

    let mut targets = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() && !trimmed.starts_with('#') {
            targets.push(trimmed.to_string());
        }
    }
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_targets_skips_comments() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# production").unwrap();
        writeln!(file, "example.com:443").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  example.org:8443  ").unwrap();

        let targets = read_targets(file.path()).unwrap();
        assert_eq!(targets, vec!["example.com:443", "example.org:8443"]);
    }

    #[test]
    fn test_read_targets_missing_file() {
        let err = read_targets(Path::new("/nonexistent/targets.txt")).unwrap_err();
        assert!(matches!(err, ChainscopeError::Io(_)));
    }
}

//! Decode command implementation

use crate::checks::CertificateDecoder;
use crate::models::RawCertificate;
use crate::output::print_json;
use crate::utils::{ChainscopeError, DecodeError, Result};
use std::path::Path;

/// Decode a local certificate file and print its details
pub fn run_decode(path: &Path, pretty: bool) -> Result<()> {
    let bytes = std::fs::read(path)?;
    let raw = RawCertificate::from_file_bytes(&bytes)?;
    if raw.is_empty() {
        return Err(DecodeError::ParseFailed {
            reason: format!("no certificates found in {}", path.display()),
        }
        .into());
    }

    let decoder = CertificateDecoder::new();
    let details = raw
        .iter()
        .enumerate()
        .map(|(index, cert)| {
            decoder
                .decode(cert)
                .map_err(|source| ChainscopeError::DecodeFile {
                    path: path.display().to_string(),
                    index,
                    source,
                })
        })
        .collect::<Result<Vec<_>>>()?;

    print_json(&details, pretty)
}

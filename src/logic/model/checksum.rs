//! Model file integrity check (SHA-256).

use std::path::Path;

use sha2::{Digest, Sha256};

use super::oracle::OracleError;

/// Hex-encoded SHA-256 of a file
pub fn sha256_file(path: &Path) -> Result<String, OracleError> {
    let bytes = std::fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

/// Verify the file against an expected hex digest; returns the actual digest
pub fn verify_checksum(path: &Path, expected: &str) -> Result<String, OracleError> {
    let actual = sha256_file(path)?;
    let expected = expected.trim().to_lowercase();

    if actual != expected {
        log::warn!("Checksum mismatch for {}", path.display());
        return Err(OracleError::ChecksumMismatch { expected, actual });
    }

    log::info!("Model checksum verified: {}", &actual[..12]);
    Ok(actual)
}

// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! SHA-256 helpers for integrity verification.

use std::fs::File;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

use crate::config::SHA256_HEX_LENGTH;

/// Compute the SHA-256 digest of an in-memory buffer as lowercase hex.
pub fn hash_bytes(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Compute the SHA-256 hash of a file and return its lowercase hex digest.
///
/// # Errors
///
/// Returns an error when the file cannot be opened or fully read.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
/// let digest = docintegrity::utils::hash_file(Path::new("contract.pdf"))?;
/// assert_eq!(digest.len(), 64);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn hash_file(path: &Path) -> Result<String> {
    let mut file =
        File::open(path).with_context(|| format!("Failed to open file for hashing: {:?}", path))?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)
        .with_context(|| format!("Failed to read file for hashing: {:?}", path))?;
    Ok(hex::encode(hasher.finalize()))
}

/// True when `value` has the shape of a SHA-256 hex digest (any case).
pub fn is_sha256_hex(value: &str) -> bool {
    value.len() == SHA256_HEX_LENGTH && value.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Compare two hex digests without regard to case.
pub fn digests_match(expected: &str, actual: &str) -> bool {
    expected.eq_ignore_ascii_case(actual)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn hash_bytes_matches_known_vectors() {
        assert_eq!(hash_bytes(b""), EMPTY_SHA256);
        assert_eq!(
            hash_bytes(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn hash_file_agrees_with_hash_bytes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("brief.txt");
        fs::write(&path, b"abc").unwrap();

        assert_eq!(hash_file(&path).unwrap(), hash_bytes(b"abc"));
    }

    #[test]
    fn hash_file_reports_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = hash_file(&tmp.path().join("missing.pdf")).unwrap_err();
        assert!(err.to_string().contains("Failed to open file for hashing"));
    }

    #[test]
    fn sha256_shape_requires_64_hex_characters() {
        assert!(is_sha256_hex(EMPTY_SHA256));
        assert!(is_sha256_hex(&EMPTY_SHA256.to_uppercase()));
        assert!(!is_sha256_hex(&EMPTY_SHA256[..63]));
        assert!(!is_sha256_hex(&format!("{EMPTY_SHA256}0")));
        assert!(!is_sha256_hex(&format!("{}g", &EMPTY_SHA256[..63])));
        assert!(!is_sha256_hex(""));
    }

    #[test]
    fn digests_compare_case_insensitively() {
        assert!(digests_match(&EMPTY_SHA256.to_uppercase(), EMPTY_SHA256));
        assert!(!digests_match(EMPTY_SHA256, &hash_bytes(b"x")));
    }
}

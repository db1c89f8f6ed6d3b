//! Deterministic content digests used for out-of-band edit detection.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A pluggable digest backend.
///
/// Implementations must be pure functions of the input bytes and stable
/// across processes and releases: a digest embedded in a field today is
/// compared against a freshly computed one in a later session.
pub trait ContentHasher: Send + Sync {
    /// Returns the digest of `content` as a lowercase hex string.
    fn digest(&self, content: &str) -> String;
}

/// Built-in digest algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Blake3,
}

impl ContentHasher for HashAlgorithm {
    fn digest(&self, content: &str) -> String {
        match self {
            Self::Sha256 => {
                let mut hasher = Sha256::new();
                hasher.update(content.as_bytes());
                hex::encode(hasher.finalize())
            }
            Self::Blake3 => blake3::hash(content.as_bytes()).to_hex().to_string(),
        }
    }
}

/// Hashes `content` with the default algorithm (SHA-256).
pub fn hash_content(content: &str) -> String {
    HashAlgorithm::default().digest(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_content_is_deterministic() {
        assert_eq!(hash_content("front of card"), hash_content("front of card"));
    }

    #[test]
    fn test_hash_content_distinguishes_inputs() {
        assert_ne!(hash_content("front"), hash_content("front "));
        assert_ne!(hash_content(""), hash_content("\n"));
    }

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            HashAlgorithm::Sha256.digest("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_blake3_is_hex_and_differs_from_sha256() {
        let digest = HashAlgorithm::Blake3.digest("abc");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(digest, HashAlgorithm::Sha256.digest("abc"));
    }

    #[test]
    fn test_hash_algorithm_serializes_lowercase() {
        let json = serde_json::to_string(&HashAlgorithm::Blake3).unwrap();
        assert_eq!(json, "\"blake3\"");
        let parsed: HashAlgorithm = serde_json::from_str("\"sha256\"").unwrap();
        assert_eq!(parsed, HashAlgorithm::Sha256);
    }
}

// crates/design-resolver-core/src/core/hashing.rs
// ============================================================================
// Module: Design Resolver Canonical Hashing
// Description: Integrity digests over RFC 8785 canonical JSON.
// Purpose: Detect corrupted or tampered frequency-map cache payloads.
// Dependencies: serde, serde_jcs, sha2, thiserror
// ============================================================================

//! ## Overview
//! Cached frequency maps carry a digest of their canonical JSON form. A
//! reader recomputes the digest with the recorded algorithm and trusts the
//! payload only when both agree. Canonicalization makes the digest independent
//! of map ordering and float formatting in the stored bytes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;

use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;
use thiserror::Error;

// ============================================================================
// SECTION: Algorithms
// ============================================================================

/// Digest algorithms a cache envelope may record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    /// SHA-256.
    Sha256,
}

impl HashAlgorithm {
    /// Digests raw bytes.
    fn digest(self, bytes: &[u8]) -> Vec<u8> {
        match self {
            Self::Sha256 => Sha256::digest(bytes).to_vec(),
        }
    }
}

/// Algorithm written into new envelopes.
pub const DEFAULT_HASH_ALGORITHM: HashAlgorithm = HashAlgorithm::Sha256;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Digest computation failures.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum HashError {
    /// Value could not be written as canonical JSON.
    #[error("failed to canonicalize json: {0}")]
    Canonicalization(String),
}

// ============================================================================
// SECTION: Digest
// ============================================================================

/// Algorithm-tagged digest, stored as lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashDigest {
    /// Algorithm that produced `value`.
    pub algorithm: HashAlgorithm,
    /// Lowercase hex digest.
    pub value: String,
}

impl HashDigest {
    /// Digests the canonical JSON form of a value.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Canonicalization`] when the value cannot be serialized.
    pub fn of_canonical_json<T: Serialize + ?Sized>(
        algorithm: HashAlgorithm,
        value: &T,
    ) -> Result<Self, HashError> {
        let canonical =
            serde_jcs::to_vec(value).map_err(|err| HashError::Canonicalization(err.to_string()))?;
        let value = algorithm.digest(&canonical).iter().fold(
            String::with_capacity(64),
            |mut hex, byte| {
                let _ = write!(hex, "{byte:02x}");
                hex
            },
        );
        Ok(Self {
            algorithm,
            value,
        })
    }

    /// Returns true when `value` hashes to this digest under its algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Canonicalization`] when the value cannot be serialized.
    pub fn matches<T: Serialize + ?Sized>(&self, value: &T) -> Result<bool, HashError> {
        Ok(Self::of_canonical_json(self.algorithm, value)? == *self)
    }
}

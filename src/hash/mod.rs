//! Strong hash implementations for chunk identity.
//!
//! Chunks are digested incrementally while they are scanned, so the bytes
//! are walked once for boundary detection and hashing together.
//!
//! - BLAKE3 (default)
//! - SHA-256 (requires the `sha256` feature)

mod blake3;
#[cfg(feature = "sha256")]
mod sha256;

use self::blake3::Blake3Hasher;
#[cfg(feature = "sha256")]
use self::sha256::Sha256Hasher;

use crate::chunk::ChunkHash;
use crate::config::HashAlgorithm;

impl HashAlgorithm {
    /// Digests `data` in one shot.
    ///
    /// ```
    /// use cutpoint::HashAlgorithm;
    ///
    /// let a = HashAlgorithm::Blake3.digest(b"chunk");
    /// assert_eq!(a, HashAlgorithm::Blake3.digest(b"chunk"));
    /// assert_eq!(a.to_hex().len(), 64);
    /// ```
    pub fn digest(&self, data: &[u8]) -> ChunkHash {
        match self {
            HashAlgorithm::Blake3 => Blake3Hasher::hash(data),
            #[cfg(feature = "sha256")]
            HashAlgorithm::Sha256 => Sha256Hasher::hash(data),
        }
    }
}

/// Incremental digest state for the open chunk.
#[derive(Debug, Clone)]
pub(crate) enum Digester {
    Blake3(Blake3Hasher),
    #[cfg(feature = "sha256")]
    Sha256(Sha256Hasher),
}

impl Digester {
    pub(crate) fn new(algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::Blake3 => Digester::Blake3(Blake3Hasher::new()),
            #[cfg(feature = "sha256")]
            HashAlgorithm::Sha256 => Digester::Sha256(Sha256Hasher::new()),
        }
    }

    pub(crate) fn update(&mut self, data: &[u8]) {
        match self {
            Digester::Blake3(h) => h.update(data),
            #[cfg(feature = "sha256")]
            Digester::Sha256(h) => h.update(data),
        }
    }

    /// Finishes the current chunk's digest and readies the state for the next.
    pub(crate) fn finalize_reset(&mut self) -> ChunkHash {
        match self {
            Digester::Blake3(h) => h.finalize_reset(),
            #[cfg(feature = "sha256")]
            Digester::Sha256(h) => h.finalize_reset(),
        }
    }
}

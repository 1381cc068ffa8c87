//! BLAKE3-based chunk hashing implementation.

use crate::chunk::ChunkHash;

/// A hasher that computes BLAKE3 hashes.
#[derive(Debug, Clone, Default)]
pub(crate) struct Blake3Hasher {
    state: blake3::Hasher,
}

impl Blake3Hasher {
    /// Creates a new hasher.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Updates the hasher with more data.
    pub(crate) fn update(&mut self, data: &[u8]) {
        self.state.update(data);
    }

    /// Returns the hash of everything fed so far and starts over.
    pub(crate) fn finalize_reset(&mut self) -> ChunkHash {
        let hash = ChunkHash::new(self.state.finalize().into());
        self.state.reset();
        hash
    }

    /// Convenience method to hash data in one shot.
    pub(crate) fn hash(data: &[u8]) -> ChunkHash {
        ChunkHash::new(blake3::hash(data).into())
    }
}

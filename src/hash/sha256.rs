//! SHA-256 chunk hashing.

use sha2::{Digest, Sha256};

use crate::chunk::ChunkHash;

#[derive(Debug, Clone, Default)]
pub(crate) struct Sha256Hasher {
    state: Sha256,
}

impl Sha256Hasher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn update(&mut self, data: &[u8]) {
        self.state.update(data);
    }

    pub(crate) fn finalize_reset(&mut self) -> ChunkHash {
        ChunkHash::new(self.state.finalize_reset().into())
    }

    pub(crate) fn hash(data: &[u8]) -> ChunkHash {
        ChunkHash::new(Sha256::digest(data).into())
    }
}

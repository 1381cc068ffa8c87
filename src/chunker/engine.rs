//! Push-based chunking engine.
//!
//! [`StreamChunker`] is the state machine every driver shares: it owns the
//! FastCDC state, the bytes of the open chunk and the running digest. Bytes
//! go in through `push()` in any split; chunks come out in stream order;
//! `finish()` flushes the tail.
//!
//! # Example
//!
//! ```
//! use cutpoint::{ChunkConfig, StreamChunker};
//!
//! let mut chunker = StreamChunker::new(ChunkConfig::new(16, 64, 256)?);
//!
//! let mut chunks = chunker.push(&[0x42; 300]);
//! chunks.extend(chunker.push(b"more input"));
//! chunks.extend(chunker.finish());
//!
//! let total: usize = chunks.iter().map(|c| c.len()).sum();
//! assert_eq!(total, 310);
//! # Ok::<(), cutpoint::ChunkError>(())
//! ```

use bytes::BytesMut;
use tracing::trace;

use crate::buffer::READ_BUFFER_SIZE;
use crate::cdc::FastCdc;
use crate::chunk::Chunk;
use crate::config::ChunkConfig;
use crate::hash::Digester;

/// Stateful CDC engine fed with arbitrary slices of a stream.
///
/// # Determinism
///
/// Identical byte streams produce identical chunks regardless of how many
/// bytes are pushed at once or how many `push()` calls are made.
///
/// # Memory
///
/// Only the open chunk is buffered, and it never grows past `max_size`.
/// The buffer starts at one read buffer and grows on demand, so a large
/// `max_size` costs nothing until a chunk actually gets that long.
#[derive(Debug)]
pub struct StreamChunker {
    cdc: FastCdc,
    open: BytesMut,
    digester: Digester,
    offset: u64,
    config: ChunkConfig,
}

impl StreamChunker {
    /// Creates a new engine with the given configuration.
    pub fn new(config: ChunkConfig) -> Self {
        Self {
            cdc: FastCdc::new(&config),
            open: BytesMut::with_capacity(config.max_size().min(READ_BUFFER_SIZE)),
            digester: Digester::new(config.hash_config().algorithm),
            offset: 0,
            config,
        }
    }

    /// Consumes `input` up to and including the next boundary.
    ///
    /// Returns how many bytes were consumed and the chunk they completed,
    /// if any. Unconsumed bytes must be fed again.
    pub(crate) fn feed(&mut self, input: &[u8]) -> (usize, Option<Chunk>) {
        match self.cdc.find_boundary(input) {
            Some(n) => {
                self.absorb(&input[..n]);
                (n, Some(self.emit()))
            }
            None => {
                self.absorb(input);
                (input.len(), None)
            }
        }
    }

    /// Pushes data and returns every chunk it completes.
    ///
    /// Bytes after the last boundary stay buffered for the next call.
    pub fn push(&mut self, data: &[u8]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut rest = data;
        while !rest.is_empty() {
            let (consumed, chunk) = self.feed(rest);
            chunks.extend(chunk);
            rest = &rest[consumed..];
        }
        chunks
    }

    /// Ends the stream and returns the trailing chunk, if any bytes remain.
    ///
    /// The trailing chunk may be shorter than `min_size`. The rolling hash is
    /// reset, so the engine can continue with a new stream; offsets keep
    /// counting until [`reset`](StreamChunker::reset).
    pub fn finish(&mut self) -> Option<Chunk> {
        self.cdc.reset();
        if self.open.is_empty() {
            return None;
        }
        Some(self.emit())
    }

    /// Discards buffered bytes and restarts offsets at zero.
    pub fn reset(&mut self) {
        self.cdc.reset();
        self.open.clear();
        self.digester = Digester::new(self.config.hash_config().algorithm);
        self.offset = 0;
    }

    /// Returns the stream offset of the next chunk to be emitted.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the number of buffered bytes of the open chunk.
    pub fn pending_len(&self) -> usize {
        self.open.len()
    }

    /// Returns the configuration used by this engine.
    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    fn absorb(&mut self, bytes: &[u8]) {
        self.open.extend_from_slice(bytes);
        self.digester.update(bytes);
    }

    fn emit(&mut self) -> Chunk {
        let data = self.open.split().freeze();
        let offset = self.offset;
        self.offset += data.len() as u64;

        trace!(offset, length = data.len(), "chunk boundary");

        Chunk {
            hash: self.digester.finalize_reset(),
            data,
            offset,
        }
    }
}

//! Chunker and ChunkIter.
//!
//! - [`Chunker`] - Configures and initiates chunking operations
//! - [`ChunkIter`] - Iterator that yields chunks from a [`std::io::Read`] source
//!
//! # Example
//!
//! ```no_run
//! use cutpoint::{Chunker, ChunkConfig};
//! use std::fs::File;
//!
//! let file = File::open("data.bin")?;
//! let chunker = Chunker::new(ChunkConfig::default());
//!
//! for chunk in chunker.chunk(file) {
//!     let chunk = chunk?;
//!     println!("{} bytes @ {} -> {}", chunk.len(), chunk.offset, chunk.hash);
//! }
//! # Ok::<(), cutpoint::ChunkError>(())
//! ```

use std::io::{ErrorKind, Read};

use bytes::Bytes;

use super::engine::StreamChunker;
use crate::buffer::Buffer;
use crate::cdc::FastCdc;
use crate::chunk::Chunk;
use crate::config::ChunkConfig;
use crate::error::ChunkError;

/// A chunker that processes byte streams into content-defined chunks.
///
/// `Chunker` is the high-level API for synchronous chunking. It holds a
/// configuration and provides methods to chunk data from various sources.
///
/// # Example
///
/// ```
/// use cutpoint::{Chunker, ChunkConfig};
/// use std::io::Cursor;
///
/// let data = b"some data to chunk";
/// let chunker = Chunker::new(ChunkConfig::default());
/// let chunks: Vec<_> = chunker.chunk(Cursor::new(&data[..])).collect::<Result<_, _>>()?;
/// assert_eq!(chunks.len(), 1);
/// # Ok::<(), cutpoint::ChunkError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Chunker {
    config: ChunkConfig,
}

impl Chunker {
    /// Creates a new chunker with the given configuration.
    pub fn new(config: ChunkConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    /// Creates a lazy chunking iterator over a reader.
    ///
    /// The reader is consumed once, front to back. The iterator is finite
    /// and cannot be restarted; dropping it stops reading.
    pub fn chunk<R: Read>(&self, reader: R) -> ChunkIter<R> {
        ChunkIter::new(reader, self.config)
    }

    /// Creates a push-based engine with this configuration.
    pub fn stream(&self) -> StreamChunker {
        StreamChunker::new(self.config)
    }

    /// Chunks an in-memory buffer.
    ///
    /// Chunk data are zero-copy slices of `data`.
    ///
    /// ```
    /// use cutpoint::{Chunker, ChunkConfig};
    ///
    /// let chunker = Chunker::new(ChunkConfig::default());
    /// let chunks = chunker.chunk_bytes(&b"hello world"[..]);
    ///
    /// assert_eq!(chunks.len(), 1);
    /// assert_eq!(chunks[0].offset, 0);
    /// ```
    pub fn chunk_bytes(&self, data: impl Into<Bytes>) -> Vec<Chunk> {
        let data = data.into();
        let algorithm = self.config.hash_config().algorithm;
        let mut cdc = FastCdc::new(&self.config);
        let mut chunks = Vec::new();

        let mut start = 0usize;
        while start < data.len() {
            let len = cdc
                .find_boundary(&data[start..])
                .unwrap_or(data.len() - start);
            let chunk_data = data.slice(start..start + len);

            chunks.push(Chunk {
                hash: algorithm.digest(&chunk_data),
                data: chunk_data,
                offset: start as u64,
            });
            start += len;
        }

        chunks
    }
}

/// An iterator that yields chunks from a reader.
///
/// Reads through a pooled 64 KiB buffer and hands each read to a
/// [`StreamChunker`]. Interrupted reads are retried; any other read error
/// is yielded once and ends the iteration.
pub struct ChunkIter<R> {
    reader: R,
    engine: StreamChunker,
    buffer: Buffer,
    pos: usize,
    filled: usize,
    finished: bool,
}

impl<R: Read> ChunkIter<R> {
    fn new(reader: R, config: ChunkConfig) -> Self {
        Self {
            reader,
            engine: StreamChunker::new(config),
            buffer: Buffer::take(),
            pos: 0,
            filled: 0,
            finished: false,
        }
    }

    /// Returns the stream offset of the next chunk.
    pub fn offset(&self) -> u64 {
        self.engine.offset()
    }
}

impl<R: Read> Iterator for ChunkIter<R> {
    type Item = Result<Chunk, ChunkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            if self.pos < self.filled {
                let (consumed, chunk) = self.engine.feed(&self.buffer[self.pos..self.filled]);
                self.pos += consumed;
                if let Some(chunk) = chunk {
                    return Some(Ok(chunk));
                }
                continue;
            }

            match self.reader.read(&mut self.buffer) {
                Ok(0) => {
                    self.finished = true;
                    return self.engine.finish().map(Ok);
                }
                Ok(n) => {
                    self.pos = 0;
                    self.filled = n;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e.into()));
                }
            }
        }
    }
}

impl<R> std::iter::FusedIterator for ChunkIter<R> where R: Read {}

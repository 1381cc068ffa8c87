//! The Chunk type - represents a content-defined chunk.

use bytes::Bytes;
use std::fmt;

use super::{ChunkHash, ChunkResult, ChunkSpan};

/// A content-defined chunk: its bytes, where it starts, and its digest.
///
/// # Example
///
/// ```
/// use cutpoint::{Chunk, ChunkHash};
/// use bytes::Bytes;
///
/// let chunk = Chunk {
///     data: Bytes::from_static(b"hello world"),
///     offset: 0,
///     hash: ChunkHash::new([0u8; 32]),
/// };
///
/// assert_eq!(chunk.len(), 11);
/// assert_eq!(chunk.end(), 11);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// The chunk data.
    pub data: Bytes,

    /// The offset in the original stream.
    pub offset: u64,

    /// Digest of `data`.
    pub hash: ChunkHash,
}

impl Chunk {
    /// Returns the length of the chunk data.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the chunk has no data.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the end offset (exclusive).
    pub fn end(&self) -> u64 {
        self.offset + self.data.len() as u64
    }

    /// Returns the chunk as a range.
    pub fn range(&self) -> std::ops::Range<u64> {
        self.offset..self.end()
    }

    /// Returns the span this chunk covers.
    pub fn span(&self) -> ChunkSpan {
        ChunkSpan::new(self.offset, self.len())
    }

    /// Returns the result record for this chunk.
    pub fn result(&self) -> ChunkResult {
        ChunkResult {
            offset: self.offset,
            length: self.len(),
            hash: self.hash,
        }
    }

    /// Consumes the chunk and returns the underlying data.
    pub fn into_data(self) -> Bytes {
        self.data
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Chunk({} bytes @ {}, hash={})",
            self.len(),
            self.offset,
            self.hash
        )
    }
}

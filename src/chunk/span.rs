//! Chunk positions and the per-chunk result record.

use std::ops::Range;

use super::ChunkHash;

/// Position of a chunk in its stream.
///
/// Spans produced by one pass are contiguous: each span's `end()` is the
/// next span's `offset`, and the last `end()` is the stream length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkSpan {
    /// Byte offset from the start of the stream.
    pub offset: u64,
    /// Chunk length in bytes.
    pub length: usize,
}

impl ChunkSpan {
    /// Creates a span.
    pub const fn new(offset: u64, length: usize) -> Self {
        Self { offset, length }
    }

    /// Offset one past the last byte.
    pub fn end(&self) -> u64 {
        self.offset + self.length as u64
    }

    /// The span as a byte range.
    pub fn range(&self) -> Range<u64> {
        self.offset..self.end()
    }
}

/// The externally visible record for one chunk: where it starts, how long
/// it is and the digest of its bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChunkResult {
    /// Byte offset from the start of the stream.
    pub offset: u64,
    /// Chunk length in bytes.
    pub length: usize,
    /// Digest of the chunk bytes.
    pub hash: ChunkHash,
}

impl ChunkResult {
    /// The span this result covers.
    pub fn span(&self) -> ChunkSpan {
        ChunkSpan::new(self.offset, self.length)
    }
}

//! Chunk types.
//!
//! - [`Chunk`] - Content-defined chunk with data, offset, hash
//! - [`ChunkHash`] - 32-byte digest, hex-named
//! - [`ChunkSpan`] - Offset and length of a chunk
//! - [`ChunkResult`] - Offset, length and hash reported per chunk

mod data;
mod hash;
mod span;

pub use data::Chunk;
pub use hash::{ChunkHash, ParseChunkHashError};
pub use span::{ChunkResult, ChunkSpan};

//! Chunking drivers for processing byte streams.
//!
//! - [`StreamChunker`] - Stateful CDC engine with `push()`/`finish()` API
//! - [`Chunker`] - Entry point holding a configuration
//! - [`ChunkIter`] - Lazy iterator over a [`std::io::Read`] source

mod engine;
mod iter;

pub use engine::StreamChunker;
pub use iter::{ChunkIter, Chunker};

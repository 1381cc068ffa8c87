//! cutpoint
//!
//! Content-defined chunking with normalized FastCDC and per-chunk digests.
//!
//! `cutpoint` splits a byte stream into variable-size chunks whose
//! boundaries depend only on nearby content. Inserting or deleting bytes
//! moves the boundaries near the edit and leaves the rest of the chunks,
//! and their hashes, unchanged. That makes it a building block for:
//!
//! - deduplication and content-addressable storage
//! - delta synchronization
//! - backup systems
//!
//! Every chunk carries its offset, length and a 32-byte digest (BLAKE3 by
//! default, SHA-256 with the `sha256` feature). Chunks can optionally be
//! written to a [`ChunkStore`], one file per distinct hash.
//!
//! # Sync
//!
//! ```no_run
//! use std::fs::File;
//! use cutpoint::{Chunker, ChunkConfig, ChunkError};
//!
//! fn main() -> Result<(), ChunkError> {
//!     let file = File::open("data.bin")?;
//!     let chunker = Chunker::new(ChunkConfig::default());
//!
//!     for chunk in chunker.chunk(file) {
//!         let chunk = chunk?;
//!         println!("{} {} {}", chunk.offset, chunk.len(), chunk.hash);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Whole file with a chunk store
//!
//! ```no_run
//! use std::path::Path;
//! use cutpoint::{chunk_file, ChunkOptions};
//!
//! let config = ChunkOptions::new().avg(4096).resolve()?;
//! let results = chunk_file("data.bin", config, Some(Path::new("out")))?;
//! println!("{} chunks", results.len());
//! # Ok::<(), cutpoint::ChunkError>(())
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use cutpoint::{chunk_async, ChunkConfig};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(reader: R) -> Result<(), cutpoint::ChunkError> {
//!     let mut stream = chunk_async(reader, ChunkConfig::default());
//!
//!     while let Some(chunk) = stream.next().await {
//!         let chunk = chunk?;
//!         println!("chunk {}", chunk.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `sha256`: SHA-256 chunk digests
//! - `serde`: `Serialize`/`Deserialize` for [`ChunkHash`] and [`ChunkResult`]
//! - `async-io`: [`chunk_async`] over `futures_io::AsyncRead`
//! - `tokio`: [`chunk_file_async`] on tokio's blocking pool

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chunk;
mod chunker;
mod config;
mod error;
mod pipeline;
mod store;

mod buffer; // internal (thread-local reuse)
mod cdc;
mod hash;

#[cfg(feature = "async-io")]
mod async_stream;

pub use cdc::{BoundaryDetector, FastCdc, GearHash};
pub use chunk::{Chunk, ChunkHash, ChunkResult, ChunkSpan, ParseChunkHashError};
pub use chunker::{ChunkIter, Chunker, StreamChunker};
pub use config::{
    AVERAGE_MAX, AVERAGE_MIN, ChunkConfig, ChunkOptions, DEFAULT_AVG_CHUNK_SIZE,
    DEFAULT_MAX_CHUNK_SIZE, DEFAULT_MIN_CHUNK_SIZE, HashAlgorithm, HashConfig, MAXIMUM_MAX,
    MAXIMUM_MIN, MINIMUM_MAX, MINIMUM_MIN, Normalization,
};
pub use error::{ChunkError, ErrorKind};
pub use pipeline::{chunk_file, chunk_reader};
pub use store::{ChunkStore, PutOutcome};

#[cfg(feature = "tokio")]
pub use pipeline::chunk_file_async;

#[cfg(feature = "async-io")]
pub use async_stream::{ChunkStream, chunk_async};

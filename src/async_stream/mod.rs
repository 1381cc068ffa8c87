//! Async streaming support for chunking.
//!
//! This module provides asynchronous chunking using the `futures-io::AsyncRead`
//! trait, making it runtime-agnostic.
//!
//! - [`chunk_async`] - Creates an async stream of chunks from an async reader
//!
//! This module requires the `async-io` feature to be enabled.

mod stream;

pub use stream::{ChunkStream, chunk_async};

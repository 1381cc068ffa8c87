//! Async stream adapter for chunking.
//!
//! Uses `futures_io::AsyncRead`, so it runs on tokio (through
//! `tokio_util::compat`), async-std, smol or any futures-compatible runtime.
//!
//! # Example
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
//!         println!("{} @ {}", chunk.hash, chunk.offset);
//!     }
//!     Ok(())
//! }
//! ```

use std::io::ErrorKind;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;

use crate::buffer::Buffer;
use crate::chunk::Chunk;
use crate::chunker::StreamChunker;
use crate::config::ChunkConfig;
use crate::error::ChunkError;

pin_project! {
    /// A stream that yields chunks from an async reader.
    ///
    /// Same boundaries, offsets and hashes as the synchronous
    /// [`ChunkIter`](crate::ChunkIter) over the same bytes.
    pub struct ChunkStream<R> {
        #[pin]
        reader: R,
        engine: StreamChunker,
        buffer: Buffer,
        pos: usize,
        filled: usize,
        finished: bool,
    }
}

impl<R> ChunkStream<R> {
    /// Creates a new chunk stream from an async reader.
    pub fn new(reader: R, config: ChunkConfig) -> Self {
        Self {
            reader,
            engine: StreamChunker::new(config),
            buffer: Buffer::take(),
            pos: 0,
            filled: 0,
            finished: false,
        }
    }
}

impl<R: AsyncRead> Stream for ChunkStream<R> {
    type Item = Result<Chunk, ChunkError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.finished {
            return Poll::Ready(None);
        }

        loop {
            if *this.pos < *this.filled {
                let (consumed, chunk) = this.engine.feed(&this.buffer[*this.pos..*this.filled]);
                *this.pos += consumed;
                if let Some(chunk) = chunk {
                    return Poll::Ready(Some(Ok(chunk)));
                }
                continue;
            }

            match this.reader.as_mut().poll_read(cx, &mut this.buffer[..]) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Ok(0)) => {
                    *this.finished = true;
                    return Poll::Ready(this.engine.finish().map(Ok));
                }
                Poll::Ready(Ok(n)) => {
                    *this.pos = 0;
                    *this.filled = n;
                }
                Poll::Ready(Err(e)) if e.kind() == ErrorKind::Interrupted => continue,
                Poll::Ready(Err(e)) => {
                    *this.finished = true;
                    return Poll::Ready(Some(Err(ChunkError::Io(e))));
                }
            }
        }
    }
}

/// Creates a chunk stream from an async reader.
///
/// For tokio readers, convert with `tokio_util::compat::TokioAsyncReadCompatExt`:
///
/// ```ignore
/// use tokio_util::compat::TokioAsyncReadCompatExt;
/// use cutpoint::{chunk_async, ChunkConfig};
///
/// let file = tokio::fs::File::open("file").await?;
/// let stream = chunk_async(file.compat(), ChunkConfig::default());
/// ```
pub fn chunk_async<R: AsyncRead>(reader: R, config: ChunkConfig) -> ChunkStream<R> {
    ChunkStream::new(reader, config)
}

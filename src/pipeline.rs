//! One-call chunking passes.
//!
//! These tie the reader driver, the digester and the optional
//! [`ChunkStore`] together and collect the ordered chunk records.
//!
//! ```no_run
//! use cutpoint::{chunk_file, ChunkOptions};
//! use std::path::Path;
//!
//! let config = ChunkOptions::from_avg(65_536).resolve()?;
//! let results = chunk_file("disk.img", config, Some(Path::new("chunks")))?;
//!
//! for r in &results {
//!     println!("{:>12} {:>8} {}", r.offset, r.length, r.hash);
//! }
//! # Ok::<(), cutpoint::ChunkError>(())
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::chunk::ChunkResult;
use crate::chunker::Chunker;
use crate::config::ChunkConfig;
use crate::error::ChunkError;
use crate::store::{ChunkStore, PutOutcome};

/// Chunks everything `reader` yields.
///
/// When `store` is given, every chunk is written to it as soon as it is
/// produced. Returns the records in stream order, or the first error; on
/// error no partial list is returned, but chunks already stored stay.
pub fn chunk_reader<R: Read>(
    reader: R,
    config: ChunkConfig,
    store: Option<&ChunkStore>,
) -> Result<Vec<ChunkResult>, ChunkError> {
    config.validate()?;

    let mut results = Vec::new();
    let mut written = 0usize;
    let mut total = 0u64;

    for chunk in Chunker::new(config).chunk(reader) {
        let chunk = chunk?;
        if let Some(store) = store {
            if store.put_chunk(&chunk)? == PutOutcome::Written {
                written += 1;
            }
        }
        total += chunk.len() as u64;
        results.push(chunk.result());
    }

    debug!(
        chunks = results.len(),
        bytes = total,
        written,
        "chunking pass complete"
    );
    Ok(results)
}

/// Chunks the file at `path`, optionally storing chunks under `output_dir`.
///
/// # Errors
///
/// - [`ChunkError::Open`] if the file cannot be opened
/// - [`ChunkError::OutputWrite`] if `output_dir` or a chunk file cannot be
///   written
/// - [`ChunkError::Io`] if a read fails mid-stream
pub fn chunk_file(
    path: impl AsRef<Path>,
    config: ChunkConfig,
    output_dir: Option<&Path>,
) -> Result<Vec<ChunkResult>, ChunkError> {
    let path = path.as_ref();
    config.validate()?;

    let file = File::open(path).map_err(|source| ChunkError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let store = output_dir.map(ChunkStore::open).transpose()?;

    let results = chunk_reader(file, config, store.as_ref())?;

    info!(
        path = %path.display(),
        chunks = results.len(),
        bytes = results.last().map_or(0, |r| r.span().end()),
        "chunked file"
    );
    Ok(results)
}

/// Runs [`chunk_file`] on tokio's blocking pool.
///
/// # Errors
///
/// Same as [`chunk_file`], plus [`ChunkError::Task`] if the blocking task
/// panicked or was cancelled.
#[cfg(feature = "tokio")]
pub async fn chunk_file_async(
    path: impl Into<std::path::PathBuf>,
    config: ChunkConfig,
    output_dir: Option<std::path::PathBuf>,
) -> Result<Vec<ChunkResult>, ChunkError> {
    let path = path.into();
    tokio::task::spawn_blocking(move || chunk_file(&path, config, output_dir.as_deref()))
        .await
        .map_err(|e| ChunkError::Task {
            message: e.to_string(),
        })?
}

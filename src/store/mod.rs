//! Content-addressed chunk store.
//!
//! Chunk bytes are persisted as `<root>/<hex hash>`. Because the name is the
//! digest of the content, a file that already exists under a name holds the
//! right bytes, so every distinct chunk is written once and later writes of
//! the same hash are skipped.
//!
//! Writes go to a temporary file in `root` first and are renamed into place
//! without overwriting, so readers never observe a partially written chunk
//! and concurrent writers of the same hash cannot clobber each other.
//!
//! # Example
//!
//! ```no_run
//! use cutpoint::{ChunkStore, PutOutcome, HashAlgorithm};
//!
//! let store = ChunkStore::open("chunks")?;
//! let data = b"chunk bytes";
//! let hash = HashAlgorithm::Blake3.digest(data);
//!
//! assert_eq!(store.put(&hash, data)?, PutOutcome::Written);
//! assert_eq!(store.put(&hash, data)?, PutOutcome::AlreadyPresent);
//! # Ok::<(), cutpoint::ChunkError>(())
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::chunk::{Chunk, ChunkHash};
use crate::error::ChunkError;

/// What [`ChunkStore::put`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    /// The chunk file was created.
    Written,
    /// A file with this hash already existed and was left untouched.
    AlreadyPresent,
}

/// A directory of chunk files named by their hash.
#[derive(Debug, Clone)]
pub struct ChunkStore {
    root: PathBuf,
}

impl ChunkStore {
    /// Opens a store rooted at `root`, creating the directory and any
    /// missing parents.
    ///
    /// # Errors
    ///
    /// [`ChunkError::OutputWrite`] if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, ChunkError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| ChunkError::output(&root, e))?;
        debug!(root = %root.display(), "chunk store opened");
        Ok(Self { root })
    }

    /// Returns the store directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path a chunk with `hash` is stored at.
    pub fn path_for(&self, hash: &ChunkHash) -> PathBuf {
        self.root.join(hash.to_hex())
    }

    /// Returns true if a chunk with `hash` is stored.
    ///
    /// Only a regular file counts; anything else at the path makes
    /// [`put`](ChunkStore::put) fail.
    pub fn contains(&self, hash: &ChunkHash) -> bool {
        fs::metadata(self.path_for(hash)).is_ok_and(|meta| meta.is_file())
    }

    /// Stores `data` under `hash` unless a file with that name exists.
    ///
    /// `hash` must be the digest of `data`; the store does not re-hash.
    ///
    /// # Errors
    ///
    /// [`ChunkError::OutputWrite`] if something other than a regular file
    /// occupies the chunk's path, or if the temporary file cannot be
    /// created, written or renamed into place. Nothing is rolled back.
    pub fn put(&self, hash: &ChunkHash, data: &[u8]) -> Result<PutOutcome, ChunkError> {
        let path = self.path_for(hash);
        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => {
                debug!(path = %path.display(), "chunk already stored");
                return Ok(PutOutcome::AlreadyPresent);
            }
            Ok(_) => {
                let err = io::Error::new(io::ErrorKind::AlreadyExists, "not a regular file");
                return Err(ChunkError::output(path, err));
            }
            Err(_) => {}
        }

        let mut tmp =
            NamedTempFile::new_in(&self.root).map_err(|e| ChunkError::output(&self.root, e))?;
        tmp.write_all(data)
            .and_then(|()| tmp.as_file().sync_data())
            .map_err(|e| ChunkError::output(tmp.path(), e))?;

        match tmp.persist_noclobber(&path) {
            Ok(_) => {
                debug!(path = %path.display(), len = data.len(), "chunk stored");
                Ok(PutOutcome::Written)
            }
            // Another writer stored the same content first.
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                debug!(path = %path.display(), "chunk stored concurrently");
                Ok(PutOutcome::AlreadyPresent)
            }
            Err(e) => Err(ChunkError::output(path, e.error)),
        }
    }

    /// Stores a chunk under its own hash.
    pub fn put_chunk(&self, chunk: &Chunk) -> Result<PutOutcome, ChunkError> {
        self.put(&chunk.hash, &chunk.data)
    }
}

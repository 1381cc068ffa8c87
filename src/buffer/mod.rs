//! Internal read-buffer management.
//!
//! Readers are drained through fixed-size buffers taken from a thread-local
//! pool, so repeated passes on one thread do not reallocate. This is an
//! implementation detail and not part of the public API.

mod pool;

pub(crate) use pool::{Buffer, READ_BUFFER_SIZE};

//! Thread-local pool of read buffers.

use std::cell::RefCell;
use std::ops::{Deref, DerefMut};

/// Size of a read buffer handed out by the pool.
pub const READ_BUFFER_SIZE: usize = 64 * 1024; // 64 KiB

/// Maximum number of buffers to keep per thread.
pub const MAX_POOL_SIZE: usize = 4;

/// A reusable, fixed-length read buffer.
///
/// Dereferences to a `READ_BUFFER_SIZE` byte slice. Dropping it returns the
/// allocation to the current thread's pool.
pub struct Buffer {
    data: Vec<u8>,
}

impl Buffer {
    /// Takes a buffer from the thread-local pool or creates a new one.
    pub fn take() -> Self {
        let mut data = THREAD_BUFFER_POOL
            .with(|pool| pool.borrow_mut().pop())
            .unwrap_or_default();
        data.resize(READ_BUFFER_SIZE, 0);
        Self { data }
    }
}

impl Deref for Buffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}

impl DerefMut for Buffer {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        // Return the buffer to the pool if it's not too large
        if self.data.capacity() <= READ_BUFFER_SIZE * 2 {
            let data = std::mem::take(&mut self.data);
            THREAD_BUFFER_POOL.with(|pool| {
                let mut pool = pool.borrow_mut();
                if pool.len() < MAX_POOL_SIZE {
                    pool.push(data);
                }
            });
        }
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::take()
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer").field("len", &self.data.len()).finish()
    }
}

// Thread-local buffer pool
thread_local! {
    static THREAD_BUFFER_POOL: RefCell<Vec<Vec<u8>>> = const { RefCell::new(Vec::new()) };
}

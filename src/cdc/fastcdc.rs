//! FastCDC boundary detection.
//!
//! This module couples the gear rolling hash with normalized chunking to
//! decide where chunks end.
//!
//! # Algorithm Overview
//!
//! For every byte the rolling hash is updated and the position inside the
//! open chunk advances. The boundary detector then applies, in order:
//!
//! 1. `position < min_size`: never cut
//! 2. `position >= max_size`: always cut
//! 3. `position < avg_size`: cut when `hash & mask_s == 0`
//! 4. otherwise: cut when `hash & mask_l == 0`
//!
//! `mask_s` has `avg_bits + level` one-bits and `mask_l` has
//! `avg_bits - level`, where `avg_bits` is `log2(avg_size)` rounded. Before
//! the average a cut is less likely than `1 / avg_size`, after it more
//! likely, which pulls sizes toward the average.
//!
//! # References
//!
//! Based on "FastCDC: A Fast and Efficient Content-Defined Chunking Approach
//! for Data Deduplication"
//! by Wen Xia et al., USENIX ATC 2016.

use super::gear::GearHash;
use crate::config::{ChunkConfig, Normalization};

/// Most one-bits a mask may carry.
const MAX_MASK_BITS: u32 = 48;

/// Builds a mask with `bits` one-bits spread over bits 16..=63.
///
/// Bit `i` of the sequence lands at `63 - (i * 29 mod 48)`; 29 is coprime
/// with 48 so the sequence visits each of the 48 positions once. A mask with
/// `n` bits is always a subset of the mask with `n + 1` bits, so any hash
/// that satisfies `mask_s` also satisfies `mask_l`.
///
/// Keeping the bits high means every mask bit depends on at least 17 bytes
/// of trailing content.
pub(crate) const fn spread_mask(bits: u32) -> u64 {
    let bits = if bits > MAX_MASK_BITS {
        MAX_MASK_BITS
    } else {
        bits
    };
    let mut mask = 0u64;
    let mut i = 0;
    while i < bits {
        mask |= 1u64 << (63 - ((i * 29) % MAX_MASK_BITS));
        i += 1;
    }
    mask
}

/// `log2(value)` rounded to the nearest integer.
fn log2_rounded(value: usize) -> u32 {
    (value as f64).log2().round() as u32
}

/// Decides whether a chunk ends at the current byte.
///
/// Stateless apart from the precomputed masks; the caller supplies the
/// position inside the open chunk and the current rolling hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryDetector {
    min_size: usize,
    avg_size: usize,
    max_size: usize,

    /// Harder mask, used while the chunk is smaller than `avg_size`.
    mask_s: u64,

    /// Easier mask, used once the chunk reaches `avg_size`.
    mask_l: u64,
}

impl BoundaryDetector {
    /// Creates a detector for the given bounds.
    ///
    /// Bounds are expected to be validated (`0 < min <= avg <= max`).
    pub fn new(
        min_size: usize,
        avg_size: usize,
        max_size: usize,
        normalization: Normalization,
    ) -> Self {
        let avg_bits = log2_rounded(avg_size.max(1));
        let level = normalization.bits();

        Self {
            min_size,
            avg_size,
            max_size,
            mask_s: spread_mask(avg_bits + level),
            mask_l: spread_mask(avg_bits.saturating_sub(level)),
        }
    }

    /// Creates a detector from a chunk configuration.
    pub fn from_config(config: &ChunkConfig) -> Self {
        Self::new(
            config.min_size(),
            config.avg_size(),
            config.max_size(),
            config.normalization(),
        )
    }

    /// Returns true if a chunk of `position` bytes ending with a rolling
    /// hash of `hash` should be cut here.
    #[inline]
    pub fn is_boundary(&self, position: usize, hash: u64) -> bool {
        if position < self.min_size {
            return false;
        }
        if position >= self.max_size {
            return true;
        }
        let mask = if position < self.avg_size {
            self.mask_s
        } else {
            self.mask_l
        };
        hash & mask == 0
    }

    /// Mask applied before the average size.
    pub fn mask_small(&self) -> u64 {
        self.mask_s
    }

    /// Mask applied from the average size on.
    pub fn mask_large(&self) -> u64 {
        self.mask_l
    }

    /// Returns the minimum size.
    pub fn min_size(&self) -> usize {
        self.min_size
    }

    /// Returns the average size.
    pub fn avg_size(&self) -> usize {
        self.avg_size
    }

    /// Returns the maximum size.
    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

/// FastCDC state for one pass over a stream.
///
/// Feeds bytes through a [`GearHash`] and asks a [`BoundaryDetector`]
/// after each one. On a boundary the rolling hash is reset, exactly once.
///
/// # Example
///
/// ```
/// use cutpoint::{ChunkConfig, FastCdc};
///
/// let config = ChunkConfig::new(16, 64, 256)?;
/// let mut cdc = FastCdc::new(&config);
///
/// let data = vec![0x5au8; 1000];
/// let first = cdc.find_boundary(&data).expect("max_size forces a cut");
/// assert!(first >= 16 && first <= 256);
/// # Ok::<(), cutpoint::ChunkError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FastCdc {
    gear: GearHash,
    detector: BoundaryDetector,
}

impl FastCdc {
    /// Creates a new FastCDC state for the given configuration.
    pub fn new(config: &ChunkConfig) -> Self {
        Self::with_detector(BoundaryDetector::from_config(config))
    }

    /// Creates a new FastCDC state around an existing detector.
    pub fn with_detector(detector: BoundaryDetector) -> Self {
        Self {
            gear: GearHash::new(),
            detector,
        }
    }

    /// Processes a single byte and returns true if a boundary was found.
    ///
    /// The byte is part of the chunk that ends at the boundary.
    #[inline]
    pub fn update(&mut self, byte: u8) -> bool {
        let hash = self.gear.update(byte);
        if self.detector.is_boundary(self.gear.position(), hash) {
            self.gear.reset();
            true
        } else {
            false
        }
    }

    /// Processes a buffer and returns the length of the prefix that
    /// completes the open chunk, or `None` if no boundary was found.
    ///
    /// Bytes after the returned position have not been consumed.
    pub fn find_boundary(&mut self, data: &[u8]) -> Option<usize> {
        for (i, &byte) in data.iter().enumerate() {
            if self.update(byte) {
                return Some(i + 1);
            }
        }
        None
    }

    /// Resets the state for a new stream.
    pub fn reset(&mut self) {
        self.gear.reset();
    }

    /// Returns the number of bytes since the last boundary.
    pub fn bytes_since_boundary(&self) -> usize {
        self.gear.position()
    }

    /// Returns the current rolling hash value.
    pub fn hash(&self) -> u64 {
        self.gear.hash()
    }

    /// Returns the boundary detector.
    pub fn detector(&self) -> &BoundaryDetector {
        &self.detector
    }
}

impl Default for FastCdc {
    fn default() -> Self {
        Self::new(&ChunkConfig::default())
    }
}

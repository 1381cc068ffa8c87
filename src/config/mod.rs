//! Configuration for chunking behavior.
//!
//! This module provides types to configure how chunking is performed:
//!
//! - [`ChunkConfig`] - Chunk size bounds, normalization level and digest choice
//! - [`Normalization`] - How tightly chunk sizes cluster around `avg_size`
//! - [`HashConfig`] / [`HashAlgorithm`] - Which digest names each chunk
//! - [`ChunkOptions`] - Partial, range-checked size options resolved into a config
//!
//! # Example
//!
//! ```
//! use cutpoint::{ChunkConfig, ChunkOptions, Normalization};
//!
//! // Explicit bounds
//! let config = ChunkConfig::new(4096, 16384, 65536)?
//!     .with_normalization(Normalization::Level2);
//!
//! // Only an average; min and max are derived from it
//! let config = ChunkOptions::from_avg(8192).resolve()?;
//! assert_eq!(config.min_size(), 2048);
//! assert_eq!(config.max_size(), 32768);
//! # Ok::<(), cutpoint::ChunkError>(())
//! ```

use crate::error::ChunkError;

mod options;

pub use options::{
    AVERAGE_MAX, AVERAGE_MIN, ChunkOptions, MAXIMUM_MAX, MAXIMUM_MIN, MINIMUM_MAX, MINIMUM_MIN,
};

/// Default minimum chunk size (4 KiB).
pub const DEFAULT_MIN_CHUNK_SIZE: usize = 4 * 1024;

/// Default average/target chunk size (16 KiB).
pub const DEFAULT_AVG_CHUNK_SIZE: usize = 16 * 1024;

/// Default maximum chunk size (64 KiB).
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 64 * 1024;

/// Normalized chunking level.
///
/// The boundary detector uses a harder mask (`avg_bits + level` one-bits)
/// before the chunk reaches `avg_size` and an easier one (`avg_bits - level`)
/// after it. Higher levels concentrate chunk sizes closer to the average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Normalization {
    /// Single mask, widest spread of chunk sizes.
    Level0,
    /// Masks differ by one bit on either side of the average.
    #[default]
    Level1,
    /// Masks differ by two bits.
    Level2,
    /// Masks differ by three bits, nearly all chunks close to the average.
    Level3,
}

impl Normalization {
    /// Number of mask bits added before, and removed after, the average.
    pub const fn bits(self) -> u32 {
        match self {
            Normalization::Level0 => 0,
            Normalization::Level1 => 1,
            Normalization::Level2 => 2,
            Normalization::Level3 => 3,
        }
    }
}

/// Digest algorithm used to name chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HashAlgorithm {
    /// BLAKE3, 32-byte output.
    #[default]
    Blake3,
    /// SHA-256, 32-byte output (requires the `sha256` feature).
    #[cfg(feature = "sha256")]
    Sha256,
}

/// Configuration for chunk hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HashConfig {
    /// Digest used for chunk identity and store file names.
    pub algorithm: HashAlgorithm,
}

impl HashConfig {
    /// Creates a hash configuration for the given algorithm.
    pub const fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    /// BLAKE3 hashing.
    pub const fn blake3() -> Self {
        Self::new(HashAlgorithm::Blake3)
    }

    /// SHA-256 hashing.
    #[cfg(feature = "sha256")]
    pub const fn sha256() -> Self {
        Self::new(HashAlgorithm::Sha256)
    }
}

/// Configuration for content-defined chunking behavior.
///
/// Sizes must be non-zero and ordered: `min_size <= avg_size <= max_size`.
/// Any value works, powers of two are not required; the boundary masks are
/// sized from `avg_size` rounded to the nearest power of two.
///
/// `new` performs only these structural checks. Use [`ChunkOptions`] to
/// apply the accepted ranges for user-supplied values.
///
/// # Example
///
/// ```
/// use cutpoint::ChunkConfig;
///
/// let config = ChunkConfig::new(1024, 4096, 65536)?;
/// assert_eq!(config.avg_size(), 4096);
///
/// // Builder pattern
/// let config = ChunkConfig::default()
///     .with_min_size(8192)
///     .with_avg_size(32768)
///     .with_max_size(131072);
/// config.validate()?;
/// # Ok::<(), cutpoint::ChunkError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkConfig {
    min_size: usize,
    avg_size: usize,
    max_size: usize,
    normalization: Normalization,
    hash_config: HashConfig,
}

impl ChunkConfig {
    /// Creates a new configuration with the specified size bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::InvalidConfig`] if any size is zero or the
    /// sizes are not ordered.
    pub fn new(min_size: usize, avg_size: usize, max_size: usize) -> Result<Self, ChunkError> {
        if min_size == 0 || avg_size == 0 || max_size == 0 {
            return Err(ChunkError::InvalidConfig {
                message: "chunk sizes must be non-zero",
            });
        }

        if min_size > avg_size {
            return Err(ChunkError::InvalidConfig {
                message: "min_size cannot be greater than avg_size",
            });
        }

        if avg_size > max_size {
            return Err(ChunkError::InvalidConfig {
                message: "avg_size cannot be greater than max_size",
            });
        }

        Ok(Self {
            min_size,
            avg_size,
            max_size,
            normalization: Normalization::default(),
            hash_config: HashConfig::default(),
        })
    }

    /// Sets the minimum chunk size.
    ///
    /// Note: This does not validate the configuration. Use [`ChunkConfig::validate`]
    /// to check if the configuration is valid.
    pub fn with_min_size(mut self, size: usize) -> Self {
        self.min_size = size;
        self
    }

    /// Sets the average/target chunk size.
    pub fn with_avg_size(mut self, size: usize) -> Self {
        self.avg_size = size;
        self
    }

    /// Sets the maximum chunk size.
    pub fn with_max_size(mut self, size: usize) -> Self {
        self.max_size = size;
        self
    }

    /// Sets the normalization level.
    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Sets the hash configuration.
    pub fn with_hash_config(mut self, config: HashConfig) -> Self {
        self.hash_config = config;
        self
    }

    /// Returns the minimum chunk size.
    pub fn min_size(&self) -> usize {
        self.min_size
    }

    /// Returns the average/target chunk size.
    pub fn avg_size(&self) -> usize {
        self.avg_size
    }

    /// Returns the maximum chunk size.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Returns the normalization level.
    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    /// Returns the hash configuration.
    pub fn hash_config(&self) -> &HashConfig {
        &self.hash_config
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), ChunkError> {
        Self::new(self.min_size, self.avg_size, self.max_size).map(|_| ())
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            min_size: DEFAULT_MIN_CHUNK_SIZE,
            avg_size: DEFAULT_AVG_CHUNK_SIZE,
            max_size: DEFAULT_MAX_CHUNK_SIZE,
            normalization: Normalization::default(),
            hash_config: HashConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ChunkConfig::default();
        assert_eq!(config.min_size(), DEFAULT_MIN_CHUNK_SIZE);
        assert_eq!(config.avg_size(), DEFAULT_AVG_CHUNK_SIZE);
        assert_eq!(config.max_size(), DEFAULT_MAX_CHUNK_SIZE);
        assert_eq!(config.normalization(), Normalization::Level1);
        assert_eq!(config.hash_config().algorithm, HashAlgorithm::Blake3);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ChunkConfig::default()
            .with_min_size(8192)
            .with_avg_size(32768)
            .with_max_size(131072)
            .with_normalization(Normalization::Level3);

        assert_eq!(config.min_size(), 8192);
        assert_eq!(config.avg_size(), 32768);
        assert_eq!(config.max_size(), 131072);
        assert_eq!(config.normalization().bits(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_non_power_of_two_sizes_accepted() {
        let config = ChunkConfig::new(1000, 3000, 10_000).unwrap();
        assert_eq!(config.avg_size(), 3000);
    }

    #[test]
    fn test_equal_sizes_accepted() {
        assert!(ChunkConfig::new(64, 64, 64).is_ok());
    }

    #[test]
    fn test_invalid_config_zero_size() {
        assert!(ChunkConfig::new(0, 16384, 65536).is_err());
        assert!(ChunkConfig::new(4096, 0, 65536).is_err());
        assert!(ChunkConfig::new(4096, 16384, 0).is_err());
    }

    #[test]
    fn test_invalid_config_ordering() {
        assert!(matches!(
            ChunkConfig::new(32768, 16384, 65536),
            Err(ChunkError::InvalidConfig { .. })
        ));
        assert!(ChunkConfig::new(4096, 65536, 16384).is_err());
    }

    #[test]
    fn test_validate_after_builder() {
        let config = ChunkConfig::default().with_min_size(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_normalization_bits() {
        assert_eq!(Normalization::Level0.bits(), 0);
        assert_eq!(Normalization::Level1.bits(), 1);
        assert_eq!(Normalization::Level2.bits(), 2);
        assert_eq!(Normalization::Level3.bits(), 3);
    }
}

//! Partial size options with range checks.

use super::ChunkConfig;
use crate::error::ChunkError;

/// Smallest accepted minimum chunk size.
pub const MINIMUM_MIN: usize = 64;
/// Largest accepted minimum chunk size (64 MiB).
pub const MINIMUM_MAX: usize = 64 * 1024 * 1024;
/// Smallest accepted average chunk size.
pub const AVERAGE_MIN: usize = 256;
/// Largest accepted average chunk size (256 MiB).
pub const AVERAGE_MAX: usize = 256 * 1024 * 1024;
/// Smallest accepted maximum chunk size.
pub const MAXIMUM_MIN: usize = 1024;
/// Largest accepted maximum chunk size (1 GiB).
pub const MAXIMUM_MAX: usize = 1024 * 1024 * 1024;

const FALLBACK_MIN: usize = 256;
const FALLBACK_AVG: usize = 1024;
const FALLBACK_MAX: usize = 4096;

/// User-facing size options, any of which may be omitted.
///
/// [`resolve`](ChunkOptions::resolve) fills the gaps and checks ranges:
///
/// - nothing set: `256 / 1024 / 4096`
/// - `avg` set: missing `min` is `avg / 4`, missing `max` is `avg * 4`,
///   both clamped into their accepted ranges
/// - `avg` missing: it becomes `(min + max) / 2`, clamped
///
/// Explicit values outside their range are rejected with
/// [`ChunkError::OutOfRange`], never truncated.
///
/// # Example
///
/// ```
/// use cutpoint::ChunkOptions;
///
/// let config = ChunkOptions::new().min(1024).max(65536).resolve()?;
/// assert_eq!(config.avg_size(), 33280);
///
/// assert!(ChunkOptions::from_avg(16).resolve().is_err());
/// # Ok::<(), cutpoint::ChunkError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkOptions {
    /// Requested minimum chunk size.
    pub min: Option<usize>,
    /// Requested average chunk size.
    pub avg: Option<usize>,
    /// Requested maximum chunk size.
    pub max: Option<usize>,
}

impl ChunkOptions {
    /// Options with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with only the average set.
    pub fn from_avg(avg: usize) -> Self {
        Self {
            avg: Some(avg),
            ..Self::default()
        }
    }

    /// Sets the minimum size.
    pub fn min(mut self, size: usize) -> Self {
        self.min = Some(size);
        self
    }

    /// Sets the average size.
    pub fn avg(mut self, size: usize) -> Self {
        self.avg = Some(size);
        self
    }

    /// Sets the maximum size.
    pub fn max(mut self, size: usize) -> Self {
        self.max = Some(size);
        self
    }

    /// Resolves the options into a validated [`ChunkConfig`].
    pub fn resolve(&self) -> Result<ChunkConfig, ChunkError> {
        let avg = self
            .avg
            .map(|v| check_range("avg_size", v, AVERAGE_MIN, AVERAGE_MAX))
            .transpose()?;

        let min = match (self.min, avg) {
            (Some(v), _) => check_range("min_size", v, MINIMUM_MIN, MINIMUM_MAX)?,
            (None, Some(avg)) => (avg / 4).clamp(MINIMUM_MIN, MINIMUM_MAX),
            (None, None) => FALLBACK_MIN,
        };

        let max = match (self.max, avg) {
            (Some(v), _) => check_range("max_size", v, MAXIMUM_MIN, MAXIMUM_MAX)?,
            (None, Some(avg)) => avg.saturating_mul(4).clamp(MAXIMUM_MIN, MAXIMUM_MAX),
            (None, None) => FALLBACK_MAX,
        };

        let avg = match avg {
            Some(avg) => avg,
            None if self.min.is_none() && self.max.is_none() => FALLBACK_AVG,
            None => ((min + max) / 2).clamp(AVERAGE_MIN, AVERAGE_MAX),
        };

        if min > avg || avg > max {
            return Err(ChunkError::InvalidConfig {
                message: "min_size, avg_size and max_size must be increasing",
            });
        }

        ChunkConfig::new(min, avg, max)
    }
}

fn check_range(
    name: &'static str,
    value: usize,
    min: usize,
    max: usize,
) -> Result<usize, ChunkError> {
    if value < min || value > max {
        return Err(ChunkError::OutOfRange {
            name,
            value,
            min,
            max,
        });
    }
    Ok(value)
}

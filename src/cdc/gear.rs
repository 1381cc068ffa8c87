//! Gear table and gear rolling hash.
//!
//! The gear hash keeps a 64-bit fingerprint that is updated in O(1) per byte:
//!
//! ```text
//! hash = (hash << 1) + GEAR[byte]
//! ```
//!
//! Every shift pushes old contributions one bit further up until they fall
//! off the top of the word, so bit `k` only depends on the last `k + 1`
//! bytes. The hash is therefore a fingerprint of a trailing 64-byte window
//! and boundary decisions made from it are local to the content.

/// Seed for the table generator. Changing it changes every chunk boundary.
const GEAR_SEED: u64 = 0x6a09_e667_f3bc_c908;

/// SplitMix64, evaluated at compile time.
const fn build_gear_table(seed: u64) -> [u64; 256] {
    let mut table = [0u64; 256];
    let mut state = seed;
    let mut i = 0;
    while i < 256 {
        state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        table[i] = z ^ (z >> 31);
        i += 1;
    }
    table
}

/// Gear table: one pseudo-random constant per byte value.
///
/// Computed once at compile time and shared read-only by every chunker.
pub(crate) static GEAR: [u64; 256] = build_gear_table(GEAR_SEED);

/// Gear rolling hash state.
///
/// Tracks the fingerprint together with the number of bytes fed since the
/// last [`reset`](GearHash::reset), which is the position inside the open
/// chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GearHash {
    hash: u64,
    position: usize,
}

impl GearHash {
    /// Creates a zeroed hash state.
    pub const fn new() -> Self {
        Self {
            hash: 0,
            position: 0,
        }
    }

    /// Feeds one byte and returns the new fingerprint.
    #[inline]
    pub fn update(&mut self, byte: u8) -> u64 {
        self.hash = (self.hash << 1).wrapping_add(GEAR[byte as usize]);
        self.position += 1;
        self.hash
    }

    /// Zeroes the fingerprint and the position.
    #[inline]
    pub fn reset(&mut self) {
        self.hash = 0;
        self.position = 0;
    }

    /// Current fingerprint.
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Bytes fed since the last reset.
    pub fn position(&self) -> usize {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gear_table_entries_distinct() {
        let mut sorted = GEAR.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 256, "gear entries must be distinct");
        assert!(GEAR.iter().all(|&v| v != 0));
    }

    #[test]
    fn test_gear_table_is_stable() {
        assert_eq!(GEAR, build_gear_table(GEAR_SEED));
    }

    #[test]
    fn test_update_formula() {
        let mut gear = GearHash::new();
        let h1 = gear.update(7);
        assert_eq!(h1, GEAR[7]);

        let h2 = gear.update(200);
        assert_eq!(h2, (GEAR[7] << 1).wrapping_add(GEAR[200]));
        assert_eq!(gear.position(), 2);
    }

    #[test]
    fn test_reset() {
        let mut gear = GearHash::new();
        for b in 0..10u8 {
            gear.update(b);
        }
        assert_ne!(gear.hash(), 0);

        gear.reset();
        assert_eq!(gear.hash(), 0);
        assert_eq!(gear.position(), 0);
    }

    #[test]
    fn test_window_forgets_old_bytes() {
        // After 64 more bytes, the leading byte no longer influences the hash.
        let tail: Vec<u8> = (0..64u8).map(|i| i.wrapping_mul(37)).collect();

        let mut a = GearHash::new();
        a.update(0x00);
        let mut b = GearHash::new();
        b.update(0xff);

        for &byte in &tail {
            a.update(byte);
            b.update(byte);
        }
        assert_eq!(a.hash(), b.hash());
    }
}

//! Hashing
//!
//! Provides:
//! - SHA-256 digests of simulation state, for bit-for-bit trajectory comparison
//! - The rolling security hash attached to submitted score records

use sha2::{Sha256, Digest};

/// Hash output type (256 bits / 32 bytes)
pub type StateHash = [u8; 32];

/// Deterministic hasher for simulation state.
///
/// Wraps SHA-256 with helpers for the primitive types the simulation uses.
/// Floats are hashed by bit pattern, so `-0.0` and `0.0` differ.
/// Order of updates is critical for determinism.
pub struct StateHasher {
    hasher: Sha256,
}

impl StateHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for simulation state.
    pub fn for_simulation() -> Self {
        Self::new(b"PIXEL_PERFECT_SIM_V1")
    }

    /// Create hasher for a whole trajectory (one update per tick).
    pub fn for_trajectory() -> Self {
        Self::new(b"PIXEL_PERFECT_TRAJECTORY_V1")
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with an f64 value (IEEE-754 bits, little-endian).
    #[inline]
    pub fn update_f64(&mut self, value: f64) {
        self.hasher.update(value.to_bits().to_le_bytes());
    }

    /// Update with a boolean.
    #[inline]
    pub fn update_bool(&mut self, value: bool) {
        self.update_u8(value as u8);
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> StateHash {
        self.hasher.finalize().into()
    }
}

// =============================================================================
// SECURITY HASH
// =============================================================================

/// Rolling 32-bit string hash (`h = h * 31 + c`) over UTF-16 code units.
///
/// Matches the browser client bit-for-bit, including 32-bit wraparound.
pub fn rolling_hash(data: &str) -> i32 {
    data.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5).wrapping_sub(hash).wrapping_add(unit as i32)
    })
}

/// Tamper-evidence hash for a score record.
///
/// Hashes `"{level}-{time}-{jumps}-{timestamp}-{user}"` and renders the
/// absolute value as lowercase hex. Not a security boundary on its own.
pub fn security_hash(
    level_index: u32,
    time: f64,
    jumps: u32,
    timestamp: i64,
    user_id: &str,
) -> String {
    let data = format!("{}-{}-{}-{}-{}", level_index, time, jumps, timestamp, user_id);
    let hash = rolling_hash(&data) as i64;
    format!("{:x}", hash.abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_hasher_determinism() {
        let make_hash = || {
            let mut hasher = StateHasher::for_simulation();
            hasher.update_u32(100);
            hasher.update_f64(330.5);
            hasher.update_f64(-10.0);
            hasher.update_bool(true);
            hasher.finalize()
        };

        assert_eq!(make_hash(), make_hash());
    }

    #[test]
    fn test_hash_order_matters() {
        let hash1 = {
            let mut h = StateHasher::new(b"test");
            h.update_f64(1.0);
            h.update_f64(2.0);
            h.finalize()
        };

        let hash2 = {
            let mut h = StateHasher::new(b"test");
            h.update_f64(2.0);
            h.update_f64(1.0);
            h.finalize()
        };

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_domain_separation() {
        let a = StateHasher::for_simulation().finalize();
        let b = StateHasher::for_trajectory().finalize();
        assert_ne!(a, b);
    }

    #[test]
    fn test_rolling_hash_known_values() {
        assert_eq!(rolling_hash(""), 0);
        assert_eq!(rolling_hash("a"), 97);
        assert_eq!(rolling_hash("ab"), 97 * 31 + 98);
        // Long inputs wrap at 32 bits
        assert_eq!(rolling_hash("hello world, this is long"), 2047144808);
    }

    #[test]
    fn test_security_hash_format() {
        assert_eq!(security_hash(0, 12.34, 5, 1700000000000, "user-1"), "1960cbfa");
        // Integral times render without a fractional part
        assert_eq!(
            security_hash(2, 5.0, 0, 1, "u"),
            format!("{:x}", (rolling_hash("2-5-0-1-u") as i64).abs())
        );
    }
}

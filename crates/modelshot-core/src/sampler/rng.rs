//! Seeded Park-Miller generator.
//!
//! `x = x * 48271 mod (2^31 - 1)`. Small, fast and fully reproducible across
//! platforms, which is all preview sampling needs.

use rand::RngCore;

const MODULUS: i64 = 2_147_483_647;
const MULTIPLIER: i64 = 48_271;

/// Deterministic generator seeded from an integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRng {
    state: i64,
}

impl SeededRng {
    /// Create a generator. Any seed is accepted and normalized into
    /// `[1, 2^31 - 2]`.
    pub fn new(seed: i64) -> Self {
        let mut state = seed % MODULUS;
        if state <= 0 {
            state += MODULUS - 1;
        }
        // Zero is a fixed point of the recurrence
        if state == 0 {
            state = MODULUS - 1;
        }
        Self { state }
    }

    /// Advance and return the raw state in `[1, 2^31 - 2]`.
    #[inline]
    fn step(&mut self) -> u32 {
        self.state = self.state * MULTIPLIER % MODULUS;
        self.state as u32
    }

    /// Next value in the open interval (0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.step() as f64 / MODULUS as f64
    }

    /// Uniform index in `0..len`. Returns 0 when `len` is 0.
    pub fn index(&mut self, len: usize) -> usize {
        let i = (self.next_f64() * len as f64).floor() as usize;
        i.min(len.saturating_sub(1))
    }
}

impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        // 16 high bits from each of two draws
        let hi = self.step() >> 15;
        let lo = self.step() >> 15;
        (hi << 16) | lo
    }

    fn next_u64(&mut self) -> u64 {
        let hi = self.next_u32() as u64;
        let lo = self.next_u32() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_sequence() {
        let mut rng = SeededRng::new(1);
        assert_eq!(rng.step(), 48_271);
        assert_eq!(rng.step(), 182_605_794);
    }

    #[test]
    fn test_seed_normalization() {
        assert_eq!(SeededRng::new(0), SeededRng::new(MODULUS - 1));
        assert_eq!(SeededRng::new(MODULUS), SeededRng::new(MODULUS - 1));
        assert_eq!(SeededRng::new(-1), SeededRng::new(MODULUS - 2));
        assert_eq!(SeededRng::new(MODULUS + 5), SeededRng::new(5));
        assert_eq!(SeededRng::new(-(MODULUS - 1)), SeededRng::new(MODULUS - 1));
    }

    #[test]
    fn test_seed_congruent_to_zero_state_still_advances() {
        let mut rng = SeededRng::new(-(MODULUS - 1));
        let draws: Vec<f64> = (0..3).map(|_| rng.next_f64()).collect();
        assert!(draws.iter().all(|&u| u > 0.0 && u < 1.0), "{draws:?}");
        assert_ne!(draws[0], draws[1]);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SeededRng::new(42);
        let mut b = SeededRng::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
        }
    }

    #[test]
    fn test_unit_interval_and_index() {
        let mut rng = SeededRng::new(7);
        for _ in 0..1000 {
            let u = rng.next_f64();
            assert!(u > 0.0 && u < 1.0);
            assert!(rng.index(5) < 5);
        }
        assert_eq!(rng.index(0), 0);
    }

    #[test]
    fn test_fill_bytes_partial_chunk() {
        let mut rng = SeededRng::new(3);
        let mut buf = [0u8; 7];
        rng.fill_bytes(&mut buf);
        assert!(buf.iter().any(|&b| b != 0));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

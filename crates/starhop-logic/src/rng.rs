//! Deterministic pseudo-random streams and integer hashing.
//!
//! Every procedural draw in the crate goes through [`Mulberry32`], a 32-bit
//! generator whose whole state is one `u32`. Child seeds are derived with
//! [`hash_int`] so that individual stars, planets and events can be
//! regenerated without replaying a shared stream.
//!
//! All arithmetic is wrapping `u32`, so results are identical on every
//! platform and across processes.

use rand::{Error, RngCore, SeedableRng};

const GOLDEN_GAMMA: u32 = 0x6D2B_79F5;
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Seeded 32-bit generator (mulberry32 recurrence).
///
/// Each call to [`next_f64`](Self::next_f64) returns a float in `[0, 1)`.
/// Two generators built from the same seed produce identical sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next raw 32-bit output.
    #[inline]
    pub fn next_word(&mut self) -> u32 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        let s = self.state;
        let mut t = (s ^ (s >> 15)).wrapping_mul(1 | s);
        t = t.wrapping_add((t ^ (t >> 7)).wrapping_mul(61 | t)) ^ t;
        t ^ (t >> 14)
    }

    /// Next float in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        self.next_word() as f64 / TWO_POW_32
    }

    /// Uniform float in `[lo, hi)` (one draw).
    pub fn range_f64(&mut self, lo: f64, hi: f64) -> f64 {
        lerp(lo, hi, self.next_f64())
    }

    /// Uniform integer in `[lo, hi]` inclusive (one draw).
    pub fn range_int(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        let span = (hi - lo + 1) as f64;
        lo + (self.next_f64() * span).floor() as u32
    }

    /// True with probability `p` (one draw).
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform index into a collection of `len` items (one draw).
    /// Returns 0 for an empty collection without drawing.
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        ((self.next_f64() * len as f64).floor() as usize).min(len - 1)
    }

    /// Pick one element of a non-empty slice (one draw).
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let i = self.index(items.len());
        items.get(i)
    }
}

impl RngCore for Mulberry32 {
    fn next_u32(&mut self) -> u32 {
        self.next_word()
    }

    fn next_u64(&mut self) -> u64 {
        let hi = self.next_word() as u64;
        let lo = self.next_word() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_word().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Mulberry32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }

    /// Truncates to the low 32 bits so `seed_from_u64(s)` matches `new(s as u32)`.
    fn seed_from_u64(state: u64) -> Self {
        Self::new(state as u32)
    }
}

/// Combine two integers into a well-mixed 32-bit hash.
///
/// Used to derive child seeds, e.g. `hash_int(galaxy_seed, star_index)` or
/// `hash_int(planet_seed, salt)`. Not symmetric in its arguments.
pub fn hash_int(a: u32, b: u32) -> u32 {
    let mut h = a.wrapping_mul(2_654_435_761) ^ b.wrapping_mul(340_573_321);
    h = (h ^ (h >> 16)).wrapping_mul(0x045D_9F3B);
    h ^ (h >> 16)
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[inline]
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    lo.max(hi.min(v))
}

/// Round to the nearest integer with halves going toward positive infinity,
/// so `-2.5` becomes `-2` and `2.5` becomes `3`.
#[inline]
pub fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// Cubic ease-in/ease-out on `[0, 1]`. Monotone and symmetric about 0.5.
pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Wrap an angle into `(-PI, PI]`.
pub fn wrap_angle(a: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    let mut w = a.rem_euclid(TAU);
    if w > PI {
        w -= TAU;
    }
    w
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Mulberry32::new(42);
        let mut b = Mulberry32::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }

    #[test]
    fn test_golden_words() {
        let mut r = Mulberry32::new(0);
        assert_eq!(r.next_word(), 1_144_304_738);
        assert_eq!(r.next_word(), 1_416_247);
        assert_eq!(r.next_word(), 958_946_056);

        let mut r = Mulberry32::new(1);
        assert_eq!(r.next_word(), 2_693_262_067);
        assert_eq!(r.next_word(), 11_749_833);

        let mut r = Mulberry32::new(42);
        assert_eq!(r.next_word(), 2_581_720_956);
        assert_eq!(r.next_word(), 1_925_393_290);
        assert_eq!(r.next_word(), 3_661_312_704);
    }

    #[test]
    fn test_first_float_seed_zero() {
        let mut r = Mulberry32::new(0);
        assert_eq!(r.next_f64(), 1_144_304_738.0 / TWO_POW_32);
    }

    #[test]
    fn test_values_in_unit_interval() {
        let mut r = Mulberry32::new(12345);
        for _ in 0..1000 {
            let v = r.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_distribution_buckets() {
        let mut r = Mulberry32::new(999);
        let mut buckets = [0u32; 10];
        for _ in 0..10_000 {
            buckets[(r.next_f64() * 10.0) as usize] += 1;
        }
        for count in buckets {
            assert!(count > 700 && count < 1300, "bucket {}", count);
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let a: Vec<u32> = {
            let mut r = Mulberry32::new(1);
            (0..10).map(|_| r.next_word()).collect()
        };
        let b: Vec<u32> = {
            let mut r = Mulberry32::new(2);
            (0..10).map(|_| r.next_word()).collect()
        };
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_golden() {
        assert_eq!(hash_int(0, 0), 0);
        assert_eq!(hash_int(10, 20), 3_848_254_865);
        assert_eq!(hash_int(42, 0), 301_225_621);
        assert_eq!(hash_int(42, 1), 2_341_978_821);
    }

    #[test]
    fn test_hash_not_symmetric() {
        assert_eq!(hash_int(1, 2), 4_094_686_192);
        assert_eq!(hash_int(2, 1), 1_986_573_371);
        assert_ne!(hash_int(1, 2), hash_int(2, 1));
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
        assert_eq!(round_half_up(3.75), 4.0);
    }

    #[test]
    fn test_range_int_inclusive() {
        let mut r = Mulberry32::new(7);
        let mut seen = [false; 4];
        for _ in 0..500 {
            let v = r.range_int(2, 5);
            assert!((2..=5).contains(&v));
            seen[(v - 2) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
        assert_eq!(r.range_int(3, 3), 3);
    }

    #[test]
    fn test_rngcore_matches_words() {
        let mut a = Mulberry32::new(5);
        let mut b = Mulberry32::new(5);
        assert_eq!(a.next_u32(), b.next_word());
        let x: f64 = a.gen();
        assert!((0.0..1.0).contains(&x));
        assert_eq!(Mulberry32::seed_from_u64(99), Mulberry32::new(99));
    }

    #[test]
    fn test_lerp_and_clamp() {
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(2.0, 4.0, 0.0), 2.0);
        assert_eq!(clamp(5.0, 0.0, 3.0), 3.0);
        assert_eq!(clamp(-1.0, 0.0, 3.0), 0.0);
        assert_eq!(clamp(1.5, 0.0, 3.0), 1.5);
    }

    #[test]
    fn test_ease_in_out_cubic() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-12);
        assert!((ease_in_out_cubic(1.0) - 1.0).abs() < 1e-12);
        let mut prev = 0.0;
        for i in 1..=100 {
            let t = i as f64 / 100.0;
            let v = ease_in_out_cubic(t);
            assert!(v >= prev);
            assert!((v + ease_in_out_cubic(1.0 - t) - 1.0).abs() < 1e-9);
            prev = v;
        }
    }

    #[test]
    fn test_wrap_angle() {
        use std::f64::consts::PI;
        assert!((wrap_angle(3.0 * PI).abs() - PI).abs() < 1e-9);
        assert!((wrap_angle(-0.5) + 0.5).abs() < 1e-12);
        assert!(wrap_angle(10.0).abs() <= PI);
    }
}

use hexf::*;
use super::common::Float;

#[cfg(feature = "float_as_double")]
pub const ONE_MINUS_EPSILON: f64 = hexf64!("0x1.fffffffffffffp-1");
#[cfg(not(feature = "float_as_double"))]
pub const ONE_MINUS_EPSILON: f32 = hexf32!("0x1.fffffep-1");

pub const PCG32_DEFAULT_STATE: u64 = 0x853c49e6748fea9b;
pub const PCG32_DEFAULT_STREAM: u64 = 0xda3e39cb94b95bdb;
pub const PCG32_MULT: u64 = 0x5851f42d4c957f2d;

/// PCG pseudo-random number generator.
/// Cities are generated from an explicit seed so the same options always
/// produce the same layout and routes.
#[derive(Debug, Copy, Clone)]
pub struct Rng {
    state: u64,
    inc: u64
}

impl Rng {
    pub fn new(seed: u64) -> Rng {
        let mut rng = Rng {
            state: PCG32_DEFAULT_STATE,
            inc: PCG32_DEFAULT_STREAM
        };
        rng.set_sequence(seed);
        rng
    }

    pub fn set_sequence(&mut self, initseq: u64) {
        self.state = 0;
        self.inc = initseq.wrapping_shl(1) | 1;
        self.uniform_uint32();
        self.state = self.state.wrapping_add(PCG32_DEFAULT_STATE);
        self.uniform_uint32();
    }

    pub fn uniform_uint32(&mut self) -> u32 {
        let oldstate: u64 = self.state;
        self.state = oldstate.wrapping_mul(PCG32_MULT).wrapping_add(self.inc);
        let xorshifted: u32 = (oldstate.wrapping_shr(18) ^ oldstate).wrapping_shr(27) as u32;
        let rot: u32 = oldstate.wrapping_shr(59) as u32;
        xorshifted.wrapping_shr(rot) | xorshifted.wrapping_shl(!rot.wrapping_add(1_u32) & 31)
    }

    /// Uniform integer in `[0, b)`.
    pub fn uniform_uint32_bounded(&mut self, b: u32) -> u32 {
        if b == 0 {
            return 0;
        }
        let threshold = b.wrapping_neg() % b;
        loop {
            let r = self.uniform_uint32();
            if r >= threshold {
                return r % b;
            }
        }
    }

    /// Uniform float in `[0, 1)`.
    pub fn uniform_float(&mut self) -> Float {
        (self.uniform_uint32() as Float * hexf32!("0x1.0p-32") as Float)
            .min(ONE_MINUS_EPSILON)
    }

    /// Uniform float in `[lo, hi)`. Swapped bounds are accepted.
    pub fn uniform_range(&mut self, lo: Float, hi: Float) -> Float {
        lo + (hi - lo) * self.uniform_float()
    }

    /// Uniform integer in the inclusive range `[lo, hi]`.
    pub fn uniform_int_inclusive(&mut self, lo: i64, hi: i64) -> i64 {
        if hi <= lo {
            return lo;
        }
        let span = (hi - lo + 1) as u64;
        if span > u32::max_value() as u64 {
            return lo + (self.uniform_uint32() as u64 % span) as i64;
        }
        lo + self.uniform_uint32_bounded(span as u32) as i64
    }

    /// Fair coin flip.
    pub fn coin(&mut self) -> bool {
        self.uniform_uint32() & 1 == 1
    }
}

impl Default for Rng {
    fn default() -> Rng {
        Rng {
            state: PCG32_DEFAULT_STATE,
            inc: PCG32_DEFAULT_STREAM
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Rng::new(7);
        let mut b = Rng::new(7);
        for _ in 0..32 {
            assert_eq!(a.uniform_uint32(), b.uniform_uint32());
        }
    }

    #[test]
    fn ranges_are_respected() {
        let mut rng = Rng::new(42);
        for _ in 0..1000 {
            let f = rng.uniform_float();
            assert!(f >= 0.0 && f < 1.0);
            let r = rng.uniform_range(2.0, 5.0);
            assert!(r >= 2.0 && r <= 5.0);
            let i = rng.uniform_int_inclusive(-3, 4);
            assert!(i >= -3 && i <= 4);
        }
        assert_eq!(rng.uniform_int_inclusive(5, 5), 5);
        assert_eq!(rng.uniform_uint32_bounded(0), 0);
    }
}

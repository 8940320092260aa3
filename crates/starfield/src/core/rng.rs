//! Seedable pseudo-random number generator (xorshift64).
//! Every random draw in the scene goes through one of these so a run can
//! be replayed from its seed.

/// Seedable pseudo-random number generator (xorshift64).
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform value in [0, 1).
    pub fn next_f32(&mut self) -> f32 {
        // Top 24 bits fill an f32 mantissa exactly.
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform value in [min, min + span).
    pub fn range(&mut self, min: f32, span: f32) -> f32 {
        min + self.next_f32() * span
    }

    /// Uniform value in [-width / 2, width / 2).
    pub fn jitter(&mut self, width: f32) -> f32 {
        (self.next_f32() - 0.5) * width
    }
}

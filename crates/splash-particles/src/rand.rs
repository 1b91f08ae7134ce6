//! Lightweight xorshift32 PRNG for spawn sampling

use std::f32::consts::TAU;

#[derive(Debug, Clone)]
pub struct ParticleRng {
    state: u32,
}

impl ParticleRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Returns a float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        // Top 24 bits fit the f32 mantissa exactly, so 1.0 is never produced
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Returns a float in [min, max)
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Samples spherical angles `(theta, phi)` for a uniform point on the unit sphere.
    ///
    /// `theta` is the azimuth in [0, 2π), `phi` the polar angle `acos(2u - 1)`.
    pub fn sphere_angles(&mut self) -> (f32, f32) {
        let theta = self.next_f32() * TAU;
        let phi = (2.0 * self.next_f32() - 1.0).acos();
        (theta, phi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_unit_interval_is_half_open() {
        let mut rng = ParticleRng::new(42);
        for _ in 0..10_000 {
            let v = rng.next_f32();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn rng_range_bounds() {
        let mut rng = ParticleRng::new(42);
        for _ in 0..1000 {
            let v = rng.range(0.0, 10.0);
            assert!(v >= 0.0 && v < 10.0);
        }
    }

    #[test]
    fn rng_zero_seed_still_advances() {
        let mut rng = ParticleRng::new(0);
        let a = rng.next_f32();
        let b = rng.next_f32();
        assert_ne!(a, b);
    }

    #[test]
    fn sphere_angles_in_range() {
        let mut rng = ParticleRng::new(123);
        for _ in 0..1000 {
            let (theta, phi) = rng.sphere_angles();
            assert!((0.0..TAU).contains(&theta));
            assert!((0.0..=std::f32::consts::PI).contains(&phi));
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = ParticleRng::new(7);
        let mut b = ParticleRng::new(7);
        for _ in 0..100 {
            assert_eq!(a.next_f32(), b.next_f32());
        }
    }
}

//! Random number generation for ray tracing.
//!
//! Each thread owns an independent ChaCha20 PRNG, so the render workers can
//! sample concurrently without locking or contention. Includes the sampling
//! helpers used by pixel jittering and material scattering.

use rand::{rng, Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::cell::RefCell;

use glam::Vec3A;

thread_local! {
    /// Thread-local ChaCha20 PRNG seeded from the OS entropy source.
    static RNG: RefCell<ChaCha20Rng> = RefCell::new(ChaCha20Rng::from_rng(&mut rng()));
}

/// Generate a random f32 in [0.0, 1.0)
pub fn random_f32() -> f32 {
    RNG.with(|rng| rng.borrow_mut().random())
}

/// Generate a random f32 in [min, max)
pub fn random_f32_range(min: f32, max: f32) -> f32 {
    min + (max - min) * random_f32()
}

/// Generate a random unit vector uniformly distributed on the unit sphere.
pub fn random_unit_vector() -> Vec3A {
    RNG.with(|rng| {
        let mut rng_mut = rng.borrow_mut();

        // Uniform azimuth in [0, 2π)
        let theta = 2.0 * std::f32::consts::PI * rng_mut.random::<f32>();

        // Uniform cos(φ) in [-1, 1] gives a uniform sphere distribution
        let cos_phi = 2.0 * rng_mut.random::<f32>() - 1.0;
        let sin_phi = (1.0 - cos_phi * cos_phi).sqrt();

        Vec3A::new(sin_phi * theta.cos(), sin_phi * theta.sin(), cos_phi)
    })
}

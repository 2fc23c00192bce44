//! Random normalized state vectors for simulation and testing.
//!
//! The generator never touches a global RNG; callers pass their own, so a
//! seeded [`rand::rngs::StdRng`] reproduces the same states.

use nalgebra::DVector;
use num_complex::Complex64 as C64;
use rand::Rng;

/// Width of generated states (a 2 × 3 composite system).
pub const STATE_WIDTH: usize = 6;

/// One state of the given width with real and imaginary parts uniform in
/// `[0, 1)`, scaled to unit Euclidean norm.
pub fn random_state<R: Rng + ?Sized>(rng: &mut R, width: usize) -> DVector<C64> {
    let v = DVector::from_fn(width, |_, _| {
        C64::new(rng.random::<f64>(), rng.random::<f64>())
    });
    let norm = v.iter().map(|z| z.norm_sqr()).sum::<f64>().sqrt();
    if norm == 0.0 {
        return v;
    }
    v.map(|z| z / norm)
}

/// `n` independent states of width [`STATE_WIDTH`].
pub fn random_states<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<DVector<C64>> {
    (0..n).map(|_| random_state(rng, STATE_WIDTH)).collect()
}

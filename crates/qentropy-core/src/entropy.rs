//! Scalar entropy functions.
//!
//! [`von_neumann_from_k`] is the link between the measured statistic `k` and
//! the entanglement entropy of the two-qubit state. For Bell-diagonal states
//! the reduced density matrix has eigenvalues `λ₁ = (1 + √(1 − 4k)) / 2` and
//! `λ₂ = 1 − λ₁`, so its entropy is the binary entropy of `λ₁`.

/// Upper edge of the domain where the closed form is real.
pub const K_SATURATION: f64 = 0.25;

/// Shannon binary entropy in bits.
///
/// Returns 0 at `p == 0` and `p == 1`. Input outside `[0, 1]` yields NaN.
pub fn binary_entropy(p: f64) -> f64 {
    if p == 0.0 || p == 1.0 {
        return 0.0;
    }
    -p * p.log2() - (1.0 - p) * (1.0 - p).log2()
}

/// Map the statistic `k` to a von Neumann entropy in `[0, 1]`.
///
/// - `k > 0.25` saturates to 1 (the square root would be imaginary).
/// - `k < 0` clamps to 0 (separable regime).
///
/// Both clamps are expected boundary cases, not errors.
pub fn von_neumann_from_k(k: f64) -> f64 {
    if k > K_SATURATION {
        log::trace!("k = {k} above {K_SATURATION}, entropy saturated");
        return 1.0;
    }
    if k < 0.0 {
        log::trace!("k = {k} below 0, entropy clamped");
        return 0.0;
    }
    let t = (1.0 - 4.0 * k).sqrt();
    let l1 = 0.5 * (1.0 + t);
    binary_entropy(l1)
}

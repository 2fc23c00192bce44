//! Density-matrix operations for a two-subsystem bipartition.
//!
//! Composite basis index is `a * dim_b + b`: subsystem B is the fast index.
//! These routines provide the exact entanglement entropy that the streaming
//! estimate is compared against.

use nalgebra::{DMatrix, DVector};
use num_complex::Complex64 as C64;

use crate::error::{EntropyError, Result};

/// Eigenvalues at or below this are treated as zero.
pub const EIGEN_TOLERANCE: f64 = 1e-12;

/// A pure state or a density matrix over the composite system.
#[derive(Debug, Clone, Copy)]
pub enum StateInput<'a> {
    Vector(&'a DVector<C64>),
    Density(&'a DMatrix<C64>),
}

/// `|ψ⟩⟨ψ|`.
pub fn density_matrix(state: &DVector<C64>) -> DMatrix<C64> {
    state * state.adjoint()
}

fn check_dims(dim_a: usize, dim_b: usize, actual: usize) -> Result<usize> {
    // An overflowing product can never match a real vector length.
    let expected = dim_a.checked_mul(dim_b).unwrap_or(usize::MAX);
    if dim_a == 0 || dim_b == 0 || actual != expected {
        return Err(EntropyError::DimensionMismatch {
            context: "partial trace",
            expected,
            actual,
        });
    }
    Ok(expected)
}

fn normalize_trace(m: DMatrix<C64>) -> Result<DMatrix<C64>> {
    let tr = m.trace();
    if tr == C64::new(0.0, 0.0) || !tr.is_finite() {
        return Err(EntropyError::DegenerateState);
    }
    let normalized = m / tr;
    if normalized.iter().any(|z| !z.is_finite()) {
        return Err(EntropyError::DegenerateState);
    }
    Ok(normalized)
}

/// Reduced density matrices `(ρ_A, ρ_B)`, each normalized to unit trace.
pub fn partial_traces(
    input: StateInput<'_>,
    dim_a: usize,
    dim_b: usize,
) -> Result<(DMatrix<C64>, DMatrix<C64>)> {
    let rho = match input {
        StateInput::Vector(v) => {
            check_dims(dim_a, dim_b, v.len())?;
            density_matrix(v)
        }
        StateInput::Density(m) => {
            if m.nrows() != m.ncols() {
                return Err(EntropyError::DimensionMismatch {
                    context: "density matrix (square)",
                    expected: m.nrows(),
                    actual: m.ncols(),
                });
            }
            check_dims(dim_a, dim_b, m.nrows())?;
            m.clone()
        }
    };

    let rho_a = DMatrix::from_fn(dim_a, dim_a, |i, j| {
        (0..dim_b)
            .map(|b| rho[(i * dim_b + b, j * dim_b + b)])
            .sum::<C64>()
    });
    let rho_b = DMatrix::from_fn(dim_b, dim_b, |i, j| {
        (0..dim_a)
            .map(|a| rho[(a * dim_b + i, a * dim_b + j)])
            .sum::<C64>()
    });

    Ok((normalize_trace(rho_a)?, normalize_trace(rho_b)?))
}

/// Flattened outer product of a vector with itself: `out[n*i + j] = sᵢ·sⱼ`.
pub fn tensor_product(state: &DVector<C64>) -> DVector<C64> {
    let n = state.len();
    DVector::from_fn(n * n, |idx, _| state[idx / n] * state[idx % n])
}

/// Kronecker product `ρ_A ⊗ ρ_B`.
pub fn tensor(rho_a: &DMatrix<C64>, rho_b: &DMatrix<C64>) -> Result<DMatrix<C64>> {
    for m in [rho_a, rho_b] {
        if !m.is_square() {
            return Err(EntropyError::DimensionMismatch {
                context: "tensor (square operand)",
                expected: m.nrows(),
                actual: m.ncols(),
            });
        }
    }
    Ok(rho_a.kronecker(rho_b))
}

/// `Σ λ log₂(1/λ)` over the non-zero eigenvalues, rounded to 3 decimals.
pub fn von_neumann_entropy(eigenvalues: &[f64]) -> f64 {
    let mut s = 0.0;
    for &lambda in eigenvalues {
        if lambda <= EIGEN_TOLERANCE {
            if lambda < -EIGEN_TOLERANCE {
                log::warn!("skipping negative eigenvalue {lambda}; input is not a valid spectrum");
            }
            continue;
        }
        s += lambda * (1.0 / lambda).log2();
    }
    (s * 1000.0).round() / 1000.0
}

/// Hermitian eigenvalues of a density matrix.
pub fn eigenvalues(rho: &DMatrix<C64>) -> Vec<f64> {
    rho.clone()
        .symmetric_eigenvalues()
        .iter()
        .copied()
        .collect()
}

/// Entanglement entropy of a pure state: entropy of `ρ_A`.
pub fn von_neumann_entropy_from_state(
    state: &DVector<C64>,
    dim_a: usize,
    dim_b: usize,
) -> Result<f64> {
    let (rho_a, _) = partial_traces(StateInput::Vector(state), dim_a, dim_b)?;
    Ok(von_neumann_entropy(&eigenvalues(&rho_a)))
}

/// Entropies of both reduced matrices. Equal for pure states.
pub fn reduced_entropies(input: StateInput<'_>, dim_a: usize, dim_b: usize) -> Result<(f64, f64)> {
    let (rho_a, rho_b) = partial_traces(input, dim_a, dim_b)?;
    Ok((
        von_neumann_entropy(&eigenvalues(&rho_a)),
        von_neumann_entropy(&eigenvalues(&rho_b)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64) -> C64 {
        C64::new(re, 0.0)
    }

    fn bell() -> DVector<C64> {
        let h = std::f64::consts::FRAC_1_SQRT_2;
        DVector::from_vec(vec![c(h), c(0.0), c(0.0), c(h)])
    }

    fn close(a: &DMatrix<C64>, b: &DMatrix<C64>) -> bool {
        a.shape() == b.shape() && a.iter().zip(b.iter()).all(|(x, y)| (x - y).norm() < 1e-10)
    }

    #[test]
    fn product_state_has_zero_entropy() {
        let a = DVector::from_vec(vec![c(0.6), C64::new(0.0, 0.8)]);
        let b = DVector::from_vec(vec![c(1.0), c(0.0)]);
        let psi = DVector::from_fn(4, |idx, _| a[idx / 2] * b[idx % 2]);
        assert_eq!(von_neumann_entropy_from_state(&psi, 2, 2).unwrap(), 0.0);
    }

    #[test]
    fn bell_state_has_unit_entropy() {
        assert_eq!(von_neumann_entropy_from_state(&bell(), 2, 2).unwrap(), 1.0);
        let (sa, sb) = reduced_entropies(StateInput::Vector(&bell()), 2, 2).unwrap();
        assert_eq!((sa, sb), (1.0, 1.0));
    }

    #[test]
    fn bell_reduced_matrix_is_maximally_mixed() {
        let (rho_a, rho_b) = partial_traces(StateInput::Vector(&bell()), 2, 2).unwrap();
        let half = DMatrix::<C64>::identity(2, 2) * c(0.5);
        assert!(close(&rho_a, &half));
        assert!(close(&rho_b, &half));
    }

    #[test]
    fn partial_trace_uses_b_as_fast_index() {
        // |ψ⟩ = |1⟩_A ⊗ |2⟩_B with dim_a = 2, dim_b = 3 -> index 1*3 + 2 = 5.
        let mut psi = DVector::from_element(6, c(0.0));
        psi[5] = c(1.0);
        let (rho_a, rho_b) = partial_traces(StateInput::Vector(&psi), 2, 3).unwrap();
        assert!((rho_a[(1, 1)] - c(1.0)).norm() < 1e-12);
        assert!((rho_b[(2, 2)] - c(1.0)).norm() < 1e-12);
        assert_eq!(rho_a.shape(), (2, 2));
        assert_eq!(rho_b.shape(), (3, 3));
    }

    #[test]
    fn density_input_matches_vector_input() {
        let rho = density_matrix(&bell());
        let from_vec = partial_traces(StateInput::Vector(&bell()), 2, 2).unwrap();
        let from_rho = partial_traces(StateInput::Density(&rho), 2, 2).unwrap();
        assert!(close(&from_vec.0, &from_rho.0));
        assert!(close(&from_vec.1, &from_rho.1));
    }

    #[test]
    fn reduced_matrices_are_normalized_and_hermitian() {
        // Unnormalized input: traces still come out as 1.
        let psi = DVector::from_vec(vec![
            c(1.0),
            C64::new(2.0, 1.0),
            c(0.0),
            c(3.0),
            c(1.0),
            C64::new(0.0, -1.0),
        ]);
        let (rho_a, rho_b) = partial_traces(StateInput::Vector(&psi), 2, 3).unwrap();
        for rho in [&rho_a, &rho_b] {
            assert!((rho.trace() - c(1.0)).norm() < 1e-12);
            assert!(close(rho, &rho.adjoint()));
            assert!(eigenvalues(rho).iter().all(|&l| l > -1e-12));
        }
    }

    #[test]
    fn dimension_mismatch_is_reported() {
        let err = partial_traces(StateInput::Vector(&bell()), 2, 3).unwrap_err();
        assert_eq!(
            err,
            EntropyError::DimensionMismatch {
                context: "partial trace",
                expected: 6,
                actual: 4
            }
        );
        let rect = DMatrix::<C64>::zeros(4, 3);
        assert!(matches!(
            partial_traces(StateInput::Density(&rect), 2, 2),
            Err(EntropyError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn zero_state_is_degenerate() {
        let zero = DVector::from_element(4, c(0.0));
        assert_eq!(
            partial_traces(StateInput::Vector(&zero), 2, 2).unwrap_err(),
            EntropyError::DegenerateState
        );
    }

    #[test]
    fn overflowing_dimensions_are_a_mismatch() {
        let err = partial_traces(StateInput::Vector(&bell()), usize::MAX, 2).unwrap_err();
        assert_eq!(
            err,
            EntropyError::DimensionMismatch {
                context: "partial trace",
                expected: usize::MAX,
                actual: 4
            }
        );
    }

    #[test]
    fn tiny_scale_state_is_normalized() {
        // Trace is 1e-14 before normalization.
        let psi = bell() * c(1e-7);
        assert_eq!(von_neumann_entropy_from_state(&psi, 2, 2).unwrap(), 1.0);
        let (rho_a, _) = partial_traces(StateInput::Vector(&psi), 2, 2).unwrap();
        assert!((rho_a.trace() - c(1.0)).norm() < 1e-12);
    }

    #[test]
    fn non_finite_state_is_degenerate() {
        let mut psi = bell();
        psi[0] = c(f64::NAN);
        assert_eq!(
            partial_traces(StateInput::Vector(&psi), 2, 2).unwrap_err(),
            EntropyError::DegenerateState
        );
    }

    #[test]
    fn tensor_of_identities_is_identity() {
        let i2 = DMatrix::<C64>::identity(2, 2);
        assert_eq!(tensor(&i2, &i2).unwrap(), DMatrix::<C64>::identity(4, 4));
    }

    #[test]
    fn tensor_blocks_are_scaled_copies() {
        let a = DMatrix::from_row_slice(2, 2, &[c(1.0), c(2.0), c(3.0), c(4.0)]);
        let b = DMatrix::from_row_slice(2, 2, &[c(0.0), c(1.0), c(1.0), c(0.0)]);
        let k = tensor(&a, &b).unwrap();
        assert_eq!(k.shape(), (4, 4));
        assert_eq!(k[(0, 1)], c(1.0));
        assert_eq!(k[(0, 3)], c(2.0));
        assert_eq!(k[(2, 1)], c(3.0));
        assert_eq!(k[(3, 2)], c(4.0));
        assert_eq!(k[(3, 3)], c(0.0));
    }

    #[test]
    fn tensor_rejects_non_square() {
        let a = DMatrix::<C64>::zeros(2, 3);
        let b = DMatrix::<C64>::identity(2, 2);
        assert!(tensor(&a, &b).is_err());
    }

    #[test]
    fn tensor_product_scales_by_each_component() {
        let s = DVector::from_vec(vec![c(1.0), c(2.0), C64::new(0.0, 1.0)]);
        let t = tensor_product(&s);
        assert_eq!(t.len(), 9);
        assert_eq!(t[0], c(1.0));
        assert_eq!(t[4], c(4.0));
        assert_eq!(t[5], C64::new(0.0, 2.0));
        assert_eq!(t[8], c(-1.0));
        // block i equals s[i] * s
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(t[3 * i + j], s[i] * s[j]);
            }
        }
    }

    #[test]
    fn entropy_of_pure_and_mixed_spectra() {
        assert_eq!(von_neumann_entropy(&[1.0, 0.0, 0.0, 0.0]), 0.0);
        assert_eq!(von_neumann_entropy(&[0.5, 0.5]), 1.0);
        assert_eq!(von_neumann_entropy(&[0.25; 4]), 2.0);
    }

    #[test]
    fn entropy_is_rounded_to_three_decimals() {
        // H(0.1, 0.9) = 0.468995...
        assert_eq!(von_neumann_entropy(&[0.1, 0.9]), 0.469);
    }

    #[test]
    fn roundoff_eigenvalues_are_skipped() {
        assert_eq!(von_neumann_entropy(&[1.0, -1e-17, 1e-16]), 0.0);
    }

    #[test]
    fn separable_mixed_state_via_tensor() {
        // ρ = (I/2) ⊗ |0⟩⟨0|: A is maximally mixed, B is pure.
        let mixed = DMatrix::<C64>::identity(2, 2) * c(0.5);
        let pure = DMatrix::from_row_slice(2, 2, &[c(1.0), c(0.0), c(0.0), c(0.0)]);
        let rho = tensor(&mixed, &pure).unwrap();
        let (sa, sb) = reduced_entropies(StateInput::Density(&rho), 2, 2).unwrap();
        assert_eq!(sa, 1.0);
        assert_eq!(sb, 0.0);
    }
}

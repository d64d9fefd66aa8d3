use emx_core::{Real, Triple};
use num_complex::Complex64;

use crate::{
    CardanoTerms, CubicCoefficients, CubicSolution, CubicSolver, RootStatus,
    DEFAULT_DISCRIMINANT_TOL,
};

/// Algebraic form of Cardano's formula evaluated in complex arithmetic.
///
/// With `C = (−R + sqrt(Q³ + R²))^(1/3)` and `ξ = −1/2 + i·√3/2`, the
/// candidate roots are `z1 = Q/C − C`, `z2 = Q/(ξC) − ξC` and
/// `z3 = Q/(ξ²C) − ξ²C`. The output is `(Re z2, Re z1, Re z3) − b/(3a)`,
/// which lines up element by element with [`crate::TrigonometricSolver`].
///
/// When `Q³ + R² >= 0` the sign of its square root is chosen to match the
/// sign of `−R`, so `C` only vanishes for a true triple root and the element
/// order stays continuous across the `Q³ + R² = 0` boundary.
///
/// The complex path runs unconditionally; the discriminant tolerance only
/// decides whether the result is flagged [`RootStatus::ComplexPair`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlgebraicSolver {
    /// Relative tolerance on `Q³ + R²`, see [`crate::CardanoTerms::has_complex_pair`].
    pub discriminant_tol: Real,
}

impl Default for AlgebraicSolver {
    fn default() -> Self {
        Self {
            discriminant_tol: DEFAULT_DISCRIMINANT_TOL,
        }
    }
}

impl CubicSolver for AlgebraicSolver {
    fn name(&self) -> &'static str {
        "algebraic"
    }

    fn solve(&self, coeffs: &CubicCoefficients) -> CubicSolution {
        let terms = coeffs.cardano_terms();
        let complex = terms.has_complex_pair(self.discriminant_tol);
        match cardano_roots(&terms) {
            Some(roots) => CubicSolution {
                roots,
                status: if complex {
                    RootStatus::ComplexPair
                } else {
                    RootStatus::ThreeReal
                },
            },
            None => CubicSolution::triple(terms.shift),
        }
    }
}

/// Real parts of the three (possibly complex) roots.
pub(crate) fn real_parts(terms: &CardanoTerms) -> Triple {
    cardano_roots(terms).unwrap_or((terms.shift, terms.shift, terms.shift))
}

/// Returns `None` when `C` vanishes, which only happens for `Q = R = 0`.
fn cardano_roots(terms: &CardanoTerms) -> Option<Triple> {
    let q = Complex64::new(terms.q, 0.0);
    let c = cube_root_term(terms)?;

    let xi = Complex64::new(-0.5, 3.0_f64.sqrt() / 2.0);
    let xi_sq = xi * xi;

    let z1 = q / c - c;
    let z2 = q / (xi * c) - xi * c;
    let z3 = q / (xi_sq * c) - xi_sq * c;

    Some((z2.re + terms.shift, z1.re + terms.shift, z3.re + terms.shift))
}

fn cube_root_term(terms: &CardanoTerms) -> Option<Complex64> {
    let base = if terms.discriminant < 0.0 {
        Complex64::new(-terms.r, (-terms.discriminant).sqrt())
    } else {
        // Real square root: take the sign that adds to −R instead of cancelling it.
        let root = terms.discriminant.sqrt();
        Complex64::new(-terms.r - root.copysign(terms.r), 0.0)
    };
    if base.norm() <= Real::MIN_POSITIVE {
        return None;
    }
    Some(base.powf(1.0 / 3.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve(a: Real, b: Real, c: Real, d: Real) -> CubicSolution {
        let coeffs = CubicCoefficients::new(a, b, c, d).expect("coeffs");
        AlgebraicSolver::default().solve(&coeffs)
    }

    #[test]
    fn matches_trigonometric_order() {
        let (x1, x2, x3) = solve(1.0, -6.0, 11.0, -6.0).roots;
        assert!((x1 - 3.0).abs() < 1e-12);
        assert!((x2 - 1.0).abs() < 1e-12);
        assert!((x3 - 2.0).abs() < 1e-12);
    }

    #[test]
    fn vanishing_c_is_a_triple_root() {
        let solution = solve(1.0, 3.0, 3.0, 1.0);
        assert_eq!(solution.status, RootStatus::TripleRoot);
        assert_eq!(solution.roots, (-1.0, -1.0, -1.0));
    }

    #[test]
    fn pure_cube_returns_real_parts() {
        // x³ − 1 has roots 1 and −1/2 ± i·√3/2.
        let solution = solve(1.0, 0.0, 0.0, -1.0);
        assert_eq!(solution.status, RootStatus::ComplexPair);
        let sorted = solution.sorted();
        assert!((sorted[0] + 0.5).abs() < 1e-12);
        assert!((sorted[1] + 0.5).abs() < 1e-12);
        assert!((sorted[2] - 1.0).abs() < 1e-12);
    }
}

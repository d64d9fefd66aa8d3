use std::f64::consts::PI;

use emx_core::Real;

use crate::alg;
use crate::{CubicCoefficients, CubicSolution, CubicSolver, RootStatus, DEFAULT_DISCRIMINANT_TOL};

/// Trigonometric form of Cardano's formula.
///
/// For three real roots the output order is `k = 0, 1, 2` in
/// `2·sqrt(−Q)·cos(θ/3 + 2πk/3) − b/(3a)`, i.e. largest, smallest, middle.
/// When the discriminant exceeds the tolerance the real parts computed by the
/// algebraic form are returned with [`RootStatus::ComplexPair`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrigonometricSolver {
    /// Relative tolerance on `Q³ + R²`, see [`crate::CardanoTerms::has_complex_pair`].
    pub discriminant_tol: Real,
}

impl Default for TrigonometricSolver {
    fn default() -> Self {
        Self {
            discriminant_tol: DEFAULT_DISCRIMINANT_TOL,
        }
    }
}

impl CubicSolver for TrigonometricSolver {
    fn name(&self) -> &'static str {
        "trigonometric"
    }

    fn solve(&self, coeffs: &CubicCoefficients) -> CubicSolution {
        let terms = coeffs.cardano_terms();
        if terms.has_complex_pair(self.discriminant_tol) {
            return CubicSolution {
                roots: alg::real_parts(&terms),
                status: RootStatus::ComplexPair,
            };
        }

        // Q > 0 only survives the discriminant test as rounding noise around Q == 0.
        let minus_q = -terms.q;
        let denom = minus_q * minus_q.sqrt();
        if minus_q <= 0.0 || denom == 0.0 {
            return CubicSolution::triple(terms.shift);
        }

        let theta = (terms.r / denom).clamp(-1.0, 1.0).acos();
        let amplitude = 2.0 * minus_q.sqrt();
        let root = |k: Real| amplitude * (theta / 3.0 + 2.0 * PI * k / 3.0).cos() + terms.shift;

        CubicSolution {
            roots: (root(0.0), root(1.0), root(2.0)),
            status: RootStatus::ThreeReal,
        }
    }
}

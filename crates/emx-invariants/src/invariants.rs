use emx_core::{EmxError, Real};
use emx_cubic::CubicCoefficients;
use serde::{Deserialize, Serialize};

use crate::covariance::{symplectic_form, CovarianceMatrix};

/// The three kinetic moment invariants of a 6x6 covariance matrix.
///
/// They are unchanged by any linear symplectic map `Σ → M Σ Mᵀ` and equal
/// the power sums `Σ εₖ²`, `Σ εₖ⁴`, `Σ εₖ⁶` of the eigenemittances (Dragt,
/// Neri, Rangarajan, Phys. Rev. A 45, 2572 (1992)).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KineticInvariants {
    /// Second-order invariant, `−tr((ΣJ)²)/2`.
    pub i2: Real,
    /// Fourth-order invariant, `tr((ΣJ)⁴)/2`.
    pub i4: Real,
    /// Sixth-order invariant, `−tr((ΣJ)⁶)/2`.
    pub i6: Real,
}

impl KineticInvariants {
    /// Invariants of a beam whose eigenemittances are `(e1, e2, e3)`.
    pub fn from_emittances(e1: Real, e2: Real, e3: Real) -> Self {
        let squares = [e1 * e1, e2 * e2, e3 * e3];
        Self {
            i2: squares.iter().sum(),
            i4: squares.iter().map(|s| s.powi(2)).sum(),
            i6: squares.iter().map(|s| s.powi(3)).sum(),
        }
    }

    /// Cubic whose roots are the squared eigenemittances.
    ///
    /// Newton's identities turn the power sums into elementary symmetric
    /// polynomials: `x³ − I2·x² + (I2² − I4)/2·x − (I2³/6 − I2·I4/2 + I6/3)`.
    pub fn characteristic_cubic(&self) -> Result<CubicCoefficients, EmxError> {
        let Self { i2, i4, i6 } = *self;
        CubicCoefficients::new(
            1.0,
            -i2,
            (i2.powi(2) - i4) / 2.0,
            -i2.powi(3) / 6.0 + i2 * i4 / 2.0 - i6 / 3.0,
        )
    }

    /// Components as a tuple `(I2, I4, I6)`.
    pub fn as_tuple(&self) -> (Real, Real, Real) {
        (self.i2, self.i4, self.i6)
    }
}

/// Computes `(I2, I4, I6)` in closed form from `S = ΣJ`.
pub fn kinetic_invariants(sigma: &CovarianceMatrix) -> KineticInvariants {
    let s1 = sigma.matrix() * symplectic_form();
    let s2 = s1 * s1;
    let s4 = s2 * s2;
    let s6 = s2 * s4;
    KineticInvariants {
        i2: -s2.trace() / 2.0,
        i4: s4.trace() / 2.0,
        i6: -s6.trace() / 2.0,
    }
}

use emx_core::{EmxError, Real, TracingSink, Triple, WarnPriority, Warning, WarningSink};
use emx_cubic::{solve_reporting, RootStatus};
use serde::{Deserialize, Serialize};

use crate::config::EmittanceOpts;
use crate::covariance::CovarianceMatrix;
use crate::invariants::{kinetic_invariants, KineticInvariants};

/// Source tag used for warnings about negative squared emittances.
pub const EIGEN_SOURCE: &str = "emx_invariants::eigenemittances";

/// The three eigenemittances of a beam.
///
/// Values follow the root order of the solver that produced them; for the
/// default trigonometric solver that is largest, smallest, middle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Eigenemittances {
    /// First mode.
    pub e1: Real,
    /// Second mode.
    pub e2: Real,
    /// Third mode.
    pub e3: Real,
}

impl Eigenemittances {
    /// Components as a tuple `(e1, e2, e3)`.
    pub fn as_tuple(&self) -> Triple {
        (self.e1, self.e2, self.e3)
    }

    /// Components in ascending order.
    pub fn sorted(&self) -> [Real; 3] {
        let mut values = [self.e1, self.e2, self.e3];
        values.sort_by(Real::total_cmp);
        values
    }
}

/// Full result of the invariant → cubic → root chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EigenAnalysis {
    /// Kinetic invariants of the matrix.
    pub invariants: KineticInvariants,
    /// Squared eigenemittances as returned by the solver.
    pub roots: Triple,
    /// Solver classification of the roots.
    pub status: RootStatus,
    /// Eigenemittances derived from the roots.
    pub eigenemittances: Eigenemittances,
}

/// Eigenemittances with default options, warnings go to `tracing`.
pub fn eigenemittances(sigma: &CovarianceMatrix) -> Result<Eigenemittances, EmxError> {
    Ok(eigenemittances_with(sigma, &EmittanceOpts::default(), &TracingSink)?.eigenemittances)
}

/// Runs the full chain with explicit options and warning sink.
///
/// Complex roots and significantly negative squared emittances are reported
/// to `sink` and never abort the computation.
pub fn eigenemittances_with(
    sigma: &CovarianceMatrix,
    opts: &EmittanceOpts,
    sink: &dyn WarningSink,
) -> Result<EigenAnalysis, EmxError> {
    let invariants = kinetic_invariants(sigma);
    let coeffs = invariants.characteristic_cubic()?;
    let solution = solve_reporting(opts.method, &coeffs, opts.discriminant_tol, sink);
    let eigenemittances =
        emittances_from_roots(solution.roots, invariants.i2, opts.negative_root_tol, sink);
    Ok(EigenAnalysis {
        invariants,
        roots: solution.roots,
        status: solution.status,
        eigenemittances,
    })
}

/// Maps squared eigenemittances to eigenemittances.
///
/// Negative roots are clamped to zero; a warning is recorded when the
/// excursion exceeds `negative_root_tol · |I2|`.
pub fn emittances_from_roots(
    roots: Triple,
    i2: Real,
    negative_root_tol: Real,
    sink: &dyn WarningSink,
) -> Eigenemittances {
    let limit = negative_root_tol * i2.abs();
    let convert = |root: Real| {
        if root < -limit {
            sink.record(Warning::new(
                EIGEN_SOURCE,
                format!(
                    "squared eigenemittance {root:e} is negative beyond tolerance (I2 = {i2:e}); \
                     clamped to zero. The covariance matrix may not be positive semi-definite."
                ),
                WarnPriority::Medium,
            ));
        }
        root.max(0.0).sqrt()
    };
    Eigenemittances {
        e1: convert(roots.0),
        e2: convert(roots.1),
        e3: convert(roots.2),
    }
}

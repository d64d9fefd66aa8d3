#![deny(missing_docs)]
#![doc = "Cardano solvers for cubic polynomials expected to have three real roots. \
Two independent forms (trigonometric and algebraic) share one interface so \
that each can cross-check the other."]

/// Algebraic (complex arithmetic) form of Cardano's formula.
pub mod alg;
/// Trigonometric form of Cardano's formula.
pub mod trig;

use emx_core::{EmxError, ErrorInfo, Real, TracingSink, Triple, WarnPriority, Warning, WarningSink};
use serde::{Deserialize, Serialize};

pub use alg::AlgebraicSolver;
pub use trig::TrigonometricSolver;

/// Default relative tolerance applied to the discriminant test.
pub const DEFAULT_DISCRIMINANT_TOL: Real = 1.0e-12;

/// Source tag used when the trigonometric form reports complex roots.
pub const TRIG_SOURCE: &str = "emx_cubic::cubic_roots_trig";

/// Source tag used when the algebraic form reports complex roots.
pub const ALG_SOURCE: &str = "emx_cubic::cubic_roots_alg";

/// Coefficients of `a·x³ + b·x² + c·x + d`, validated so that `a != 0`
/// and every coefficient is finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CubicCoefficients {
    a: Real,
    b: Real,
    c: Real,
    d: Real,
}

impl CubicCoefficients {
    /// Validates and stores the four coefficients.
    pub fn new(a: Real, b: Real, c: Real, d: Real) -> Result<Self, EmxError> {
        for (name, value) in [("a", a), ("b", b), ("c", c), ("d", d)] {
            if !value.is_finite() {
                return Err(EmxError::Polynomial(
                    ErrorInfo::new("non-finite-coefficient", "cubic coefficients must be finite")
                        .with_context(name, value.to_string()),
                ));
            }
        }
        if a == 0.0 {
            return Err(EmxError::Polynomial(
                ErrorInfo::new("zero-leading-coefficient", "cubic term vanishes")
                    .with_context("a", a.to_string())
                    .with_hint("the polynomial is at most quadratic"),
            ));
        }
        Ok(Self { a, b, c, d })
    }

    /// Builds the monic cubic `(x − p)(x − q)(x − s)`.
    pub fn from_roots(p: Real, q: Real, s: Real) -> Result<Self, EmxError> {
        Self::new(1.0, -(p + q + s), p * q + q * s + s * p, -(p * q * s))
    }

    /// Coefficient of the cubic term.
    pub fn a(&self) -> Real {
        self.a
    }

    /// Coefficient of the quadratic term.
    pub fn b(&self) -> Real {
        self.b
    }

    /// Coefficient of the linear term.
    pub fn c(&self) -> Real {
        self.c
    }

    /// Constant term.
    pub fn d(&self) -> Real {
        self.d
    }

    /// Evaluates the polynomial at `x` using Horner's scheme.
    pub fn eval(&self, x: Real) -> Real {
        ((self.a * x + self.b) * x + self.c) * x + self.d
    }

    /// Computes the quantities shared by both Cardano forms.
    pub fn cardano_terms(&self) -> CardanoTerms {
        let (a, b, c, d) = (self.a, self.b, self.c, self.d);
        let q = (3.0 * a * c - b.powi(2)) / (9.0 * a.powi(2));
        let r = (9.0 * a * b * c - 27.0 * a.powi(2) * d - 2.0 * b.powi(3)) / (54.0 * a.powi(3));
        let shift = -b / (3.0 * a);
        CardanoTerms {
            q,
            r,
            discriminant: q.powi(3) + r.powi(2),
            shift,
            scale: shift.powi(2) + (c / (3.0 * a)).abs(),
        }
    }
}

impl<'de> Deserialize<'de> for CubicCoefficients {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            a: Real,
            b: Real,
            c: Real,
            d: Real,
        }
        let raw = Raw::deserialize(deserializer)?;
        CubicCoefficients::new(raw.a, raw.b, raw.c, raw.d).map_err(serde::de::Error::custom)
    }
}

/// Depressed-cubic quantities `Q`, `R` and the discriminant `Q³ + R²`.
///
/// The roots of the original cubic are `t + shift` where `t` solves
/// `t³ + 3Q·t − 2R = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardanoTerms {
    /// `(3ac − b²) / (9a²)`.
    pub q: Real,
    /// `(9abc − 27a²d − 2b³) / (54a³)`.
    pub r: Real,
    /// `Q³ + R²`; non-positive for three real roots.
    pub discriminant: Real,
    /// `−b / (3a)`.
    pub shift: Real,
    /// `(b/3a)² + |c/3a|`, the magnitude `Q` is computed from.
    pub scale: Real,
}

impl CardanoTerms {
    /// Returns true when the discriminant indicates a complex-conjugate pair.
    ///
    /// The test is relative to `scale³` so that it does not depend on the
    /// units of the roots.
    pub fn has_complex_pair(&self, tol: Real) -> bool {
        self.discriminant > tol * self.scale.powi(3)
    }
}

/// Classification of a solver result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootStatus {
    /// Three real roots computed from the closed form.
    ThreeReal,
    /// Degenerate case, every root equals `−b / (3a)`.
    TripleRoot,
    /// The real-root precondition failed; only real parts are returned.
    ComplexPair,
}

/// Roots returned by a [`CubicSolver`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSolution {
    /// Roots in the solver's documented order.
    pub roots: Triple,
    /// How the roots were obtained.
    pub status: RootStatus,
}

impl CubicSolution {
    pub(crate) fn triple(value: Real) -> Self {
        Self {
            roots: (value, value, value),
            status: RootStatus::TripleRoot,
        }
    }

    /// True unless the real-root precondition was violated.
    pub fn is_reliable(&self) -> bool {
        self.status != RootStatus::ComplexPair
    }

    /// Roots as an array in solver order.
    pub fn as_array(&self) -> [Real; 3] {
        [self.roots.0, self.roots.1, self.roots.2]
    }

    /// Roots sorted in ascending order.
    pub fn sorted(&self) -> [Real; 3] {
        let mut roots = self.as_array();
        roots.sort_by(Real::total_cmp);
        roots
    }
}

/// Common interface of the two Cardano forms.
///
/// Implementations are pure: no allocation, no panics, no logging. They are
/// safe to call from per-particle loops and from any number of threads.
pub trait CubicSolver: Send + Sync {
    /// Short identifier of the strategy.
    fn name(&self) -> &'static str;

    /// Solves the cubic, reporting through [`RootStatus`] whether the
    /// real-root precondition held.
    fn solve(&self, coeffs: &CubicCoefficients) -> CubicSolution;
}

/// Closed set of solver strategies, selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CubicMethod {
    /// [`TrigonometricSolver`].
    #[default]
    Trigonometric,
    /// [`AlgebraicSolver`].
    Algebraic,
}

impl CubicMethod {
    /// Solves with the selected strategy and discriminant tolerance.
    pub fn solve(self, coeffs: &CubicCoefficients, discriminant_tol: Real) -> CubicSolution {
        match self {
            CubicMethod::Trigonometric => TrigonometricSolver { discriminant_tol }.solve(coeffs),
            CubicMethod::Algebraic => AlgebraicSolver { discriminant_tol }.solve(coeffs),
        }
    }

    /// Source tag used in warnings raised for this strategy.
    pub fn source(self) -> &'static str {
        match self {
            CubicMethod::Trigonometric => TRIG_SOURCE,
            CubicMethod::Algebraic => ALG_SOURCE,
        }
    }
}

/// Solves the cubic and reports a violated real-root precondition to `sink`.
///
/// This is the host-level entry point: it never fails, the returned roots
/// are the documented fallback when the warning fires.
pub fn solve_reporting(
    method: CubicMethod,
    coeffs: &CubicCoefficients,
    discriminant_tol: Real,
    sink: &dyn WarningSink,
) -> CubicSolution {
    let solution = method.solve(coeffs, discriminant_tol);
    if solution.status == RootStatus::ComplexPair {
        sink.record(Warning::new(
            method.source(),
            format!(
                "cubic with coefficients (a={}, b={}, c={}, d={}) has complex roots; only \
                 real parts are returned. This usually means numerical precision was lost \
                 upstream and derived quantities should be treated with caution.",
                coeffs.a(),
                coeffs.b(),
                coeffs.c(),
                coeffs.d()
            ),
            WarnPriority::Medium,
        ));
    }
    solution
}

/// Roots of `a·x³ + b·x² + c·x + d` from the trigonometric form.
///
/// Complex roots are reported through `tracing` and replaced by real parts.
pub fn cubic_roots_trig(a: Real, b: Real, c: Real, d: Real) -> Result<Triple, EmxError> {
    let coeffs = CubicCoefficients::new(a, b, c, d)?;
    Ok(solve_reporting(
        CubicMethod::Trigonometric,
        &coeffs,
        DEFAULT_DISCRIMINANT_TOL,
        &TracingSink,
    )
    .roots)
}

/// Roots of `a·x³ + b·x² + c·x + d` from the algebraic form.
///
/// The output order matches [`cubic_roots_trig`] for three distinct real roots.
pub fn cubic_roots_alg(a: Real, b: Real, c: Real, d: Real) -> Result<Triple, EmxError> {
    let coeffs = CubicCoefficients::new(a, b, c, d)?;
    Ok(solve_reporting(
        CubicMethod::Algebraic,
        &coeffs,
        DEFAULT_DISCRIMINANT_TOL,
        &TracingSink,
    )
    .roots)
}

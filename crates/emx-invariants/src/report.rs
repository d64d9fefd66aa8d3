use emx_core::{EmxError, Real, SchemaVersion, Warning, WarningLog};
use emx_cubic::{CubicMethod, RootStatus};
use nalgebra::Matrix6;
use serde::{Deserialize, Serialize};

use crate::config::EmittanceOpts;
use crate::covariance::{CovarianceMatrix, Plane};
use crate::eigen::{eigenemittances_with, Eigenemittances};
use crate::invariants::KineticInvariants;
use crate::moments::{covariance_from_particles, PhaseSpaceRecord};

/// Current schema of [`EmittanceReport`].
pub const REPORT_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// Projected rms emittances of the three planes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedEmittances {
    /// Horizontal emittance.
    pub x: Real,
    /// Vertical emittance.
    pub y: Real,
    /// Longitudinal emittance.
    pub t: Real,
}

/// Emittance diagnostics for one beam snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmittanceReport {
    /// Schema version of the payload.
    pub schema_version: SchemaVersion,
    /// Optional caller supplied label (element name, step, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Solver strategy used for the cubic.
    pub method: CubicMethod,
    /// Covariance matrix the report was computed from.
    pub covariance: CovarianceMatrix,
    /// Kinetic invariants `(I2, I4, I6)`.
    pub invariants: KineticInvariants,
    /// Eigenemittances in solver order.
    pub eigenemittances: Eigenemittances,
    /// Projected rms emittances per plane.
    pub projected: ProjectedEmittances,
    /// Classification of the cubic roots.
    pub root_status: RootStatus,
    /// Warnings raised while computing the report.
    #[serde(default)]
    pub warnings: Vec<Warning>,
}

impl EmittanceReport {
    /// True when no warning was raised.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Computes the report for a covariance matrix.
pub fn analyze_covariance(
    sigma: &CovarianceMatrix,
    label: Option<String>,
    opts: &EmittanceOpts,
) -> Result<EmittanceReport, EmxError> {
    opts.validate()?;
    let log = WarningLog::new();
    let analysis = eigenemittances_with(sigma, opts, &log)?;
    let warnings = log.entries();
    if !warnings.is_empty() {
        tracing::debug!(
            label = label.as_deref().unwrap_or(""),
            count = warnings.len(),
            "emittance report carries warnings"
        );
    }
    Ok(EmittanceReport {
        schema_version: REPORT_SCHEMA,
        label,
        method: opts.method,
        covariance: *sigma,
        invariants: analysis.invariants,
        eigenemittances: analysis.eigenemittances,
        projected: ProjectedEmittances {
            x: sigma.projected_emittance(Plane::X),
            y: sigma.projected_emittance(Plane::Y),
            t: sigma.projected_emittance(Plane::T),
        },
        root_status: analysis.status,
        warnings,
    })
}

/// Reduces particle records to a covariance matrix and computes the report.
pub fn analyze_beam(
    particles: &[PhaseSpaceRecord],
    label: Option<String>,
    opts: &EmittanceOpts,
) -> Result<EmittanceReport, EmxError> {
    let sigma = covariance_from_particles(particles)?;
    analyze_covariance(&sigma, label, opts)
}

/// Validates a raw matrix with the configured symmetry tolerance and
/// computes the report.
pub fn analyze_matrix(
    matrix: &Matrix6<Real>,
    label: Option<String>,
    opts: &EmittanceOpts,
) -> Result<EmittanceReport, EmxError> {
    opts.validate()?;
    let sigma = CovarianceMatrix::with_tolerance(*matrix, opts.symmetry_tol)?;
    analyze_covariance(&sigma, label, opts)
}

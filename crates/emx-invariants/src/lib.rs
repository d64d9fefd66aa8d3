#![deny(missing_docs)]
#![doc = "Symplectic kinetic invariants and eigenemittances of 6D beam covariance \
matrices. The invariants `(I2, I4, I6)` define a cubic whose roots are the \
squared eigenemittances; the roots come from `emx-cubic`."]

/// Runtime options and their YAML/JSON loaders.
pub mod config;
/// Validated 6x6 covariance matrices and the symplectic form.
pub mod covariance;
/// Eigenemittances from the invariant cubic.
pub mod eigen;
/// Kinetic invariants `(I2, I4, I6)`.
pub mod invariants;
/// Second-moment reduction over particle records.
pub mod moments;
/// Serializable emittance reports.
pub mod report;
/// JSON and YAML helpers.
pub mod serde_io;

pub use config::EmittanceOpts;
pub use covariance::{is_symplectic, symplectic_form, CovarianceMatrix, Plane};
pub use eigen::{
    eigenemittances, eigenemittances_with, emittances_from_roots, EigenAnalysis, Eigenemittances,
};
pub use invariants::{kinetic_invariants, KineticInvariants};
pub use moments::{covariance_from_particles, PhaseSpaceRecord};
pub use report::{
    analyze_beam, analyze_covariance, analyze_matrix, EmittanceReport, ProjectedEmittances,
};

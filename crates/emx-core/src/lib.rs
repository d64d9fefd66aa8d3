#![deny(missing_docs)]
#![doc = "Shared error, warning and schema types for the EMX eigenemittance diagnostics."]

pub mod diagnostics;
pub mod errors;
pub mod provenance;

pub use diagnostics::{TracingSink, WarnPriority, Warning, WarningLog, WarningSink};
pub use errors::{EmxError, ErrorInfo};
pub use provenance::SchemaVersion;

/// Floating point type used for every phase-space quantity.
pub type Real = f64;

/// Ordered triple returned by the solvers and extractors.
pub type Triple = (Real, Real, Real);

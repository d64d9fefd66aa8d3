use std::path::Path;

use emx_core::{EmxError, ErrorInfo, Real};
use emx_cubic::{CubicMethod, DEFAULT_DISCRIMINANT_TOL};
use serde::{Deserialize, Serialize};

use crate::covariance::DEFAULT_SYMMETRY_TOL;
use crate::serde_io;

fn default_discriminant_tol() -> Real {
    DEFAULT_DISCRIMINANT_TOL
}

fn default_negative_root_tol() -> Real {
    1.0e-10
}

fn default_symmetry_tol() -> Real {
    DEFAULT_SYMMETRY_TOL
}

/// Options controlling eigenemittance extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmittanceOpts {
    /// Cubic solver strategy.
    #[serde(default)]
    pub method: CubicMethod,
    /// Relative tolerance of the real-root discriminant test.
    #[serde(default = "default_discriminant_tol")]
    pub discriminant_tol: Real,
    /// Negative squared emittances larger than this fraction of `I2` raise a warning.
    #[serde(default = "default_negative_root_tol")]
    pub negative_root_tol: Real,
    /// Relative tolerance of the covariance symmetry check.
    #[serde(default = "default_symmetry_tol")]
    pub symmetry_tol: Real,
}

impl Default for EmittanceOpts {
    fn default() -> Self {
        Self {
            method: CubicMethod::default(),
            discriminant_tol: default_discriminant_tol(),
            negative_root_tol: default_negative_root_tol(),
            symmetry_tol: default_symmetry_tol(),
        }
    }
}

impl EmittanceOpts {
    /// Checks that every tolerance is finite and non-negative.
    pub fn validate(&self) -> Result<(), EmxError> {
        for (name, value) in [
            ("discriminant_tol", self.discriminant_tol),
            ("negative_root_tol", self.negative_root_tol),
            ("symmetry_tol", self.symmetry_tol),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(EmxError::Config(
                    ErrorInfo::new("invalid-tolerance", "tolerances must be finite and non-negative")
                        .with_context(name, value.to_string()),
                ));
            }
        }
        Ok(())
    }

    /// Parses and validates options from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, EmxError> {
        let opts: Self = serde_io::from_yaml_slice(text.as_bytes())?;
        opts.validate()?;
        Ok(opts)
    }

    /// Parses and validates options from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, EmxError> {
        let opts: Self = serde_io::from_json_slice(text.as_bytes())?;
        opts.validate()?;
        Ok(opts)
    }

    /// Loads options from a `.json`, `.yaml` or `.yml` file.
    pub fn load(path: &Path) -> Result<Self, EmxError> {
        let text = serde_io::read_text(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&text),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text),
            other => Err(EmxError::Config(
                ErrorInfo::new("unknown-format", "options must be JSON or YAML")
                    .with_context("path", path.display().to_string())
                    .with_context("extension", other.unwrap_or("").to_string()),
            )),
        }
    }
}

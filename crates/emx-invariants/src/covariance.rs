use emx_core::{EmxError, ErrorInfo, Real, Triple};
use nalgebra::{Matrix2, Matrix6};
use serde::{Deserialize, Serialize};

/// Default relative tolerance for the symmetry check.
pub const DEFAULT_SYMMETRY_TOL: Real = 1.0e-10;

/// Names of the phase-space coordinates in matrix order.
pub const PHASE_SPACE_LABELS: [&str; 6] = ["x", "px", "y", "py", "t", "pt"];

/// One of the three conjugate phase-space planes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plane {
    /// Horizontal `(x, px)`.
    X,
    /// Vertical `(y, py)`.
    Y,
    /// Longitudinal `(t, pt)`.
    T,
}

impl Plane {
    /// All planes in matrix order.
    pub const ALL: [Plane; 3] = [Plane::X, Plane::Y, Plane::T];

    /// Index of the position coordinate; the momentum follows it.
    pub fn offset(self) -> usize {
        match self {
            Plane::X => 0,
            Plane::Y => 2,
            Plane::T => 4,
        }
    }
}

/// The 6x6 symplectic form `J`, block diagonal with `[[0, 1], [−1, 0]]`.
pub fn symplectic_form() -> Matrix6<Real> {
    let mut j = Matrix6::zeros();
    for plane in Plane::ALL {
        let k = plane.offset();
        j[(k, k + 1)] = 1.0;
        j[(k + 1, k)] = -1.0;
    }
    j
}

/// Returns true when `Mᵀ J M = J` holds entry-wise within `tol`.
pub fn is_symplectic(map: &Matrix6<Real>, tol: Real) -> bool {
    let j = symplectic_form();
    let residual = map.transpose() * j * map - j;
    residual.iter().all(|entry| entry.abs() <= tol)
}

/// Symmetric 6x6 second-moment matrix of a beam in `(x, px, y, py, t, pt)`
/// order.
///
/// Construction checks finiteness and symmetry and stores the symmetrised
/// matrix `(Σ + Σᵀ)/2`. Positive semi-definiteness is not checked; violating
/// it degrades the accuracy of everything derived from the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CovarianceRows", into = "CovarianceRows")]
pub struct CovarianceMatrix {
    matrix: Matrix6<Real>,
}

impl CovarianceMatrix {
    /// Validates `matrix` with [`DEFAULT_SYMMETRY_TOL`].
    pub fn new(matrix: Matrix6<Real>) -> Result<Self, EmxError> {
        Self::with_tolerance(matrix, DEFAULT_SYMMETRY_TOL)
    }

    /// Validates `matrix`; asymmetry is measured relative to the largest entry.
    pub fn with_tolerance(matrix: Matrix6<Real>, symmetry_tol: Real) -> Result<Self, EmxError> {
        if let Some((idx, value)) = matrix.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            // nalgebra stores column-major.
            let (row, col) = (idx % 6, idx / 6);
            return Err(EmxError::Matrix(
                ErrorInfo::new("non-finite-entry", "covariance entries must be finite")
                    .with_context("entry", entry_label(row, col))
                    .with_context("value", value.to_string()),
            ));
        }

        let magnitude = matrix.amax();
        for row in 0..6 {
            for col in (row + 1)..6 {
                let gap = (matrix[(row, col)] - matrix[(col, row)]).abs();
                if gap > symmetry_tol * magnitude {
                    return Err(EmxError::Matrix(
                        ErrorInfo::new("asymmetric", "covariance matrix is not symmetric")
                            .with_context("entry", entry_label(row, col))
                            .with_context("gap", gap.to_string())
                            .with_hint("second-moment matrices satisfy Σ = Σᵀ"),
                    ));
                }
            }
        }

        Ok(Self {
            matrix: (matrix + matrix.transpose()) * 0.5,
        })
    }

    /// Builds a matrix from 36 entries in row-major order.
    pub fn from_row_slice(entries: &[Real]) -> Result<Self, EmxError> {
        if entries.len() != 36 {
            return Err(EmxError::Matrix(
                ErrorInfo::new("shape", "expected 36 entries for a 6x6 matrix")
                    .with_context("len", entries.len().to_string()),
            ));
        }
        Self::new(Matrix6::from_row_slice(entries))
    }

    /// Builds an uncoupled matrix from `(⟨q²⟩, ⟨q·p⟩, ⟨p²⟩)` per plane.
    pub fn from_plane_blocks(blocks: [[Real; 3]; 3]) -> Result<Self, EmxError> {
        let mut matrix = Matrix6::zeros();
        for (plane, [qq, qp, pp]) in Plane::ALL.into_iter().zip(blocks) {
            let k = plane.offset();
            matrix[(k, k)] = qq;
            matrix[(k, k + 1)] = qp;
            matrix[(k + 1, k)] = qp;
            matrix[(k + 1, k + 1)] = pp;
        }
        Self::new(matrix)
    }

    /// Underlying matrix.
    pub fn matrix(&self) -> &Matrix6<Real> {
        &self.matrix
    }

    /// Entry at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Real {
        self.matrix[(row, col)]
    }

    /// 2x2 diagonal block of one plane.
    pub fn plane_block(&self, plane: Plane) -> Matrix2<Real> {
        let k = plane.offset();
        self.matrix.fixed_view::<2, 2>(k, k).into_owned()
    }

    /// Projected rms emittance `sqrt(det Σᵢ)` of one plane; a negative
    /// determinant yields zero.
    pub fn projected_emittance(&self, plane: Plane) -> Real {
        self.plane_block(plane).determinant().max(0.0).sqrt()
    }

    /// Projected rms emittances of the x, y and t planes.
    pub fn projected_emittances(&self) -> Triple {
        (
            self.projected_emittance(Plane::X),
            self.projected_emittance(Plane::Y),
            self.projected_emittance(Plane::T),
        )
    }

    /// Transports the matrix through a linear map, `M Σ Mᵀ`.
    pub fn transformed(&self, map: &Matrix6<Real>) -> Result<Self, EmxError> {
        Self::new(map * self.matrix * map.transpose())
    }
}

fn entry_label(row: usize, col: usize) -> String {
    format!("{}-{}", PHASE_SPACE_LABELS[row], PHASE_SPACE_LABELS[col])
}

/// Row-major serialized form of [`CovarianceMatrix`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CovarianceRows {
    /// Matrix rows in `(x, px, y, py, t, pt)` order.
    pub rows: [[Real; 6]; 6],
}

impl TryFrom<CovarianceRows> for CovarianceMatrix {
    type Error = EmxError;

    fn try_from(value: CovarianceRows) -> Result<Self, Self::Error> {
        let entries: Vec<Real> = value.rows.iter().flatten().copied().collect();
        CovarianceMatrix::from_row_slice(&entries)
    }
}

impl From<CovarianceMatrix> for CovarianceRows {
    fn from(value: CovarianceMatrix) -> Self {
        let mut rows = [[0.0; 6]; 6];
        for (row, values) in rows.iter_mut().enumerate() {
            for (col, entry) in values.iter_mut().enumerate() {
                *entry = value.matrix[(row, col)];
            }
        }
        CovarianceRows { rows }
    }
}

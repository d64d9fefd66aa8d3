use emx_core::{EmxError, ErrorInfo, Real};
use nalgebra::{Matrix6, Vector6};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::covariance::CovarianceMatrix;

/// One macro-particle in `(x, px, y, py, t, pt)` phase space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseSpaceRecord {
    /// Horizontal position.
    pub x: Real,
    /// Horizontal momentum.
    pub px: Real,
    /// Vertical position.
    pub y: Real,
    /// Vertical momentum.
    pub py: Real,
    /// Longitudinal position.
    pub t: Real,
    /// Longitudinal momentum.
    pub pt: Real,
    /// Statistical weight.
    #[serde(default = "unit_weight")]
    pub weight: Real,
}

fn unit_weight() -> Real {
    1.0
}

impl PhaseSpaceRecord {
    /// Creates a record with unit weight.
    pub fn new(coordinates: [Real; 6]) -> Self {
        let [x, px, y, py, t, pt] = coordinates;
        Self {
            x,
            px,
            y,
            py,
            t,
            pt,
            weight: 1.0,
        }
    }

    /// Returns a copy with the given weight.
    pub fn with_weight(mut self, weight: Real) -> Self {
        self.weight = weight;
        self
    }

    /// Coordinates as a column vector.
    pub fn coordinates(&self) -> Vector6<Real> {
        Vector6::new(self.x, self.px, self.y, self.py, self.t, self.pt)
    }
}

#[derive(Debug, Clone, Copy)]
struct FirstMoments {
    weight: Real,
    sum: Vector6<Real>,
}

impl FirstMoments {
    fn zero() -> Self {
        Self {
            weight: 0.0,
            sum: Vector6::zeros(),
        }
    }

    fn push(mut self, record: &PhaseSpaceRecord) -> Self {
        self.weight += record.weight;
        self.sum += record.coordinates() * record.weight;
        self
    }

    fn merge(self, other: Self) -> Self {
        Self {
            weight: self.weight + other.weight,
            sum: self.sum + other.sum,
        }
    }
}

/// Weighted second central moments of a particle collection.
///
/// Means are reduced first and subtracted before the second pass, both
/// passes run in parallel.
pub fn covariance_from_particles(
    particles: &[PhaseSpaceRecord],
) -> Result<CovarianceMatrix, EmxError> {
    if particles.is_empty() {
        return Err(EmxError::Moments(ErrorInfo::new(
            "no-particles",
            "cannot reduce moments of an empty particle set",
        )));
    }
    if let Some((index, record)) = particles.iter().enumerate().find(|(_, record)| {
        !record.weight.is_finite() || !record.coordinates().iter().all(|v| v.is_finite())
    }) {
        return Err(EmxError::Moments(
            ErrorInfo::new("non-finite-record", "particle record contains non-finite values")
                .with_context("index", index.to_string())
                .with_context("weight", record.weight.to_string()),
        ));
    }

    let first = particles
        .par_iter()
        .fold(FirstMoments::zero, FirstMoments::push)
        .reduce(FirstMoments::zero, FirstMoments::merge);
    if first.weight <= 0.0 {
        return Err(EmxError::Moments(
            ErrorInfo::new("zero-weight", "total particle weight must be positive")
                .with_context("total_weight", first.weight.to_string()),
        ));
    }
    let mean = first.sum / first.weight;

    let second = particles
        .par_iter()
        .fold(Matrix6::<Real>::zeros, |acc, record| {
            let delta = record.coordinates() - mean;
            acc + delta * delta.transpose() * record.weight
        })
        .reduce(Matrix6::<Real>::zeros, |a, b| a + b);

    CovarianceMatrix::new(second / first.weight)
}

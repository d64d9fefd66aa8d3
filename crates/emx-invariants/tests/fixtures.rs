#![allow(dead_code)]

use emx_invariants::{CovarianceMatrix, Plane};
use nalgebra::Matrix6;

/// `(⟨q²⟩, ⟨q·p⟩, ⟨p²⟩)` of a plane with emittance `emittance` and Twiss
/// parameters `beta`, `alpha`.
pub fn twiss_block(emittance: f64, beta: f64, alpha: f64) -> [f64; 3] {
    let gamma = (1.0 + alpha * alpha) / beta;
    [emittance * beta, -emittance * alpha, emittance * gamma]
}

/// Uncoupled beam from three Twiss blocks.
pub fn uncoupled(blocks: [[f64; 3]; 3]) -> CovarianceMatrix {
    CovarianceMatrix::from_plane_blocks(blocks).expect("uncoupled covariance")
}

pub fn drift(plane: Plane, length: f64) -> Matrix6<f64> {
    let mut map = Matrix6::identity();
    let k = plane.offset();
    map[(k, k + 1)] = length;
    map
}

pub fn thin_lens(plane: Plane, strength: f64) -> Matrix6<f64> {
    let mut map = Matrix6::identity();
    let k = plane.offset();
    map[(k + 1, k)] = -strength;
    map
}

/// Rotates positions and momenta of two planes by the same angle.
pub fn plane_rotation(a: Plane, b: Plane, angle: f64) -> Matrix6<f64> {
    let (s, c) = angle.sin_cos();
    let mut map = Matrix6::identity();
    let (ka, kb) = (a.offset(), b.offset());
    for offset in 0..2 {
        let (i, j) = (ka + offset, kb + offset);
        map[(i, i)] = c;
        map[(i, j)] = s;
        map[(j, i)] = -s;
        map[(j, j)] = c;
    }
    map
}

/// Thin coupling kick `pa += k·qb`, `pb += k·qa`.
pub fn skew_kick(a: Plane, b: Plane, strength: f64) -> Matrix6<f64> {
    let mut map = Matrix6::identity();
    let (ka, kb) = (a.offset(), b.offset());
    map[(ka + 1, kb)] = strength;
    map[(kb + 1, ka)] = strength;
    map
}

pub fn relative_gap(actual: f64, expected: f64) -> f64 {
    (actual - expected).abs() / expected.abs().max(f64::MIN_POSITIVE)
}

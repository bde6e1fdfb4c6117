#![allow(dead_code)]

use approx::assert_relative_eq;
use nalgebra::{DMatrix, DVector, Vector3};
use rand::rngs::StdRng;
use rand::Rng;

pub fn assert_matrix_close(actual: &DMatrix<f64>, expected: &DMatrix<f64>, epsilon: f64) {
    assert_eq!(actual.shape(), expected.shape());
    for (a, b) in actual.iter().zip(expected.iter()) {
        assert_relative_eq!(*a, *b, epsilon = epsilon);
    }
}

pub fn assert_vector_close(actual: &DVector<f64>, expected: &DVector<f64>, epsilon: f64) {
    assert_eq!(actual.len(), expected.len());
    for (a, b) in actual.iter().zip(expected.iter()) {
        assert_relative_eq!(*a, *b, epsilon = epsilon);
    }
}

pub fn assert_orthogonal(m: &DMatrix<f64>, epsilon: f64) {
    let n = m.nrows();
    assert_matrix_close(&(m.transpose() * m), &DMatrix::identity(n, n), epsilon);
}

/// Uniform coefficients in [-1, 1).
pub fn random_coefficients(rng: &mut StdRng, n: usize) -> DVector<f64> {
    DVector::from_fn(n, |_, _| rng.random_range(-1.0..1.0))
}

pub fn random_samples(rng: &mut StdRng, rows: usize, n: usize) -> DMatrix<f64> {
    DMatrix::from_fn(rows, n, |_, _| rng.random_range(-1.0..1.0))
}

/// Cartesian direction of the rotation axis for an inclination and
/// obliquity in degrees.
pub fn axis_direction(inc: f64, obl: f64) -> Vector3<f64> {
    let (inc, obl) = (inc.to_radians(), obl.to_radians());
    Vector3::new(inc.sin() * obl.sin(), inc.sin() * obl.cos(), inc.cos())
}

/// Degree-1 real coefficients `(y, z, x)` of a Cartesian vector.
pub fn dipole(v: &Vector3<f64>) -> [f64; 3] {
    [v.y, v.z, v.x]
}

/// Axis orientations covering the general case and both poles, in degrees.
pub const AXES: [(f64, f64); 7] = [
    (90.0, 0.0),
    (63.0, 27.0),
    (30.0, -140.0),
    (135.0, 75.0),
    (0.0, 0.0),
    (180.0, 0.0),
    (180.0, 40.0),
];

//! # Block-diagonal products on degree-graded coefficient matrices
//!
//! Coefficient matrices follow the row-vector convention: each row of `v` is
//! one sample, each column one coefficient, and an operator `M` acts as
//! `u = v · M`. A degree-graded coefficient layout splits the columns into
//! contiguous blocks, block `l` occupying columns `l² .. l² + 2l`.
//!
//! Two kinds of operators are applied here:
//!
//! * dense per-degree blocks (`RZeta`, its inverse and derivatives), where
//!   each column block of `v` is multiplied by a `(2l+1)×(2l+1)` matrix;
//! * the rotation about `ẑ` and its `θ` derivative, which only couple the
//!   columns of orders `m` and `-m` and are never materialized.

use itertools::izip;
use nalgebra::DMatrix;

use crate::constants::num_coefficients;
use crate::rotation_errors::RotationError;
use crate::scalar::Real;

/// Check that `v` holds the coefficients of a degree-`lmax` expansion and
/// that `u` has the same shape as `v`.
pub fn check_shapes<T: Real>(
    v: &DMatrix<T>,
    u: &DMatrix<T>,
    lmax: usize,
) -> Result<(), RotationError> {
    let expected = num_coefficients(lmax);
    if v.ncols() != expected {
        return Err(RotationError::DimensionMismatch {
            expected,
            found: v.ncols(),
        });
    }
    if u.shape() != v.shape() {
        return Err(RotationError::ShapeMismatch {
            rows: v.nrows(),
            cols: v.ncols(),
            found_rows: u.nrows(),
            found_cols: u.ncols(),
        });
    }
    Ok(())
}

/// `u[:, block l] = v[:, block l] · blocks[l]` for every degree in `blocks`.
///
/// Columns past the last block are left untouched.
pub fn left_multiply_blocks<T: Real>(blocks: &[DMatrix<T>], v: &DMatrix<T>, u: &mut DMatrix<T>) {
    for (l, block) in blocks.iter().enumerate() {
        let (start, size) = (l * l, 2 * l + 1);
        let product = v.columns(start, size) * block;
        u.columns_mut(start, size).copy_from(&product);
    }
}

/// Rotation about `ẑ` for degrees `0..=lmax`.
///
/// Arguments
/// ---------
/// * `cosmt`, `sinmt`: per-coefficient `cos(mθ)`, `sin(mθ)` arrays covering at
///   least `(lmax + 1)²` entries.
/// * `lmax`: highest degree to rotate.
/// * `v`: input coefficients, one sample per row.
/// * `u`: output, same shape as `v`.
///
/// Remarks
/// -------
/// * Inside block `l`, column `j` pairs with column `2l - j` (order `-m`):
///   `u[:, j] = v[:, j] cos(mθ) + v[:, 2l - j] sin(mθ)`.
pub fn left_multiply_rz<T: Real>(
    cosmt: &[T],
    sinmt: &[T],
    lmax: usize,
    v: &DMatrix<T>,
    u: &mut DMatrix<T>,
) {
    for l in 0..=lmax {
        let start = l * l;
        for j in 0..=2 * l {
            let (col, mirror) = (start + j, start + 2 * l - j);
            let (c, s) = (cosmt[col], sinmt[col]);
            let (vc, vm) = (v.column(col), v.column(mirror));
            let mut uc = u.column_mut(col);
            for (out, a, b) in izip!(uc.iter_mut(), vc.iter(), vm.iter()) {
                *out = *a * c + *b * s;
            }
        }
    }
}

/// Derivative of [`left_multiply_rz`] with respect to `θ`:
/// `u[:, j] = m v[:, 2l - j] cos(mθ) - m v[:, j] sin(mθ)`.
pub fn left_multiply_drz<T: Real>(
    cosmt: &[T],
    sinmt: &[T],
    lmax: usize,
    v: &DMatrix<T>,
    u: &mut DMatrix<T>,
) {
    for l in 0..=lmax {
        let start = l * l;
        for j in 0..=2 * l {
            let (col, mirror) = (start + j, start + 2 * l - j);
            let m = T::from_isize(j as isize - l as isize);
            let (mc, ms) = (m * cosmt[col], m * sinmt[col]);
            let (vc, vm) = (v.column(col), v.column(mirror));
            let mut uc = u.column_mut(col);
            for (out, a, b) in izip!(uc.iter_mut(), vc.iter(), vm.iter()) {
                *out = *b * mc - *a * ms;
            }
        }
    }
}

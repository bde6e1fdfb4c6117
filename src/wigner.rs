//! # Wigner rotation matrices for real spherical harmonics
//!
//! Degree-by-degree construction of the rotation matrices of real spherical
//! harmonics, following the recurrence of Alvarez Collado et al. (1989),
//! *Rotation of real spherical harmonics*, Comput. Phys. Commun. 52, 323.
//!
//! For every degree `l` two `(2l+1)×(2l+1)` matrices are kept:
//!
//! * `D[l]`: the Wigner matrix of the `β` rotation in the complex harmonic
//!   basis, built from `D[l-1]` and `D[l-2]`;
//! * `R[l]`: the rotation matrix of the real harmonics for the full ZYZ
//!   rotation, combining `D[l]` with the `α` and `γ` phases.
//!
//! Row/column `m + l` of a block corresponds to order `m ∈ [-l, l]`, matching
//! the coefficient layout `l² + l + m`.
//!
//! ## Construction of `D[l]`
//!
//! 1. the top row (`m' = l`) from the corners of `D[l-1]` and a backward
//!    recursion in `m` with the factor `tan(β/2)`;
//! 2. the remaining rows of the upper quarter triangle from the three-term
//!    recurrence in `l`;
//! 3. the rest of the matrix by the reflection
//!    `D[l; m, m'] = (-1)^(m-m') D[l; m', m]` and inversion
//!    `D[l; -m', -m] = (-1)^(m-m') D[l; m', m]` relations, applied as explicit
//!    sign-alternating copies.
//!
//! Degrees 0 and 1 are closed forms.

use nalgebra::{DMatrix, DVector};

use crate::euler::{euler_from_axis_angle, EulerAngles};
use crate::rotation_errors::RotationError;
use crate::scalar::{tolerance, Real};

/// Column/row of order `m` inside a degree-`l` block.
#[inline]
fn at(m: isize, l: isize) -> usize {
    (m + l) as usize
}

/// Complex (`D`) and real (`R`) rotation matrices for every degree `0..=lmax`.
#[derive(Debug, Clone)]
pub struct WignerMatrices<S: Real> {
    lmax: usize,
    d: Vec<DMatrix<S>>,
    r: Vec<DMatrix<S>>,
}

impl<S: Real> WignerMatrices<S> {
    /// Allocate zeroed `(2l+1)×(2l+1)` blocks for `l = 0..=lmax`.
    pub fn new(lmax: usize) -> Self {
        let blocks = || {
            (0..=lmax)
                .map(|l| DMatrix::zeros(2 * l + 1, 2 * l + 1))
                .collect::<Vec<_>>()
        };
        WignerMatrices {
            lmax,
            d: blocks(),
            r: blocks(),
        }
    }

    /// Build the matrices of the rotation by `θ` about an arbitrary unit `axis`.
    ///
    /// Arguments
    /// ---------
    /// * `lmax`: highest degree.
    /// * `axis`: rotation axis; it is normalized here.
    /// * `cos_theta`, `sin_theta`: cosine and sine of the rotation angle.
    ///
    /// Return
    /// ------
    /// * The filled matrices, or [`RotationError::DegenerateAxis`] for a zero axis.
    pub fn from_axis_angle(
        lmax: usize,
        axis: [S; 3],
        cos_theta: S,
        sin_theta: S,
    ) -> Result<Self, RotationError> {
        let norm = (axis[0] * axis[0] + axis[1] * axis[1] + axis[2] * axis[2]).sqrt();
        if !(norm > S::zero()) {
            return Err(RotationError::DegenerateAxis);
        }
        let unit = axis.map(|c| c / norm);
        let tol = tolerance::<S>();
        let euler = euler_from_axis_angle(unit, cos_theta, sin_theta, tol);

        let mut matrices = WignerMatrices::new(lmax);
        matrices.build(&euler, tol);
        Ok(matrices)
    }

    pub fn lmax(&self) -> usize {
        self.lmax
    }

    /// Complex-basis Wigner matrices, one per degree.
    pub fn d(&self) -> &[DMatrix<S>] {
        &self.d
    }

    /// Real-basis rotation matrices, one per degree.
    pub fn r(&self) -> &[DMatrix<S>] {
        &self.r
    }

    pub(crate) fn r_mut(&mut self) -> &mut [DMatrix<S>] {
        &mut self.r
    }

    /// Set every `R[l]` (and `D[l]`) to the identity.
    pub fn set_identity(&mut self) {
        for (l, (d, r)) in self.d.iter_mut().zip(self.r.iter_mut()).enumerate() {
            *d = DMatrix::identity(2 * l + 1, 2 * l + 1);
            *r = DMatrix::identity(2 * l + 1, 2 * l + 1);
        }
    }

    /// Fill `D[l]` and `R[l]` for every degree from the Euler angles.
    ///
    /// `tol` selects the `sin β ≈ 0` branch of `tan(β/2)`.
    pub fn build(&mut self, euler: &EulerAngles<S>, tol: S) {
        self.d[0][(0, 0)] = S::one();
        self.r[0][(0, 0)] = S::one();
        if self.lmax == 0 {
            return;
        }

        self.build_degree_one(euler);

        let tgbet2 = euler.tan_half_beta(tol);
        for l in 2..=self.lmax {
            fill_degree(l, euler, tgbet2, &mut self.d, &mut self.r);
        }
    }

    fn build_degree_one(&mut self, euler: &EulerAngles<S>) {
        let EulerAngles {
            cos_alpha: c1,
            sin_alpha: s1,
            cos_beta: c2,
            sin_beta: s2,
            cos_gamma: c3,
            sin_gamma: s3,
        } = *euler;
        let half = S::from_f64(0.5);
        let root_two = S::from_f64(2.0).sqrt();

        let d = &mut self.d[1];
        d[(2, 2)] = half * (S::one() + c2);
        d[(2, 1)] = -s2 / root_two;
        d[(2, 0)] = half * (S::one() - c2);
        d[(1, 2)] = -d[(2, 1)];
        d[(1, 1)] = d[(2, 2)] - d[(2, 0)];
        d[(1, 0)] = d[(2, 1)];
        d[(0, 2)] = d[(2, 0)];
        d[(0, 1)] = d[(1, 2)];
        d[(0, 0)] = d[(2, 2)];

        let cos_sum = c1 * c3 - s1 * s3;
        let cos_diff = c1 * c3 + s1 * s3;
        let sin_sum = s1 * c3 + c1 * s3;
        let sin_diff = s1 * c3 - c1 * s3;

        let r = &mut self.r[1];
        r[(1, 1)] = d[(1, 1)];
        r[(2, 1)] = root_two * d[(1, 2)] * c1;
        r[(0, 1)] = root_two * d[(1, 2)] * s1;
        r[(1, 2)] = root_two * d[(2, 1)] * c3;
        r[(1, 0)] = -root_two * d[(2, 1)] * s3;
        r[(2, 2)] = d[(2, 2)] * cos_sum - d[(2, 0)] * cos_diff;
        r[(2, 0)] = -d[(2, 2)] * sin_sum - d[(2, 0)] * sin_diff;
        r[(0, 2)] = d[(2, 2)] * sin_sum - d[(2, 0)] * sin_diff;
        r[(0, 0)] = d[(2, 2)] * cos_sum + d[(2, 0)] * cos_diff;
    }

    /// Apply the block-diagonal `R` to a degree-graded coefficient vector.
    ///
    /// Return
    /// ------
    /// * `R · y`, or [`RotationError::DimensionMismatch`] if `y` does not hold
    ///   `(lmax + 1)²` coefficients.
    pub fn rotate(&self, y: &DVector<S>) -> Result<DVector<S>, RotationError> {
        let expected = (self.lmax + 1) * (self.lmax + 1);
        if y.len() != expected {
            return Err(RotationError::DimensionMismatch {
                expected,
                found: y.len(),
            });
        }
        let mut ry = DVector::zeros(expected);
        for (l, r) in self.r.iter().enumerate() {
            let block = r * y.rows(l * l, 2 * l + 1);
            ry.rows_mut(l * l, 2 * l + 1).copy_from(&block);
        }
        Ok(ry)
    }
}

/// Fill `D[l]` and `R[l]` for `l ≥ 2` from `D[l-1]` and `D[l-2]`.
///
/// Arguments
/// ---------
/// * `l`: degree to fill, at least 2.
/// * `euler`: cosines and sines of the Euler angles.
/// * `tgbet2`: `tan(β/2)` as returned by [`EulerAngles::tan_half_beta`].
/// * `d`, `r`: per-degree matrices; degrees `l-1` and `l-2` of `d` must be filled.
pub(crate) fn fill_degree<S: Real>(
    l: usize,
    euler: &EulerAngles<S>,
    tgbet2: S,
    d: &mut [DMatrix<S>],
    r: &mut [DMatrix<S>],
) {
    debug_assert!(l >= 2);
    let (lower, upper) = d.split_at_mut(l);
    let dl = &mut upper[0];
    let dl1 = &lower[l - 1];
    let dl2 = &lower[l - 2];

    let li = l as isize;
    let one = S::one();
    let half = S::from_f64(0.5);
    let cos_beta = euler.cos_beta;

    // First row by recurrence
    let top = 2 * l;
    dl[(top, top)] = half * dl1[(top - 2, top - 2)] * (one + cos_beta);
    dl[(top, 0)] = half * dl1[(top - 2, 0)] * (one - cos_beta);
    for m in (1 - li..li).rev() {
        let ratio = (S::from_isize(li + m + 1) / S::from_isize(li - m)).sqrt();
        dl[(top, at(m, li))] = -tgbet2 * ratio * dl[(top, at(m + 1, li))];
    }

    // Remaining rows of the upper quarter triangle
    let degree = S::from_usize(l);
    let two_l_minus_one = S::from_usize(2 * l - 1);
    let inv_l_minus_one = one / S::from_usize(l - 1);
    let cos_term = cos_beta * S::from_usize(l * (l - 1));
    let (mut lo, mut hi) = (1 - li, li - 1);
    for mp in (0..li).rev() {
        let row_norm = inv_l_minus_one / S::from_isize((li + mp) * (li - mp)).sqrt();
        let row_prev = S::from_isize((li + mp - 1) * (li - mp - 1)).sqrt() * degree;
        for m in (lo..=hi).rev() {
            let col_norm = one / S::from_isize((li + m) * (li - m)).sqrt();
            let mut term = two_l_minus_one
                * (cos_term - S::from_isize(m * mp))
                * dl1[(at(mp, li - 1), at(m, li - 1))];
            if li - m != 1 && li - mp != 1 {
                let col_prev = S::from_isize((li + m - 1) * (li - m - 1)).sqrt();
                term -= dl2[(at(mp, li - 2), at(m, li - 2))] * row_prev * col_prev;
            }
            dl[(at(mp, li), at(m, li))] = row_norm * col_norm * term;
        }
        lo += 1;
        hi -= 1;
    }

    reflect(dl, li);
    invert(dl, li);
    real_from_complex(dl, &mut r[l], euler, li);
}

/// `D[l; m', m] = (-1)^(m-m') D[l; m, m']` for `m' < m`, `m > 0`.
fn reflect<S: Real>(dl: &mut DMatrix<S>, li: isize) {
    let mut sign = S::one();
    let (mut lo, mut hi) = (-li, li - 1);
    for m in (1..=li).rev() {
        for mp in lo..=hi {
            dl[(at(mp, li), at(m, li))] = sign * dl[(at(m, li), at(mp, li))];
            sign = -sign;
        }
        lo += 1;
        hi -= 1;
    }
}

/// `D[l; m', m] = (-1)^(m-m') D[l; -m', -m]` for the negative-order corner.
fn invert<S: Real>(dl: &mut DMatrix<S>, li: isize) {
    let mut hi = -li;
    for m in (-li..li).rev() {
        let mut sign = -S::one();
        for mp in (-li..=hi).rev() {
            dl[(at(mp, li), at(m, li))] = sign * dl[(at(-mp, li), at(-m, li))];
            sign = -sign;
        }
        hi += 1;
    }
}

/// Combine `D[l]` with the `α`, `γ` phases into the real-harmonic matrix `R[l]`.
///
/// `cos(m'α)`, `sin(m'α)`, `cos(mγ)`, `sin(mγ)` are accumulated by angle
/// addition as the orders increase.
fn real_from_complex<S: Real>(
    dl: &DMatrix<S>,
    rl: &mut DMatrix<S>,
    euler: &EulerAngles<S>,
    li: isize,
) {
    let (c1, s1, c3, s3) = (euler.cos_alpha, euler.sin_alpha, euler.cos_gamma, euler.sin_gamma);
    let root_two = S::from_f64(2.0).sqrt();

    rl[(at(0, li), at(0, li))] = dl[(at(0, li), at(0, li))];

    let (mut cos_mal, mut sin_mal) = (c1, s1);
    let mut sign = -S::one();
    for mp in 1..=li {
        let (mut cos_mga, mut sin_mga) = (c3, s3);
        let aux = root_two * dl[(at(0, li), at(mp, li))];
        rl[(at(mp, li), at(0, li))] = aux * cos_mal;
        rl[(at(-mp, li), at(0, li))] = aux * sin_mal;
        for m in 1..=li {
            let aux = root_two * dl[(at(m, li), at(0, li))];
            rl[(at(0, li), at(m, li))] = aux * cos_mga;
            rl[(at(0, li), at(-m, li))] = -aux * sin_mga;

            let d1 = dl[(at(-mp, li), at(-m, li))];
            let d2 = sign * dl[(at(mp, li), at(-m, li))];
            let cos_sum = cos_mal * cos_mga - sin_mal * sin_mga;
            let cos_diff = cos_mal * cos_mga + sin_mal * sin_mga;
            let sin_sum = sin_mal * cos_mga + cos_mal * sin_mga;
            let sin_diff = sin_mal * cos_mga - cos_mal * sin_mga;
            rl[(at(mp, li), at(m, li))] = d1 * cos_sum + d2 * cos_diff;
            rl[(at(mp, li), at(-m, li))] = -d1 * sin_sum + d2 * sin_diff;
            rl[(at(-mp, li), at(m, li))] = d1 * sin_sum + d2 * sin_diff;
            rl[(at(-mp, li), at(-m, li))] = d1 * cos_sum - d2 * cos_diff;

            let next = cos_mga * c3 - sin_mga * s3;
            sin_mga = sin_mga * c3 + cos_mga * s3;
            cos_mga = next;
        }
        sign = -sign;
        let next = cos_mal * c1 - sin_mal * s1;
        sin_mal = sin_mal * c1 + cos_mal * s1;
        cos_mal = next;
    }
}

//! # Axis-angle → Euler angles
//!
//! The Wigner recursion is parameterized by the ZYZ Euler angles `(α, β, γ)`
//! of the rotation `R = Rz(α) · Ry(β) · Rz(γ)`. This module converts an
//! axis-angle rotation into the cosines and sines of those angles without ever
//! calling an inverse trigonometric function, so the conversion also works on
//! [`Dual`](crate::dual::Dual) numbers and propagates derivatives.
//!
//! ## Branches
//!
//! The conversion branches on `R₂₂ = cos β`:
//!
//! * `cos β ≈ -1`: `β = π`, `α = 0` and `γ` is read from `(R₁₁, R₀₁)`;
//! * `cos β ≈ +1`: `β = 0`, `α = 0` and `γ` is read from `(R₁₁, -R₀₁)`;
//! * otherwise `sin β = +√(1 - cos²β)` (so `β ∈ [0, π]`), `γ` comes from the
//!   normalized `(-R₂₀, R₂₁)` pair and `α` from the normalized `(R₀₂, R₁₂)` pair.
//!
//! "≈" means within the tolerance passed by the caller
//! (see [`tolerance`](crate::scalar::tolerance)).

use nalgebra::{Matrix3, Rotation3, Unit, Vector3};

use crate::scalar::Real;

/// Cosines and sines of the ZYZ Euler angles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EulerAngles<S> {
    pub cos_alpha: S,
    pub sin_alpha: S,
    pub cos_beta: S,
    pub sin_beta: S,
    pub cos_gamma: S,
    pub sin_gamma: S,
}

impl<S: Real> EulerAngles<S> {
    /// The identity rotation.
    pub fn identity() -> Self {
        EulerAngles {
            cos_alpha: S::one(),
            sin_alpha: S::zero(),
            cos_beta: S::one(),
            sin_beta: S::zero(),
            cos_gamma: S::one(),
            sin_gamma: S::zero(),
        }
    }

    /// Half-turn about `x̂` flipping `+ẑ` onto `-ẑ` (`α = 0`, `β = γ = π`).
    pub fn pole_flip() -> Self {
        EulerAngles {
            cos_beta: -S::one(),
            cos_gamma: -S::one(),
            ..Self::identity()
        }
    }

    /// `tan(β/2) = (1 - cos β) / sin β`.
    ///
    /// When `|sin β|` is below `tol` the quotient is `0/0`; `sin β` itself
    /// (≈ 0) is returned instead.
    pub fn tan_half_beta(&self, tol: S) -> S {
        if self.sin_beta.abs() < tol {
            self.sin_beta
        } else {
            (S::one() - self.cos_beta) / self.sin_beta
        }
    }
}

impl EulerAngles<f64> {
    /// Cartesian rotation matrix `Rz(α) · Ry(β) · Rz(γ)`.
    pub fn rotation_matrix(&self) -> Matrix3<f64> {
        rotation_z(self.cos_alpha, self.sin_alpha)
            * rotation_y(self.cos_beta, self.sin_beta)
            * rotation_z(self.cos_gamma, self.sin_gamma)
    }
}

/// Compute the ZYZ Euler angles of a rotation by `θ` about a unit `axis`.
///
/// Arguments
/// ---------
/// * `axis`: direction cosines `(x, y, z)` of the rotation axis, assumed normalized.
///   The zeta frame uses `(cos obl, -sin obl, 0)`.
/// * `cos_theta`, `sin_theta`: cosine and sine of the rotation angle.
/// * `tol`: width of the `cos β ≈ ±1` branches.
///
/// Return
/// ------
/// * The cosines and sines of `(α, β, γ)`. No error is ever raised: degenerate
///   configurations are resolved by branch selection.
///
/// Remarks
/// -------
/// * Only the seven entries of the Rodrigues matrix that the extraction needs are
///   built, analytically.
pub fn euler_from_axis_angle<S: Real>(
    axis: [S; 3],
    cos_theta: S,
    sin_theta: S,
    tol: S,
) -> EulerAngles<S> {
    let [x, y, z] = axis;
    let one_minus_cos = S::one() - cos_theta;

    let ra01 = x * y * one_minus_cos - z * sin_theta;
    let ra02 = x * z * one_minus_cos + y * sin_theta;
    let ra11 = cos_theta + y * y * one_minus_cos;
    let ra12 = y * z * one_minus_cos - x * sin_theta;
    let ra20 = z * x * one_minus_cos - y * sin_theta;
    let ra21 = z * y * one_minus_cos + x * sin_theta;
    let ra22 = cos_theta + z * z * one_minus_cos;

    let one = S::one();
    if ra22 < -one + tol && ra22 > -one - tol {
        EulerAngles {
            cos_alpha: -ra22,
            sin_alpha: one + ra22,
            cos_beta: ra22,
            sin_beta: one + ra22,
            cos_gamma: ra11,
            sin_gamma: ra01,
        }
    } else if ra22 < one + tol && ra22 > one - tol {
        EulerAngles {
            cos_alpha: ra22,
            sin_alpha: one - ra22,
            cos_beta: ra22,
            sin_beta: one - ra22,
            cos_gamma: ra11,
            sin_gamma: -ra01,
        }
    } else {
        let norm_gamma = (ra20 * ra20 + ra21 * ra21).sqrt();
        let norm_alpha = (ra02 * ra02 + ra12 * ra12).sqrt();
        EulerAngles {
            cos_alpha: ra02 / norm_alpha,
            sin_alpha: ra12 / norm_alpha,
            cos_beta: ra22,
            sin_beta: (one - ra22 * ra22).sqrt(),
            cos_gamma: -ra20 / norm_gamma,
            sin_gamma: ra21 / norm_gamma,
        }
    }
}

/// Full Rodrigues rotation matrix of angle `theta` (radians) about `axis`.
pub fn axis_angle_matrix(axis: &Unit<Vector3<f64>>, theta: f64) -> Matrix3<f64> {
    Rotation3::from_axis_angle(axis, theta).into()
}

/// Right-handed rotation about `ŷ` from the cosine and sine of the angle.
fn rotation_y(cos: f64, sin: f64) -> Matrix3<f64> {
    Matrix3::new(cos, 0.0, sin, 0.0, 1.0, 0.0, -sin, 0.0, cos)
}

/// Right-handed rotation about `ẑ` from the cosine and sine of the angle.
fn rotation_z(cos: f64, sin: f64) -> Matrix3<f64> {
    Matrix3::new(cos, -sin, 0.0, sin, cos, 0.0, 0.0, 0.0, 1.0)
}

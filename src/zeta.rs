//! # Zeta-frame rotation matrices
//!
//! A rotation by `θ` about the body's axis has no block-diagonal closed form in
//! the real harmonic basis, but a rotation about `ẑ` does. The *zeta frame* is
//! the frame in which the body's axis is `ẑ`. The map enters it through
//! `RZetaInv`, turns about `ẑ` there, then leaves through `RZeta`.
//!
//! The axis is parameterized by an inclination and an obliquity (degrees).
//! `RZeta` is the rotation by the inclination about the unit vector
//! `(cos obl, -sin obl, 0)`. Its partial derivatives with respect to both
//! angles (per radian) are obtained by running the Wigner recursion on
//! [`Dual<T, 2>`] numbers seeded with unit tangents.
//!
//! ## Branches
//!
//! * `ydeg = 0`: everything is the `1×1` identity.
//! * `|sin inc| < tol`: the axis is `±ẑ`. For `+ẑ` the zeta frame is the body
//!   frame (identity); for `-ẑ` the body is flipped by a half-turn about `x̂`,
//!   the limit of the general path as `inc → 180°` with `obl = 0`. The
//!   derivative matrices are set to zero in both cases, which is only the
//!   limit along the pole and not the true derivative there.
//! * otherwise: the general axis-angle → Euler → recursion path.

use itertools::iproduct;
use nalgebra::DMatrix;
use num_traits::Zero;

use crate::constants::RADEG;
use crate::dual::Dual;
use crate::euler::{euler_from_axis_angle, EulerAngles};
use crate::scalar::Real;
use crate::wigner::WignerMatrices;

/// Dual number carrying derivatives with respect to (inclination, obliquity).
pub type AxisDual<T> = Dual<T, 2>;

/// Tangent component of the inclination.
pub const INC: usize = 0;
/// Tangent component of the obliquity.
pub const OBL: usize = 1;

/// Per-degree zeta-frame matrices and their derivatives.
#[derive(Debug, Clone)]
pub struct ZetaFrame<T: Real> {
    ydeg: usize,
    tol: T,
    /// `D`/`R` scratch; `R` is `RZeta`
    wigner: WignerMatrices<T>,
    wigner_ad: WignerMatrices<AxisDual<T>>,
    r_zeta_inv: Vec<DMatrix<T>>,
    dr_zeta_dinc: Vec<DMatrix<T>>,
    dr_zeta_inv_dinc: Vec<DMatrix<T>>,
    dr_zeta_dobl: Vec<DMatrix<T>>,
    dr_zeta_inv_dobl: Vec<DMatrix<T>>,
}

/// Which construction path the last [`ZetaFrame::update`] took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZetaBranch {
    Trivial,
    NorthPole,
    SouthPole,
    General,
}

impl<T: Real> ZetaFrame<T> {
    /// Allocate the matrices for degrees `0..=ydeg`. They hold zeros until the
    /// first [`ZetaFrame::update`].
    pub fn new(ydeg: usize, tol: T) -> Self {
        let blocks = || {
            (0..=ydeg)
                .map(|l| DMatrix::zeros(2 * l + 1, 2 * l + 1))
                .collect::<Vec<_>>()
        };
        ZetaFrame {
            ydeg,
            tol,
            wigner: WignerMatrices::new(ydeg),
            wigner_ad: WignerMatrices::new(ydeg),
            r_zeta_inv: blocks(),
            dr_zeta_dinc: blocks(),
            dr_zeta_inv_dinc: blocks(),
            dr_zeta_dobl: blocks(),
            dr_zeta_inv_dobl: blocks(),
        }
    }

    /// Recompute every matrix for a new axis.
    ///
    /// Arguments
    /// ---------
    /// * `inc`: inclination of the axis in degrees.
    /// * `obl`: obliquity of the axis in degrees.
    ///
    /// Return
    /// ------
    /// * The branch that was taken.
    pub fn update(&mut self, inc: T, obl: T) -> ZetaBranch {
        let to_radians = T::from_f64(RADEG);
        let inc = AxisDual::variable(inc * to_radians, INC);
        let obl = AxisDual::variable(obl * to_radians, OBL);
        let sin_inc = inc.sin();
        let cos_inc = inc.cos();
        let neg_sin_obl = -obl.sin();
        let cos_obl = obl.cos();

        let branch = if self.ydeg == 0 {
            self.wigner.set_identity();
            ZetaBranch::Trivial
        } else if sin_inc.value().abs() < self.tol {
            if cos_inc.value() > T::zero() {
                self.wigner.set_identity();
                ZetaBranch::NorthPole
            } else {
                self.wigner.build(&EulerAngles::pole_flip(), self.tol);
                ZetaBranch::SouthPole
            }
        } else {
            let tol_ad = AxisDual::constant(self.tol);
            let euler = euler_from_axis_angle(
                [cos_obl, neg_sin_obl, AxisDual::zero()],
                cos_inc,
                sin_inc,
                tol_ad,
            );
            self.wigner_ad.build(&euler, tol_ad);
            ZetaBranch::General
        };

        if branch == ZetaBranch::General {
            self.extract_derivatives();
        } else {
            for block in self
                .dr_zeta_dinc
                .iter_mut()
                .chain(self.dr_zeta_inv_dinc.iter_mut())
                .chain(self.dr_zeta_dobl.iter_mut())
                .chain(self.dr_zeta_inv_dobl.iter_mut())
            {
                block.fill(T::zero());
            }
        }

        for (inv, r) in self.r_zeta_inv.iter_mut().zip(self.wigner.r()) {
            *inv = r.transpose();
        }
        branch
    }

    /// Split the dual-valued `R` into its value and its two partials, then
    /// transpose for the inverse.
    fn extract_derivatives(&mut self) {
        let r_zeta = self.wigner.r_mut();
        for (l, ad) in self.wigner_ad.r().iter().enumerate() {
            let size = 2 * l + 1;
            for (i, j) in iproduct!(0..size, 0..size) {
                let entry = ad[(i, j)];
                r_zeta[l][(i, j)] = entry.value();
                self.dr_zeta_dinc[l][(i, j)] = entry.derivative(INC);
                self.dr_zeta_dobl[l][(i, j)] = entry.derivative(OBL);
            }
            self.dr_zeta_inv_dinc[l] = self.dr_zeta_dinc[l].transpose();
            self.dr_zeta_inv_dobl[l] = self.dr_zeta_dobl[l].transpose();
        }
    }

    pub fn ydeg(&self) -> usize {
        self.ydeg
    }

    pub fn r_zeta(&self) -> &[DMatrix<T>] {
        self.wigner.r()
    }

    pub fn r_zeta_inv(&self) -> &[DMatrix<T>] {
        &self.r_zeta_inv
    }

    pub fn dr_zeta_dinc(&self) -> &[DMatrix<T>] {
        &self.dr_zeta_dinc
    }

    pub fn dr_zeta_inv_dinc(&self) -> &[DMatrix<T>] {
        &self.dr_zeta_inv_dinc
    }

    pub fn dr_zeta_dobl(&self) -> &[DMatrix<T>] {
        &self.dr_zeta_dobl
    }

    pub fn dr_zeta_inv_dobl(&self) -> &[DMatrix<T>] {
        &self.dr_zeta_inv_dobl
    }
}

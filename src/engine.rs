//! # Wigner: rotation engine for degree-graded coefficient matrices
//!
//! [`Wigner`] is the façade that ties the pieces together:
//!
//! 1. **Zeta frame** ([`ZetaFrame`]): `RZeta`, `RZetaInv` and their
//!    derivatives with respect to the axis inclination and obliquity,
//!    recomputed only by [`Wigner::update_axis`].
//! 2. **θ cache** ([`ThetaCache`]): `cos(mθ)`, `sin(mθ)` per coefficient for
//!    the rotation about `ẑ`, refreshed by [`Wigner::compute`] when the angle
//!    changes.
//! 3. **Block products** ([`crate::block`]): the row-vector products
//!    `u = v · M` on coefficient matrices (one sample per row).
//!
//! A rotation by `θ` about the body's axis is `RZetaInv → Rz(θ) → RZeta`,
//! see [`Wigner::left_multiply_r`].
//!
//! ## Typical usage
//!
//! ```rust
//! use nalgebra::DVector;
//! use ylm_rotation::engine::Wigner;
//!
//! // degree-1 map, axis along ŷ (inc = 90°, obl = 0°)
//! let mut wigner = Wigner::<f64>::new(1, 0, 0, 90.0, 0.0).unwrap();
//!
//! // rotate the z-aligned dipole by a quarter turn: it ends up along x
//! let y = DVector::from_vec(vec![0.0, 0.0, 1.0, 0.0]);
//! let ry = wigner.rotate(&y, 0.0, 1.0).unwrap();
//! assert!((ry[3] - 1.0).abs() < 1e-12);
//! ```
//!
//! ## Degrees
//!
//! The engine is built for a map degree `ydeg` plus an extra degree
//! `ufdeg = udeg + fdeg` (limb darkening and filter). The zeta matrices only
//! cover `0..=ydeg`; the rotation about `ẑ` is also available over the
//! augmented range `0..=ydeg + ufdeg`
//! ([`Wigner::left_multiply_rz_augmented`]).
//!
//! ## Errors
//!
//! The numerical path never fails. The public entry points validate their
//! inputs: coefficient counts and output shapes are checked, and a NaN or
//! infinite angle is rejected with a [`RotationError`].

use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::block::{check_shapes, left_multiply_blocks, left_multiply_drz, left_multiply_rz};
use crate::config::WignerConfig;
use crate::constants::num_coefficients;
use crate::rotation_errors::RotationError;
use crate::scalar::{tolerance, Real};
use crate::trig::ThetaCache;
use crate::zeta::ZetaFrame;

#[derive(Debug, Clone)]
pub struct Wigner<T: Real> {
    ydeg: usize,
    udeg: usize,
    fdeg: usize,
    inc: T,
    obl: T,
    zeta: ZetaFrame<T>,
    theta: ThetaCache<T>,
}

fn check_angle<T: Real>(name: &'static str, value: T) -> Result<(), RotationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(RotationError::NonFiniteAngle {
            name,
            value: value.to_f64(),
        })
    }
}

impl<T: Real> Wigner<T> {
    /// Construct a new [`Wigner`] engine and compute the zeta frame of the
    /// initial axis.
    ///
    /// Arguments
    /// ---------
    /// * `ydeg`: degree of the surface map.
    /// * `udeg`: limb-darkening degree.
    /// * `fdeg`: filter degree.
    /// * `inc`: inclination of the rotation axis, in degrees.
    /// * `obl`: obliquity of the rotation axis, in degrees.
    ///
    /// Return
    /// ------
    /// * The engine, or [`RotationError::NonFiniteAngle`] if an angle is NaN or infinite.
    ///
    /// See also
    /// --------
    /// * [`Wigner::from_config`] – Same, from a [`WignerConfig`].
    pub fn new(
        ydeg: usize,
        udeg: usize,
        fdeg: usize,
        inc: T,
        obl: T,
    ) -> Result<Self, RotationError> {
        check_angle("inclination", inc)?;
        check_angle("obliquity", obl)?;

        let mut wigner = Wigner {
            ydeg,
            udeg,
            fdeg,
            inc,
            obl,
            zeta: ZetaFrame::new(ydeg, tolerance::<T>()),
            theta: ThetaCache::new(ydeg + udeg + fdeg),
        };
        let branch = wigner.zeta.update(inc, obl);
        debug!(
            ydeg,
            ufdeg = udeg + fdeg,
            inc = inc.to_f64(),
            obl = obl.to_f64(),
            ?branch,
            "built Wigner rotation engine"
        );
        Ok(wigner)
    }

    pub fn from_config(config: &WignerConfig) -> Result<Self, RotationError> {
        Wigner::new(
            config.ydeg,
            config.udeg,
            config.fdeg,
            T::from_f64(config.inclination),
            T::from_f64(config.obliquity),
        )
    }

    /// Move the rotation axis and recompute the zeta frame.
    ///
    /// The θ cache is invalidated, so the next [`Wigner::compute`] always
    /// refreshes it. On error the engine is left unchanged.
    pub fn update_axis(&mut self, inc: T, obl: T) -> Result<(), RotationError> {
        check_angle("inclination", inc)?;
        check_angle("obliquity", obl)?;

        self.inc = inc;
        self.obl = obl;
        let branch = self.zeta.update(inc, obl);
        self.theta.invalidate();
        debug!(inc = inc.to_f64(), obl = obl.to_f64(), ?branch, "updated rotation axis");
        Ok(())
    }

    /// Refresh the `cos(mθ)`, `sin(mθ)` cache used by the `ẑ` rotation.
    ///
    /// Nothing is recomputed when the pair equals the last one.
    pub fn compute(&mut self, cos_theta: T, sin_theta: T) {
        self.theta.compute(cos_theta, sin_theta);
    }

    /// Rotate a coefficient vector by `θ` about the current axis.
    ///
    /// Arguments
    /// ---------
    /// * `y`: the `(ydeg + 1)²` coefficients.
    /// * `cos_theta`, `sin_theta`: cosine and sine of the rotation angle.
    ///
    /// Return
    /// ------
    /// * The rotated coefficients, or [`RotationError::DimensionMismatch`].
    ///
    /// Remarks
    /// -------
    /// * The θ cache is left holding `(cos θ, -sin θ)`: applying the row-vector
    ///   operator to `yᵗ` with the opposite angle rotates `y` by `+θ`.
    pub fn rotate(
        &mut self,
        y: &DVector<T>,
        cos_theta: T,
        sin_theta: T,
    ) -> Result<DVector<T>, RotationError> {
        let ny = self.ny();
        if y.len() != ny {
            return Err(RotationError::DimensionMismatch {
                expected: ny,
                found: y.len(),
            });
        }
        let v = DMatrix::from_row_slice(1, ny, y.as_slice());
        let mut u = DMatrix::zeros(1, ny);
        self.compute(cos_theta, -sin_theta);
        self.left_multiply_r(&v, &mut u)?;
        Ok(u.row(0).transpose())
    }

    /// [`Wigner::rotate`] applied to every column of `y`.
    pub fn rotate_matrix(
        &mut self,
        y: &DMatrix<T>,
        cos_theta: T,
        sin_theta: T,
    ) -> Result<DMatrix<T>, RotationError> {
        let v = y.transpose();
        let mut u = DMatrix::zeros(v.nrows(), v.ncols());
        self.compute(cos_theta, -sin_theta);
        self.left_multiply_r(&v, &mut u)?;
        Ok(u.transpose())
    }

    /// `u = v · Rz(θ)` over degrees `0..=ydeg`, with θ from the last [`Wigner::compute`].
    pub fn left_multiply_rz(
        &self,
        v: &DMatrix<T>,
        u: &mut DMatrix<T>,
    ) -> Result<(), RotationError> {
        check_shapes(v, u, self.ydeg)?;
        left_multiply_rz(self.theta.cosmt(), self.theta.sinmt(), self.ydeg, v, u);
        Ok(())
    }

    /// `u = v · ∂Rz/∂θ` over degrees `0..=ydeg`.
    pub fn left_multiply_drz(
        &self,
        v: &DMatrix<T>,
        u: &mut DMatrix<T>,
    ) -> Result<(), RotationError> {
        check_shapes(v, u, self.ydeg)?;
        left_multiply_drz(self.theta.cosmt(), self.theta.sinmt(), self.ydeg, v, u);
        Ok(())
    }

    /// `u = v · Rz(θ)` over the augmented degrees `0..=ydeg + udeg + fdeg`.
    pub fn left_multiply_rz_augmented(
        &self,
        v: &DMatrix<T>,
        u: &mut DMatrix<T>,
    ) -> Result<(), RotationError> {
        let lmax = self.ydeg + self.ufdeg();
        check_shapes(v, u, lmax)?;
        left_multiply_rz(self.theta.cosmt(), self.theta.sinmt(), lmax, v, u);
        Ok(())
    }

    /// `u = v · ∂Rz/∂θ` over the augmented degrees.
    pub fn left_multiply_drz_augmented(
        &self,
        v: &DMatrix<T>,
        u: &mut DMatrix<T>,
    ) -> Result<(), RotationError> {
        let lmax = self.ydeg + self.ufdeg();
        check_shapes(v, u, lmax)?;
        left_multiply_drz(self.theta.cosmt(), self.theta.sinmt(), lmax, v, u);
        Ok(())
    }

    fn left_multiply_zeta(
        &self,
        blocks: &[DMatrix<T>],
        v: &DMatrix<T>,
        u: &mut DMatrix<T>,
    ) -> Result<(), RotationError> {
        check_shapes(v, u, self.ydeg)?;
        left_multiply_blocks(blocks, v, u);
        Ok(())
    }

    pub fn left_multiply_rzeta(
        &self,
        v: &DMatrix<T>,
        u: &mut DMatrix<T>,
    ) -> Result<(), RotationError> {
        self.left_multiply_zeta(self.zeta.r_zeta(), v, u)
    }

    pub fn left_multiply_rzeta_inv(
        &self,
        v: &DMatrix<T>,
        u: &mut DMatrix<T>,
    ) -> Result<(), RotationError> {
        self.left_multiply_zeta(self.zeta.r_zeta_inv(), v, u)
    }

    pub fn left_multiply_drzeta_dinc(
        &self,
        v: &DMatrix<T>,
        u: &mut DMatrix<T>,
    ) -> Result<(), RotationError> {
        self.left_multiply_zeta(self.zeta.dr_zeta_dinc(), v, u)
    }

    pub fn left_multiply_drzeta_inv_dinc(
        &self,
        v: &DMatrix<T>,
        u: &mut DMatrix<T>,
    ) -> Result<(), RotationError> {
        self.left_multiply_zeta(self.zeta.dr_zeta_inv_dinc(), v, u)
    }

    pub fn left_multiply_drzeta_dobl(
        &self,
        v: &DMatrix<T>,
        u: &mut DMatrix<T>,
    ) -> Result<(), RotationError> {
        self.left_multiply_zeta(self.zeta.dr_zeta_dobl(), v, u)
    }

    pub fn left_multiply_drzeta_inv_dobl(
        &self,
        v: &DMatrix<T>,
        u: &mut DMatrix<T>,
    ) -> Result<(), RotationError> {
        self.left_multiply_zeta(self.zeta.dr_zeta_inv_dobl(), v, u)
    }

    /// Full rotation about the axis: `u = v · RZetaInv · Rz(θ) · RZeta`.
    ///
    /// θ is whatever the last [`Wigner::compute`] set; before any call the
    /// cache describes `θ = 0`.
    pub fn left_multiply_r(&self, v: &DMatrix<T>, u: &mut DMatrix<T>) -> Result<(), RotationError> {
        check_shapes(v, u, self.ydeg)?;
        let mut zeta_frame = DMatrix::zeros(v.nrows(), v.ncols());
        left_multiply_blocks(self.zeta.r_zeta_inv(), v, &mut zeta_frame);
        let mut turned = DMatrix::zeros(v.nrows(), v.ncols());
        left_multiply_rz(
            self.theta.cosmt(),
            self.theta.sinmt(),
            self.ydeg,
            &zeta_frame,
            &mut turned,
        );
        left_multiply_blocks(self.zeta.r_zeta(), &turned, u);
        Ok(())
    }

    pub fn r_zeta(&self) -> &[DMatrix<T>] {
        self.zeta.r_zeta()
    }

    pub fn r_zeta_inv(&self) -> &[DMatrix<T>] {
        self.zeta.r_zeta_inv()
    }

    pub fn dr_zeta_dinc(&self) -> &[DMatrix<T>] {
        self.zeta.dr_zeta_dinc()
    }

    pub fn dr_zeta_inv_dinc(&self) -> &[DMatrix<T>] {
        self.zeta.dr_zeta_inv_dinc()
    }

    pub fn dr_zeta_dobl(&self) -> &[DMatrix<T>] {
        self.zeta.dr_zeta_dobl()
    }

    pub fn dr_zeta_inv_dobl(&self) -> &[DMatrix<T>] {
        self.zeta.dr_zeta_inv_dobl()
    }

    pub fn theta_cache(&self) -> &ThetaCache<T> {
        &self.theta
    }

    /// Inclination of the current axis, in degrees.
    pub fn inclination(&self) -> T {
        self.inc
    }

    /// Obliquity of the current axis, in degrees.
    pub fn obliquity(&self) -> T {
        self.obl
    }

    pub fn ydeg(&self) -> usize {
        self.ydeg
    }

    pub fn udeg(&self) -> usize {
        self.udeg
    }

    pub fn fdeg(&self) -> usize {
        self.fdeg
    }

    pub fn ufdeg(&self) -> usize {
        self.udeg + self.fdeg
    }

    /// Number of map coefficients, `(ydeg + 1)²`.
    pub fn ny(&self) -> usize {
        num_coefficients(self.ydeg)
    }

    /// Number of augmented coefficients, `(ydeg + ufdeg + 1)²`.
    pub fn n(&self) -> usize {
        num_coefficients(self.ydeg + self.ufdeg())
    }
}

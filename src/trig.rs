//! # Multiple-angle trigonometric cache
//!
//! The rotation about the canonical z-axis only needs `cos(mθ)` and `sin(mθ)`
//! for the orders `m` present in the coefficient vector. They are generated
//! from `cos θ`, `sin θ` with the two-term Chebyshev recurrence
//!
//! ```text
//! cos(nθ) = 2 cos θ · cos((n-1)θ) - cos((n-2)θ)
//! sin(nθ) = 2 cos θ · sin((n-1)θ) - sin((n-2)θ)
//! ```
//!
//! and then laid out per `(l, m)` following the degree-graded coefficient
//! layout (`l² + l + m`), negative orders getting a sign flip on the sine.

use itertools::izip;

use crate::constants::num_coefficients;
use crate::scalar::Real;

/// `cos(nθ)` and `sin(nθ)` for `n = 0..=nmax`.
///
/// At least two terms are always returned so that index 1 holds `(cos θ, sin θ)`.
pub fn multiple_angles<T: Real>(cos_theta: T, sin_theta: T, nmax: usize) -> (Vec<T>, Vec<T>) {
    let len = nmax.max(1) + 1;
    let mut cosnt = vec![T::one(); len];
    let mut sinnt = vec![T::zero(); len];
    fill_multiple_angles(cos_theta, sin_theta, &mut cosnt, &mut sinnt);
    (cosnt, sinnt)
}

fn fill_multiple_angles<T: Real>(cos_theta: T, sin_theta: T, cosnt: &mut [T], sinnt: &mut [T]) {
    let two = T::from_f64(2.0);
    cosnt[0] = T::one();
    sinnt[0] = T::zero();
    cosnt[1] = cos_theta;
    sinnt[1] = sin_theta;
    for n in 2..cosnt.len() {
        cosnt[n] = two * cosnt[n - 1] * cos_theta - cosnt[n - 2];
        sinnt[n] = two * sinnt[n - 1] * cos_theta - sinnt[n - 2];
    }
}

/// Per-coefficient `cos(mθ)`, `sin(mθ)` arrays, keyed by the last `(cos θ, sin θ)`.
#[derive(Debug, Clone)]
pub struct ThetaCache<T> {
    lmax: usize,
    cosnt: Vec<T>,
    sinnt: Vec<T>,
    cosmt: Vec<T>,
    sinmt: Vec<T>,
    key: Option<(T, T)>,
}

impl<T: Real> ThetaCache<T> {
    /// Allocate a cache covering degrees `0..=lmax`.
    ///
    /// Until the first [`ThetaCache::compute`] the arrays describe `θ = 0`
    /// (`cos = 1`, `sin = 0`), but the cache key is empty so the first call
    /// always refreshes them.
    pub fn new(lmax: usize) -> Self {
        let n = num_coefficients(lmax);
        let len = lmax.max(1) + 1;
        ThetaCache {
            lmax,
            cosnt: vec![T::one(); len],
            sinnt: vec![T::zero(); len],
            cosmt: vec![T::one(); n],
            sinmt: vec![T::zero(); n],
            key: None,
        }
    }

    /// Refresh the arrays for a new angle.
    ///
    /// Returns `false` (and does nothing) when `(cos θ, sin θ)` equals the
    /// pair seen by the previous call.
    pub fn compute(&mut self, cos_theta: T, sin_theta: T) -> bool {
        if self.key == Some((cos_theta, sin_theta)) {
            return false;
        }
        self.key = Some((cos_theta, sin_theta));

        fill_multiple_angles(cos_theta, sin_theta, &mut self.cosnt, &mut self.sinnt);

        let mut n = 0;
        for l in 0..=self.lmax {
            for m in (1..=l).rev() {
                self.cosmt[n] = self.cosnt[m];
                self.sinmt[n] = -self.sinnt[m];
                n += 1;
            }
            for (cos_m, sin_m) in izip!(&self.cosnt[..=l], &self.sinnt[..=l]) {
                self.cosmt[n] = *cos_m;
                self.sinmt[n] = *sin_m;
                n += 1;
            }
        }

        tracing::trace!(
            cos_theta = cos_theta.to_f64(),
            sin_theta = sin_theta.to_f64(),
            "refreshed z-rotation trig cache"
        );
        true
    }

    /// Forget the cached angle so that the next [`ThetaCache::compute`] refreshes.
    pub fn invalidate(&mut self) {
        self.key = None;
    }

    pub fn lmax(&self) -> usize {
        self.lmax
    }

    /// Last `(cos θ, sin θ)` pair the arrays were built for.
    pub fn key(&self) -> Option<(T, T)> {
        self.key
    }

    /// `cos(mθ)` for every coefficient index.
    pub fn cosmt(&self) -> &[T] {
        &self.cosmt
    }

    /// `sin(mθ)` for every coefficient index.
    pub fn sinmt(&self) -> &[T] {
        &self.sinmt
    }

    pub fn cosnt(&self) -> &[T] {
        &self.cosnt
    }

    pub fn sinnt(&self) -> &[T] {
        &self.sinnt
    }
}

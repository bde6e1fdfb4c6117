//! # Forward-mode dual numbers
//!
//! [`Dual<T, N>`] pairs a value with a fixed-size tangent vector of `N`
//! partial derivatives. Every arithmetic operation propagates the tangent with
//! the chain rule, so running a computation on duals seeded with unit tangents
//! yields the value and its gradient with respect to the seeded inputs in a
//! single pass.
//!
//! The tangent dimension is a const generic: the zeta-frame update uses
//! `Dual<T, 2>` (inclination, obliquity).
//!
//! ```rust
//! use ylm_rotation::dual::Dual;
//! use ylm_rotation::scalar::Real;
//!
//! // f(x, y) = x·sin(y)
//! let x = Dual::<f64, 2>::variable(2.0, 0);
//! let y = Dual::<f64, 2>::variable(0.5, 1);
//! let f = x * y.sin();
//!
//! assert_eq!(f.value(), 2.0 * 0.5_f64.sin());
//! assert_eq!(f.derivative(0), 0.5_f64.sin());
//! assert_eq!(f.derivative(1), 2.0 * 0.5_f64.cos());
//! ```

use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_traits::{One, Zero};

use crate::scalar::Real;

/// Value plus `N` partial derivatives.
///
/// Equality and ordering only look at the value, the same way branch
/// conditions in the recursion are evaluated on the value alone.
#[derive(Debug, Clone, Copy)]
pub struct Dual<T, const N: usize> {
    value: T,
    tangent: [T; N],
}

impl<T: Real, const N: usize> Dual<T, N> {
    pub fn new(value: T, tangent: [T; N]) -> Self {
        Dual { value, tangent }
    }

    /// A constant: all partial derivatives are zero.
    pub fn constant(value: T) -> Self {
        Dual {
            value,
            tangent: [T::zero(); N],
        }
    }

    /// An independent variable: unit tangent in component `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= N`.
    pub fn variable(value: T, index: usize) -> Self {
        let mut tangent = [T::zero(); N];
        tangent[index] = T::one();
        Dual { value, tangent }
    }

    #[inline]
    pub fn value(&self) -> T {
        self.value
    }

    #[inline]
    pub fn derivatives(&self) -> &[T; N] {
        &self.tangent
    }

    #[inline]
    pub fn derivative(&self, index: usize) -> T {
        self.tangent[index]
    }

    /// Apply a unary function with value `f` and derivative `df` at `self.value`.
    #[inline]
    fn chain(self, f: T, df: T) -> Self {
        Dual {
            value: f,
            tangent: self.tangent.map(|t| t * df),
        }
    }
}

impl<T: Real, const N: usize> PartialEq for Dual<T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Real, const N: usize> PartialOrd for Dual<T, N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<T: Real, const N: usize> Add for Dual<T, N> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Dual {
            value: self.value + rhs.value,
            tangent: std::array::from_fn(|i| self.tangent[i] + rhs.tangent[i]),
        }
    }
}

impl<T: Real, const N: usize> Sub for Dual<T, N> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Dual {
            value: self.value - rhs.value,
            tangent: std::array::from_fn(|i| self.tangent[i] - rhs.tangent[i]),
        }
    }
}

impl<T: Real, const N: usize> Mul for Dual<T, N> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Dual {
            value: self.value * rhs.value,
            tangent: std::array::from_fn(|i| {
                self.tangent[i] * rhs.value + rhs.tangent[i] * self.value
            }),
        }
    }
}

impl<T: Real, const N: usize> Div for Dual<T, N> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        let inv = T::one() / rhs.value;
        let value = self.value * inv;
        Dual {
            value,
            tangent: std::array::from_fn(|i| (self.tangent[i] - value * rhs.tangent[i]) * inv),
        }
    }
}

impl<T: Real, const N: usize> Neg for Dual<T, N> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Dual {
            value: -self.value,
            tangent: self.tangent.map(|t| -t),
        }
    }
}

impl<T: Real, const N: usize> AddAssign for Dual<T, N> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Real, const N: usize> SubAssign for Dual<T, N> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Real, const N: usize> MulAssign for Dual<T, N> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<T: Real, const N: usize> DivAssign for Dual<T, N> {
    #[inline]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl<T: Real, const N: usize> Zero for Dual<T, N> {
    fn zero() -> Self {
        Dual::constant(T::zero())
    }

    fn is_zero(&self) -> bool {
        self.value.is_zero() && self.tangent.iter().all(|t| t.is_zero())
    }
}

impl<T: Real, const N: usize> One for Dual<T, N> {
    fn one() -> Self {
        Dual::constant(T::one())
    }
}

impl<T: Real, const N: usize> Real for Dual<T, N> {
    fn from_f64(x: f64) -> Self {
        Dual::constant(T::from_f64(x))
    }

    fn to_f64(self) -> f64 {
        self.value.to_f64()
    }

    fn sqrt(self) -> Self {
        let root = self.value.sqrt();
        self.chain(root, T::one() / (root + root))
    }

    fn sin(self) -> Self {
        self.chain(self.value.sin(), self.value.cos())
    }

    fn cos(self) -> Self {
        self.chain(self.value.cos(), -self.value.sin())
    }

    fn abs(self) -> Self {
        if self.value < T::zero() {
            -self
        } else {
            self
        }
    }

    fn epsilon() -> Self {
        Dual::constant(T::epsilon())
    }

    fn is_finite(self) -> bool {
        self.value.is_finite() && self.tangent.iter().all(|t| t.is_finite())
    }

    fn from_usize(n: usize) -> Self {
        Dual::constant(T::from_usize(n))
    }

    fn from_isize(n: isize) -> Self {
        Dual::constant(T::from_isize(n))
    }
}

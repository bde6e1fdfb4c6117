//! # Scalar abstraction
//!
//! The rotation engine is written once, generically, over the [`Real`] trait.
//! It is implemented for `f32`, `f64` and for the forward-mode
//! [`Dual`](crate::dual::Dual) number, so the same recursion code produces plain
//! matrices or matrices whose entries carry their partial derivatives.
//!
//! Any type offering the field operations plus `sqrt`, `sin`, `cos` and `abs`
//! can be plugged in (for instance an extended-precision float), as long as it
//! also satisfies the [`nalgebra::Scalar`] requirements (`Copy + Debug +
//! PartialEq + 'static`) so it can be stored in a [`nalgebra::DMatrix`].

use std::fmt::Debug;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_traits::{One, Zero};

/// Real field used by the Wigner recursion.
///
/// Comparisons (`PartialOrd`) are only used for branch selection against the
/// degeneracy tolerance; for dual numbers they compare the value part.
pub trait Real:
    Copy
    + Debug
    + PartialEq
    + PartialOrd
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + 'static
{
    /// Lossy conversion from a double precision literal.
    fn from_f64(x: f64) -> Self;

    /// Value part as a double, used for diagnostics and error reporting.
    fn to_f64(self) -> f64;

    fn sqrt(self) -> Self;

    fn sin(self) -> Self;

    fn cos(self) -> Self;

    fn abs(self) -> Self;

    /// Machine epsilon of the underlying representation.
    fn epsilon() -> Self;

    fn is_finite(self) -> bool;

    /// Convert an integer count (degree, order products...) without going
    /// through a lossy float when the type supports more precision.
    fn from_usize(n: usize) -> Self {
        Self::from_f64(n as f64)
    }

    fn from_isize(n: isize) -> Self {
        Self::from_f64(n as f64)
    }
}

macro_rules! impl_real_for_float {
    ($float:ty) => {
        impl Real for $float {
            #[inline]
            fn from_f64(x: f64) -> Self {
                x as $float
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn sqrt(self) -> Self {
                <$float>::sqrt(self)
            }

            #[inline]
            fn sin(self) -> Self {
                <$float>::sin(self)
            }

            #[inline]
            fn cos(self) -> Self {
                <$float>::cos(self)
            }

            #[inline]
            fn abs(self) -> Self {
                <$float>::abs(self)
            }

            #[inline]
            fn epsilon() -> Self {
                <$float>::EPSILON
            }

            #[inline]
            fn is_finite(self) -> bool {
                <$float>::is_finite(self)
            }
        }
    };
}

impl_real_for_float!(f32);
impl_real_for_float!(f64);

/// Degeneracy tolerance for a scalar type: `TOLERANCE_FACTOR · ε`.
pub fn tolerance<T: Real>() -> T {
    T::from_f64(crate::constants::TOLERANCE_FACTOR) * T::epsilon()
}

//! # Constants and type definitions
//!
//! Unit conversions, numerical tolerances and the angle type aliases shared by
//! the rotation modules.

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

// -------------------------------------------------------------------------------------------------
// Numerical tolerances
// -------------------------------------------------------------------------------------------------

/// Multiple of the machine epsilon used as the degeneracy tolerance.
///
/// Below `TOLERANCE_FACTOR * ε` a sine is treated as zero (pole-aligned axis,
/// `β ∈ {0, π}`) and the recursion switches to its closed-form branches.
pub const TOLERANCE_FACTOR: f64 = 10.0;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;

/// Number of coefficients of a degree-`lmax` expansion, `(lmax + 1)²`.
pub const fn num_coefficients(lmax: usize) -> usize {
    (lmax + 1) * (lmax + 1)
}

/// Index of the `(l, m)` coefficient in a degree-graded vector.
pub const fn coefficient_index(l: usize, m: isize) -> usize {
    (l * l + l).wrapping_add_signed(m)
}

#[cfg(test)]
mod constants_test {
    use super::*;

    #[test]
    fn test_coefficient_layout() {
        assert_eq!(num_coefficients(0), 1);
        assert_eq!(num_coefficients(3), 16);
        assert_eq!(coefficient_index(0, 0), 0);
        assert_eq!(coefficient_index(1, -1), 1);
        assert_eq!(coefficient_index(1, 0), 2);
        assert_eq!(coefficient_index(1, 1), 3);
        assert_eq!(coefficient_index(3, -3), 9);
        assert_eq!(coefficient_index(3, 3), 15);
    }

    #[test]
    fn test_radeg() {
        assert!((180.0 * RADEG - std::f64::consts::PI).abs() < 1e-15);
        assert!((90.0_f64.to_radians() - 90.0 * RADEG).abs() < 1e-15);
    }
}

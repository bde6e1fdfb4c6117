use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum RotationError {
    #[error("Coefficient count mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error(
        "Output shape ({found_rows}, {found_cols}) does not match the input shape ({rows}, {cols})"
    )]
    ShapeMismatch {
        rows: usize,
        cols: usize,
        found_rows: usize,
        found_cols: usize,
    },

    #[error("Non-finite {name}: {value}")]
    NonFiniteAngle { name: &'static str, value: f64 },

    #[error("Rotation axis has zero length")]
    DegenerateAxis,
}

impl PartialEq for RotationError {
    fn eq(&self, other: &Self) -> bool {
        use RotationError::*;
        match (self, other) {
            (
                DimensionMismatch { expected, found },
                DimensionMismatch {
                    expected: e,
                    found: f,
                },
            ) => expected == e && found == f,
            (
                ShapeMismatch {
                    rows,
                    cols,
                    found_rows,
                    found_cols,
                },
                ShapeMismatch {
                    rows: r,
                    cols: c,
                    found_rows: fr,
                    found_cols: fc,
                },
            ) => rows == r && cols == c && found_rows == fr && found_cols == fc,

            // NaN angles compare equal to each other
            (NonFiniteAngle { name, value }, NonFiniteAngle { name: n, value: v }) => {
                name == n && (value == v || (value.is_nan() && v.is_nan()))
            }

            (DegenerateAxis, DegenerateAxis) => true,

            _ => false,
        }
    }
}

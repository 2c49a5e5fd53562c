// src/processing/error.rs
use thiserror::Error;

/// Errors produced by the index computation core.
///
/// Numeric edge cases (0/0, x/0) are not errors; they resolve into the
/// no-data sentinel and never surface here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    #[error("input grids differ in shape: {expected:?} vs {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("invalid output encoding: {0}")]
    InvalidEncoding(String),

    #[error("not enough input bands: required {required}, provided {provided}")]
    NotEnoughBands { required: usize, provided: usize },
}

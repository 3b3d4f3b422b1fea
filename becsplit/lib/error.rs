//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use thiserror::Error;

/// Returned when an operation requiring an array of a particular length (i.e.
/// the total number of grid points) encounters one of a different length.
#[derive(Debug, Error)]
#[error("encountered array with incompatible length; expected {0} but got {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check(expected: usize, got: usize) -> Result<(), Self> {
        (expected == got).then_some(()).ok_or(Self(expected, got))
    }
}

/// Returned from [`Grid`][crate::grid::Grid] construction.
#[derive(Debug, Error)]
pub enum GridError {
    /// Returned when the grid rank is not 1, 2, or 3.
    #[error("grids must have 1, 2, or 3 dimensions; got {0}")]
    BadRank(usize),

    /// Returned when an axis is given zero points.
    #[error("number of grid points must be greater than 0; got {1} on axis {0}")]
    BadPoints(usize, usize),

    /// Returned when an axis is given a non-positive or non-finite spacing.
    #[error("grid spacing must be positive and finite; got {1} on axis {0}")]
    BadSpacing(usize, f64),
}

impl GridError {
    pub(crate) fn check_rank(rank: usize) -> Result<(), Self> {
        (1..=3).contains(&rank).then_some(()).ok_or(Self::BadRank(rank))
    }

    pub(crate) fn check_points(axis: usize, n: usize) -> Result<(), Self> {
        (n != 0).then_some(()).ok_or(Self::BadPoints(axis, n))
    }

    pub(crate) fn check_spacing(axis: usize, h: f64) -> Result<(), Self> {
        (h > 0.0 && h.is_finite()).then_some(())
            .ok_or(Self::BadSpacing(axis, h))
    }
}

/// Returned when setting the state of a wavefunction.
#[derive(Debug, Error)]
pub enum StateError {
    /// [`LengthError`]
    #[error("state length error: {0}")]
    Length(#[from] LengthError),
}

/// Returned from evolution functions.
#[derive(Debug, Error)]
pub enum EvolutionError {
    /// Returned when attempting to renormalize a state whose norm is zero (or
    /// not a number).
    #[error("cannot renormalize a vanishing state; current atom number is {0}")]
    Vanished(f64),

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),
}

impl EvolutionError {
    pub(crate) fn check_norm(current: f64) -> Result<(), Self> {
        (current > 0.0 && current.is_finite()).then_some(())
            .ok_or(Self::Vanished(current))
    }
}

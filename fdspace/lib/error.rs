//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use ndarray as nd;
use ndarray_linalg::error::LinalgError;
use thiserror::Error;

/// Returned when an operation requiring equal-length arrays encounters arrays
/// with unequal length.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible lengths; got {0} and {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<S, A, T, B>(
        a: &nd::ArrayBase<S, nd::Ix1>,
        b: &nd::ArrayBase<T, nd::Ix1>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        let na = a.len();
        let nb = b.len();
        (na == nb).then_some(()).ok_or(Self(na, nb))
    }

    pub(crate) fn check_len<S, A>(a: &nd::ArrayBase<S, nd::Ix1>, n: usize)
        -> Result<(), Self>
    where S: nd::Data<Elem = A>
    {
        let na = a.len();
        (na == n).then_some(()).ok_or(Self(na, n))
    }
}

/// Returned from grid constructors.
#[derive(Debug, Error)]
pub enum GridError {
    /// Returned when a non-positive or non-finite step size is encountered.
    #[error("grid step must be finite and greater than 0; got {0}")]
    BadStep(f64),

    /// Returned when the upper bound of an interval does not exceed the lower
    /// bound.
    #[error("grid bounds must satisfy min < max; got ({0}, {1})")]
    BadBounds(f64, f64),

    /// Returned when a grid would have fewer than two points.
    #[error("grids must have at least 2 points; got {0}")]
    TooFewPoints(usize),

    /// Returned when a two-dimensional grid is given fewer than two
    /// subdivisions along an axis.
    #[error("2D grids need at least 2 subdivisions per axis; got {0}")]
    BadSubdivisions(usize),
}

impl GridError {
    pub(crate) fn check_bounds(min: f64, max: f64) -> Result<(), Self> {
        (min.is_finite() && max.is_finite() && min < max)
            .then_some(())
            .ok_or(Self::BadBounds(min, max))
    }

    pub(crate) fn check_step(step: f64) -> Result<(), Self> {
        (step.is_finite() && step > 0.0)
            .then_some(())
            .ok_or(Self::BadStep(step))
    }

    pub(crate) fn check_points(n: usize) -> Result<(), Self> {
        (n >= 2).then_some(()).ok_or(Self::TooFewPoints(n))
    }

    pub(crate) fn check_subdivisions(n: usize) -> Result<(), Self> {
        (n >= 2).then_some(()).ok_or(Self::BadSubdivisions(n))
    }
}

/// Returned from stationary-state solver functions.
#[derive(Debug, Error)]
pub enum XError {
    /// Returned when a state is requested beyond the number of computed
    /// eigenpairs.
    #[error("requested level {level} from a decomposition of {len} states")]
    BadLevel { level: usize, len: usize },

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),

    /// [`LinalgError`].
    #[error("linalg error: {0}")]
    Linalg(#[from] LinalgError),
}

impl XError {
    pub(crate) fn check_level(level: usize, len: usize) -> Result<(), Self> {
        (level < len).then_some(()).ok_or(Self::BadLevel { level, len })
    }
}

/// Returned from time-dependent wavefunction solver functions.
#[derive(Debug, Error)]
pub enum TError {
    /// Returned when a non-positive or non-finite time step is encountered.
    #[error("time steps must be finite and greater than 0; got {0}")]
    BadTimestep(f64),

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),

    /// [`LinalgError`].
    #[error("linalg error: {0}")]
    Linalg(#[from] LinalgError),
}

impl TError {
    pub(crate) fn check_timestep(dt: f64) -> Result<(), Self> {
        (dt.is_finite() && dt > 0.0)
            .then_some(())
            .ok_or(Self::BadTimestep(dt))
    }
}

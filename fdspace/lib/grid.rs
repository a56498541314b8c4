//! Uniformly spaced coordinate grids in one and two dimensions.
//!
//! Grids double as the index basis for finite-difference operators: the `i`-th
//! point of a [`Grid1D`] is the `i`-th row/column of the matching Hamiltonian,
//! and a [`Grid2D`] is flattened to a single operator index according to an
//! explicit [`IndexOrder`].
//!
//! All grids carry implicit Dirichlet (hard-wall) boundaries: the wavefunction
//! is taken to vanish one step before the first point and one step after the
//! last point.

use ndarray as nd;
use log::warn;
use crate::{
    Arr1,
    error::{ GridError, LengthError },
};

pub type GResult<T> = Result<T, GridError>;

/// A one-dimensional, uniformly spaced coordinate grid.
///
/// Grids are immutable after construction.
#[derive(Clone, Debug)]
pub struct Grid1D {
    // coordinate array
    x: nd::Array1<f64>,
    // grid spacing
    dx: f64,
    // number of points
    n: usize,
}

impl Grid1D {
    /// Create a new `Grid1D` from "range-style" arguments (start, exclusive
    /// end, and a step size).
    ///
    /// The number of points is `ceil((x_max - x_min) / dx)`, so that e.g.
    /// `[-50, 50)` with a step of `0.2` holds 500 points. Quotients within a
    /// few ulps of an integer are taken to be that integer.
    pub fn new_range(x_min: f64, x_max: f64, dx: f64) -> GResult<Self> {
        GridError::check_bounds(x_min, x_max)?;
        GridError::check_step(dx)?;
        let q = (x_max - x_min) / dx;
        let q
            = if (q - q.round()).abs() <= 4.0 * f64::EPSILON * q.abs().max(1.0) {
                q.round()
            } else {
                q.ceil()
            };
        let n = q as usize;
        GridError::check_points(n)?;
        let x: nd::Array1<f64>
            = (0..n).map(|i| x_min + i as f64 * dx).collect();
        Ok(Self { x, dx, n })
    }

    /// Create a new `Grid1D` from "linspace-style" arguments (start, inclusive
    /// end, and an array length).
    pub fn new_linspace(x_min: f64, x_max: f64, n: usize) -> GResult<Self> {
        GridError::check_bounds(x_min, x_max)?;
        GridError::check_points(n)?;
        let x: nd::Array1<f64> = nd::Array1::linspace(x_min, x_max, n);
        let dx = x[1] - x[0];
        Ok(Self { x, dx, n })
    }

    /// Create a new `Grid1D` from a bare coordinate array.
    ///
    /// The spacing is taken from the first two points; a warning is logged if
    /// the array is not uniformly spaced.
    pub fn from_array(x: nd::Array1<f64>) -> GResult<Self> {
        let n = x.len();
        GridError::check_points(n)?;
        let dx = x[1] - x[0];
        GridError::check_step(dx)?;
        let uniform
            = x.iter().zip(x.iter().skip(1))
            .all(|(xk, xkp1)| ((xkp1 - xk) - dx).abs() <= 1e-9 * dx.abs());
        if !uniform {
            warn!("grid::Grid1D::from_array: coordinate array is not uniformly spaced");
        }
        Ok(Self { x, dx, n })
    }

    /// Get a reference to the coordinate array.
    pub fn get_x(&self) -> &nd::Array1<f64> { &self.x }

    /// Get the grid spacing.
    pub fn get_dx(&self) -> f64 { self.dx }

    /// Get the number of grid points.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.n }

    /// Get the positions of the implicit hard walls bounding the grid.
    pub fn walls(&self) -> (f64, f64) {
        (self.x[0] - self.dx, self.x[0] + self.n as f64 * self.dx)
    }
}

/// Maps a two-dimensional lattice site onto a flat operator index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum IndexOrder {
    /// `k = iy * nx + ix`: `x` is the fast index, so that lattice rows of
    /// constant `y` are contiguous.
    #[default]
    RowMajor,
    /// `k = ix * ny + iy`: `y` is the fast index.
    ColumnMajor,
}

/// A two-dimensional, uniformly spaced rectangular lattice.
///
/// Surfaces over the lattice are stored as `(ny, nx)` arrays, i.e. the first
/// axis indexes `y` and the second indexes `x` (the same convention as the
/// arrays returned by [`Self::meshgrid`]).
#[derive(Clone, Debug)]
pub struct Grid2D {
    x: nd::Array1<f64>,
    y: nd::Array1<f64>,
    dx: f64,
    dy: f64,
    nx: usize,
    ny: usize,
}

impl Grid2D {
    /// Create a new `Grid2D` by dividing the intervals `[x_min, x_max)` and
    /// `[y_min, y_max)` into `nx` and `ny` subdivisions.
    pub fn new(
        xbounds: (f64, f64),
        ybounds: (f64, f64),
        subdivisions: (usize, usize),
    ) -> GResult<Self>
    {
        let (nx, ny) = subdivisions;
        GridError::check_bounds(xbounds.0, xbounds.1)?;
        GridError::check_bounds(ybounds.0, ybounds.1)?;
        GridError::check_subdivisions(nx)?;
        GridError::check_subdivisions(ny)?;
        let dx = (xbounds.1 - xbounds.0) / nx as f64;
        let dy = (ybounds.1 - ybounds.0) / ny as f64;
        let x: nd::Array1<f64>
            = (0..nx).map(|i| xbounds.0 + i as f64 * dx).collect();
        let y: nd::Array1<f64>
            = (0..ny).map(|i| ybounds.0 + i as f64 * dy).collect();
        Ok(Self { x, y, dx, dy, nx, ny })
    }

    /// Create a new square `Grid2D` with identical bounds and subdivisions
    /// along both axes.
    pub fn square(bounds: (f64, f64), n: usize) -> GResult<Self> {
        Self::new(bounds, bounds, (n, n))
    }

    /// Get a reference to the `x` coordinate array.
    pub fn get_x(&self) -> &nd::Array1<f64> { &self.x }

    /// Get a reference to the `y` coordinate array.
    pub fn get_y(&self) -> &nd::Array1<f64> { &self.y }

    /// Get the grid spacing along `x`.
    pub fn get_dx(&self) -> f64 { self.dx }

    /// Get the grid spacing along `y`.
    pub fn get_dy(&self) -> f64 { self.dy }

    /// Get the number of points along each axis as `(nx, ny)`.
    pub fn shape(&self) -> (usize, usize) { (self.nx, self.ny) }

    /// Get the total number of lattice sites, `nx * ny`.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.nx * self.ny }

    /// Get the positions of the implicit hard walls along `x`.
    pub fn walls_x(&self) -> (f64, f64) {
        (self.x[0] - self.dx, self.x[0] + self.nx as f64 * self.dx)
    }

    /// Get the positions of the implicit hard walls along `y`.
    pub fn walls_y(&self) -> (f64, f64) {
        (self.y[0] - self.dy, self.y[0] + self.ny as f64 * self.dy)
    }

    /// Return coordinate matrices `(X, Y)` of shape `(ny, nx)` with
    /// `X[[iy, ix]] = x[ix]` and `Y[[iy, ix]] = y[iy]`.
    pub fn meshgrid(&self) -> (nd::Array2<f64>, nd::Array2<f64>) {
        let X = nd::Array2::from_shape_fn(
            (self.ny, self.nx), |(_, ix)| self.x[ix]);
        let Y = nd::Array2::from_shape_fn(
            (self.ny, self.nx), |(iy, _)| self.y[iy]);
        (X, Y)
    }

    /// Return the flat operator index of the lattice site `(ix, iy)`.
    pub fn flat_index(&self, ix: usize, iy: usize, order: IndexOrder) -> usize {
        match order {
            IndexOrder::RowMajor => iy * self.nx + ix,
            IndexOrder::ColumnMajor => ix * self.ny + iy,
        }
    }

    /// Reshape a flat vector over the lattice into a `(ny, nx)` surface.
    pub fn unflatten<S, A>(&self, v: &Arr1<S>, order: IndexOrder)
        -> Result<nd::Array2<A>, LengthError>
    where
        S: nd::Data<Elem = A>,
        A: Clone,
    {
        LengthError::check_len(v, self.len())?;
        let surf
            = nd::Array2::from_shape_fn(
                (self.ny, self.nx),
                |(iy, ix)| v[self.flat_index(ix, iy, order)].clone(),
            );
        Ok(surf)
    }
}

//! Closed-form particle-in-a-box solutions, used as references for the
//! numerical solvers.
//!
//! The box is bounded by the hard walls implied by a grid's Dirichlet boundary
//! conditions (see [`Grid1D::walls`][crate::grid::Grid1D::walls] and
//! [`Grid2D::walls_x`]), so that sampling these functions on grid points
//! reproduces the eigenvectors of the finite-difference operator exactly.

use std::f64::consts::PI;
use ndarray as nd;
use crate::grid::Grid2D;

/// Value of the `n`-th (`n ≥ 1`) normalized box eigenstate at `x`, for a box
/// with its left wall at `lo` and width `len`.
pub fn box_state(x: f64, n: usize, lo: f64, len: f64) -> f64 {
    (2.0 / len).sqrt() * (n as f64 * PI * (x - lo) / len).sin()
}

/// Energy of the `n`-th box eigenstate in the continuum, `(nπ / len)² / 2`.
pub fn box_energy(n: usize, len: f64) -> f64 {
    0.5 * (n as f64 * PI / len).powi(2)
}

/// Exact `n`-th eigenvalue of the three-point kinetic operator on `npts` grid
/// points spaced by `dx`, `(1 - cos(nπ / (npts + 1))) / dx²`.
///
/// Tends to [`box_energy`] for `len = (npts + 1) dx` as `dx → 0`.
pub fn box_energy_fd(n: usize, npts: usize, dx: f64) -> f64 {
    (1.0 - (n as f64 * PI / (npts + 1) as f64).cos()) / dx.powi(2)
}

/// Probability density of the separable box state with quantum numbers
/// `(nx, ny)` on the `(ny, nx)` lattice of `grid`.
///
/// ```
/// use fdspace::{ analytic::box_density_2d, grid::Grid2D };
///
/// let grid = Grid2D::square((-3.0, 3.0), 5).unwrap();
/// let rho = box_density_2d(&grid, (2, 2));
/// let total = rho.sum() * grid.get_dx() * grid.get_dy();
/// assert!((total - 1.0).abs() < 1e-12);
/// ```
pub fn box_density_2d(grid: &Grid2D, quantum_numbers: (usize, usize))
    -> nd::Array2<f64>
{
    let (nx, ny) = quantum_numbers;
    let (xlo, xhi) = grid.walls_x();
    let (ylo, yhi) = grid.walls_y();
    let (X, Y) = grid.meshgrid();
    nd::Zip::from(&X).and(&Y)
        .map_collect(|&x, &y| {
            (box_state(x, nx, xlo, xhi - xlo) * box_state(y, ny, ylo, yhi - ylo))
                .powi(2)
        })
}

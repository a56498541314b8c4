//! Dense finite-difference representations of the Hamiltonian
//! `H = -∇²/2 + V` on one- and two-dimensional grids.
//!
//! The Laplacian is discretized with the three-point (1D) and five-point (2D)
//! stencils. Rows and columns of every matrix are indexed by grid points, and
//! the wavefunction is implicitly zero outside the grid.

use ndarray::{ self as nd, linalg::kron };
use log::debug;
use crate::{
    error::LengthError,
    grid::{ Grid1D, Grid2D, IndexOrder },
    solve::{ Eigenstates, XResult },
};

// three-point second-difference matrix, (I{-1} - 2 I{0} + I{+1}) / dx²
fn second_difference(n: usize, dx: f64) -> nd::Array2<f64> {
    let ondx2 = dx.powi(2).recip();
    let mut D: nd::Array2<f64> = nd::Array2::from_diag_elem(n, -2.0 * ondx2);
    if n > 1 {
        D.slice_mut(nd::s![1..n, 0..n - 1]).diag_mut().fill(ondx2);
        D.slice_mut(nd::s![0..n - 1, 1..n]).diag_mut().fill(ondx2);
    }
    D
}

/// Compute the finite-difference representation of `∇²/2` for `n` points
/// spaced by `dx`.
///
/// The result is symmetric and tridiagonal, with `-1/dx²` on the diagonal and
/// `1/(2 dx²)` on the immediate sub- and super-diagonals. The kinetic energy
/// operator is its negative.
pub fn laplacian_1d(n: usize, dx: f64) -> nd::Array2<f64> {
    0.5 * second_difference(n, dx)
}

/// Compute the finite-difference representation of `∇²/2` over a flattened
/// two-dimensional lattice.
///
/// This is the five-point stencil `(Dxx + Dyy) / 2`, assembled from Kronecker
/// products so that neighbors along the fast axis never wrap across lattice
/// rows. The result has size `nx·ny × nx·ny`.
pub fn laplacian_2d(grid: &Grid2D, order: IndexOrder) -> nd::Array2<f64> {
    let (nx, ny) = grid.shape();
    let Dx = second_difference(nx, grid.get_dx());
    let Dy = second_difference(ny, grid.get_dy());
    let Ix: nd::Array2<f64> = nd::Array2::eye(nx);
    let Iy: nd::Array2<f64> = nd::Array2::eye(ny);
    let L = match order {
        IndexOrder::RowMajor => kron(&Iy, &Dx) + kron(&Dy, &Ix),
        IndexOrder::ColumnMajor => kron(&Dx, &Iy) + kron(&Ix, &Dy),
    };
    0.5 * L
}

// H = -L + diag(V)
fn assemble(mut L: nd::Array2<f64>, V: &nd::Array1<f64>) -> nd::Array2<f64> {
    L.mapv_inplace(|Lij| -Lij);
    let mut H_diag = L.diag_mut();
    H_diag += V;
    L
}

/// Finite-difference Hamiltonian for a one-dimensional grid.
///
/// Constructed once from a grid and a potential; never mutated afterward.
#[derive(Clone, Debug)]
pub struct Hamiltonian1D {
    // dense operator
    H: nd::Array2<f64>,
    // sampled potential
    V: nd::Array1<f64>,
    // grid spacing
    dx: f64,
}

impl Hamiltonian1D {
    /// Build the Hamiltonian by sampling the potential `V` on `grid`.
    pub fn new<F>(grid: &Grid1D, V: F) -> Self
    where F: FnMut(f64) -> f64
    {
        let V: nd::Array1<f64> = grid.get_x().mapv(V);
        Self::build(grid, V)
    }

    /// Build the Hamiltonian from a potential array already sampled on `grid`.
    pub fn from_potential_array(grid: &Grid1D, V: nd::Array1<f64>)
        -> Result<Self, LengthError>
    {
        LengthError::check(grid.get_x(), &V)?;
        Ok(Self::build(grid, V))
    }

    fn build(grid: &Grid1D, V: nd::Array1<f64>) -> Self {
        let n = grid.len();
        let dx = grid.get_dx();
        debug!("hamiltonian: building {n}×{n} 1D operator (dx = {dx})");
        let H = assemble(laplacian_1d(n, dx), &V);
        Self { H, V, dx }
    }

    /// Get a reference to the dense operator.
    pub fn matrix(&self) -> &nd::Array2<f64> { &self.H }

    /// Get a reference to the sampled potential.
    pub fn potential(&self) -> &nd::Array1<f64> { &self.V }

    /// Get the grid spacing.
    pub fn get_dx(&self) -> f64 { self.dx }

    /// Get the dimension of the operator.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.V.len() }

    /// Diagonalize the operator. See [`Eigenstates::solve`].
    pub fn eigenstates(&self) -> XResult<Eigenstates> {
        Eigenstates::solve(&self.H)
    }
}

/// Finite-difference Hamiltonian for a two-dimensional lattice, flattened to a
/// single operator index by an [`IndexOrder`].
#[derive(Clone, Debug)]
pub struct Hamiltonian2D {
    H: nd::Array2<f64>,
    // potential, flattened with `order`
    V: nd::Array1<f64>,
    grid: Grid2D,
    order: IndexOrder,
}

impl Hamiltonian2D {
    /// Build the Hamiltonian by sampling the potential `V(x, y)` on `grid`.
    pub fn new<F>(grid: &Grid2D, order: IndexOrder, mut V: F) -> Self
    where F: FnMut(f64, f64) -> f64
    {
        let (nx, ny) = grid.shape();
        let mut Vflat: nd::Array1<f64> = nd::Array1::zeros(grid.len());
        for (iy, &y) in grid.get_y().iter().enumerate() {
            for (ix, &x) in grid.get_x().iter().enumerate() {
                Vflat[grid.flat_index(ix, iy, order)] = V(x, y);
            }
        }
        debug!(
            "hamiltonian: building {0}×{0} 2D operator on a {nx}×{ny} lattice ({order:?})",
            grid.len(),
        );
        let H = assemble(laplacian_2d(grid, order), &Vflat);
        Self { H, V: Vflat, grid: grid.clone(), order }
    }

    /// Get a reference to the dense operator.
    pub fn matrix(&self) -> &nd::Array2<f64> { &self.H }

    /// Get a reference to the sampled (flattened) potential.
    pub fn potential(&self) -> &nd::Array1<f64> { &self.V }

    /// Get a reference to the underlying lattice.
    pub fn grid(&self) -> &Grid2D { &self.grid }

    /// Get the lattice ordering used to flatten the operator.
    pub fn ordering(&self) -> IndexOrder { self.order }

    /// Get the dimension of the operator.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.grid.len() }

    /// Diagonalize the operator. See [`Eigenstates::solve`].
    pub fn eigenstates(&self) -> XResult<Eigenstates> {
        Eigenstates::solve(&self.H)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use crate::potential;

    #[test]
    fn laplacian_1d_is_symmetric_tridiagonal() {
        let dx = 0.2;
        let n = 12;
        let L = laplacian_1d(n, dx);
        assert_eq!(L.dim(), (n, n));
        for i in 0..n {
            for j in 0..n {
                assert_eq!(L[[i, j]], L[[j, i]]);
                let expected
                    = if i == j {
                        -1.0 / dx.powi(2)
                    } else if i.abs_diff(j) == 1 {
                        1.0 / (2.0 * dx.powi(2))
                    } else {
                        0.0
                    };
                assert_abs_diff_eq!(L[[i, j]], expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn barrier_on_the_diagonal() {
        let grid = Grid1D::new_range(-5.0, 5.0, 0.5).unwrap();
        let h = Hamiltonian1D::new(&grid, potential::barrier(0.3, (-2.0, 2.0)));
        let kin = 1.0 / grid.get_dx().powi(2);
        assert_eq!(h.len(), 20);
        for (k, &xk) in grid.get_x().iter().enumerate() {
            let v = if (-2.0..=2.0).contains(&xk) { 0.3 } else { 0.0 };
            assert_abs_diff_eq!(h.potential()[k], v);
            assert_abs_diff_eq!(h.matrix()[[k, k]], kin + v, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(h.matrix()[[0, 1]], -0.5 * kin, epsilon = 1e-12);
    }

    #[test]
    fn potential_array_length_is_checked() {
        let grid = Grid1D::new_linspace(0.0, 1.0, 10).unwrap();
        assert!(Hamiltonian1D::from_potential_array(&grid, nd::Array1::zeros(9)).is_err());
        assert!(Hamiltonian1D::from_potential_array(&grid, nd::Array1::zeros(10)).is_ok());
    }

    #[test]
    fn laplacian_2d_neighbors_do_not_wrap() {
        let grid = Grid2D::square((-3.0, 3.0), 5).unwrap();
        let dx2 = grid.get_dx().powi(2);
        for order in [IndexOrder::RowMajor, IndexOrder::ColumnMajor] {
            let L = laplacian_2d(&grid, order);
            assert_eq!(L.dim(), (25, 25));
            assert_eq!(L, L.t());
            for iy in 0..5 {
                for ix in 0..5 {
                    let k = grid.flat_index(ix, iy, order);
                    assert_abs_diff_eq!(L[[k, k]], -2.0 / dx2, epsilon = 1e-12);
                    let neighbors: usize
                        = L.row(k).iter().enumerate()
                        .filter(|(j, Lkj)| *j != k && **Lkj != 0.0)
                        .count();
                    let expected
                        = [ix > 0, ix < 4, iy > 0, iy < 4].into_iter()
                        .filter(|b| *b)
                        .count();
                    assert_eq!(neighbors, expected);
                    if ix < 4 {
                        let kr = grid.flat_index(ix + 1, iy, order);
                        assert_abs_diff_eq!(L[[k, kr]], 0.5 / dx2, epsilon = 1e-12);
                    }
                    if iy < 4 {
                        let ku = grid.flat_index(ix, iy + 1, order);
                        assert_abs_diff_eq!(L[[k, ku]], 0.5 / dx2, epsilon = 1e-12);
                    }
                }
            }
        }
    }

    #[test]
    fn potential_follows_ordering() {
        let grid = Grid2D::new((0.0, 4.0), (0.0, 3.0), (4, 3)).unwrap();
        let h = Hamiltonian2D::new(&grid, IndexOrder::ColumnMajor, |x, y| x + 10.0 * y);
        let k = grid.flat_index(3, 1, IndexOrder::ColumnMajor);
        assert_abs_diff_eq!(h.potential()[k], 13.0, epsilon = 1e-12);
        assert_eq!(h.ordering(), IndexOrder::ColumnMajor);
        assert_eq!(h.len(), 12);
    }
}

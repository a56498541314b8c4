//! Stationary states of a finite-difference Hamiltonian, i.e. solutions to the
//! time-independent Schrödinger equation (TISE), by direct diagonalization.

use std::cmp;
use ndarray as nd;
use ndarray_linalg::{ self as la, EighInto };
use log::debug;
use crate::{
    Arr2,
    error::XError,
    grid::{ Grid2D, IndexOrder },
};

pub type XResult<T> = Result<T, XError>;

/// A single solution to the TISE.
///
/// Borrowed from an [`Eigenstates`]; the wavefunction is a column of the
/// eigenvector matrix and has unit Euclidean norm.
#[derive(Clone, Debug)]
pub struct Solution<'a> {
    /// Energy
    pub e: f64,
    /// Wavefunction
    pub wf: nd::ArrayView1<'a, f64>,
}

impl<'a> Solution<'a> {
    /// Compare two `Solution`s by their energy.
    pub fn cmp_energy(&self, other: &Self) -> Option<cmp::Ordering> {
        self.e.partial_cmp(&other.e)
    }

    /// Return the probability density (squared magnitudes) of the wavefunction.
    pub fn density(&self) -> nd::Array1<f64> {
        self.wf.mapv(|qk| qk.powi(2))
    }
}

/// The full eigendecomposition of a real symmetric operator.
///
/// Energies are sorted in ascending order and the `k`-th column of the state
/// matrix is the (unit-norm) eigenvector belonging to the `k`-th energy.
/// Immutable after computation.
#[derive(Clone, Debug)]
pub struct Eigenstates {
    // eigenvalues, ascending
    e: nd::Array1<f64>,
    // eigenvectors as columns
    wf: nd::Array2<f64>,
}

impl Eigenstates {
    /// Compute all eigenpairs of a real symmetric matrix.
    ///
    /// Only the lower triangle of `H` is referenced.
    pub fn solve<S>(H: &Arr2<S>) -> XResult<Self>
    where S: nd::Data<Elem = f64>
    {
        debug!("solve: diagonalizing a {}×{} operator", H.nrows(), H.ncols());
        let (e, wf): (nd::Array1<f64>, nd::Array2<f64>)
            = H.to_owned().eigh_into(la::UPLO::Lower)?;
        Ok(Self { e, wf })
    }

    /// Get the number of eigenpairs.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.e.len() }

    /// Get a reference to the (ascending) energies.
    pub fn energies(&self) -> &nd::Array1<f64> { &self.e }

    /// Get a reference to the matrix of eigenvectors, stored as columns.
    pub fn states(&self) -> &nd::Array2<f64> { &self.wf }

    /// Get the `level`-th energy, counting from 0 for the ground state.
    pub fn energy(&self, level: usize) -> XResult<f64> {
        XError::check_level(level, self.len())?;
        Ok(self.e[level])
    }

    /// Get the `level`-th eigenvector, counting from 0 for the ground state.
    pub fn state(&self, level: usize) -> XResult<nd::ArrayView1<'_, f64>> {
        XError::check_level(level, self.len())?;
        Ok(self.wf.column(level))
    }

    /// Get the `level`-th eigenpair.
    pub fn solution(&self, level: usize) -> XResult<Solution<'_>> {
        Ok(Solution { e: self.energy(level)?, wf: self.state(level)? })
    }

    /// Iterate over all eigenpairs in order of ascending energy.
    pub fn iter(&self) -> impl Iterator<Item = Solution<'_>> + '_ {
        self.e.iter().zip(self.wf.columns())
            .map(|(&e, wf)| Solution { e, wf })
    }

    /// Return the squared magnitudes of the `level`-th eigenvector.
    pub fn density(&self, level: usize) -> XResult<nd::Array1<f64>> {
        Ok(self.state(level)?.mapv(|qk| qk.powi(2)))
    }

    /// Return the squared magnitudes of the `level`-th eigenvector reshaped
    /// onto the `(ny, nx)` lattice of `grid`.
    ///
    /// `order` must be the ordering the diagonalized operator was built with.
    /// Values are squared vector components, so they sum to 1 over the
    /// lattice; divide by `dx * dy` to obtain a continuum probability density.
    pub fn density_surface(&self, level: usize, grid: &Grid2D, order: IndexOrder)
        -> XResult<nd::Array2<f64>>
    {
        let rho = self.density(level)?;
        Ok(grid.unflatten(&rho, order)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use crate::{
        analytic,
        grid::Grid1D,
        hamiltonian::{ Hamiltonian1D, Hamiltonian2D },
        potential,
    };

    // all quantum number pairs (a, b) with 1 ≤ a, b ≤ n
    fn pairs(n: usize) -> impl Iterator<Item = (usize, usize)> {
        (1..=n).flat_map(move |a| (1..=n).map(move |b| (a, b)))
    }

    fn box_grid() -> Grid2D { Grid2D::square((-3.0, 3.0), 5).unwrap() }

    #[test]
    fn spectrum_is_complete_sorted_and_normalized() {
        let grid = box_grid();
        let h = Hamiltonian2D::new(&grid, IndexOrder::RowMajor, potential::zero_2d);
        let states = h.eigenstates().unwrap();
        assert_eq!(states.len(), 25);
        assert_eq!(states.states().dim(), (25, 25));
        assert!(
            states.energies().iter().zip(states.energies().iter().skip(1))
                .all(|(ek, ekp1)| ek <= ekp1)
        );
        for sol in states.iter() {
            let norm: f64 = sol.wf.iter().map(|qk| qk.powi(2)).sum::<f64>().sqrt();
            assert_abs_diff_eq!(norm, 1.0, epsilon = 1e-10);
        }
        assert!(matches!(
            states.energy(25), Err(XError::BadLevel { level: 25, len: 25 })));
    }

    #[test]
    fn spectrum_matches_separable_box() {
        let grid = box_grid();
        let dx = grid.get_dx();
        let mut expected: Vec<f64>
            = pairs(5)
            .map(|(a, b)| {
                analytic::box_energy_fd(a, 5, dx) + analytic::box_energy_fd(b, 5, dx)
            })
            .collect();
        expected.sort_by(|l, r| l.partial_cmp(r).unwrap());
        for order in [IndexOrder::RowMajor, IndexOrder::ColumnMajor] {
            let h = Hamiltonian2D::new(&grid, order, potential::zero_2d);
            let states = h.eigenstates().unwrap();
            for (e, e_exp) in states.energies().iter().zip(&expected) {
                assert_abs_diff_eq!(*e, *e_exp, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn nondegenerate_density_matches_analytic() {
        let grid = box_grid();
        let cell = grid.get_dx() * grid.get_dy();
        // level 0 is the (1, 1) state, level 3 the (2, 2) state
        for (level, qn) in [(0, (1, 1)), (3, (2, 2))] {
            let analytic = analytic::box_density_2d(&grid, qn);
            for order in [IndexOrder::RowMajor, IndexOrder::ColumnMajor] {
                let h = Hamiltonian2D::new(&grid, order, potential::zero_2d);
                let states = h.eigenstates().unwrap();
                let surf = states.density_surface(level, &grid, order).unwrap();
                assert_eq!(surf.dim(), (5, 5));
                assert_abs_diff_eq!(surf.sum(), 1.0, epsilon = 1e-10);
                for (num, ana) in surf.iter().zip(analytic.iter()) {
                    assert_abs_diff_eq!(*num / cell, *ana, epsilon = 1e-10);
                }
            }
        }
    }

    #[test]
    fn harmonic_ground_state() {
        let grid = Grid1D::new_linspace(-10.0, 10.0, 500).unwrap();
        let h = Hamiltonian1D::new(&grid, potential::harmonic(1.0));
        let states = h.eigenstates().unwrap();
        for n in 0..4 {
            assert_abs_diff_eq!(states.energy(n).unwrap(), n as f64 + 0.5, epsilon = 1e-2);
        }
        let sol = states.solution(0).unwrap();
        let rho = sol.density();
        let imax
            = rho.iter().enumerate()
            .max_by(|(_, l), (_, r)| l.partial_cmp(r).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        assert!(grid.get_x()[imax].abs() < 0.05);
    }
}

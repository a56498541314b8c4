#![allow(dead_code, non_snake_case)]

//! Provides functions and higher-level constructs for the solution of the
//! time-dependent and time-independent Schrödinger equations on small,
//! uniformly spaced one- and two-dimensional grids, where the Hamiltonian is
//! represented as a dense finite-difference matrix.
//!
//! Provides implementations for the following numerical routines:
//! - Time-independent:
//!     - Direct diagonalization of the finite-difference Hamiltonian (1D and
//!       2D, with explicit lattice orderings in 2D)
//! - Time-dependent:
//!     - Implicit (backward) Euler
//!     - Crank-Nicolson
//!     - Pseudo-spectral split-step operator
//!
//! Analytic particle-in-a-box solutions are provided as references for the
//! stationary solver.
//!
//! All quantities are in natural units with ħ = m = 1, so that the Hamiltonian
//! reads `H = -∇²/2 + V`. See [`docs`] for theoretical background.
//!
//! ```
//! use fdspace::{ grid::Grid1D, hamiltonian::Hamiltonian1D, potential };
//!
//! let grid = Grid1D::new_linspace(-10.0, 10.0, 400).unwrap();
//! let h = Hamiltonian1D::new(&grid, potential::harmonic(1.0));
//! let states = h.eigenstates().unwrap();
//! assert!((states.energy(0).unwrap() - 0.5).abs() < 1e-2);
//! ```

pub mod error;
pub mod grid;
pub mod potential;
pub mod hamiltonian;
pub mod solve;
pub mod timedep;
pub mod analytic;
pub mod utils;

pub mod docs;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
pub type Arr2<S> = ndarray::ArrayBase<S, ndarray::Ix2>;

//! Theoretical background.
//!
//! # Contents
//! - [Background](#background)
//! - [Units](#units)
//! - [Two dimensions](#two-dimensions)
//! - [Time dependence](#time-dependence)
//!
//! # Background
//! Both the time-independent and time-dependent Schrödinger equations (TISE
//! and TDSE) are governed by the Hamiltonian operator, which in natural units
//! (see [below](#units)) reads
//! ```text
//!       1 ∂²
//! H = - - --- + V(x)
//!       2 ∂x²
//! ```
//! Stationary states are its eigenpairs, *H* *ψ* = *E* *ψ*, and it generates
//! time evolution via *i* ∂*ψ*/∂*t* = *H* *ψ*.
//!
//! Everything in this crate works with *H* as a dense matrix. Assuming a
//! discretization
//! ```text
//! x[i] = x₀ + i δx, i ∊ {0, ..., N - 1}
//! ψ[i] = ψ(x[i])
//! V[i] = V(x[i])
//! ```
//! the second derivative is replaced by the three-point central difference
//! ```text
//!  ∂²ψ       ψ[i + 1] - 2 ψ[i] + ψ[i - 1]
//!  ---  ≈  ------------------------------
//!  ∂x²                 δx²
//! ```
//! which has an error term of *O*(*δx*²). In matrix form,
//! ```text
//! H = - (1/2) D + V
//!
//! D = (I{-1} - 2 I{0} + I{+1}) / δx²
//! V[i, j] = δ[i, j] V(x[i])
//! ```
//! where *I*{*k*} is the *N*×*N* matrix with elements equal to 1 on the *k*-th
//! diagonal and 0 elsewhere. [`laplacian_1d`][crate::hamiltonian::laplacian_1d]
//! returns *D*/2, so that *H* = -*D*/2 + *V*.
//!
//! Truncating *D* at the edges of the grid amounts to setting *ψ* = 0 at the
//! points *x*\[-1\] and *x*\[*N*\]; the grid therefore describes a box with
//! hard walls at these two positions, of width (*N* + 1) *δx*. The eigenpairs
//! of *D* alone are known exactly:
//! ```text
//!                        n π
//! E_n = (1 - cos(-------)) / δx²
//!                 N + 1
//!
//!                 n π (i + 1)
//! ψ_n[i] ∝ sin(-------------)
//!                    N + 1
//! ```
//! which are precisely the particle-in-a-box states sampled at the grid points,
//! with energies tending to (*n* *π* / *L*)² / 2 as *δx* → 0. The functions in
//! [`analytic`][crate::analytic] use this to provide reference solutions.
//!
//! With a matrix in hand, the TISE is solved by a single call to a symmetric
//! eigensolver (LAPACK `?syevd` via `ndarray-linalg`), which returns every
//! eigenpair at once with energies in ascending order. This is only practical
//! for small grids, but it is exact up to the discretization error and requires
//! no initial guesses.
//!
//! # Units
//! All functions in this crate work with the Schrödinger equation in natural
//! (dimensionless) units. Starting from the usual expression of the TISE,
//! ```text
//!    ħ² ∂²
//! - --- --- ψ(x) + V(x) ψ(x) = E ψ(x)
//!   2 m ∂x²
//! ```
//! we choose a characteristic length scale *a* and change variables using
//! *x'* ≡ *x* / *a*. The coefficient of the kinetic term becomes
//! *ħ*²/*m* *a*² ≡ *ε*, which has units of energy; dividing through by it gives
//! ```text
//!     1   ∂²
//! - ---- ------ ψ'(x') + V'(x') ψ'(x') = E' ψ'(x')
//!     2  ∂(x')²
//! ```
//! with *V'* = *V* / *ε* and *E'* = *E* / *ε*. For the TDSE, the remaining
//! coefficient *ħ* / *ε* is a natural time scale *τ* = *m* *a*² / *ħ*, and
//! measuring time in units of *τ* removes it as well. This is the same as
//! setting *ħ* = *m* = 1, and is the convention used throughout.
//!
//! # Two dimensions
//! On a rectangular lattice of *N*<sub>x</sub> × *N*<sub>y</sub> points, the
//! Laplacian separates into second differences along each axis. To represent
//! it as a matrix, the lattice must be flattened to a single index, and the
//! choice of flattening decides where the couplings between neighbors land.
//! With a row-major ordering *k* = *i*<sub>y</sub> *N*<sub>x</sub> +
//! *i*<sub>x</sub>, neighbors along *x* are at *k* ± 1 (except across the end
//! of a row, where there is no coupling at all) and neighbors along *y* are at
//! *k* ± *N*<sub>x</sub>. Both facts are captured by Kronecker products:
//! ```text
//! row-major:     ∇² = I_y ⊗ D_x + D_y ⊗ I_x
//! column-major:  ∇² = D_x ⊗ I_y + I_x ⊗ D_y
//! ```
//! Both orderings describe the same operator up to a permutation, and hence
//! have identical spectra; eigenvectors must be reshaped with the ordering
//! used to build the matrix (see
//! [`Eigenstates::density_surface`][crate::solve::Eigenstates::density_surface]).
//! For a box with no potential the eigenstates are products of the 1D states
//! with energies *E*<sub>*n*<sub>x</sub></sub> +
//! *E*<sub>*n*<sub>y</sub></sub>, so degeneracies appear whenever two pairs of
//! quantum numbers give the same sum.
//!
//! # Time dependence
//! The formal solution of the TDSE for a static Hamiltonian is
//! *ψ*(*t* + *δt*) = exp(-*i* *H* *δt*) *ψ*(*t*), and each scheme here is an
//! approximation to the exponential.
//!
//! The implicit (backward) Euler scheme evaluates the right-hand side of the
//! TDSE at the end of the step:
//! ```text
//! ψ(t + δt) - ψ(t)
//! ---------------- = -i H ψ(t + δt)   ⇒   ψ(t + δt) = (I + i δt H)⁻¹ ψ(t)
//!        δt
//! ```
//! Each eigencomponent is multiplied by 1 / (1 + *i* *E* *δt*), whose modulus is
//! below 1 for every *E* ≠ 0, so the scheme cannot blow up regardless of step
//! size. The price is that it is not unitary: high-energy components are damped
//! and the total norm decays. Renormalizing after each step restores unit norm
//! but not the lost components.
//!
//! The Crank-Nicolson scheme averages the explicit and implicit updates,
//! ```text
//! ψ(t + δt) = (I + i δt H / 2)⁻¹ (I - i δt H / 2) ψ(t)
//! ```
//! which is a Cayley transform of *H* and therefore exactly unitary, with an
//! error of *O*(*δt*³) per step.
//!
//! Finally, the split-step scheme separates the kinetic and potential parts,
//! *H* = *H*<sub>k</sub> + *H*<sub>v</sub>, and sandwiches the kinetic step
//! between two half potential steps,
//! ```text
//!               -i H_v δt/2  -i H_k δt  -i H_v δt/2
//! ψ(t + δt) = [e            e          e           ] ψ(t) + O(δt³)
//! ```
//! The potential term is diagonal in position space and the kinetic term
//! *k*²/2 is diagonal in momentum space, which is reached with the (fast)
//! Fourier transform:
//! ```text
//!        ψ(t, x)
//!           |
//!           V
//!     -i V(x) δt/2
//!    e
//!           |
//!           '--> FFT ---.
//!                       |
//!                       V
//!                  -i k² δt/2
//!                 e
//!                       |
//!           .-- iFFT <--'
//!           |
//!           V
//!     -i V(x) δt/2
//!    e
//!           |
//!           V
//!     ψ(t + δt, x)
//! ```
//! The FFT imposes periodic rather than hard-wall boundaries, so this scheme
//! agrees with the other two only while the wavefunction stays away from the
//! edges of the grid.

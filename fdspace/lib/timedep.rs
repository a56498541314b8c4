//! Provides functions to compute solutions to the 1+1-dimensional
//! (time-dependent) Schrödinger equation (TDSE) for motion in a static,
//! conservative potential.
//!
//! States are complex vectors over the grid of a
//! [`Hamiltonian1D`][crate::hamiltonian::Hamiltonian1D]. Every step renormalizes
//! the state to unit Euclidean norm. In all 2D arrays, the first (or zero-th)
//! axis indexes time.

use std::{ f64::consts::TAU, sync::Arc };
use ndarray as nd;
use ndarray_linalg::InverseInto;
use num_complex::Complex64 as C64;
use rustfft::{ Fft, FftPlanner };
use log::debug;
use crate::{
    Arr1,
    Arr2,
    error::{ LengthError, TError },
    hamiltonian::Hamiltonian1D,
    utils::{ fft_freq, process_inplace, renormalize_l2 },
};

pub type TResult<T> = Result<T, TError>;

/// Sample a Gaussian wavepacket `exp(-(x - x0)² / 2σ²) exp(-i k x)`.
///
/// The packet is not normalized. Note the sign of the phase: for `k < 0` the
/// packet travels toward `+x`.
pub fn gaussian_packet<S>(x: &Arr1<S>, x0: f64, sigma: f64, k: f64)
    -> nd::Array1<C64>
where S: nd::Data<Elem = f64>
{
    x.mapv(|xk| {
        C64::from((-(xk - x0).powi(2) / (2.0 * sigma.powi(2))).exp())
            * C64::cis(-k * xk)
    })
}

// compute I + a H
fn shifted_identity<S>(H: &Arr2<S>, a: C64) -> nd::Array2<C64>
where S: nd::Data<Elem = f64>
{
    let mut A: nd::Array2<C64> = H.mapv(|Hij| a * Hij);
    A.diag_mut().iter_mut().for_each(|Akk| { *Akk += 1.0; });
    A
}

/// Take a single implicit (backward) Euler step.
///
/// Solves `(I + i dt H) q_new = q` by explicit inversion of the left-hand
/// operator and renormalizes the result to unit Euclidean norm. The scheme is
/// stable for any `dt`, but the inversion is repeated on every call; use a
/// [`Propagator`] to take many steps.
pub fn implicit_euler_step<S, T>(H: &Arr2<S>, q: &Arr1<T>, dt: f64)
    -> TResult<nd::Array1<C64>>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = C64>,
{
    TError::check_timestep(dt)?;
    LengthError::check_len(q, H.nrows())?;
    let Ainv = shifted_identity(H, C64::i() * dt).inv_into()?;
    let mut q_new = Ainv.dot(q);
    renormalize_l2(&mut q_new);
    Ok(q_new)
}

/// Time-stepping scheme selector.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Scheme {
    /// `(I + i dt H)⁻¹`: first-order and unconditionally stable, but
    /// dissipative; the renormalization hides the lost norm.
    #[default]
    ImplicitEuler,
    /// `(I + i dt H / 2)⁻¹ (I - i dt H / 2)`: second-order and unitary.
    CrankNicolson,
    /// Strang splitting with the kinetic step taken in momentum space.
    /// Boundaries are periodic rather than hard walls, and the kinetic energy
    /// is the exact `k² / 2` instead of its finite-difference approximation.
    SplitStep,
}

#[derive(Clone)]
enum Step {
    Matrix(nd::Array2<C64>),
    Split {
        // exp(-i V dt / 2)
        phase_v: nd::Array1<C64>,
        // exp(-i k² dt / 2)
        phase_k: nd::Array1<C64>,
        fwd: Arc<dyn Fft<f64>>,
        inv: Arc<dyn Fft<f64>>,
    },
}

/// A one-step time-evolution map for a fixed Hamiltonian and time step.
///
/// All expensive work (matrix inversion, FFT planning) happens once in
/// [`Self::new`]; each [`Self::step`] is then a single matrix-vector product
/// (or pair of FFTs) followed by renormalization.
///
/// ```
/// use fdspace::{
///     grid::Grid1D,
///     hamiltonian::Hamiltonian1D,
///     potential,
///     timedep::{ gaussian_packet, Propagator, Scheme },
///     utils::norm_l2,
/// };
///
/// let grid = Grid1D::new_range(-20.0, 20.0, 0.2).unwrap();
/// let h = Hamiltonian1D::new(&grid, potential::zero);
/// let prop = Propagator::new(&h, 0.4, Scheme::ImplicitEuler).unwrap();
/// let mut q = gaussian_packet(grid.get_x(), -5.0, 1.5, -2.0);
/// for _ in 0..10 {
///     q = prop.step(q).unwrap();
/// }
/// assert!((norm_l2(&q) - 1.0).abs() < 1e-12);
/// ```
#[derive(Clone)]
pub struct Propagator {
    step: Step,
    scheme: Scheme,
    dt: f64,
    n: usize,
}

impl Propagator {
    /// Build the propagator for `h` with time step `dt`.
    pub fn new(h: &Hamiltonian1D, dt: f64, scheme: Scheme) -> TResult<Self> {
        TError::check_timestep(dt)?;
        let n = h.len();
        let step
            = match scheme {
                Scheme::ImplicitEuler => {
                    debug!("timedep: inverting {n}×{n} implicit Euler operator");
                    let P = shifted_identity(h.matrix(), C64::i() * dt)
                        .inv_into()?;
                    Step::Matrix(P)
                },
                Scheme::CrankNicolson => {
                    debug!("timedep: inverting {n}×{n} Crank-Nicolson operator");
                    let Linv = shifted_identity(h.matrix(), C64::i() * dt / 2.0)
                        .inv_into()?;
                    let R = shifted_identity(h.matrix(), -C64::i() * dt / 2.0);
                    Step::Matrix(Linv.dot(&R))
                },
                Scheme::SplitStep => {
                    debug!("timedep: planning {n}-point split-step transforms");
                    let phase_v: nd::Array1<C64>
                        = h.potential().mapv(|Vk| C64::cis(-Vk * dt / 2.0));
                    let phase_k: nd::Array1<C64>
                        = fft_freq(n, h.get_dx())
                        .mapv(|fk| C64::cis(-(TAU * fk).powi(2) * dt / 2.0));
                    let mut planner = FftPlanner::new();
                    let fwd = planner.plan_fft_forward(n);
                    let inv = planner.plan_fft_inverse(n);
                    Step::Split { phase_v, phase_k, fwd, inv }
                },
            };
        Ok(Self { step, scheme, dt, n })
    }

    /// Get the time step.
    pub fn get_dt(&self) -> f64 { self.dt }

    /// Get the time-stepping scheme.
    pub fn scheme(&self) -> Scheme { self.scheme }

    /// Get the length of the states this propagator acts on.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.n }

    /// Get the dense one-step operator, if the scheme has one.
    pub fn operator(&self) -> Option<&nd::Array2<C64>> {
        match &self.step {
            Step::Matrix(P) => Some(P),
            Step::Split { .. } => None,
        }
    }

    /// Advance a state by one time step.
    ///
    /// The state is consumed and its successor, renormalized to unit Euclidean
    /// norm, is returned.
    pub fn step(&self, q: nd::Array1<C64>) -> TResult<nd::Array1<C64>> {
        LengthError::check_len(&q, self.n)?;
        let mut q_new
            = match &self.step {
                Step::Matrix(P) => P.dot(&q),
                Step::Split { phase_v, phase_k, fwd, inv } => {
                    let mut q = q;
                    q.iter_mut().zip(phase_v)
                        .for_each(|(qk, pk)| { *qk *= pk; });
                    process_inplace(fwd.as_ref(), &mut q, 1.0);
                    q.iter_mut().zip(phase_k)
                        .for_each(|(qk, pk)| { *qk *= pk; });
                    process_inplace(inv.as_ref(), &mut q, (self.n as f64).recip());
                    q.iter_mut().zip(phase_v)
                        .for_each(|(qk, pk)| { *qk *= pk; });
                    q
                },
            };
        renormalize_l2(&mut q_new);
        Ok(q_new)
    }

    /// Evolve an initial state for `nsteps` steps, returning every
    /// intermediate state.
    ///
    /// The returned array has shape `(nsteps + 1, n)`; row 0 is `q0` itself.
    pub fn evolve<S>(&self, q0: &Arr1<S>, nsteps: usize)
        -> TResult<nd::Array2<C64>>
    where S: nd::Data<Elem = C64>
    {
        LengthError::check_len(q0, self.n)?;
        let mut q: nd::Array2<C64> = nd::Array2::zeros((nsteps + 1, self.n));
        q.slice_mut(nd::s![0, ..]).assign(q0);
        let mut q_temp: nd::Array1<C64> = q0.to_owned();
        for mut qk in q.axis_iter_mut(nd::Axis(0)).skip(1) {
            q_temp = self.step(q_temp)?;
            qk.assign(&q_temp);
        }
        Ok(q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use crate::{
        grid::Grid1D,
        potential,
        utils::{ expectation_x, norm_l2, normalized_l2, probability },
    };

    fn free_system(dx: f64) -> (Grid1D, Hamiltonian1D) {
        let grid = Grid1D::new_range(-20.0, 20.0, dx).unwrap();
        let h = Hamiltonian1D::new(&grid, potential::zero);
        (grid, h)
    }

    #[test]
    fn single_step_on_full_grid() {
        let grid = Grid1D::new_range(-50.0, 50.0, 0.2).unwrap();
        assert_eq!(grid.len(), 500);
        let h = Hamiltonian1D::new(&grid, potential::zero);
        let q0 = gaussian_packet(grid.get_x(), -10.0, 1.5, -2.0);
        let q1 = implicit_euler_step(h.matrix(), &q0, 0.4).unwrap();
        assert_eq!(q1.len(), 500);
        assert!(q1.iter().all(|qk| !qk.re.is_nan() && !qk.im.is_nan()));
        assert_abs_diff_eq!(norm_l2(&q1), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn step_is_normalized_for_arbitrary_input() {
        let (grid, h) = free_system(0.5);
        let prop = Propagator::new(&h, 0.4, Scheme::ImplicitEuler).unwrap();
        let q: nd::Array1<C64>
            = grid.get_x().mapv(|xk| C64::new(xk.cos() * 3.0, xk.sin() - 0.5));
        let q = prop.step(q).unwrap();
        assert_abs_diff_eq!(norm_l2(&q), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn probability_conserved_over_many_steps() {
        let (grid, h) = free_system(0.2);
        let dx = grid.get_dx();
        let q0 = normalized_l2(&gaussian_packet(grid.get_x(), -5.0, 1.5, -2.0));
        let p0 = probability(&q0, dx);
        for scheme in [Scheme::ImplicitEuler, Scheme::CrankNicolson, Scheme::SplitStep] {
            let prop = Propagator::new(&h, 0.4, scheme).unwrap();
            let q = prop.evolve(&q0, 50).unwrap();
            assert_eq!(q.dim(), (51, grid.len()));
            for qk in q.outer_iter() {
                assert_abs_diff_eq!(probability(&qk, dx), p0, epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn propagator_matches_single_step() {
        let (grid, h) = free_system(0.5);
        let q0 = gaussian_packet(grid.get_x(), 0.0, 2.0, 1.0);
        let prop = Propagator::new(&h, 0.25, Scheme::ImplicitEuler).unwrap();
        let a = prop.step(q0.clone()).unwrap();
        let b = implicit_euler_step(h.matrix(), &q0, 0.25).unwrap();
        a.iter().zip(&b)
            .for_each(|(ak, bk)| assert_abs_diff_eq!((ak - bk).norm(), 0.0, epsilon = 1e-10));
    }

    #[test]
    fn implicit_euler_contracts_and_crank_nicolson_is_unitary() {
        let (grid, h) = free_system(0.2);
        let q0 = normalized_l2(&gaussian_packet(grid.get_x(), -5.0, 1.0, -2.0));
        let euler = Propagator::new(&h, 0.4, Scheme::ImplicitEuler).unwrap();
        let cn = Propagator::new(&h, 0.4, Scheme::CrankNicolson).unwrap();
        let q_euler = euler.operator().unwrap().dot(&q0);
        let q_cn = cn.operator().unwrap().dot(&q0);
        assert!(norm_l2(&q_euler) < 1.0 - 1e-3);
        assert_abs_diff_eq!(norm_l2(&q_cn), 1.0, epsilon = 1e-10);
        let split = Propagator::new(&h, 0.4, Scheme::SplitStep).unwrap();
        assert!(split.operator().is_none());
    }

    #[test]
    fn packets_travel_toward_positive_x_for_negative_k() {
        let (grid, h) = free_system(0.1);
        let x = grid.get_x();
        let q0 = gaussian_packet(x, -5.0, 1.5, -2.0);
        assert_abs_diff_eq!(expectation_x(&q0, x), -5.0, epsilon = 1e-6);

        // free motion at unit mass: ⟨x⟩(t) = x0 + 2 t
        let split = Propagator::new(&h, 0.05, Scheme::SplitStep).unwrap();
        let q = split.evolve(&q0, 20).unwrap();
        assert_abs_diff_eq!(expectation_x(&q.row(20), x), -3.0, epsilon = 0.05);

        let euler = Propagator::new(&h, 0.1, Scheme::ImplicitEuler).unwrap();
        let q = euler.evolve(&q0, 10).unwrap();
        let xmean = expectation_x(&q.row(10), x);
        assert!(-4.0 < xmean && xmean < -2.5);
    }

    #[test]
    fn bad_inputs_are_rejected() {
        let (grid, h) = free_system(0.5);
        assert!(matches!(
            Propagator::new(&h, 0.0, Scheme::ImplicitEuler),
            Err(TError::BadTimestep(_)),
        ));
        let prop = Propagator::new(&h, 0.1, Scheme::CrankNicolson).unwrap();
        let short: nd::Array1<C64> = nd::Array1::zeros(grid.len() - 1);
        assert!(matches!(prop.step(short), Err(TError::Length(_))));
    }
}

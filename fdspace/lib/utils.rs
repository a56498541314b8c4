//! Miscellaneous tools.

use std::ops::Add;
use ndarray::{ self as nd, Ix1, concatenate };
use ndarray_linalg::Scalar;
use num_traits::Zero;
use rustfft::{ self as fft, Fft };
use num_complex::Complex64 as C64;
use crate::error::LengthError;

/// Calculate the Euclidean norm of a state vector, `√(Σ |q_k|²)`.
pub fn norm_l2<S, A>(q: &nd::ArrayBase<S, Ix1>) -> A::Real
where
    S: nd::Data<Elem = A>,
    A: Scalar,
{
    q.iter().map(|qk| qk.square())
        .fold(<A as Scalar>::Real::zero(), <A as Scalar>::Real::add)
        .sqrt()
}

/// Renormalize a state vector in place to unit Euclidean norm.
pub fn renormalize_l2<S, A>(q: &mut nd::ArrayBase<S, Ix1>)
where
    S: nd::DataMut<Elem = A>,
    A: Scalar,
{
    let norm = A::from_real(norm_l2(q));
    q.iter_mut().for_each(|qk| { *qk /= norm; });
}

/// Return a copy of a state vector with unit Euclidean norm.
pub fn normalized_l2<S, A>(q: &nd::ArrayBase<S, Ix1>) -> nd::Array1<A>
where
    S: nd::Data<Elem = A>,
    A: Scalar,
{
    let norm = A::from_real(norm_l2(q));
    q.mapv(|qk| qk / norm)
}

/// Return the probability density `|q_k|²` of a wavefunction.
pub fn density<S, A>(q: &nd::ArrayBase<S, Ix1>) -> nd::Array1<A::Real>
where
    S: nd::Data<Elem = A>,
    A: Scalar,
{
    q.mapv(|qk| qk.square())
}

/// Calculate the total probability `Σ |q_k|² dx` of a wavefunction sampled on
/// a grid with spacing `dx`.
pub fn probability<S, A>(q: &nd::ArrayBase<S, Ix1>, dx: A::Real) -> A::Real
where
    S: nd::Data<Elem = A>,
    A: Scalar,
{
    dx * q.iter().map(|qk| qk.square())
        .fold(<A as Scalar>::Real::zero(), <A as Scalar>::Real::add)
}

/// Calculate the probability `Σ |q_k|² dx` restricted to grid points with
/// coordinates in the closed interval `[bounds.0, bounds.1]`.
///
/// Points beyond the shorter of the two arrays are ignored.
pub fn region_probability<S, T, A>(
    q: &nd::ArrayBase<S, Ix1>,
    x: &nd::ArrayBase<T, Ix1>,
    bounds: (f64, f64),
    dx: f64,
) -> f64
where
    S: nd::Data<Elem = A>,
    T: nd::Data<Elem = f64>,
    A: Scalar<Real = f64>,
{
    let (lo, hi) = bounds;
    dx * q.iter().zip(x)
        .filter(|(_, xk)| (lo..=hi).contains(*xk))
        .map(|(qk, _)| qk.square())
        .sum::<f64>()
}

/// Calculate the probabilities `Σ |q_k|² dx` on either side of the support of
/// a sampled potential `v`, i.e. over the grid points before its first
/// non-zero sample and after its last one.
///
/// Points are classified by index rather than by coordinate, so samples lying
/// on the edge of a barrier fall on the side the sampled potential puts them.
/// Returns `Ok(None)` if `v` vanishes everywhere.
pub fn split_probability<S, T, A>(
    q: &nd::ArrayBase<S, Ix1>,
    v: &nd::ArrayBase<T, Ix1>,
    dx: f64,
) -> Result<Option<(f64, f64)>, LengthError>
where
    S: nd::Data<Elem = A>,
    T: nd::Data<Elem = f64>,
    A: Scalar<Real = f64>,
{
    LengthError::check(q, v)?;
    let Some(first) = v.iter().position(|vk| *vk != 0.0) else {
        return Ok(None);
    };
    let last = v.iter().rposition(|vk| *vk != 0.0).unwrap_or(first);
    let (before, after)
        = q.iter().enumerate()
        .fold((0.0, 0.0), |(before, after), (k, qk)| {
            if k < first {
                (before + qk.square(), after)
            } else if k > last {
                (before, after + qk.square())
            } else {
                (before, after)
            }
        });
    Ok(Some((dx * before, dx * after)))
}

/// Calculate the position expectation value `⟨x⟩` of a (not necessarily
/// normalized) wavefunction.
pub fn expectation_x<S, T, A>(q: &nd::ArrayBase<S, Ix1>, x: &nd::ArrayBase<T, Ix1>)
    -> f64
where
    S: nd::Data<Elem = A>,
    T: nd::Data<Elem = f64>,
    A: Scalar<Real = f64>,
{
    let (num, den)
        = q.iter().zip(x)
        .fold((0.0, 0.0), |(num, den), (qk, xk)| {
            let rho = qk.square();
            (num + rho * xk, den + rho)
        });
    num / den
}

/// Generate an array of frequency-space coordinates to accompany a FFT of `n`
/// points for sampling interval `dt`.
pub fn fft_freq(n: usize, dt: f64) -> nd::Array1<f64> {
    if n % 2 == 0 {
        let fp: nd::Array1<f64>
            = (0..n / 2)
            .map(|k| k as f64 / (n as f64 * dt))
            .collect();
        let fm: nd::Array1<f64>
            = (1..n / 2 + 1).rev()
            .map(|k| -(k as f64) / (n as f64 * dt))
            .collect();
        concatenate!(nd::Axis(0), fp, fm)
    } else {
        let fp: nd::Array1<f64>
            = (0..(n + 1) / 2)
            .map(|k| k as f64 / (n as f64 * dt))
            .collect();
        let fm: nd::Array1<f64>
            = (1..(n + 1) / 2).rev()
            .map(|k| -(k as f64) / (n as f64 * dt))
            .collect();
        concatenate!(nd::Axis(0), fp, fm)
    }
}

// run a planned transform over an array of any memory layout, scaling the
// result by `scale`
pub(crate) fn process_inplace<S>(
    plan: &dyn Fft<f64>,
    x: &mut nd::ArrayBase<S, Ix1>,
    scale: f64,
)
where S: nd::DataMut<Elem = C64>
{
    let mut buf: Vec<C64> = x.to_vec();
    plan.process(&mut buf);
    x.iter_mut().zip(buf)
        .for_each(|(xk, bk)| { *xk = bk * scale; });
}

/// Perform the one-dimensional, complex-valued FFT in place.
pub fn fft_inplace<S>(f: &mut nd::ArrayBase<S, Ix1>)
where S: nd::DataMut<Elem = C64>
{
    let n: usize = f.len();
    let mut plan = fft::FftPlanner::new();
    let fft_plan = plan.plan_fft_forward(n);
    process_inplace(fft_plan.as_ref(), f, 1.0);
}

/// Perform the one-dimensional, complex-valued inverse FFT in place.
pub fn ifft_inplace<S>(x: &mut nd::ArrayBase<S, Ix1>)
where S: nd::DataMut<Elem = C64>
{
    let n: usize = x.len();
    let mut plan = fft::FftPlanner::new();
    let ifft_plan = plan.plan_fft_inverse(n);
    process_inplace(ifft_plan.as_ref(), x, (n as f64).recip());
}

//! Common potential-energy functions.
//!
//! Potentials are plain closures, sampled onto a grid when a Hamiltonian is
//! built (see [`Hamiltonian1D::new`][crate::hamiltonian::Hamiltonian1D::new]
//! and [`Hamiltonian2D::new`][crate::hamiltonian::Hamiltonian2D::new]). Any
//! `Fn(f64) -> f64` (or `Fn(f64, f64) -> f64` in 2D) can be used in their
//! place.

/// Null potential.
pub fn zero(_x: f64) -> f64 { 0.0 }

/// Null potential in two dimensions.
pub fn zero_2d(_x: f64, _y: f64) -> f64 { 0.0 }

/// Rectangular barrier of height `height` over the closed interval
/// `[bounds.0, bounds.1]`, zero elsewhere.
pub fn barrier(height: f64, bounds: (f64, f64)) -> impl Fn(f64) -> f64 {
    let (lo, hi) = bounds;
    move |x| if (lo..=hi).contains(&x) { height } else { 0.0 }
}

/// Harmonic potential `k x² / 2`.
pub fn harmonic(k: f64) -> impl Fn(f64) -> f64 {
    move |x| 0.5 * k * x.powi(2)
}

/// Isotropic harmonic potential `k (x² + y²) / 2`.
pub fn harmonic_2d(k: f64) -> impl Fn(f64, f64) -> f64 {
    move |x, y| 0.5 * k * (x.powi(2) + y.powi(2))
}

/// Periodic array of square wells, `height * |round(sin(freq * x))|`.
pub fn square_wave(height: f64, freq: f64) -> impl Fn(f64) -> f64 {
    move |x| height * (freq * x).sin().round().abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn barrier_bounds_are_inclusive() {
        let v = barrier(0.3, (-2.0, 2.0));
        assert_eq!(v(-2.0), 0.3);
        assert_eq!(v(0.0), 0.3);
        assert_eq!(v(2.0), 0.3);
        assert_eq!(v(-2.2), 0.0);
        assert_eq!(v(2.2), 0.0);
    }

    #[test]
    fn square_wave_levels() {
        let v = square_wave(1.5, 3.0);
        assert_eq!(v(0.0), 0.0);
        assert_eq!(v(std::f64::consts::FRAC_PI_6), 1.5);
        assert_eq!(v(-std::f64::consts::FRAC_PI_6), 1.5);
    }
}

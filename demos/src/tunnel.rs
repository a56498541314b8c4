//! A Gaussian wavepacket scattering off a finite potential barrier in 1D,
//! evolved with the implicit Euler scheme and rendered as an animated GIF.

use std::path::PathBuf;
use log::{ info, LevelFilter };
use ndarray as nd;
use num_complex::Complex64 as C64;
use simple_logger::SimpleLogger;
use whooie::{ mkdir, write_npz };
use fdspace::{
    grid::Grid1D,
    hamiltonian::Hamiltonian1D,
    potential,
    timedep::{ gaussian_packet, Propagator, Scheme },
    utils::{ probability, split_probability },
};
use demos::plot::{ AnimationConfig, DensityAnimation };

// grid
const X_MIN: f64 = -50.0;
const X_MAX: f64 = 50.0;
const DX: f64 = 0.2;

// barrier
const BARRIER_HEIGHT: f64 = 0.3;
const BARRIER: (f64, f64) = (-2.0, 2.0);

// initial packet; negative wavenumber travels toward +x
const X0: f64 = -10.0;
const SIGMA: f64 = 1.5;
const K: f64 = -2.0;

// evolution
const DT: f64 = 0.4;
const FRAMES: usize = 200;

// rendering
const FRAME_DELAY: u32 = 40; // ms
const SIZE: (u32, u32) = (1200, 900);
const YLIM: (f64, f64) = (0.0, 0.075);

fn main() -> anyhow::Result<()> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    let grid = Grid1D::new_range(X_MIN, X_MAX, DX)?;
    let x = grid.get_x();
    info!("grid: {} points on [{X_MIN}, {X_MAX}) with dx = {DX}", grid.len());

    let h = Hamiltonian1D::new(&grid, potential::barrier(BARRIER_HEIGHT, BARRIER));
    let prop = Propagator::new(&h, DT, Scheme::ImplicitEuler)?;
    let q0: nd::Array1<C64> = gaussian_packet(x, X0, SIGMA, K);

    let outdir = PathBuf::from("output");
    mkdir!(outdir);

    let config = AnimationConfig {
        path: outdir.join("tunnel.gif"),
        size: SIZE,
        frame_delay: FRAME_DELAY,
        xlim: (x[0], x[x.len() - 1]),
        ylim: YLIM,
        shade: Some(BARRIER),
        caption: format!(
            "Tunnel effect (with Euler Implicit method), potential = {}",
            BARRIER_HEIGHT,
        ),
        x_desc: "Horizontal position".into(),
        y_desc: "Wave function".into(),
    };
    info!("rendering {FRAMES} frames to {}", config.path.display());
    let mut anim = DensityAnimation::new(config)?;
    let (q, rho) = anim.run(x, FRAMES, q0, |q| prop.step(q))?;

    // split at the sampled barrier, not at its nominal bounds
    let total = probability(&q, DX);
    let (reflected, transmitted)
        = split_probability(&q, h.potential(), DX)?
        .map(|(r, t)| (r / total, t / total))
        .ok_or_else(|| anyhow::anyhow!("barrier covers no grid points"))?;
    info!("after t = {:.1}:", DT * FRAMES as f64);
    info!("  transmitted probability: {transmitted:.4}");
    info!("  reflected probability:   {reflected:.4}");

    let t: nd::Array1<f64>
        = (1..=FRAMES).map(|k| k as f64 * DT).collect();
    write_npz!(
        outdir.join("tunnel.npz"),
        arrays: {
            "x" => x,
            "v" => h.potential(),
            "t" => &t,
            "rho" => &rho,
            "q" => &q,
        }
    );
    Ok(())
}

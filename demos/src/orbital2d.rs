//! Stationary states of a particle in a 2D square box: diagonalize the
//! finite-difference Hamiltonian and compare one level against the analytic
//! solution as a pair of surface plots.

use std::path::PathBuf;
use log::{ info, LevelFilter };
use ndarray as nd;
use simple_logger::SimpleLogger;
use whooie::{ mkdir, write_npz };
use fdspace::{
    analytic,
    grid::{ Grid2D, IndexOrder },
    hamiltonian::Hamiltonian2D,
    potential,
};
use demos::plot::surface;

const BOUNDS: (f64, f64) = (-3.0, 3.0);
const N: usize = 5; // subdivisions per axis
const ORDER: IndexOrder = IndexOrder::RowMajor;

// (1, 1), (1, 2), (2, 1) come first; level 3 is the non-degenerate (2, 2)
const LEVEL: usize = 3;
const QUANTUM_NUMBERS: (usize, usize) = (2, 2);

const SIZE: (u32, u32) = (1000, 800);

fn main() -> anyhow::Result<()> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    let grid = Grid2D::square(BOUNDS, N)?;
    let (dx, dy) = (grid.get_dx(), grid.get_dy());
    info!("lattice: {N}×{N} points on {BOUNDS:?}², {:?} ordering", ORDER);

    let h = Hamiltonian2D::new(&grid, ORDER, potential::zero_2d);
    let states = h.eigenstates()?;
    info!("lowest energies: {:.4}", states.energies().slice(nd::s![..LEVEL + 2]));

    let (nx, ny) = QUANTUM_NUMBERS;
    let (xlo, xhi) = grid.walls_x();
    let (ylo, yhi) = grid.walls_y();
    let e_num = states.energy(LEVEL)?;
    let e_fd
        = analytic::box_energy_fd(nx, N, dx) + analytic::box_energy_fd(ny, N, dy);
    let e_cont
        = analytic::box_energy(nx, xhi - xlo) + analytic::box_energy(ny, yhi - ylo);
    info!("level {LEVEL} vs. analytic {QUANTUM_NUMBERS:?}:");
    info!("  numerical energy:         {e_num:.6}");
    info!("  discrete analytic energy: {e_fd:.6}");
    info!("  continuum energy:         {e_cont:.6}");

    // eigenvector components sum to 1; scale to a continuum density
    let rho_num: nd::Array2<f64>
        = states.density_surface(LEVEL, &grid, ORDER)? / (dx * dy);
    let rho_ana: nd::Array2<f64> = analytic::box_density_2d(&grid, QUANTUM_NUMBERS);
    let dev
        = (&rho_num - &rho_ana).iter()
        .fold(0.0_f64, |acc, d| acc.max(d.abs()));
    info!("  max density deviation:    {dev:.3e}");

    let outdir = PathBuf::from("output");
    mkdir!(outdir);
    surface(
        outdir.join("orbital2d_analytic.png"),
        &grid,
        &rho_ana,
        &format!("Analytic {QUANTUM_NUMBERS:?} density"),
        SIZE,
    )?;
    surface(
        outdir.join("orbital2d_numeric.png"),
        &grid,
        &rho_num,
        &format!("Numerical density, level {LEVEL}"),
        SIZE,
    )?;
    info!("wrote surface plots to {}", outdir.display());

    let (xx, yy) = grid.meshgrid();
    write_npz!(
        outdir.join("orbital2d.npz"),
        arrays: {
            "x" => grid.get_x(),
            "y" => grid.get_y(),
            "xx" => &xx,
            "yy" => &yy,
            "e" => states.energies(),
            "rho_numeric" => &rho_num,
            "rho_analytic" => &rho_ana,
        }
    );
    Ok(())
}

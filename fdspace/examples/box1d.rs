use std::{ f64::consts::TAU, path::PathBuf };
use ndarray as nd;
use num_complex::Complex64 as C64;
use whooie::write_npz;
use fdspace::{
    grid::Grid1D,
    hamiltonian::Hamiltonian1D,
    potential,
    timedep::{ Propagator, Scheme },
    utils::expectation_x,
};

// stationary states of the harmonic oscillator, and the sloshing of a
// displaced ground state in the unshifted trap

fn main() {
    const K: f64 = 1.0; // spring constant; ω = √K
    const NLEVELS: usize = 6;
    const SHIFT: f64 = 2.5; // initial displacement
    const NSTEPS: usize = 400;

    // the grid must extend well past the classical turning points for the
    // box walls to go unnoticed
    let grid = Grid1D::new_linspace(-10.0, 10.0, 500).unwrap();
    let x = grid.get_x();
    let omega = K.sqrt();

    // diagonalize and compare against (n + 1/2) ω
    let h = Hamiltonian1D::new(&grid, potential::harmonic(K));
    let states = h.eigenstates().unwrap();
    for n in 0..NLEVELS {
        println!(
            "n = {n}: expected {:.5}, computed {:.5}",
            omega * (n as f64 + 0.5),
            states.energy(n).unwrap(),
        );
    }
    let wfs: nd::Array2<f64>
        = states.states().slice(nd::s![.., ..NLEVELS]).t().to_owned();

    // the ground state of a trap displaced to -SHIFT is a coherent state of
    // the unshifted trap
    let h_sh = Hamiltonian1D::new(&grid, |x| potential::harmonic(K)(x + SHIFT));
    let gs_sh: nd::Array1<f64>
        = h_sh.eigenstates().unwrap().state(0).unwrap().to_owned();
    let q0: nd::Array1<C64> = gs_sh.mapv(C64::from);

    // evolve for two periods with both matrix schemes
    let dt = 2.0 * TAU / omega / NSTEPS as f64;
    let t: nd::Array1<f64> = nd::Array1::linspace(0.0, dt * NSTEPS as f64, NSTEPS + 1);
    let cn = Propagator::new(&h, dt, Scheme::CrankNicolson).unwrap();
    let q_cn: nd::Array2<C64> = cn.evolve(&q0, NSTEPS).unwrap();
    let ie = Propagator::new(&h, dt, Scheme::ImplicitEuler).unwrap();
    let q_ie: nd::Array2<C64> = ie.evolve(&q0, NSTEPS).unwrap();

    // ⟨x⟩ should follow -SHIFT cos(ωt); implicit Euler damps the oscillation
    let x_cn: nd::Array1<f64>
        = q_cn.outer_iter().map(|qt| expectation_x(&qt, x)).collect();
    let x_ie: nd::Array1<f64>
        = q_ie.outer_iter().map(|qt| expectation_x(&qt, x)).collect();
    println!("⟨x⟩ after one period: CN {:.4}, implicit Euler {:.4} (expected {:.4})",
        x_cn[NSTEPS / 2], x_ie[NSTEPS / 2], -SHIFT);

    write_npz!(
        PathBuf::from("box1d.npz"),
        arrays: {
            "x" => x,
            "v" => h.potential(),
            "e" => states.energies(),
            "wf" => &wfs,
            "gs_sh" => &gs_sh,
            "t" => &t,
            "q_cn" => &q_cn,
            "q_ie" => &q_ie,
            "x_cn" => &x_cn,
            "x_ie" => &x_ie,
        }
    );
}

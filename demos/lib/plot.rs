//! Bitmap rendering with [`plotters`]: an animated line plot of a 1D density
//! and static 3D surfaces over a 2D lattice.
//!
//! Everything is written to image files (GIF for animations, PNG for
//! surfaces); no window is ever opened. View the files under `output/` once a
//! program has finished.

use std::{ ops::Range, path::{ Path, PathBuf } };
use anyhow::ensure;
use log::info;
use ndarray as nd;
use num_complex::Complex64 as C64;
use plotters::{ coord::Shift, prelude::* };
use fdspace::{ grid::Grid2D, utils::density };

/// Settings for a [`DensityAnimation`].
#[derive(Clone, Debug)]
pub struct AnimationConfig {
    /// Output path of the animated GIF.
    pub path: PathBuf,
    /// Frame size in pixels.
    pub size: (u32, u32),
    /// Delay between frames in milliseconds.
    pub frame_delay: u32,
    /// Horizontal axis limits.
    pub xlim: (f64, f64),
    /// Vertical axis limits.
    pub ylim: (f64, f64),
    /// Interval to shade in the background of every frame, e.g. the extent of
    /// a potential barrier.
    pub shade: Option<(f64, f64)>,
    /// Plot title; omitted if empty.
    pub caption: String,
    /// Horizontal axis label; omitted if empty.
    pub x_desc: String,
    /// Vertical axis label; omitted if empty.
    pub y_desc: String,
}

/// Frame-by-frame writer for an animated probability density.
pub struct DensityAnimation {
    root: DrawingArea<BitMapBackend<'static>, Shift>,
    config: AnimationConfig,
    frames: usize,
}

impl DensityAnimation {
    /// Open the output file for writing.
    pub fn new(config: AnimationConfig) -> anyhow::Result<Self> {
        let root
            = BitMapBackend::gif(&config.path, config.size, config.frame_delay)?
            .into_drawing_area();
        Ok(Self { root, config, frames: 0 })
    }

    /// Get the number of frames drawn so far.
    pub fn frames(&self) -> usize { self.frames }

    /// Draw a single frame showing the density `rho` over the coordinates `x`.
    pub fn draw_frame(&mut self, x: &nd::Array1<f64>, rho: &nd::Array1<f64>)
        -> anyhow::Result<()>
    {
        ensure!(
            x.len() == rho.len(),
            "coordinate and density arrays differ in length: {} and {}",
            x.len(), rho.len(),
        );
        let cfg = &self.config;
        let (x0, x1) = cfg.xlim;
        let (y0, y1) = cfg.ylim;
        self.root.fill(&WHITE)?;
        let mut builder = ChartBuilder::on(&self.root);
        builder.margin(20).x_label_area_size(40).y_label_area_size(40);
        if !cfg.caption.is_empty() {
            builder.caption(&cfg.caption, ("sans-serif", 28));
        }
        let mut chart = builder.build_cartesian_2d(x0..x1, y0..y1)?;
        // axes only; tick labels are hidden
        let mut mesh = chart.configure_mesh();
        mesh.disable_mesh().x_labels(0).y_labels(0);
        if !cfg.x_desc.is_empty() { mesh.x_desc(cfg.x_desc.as_str()); }
        if !cfg.y_desc.is_empty() { mesh.y_desc(cfg.y_desc.as_str()); }
        mesh.draw()?;
        if let Some((lo, hi)) = cfg.shade {
            chart.draw_series(std::iter::once(
                Rectangle::new([(lo, y0), (hi, y1)], RED.mix(0.5).filled())
            ))?;
        }
        chart.draw_series(LineSeries::new(
            x.iter().zip(rho).map(|(&xk, &rk)| (xk, rk.min(y1))),
            BLUE.stroke_width(2),
        ))?;
        self.root.present()?;
        self.frames += 1;
        Ok(())
    }

    /// Drive the animation for a fixed number of frames.
    ///
    /// The state is owned by the driver: each frame hands it to `update`,
    /// takes back its successor and draws the successor's density. Returns
    /// the final state along with the `(frames, n)` array of drawn densities.
    pub fn run<F, E>(
        &mut self,
        x: &nd::Array1<f64>,
        frames: usize,
        state: nd::Array1<C64>,
        mut update: F,
    ) -> anyhow::Result<(nd::Array1<C64>, nd::Array2<f64>)>
    where
        F: FnMut(nd::Array1<C64>) -> Result<nd::Array1<C64>, E>,
        E: std::error::Error + Send + Sync + 'static,
    {
        let mut history: nd::Array2<f64> = nd::Array2::zeros((frames, x.len()));
        let mut state = state;
        for (k, mut row) in history.axis_iter_mut(nd::Axis(0)).enumerate() {
            state = update(state)?;
            let rho = density(&state);
            self.draw_frame(x, &rho)?;
            row.assign(&rho);
            if (k + 1) % 50 == 0 {
                info!("rendered frame {}/{}", k + 1, frames);
            }
        }
        Ok((state, history))
    }
}

// padded plotting range covering every value in `z`
fn value_range<'a, I>(z: I) -> Range<f64>
where I: IntoIterator<Item = &'a f64>
{
    let (lo, hi)
        = z.into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &zk| {
            (lo.min(zk), hi.max(zk))
        });
    if !lo.is_finite() || !hi.is_finite() {
        0.0..1.0
    } else if hi - lo <= f64::EPSILON * hi.abs().max(1.0) {
        lo - 0.5..hi + 0.5
    } else {
        let pad = 0.05 * (hi - lo);
        lo.min(0.0)..hi + pad
    }
}

/// Render a 3D surface plot of `z`, a `(ny, nx)` array over the lattice of
/// `grid`, to a PNG file.
pub fn surface<P>(
    path: P,
    grid: &Grid2D,
    z: &nd::Array2<f64>,
    caption: &str,
    size: (u32, u32),
) -> anyhow::Result<()>
where P: AsRef<Path>
{
    let (nx, ny) = grid.shape();
    ensure!(
        z.dim() == (ny, nx),
        "surface of shape {:?} does not match the {}×{} lattice",
        z.dim(), ny, nx,
    );
    let x = grid.get_x();
    let y = grid.get_y();
    let (dx, dy) = (grid.get_dx(), grid.get_dy());
    let root = BitMapBackend::new(path.as_ref(), size).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart
        = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 28))
        .margin(20)
        .build_cartesian_3d(x[0]..x[nx - 1], value_range(z.iter()), y[0]..y[ny - 1])?;
    chart.with_projection(|mut pb| {
        pb.yaw = 0.6;
        pb.pitch = 0.4;
        pb.scale = 0.85;
        pb.into_matrix()
    });
    chart.configure_axes()
        .light_grid_style(BLACK.mix(0.15))
        .max_light_lines(3)
        .draw()?;
    // the series hands back coordinates; map them to lattice indices
    let index = |v: f64, v0: f64, dv: f64| ((v - v0) / dv).round() as usize;
    chart.draw_series(
        SurfaceSeries::xoz(
            x.iter().copied(),
            y.iter().copied(),
            |xv, yv| z[[index(yv, y[0], dy), index(xv, x[0], dx)]],
        )
        .style(BLUE.mix(0.6).filled()),
    )?;
    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fdspace::{
        grid::Grid1D,
        hamiltonian::Hamiltonian1D,
        potential,
        timedep::{ Propagator, Scheme },
    };

    // no text, so that frames can be drawn without system fonts
    fn quiet_config(name: &str, xlim: (f64, f64)) -> AnimationConfig {
        AnimationConfig {
            path: std::env::temp_dir().join(name),
            size: (160, 120),
            frame_delay: 40,
            xlim,
            ylim: (0.0, 1.0),
            shade: Some((xlim.0, 0.5 * (xlim.0 + xlim.1))),
            caption: String::new(),
            x_desc: String::new(),
            y_desc: String::new(),
        }
    }

    fn delta(n: usize, k: usize) -> nd::Array1<C64> {
        let mut q: nd::Array1<C64> = nd::Array1::zeros(n);
        q[k] = C64::new(0.0, 1.0);
        q
    }

    // move all amplitude one site to the right, periodically
    fn shift(q: &nd::Array1<C64>) -> nd::Array1<C64> {
        let n = q.len();
        nd::Array1::from_shape_fn(n, |k| q[(k + n - 1) % n])
    }

    #[test]
    fn run_threads_state_through_frames() {
        let config = quiet_config("demos-plot-run.gif", (0.0, 5.0));
        let path = config.path.clone();
        let x: nd::Array1<f64> = nd::Array1::linspace(0.0, 5.0, 6);
        let mut anim = DensityAnimation::new(config).unwrap();
        let mut calls: usize = 0;
        let (q, history)
            = anim.run(&x, 3, delta(6, 0), |q| {
                calls += 1;
                Ok::<_, std::convert::Infallible>(shift(&q))
            })
            .unwrap();
        assert_eq!(calls, 3);
        assert_eq!(anim.frames(), 3);
        assert_eq!(history.dim(), (3, 6));
        for (k, row) in history.outer_iter().enumerate() {
            assert_eq!(row, density(&delta(6, k + 1)));
        }
        assert_eq!(q, delta(6, 3));
        assert!(path.exists());
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn run_stops_on_failed_update() {
        let grid = Grid1D::new_range(0.0, 8.0, 1.0).unwrap();
        let h = Hamiltonian1D::new(&grid, potential::zero);
        let prop = Propagator::new(&h, 0.1, Scheme::SplitStep).unwrap();
        let config = quiet_config("demos-plot-fail.gif", (0.0, 10.0));
        let path = config.path.clone();
        let x: nd::Array1<f64> = nd::Array1::linspace(0.0, 10.0, 10);
        let mut anim = DensityAnimation::new(config).unwrap();
        // the propagator acts on 8 points, the state has 10
        let res = anim.run(&x, 3, delta(10, 0), |q| prop.step(q));
        assert!(res.is_err());
        assert_eq!(anim.frames(), 0);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn mismatched_arrays_are_rejected() {
        let config = quiet_config("demos-plot-mismatch.gif", (0.0, 1.0));
        let path = config.path.clone();
        let mut anim = DensityAnimation::new(config).unwrap();
        let x: nd::Array1<f64> = nd::Array1::linspace(0.0, 1.0, 5);
        let rho: nd::Array1<f64> = nd::Array1::zeros(4);
        assert!(anim.draw_frame(&x, &rho).is_err());
        assert_eq!(anim.frames(), 0);
        std::fs::remove_file(path).ok();

        let grid = Grid2D::new((-1.0, 1.0), (-1.0, 1.0), (4, 3)).unwrap();
        let z: nd::Array2<f64> = nd::Array2::zeros((4, 3));
        let png = std::env::temp_dir().join("demos-plot-mismatch.png");
        assert!(surface(&png, &grid, &z, "", (160, 120)).is_err());
        assert!(!png.exists());
    }

    #[test]
    fn value_range_pads_and_includes_zero() {
        let z = [0.2, 0.5, 1.0];
        let r = value_range(z.iter());
        assert_eq!(r.start, 0.0);
        assert!((r.end - 1.04).abs() < 1e-12);
    }

    #[test]
    fn value_range_handles_flat_and_empty_data() {
        let z = [2.0, 2.0];
        let r = value_range(z.iter());
        assert_eq!(r, 1.5..2.5);
        let r = value_range(std::iter::empty());
        assert_eq!(r, 0.0..1.0);
    }
}

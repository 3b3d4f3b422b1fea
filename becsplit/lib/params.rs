//! Physical and numerical parameters read by the evolution routines.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    error::LengthError,
    grid::Grid,
};

/// Parameters for scalar condensate evolution.
///
/// The trap is stored flat, with one value per grid point in the same
/// row-major order as the wavefunction buffers. `current_time` is bookkeeping
/// for drivers; nothing in this crate advances it.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameters {
    /// Contact interaction strength *g* (or *c*<sub>0</sub> for spinors).
    pub int_strength: f64,
    /// External potential *V*(**x**).
    pub trap: nd::Array1<f64>,
    /// Number of split steps to take.
    pub num_time_steps: usize,
    /// Time step; purely negative-imaginary for ground-state searches.
    pub time_step: C64,
    /// Elapsed (real) time.
    pub current_time: f64,
}

impl Parameters {
    /// Create a new set of parameters with an arbitrary trap.
    ///
    /// Fails if the trap does not have one value per grid point.
    pub fn new<const D: usize>(
        grid: &Grid<D>,
        int_strength: f64,
        trap: nd::Array1<f64>,
        num_time_steps: usize,
        time_step: C64,
    ) -> Result<Self, LengthError>
    {
        LengthError::check(grid.total_points(), trap.len())?;
        Ok(Self { int_strength, trap, num_time_steps, time_step, current_time: 0.0 })
    }

    /// Create a new set of parameters with no trap (*V* = 0 everywhere).
    pub fn untrapped<const D: usize>(
        grid: &Grid<D>,
        int_strength: f64,
        num_time_steps: usize,
        time_step: C64,
    ) -> Self
    {
        Self {
            int_strength,
            trap: nd::Array1::zeros(grid.total_points()),
            num_time_steps,
            time_step,
            current_time: 0.0,
        }
    }

    /// Create a new set of parameters with a harmonic trap,
    /// *V* = ½ Σ<sub>*d*</sub> *ω*<sub>*d*</sub>² *x*<sub>*d*</sub>².
    pub fn harmonic<const D: usize>(
        grid: &Grid<D>,
        int_strength: f64,
        omega: [f64; D],
        num_time_steps: usize,
        time_step: C64,
    ) -> Self
    {
        Self {
            int_strength,
            trap: harmonic_trap(grid, omega),
            num_time_steps,
            time_step,
            current_time: 0.0,
        }
    }

    /// Return `true` if the time step has a non-zero imaginary part, in which
    /// case evolution does not conserve the atom number and states should be
    /// renormalized after every step.
    pub fn is_imaginary_time(&self) -> bool { self.time_step.im != 0.0 }
}

/// Evaluate a harmonic potential with per-axis frequencies over a grid.
pub fn harmonic_trap<const D: usize>(grid: &Grid<D>, omega: [f64; D])
    -> nd::Array1<f64>
{
    let mut trap: nd::Array1<f64> = nd::Array1::zeros(grid.total_points());
    omega.iter().enumerate()
        .for_each(|(d, w)| {
            nd::Zip::from(&mut trap).and(grid.mesh(d))
                .for_each(|v, x| { *v += 0.5 * (w * x).powi(2); });
        });
    trap
}

/// Parameters for spin-1 condensate evolution.
#[derive(Clone, Debug, PartialEq)]
pub struct SpinorParameters {
    /// Spin-independent parameters; `int_strength` plays the role of
    /// *c*<sub>0</sub>.
    pub params: Parameters,
    /// Spin-dependent interaction strength *c*<sub>2</sub>.
    pub c2: f64,
    /// Linear Zeeman shift.
    pub p: f64,
    /// Quadratic Zeeman shift.
    pub q: f64,
}

impl SpinorParameters {
    pub fn new(params: Parameters, c2: f64, p: f64, q: f64) -> Self {
        Self { params, c2, p, q }
    }
}

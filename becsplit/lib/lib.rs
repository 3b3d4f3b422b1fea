//! Provides a split-step Fourier solver for the Gross-Pitaevskii equation
//! (GPE) describing scalar and spin-1 Bose-Einstein condensates on uniform,
//! periodic grids in one, two, or three dimensions.
//!
//! Provides implementations for the following:
//! - Grids:
//!     - Centred real-space meshes and FFT-ordered reciprocal-space meshes
//!     - Flat, row-major storage shared by every rank
//! - Wavefunctions:
//!     - Scalar and spin-1 (three-component) containers
//!     - Forward/inverse transforms, density, and atom number
//! - Evolution:
//!     - Symmetric split-step propagation in real and imaginary time
//!     - Spin-mixing interactions and Zeeman shifts for spin-1 systems
//!     - Atom-number renormalization for ground-state searches
//!
//! A typical ground-state search looks like this:
//! ```
//! use becsplit::prelude::*;
//! use num_complex::Complex64 as C64;
//!
//! let grid = Grid2D::new([64, 64], [0.5, 0.5]).unwrap();
//! let params = Parameters::harmonic(&grid, 1.0, [1.0, 1.0], 100, C64::new(0.0, -0.01));
//! let psi0: ndarray::Array1<C64>
//!     = ndarray::Zip::from(grid.mesh(0)).and(grid.mesh(1))
//!     .map_collect(|x, y| C64::from((-(x * x + y * y) / 4.0).exp()));
//! let mut wf = Wavefunction::new(&grid);
//! wf.set_state(&psi0).unwrap();
//! for _ in 0..params.num_time_steps {
//!     split_step(&mut wf, &params).unwrap();
//!     renormalise_atom_num(&mut wf).unwrap();
//! }
//! wf.ifft();
//! ```
//!
//! See [`docs`] for theoretical background.

pub mod error;
pub mod grid;
pub mod fft;
pub mod wavefunction;
pub mod spinor;
pub mod params;
pub mod evolution;
pub mod units;

pub mod docs;

/// Re-exports of the most commonly used items.
pub mod prelude {
    pub use crate::{
        error::*,
        grid::{ Grid, Grid1D, Grid2D, Grid3D },
        wavefunction::{
            Condensate,
            Wavefunction,
            Wavefunction1D,
            Wavefunction2D,
            Wavefunction3D,
        },
        spinor::{
            Spin,
            SpinorWavefunction,
            SpinorWavefunction1D,
            SpinorWavefunction2D,
            SpinorWavefunction3D,
        },
        params::{ Parameters, SpinorParameters, harmonic_trap },
        evolution::*,
    };
}

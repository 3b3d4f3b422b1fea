//! Scalar condensate wavefunctions and the interface shared with spinor
//! condensates.
//!
//! A wavefunction holds its state in both position and Fourier space, in flat
//! row-major buffers laid out like the arrays of the [`Grid`] it is defined
//! over. The two buffers are only guaranteed to be transforms of each other
//! immediately after a call to [`Condensate::fft`] or [`Condensate::ifft`];
//! evolution routines are free to update one side and transform afterwards.

use log::debug;
use ndarray as nd;
use num_complex::Complex64 as C64;
use rayon::prelude::*;
use crate::{
    error::{ LengthError, StateError },
    fft::FftPlan,
    grid::Grid,
};

pub type StateResult<T> = Result<T, StateError>;

/// Operations common to all condensate wavefunctions, regardless of the number
/// of components.
pub trait Condensate<'a, const D: usize> {
    /// The grid this wavefunction is defined over.
    fn grid(&self) -> &'a Grid<D>;

    /// Forward-transform the position-space buffer(s) into the Fourier-space
    /// buffer(s). No normalization is applied.
    fn fft(&mut self);

    /// Inverse-transform the Fourier-space buffer(s) into the position-space
    /// buffer(s), dividing by the total number of grid points so that
    /// `ifft ∘ fft` is the identity.
    fn ifft(&mut self);

    /// Position-space density `|ψ|²` (summed over components) at each grid
    /// point.
    fn density(&self) -> nd::Array1<f64>;

    /// The atom number recorded when the state was last set.
    ///
    /// This value is not updated by evolution; it is the target used by
    /// [`renormalise_atom_num`][crate::evolution::renormalise_atom_num].
    fn atom_number(&self) -> f64;

    /// Sum of `|ψ̃|²` over the Fourier-space buffer(s).
    fn fourier_norm_sqr(&self) -> f64;

    /// Multiply every amplitude in both position and Fourier space by a real
    /// factor.
    fn scale(&mut self, factor: f64);
}

// copy any array into a flat buffer in logical (row-major) order
pub(crate) fn copy_state<S, E>(
    dest: &mut [C64],
    values: &nd::ArrayBase<S, E>,
) -> Result<(), LengthError>
where
    S: nd::Data<Elem = C64>,
    E: nd::Dimension,
{
    LengthError::check(dest.len(), values.len())?;
    dest.iter_mut().zip(values.iter())
        .for_each(|(psi, v)| { *psi = *v; });
    Ok(())
}

pub(crate) fn scale_buffer(buf: &mut [C64], factor: f64) {
    buf.par_iter_mut().for_each(|z| { *z *= factor; });
}

pub(crate) fn norm_sqr_sum(buf: &[C64]) -> f64 {
    buf.par_iter().map(|z| z.norm_sqr()).sum()
}

/// A single-component (scalar) condensate wavefunction.
#[derive(Clone, Debug)]
pub struct Wavefunction<'a, const D: usize> {
    grid: &'a Grid<D>,
    plan: FftPlan<D>,
    component: Vec<C64>,
    fourier_component: Vec<C64>,
    atom_number: f64,
}

/// One-dimensional scalar wavefunction.
pub type Wavefunction1D<'a> = Wavefunction<'a, 1>;
/// Two-dimensional scalar wavefunction.
pub type Wavefunction2D<'a> = Wavefunction<'a, 2>;
/// Three-dimensional scalar wavefunction.
pub type Wavefunction3D<'a> = Wavefunction<'a, 3>;

impl<'a, const D: usize> Wavefunction<'a, D> {
    /// Create a new, zero-valued wavefunction over a grid.
    pub fn new(grid: &'a Grid<D>) -> Self {
        let n = grid.total_points();
        let plan = FftPlan::new(grid.shape());
        debug!("allocated scalar wavefunction with {} points", n);
        Self {
            grid,
            plan,
            component: vec![C64::new(0.0, 0.0); n],
            fourier_component: vec![C64::new(0.0, 0.0); n],
            atom_number: 0.0,
        }
    }

    /// Replace the position-space state.
    ///
    /// `values` may have any shape, but must contain exactly as many elements
    /// as the grid, given in row-major order. On success, the Fourier-space
    /// buffer is immediately recomputed and the atom number is updated. On
    /// failure, the wavefunction is left unchanged.
    pub fn set_state<S, E>(&mut self, values: &nd::ArrayBase<S, E>)
        -> StateResult<()>
    where
        S: nd::Data<Elem = C64>,
        E: nd::Dimension,
    {
        copy_state(&mut self.component, values)?;
        self.fft();
        self.update_atom_number();
        Ok(())
    }

    fn update_atom_number(&mut self) {
        self.atom_number = self.density().sum() * self.grid.volume_element();
    }

    /// The position-space buffer.
    pub fn component(&self) -> nd::ArrayView1<'_, C64> {
        nd::ArrayView1::from(self.component.as_slice())
    }

    /// The position-space buffer, mutably.
    pub fn component_mut(&mut self) -> nd::ArrayViewMut1<'_, C64> {
        nd::ArrayViewMut1::from(self.component.as_mut_slice())
    }

    /// The Fourier-space buffer, in FFT order.
    pub fn fourier_component(&self) -> nd::ArrayView1<'_, C64> {
        nd::ArrayView1::from(self.fourier_component.as_slice())
    }

    /// The Fourier-space buffer, mutably.
    pub fn fourier_component_mut(&mut self) -> nd::ArrayViewMut1<'_, C64> {
        nd::ArrayViewMut1::from(self.fourier_component.as_mut_slice())
    }
}

impl<'a, const D: usize> Condensate<'a, D> for Wavefunction<'a, D> {
    fn grid(&self) -> &'a Grid<D> { self.grid }

    fn fft(&mut self) {
        self.fourier_component.copy_from_slice(&self.component);
        self.plan.forward(&mut self.fourier_component);
    }

    fn ifft(&mut self) {
        self.component.copy_from_slice(&self.fourier_component);
        self.plan.inverse_normalized(&mut self.component);
    }

    fn density(&self) -> nd::Array1<f64> {
        self.component.iter().map(|z| z.norm_sqr()).collect()
    }

    fn atom_number(&self) -> f64 { self.atom_number }

    fn fourier_norm_sqr(&self) -> f64 { norm_sqr_sum(&self.fourier_component) }

    fn scale(&mut self, factor: f64) {
        scale_buffer(&mut self.component, factor);
        scale_buffer(&mut self.fourier_component, factor);
    }
}

//! Spin-1 (three-component) condensate wavefunctions.

use log::debug;
use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    error::{ LengthError, StateError },
    fft::FftPlan,
    grid::Grid,
    wavefunction::{
        Condensate,
        StateResult,
        copy_state,
        norm_sqr_sum,
        scale_buffer,
    },
};

/// Label for a spinor component by its spin projection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Spin {
    /// *m* = +1
    Plus,
    /// *m* = 0
    Zero,
    /// *m* = −1
    Minus,
}

impl Spin {
    /// All components, in order of decreasing projection.
    pub const ALL: [Spin; 3] = [Spin::Plus, Spin::Zero, Spin::Minus];

    /// The spin projection *m*.
    pub fn projection(self) -> i32 {
        match self {
            Spin::Plus => 1,
            Spin::Zero => 0,
            Spin::Minus => -1,
        }
    }

    fn idx(self) -> usize {
        match self {
            Spin::Plus => 0,
            Spin::Zero => 1,
            Spin::Minus => 2,
        }
    }
}

/// A spin-1 condensate wavefunction with components labeled by [`Spin`].
///
/// All three components share a single set of FFT plans and a single (total)
/// atom number.
#[derive(Clone, Debug)]
pub struct SpinorWavefunction<'a, const D: usize> {
    grid: &'a Grid<D>,
    plan: FftPlan<D>,
    components: [Vec<C64>; 3],
    fourier_components: [Vec<C64>; 3],
    atom_number: f64,
}

/// One-dimensional spinor wavefunction.
pub type SpinorWavefunction1D<'a> = SpinorWavefunction<'a, 1>;
/// Two-dimensional spinor wavefunction.
pub type SpinorWavefunction2D<'a> = SpinorWavefunction<'a, 2>;
/// Three-dimensional spinor wavefunction.
pub type SpinorWavefunction3D<'a> = SpinorWavefunction<'a, 3>;

impl<'a, const D: usize> SpinorWavefunction<'a, D> {
    /// Create a new, zero-valued spinor wavefunction over a grid.
    pub fn new(grid: &'a Grid<D>) -> Self {
        let n = grid.total_points();
        let plan = FftPlan::new(grid.shape());
        let zeros = || vec![C64::new(0.0, 0.0); n];
        debug!("allocated spinor wavefunction with 3 x {} points", n);
        Self {
            grid,
            plan,
            components: [zeros(), zeros(), zeros()],
            fourier_components: [zeros(), zeros(), zeros()],
            atom_number: 0.0,
        }
    }

    /// Replace the position-space state of all three components, given in
    /// `[+1, 0, −1]` order.
    ///
    /// Each array must contain exactly as many elements as the grid. Lengths
    /// are checked before anything is copied, so on failure the wavefunction
    /// is left unchanged. On success, the Fourier-space buffers and the atom
    /// number are immediately updated.
    pub fn set_state<S, E>(&mut self, values: [&nd::ArrayBase<S, E>; 3])
        -> StateResult<()>
    where
        S: nd::Data<Elem = C64>,
        E: nd::Dimension,
    {
        let n = self.grid.total_points();
        values.iter()
            .try_for_each(|v| LengthError::check(n, v.len()))?;
        self.components.iter_mut().zip(values)
            .try_for_each(|(psi, v)| copy_state(psi, v))?;
        self.fft();
        self.update_atom_number();
        Ok(())
    }

    /// Replace the position-space state of a single component.
    ///
    /// Only that component's Fourier-space buffer is refreshed; the other two
    /// components are left exactly as they are, in both spaces. The cached
    /// atom number is recomputed from the Fourier-space buffers, which hold
    /// the current state between split steps.
    pub fn set_component<S, E>(&mut self, spin: Spin, values: &nd::ArrayBase<S, E>)
        -> StateResult<()>
    where
        S: nd::Data<Elem = C64>,
        E: nd::Dimension,
    {
        let i = spin.idx();
        copy_state(&mut self.components[i], values)
            .map_err(StateError::from)?;
        self.fourier_components[i].copy_from_slice(&self.components[i]);
        self.plan.forward(&mut self.fourier_components[i]);
        self.update_atom_number();
        Ok(())
    }

    // Parseval: Σ|ψ̃|² ∏h / ∏N
    fn update_atom_number(&mut self) {
        self.atom_number
            = self.fourier_norm_sqr() * self.grid.volume_element()
            / self.grid.total_points() as f64;
    }

    /// The position-space buffer of a single component.
    pub fn component(&self, spin: Spin) -> nd::ArrayView1<'_, C64> {
        nd::ArrayView1::from(self.components[spin.idx()].as_slice())
    }

    /// The position-space buffer of a single component, mutably.
    pub fn component_mut(&mut self, spin: Spin) -> nd::ArrayViewMut1<'_, C64> {
        nd::ArrayViewMut1::from(self.components[spin.idx()].as_mut_slice())
    }

    /// The Fourier-space buffer of a single component.
    pub fn fourier_component(&self, spin: Spin) -> nd::ArrayView1<'_, C64> {
        nd::ArrayView1::from(self.fourier_components[spin.idx()].as_slice())
    }

    /// The Fourier-space buffer of a single component, mutably.
    pub fn fourier_component_mut(&mut self, spin: Spin)
        -> nd::ArrayViewMut1<'_, C64>
    {
        nd::ArrayViewMut1::from(
            self.fourier_components[spin.idx()].as_mut_slice())
    }

    /// All three position-space buffers at once, in `[+1, 0, −1]` order.
    pub fn components_mut(&mut self) -> [nd::ArrayViewMut1<'_, C64>; 3] {
        let [p, z, m] = &mut self.components;
        [
            nd::ArrayViewMut1::from(p.as_mut_slice()),
            nd::ArrayViewMut1::from(z.as_mut_slice()),
            nd::ArrayViewMut1::from(m.as_mut_slice()),
        ]
    }

    /// All three Fourier-space buffers at once, in `[+1, 0, −1]` order.
    pub fn fourier_components_mut(&mut self) -> [nd::ArrayViewMut1<'_, C64>; 3] {
        let [p, z, m] = &mut self.fourier_components;
        [
            nd::ArrayViewMut1::from(p.as_mut_slice()),
            nd::ArrayViewMut1::from(z.as_mut_slice()),
            nd::ArrayViewMut1::from(m.as_mut_slice()),
        ]
    }

    /// Position-space density `|ψ_m|²` of a single component.
    pub fn component_density(&self, spin: Spin) -> nd::Array1<f64> {
        self.components[spin.idx()].iter().map(|z| z.norm_sqr()).collect()
    }
}

impl<'a, const D: usize> Condensate<'a, D> for SpinorWavefunction<'a, D> {
    fn grid(&self) -> &'a Grid<D> { self.grid }

    fn fft(&mut self) {
        for (psi, psi_k) in
            self.components.iter().zip(self.fourier_components.iter_mut())
        {
            psi_k.copy_from_slice(psi);
            self.plan.forward(psi_k);
        }
    }

    fn ifft(&mut self) {
        for (psi, psi_k) in
            self.components.iter_mut().zip(self.fourier_components.iter())
        {
            psi.copy_from_slice(psi_k);
            self.plan.inverse_normalized(psi);
        }
    }

    fn density(&self) -> nd::Array1<f64> {
        let [p, z, m] = &self.components;
        p.iter().zip(z).zip(m)
            .map(|((p, z), m)| p.norm_sqr() + z.norm_sqr() + m.norm_sqr())
            .collect()
    }

    fn atom_number(&self) -> f64 { self.atom_number }

    fn fourier_norm_sqr(&self) -> f64 {
        self.fourier_components.iter().map(|psi_k| norm_sqr_sum(psi_k)).sum()
    }

    fn scale(&mut self, factor: f64) {
        self.components.iter_mut()
            .chain(self.fourier_components.iter_mut())
            .for_each(|buf| { scale_buffer(buf, factor); });
    }
}

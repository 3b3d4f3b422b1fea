//! Split-step Fourier evolution of scalar and spin-1 condensates.
//!
//! Every function here is stateless and acts in place on a wavefunction. A
//! full step is the symmetric (Strang) sequence
//!
//! ```text
//! fourier_step → ifft → interaction_step → fft → fourier_step
//! ```
//!
//! so that on return the Fourier-space buffer holds the evolved state and the
//! position-space buffer lags by half a kinetic step. Call
//! [`Condensate::ifft`] before reading position-space values.
//!
//! All propagators are written for a general complex time step: a real step
//! gives unitary evolution, a negative-imaginary step gives imaginary-time
//! relaxation toward the ground state, in which case the state should be
//! passed to [`renormalise_atom_num`] after every step.

use std::f64::consts::{ FRAC_1_SQRT_2, SQRT_2 };
use log::{ debug, trace };
use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    error::{ EvolutionError, LengthError },
    params::{ Parameters, SpinorParameters },
    spinor::{ Spin, SpinorWavefunction },
    wavefunction::{ Condensate, Wavefunction },
};

pub type EvolutionResult<T> = Result<T, EvolutionError>;

/// Spin-vector magnitudes below this are treated as zero in the spin-1
/// interaction step.
pub const SPIN_EPSILON: f64 = 1e-8;

/// Apply half of the kinetic propagator in Fourier space, multiplying each
/// amplitude by exp(−*i* Δ*t* *k*² / 4).
pub fn fourier_step<const D: usize>(
    wfn: &mut Wavefunction<'_, D>,
    params: &Parameters,
) {
    let grid = wfn.grid();
    let dt = params.time_step;
    nd::Zip::from(wfn.fourier_component_mut())
        .and(grid.wavenumber_squared())
        .par_for_each(|psi_k, &k2| {
            *psi_k *= (-0.25 * C64::i() * dt * k2).exp();
        });
}

/// Apply the full trap and contact-interaction propagator in position space,
/// multiplying each amplitude by exp(−*i* Δ*t* (*V* + *g* |ψ|²)).
///
/// Fails if the trap does not have one value per grid point.
pub fn interaction_step<const D: usize>(
    wfn: &mut Wavefunction<'_, D>,
    params: &Parameters,
) -> EvolutionResult<()>
{
    LengthError::check(wfn.grid().total_points(), params.trap.len())?;
    let dt = params.time_step;
    let g = params.int_strength;
    nd::Zip::from(wfn.component_mut())
        .and(&params.trap)
        .par_for_each(|psi, &v| {
            let n = psi.norm_sqr();
            *psi *= (-C64::i() * dt * (v + g * n)).exp();
        });
    Ok(())
}

/// Take one full symmetric split step.
///
/// Expects the Fourier-space buffer to hold the current state, which is the
/// case after [`Wavefunction::set_state`] or a previous split step. On failure
/// (a trap of the wrong length) the wavefunction is left untouched.
pub fn split_step<const D: usize>(
    wfn: &mut Wavefunction<'_, D>,
    params: &Parameters,
) -> EvolutionResult<()>
{
    LengthError::check(wfn.grid().total_points(), params.trap.len())?;
    fourier_step(wfn, params);
    wfn.ifft();
    interaction_step(wfn, params)?;
    wfn.fft();
    fourier_step(wfn, params);
    trace!("scalar split step, dt = {}", params.time_step);
    Ok(())
}

/// Apply half of the kinetic propagator to all three spinor components in
/// Fourier space.
///
/// The *m* = ±1 components additionally pick up the quadratic Zeeman shift:
/// they are multiplied by exp(−*i* Δ*t* (*k*² + 2*q*) / 4) while the *m* = 0
/// component is multiplied by exp(−*i* Δ*t* *k*² / 4).
pub fn fourier_step_spinor<const D: usize>(
    wfn: &mut SpinorWavefunction<'_, D>,
    params: &SpinorParameters,
) {
    let grid = wfn.grid();
    let dt = params.params.time_step;
    let q = params.q;
    let [plus, zero, minus] = wfn.fourier_components_mut();
    nd::Zip::from(plus).and(zero).and(minus)
        .and(grid.wavenumber_squared())
        .par_for_each(|psi_p, psi_0, psi_m, &k2| {
            let kin = (-0.25 * C64::i() * dt * k2).exp();
            let kin_zeeman = (-0.25 * C64::i() * dt * (k2 + 2.0 * q)).exp();
            *psi_p *= kin_zeeman;
            *psi_0 *= kin;
            *psi_m *= kin_zeeman;
        });
}

/// Apply the full interaction propagator to all three spinor components in
/// position space.
///
/// At every point the local spin vector **F** is computed from the current
/// amplitudes, via
/// *F<sub>z</sub>* = |ψ<sub>+1</sub>|² − |ψ<sub>−1</sub>|² and
/// *F*<sub>⊥</sub> = √2 (ψ<sub>+1</sub>\* ψ<sub>0</sub> + ψ<sub>0</sub>\* ψ<sub>−1</sub>),
/// and the components are rotated by exp(−*i* *c*<sub>2</sub> Δ*t* **F**·**f**),
/// which for spin 1 reduces to
/// cos(*c*<sub>2</sub>|**F**|Δ*t*) − *i* sin(*c*<sub>2</sub>|**F**|Δ*t*) **F**·**f** / |**F**|.
/// Where |**F**| < [`SPIN_EPSILON`] the sine term is dropped. Each component
/// is then multiplied by the scalar phase
/// exp(−*i* Δ*t* (*V* − *m p* + *c*<sub>0</sub> *n*)), where *n* is the total
/// density.
///
/// Fails if the trap does not have one value per grid point.
pub fn interaction_step_spinor<const D: usize>(
    wfn: &mut SpinorWavefunction<'_, D>,
    params: &SpinorParameters,
) -> EvolutionResult<()>
{
    let base = &params.params;
    LengthError::check(wfn.grid().total_points(), base.trap.len())?;
    let dt = base.time_step;
    let c0 = base.int_strength;
    let c2 = params.c2;
    let p = params.p;
    let [plus, zero, minus] = wfn.components_mut();
    nd::Zip::from(plus).and(zero).and(minus).and(&base.trap)
        .par_for_each(|psi_p, psi_0, psi_m, &v| {
            let (a, b, c) = (*psi_p, *psi_0, *psi_m);
            let n = a.norm_sqr() + b.norm_sqr() + c.norm_sqr();
            let fz = a.norm_sqr() - c.norm_sqr();
            let fperp = SQRT_2 * (a.conj() * b + b.conj() * c);
            let fmag = (fz * fz + fperp.norm_sqr()).sqrt();

            let theta = c2 * fmag * dt;
            let cos = theta.cos();
            let sin
                = if fmag < SPIN_EPSILON {
                    C64::new(0.0, 0.0)
                } else {
                    C64::i() * theta.sin() / fmag
                };
            let s = sin * FRAC_1_SQRT_2;
            let rot_p = (cos - sin * fz) * a - s * fperp.conj() * b;
            let rot_0 = cos * b - s * (fperp * a + fperp.conj() * c);
            let rot_m = (cos + sin * fz) * c - s * fperp * b;

            let phase = -C64::i() * dt;
            *psi_p = rot_p * (phase * (v - p + c0 * n)).exp();
            *psi_0 = rot_0 * (phase * (v + c0 * n)).exp();
            *psi_m = rot_m * (phase * (v + p + c0 * n)).exp();
        });
    Ok(())
}

/// Take one full symmetric split step for a spin-1 condensate.
///
/// See [`split_step`].
pub fn split_step_spinor<const D: usize>(
    wfn: &mut SpinorWavefunction<'_, D>,
    params: &SpinorParameters,
) -> EvolutionResult<()>
{
    LengthError::check(wfn.grid().total_points(), params.params.trap.len())?;
    fourier_step_spinor(wfn, params);
    wfn.ifft();
    interaction_step_spinor(wfn, params)?;
    wfn.fft();
    fourier_step_spinor(wfn, params);
    trace!("spinor split step, dt = {}", params.params.time_step);
    Ok(())
}

/// Compute the atom number ∫ |ψ|² d**x** from the position-space buffer(s) as
/// a flat Riemann sum.
pub fn calculate_atom_num<'a, const D: usize, C>(wfn: &C) -> f64
where C: Condensate<'a, D>
{
    wfn.density().sum() * wfn.grid().volume_element()
}

/// Compute the atom number of a single spinor component from its
/// position-space buffer.
pub fn calculate_component_atom_num<const D: usize>(
    wfn: &SpinorWavefunction<'_, D>,
    spin: Spin,
) -> f64
{
    wfn.component_density(spin).sum() * wfn.grid().volume_element()
}

/// Rescale a state so that its atom number equals the one recorded when the
/// state was last set, returning the factor applied to every amplitude.
///
/// The current atom number is computed from the Fourier-space buffer(s) (via
/// Parseval's theorem), which hold the current state between split steps.
/// Both position- and Fourier-space buffers are rescaled. Fails if the current
/// atom number is zero or not finite.
pub fn renormalise_atom_num<'a, const D: usize, C>(wfn: &mut C)
    -> EvolutionResult<f64>
where C: Condensate<'a, D>
{
    let grid = wfn.grid();
    let current
        = wfn.fourier_norm_sqr() * grid.volume_element()
        / grid.total_points() as f64;
    EvolutionError::check_norm(current)?;
    let factor = (wfn.atom_number() / current).sqrt();
    debug!("renormalising {:.6e} -> {:.6e} (factor {:.6e})",
        current, wfn.atom_number(), factor);
    wfn.scale(factor);
    Ok(factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{ Grid1D, Grid2D };
    use approx::assert_abs_diff_eq;

    fn gaussian(grid: &Grid2D, width: f64, kx: f64) -> nd::Array1<C64> {
        nd::Zip::from(grid.mesh(0)).and(grid.mesh(1))
            .map_collect(|&x, &y| {
                C64::from_polar((-(x * x + y * y) / width).exp(), kx * x)
            })
    }

    fn assert_close(a: &nd::ArrayView1<C64>, b: &nd::ArrayView1<C64>, eps: f64) {
        a.iter().zip(b)
            .for_each(|(l, r)| {
                assert_abs_diff_eq!(l.re, r.re, epsilon = eps);
                assert_abs_diff_eq!(l.im, r.im, epsilon = eps);
            });
    }

    #[test]
    fn fourier_step_phases() {
        let grid = Grid1D::new([32], [0.5]).unwrap();
        let dk = grid.fourier_spacing()[0];
        let k = 3.0 * dk;
        let state: nd::Array1<C64> = grid.axis(0).mapv(|x| C64::cis(k * x));
        let mut wf = Wavefunction::new(&grid);
        wf.set_state(&state).unwrap();
        let before = wf.fourier_component()[3];
        let dt = C64::new(0.1, 0.0);
        let params = Parameters::untrapped(&grid, 0.0, 1, dt);
        fourier_step(&mut wf, &params);
        let expected = before * C64::cis(-0.25 * 0.1 * k * k);
        assert_abs_diff_eq!(wf.fourier_component()[3].re, expected.re, epsilon = 1e-10);
        assert_abs_diff_eq!(wf.fourier_component()[3].im, expected.im, epsilon = 1e-10);
    }

    #[test]
    fn fourier_step_leaves_dc_alone() {
        let grid = Grid2D::new([16, 16], [0.5, 0.5]).unwrap();
        let state: nd::Array1<C64>
            = nd::Array1::from_elem(grid.total_points(), C64::new(1.0, 0.0));
        let mut wf = Wavefunction::new(&grid);
        wf.set_state(&state).unwrap();
        let params = Parameters::untrapped(&grid, 0.0, 1, C64::new(0.0, -0.5));
        fourier_step(&mut wf, &params);
        assert_abs_diff_eq!(wf.fourier_component()[0].re, 256.0, epsilon = 1e-10);
        assert_abs_diff_eq!(wf.fourier_component()[0].im, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn interaction_step_phase() {
        let grid = Grid1D::new([16], [1.0]).unwrap();
        let state: nd::Array1<C64> = nd::Array1::from_elem(16, C64::new(2.0, 0.0));
        let mut wf = Wavefunction::new(&grid);
        wf.set_state(&state).unwrap();
        let params = Parameters::new(
            &grid, 0.5, nd::Array1::from_elem(16, 0.25), 1, C64::new(0.1, 0.0),
        ).unwrap();
        interaction_step(&mut wf, &params).unwrap();
        // V + g |ψ|² = 0.25 + 0.5 * 4
        let expected = 2.0 * C64::cis(-0.1 * 2.25);
        wf.component().iter()
            .for_each(|z| {
                assert_abs_diff_eq!(z.re, expected.re, epsilon = 1e-12);
                assert_abs_diff_eq!(z.im, expected.im, epsilon = 1e-12);
            });
    }

    #[test]
    fn bad_trap_length() {
        let grid = Grid1D::new([16], [1.0]).unwrap();
        let state: nd::Array1<C64> = nd::Array1::from_elem(16, C64::new(1.0, 0.0));
        let mut wf = Wavefunction::new(&grid);
        wf.set_state(&state).unwrap();
        let mut params = Parameters::untrapped(&grid, 1.0, 1, C64::new(0.1, 0.0));
        params.trap = nd::Array1::zeros(15);
        assert!(matches!(
            interaction_step(&mut wf, &params),
            Err(EvolutionError::Length(LengthError(16, 15))),
        ));
        assert!(matches!(
            split_step(&mut wf, &params),
            Err(EvolutionError::Length(_)),
        ));
        assert_close(&wf.component(), &state.view(), 0.0);
    }

    #[test]
    fn atom_number_matches_cached() {
        let grid = Grid2D::new([32, 32], [0.5, 0.5]).unwrap();
        let mut wf = Wavefunction::new(&grid);
        wf.set_state(&gaussian(&grid, 4.0, 0.0)).unwrap();
        assert_abs_diff_eq!(calculate_atom_num(&wf), wf.atom_number(), epsilon = 1e-12);
        // ∫ exp(-2 r² / 4) d²r = 2π
        assert_abs_diff_eq!(calculate_atom_num(&wf), std::f64::consts::TAU, epsilon = 1e-6);
    }

    #[test]
    fn real_time_conserves_norm() {
        let grid = Grid2D::new([32, 32], [0.5, 0.5]).unwrap();
        let mut wf = Wavefunction::new(&grid);
        wf.set_state(&gaussian(&grid, 4.0, 1.0)).unwrap();
        let params = Parameters::harmonic(&grid, 2.0, [1.0, 1.0], 20, C64::new(0.01, 0.0));
        (0..params.num_time_steps)
            .for_each(|_| { split_step(&mut wf, &params).unwrap(); });
        wf.ifft();
        assert_abs_diff_eq!(calculate_atom_num(&wf), wf.atom_number(), epsilon = 1e-10);
    }

    #[test]
    fn imaginary_time_renormalise() {
        let grid = Grid2D::new([32, 32], [0.5, 0.5]).unwrap();
        let mut wf = Wavefunction::new(&grid);
        wf.set_state(&gaussian(&grid, 4.0, 0.0)).unwrap();
        let target = wf.atom_number();
        let params = Parameters::harmonic(&grid, 1.0, [1.0, 1.0], 1, C64::new(0.0, -0.05));
        split_step(&mut wf, &params).unwrap();
        wf.ifft();
        assert!(calculate_atom_num(&wf) < target);

        let factor = renormalise_atom_num(&mut wf).unwrap();
        assert!(factor > 1.0);
        wf.ifft();
        assert_abs_diff_eq!(calculate_atom_num(&wf), target, epsilon = 1e-10);

        let before = wf.fourier_component().to_owned();
        let factor = renormalise_atom_num(&mut wf).unwrap();
        assert_abs_diff_eq!(factor, 1.0, epsilon = 1e-12);
        assert_close(&wf.fourier_component(), &before.view(), 1e-10);
    }

    #[test]
    fn renormalise_vanished() {
        let grid = Grid1D::new([16], [1.0]).unwrap();
        let mut wf = Wavefunction::new(&grid);
        assert!(matches!(
            renormalise_atom_num(&mut wf),
            Err(EvolutionError::Vanished(_)),
        ));
    }

    fn spin_params(grid: &Grid2D, c0: f64, c2: f64, p: f64, q: f64, dt: C64)
        -> SpinorParameters
    {
        SpinorParameters::new(
            Parameters::harmonic(grid, c0, [1.0, 1.0], 10, dt), c2, p, q)
    }

    #[test]
    fn spinor_zero_spin_vector_no_nan() {
        let grid = Grid2D::new([16, 16], [0.5, 0.5]).unwrap();
        let zeros: nd::Array1<C64> = nd::Array1::zeros(grid.total_points());
        let psi = gaussian(&grid, 2.0, 0.0);
        let params = spin_params(&grid, 1.0, 0.5, 0.1, 0.2, C64::new(0.0, -0.01));

        // polar: F = 0 everywhere
        let mut wf = SpinorWavefunction::new(&grid);
        wf.set_state([&zeros, &psi, &zeros]).unwrap();
        (0..5).for_each(|_| { split_step_spinor(&mut wf, &params).unwrap(); });
        wf.ifft();
        assert!(wf.density().iter().all(|n| n.is_finite()));

        // ferromagnetic: F_⊥ = 0 everywhere
        let mut wf = SpinorWavefunction::new(&grid);
        wf.set_state([&psi, &zeros, &zeros]).unwrap();
        (0..5).for_each(|_| { split_step_spinor(&mut wf, &params).unwrap(); });
        wf.ifft();
        assert!(wf.density().iter().all(|n| n.is_finite()));
        assert!(wf.component(Spin::Zero).iter().all(|z| z.norm() == 0.0));
        assert!(wf.component(Spin::Minus).iter().all(|z| z.norm() == 0.0));
    }

    #[test]
    fn spinor_without_spin_coupling_matches_scalar() {
        let grid = Grid2D::new([16, 16], [0.5, 0.5]).unwrap();
        let zeros: nd::Array1<C64> = nd::Array1::zeros(grid.total_points());
        let psi = gaussian(&grid, 2.0, 0.5);
        let dt = C64::new(0.02, 0.0);
        let spin = spin_params(&grid, 1.5, 0.0, 0.3, 0.0, dt);
        let scalar = spin.params.clone();

        let mut wf_s = SpinorWavefunction::new(&grid);
        wf_s.set_state([&zeros, &psi, &zeros]).unwrap();
        let mut wf = Wavefunction::new(&grid);
        wf.set_state(&psi).unwrap();
        (0..10).for_each(|_| {
            split_step_spinor(&mut wf_s, &spin).unwrap();
            split_step(&mut wf, &scalar).unwrap();
        });
        assert_close(&wf_s.fourier_component(Spin::Zero), &wf.fourier_component(), 1e-9);
    }

    #[test]
    fn spinor_real_time_conserves_norm() {
        let grid = Grid2D::new([16, 16], [0.5, 0.5]).unwrap();
        let plus = gaussian(&grid, 2.0, 0.5);
        let zero = gaussian(&grid, 3.0, -0.2).mapv(|z| 0.7 * z);
        let minus = gaussian(&grid, 1.5, 0.0).mapv(|z| C64::new(0.0, 0.4) * z);
        let params = spin_params(&grid, 1.0, -0.5, 0.1, 0.2, C64::new(0.01, 0.0));
        let mut wf = SpinorWavefunction::new(&grid);
        wf.set_state([&plus, &zero, &minus]).unwrap();
        let target = wf.atom_number();
        (0..20).for_each(|_| { split_step_spinor(&mut wf, &params).unwrap(); });
        wf.ifft();
        assert_abs_diff_eq!(calculate_atom_num(&wf), target, epsilon = 1e-9);
        let total: f64
            = Spin::ALL.iter()
            .map(|s| calculate_component_atom_num(&wf, *s))
            .sum();
        assert_abs_diff_eq!(total, target, epsilon = 1e-9);
    }

    #[test]
    fn spinor_renormalise() {
        let grid = Grid2D::new([16, 16], [0.5, 0.5]).unwrap();
        let psi = gaussian(&grid, 2.0, 0.0);
        let params = spin_params(&grid, 1.0, -0.5, 0.0, 0.1, C64::new(0.0, -0.02));
        let mut wf = SpinorWavefunction::new(&grid);
        wf.set_state([&psi, &psi, &psi]).unwrap();
        let target = wf.atom_number();
        split_step_spinor(&mut wf, &params).unwrap();
        renormalise_atom_num(&mut wf).unwrap();
        wf.ifft();
        assert_abs_diff_eq!(calculate_atom_num(&wf), target, epsilon = 1e-10);
    }
}

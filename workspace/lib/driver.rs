//! Time-stepping loops shared by the driver binaries.

use becsplit::prelude::*;
use log::info;
use crate::data::{ DataManager, DataResult };

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("evolution error: {0}")]
    Evolution(#[from] EvolutionError),

    #[error("output error: {0}")]
    Data(#[from] crate::data::DataError),

    #[error("snapshot interval must be positive")]
    ZeroSaveInterval,
}
pub type DriverResult<T> = Result<T, DriverError>;

/// Run `params.num_time_steps` split steps on a scalar wavefunction, saving
/// the initial state and every `save_every`-th step after it.
///
/// Fails with [`DriverError::ZeroSaveInterval`] before touching `wfn` or
/// `data` if `save_every` is zero.
///
/// In imaginary time the atom number is restored after every step.
/// `params.current_time` advances by `|Δt|` per step.
pub fn evolve<const D: usize>(
    wfn: &mut Wavefunction<'_, D>,
    params: &mut Parameters,
    data: &mut DataManager,
    save_every: usize,
) -> DriverResult<()>
{
    if save_every == 0 { return Err(DriverError::ZeroSaveInterval); }
    let imag = params.is_imaginary_time();
    info!(
        "evolving for {} steps in {} time",
        params.num_time_steps,
        if imag { "imaginary" } else { "real" },
    );
    data.save_wavefunction_data(wfn)?;
    for step in 1..=params.num_time_steps {
        split_step(wfn, params)?;
        if imag { renormalise_atom_num(wfn)?; }
        params.current_time += params.time_step.norm();
        if step % save_every == 0 {
            data.save_wavefunction_data(wfn)?;
            info!(
                "step {}/{}: t = {:.4}, N = {:.6}",
                step, params.num_time_steps, params.current_time,
                calculate_atom_num(wfn),
            );
        }
    }
    Ok(())
}

/// Like [`evolve`], for a spin-1 wavefunction.
pub fn evolve_spinor<const D: usize>(
    wfn: &mut SpinorWavefunction<'_, D>,
    params: &mut SpinorParameters,
    data: &mut DataManager,
    save_every: usize,
) -> DriverResult<()>
{
    if save_every == 0 { return Err(DriverError::ZeroSaveInterval); }
    let imag = params.params.is_imaginary_time();
    info!(
        "evolving spinor for {} steps in {} time",
        params.params.num_time_steps,
        if imag { "imaginary" } else { "real" },
    );
    data.save_spinor_data(wfn)?;
    for step in 1..=params.params.num_time_steps {
        split_step_spinor(wfn, params)?;
        if imag { renormalise_atom_num(wfn)?; }
        params.params.current_time += params.params.time_step.norm();
        if step % save_every == 0 {
            data.save_spinor_data(wfn)?;
            log_populations(wfn, step, params);
        }
    }
    Ok(())
}

fn log_populations<const D: usize>(
    wfn: &SpinorWavefunction<'_, D>,
    step: usize,
    params: &SpinorParameters,
) {
    let [np, nz, nm] = Spin::ALL.map(|s| calculate_component_atom_num(wfn, s));
    info!(
        "step {}/{}: t = {:.4}, N+ = {:.6}, N0 = {:.6}, N- = {:.6}",
        step, params.params.num_time_steps, params.params.current_time,
        np, nz, nm,
    );
}

/// Finish the archive and report where it went.
pub fn finish(data: DataManager) -> DataResult<()> {
    let path = data.finish()?;
    info!("done: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use num_complex::Complex64 as C64;
    use crate::initial;

    #[test]
    fn evolve_saves_and_advances_time() {
        let grid = Grid1D::new([32], [0.5]).unwrap();
        let mut params
            = Parameters::harmonic(&grid, 1.0, [1.0], 10, C64::new(0.0, -0.01));
        let mut psi = initial::gaussian(&grid, [0.5], [2.0]);
        initial::normalize(&mut psi, &grid, 3.0);
        let mut wf = Wavefunction::new(&grid);
        wf.set_state(&psi).unwrap();

        let path = std::env::temp_dir()
            .join(format!("becsplit-driver-{}", std::process::id()))
            .join("run.npz");
        let mut data = DataManager::new(&path, &params, &grid).unwrap();
        evolve(&mut wf, &mut params, &mut data, 4).unwrap();
        // initial state, then steps 4 and 8
        assert_eq!(data.num_saved(), 3);
        assert_abs_diff_eq!(params.current_time, 0.1, epsilon = 1e-12);
        wf.ifft();
        assert_abs_diff_eq!(calculate_atom_num(&wf), 3.0, epsilon = 1e-9);
        finish(data).unwrap();
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn zero_save_interval_is_rejected() {
        let grid = Grid1D::new([16], [0.5]).unwrap();
        let mut params
            = Parameters::untrapped(&grid, 1.0, 4, C64::new(0.01, 0.0));
        let psi = initial::gaussian(&grid, [0.0], [1.0]);
        let mut wf = Wavefunction::new(&grid);
        wf.set_state(&psi).unwrap();

        let path = std::env::temp_dir()
            .join(format!("becsplit-driver-zero-{}", std::process::id()))
            .join("run.npz");
        let mut data = DataManager::new(&path, &params, &grid).unwrap();
        let res = evolve(&mut wf, &mut params, &mut data, 0);
        assert!(matches!(res, Err(DriverError::ZeroSaveInterval)));
        assert_eq!(data.num_saved(), 0);
        assert_eq!(params.current_time, 0.0);

        let mut spinor_params = SpinorParameters::new(params.clone(), 0.0, 0.0, 0.0);
        let mut sw = SpinorWavefunction::new(&grid);
        sw.set_state([&psi, &psi, &psi]).unwrap();
        let res = evolve_spinor(&mut sw, &mut spinor_params, &mut data, 0);
        assert!(matches!(res, Err(DriverError::ZeroSaveInterval)));
        assert_eq!(data.num_saved(), 0);

        finish(data).unwrap();
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }
}

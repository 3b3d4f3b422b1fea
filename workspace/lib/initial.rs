//! Initial states for the driver binaries.

use becsplit::grid::Grid;
use ndarray as nd;
use num_complex::Complex64 as C64;
use rand::{ prelude as rnd, Rng, SeedableRng };

/// Random number generator seeded from `seed`, or from system entropy if none
/// is given.
pub fn rng(seed: Option<u64>) -> rnd::StdRng {
    match seed {
        Some(s) => rnd::StdRng::seed_from_u64(s),
        None => rnd::StdRng::from_entropy(),
    }
}

/// Real Gaussian `exp(-Σ (x_d - c_d)² / w_d²)` over the grid.
pub fn gaussian<const D: usize>(grid: &Grid<D>, centre: [f64; D], width: [f64; D])
    -> nd::Array1<C64>
{
    let mut arg: nd::Array1<f64> = nd::Array1::zeros(grid.total_points());
    for d in 0..D {
        nd::Zip::from(&mut arg).and(grid.mesh(d))
            .for_each(|a, x| { *a += ((x - centre[d]) / width[d]).powi(2); });
    }
    arg.mapv(|a| C64::from((-a).exp()))
}

/// Constant state of unit amplitude.
pub fn uniform<const D: usize>(grid: &Grid<D>) -> nd::Array1<C64> {
    nd::Array1::from_elem(grid.total_points(), C64::from(1.0))
}

/// Rescale `psi` so that `∫|ψ|² = atom_number`. A state with zero norm is
/// left unchanged.
pub fn normalize<const D: usize>(
    psi: &mut nd::Array1<C64>,
    grid: &Grid<D>,
    atom_number: f64,
) {
    let norm: f64
        = psi.iter().map(|z| z.norm_sqr()).sum::<f64>() * grid.volume_element();
    if norm > 0.0 {
        let factor = (atom_number / norm).sqrt();
        psi.mapv_inplace(|z| z * factor);
    }
}

/// Add independent uniform noise in `[-amplitude, amplitude)` to the real and
/// imaginary parts of every amplitude.
pub fn add_noise<R>(psi: &mut nd::Array1<C64>, amplitude: f64, rng: &mut R)
where R: Rng
{
    if amplitude <= 0.0 { return; }
    psi.iter_mut()
        .for_each(|z| {
            *z += C64::new(
                rng.gen_range(-amplitude..amplitude),
                rng.gen_range(-amplitude..amplitude),
            );
        });
}

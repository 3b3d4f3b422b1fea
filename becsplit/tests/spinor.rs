use approx::assert_abs_diff_eq;
use becsplit::prelude::*;
use ndarray as nd;
use num_complex::Complex64 as C64;

const C0: f64 = 1.2;
const C2: f64 = -0.4;
const P: f64 = 0.3;
const Q: f64 = 0.15;

fn plane_wave(grid: &Grid2D, kx: f64, ky: f64) -> nd::Array1<C64> {
    nd::Zip::from(grid.mesh(0)).and(grid.mesh(1))
        .map_collect(|x, y| C64::cis(kx * x + ky * y))
}

// a fully polarized plane wave only picks up a phase, with energy
// k²/2 + q ∓ p + c0 + c2 for m = ±1
#[test]
fn polarized_plane_wave_energies() {
    let grid = Grid2D::new([16, 16], [0.5, 0.5]).unwrap();
    let [dkx, dky] = grid.fourier_spacing();
    let (kx, ky) = (dkx, -2.0 * dky);
    let k2 = kx * kx + ky * ky;
    let bin = grid.flat_index([1, 14]);
    let dt = C64::new(0.01, 0.0);
    let params = SpinorParameters::new(
        Parameters::untrapped(&grid, C0, 100, dt), C2, P, Q);
    let t = params.params.num_time_steps as f64 * dt.re;
    let zeros: nd::Array1<C64> = nd::Array1::zeros(grid.total_points());
    let psi = plane_wave(&grid, kx, ky);

    for (spin, energy) in [
        (Spin::Plus, k2 / 2.0 + Q - P + C0 + C2),
        (Spin::Minus, k2 / 2.0 + Q + P + C0 + C2),
    ] {
        let mut wf = SpinorWavefunction::new(&grid);
        wf.set_component(spin, &psi).unwrap();
        let amp0 = wf.fourier_component(spin)[bin];
        for _ in 0..params.params.num_time_steps {
            split_step_spinor(&mut wf, &params).unwrap();
        }
        let expected = amp0 * C64::cis(-energy * t);
        let amp = wf.fourier_component(spin)[bin];
        assert_abs_diff_eq!(amp.re, expected.re, epsilon = 1e-8);
        assert_abs_diff_eq!(amp.im, expected.im, epsilon = 1e-8);
        assert!(wf.fourier_component(Spin::Zero).iter().all(|z| z.norm() == 0.0));
    }

    // polar state: no spin vector, no Zeeman shift
    let mut wf = SpinorWavefunction::new(&grid);
    wf.set_state([&zeros, &psi, &zeros]).unwrap();
    let amp0 = wf.fourier_component(Spin::Zero)[bin];
    for _ in 0..params.params.num_time_steps {
        split_step_spinor(&mut wf, &params).unwrap();
    }
    let expected = amp0 * C64::cis(-(k2 / 2.0 + C0) * t);
    let amp = wf.fourier_component(Spin::Zero)[bin];
    assert_abs_diff_eq!(amp.re, expected.re, epsilon = 1e-8);
    assert_abs_diff_eq!(amp.im, expected.im, epsilon = 1e-8);
}

// spin-mixing exchanges population between components while conserving the
// total atom number and the longitudinal magnetization
#[test]
fn spin_mixing_conserves_totals() {
    let grid = Grid2D::new([32, 32], [0.5, 0.5]).unwrap();
    let gauss = |w: f64, a: C64| -> nd::Array1<C64> {
        nd::Zip::from(grid.mesh(0)).and(grid.mesh(1))
            .map_collect(|x, y| a * (-(x * x + y * y) / w).exp())
    };
    let plus = gauss(4.0, C64::new(0.5, 0.0));
    let zero = gauss(4.0, C64::new(0.0, 0.8));
    let minus = gauss(4.0, C64::new(0.3, 0.1));
    let params = SpinorParameters::new(
        Parameters::harmonic(&grid, 5.0, [1.0, 1.0], 200, C64::new(0.005, 0.0)),
        -2.0, 0.0, 0.05,
    );
    let mut wf = SpinorWavefunction2D::new(&grid);
    wf.set_state([&plus, &zero, &minus]).unwrap();
    let n0: Vec<f64>
        = Spin::ALL.iter()
        .map(|s| calculate_component_atom_num(&wf, *s))
        .collect();
    let mz0 = n0[0] - n0[2];

    for _ in 0..params.params.num_time_steps {
        split_step_spinor(&mut wf, &params).unwrap();
    }
    wf.ifft();
    let n: Vec<f64>
        = Spin::ALL.iter()
        .map(|s| calculate_component_atom_num(&wf, *s))
        .collect();
    assert!(wf.density().iter().all(|d| d.is_finite()));
    assert_abs_diff_eq!(n.iter().sum::<f64>(), wf.atom_number(), epsilon = 1e-9);
    assert_abs_diff_eq!(n[0] - n[2], mz0, epsilon = 1e-9);
    // populations actually move
    assert!((n[1] - n0[1]).abs() > 1e-4);
}

#[test]
fn spinor_imaginary_time_ground_state() {
    let grid = Grid1D::new([64], [0.25]).unwrap();
    let gauss: nd::Array1<C64>
        = grid.mesh(0).mapv(|x| C64::from((-x * x / 3.0).exp()));
    // antiferromagnetic interactions with positive q favour the polar state
    let params = SpinorParameters::new(
        Parameters::harmonic(&grid, 10.0, [1.0], 2000, C64::new(0.0, -0.005)),
        1.0, 0.0, 0.5,
    );
    let mut wf = SpinorWavefunction1D::new(&grid);
    let half = gauss.mapv(|z| z * 0.5);
    wf.set_state([&half, &gauss, &half]).unwrap();
    let target = wf.atom_number();
    for _ in 0..params.params.num_time_steps {
        split_step_spinor(&mut wf, &params).unwrap();
        renormalise_atom_num(&mut wf).unwrap();
    }
    wf.ifft();
    assert_abs_diff_eq!(calculate_atom_num(&wf), target, epsilon = 1e-9);
    let frac_zero = calculate_component_atom_num(&wf, Spin::Zero) / target;
    assert!(frac_zero > 0.99);
}

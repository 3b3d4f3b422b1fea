//! Phase profiles for imprinting vortex-antivortex pairs onto a 2D condensate.
//!
//! Each pair contributes the phase of a dipole on a doubly periodic domain,
//! built from a sum over periodic images in *y* together with a linear
//! correction in *y* that removes the net phase gradient the pair would
//! otherwise leave across the box. The resulting profile is continuous across
//! the periodic boundaries up to small truncation errors from the finite image
//! sum.

use std::f64::consts::PI;
use becsplit::grid::Grid2D;
use log::{ info, warn };
use ndarray as nd;
use num_complex::Complex64 as C64;
use rand::Rng;

/// Number of periodic images summed on either side of the central cell.
const NUM_IMAGES: i32 = 5;

/// A vortex position `(x, y)`.
pub type Position = (f64, f64);

/// Draw up to `count` vortex positions uniformly over the grid, rejecting any
/// candidate that lies within `threshold` of an already accepted position
/// along *both* axes.
///
/// At most `max_iter` candidates are drawn; if that is not enough, the
/// positions found so far are returned with a warning.
pub fn generate_positions<R>(
    count: usize,
    threshold: f64,
    grid: &Grid2D,
    max_iter: usize,
    rng: &mut R,
) -> Vec<Position>
where R: Rng
{
    info!("finding {} vortex positions", count);
    let [lx, ly] = grid.length();
    let mut positions: Vec<Position> = Vec::with_capacity(count);
    let mut iterations: usize = 0;
    while positions.len() < count {
        if iterations >= max_iter {
            warn!(
                "max iterations exceeded; only found {} of {} positions",
                positions.len(), count,
            );
            return positions;
        }
        iterations += 1;
        let candidate: Position = (
            rng.gen_range(-lx / 2.0..lx / 2.0),
            rng.gen_range(-ly / 2.0..ly / 2.0),
        );
        let too_close
            = positions.iter()
            .any(|(x, y)| {
                (candidate.0 - x).abs() < threshold
                    && (candidate.1 - y).abs() < threshold
            });
        if !too_close { positions.push(candidate); }
    }
    info!("found {} positions in {} iterations", count, iterations);
    positions
}

fn heaviside(x: f64) -> f64 { if x >= 0.0 { 1.0 } else { 0.0 } }

/// Build the phase profile for a set of vortices.
///
/// The first half of `positions` are given negative charge and each is paired
/// with the corresponding position in the second half, which is given positive
/// charge. With an odd count, the last position is left unpaired and ignored.
pub fn construct_phase(positions: &[Position], grid: &Grid2D) -> nd::Array1<f64> {
    let num_pairs = positions.len() / 2;
    if positions.len() % 2 != 0 {
        warn!("odd number of vortex positions; ignoring the last one");
    }
    let [lx, ly] = grid.length();
    // map a coordinate onto [π, 3π) in units of the box length
    let tx = |x: f64| 2.0 * PI * (x + lx) / lx;
    let ty = |y: f64| 2.0 * PI * (y + ly) / ly;
    let pairs: Vec<(Position, Position)>
        = (0..num_pairs)
        .map(|k| {
            let (xm, ym) = positions[k];
            let (xp, yp) = positions[num_pairs + k];
            ((tx(xm), ty(ym)), (tx(xp), ty(yp)))
        })
        .collect();

    nd::Zip::from(grid.mesh(0)).and(grid.mesh(1))
        .par_map_collect(|x, y| {
            let (xt, yt) = (tx(*x), ty(*y));
            pairs.iter()
                .map(|((xm, ym), (xp, yp))| {
                    let (dxm, dym) = (xt - xm, yt - ym);
                    let (dxp, dyp) = (xt - xp, yt - yp);
                    let images: f64
                        = (-NUM_IMAGES..=NUM_IMAGES)
                        .map(|k| {
                            let shift = 2.0 * PI * k as f64;
                            (((dym + shift) / 2.0).tanh() * ((dxm - PI) / 2.0).tan()).atan()
                                - (((dyp + shift) / 2.0).tanh() * ((dxp - PI) / 2.0).tan()).atan()
                        })
                        .sum();
                    images
                        + PI * (heaviside(dxp) - heaviside(dxm))
                        - yt * (xp - xm) / (2.0 * PI)
                })
                .sum::<f64>()
        })
}

/// Multiply each amplitude of `psi` by `exp(i θ)`.
pub fn imprint(psi: &mut nd::Array1<C64>, phase: &nd::Array1<f64>) {
    nd::Zip::from(psi).and(phase)
        .par_for_each(|z, theta| { *z *= C64::cis(*theta); });
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use crate::initial;

    fn wrap(a: f64) -> f64 { (a + PI).rem_euclid(2.0 * PI) - PI }

    // winding number of `phase` around the rectangle with corners at grid
    // indices (i0, j0) and (i1, j1), traversed counterclockwise
    fn winding(phase: &nd::Array1<f64>, grid: &Grid2D, (i0, j0): (usize, usize), (i1, j1): (usize, usize))
        -> f64
    {
        let mut path: Vec<[usize; 2]> = Vec::new();
        path.extend((i0..i1).map(|i| [i, j0]));
        path.extend((j0..j1).map(|j| [i1, j]));
        path.extend((i0 + 1..=i1).rev().map(|i| [i, j1]));
        path.extend((j0 + 1..=j1).rev().map(|j| [i0, j]));
        path.push([i0, j0]);
        path.windows(2)
            .map(|w| wrap(phase[grid.flat_index(w[1])] - phase[grid.flat_index(w[0])]))
            .sum::<f64>() / (2.0 * PI)
    }

    #[test]
    fn pair_has_opposite_windings() {
        let grid = Grid2D::new([64, 64], [0.5, 0.5]).unwrap();
        let positions = [(-4.1, 0.3), (4.2, -0.2)];
        let phase = construct_phase(&positions, &grid);
        assert!(phase.iter().all(|t| t.is_finite()));

        // (-4.1, 0.3) sits near index (24, 33); (4.2, -0.2) near (40, 32)
        assert_abs_diff_eq!(winding(&phase, &grid, (20, 29), (28, 37)), -1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(winding(&phase, &grid, (36, 28), (44, 36)), 1.0, epsilon = 1e-9);
        // enclosing both, or neither
        assert_abs_diff_eq!(winding(&phase, &grid, (18, 26), (46, 38)), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(winding(&phase, &grid, (40, 40), (60, 60)), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn no_pairs_no_phase() {
        let grid = Grid2D::new([16, 16], [1.0, 1.0]).unwrap();
        let phase = construct_phase(&[], &grid);
        assert!(phase.iter().all(|t| *t == 0.0));
        let phase = construct_phase(&[(1.0, 1.0)], &grid);
        assert!(phase.iter().all(|t| *t == 0.0));
    }

    #[test]
    fn positions_respect_threshold() {
        let grid = Grid2D::new([64, 32], [0.5, 0.5]).unwrap();
        let mut rng = initial::rng(Some(12345));
        let threshold = 1.5;
        let positions = generate_positions(10, threshold, &grid, 100_000, &mut rng);
        assert_eq!(positions.len(), 10);
        for (k, (x, y)) in positions.iter().enumerate() {
            assert!(x.abs() <= 16.0 && y.abs() <= 8.0);
            for (xx, yy) in positions.iter().skip(k + 1) {
                assert!((x - xx).abs() >= threshold || (y - yy).abs() >= threshold);
            }
        }
    }

    #[test]
    fn positions_give_up_after_max_iter() {
        let grid = Grid2D::new([16, 16], [0.5, 0.5]).unwrap();
        let mut rng = initial::rng(Some(1));
        // nothing after the first candidate can be far enough away
        let positions = generate_positions(4, 100.0, &grid, 50, &mut rng);
        assert_eq!(positions.len(), 1);
        let positions = generate_positions(4, 100.0, &grid, 0, &mut rng);
        assert!(positions.is_empty());
    }

    #[test]
    fn imprint_sets_phase() {
        let grid = Grid2D::new([8, 8], [1.0, 1.0]).unwrap();
        let mut psi = initial::uniform(&grid);
        let phase: nd::Array1<f64> = grid.mesh(0).mapv(|x| 0.25 * x);
        imprint(&mut psi, &phase);
        psi.iter().zip(&phase)
            .for_each(|(z, t)| {
                assert_abs_diff_eq!(z.norm(), 1.0, epsilon = 1e-14);
                assert_abs_diff_eq!(z.arg(), *t, epsilon = 1e-14);
            });
    }
}

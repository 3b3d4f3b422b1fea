//! Uniform rectangular grids over real and reciprocal (wavenumber) space.
//!
//! All grids are stored flat in row-major order (the last axis varies fastest)
//! so that every mesh array has exactly the layout of the wavefunction buffers
//! it accompanies. Reciprocal coordinates are always generated in "FFT order",
//! i.e. with the zero-frequency bin at index 0, non-negative frequencies
//! ascending through the first half of each axis, and negative frequencies
//! following them. This is the order in which `ndrustfft` returns its output.

use std::{ array, f64::consts::PI };
use log::debug;
use ndarray as nd;
use crate::error::GridError;

pub type GridResult<T> = Result<T, GridError>;

/// Return the signed frequency index for bin `i` of an `n`-point FFT.
///
/// Bins `0..⌈n/2⌉` hold non-negative frequencies; the remainder hold negative
/// frequencies counting up to -1.
pub fn fft_index(i: usize, n: usize) -> isize {
    let m = if n % 2 == 0 { n / 2 } else { (n + 1) / 2 };
    if i < m { i as isize } else { i as isize - n as isize }
}

// row-major strides for a given shape
fn row_major_strides<const D: usize>(points: &[usize; D]) -> [usize; D] {
    let mut strides = [1_usize; D];
    for d in (0..D.saturating_sub(1)).rev() {
        strides[d] = strides[d + 1] * points[d + 1];
    }
    strides
}

// broadcast a set of per-axis coordinates over the full flat grid
fn broadcast_axis(coords: &nd::Array1<f64>, stride: usize, total: usize)
    -> nd::Array1<f64>
{
    let n = coords.len();
    (0..total).map(|j| coords[(j / stride) % n]).collect()
}

/// A `D`-dimensional uniform grid with its reciprocal-space counterpart.
///
/// A grid is fully computed on construction and immutable thereafter. It is
/// meant to be created once and borrowed by every
/// [`Wavefunction`][crate::wavefunction::Wavefunction] defined over it.
#[derive(Clone, Debug)]
pub struct Grid<const D: usize> {
    points: [usize; D],
    spacing: [f64; D],
    fourier_spacing: [f64; D],
    length: [f64; D],
    strides: [usize; D],
    total: usize,
    axes: [nd::Array1<f64>; D],
    fourier_axes: [nd::Array1<f64>; D],
    mesh: [nd::Array1<f64>; D],
    fourier_mesh: [nd::Array1<f64>; D],
    wavenumber: nd::Array1<f64>,
}

/// One-dimensional grid.
pub type Grid1D = Grid<1>;
/// Two-dimensional grid.
pub type Grid2D = Grid<2>;
/// Three-dimensional grid.
pub type Grid3D = Grid<3>;

impl<const D: usize> Grid<D> {
    /// Construct a new grid from the number of points and the spacing between
    /// them along each axis.
    ///
    /// Real-space coordinates along axis *d* are `(i - N[d] / 2) * h[d]`, so
    /// that the box is centered on zero. The reciprocal spacing along each axis
    /// is `π / (N[d] / 2 * h[d])`.
    ///
    /// Fails if `D` is not 1, 2, or 3, if any axis has zero points, or if any
    /// spacing is non-positive.
    pub fn new(points: [usize; D], spacing: [f64; D]) -> GridResult<Self> {
        GridError::check_rank(D)?;
        for (axis, (&n, &h)) in points.iter().zip(spacing.iter()).enumerate() {
            GridError::check_points(axis, n)?;
            GridError::check_spacing(axis, h)?;
        }

        let fourier_spacing: [f64; D]
            = array::from_fn(|d| PI / (points[d] as f64 / 2.0 * spacing[d]));
        let length: [f64; D]
            = array::from_fn(|d| points[d] as f64 * spacing[d]);
        let strides = row_major_strides(&points);
        let total: usize = points.iter().product();

        let axes: [nd::Array1<f64>; D]
            = array::from_fn(|d| {
                let n = points[d] as f64;
                (0..points[d])
                    .map(|i| (i as f64 - n / 2.0) * spacing[d])
                    .collect()
            });
        // built directly in FFT order; no shift needed afterwards
        let fourier_axes: [nd::Array1<f64>; D]
            = array::from_fn(|d| {
                (0..points[d])
                    .map(|i| fft_index(i, points[d]) as f64 * fourier_spacing[d])
                    .collect()
            });
        let mesh: [nd::Array1<f64>; D]
            = array::from_fn(|d| broadcast_axis(&axes[d], strides[d], total));
        let fourier_mesh: [nd::Array1<f64>; D]
            = array::from_fn(|d| {
                broadcast_axis(&fourier_axes[d], strides[d], total)
            });

        let mut wavenumber: nd::Array1<f64> = nd::Array1::zeros(total);
        fourier_mesh.iter()
            .for_each(|k| {
                nd::Zip::from(&mut wavenumber).and(k)
                    .for_each(|k2, kd| { *k2 += kd * kd; });
            });

        debug!(
            "constructed {}D grid: points = {:?}, spacing = {:?}, \
            fourier spacing = {:?}",
            D, points, spacing, fourier_spacing,
        );
        Ok(Self {
            points,
            spacing,
            fourier_spacing,
            length,
            strides,
            total,
            axes,
            fourier_axes,
            mesh,
            fourier_mesh,
            wavenumber,
        })
    }

    /// Number of points along each axis.
    pub fn shape(&self) -> [usize; D] { self.points }

    /// Real-space grid spacing along each axis.
    pub fn spacing(&self) -> [f64; D] { self.spacing }

    /// Reciprocal-space grid spacing along each axis.
    pub fn fourier_spacing(&self) -> [f64; D] { self.fourier_spacing }

    /// Side lengths of the box, `N[d] * h[d]`.
    pub fn length(&self) -> [f64; D] { self.length }

    /// Total number of grid points, i.e. the length of every flat array
    /// associated with this grid.
    pub fn total_points(&self) -> usize { self.total }

    /// Volume of a single grid cell, `∏ h[d]`.
    pub fn volume_element(&self) -> f64 { self.spacing.iter().product() }

    /// Row-major strides for indexing into flat arrays.
    pub fn strides(&self) -> [usize; D] { self.strides }

    /// Convert a multi-index into an index into a flat array.
    pub fn flat_index(&self, index: [usize; D]) -> usize {
        index.iter().zip(self.strides.iter())
            .map(|(i, s)| i * s)
            .sum()
    }

    /// Convert an index into a flat array into a multi-index.
    pub fn multi_index(&self, flat: usize) -> [usize; D] {
        array::from_fn(|d| (flat / self.strides[d]) % self.points[d])
    }

    /// One-dimensional real-space coordinates along a single axis.
    ///
    /// *Panics if `axis >= D`*.
    pub fn axis(&self, axis: usize) -> &nd::Array1<f64> { &self.axes[axis] }

    /// One-dimensional, FFT-ordered wavenumber coordinates along a single
    /// axis.
    ///
    /// *Panics if `axis >= D`*.
    pub fn fourier_axis(&self, axis: usize) -> &nd::Array1<f64> {
        &self.fourier_axes[axis]
    }

    /// Real-space coordinate of every grid point along a single axis, as a
    /// flat array.
    ///
    /// *Panics if `axis >= D`*.
    pub fn mesh(&self, axis: usize) -> &nd::Array1<f64> { &self.mesh[axis] }

    /// Wavenumber coordinate of every grid point along a single axis, as a
    /// flat, FFT-ordered array.
    ///
    /// *Panics if `axis >= D`*.
    pub fn fourier_mesh(&self, axis: usize) -> &nd::Array1<f64> {
        &self.fourier_mesh[axis]
    }

    /// Squared wavenumber `Σ k[d]²` of every grid point, as a flat,
    /// FFT-ordered array.
    pub fn wavenumber_squared(&self) -> &nd::Array1<f64> { &self.wavenumber }
}

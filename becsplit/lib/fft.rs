//! Multi-dimensional, complex-valued FFTs over flat row-major buffers.
//!
//! Transforms are performed one axis at a time with [`ndrustfft`] handlers
//! over a `D`-dimensional working array. Neither direction is normalized
//! here; callers are responsible for dividing by the total number of points
//! after an inverse transform.

use log::debug;
use ndarray as nd;
use ndrustfft::{ ndfft_par, ndifft_par, FftHandler, Normalization };
use num_complex::Complex64 as C64;
use rayon::prelude::*;

/// Forward and inverse handlers for every axis of a `D`-dimensional grid,
/// along with the working arrays they transform between.
///
/// Handlers are tied to a shape, not to any particular buffer, so a single
/// `FftPlan` can be used on any number of buffers of the right size.
pub struct FftPlan<const D: usize> {
    shape: [usize; D],
    handlers: Vec<FftHandler<f64>>,
    work: nd::ArrayD<C64>,
    scratch: nd::ArrayD<C64>,
}

impl<const D: usize> Clone for FftPlan<D> {
    fn clone(&self) -> Self { Self::new(self.shape) }
}

impl<const D: usize> std::fmt::Debug for FftPlan<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FftPlan")
            .field("shape", &self.shape)
            .finish()
    }
}

impl<const D: usize> FftPlan<D> {
    /// Build handlers for a row-major buffer with the given shape.
    pub fn new(shape: [usize; D]) -> Self {
        let handlers: Vec<FftHandler<f64>>
            = shape.iter()
            .map(|n| FftHandler::new(*n).normalization(Normalization::None))
            .collect();
        let work = nd::ArrayD::zeros(nd::IxDyn(&shape));
        let scratch = nd::ArrayD::zeros(nd::IxDyn(&shape));
        debug!("planned {}D FFT for shape {:?}", D, shape);
        Self { shape, handlers, work, scratch }
    }

    /// Shape of the buffers this plan applies to.
    pub fn shape(&self) -> [usize; D] { self.shape }

    /// Total number of points in the buffers this plan applies to.
    pub fn len(&self) -> usize { self.shape.iter().product() }

    /// Return `true` if the planned shape holds no points.
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    // copy a flat buffer into the working array in logical order
    fn load(&mut self, buf: &[C64]) {
        self.work.iter_mut().zip(buf)
            .for_each(|(w, z)| { *w = *z; });
    }

    fn store(&self, buf: &mut [C64]) {
        buf.iter_mut().zip(self.work.iter())
            .for_each(|(z, w)| { *z = *w; });
    }

    /// Perform the forward transform in place.
    ///
    /// *Panics if `buf` does not have length equal to [`Self::len`]*.
    pub fn forward(&mut self, buf: &mut [C64]) {
        assert_eq!(buf.len(), self.len());
        self.load(buf);
        for (axis, handler) in self.handlers.iter_mut().enumerate() {
            ndfft_par(&self.work, &mut self.scratch, handler, axis);
            std::mem::swap(&mut self.work, &mut self.scratch);
        }
        self.store(buf);
    }

    /// Perform the (unnormalized) inverse transform in place.
    ///
    /// *Panics if `buf` does not have length equal to [`Self::len`]*.
    pub fn inverse(&mut self, buf: &mut [C64]) {
        assert_eq!(buf.len(), self.len());
        self.load(buf);
        for (axis, handler) in self.handlers.iter_mut().enumerate() {
            ndifft_par(&self.work, &mut self.scratch, handler, axis);
            std::mem::swap(&mut self.work, &mut self.scratch);
        }
        self.store(buf);
    }

    /// Perform the inverse transform in place and divide every element by the
    /// total number of points.
    ///
    /// *Panics if `buf` does not have length equal to [`Self::len`]*.
    pub fn inverse_normalized(&mut self, buf: &mut [C64]) {
        self.inverse(buf);
        let n = self.len() as f64;
        buf.par_iter_mut().for_each(|z| { *z /= n; });
    }
}

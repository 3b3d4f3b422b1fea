//! Snapshot persistence to `.npz` archives.
//!
//! An archive holds the run parameters and grid description, written once on
//! creation, followed by numbered position-space snapshots:
//!
//! | name                        | contents                                |
//! | :-------------------------- | :-------------------------------------- |
//! | `parameters/int_strength`   | `f64`                                   |
//! | `parameters/num_time_steps` | `u64`                                   |
//! | `parameters/time_step`      | `c128`                                  |
//! | `parameters/trap`           | `f64`, shaped like the grid             |
//! | `parameters/{c2,p,q}`       | `f64`, spinor runs only                 |
//! | `grid/points`               | `u64`, one per axis                     |
//! | `grid/spacing`              | `f64`, one per axis                     |
//! | `grid/x<d>`                 | real-space coordinates along axis *d*   |
//! | `grid/k<d>`                 | wavenumbers along axis *d* (FFT order)  |
//! | `wavefunction/<n>`          | `c128`, shaped like the grid            |
//!
//! Spinor snapshots are stored under `wavefunction_plus/<n>`,
//! `wavefunction_zero/<n>`, and `wavefunction_minus/<n>` instead.

use std::{
    fs::{ self, File },
    io::BufWriter,
    path::{ Path, PathBuf },
};
use becsplit::prelude::*;
use log::{ debug, info };
use ndarray as nd;
use ndarray_npy::{ NpzWriter, WriteNpzError };
use num_complex::Complex64 as C64;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("npz write error: {0}")]
    Write(#[from] WriteNpzError),

    #[error("couldn't reshape array: {0}")]
    Shape(#[from] nd::ShapeError),
}
pub type DataResult<T> = Result<T, DataError>;

/// Records a single run to an `.npz` archive.
pub struct DataManager {
    path: PathBuf,
    shape: Vec<usize>,
    writer: NpzWriter<BufWriter<File>>,
    save_index: usize,
}

impl std::fmt::Debug for DataManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataManager")
            .field("path", &self.path)
            .field("shape", &self.shape)
            .field("save_index", &self.save_index)
            .finish()
    }
}

impl DataManager {
    /// Create a new archive at `path`, creating parent directories as needed,
    /// and write the parameters and grid description.
    pub fn new<P, const D: usize>(path: P, params: &Parameters, grid: &Grid<D>)
        -> DataResult<Self>
    where P: AsRef<Path>
    {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() { fs::create_dir_all(parent)?; }
        }
        let writer = NpzWriter::new(BufWriter::new(File::create(&path)?));
        let mut dm = Self {
            path,
            shape: grid.shape().to_vec(),
            writer,
            save_index: 0,
        };
        dm.save_parameters(params)?;
        dm.save_grid(grid)?;
        info!("writing to {:?}", dm.path);
        Ok(dm)
    }

    fn save_parameters(&mut self, params: &Parameters) -> DataResult<()> {
        self.writer.add_array(
            "parameters/int_strength", &nd::arr0(params.int_strength))?;
        self.writer.add_array(
            "parameters/num_time_steps", &nd::arr0(params.num_time_steps as u64))?;
        self.writer.add_array(
            "parameters/time_step", &nd::arr0(params.time_step))?;
        let trap = params.trap.view().into_shape(nd::IxDyn(&self.shape))?;
        self.writer.add_array("parameters/trap", &trap)?;
        Ok(())
    }

    /// Record the spin-dependent interaction strength and Zeeman shifts of a
    /// spinor run. The shared [`Parameters`] are written on creation.
    pub fn save_spinor_parameters(&mut self, params: &SpinorParameters)
        -> DataResult<()>
    {
        self.writer.add_array("parameters/c2", &nd::arr0(params.c2))?;
        self.writer.add_array("parameters/p", &nd::arr0(params.p))?;
        self.writer.add_array("parameters/q", &nd::arr0(params.q))?;
        Ok(())
    }

    fn save_grid<const D: usize>(&mut self, grid: &Grid<D>) -> DataResult<()> {
        let points: nd::Array1<u64>
            = grid.shape().iter().map(|n| *n as u64).collect();
        let spacing: nd::Array1<f64> = grid.spacing().into_iter().collect();
        self.writer.add_array("grid/points", &points)?;
        self.writer.add_array("grid/spacing", &spacing)?;
        for d in 0..D {
            self.writer.add_array(format!("grid/x{}", d), grid.axis(d))?;
            self.writer.add_array(format!("grid/k{}", d), grid.fourier_axis(d))?;
        }
        Ok(())
    }

    fn add_snapshot(&mut self, group: &str, values: nd::ArrayView1<C64>)
        -> DataResult<()>
    {
        let shaped = values.into_shape(nd::IxDyn(&self.shape))?;
        self.writer.add_array(format!("{}/{}", group, self.save_index), &shaped)?;
        Ok(())
    }

    /// Transform a scalar wavefunction back to position space and append it
    /// as the next snapshot.
    pub fn save_wavefunction_data<const D: usize>(
        &mut self,
        wfn: &mut Wavefunction<'_, D>,
    ) -> DataResult<()>
    {
        wfn.ifft();
        self.add_snapshot("wavefunction", wfn.component())?;
        debug!("saved snapshot {}", self.save_index);
        self.save_index += 1;
        Ok(())
    }

    /// Transform a spinor wavefunction back to position space and append all
    /// three components as the next snapshot.
    pub fn save_spinor_data<const D: usize>(
        &mut self,
        wfn: &mut SpinorWavefunction<'_, D>,
    ) -> DataResult<()>
    {
        wfn.ifft();
        self.add_snapshot("wavefunction_plus", wfn.component(Spin::Plus))?;
        self.add_snapshot("wavefunction_zero", wfn.component(Spin::Zero))?;
        self.add_snapshot("wavefunction_minus", wfn.component(Spin::Minus))?;
        debug!("saved spinor snapshot {}", self.save_index);
        self.save_index += 1;
        Ok(())
    }

    /// Number of snapshots saved so far.
    pub fn num_saved(&self) -> usize { self.save_index }

    /// Path to the archive.
    pub fn path(&self) -> &Path { &self.path }

    /// Finish writing the archive and return its path.
    pub fn finish(self) -> DataResult<PathBuf> {
        self.writer.finish()?;
        info!("wrote {} snapshot(s) to {:?}", self.save_index, self.path);
        Ok(self.path)
    }
}

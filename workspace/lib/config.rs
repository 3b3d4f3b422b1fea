//! TOML run configuration shared by the driver binaries.
//!
//! ```toml
//! [grid]
//! points = [128, 128]
//! spacing = [0.5, 0.5]
//!
//! [evolution]
//! int_strength = 1.0
//! num_time_steps = 250
//! time_step_re = 0.0
//! time_step_im = -0.01
//! save_every = 50
//!
//! [output]
//! path = "output/ground_state_2d.npz"
//! ```
//!
//! Optional sections: `[initial]`, `[trap]`, `[vortices]`, `[spin]`.

use std::path::{ Path, PathBuf };
use becsplit::{
    error::GridError,
    grid::Grid,
    params::{ Parameters, SpinorParameters },
};
use num_complex::Complex64 as C64;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("couldn't read config file {0:?}: {1}")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("couldn't parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("`{field}` has {got} entries, but the grid has {expected} axes")]
    Rank { field: &'static str, expected: usize, got: usize },

    #[error("missing required section [{0}]")]
    Missing(&'static str),

    #[error("invalid config: {0}")]
    Invalid(&'static str),

    #[error("bad grid: {0}")]
    Grid(#[from] GridError),
}
pub type ConfigResult<T> = Result<T, ConfigError>;

/// `[grid]`
#[derive(Clone, Debug, Deserialize)]
pub struct GridConfig {
    /// Number of points along each axis.
    pub points: Vec<usize>,
    /// Spacing along each axis.
    pub spacing: Vec<f64>,
}

/// `[evolution]`
#[derive(Clone, Debug, Deserialize)]
pub struct EvolutionConfig {
    pub int_strength: f64,
    pub num_time_steps: usize,
    pub time_step_re: f64,
    pub time_step_im: f64,
    /// Save a snapshot every this many steps.
    pub save_every: usize,
}

/// `[output]`
#[derive(Clone, Debug, Deserialize)]
pub struct OutputConfig {
    /// Path to the `.npz` archive to write.
    pub path: PathBuf,
}

/// `[initial]`
#[derive(Clone, Debug, Default, Deserialize)]
pub struct InitialConfig {
    /// Per-axis Gaussian width; the drivers choose a default when absent.
    pub width: Option<Vec<f64>>,
    /// Normalize the initial state to this atom number, if given.
    pub atom_number: Option<f64>,
    /// Amplitude of uniform noise added to each component.
    #[serde(default)]
    pub noise: f64,
    /// Seed for the noise generator.
    pub seed: Option<u64>,
}

/// `[trap]`
#[derive(Clone, Debug, Deserialize)]
pub struct TrapConfig {
    /// Harmonic trap frequency along each axis.
    pub omega: Vec<f64>,
}

/// `[vortices]`
#[derive(Clone, Debug, Deserialize)]
pub struct VortexConfig {
    /// Number of vortices; pairs are imprinted with opposite charge.
    pub count: usize,
    /// Minimum separation along both axes between any two vortices.
    pub threshold: f64,
    /// Maximum number of trial positions.
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
    pub seed: Option<u64>,
}

fn default_max_iter() -> usize { 10000 }

/// `[spin]`
#[derive(Clone, Debug, Deserialize)]
pub struct SpinConfig {
    pub c2: f64,
    #[serde(default)]
    pub p: f64,
    #[serde(default)]
    pub q: f64,
}

/// A complete run configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub grid: GridConfig,
    pub evolution: EvolutionConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub initial: InitialConfig,
    pub trap: Option<TrapConfig>,
    pub vortices: Option<VortexConfig>,
    pub spin: Option<SpinConfig>,
}

// convert a config list to a fixed-size array with one entry per axis
fn per_axis<T, const D: usize>(field: &'static str, values: &[T])
    -> ConfigResult<[T; D]>
where T: Copy
{
    values.try_into()
        .map_err(|_| ConfigError::Rank { field, expected: D, got: values.len() })
}

impl Config {
    /// Read and parse a configuration file.
    pub fn load<P>(path: P) -> ConfigResult<Self>
    where P: AsRef<Path>
    {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|err| ConfigError::Read(path.to_path_buf(), err))?;
        Self::parse(&contents)
    }

    /// Parse a configuration from a string.
    pub fn parse(contents: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(contents)?;
        (config.evolution.save_every > 0).then_some(())
            .ok_or(ConfigError::Invalid("save_every must be positive"))?;
        (config.grid.points.len() == config.grid.spacing.len()).then_some(())
            .ok_or(ConfigError::Rank {
                field: "grid.spacing",
                expected: config.grid.points.len(),
                got: config.grid.spacing.len(),
            })?;
        Ok(config)
    }

    /// Number of grid axes.
    pub fn rank(&self) -> usize { self.grid.points.len() }

    /// Build the grid.
    pub fn grid<const D: usize>(&self) -> ConfigResult<Grid<D>> {
        let points = per_axis("grid.points", &self.grid.points)?;
        let spacing = per_axis("grid.spacing", &self.grid.spacing)?;
        Ok(Grid::new(points, spacing)?)
    }

    /// The (complex) time step.
    pub fn time_step(&self) -> C64 {
        C64::new(self.evolution.time_step_re, self.evolution.time_step_im)
    }

    /// Build scalar evolution parameters, with a harmonic trap if `[trap]` is
    /// present.
    pub fn parameters<const D: usize>(&self, grid: &Grid<D>)
        -> ConfigResult<Parameters>
    {
        let ev = &self.evolution;
        if let Some(trap) = &self.trap {
            let omega = per_axis("trap.omega", &trap.omega)?;
            Ok(Parameters::harmonic(
                grid, ev.int_strength, omega, ev.num_time_steps, self.time_step()))
        } else {
            Ok(Parameters::untrapped(
                grid, ev.int_strength, ev.num_time_steps, self.time_step()))
        }
    }

    /// Build spin-1 evolution parameters. Requires `[spin]`.
    pub fn spinor_parameters<const D: usize>(&self, grid: &Grid<D>)
        -> ConfigResult<SpinorParameters>
    {
        let spin = self.spin.as_ref().ok_or(ConfigError::Missing("spin"))?;
        Ok(SpinorParameters::new(self.parameters(grid)?, spin.c2, spin.p, spin.q))
    }

    /// The `[vortices]` section. Required by the vortex driver.
    pub fn vortices(&self) -> ConfigResult<&VortexConfig> {
        self.vortices.as_ref().ok_or(ConfigError::Missing("vortices"))
    }

    /// Per-axis Gaussian width of the initial state, or `default` on every
    /// axis if none is given.
    pub fn initial_width<const D: usize>(&self, default: f64)
        -> ConfigResult<[f64; D]>
    {
        match &self.initial.width {
            Some(width) => per_axis("initial.width", width),
            None => Ok([default; D]),
        }
    }
}

//! Scalar condensate evolution on a grid of any supported rank, e.g. an
//! imaginary-time ground-state search.
//!
//! ```text
//! ground_state --config configs/ground_state_2d.toml
//! ```

use std::path::PathBuf;
use anyhow::bail;
use becsplit::prelude::*;
use clap::Parser;
use lib::{
    config::Config,
    data::DataManager,
    driver,
    initial,
};
use log::info;

// Gaussian width used when `[initial]` gives none
const DEFAULT_WIDTH: f64 = 4.0;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML run configuration.
    #[arg(short, long)]
    config: PathBuf,

    /// Number of worker threads (defaults to one per core).
    #[arg(short, long)]
    threads: Option<usize>,
}

fn run<const D: usize>(config: &Config) -> anyhow::Result<()> {
    let grid: Grid<D> = config.grid()?;
    let mut params = config.parameters(&grid)?;
    info!("grid {:?} with spacing {:?}", grid.shape(), grid.spacing());

    let width = config.initial_width::<D>(DEFAULT_WIDTH)?;
    let mut psi = initial::gaussian(&grid, [0.0; D], width);
    let mut rng = initial::rng(config.initial.seed);
    initial::add_noise(&mut psi, config.initial.noise, &mut rng);
    if let Some(n) = config.initial.atom_number {
        initial::normalize(&mut psi, &grid, n);
    }
    let mut wf = Wavefunction::new(&grid);
    wf.set_state(&psi)?;
    info!("initial atom number: {:.6}", wf.atom_number());

    let mut data = DataManager::new(&config.output.path, &params, &grid)?;
    driver::evolve(&mut wf, &mut params, &mut data, config.evolution.save_every)?;
    driver::finish(data)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    lib::init_logging();
    let args = Args::parse();
    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new().num_threads(n).build_global()?;
    }
    let config = Config::load(&args.config)?;
    match config.rank() {
        1 => run::<1>(&config),
        2 => run::<2>(&config),
        3 => run::<3>(&config),
        n => bail!("unsupported grid rank {}", n),
    }
}

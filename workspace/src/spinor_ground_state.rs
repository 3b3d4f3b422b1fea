//! Spin-1 condensate evolution, e.g. an imaginary-time search for the
//! magnetic ground state at given interaction and Zeeman parameters.
//!
//! ```text
//! spinor_ground_state --config configs/spinor_ground_state.toml
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
    let mut params = config.spinor_parameters(&grid)?;
    info!("grid {:?} with spacing {:?}", grid.shape(), grid.spacing());
    info!(
        "c0 = {}, c2 = {}, p = {}, q = {}",
        params.params.int_strength, params.c2, params.p, params.q,
    );

    // equal populations to start; noise breaks the symmetry between them
    let width = config.initial_width::<D>(DEFAULT_WIDTH)?;
    let mut rng = initial::rng(config.initial.seed);
    let components: Vec<_>
        = Spin::ALL.iter()
        .map(|_| {
            let mut psi = initial::gaussian(&grid, [0.0; D], width);
            initial::add_noise(&mut psi, config.initial.noise, &mut rng);
            if let Some(n) = config.initial.atom_number {
                initial::normalize(&mut psi, &grid, n / 3.0);
            }
            psi
        })
        .collect();
    let mut wf = SpinorWavefunction::new(&grid);
    wf.set_state([&components[0], &components[1], &components[2]])?;
    info!("initial atom number: {:.6}", wf.atom_number());

    let mut data = DataManager::new(&config.output.path, &params.params, &grid)?;
    data.save_spinor_parameters(&params)?;
    driver::evolve_spinor(&mut wf, &mut params, &mut data, config.evolution.save_every)?;
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

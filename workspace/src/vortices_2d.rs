//! Real-time evolution of a uniform 2D condensate seeded with randomly placed
//! vortex-antivortex pairs.
//!
//! ```text
//! vortices_2d --config configs/vortices_2d.toml
//! ```

use std::path::PathBuf;
use becsplit::prelude::*;
use clap::Parser;
use lib::{
    config::Config,
    data::DataManager,
    driver,
    initial,
    phase,
};
use log::info;

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

fn main() -> anyhow::Result<()> {
    lib::init_logging();
    let args = Args::parse();
    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new().num_threads(n).build_global()?;
    }
    let config = Config::load(&args.config)?;
    let vortices = config.vortices()?;

    let grid: Grid2D = config.grid()?;
    let mut params = config.parameters(&grid)?;
    info!("grid {:?} with spacing {:?}", grid.shape(), grid.spacing());

    let mut rng = initial::rng(vortices.seed);
    let positions = phase::generate_positions(
        vortices.count, vortices.threshold, &grid, vortices.max_iter, &mut rng);
    let theta = phase::construct_phase(&positions, &grid);

    let mut psi = initial::uniform(&grid);
    let mut rng = initial::rng(config.initial.seed);
    initial::add_noise(&mut psi, config.initial.noise, &mut rng);
    phase::imprint(&mut psi, &theta);
    if let Some(n) = config.initial.atom_number {
        initial::normalize(&mut psi, &grid, n);
    }
    let mut wf = Wavefunction::new(&grid);
    wf.set_state(&psi)?;
    info!("imprinted {} vortices; atom number {:.6}", positions.len(), wf.atom_number());

    let mut data = DataManager::new(&config.output.path, &params, &grid)?;
    driver::evolve(&mut wf, &mut params, &mut data, config.evolution.save_every)?;
    driver::finish(data)?;
    Ok(())
}

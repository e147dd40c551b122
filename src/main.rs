#![warn(clippy::all)]

use anyhow::{Context, Result};
use life_universe::{NiceInt, RunnerConfig, Universe};
use log::info;

fn build_universe(config: &RunnerConfig) -> Result<Universe> {
    let universe = &config.universe;
    match &universe.rle_file {
        Some(path) => {
            let data = std::fs::read(path)
                .with_context(|| format!("failed to read pattern {}", path.display()))?;
            Universe::from_rle(universe.width, universe.height, &data)
                .with_context(|| format!("failed to load pattern {}", path.display()))
        }
        None => Universe::with_init(universe.width, universe.height, universe.init.clone())
            .context("failed to create universe"),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_dir = std::env::args().nth(1).unwrap_or_else(|| "config".to_owned());
    let config = RunnerConfig::load_from(&config_dir)?;
    let mut life = build_universe(&config)?;
    info!(
        "{}x{} universe, population {}",
        life.width(),
        life.height(),
        NiceInt::from(life.population())
    );

    let print_every = config.run.print_every;
    let mut changes_total = 0usize;
    for _ in 0..config.run.generations {
        changes_total += life.tick().len();
        if print_every != 0 && life.generation() % print_every == 0 {
            println!("generation {}\n{life}", life.generation());
        }
    }
    if print_every == 0 {
        println!("{life}");
    }
    info!(
        "generation {}: population {}, {} cell changes in total",
        NiceInt::from(life.generation()),
        NiceInt::from(life.population()),
        NiceInt::from(changes_total)
    );
    Ok(())
}

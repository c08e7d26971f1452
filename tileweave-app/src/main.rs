mod config;
mod error;
mod logging;
mod output;
mod sample;

use anyhow::Result;
use clap::Parser;

use config::AppConfig;
use error::AppError;
use tileweave_core::Model;
use tileweave_rules::TileId;

fn main() -> Result<()> {
    logging::init_logger();
    let config = AppConfig::parse();
    log::debug!("loaded config: {:?}", config);

    log::info!("loading sample from {:?}", config.sample_file);
    let sample = sample::load_sample(&config.sample_file)?;
    let images = sample.tilemaps().map_err(AppError::Learn)?;

    let mut model = Model::learn(&images, sample.n).map_err(AppError::Learn)?;
    log::info!(
        "learned {} patterns from {} image(s) at n={}",
        model.learned().num_patterns(),
        images.len(),
        sample.n
    );

    for preset in &sample.presets {
        model.set_preset_tile(preset.x, preset.y, TileId(preset.tile));
    }

    let result = match config.seed {
        Some(seed) => model.generate_seeded(config.width, config.height, config.max_attempts, seed),
        None => model.generate(config.width, config.height, config.max_attempts),
    }
    .map_err(AppError::Generate)?;

    match result {
        Some(map) => {
            output::save_tilemap(&map, &config.output_path)?;
            println!(
                "wrote {}x{} tilemap to {}",
                map.width(),
                map.height(),
                config.output_path.display()
            );
            Ok(())
        }
        None => {
            log::warn!(
                "no tilemap produced within {} attempt(s)",
                config.max_attempts
            );
            Err(AppError::AttemptsExhausted(config.max_attempts).into())
        }
    }
}

use clap::Parser;
use std::path::PathBuf;

/// Configuration for the tileweave command line.
#[derive(Parser, Debug)]
#[command(author, version, about = "Synthesizes tilemaps that locally resemble example samples", long_about = None)]
pub struct AppConfig {
    /// Path to the RON sample file defining pattern size and example maps.
    #[arg(short, long, value_name = "FILE")]
    pub sample_file: PathBuf,

    /// Width of the output tilemap.
    #[arg(long, default_value_t = 16)]
    pub width: usize,

    /// Height of the output tilemap.
    #[arg(long, default_value_t = 16)]
    pub height: usize,

    /// How many collapse attempts to run before giving up.
    #[arg(long, default_value_t = 10)]
    pub max_attempts: usize,

    /// Optional seed for the random number generator.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Path to save the generated tilemap.
    #[arg(short, long, value_name = "FILE", default_value = "output.txt")]
    pub output_path: PathBuf,
}

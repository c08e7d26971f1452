use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use tileweave_rules::Tilemap;

/// Saves a tilemap as text: space-separated tile ids, one row per line.
pub fn save_tilemap(map: &Tilemap, output_path: &Path) -> Result<()> {
    log::info!("saving {}x{} tilemap to {:?}", map.width(), map.height(), output_path);

    let file = File::create(output_path)
        .with_context(|| format!("failed to create output file {output_path:?}"))?;
    let mut writer = io::BufWriter::new(file);

    for row in map.to_rows() {
        let line = row
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(writer, "{line}")
            .with_context(|| format!("failed to write to {output_path:?}"))?;
    }

    writer
        .flush()
        .with_context(|| format!("failed to flush {output_path:?}"))?;
    Ok(())
}

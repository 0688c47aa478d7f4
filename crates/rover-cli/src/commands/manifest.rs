use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use rover_assets::generate_manifest;

use super::load_config;

#[derive(Args)]
pub struct ManifestArgs {
    /// Directory of clips to scan (defaults to the configured clips_dir)
    pub dir: Option<PathBuf>,

    /// Write the manifest here instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: &ManifestArgs, config: Option<&Path>) -> Result<()> {
    let dir = match &args.dir {
        Some(dir) => dir.clone(),
        None => load_config(config)?.clips_dir,
    };

    let manifest = generate_manifest(&dir)
        .with_context(|| format!("Failed to scan {}", dir.display()))?;

    match &args.out {
        Some(path) => {
            manifest
                .save(path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "Wrote {} clips to {}",
                manifest.clips.len(),
                path.display()
            );
        }
        None => {
            let json = serde_json::to_string_pretty(&manifest)
                .context("Failed to serialize manifest")?;
            println!("{json}");
        }
    }
    Ok(())
}

use std::path::Path;

use anyhow::Result;
use clap::Args;
use rover_assets::AssetIndex;

use super::{load_config, AssetArgs};
use crate::output::format::format_clips;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct ClipsArgs {
    #[command(flatten)]
    pub assets: AssetArgs,
}

pub fn run(args: &ClipsArgs, config: Option<&Path>, format: OutputFormat) -> Result<()> {
    let mut config = load_config(config)?;
    args.assets.apply(&mut config);

    let index = AssetIndex::load(&config.clips_dir, &config.manifest_path);
    print!("{}", format_clips(&index, format));
    if matches!(format, OutputFormat::Json) {
        println!();
    }
    Ok(())
}

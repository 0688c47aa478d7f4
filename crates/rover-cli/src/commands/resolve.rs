use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use rover_assets::{AssetIndex, AssetResolver};
use rover_core::{EventKind, Tier};

use super::{load_config, AssetArgs};
use crate::output::format::format_resolved;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct ResolveArgs {
    /// Event name, e.g. COLLISION
    pub event: String,

    /// Tier (0-2)
    #[arg(value_parser = clap::value_parser!(u8).range(0..=2))]
    pub tier: u8,

    /// Ask for a specific take
    #[arg(long)]
    pub variant: Option<u32>,

    #[command(flatten)]
    pub assets: AssetArgs,
}

pub fn run(args: &ResolveArgs, config: Option<&Path>, format: OutputFormat) -> Result<()> {
    let mut config = load_config(config)?;
    args.assets.apply(&mut config);

    let index = AssetIndex::load(&config.clips_dir, &config.manifest_path);
    let mut resolver = AssetResolver::new(Arc::new(index));

    let event = EventKind::new(&args.event);
    let tier = Tier::clamped(args.tier);
    let clip = resolver.resolve(event.as_str(), tier, args.variant);
    println!("{}", format_resolved(&event, tier, clip.as_ref(), format));
    Ok(())
}

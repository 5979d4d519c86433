use std::error::Error;
use std::path::PathBuf;

use ccg_scene::{load_scene_json, render_scene_svg, save_svg, RenderOptions};
use clap::Args;
use tracing::info;

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Scene JSON written by `ccg-sim generate --persist-scenes`.
    #[arg(long)]
    pub scene: PathBuf,
    /// Destination SVG path.
    #[arg(long)]
    pub out: PathBuf,
    /// Half extent of the viewport in scene units.
    #[arg(long, default_value_t = 15.0)]
    pub unit_len: f64,
}

pub fn run(args: &RenderArgs) -> Result<(), Box<dyn Error>> {
    let record = load_scene_json(&args.scene)?;
    let options = RenderOptions {
        unit_len: args.unit_len,
        ..RenderOptions::default()
    };
    let svg = render_scene_svg(&record.scene, &options)?;
    let path = save_svg(&args.out, &svg)?;
    info!(round = record.round, path = %path.display(), "scene rendered");
    Ok(())
}

use std::error::Error;
use std::path::PathBuf;

use ccg_scene::{load_scenario, run_scenario, RunOptions};
use clap::Args;
use serde_json::json;

use super::print_json;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// YAML scenario describing entities and filters.
    #[arg(long)]
    pub scenario: PathBuf,
    /// Output directory for scenes, tables and the run report.
    #[arg(long)]
    pub out: PathBuf,
    /// Stop after this many combinations, overriding the scenario.
    #[arg(long)]
    pub max_rounds: Option<u64>,
    /// Skip SVG rendering of accepted scenes.
    #[arg(long)]
    pub no_render: bool,
    /// Also persist every accepted scene as JSON.
    #[arg(long)]
    pub persist_scenes: bool,
}

pub fn run(args: &GenerateArgs) -> Result<(), Box<dyn Error>> {
    let scenario = load_scenario(&args.scenario)?;
    let options = RunOptions {
        out_dir: args.out.clone(),
        render: !args.no_render,
        persist_scenes: args.persist_scenes,
        max_rounds: args.max_rounds,
    };
    let report = run_scenario(&scenario, &options)?;
    print_json(&json!({
        "scenario": report.scenario,
        "rounds": report.rounds,
        "accepted": report.accepted,
        "rejected": report.rejected,
        "reasoning_failures": report.reasoning_failures.len(),
        "report": args.out.join("report.json"),
    }))
}

use std::error::Error;
use std::path::PathBuf;

use ccg_scene::load_scenario;
use ccg_var::{uncovered_pairs, IndexRows};
use clap::Args;
use serde_json::json;

use super::print_json;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// YAML scenario to inspect.
    #[arg(long)]
    pub scenario: PathBuf,
}

pub fn run(args: &InspectArgs) -> Result<(), Box<dyn Error>> {
    let scenario = load_scenario(&args.scenario)?;
    let space = scenario.space()?;
    let sizes: Vec<usize> = space.domains().iter().map(Vec::len).collect();
    let rows: Vec<Vec<usize>> = IndexRows::new(&sizes)?.collect();
    let uncovered = uncovered_pairs(&sizes, &rows).len();
    let cartesian = space
        .cartesian_size()
        .map(|size| size.to_string())
        .unwrap_or_else(|| "overflow".to_string());
    print_json(&json!({
        "scenario": scenario.name,
        "scenario_hash": scenario.scenario_hash()?,
        "entities": scenario.entities.len(),
        "slots": space.width(),
        "domain_sizes": sizes,
        "cartesian_size": cartesian,
        "pairwise_rows": rows.len(),
        "uncovered_pairs": uncovered,
    }))
}

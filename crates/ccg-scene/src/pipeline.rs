use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use ccg_core::errors::{CcgError, ErrorInfo};
use ccg_core::Scene;
use ccg_var::Round;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::export::{scene_rows, SceneTableWriter, SCENE_COLUMNS};
use crate::persist::{save_scene_json, SceneRecord};
use crate::reasoning::{Annotation, OcclusionReasoner, Reasoner};
use crate::render::{render_scene_svg, save_svg};
use crate::scenario::Scenario;
use crate::serde::to_canonical_json_bytes;
use crate::taxonomy::Taxonomy;

/// Output settings for [`run_scenario`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOptions {
    /// Directory receiving every artefact of the run.
    pub out_dir: PathBuf,
    /// Write one SVG per accepted scene.
    #[serde(default = "RunOptions::default_render")]
    pub render: bool,
    /// Write one `.scene.json` per accepted scene.
    #[serde(default)]
    pub persist_scenes: bool,
    /// Overrides the scenario's own round bound.
    #[serde(default)]
    pub max_rounds: Option<u64>,
}

impl RunOptions {
    fn default_render() -> bool {
        true
    }

    /// Options writing into `out_dir` with rendering on and per-scene JSON off.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            render: Self::default_render(),
            persist_scenes: false,
            max_rounds: None,
        }
    }
}

/// A collaborator failure on an accepted scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundFailure {
    /// Round in which the failure occurred.
    pub round: u64,
    /// The collaborator error.
    pub error: CcgError,
    /// Where the offending scene was persisted, if it was.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_path: Option<PathBuf>,
}

/// Summary of a completed run, written as `report.json`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RunReport {
    /// Scenario name.
    pub scenario: String,
    /// Stable hash of the scenario.
    pub scenario_hash: String,
    /// Combinations considered.
    pub rounds: u64,
    /// Scenes that passed every filter.
    pub accepted: u64,
    /// Scenes rejected by a filter.
    pub rejected: u64,
    /// Rejection counts keyed by the first rejecting filter.
    pub rejections_by_filter: BTreeMap<String, u64>,
    /// Reasoner failures; the scene was skipped for rendering and export.
    pub reasoning_failures: Vec<RoundFailure>,
    /// Renderer failures; the scene was still exported.
    #[serde(default)]
    pub render_failures: Vec<RoundFailure>,
    /// Files written, in creation order.
    pub outputs: Vec<PathBuf>,
}

fn io_error(code: &str, path: &Path, err: impl ToString) -> CcgError {
    CcgError::Export(
        ErrorInfo::new(code, err.to_string()).with_context("path", path.display().to_string()),
    )
}

/// Runs a scenario to completion with the occlusion reasoner.
pub fn run_scenario(scenario: &Scenario, options: &RunOptions) -> Result<RunReport, CcgError> {
    run_scenario_with(scenario, options, &OcclusionReasoner)
}

/// Runs a scenario to completion with a caller-supplied reasoner.
///
/// Collaborators see accepted scenes in round order. A reasoning failure persists
/// the scene as `error.scene.json` and the run moves on to the next round.
pub fn run_scenario_with<R: Reasoner + ?Sized>(
    scenario: &Scenario,
    options: &RunOptions,
    reasoner: &R,
) -> Result<RunReport, CcgError> {
    let out_dir = &options.out_dir;
    fs::create_dir_all(out_dir).map_err(|err| io_error("create_dir", out_dir, err))?;
    let mut driver = scenario.driver(options.max_rounds)?;
    let mut report = RunReport {
        scenario: scenario.name.clone(),
        scenario_hash: scenario.scenario_hash()?,
        ..RunReport::default()
    };
    info!(
        scenario = %report.scenario,
        hash = %report.scenario_hash,
        slots = driver.space().width(),
        max_rounds = ?driver.max_rounds(),
        "run started"
    );

    let taxonomy = Taxonomy::default();
    let mut table = SceneTableWriter::create(&out_dir.join("scenes.csv"), &SCENE_COLUMNS)?;
    loop {
        let scene = match driver.advance()? {
            Round::Exhausted => break,
            Round::Rejected(rejection) => {
                report.rejected += 1;
                *report
                    .rejections_by_filter
                    .entry(rejection.filter)
                    .or_insert(0) += 1;
                continue;
            }
            Round::Accepted(scene) => scene,
        };
        report.accepted += 1;
        let round = driver.num_rounds();
        let annotations = match reasoner.annotate(&scene, &taxonomy) {
            Ok(annotations) => annotations,
            Err(error) => {
                let scene_path = persist_failure(scenario, round, scene, out_dir)?;
                warn!(round, %error, path = %scene_path.display(), "reasoning failed");
                report.reasoning_failures.push(RoundFailure {
                    round,
                    error,
                    scene_path: Some(scene_path),
                });
                continue;
            }
        };
        if options.render {
            let render = render_scene_svg(&scene, &scenario.render)
                .and_then(|svg| save_svg(&out_dir.join(format!("scene_{round:04}")), &svg));
            match render {
                Ok(path) => report.outputs.push(path),
                Err(error) => {
                    warn!(round, %error, "render failed");
                    report.render_failures.push(RoundFailure {
                        round,
                        error,
                        scene_path: None,
                    });
                }
            }
        }
        for row in scene_rows(round, &scene, &annotations) {
            table.append(&row)?;
        }
        if options.persist_scenes {
            let path = persist_scene(scenario, round, scene, annotations, out_dir)?;
            report.outputs.push(path);
        }
    }
    report.rounds = driver.num_rounds();
    report.outputs.push(table.finish()?);

    let report_path = out_dir.join("report.json");
    let bytes = to_canonical_json_bytes(&report)?;
    fs::write(&report_path, bytes).map_err(|err| io_error("report_write", &report_path, err))?;
    info!(
        rounds = report.rounds,
        accepted = report.accepted,
        rejected = report.rejected,
        failures = report.reasoning_failures.len(),
        "run finished"
    );
    Ok(report)
}

fn persist_failure(
    scenario: &Scenario,
    round: u64,
    scene: Scene,
    out_dir: &Path,
) -> Result<PathBuf, CcgError> {
    persist_to(scenario, round, scene, Vec::new(), &out_dir.join("error"))
}

fn persist_scene(
    scenario: &Scenario,
    round: u64,
    scene: Scene,
    annotations: Vec<Annotation>,
    out_dir: &Path,
) -> Result<PathBuf, CcgError> {
    let path = out_dir.join(format!("scene_{round:04}"));
    persist_to(scenario, round, scene, annotations, &path)
}

fn persist_to(
    scenario: &Scenario,
    round: u64,
    scene: Scene,
    annotations: Vec<Annotation>,
    path: &Path,
) -> Result<PathBuf, CcgError> {
    let record = SceneRecord {
        scenario: scenario.name.clone(),
        round,
        scene,
        annotations,
    };
    save_scene_json(path, &record)
}

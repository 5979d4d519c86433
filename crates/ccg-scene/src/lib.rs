#![deny(missing_docs)]
#![doc = "Scenario configuration and the collaborators that consume accepted scenes: reasoning, rendering, tabular export and persistence."]

/// CSV export of accepted scenes.
pub mod export;
/// Stable hashing helpers.
pub mod hash;
/// Canonical JSON persistence of scenes.
pub mod persist;
/// Driver-to-collaborator run loop.
pub mod pipeline;
/// Semantic reasoning over accepted scenes.
pub mod reasoning;
/// SVG rendering of scenes.
pub mod render;
/// YAML scenario configuration.
pub mod scenario;
/// Canonical serialization helpers.
pub mod serde;
/// Entity class hierarchy.
pub mod taxonomy;

pub use export::{scene_rows, SceneTableWriter, SCENE_COLUMNS};
pub use hash::stable_hash_string;
pub use persist::{load_scene_json, save_scene_json, SceneRecord, SCENE_SUFFIX};
pub use pipeline::{run_scenario, run_scenario_with, RoundFailure, RunOptions, RunReport};
pub use reasoning::{Annotation, OcclusionReasoner, Reasoner, ReducedHeight};
pub use render::{render_scene_svg, save_svg, RenderOptions};
pub use scenario::{load_scenario, Scenario};
pub use taxonomy::{EntityClass, Taxonomy};

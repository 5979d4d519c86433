use std::fs;
use std::path::{Path, PathBuf};

use ccg_core::errors::{CcgError, ErrorInfo};
use ccg_core::Scene;
use serde::{Deserialize, Serialize};

use crate::reasoning::Annotation;
use crate::serde::{from_json_slice, to_canonical_json_bytes, with_suffix};

/// File suffix of persisted scenes.
pub const SCENE_SUFFIX: &str = ".scene.json";

/// A scene together with the facts derived for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneRecord {
    /// Scenario name.
    pub scenario: String,
    /// Round in which the scene was produced.
    pub round: u64,
    /// The scene itself.
    pub scene: Scene,
    /// Reasoner output; empty when reasoning failed or was skipped.
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

/// Writes the record as canonical JSON, appending [`SCENE_SUFFIX`] when missing.
pub fn save_scene_json(path: &Path, record: &SceneRecord) -> Result<PathBuf, CcgError> {
    let path = with_suffix(path, SCENE_SUFFIX);
    let bytes = to_canonical_json_bytes(record)?;
    fs::write(&path, bytes).map_err(|err| {
        CcgError::Export(
            ErrorInfo::new("scene_write", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    Ok(path)
}

/// Reads a record written by [`save_scene_json`].
pub fn load_scene_json(path: &Path) -> Result<SceneRecord, CcgError> {
    let bytes = fs::read(path).map_err(|err| {
        CcgError::Serde(
            ErrorInfo::new("scene_read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    from_json_slice(&bytes)
}

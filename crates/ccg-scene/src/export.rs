use std::fs::File;
use std::path::{Path, PathBuf};

use ccg_core::errors::{CcgError, ErrorInfo};
use ccg_core::Scene;

use crate::reasoning::Annotation;

/// Header of the per-entity scene table.
pub const SCENE_COLUMNS: [&str; 12] = [
    "round",
    "name",
    "kind",
    "velocity",
    "orientation",
    "width",
    "length",
    "height",
    "lateral_offset",
    "longitudinal_offset",
    "euclidean_distance",
    "reduced_height",
];

fn export_error(path: &Path, err: impl ToString) -> CcgError {
    CcgError::Export(
        ErrorInfo::new("table_write", err.to_string())
            .with_context("path", path.display().to_string()),
    )
}

/// Append-only CSV table with a header row written on creation.
pub struct SceneTableWriter {
    path: PathBuf,
    writer: csv::Writer<File>,
    rows: usize,
}

impl SceneTableWriter {
    /// Creates (truncating) the file and writes the header row.
    pub fn create(path: &Path, columns: &[&str]) -> Result<Self, CcgError> {
        let mut writer = csv::Writer::from_path(path).map_err(|err| export_error(path, err))?;
        writer
            .write_record(columns)
            .map_err(|err| export_error(path, err))?;
        Ok(Self {
            path: path.to_path_buf(),
            writer,
            rows: 1,
        })
    }

    /// Appends one data row.
    pub fn append<I, S>(&mut self, row: I) -> Result<(), CcgError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        self.writer
            .write_record(row)
            .map_err(|err| export_error(&self.path, err))?;
        self.rows += 1;
        Ok(())
    }

    /// Rows written so far, header included.
    pub fn num_rows(&self) -> usize {
        self.rows
    }

    /// Destination path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flushes buffered rows to disk.
    pub fn finish(mut self) -> Result<PathBuf, CcgError> {
        self.writer
            .flush()
            .map_err(|err| export_error(&self.path, err))?;
        Ok(self.path)
    }
}

/// One row per entity, matching [`SCENE_COLUMNS`].
///
/// Multiple reduced heights are joined with `;`; entities without any leave the
/// column empty.
pub fn scene_rows(round: u64, scene: &Scene, annotations: &[Annotation]) -> Vec<Vec<String>> {
    scene
        .iter()
        .map(|entity| {
            let reduced = annotations
                .iter()
                .find(|annotation| annotation.entity == entity.name)
                .map(|annotation| {
                    annotation
                        .reduced_heights
                        .iter()
                        .map(|reduced| reduced.value.to_string())
                        .collect::<Vec<_>>()
                        .join(";")
                })
                .unwrap_or_default();
            let v = &entity.values;
            vec![
                round.to_string(),
                entity.name.clone(),
                entity.kind.to_string(),
                v.velocity.to_string(),
                v.orientation.to_string(),
                v.width.to_string(),
                v.length.to_string(),
                v.height.to_string(),
                v.lateral_offset.to_string(),
                v.longitudinal_offset.to_string(),
                v.euclidean_distance().to_string(),
                reduced,
            ]
        })
        .collect()
}

use ccg_core::errors::{CcgError, ErrorInfo};
use ccg_core::{EntityKind, Scene};
use serde::{Deserialize, Serialize};

use crate::taxonomy::{EntityClass, Taxonomy};

/// Visible height left over when another entity stands closer to the ego lane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReducedHeight {
    /// Name of the closer entity.
    pub occluder: String,
    /// Own height minus the occluder's height.
    pub value: f64,
}

/// Facts derived for one entity of an accepted scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Entity name.
    pub entity: String,
    /// Most specific taxonomy class.
    pub class: EntityClass,
    /// Distance of the entity centre from the origin.
    pub euclidean_distance: f64,
    /// One entry per occluding entity.
    #[serde(default)]
    pub reduced_heights: Vec<ReducedHeight>,
}

/// Semantic reasoning collaborator invoked once per accepted scene.
pub trait Reasoner {
    /// Derives per-entity annotations, in scene order.
    fn annotate(&self, scene: &Scene, taxonomy: &Taxonomy) -> Result<Vec<Annotation>, CcgError>;
}

/// Simplified occlusion rule.
///
/// For every pair where `0 < lateral(e1) < lateral(e2)`, `e2` gets a reduced
/// height of `height(e2) - height(e1)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OcclusionReasoner;

impl OcclusionReasoner {
    fn check(scene: &Scene) -> Result<(), CcgError> {
        if scene.single_ego().is_none() {
            return Err(CcgError::Reasoning(
                ErrorInfo::new("ego_cardinality", "scene must contain exactly one ego")
                    .with_context("egos", scene.of_kind(EntityKind::Ego).count().to_string())
                    .with_hint("add the exactly-one-ego filter to the scenario"),
            ));
        }
        for entity in scene {
            if !entity.values.is_finite() {
                return Err(CcgError::Reasoning(
                    ErrorInfo::new("non_finite_value", "entity carries a non-finite attribute")
                        .with_context("entity", entity.name.clone()),
                ));
            }
        }
        Ok(())
    }
}

impl Reasoner for OcclusionReasoner {
    fn annotate(&self, scene: &Scene, taxonomy: &Taxonomy) -> Result<Vec<Annotation>, CcgError> {
        Self::check(scene)?;
        let annotations = scene
            .iter()
            .map(|target| {
                let lateral = target.values.lateral_offset;
                let reduced_heights = scene
                    .iter()
                    .filter(|occluder| {
                        let l1 = occluder.values.lateral_offset;
                        l1 > 0.0 && lateral > l1
                    })
                    .map(|occluder| ReducedHeight {
                        occluder: occluder.name.clone(),
                        value: target.values.height - occluder.values.height,
                    })
                    .collect();
                Annotation {
                    entity: target.name.clone(),
                    class: taxonomy.class_of(target.kind),
                    euclidean_distance: target.values.euclidean_distance(),
                    reduced_heights,
                }
            })
            .collect();
        Ok(annotations)
    }
}

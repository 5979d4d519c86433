use std::fs;
use std::path::Path;

use ccg_core::errors::{CcgError, ErrorInfo};
use ccg_var::{
    BuiltinFilter, CombinationSpace, EntityVariationSpec, PlausibilityFilter, ScenarioDriver,
};
use serde::{Deserialize, Serialize};

use crate::hash::stable_hash_string;
use crate::render::RenderOptions;
use crate::serde::{from_yaml_slice, to_yaml_string};

/// Declarative scenario: entities to vary, filters to apply, and an optional round bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario label used in reports and persisted scenes.
    pub name: String,
    /// Entity declarations in scene order.
    pub entities: Vec<EntityVariationSpec>,
    /// Filters ANDed in the listed order.
    #[serde(default)]
    pub filters: Vec<BuiltinFilter>,
    /// Hard cutoff on combinations considered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rounds: Option<u64>,
    /// Display options for rendered scenes.
    #[serde(default)]
    pub render: RenderOptions,
}

impl Scenario {
    /// Deterministic hash of the scenario contents.
    pub fn scenario_hash(&self) -> Result<String, CcgError> {
        stable_hash_string(self)
    }

    /// Produces a YAML representation of the scenario.
    pub fn to_yaml_string(&self) -> Result<String, CcgError> {
        to_yaml_string(self)
    }

    /// Validated flattening of the declared entities.
    pub fn space(&self) -> Result<CombinationSpace, CcgError> {
        CombinationSpace::new(self.entities.clone())
    }

    /// Builds an idle driver; `max_rounds` overrides the scenario bound when set.
    pub fn driver(&self, max_rounds: Option<u64>) -> Result<ScenarioDriver, CcgError> {
        let filters = self
            .filters
            .iter()
            .map(|filter| Box::new(*filter) as Box<dyn PlausibilityFilter>)
            .collect();
        ScenarioDriver::new(
            self.entities.clone(),
            filters,
            max_rounds.or(self.max_rounds),
        )
    }

    /// Runs every construction-time check without starting an enumeration.
    pub fn validate(&self) -> Result<(), CcgError> {
        self.driver(None).map(|_| ())
    }
}

/// Loads and validates a YAML scenario.
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<Scenario, CcgError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|err| {
        CcgError::Serde(
            ErrorInfo::new("scenario_read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    let scenario: Scenario = from_yaml_slice(&bytes)?;
    scenario.validate()?;
    Ok(scenario)
}

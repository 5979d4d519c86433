use ccg_core::errors::{CcgError, ErrorInfo};
use ccg_core::{AttributeValue, Scene};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::filters::{first_rejection, PlausibilityFilter};
use crate::pairwise::PairwiseEnumerator;
use crate::schema::EntityVariationSpec;
use crate::space::CombinationSpace;

/// Lifecycle of a [`ScenarioDriver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverState {
    /// Constructed, no combination pulled yet.
    Idle,
    /// Enumeration in progress.
    Enumerating,
    /// Terminal: enumeration exhausted, round bound reached, or a fatal error.
    Done,
}

/// Marker for a combination discarded by a plausibility filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    /// Round number of the rejected combination (1-based).
    pub round: u64,
    /// Name of the first filter that returned `false`.
    pub filter: String,
}

/// Outcome of one [`ScenarioDriver::advance`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum Round {
    /// The scene passed every filter.
    Accepted(Scene),
    /// The scene was discarded; enumeration continues.
    Rejected(Rejection),
    /// No more combinations will be produced.
    Exhausted,
}

impl Round {
    /// Whether this outcome ends the iteration.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Round::Exhausted)
    }

    /// The accepted scene, if any.
    pub fn accepted(self) -> Option<Scene> {
        match self {
            Round::Accepted(scene) => Some(scene),
            _ => None,
        }
    }
}

/// Pull-based iteration loop: enumerate, reconstruct, filter, emit.
pub struct ScenarioDriver {
    space: CombinationSpace,
    filters: Vec<Box<dyn PlausibilityFilter>>,
    max_rounds: Option<u64>,
    state: DriverState,
    enumerator: Option<PairwiseEnumerator<AttributeValue>>,
    num_rounds: u64,
}

impl std::fmt::Debug for ScenarioDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let filters: Vec<&str> = self.filters.iter().map(|filter| filter.name()).collect();
        f.debug_struct("ScenarioDriver")
            .field("entities", &self.space.specs().len())
            .field("filters", &filters)
            .field("max_rounds", &self.max_rounds)
            .field("state", &self.state)
            .field("num_rounds", &self.num_rounds)
            .finish()
    }
}

impl ScenarioDriver {
    /// Validates the scenario and returns an idle driver.
    pub fn new(
        specs: Vec<EntityVariationSpec>,
        filters: Vec<Box<dyn PlausibilityFilter>>,
        max_rounds: Option<u64>,
    ) -> Result<Self, CcgError> {
        if max_rounds == Some(0) {
            return Err(CcgError::Config(
                ErrorInfo::new("zero_max_rounds", "max_rounds must be positive")
                    .with_hint("omit max_rounds to enumerate every combination"),
            ));
        }
        let space = CombinationSpace::new(specs)?;
        Ok(Self {
            space,
            filters,
            max_rounds,
            state: DriverState::Idle,
            enumerator: None,
            num_rounds: 0,
        })
    }

    /// Combinations considered so far, rejected ones included.
    pub fn num_rounds(&self) -> u64 {
        self.num_rounds
    }

    /// Current lifecycle state.
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// The flattened space being enumerated.
    pub fn space(&self) -> &CombinationSpace {
        &self.space
    }

    /// Configured round bound.
    pub fn max_rounds(&self) -> Option<u64> {
        self.max_rounds
    }

    /// Performs one enumeration step.
    ///
    /// Reconstruction errors are fatal: the driver moves to [`DriverState::Done`]
    /// and the error is returned unchanged.
    pub fn advance(&mut self) -> Result<Round, CcgError> {
        if self.state == DriverState::Done {
            return Ok(Round::Exhausted);
        }
        let enumerator = match &mut self.enumerator {
            Some(enumerator) => enumerator,
            slot => {
                let fresh = PairwiseEnumerator::new(self.space.domains().to_vec())?;
                self.state = DriverState::Enumerating;
                slot.insert(fresh)
            }
        };
        let Some(combination) = enumerator.next() else {
            debug!(rounds = self.num_rounds, "enumeration exhausted");
            self.state = DriverState::Done;
            return Ok(Round::Exhausted);
        };
        let scene = match self.space.instantiate(&combination) {
            Ok(scene) => scene,
            Err(err) => {
                self.state = DriverState::Done;
                return Err(err);
            }
        };
        self.num_rounds += 1;
        let round = match first_rejection(&self.filters, &scene) {
            None => {
                debug!(round = self.num_rounds, "scene accepted");
                Round::Accepted(scene)
            }
            Some(filter) => {
                debug!(round = self.num_rounds, filter, "scene rejected");
                Round::Rejected(Rejection {
                    round: self.num_rounds,
                    filter: filter.to_string(),
                })
            }
        };
        if self
            .max_rounds
            .is_some_and(|bound| self.num_rounds >= bound)
        {
            debug!(rounds = self.num_rounds, "round bound reached");
            self.state = DriverState::Done;
        }
        Ok(round)
    }
}

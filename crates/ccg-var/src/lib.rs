#![deny(missing_docs)]
#![doc = "Combinatorial scene variation: flattened attribute spaces, pairwise enumeration, plausibility filters and the scenario driver."]

/// Scenario iteration loop and its three-way round outcome.
pub mod driver;
/// Built-in plausibility filters and the filter trait.
pub mod filters;
pub mod geometry;
pub mod pairwise;
/// Per-entity attribute schemas and variation specs.
pub mod schema;
/// Flattening and reconstruction of combinations.
pub mod space;

pub use driver::{DriverState, Rejection, Round, ScenarioDriver};
pub use filters::{
    exactly_one_ego, left_hand_opposing_traffic, no_overlap, restricted_pedestrian_crossing,
    BuiltinFilter, NamedFilter, PlausibilityFilter,
};
pub use pairwise::{uncovered_pairs, IndexRows, PairCoverage, PairSlot, PairwiseEnumerator};
pub use schema::{AttributeSchema, EntityVariationSpec, Field};
pub use space::{flatten, reconstruct, CombinationSpace};

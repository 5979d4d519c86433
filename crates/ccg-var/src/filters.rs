use std::fmt;

use ccg_core::{EntityKind, Orientation, Scene};
use serde::{Deserialize, Serialize};

use crate::geometry::footprints_overlap;

/// Boolean acceptance predicate over a fully instantiated scene.
pub trait PlausibilityFilter: Send + Sync {
    /// Label used when attributing a rejection.
    fn name(&self) -> &str {
        "custom"
    }

    /// Returns `true` when the scene is plausible.
    fn accepts(&self, scene: &Scene) -> bool;
}

impl<F> PlausibilityFilter for F
where
    F: Fn(&Scene) -> bool + Send + Sync,
{
    fn accepts(&self, scene: &Scene) -> bool {
        self(scene)
    }
}

/// A closure predicate carrying its own label.
pub struct NamedFilter<F> {
    name: String,
    predicate: F,
}

impl<F> NamedFilter<F>
where
    F: Fn(&Scene) -> bool + Send + Sync,
{
    /// Wraps `predicate` under `name`.
    pub fn new(name: impl Into<String>, predicate: F) -> Self {
        Self {
            name: name.into(),
            predicate,
        }
    }
}

impl<F> PlausibilityFilter for NamedFilter<F>
where
    F: Fn(&Scene) -> bool + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn accepts(&self, scene: &Scene) -> bool {
        (self.predicate)(scene)
    }
}

impl<F> fmt::Debug for NamedFilter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedFilter")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Filters that can be named in a scenario file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuiltinFilter {
    /// See [`exactly_one_ego`].
    ExactlyOneEgo,
    /// See [`no_overlap`].
    NoOverlap,
    /// See [`left_hand_opposing_traffic`].
    LeftHandOpposingTraffic,
    /// See [`restricted_pedestrian_crossing`].
    RestrictedPedestrianCrossing,
}

impl BuiltinFilter {
    /// Kebab-case label matching the scenario file spelling.
    pub fn label(self) -> &'static str {
        match self {
            BuiltinFilter::ExactlyOneEgo => "exactly-one-ego",
            BuiltinFilter::NoOverlap => "no-overlap",
            BuiltinFilter::LeftHandOpposingTraffic => "left-hand-opposing-traffic",
            BuiltinFilter::RestrictedPedestrianCrossing => "restricted-pedestrian-crossing",
        }
    }
}

impl PlausibilityFilter for BuiltinFilter {
    fn name(&self) -> &str {
        self.label()
    }

    fn accepts(&self, scene: &Scene) -> bool {
        match self {
            BuiltinFilter::ExactlyOneEgo => exactly_one_ego(scene),
            BuiltinFilter::NoOverlap => no_overlap(scene),
            BuiltinFilter::LeftHandOpposingTraffic => left_hand_opposing_traffic(scene),
            BuiltinFilter::RestrictedPedestrianCrossing => restricted_pedestrian_crossing(scene),
        }
    }
}

/// Runs filters in order and returns the name of the first one that rejects.
pub fn first_rejection<'a>(
    filters: &'a [Box<dyn PlausibilityFilter>],
    scene: &Scene,
) -> Option<&'a str> {
    filters
        .iter()
        .find(|filter| !filter.accepts(scene))
        .map(|filter| filter.name())
}

/// Exactly one entity of kind ego.
pub fn exactly_one_ego(scene: &Scene) -> bool {
    scene.of_kind(EntityKind::Ego).count() == 1
}

/// No two footprints share a positive area. Touching edges or corners are fine.
pub fn no_overlap(scene: &Scene) -> bool {
    let entities = scene.entities();
    entities.iter().enumerate().all(|(idx, a)| {
        entities[idx + 1..]
            .iter()
            .all(|b| !footprints_overlap(&a.values, &b.values))
    })
}

/// South-facing vehicles must sit strictly left of the ego's left edge.
///
/// Compares against the first ego instance; a scene without one is rejected.
pub fn left_hand_opposing_traffic(scene: &Scene) -> bool {
    let Some(ego) = scene.of_kind(EntityKind::Ego).next() else {
        return false;
    };
    let ego_left = ego.values.left_edge();
    scene.of_kind(EntityKind::Vehicle).all(|vehicle| {
        vehicle.values.right_edge() < ego_left || vehicle.values.orientation != Orientation::South
    })
}

/// Pedestrians inside or left of the vehicle band must not walk north or south.
///
/// The band ends at the largest lateral offset among ego and vehicle instances.
/// Without any ego or vehicle there is no band and every pedestrian passes.
pub fn restricted_pedestrian_crossing(scene: &Scene) -> bool {
    let right_far = scene
        .iter()
        .filter(|entity| matches!(entity.kind, EntityKind::Ego | EntityKind::Vehicle))
        .map(|entity| entity.values.lateral_offset)
        .fold(f64::NEG_INFINITY, f64::max);
    scene.of_kind(EntityKind::Pedestrian).all(|pedestrian| {
        pedestrian.values.lateral_offset > right_far
            || !matches!(
                pedestrian.values.orientation,
                Orientation::North | Orientation::South
            )
    })
}

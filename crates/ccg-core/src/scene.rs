//! Resolved scene participants.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::orientation::Orientation;

/// Closed set of entity kinds a scenario can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// The vehicle whose perspective the scene is built around.
    Ego,
    /// Any other road vehicle.
    Vehicle,
    /// A pedestrian.
    Pedestrian,
}

impl EntityKind {
    /// Canonical snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Ego => "ego",
            EntityKind::Vehicle => "vehicle",
            EntityKind::Pedestrian => "pedestrian",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single concrete slot value in a flattened combination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Numeric attribute (velocity, extents, offsets).
    Scalar(f64),
    /// Discrete heading.
    Orientation(Orientation),
}

impl AttributeValue {
    /// Returns the scalar payload, if any.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            AttributeValue::Scalar(value) => Some(*value),
            AttributeValue::Orientation(_) => None,
        }
    }

    /// Returns the orientation payload, if any.
    pub fn as_orientation(&self) -> Option<Orientation> {
        match self {
            AttributeValue::Orientation(value) => Some(*value),
            AttributeValue::Scalar(_) => None,
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Scalar(value)
    }
}

impl From<Orientation> for AttributeValue {
    fn from(value: Orientation) -> Self {
        AttributeValue::Orientation(value)
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Scalar(value) => write!(f, "{value}"),
            AttributeValue::Orientation(value) => write!(f, "{value}"),
        }
    }
}

/// Fully resolved attribute set of one entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttributeValues {
    /// Scalar speed.
    pub velocity: f64,
    /// Heading.
    pub orientation: Orientation,
    /// Lateral extent.
    pub width: f64,
    /// Longitudinal extent.
    pub length: f64,
    /// Vertical extent.
    pub height: f64,
    /// Lateral position of the centre.
    pub lateral_offset: f64,
    /// Longitudinal position of the centre.
    pub longitudinal_offset: f64,
}

impl AttributeValues {
    /// Straight-line distance of the centre from the origin.
    pub fn euclidean_distance(&self) -> f64 {
        self.lateral_offset.hypot(self.longitudinal_offset)
    }

    /// Lateral coordinate of the left edge (ignoring rotation).
    pub fn left_edge(&self) -> f64 {
        self.lateral_offset - self.width / 2.0
    }

    /// Lateral coordinate of the right edge (ignoring rotation).
    pub fn right_edge(&self) -> f64 {
        self.lateral_offset + self.width / 2.0
    }

    /// Whether every scalar attribute is finite.
    pub fn is_finite(&self) -> bool {
        [
            self.velocity,
            self.width,
            self.length,
            self.height,
            self.lateral_offset,
            self.longitudinal_offset,
        ]
        .iter()
        .all(|value| value.is_finite())
    }
}

/// A single scene participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityInstance {
    /// Entity kind copied from the variation spec.
    pub kind: EntityKind,
    /// Name unique within the scenario.
    pub name: String,
    /// Resolved attribute values.
    pub values: AttributeValues,
}

/// Ordered set of entity instances, one per declared variation spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Scene {
    entities: Vec<EntityInstance>,
}

impl Scene {
    /// Wraps an ordered list of instances.
    pub fn new(entities: Vec<EntityInstance>) -> Self {
        Self { entities }
    }

    /// Instances in declaration order.
    pub fn entities(&self) -> &[EntityInstance] {
        &self.entities
    }

    /// Iterates instances in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, EntityInstance> {
        self.entities.iter()
    }

    /// Iterates instances of a single kind.
    pub fn of_kind(&self, kind: EntityKind) -> impl Iterator<Item = &EntityInstance> + '_ {
        self.entities.iter().filter(move |entity| entity.kind == kind)
    }

    /// Returns the ego instance when the scene carries exactly one.
    pub fn single_ego(&self) -> Option<&EntityInstance> {
        let mut egos = self.of_kind(EntityKind::Ego);
        match (egos.next(), egos.next()) {
            (Some(ego), None) => Some(ego),
            _ => None,
        }
    }

    /// Looks up an instance by name.
    pub fn get(&self, name: &str) -> Option<&EntityInstance> {
        self.entities.iter().find(|entity| entity.name == name)
    }

    /// Number of instances.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene has no instances.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Consumes the scene and returns the instances.
    pub fn into_entities(self) -> Vec<EntityInstance> {
        self.entities
    }
}

impl From<Vec<EntityInstance>> for Scene {
    fn from(entities: Vec<EntityInstance>) -> Self {
        Self::new(entities)
    }
}

impl<'a> IntoIterator for &'a Scene {
    type Item = &'a EntityInstance;
    type IntoIter = std::slice::Iter<'a, EntityInstance>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}

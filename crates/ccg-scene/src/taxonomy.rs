use std::collections::BTreeMap;

use ccg_core::EntityKind;
use serde::{Deserialize, Serialize};

/// Class hierarchy handed to the reasoner: `Entity > Car > EgoCar` and `Entity > Pedestrian`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityClass {
    /// Root of every participant.
    Entity,
    /// Road vehicle.
    Car,
    /// The perspective vehicle.
    EgoCar,
    /// Pedestrian.
    Pedestrian,
}

impl EntityClass {
    /// Direct superclass.
    pub fn parent(self) -> Option<Self> {
        match self {
            EntityClass::Entity => None,
            EntityClass::Car | EntityClass::Pedestrian => Some(EntityClass::Entity),
            EntityClass::EgoCar => Some(EntityClass::Car),
        }
    }

    /// The class itself followed by every superclass up to `Entity`.
    pub fn ancestors(self) -> Vec<Self> {
        let mut chain = vec![self];
        let mut current = self;
        while let Some(parent) = current.parent() {
            chain.push(parent);
            current = parent;
        }
        chain
    }

    /// Whether `self` is `other` or one of its subclasses.
    pub fn is_a(self, other: Self) -> bool {
        self.ancestors().contains(&other)
    }
}

/// Assignment of entity kinds to taxonomy classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    classes: BTreeMap<EntityKind, EntityClass>,
}

impl Default for Taxonomy {
    fn default() -> Self {
        let classes = [
            (EntityKind::Ego, EntityClass::EgoCar),
            (EntityKind::Vehicle, EntityClass::Car),
            (EntityKind::Pedestrian, EntityClass::Pedestrian),
        ]
        .into_iter()
        .collect();
        Self { classes }
    }
}

impl Taxonomy {
    /// Class of an entity kind; unmapped kinds fall back to the root class.
    pub fn class_of(&self, kind: EntityKind) -> EntityClass {
        self.classes
            .get(&kind)
            .copied()
            .unwrap_or(EntityClass::Entity)
    }
}

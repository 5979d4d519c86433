#![allow(dead_code)]

use std::path::PathBuf;

use ccg_core::{AttributeValues, EntityInstance, EntityKind, Orientation, Scene};

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../scenarios")
        .join(name)
}

pub fn entity(kind: EntityKind, name: &str, lateral: f64, longitudinal: f64, height: f64) -> EntityInstance {
    EntityInstance {
        kind,
        name: name.to_string(),
        values: AttributeValues {
            velocity: 10.0,
            orientation: Orientation::North,
            width: 1.8,
            length: 4.5,
            height,
            lateral_offset: lateral,
            longitudinal_offset: longitudinal,
        },
    }
}

/// Ego at the origin, a van on the kerb and a pedestrian behind it.
pub fn kerbside_scene() -> Scene {
    Scene::new(vec![
        entity(EntityKind::Ego, "ego", 0.0, 0.0, 1.5),
        entity(EntityKind::Vehicle, "van", 3.0, 8.0, 2.5),
        entity(EntityKind::Pedestrian, "child", 5.5, 12.0, 1.1),
    ])
}

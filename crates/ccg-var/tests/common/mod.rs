#![allow(dead_code)]

use ccg_core::{AttributeValues, EntityInstance, EntityKind, Orientation, Scene};
use ccg_var::{AttributeSchema, EntityVariationSpec};

pub fn fixed_schema(
    orientation: Orientation,
    width: f64,
    length: f64,
    lateral: f64,
    longitudinal: f64,
) -> AttributeSchema {
    AttributeSchema {
        velocity: vec![10.0],
        orientation: vec![orientation],
        width: vec![width],
        length: vec![length],
        height: vec![1.5],
        lateral_offset: vec![lateral],
        longitudinal_offset: vec![longitudinal],
    }
}

pub fn pedestrian_variation() -> EntityVariationSpec {
    EntityVariationSpec::new(
        EntityKind::Pedestrian,
        "ped1",
        AttributeSchema {
            velocity: vec![10.0, 20.0],
            orientation: vec![Orientation::North, Orientation::South],
            width: vec![1.0],
            length: vec![5.0],
            height: vec![2.0],
            lateral_offset: vec![40.0, 50.0],
            longitudinal_offset: vec![45.0, 55.0],
        },
    )
}

pub fn ego_variation() -> EntityVariationSpec {
    EntityVariationSpec::new(
        EntityKind::Ego,
        "ego1",
        AttributeSchema {
            velocity: vec![10.0, 20.0],
            orientation: vec![Orientation::North, Orientation::South],
            width: vec![1.0],
            length: vec![5.0],
            height: vec![2.0],
            lateral_offset: vec![0.0],
            longitudinal_offset: vec![0.0],
        },
    )
}

pub fn entity(
    kind: EntityKind,
    name: &str,
    orientation: Orientation,
    width: f64,
    length: f64,
    lateral: f64,
    longitudinal: f64,
) -> EntityInstance {
    EntityInstance {
        kind,
        name: name.to_string(),
        values: AttributeValues {
            velocity: 10.0,
            orientation,
            width,
            length,
            height: 1.5,
            lateral_offset: lateral,
            longitudinal_offset: longitudinal,
        },
    }
}

pub fn scene(entities: Vec<EntityInstance>) -> Scene {
    Scene::new(entities)
}

mod common;

use ccg_core::{AttributeValue, AttributeValues, CcgError, Orientation};
use ccg_var::{
    flatten, reconstruct, AttributeSchema, CombinationSpace, EntityVariationSpec, Field,
};
use common::{ego_variation, pedestrian_variation};
use proptest::prelude::*;

fn pedestrian_combination() -> Vec<AttributeValue> {
    vec![
        AttributeValue::Scalar(10.0),
        AttributeValue::Orientation(Orientation::North),
        AttributeValue::Scalar(1.0),
        AttributeValue::Scalar(5.0),
        AttributeValue::Scalar(2.0),
        AttributeValue::Scalar(40.0),
        AttributeValue::Scalar(50.0),
    ]
}

fn ego_combination() -> Vec<AttributeValue> {
    vec![
        AttributeValue::Scalar(20.0),
        AttributeValue::Orientation(Orientation::South),
        AttributeValue::Scalar(1.0),
        AttributeValue::Scalar(5.0),
        AttributeValue::Scalar(2.0),
        AttributeValue::Scalar(0.0),
        AttributeValue::Scalar(0.0),
    ]
}

fn assert_matches_block(combination: &[AttributeValue], values: &AttributeValues, offset: usize) {
    let idx = AttributeSchema::field_offsets();
    let slot = |name: &str| combination[offset + idx[name]];
    assert_eq!(slot("velocity"), AttributeValue::from(values.velocity));
    assert_eq!(slot("orientation"), AttributeValue::from(values.orientation));
    assert_eq!(slot("width"), AttributeValue::from(values.width));
    assert_eq!(slot("length"), AttributeValue::from(values.length));
    assert_eq!(slot("height"), AttributeValue::from(values.height));
    assert_eq!(slot("lateral_offset"), AttributeValue::from(values.lateral_offset));
    assert_eq!(slot("longitudinal_offset"), AttributeValue::from(values.longitudinal_offset));
}

#[test]
fn schema_has_seven_fields_in_canonical_order() {
    assert_eq!(AttributeSchema::FIELD_COUNT, 7);
    let names = AttributeSchema::field_names();
    let offsets = AttributeSchema::field_offsets();
    assert_eq!(names.len(), offsets.len());
    for (idx, name) in names.iter().enumerate() {
        assert_eq!(offsets[name], idx);
    }
    assert_eq!(offsets["orientation"], Field::Orientation.index());
}

#[test]
fn flatten_single_entity_follows_field_offsets() {
    let spec = pedestrian_variation();
    let domains = flatten(std::slice::from_ref(&spec));
    let idx = AttributeSchema::field_offsets();
    assert_eq!(domains[idx["velocity"]], spec.schema.domain(Field::Velocity));
    assert_eq!(domains[idx["orientation"]], spec.schema.domain(Field::Orientation));
    assert_eq!(
        domains[idx["lateral_offset"]],
        vec![AttributeValue::Scalar(40.0), AttributeValue::Scalar(50.0)]
    );
    assert_eq!(
        domains[idx["longitudinal_offset"]],
        vec![AttributeValue::Scalar(45.0), AttributeValue::Scalar(55.0)]
    );
}

#[test]
fn flatten_concatenates_entities_in_declaration_order() {
    let ego = ego_variation();
    let ped = pedestrian_variation();
    let space = CombinationSpace::new(vec![ego.clone(), ped.clone()]).expect("space");
    assert_eq!(space.width(), 14);
    let offset = CombinationSpace::offset_of(1);
    assert_eq!(offset, 7);
    for field in Field::ALL {
        assert_eq!(space.domains()[field.index()], ego.schema.domain(field));
        assert_eq!(space.domains()[offset + field.index()], ped.schema.domain(field));
    }
    assert_eq!(space.cartesian_size(), Some(4 * 16));
}

#[test]
fn reconstruct_reads_block_at_offset() {
    let values = reconstruct(0, &pedestrian_combination()).expect("values");
    assert_matches_block(&pedestrian_combination(), &values, 0);
    assert_eq!(values.orientation, Orientation::North);

    let mut shifted = ego_combination();
    shifted.extend(pedestrian_combination());
    let values = reconstruct(7, &shifted).expect("shifted");
    assert_matches_block(&pedestrian_combination(), &values, 0);

    let mut swapped = pedestrian_combination();
    swapped.extend(ego_combination());
    let values = reconstruct(7, &swapped).expect("ego shifted");
    assert_matches_block(&ego_combination(), &values, 0);
    assert_eq!(values.orientation, Orientation::South);
}

#[test]
fn instantiate_builds_entities_in_order() {
    let space = CombinationSpace::new(vec![ego_variation(), pedestrian_variation()]).unwrap();
    let mut combination = ego_combination();
    combination.extend(pedestrian_combination());
    let scene = space.instantiate(&combination).expect("scene");
    assert_eq!(scene.len(), 2);
    let ego = &scene.entities()[0];
    assert_eq!(ego.name, "ego1");
    assert_matches_block(&combination, &ego.values, 0);
    let ped = &scene.entities()[1];
    assert_eq!(ped.name, "ped1");
    assert_matches_block(&combination, &ped.values, 7);
    assert!((ped.values.euclidean_distance() - 40.0f64.hypot(50.0)).abs() < 1e-12);
}

#[test]
fn short_combination_is_an_invariant_violation() {
    let err = reconstruct(1, &pedestrian_combination()).expect_err("must fail");
    assert_eq!(err.info().code, "offset_out_of_range");
    assert!(matches!(err, ccg_core::CcgError::Invariant(_)));

    let space = CombinationSpace::new(vec![ego_variation(), pedestrian_variation()]).unwrap();
    assert!(space.instantiate(&ego_combination()).is_err());
}

#[test]
fn wrong_slot_type_is_an_invariant_violation() {
    let mut combination = pedestrian_combination();
    combination.swap(0, 1);
    let err = reconstruct(0, &combination).expect_err("must fail");
    assert_eq!(err.info().code, "slot_type_mismatch");
}

#[test]
fn invalid_specs_are_refused() {
    let err = CombinationSpace::new(Vec::new()).expect_err("empty");
    assert_eq!(err.info().code, "no_entities");

    let err = CombinationSpace::new(vec![ego_variation(), ego_variation()]).expect_err("dup");
    assert_eq!(err.info().code, "duplicate_name");

    let mut empty_domain = pedestrian_variation();
    empty_domain.schema.height.clear();
    let err = CombinationSpace::new(vec![empty_domain]).expect_err("empty domain");
    assert_eq!(err.info().code, "empty_domain");
    assert_eq!(err.info().context["field"], "height");

    let mut nan = pedestrian_variation();
    nan.schema.width.push(f64::NAN);
    let err = CombinationSpace::new(vec![nan]).expect_err("nan");
    assert_eq!(err.info().code, "non_finite_value");
}

#[test]
fn negative_extents_are_configuration_errors() {
    let mut narrow = pedestrian_variation();
    narrow.schema.width = vec![1.0, -2.0];
    let err = CombinationSpace::new(vec![narrow]).expect_err("negative width");
    assert!(matches!(err, CcgError::Config(_)));
    assert_eq!(err.info().code, "negative_extent");
    assert_eq!(err.info().context["field"], "width");
    assert_eq!(err.info().context["value"], "-2");

    let mut flat = pedestrian_variation();
    flat.schema.height = vec![0.0];
    assert!(CombinationSpace::new(vec![flat]).is_ok());

    let mut behind = pedestrian_variation();
    behind.schema.longitudinal_offset = vec![-5.0];
    assert!(CombinationSpace::new(vec![behind]).is_ok());
}

#[test]
fn schema_rejects_unknown_fields() {
    let json = serde_json::json!({
        "velocity": [1.0], "orientation": ["north"], "width": [1.0], "length": [1.0],
        "height": [1.0], "lateral_offset": [0.0], "longitudinal_offset": [0.0],
        "colour": ["red"]
    });
    assert!(serde_json::from_value::<AttributeSchema>(json).is_err());
}

fn arb_schema() -> impl Strategy<Value = AttributeSchema> {
    let scalars = || prop::collection::vec(-50.0f64..50.0, 1..4);
    let extents = || prop::collection::vec(0.0f64..20.0, 1..4);
    let headings = prop::collection::vec(prop::sample::select(Orientation::ALL.to_vec()), 1..4);
    (
        scalars(),
        headings,
        extents(),
        extents(),
        extents(),
        scalars(),
        scalars(),
    )
        .prop_map(
            |(velocity, orientation, width, length, height, lateral_offset, longitudinal_offset)| {
                AttributeSchema {
                    velocity,
                    orientation,
                    width,
                    length,
                    height,
                    lateral_offset,
                    longitudinal_offset,
                }
            },
        )
}

proptest! {
    #[test]
    fn instantiate_inverts_flatten(
        schemas in prop::collection::vec(arb_schema(), 1..4),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 28),
    ) {
        let specs: Vec<EntityVariationSpec> = schemas
            .into_iter()
            .enumerate()
            .map(|(idx, schema)| {
                EntityVariationSpec::new(ccg_core::EntityKind::Vehicle, format!("car_{idx}"), schema)
            })
            .collect();
        let space = CombinationSpace::new(specs).unwrap();
        let combination: Vec<AttributeValue> = space
            .domains()
            .iter()
            .zip(picks.iter())
            .map(|(domain, pick)| *pick.get(domain))
            .collect();
        let scene = space.instantiate(&combination).unwrap();
        prop_assert_eq!(scene.len(), space.specs().len());
        for (idx, entity) in scene.iter().enumerate() {
            let offset = CombinationSpace::offset_of(idx);
            prop_assert_eq!(&entity.name, &space.specs()[idx].name);
            prop_assert_eq!(combination[offset], AttributeValue::from(entity.values.velocity));
            prop_assert_eq!(combination[offset + 1], AttributeValue::from(entity.values.orientation));
            prop_assert_eq!(combination[offset + 6], AttributeValue::from(entity.values.longitudinal_offset));
        }
    }
}

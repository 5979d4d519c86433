use std::collections::BTreeMap;

use ccg_core::errors::{CcgError, ErrorInfo};
use ccg_core::{AttributeValue, AttributeValues, EntityInstance, Orientation, Scene};

use crate::schema::{validate_specs, AttributeSchema, EntityVariationSpec, Field};

/// Flattened attribute domains of an ordered list of entity specs.
///
/// Entity `k` owns slots `k * FIELD_COUNT .. (k + 1) * FIELD_COUNT`, with fields in
/// canonical [`Field`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinationSpace {
    specs: Vec<EntityVariationSpec>,
    domains: Vec<Vec<AttributeValue>>,
}

impl CombinationSpace {
    /// Validates the specs and flattens their domains.
    pub fn new(specs: Vec<EntityVariationSpec>) -> Result<Self, CcgError> {
        validate_specs(&specs)?;
        let domains = flatten(&specs);
        Ok(Self { specs, domains })
    }

    /// The declared specs in order.
    pub fn specs(&self) -> &[EntityVariationSpec] {
        &self.specs
    }

    /// Flattened domains, one per (entity, field) slot.
    pub fn domains(&self) -> &[Vec<AttributeValue>] {
        &self.domains
    }

    /// Number of slots in one combination.
    pub fn width(&self) -> usize {
        self.domains.len()
    }

    /// Slot offset of the entity at `index`.
    pub fn offset_of(index: usize) -> usize {
        index * AttributeSchema::FIELD_COUNT
    }

    /// Size of the full cartesian product, if it fits in a `u128`.
    pub fn cartesian_size(&self) -> Option<u128> {
        self.domains
            .iter()
            .try_fold(1u128, |acc, domain| acc.checked_mul(domain.len() as u128))
    }

    /// Builds the scene described by one flat combination.
    pub fn instantiate(&self, combination: &[AttributeValue]) -> Result<Scene, CcgError> {
        let mut entities = Vec::with_capacity(self.specs.len());
        let mut offset = 0;
        for spec in &self.specs {
            let values = reconstruct(offset, combination)?;
            entities.push(EntityInstance {
                kind: spec.kind,
                name: spec.name.clone(),
                values,
            });
            offset += AttributeSchema::FIELD_COUNT;
        }
        Ok(Scene::new(entities))
    }
}

/// Concatenates every spec's domains in declaration and canonical field order.
pub fn flatten(specs: &[EntityVariationSpec]) -> Vec<Vec<AttributeValue>> {
    specs.iter().flat_map(|spec| spec.schema.domains()).collect()
}

/// Resolves the entity block starting at `offset`.
///
/// Fails with an invariant violation when the block runs past the end of the
/// combination or a slot carries a value of the wrong type.
pub fn reconstruct(
    offset: usize,
    combination: &[AttributeValue],
) -> Result<AttributeValues, CcgError> {
    let end = offset + AttributeSchema::FIELD_COUNT;
    let Some(block) = combination.get(offset..end) else {
        return Err(CcgError::Invariant(
            ErrorInfo::new("offset_out_of_range", "entity block exceeds combination")
                .with_context("offset", offset.to_string())
                .with_context("len", combination.len().to_string()),
        ));
    };
    let slots: BTreeMap<&'static str, usize> = AttributeSchema::field_offsets();
    let scalar = |field: Field| -> Result<f64, CcgError> {
        let value = block[slots[field.name()]];
        value.as_scalar().ok_or_else(|| slot_type_error(offset, field, &value))
    };
    let orientation = |field: Field| -> Result<Orientation, CcgError> {
        let value = block[slots[field.name()]];
        value
            .as_orientation()
            .ok_or_else(|| slot_type_error(offset, field, &value))
    };
    Ok(AttributeValues {
        velocity: scalar(Field::Velocity)?,
        orientation: orientation(Field::Orientation)?,
        width: scalar(Field::Width)?,
        length: scalar(Field::Length)?,
        height: scalar(Field::Height)?,
        lateral_offset: scalar(Field::LateralOffset)?,
        longitudinal_offset: scalar(Field::LongitudinalOffset)?,
    })
}

fn slot_type_error(offset: usize, field: Field, value: &AttributeValue) -> CcgError {
    CcgError::Invariant(
        ErrorInfo::new("slot_type_mismatch", "combination slot has the wrong value type")
            .with_context("offset", offset.to_string())
            .with_context("field", field.name())
            .with_context("value", value.to_string()),
    )
}

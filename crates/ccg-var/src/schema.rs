use std::collections::{BTreeMap, BTreeSet};

use ccg_core::errors::{CcgError, ErrorInfo};
use ccg_core::{AttributeValue, EntityKind, Orientation};
use serde::{Deserialize, Serialize};

/// Attribute slots of an entity block, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Scalar speed.
    Velocity,
    /// Compass heading.
    Orientation,
    /// Lateral extent.
    Width,
    /// Longitudinal extent.
    Length,
    /// Vertical extent.
    Height,
    /// Lateral position.
    LateralOffset,
    /// Longitudinal position.
    LongitudinalOffset,
}

impl Field {
    /// All fields in canonical block order.
    pub const ALL: [Field; 7] = [
        Field::Velocity,
        Field::Orientation,
        Field::Width,
        Field::Length,
        Field::Height,
        Field::LateralOffset,
        Field::LongitudinalOffset,
    ];

    /// Zero-based slot index within an entity block.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Canonical snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            Field::Velocity => "velocity",
            Field::Orientation => "orientation",
            Field::Width => "width",
            Field::Length => "length",
            Field::Height => "height",
            Field::LateralOffset => "lateral_offset",
            Field::LongitudinalOffset => "longitudinal_offset",
        }
    }
}

/// Candidate values for every attribute of one entity.
///
/// The field set is fixed for all entity kinds so that every entity occupies a
/// block of [`AttributeSchema::FIELD_COUNT`] slots in a flattened combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeSchema {
    /// Candidate speeds.
    pub velocity: Vec<f64>,
    /// Candidate headings.
    pub orientation: Vec<Orientation>,
    /// Candidate widths.
    pub width: Vec<f64>,
    /// Candidate lengths.
    pub length: Vec<f64>,
    /// Candidate heights.
    pub height: Vec<f64>,
    /// Candidate lateral offsets.
    pub lateral_offset: Vec<f64>,
    /// Candidate longitudinal offsets.
    pub longitudinal_offset: Vec<f64>,
}

impl AttributeSchema {
    /// Number of slots each entity occupies in a flattened combination.
    pub const FIELD_COUNT: usize = Field::ALL.len();

    /// Field names in canonical order.
    pub fn field_names() -> Vec<&'static str> {
        Field::ALL.iter().map(|field| field.name()).collect()
    }

    /// Maps every field name to its index within an entity block.
    pub fn field_offsets() -> BTreeMap<&'static str, usize> {
        Field::ALL
            .iter()
            .map(|field| (field.name(), field.index()))
            .collect()
    }

    /// Candidate values of a single field.
    pub fn domain(&self, field: Field) -> Vec<AttributeValue> {
        let scalars = |values: &[f64]| -> Vec<AttributeValue> {
            values.iter().copied().map(AttributeValue::Scalar).collect()
        };
        match field {
            Field::Velocity => scalars(&self.velocity),
            Field::Orientation => self
                .orientation
                .iter()
                .copied()
                .map(AttributeValue::Orientation)
                .collect(),
            Field::Width => scalars(&self.width),
            Field::Length => scalars(&self.length),
            Field::Height => scalars(&self.height),
            Field::LateralOffset => scalars(&self.lateral_offset),
            Field::LongitudinalOffset => scalars(&self.longitudinal_offset),
        }
    }

    /// Candidate values of every field, in canonical order.
    pub fn domains(&self) -> Vec<Vec<AttributeValue>> {
        Field::ALL.iter().map(|field| self.domain(*field)).collect()
    }

    /// Rejects empty domains, non-finite scalars and negative extents.
    pub fn validate(&self, entity: &str) -> Result<(), CcgError> {
        for field in Field::ALL {
            let domain = self.domain(field);
            if domain.is_empty() {
                return Err(CcgError::Config(
                    ErrorInfo::new("empty_domain", "attribute has no candidate values")
                        .with_context("entity", entity)
                        .with_context("field", field.name()),
                ));
            }
            let non_finite = domain
                .iter()
                .filter_map(AttributeValue::as_scalar)
                .find(|value| !value.is_finite());
            if let Some(value) = non_finite {
                return Err(CcgError::Config(
                    ErrorInfo::new("non_finite_value", "attribute candidate is not finite")
                        .with_context("entity", entity)
                        .with_context("field", field.name())
                        .with_context("value", value.to_string()),
                ));
            }
            if !matches!(field, Field::Width | Field::Length | Field::Height) {
                continue;
            }
            let negative = domain
                .iter()
                .filter_map(AttributeValue::as_scalar)
                .find(|value| *value < 0.0);
            if let Some(value) = negative {
                return Err(CcgError::Config(
                    ErrorInfo::new("negative_extent", "extent candidate is negative")
                        .with_context("entity", entity)
                        .with_context("field", field.name())
                        .with_context("value", value.to_string()),
                ));
            }
        }
        Ok(())
    }
}

/// Entity declaration: kind, unique name, and the attribute domains to vary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityVariationSpec {
    /// Entity kind of every instance built from this spec.
    pub kind: EntityKind,
    /// Name unique within the scenario.
    pub name: String,
    /// Attribute domains.
    pub schema: AttributeSchema,
}

impl EntityVariationSpec {
    /// Creates a spec.
    pub fn new(kind: EntityKind, name: impl Into<String>, schema: AttributeSchema) -> Self {
        Self {
            kind,
            name: name.into(),
            schema,
        }
    }
}

/// Checks a spec list for the configuration errors the engine refuses to build from.
pub fn validate_specs(specs: &[EntityVariationSpec]) -> Result<(), CcgError> {
    if specs.is_empty() {
        return Err(CcgError::Config(
            ErrorInfo::new("no_entities", "scenario declares no entities")
                .with_hint("declare at least one entity variation"),
        ));
    }
    let mut seen = BTreeSet::new();
    for spec in specs {
        if spec.name.is_empty() {
            return Err(CcgError::config("empty_name", "entity name must not be empty"));
        }
        if !seen.insert(spec.name.as_str()) {
            return Err(CcgError::Config(
                ErrorInfo::new("duplicate_name", "entity name declared more than once")
                    .with_context("entity", spec.name.clone()),
            ));
        }
        spec.schema.validate(&spec.name)?;
    }
    Ok(())
}

//! Plan document conversion for save and load hand-offs
//!
//! A [`PlanDocument`] is an order-preserving list of loosely typed records:
//! a kind name plus named numeric fields. It performs no I/O; the host
//! decides how the document is encoded and stored.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    Element, ElementId, LineElement, LineKind, Point, SensorElement, SensorKind,
};
use crate::session::state::PlanModel;

/// Document format written by this version
pub const PLAN_VERSION: u32 = 1;

/// Largest element id a document may carry, including assigned ones
///
/// Stays within the exact integer range of an `f64`.
pub const MAX_ELEMENT_ID: u64 = (1 << 53) - 1;

/// Errors that can occur while rebuilding a plan from a document
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeserializationError {
    /// The document was written by a newer, unknown format.
    #[error("Unsupported plan version: {found} (max supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The record's kind names no known element.
    #[error("Element {index}: unknown element kind {kind:?}")]
    UnknownKind { index: usize, kind: String },

    /// A coordinate the kind requires is absent.
    #[error("Element {index} ({kind}): missing numeric field {field:?}")]
    MissingField {
        index: usize,
        kind: String,
        field: &'static str,
    },

    /// A coordinate is NaN or infinite, or too large for the plan.
    #[error("Element {index} ({kind}): field {field:?} is not a finite number")]
    NonFiniteField {
        index: usize,
        kind: String,
        field: &'static str,
    },

    /// Two records claim the same identity.
    #[error("Element {index}: duplicate element id {id}")]
    DuplicateId { index: usize, id: u64 },

    /// The id, given or assigned, is zero or above [`MAX_ELEMENT_ID`].
    #[error("Element {index}: element id {id} is out of range")]
    IdOutOfRange { index: usize, id: u64 },
}

/// One persisted element
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, f64>,
}

impl ElementRecord {
    fn new(kind: &str, id: ElementId, fields: &[(&str, f32)]) -> Self {
        Self {
            kind: kind.to_string(),
            id: Some(id.0),
            fields: fields
                .iter()
                .map(|(name, value)| (name.to_string(), f64::from(*value)))
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanDocument {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub elements: Vec<ElementRecord>,
}

fn default_version() -> u32 {
    PLAN_VERSION
}

impl Default for PlanDocument {
    fn default() -> Self {
        Self {
            version: PLAN_VERSION,
            elements: Vec::new(),
        }
    }
}

/// Snapshot the model as a plan document, in commit order
pub fn serialize(model: &PlanModel) -> PlanDocument {
    let elements = model
        .all()
        .iter()
        .map(|element| match element {
            Element::Line(line) => ElementRecord::new(
                line.kind.as_str(),
                line.id,
                &[
                    ("x1", line.start.x),
                    ("y1", line.start.y),
                    ("x2", line.end.x),
                    ("y2", line.end.y),
                ],
            ),
            Element::Sensor(sensor) => ElementRecord::new(
                sensor.kind.as_str(),
                sensor.id,
                &[("x", sensor.position.x), ("y", sensor.position.y)],
            ),
        })
        .collect();

    PlanDocument {
        version: PLAN_VERSION,
        elements,
    }
}

/// Rebuild the element list a document describes
///
/// Records that carry an id keep it; records without one are numbered after
/// the largest id in the document. Nothing is returned unless every record
/// is valid.
pub fn deserialize(doc: &PlanDocument) -> Result<Vec<Element>, DeserializationError> {
    if doc.version > PLAN_VERSION {
        return Err(DeserializationError::UnsupportedVersion {
            found: doc.version,
            supported: PLAN_VERSION,
        });
    }

    let mut next_fresh = doc
        .elements
        .iter()
        .filter_map(|r| r.id)
        .max()
        .unwrap_or(0)
        .saturating_add(1);
    let mut seen = HashSet::with_capacity(doc.elements.len());
    let mut elements = Vec::with_capacity(doc.elements.len());

    for (index, record) in doc.elements.iter().enumerate() {
        let id = match record.id {
            Some(id) => id,
            None => {
                let id = next_fresh;
                next_fresh = next_fresh.saturating_add(1);
                id
            }
        };
        if id == 0 || id > MAX_ELEMENT_ID {
            return Err(DeserializationError::IdOutOfRange { index, id });
        }
        if !seen.insert(id) {
            return Err(DeserializationError::DuplicateId { index, id });
        }
        elements.push(element_from_record(index, ElementId(id), record)?);
    }

    Ok(elements)
}

fn element_from_record(
    index: usize,
    id: ElementId,
    record: &ElementRecord,
) -> Result<Element, DeserializationError> {
    let field = |name: &'static str| read_field(index, record, name);

    if let Ok(kind) = record.kind.parse::<LineKind>() {
        return Ok(Element::Line(LineElement {
            id,
            kind,
            start: Point::new(field("x1")?, field("y1")?),
            end: Point::new(field("x2")?, field("y2")?),
        }));
    }
    if let Ok(kind) = record.kind.parse::<SensorKind>() {
        return Ok(Element::Sensor(SensorElement {
            id,
            kind,
            position: Point::new(field("x")?, field("y")?),
        }));
    }

    Err(DeserializationError::UnknownKind {
        index,
        kind: record.kind.clone(),
    })
}

fn read_field(
    index: usize,
    record: &ElementRecord,
    name: &'static str,
) -> Result<f32, DeserializationError> {
    let value = *record
        .fields
        .get(name)
        .ok_or_else(|| DeserializationError::MissingField {
            index,
            kind: record.kind.clone(),
            field: name,
        })?;

    let value = value as f32;
    if !value.is_finite() {
        return Err(DeserializationError::NonFiniteField {
            index,
            kind: record.kind.clone(),
            field: name,
        });
    }
    Ok(value)
}

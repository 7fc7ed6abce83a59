//! Dispatch over every element kind this crate validates.
//!
//! A design document is a flat list of records distinguished by `type`.
//! [`parse_element`] routes a record to its validator; [`parse_elements`]
//! validates a whole list and reports every failure, not just the first.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{DocumentError, ElementFailure, SchemaError, SchemaResult};
use crate::ids::IdGenerator;
use crate::pcb::{parse_plated_hole, PcbPlatedHole};
use crate::source::{
    parse_simple_pushbutton, parse_source_component, SourceComponent, SourceSimplePushbutton,
};
use crate::tags::{PlatedHoleType, SimplePushbuttonFtype, SourceComponentType};

/// A validated record of any supported kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Element {
    /// `type = "pcb_plated_hole"`.
    PcbPlatedHole(PcbPlatedHole),
    /// `type = "source_component"`, `ftype = "simple_pushbutton"`.
    SourceSimplePushbutton(SourceSimplePushbutton),
    /// `type = "source_component"` with any other `ftype`.
    SourceComponent(SourceComponent),
}

impl Element {
    /// Returns the record's `type` value.
    #[must_use]
    pub const fn element_type(&self) -> &'static str {
        match self {
            Self::PcbPlatedHole(_) => PlatedHoleType::VALUE,
            Self::SourceSimplePushbutton(_) | Self::SourceComponent(_) => {
                SourceComponentType::VALUE
            }
        }
    }
}

impl From<PcbPlatedHole> for Element {
    fn from(hole: PcbPlatedHole) -> Self {
        Self::PcbPlatedHole(hole)
    }
}

impl From<SourceSimplePushbutton> for Element {
    fn from(button: SourceSimplePushbutton) -> Self {
        Self::SourceSimplePushbutton(button)
    }
}

/// Validates one record, selecting the validator from its `type`.
///
/// # Errors
///
/// Returns [`SchemaError::UnknownElementType`] for an unsupported `type`,
/// otherwise whatever the selected validator reports.
pub fn parse_element(value: &Value, ids: &dyn IdGenerator) -> SchemaResult<Element> {
    let element_type = value.get("type");
    match element_type.and_then(Value::as_str) {
        Some(PlatedHoleType::VALUE) => parse_plated_hole(value, ids).map(Element::PcbPlatedHole),
        Some(SourceComponentType::VALUE) => {
            if value.get("ftype").and_then(Value::as_str) == Some(SimplePushbuttonFtype::VALUE) {
                parse_simple_pushbutton(value).map(Element::SourceSimplePushbutton)
            } else {
                parse_source_component(value).map(Element::SourceComponent)
            }
        }
        _ if !value.is_object() => Err(SchemaError::wrong_type("$", "object", value)),
        _ => Err(SchemaError::unknown_element_type(element_type)),
    }
}

/// Validates every record, preserving input order.
///
/// # Errors
///
/// Returns a [`DocumentError`] listing every rejected record with its index
/// if any record fails.
pub fn parse_elements(values: &[Value], ids: &dyn IdGenerator) -> Result<Vec<Element>, DocumentError> {
    let mut elements = Vec::with_capacity(values.len());
    let mut failures = Vec::new();

    for (index, value) in values.iter().enumerate() {
        match parse_element(value, ids) {
            Ok(element) => elements.push(element),
            Err(error) => {
                warn!(index, error = %error, "Element failed validation");
                failures.push(ElementFailure { index, error });
            }
        }
    }

    debug!(
        total = values.len(),
        failed = failures.len(),
        "Validated elements"
    );

    if failures.is_empty() {
        Ok(elements)
    } else {
        Err(DocumentError {
            total: values.len(),
            failures,
        })
    }
}

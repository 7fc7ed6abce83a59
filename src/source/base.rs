//! The `source_component` base record.
//!
//! Source components describe the logical (schematic-side) parts of a
//! design. Every kind shares this field set and is distinguished by its
//! `ftype`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{SchemaError, SchemaResult};
use crate::fields::{string_list, Record};
use crate::tags::SourceComponentType;

pub(crate) const BASE_FIELDS: &[&str] = &[
    "type",
    "ftype",
    "source_component_id",
    "name",
    "manufacturer_part_number",
    "supplier_part_numbers",
    "display_value",
    "are_pins_interchangeable",
    "internally_connected_source_port_ids",
    "source_group_id",
    "subcircuit_id",
];

/// Fields shared by every source component kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceComponentBase {
    /// Component identifier. Required; never generated.
    pub source_component_id: String,

    /// Reference designator or display name, e.g. `"SW1"`.
    pub name: String,

    /// Manufacturer part number.
    #[serde(
        default,
        deserialize_with = "crate::fields::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub manufacturer_part_number: Option<String>,

    /// Supplier name to supplier part numbers, in authored order.
    #[serde(
        default,
        deserialize_with = "crate::fields::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub supplier_part_numbers: Option<IndexMap<String, Vec<String>>>,

    /// Value shown on the schematic.
    #[serde(
        default,
        deserialize_with = "crate::fields::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub display_value: Option<String>,

    /// Whether pins may be swapped freely during layout.
    #[serde(
        default,
        deserialize_with = "crate::fields::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub are_pins_interchangeable: Option<bool>,

    /// Groups of ports that are connected inside the component.
    #[serde(
        default,
        deserialize_with = "crate::fields::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub internally_connected_source_port_ids: Option<Vec<Vec<String>>>,

    /// Grouping identifier.
    #[serde(
        default,
        deserialize_with = "crate::fields::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_group_id: Option<String>,

    /// Subcircuit identifier.
    #[serde(
        default,
        deserialize_with = "crate::fields::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub subcircuit_id: Option<String>,
}

impl SourceComponentBase {
    /// Creates a base record with only the required fields.
    #[must_use]
    pub fn new(source_component_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            source_component_id: source_component_id.into(),
            name: name.into(),
            manufacturer_part_number: None,
            supplier_part_numbers: None,
            display_value: None,
            are_pins_interchangeable: None,
            internally_connected_source_port_ids: None,
            source_group_id: None,
            subcircuit_id: None,
        }
    }

    pub(crate) fn from_record(record: &Record<'_>) -> SchemaResult<Self> {
        Ok(Self {
            source_component_id: record.required_str("source_component_id")?.to_string(),
            name: record.required_str("name")?.to_string(),
            manufacturer_part_number: record.optional_string("manufacturer_part_number")?,
            supplier_part_numbers: record
                .get("supplier_part_numbers")
                .map(supplier_part_numbers)
                .transpose()?,
            display_value: record.optional_string("display_value")?,
            are_pins_interchangeable: record.optional_bool("are_pins_interchangeable")?,
            internally_connected_source_port_ids: record
                .get("internally_connected_source_port_ids")
                .map(port_groups)
                .transpose()?,
            source_group_id: record.optional_string("source_group_id")?,
            subcircuit_id: record.optional_string("subcircuit_id")?,
        })
    }
}

/// A source component of any `ftype`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceComponent {
    /// Always `"source_component"`.
    #[serde(rename = "type")]
    pub element_type: SourceComponentType,

    /// Functional type, e.g. `"simple_resistor"`.
    #[serde(
        default,
        deserialize_with = "crate::fields::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub ftype: Option<String>,

    /// Shared fields.
    #[serde(flatten)]
    pub base: SourceComponentBase,
}

/// Validates a generic source component record.
///
/// # Errors
///
/// Returns [`SchemaError::LiteralMismatch`] if `type` is not
/// `"source_component"`, and [`SchemaError::MissingField`] /
/// [`SchemaError::WrongType`] for absent or mistyped fields.
pub fn parse_source_component(value: &Value) -> SchemaResult<SourceComponent> {
    let record = Record::new(value)?;
    expect_source_component_type(&record)?;
    let component = SourceComponent {
        element_type: SourceComponentType,
        ftype: record.optional_string("ftype")?,
        base: SourceComponentBase::from_record(&record)?,
    };
    record.log_ignored_fields(SourceComponentType::VALUE, &[BASE_FIELDS]);
    Ok(component)
}

pub(crate) fn expect_source_component_type(record: &Record<'_>) -> SchemaResult<()> {
    match record.get("type") {
        Some(Value::String(t)) if t == SourceComponentType::VALUE => Ok(()),
        other => Err(SchemaError::literal_mismatch(
            "type",
            SourceComponentType::VALUE,
            other,
        )),
    }
}

fn supplier_part_numbers(value: &Value) -> SchemaResult<IndexMap<String, Vec<String>>> {
    let map = value.as_object().ok_or_else(|| {
        SchemaError::wrong_type("supplier_part_numbers", "object of string arrays", value)
    })?;
    map.iter()
        .map(|(supplier, parts)| {
            let field = format!("supplier_part_numbers.{supplier}");
            string_list(&field, parts).map(|list| (supplier.clone(), list))
        })
        .collect()
}

fn port_groups(value: &Value) -> SchemaResult<Vec<Vec<String>>> {
    const FIELD: &str = "internally_connected_source_port_ids";
    let groups = value
        .as_array()
        .ok_or_else(|| SchemaError::wrong_type(FIELD, "array of string arrays", value))?;
    groups
        .iter()
        .enumerate()
        .map(|(i, group)| string_list(&format!("{FIELD}[{i}]"), group))
        .collect()
}

//! The `simple_pushbutton` source component.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{SchemaError, SchemaResult};
use crate::fields::Record;
use crate::source::base::{expect_source_component_type, SourceComponentBase, BASE_FIELDS};
use crate::tags::{SimplePushbuttonFtype, SourceComponentType};

/// A momentary pushbutton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSimplePushbutton {
    /// Always `"source_component"`.
    #[serde(rename = "type")]
    pub element_type: SourceComponentType,

    /// Always `"simple_pushbutton"`.
    pub ftype: SimplePushbuttonFtype,

    /// Shared fields.
    #[serde(flatten)]
    pub base: SourceComponentBase,
}

impl SourceSimplePushbutton {
    /// Creates a pushbutton from its base fields.
    #[must_use]
    pub const fn new(base: SourceComponentBase) -> Self {
        Self {
            element_type: SourceComponentType,
            ftype: SimplePushbuttonFtype,
            base,
        }
    }
}

/// Validates a `simple_pushbutton` record.
///
/// # Errors
///
/// Returns [`SchemaError::LiteralMismatch`] if `type` or `ftype` has the
/// wrong value, [`SchemaError::MissingField`] if `ftype` is absent, and the
/// base record errors described in [`super::parse_source_component`].
pub fn parse_simple_pushbutton(value: &Value) -> SchemaResult<SourceSimplePushbutton> {
    let record = Record::new(value)?;
    expect_source_component_type(&record)?;

    let ftype = record.required("ftype")?;
    if ftype.as_str() != Some(SimplePushbuttonFtype::VALUE) {
        return Err(SchemaError::literal_mismatch(
            "ftype",
            SimplePushbuttonFtype::VALUE,
            Some(ftype),
        ));
    }

    let button = SourceSimplePushbutton::new(SourceComponentBase::from_record(&record)?);
    record.log_ignored_fields(SimplePushbuttonFtype::VALUE, &[BASE_FIELDS]);
    Ok(button)
}

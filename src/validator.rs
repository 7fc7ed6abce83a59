//! A validator bound to one identifier generator.

use std::sync::Arc;

use serde_json::Value;

use crate::element::{parse_element, parse_elements, Element};
use crate::error::{DocumentError, SchemaResult};
use crate::ids::{IdGenerator, RandomIdGenerator};
use crate::pcb::{parse_plated_hole, PcbPlatedHole};

/// Validates records using a shared [`IdGenerator`].
///
/// Cloning is cheap and clones share the generator, so a single validator
/// can be handed to several threads without risking duplicate IDs.
#[derive(Debug, Clone)]
pub struct Validator {
    ids: Arc<dyn IdGenerator>,
}

impl Validator {
    /// Creates a validator that draws IDs from `ids`.
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self { ids }
    }

    /// Returns the generator used for missing IDs.
    #[must_use]
    pub fn id_generator(&self) -> &dyn IdGenerator {
        self.ids.as_ref()
    }

    /// Validates a plated hole record.
    ///
    /// # Errors
    ///
    /// See [`parse_plated_hole`].
    pub fn plated_hole(&self, value: &Value) -> SchemaResult<PcbPlatedHole> {
        parse_plated_hole(value, self.id_generator())
    }

    /// Validates a record of any supported kind.
    ///
    /// # Errors
    ///
    /// See [`parse_element`].
    pub fn element(&self, value: &Value) -> SchemaResult<Element> {
        parse_element(value, self.id_generator())
    }

    /// Validates a list of records.
    ///
    /// # Errors
    ///
    /// See [`parse_elements`].
    pub fn elements(&self, values: &[Value]) -> Result<Vec<Element>, DocumentError> {
        parse_elements(values, self.id_generator())
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(Arc::new(RandomIdGenerator::new()))
    }
}

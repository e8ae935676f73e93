//! Ordered registry of the fields placed on a template.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RegistryError;
use crate::field::{Field, FieldPatch};
use crate::ids::FieldId;

/// Fields in insertion order. Multiple fields may share a type and a role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldRegistry {
    fields: Vec<Field>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field. The caller is responsible for generating a fresh id.
    pub fn add(&mut self, field: Field) -> Result<(), RegistryError> {
        if self.get(&field.id).is_some() {
            return Err(RegistryError::DuplicateField(field.id));
        }
        debug!(id = %field.id, field_type = %field.field_type, "field added");
        self.fields.push(field);
        Ok(())
    }

    /// Merge `patch` into the field with `id`. Returns false if no field matched.
    pub fn update(&mut self, id: &FieldId, patch: &FieldPatch) -> bool {
        match self.get_mut(id) {
            Some(field) => {
                field.apply(patch);
                true
            }
            None => false,
        }
    }

    /// Remove the field with `id`, returning it if it existed.
    pub fn remove(&mut self, id: &FieldId) -> Option<Field> {
        let pos = self.fields.iter().position(|f| &f.id == id)?;
        Some(self.fields.remove(pos))
    }

    pub fn get(&self, id: &FieldId) -> Option<&Field> {
        self.fields.iter().find(|f| &f.id == id)
    }

    fn get_mut(&mut self, id: &FieldId) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| &f.id == id)
    }

    /// All fields in insertion order.
    pub fn all(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Vec<Field>> for FieldRegistry {
    fn from(fields: Vec<Field>) -> Self {
        Self { fields }
    }
}

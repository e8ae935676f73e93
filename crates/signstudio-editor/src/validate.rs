//! Pre-save checks on a template draft.
//!
//! Fail-fast: the first violation in priority order is reported. Field
//! checks run in insertion order, all role references before any label.

use signstudio_core::{Field, FieldId, RoleId, RoleRegistry};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("template title is required")]
    MissingTitle,

    #[error("add at least one field before saving")]
    NoFields,

    #[error("field {field_id} is assigned to a role that does not exist ({recipient_id})")]
    UnknownRecipient { field_id: FieldId, recipient_id: RoleId },

    #[error("text field {field_id} needs a label")]
    MissingLabel { field_id: FieldId },
}

impl ValidationError {
    /// The field the violation is about, if any. It becomes the selection.
    pub fn field_id(&self) -> Option<&FieldId> {
        match self {
            Self::UnknownRecipient { field_id, .. } | Self::MissingLabel { field_id } => {
                Some(field_id)
            }
            Self::MissingTitle | Self::NoFields => None,
        }
    }
}

/// Check `title`, `fields` and `roles` for the first violation.
pub fn check(title: &str, fields: &[Field], roles: &RoleRegistry) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::MissingTitle);
    }
    if fields.is_empty() {
        return Err(ValidationError::NoFields);
    }
    if let Some(field) = fields.iter().find(|f| !roles.contains(&f.recipient_id)) {
        return Err(ValidationError::UnknownRecipient {
            field_id: field.id.clone(),
            recipient_id: field.recipient_id.clone(),
        });
    }
    if let Some(field) = fields
        .iter()
        .find(|f| f.field_type.requires_label() && f.trimmed_label().is_none())
    {
        return Err(ValidationError::MissingLabel {
            field_id: field.id.clone(),
        });
    }
    Ok(())
}

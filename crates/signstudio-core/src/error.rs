use thiserror::Error;

use crate::ids::{FieldId, RoleId};

#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("field id already in use: {0}")]
    DuplicateField(FieldId),

    #[error("role id already in use: {0}")]
    DuplicateRole(RoleId),

    #[error("no such role: {0}")]
    UnknownRole(RoleId),

    #[error("{0} id sequence exhausted")]
    IdsExhausted(&'static str),
}

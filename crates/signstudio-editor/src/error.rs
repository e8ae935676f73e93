use signstudio_core::{RegistryError, UploadError};
use signstudio_core::field::UnknownFieldType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DropError {
    #[error("drop payload is not a field type: {0}")]
    Payload(#[from] UnknownFieldType),

    #[error("template has no roles to assign the field to")]
    NoRoles,

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[derive(Debug, Error)]
pub enum DraftFileError {
    #[error("reading or writing draft file: {0}")]
    Io(#[from] std::io::Error),

    #[error("draft JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("draft file is inconsistent: {0}")]
    Registry(#[from] RegistryError),

    #[error("draft file has an unacceptable source document: {0}")]
    Upload(#[from] UploadError),
}

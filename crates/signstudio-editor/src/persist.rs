//! JSON draft files, as loaded and written by the CLI.

use std::path::Path;

use serde::{Deserialize, Serialize};
use signstudio_core::{Field, FieldRegistry, Role, RoleRegistry, SourceDocument};
use tracing::info;

use crate::draft::TemplateDraft;
use crate::error::DraftFileError;

/// On-disk shape of a template draft. Interaction state is not persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftFile {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<SourceDocument>,
    pub roles: Vec<Role>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl From<&TemplateDraft> for DraftFile {
    fn from(draft: &TemplateDraft) -> Self {
        Self {
            title: draft.title().to_string(),
            document: draft.document().cloned(),
            roles: draft.roles().all().to_vec(),
            fields: draft.fields().all().to_vec(),
        }
    }
}

impl TryFrom<DraftFile> for TemplateDraft {
    type Error = DraftFileError;

    /// Rebuilds the registries and re-checks the source document, applying
    /// the same rules as live edits: unique field and role ids, a PDF of at
    /// most 10 MiB.
    fn try_from(file: DraftFile) -> Result<Self, Self::Error> {
        let document = file
            .document
            .map(|doc| SourceDocument::new(doc.file_name, doc.size_bytes))
            .transpose()?;
        let roles = RoleRegistry::try_from(file.roles)?;
        let mut fields = FieldRegistry::new();
        for field in file.fields {
            fields.add(field)?;
        }
        TemplateDraft::from_parts(file.title, document, fields, roles).map_err(DraftFileError::from)
    }
}

pub fn load(path: &Path) -> Result<TemplateDraft, DraftFileError> {
    let text = std::fs::read_to_string(path)?;
    let file: DraftFile = serde_json::from_str(&text)?;
    let draft = TemplateDraft::try_from(file)?;
    info!(path = %path.display(), fields = draft.fields().len(), "draft loaded");
    Ok(draft)
}

pub fn store(draft: &TemplateDraft, path: &Path) -> Result<(), DraftFileError> {
    let json = serde_json::to_string_pretty(&DraftFile::from(draft))?;
    std::fs::write(path, json)?;
    info!(path = %path.display(), "draft written");
    Ok(())
}

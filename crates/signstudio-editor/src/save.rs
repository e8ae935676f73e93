//! Simulated template save.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::draft::TemplateDraft;
use crate::validate::ValidationError;

/// Latency of the stubbed storage call.
pub const SIMULATED_SAVE_DELAY: Duration = Duration::from_millis(1000);

/// What the template list view shows after a successful save.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedTemplate {
    pub title: String,
    pub field_count: usize,
    pub role_count: usize,
    pub saved_at: DateTime<Utc>,
}

/// Validate the draft and, if it passes, persist it after `delay`.
///
/// A validation failure returns immediately and leaves every edit in place;
/// the offending field, if any, is selected.
pub async fn save(draft: &mut TemplateDraft, delay: Duration) -> Result<SavedTemplate, ValidationError> {
    draft.validate()?;
    tokio::time::sleep(delay).await;
    let saved = SavedTemplate {
        title: draft.title().trim().to_string(),
        field_count: draft.fields().len(),
        role_count: draft.roles().len(),
        saved_at: Utc::now(),
    };
    info!(
        title = %saved.title,
        fields = saved.field_count,
        roles = saved.role_count,
        "template saved"
    );
    Ok(saved)
}

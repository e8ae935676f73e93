//! Headless template field editor.
//!
//! Drives field placement on a document canvas from pointer and
//! drag-and-drop events: palette drops, field drags, property edits,
//! pre-save validation, and the audit side panel.

pub mod audit_panel;
pub mod drag;
pub mod draft;
pub mod drop_zone;
mod error;
pub mod persist;
pub mod save;
pub mod validate;

pub use audit_panel::{AuditPanel, PanelView};
pub use drag::{DragController, DragSession};
pub use draft::TemplateDraft;
pub use drop_zone::DropZone;
pub use error::{DraftFileError, DropError};
pub use persist::DraftFile;
pub use save::{SIMULATED_SAVE_DELAY, SavedTemplate, save};
pub use validate::ValidationError;

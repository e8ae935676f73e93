//! Side panel slot holding the latest template audit.
//!
//! Each audit request takes a generation number. A completion is applied
//! only if no newer request was issued since, so an older, slower response
//! can never overwrite a newer one.

use signstudio_core::AuditResult;
use tracing::debug;

/// What the editor's side panel is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelView {
    #[default]
    Properties,
    Audit,
}

#[derive(Debug, Clone, Default)]
pub struct AuditPanel {
    generation: u64,
    pending: bool,
    result: Option<AuditResult>,
    view: PanelView,
}

impl AuditPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new audit request and switch the panel to the audit view.
    /// Returns the generation the completion must present.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.pending = true;
        self.view = PanelView::Audit;
        self.generation
    }

    /// Apply a completed audit. Returns false, discarding `result`, if a
    /// newer request has been issued since `generation` was handed out.
    pub fn complete(&mut self, generation: u64, result: AuditResult) -> bool {
        if generation != self.generation {
            debug!(generation, latest = self.generation, "discarding stale audit");
            return false;
        }
        self.pending = false;
        self.result = Some(result);
        true
    }

    /// Switch back to field properties. The audit result is cleared and any
    /// in-flight request becomes stale.
    pub fn show_properties(&mut self) {
        self.generation += 1;
        self.pending = false;
        self.result = None;
        self.view = PanelView::Properties;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn result(&self) -> Option<&AuditResult> {
        self.result.as_ref()
    }

    pub fn view(&self) -> PanelView {
        self.view
    }
}

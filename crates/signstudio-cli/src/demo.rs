//! Scripted editing session on a simulated US Letter canvas.
//!
//! Replays the events a browser would deliver: palette drops, a field drag
//! that overshoots the page, a failed save, the label fix, and a final save.

use std::time::Duration;

use anyhow::Context;
use signstudio_core::{CanvasRect, FieldId, Point};
use signstudio_editor::{TemplateDraft, ValidationError};
use tracing::info;

/// 8.5in x 11in at 96 dpi, offset by the editor chrome.
pub const LETTER_CANVAS: CanvasRect = CanvasRect::new(240.0, 72.0, 816.0, 1056.0);

pub struct DemoOutcome {
    pub draft: TemplateDraft,
    pub first_error: Option<ValidationError>,
    pub signature: FieldId,
    pub text: FieldId,
}

fn at(x: f64, y: f64) -> Point {
    Point::new(LETTER_CANVAS.left + x, LETTER_CANVAS.top + y)
}

pub fn run_scenario() -> anyhow::Result<DemoOutcome> {
    let canvas = LETTER_CANVAS;
    let mut draft = TemplateDraft::new("Annual Gift Agreement");
    draft
        .attach_document("annual-gift-agreement.pdf", 182_044)
        .context("attaching source document")?;

    // Signature near the bottom of the page.
    draft.drag_enter();
    draft.drag_enter();
    draft.drag_leave();
    let signature = draft
        .drop_field("signature", at(200.0, 900.0), &canvas)
        .context("dropping signature field")?;
    info!(id = %signature, "dropped signature");

    // Name field, left without a label.
    draft.drag_enter();
    let text = draft
        .drop_field("text", at(200.0, 300.0), &canvas)
        .context("dropping text field")?;
    info!(id = %text, "dropped text");

    // Drag the signature well past the bottom-right corner; it stops at the edge.
    draft.pointer_down(&signature, at(200.0, 900.0), &canvas);
    for step in 1..=5 {
        let d = step as f64 * 200.0;
        draft.pointer_move(at(200.0 + d, 900.0 + d), &canvas);
    }
    draft.pointer_up();

    let first_error = draft.validate().err();
    draft.set_label(&text, "Full Name");

    Ok(DemoOutcome {
        draft,
        first_error,
        signature,
        text,
    })
}

/// Save delay used by the demo, shorter than the editor default.
pub const DEMO_SAVE_DELAY: Duration = Duration::from_millis(250);

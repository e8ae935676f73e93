//! Pointer-driven move of a single placed field.
//!
//! A session lives from pointer-down on a field until pointer-up anywhere.
//! Moves are tracked even while the pointer is outside the canvas; the
//! field's box is clamped to the canvas on every move, so the last computed
//! position is always a valid final position.

use signstudio_core::geometry::{self, CanvasRect, Point, Size};
use signstudio_core::{Field, FieldId};

/// State captured when a drag starts. Immutable for the session.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub field_id: FieldId,
    /// Field size in canvas percentages at drag start.
    pub size: Size,
    /// Pixel offset from the field's top-left corner to the pointer.
    pub offset: Point,
}

/// Idle / Dragging state machine. At most one session is live.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Start dragging `field`. Returns false, leaving the live session
    /// untouched, if a drag is already in progress.
    pub fn begin(&mut self, field: &Field, pointer: Point, canvas: &CanvasRect) -> bool {
        if self.session.is_some() {
            return false;
        }
        let top_left = geometry::percent_to_pixel(field.geometry.origin(), canvas);
        let local = canvas.to_local(pointer);
        self.session = Some(DragSession {
            field_id: field.id.clone(),
            size: field.geometry.size(),
            offset: Point::new(local.x - top_left.x, local.y - top_left.y),
        });
        true
    }

    /// New top-left position, in percentages, for the dragged field given the
    /// pointer's current position. `None` when idle or the canvas has no area.
    pub fn track(&self, pointer: Point, canvas: &CanvasRect) -> Option<(&FieldId, Point)> {
        let session = self.session.as_ref()?;
        if canvas.is_degenerate() {
            return None;
        }
        let local = canvas.to_local(pointer);
        let candidate = Point::new(local.x - session.offset.x, local.y - session.offset.y);
        let size_px = geometry::size_to_pixel(session.size, canvas);
        let clamped = geometry::clamp_position(candidate, size_px, canvas);
        Some((&session.field_id, geometry::pixel_to_percent(clamped, canvas)))
    }

    /// End the session, returning it if one was live.
    pub fn end(&mut self) -> Option<DragSession> {
        self.session.take()
    }
}

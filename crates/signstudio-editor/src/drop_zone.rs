//! Palette-to-canvas drag and drop.
//!
//! Native drag-and-drop fires enter/leave for every child element the drag
//! crosses inside the drop target. [`DropZone`] counts nesting depth so the
//! hover affordance only clears when the drag leaves the outer boundary.

use signstudio_core::geometry::{self, CanvasRect, Point};
use signstudio_core::{FieldType, Geometry};

/// Hover state of the canvas drop target.
#[derive(Debug, Clone, Default)]
pub struct DropZone {
    depth: u32,
}

impl DropZone {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a palette drag is currently over the canvas.
    pub fn is_hovering(&self) -> bool {
        self.depth > 0
    }

    pub fn drag_enter(&mut self) {
        self.depth += 1;
    }

    pub fn drag_leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Drop or abandoned drag: the drag is no longer over any element.
    pub fn reset(&mut self) {
        self.depth = 0;
    }
}

/// Geometry, in percentages, for a new field of `field_type` dropped at
/// `pointer`: default size, centered on the drop point, clamped on-canvas.
pub fn placement(field_type: FieldType, pointer: Point, canvas: &CanvasRect) -> Geometry {
    let size = field_type.default_size();
    let size_px = geometry::size_to_pixel(size, canvas);
    let local = canvas.to_local(pointer);
    let top_left = Point::new(local.x - size_px.width / 2.0, local.y - size_px.height / 2.0);
    let clamped = geometry::clamp_position(top_left, size_px, canvas);
    Geometry::new(geometry::pixel_to_percent(clamped, canvas), size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use signstudio_core::Size;

    const EPS: f64 = 1e-9;

    #[test]
    fn nested_enter_leave_keeps_hover() {
        let mut zone = DropZone::new();
        zone.drag_enter(); // canvas
        zone.drag_enter(); // page image
        zone.drag_leave(); // left canvas for page image
        assert!(zone.is_hovering());
        zone.drag_enter(); // existing field overlay
        zone.drag_leave();
        zone.drag_leave(); // left the canvas itself
        assert!(!zone.is_hovering());
    }

    #[test]
    fn leave_without_enter_does_not_underflow() {
        let mut zone = DropZone::new();
        zone.drag_leave();
        assert!(!zone.is_hovering());
        zone.drag_enter();
        assert!(zone.is_hovering());
    }

    #[test]
    fn reset_clears_hover() {
        let mut zone = DropZone::new();
        zone.drag_enter();
        zone.drag_enter();
        zone.reset();
        assert!(!zone.is_hovering());
    }

    #[test]
    fn drop_centers_on_pointer() {
        let canvas = CanvasRect::new(40.0, 80.0, 800.0, 1000.0);
        let pointer = Point::new(40.0 + 400.0, 80.0 + 500.0);
        let g = placement(FieldType::Signature, pointer, &canvas);
        let center = g.center();
        assert!((center.x - 50.0).abs() < EPS);
        assert!((center.y - 50.0).abs() < EPS);
        assert_eq!(g.size(), Size::new(20.0, 5.0));
    }

    #[test]
    fn drop_near_edge_is_clamped() {
        let canvas = CanvasRect::new(0.0, 0.0, 800.0, 1000.0);
        let g = placement(FieldType::Date, Point::new(795.0, 2.0), &canvas);
        assert!((g.x + g.width - 100.0).abs() < EPS);
        assert_eq!(g.y, 0.0);
    }

    #[test]
    fn checkbox_gets_small_default() {
        let canvas = CanvasRect::new(0.0, 0.0, 800.0, 1000.0);
        let g = placement(FieldType::Checkbox, Point::new(400.0, 500.0), &canvas);
        assert_eq!(g.size(), Size::new(5.0, 5.0));
    }
}

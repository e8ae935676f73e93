//! The template being authored and every edit the canvas and side panel make.
//!
//! [`TemplateDraft`] owns the field and role registries, the selection, the
//! drag and drop interaction state, and the audit panel. UI toolkits feed it
//! pointer and drag-and-drop events together with the canvas's current pixel
//! bounding box; the draft does the geometry.

use signstudio_core::geometry::{self, CanvasRect, Point, Size};
use signstudio_core::{
    Field, FieldId, FieldPatch, FieldRegistry, FieldType, MIN_FIELD_PERCENT, RegistryError,
    RoleId, RoleRegistry, SourceDocument, UploadError,
};
use tracing::{debug, info, warn};

use crate::audit_panel::{AuditPanel, PanelView};
use crate::drag::DragController;
use crate::drop_zone::{self, DropZone};
use crate::error::DropError;
use crate::validate::{self, ValidationError};

#[derive(Debug, Clone)]
pub struct TemplateDraft {
    title: String,
    document: Option<SourceDocument>,
    fields: FieldRegistry,
    roles: RoleRegistry,
    selected: Option<FieldId>,
    next_field: u64,
    drag: DragController,
    drop_zone: DropZone,
    audit: AuditPanel,
}

impl Default for TemplateDraft {
    fn default() -> Self {
        Self::new("")
    }
}

impl TemplateDraft {
    /// A blank template with the two default signer roles.
    pub fn new(title: impl Into<String>) -> Self {
        Self::assemble(title.into(), None, FieldRegistry::new(), RoleRegistry::with_defaults(), 1)
    }

    /// Reassemble a draft, e.g. after loading it from disk. Field id
    /// generation resumes past the highest existing `field-N`; a draft whose
    /// field ids have used up the sequence is rejected.
    pub fn from_parts(
        title: String,
        document: Option<SourceDocument>,
        fields: FieldRegistry,
        roles: RoleRegistry,
    ) -> Result<Self, RegistryError> {
        let next_field =
            signstudio_core::ids::next_sequence(fields.all().iter().map(|f| &f.id), FieldId::sequence)
                .ok_or(RegistryError::IdsExhausted(FieldId::PREFIX))?;
        Ok(Self::assemble(title, document, fields, roles, next_field))
    }

    fn assemble(
        title: String,
        document: Option<SourceDocument>,
        fields: FieldRegistry,
        roles: RoleRegistry,
        next_field: u64,
    ) -> Self {
        Self {
            title,
            document,
            fields,
            roles,
            selected: None,
            next_field,
            drag: DragController::new(),
            drop_zone: DropZone::new(),
            audit: AuditPanel::new(),
        }
    }

    // ── Document ──

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn document(&self) -> Option<&SourceDocument> {
        self.document.as_ref()
    }

    /// Attach the PDF the template is authored on, replacing any previous one.
    pub fn attach_document(&mut self, file_name: &str, size_bytes: u64) -> Result<(), UploadError> {
        let doc = SourceDocument::new(file_name, size_bytes)?;
        info!(file = %doc.file_name, size_bytes, "source document attached");
        self.document = Some(doc);
        Ok(())
    }

    // ── Registries ──

    pub fn fields(&self) -> &FieldRegistry {
        &self.fields
    }

    pub fn roles(&self) -> &RoleRegistry {
        &self.roles
    }

    pub fn field(&self, id: &FieldId) -> Option<&Field> {
        self.fields.get(id)
    }

    pub fn add_role(&mut self) -> Result<RoleId, RegistryError> {
        Ok(self.roles.add()?.id.clone())
    }

    pub fn rename_role(&mut self, id: &RoleId, name: &str) -> Result<(), RegistryError> {
        self.roles.rename(id, name)
    }

    // ── Selection ──

    pub fn selected(&self) -> Option<&FieldId> {
        self.selected.as_ref()
    }

    /// Select a field, opening its properties panel. Unknown ids clear the selection.
    pub fn select(&mut self, id: &FieldId) {
        self.selected = self.fields.get(id).map(|f| f.id.clone());
        if self.selected.is_some() && self.audit.view() == PanelView::Audit {
            self.audit.show_properties();
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    // ── Pointer drag ──

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Pointer pressed on a field. Starts a drag and selects the field.
    /// Ignored while another drag is live or if the field does not exist.
    pub fn pointer_down(&mut self, id: &FieldId, pointer: Point, canvas: &CanvasRect) -> bool {
        let Some(field) = self.fields.get(id) else {
            return false;
        };
        if !self.drag.begin(field, pointer, canvas) {
            debug!(id = %id, "pointer down ignored, drag already live");
            return false;
        }
        self.select(id);
        true
    }

    /// Pointer moved anywhere while a drag may be live. Returns true if a
    /// field moved.
    pub fn pointer_move(&mut self, pointer: Point, canvas: &CanvasRect) -> bool {
        let Some((id, pos)) = self.drag.track(pointer, canvas) else {
            return false;
        };
        let id = id.clone();
        debug!(id = %id, x = pos.x, y = pos.y, "field dragged");
        self.fields.update(&id, &FieldPatch::position(pos))
    }

    /// Pointer released anywhere. The last tracked position is final.
    pub fn pointer_up(&mut self) -> Option<FieldId> {
        self.drag.end().map(|session| session.field_id)
    }

    // ── Palette drop ──

    pub fn is_drop_hover(&self) -> bool {
        self.drop_zone.is_hovering()
    }

    pub fn drag_enter(&mut self) {
        self.drop_zone.drag_enter();
    }

    pub fn drag_leave(&mut self) {
        self.drop_zone.drag_leave();
    }

    /// A palette item was dropped on the canvas. `payload` carries the field
    /// type name. The new field is assigned to the first role, marked
    /// required and selected.
    pub fn drop_field(
        &mut self,
        payload: &str,
        pointer: Point,
        canvas: &CanvasRect,
    ) -> Result<FieldId, DropError> {
        self.drop_zone.reset();
        let field_type = payload.parse::<FieldType>().inspect_err(|e| {
            warn!(error = %e, "ignoring drop");
        })?;
        let recipient = self.roles.first().ok_or(DropError::NoRoles)?.id.clone();
        let next_field = self
            .next_field
            .checked_add(1)
            .ok_or(RegistryError::IdsExhausted(FieldId::PREFIX))?;

        let id = FieldId::numbered(self.next_field);
        let field = Field {
            id: id.clone(),
            field_type,
            geometry: drop_zone::placement(field_type, pointer, canvas),
            recipient_id: recipient,
            required: true,
            label: None,
        };
        self.fields.add(field)?;
        self.next_field = next_field;
        info!(id = %id, field_type = %field_type, "field placed");
        self.select(&id);
        Ok(id)
    }

    // ── Properties panel ──

    /// Reassign a field to `role`. Fails if the role does not exist.
    pub fn set_recipient(&mut self, id: &FieldId, role: &RoleId) -> Result<bool, RegistryError> {
        if !self.roles.contains(role) {
            return Err(RegistryError::UnknownRole(role.clone()));
        }
        Ok(self.fields.update(id, &FieldPatch::recipient(role.clone())))
    }

    pub fn set_required(&mut self, id: &FieldId, required: bool) -> bool {
        self.fields.update(id, &FieldPatch::required(required))
    }

    /// Set the label. Blank input clears it.
    pub fn set_label(&mut self, id: &FieldId, label: &str) -> bool {
        let label = Some(label.to_string()).filter(|l| !l.trim().is_empty());
        self.fields.update(id, &FieldPatch::label(label))
    }

    /// Numeric width/height entry. Values are clamped so the box stays on the
    /// canvas: at least [`MIN_FIELD_PERCENT`], at most `100 - x` / `100 - y`.
    /// A field too close to the far edge for the minimum size is pulled back.
    pub fn resize(&mut self, id: &FieldId, width: f64, height: f64) -> bool {
        let Some(field) = self.fields.get(id) else {
            return false;
        };
        let g = field.geometry;
        let clamped = Size::new(
            width.min(100.0 - g.x).max(MIN_FIELD_PERCENT),
            height.min(100.0 - g.y).max(MIN_FIELD_PERCENT),
        );
        let origin = geometry::clamp_percent(g.origin(), clamped);
        if clamped != Size::new(width, height) || origin != g.origin() {
            debug!(
                id = %id,
                width,
                height,
                clamped_width = clamped.width,
                clamped_height = clamped.height,
                x = origin.x,
                y = origin.y,
                "size clamped to canvas"
            );
        }
        let patch = FieldPatch {
            x: Some(origin.x),
            y: Some(origin.y),
            ..FieldPatch::size(clamped)
        };
        self.fields.update(id, &patch)
    }

    /// Delete a field, clearing the selection and any drag that targets it.
    pub fn delete_field(&mut self, id: &FieldId) -> Option<Field> {
        let removed = self.fields.remove(id)?;
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        if self.drag.session().is_some_and(|s| &s.field_id == id) {
            self.drag.end();
        }
        info!(id = %id, "field deleted");
        Some(removed)
    }

    // ── Validation and audit ──

    /// Run the pre-save checks. On a field-level violation the offending
    /// field becomes the selection.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        let result = validate::check(&self.title, self.fields.all(), &self.roles);
        if let Err(err) = &result {
            warn!(error = %err, "template validation failed");
            if let Some(id) = err.field_id().cloned() {
                self.select(&id);
            }
        }
        result
    }

    pub fn audit_panel(&self) -> &AuditPanel {
        &self.audit
    }

    pub fn audit_panel_mut(&mut self) -> &mut AuditPanel {
        &mut self.audit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signstudio_core::Geometry;

    const EPS: f64 = 1e-9;

    fn canvas() -> CanvasRect {
        CanvasRect::new(0.0, 0.0, 800.0, 1000.0)
    }

    fn center() -> Point {
        Point::new(400.0, 500.0)
    }

    #[test]
    fn new_draft_has_two_roles_and_no_fields() {
        let draft = TemplateDraft::new("Pledge");
        assert_eq!(draft.roles().len(), 2);
        assert!(draft.fields().is_empty());
        assert!(draft.selected().is_none());
    }

    #[test]
    fn drop_assigns_first_role_and_selects() {
        let mut draft = TemplateDraft::new("Pledge");
        draft.drag_enter();
        assert!(draft.is_drop_hover());
        let id = draft.drop_field("date", center(), &canvas()).unwrap();

        assert!(!draft.is_drop_hover());
        let field = draft.field(&id).unwrap();
        assert_eq!(field.field_type, FieldType::Date);
        assert_eq!(field.recipient_id, draft.roles().all()[0].id);
        assert!(field.required);
        assert_eq!(draft.selected(), Some(&id));
    }

    #[test]
    fn drop_generates_fresh_ids() {
        let mut draft = TemplateDraft::new("Pledge");
        let a = draft.drop_field("signature", center(), &canvas()).unwrap();
        let b = draft.drop_field("signature", center(), &canvas()).unwrap();
        assert_ne!(a, b);
        assert_eq!(draft.fields().len(), 2);
    }

    #[test]
    fn unknown_payload_is_ignored() {
        let mut draft = TemplateDraft::new("Pledge");
        draft.drag_enter();
        let err = draft.drop_field("stamp", center(), &canvas()).unwrap_err();
        assert!(matches!(err, DropError::Payload(_)));
        assert!(draft.fields().is_empty());
        assert!(!draft.is_drop_hover());
    }

    #[test]
    fn drop_without_roles_fails() {
        let mut draft = TemplateDraft::from_parts(
            "Pledge".into(),
            None,
            FieldRegistry::new(),
            RoleRegistry::empty(),
        )
        .unwrap();
        assert!(matches!(
            draft.drop_field("text", center(), &canvas()),
            Err(DropError::NoRoles)
        ));
    }

    #[test]
    fn drag_moves_only_position() {
        let mut draft = TemplateDraft::new("Pledge");
        let id = draft.drop_field("signature", center(), &canvas()).unwrap();
        draft.clear_selection();

        // Grab the field at its center, which is also the drop point.
        assert!(draft.pointer_down(&id, center(), &canvas()));
        assert_eq!(draft.selected(), Some(&id));
        assert!(draft.pointer_move(Point::new(480.0, 600.0), &canvas()));
        assert_eq!(draft.pointer_up(), Some(id.clone()));

        let g = draft.field(&id).unwrap().geometry;
        assert!((g.center().x - 60.0).abs() < EPS);
        assert!((g.center().y - 60.0).abs() < EPS);
        assert_eq!(g.size(), Size::new(20.0, 5.0));
        assert!(!draft.pointer_move(Point::new(0.0, 0.0), &canvas()));
    }

    #[test]
    fn drag_clamps_to_canvas_edges() {
        let mut draft = TemplateDraft::new("Pledge");
        let id = draft.drop_field("signature", center(), &canvas()).unwrap();
        draft.pointer_down(&id, center(), &canvas());

        draft.pointer_move(Point::new(-500.0, -500.0), &canvas());
        let g = draft.field(&id).unwrap().geometry;
        assert_eq!((g.x, g.y), (0.0, 0.0));

        draft.pointer_move(Point::new(9_000.0, 9_000.0), &canvas());
        let g = draft.field(&id).unwrap().geometry;
        assert!((g.x + g.width - 100.0).abs() < EPS);
        assert!((g.y + g.height - 100.0).abs() < EPS);
        draft.pointer_up();
    }

    #[test]
    fn second_pointer_down_during_drag_is_ignored() {
        let mut draft = TemplateDraft::new("Pledge");
        let a = draft.drop_field("signature", Point::new(200.0, 200.0), &canvas()).unwrap();
        let b = draft.drop_field("initials", Point::new(600.0, 800.0), &canvas()).unwrap();

        assert!(draft.pointer_down(&a, Point::new(200.0, 200.0), &canvas()));
        assert!(!draft.pointer_down(&b, Point::new(600.0, 800.0), &canvas()));
        assert_eq!(draft.selected(), Some(&a));

        let before_b = draft.field(&b).unwrap().geometry;
        draft.pointer_move(Point::new(300.0, 300.0), &canvas());
        assert_eq!(draft.field(&b).unwrap().geometry, before_b);
        assert_eq!(draft.pointer_up(), Some(a));
    }

    #[test]
    fn delete_clears_selection_and_drag() {
        let mut draft = TemplateDraft::new("Pledge");
        let id = draft.drop_field("text", center(), &canvas()).unwrap();
        draft.pointer_down(&id, center(), &canvas());

        assert!(draft.delete_field(&id).is_some());
        assert!(draft.selected().is_none());
        assert!(!draft.is_dragging());
        assert!(draft.delete_field(&id).is_none());
    }

    #[test]
    fn delete_other_field_keeps_selection() {
        let mut draft = TemplateDraft::new("Pledge");
        let a = draft.drop_field("text", center(), &canvas()).unwrap();
        let b = draft.drop_field("date", center(), &canvas()).unwrap();
        assert_eq!(draft.selected(), Some(&b));
        draft.delete_field(&a);
        assert_eq!(draft.selected(), Some(&b));
    }

    #[test]
    fn resize_clamps_to_canvas() {
        let mut draft = TemplateDraft::new("Pledge");
        let id = draft.drop_field("text", center(), &canvas()).unwrap();
        let g = draft.field(&id).unwrap().geometry;

        assert!(draft.resize(&id, 150.0, 0.0));
        let resized = draft.field(&id).unwrap().geometry;
        assert!((resized.width - (100.0 - g.x)).abs() < EPS);
        assert_eq!(resized.height, MIN_FIELD_PERCENT);
        assert!(resized.x + resized.width <= 100.0 + EPS);

        assert!(draft.resize(&id, 25.0, 10.0));
        assert_eq!(draft.field(&id).unwrap().geometry.size(), Size::new(25.0, 10.0));
    }

    #[test]
    fn resize_near_far_edge_pulls_field_back() {
        let edge = Field {
            id: FieldId::numbered(1),
            field_type: FieldType::Checkbox,
            geometry: Geometry::new(Point::new(99.5, 99.6), Size::new(0.5, 0.4)),
            recipient_id: RoleId::numbered(1),
            required: false,
            label: None,
        };
        let mut draft = TemplateDraft::from_parts(
            "Pledge".into(),
            None,
            FieldRegistry::from(vec![edge]),
            RoleRegistry::with_defaults(),
        )
        .unwrap();
        let id = FieldId::numbered(1);

        assert!(draft.resize(&id, 10.0, 10.0));
        let g = draft.field(&id).unwrap().geometry;
        assert_eq!(g.size(), Size::new(MIN_FIELD_PERCENT, MIN_FIELD_PERCENT));
        assert!(g.x + g.width <= 100.0 + EPS);
        assert!(g.y + g.height <= 100.0 + EPS);
        assert!((g.x - 99.0).abs() < EPS);
    }

    #[test]
    fn field_ids_exhausted_on_load_and_drop() {
        let last = Field {
            id: FieldId::numbered(u64::MAX),
            field_type: FieldType::Signature,
            geometry: Geometry::new(Point::new(10.0, 10.0), FieldType::Signature.default_size()),
            recipient_id: RoleId::numbered(1),
            required: true,
            label: None,
        };
        let err = TemplateDraft::from_parts(
            "Pledge".into(),
            None,
            FieldRegistry::from(vec![last]),
            RoleRegistry::with_defaults(),
        )
        .unwrap_err();
        assert_eq!(err, RegistryError::IdsExhausted(FieldId::PREFIX));

        let mut draft = TemplateDraft::new("Pledge");
        draft.next_field = u64::MAX;
        let err = draft.drop_field("date", center(), &canvas()).unwrap_err();
        assert!(matches!(err, DropError::Registry(RegistryError::IdsExhausted(_))));
        assert!(draft.fields().is_empty());
    }

    #[test]
    fn recipient_must_exist() {
        let mut draft = TemplateDraft::new("Pledge");
        let id = draft.drop_field("signature", center(), &canvas()).unwrap();
        let second = draft.roles().all()[1].id.clone();

        assert_eq!(draft.set_recipient(&id, &second), Ok(true));
        assert_eq!(draft.field(&id).unwrap().recipient_id, second);
        assert_eq!(
            draft.set_recipient(&id, &RoleId::numbered(99)),
            Err(RegistryError::UnknownRole(RoleId::numbered(99)))
        );
    }

    #[test]
    fn blank_label_clears() {
        let mut draft = TemplateDraft::new("Pledge");
        let id = draft.drop_field("text", center(), &canvas()).unwrap();
        draft.set_label(&id, "Donor Name");
        assert_eq!(draft.field(&id).unwrap().label.as_deref(), Some("Donor Name"));
        draft.set_label(&id, "   ");
        assert!(draft.field(&id).unwrap().label.is_none());
        assert!(draft.set_required(&id, false));
        assert!(!draft.field(&id).unwrap().required);
    }

    #[test]
    fn validation_failure_selects_offender() {
        let mut draft = TemplateDraft::new("Pledge");
        let sig = draft.drop_field("signature", center(), &canvas()).unwrap();
        let orphan = Field {
            id: FieldId::from("imported-1"),
            field_type: FieldType::Date,
            geometry: draft.field(&sig).unwrap().geometry,
            recipient_id: RoleId::from("role-gone"),
            required: false,
            label: None,
        };
        let mut fields = draft.fields().clone();
        fields.add(orphan).unwrap();
        let mut draft = TemplateDraft::from_parts(
            draft.title().to_string(),
            None,
            fields,
            draft.roles().clone(),
        )
        .unwrap();

        let err = draft.validate().unwrap_err();
        assert!(matches!(err, ValidationError::UnknownRecipient { .. }));
        assert_eq!(draft.selected(), Some(&FieldId::from("imported-1")));
    }

    #[test]
    fn selecting_a_field_leaves_audit_view() {
        let mut draft = TemplateDraft::new("Pledge");
        let id = draft.drop_field("signature", center(), &canvas()).unwrap();
        draft.audit_panel_mut().begin();
        assert_eq!(draft.audit_panel().view(), PanelView::Audit);
        draft.select(&id);
        assert_eq!(draft.audit_panel().view(), PanelView::Properties);
    }

    #[test]
    fn end_to_end_label_fix() {
        let mut draft = TemplateDraft::new("Gift Agreement");
        let _sig = draft.drop_field("signature", Point::new(200.0, 900.0), &canvas()).unwrap();
        let text = draft.drop_field("text", Point::new(200.0, 300.0), &canvas()).unwrap();
        draft.clear_selection();

        assert_eq!(
            draft.validate(),
            Err(ValidationError::MissingLabel { field_id: text.clone() })
        );
        assert_eq!(draft.selected(), Some(&text));

        draft.set_label(&text, "Full Name");
        assert_eq!(draft.validate(), Ok(()));
    }

    #[test]
    fn loaded_draft_resumes_field_ids() {
        let mut draft = TemplateDraft::new("Pledge");
        draft.drop_field("signature", center(), &canvas()).unwrap();
        draft.drop_field("signature", center(), &canvas()).unwrap();
        let mut reloaded = TemplateDraft::from_parts(
            draft.title().to_string(),
            None,
            draft.fields().clone(),
            draft.roles().clone(),
        )
        .unwrap();
        let id = reloaded.drop_field("date", center(), &canvas()).unwrap();
        assert_eq!(id, FieldId::numbered(3));
    }

    #[test]
    fn attach_document_enforces_pdf() {
        let mut draft = TemplateDraft::new("Pledge");
        assert!(draft.attach_document("notes.txt", 10).is_err());
        assert!(draft.document().is_none());
        draft.attach_document("pledge.pdf", 2_048).unwrap();
        assert_eq!(draft.document().unwrap().file_name, "pledge.pdf");
    }
}

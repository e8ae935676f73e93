//! Placed template fields and partial updates to them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Size};
use crate::ids::{FieldId, RoleId};

/// Smallest width or height a field may be given from the properties panel.
pub const MIN_FIELD_PERCENT: f64 = 1.0;

/// Kind of annotation a signer fills in. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Signature,
    Initials,
    Date,
    Text,
    Checkbox,
}

impl FieldType {
    /// Palette order.
    pub const ALL: [FieldType; 5] = [
        Self::Signature,
        Self::Initials,
        Self::Date,
        Self::Text,
        Self::Checkbox,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Signature => "signature",
            Self::Initials => "initials",
            Self::Date => "date",
            Self::Text => "text",
            Self::Checkbox => "checkbox",
        }
    }

    /// Size, in canvas percentages, given to a field when it is dropped.
    pub fn default_size(&self) -> Size {
        match self {
            Self::Checkbox => Size::new(5.0, 5.0),
            _ => Size::new(20.0, 5.0),
        }
    }

    /// Whether a non-empty label must be set before the template can be saved.
    pub fn requires_label(&self) -> bool {
        matches!(self, Self::Text)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field type: {0:?}")]
pub struct UnknownFieldType(pub String);

impl FromStr for FieldType {
    type Err = UnknownFieldType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownFieldType(s.to_string()))
    }
}

/// Field box in canvas percentages.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    pub fn new(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// One annotation placed on the template document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: FieldId,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(flatten)]
    pub geometry: Geometry,
    pub recipient_id: RoleId,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Field {
    /// Merge the set members of `patch` into this field.
    pub fn apply(&mut self, patch: &FieldPatch) {
        if let Some(x) = patch.x {
            self.geometry.x = x;
        }
        if let Some(y) = patch.y {
            self.geometry.y = y;
        }
        if let Some(width) = patch.width {
            self.geometry.width = width;
        }
        if let Some(height) = patch.height {
            self.geometry.height = height;
        }
        if let Some(recipient) = &patch.recipient_id {
            self.recipient_id = recipient.clone();
        }
        if let Some(required) = patch.required {
            self.required = required;
        }
        if let Some(label) = &patch.label {
            self.label = label.clone();
        }
    }

    /// Label with surrounding whitespace removed, if any text is left.
    pub fn trimmed_label(&self) -> Option<&str> {
        self.label.as_deref().map(str::trim).filter(|l| !l.is_empty())
    }
}

/// Partial update to a [`Field`]. `None` members are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub recipient_id: Option<RoleId>,
    pub required: Option<bool>,
    /// `Some(None)` clears the label.
    pub label: Option<Option<String>>,
}

impl FieldPatch {
    pub fn position(origin: Point) -> Self {
        Self {
            x: Some(origin.x),
            y: Some(origin.y),
            ..Default::default()
        }
    }

    pub fn size(size: Size) -> Self {
        Self {
            width: Some(size.width),
            height: Some(size.height),
            ..Default::default()
        }
    }

    pub fn recipient(id: RoleId) -> Self {
        Self {
            recipient_id: Some(id),
            ..Default::default()
        }
    }

    pub fn required(required: bool) -> Self {
        Self {
            required: Some(required),
            ..Default::default()
        }
    }

    pub fn label(label: Option<String>) -> Self {
        Self {
            label: Some(label),
            ..Default::default()
        }
    }
}

//! Core types for SignStudio e-signature templates: fields, signer roles,
//! and the percentage-based canvas geometry they are placed with.

pub mod audit;
pub mod document;
pub mod error;
pub mod field;
pub mod fields;
pub mod geometry;
pub mod ids;
pub mod roles;

pub use audit::{AuditResult, AuditStatus};
pub use document::{SourceDocument, UploadError};
pub use error::RegistryError;
pub use field::{Field, FieldPatch, FieldType, Geometry, MIN_FIELD_PERCENT};
pub use fields::FieldRegistry;
pub use geometry::{CanvasRect, Point, Size};
pub use ids::{FieldId, RoleId};
pub use roles::{Role, RoleColor, RoleRegistry};

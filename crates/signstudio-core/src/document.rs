//! The source document a template is authored on.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upload limit for template source documents (10 MiB).
pub const MAX_DOCUMENT_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Error, PartialEq)]
pub enum UploadError {
    #[error("document has no file name")]
    MissingName,

    #[error("only PDF documents are accepted, got {0:?}")]
    NotPdf(String),

    #[error("document is empty")]
    Empty,

    #[error("document is {size} bytes, limit is {limit}")]
    TooLarge { size: u64, limit: u64 },
}

/// An uploaded PDF the template fields are laid out on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDocument {
    pub file_name: String,
    pub size_bytes: u64,
}

impl SourceDocument {
    /// Accept a single PDF of at most [`MAX_DOCUMENT_BYTES`].
    pub fn new(file_name: impl Into<String>, size_bytes: u64) -> Result<Self, UploadError> {
        let file_name = file_name.into();
        let trimmed = file_name.trim();
        if trimmed.is_empty() {
            return Err(UploadError::MissingName);
        }
        let is_pdf = trimmed
            .rsplit_once('.')
            .is_some_and(|(stem, ext)| !stem.is_empty() && ext.eq_ignore_ascii_case("pdf"));
        if !is_pdf {
            return Err(UploadError::NotPdf(file_name));
        }
        if size_bytes == 0 {
            return Err(UploadError::Empty);
        }
        if size_bytes > MAX_DOCUMENT_BYTES {
            return Err(UploadError::TooLarge {
                size: size_bytes,
                limit: MAX_DOCUMENT_BYTES,
            });
        }
        Ok(Self {
            file_name: trimmed.to_string(),
            size_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_pdf_regardless_of_case() {
        let doc = SourceDocument::new("Gift Agreement.PDF", 48_213).unwrap();
        assert_eq!(doc.file_name, "Gift Agreement.PDF");
    }

    #[test]
    fn rejects_other_extensions() {
        assert_eq!(
            SourceDocument::new("pledge.docx", 1_000),
            Err(UploadError::NotPdf("pledge.docx".into()))
        );
        assert!(matches!(SourceDocument::new(".pdf", 10), Err(UploadError::NotPdf(_))));
    }

    #[test]
    fn enforces_size_limit() {
        assert!(SourceDocument::new("big.pdf", MAX_DOCUMENT_BYTES).is_ok());
        assert_eq!(
            SourceDocument::new("big.pdf", MAX_DOCUMENT_BYTES + 1),
            Err(UploadError::TooLarge {
                size: MAX_DOCUMENT_BYTES + 1,
                limit: MAX_DOCUMENT_BYTES
            })
        );
        assert_eq!(SourceDocument::new("empty.pdf", 0), Err(UploadError::Empty));
    }
}

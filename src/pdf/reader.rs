//! Loading input documents

use std::path::Path;
use lopdf::{Document, ObjectId};
use tracing::debug;
use crate::error::{Error, Result};

/// A decoded input document
pub struct PdfReader {
    document: Document,
}

impl PdfReader {
    /// Decode the PDF at `path`
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        let document = Document::load(path).map_err(|source| Error::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        Self::checked(document, path)
    }

    /// Decode a PDF held in memory
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let path = Path::new("<memory>");
        let document = Document::load_mem(bytes).map_err(|source| Error::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        Self::checked(document, path)
    }

    fn checked(document: Document, path: &Path) -> Result<Self> {
        if document.is_encrypted() {
            return Err(Error::Encrypted(path.to_path_buf()));
        }

        debug!(
            path = %path.display(),
            version = %document.version,
            objects = document.objects.len(),
            "decoded document"
        );

        Ok(Self { document })
    }

    /// Page object ids in document order
    pub fn page_ids(&self) -> Vec<ObjectId> {
        self.document.get_pages().into_values().collect()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }
}

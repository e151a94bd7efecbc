//! Writing the output document
//!
//! The writer collects pages in output order, then rebuilds a flat page tree
//! over them. Objects that are no longer reachable (old page-tree nodes,
//! stripped watermark streams) are dropped before saving. Streams are written
//! with their original encoding.

use std::io::{self, Write};
use std::path::Path;
use lopdf::{Dictionary, Document, Object, ObjectId};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Error, Result};
use crate::pdf::page::{inherited, INHERITABLE_KEYS};

/// A page queued for output, with the attributes it inherits
struct PendingPage {
    id: ObjectId,
    inherited: Vec<(&'static [u8], Object)>,
}

/// Collects pages and writes them out as a single document
#[derive(Default)]
pub struct PdfWriter {
    pages: Vec<PendingPage>,
}

impl PdfWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pages added so far
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Queue a page of `doc` for output.
    ///
    /// Attributes the page inherits from its ancestors are captured now, so
    /// the page keeps them once it moves to the rebuilt page tree.
    pub fn add_page(&mut self, doc: &Document, page_id: ObjectId) -> Result<()> {
        let page_number = self.pages.len() + 1;
        let page = match doc.get_object(page_id) {
            Ok(Object::Dictionary(page)) => page,
            Ok(_) => {
                return Err(Error::Append {
                    page: page_number,
                    reason: format!("object {} {} R is not a dictionary", page_id.0, page_id.1),
                })
            }
            Err(e) => {
                return Err(Error::Append {
                    page: page_number,
                    reason: e.to_string(),
                })
            }
        };

        let mut attributes = Vec::new();
        for key in INHERITABLE_KEYS {
            if page.has(key) {
                continue;
            }
            if let Some(value) = inherited(doc, page, key) {
                attributes.push((key, value.clone()));
            }
        }

        self.pages.push(PendingPage {
            id: page_id,
            inherited: attributes,
        });
        Ok(())
    }

    /// Rebuild the page tree of `doc` over the queued pages and save it to
    /// `output`.
    ///
    /// The document is written to a temporary file next to `output` and
    /// renamed into place, so a failure never leaves a partial file behind.
    pub fn write(self, mut doc: Document, output: &Path) -> Result<()> {
        let pages_id = doc.new_object_id();

        for pending in &self.pages {
            if let Ok(Object::Dictionary(page)) = doc.get_object_mut(pending.id) {
                for (key, value) in &pending.inherited {
                    page.set(*key, value.clone());
                }
                page.set("Parent", Object::Reference(pages_id));
            }
        }

        let kids: Vec<Object> = self
            .pages
            .iter()
            .map(|pending| Object::Reference(pending.id))
            .collect();

        let mut pages = Dictionary::new();
        pages.set("Type", Object::Name(b"Pages".to_vec()));
        pages.set("Count", Object::Integer(kids.len() as i64));
        pages.set("Kids", Object::Array(kids));
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        set_catalog_pages(&mut doc, pages_id);

        let dropped = doc.prune_objects();
        debug!(count = dropped.len(), "dropped unreachable objects");

        save_atomically(&mut doc, output)
    }
}

/// Point the catalog at the rebuilt page tree, creating a catalog if the
/// trailer has none.
fn set_catalog_pages(doc: &mut Document, pages_id: ObjectId) {
    let catalog_id = match doc.trailer.get(b"Root") {
        Ok(Object::Reference(id)) => Some(*id),
        _ => None,
    };

    if let Some(id) = catalog_id {
        if let Ok(Object::Dictionary(catalog)) = doc.get_object_mut(id) {
            catalog.set("Pages", Object::Reference(pages_id));
            return;
        }
    }

    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));
}

fn save_atomically(doc: &mut Document, output: &Path) -> Result<()> {
    let write_error = |source: io::Error| Error::Write {
        path: output.to_path_buf(),
        source,
    };

    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(write_error)?;
    doc.save_to(&mut file)
        .map_err(|e| write_error(io::Error::other(e.to_string())))?;
    file.flush().map_err(write_error)?;
    file.persist(output).map_err(|e| write_error(e.error))?;

    Ok(())
}

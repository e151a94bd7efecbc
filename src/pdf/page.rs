//! Page-tree attribute lookup
//!
//! `Resources`, `MediaBox`, `CropBox` and `Rotate` may be set on any
//! ancestor `/Pages` node and are inherited by the pages below it.

use std::collections::BTreeSet;
use lopdf::{Dictionary, Document, Object};

/// Page attributes that a page may inherit from its ancestors
pub const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Look up `key` on `page`, falling back to its `/Parent` chain.
///
/// Returns the value as stored (it may still be a reference). A cycle in the
/// parent chain ends the search.
pub fn inherited<'a>(doc: &'a Document, page: &'a Dictionary, key: &[u8]) -> Option<&'a Object> {
    let mut node = page;
    let mut visited = BTreeSet::new();

    loop {
        if let Ok(value) = node.get(key) {
            return Some(value);
        }

        let (parent_id, parent) = doc.dereference(node.get(b"Parent").ok()?).ok()?;
        if let Some(id) = parent_id {
            if !visited.insert(id) {
                return None;
            }
        }
        node = parent.as_dict().ok()?;
    }
}

/// Like [`inherited`], but resolved to a dictionary
pub fn inherited_dictionary<'a>(
    doc: &'a Document,
    page: &'a Dictionary,
    key: &[u8],
) -> Option<&'a Dictionary> {
    let value = inherited(doc, page, key)?;
    match doc.dereference(value).ok()? {
        (_, Object::Dictionary(dict)) => Some(dict),
        _ => None,
    }
}

//! Removal of signed XObjects from page resource tables

use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::debug;

use crate::pdf::page::inherited_dictionary;
use crate::pdf::signature::{Resolve, Signature};

/// Remove every stream in an XObject table whose dictionary carries `signature`.
///
/// Entries that are not streams are left alone. Remaining entries keep their
/// relative order. Returns the removed names in table order.
pub fn prune_xobjects<R: Resolve + ?Sized>(
    xobjects: &mut Dictionary,
    signature: &Signature<'_>,
    resolver: &R,
) -> Vec<Vec<u8>> {
    // Snapshot matches before touching the table
    let marked: Vec<Vec<u8>> = xobjects
        .iter()
        .filter(|(_, value)| is_marked(value, signature, resolver))
        .map(|(key, _)| key.clone())
        .collect();

    if marked.is_empty() {
        return marked;
    }

    let mut kept = Dictionary::new();
    for (key, value) in xobjects.iter() {
        if !marked.contains(key) {
            kept.set(key.clone(), value.clone());
        }
    }
    *xobjects = kept;

    marked
}

/// Names of the XObjects on a page that carry `signature`, in table order.
///
/// Read-only; a page without resources or without an XObject table has none.
pub fn find_marked(doc: &Document, page_id: ObjectId, signature: &Signature<'_>) -> Vec<Vec<u8>> {
    let Some((_, xobjects)) = xobject_table(doc, page_id) else {
        return Vec::new();
    };

    xobjects
        .iter()
        .filter(|(_, value)| is_marked(value, signature, doc))
        .map(|(key, _)| key.clone())
        .collect()
}

/// Strip signed XObjects from one page and return the removed names.
///
/// Resource dictionaries are often shared between pages through references,
/// or inherited from the page tree. The pruned table is therefore written back
/// as a copy on the page itself; shared objects and sibling pages are never
/// modified. Nothing is written when no entry matches.
pub fn remove_marked(
    doc: &mut Document,
    page_id: ObjectId,
    signature: &Signature<'_>,
) -> Vec<Vec<u8>> {
    let Some((resources, xobjects)) = xobject_table(doc, page_id) else {
        return Vec::new();
    };
    let mut resources = resources.clone();
    let mut xobjects = xobjects.clone();

    let removed = prune_xobjects(&mut xobjects, signature, &*doc);
    if removed.is_empty() {
        return removed;
    }

    resources.set("XObject", Object::Dictionary(xobjects));
    match doc.get_object_mut(page_id) {
        Ok(Object::Dictionary(page)) => page.set("Resources", Object::Dictionary(resources)),
        _ => return Vec::new(),
    }

    for name in &removed {
        debug!(
            page = ?page_id,
            resource = %String::from_utf8_lossy(name),
            "removed signed XObject"
        );
    }

    removed
}

/// Strip signed XObjects from one page.
///
/// Returns true if at least one resource was removed. Calling it again on the
/// same page is a no-op that returns false.
pub fn prune_page(doc: &mut Document, page_id: ObjectId, signature: &Signature<'_>) -> bool {
    !remove_marked(doc, page_id, signature).is_empty()
}

/// The page's effective resource dictionary and its XObject table
fn xobject_table(doc: &Document, page_id: ObjectId) -> Option<(&Dictionary, &Dictionary)> {
    let page = doc.get_dictionary(page_id).ok()?;
    let resources = inherited_dictionary(doc, page, b"Resources")?;
    let xobjects = match Resolve::resolve(doc, resources.get(b"XObject").ok()?)? {
        Object::Dictionary(dict) => dict,
        _ => return None,
    };
    Some((resources, xobjects))
}

fn is_marked<R: Resolve + ?Sized>(value: &Object, signature: &Signature<'_>, resolver: &R) -> bool {
    match resolver.resolve(value) {
        Some(Object::Stream(stream)) => signature.matches(&stream.dict, resolver),
        _ => false,
    }
}

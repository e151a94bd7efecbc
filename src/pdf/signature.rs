//! Key-path signatures over the PDF object graph
//!
//! A signature is a chain of nested dictionary keys ending in a name value.
//! Matching is a pure, total predicate: any missing key, unexpected object
//! kind or unresolvable reference is simply "no match".

use lopdf::{Dictionary, Document, Object};

/// Resolves indirect references while walking the object graph.
pub trait Resolve {
    /// Follow `object` to the direct object it stands for.
    ///
    /// Returns `None` when a reference cannot be resolved.
    fn resolve<'a>(&'a self, object: &'a Object) -> Option<&'a Object>;
}

impl Resolve for Document {
    fn resolve<'a>(&'a self, object: &'a Object) -> Option<&'a Object> {
        self.dereference(object).ok().map(|(_, resolved)| resolved)
    }
}

/// Resolver for object graphs that are not owned by a document.
///
/// Direct objects resolve to themselves; references never resolve.
#[derive(Debug, Clone, Copy, Default)]
pub struct Detached;

impl Resolve for Detached {
    fn resolve<'a>(&'a self, object: &'a Object) -> Option<&'a Object> {
        match object {
            Object::Reference(_) => None,
            direct => Some(direct),
        }
    }
}

/// A nested key path plus the name it must terminate in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature<'a> {
    /// Keys to follow from the root dictionary, outermost first
    pub path: &'a [&'a [u8]],
    /// Name the last key must map to
    pub value: &'a [u8],
}

/// Marker left by Master PDF Editor's unlicensed mode on its watermark
/// XObjects: `/PieceInfo << /ADBE_CompoundType << /Private /WatermarkDemo >> >>`.
pub const WATERMARK_DEMO: Signature<'static> = Signature {
    path: &[b"PieceInfo", b"ADBE_CompoundType", b"Private"],
    value: b"WatermarkDemo",
};

impl Signature<'_> {
    /// Check whether `root` carries this signature
    pub fn matches<R: Resolve + ?Sized>(&self, root: &Dictionary, resolver: &R) -> bool {
        matches(root, self.path, self.value, resolver)
    }
}

/// Check whether following `path` from `root` ends at the name `expected`.
///
/// Every intermediate key must resolve to a plain dictionary; streams are not
/// descended into. An empty path never matches. Names compare byte-for-byte.
pub fn matches<R: Resolve + ?Sized>(
    root: &Dictionary,
    path: &[&[u8]],
    expected: &[u8],
    resolver: &R,
) -> bool {
    let Some((key, rest)) = path.split_first() else {
        return false;
    };

    let Some(value) = root.get(key).ok().and_then(|v| resolver.resolve(v)) else {
        return false;
    };

    if rest.is_empty() {
        return matches!(value, Object::Name(name) if name.as_slice() == expected);
    }

    match value {
        Object::Dictionary(child) => matches(child, rest, expected, resolver),
        _ => false,
    }
}

//! In-memory documents for unit tests

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

pub(crate) fn name(value: &str) -> Object {
    Object::Name(value.as_bytes().to_vec())
}

/// `/PieceInfo << /ADBE_CompoundType << /Private /<value> >> >>`
pub(crate) fn marker_dict(value: &str) -> Dictionary {
    let mut compound = Dictionary::new();
    compound.set("Private", name(value));
    let mut piece_info = Dictionary::new();
    piece_info.set("ADBE_CompoundType", Object::Dictionary(compound));
    let mut dict = Dictionary::new();
    dict.set("PieceInfo", Object::Dictionary(piece_info));
    dict
}

/// Form XObject carrying the marker chain with the given private value
pub(crate) fn marked_form(value: &str) -> Stream {
    let mut dict = marker_dict(value);
    dict.set("Type", name("XObject"));
    dict.set("Subtype", name("Form"));
    dict.set(
        "BBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(612),
            Object::Integer(792),
        ]),
    );
    Stream::new(dict, b"BT /F1 48 Tf 100 400 Td (DEMO) Tj ET".to_vec())
}

/// Image XObject with no private metadata
pub(crate) fn plain_image() -> Stream {
    let mut dict = Dictionary::new();
    dict.set("Type", name("XObject"));
    dict.set("Subtype", name("Image"));
    dict.set("Width", Object::Integer(1));
    dict.set("Height", Object::Integer(1));
    dict.set("BitsPerComponent", Object::Integer(8));
    dict.set("ColorSpace", name("DeviceGray"));
    Stream::new(dict, vec![0])
}

/// Resource dictionary with the given XObject entries and one font
pub(crate) fn resources(xobjects: Vec<(&str, Object)>) -> Dictionary {
    let mut table = Dictionary::new();
    for (key, value) in xobjects {
        table.set(key, value);
    }
    let mut font = Dictionary::new();
    font.set("Type", name("Font"));
    font.set("Subtype", name("Type1"));
    font.set("BaseFont", name("Helvetica"));
    let mut fonts = Dictionary::new();
    fonts.set("F1", Object::Dictionary(font));

    let mut resources = Dictionary::new();
    resources.set("Font", Object::Dictionary(fonts));
    resources.set("XObject", Object::Dictionary(table));
    resources
}

/// A document with a catalog and a single flat page tree
pub(crate) struct Fixture {
    pub doc: Document,
    pub pages_id: ObjectId,
}

impl Fixture {
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut pages = Dictionary::new();
        pages.set("Type", name("Pages"));
        pages.set("Kids", Object::Array(Vec::new()));
        pages.set("Count", Object::Integer(0));
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let mut catalog = Dictionary::new();
        catalog.set("Type", name("Catalog"));
        catalog.set("Pages", Object::Reference(pages_id));
        let catalog_id = doc.add_object(catalog);
        doc.trailer.set("Root", Object::Reference(catalog_id));

        Self { doc, pages_id }
    }

    pub fn add_object<T: Into<Object>>(&mut self, object: T) -> ObjectId {
        self.doc.add_object(object)
    }

    /// Append a page under the root `/Pages` node
    pub fn add_page(&mut self, resources: Option<Object>) -> ObjectId {
        let content_id = self
            .doc
            .add_object(Stream::new(Dictionary::new(), b"q /Wm1 Do Q".to_vec()));

        let mut page = Dictionary::new();
        page.set("Type", name("Page"));
        page.set("Parent", Object::Reference(self.pages_id));
        page.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ]),
        );
        page.set("Contents", Object::Reference(content_id));
        if let Some(resources) = resources {
            page.set("Resources", resources);
        }
        let page_id = self.doc.add_object(page);

        if let Ok(Object::Dictionary(pages)) = self.doc.get_object_mut(self.pages_id) {
            let count = match pages.get_mut(b"Kids") {
                Ok(Object::Array(kids)) => {
                    kids.push(Object::Reference(page_id));
                    kids.len()
                }
                _ => 0,
            };
            pages.set("Count", Object::Integer(count as i64));
        }

        page_id
    }

    /// Set an attribute on the root `/Pages` node, for inheritance tests
    pub fn set_on_pages_node(&mut self, key: &str, value: Object) {
        if let Ok(Object::Dictionary(pages)) = self.doc.get_object_mut(self.pages_id) {
            pages.set(key, value);
        }
    }

    /// Serialize to bytes, as a decoder would receive them
    pub fn to_bytes(mut self) -> Vec<u8> {
        let mut bytes = Vec::new();
        self.doc
            .save_to(&mut bytes)
            .expect("Failed to serialize fixture");
        bytes
    }
}

/// XObject resource names visible from a page, in table order
pub(crate) fn xobject_names(doc: &Document, page_id: ObjectId) -> Vec<String> {
    let Ok(page) = doc.get_dictionary(page_id) else {
        return Vec::new();
    };
    let Some(resources) = crate::pdf::page::inherited_dictionary(doc, page, b"Resources") else {
        return Vec::new();
    };
    match resources
        .get(b"XObject")
        .ok()
        .and_then(|x| doc.dereference(x).ok())
    {
        Some((_, Object::Dictionary(table))) => table
            .iter()
            .map(|(key, _)| String::from_utf8_lossy(key).into_owned())
            .collect(),
        _ => Vec::new(),
    }
}

//! Page geometry and page counts read from input PDFs

use std::path::Path;
use log::warn;
use lopdf::{Dictionary, Document, Object, ObjectId};
use crate::error::{Error, Result};
use crate::layout::PageSize;

/// Count pages by reading the Count field from the Pages dictionary
/// This is more reliable than get_pages() on files with a broken page tree
fn count_pages_from_catalog(doc: &Document) -> Result<usize> {
    let catalog_id = doc.trailer.get(b"Root")?.as_reference()?;
    let pages_id = doc.get_dictionary(catalog_id)?.get(b"Pages")?.as_reference()?;
    let count = doc.get_dictionary(pages_id)?.get(b"Count")?.as_i64()?;

    Ok(count.max(0) as usize)
}

/// A page's MediaBox, normalised so that `llx <= urx` and `lly <= ury`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaBox {
    pub llx: f64,
    pub lly: f64,
    pub urx: f64,
    pub ury: f64,
}

impl MediaBox {
    fn from_array(values: &[Object]) -> Option<Self> {
        if values.len() != 4 {
            return None;
        }
        let n: Vec<f64> = values.iter().map(as_number).collect::<Option<_>>()?;

        Some(Self {
            llx: n[0].min(n[2]),
            lly: n[1].min(n[3]),
            urx: n[0].max(n[2]),
            ury: n[1].max(n[3]),
        })
    }

    pub fn size(&self) -> PageSize {
        PageSize::new(self.urx - self.llx, self.ury - self.lly)
    }

    pub fn to_object(self) -> Object {
        Object::Array(vec![
            Object::Real(self.llx as f32),
            Object::Real(self.lly as f32),
            Object::Real(self.urx as f32),
            Object::Real(self.ury as f32),
        ])
    }
}

fn as_number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(*r as f64),
        _ => None,
    }
}

/// Follow a reference to a dictionary, or return the inline dictionary
fn resolve_dict<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Dictionary> {
    match obj {
        Object::Reference(id) => doc.get_dictionary(*id).ok(),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

/// Look up an inheritable page attribute, walking the Parent chain
fn inherited<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut current = doc.get_dictionary(page_id).ok()?;
    loop {
        if let Ok(value) = current.get(key) {
            return Some(value);
        }
        let parent = current.get(b"Parent").ok()?.as_reference().ok()?;
        current = doc.get_dictionary(parent).ok()?;
    }
}

/// The MediaBox in effect for a page, inherited from the page tree if needed
pub fn effective_media_box(doc: &Document, page_id: ObjectId) -> Option<MediaBox> {
    let value = inherited(doc, page_id, b"MediaBox")?;
    let array = match value {
        Object::Reference(id) => doc.get_object(*id).ok()?.as_array().ok()?,
        other => other.as_array().ok()?,
    };
    MediaBox::from_array(array)
}

/// The Resources dictionary in effect for a page, cloned so it can be moved
/// into a Form XObject
pub fn effective_resources(doc: &Document, page_id: ObjectId) -> Option<Dictionary> {
    let value = inherited(doc, page_id, b"Resources")?;
    resolve_dict(doc, value).cloned()
}

/// Object id of the first page, if the document has any
pub fn first_page(doc: &Document) -> Option<ObjectId> {
    doc.get_pages().into_values().next()
}

/// Count the number of pages in a PDF file
///
/// This is a quick operation that reads the Count field from the Pages dictionary.
pub fn count_pages(path: &Path) -> Result<usize> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let doc = Document::load(path).map_err(|source| Error::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    count_pages_from_catalog(&doc)
}

/// Load an input PDF, checking that it has a page to place
///
/// Only the first page of an input is ever used; a warning names any file
/// that has more.
pub fn load_input(path: &Path) -> Result<Document> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let doc = Document::load(path).map_err(|source| Error::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let page_count = doc.get_pages().len();
    if page_count == 0 {
        return Err(Error::EmptyPdf(path.to_path_buf()));
    }
    if page_count > 1 {
        warn!(
            "{} has {} pages; only the first is used",
            path.display(),
            page_count
        );
    }

    Ok(doc)
}

/// Decoded content of a page, one stream after another
///
/// Streams are joined with a newline so the last token of one stream can't
/// run into the first token of the next.
pub fn page_content(doc: &Document, page_id: ObjectId) -> Result<Vec<u8>> {
    let mut content = Vec::new();

    for stream_id in doc.get_page_contents(page_id) {
        let stream = doc.get_object(stream_id)?.as_stream()?;
        match stream.decompressed_content() {
            Ok(data) => content.extend_from_slice(&data),
            Err(_) => content.extend_from_slice(&stream.content),
        }
        content.push(b'\n');
    }

    Ok(content)
}

/// Size of the first page of a PDF file
pub fn first_page_size(path: &Path) -> Result<PageSize> {
    let doc = load_input(path)?;
    let page_id = first_page(&doc).ok_or_else(|| Error::EmptyPdf(path.to_path_buf()))?;
    let media_box = effective_media_box(&doc, page_id)
        .ok_or_else(|| Error::MissingMediaBox(path.to_path_buf()))?;

    Ok(media_box.size())
}

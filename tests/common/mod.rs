//! Shared helpers for building small PDF fixtures

#![allow(dead_code)]

use lopdf::{Dictionary, Document, Object, Stream};
use std::path::{Path, PathBuf};

/// Write a PDF with one page per entry in `sizes`, each with a line of text
pub fn write_pdf(path: &Path, sizes: &[(i64, i64)]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
    ]));

    let mut kids = Vec::new();
    for (index, &(width, height)) in sizes.iter().enumerate() {
        let text = format!("BT /F1 12 Tf 10 10 Td (page {}) Tj ET\n", index + 1);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), text.into_bytes()));

        let resources = Dictionary::from_iter(vec![(
            "Font",
            Object::Dictionary(Dictionary::from_iter(vec![("F1", Object::Reference(font_id))])),
        )]);

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(width),
                    Object::Integer(height),
                ]),
            ),
            ("Resources", Object::Dictionary(resources)),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Count", Object::Integer(kids.len() as i64)),
            ("Kids", Object::Array(kids)),
        ])),
    );

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    doc.save(path).expect("Failed to write fixture PDF");
}

/// Write `count` single-page PDFs of the given size into `dir`
pub fn write_cards(dir: &Path, count: usize, size: (i64, i64)) -> Vec<PathBuf> {
    (0..count)
        .map(|i| {
            let path = dir.join(format!("card-{:02}.pdf", i));
            write_pdf(&path, &[size]);
            path
        })
        .collect()
}

/// Write a one-page PDF whose `/Contents` is an array with one stream per entry
pub fn write_pdf_with_contents(path: &Path, size: (i64, i64), streams: &[&str]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let contents: Vec<Object> = streams
        .iter()
        .map(|s| Object::Reference(doc.add_object(Stream::new(Dictionary::new(), s.as_bytes().to_vec()))))
        .collect();

    let page_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Page".to_vec())),
        ("Parent", Object::Reference(pages_id)),
        (
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(size.0),
                Object::Integer(size.1),
            ]),
        ),
        ("Resources", Object::Dictionary(Dictionary::new())),
        ("Contents", Object::Array(contents)),
    ]));

    doc.objects.insert(
        pages_id,
        Object::Dictionary(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Count", Object::Integer(1)),
            ("Kids", Object::Array(vec![Object::Reference(page_id)])),
        ])),
    );

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    doc.save(path).expect("Failed to write fixture PDF");
}

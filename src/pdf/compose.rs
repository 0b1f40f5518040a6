//! Grid composition using lopdf
//!
//! Each input's first page is imported into the output document as a Form
//! XObject. Output pages then draw those XObjects at the offsets computed by
//! [`crate::layout::compute_layout`].

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use chrono::Local;
use log::{debug, info};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use crate::error::{Error, Result};
use crate::layout::{compute_layout, CellSizing, GridSpec, Layout, PageSize};
use super::metadata::{
    effective_media_box, effective_resources, first_page, first_page_size, load_input, page_content,
    MediaBox,
};

/// Options for arranging PDFs into a grid
#[derive(Debug, Clone)]
pub struct GridOptions {
    /// Input PDF file paths in placement order
    pub input_paths: Vec<PathBuf>,
    /// Output PDF file path
    pub output_path: PathBuf,
    /// Columns and rows per output page
    pub grid: GridSpec,
    /// Cell sizing policy
    pub sizing: CellSizing,
}

/// What a completed run produced
#[derive(Debug, Clone)]
pub struct GridSummary {
    pub input_count: usize,
    pub page_count: usize,
    pub layout: Layout,
}

/// A source page living in the output document as a Form XObject
struct ImportedPage {
    xobject_id: ObjectId,
    media_box: MediaBox,
}

/// Arrange the first page of every input PDF into a grid and write the result
///
/// Inputs are loaded one at a time; each is dropped as soon as its first page
/// has been copied into the output document. An empty input list writes a
/// valid PDF with no pages.
///
/// # Example
///
/// ```no_run
/// use pdf_gridcat::layout::{CellSizing, GridSpec};
/// use pdf_gridcat::pdf::{arrange_pdfs, GridOptions};
/// use std::path::PathBuf;
///
/// let options = GridOptions {
///     input_paths: vec![PathBuf::from("card-1.pdf"), PathBuf::from("card-2.pdf")],
///     output_path: PathBuf::from("sheet.pdf"),
///     grid: GridSpec::new(2, 1).expect("non-zero grid"),
///     sizing: CellSizing::Native,
/// };
///
/// arrange_pdfs(&options).expect("Failed to arrange PDFs");
/// ```
pub fn arrange_pdfs(options: &GridOptions) -> Result<GridSummary> {
    check_inputs_exist(&options.input_paths)?;

    let mut output = Document::with_version("1.5");

    let mut imported = Vec::with_capacity(options.input_paths.len());
    for path in &options.input_paths {
        imported.push(import_first_page(&mut output, path)?);
    }

    let sizes: Vec<PageSize> = imported.iter().map(|page| page.media_box.size()).collect();
    let layout = compute_layout(&sizes, options.grid, options.sizing);

    build_page_tree(&mut output, &imported, &layout);
    set_document_info(&mut output);

    // Source catalogs and page trees came along with the import
    let pruned = output.prune_objects();
    debug!("pruned {} unreferenced objects", pruned.len());

    output.compress();
    write_document(&mut output, &options.output_path)?;

    info!(
        "wrote {} page(s) from {} input(s) to {}",
        layout.page_count(),
        imported.len(),
        options.output_path.display()
    );

    Ok(GridSummary {
        input_count: imported.len(),
        page_count: layout.page_count(),
        layout,
    })
}

/// Compute the layout for a set of inputs without writing anything
pub fn plan_layout(options: &GridOptions) -> Result<Layout> {
    check_inputs_exist(&options.input_paths)?;

    let sizes = options
        .input_paths
        .iter()
        .map(|path| first_page_size(path))
        .collect::<Result<Vec<_>>>()?;

    Ok(compute_layout(&sizes, options.grid, options.sizing))
}

fn check_inputs_exist(paths: &[PathBuf]) -> Result<()> {
    for path in paths {
        if !path.exists() {
            return Err(Error::FileNotFound(path.clone()));
        }
    }
    Ok(())
}

/// Copy the first page of `path` into `output` as a Form XObject
fn import_first_page(output: &mut Document, path: &Path) -> Result<ImportedPage> {
    let mut source = load_input(path)?;

    // Move the source ids above everything already in the output
    source.renumber_objects_with(output.max_id + 1);

    let page_id = first_page(&source).ok_or_else(|| Error::EmptyPdf(path.to_path_buf()))?;

    let media_box = effective_media_box(&source, page_id)
        .ok_or_else(|| Error::MissingMediaBox(path.to_path_buf()))?;
    let resources = effective_resources(&source, page_id).unwrap_or_else(Dictionary::new);
    let content = page_content(&source, page_id)?;

    let mut form = Dictionary::new();
    form.set("Type", Object::Name(b"XObject".to_vec()));
    form.set("Subtype", Object::Name(b"Form".to_vec()));
    form.set("FormType", Object::Integer(1));
    form.set("BBox", media_box.to_object());
    form.set("Resources", Object::Dictionary(resources));

    let source_max_id = source.max_id;
    output.objects.extend(source.objects);
    output.max_id = output.max_id.max(source_max_id);

    let xobject_id = output.add_object(Stream::new(form, content));

    let size = media_box.size();
    debug!(
        "imported {} ({} x {} pt) as object {:?}",
        path.display(),
        size.width,
        size.height,
        xobject_id
    );

    Ok(ImportedPage { xobject_id, media_box })
}

/// Create one output page per layout page, plus the page tree and catalog
fn build_page_tree(output: &mut Document, imported: &[ImportedPage], layout: &Layout) {
    let pages_id = output.new_object_id();
    let mut kids = Vec::with_capacity(layout.page_count());

    for (index, size) in layout.pages.iter().enumerate() {
        let mut xobjects = Dictionary::new();
        let mut content = String::new();

        for placement in layout.placements_on(index) {
            let page = &imported[placement.input_index];
            let name = format!("P{}", placement.input_index);

            // The XObject keeps its source coordinates, so undo a MediaBox
            // that does not start at the origin
            let tx = placement.x - page.media_box.llx;
            let ty = placement.y - page.media_box.lly;

            content.push_str(&format!(
                "q 1 0 0 1 {} {} cm /{} Do Q\n",
                pdf_number(tx),
                pdf_number(ty),
                name
            ));
            xobjects.set(name, Object::Reference(page.xobject_id));

            debug!(
                "input {} -> page {} column {} row {} at ({}, {})",
                placement.input_index,
                placement.page,
                placement.column,
                placement.row,
                placement.x,
                placement.y
            );
        }

        let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(xobjects));

        let mut page = Dictionary::new();
        page.set("Type", Object::Name(b"Page".to_vec()));
        page.set("Parent", Object::Reference(pages_id));
        page.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(size.width as f32),
                Object::Real(size.height as f32),
            ]),
        );
        page.set("Resources", Object::Dictionary(resources));
        page.set("Contents", Object::Reference(content_id));

        kids.push(Object::Reference(output.add_object(page)));
    }

    let mut pages_object = Dictionary::new();
    pages_object.set("Type", Object::Name(b"Pages".to_vec()));
    pages_object.set("Count", Object::Integer(kids.len() as i64));
    pages_object.set("Kids", Object::Array(kids));
    output.objects.insert(pages_id, Object::Dictionary(pages_object));

    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));
    let catalog_id = output.add_object(catalog);

    output.trailer.set("Root", Object::Reference(catalog_id));
}

fn set_document_info(doc: &mut Document) {
    let producer = concat!("pdf-gridcat ", env!("CARGO_PKG_VERSION"));
    let created = Local::now().format("D:%Y%m%d%H%M%S").to_string();

    let mut info = Dictionary::new();
    info.set("Producer", Object::String(producer.as_bytes().to_vec(), StringFormat::Literal));
    info.set("CreationDate", Object::String(created.into_bytes(), StringFormat::Literal));

    let info_id = doc.add_object(info);
    doc.trailer.set("Info", Object::Reference(info_id));
}

fn write_document(doc: &mut Document, path: &Path) -> Result<()> {
    let write_error = |source: io::Error| Error::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }

    let file = File::create(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    doc.save_to(&mut writer)
        .map_err(|e| write_error(io::Error::new(io::ErrorKind::Other, e.to_string())))?;
    writer.flush().map_err(write_error)?;

    Ok(())
}

/// Format a coordinate for a content stream: at most four decimals, no
/// trailing zeros
fn pdf_number(value: f64) -> String {
    let text = format!("{:.4}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

//! Invoice layout on fixed A4 pages.
//!
//! [`layout`] turns an [`InvoiceRecord`] into a [`Document`] in four steps:
//! details on the first page, pagination of the item rows against the room
//! the recap blocks will need, one table per content page, and the recap
//! itself. [`writer::write_pdf`] then serialises the result.

pub mod canvas;
mod details;
mod flow;
mod furniture;
mod items;
pub mod paginate;
mod recap;
mod table;
pub mod writer;

pub use details::logo_scale;
pub use recap::totals_rows;

use crate::error::Error;
use crate::fonts::{Measure, StandardMetrics};
use crate::model::InvoiceRecord;
use crate::svg;

use canvas::{Canvas, Document};
use furniture::Furniture;
use recap::Recap;

const MM: f32 = 72.0 / 25.4;

pub const PAGE_WIDTH: f32 = 210.0 * MM;
pub const PAGE_HEIGHT: f32 = 297.0 * MM;
pub const MARGIN_TOP: f32 = 20.0 * MM;
pub const MARGIN_BOTTOM: f32 = 20.0 * MM;
pub const MARGIN_LEFT: f32 = 15.0 * MM;
pub const MARGIN_RIGHT: f32 = 15.0 * MM;
pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
/// Larger logo side after scaling, in points.
pub const MAX_LOGO_SIZE: f32 = 150.0;
/// Extra gap added to a font size to get the line advance.
pub const LINE_SPACE: f32 = 2.0;
pub const VERTICAL_SPACING: f32 = 15.0 * MM;
pub const HORIZONTAL_SPACING: f32 = 15.0 * MM;

/// Lay out every page of the invoice.
///
/// Everything that can fail (validation, logo parsing, measuring, table
/// sizing) happens before or while pages are built, never while writing.
pub fn layout(record: &InvoiceRecord, measure: &dyn Measure) -> Result<Document, Error> {
    record.validate()?;

    let logo = if record.company.logo.trim().is_empty() {
        None
    } else {
        Some(svg::parse(&record.company.logo)?)
    };

    let furniture = Furniture::new(record, measure)?;
    let recap = Recap::build(record, measure)?;
    let pagination = items::paginate_items(&record.items, recap.minimum_height(), measure)?;

    let mut canvas = Canvas::new(PAGE_WIDTH, PAGE_HEIGHT);
    canvas.set_title(format!("Facture_{}", record.customer.invoice_number));
    canvas.set_author(record.company.name.as_str());

    let table_top = details::draw_details(&mut canvas, record, logo.as_ref(), measure)?;
    let recap_top = items::draw_item_tables(
        &mut canvas,
        record,
        &pagination,
        &furniture,
        measure,
        table_top,
    )?;
    recap.draw(&mut canvas, recap_top);

    let doc = canvas.finish();
    if doc.pages.len() != pagination.total_pages() {
        return Err(Error::Layout(format!(
            "drew {} pages, expected {}",
            doc.pages.len(),
            pagination.total_pages()
        )));
    }
    Ok(doc)
}

/// Lay out with the standard font metrics and write the PDF.
pub fn render(record: &InvoiceRecord) -> Result<Vec<u8>, Error> {
    let t0 = std::time::Instant::now();
    let doc = layout(record, &StandardMetrics)?;
    let t_layout = t0.elapsed();
    let bytes = writer::write_pdf(&doc)?;
    log::info!(
        "Render phases: layout={:.1}ms, write={:.1}ms ({} pages)",
        t_layout.as_secs_f64() * 1000.0,
        (t0.elapsed() - t_layout).as_secs_f64() * 1000.0,
        doc.pages.len(),
    );
    Ok(bytes)
}

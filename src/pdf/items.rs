use crate::error::Error;
use crate::fonts::{Font, Measure};
use crate::model::{InvoiceRecord, LineItem};

use super::canvas::{Canvas, HEADER_ROW_GRAY, Origin};
use super::flow::{BODY_SIZE, Paragraph, paragraph_height};
use super::furniture::Furniture;
use super::paginate::{Pagination, paginate};
use super::table::{Cell, LaidOutTable, Row, Table};
use super::{CONTENT_WIDTH, MARGIN_LEFT, MARGIN_TOP, PAGE_HEIGHT};

const HEADERS: [&str; 4] = ["Article", "Quantité", "Prix unitaire (€ HT)", "Total (€ HT)"];
const COLUMN_SHARES: [f32; 4] = [0.55, 0.10, 0.20, 0.15];

fn column_widths() -> Vec<f32> {
    COLUMN_SHARES.iter().map(|s| s * CONTENT_WIDTH).collect()
}

/// Bold title over the regular description.
fn item_paragraph(item: &LineItem) -> Paragraph {
    Paragraph::body()
        .text(item.title.as_str(), Font::HelveticaBold)
        .line_break()
        .text(item.description.as_str(), Font::Helvetica)
}

/// Height of the description paragraph wrapped to the description column.
pub(super) fn item_height(item: &LineItem, measure: &dyn Measure) -> Result<f32, Error> {
    paragraph_height(&item_paragraph(item), measure, COLUMN_SHARES[0] * CONTENT_WIDTH)
}

pub(super) fn paginate_items(
    items: &[LineItem],
    minimum_height: f32,
    measure: &dyn Measure,
) -> Result<Pagination, Error> {
    paginate(items, minimum_height, |item| item_height(item, measure))
}

fn header_row() -> Row {
    Row::new(
        HEADERS
            .iter()
            .map(|h| Cell::text(*h, Font::HelveticaBold, BODY_SIZE))
            .collect(),
    )
    .with_background(HEADER_ROW_GRAY)
}

fn item_row(item: &LineItem) -> Row {
    Row::new(vec![
        Cell::flow(item_paragraph(item)),
        Cell::text(item.quantity.to_string(), Font::Helvetica, BODY_SIZE),
        Cell::text(format!("{:.2}", item.unit_price), Font::Helvetica, BODY_SIZE),
        Cell::text(format!("{:.2}", item.total()), Font::Helvetica, BODY_SIZE),
    ])
}

fn page_table(items: &[LineItem], measure: &dyn Measure) -> Result<LaidOutTable, Error> {
    let mut table = Table::new(column_widths());
    table.push(header_row());
    for item in items {
        table.push(item_row(item));
    }
    table.layout(measure)
}

/// Draw one table per content page, each opened by the header row, and the
/// running furniture on every page. Returns where the recap blocks start:
/// right below the last table, or the top of a fresh trailing page.
pub(super) fn draw_item_tables(
    canvas: &mut Canvas,
    record: &InvoiceRecord,
    pagination: &Pagination,
    furniture: &Furniture,
    measure: &dyn Measure,
    origin: Origin,
) -> Result<Origin, Error> {
    let content_top = Origin::new(MARGIN_LEFT, PAGE_HEIGHT - MARGIN_TOP);
    let total_pages = pagination.total_pages();

    let tables = pagination
        .pages
        .iter()
        .map(|range| page_table(&record.items[range.clone()], measure))
        .collect::<Result<Vec<_>, Error>>()?;

    let mut at = origin;
    let mut last_height = 0.0;
    for (i, table) in tables.iter().enumerate() {
        if i > 0 {
            canvas.show_page();
            at = content_top;
        }
        let page = canvas.page_number();
        furniture.draw(canvas, page, total_pages);
        log::debug!(
            "items: page {} holds {} rows, table {:.1}pt",
            page,
            table.row_count() - 1,
            table.height()
        );
        table.draw(canvas, at);
        last_height = table.height();
    }

    if pagination.trailing_page {
        canvas.show_page();
        let page = canvas.page_number();
        furniture.draw(canvas, page, total_pages);
        return Ok(content_top);
    }
    Ok(at.down(last_height))
}

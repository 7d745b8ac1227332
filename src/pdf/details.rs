//! First-page details: logo, company block, invoice block and the
//! billing/shipping address blocks.

use crate::error::Error;
use crate::fonts::{Font, Measure};
use crate::model::{Address, InvoiceRecord};
use crate::svg::VectorImage;

use super::canvas::{BLACK, Canvas, Origin};
use super::{
    HORIZONTAL_SPACING, LINE_SPACE, MARGIN_LEFT, MARGIN_RIGHT, MARGIN_TOP, MAX_LOGO_SIZE,
    PAGE_HEIGHT, PAGE_WIDTH, VERTICAL_SPACING,
};

const COMPANY_NAME_SIZE: f32 = 18.0;
const INVOICE_TITLE_SIZE: f32 = 16.0;
const DETAIL_SIZE: f32 = 12.0;
const ADDRESS_TITLE_SIZE: f32 = 12.0;
const ADDRESS_SIZE: f32 = 10.0;

/// Uniform factor that brings the larger logo side down to [`MAX_LOGO_SIZE`].
/// Logos already small enough are drawn at their natural size.
pub fn logo_scale(width: f32, height: f32) -> f32 {
    let max_side = width.max(height);
    if max_side > MAX_LOGO_SIZE {
        MAX_LOGO_SIZE / max_side
    } else {
        1.0
    }
}

/// Draw the details on the first page and return where the item table starts.
pub(super) fn draw_details(
    canvas: &mut Canvas,
    record: &InvoiceRecord,
    logo: Option<&VectorImage>,
    measure: &dyn Measure,
) -> Result<Origin, Error> {
    let company_end = draw_company(canvas, record, logo, measure)?;
    let invoice_end = draw_invoice_block(canvas, record, measure)?;
    let addresses_end = draw_addresses(canvas, record, invoice_end, measure)?;

    let lowest = company_end.y.min(addresses_end);
    log::debug!(
        "details: company block ends at {:.1}, addresses at {:.1}",
        company_end.y,
        addresses_end
    );
    Ok(Origin::new(MARGIN_LEFT, lowest - VERTICAL_SPACING))
}

/// Logo then company identity, top-left. Returns the last baseline.
fn draw_company(
    canvas: &mut Canvas,
    record: &InvoiceRecord,
    logo: Option<&VectorImage>,
    measure: &dyn Measure,
) -> Result<Origin, Error> {
    let company = &record.company;
    measure.text_width(&company.name, Font::HelveticaBold, COMPANY_NAME_SIZE)?;
    for line in [&company.address, &company.zip_city, &company.phone, &company.email] {
        measure.text_width(line, Font::Helvetica, DETAIL_SIZE)?;
    }

    let mut at = Origin::new(MARGIN_LEFT, PAGE_HEIGHT - MARGIN_TOP);

    if let Some(logo) = logo {
        let scale = logo_scale(logo.width, logo.height);
        at = at.down(logo.height * scale);
        canvas.logo(logo, at, scale);
    }

    at = at.down(VERTICAL_SPACING);
    canvas.text(at, Font::HelveticaBold, COMPANY_NAME_SIZE, BLACK, &company.name);
    for line in [&company.address, &company.zip_city, &company.phone, &company.email] {
        at = at.down(DETAIL_SIZE + LINE_SPACE);
        canvas.text(at, Font::Helvetica, DETAIL_SIZE, BLACK, line);
    }
    Ok(at)
}

/// Invoice number, dates and customer, right-aligned as one block.
/// Returns the baseline of its last line.
fn draw_invoice_block(
    canvas: &mut Canvas,
    record: &InvoiceRecord,
    measure: &dyn Measure,
) -> Result<Origin, Error> {
    let customer = &record.customer;
    let title = format!("Facture n°{}", customer.invoice_number);

    let mut lines = Vec::with_capacity(4);
    if let Some(number) = customer.number() {
        lines.push(format!("Numéro de client: {number}"));
    }
    lines.push(format!("Date: {}", customer.invoice_date));
    lines.push(format!("Echéance: {}", customer.due_date));
    lines.push(format!("Client: {}", customer.name));

    let mut block_width = measure.text_width(&title, Font::HelveticaBold, INVOICE_TITLE_SIZE)?;
    for line in &lines {
        block_width = block_width.max(measure.text_width(line, Font::Helvetica, DETAIL_SIZE)?);
    }

    let mut at = Origin::new(
        PAGE_WIDTH - MARGIN_RIGHT - block_width,
        PAGE_HEIGHT - MARGIN_TOP - 0.5 * VERTICAL_SPACING,
    );
    canvas.text(at, Font::HelveticaBold, INVOICE_TITLE_SIZE, BLACK, &title);
    at = at.down(INVOICE_TITLE_SIZE + LINE_SPACE);
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            at = at.down(DETAIL_SIZE + LINE_SPACE);
        }
        canvas.text(at, Font::Helvetica, DETAIL_SIZE, BLACK, line);
    }
    Ok(at)
}

/// Billing block flush right below the invoice block, shipping block to its
/// left when any shipping field is set. Returns the lowest baseline drawn.
fn draw_addresses(
    canvas: &mut Canvas,
    record: &InvoiceRecord,
    invoice_end: Origin,
    measure: &dyn Measure,
) -> Result<f32, Error> {
    let top = invoice_end.y - (DETAIL_SIZE + LINE_SPACE + 0.5 * VERTICAL_SPACING);

    let billing_width = address_block_width(&record.invoicing_address, "facturation", measure)?;
    let billing_x = PAGE_WIDTH - MARGIN_RIGHT - billing_width;
    let mut end = draw_address_block(
        canvas,
        Origin::new(billing_x, top),
        "facturation",
        &record.invoicing_address,
    );

    let shipping = &record.shipping_address;
    if shipping.is_present() {
        let shipping_width = address_block_width(shipping, "livraison", measure)?;
        let shipping_x = billing_x - HORIZONTAL_SPACING - shipping_width;
        let shipping_end =
            draw_address_block(canvas, Origin::new(shipping_x, top), "livraison", shipping);
        end = end.min(shipping_end);
    }
    Ok(end)
}

fn address_block_width(
    address: &Address,
    kind: &str,
    measure: &dyn Measure,
) -> Result<f32, Error> {
    let mut width = measure.text_width("Adresse de", Font::HelveticaBold, ADDRESS_TITLE_SIZE)?;
    width = width.max(measure.text_width(kind, Font::HelveticaBold, ADDRESS_TITLE_SIZE)?);
    for line in address.lines() {
        width = width.max(measure.text_width(line, Font::Helvetica, ADDRESS_SIZE)?);
    }
    Ok(width)
}

fn draw_address_block(canvas: &mut Canvas, top: Origin, kind: &str, address: &Address) -> f32 {
    let mut at = top;
    canvas.text(at, Font::HelveticaBold, ADDRESS_TITLE_SIZE, BLACK, "Adresse de");
    at = at.down(ADDRESS_TITLE_SIZE + LINE_SPACE);
    canvas.text(at, Font::HelveticaBold, ADDRESS_TITLE_SIZE, BLACK, kind);
    at = at.down(ADDRESS_TITLE_SIZE + LINE_SPACE + LINE_SPACE);

    for (i, line) in address.lines().filter(|l| !l.is_empty()).enumerate() {
        if i > 0 {
            at = at.down(ADDRESS_SIZE + LINE_SPACE);
        }
        canvas.text(at, Font::Helvetica, ADDRESS_SIZE, BLACK, line);
    }
    at.y
}


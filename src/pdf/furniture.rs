use crate::error::Error;
use crate::fonts::{Font, Measure};
use crate::model::InvoiceRecord;

use super::canvas::{Canvas, FURNITURE_GRAY, Origin};
use super::{MARGIN_BOTTOM, MARGIN_LEFT, MARGIN_RIGHT, MARGIN_TOP, PAGE_HEIGHT, PAGE_WIDTH};

const FURNITURE_SIZE: f32 = 8.0;

/// Running header and footer, measured once up front so that drawing them
/// on each page cannot fail halfway through a document.
pub(super) struct Furniture {
    invoice_number: String,
    invoice_number_width: f32,
    legal_line: String,
    legal_line_width: f32,
}

impl Furniture {
    pub(super) fn new(record: &InvoiceRecord, measure: &dyn Measure) -> Result<Self, Error> {
        let company = &record.company;
        let legal_line = format!(
            "{} RCS {} - Numéro de TVA intracommunautaire {}",
            company.name, company.registration_number, company.vat_number
        );
        let invoice_number = record.customer.invoice_number.clone();
        Ok(Furniture {
            invoice_number_width: measure.text_width(
                &invoice_number,
                Font::Helvetica,
                FURNITURE_SIZE,
            )?,
            invoice_number,
            legal_line_width: measure.text_width(&legal_line, Font::Helvetica, FURNITURE_SIZE)?,
            legal_line,
        })
    }

    /// "Page X/Y" top-left, invoice number top-right.
    pub(super) fn draw_header(&self, canvas: &mut Canvas, page: usize, total_pages: usize) {
        let baseline = Origin::new(MARGIN_LEFT, PAGE_HEIGHT - 0.5 * MARGIN_TOP);
        canvas.text(
            baseline,
            Font::Helvetica,
            FURNITURE_SIZE,
            FURNITURE_GRAY,
            &format!("Page {page}/{total_pages}"),
        );
        canvas.text(
            baseline.with_x(PAGE_WIDTH - MARGIN_RIGHT - self.invoice_number_width),
            Font::Helvetica,
            FURNITURE_SIZE,
            FURNITURE_GRAY,
            &self.invoice_number,
        );
    }

    /// Centered legal line in the bottom margin.
    pub(super) fn draw_footer(&self, canvas: &mut Canvas) {
        canvas.text(
            Origin::new(
                0.5 * (PAGE_WIDTH - self.legal_line_width),
                0.5 * MARGIN_BOTTOM,
            ),
            Font::Helvetica,
            FURNITURE_SIZE,
            FURNITURE_GRAY,
            &self.legal_line,
        );
    }

    pub(super) fn draw(&self, canvas: &mut Canvas, page: usize, total_pages: usize) {
        self.draw_header(canvas, page, total_pages);
        self.draw_footer(canvas);
    }
}

//! Payment terms and totals, drawn side by side after the item table.

use crate::error::Error;
use crate::fonts::{Font, Measure};
use crate::model::{InvoiceRecord, Totals};

use super::canvas::{Canvas, HEADER_ROW_GRAY, Origin};
use super::flow::Paragraph;
use super::table::{Cell, LaidOutTable, Padding, Row, Table};
use super::{CONTENT_WIDTH, HORIZONTAL_SPACING, VERTICAL_SPACING};

const TOTALS_SIZE: f32 = 12.0;
const TOTALS_PADDING: Padding = Padding {
    top: 5.0,
    bottom: 5.0,
    left: 6.0,
    right: 6.0,
};

/// Label and formatted value of each totals row.
pub fn totals_rows(totals: &Totals) -> [(&'static str, String); 4] {
    [
        ("Total HT (€)", format!("{:.2}", totals.subtotal)),
        ("Taux de TVA", format!("{:.2}%", totals.vat_rate)),
        ("Remise (€)", format!("{:.2}", totals.discount)),
        ("Total TTC (€)", format!("{:.2}", totals.total)),
    ]
}

pub(super) struct Recap {
    payment_terms: LaidOutTable,
    totals: LaidOutTable,
}

impl Recap {
    pub(super) fn build(record: &InvoiceRecord, measure: &dyn Measure) -> Result<Self, Error> {
        Ok(Recap {
            payment_terms: payment_terms_table(&record.payment_terms).layout(measure)?,
            totals: totals_table(&record.totals()).layout(measure)?,
        })
    }

    /// Room the recap needs below the last table row.
    pub(super) fn minimum_height(&self) -> f32 {
        self.block_height() + VERTICAL_SPACING
    }

    fn block_height(&self) -> f32 {
        self.payment_terms.height().max(self.totals.height())
    }

    /// Payment terms hang from `at` on the left. Totals sit at the right edge,
    /// inset by half the horizontal spacing, sharing the bottom of the taller block.
    pub(super) fn draw(&self, canvas: &mut Canvas, at: Origin) {
        self.payment_terms.draw(canvas, at);

        let bottom = at.y - self.block_height();
        let totals_at = Origin::new(
            at.x + CONTENT_WIDTH - self.totals.width() - 0.5 * HORIZONTAL_SPACING,
            bottom + self.totals.height(),
        );
        self.totals.draw(canvas, totals_at);
    }
}

fn totals_table(totals: &Totals) -> Table {
    let width = 0.3 * CONTENT_WIDTH;
    let mut table = Table::new(vec![0.6 * width, 0.4 * width]).with_padding(TOTALS_PADDING);
    for (label, value) in totals_rows(totals) {
        table.push(Row::new(vec![
            Cell::text(label, Font::HelveticaBold, TOTALS_SIZE),
            Cell::text(value, Font::Helvetica, TOTALS_SIZE),
        ]));
    }
    table
}

fn payment_terms_table(terms: &[String]) -> Table {
    let mut table = Table::new(vec![0.5 * CONTENT_WIDTH]);
    table.push(
        Row::new(vec![Cell::flow(
            Paragraph::body().text("Remarques et conditions de paiement", Font::HelveticaBold),
        )])
        .with_background(HEADER_ROW_GRAY),
    );
    table.push(Row::new(vec![Cell::flow(
        Paragraph::body().lines(terms, Font::Helvetica),
    )]));
    table
}

mod common;

use facture_pdf::{Totals, totals_rows};

use common::*;

#[test]
fn single_item_with_vat() {
    let totals = Totals::from_record(&sample_record());
    assert_eq!(totals.subtotal, 20.0);
    assert_eq!(totals.total, 24.0);
    let rows = totals_rows(&totals);
    assert_eq!(rows[0], ("Total HT (€)", "20.00".to_string()));
    assert_eq!(rows[1], ("Taux de TVA", "20.00%".to_string()));
    assert_eq!(rows[2], ("Remise (€)", "0.00".to_string()));
    assert_eq!(rows[3], ("Total TTC (€)", "24.00".to_string()));
}

#[test]
fn discount_is_subtracted_after_vat() {
    let mut record = sample_record();
    record.items = vec![item("A", "", 4, 25.0)];
    record.vat_rate = 20.0;
    record.discount = 5.0;
    let totals = record.totals();
    assert_eq!(totals.subtotal, 100.0);
    assert_eq!(totals.total, 115.0);
}

#[test]
fn subtotal_sums_every_line() {
    let mut record = sample_record();
    record.items = vec![item("A", "", 3, 1.25), item("B", "", 1, 0.5), item("C", "", 0, 99.0)];
    record.vat_rate = 0.0;
    let totals = record.totals();
    assert_eq!(totals.subtotal, 4.25);
    assert_eq!(totals.total, 4.25);
}

#[test]
fn empty_invoice_totals_are_positive_zero() {
    let mut record = sample_record();
    record.items.clear();
    record.discount = 0.0;
    let totals = record.totals();
    assert!(totals.subtotal.is_sign_positive());
    assert!(totals.total.is_sign_positive());
    let rows = totals_rows(&totals);
    assert_eq!(rows[0].1, "0.00");
    assert_eq!(rows[3].1, "0.00");
}

#[test]
fn no_items_total_minus_discount() {
    let mut record = sample_record();
    record.items.clear();
    record.discount = 3.0;
    let rows = totals_rows(&record.totals());
    assert_eq!(rows[0].1, "0.00");
    assert_eq!(rows[3].1, "-3.00");
}

#[test]
fn display_rounds_to_cents() {
    let mut record = sample_record();
    record.items = vec![item("A", "", 1, 10.005)];
    record.vat_rate = 5.5;
    let rows = totals_rows(&record.totals());
    assert_eq!(rows[1].1, "5.50%");
    // full precision is kept until display
    assert_eq!(record.totals().subtotal, 10.005);
}

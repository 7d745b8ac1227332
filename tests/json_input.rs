mod common;

use facture_pdf::{Error, parse_json, parse_json_bytes};
use serde_json::json;

use common::*;

#[test]
fn sample_record_parses() {
    let record = parse_json(&sample_json()).expect("parse");
    assert_eq!(record.company.name, COMPANY_NAME);
    assert_eq!(record.company.vat_number, "FR12345678901");
    assert_eq!(record.company.website, "atelier-dupont.fr");
    assert_eq!(record.customer.number(), Some("C-042"));
    assert_eq!(record.customer.invoice_number, INVOICE_NUMBER);
    assert_eq!(record.invoicing_address.zip_city, "69006 Lyon");
    assert!(record.invoicing_address.phone.is_empty());
    assert!(!record.shipping_address.is_present());
    assert_eq!(record.items, vec![item("Chaise", "Chêne massif", 2, 10.0)]);
    assert_eq!(record.vat_rate, 20.0);
    assert_eq!(record.discount, 0.0);
    assert_eq!(record.payment_terms, vec!["Paiement à 30 jours."]);
}

#[test]
fn bytes_and_str_agree() {
    let json = sample_json();
    assert_eq!(
        parse_json(&json).expect("str"),
        parse_json_bytes(json.as_bytes()).expect("bytes")
    );
}

#[test]
fn missing_required_field_is_named() {
    for key in ["invoice_number", "company_VAT_number", "VAT_rate", "items", "payment_terms"] {
        let err = parse_json(&sample_json_with(key, None)).unwrap_err();
        assert!(
            matches!(err, Error::MissingField(ref f) if f == key),
            "{key}: got {err:?}"
        );
    }
}

#[test]
fn null_counts_as_missing() {
    let err = parse_json(&sample_json_with("due_date", Some(json!(null)))).unwrap_err();
    assert!(matches!(err, Error::MissingField(ref f) if f == "due_date"));
}

#[test]
fn optional_fields_default_to_empty() {
    let mut json: serde_json::Value = serde_json::from_str(&sample_json()).expect("json");
    let object = json.as_object_mut().expect("object");
    object.retain(|k, _| {
        !k.starts_with("invoicing_") && k != "company_website" && k != "customer_number"
    });
    let record = parse_json(&json.to_string()).expect("parse");
    assert!(record.company.website.is_empty());
    assert_eq!(record.customer.number(), None);
    assert!(!record.invoicing_address.is_present());
}

#[test]
fn mistyped_field_is_reported() {
    let err = parse_json(&sample_json_with("VAT_rate", Some(json!("vingt")))).unwrap_err();
    assert!(
        matches!(err, Error::InvalidField { ref field, .. } if field == "VAT_rate"),
        "got {err:?}"
    );

    let err = parse_json(&sample_json_with("customer_name", Some(json!(["a"])))).unwrap_err();
    assert!(matches!(err, Error::InvalidField { ref field, .. } if field == "customer_name"));
}

#[test]
fn numeric_invoice_number_is_accepted() {
    let record = parse_json(&sample_json_with("invoice_number", Some(json!(1042)))).expect("parse");
    assert_eq!(record.customer.invoice_number, "1042");
}

#[test]
fn numeric_customer_number_coexists_with_numeric_fields() {
    let json = sample_json_with("customer_number", Some(json!(42)));
    let json = {
        let mut value: serde_json::Value = serde_json::from_str(&json).expect("json");
        value["VAT_rate"] = json!(5.5);
        value["discount"] = json!(1.25);
        value.to_string()
    };
    let record = parse_json(&json).expect("parse");
    assert_eq!(record.customer.number(), Some("42"));
    assert_eq!(record.vat_rate, 5.5);
    assert_eq!(record.discount, 1.25);
}

#[test]
fn negative_quantity_is_rejected() {
    let items = json!([{"title": "Chaise", "description": "", "quantity": -1, "unit_price": 10}]);
    let err = parse_json(&sample_json_with("items", Some(items))).unwrap_err();
    assert!(
        matches!(err, Error::InvalidField { ref field, .. } if field == "items[0].quantity"),
        "got {err:?}"
    );
}

#[test]
fn fractional_quantity_is_rejected() {
    let items = json!([{"title": "Chaise", "quantity": 1.5, "unit_price": 10}]);
    let err = parse_json(&sample_json_with("items", Some(items))).unwrap_err();
    assert!(matches!(err, Error::InvalidField { ref field, .. } if field == "items[0].quantity"));
}

#[test]
fn negative_price_is_rejected() {
    let items = json!([{"title": "Chaise", "quantity": 1, "unit_price": -0.01}]);
    let err = parse_json(&sample_json_with("items", Some(items))).unwrap_err();
    assert!(matches!(err, Error::InvalidField { ref field, .. } if field == "items[0].unit_price"));
}

#[test]
fn negative_vat_rate_is_rejected() {
    let err = parse_json(&sample_json_with("VAT_rate", Some(json!(-5)))).unwrap_err();
    assert!(matches!(err, Error::InvalidField { ref field, .. } if field == "VAT_rate"));
}

#[test]
fn row_items_skip_a_leading_header_row() {
    let items = json!([
        ["Article", "Description", "Quantité", "Prix"],
        ["Chaise", "Chêne massif", 2, 10.0],
        ["Table", "Noyer", 1, 120]
    ]);
    let record = parse_json(&sample_json_with("items", Some(items))).expect("parse");
    assert_eq!(
        record.items,
        vec![
            item("Chaise", "Chêne massif", 2, 10.0),
            item("Table", "Noyer", 1, 120.0)
        ]
    );
}

#[test]
fn row_items_without_header_keep_every_row() {
    let items = json!([["Chaise", "Chêne massif", 2, 10.0]]);
    let record = parse_json(&sample_json_with("items", Some(items))).expect("parse");
    assert_eq!(record.items.len(), 1);
}

#[test]
fn short_row_is_rejected() {
    let items = json!([["Chaise", 2, 10.0]]);
    let err = parse_json(&sample_json_with("items", Some(items))).unwrap_err();
    assert!(matches!(err, Error::InvalidField { ref field, .. } if field == "items[0]"));
}

#[test]
fn payment_terms_accept_a_single_string() {
    let terms = json!("Paiement à réception.\nPénalités de retard: 3 fois le taux légal.");
    let record = parse_json(&sample_json_with("payment_terms", Some(terms))).expect("parse");
    assert_eq!(record.payment_terms.len(), 2);
}

#[test]
fn syntax_errors_surface_as_json_errors() {
    let err = parse_json("{\"company_name\": ").unwrap_err();
    assert!(matches!(err, Error::Json(_)), "got {err:?}");
}

#[test]
fn top_level_must_be_an_object() {
    let err = parse_json("[1, 2, 3]").unwrap_err();
    assert!(matches!(err, Error::Json(_)), "got {err:?}");
}

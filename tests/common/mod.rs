#![allow(dead_code)]

use facture_pdf::{
    Address, Company, Customer, Document, DrawOp, Font, InvoiceRecord, LineItem, Measure,
    StandardMetrics,
};

pub const INVOICE_NUMBER: &str = "F-2024-001";
pub const COMPANY_NAME: &str = "Atelier Dupont SARL";

/// 300x100 logo: scaled by one half to fit the 150pt box.
pub const WIDE_LOGO: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="300" height="100">
  <rect x="0" y="0" width="300" height="100" fill="#1a5fb4"/>
  <circle cx="50" cy="50" r="30" fill="white" stroke="black" stroke-width="2"/>
  <path d="M 120 20 L 280 20 L 280 80 Z"/>
</svg>"##;

pub fn item(title: &str, description: &str, quantity: u32, unit_price: f64) -> LineItem {
    LineItem {
        title: title.to_string(),
        description: description.to_string(),
        quantity,
        unit_price,
    }
}

/// One item, two units at 10.00, 20 % VAT, no discount, no logo.
pub fn sample_record() -> InvoiceRecord {
    InvoiceRecord {
        company: Company {
            name: COMPANY_NAME.to_string(),
            logo: String::new(),
            vat_number: "FR12345678901".to_string(),
            registration_number: "Paris B 123 456 789".to_string(),
            email: "contact@atelier-dupont.fr".to_string(),
            website: "atelier-dupont.fr".to_string(),
            address: "12 rue des Lilas".to_string(),
            zip_city: "75011 Paris".to_string(),
            phone: "01 23 45 67 89".to_string(),
        },
        customer: Customer {
            number: None,
            name: "Martin & Fils".to_string(),
            invoice_number: INVOICE_NUMBER.to_string(),
            invoice_date: "01/03/2024".to_string(),
            due_date: "31/03/2024".to_string(),
        },
        invoicing_address: Address {
            address: "4 avenue Foch".to_string(),
            zip_city: "69006 Lyon".to_string(),
            phone: "04 11 22 33 44".to_string(),
            email: "compta@martin-fils.fr".to_string(),
        },
        shipping_address: Address::default(),
        items: vec![item("Chaise", "Chêne massif, finition huilée", 2, 10.0)],
        vat_rate: 20.0,
        discount: 0.0,
        payment_terms: vec![
            "Paiement à 30 jours.".to_string(),
            "Pas d'escompte pour paiement anticipé.".to_string(),
        ],
    }
}

/// `n` items whose description paragraph is two lines (24pt) each.
pub fn record_with_items(n: usize) -> InvoiceRecord {
    let mut record = sample_record();
    record.items = (0..n)
        .map(|i| item(&format!("Article {i}"), "Description courte", 1, 1.5))
        .collect();
    record
}

pub fn shipping_address() -> Address {
    Address {
        address: "Entrepôt B, ZI Nord".to_string(),
        zip_city: "69120 Vaulx-en-Velin".to_string(),
        phone: String::new(),
        email: String::new(),
    }
}

/// Every string drawn on page `page` (0-based).
pub fn page_texts(doc: &Document, page: usize) -> Vec<String> {
    doc.pages[page].texts().map(str::to_string).collect()
}

pub fn all_texts(doc: &Document) -> Vec<String> {
    doc.pages
        .iter()
        .flat_map(|p| p.texts().map(str::to_string))
        .collect()
}

/// Position, font and size of the first text op equal to `needle` on `page`.
pub fn text_op(doc: &Document, page: usize, needle: &str) -> Option<(f32, f32, Font, f32)> {
    match doc.pages[page].find_text(needle)? {
        DrawOp::Text {
            x, y, font, size, ..
        } => Some((*x, *y, *font, *size)),
        _ => None,
    }
}

pub fn width(text: &str, font: Font, size: f32) -> f32 {
    StandardMetrics
        .text_width(text, font, size)
        .expect("measurable text")
}

pub fn sample_json() -> String {
    r#"{
        "company_name": "Atelier Dupont SARL",
        "company_logo": "",
        "company_VAT_number": "FR12345678901",
        "company_registration_number": "Paris B 123 456 789",
        "company_email": "contact@atelier-dupont.fr",
        "company_website": "atelier-dupont.fr",
        "company_address": "12 rue des Lilas",
        "company_zip_city": "75011 Paris",
        "company_phone": "01 23 45 67 89",
        "customer_number": "C-042",
        "customer_name": "Martin & Fils",
        "invoice_number": "F-2024-001",
        "invoice_date": "01/03/2024",
        "due_date": "31/03/2024",
        "invoicing_address": "4 avenue Foch",
        "invoicing_zip_city": "69006 Lyon",
        "items": [
            {"title": "Chaise", "description": "Chêne massif", "quantity": 2, "unit_price": 10.0}
        ],
        "VAT_rate": 20,
        "discount": 0,
        "payment_terms": ["Paiement à 30 jours."]
    }"#
    .to_string()
}

/// Replace one top-level key of the sample JSON, or drop it with `None`.
pub fn sample_json_with(key: &str, value: Option<serde_json::Value>) -> String {
    let mut json: serde_json::Value =
        serde_json::from_str(&sample_json()).expect("sample json parses");
    let object = json.as_object_mut().expect("sample json is an object");
    match value {
        Some(v) => {
            object.insert(key.to_string(), v);
        }
        None => {
            object.remove(key);
        }
    }
    json.to_string()
}

/// Inflate every FlateDecode stream in `pdf` and return their contents.
pub fn inflated_streams(pdf: &[u8]) -> Vec<String> {
    let mut streams = Vec::new();
    let mut pos = 0;
    while let Some(start) = find(pdf, b"stream\n", pos) {
        let data_start = start + b"stream\n".len();
        let Some(end) = find(pdf, b"\nendstream", data_start) else {
            break;
        };
        if let Ok(raw) = miniz_oxide::inflate::decompress_to_vec_zlib(&pdf[data_start..end]) {
            streams.push(String::from_utf8_lossy(&raw).into_owned());
        }
        pos = end + b"\nendstream".len();
    }
    streams
}

pub fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    haystack
        .get(from..)?
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|i| i + from)
}

pub fn count(haystack: &[u8], needle: &[u8]) -> usize {
    haystack.windows(needle.len()).filter(|w| *w == needle).count()
}

//! JSON invoice records.
//!
//! Keys follow the flat record format (`company_name`, `VAT_rate`, ...).
//! Every key is deserialised loosely first so that a missing or mistyped
//! field is reported by name instead of as a serde position.

use serde::Deserialize;
use serde_json::Value;

use crate::error::Error;
use crate::model::{Address, Company, Customer, InvoiceRecord, LineItem};

#[derive(Deserialize)]
struct RawInvoice {
    company_name: Option<Value>,
    company_logo: Option<Value>,
    #[serde(rename = "company_VAT_number")]
    company_vat_number: Option<Value>,
    company_registration_number: Option<Value>,
    company_email: Option<Value>,
    company_website: Option<Value>,
    company_address: Option<Value>,
    company_zip_city: Option<Value>,
    company_phone: Option<Value>,

    customer_number: Option<Value>,
    customer_name: Option<Value>,
    invoice_number: Option<Value>,
    invoice_date: Option<Value>,
    due_date: Option<Value>,

    invoicing_address: Option<Value>,
    invoicing_zip_city: Option<Value>,
    invoicing_phone: Option<Value>,
    invoicing_email: Option<Value>,

    shipping_address: Option<Value>,
    shipping_zip_city: Option<Value>,
    shipping_phone: Option<Value>,
    shipping_email: Option<Value>,

    items: Option<Value>,
    #[serde(rename = "VAT_rate")]
    vat_rate: Option<Value>,
    discount: Option<Value>,
    payment_terms: Option<Value>,
}

/// One line item, either keyed or as a `[title, description, quantity, unit_price]` row.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawItem {
    Row(Vec<Value>),
    Keyed {
        title: Option<Value>,
        description: Option<Value>,
        quantity: Option<Value>,
        unit_price: Option<Value>,
    },
}

pub fn parse_json(input: &str) -> Result<InvoiceRecord, Error> {
    let raw: RawInvoice = serde_json::from_str(input)?;
    raw.into_record()
}

pub fn parse_json_bytes(input: &[u8]) -> Result<InvoiceRecord, Error> {
    let raw: RawInvoice = serde_json::from_slice(input)?;
    raw.into_record()
}

impl RawInvoice {
    fn into_record(self) -> Result<InvoiceRecord, Error> {
        let company = Company {
            name: required_text("company_name", self.company_name.as_ref())?,
            logo: required_text("company_logo", self.company_logo.as_ref())?,
            vat_number: required_text("company_VAT_number", self.company_vat_number.as_ref())?,
            registration_number: required_text(
                "company_registration_number",
                self.company_registration_number.as_ref(),
            )?,
            email: required_text("company_email", self.company_email.as_ref())?,
            website: optional_text("company_website", self.company_website.as_ref())?,
            address: required_text("company_address", self.company_address.as_ref())?,
            zip_city: required_text("company_zip_city", self.company_zip_city.as_ref())?,
            phone: required_text("company_phone", self.company_phone.as_ref())?,
        };

        let customer_number = optional_text("customer_number", self.customer_number.as_ref())?;
        let customer = Customer {
            number: Some(customer_number).filter(|n| !n.is_empty()),
            name: required_text("customer_name", self.customer_name.as_ref())?,
            invoice_number: required_text("invoice_number", self.invoice_number.as_ref())?,
            invoice_date: required_text("invoice_date", self.invoice_date.as_ref())?,
            due_date: required_text("due_date", self.due_date.as_ref())?,
        };

        let invoicing_address = Address {
            address: optional_text("invoicing_address", self.invoicing_address.as_ref())?,
            zip_city: optional_text("invoicing_zip_city", self.invoicing_zip_city.as_ref())?,
            phone: optional_text("invoicing_phone", self.invoicing_phone.as_ref())?,
            email: optional_text("invoicing_email", self.invoicing_email.as_ref())?,
        };
        let shipping_address = Address {
            address: optional_text("shipping_address", self.shipping_address.as_ref())?,
            zip_city: optional_text("shipping_zip_city", self.shipping_zip_city.as_ref())?,
            phone: optional_text("shipping_phone", self.shipping_phone.as_ref())?,
            email: optional_text("shipping_email", self.shipping_email.as_ref())?,
        };

        let items = line_items(required("items", self.items.as_ref())?)?;

        let vat_rate = number("VAT_rate", required("VAT_rate", self.vat_rate.as_ref())?)?;
        if vat_rate < 0.0 {
            return Err(Error::invalid(
                "VAT_rate",
                format!("must not be negative, got {vat_rate}"),
            ));
        }
        let discount = number("discount", required("discount", self.discount.as_ref())?)?;
        let payment_terms =
            payment_terms(required("payment_terms", self.payment_terms.as_ref())?)?;

        let record = InvoiceRecord {
            company,
            customer,
            invoicing_address,
            shipping_address,
            items,
            vat_rate,
            discount,
            payment_terms,
        };
        record.validate()?;
        Ok(record)
    }
}

fn required<'a>(field: &str, value: Option<&'a Value>) -> Result<&'a Value, Error> {
    match value {
        None | Some(Value::Null) => Err(Error::MissingField(field.to_string())),
        Some(v) => Ok(v),
    }
}

/// Strings as-is; bare numbers are accepted for identifiers such as invoice numbers.
fn text(field: &str, value: &Value) -> Result<String, Error> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(Error::invalid(field, format!("expected a string, got {}", kind(other)))),
    }
}

fn required_text(field: &str, value: Option<&Value>) -> Result<String, Error> {
    text(field, required(field, value)?)
}

fn optional_text(field: &str, value: Option<&Value>) -> Result<String, Error> {
    match value {
        None | Some(Value::Null) => Ok(String::new()),
        Some(v) => text(field, v),
    }
}

fn number(field: &str, value: &Value) -> Result<f64, Error> {
    value
        .as_f64()
        .ok_or_else(|| Error::invalid(field, format!("expected a number, got {}", kind(value))))
}

fn quantity(field: &str, value: &Value) -> Result<u32, Error> {
    let n = number(field, value)?;
    if n < 0.0 || n.fract() != 0.0 || n > f64::from(u32::MAX) {
        return Err(Error::invalid(
            field,
            format!("must be a non-negative whole number, got {n}"),
        ));
    }
    Ok(n as u32)
}

fn line_items(value: &Value) -> Result<Vec<LineItem>, Error> {
    let raw = Vec::<RawItem>::deserialize(value)
        .map_err(|e| Error::invalid("items", format!("expected a list of items: {e}")))?;

    let mut items = Vec::with_capacity(raw.len());
    for (i, item) in raw.iter().enumerate() {
        let (title, description, qty, unit_price) = match item {
            RawItem::Row(cells) => {
                // leading row of column labels, e.g. ["Article", "Description", "Quantité", …]
                if i == 0 && cells.get(2).is_some_and(|q| !q.is_number()) {
                    log::debug!("items: skipping header row");
                    continue;
                }
                if cells.len() != 4 {
                    return Err(Error::invalid(
                        format!("items[{i}]"),
                        format!("expected 4 cells, got {}", cells.len()),
                    ));
                }
                (cells.first(), cells.get(1), cells.get(2), cells.get(3))
            }
            RawItem::Keyed {
                title,
                description,
                quantity,
                unit_price,
            } => (
                title.as_ref(),
                description.as_ref(),
                quantity.as_ref(),
                unit_price.as_ref(),
            ),
        };

        let field = |name: &str| format!("items[{i}].{name}");
        let unit_price = number(&field("unit_price"), required(&field("unit_price"), unit_price)?)?;
        if unit_price < 0.0 {
            return Err(Error::invalid(
                field("unit_price"),
                format!("must not be negative, got {unit_price}"),
            ));
        }
        items.push(LineItem {
            title: optional_text(&field("title"), title)?,
            description: optional_text(&field("description"), description)?,
            quantity: quantity(&field("quantity"), required(&field("quantity"), qty)?)?,
            unit_price,
        });
    }
    Ok(items)
}

/// A list of lines, or a single string split on newlines.
fn payment_terms(value: &Value) -> Result<Vec<String>, Error> {
    match value {
        Value::Array(lines) => lines
            .iter()
            .enumerate()
            .map(|(i, line)| text(&format!("payment_terms[{i}]"), line))
            .collect(),
        Value::String(s) => Ok(s.lines().map(str::to_string).collect()),
        other => Err(Error::invalid(
            "payment_terms",
            format!("expected a list of strings, got {}", kind(other)),
        )),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

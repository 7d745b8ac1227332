use crate::error::Error;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Company {
    pub name: String,
    /// SVG markup. Empty means the invoice has no logo.
    pub logo: String,
    pub vat_number: String,
    pub registration_number: String,
    pub email: String,
    pub website: String,
    pub address: String,
    pub zip_city: String,
    pub phone: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Customer {
    pub number: Option<String>,
    pub name: String,
    pub invoice_number: String,
    pub invoice_date: String,
    pub due_date: String,
}

impl Customer {
    /// Customer number, treating an empty string as absent.
    pub fn number(&self) -> Option<&str> {
        self.number.as_deref().filter(|n| !n.is_empty())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Address {
    pub address: String,
    pub zip_city: String,
    pub phone: String,
    pub email: String,
}

impl Address {
    /// A block is drawn only when at least one of its fields carries text.
    pub fn is_present(&self) -> bool {
        self.lines().any(|l| !l.is_empty())
    }

    pub(crate) fn lines(&self) -> impl Iterator<Item = &str> {
        [
            self.address.as_str(),
            self.zip_city.as_str(),
            self.phone.as_str(),
            self.email.as_str(),
        ]
        .into_iter()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineItem {
    pub title: String,
    pub description: String,
    pub quantity: u32,
    pub unit_price: f64,
}

impl LineItem {
    pub fn total(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InvoiceRecord {
    pub company: Company,
    pub customer: Customer,
    pub invoicing_address: Address,
    pub shipping_address: Address,
    pub items: Vec<LineItem>,
    /// Percent, e.g. `20.0` for 20 %.
    pub vat_rate: f64,
    /// Absolute amount subtracted from the taxed total.
    pub discount: f64,
    pub payment_terms: Vec<String>,
}

impl InvoiceRecord {
    /// Numeric sanity checks that must hold before anything is drawn.
    pub fn validate(&self) -> Result<(), Error> {
        for (i, item) in self.items.iter().enumerate() {
            if !item.unit_price.is_finite() || item.unit_price < 0.0 {
                return Err(Error::invalid(
                    format!("items[{i}].unit_price"),
                    format!("must be a non-negative number, got {}", item.unit_price),
                ));
            }
        }
        if !self.vat_rate.is_finite() || self.vat_rate < 0.0 {
            return Err(Error::invalid(
                "VAT_rate",
                format!("must be a non-negative number, got {}", self.vat_rate),
            ));
        }
        if !self.discount.is_finite() {
            return Err(Error::invalid(
                "discount",
                format!("must be a finite number, got {}", self.discount),
            ));
        }
        Ok(())
    }

    pub fn totals(&self) -> Totals {
        Totals::from_record(self)
    }
}

/// Recap figures, kept at full precision; rounding happens at display time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Totals {
    pub subtotal: f64,
    pub vat_rate: f64,
    pub discount: f64,
    pub total: f64,
}

impl Totals {
    pub fn from_record(record: &InvoiceRecord) -> Self {
        let subtotal = record.items.iter().map(LineItem::total).fold(0.0, |acc, t| acc + t);
        Totals {
            subtotal,
            vat_rate: record.vat_rate,
            discount: record.discount,
            total: subtotal * (1.0 + record.vat_rate / 100.0) - record.discount,
        }
    }
}

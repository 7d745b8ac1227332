mod error;
mod fonts;
mod json;
mod model;
pub mod pdf;
pub mod svg;

pub use error::Error;
pub use fonts::{Font, Measure, StandardMetrics};
pub use json::{parse_json, parse_json_bytes};
pub use model::{Address, Company, Customer, InvoiceRecord, LineItem, Totals};
pub use pdf::canvas::{Document, DrawOp, Origin, Page};
pub use pdf::paginate::{Pagination, paginate};
pub use pdf::writer::write_pdf;
pub use pdf::{layout, logo_scale, render, totals_rows};

use std::path::Path;
use std::time::Instant;

pub fn convert_json_to_pdf(input: &Path, output: &Path) -> Result<(), Error> {
    let json = std::fs::read(input).map_err(Error::Io)?;
    convert_json_bytes_to_pdf(&json, output)
}

pub fn convert_json_bytes_to_pdf(input: &[u8], output: &Path) -> Result<(), Error> {
    let t0 = Instant::now();

    let record = json::parse_json_bytes(input)?;
    let t_parse = t0.elapsed();

    let bytes = pdf::render(&record)?;
    let t_render = t0.elapsed();

    std::fs::write(output, &bytes).map_err(Error::Io)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: parse={:.1}ms, render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes)",
        t_parse.as_secs_f64() * 1000.0,
        (t_render - t_parse).as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(())
}

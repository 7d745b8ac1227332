//! Serialise a laid-out [`Document`] into PDF bytes.

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::error::Error;
use crate::fonts::{register_fonts, to_winansi_bytes};
use crate::svg::{Segment, VectorImage};

use super::canvas::{Document, DrawOp, Page};

const LOGO_NAME: &[u8] = b"Logo";
const PRODUCER: &str = "facture-pdf";

fn compress(content: Content) -> Vec<u8> {
    let raw = content.finish();
    miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6)
}

pub fn write_pdf(doc: &Document) -> Result<Vec<u8>, Error> {
    let t0 = std::time::Instant::now();
    if doc.pages.is_empty() {
        return Err(Error::Pdf("document has no pages".into()));
    }
    let places_logo = doc
        .pages
        .iter()
        .flat_map(|p| &p.ops)
        .any(|op| matches!(op, DrawOp::Logo { .. }));
    if places_logo && doc.logo.is_none() {
        return Err(Error::Pdf("logo placed but never stored".into()));
    }

    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let info_id = alloc();

    let font_pairs = register_fonts(&mut pdf, &mut alloc);

    let logo_ref = doc.logo.as_ref().map(|logo| {
        let form_ref = alloc();
        write_logo(&mut pdf, form_ref, logo);
        form_ref
    });

    let n = doc.pages.len();
    let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

    for (i, page) in doc.pages.iter().enumerate() {
        let compressed = compress(page_content(page));
        pdf.stream(content_ids[i], &compressed).filter(Filter::FlateDecode);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(n as i32);

    for i in 0..n {
        let mut page = pdf.page(page_ids[i]);
        page.media_box(Rect::new(0.0, 0.0, doc.page_width, doc.page_height))
            .parent(pages_id)
            .contents(content_ids[i]);
        let mut resources = page.resources();
        {
            let mut fonts = resources.fonts();
            for (font, font_ref) in &font_pairs {
                fonts.pair(Name(font.pdf_name().as_bytes()), *font_ref);
            }
        }
        if let Some(logo_ref) = logo_ref {
            resources.x_objects().pair(Name(LOGO_NAME), logo_ref);
        }
    }

    pdf.document_info(info_id)
        .title(TextStr(&doc.title))
        .author(TextStr(&doc.author))
        .producer(TextStr(PRODUCER));

    let bytes = pdf.finish();
    log::info!(
        "write_pdf: {} pages, {} bytes in {:.1}ms",
        n,
        bytes.len(),
        t0.elapsed().as_secs_f64() * 1000.0
    );
    Ok(bytes)
}

fn page_content(page: &Page) -> Content {
    let mut content = Content::new();
    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                font,
                size,
                color,
                text,
            } => {
                content.set_fill_rgb(color[0], color[1], color[2]);
                content.begin_text();
                content.set_font(Name(font.pdf_name().as_bytes()), *size);
                content.next_line(*x, *y);
                content.show(Str(&to_winansi_bytes(text)));
                content.end_text();
            }
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                content.save_state();
                content.set_fill_rgb(color[0], color[1], color[2]);
                content.rect(*x, *y, *width, *height);
                content.fill_nonzero();
                content.restore_state();
            }
            DrawOp::Line {
                from,
                to,
                width,
                color,
            } => {
                content.save_state();
                content.set_line_width(*width);
                content.set_stroke_rgb(color[0], color[1], color[2]);
                content.move_to(from.0, from.1);
                content.line_to(to.0, to.1);
                content.stroke();
                content.restore_state();
            }
            DrawOp::Logo { x, y, scale } => {
                content.save_state();
                content.transform([*scale, 0.0, 0.0, *scale, *x, *y]);
                content.x_object(Name(LOGO_NAME));
                content.restore_state();
            }
        }
    }
    content
}

/// The logo becomes one form XObject whose bounding box is the SVG viewport.
fn write_logo(pdf: &mut Pdf, form_ref: Ref, logo: &VectorImage) {
    let mut content = Content::new();
    // SVG y grows downward
    content.transform([1.0, 0.0, 0.0, -1.0, 0.0, logo.height]);

    for shape in &logo.shapes {
        if shape.segments.is_empty() || (shape.fill.is_none() && shape.stroke.is_none()) {
            continue;
        }
        content.save_state();
        content.transform(shape.transform);
        if let Some([r, g, b]) = shape.fill {
            content.set_fill_rgb(r, g, b);
        }
        if let Some([r, g, b]) = shape.stroke {
            content.set_stroke_rgb(r, g, b);
            content.set_line_width(shape.stroke_width);
        }
        for segment in &shape.segments {
            match *segment {
                Segment::MoveTo(x, y) => {
                    content.move_to(x, y);
                }
                Segment::LineTo(x, y) => {
                    content.line_to(x, y);
                }
                Segment::CubicTo(x1, y1, x2, y2, x3, y3) => {
                    content.cubic_to(x1, y1, x2, y2, x3, y3);
                }
                Segment::Close => {
                    content.close_path();
                }
            }
        }
        match (shape.fill.is_some(), shape.stroke.is_some()) {
            (true, true) => content.fill_nonzero_and_stroke(),
            (true, false) => content.fill_nonzero(),
            _ => content.stroke(),
        };
        content.restore_state();
    }

    let compressed = compress(content);
    let mut form = pdf.form_xobject(form_ref, &compressed);
    form.filter(Filter::FlateDecode);
    form.bbox(Rect::new(0.0, 0.0, logo.width, logo.height));
}

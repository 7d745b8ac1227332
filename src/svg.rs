//! Company logo parsing.
//!
//! The markup is parsed and normalised by `usvg`, which resolves units,
//! `viewBox`, inherited styles, basic shapes and arcs into plain paths. The
//! resulting tree is then flattened into filled and/or stroked paths that the
//! PDF writer turns into a form XObject. Only solid paint is kept; gradients,
//! patterns, text and raster images are outside what the invoice header needs.

use usvg::tiny_skia_path::{PathSegment, Point};

use crate::error::Error;
use crate::pdf::canvas::Rgb;

/// Affine matrix `[a, b, c, d, e, f]` as in PDF `cm`.
pub type Transform = [f32; 6];

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Segment {
    MoveTo(f32, f32),
    LineTo(f32, f32),
    CubicTo(f32, f32, f32, f32, f32, f32),
    Close,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub segments: Vec<Segment>,
    pub fill: Option<Rgb>,
    pub stroke: Option<Rgb>,
    pub stroke_width: f32,
    /// Maps segment coordinates into the image's viewport (y pointing down).
    pub transform: Transform,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VectorImage {
    pub width: f32,
    pub height: f32,
    pub shapes: Vec<Shape>,
}

pub fn parse(markup: &str) -> Result<VectorImage, Error> {
    let tree = usvg::Tree::from_str(markup, &usvg::Options::default())
        .map_err(|e| Error::Logo(e.to_string()))?;
    let size = tree.size();

    let mut shapes = Vec::new();
    collect_shapes(tree.root(), &mut shapes);
    log::debug!(
        "svg: {}x{} logo with {} shapes",
        size.width(),
        size.height(),
        shapes.len()
    );

    Ok(VectorImage {
        width: size.width(),
        height: size.height(),
        shapes,
    })
}

fn collect_shapes(group: &usvg::Group, out: &mut Vec<Shape>) {
    for node in group.children() {
        match node {
            usvg::Node::Group(group) => collect_shapes(group, out),
            usvg::Node::Path(path) => {
                if let Some(shape) = convert_path(path) {
                    out.push(shape);
                }
            }
            usvg::Node::Image(_) => log::warn!("svg: embedded image skipped"),
            _ => {}
        }
    }
}

fn convert_path(path: &usvg::Path) -> Option<Shape> {
    if !path.is_visible() {
        return None;
    }
    let fill = path.fill().and_then(|f| solid(f.paint()));
    let stroke = path.stroke().and_then(|s| solid(s.paint()));
    if fill.is_none() && stroke.is_none() {
        return None;
    }

    let mut segments = Vec::new();
    let mut current = Point::from_xy(0.0, 0.0);
    for segment in path.data().segments() {
        match segment {
            PathSegment::MoveTo(p) => {
                segments.push(Segment::MoveTo(p.x, p.y));
                current = p;
            }
            PathSegment::LineTo(p) => {
                segments.push(Segment::LineTo(p.x, p.y));
                current = p;
            }
            PathSegment::QuadTo(q, p) => {
                segments.push(quad_to_cubic(current, q, p));
                current = p;
            }
            PathSegment::CubicTo(c1, c2, p) => {
                segments.push(Segment::CubicTo(c1.x, c1.y, c2.x, c2.y, p.x, p.y));
                current = p;
            }
            PathSegment::Close => segments.push(Segment::Close),
        }
    }
    if segments.is_empty() {
        return None;
    }

    let t = path.abs_transform();
    Some(Shape {
        segments,
        fill,
        stroke,
        stroke_width: path.stroke().map_or(1.0, |s| s.width().get()),
        transform: [t.sx, t.ky, t.kx, t.sy, t.tx, t.ty],
    })
}

fn solid(paint: &usvg::Paint) -> Option<Rgb> {
    match paint {
        usvg::Paint::Color(c) => Some([
            c.red as f32 / 255.0,
            c.green as f32 / 255.0,
            c.blue as f32 / 255.0,
        ]),
        _ => {
            log::warn!("svg: non-solid paint skipped");
            None
        }
    }
}

fn quad_to_cubic(from: Point, q: Point, to: Point) -> Segment {
    let c1 = (from.x + 2.0 / 3.0 * (q.x - from.x), from.y + 2.0 / 3.0 * (q.y - from.y));
    let c2 = (to.x + 2.0 / 3.0 * (q.x - to.x), to.y + 2.0 / 3.0 * (q.y - to.y));
    Segment::CubicTo(c1.0, c1.1, c2.0, c2.1, to.x, to.y)
}

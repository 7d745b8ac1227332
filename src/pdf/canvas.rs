//! In-memory page canvas.
//!
//! Drawing never goes through a hidden transform stack: every call takes an
//! absolute position, and renderers thread an [`Origin`] value from one step
//! to the next. Pages are display lists that the writer serialises once the
//! whole document is laid out.

use crate::fonts::Font;
use crate::svg::VectorImage;

pub type Rgb = [f32; 3];

pub const BLACK: Rgb = [0.0, 0.0, 0.0];
/// Header and footer text.
pub const FURNITURE_GRAY: Rgb = [0.5, 0.5, 0.5];
/// Background of table title rows.
pub const HEADER_ROW_GRAY: Rgb = [0.7, 0.7, 0.7];

/// A point in PDF user space (origin bottom-left, y growing upward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Origin {
    pub x: f32,
    pub y: f32,
}

impl Origin {
    pub fn new(x: f32, y: f32) -> Self {
        Origin { x, y }
    }

    pub fn down(self, dy: f32) -> Self {
        Origin {
            x: self.x,
            y: self.y - dy,
        }
    }

    pub fn with_x(self, x: f32) -> Self {
        Origin { x, y: self.y }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Single line of text, `y` is the baseline.
    Text {
        x: f32,
        y: f32,
        font: Font,
        size: f32,
        color: Rgb,
        text: String,
    },
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        width: f32,
        color: Rgb,
    },
    /// The document logo with its bottom-left corner at (`x`, `y`).
    Logo { x: f32, y: f32, scale: f32 },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// Every text string drawn on the page, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// First text op whose content equals `needle`.
    pub fn find_text(&self, needle: &str) -> Option<&DrawOp> {
        self.ops
            .iter()
            .find(|op| matches!(op, DrawOp::Text { text, .. } if text == needle))
    }
}

/// A fully laid-out document, ready to be written.
#[derive(Clone, Debug)]
pub struct Document {
    pub title: String,
    pub author: String,
    pub page_width: f32,
    pub page_height: f32,
    pub logo: Option<VectorImage>,
    pub pages: Vec<Page>,
}

pub struct Canvas {
    title: String,
    author: String,
    page_width: f32,
    page_height: f32,
    logo: Option<VectorImage>,
    finished: Vec<Page>,
    current: Page,
}

impl Canvas {
    pub fn new(page_width: f32, page_height: f32) -> Self {
        Canvas {
            title: String::new(),
            author: String::new(),
            page_width,
            page_height,
            logo: None,
            finished: Vec::new(),
            current: Page::default(),
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_author(&mut self, author: impl Into<String>) {
        self.author = author.into();
    }

    /// 1-based number of the page currently being drawn.
    pub fn page_number(&self) -> usize {
        self.finished.len() + 1
    }

    /// Empty strings produce no operation.
    pub fn text(&mut self, at: Origin, font: Font, size: f32, color: Rgb, text: &str) {
        if text.is_empty() {
            return;
        }
        self.current.ops.push(DrawOp::Text {
            x: at.x,
            y: at.y,
            font,
            size,
            color,
            text: text.to_string(),
        });
    }

    pub fn fill_rect(&mut self, bottom_left: Origin, width: f32, height: f32, color: Rgb) {
        self.current.ops.push(DrawOp::FillRect {
            x: bottom_left.x,
            y: bottom_left.y,
            width,
            height,
            color,
        });
    }

    pub fn line(&mut self, from: Origin, to: Origin, width: f32, color: Rgb) {
        self.current.ops.push(DrawOp::Line {
            from: (from.x, from.y),
            to: (to.x, to.y),
            width,
            color,
        });
    }

    /// Place `logo` on the current page. The image itself is stored once per document.
    pub fn logo(&mut self, logo: &VectorImage, bottom_left: Origin, scale: f32) {
        if self.logo.is_none() {
            self.logo = Some(logo.clone());
        }
        self.current.ops.push(DrawOp::Logo {
            x: bottom_left.x,
            y: bottom_left.y,
            scale,
        });
    }

    /// Finalise the current page and start a blank one.
    pub fn show_page(&mut self) {
        self.finished.push(std::mem::take(&mut self.current));
        log::debug!("show_page: now on page {}", self.page_number());
    }

    pub fn finish(mut self) -> Document {
        self.finished.push(self.current);
        Document {
            title: self.title,
            author: self.author,
            page_width: self.page_width,
            page_height: self.page_height,
            logo: self.logo,
            pages: self.finished,
        }
    }
}

use crate::error::Error;
use crate::fonts::{Font, Measure};

use super::canvas::{Canvas, Origin, Rgb};

/// Default flowable text style of table cells: Helvetica 10 on 12.
pub(super) const BODY_SIZE: f32 = 10.0;
pub(super) const BODY_LEADING: f32 = 12.0;

#[derive(Clone, Debug, PartialEq)]
pub(super) enum Inline {
    Text { text: String, font: Font },
    Break,
}

/// Flowable text: styled runs with explicit line breaks, wrapped to a width.
#[derive(Clone, Debug, PartialEq)]
pub(super) struct Paragraph {
    pub(super) inlines: Vec<Inline>,
    pub(super) font_size: f32,
    pub(super) leading: f32,
}

impl Paragraph {
    pub(super) fn new(font_size: f32, leading: f32) -> Self {
        Paragraph {
            inlines: Vec::new(),
            font_size,
            leading,
        }
    }

    pub(super) fn body() -> Self {
        Self::new(BODY_SIZE, BODY_LEADING)
    }

    pub(super) fn text(mut self, text: impl Into<String>, font: Font) -> Self {
        self.inlines.push(Inline::Text {
            text: text.into(),
            font,
        });
        self
    }

    pub(super) fn line_break(mut self) -> Self {
        self.inlines.push(Inline::Break);
        self
    }

    /// Lines joined with hard breaks, all in one font.
    pub(super) fn lines<S: AsRef<str>>(mut self, lines: &[S], font: Font) -> Self {
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                self = self.line_break();
            }
            self = self.text(line.as_ref(), font);
        }
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(super) struct WordChunk {
    pub(super) font: Font,
    pub(super) text: String,
    pub(super) x_offset: f32, // x relative to line start
    pub(super) width: f32,
    pub(super) space_before: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(super) struct TextLine {
    pub(super) chunks: Vec<WordChunk>,
}

impl TextLine {
    pub(super) fn width(&self) -> f32 {
        self.chunks.last().map(|c| c.x_offset + c.width).unwrap_or(0.0)
    }
}

fn finish_line(chunks: &mut Vec<WordChunk>) -> TextLine {
    TextLine {
        chunks: std::mem::take(chunks),
    }
}

/// Layout runs into wrapped lines.
/// No space is inserted between runs unless the preceding text ended with
/// whitespace or the new run starts with whitespace ("bold" + ", " → "bold,").
/// A word wider than `max_width` gets a line of its own and overflows.
/// Empty segments between breaks become blank lines; a trailing empty
/// segment does not.
pub(super) fn build_paragraph_lines(
    para: &Paragraph,
    measure: &dyn Measure,
    max_width: f32,
) -> Result<Vec<TextLine>, Error> {
    let size = para.font_size;
    let mut lines: Vec<TextLine> = Vec::new();
    let mut current_chunks: Vec<WordChunk> = Vec::new();
    let mut current_x: f32 = 0.0;
    let mut prev_ended_with_ws = false;
    let mut prev_space_w: f32 = 0.0;

    for inline in &para.inlines {
        let (text, font) = match inline {
            Inline::Break => {
                lines.push(finish_line(&mut current_chunks));
                current_x = 0.0;
                prev_ended_with_ws = false;
                continue;
            }
            Inline::Text { text, font } => (text, *font),
        };

        let space_w = measure.text_width(" ", font, size)?;
        let starts_with_ws = text.starts_with(char::is_whitespace);

        for (i, word) in text.split_whitespace().enumerate() {
            let ww = measure.text_width(word, font, size)?;

            let need_space =
                !current_chunks.is_empty() && (i > 0 || starts_with_ws || prev_ended_with_ws);

            // the space belongs to whichever run holds the whitespace character
            let effective_space_w = if i > 0 || starts_with_ws {
                space_w
            } else {
                prev_space_w
            };

            let proposed_x = if need_space {
                current_x + effective_space_w
            } else {
                current_x
            };

            let space_before = if !current_chunks.is_empty() && proposed_x + ww > max_width {
                lines.push(finish_line(&mut current_chunks));
                current_x = 0.0;
                false
            } else {
                current_x = proposed_x;
                need_space
            };

            current_chunks.push(WordChunk {
                font,
                text: word.to_string(),
                x_offset: current_x,
                width: ww,
                space_before,
            });
            current_x += ww;
        }

        prev_ended_with_ws = text.ends_with(char::is_whitespace);
        prev_space_w = space_w;
    }

    if !current_chunks.is_empty() {
        lines.push(finish_line(&mut current_chunks));
    }
    while lines.last().is_some_and(|l| l.chunks.is_empty()) {
        lines.pop();
    }

    Ok(lines)
}

/// Wrapped height of `para` at `width`.
pub(super) fn paragraph_height(
    para: &Paragraph,
    measure: &dyn Measure,
    width: f32,
) -> Result<f32, Error> {
    let lines = build_paragraph_lines(para, measure, width)?;
    Ok(lines.len() as f32 * para.leading)
}

/// Draw pre-built lines left-aligned. Consecutive chunks in the same font are
/// emitted as one text operation.
pub(super) fn render_paragraph_lines(
    canvas: &mut Canvas,
    lines: &[TextLine],
    para: &Paragraph,
    left: f32,
    first_baseline_y: f32,
    color: Rgb,
) {
    for (line_num, line) in lines.iter().enumerate() {
        let y = first_baseline_y - line_num as f32 * para.leading;
        let mut run: Option<(Font, f32, String)> = None;

        for chunk in &line.chunks {
            let same_font = matches!(&run, Some((font, _, _)) if *font == chunk.font);
            if same_font {
                if let Some((_, _, text)) = run.as_mut() {
                    if chunk.space_before {
                        text.push(' ');
                    }
                    text.push_str(&chunk.text);
                }
                continue;
            }
            if let Some((font, x, text)) = run.take() {
                canvas.text(Origin::new(left + x, y), font, para.font_size, color, &text);
            }
            run = Some((chunk.font, chunk.x_offset, chunk.text.clone()));
        }
        if let Some((font, x, text)) = run {
            canvas.text(Origin::new(left + x, y), font, para.font_size, color, &text);
        }
    }
}

use crate::error::Error;
use crate::fonts::{Font, Measure};

use super::canvas::{BLACK, Canvas, Origin, Rgb};
use super::flow::{Inline, Paragraph, TextLine, build_paragraph_lines, render_paragraph_lines};

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct Padding {
    pub(super) top: f32,
    pub(super) bottom: f32,
    pub(super) left: f32,
    pub(super) right: f32,
}

impl Default for Padding {
    fn default() -> Self {
        Padding {
            top: 3.0,
            bottom: 3.0,
            left: 6.0,
            right: 6.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(super) struct Cell {
    pub(super) para: Paragraph,
    /// Plain strings keep their line; flowables wrap to the column.
    pub(super) wrap: bool,
}

impl Cell {
    pub(super) fn text(text: impl Into<String>, font: Font, size: f32) -> Self {
        Cell {
            para: Paragraph::new(size, size * 1.2).text(text, font),
            wrap: false,
        }
    }

    pub(super) fn flow(para: Paragraph) -> Self {
        Cell { para, wrap: true }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(super) struct Row {
    pub(super) cells: Vec<Cell>,
    pub(super) background: Option<Rgb>,
}

impl Row {
    pub(super) fn new(cells: Vec<Cell>) -> Self {
        Row {
            cells,
            background: None,
        }
    }

    pub(super) fn with_background(mut self, color: Rgb) -> Self {
        self.background = Some(color);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(super) struct Table {
    pub(super) col_widths: Vec<f32>,
    pub(super) rows: Vec<Row>,
    pub(super) padding: Padding,
    /// Grid stroke width; cells are top-aligned and text is left-aligned.
    pub(super) grid_width: f32,
}

impl Table {
    pub(super) fn new(col_widths: Vec<f32>) -> Self {
        Table {
            col_widths,
            rows: Vec::new(),
            padding: Padding::default(),
            grid_width: 1.0,
        }
    }

    pub(super) fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub(super) fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub(super) fn width(&self) -> f32 {
        self.col_widths.iter().sum()
    }

    /// Measure every row. Fails when the table cannot be sized.
    pub(super) fn layout(self, measure: &dyn Measure) -> Result<LaidOutTable, Error> {
        if self.col_widths.is_empty() {
            return Err(Error::Layout("table has no columns".into()));
        }
        if let Some(w) = self.col_widths.iter().find(|w| !w.is_finite() || **w <= 0.0) {
            return Err(Error::Layout(format!("invalid column width {w}")));
        }

        let pad = self.padding;
        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(ri, row)| {
                if row.cells.len() != self.col_widths.len() {
                    return Err(Error::Layout(format!(
                        "row {ri} has {} cells for {} columns",
                        row.cells.len(),
                        self.col_widths.len()
                    )));
                }
                let mut max_h: f32 = 0.0;
                let cell_lines = row
                    .cells
                    .iter()
                    .zip(&self.col_widths)
                    .map(|(cell, col_w)| {
                        let text_w = (col_w - pad.left - pad.right).max(0.0);
                        let wrap_w = if cell.wrap { text_w } else { f32::INFINITY };
                        let lines = build_paragraph_lines(&cell.para, measure, wrap_w)?;
                        if lines.iter().any(|l| l.width() > text_w) {
                            log::debug!("TABLE row={ri} cell text overflows {text_w:.1}pt");
                        }
                        max_h = max_h.max(lines.len() as f32 * cell.para.leading);
                        Ok(lines)
                    })
                    .collect::<Result<Vec<_>, Error>>()?;

                let height = max_h + pad.top + pad.bottom;
                if !height.is_finite() {
                    return Err(Error::Layout(format!("row {ri} has no finite height")));
                }
                Ok(RowLayout { height, cell_lines })
            })
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(LaidOutTable { table: self, rows })
    }
}

struct RowLayout {
    height: f32,
    cell_lines: Vec<Vec<TextLine>>,
}

/// A table whose row heights are known; drawing it cannot fail.
pub(super) struct LaidOutTable {
    table: Table,
    rows: Vec<RowLayout>,
}

impl LaidOutTable {
    pub(super) fn height(&self) -> f32 {
        self.rows.iter().map(|r| r.height).sum()
    }

    pub(super) fn width(&self) -> f32 {
        self.table.width()
    }

    pub(super) fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Draw with the table's top-left corner at `top_left`.
    pub(super) fn draw(&self, canvas: &mut Canvas, top_left: Origin) {
        let table = &self.table;
        let pad = table.padding;
        let table_left = top_left.x;
        let table_w = table.width();
        let mut row_top = top_left.y;

        for (ri, (row, layout)) in table.rows.iter().zip(&self.rows).enumerate() {
            let row_h = layout.height;
            let row_bottom = row_top - row_h;
            log::debug!("TABLE row={} row_h={:.2} row_top={:.2}", ri, row_h, row_top);

            if let Some(color) = row.background {
                canvas.fill_rect(Origin::new(table_left, row_bottom), table_w, row_h, color);
            }

            let mut cell_x = table_left;
            let cells = row.cells.iter().zip(&layout.cell_lines).zip(&table.col_widths);
            for ((cell, lines), col_w) in cells {
                let first_font = cell.para.inlines.iter().find_map(|i| match i {
                    Inline::Text { font, .. } => Some(*font),
                    Inline::Break => None,
                });
                if let Some(first_font) = first_font {
                    let baseline_y =
                        row_top - pad.top - cell.para.font_size * first_font.ascender_ratio();
                    render_paragraph_lines(
                        canvas,
                        lines,
                        &cell.para,
                        cell_x + pad.left,
                        baseline_y,
                        BLACK,
                    );
                }
                cell_x += col_w;
            }

            row_top = row_bottom;
        }

        if table.grid_width > 0.0 {
            self.draw_grid(canvas, top_left);
        }
    }

    fn draw_grid(&self, canvas: &mut Canvas, top_left: Origin) {
        let table = &self.table;
        let (left, top) = (top_left.x, top_left.y);
        let right = left + table.width();
        let bottom = top - self.height();
        let w = table.grid_width;

        let mut y = top;
        canvas.line(Origin::new(left, y), Origin::new(right, y), w, BLACK);
        for row in &self.rows {
            y -= row.height;
            canvas.line(Origin::new(left, y), Origin::new(right, y), w, BLACK);
        }

        let mut x = left;
        canvas.line(Origin::new(x, top), Origin::new(x, bottom), w, BLACK);
        for col_w in &table.col_widths {
            x += col_w;
            canvas.line(Origin::new(x, top), Origin::new(x, bottom), w, BLACK);
        }
    }
}

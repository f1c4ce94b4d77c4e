//! Page-aware layout engine.
//!
//! [`LayoutEngine`] is a small layout machine: it owns the cursor position,
//! the current page and the page buffer, and every public operation appends
//! draw operations and moves the cursor. Pages are kept as plain
//! [`DrawOp`] lists until [`LayoutEngine::render`] hands them to the PDF
//! writer, so nothing is serialized until the whole document is laid out.
//!
//! Coordinates are millimetres from the top-left corner of the page.

use tracing::debug;

use crate::error::ExportError;
use crate::metrics::{Font, PT_TO_MM, text_width, wrap_lines};
use crate::pdf::{RenderedDocument, write_pdf};
use crate::styles::PageStyle;

/// Label cell width used by single labeled fields.
pub const DEFAULT_LABEL_WIDTH: f32 = 45.0;

/// Minimum free height requested before a section starts.
pub const SECTION_MIN_HEIGHT: f32 = 30.0;

/// Gap between the last section and the signature rule.
pub const SIGNATURE_GAP: f32 = 20.0;

/// Length of the signature rule.
pub const SIGNATURE_RULE_WIDTH: f32 = 70.0;

/// Space after a long field's paragraph.
const LONG_FIELD_GAP: f32 = 2.0;

/// Space after a table.
const TABLE_GAP: f32 = 4.0;

/// One primitive drawn on a page.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        baseline: f32,
        font: Font,
        size: f32,
        text: String,
    },
    /// A bordered rectangle, optionally filled with a grey level.
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<f32>,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based page number.
    pub number: usize,
    pub ops: Vec<DrawOp>,
}

impl Page {
    fn new(number: usize) -> Self {
        Self {
            number,
            ops: Vec::new(),
        }
    }

    /// Text strings on this page in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Horizontal anchors of a paired field row.
///
/// Each column is addressed independently so sections with longer labels
/// can widen one pair without shifting the other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairAnchors {
    pub label1_x: f32,
    pub value1_x: f32,
    pub label2_x: f32,
    pub value2_x: f32,
}

impl Default for PairAnchors {
    fn default() -> Self {
        Self {
            label1_x: 10.0,
            value1_x: 55.0,
            label2_x: 110.0,
            value2_x: 145.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
}

/// Every page of a finished layout, ready for serialization.
#[derive(Debug, Clone)]
pub struct LaidOutDocument {
    pub title: String,
    pub style: PageStyle,
    pub pages: Vec<Page>,
}

impl LaidOutDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn render(&self) -> Result<RenderedDocument, ExportError> {
        write_pdf(&self.title, &self.style, &self.pages)
    }
}

pub struct LayoutEngine {
    title: String,
    style: PageStyle,
    pages: Vec<Page>,
    current: Page,
    y: f32,
}

impl LayoutEngine {
    /// Begin a document: opens page 1 and draws the title header.
    pub fn new(title: impl Into<String>, style: PageStyle) -> Self {
        let mut engine = Self {
            title: title.into(),
            y: style.margin_top,
            style,
            pages: Vec::new(),
            current: Page::new(1),
        };
        engine.emit_title_header();
        engine
    }

    pub fn style(&self) -> &PageStyle {
        &self.style
    }

    pub fn cursor_y(&self) -> f32 {
        self.y
    }

    pub fn page_number(&self) -> usize {
        self.current.number
    }

    /// Free vertical space above the automatic break line.
    pub fn remaining(&self) -> f32 {
        self.style.break_line() - self.y
    }

    /// Move the cursor down without drawing.
    pub fn space(&mut self, height: f32) {
        self.y += height;
    }

    pub fn section_title(&mut self, title: &str) {
        let height = 10.0;
        self.space(5.0);
        self.ensure_room(height);
        let x = self.style.margin_left;
        let width = self.style.content_width();
        let size = self.style.section_size;
        self.text_cell(x, width, height, title, Font::Bold, size, Align::Left);
        self.y += height + 2.0;
    }

    /// Two label/value pairs on one line.
    pub fn field_pair(
        &mut self,
        label1: &str,
        value1: &str,
        label2: &str,
        value2: &str,
        anchors: &PairAnchors,
    ) {
        let h = self.style.row_height;
        let size = self.style.body_size;
        self.ensure_room(h);

        let PairAnchors {
            label1_x,
            value1_x,
            label2_x,
            value2_x,
        } = *anchors;
        let right = self.style.width - self.style.margin_right;

        self.text_cell(label1_x, value1_x - label1_x, h, label1, Font::Bold, size, Align::Left);
        self.text_cell(
            value1_x,
            label2_x - value1_x,
            h,
            &format!(" {value1}"),
            Font::Regular,
            size,
            Align::Left,
        );
        self.text_cell(label2_x, value2_x - label2_x, h, label2, Font::Bold, size, Align::Left);
        self.text_cell(
            value2_x,
            right - value2_x,
            h,
            &format!(" {value2}"),
            Font::Regular,
            size,
            Align::Left,
        );

        self.y += h;
    }

    /// Bold inline label followed by a regular value.
    pub fn field(&mut self, label: &str, value: &str, label_width: f32) {
        let size = self.style.body_size;
        self.labeled_line(label, value, label_width, Font::Regular, size);
    }

    /// Like [`field`](Self::field) with the value in larger bold type.
    pub fn emphasized_field(&mut self, label: &str, value: &str, label_width: f32) {
        let size = self.style.emphasis_size;
        self.labeled_line(label, value, label_width, Font::Bold, size);
    }

    /// Label on its own line, then the value wrapped to the text width.
    ///
    /// The label never ends a page on its own: it moves to the next page
    /// unless its paragraph's first line fits beneath it. Callers wanting
    /// more of the paragraph kept together run
    /// [`check_page_break`](Self::check_page_break) first.
    pub fn long_field(&mut self, label: &str, value: &str) {
        let h = self.style.row_height;
        self.ensure_room(2.0 * h);
        let x = self.style.margin_left;
        let width = self.style.content_width();
        let size = self.style.body_size;
        self.text_cell(x, width, h, label, Font::Bold, size, Align::Left);
        self.y += h;

        self.paragraph(value);
        self.space(LONG_FIELD_GAP);
    }

    /// Word-wrapped regular text, breaking pages line by line.
    pub fn paragraph(&mut self, text: &str) {
        let h = self.style.row_height;
        let size = self.style.body_size;
        let x = self.style.margin_left;
        let width = self.style.content_width();
        let max_width = width - 2.0 * self.style.cell_padding;

        for line in wrap_lines(text, Font::Regular, size, max_width) {
            self.ensure_room(h);
            self.text_cell(x, width, h, &line, Font::Regular, size, Align::Left);
            self.y += h;
        }
    }

    /// A bordered table: shaded header row, then one row per entry.
    ///
    /// Without explicit widths the content width is split evenly; explicit
    /// widths wider than the content area are scaled down to fit.
    pub fn table(
        &mut self,
        headers: &[&str],
        rows: &[Vec<String>],
        widths: Option<&[f32]>,
    ) -> Result<(), ExportError> {
        let columns = headers.len();
        if columns == 0 {
            return Err(ExportError::Layout("table has no columns".to_string()));
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != columns) {
            return Err(ExportError::Layout(format!(
                "table row {i} has {} cells, expected {columns}",
                row.len()
            )));
        }

        let widths = self.column_widths(columns, widths)?;
        let shade = self.style.header_shade;
        let header_cells: Vec<&str> = headers.to_vec();
        self.table_row(&header_cells, &widths, Font::Bold, Some(shade));
        for row in rows {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            self.table_row(&cells, &widths, Font::Regular, None);
        }

        self.space(TABLE_GAP);
        debug!(columns, rows = rows.len(), "laid out table");
        Ok(())
    }

    /// Start a new page when less than `min_height` is left on this one.
    ///
    /// Returns whether a page was started. A page that has nothing on it yet
    /// is never abandoned.
    pub fn check_page_break(&mut self, min_height: f32) -> bool {
        if self.remaining() < min_height && !self.at_page_top() {
            self.start_page();
            return true;
        }
        false
    }

    /// Unconditionally finish this page and begin the next.
    pub fn new_page(&mut self) {
        self.start_page();
    }

    /// Signature rule with the signer's name, identifier and role centered
    /// beneath it, kept together on one page.
    pub fn signature_block(&mut self, name: &str, identifier: &str, role: &str) {
        let h = self.style.row_height;
        self.check_page_break(SIGNATURE_GAP + 5.0 + 3.0 * h);
        self.space(SIGNATURE_GAP);

        let center = self.style.width / 2.0;
        let half = SIGNATURE_RULE_WIDTH / 2.0;
        self.current.ops.push(DrawOp::Line {
            x1: center - half,
            y1: self.y,
            x2: center + half,
            y2: self.y,
        });
        self.space(5.0);

        let size = self.style.body_size;
        self.centered_line(name, Font::Bold, size);
        self.centered_line(identifier, Font::Regular, size);
        self.centered_line(role, Font::Regular, size);
    }

    /// Close the last page and return the laid-out document.
    pub fn finish(mut self) -> LaidOutDocument {
        self.emit_footer();
        self.pages.push(self.current);
        LaidOutDocument {
            title: self.title,
            style: self.style,
            pages: self.pages,
        }
    }

    /// Close the last page and serialize the whole document.
    pub fn render(self) -> Result<RenderedDocument, ExportError> {
        self.finish().render()
    }

    // ── internals ───────────────────────────────────────────────────────────

    fn at_page_top(&self) -> bool {
        self.y <= self.style.margin_top
    }

    /// Automatic page break before drawing something `height` tall.
    fn ensure_room(&mut self, height: f32) {
        if self.y + height > self.style.break_line() && !self.at_page_top() {
            self.start_page();
        }
    }

    fn start_page(&mut self) {
        self.emit_footer();
        let next = Page::new(self.current.number + 1);
        let finished = std::mem::replace(&mut self.current, next);
        self.pages.push(finished);
        self.y = self.style.margin_top;
        debug!(page = self.current.number, "started page");
    }

    fn emit_title_header(&mut self) {
        let x = self.style.margin_left;
        let width = self.style.content_width();
        let size = self.style.title_size;
        let title = self.title.clone();
        self.text_cell(x, width, 10.0, &title, Font::Bold, size, Align::Center);
        self.y += 10.0 + 2.0;
    }

    fn emit_footer(&mut self) {
        let y = self.style.height - 15.0;
        let x = self.style.margin_left;
        let width = self.style.content_width();
        let size = self.style.footer_size;
        let label = format!("Página {}", self.current.number);
        self.place_text(x, y, width, 10.0, &label, Font::Italic, size, Align::Center);
    }

    fn labeled_line(&mut self, label: &str, value: &str, label_width: f32, font: Font, size: f32) {
        let h = self.style.row_height;
        self.ensure_room(h);
        let x = self.style.margin_left;
        let body = self.style.body_size;
        let right = self.style.width - self.style.margin_right;
        self.text_cell(x, label_width, h, label, Font::Bold, body, Align::Left);
        let value_x = x + label_width;
        self.text_cell(value_x, right - value_x, h, value, font, size, Align::Left);
        self.y += h;
    }

    fn centered_line(&mut self, text: &str, font: Font, size: f32) {
        let h = self.style.row_height;
        self.ensure_room(h);
        let x = self.style.margin_left;
        let width = self.style.content_width();
        self.text_cell(x, width, h, text, font, size, Align::Center);
        self.y += h;
    }

    fn table_row(&mut self, cells: &[&str], widths: &[f32], font: Font, fill: Option<f32>) {
        let h = self.style.table_row_height;
        let size = self.style.body_size;
        self.ensure_room(h);

        let mut x = self.style.margin_left;
        for (cell, width) in cells.iter().zip(widths) {
            self.current.ops.push(DrawOp::Rect {
                x,
                y: self.y,
                width: *width,
                height: h,
                fill,
            });
            self.text_cell(x, *width, h, cell, font, size, Align::Center);
            x += width;
        }
        self.y += h;
    }

    fn column_widths(&self, columns: usize, widths: Option<&[f32]>) -> Result<Vec<f32>, ExportError> {
        let available = self.style.content_width();
        let Some(widths) = widths else {
            return Ok(vec![available / columns as f32; columns]);
        };
        if widths.len() != columns {
            return Err(ExportError::Layout(format!(
                "{} column widths given for {columns} columns",
                widths.len()
            )));
        }
        let total: f32 = widths.iter().sum();
        if total > available {
            let scale = available / total;
            return Ok(widths.iter().map(|w| w * scale).collect());
        }
        Ok(widths.to_vec())
    }

    /// A one-line cell at the cursor row.
    #[allow(clippy::too_many_arguments)]
    fn text_cell(
        &mut self,
        x: f32,
        width: f32,
        height: f32,
        text: &str,
        font: Font,
        size: f32,
        align: Align,
    ) {
        let y = self.y;
        self.place_text(x, y, width, height, text, font, size, align);
    }

    #[allow(clippy::too_many_arguments)]
    fn place_text(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        text: &str,
        font: Font,
        size: f32,
        align: Align,
    ) {
        let text: String = text
            .chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .collect();
        if text.trim().is_empty() {
            return;
        }

        let x = match align {
            Align::Left => x + self.style.cell_padding,
            Align::Center => x + (width - text_width(&text, font, size)) / 2.0,
        };
        let baseline = y + height / 2.0 + 0.3 * size * PT_TO_MM;
        self.current.ops.push(DrawOp::Text {
            x,
            baseline,
            font,
            size,
            text,
        });
    }
}

use serde::{Deserialize, Serialize};

/// Page geometry and typography for the paginated report.
///
/// All lengths are millimetres measured from the top-left corner; font sizes
/// are points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageStyle {
    /// Page width (A4 by default).
    pub width: f32,

    /// Page height (A4 by default).
    pub height: f32,

    pub margin_left: f32,
    pub margin_top: f32,
    pub margin_right: f32,

    /// Distance from the bottom edge at which content triggers a new page.
    pub break_margin: f32,

    /// Horizontal padding inside a cell before left-aligned text.
    pub cell_padding: f32,

    /// Height of a field row and of each wrapped paragraph line.
    pub row_height: f32,

    /// Height of a table row.
    pub table_row_height: f32,

    /// Body text size.
    pub body_size: f32,

    /// Document title size (first page header).
    pub title_size: f32,

    /// Section heading size.
    pub section_size: f32,

    /// Footer (page number) size.
    pub footer_size: f32,

    /// Emphasized value size (e.g. the procedure eligibility verdict).
    pub emphasis_size: f32,

    /// Greyscale level of the table header background, 0 = black, 1 = white.
    pub header_shade: f32,

    /// Stroke width for borders and rules.
    pub line_width: f32,
}

impl PageStyle {
    /// Width available between the side margins.
    pub fn content_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    /// The y coordinate past which content no longer fits on the page.
    pub fn break_line(&self) -> f32 {
        self.height - self.break_margin
    }

    /// Vertical space between the top margin and the break line.
    pub fn content_height(&self) -> f32 {
        self.break_line() - self.margin_top
    }
}

impl Default for PageStyle {
    fn default() -> Self {
        Self {
            width: 210.0,
            height: 297.0,
            margin_left: 10.0,
            margin_top: 10.0,
            margin_right: 10.0,
            break_margin: 20.0,
            cell_padding: 1.0,
            row_height: 6.0,
            table_row_height: 8.0,
            body_size: 10.0,
            title_size: 15.0,
            section_size: 12.0,
            footer_size: 8.0,
            emphasis_size: 12.0,
            header_shade: 240.0 / 255.0,
            line_width: 0.2,
        }
    }
}

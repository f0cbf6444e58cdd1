//! PDF paginator: turns the letter's block sequence into per-page draw commands.
//!
//! # Algorithm
//! - A cursor starts at the top margin; each text line is drawn with its
//!   baseline at the cursor, which then advances by the fixed line height.
//! - Each block is laid out (wrapped) as a whole first. If its extent would
//!   pass the bottom margin, a new page starts *before* the block is drawn.
//! - No look-ahead: only the current block's own height is checked. A block
//!   taller than a full page falls back to per-line break checks.
//! - Blocks are emitted strictly in model order.
//!
//! Every page carries the border rectangle and the footer disclaimer.

use chrono::NaiveDate;
use serde::Serialize;

use crate::layout::font_metrics::{transliterate, PageGeometry, TextLayout, TextStyle};
use crate::layout::DISCLAIMER;
use crate::letters::document::{Block, DetailList, LetterDocument, Letterhead, Signature};
use crate::models::letter::LetterType;

const LETTERHEAD_NAME: TextStyle = TextStyle::bold(18.0);
const LETTERHEAD_LINE: TextStyle = TextStyle::regular(10.0);
const TITLE: TextStyle = TextStyle::bold(14.0);
const SECTION: TextStyle = TextStyle::bold(12.0);
const LABEL: TextStyle = TextStyle::bold(11.0);
const BODY: TextStyle = TextStyle::regular(11.0);
const FOOTER: TextStyle = TextStyle::muted_italic(8.0);

/// Width of the label column in detail lists.
const LABEL_COLUMN_MM: f32 = 55.0;
/// Vertical space after most blocks.
const BLOCK_GAP_MM: f32 = 3.0;
/// Distance of the footer baseline below the content area.
const FOOTER_OFFSET_MM: f32 = 6.0;

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Left,
    Center,
    Right,
}

/// One drawing instruction in page coordinates (mm, origin top-left).
///
/// For text, `y` is the baseline and `x` is the anchor the alignment refers to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Text {
        text: String,
        x: f32,
        y: f32,
        align: Align,
        style: TextStyle,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// 1-based.
    pub number: usize,
    pub commands: Vec<DrawCommand>,
}

#[cfg(test)]
impl Page {
    /// Text of every text command on this page, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginatedDocument {
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
}

// ────────────────────────────────────────────────────────────────────────────
// Block layout
// ────────────────────────────────────────────────────────────────────────────

/// A piece of a row, positioned horizontally; the vertical position is
/// assigned when the row is placed.
#[derive(Debug, Clone)]
enum Cell {
    Text {
        text: String,
        x: f32,
        align: Align,
        style: TextStyle,
    },
    /// Horizontal rule across the content width, drawn half a line above the baseline.
    Rule,
}

/// One line-height slot.
#[derive(Debug, Clone)]
struct Row {
    cells: Vec<Cell>,
}

#[derive(Debug, Clone)]
struct LaidOutBlock {
    rows: Vec<Row>,
    gap_after: f32,
}

/// Wraps text in the form it is drawn, so measured widths match the page.
fn wrap_drawn(layout: &dyn TextLayout, text: &str, width: f32, style: &TextStyle) -> Vec<String> {
    layout.wrap(&transliterate(text), width, style)
}

fn text_rows(
    layout: &dyn TextLayout,
    text: &str,
    width: f32,
    x: f32,
    align: Align,
    style: TextStyle,
) -> Vec<Row> {
    wrap_drawn(layout, text, width, &style)
        .into_iter()
        .map(|line| Row {
            cells: vec![Cell::Text {
                text: line,
                x,
                align,
                style,
            }],
        })
        .collect()
}

fn lay_out_block(block: &Block, layout: &dyn TextLayout, page: &PageGeometry) -> LaidOutBlock {
    let left = page.margin_mm;
    let right = page.width_mm - page.margin_mm;
    let center = page.center_x();
    let width = page.content_width();

    match block {
        Block::AddressBlock(head) => lay_out_letterhead(head, layout, page),
        Block::DateLine(text) => LaidOutBlock {
            rows: text_rows(layout, text, width, right, Align::Right, BODY),
            gap_after: BLOCK_GAP_MM,
        },
        Block::Heading(text) => LaidOutBlock {
            rows: text_rows(layout, text, width, center, Align::Center, TITLE),
            gap_after: BLOCK_GAP_MM,
        },
        Block::Salutation(text) => LaidOutBlock {
            rows: text_rows(layout, text, width, left, Align::Left, BODY),
            gap_after: 0.0,
        },
        Block::Paragraph(text) => LaidOutBlock {
            rows: text_rows(layout, text, width, left, Align::Left, BODY),
            gap_after: BLOCK_GAP_MM,
        },
        Block::DetailList(list) => lay_out_details(list, layout, page),
        Block::SignatureBlock(sig) => lay_out_signature(sig, layout, page),
    }
}

fn lay_out_letterhead(head: &Letterhead, layout: &dyn TextLayout, page: &PageGeometry) -> LaidOutBlock {
    let center = page.center_x();
    let width = page.content_width();

    let mut rows = text_rows(layout, &head.name, width, center, Align::Center, LETTERHEAD_NAME);
    for line in &head.lines {
        rows.extend(text_rows(layout, line, width, center, Align::Center, LETTERHEAD_LINE));
    }
    rows.push(Row {
        cells: vec![Cell::Rule],
    });
    LaidOutBlock {
        rows,
        gap_after: 0.0,
    }
}

/// Label column on the left, value column beside it; each item takes as many
/// rows as its longer column wraps to.
fn lay_out_details(list: &DetailList, layout: &dyn TextLayout, page: &PageGeometry) -> LaidOutBlock {
    let left = page.margin_mm;
    let value_x = left + LABEL_COLUMN_MM;
    let value_width = page.content_width() - LABEL_COLUMN_MM;
    let label_width = LABEL_COLUMN_MM - 3.0;

    let mut rows = text_rows(layout, &list.title, page.content_width(), left, Align::Left, SECTION);
    for item in &list.items {
        let labels = wrap_drawn(layout, &format!("{}:", item.label), label_width, &LABEL);
        let values = wrap_drawn(layout, &item.value, value_width, &BODY);
        let height = labels.len().max(values.len()).max(1);
        for i in 0..height {
            let mut cells = Vec::new();
            if let Some(label) = labels.get(i) {
                cells.push(Cell::Text {
                    text: label.clone(),
                    x: left,
                    align: Align::Left,
                    style: LABEL,
                });
            }
            if let Some(value) = values.get(i) {
                cells.push(Cell::Text {
                    text: value.clone(),
                    x: value_x,
                    align: Align::Left,
                    style: BODY,
                });
            }
            rows.push(Row { cells });
        }
    }
    LaidOutBlock {
        rows,
        gap_after: BLOCK_GAP_MM,
    }
}

fn lay_out_signature(sig: &Signature, layout: &dyn TextLayout, page: &PageGeometry) -> LaidOutBlock {
    let left = page.margin_mm;
    let width = page.content_width();

    let mut rows = text_rows(layout, &sig.closing, width, left, Align::Left, BODY);
    rows.extend(text_rows(layout, &sig.company_line, width, left, Align::Left, BODY));
    // Room for the handwritten signature.
    rows.push(Row { cells: Vec::new() });
    rows.push(Row { cells: Vec::new() });
    rows.extend(text_rows(layout, &sig.signatory, width, left, Align::Left, LABEL));
    rows.extend(text_rows(layout, &sig.designation, width, left, Align::Left, BODY));
    LaidOutBlock {
        rows,
        gap_after: 0.0,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pagination
// ────────────────────────────────────────────────────────────────────────────

struct PageCursor<'a> {
    geometry: &'a PageGeometry,
    layout: &'a dyn TextLayout,
    pages: Vec<Page>,
    y: f32,
}

impl<'a> PageCursor<'a> {
    fn new(geometry: &'a PageGeometry, layout: &'a dyn TextLayout) -> Self {
        let mut cursor = Self {
            geometry,
            layout,
            pages: Vec::new(),
            y: geometry.top(),
        };
        cursor.start_page();
        cursor
    }

    fn at_top(&self) -> bool {
        self.y <= self.geometry.top()
    }

    fn fits(&self, extent: f32) -> bool {
        self.y + extent <= self.geometry.bottom()
    }

    fn start_page(&mut self) {
        let g = self.geometry;
        let inset = g.border_inset_mm;
        let mut commands = vec![DrawCommand::Rect {
            x: inset,
            y: inset,
            width: g.width_mm - 2.0 * inset,
            height: g.height_mm - 2.0 * inset,
        }];
        for line in wrap_drawn(self.layout, DISCLAIMER, g.content_width(), &FOOTER) {
            commands.push(DrawCommand::Text {
                text: line,
                x: g.center_x(),
                y: g.bottom() + FOOTER_OFFSET_MM,
                align: Align::Center,
                style: FOOTER,
            });
        }
        self.pages.push(Page {
            number: self.pages.len() + 1,
            commands,
        });
        self.y = g.top();
    }

    fn place_row(&mut self, row: Row) {
        let g = self.geometry;
        let y = self.y;
        let Some(page) = self.pages.last_mut() else {
            return;
        };
        for cell in row.cells {
            match cell {
                Cell::Text {
                    text,
                    x,
                    align,
                    style,
                } => page.commands.push(DrawCommand::Text {
                    text,
                    x,
                    y,
                    align,
                    style,
                }),
                Cell::Rule => {
                    let rule_y = y - g.line_height_mm / 2.0;
                    page.commands.push(DrawCommand::Line {
                        x1: g.margin_mm,
                        y1: rule_y,
                        x2: g.width_mm - g.margin_mm,
                        y2: rule_y,
                    });
                }
            }
        }
        self.y += g.line_height_mm;
    }

    fn place_block(&mut self, block: LaidOutBlock) {
        let line_height = self.geometry.line_height_mm;
        let extent = block.rows.len() as f32 * line_height;
        let page_capacity = self.geometry.bottom() - self.geometry.top();

        if extent <= page_capacity {
            if !self.fits(extent) && !self.at_top() {
                self.start_page();
            }
            for row in block.rows {
                self.place_row(row);
            }
        } else {
            // Taller than a page: break line by line.
            for row in block.rows {
                if !self.fits(line_height) && !self.at_top() {
                    self.start_page();
                }
                self.place_row(row);
            }
        }
        self.y += block.gap_after;
    }
}

/// Lays out and paginates a letter.
pub fn paginate(
    doc: &LetterDocument,
    layout: &dyn TextLayout,
    geometry: &PageGeometry,
) -> PaginatedDocument {
    let mut cursor = PageCursor::new(geometry, layout);
    for block in &doc.blocks {
        let laid_out = lay_out_block(block, layout, geometry);
        cursor.place_block(laid_out);
    }
    PaginatedDocument {
        geometry: *geometry,
        pages: cursor.pages,
    }
}

/// `<Type>_Letter_<Company>_<Employee>_<YYYY-MM-DD>.pdf`, whitespace runs as `_`.
pub fn pdf_filename(
    letter_type: LetterType,
    company: &str,
    employee: &str,
    date: NaiveDate,
) -> String {
    format!(
        "{}_Letter_{}_{}_{}.pdf",
        letter_type.label(),
        underscore_whitespace(company),
        underscore_whitespace(employee),
        date.format("%Y-%m-%d")
    )
}

fn underscore_whitespace(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_space = false;
    for c in value.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

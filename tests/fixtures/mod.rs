//! Shared builders and command-inspection helpers for integration tests.
//!
//! Sheets are built with physical point sizes (via the inverse width
//! conversion) so expected coordinates stay exact.
#![allow(dead_code)]

use sheetpress::render::{
    DrawCommand, Pen, RecordingDocument, RecordingPage, Rect, Renderer, StringFormat,
};
use sheetpress::types::{
    Border, BorderStyle, Cell, Margins, PageSetup, Picture, Style, Workbook, Worksheet,
};
use sheetpress::units::point_to_column_width;

pub struct SheetBuilder {
    ws: Worksheet,
}

impl SheetBuilder {
    pub fn new(name: &str) -> Self {
        SheetBuilder {
            ws: Worksheet::new(name),
        }
    }

    /// Set a column's width to an exact point value.
    pub fn col_width_pt(mut self, col: u32, points: f64) -> Self {
        self.ws.set_column_width(col, point_to_column_width(points));
        self
    }

    pub fn row_height_pt(mut self, row: u32, points: f64) -> Self {
        self.ws.set_row_height(row, points);
        self
    }

    pub fn cell(mut self, row: u32, col: u32, cell: Cell) -> Self {
        self.ws.set_cell(row, col, cell);
        self
    }

    pub fn text(self, row: u32, col: u32, text: &str) -> Self {
        self.cell(row, col, Cell::text(text))
    }

    pub fn merge(mut self, start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> Self {
        self.ws.add_merge(sheetpress::types::MergeRange::new(
            start_row, start_col, end_row, end_col,
        ));
        self
    }

    pub fn picture(mut self, picture: Picture) -> Self {
        self.ws.add_picture(picture);
        self
    }

    pub fn setup(mut self, configure: impl FnOnce(&mut PageSetup)) -> Self {
        configure(&mut self.ws.page_setup);
        self
    }

    pub fn build(self) -> Worksheet {
        self.ws
    }
}

/// A style carrying the same border on all four sides.
pub fn box_border(style: BorderStyle) -> Style {
    Style {
        border_top: Some(Border::new(style)),
        border_right: Some(Border::new(style)),
        border_bottom: Some(Border::new(style)),
        border_left: Some(Border::new(style)),
        ..Style::default()
    }
}

pub fn zero_margins(setup: &mut PageSetup) {
    setup.margins = Margins::zero();
}

pub fn book_of(sheets: Vec<Worksheet>) -> Workbook {
    let mut book = Workbook::new();
    for sheet in sheets {
        book.add_sheet(sheet);
    }
    book
}

/// Render a single sheet and hand back the recorded document.
pub fn render_one(sheet: Worksheet) -> RecordingDocument {
    let book = book_of(vec![sheet]);
    let mut document = RecordingDocument::new();
    Renderer::new(&book)
        .render_to(&mut document)
        .unwrap_or_else(|e| panic!("render failed: {e}"));
    document
}

// ============================================================================
// Command inspection
// ============================================================================

pub fn drawn_texts(page: &RecordingPage) -> Vec<String> {
    page.commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

pub fn text_draws(page: &RecordingPage) -> Vec<(String, Rect, StringFormat)> {
    page.commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text {
                text, rect, format, ..
            } => Some((text.clone(), *rect, *format)),
            _ => None,
        })
        .collect()
}

pub fn drawn_lines(page: &RecordingPage) -> Vec<(Pen, (f64, f64), (f64, f64))> {
    page.commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Line { pen, from, to } => Some((pen.clone(), *from, *to)),
            _ => None,
        })
        .collect()
}

pub fn fill_rects(page: &RecordingPage) -> Vec<Rect> {
    page.commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::FillRect { rect, .. } => Some(*rect),
            _ => None,
        })
        .collect()
}

pub fn image_rects(page: &RecordingPage) -> Vec<Rect> {
    page.commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Image { rect, .. } => Some(*rect),
            _ => None,
        })
        .collect()
}

/// Coarse command classes in draw order, for asserting pass ordering.
pub fn command_kinds(page: &RecordingPage) -> Vec<&'static str> {
    page.commands()
        .iter()
        .map(|c| match c {
            DrawCommand::FillRect { .. } => "fill",
            DrawCommand::Line { .. } => "line",
            DrawCommand::Text { .. } => "text",
            DrawCommand::Image { .. } => "image",
            DrawCommand::Save => "save",
            DrawCommand::Restore => "restore",
            DrawCommand::Translate { .. } => "translate",
            DrawCommand::Rotate { .. } => "rotate",
        })
        .collect()
}

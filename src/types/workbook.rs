use std::collections::HashMap;

use crate::color::Rgba;
use crate::error::{Result, SheetpressError};

use super::{Cell, PageSetup, Picture, Style};

/// Default column width in characters of the default font.
pub const DEFAULT_COLUMN_WIDTH: f64 = 8.43;

/// Default row height in points.
pub const DEFAULT_ROW_HEIGHT: f64 = 15.0;

/// Document theme: a 12-slot color palette (slots 4-9 are the accents).
/// Missing slots fall back to the builtin palette during resolution.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    pub colors: Vec<Rgba>,
}

/// A merged range, 1-based inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRange {
    pub start_row: u32,
    pub start_col: u32,
    pub end_row: u32,
    pub end_col: u32,
}

impl MergeRange {
    pub fn new(start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> Self {
        MergeRange {
            start_row,
            start_col,
            end_row,
            end_col,
        }
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        (self.start_row..=self.end_row).contains(&row)
            && (self.start_col..=self.end_col).contains(&col)
    }

    /// Top-left (owner) coordinates.
    pub fn first(&self) -> (u32, u32) {
        (self.start_row, self.start_col)
    }

    /// Bottom-right coordinates.
    pub fn last(&self) -> (u32, u32) {
        (self.end_row, self.end_col)
    }
}

/// One worksheet: sparse cells plus sheet-level layout inputs.
#[derive(Debug, Clone, Default)]
pub struct Worksheet {
    pub name: String,
    cells: HashMap<(u32, u32), Cell>,
    col_widths: HashMap<u32, f64>,
    row_heights: HashMap<u32, f64>,
    pub merges: Vec<MergeRange>,
    pub pictures: Vec<Picture>,
    pub page_setup: PageSetup,
}

impl Worksheet {
    pub fn new(name: impl Into<String>) -> Self {
        Worksheet {
            name: name.into(),
            ..Worksheet::default()
        }
    }

    pub fn set_cell(&mut self, row: u32, col: u32, cell: Cell) {
        self.cells.insert((row, col), cell);
    }

    pub fn cell(&self, row: u32, col: u32) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    /// Formatted display text; empty for absent cells.
    pub fn text(&self, row: u32, col: u32) -> &str {
        self.cell(row, col).map_or("", |c| c.text.as_str())
    }

    pub fn style(&self, row: u32, col: u32) -> Option<&Style> {
        self.cell(row, col).and_then(|c| c.style.as_deref())
    }

    /// Column width in characters (sheet default when unset).
    pub fn column_width(&self, col: u32) -> f64 {
        self.col_widths
            .get(&col)
            .copied()
            .unwrap_or(DEFAULT_COLUMN_WIDTH)
    }

    pub fn set_column_width(&mut self, col: u32, width: f64) {
        self.col_widths.insert(col, width);
    }

    /// Row height in points (sheet default when unset).
    pub fn row_height(&self, row: u32) -> f64 {
        self.row_heights
            .get(&row)
            .copied()
            .unwrap_or(DEFAULT_ROW_HEIGHT)
    }

    pub fn set_row_height(&mut self, row: u32, height: f64) {
        self.row_heights.insert(row, height);
    }

    pub fn add_merge(&mut self, range: MergeRange) {
        self.merges.push(range);
    }

    pub fn add_picture(&mut self, picture: Picture) {
        self.pictures.push(picture);
    }

    /// The merge covering a cell, if any.
    pub fn merge_at(&self, row: u32, col: u32) -> Option<&MergeRange> {
        self.merges.iter().find(|m| m.contains(row, col))
    }

    /// Maximum used (row, col), counting styled-but-empty cells and cells
    /// reachable only through picture anchors. `(0, 0)` means empty.
    pub fn used_extent(&self) -> (u32, u32) {
        let mut max_row = 0;
        let mut max_col = 0;
        for &(row, col) in self.cells.keys() {
            max_row = max_row.max(row);
            max_col = max_col.max(col);
        }
        for pic in &self.pictures {
            max_row = max_row.max(pic.row);
            max_col = max_col.max(pic.col);
        }
        (max_row, max_col)
    }
}

/// The whole document: ordered sheets plus the theme palette.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    pub sheets: Vec<Worksheet>,
    pub theme: Theme,
}

impl Workbook {
    pub fn new() -> Self {
        Workbook::default()
    }

    pub fn add_sheet(&mut self, sheet: Worksheet) -> &mut Self {
        self.sheets.push(sheet);
        self
    }

    /// Sheet by 1-based position.
    pub fn sheet(&self, position: usize) -> Result<&Worksheet> {
        position
            .checked_sub(1)
            .and_then(|i| self.sheets.get(i))
            .ok_or(SheetpressError::SheetPosition(position))
    }

    pub fn sheet_by_name(&self, name: &str) -> Result<&Worksheet> {
        self.sheets
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| SheetpressError::SheetNotFound(name.to_string()))
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_used_extent_includes_picture_anchors() {
        let mut ws = Worksheet::new("Sheet1");
        ws.set_cell(2, 3, Cell::text("x"));
        ws.add_picture(Picture::new(vec![1, 2, 3], 10, 1));
        assert_eq!(ws.used_extent(), (10, 3));
    }

    #[test]
    fn test_used_extent_empty_sheet() {
        let ws = Worksheet::new("Sheet1");
        assert_eq!(ws.used_extent(), (0, 0));
    }

    #[test]
    fn test_sheet_lookup() {
        let mut book = Workbook::new();
        book.add_sheet(Worksheet::new("First"));
        book.add_sheet(Worksheet::new("Second"));

        assert_eq!(book.sheet(1).unwrap().name, "First");
        assert_eq!(book.sheet_by_name("Second").unwrap().name, "Second");
        assert!(book.sheet(0).is_err());
        assert!(book.sheet(3).is_err());
        assert!(book.sheet_by_name("Missing").is_err());
    }

    #[test]
    fn test_defaults_apply_to_unset_rows_and_columns() {
        let ws = Worksheet::new("Sheet1");
        assert_eq!(ws.column_width(5), DEFAULT_COLUMN_WIDTH);
        assert_eq!(ws.row_height(5), DEFAULT_ROW_HEIGHT);
    }
}

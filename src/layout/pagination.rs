//! Partitioning of a sheet's used range into page regions.
//!
//! Row ranges and column ranges are computed independently per the selected
//! strategy; their cross product, iterated row-range-major, is the ordered
//! page list. The partition is total: every used cell lands in exactly one
//! region, including the trailing remainder after the last break.

use serde::{Deserialize, Serialize};

use crate::types::Worksheet;
use crate::units::column_width_to_point;

/// Pagination override. `None` at the call site means the sheet's native
/// break lists.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum Pagination {
    /// Fixed number of rows/columns per page.
    FixedCellCount { rows_per_page: u32, cols_per_page: u32 },
    /// Fixed physical thresholds in points, measured in unscaled sheet units.
    FixedExtent { height: f64, width: f64 },
}

/// Inclusive 1-based range of rows or columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn iter(&self) -> std::ops::RangeInclusive<u32> {
        self.start..=self.end
    }

    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start) + 1
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

/// One rectangular row×column block mapped to exactly one output page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRegion {
    pub rows: Span,
    pub cols: Span,
}

/// Compute the ordered page regions for a sheet. An empty sheet yields an
/// empty list, not an error.
pub fn page_regions(ws: &Worksheet, pagination: Option<&Pagination>) -> Vec<PageRegion> {
    let (max_row, max_col) = ws.used_extent();
    if max_row == 0 || max_col == 0 {
        return Vec::new();
    }

    let (row_spans, col_spans) = match pagination {
        None => (
            spans_from_breaks(&ws.page_setup.row_breaks, max_row),
            spans_from_breaks(&ws.page_setup.col_breaks, max_col),
        ),
        Some(Pagination::FixedCellCount {
            rows_per_page,
            cols_per_page,
        }) => (
            spans_from_count(*rows_per_page, max_row),
            spans_from_count(*cols_per_page, max_col),
        ),
        Some(Pagination::FixedExtent { height, width }) => (
            spans_from_extent(max_row, *height, |r| ws.row_height(r)),
            spans_from_extent(max_col, *width, |c| column_width_to_point(ws.column_width(c))),
        ),
    };

    let mut regions = Vec::with_capacity(row_spans.len() * col_spans.len());
    for rows in &row_spans {
        for cols in &col_spans {
            regions.push(PageRegion {
                rows: *rows,
                cols: *cols,
            });
        }
    }
    regions
}

/// Native break lists: each entry is the last row/column of a page. Breaks
/// at or past the used edge are ignored; the remainder always forms the final
/// span so the partition stays total.
fn spans_from_breaks(breaks: &[u32], max: u32) -> Vec<Span> {
    let mut edges: Vec<u32> = breaks.iter().copied().filter(|&b| b >= 1 && b < max).collect();
    edges.sort_unstable();
    edges.dedup();

    let mut spans = Vec::with_capacity(edges.len() + 1);
    let mut start = 1;
    for edge in edges {
        spans.push(Span { start, end: edge });
        start = edge + 1;
    }
    spans.push(Span { start, end: max });
    spans
}

fn spans_from_count(per_page: u32, max: u32) -> Vec<Span> {
    if per_page == 0 {
        return vec![Span { start: 1, end: max }];
    }

    let mut spans = Vec::new();
    let mut start = 1;
    while start <= max {
        let end = max.min(start + per_page - 1);
        spans.push(Span { start, end });
        start = end + 1;
    }
    spans
}

/// Accumulate measures until the next element would cross the threshold.
/// Every span holds at least one element, so oversized single rows/columns
/// still get a page.
fn spans_from_extent(max: u32, limit: f64, measure: impl Fn(u32) -> f64) -> Vec<Span> {
    if limit <= 0.0 {
        return vec![Span { start: 1, end: max }];
    }

    let mut spans = Vec::new();
    let mut start = 1;
    let mut acc = 0.0;
    for i in 1..=max {
        let m = measure(i);
        if i > start && acc + m > limit {
            spans.push(Span { start, end: i - 1 });
            start = i;
            acc = m;
        } else {
            acc += m;
        }
    }
    spans.push(Span { start, end: max });
    spans
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
    use crate::types::{Cell, Worksheet};

    fn sheet_with_extent(rows: u32, cols: u32) -> Worksheet {
        let mut ws = Worksheet::new("Sheet1");
        ws.set_cell(rows, cols, Cell::text("corner"));
        ws
    }

    #[test]
    fn test_empty_sheet_has_no_regions() {
        let ws = Worksheet::new("Sheet1");
        assert!(page_regions(&ws, None).is_empty());
    }

    #[test]
    fn test_no_breaks_is_one_region() {
        let ws = sheet_with_extent(30, 5);
        let regions = page_regions(&ws, None);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].rows, Span { start: 1, end: 30 });
        assert_eq!(regions[0].cols, Span { start: 1, end: 5 });
    }

    #[test]
    fn test_native_breaks_row_major_order() {
        let mut ws = sheet_with_extent(30, 10);
        ws.page_setup.row_breaks = vec![15];
        ws.page_setup.col_breaks = vec![4];

        let regions = page_regions(&ws, None);
        assert_eq!(regions.len(), 4);
        // Row-range-major: both column ranges of rows 1-15 first.
        assert_eq!(regions[0].rows, Span { start: 1, end: 15 });
        assert_eq!(regions[0].cols, Span { start: 1, end: 4 });
        assert_eq!(regions[1].rows, Span { start: 1, end: 15 });
        assert_eq!(regions[1].cols, Span { start: 5, end: 10 });
        assert_eq!(regions[2].rows, Span { start: 16, end: 30 });
        assert_eq!(regions[3].cols, Span { start: 5, end: 10 });
    }

    #[test]
    fn test_trailing_remainder_is_emitted() {
        // A break one row before the edge still yields the final one-row page.
        let mut ws = sheet_with_extent(10, 2);
        ws.page_setup.row_breaks = vec![9];
        let regions = page_regions(&ws, None);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[1].rows, Span { start: 10, end: 10 });
    }

    #[test]
    fn test_breaks_past_edge_are_ignored() {
        let mut ws = sheet_with_extent(10, 2);
        ws.page_setup.row_breaks = vec![10, 25];
        let regions = page_regions(&ws, None);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].rows, Span { start: 1, end: 10 });
    }

    #[test]
    fn test_fixed_cell_count() {
        let ws = sheet_with_extent(32, 9);
        let regions = page_regions(
            &ws,
            Some(&Pagination::FixedCellCount {
                rows_per_page: 15,
                cols_per_page: 5,
            }),
        );
        // Rows: 1-15, 16-30, 31-32. Cols: 1-5, 6-9.
        assert_eq!(regions.len(), 6);
        assert_eq!(regions[5].rows, Span { start: 31, end: 32 });
        assert_eq!(regions[5].cols, Span { start: 6, end: 9 });
    }

    #[test]
    fn test_fixed_extent_breaks_before_overflow() {
        let mut ws = sheet_with_extent(4, 1);
        for row in 1..=4 {
            ws.set_row_height(row, 30.0);
        }
        let regions = page_regions(
            &ws,
            Some(&Pagination::FixedExtent {
                height: 70.0,
                width: 1000.0,
            }),
        );
        // 30+30 fits under 70, the third row would cross.
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].rows, Span { start: 1, end: 2 });
        assert_eq!(regions[1].rows, Span { start: 3, end: 4 });
    }

    #[test]
    fn test_fixed_extent_oversized_row_gets_own_page() {
        let mut ws = sheet_with_extent(2, 1);
        ws.set_row_height(1, 500.0);
        ws.set_row_height(2, 10.0);
        let regions = page_regions(
            &ws,
            Some(&Pagination::FixedExtent {
                height: 100.0,
                width: 1000.0,
            }),
        );
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].rows, Span { start: 1, end: 1 });
    }

    #[test]
    fn test_partition_totality_under_all_strategies() {
        let mut ws = sheet_with_extent(23, 7);
        ws.page_setup.row_breaks = vec![5, 17];
        ws.page_setup.col_breaks = vec![3];

        let strategies: [Option<Pagination>; 3] = [
            None,
            Some(Pagination::FixedCellCount {
                rows_per_page: 4,
                cols_per_page: 3,
            }),
            Some(Pagination::FixedExtent {
                height: 45.0,
                width: 120.0,
            }),
        ];

        for strategy in &strategies {
            let regions = page_regions(&ws, strategy.as_ref());
            let mut seen = std::collections::HashSet::new();
            for region in &regions {
                for row in region.rows.iter() {
                    for col in region.cols.iter() {
                        assert!(seen.insert((row, col)), "cell covered twice: {row},{col}");
                    }
                }
            }
            assert_eq!(seen.len(), 23 * 7, "partition must cover the used range");
        }
    }
}

//! Per-cell geometry for each page region.
//!
//! Two flat passes: walk the region top-to-bottom, left-to-right accumulating
//! running offsets to place every cell, then enrich merge owners with their
//! aggregate extents and back-link covered cells. Merge back-references are
//! plain indices into the same page's cell vector.

use std::collections::HashMap;
use std::sync::Arc;

use crate::layout::pagination::{page_regions, PageRegion, Pagination};
use crate::types::{PageSetup, Worksheet};
use crate::units::{column_width_to_point, inch_to_point, pixel_to_point};

/// Directive keys are `|`-separated tokens in a cell's text.
pub(crate) fn directive_keys(text: &str) -> impl Iterator<Item = &str> {
    text.split('|').map(str::trim)
}

/// An image placed relative to its anchor cell, pre-scaled to points.
#[derive(Debug, Clone)]
pub struct PictureRenderInfo {
    pub data: Arc<Vec<u8>>,
    /// Insertion index in the sheet's picture list; draw order for overlaps.
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One cell's physical placement on one page. Exactly one exists per
/// (page, source cell) pair.
#[derive(Debug, Clone)]
pub struct CellRenderInfo {
    /// Source coordinates, 1-based.
    pub row: u32,
    pub col: u32,
    /// Absolute position and size in points, scaling and margins applied.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Aggregate extent of the merge this cell owns; 0.0 unless this cell is
    /// the merge's top-left owner.
    pub merged_width: f64,
    pub merged_height: f64,
    /// Index of the merge's first (owner) cell within this page's cell list.
    pub merge_first: Option<usize>,
    /// Index of the merge's last cell, when it lands on this page.
    pub merge_last: Option<usize>,
    pub pictures: Vec<PictureRenderInfo>,
}

/// Everything needed to draw one output page.
#[derive(Debug, Clone)]
pub struct RenderInfo {
    pub region: PageRegion,
    pub cells: Vec<CellRenderInfo>,
    pub scaling: f64,
}

/// Resolve a worksheet into ordered per-page geometry.
pub fn resolve_sheet(
    ws: &Worksheet,
    setup: &PageSetup,
    pagination: Option<&Pagination>,
) -> Vec<RenderInfo> {
    let regions = page_regions(ws, pagination);
    let fit_width = setup.fit_to_width || has_fit_directive(ws);

    // Group pictures by anchor once; insertion index is the z-order.
    let mut anchored: HashMap<(u32, u32), Vec<usize>> = HashMap::new();
    for (index, pic) in ws.pictures.iter().enumerate() {
        anchored.entry((pic.row, pic.col)).or_default().push(index);
    }

    let mut pages = Vec::with_capacity(regions.len());
    for region in regions {
        pages.push(resolve_region(ws, setup, region, fit_width, &anchored));
    }
    pages
}

/// The `#FitColumn` directive in cell (1,1) requests fit-to-width for the
/// whole sheet.
fn has_fit_directive(ws: &Worksheet) -> bool {
    directive_keys(ws.text(1, 1)).any(|key| key == "#FitColumn")
}

fn resolve_region(
    ws: &Worksheet,
    setup: &PageSetup,
    region: PageRegion,
    fit_width: bool,
    anchored: &HashMap<(u32, u32), Vec<usize>>,
) -> RenderInfo {
    let (margin_x, margin_y, scaling) = margins_and_scaling(ws, setup, region, fit_width);

    let mut cells = Vec::with_capacity(region.rows.len() as usize * region.cols.len() as usize);
    let mut index_of: HashMap<(u32, u32), usize> = HashMap::with_capacity(cells.capacity());

    let mut y_offset = 0.0;
    for row in region.rows.iter() {
        let mut x_offset = 0.0;
        let height = ws.row_height(row) * scaling;
        for col in region.cols.iter() {
            let width = column_width_to_point(ws.column_width(col)) * scaling;

            let mut info = CellRenderInfo {
                row,
                col,
                x: x_offset + margin_x,
                y: y_offset + margin_y,
                width,
                height,
                merged_width: 0.0,
                merged_height: 0.0,
                merge_first: None,
                merge_last: None,
                pictures: Vec::new(),
            };

            if let Some(indices) = anchored.get(&(row, col)) {
                for &index in indices {
                    if let Some(pic) = ws.pictures.get(index) {
                        info.pictures.push(PictureRenderInfo {
                            data: Arc::clone(&pic.data),
                            index,
                            x: pixel_to_point(pic.left_px) * scaling,
                            y: pixel_to_point(pic.top_px) * scaling,
                            width: pixel_to_point(pic.width_px) * scaling,
                            height: pixel_to_point(pic.height_px) * scaling,
                        });
                    }
                }
            }

            index_of.insert((row, col), cells.len());
            cells.push(info);
            x_offset += width;
        }
        y_offset += height;
    }

    apply_merges(ws, &mut cells, &index_of, scaling);

    RenderInfo {
        region,
        cells,
        scaling,
    }
}

/// Second flat pass: aggregate each merged range onto its owner and back-link
/// every covered cell. Widths are summed across the range's first row,
/// heights across all of its rows, in unscaled units; scaling is applied to
/// the sums, so it commutes with aggregation.
fn apply_merges(
    ws: &Worksheet,
    cells: &mut [CellRenderInfo],
    index_of: &HashMap<(u32, u32), usize>,
    scaling: f64,
) {
    for merge in &ws.merges {
        let Some(&first_idx) = index_of.get(&merge.first()) else {
            // Owner is on another page; that page aggregates it.
            continue;
        };
        let last_idx = index_of.get(&merge.last()).copied();

        let width: f64 = (merge.start_col..=merge.end_col)
            .map(|c| column_width_to_point(ws.column_width(c)))
            .sum();
        let height: f64 = (merge.start_row..=merge.end_row)
            .map(|r| ws.row_height(r))
            .sum();

        if let Some(owner) = cells.get_mut(first_idx) {
            owner.merged_width = width * scaling;
            owner.merged_height = height * scaling;
        }

        for row in merge.start_row..=merge.end_row {
            for col in merge.start_col..=merge.end_col {
                if let Some(&idx) = index_of.get(&(row, col)) {
                    if let Some(covered) = cells.get_mut(idx) {
                        covered.merge_first = Some(first_idx);
                        covered.merge_last = last_idx;
                    }
                }
            }
        }
    }
}

/// Margin offsets and the region's scaling factor.
///
/// Fit-to-width derives scaling from the printable width; the center flags
/// bias the margin by half the slack when the content is smaller than the
/// printable area.
fn margins_and_scaling(
    ws: &Worksheet,
    setup: &PageSetup,
    region: PageRegion,
    fit_width: bool,
) -> (f64, f64, f64) {
    let margin_left = inch_to_point(setup.margins.left);
    let margin_top = inch_to_point(setup.margins.top + setup.margins.header);
    let margin_right = inch_to_point(setup.margins.right);
    let margin_bottom = inch_to_point(setup.margins.bottom + setup.margins.footer);

    let (page_width, page_height) = setup.page_dimensions();

    let mut total_width: f64 = region
        .cols
        .iter()
        .map(|c| column_width_to_point(ws.column_width(c)))
        .sum();
    let mut total_height: f64 = region.rows.iter().map(|r| ws.row_height(r)).sum();

    let mut scaling = setup.scale_factor();

    if fit_width && total_width > 0.0 {
        let printable = page_width - margin_left - margin_right;
        scaling = printable / total_width;
        total_width *= scaling;
        total_height *= scaling;
    }

    let mut margin_x = margin_left;
    let mut margin_y = margin_top;

    if setup.center_horizontally {
        let printable = page_width - margin_x - margin_right;
        if total_width < printable {
            margin_x += (printable - total_width) / 2.0;
        }
    }
    if setup.center_vertically {
        let printable = page_height - margin_y - margin_bottom;
        if total_height < printable {
            margin_y += (printable - total_height) / 2.0;
        }
    }

    (margin_x, margin_y, scaling)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::cast_possible_truncation,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::types::{Cell, MergeRange, PageSetup, Picture, Worksheet};
    use crate::units::point_to_column_width;

    /// A sheet whose column widths land on exact point values.
    fn sheet_with_point_columns(rows: u32, widths_pt: &[f64]) -> Worksheet {
        let mut ws = Worksheet::new("Sheet1");
        for (i, &pt) in widths_pt.iter().enumerate() {
            ws.set_column_width(i as u32 + 1, point_to_column_width(pt));
        }
        ws.set_cell(rows, widths_pt.len() as u32, Cell::text("corner"));
        ws
    }

    fn zero_margin_setup() -> PageSetup {
        PageSetup {
            margins: crate::types::Margins::zero(),
            ..PageSetup::default()
        }
    }

    #[test]
    fn test_running_offsets() {
        let mut ws = sheet_with_point_columns(2, &[50.0, 60.0]);
        ws.set_row_height(1, 20.0);
        ws.set_row_height(2, 30.0);

        let pages = resolve_sheet(&ws, &zero_margin_setup(), None);
        assert_eq!(pages.len(), 1);
        let cells = &pages[0].cells;
        assert_eq!(cells.len(), 4);

        let at = |row, col| {
            cells
                .iter()
                .find(|c| c.row == row && c.col == col)
                .unwrap()
        };
        assert!((at(1, 1).x - 0.0).abs() < 1e-9);
        assert!((at(1, 2).x - 50.0).abs() < 1e-9);
        assert!((at(2, 1).y - 20.0).abs() < 1e-9);
        assert!((at(2, 2).width - 60.0).abs() < 1e-9);
        assert!((at(2, 2).height - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_merge_aggregation_2x2() {
        // Column widths 50/60pt, row heights 20/20pt, scale 100%:
        // owner carries 110 x 40.
        let mut ws = sheet_with_point_columns(2, &[50.0, 60.0]);
        ws.set_row_height(1, 20.0);
        ws.set_row_height(2, 20.0);
        ws.add_merge(MergeRange::new(1, 1, 2, 2));

        let pages = resolve_sheet(&ws, &zero_margin_setup(), None);
        let cells = &pages[0].cells;
        let owner = cells.iter().find(|c| c.row == 1 && c.col == 1).unwrap();
        assert!((owner.merged_width - 110.0).abs() < 1e-6);
        assert!((owner.merged_height - 40.0).abs() < 1e-6);

        // Only the owner carries the aggregate.
        for cell in cells.iter().filter(|c| (c.row, c.col) != (1, 1)) {
            assert_eq!(cell.merged_width, 0.0);
            assert_eq!(cell.merged_height, 0.0);
        }

        // Every covered cell links back to first and last.
        for cell in cells {
            let first = cell.merge_first.map(|i| (cells[i].row, cells[i].col));
            let last = cell.merge_last.map(|i| (cells[i].row, cells[i].col));
            assert_eq!(first, Some((1, 1)));
            assert_eq!(last, Some((2, 2)));
        }
    }

    #[test]
    fn test_merge_aggregation_commutes_with_scaling() {
        let mut ws = sheet_with_point_columns(2, &[50.0, 60.0]);
        ws.set_row_height(1, 20.0);
        ws.set_row_height(2, 20.0);
        ws.add_merge(MergeRange::new(1, 1, 2, 2));

        let setup = PageSetup {
            margins: crate::types::Margins::zero(),
            scale: 50,
            ..PageSetup::default()
        };
        let pages = resolve_sheet(&ws, &setup, None);
        let owner = pages[0]
            .cells
            .iter()
            .find(|c| c.row == 1 && c.col == 1)
            .unwrap();
        assert!((owner.merged_width - 55.0).abs() < 1e-6);
        assert!((owner.merged_height - 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_center_horizontally_biases_margin() {
        // A4 width, 0.5in margins each side, 300pt of content.
        let mut ws = sheet_with_point_columns(1, &[300.0]);
        ws.set_row_height(1, 20.0);

        let setup = PageSetup {
            margins: crate::types::Margins::uniform(0.5),
            center_horizontally: true,
            ..PageSetup::default()
        };
        let pages = resolve_sheet(&ws, &setup, None);
        let cell = &pages[0].cells[0];

        let (page_width, _) = setup.page_dimensions();
        let expected = 36.0 + (page_width - 36.0 - 36.0 - 300.0) / 2.0;
        assert!((cell.x - expected).abs() < 1e-9, "got {}", cell.x);
    }

    #[test]
    fn test_fit_to_width_scaling() {
        let mut ws = sheet_with_point_columns(1, &[200.0, 200.0]);
        ws.set_row_height(1, 20.0);

        let setup = PageSetup {
            margins: crate::types::Margins::zero(),
            fit_to_width: true,
            ..PageSetup::default()
        };
        let pages = resolve_sheet(&ws, &setup, None);
        let (page_width, _) = setup.page_dimensions();
        assert!((pages[0].scaling - page_width / 400.0).abs() < 1e-9);

        let total: f64 = pages[0].cells.iter().map(|c| c.width).sum();
        assert!((total - page_width).abs() < 1e-6);
    }

    #[test]
    fn test_fit_directive_in_first_cell() {
        let mut ws = sheet_with_point_columns(1, &[200.0, 200.0]);
        ws.set_cell(1, 1, Cell::text("#FitColumn | #Empty"));
        ws.set_row_height(1, 20.0);

        let setup = zero_margin_setup();
        let pages = resolve_sheet(&ws, &setup, None);
        let (page_width, _) = setup.page_dimensions();
        assert!((pages[0].scaling - page_width / 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_pictures_attach_scaled() {
        let mut ws = Worksheet::new("Sheet1");
        ws.set_cell(1, 1, Cell::text("anchor"));
        ws.add_picture(
            Picture::new(vec![0xFF], 1, 1)
                .at_offset(96.0, 48.0)
                .with_size(192.0, 96.0),
        );

        let setup = PageSetup {
            margins: crate::types::Margins::zero(),
            scale: 50,
            ..PageSetup::default()
        };
        let pages = resolve_sheet(&ws, &setup, None);
        let cell = &pages[0].cells[0];
        assert_eq!(cell.pictures.len(), 1);
        let pic = &cell.pictures[0];
        // 96px -> 72pt, halved by scaling.
        assert!((pic.x - 36.0).abs() < 1e-9);
        assert!((pic.y - 18.0).abs() < 1e-9);
        assert!((pic.width - 72.0).abs() < 1e-9);
        assert!((pic.height - 36.0).abs() < 1e-9);
    }

    #[test]
    fn test_resolver_is_idempotent() {
        let mut ws = sheet_with_point_columns(3, &[40.0, 55.0, 70.0]);
        ws.add_merge(MergeRange::new(1, 1, 2, 2));
        ws.page_setup.row_breaks = vec![2];

        let setup = PageSetup::default();
        let first = resolve_sheet(&ws, &setup, None);
        let second = resolve_sheet(&ws, &setup, None);

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.cells.len(), b.cells.len());
            for (ca, cb) in a.cells.iter().zip(&b.cells) {
                assert_eq!((ca.row, ca.col), (cb.row, cb.col));
                assert_eq!(ca.x.to_bits(), cb.x.to_bits());
                assert_eq!(ca.y.to_bits(), cb.y.to_bits());
                assert_eq!(ca.width.to_bits(), cb.width.to_bits());
                assert_eq!(ca.height.to_bits(), cb.height.to_bits());
            }
        }
    }
}

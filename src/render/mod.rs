//! Render driver.
//!
//! Orchestrates the conversion: resolve a sheet's geometry, open one sink
//! page per region, then replay four passes in strict order — fills, borders,
//! text, images. Cells overlap on shared edges and merge extents, so the
//! passes are separated to keep later passes from being painted over. After
//! every page of every sheet is recorded, the deferred page-count commands
//! are flushed.

pub mod backend;
mod borders;
mod pictures;
pub mod postprocess;
pub mod recording;
mod text;

pub use backend::{
    Alignment, DashStyle, FontSpec, PageDescriptor, Pen, Rect, StringFormat, VirtualDocument,
    VirtualGraphics, VirtualPage,
};
pub use postprocess::{DeferredDraw, PostProcessQueue};
pub use recording::{DrawCommand, RecordingDocument, RecordingGraphics, RecordingPage};

use crate::color::ColorResolver;
use crate::error::Result;
use crate::layout::{resolve_sheet, CellRenderInfo, Pagination};
use crate::render::borders::BorderRenderer;
use crate::render::pictures::draw_pictures;
use crate::render::text::TextRenderer;
use crate::types::{Workbook, Worksheet};

/// Renders a workbook into any [`VirtualDocument`] sink.
///
/// A renderer borrows the workbook read-only; build a fresh one (or at least
/// issue a fresh render call) when pagination changes, since deferred
/// commands bind to page indices.
pub struct Renderer<'a> {
    book: &'a Workbook,
}

impl<'a> Renderer<'a> {
    pub fn new(book: &'a Workbook) -> Self {
        Renderer { book }
    }

    /// Render every sheet, in workbook order, into one document.
    pub fn render_to(&self, document: &mut dyn VirtualDocument) -> Result<()> {
        let mut queue = PostProcessQueue::new();
        for ws in &self.book.sheets {
            self.render_sheet(document, &mut queue, ws, None)?;
        }
        queue.flush(document)
    }

    /// Render a single sheet by 1-based position, with an optional
    /// pagination override.
    pub fn render_sheet_to(
        &self,
        document: &mut dyn VirtualDocument,
        position: usize,
        pagination: Option<&Pagination>,
    ) -> Result<()> {
        let ws = self.book.sheet(position)?;
        let mut queue = PostProcessQueue::new();
        self.render_sheet(document, &mut queue, ws, pagination)?;
        queue.flush(document)
    }

    /// Render a single sheet by name, with an optional pagination override.
    pub fn render_sheet_by_name_to(
        &self,
        document: &mut dyn VirtualDocument,
        name: &str,
        pagination: Option<&Pagination>,
    ) -> Result<()> {
        let ws = self.book.sheet_by_name(name)?;
        let mut queue = PostProcessQueue::new();
        self.render_sheet(document, &mut queue, ws, pagination)?;
        queue.flush(document)
    }

    fn render_sheet(
        &self,
        document: &mut dyn VirtualDocument,
        queue: &mut PostProcessQueue,
        ws: &Worksheet,
        pagination: Option<&Pagination>,
    ) -> Result<()> {
        let setup = &ws.page_setup;
        let pages = resolve_sheet(ws, setup, pagination);
        log::debug!("sheet {:?}: {} page(s)", ws.name, pages.len());

        let (width, height) = setup.page_dimensions();
        let descriptor = PageDescriptor {
            width,
            height,
            orientation: setup.orientation,
        };

        let colors = ColorResolver::new(&self.book.theme);
        let text = TextRenderer::new(ws, colors);

        for page in &pages {
            let page_index = document.page_count();
            let sink_page = document.add_page(&descriptor)?;
            let gfx = sink_page.graphics();

            for info in &page.cells {
                fill_cell(gfx, ws, colors, info, &page.cells);
            }

            let mut border_pass = BorderRenderer::new(ws, colors);
            for info in &page.cells {
                border_pass.draw_cell(gfx, page.scaling, info, &page.cells);
            }

            for info in &page.cells {
                text.draw_cell(gfx, queue, page_index, page.scaling, info);
            }

            draw_pictures(gfx, &page.cells);
        }

        Ok(())
    }
}

/// Background fill for one cell. Cells covered by a merge take the merge
/// owner's fill so the whole block paints uniformly.
fn fill_cell(
    gfx: &mut dyn VirtualGraphics,
    ws: &Worksheet,
    colors: ColorResolver<'_>,
    info: &CellRenderInfo,
    cells: &[CellRenderInfo],
) {
    let (row, col) = info
        .merge_first
        .and_then(|i| cells.get(i))
        .map_or((info.row, info.col), |owner| (owner.row, owner.col));

    let fill = ws
        .style(row, col)
        .and_then(|s| s.fill.as_ref())
        .and_then(|c| colors.resolve(c));

    if let Some(color) = fill {
        gfx.fill_rect(color, Rect::new(info.x, info.y, info.width, info.height));
    }
}

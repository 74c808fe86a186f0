//! sheetpress - paginated spreadsheet rendering
//!
//! Turns a read-only spreadsheet document model into print-ready pages of
//! backend-neutral draw commands:
//! - Physical cell geometry (column-character → pixel → point conversions)
//! - Merged regions with owner-carried aggregate extents
//! - Border precedence, tie-breaking and double-stroke rendering
//! - Text alignment defaults, rotation and stacked vertical text
//! - Dynamic page tokens (`#Page`, `#PageCount`, `#PageOf`)
//! - Embedded images in stable z-order
//! - Native, fixed-count and fixed-extent pagination
//!
//! # Usage
//!
//! ```
//! use sheetpress::render::{RecordingDocument, Renderer};
//! use sheetpress::types::{Cell, Workbook, Worksheet};
//!
//! let mut sheet = Worksheet::new("Report");
//! sheet.set_cell(1, 1, Cell::text("Hello"));
//!
//! let mut book = Workbook::new();
//! book.add_sheet(sheet);
//!
//! let mut document = RecordingDocument::new();
//! Renderer::new(&book).render_to(&mut document)?;
//! assert_eq!(document.pages().len(), 1);
//! # Ok::<(), sheetpress::SheetpressError>(())
//! ```
//!
//! Parsing the native file format, PDF byte encoding and print spooling are
//! collaborator concerns: a parser fills in [`types::Workbook`], and a
//! concrete sink implements the [`render::backend`] trait triple (or wraps
//! [`render::RecordingDocument`] and replays its pages).

pub mod color;
pub mod error;
pub mod layout;
pub mod paper;
pub mod render;
pub mod types;
pub mod units;

pub use color::{ColorResolver, Rgba};
pub use error::{Result, SheetpressError};
pub use layout::{CellRenderInfo, PageRegion, Pagination, RenderInfo};
pub use render::{RecordingDocument, Renderer, VirtualDocument};
pub use types::{Cell, PageSetup, Workbook, Worksheet};

/// Get the library version
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

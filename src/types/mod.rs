//! Read-only document model consumed by the layout resolver and renderer.
//!
//! A parsing collaborator populates these types from the native file format;
//! sheetpress itself never mutates them during a conversion.

mod cell;
mod page;
mod picture;
mod style;
mod workbook;

pub use cell::{Cell, CellKind};
pub use page::{Margins, Orientation, PageSetup};
pub use picture::Picture;
pub use style::{
    Border, BorderStyle, ColorSpec, HAlign, Style, StyleRef, UnderlineStyle, VAlign,
};
pub use workbook::{
    MergeRange, Theme, Workbook, Worksheet, DEFAULT_COLUMN_WIDTH, DEFAULT_ROW_HEIGHT,
};

//! Sheet geometry resolution.
//!
//! [`pagination`] partitions the used range into page regions; [`geometry`]
//! turns each region into absolute per-cell rectangles with merge aggregation
//! and picture placement. Both are pure: the source worksheet is never
//! mutated, and re-running them on an unchanged sheet reproduces identical
//! coordinates.

pub mod geometry;
pub mod pagination;

pub use geometry::{resolve_sheet, CellRenderInfo, PictureRenderInfo, RenderInfo};
pub use pagination::{page_regions, PageRegion, Pagination, Span};

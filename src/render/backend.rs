//! Backend-agnostic page sink.
//!
//! Concrete sinks (PDF writers, print surfaces) implement the
//! `VirtualDocument` / `VirtualPage` / `VirtualGraphics` trait triple once;
//! the render driver never depends on a concrete backend. Two conformance
//! rules apply:
//!
//! 1. Commands must be replayable after the fact. Batch backends defer byte
//!    emission until the page graph is complete, and [`page_mut`] keeps
//!    recorded pages addressable so deferred page-count text can still be
//!    appended. Streaming/device backends render the full page list first
//!    and replay per device callback.
//! 2. Draw order within one page is fills → borders → text → images. The
//!    driver enforces it; sinks only execute.
//!
//! [`page_mut`]: VirtualDocument::page_mut

use std::sync::Arc;

use crate::color::Rgba;
use crate::error::Result;
use crate::types::Orientation;

/// Axis-aligned rectangle in points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

/// Position of content within a layout rectangle, along one axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Near,
    Center,
    Far,
}

/// Horizontal and vertical placement for a string draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringFormat {
    pub align: Alignment,
    pub line_align: Alignment,
}

/// Stroke pattern, already mapped from the sheet's border style. Unmapped
/// styles arrive as `Solid`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DashStyle {
    #[default]
    Solid,
    Dot,
    Dash,
    DashDot,
    DashDotDot,
}

/// Stroke parameters for a line draw. Width is in points with page scaling
/// applied; a zero width means nothing should be painted.
#[derive(Debug, Clone, PartialEq)]
pub struct Pen {
    pub color: Rgba,
    pub width: f64,
    pub dash: DashStyle,
}

/// Backend-neutral font request. Size is in points with page scaling applied;
/// resolving the name to font bytes is the sink's concern.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub name: String,
    pub size: f64,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

/// Physical description of a page to open.
#[derive(Debug, Clone, PartialEq)]
pub struct PageDescriptor {
    pub width: f64,
    pub height: f64,
    pub orientation: Orientation,
}

/// Draw-command surface for one page.
pub trait VirtualGraphics {
    fn fill_rect(&mut self, color: Rgba, rect: Rect);
    fn draw_line(&mut self, pen: &Pen, x1: f64, y1: f64, x2: f64, y2: f64);
    fn draw_string(
        &mut self,
        text: &str,
        font: &FontSpec,
        color: Rgba,
        rect: Rect,
        format: StringFormat,
    );
    fn draw_image(&mut self, data: &Arc<Vec<u8>>, rect: Rect);

    /// Push the current transform onto the sink's transform stack.
    fn save(&mut self);
    /// Pop back to the transform saved last.
    fn restore(&mut self);
    fn translate(&mut self, dx: f64, dy: f64);
    /// Rotate the coordinate system; positive degrees are clockwise.
    fn rotate(&mut self, degrees: f64);

    /// Line height for a font, in points.
    fn font_height(&self, font: &FontSpec) -> f64;
}

/// One open page of the sink.
pub trait VirtualPage {
    fn descriptor(&self) -> &PageDescriptor;
    fn graphics(&mut self) -> &mut dyn VirtualGraphics;
}

/// An ordered collection of pages under construction.
pub trait VirtualDocument {
    fn page_count(&self) -> usize;
    fn add_page(&mut self, descriptor: &PageDescriptor) -> Result<&mut dyn VirtualPage>;
    /// Re-open a previously added page (0-based) for deferred commands.
    fn page_mut(&mut self, index: usize) -> Option<&mut dyn VirtualPage>;
}

use std::sync::Arc;

/// An embedded image anchored to a cell.
///
/// Bytes are fully loaded before rendering starts; the buffer is shared with
/// every page that draws it. Offsets and sizes are in screen pixels as the
/// document stores them; the geometry resolver converts them to points.
#[derive(Debug, Clone)]
pub struct Picture {
    pub data: Arc<Vec<u8>>,
    /// Anchor cell, 1-based.
    pub row: u32,
    pub col: u32,
    /// Offset of the image's top-left from the anchor cell's origin, in
    /// pixels.
    pub left_px: f64,
    pub top_px: f64,
    pub width_px: f64,
    pub height_px: f64,
}

impl Picture {
    pub fn new(data: Vec<u8>, row: u32, col: u32) -> Self {
        Picture {
            data: Arc::new(data),
            row,
            col,
            left_px: 0.0,
            top_px: 0.0,
            width_px: 0.0,
            height_px: 0.0,
        }
    }

    pub fn at_offset(mut self, left_px: f64, top_px: f64) -> Self {
        self.left_px = left_px;
        self.top_px = top_px;
        self
    }

    pub fn with_size(mut self, width_px: f64, height_px: f64) -> Self {
        self.width_px = width_px;
        self.height_px = height_px;
        self
    }
}

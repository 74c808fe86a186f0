//! Command-recording page sink.
//!
//! The canonical batch backend: every draw call becomes a [`DrawCommand`]
//! that can be replayed later onto any other [`VirtualGraphics`]. File
//! writers replay a page when serializing it; device backends replay one page
//! per print callback, after the whole document has been recorded and the
//! final page count is known.

use std::sync::Arc;

use crate::color::Rgba;
use crate::error::Result;
use crate::render::backend::{
    FontSpec, PageDescriptor, Pen, Rect, StringFormat, VirtualDocument, VirtualGraphics,
    VirtualPage,
};

/// Line height as a multiple of the font size, used for deterministic text
/// layout without consulting real font metrics.
pub const LINE_SPACING_FACTOR: f64 = 1.2;

/// One recorded draw call.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    FillRect {
        color: Rgba,
        rect: Rect,
    },
    Line {
        pen: Pen,
        from: (f64, f64),
        to: (f64, f64),
    },
    Text {
        text: String,
        font: FontSpec,
        color: Rgba,
        rect: Rect,
        format: StringFormat,
    },
    Image {
        data: Arc<Vec<u8>>,
        rect: Rect,
    },
    Save,
    Restore,
    Translate {
        dx: f64,
        dy: f64,
    },
    Rotate {
        degrees: f64,
    },
}

#[derive(Debug, Default)]
pub struct RecordingGraphics {
    commands: Vec<DrawCommand>,
}

impl RecordingGraphics {
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Replay every recorded command onto another graphics surface.
    pub fn replay(&self, target: &mut dyn VirtualGraphics) {
        for command in &self.commands {
            match command {
                DrawCommand::FillRect { color, rect } => target.fill_rect(*color, *rect),
                DrawCommand::Line { pen, from, to } => {
                    target.draw_line(pen, from.0, from.1, to.0, to.1);
                }
                DrawCommand::Text {
                    text,
                    font,
                    color,
                    rect,
                    format,
                } => target.draw_string(text, font, *color, *rect, *format),
                DrawCommand::Image { data, rect } => target.draw_image(data, *rect),
                DrawCommand::Save => target.save(),
                DrawCommand::Restore => target.restore(),
                DrawCommand::Translate { dx, dy } => target.translate(*dx, *dy),
                DrawCommand::Rotate { degrees } => target.rotate(*degrees),
            }
        }
    }
}

impl VirtualGraphics for RecordingGraphics {
    fn fill_rect(&mut self, color: Rgba, rect: Rect) {
        self.commands.push(DrawCommand::FillRect { color, rect });
    }

    fn draw_line(&mut self, pen: &Pen, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.commands.push(DrawCommand::Line {
            pen: pen.clone(),
            from: (x1, y1),
            to: (x2, y2),
        });
    }

    fn draw_string(
        &mut self,
        text: &str,
        font: &FontSpec,
        color: Rgba,
        rect: Rect,
        format: StringFormat,
    ) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            font: font.clone(),
            color,
            rect,
            format,
        });
    }

    fn draw_image(&mut self, data: &Arc<Vec<u8>>, rect: Rect) {
        self.commands.push(DrawCommand::Image {
            data: Arc::clone(data),
            rect,
        });
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.commands.push(DrawCommand::Translate { dx, dy });
    }

    fn rotate(&mut self, degrees: f64) {
        self.commands.push(DrawCommand::Rotate { degrees });
    }

    fn font_height(&self, font: &FontSpec) -> f64 {
        font.size * LINE_SPACING_FACTOR
    }
}

#[derive(Debug)]
pub struct RecordingPage {
    descriptor: PageDescriptor,
    graphics: RecordingGraphics,
}

impl RecordingPage {
    pub fn commands(&self) -> &[DrawCommand] {
        self.graphics.commands()
    }

    pub fn replay(&self, target: &mut dyn VirtualGraphics) {
        self.graphics.replay(target);
    }
}

impl VirtualPage for RecordingPage {
    fn descriptor(&self) -> &PageDescriptor {
        &self.descriptor
    }

    fn graphics(&mut self) -> &mut dyn VirtualGraphics {
        &mut self.graphics
    }
}

/// A whole document of recorded pages.
#[derive(Debug, Default)]
pub struct RecordingDocument {
    pages: Vec<RecordingPage>,
}

impl RecordingDocument {
    pub fn new() -> Self {
        RecordingDocument::default()
    }

    pub fn pages(&self) -> &[RecordingPage] {
        &self.pages
    }
}

impl VirtualDocument for RecordingDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn add_page(&mut self, descriptor: &PageDescriptor) -> Result<&mut dyn VirtualPage> {
        self.pages.push(RecordingPage {
            descriptor: descriptor.clone(),
            graphics: RecordingGraphics::default(),
        });
        self.pages
            .last_mut()
            .map(|p| p as &mut dyn VirtualPage)
            .ok_or_else(|| crate::error::SheetpressError::Backend("page storage".to_string()))
    }

    fn page_mut(&mut self, index: usize) -> Option<&mut dyn VirtualPage> {
        self.pages.get_mut(index).map(|p| p as &mut dyn VirtualPage)
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
    use crate::render::backend::DashStyle;
    use crate::types::Orientation;

    #[test]
    fn test_commands_replay_in_order() {
        let mut doc = RecordingDocument::new();
        let descriptor = PageDescriptor {
            width: 100.0,
            height: 100.0,
            orientation: Orientation::Portrait,
        };
        let page = doc.add_page(&descriptor).unwrap();
        let gfx = page.graphics();
        gfx.fill_rect(Rgba::BLACK, Rect::new(0.0, 0.0, 10.0, 10.0));
        let pen = Pen {
            color: Rgba::BLACK,
            width: 0.5,
            dash: DashStyle::Solid,
        };
        gfx.draw_line(&pen, 0.0, 0.0, 10.0, 0.0);

        let mut target = RecordingGraphics::default();
        doc.pages()[0].replay(&mut target);
        assert_eq!(target.commands().len(), 2);
        assert!(matches!(target.commands()[0], DrawCommand::FillRect { .. }));
        assert!(matches!(target.commands()[1], DrawCommand::Line { .. }));
    }

    #[test]
    fn test_font_height_is_line_spacing() {
        let gfx = RecordingGraphics::default();
        let font = FontSpec {
            name: "Calibri".to_string(),
            size: 10.0,
            bold: false,
            italic: false,
            underline: false,
        };
        assert_eq!(gfx.font_height(&font), 12.0);
    }
}

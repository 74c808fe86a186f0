//! Deferred draw commands resolved once the total page count is known.
//!
//! Page-count text cannot be drawn while pages are still being added, so the
//! text renderer records a command here instead. The queue is an ordered
//! list, flushed exactly once: `flush` consumes the queue, so a second
//! execution cannot happen by construction.

use crate::error::{Result, SheetpressError};
use crate::render::backend::{VirtualDocument, VirtualGraphics};

/// A recorded draw; receives the target page's graphics and the final page
/// count.
pub type DeferredDraw = Box<dyn FnOnce(&mut dyn VirtualGraphics, usize)>;

#[derive(Default)]
pub struct PostProcessQueue {
    commands: Vec<(usize, DeferredDraw)>,
}

impl PostProcessQueue {
    pub fn new() -> Self {
        PostProcessQueue::default()
    }

    /// Record a command against a page (0-based).
    pub fn defer(&mut self, page_index: usize, command: DeferredDraw) {
        self.commands.push((page_index, command));
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Execute all recorded commands in FIFO order against their pages.
    pub fn flush(self, document: &mut dyn VirtualDocument) -> Result<()> {
        let total = document.page_count();
        for (page_index, command) in self.commands {
            let page = document.page_mut(page_index).ok_or_else(|| {
                SheetpressError::Backend(format!("deferred command targets missing page {page_index}"))
            })?;
            command(page.graphics(), total);
        }
        Ok(())
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
    use crate::render::recording::{DrawCommand, RecordingDocument};
    use crate::render::backend::{PageDescriptor, Rect};
    use crate::color::Rgba;
    use crate::types::Orientation;

    fn descriptor() -> PageDescriptor {
        PageDescriptor {
            width: 595.0,
            height: 842.0,
            orientation: Orientation::Portrait,
        }
    }

    #[test]
    fn test_flush_runs_fifo_with_final_count() {
        let mut doc = RecordingDocument::new();
        doc.add_page(&descriptor()).unwrap();
        let mut queue = PostProcessQueue::new();

        // Two commands against the same page; order must be preserved.
        queue.defer(
            0,
            Box::new(|gfx, total| {
                gfx.fill_rect(Rgba::BLACK, Rect::new(total as f64, 0.0, 1.0, 1.0));
            }),
        );
        queue.defer(
            0,
            Box::new(|gfx, total| {
                gfx.fill_rect(Rgba::BLACK, Rect::new(total as f64 * 10.0, 0.0, 1.0, 1.0));
            }),
        );

        // Pages added after recording still count.
        doc.add_page(&descriptor()).unwrap();
        doc.add_page(&descriptor()).unwrap();

        queue.flush(&mut doc).unwrap();

        let commands = doc.pages()[0].commands();
        let xs: Vec<f64> = commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillRect { rect, .. } => Some(rect.x),
                _ => None,
            })
            .collect();
        assert_eq!(xs, vec![3.0, 30.0]);
    }

    #[test]
    fn test_flush_fails_on_missing_page() {
        let mut doc = RecordingDocument::new();
        let mut queue = PostProcessQueue::new();
        queue.defer(5, Box::new(|_, _| {}));
        assert!(queue.flush(&mut doc).is_err());
    }
}

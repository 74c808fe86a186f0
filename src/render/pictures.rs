//! Embedded image compositing.
//!
//! Runs after fills, borders and text. Images draw in ascending insertion
//! order; the sort is stable so equal indices keep their cell order.

use crate::layout::{CellRenderInfo, PictureRenderInfo};
use crate::render::backend::{Rect, VirtualGraphics};

pub(crate) fn draw_pictures(gfx: &mut dyn VirtualGraphics, cells: &[CellRenderInfo]) {
    let mut placed: Vec<(&PictureRenderInfo, &CellRenderInfo)> = cells
        .iter()
        .flat_map(|cell| cell.pictures.iter().map(move |pic| (pic, cell)))
        .collect();
    placed.sort_by_key(|(pic, _)| pic.index);

    for (pic, cell) in placed {
        if pic.data.is_empty() {
            log::warn!("picture {} has no image data, skipping", pic.index);
            continue;
        }
        gfx.draw_image(
            &pic.data,
            Rect::new(cell.x + pic.x, cell.y + pic.y, pic.width, pic.height),
        );
    }
}

//! Cell text layout and drawing.
//!
//! Handles alignment defaults by data type, the quarter-font-size interior
//! padding, the three rotation modes (stacked vertical, arbitrary angle,
//! normal flow), and the dynamic page tokens. Page-count tokens are recorded
//! on the [`PostProcessQueue`] and drawn once the final page count is known.

use crate::color::{ColorResolver, Rgba};
use crate::layout::geometry::directive_keys;
use crate::layout::CellRenderInfo;
use crate::render::backend::{Alignment, FontSpec, Rect, StringFormat, VirtualGraphics};
use crate::render::postprocess::PostProcessQueue;
use crate::types::{CellKind, HAlign, UnderlineStyle, VAlign, Worksheet};
use crate::units::pixel_to_point;

pub(crate) const DEFAULT_FONT_NAME: &str = "Calibri";
pub(crate) const DEFAULT_FONT_SIZE: f64 = 11.0;

/// Rotation value marking stacked vertical text.
const STACKED_ROTATION: u16 = 255;

/// How the resolved text is laid out inside its rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextMode {
    /// Normal flow; explicit lines stacked by line height.
    Horizontal,
    /// Characters flow top-to-bottom, lines advance left-to-right as columns.
    Stacked,
    /// Rotation about the rectangle center, clockwise-positive degrees.
    Rotated(i32),
}

/// Everything a draw (immediate or deferred) needs besides the text itself.
#[derive(Debug, Clone)]
struct TextLayout {
    font: FontSpec,
    color: Rgba,
    rect: Rect,
    format: StringFormat,
    mode: TextMode,
}

/// A cell whose entire text is one of the dynamic page tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PageToken {
    /// Current 1-based page, resolved immediately.
    Page,
    /// Total page count, deferred.
    PageCount,
    /// `current{sep}total`, deferred.
    PageOf(String),
}

/// Recognize a page token. Only an exact single-line match counts.
pub(crate) fn parse_page_token(line: &str) -> Option<PageToken> {
    if line == "#Page" {
        return Some(PageToken::Page);
    }
    if line == "#PageCount" {
        return Some(PageToken::PageCount);
    }
    if let Some(rest) = line.strip_prefix("#PageOf") {
        let sep = rest
            .replace(['(', ')'], "")
            .split(',')
            .next()
            .map(|s| s.trim().replace('"', ""))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "/".to_string());
        return Some(PageToken::PageOf(sep));
    }
    None
}

pub(crate) struct TextRenderer<'a> {
    ws: &'a Worksheet,
    colors: ColorResolver<'a>,
}

impl<'a> TextRenderer<'a> {
    pub(crate) fn new(ws: &'a Worksheet, colors: ColorResolver<'a>) -> Self {
        TextRenderer { ws, colors }
    }

    /// Draw one cell's text, or record a deferred draw for page-count tokens.
    /// `page_index` is the 0-based index of the page being rendered.
    pub(crate) fn draw_cell(
        &self,
        gfx: &mut dyn VirtualGraphics,
        queue: &mut PostProcessQueue,
        page_index: usize,
        scaling: f64,
        info: &CellRenderInfo,
    ) {
        let text = self.ws.text(info.row, info.col);
        if text.is_empty() {
            return;
        }

        // Layout directives are consumed elsewhere and never drawn.
        if directive_keys(text).any(|key| key == "#Empty" || key == "#FitColumn") {
            return;
        }

        let style = self.ws.style(info.row, info.col);
        if style.and_then(|s| s.number_format.as_deref()) == Some(";;;") {
            return;
        }

        let cell_kind = self
            .ws
            .cell(info.row, info.col)
            .map_or(CellKind::Text, |c| c.kind);

        let format = StringFormat {
            align: match style.and_then(|s| s.align_h) {
                Some(HAlign::Center) => Alignment::Center,
                Some(HAlign::Right) => Alignment::Far,
                Some(HAlign::Left) => Alignment::Near,
                // Unset (and "general") falls back to the data type.
                _ => default_alignment(cell_kind),
            },
            line_align: match style.and_then(|s| s.align_v) {
                Some(VAlign::Center) => Alignment::Center,
                Some(VAlign::Bottom) => Alignment::Far,
                _ => Alignment::Near,
            },
        };

        let font_size = style.and_then(|s| s.font_size).unwrap_or(DEFAULT_FONT_SIZE);
        let font = FontSpec {
            name: style
                .and_then(|s| s.font_name.clone())
                .unwrap_or_else(|| DEFAULT_FONT_NAME.to_string()),
            size: font_size * scaling,
            bold: style.and_then(|s| s.bold).unwrap_or(false),
            italic: style.and_then(|s| s.italic).unwrap_or(false),
            underline: style
                .and_then(|s| s.underline)
                .is_some_and(|u| u != UnderlineStyle::None),
        };
        let color = style
            .and_then(|s| s.font_color.as_ref())
            .and_then(|c| self.colors.resolve(c))
            .unwrap_or(Rgba::BLACK);

        // Merge owners draw into the full merged extent.
        let mut w = if info.merged_width > 0.0 {
            info.merged_width
        } else {
            info.width
        };
        let mut h = if info.merged_height > 0.0 {
            info.merged_height
        } else {
            info.height
        };

        // Interior padding: a quarter of the font size, shrink-only.
        let offset = pixel_to_point(font_size * 0.25) * scaling;
        if offset * 2.0 < w {
            w -= offset * 2.0;
        }
        if offset * 2.0 < h {
            h -= offset * 2.0;
        }
        let rect = Rect::new(info.x + offset, info.y + offset, w, h);

        let raw = style.and_then(|s| s.rotation).unwrap_or(0);
        let mode = if raw == STACKED_ROTATION {
            TextMode::Stacked
        } else {
            match remap_rotation(raw) {
                0 => TextMode::Horizontal,
                angle => TextMode::Rotated(angle),
            }
        };

        let layout = TextLayout {
            font,
            color,
            rect,
            format,
            mode,
        };

        let lines: Vec<&str> = split_lines(text).collect();

        if let [line] = lines.as_slice() {
            match parse_page_token(line) {
                Some(PageToken::Page) => {
                    let current = (page_index + 1).to_string();
                    draw_lines(gfx, &layout, &[current.as_str()]);
                    return;
                }
                Some(PageToken::PageCount) => {
                    queue.defer(
                        page_index,
                        Box::new(move |g, total| {
                            let text = total.to_string();
                            draw_lines(g, &layout, &[text.as_str()]);
                        }),
                    );
                    return;
                }
                Some(PageToken::PageOf(sep)) => {
                    let current = page_index + 1;
                    queue.defer(
                        page_index,
                        Box::new(move |g, total| {
                            let text = format!("{current}{sep}{total}");
                            draw_lines(g, &layout, &[text.as_str()]);
                        }),
                    );
                    return;
                }
                None => {}
            }
        }

        draw_lines(gfx, &layout, &lines);
    }
}

/// Unset horizontal alignment follows the value's data type.
fn default_alignment(kind: CellKind) -> Alignment {
    match kind {
        CellKind::Number | CellKind::DateTime => Alignment::Far,
        CellKind::Boolean => Alignment::Center,
        CellKind::Text | CellKind::Empty => Alignment::Near,
    }
}

/// Map the sheet rotation convention (0-90 counter-clockwise, 91-180
/// clockwise) onto clockwise-positive target degrees.
fn remap_rotation(raw: u16) -> i32 {
    let raw = i32::from(raw.min(180));
    if raw <= 90 {
        -raw
    } else {
        180 - raw
    }
}

fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split("\r\n").flat_map(|part| part.split('\n'))
}

fn draw_lines(gfx: &mut dyn VirtualGraphics, layout: &TextLayout, lines: &[&str]) {
    match layout.mode {
        TextMode::Horizontal => draw_horizontal(gfx, layout, lines),
        TextMode::Stacked => draw_stacked(gfx, layout, lines),
        TextMode::Rotated(angle) => draw_rotated(gfx, layout, lines, angle),
    }
}

/// Normal flow: lines stacked by line height, the block positioned per the
/// vertical alignment.
fn draw_horizontal(gfx: &mut dyn VirtualGraphics, layout: &TextLayout, lines: &[&str]) {
    let rect = layout.rect;
    let line_height = gfx.font_height(&layout.font);
    let block_height = lines.len() as f64 * line_height;

    let mut y = rect.y;
    match layout.format.line_align {
        Alignment::Center => y += (rect.height - block_height) / 2.0,
        Alignment::Far => y += rect.height - block_height,
        Alignment::Near => {}
    }

    for line in lines {
        gfx.draw_string(
            line,
            &layout.font,
            layout.color,
            Rect::new(rect.x, y, rect.width, line_height),
            layout.format,
        );
        y += line_height;
    }
}

/// Stacked vertical text: characters flow top-to-bottom within a line, lines
/// advance left-to-right as columns spaced by line height.
fn draw_stacked(gfx: &mut dyn VirtualGraphics, layout: &TextLayout, columns: &[&str]) {
    let rect = layout.rect;
    let step = gfx.font_height(&layout.font);
    let total_width = columns.len() as f64 * step;

    let mut start_x = rect.x;
    match layout.format.align {
        Alignment::Center => start_x += ((rect.width - total_width) / 2.0).max(0.0),
        Alignment::Far => start_x += (rect.width - total_width).max(0.0),
        Alignment::Near => {}
    }

    let char_format = StringFormat {
        align: Alignment::Center,
        line_align: Alignment::Near,
    };

    for (c, column) in columns.iter().enumerate() {
        let glyphs: Vec<char> = column.chars().collect();
        let column_height = glyphs.len() as f64 * step;

        let mut y = rect.y;
        match layout.format.line_align {
            Alignment::Center => y += ((rect.height - column_height) / 2.0).max(0.0),
            Alignment::Far => y += (rect.height - column_height).max(0.0),
            Alignment::Near => {}
        }

        let x = start_x + c as f64 * step;
        for (i, glyph) in glyphs.iter().enumerate() {
            let mut buf = [0u8; 4];
            gfx.draw_string(
                glyph.encode_utf8(&mut buf),
                &layout.font,
                layout.color,
                Rect::new(x, y + i as f64 * step, step, step),
                char_format,
            );
        }
    }
}

/// Arbitrary-angle drawing: rotate the coordinate system about the rectangle
/// center; width and height are not swapped.
fn draw_rotated(gfx: &mut dyn VirtualGraphics, layout: &TextLayout, lines: &[&str], angle: i32) {
    let rect = layout.rect;
    let line_height = gfx.font_height(&layout.font);

    gfx.save();
    gfx.translate(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0);
    gfx.rotate(f64::from(angle));

    let local = Rect::new(-rect.width / 2.0, -rect.height / 2.0, rect.width, rect.height);
    let block_height = lines.len() as f64 * line_height;

    let mut y = local.y;
    match layout.format.line_align {
        Alignment::Center => y += (local.height - block_height) / 2.0,
        Alignment::Far => y += local.height - block_height,
        Alignment::Near => {}
    }

    for line in lines {
        gfx.draw_string(
            line,
            &layout.font,
            layout.color,
            Rect::new(local.x, y, local.width, line_height),
            layout.format,
        );
        y += line_height;
    }

    gfx.restore();
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
    use test_case::test_case;

    #[test]
    fn test_parse_tokens() {
        assert_eq!(parse_page_token("#Page"), Some(PageToken::Page));
        assert_eq!(parse_page_token("#PageCount"), Some(PageToken::PageCount));
        assert_eq!(
            parse_page_token("#PageOf(/)"),
            Some(PageToken::PageOf("/".to_string()))
        );
        assert_eq!(
            parse_page_token("#PageOf(\" of \")"),
            Some(PageToken::PageOf(" of ".to_string()))
        );
        assert_eq!(
            parse_page_token("#PageOf"),
            Some(PageToken::PageOf("/".to_string()))
        );
        assert_eq!(parse_page_token("#PageCounter"), None);
        assert_eq!(parse_page_token("Page"), None);
    }

    #[test_case(0, 0)]
    #[test_case(45, -45 ; "counter_clockwise_maps_negative")]
    #[test_case(90, -90)]
    #[test_case(91, 89 ; "clockwise_side_flips")]
    #[test_case(135, 45)]
    #[test_case(180, 0)]
    fn test_remap_rotation(raw: u16, expected: i32) {
        assert_eq!(remap_rotation(raw), expected);
    }

    #[test]
    fn test_split_lines_handles_both_endings() {
        let lines: Vec<&str> = split_lines("a\r\nb\nc").collect();
        assert_eq!(lines, vec!["a", "b", "c"]);
    }
}

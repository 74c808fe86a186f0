//! Cell border drawing with spreadsheet precedence rules.
//!
//! A shared edge is declared by up to two cells. The higher-ranked style
//! wins; on an exact tie only the Right/Bottom owner draws, so the edge is
//! painted once. Edges interior to a merged range are never drawn. A
//! page-scoped cache deduplicates an edge requested twice with identical
//! endpoints.

use std::collections::HashSet;

use crate::color::{ColorResolver, Rgba};
use crate::layout::CellRenderInfo;
use crate::render::backend::{DashStyle, Pen, VirtualGraphics};
use crate::types::{Border, BorderStyle, Worksheet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

/// Edge precedence, high to low: double > thick > medium family > thin
/// family > hair > none.
fn rank(style: BorderStyle) -> u32 {
    match style {
        BorderStyle::Double => 500,
        BorderStyle::Thick => 400,
        BorderStyle::Medium
        | BorderStyle::MediumDashed
        | BorderStyle::MediumDashDot
        | BorderStyle::MediumDashDotDot
        | BorderStyle::SlantDashDot => 300,
        BorderStyle::Thin
        | BorderStyle::Dashed
        | BorderStyle::Dotted
        | BorderStyle::DashDot
        | BorderStyle::DashDotDot => 200,
        BorderStyle::Hair => 100,
        BorderStyle::None => 0,
    }
}

/// Nominal stroke width in points before page scaling.
fn stroke_width(style: BorderStyle) -> f64 {
    match style {
        BorderStyle::None => 0.0,
        BorderStyle::Thin => 0.5,
        BorderStyle::Medium
        | BorderStyle::MediumDashed
        | BorderStyle::MediumDashDot
        | BorderStyle::MediumDashDotDot
        | BorderStyle::SlantDashDot => 1.5,
        BorderStyle::Thick => 2.5,
        _ => 1.0,
    }
}

/// Dash pattern for a border style; solid approximates anything unmapped.
fn dash(style: BorderStyle) -> DashStyle {
    match style {
        BorderStyle::Dotted | BorderStyle::Hair => DashStyle::Dot,
        BorderStyle::Dashed | BorderStyle::MediumDashed => DashStyle::Dash,
        BorderStyle::DashDot => DashStyle::DashDot,
        BorderStyle::MediumDashDot
        | BorderStyle::DashDotDot
        | BorderStyle::MediumDashDotDot
        | BorderStyle::SlantDashDot => DashStyle::DashDotDot,
        _ => DashStyle::Solid,
    }
}

/// Normalized-endpoint key; both declarations of a shared edge compute the
/// same running offsets, so their bits match exactly.
type EdgeKey = ((u64, u64), (u64, u64));

fn edge_key(x1: f64, y1: f64, x2: f64, y2: f64) -> EdgeKey {
    let min = (x1.min(x2).to_bits(), y1.min(y2).to_bits());
    let max = (x1.max(x2).to_bits(), y1.max(y2).to_bits());
    (min, max)
}

pub(crate) struct BorderRenderer<'a> {
    ws: &'a Worksheet,
    colors: ColorResolver<'a>,
    drawn: HashSet<EdgeKey>,
}

impl<'a> BorderRenderer<'a> {
    /// One renderer per page; the edge cache must not outlive it.
    pub(crate) fn new(ws: &'a Worksheet, colors: ColorResolver<'a>) -> Self {
        BorderRenderer {
            ws,
            colors,
            drawn: HashSet::new(),
        }
    }

    pub(crate) fn draw_cell(
        &mut self,
        gfx: &mut dyn VirtualGraphics,
        scaling: f64,
        info: &CellRenderInfo,
        cells: &[CellRenderInfo],
    ) {
        let Some(style) = self.ws.style(info.row, info.col) else {
            return;
        };

        let cell_at = |idx: Option<usize>| idx.and_then(|i| cells.get(i));
        let first = cell_at(info.merge_first);
        let last = cell_at(info.merge_last);

        // Interior sides of a merged range are suppressed; a side survives
        // only on the block's outer boundary.
        let guard_top = first.is_none_or(|f| f.row == info.row);
        let guard_left = first.is_none_or(|f| f.col == info.col);
        let guard_bottom = last.is_none_or(|l| l.row == info.row);
        let guard_right = last.is_none_or(|l| l.col == info.col);

        let (x, y, w, h) = (info.x, info.y, info.width, info.height);

        self.draw_side(gfx, scaling, info, style.border_top.as_ref(), Side::Top, (x, y, x + w, y), guard_top);
        self.draw_side(gfx, scaling, info, style.border_right.as_ref(), Side::Right, (x + w, y, x + w, y + h), guard_right);
        self.draw_side(gfx, scaling, info, style.border_bottom.as_ref(), Side::Bottom, (x + w, y + h, x, y + h), guard_bottom);
        self.draw_side(gfx, scaling, info, style.border_left.as_ref(), Side::Left, (x, y + h, x, y), guard_left);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_side(
        &mut self,
        gfx: &mut dyn VirtualGraphics,
        scaling: f64,
        info: &CellRenderInfo,
        border: Option<&Border>,
        side: Side,
        line: (f64, f64, f64, f64),
        guard: bool,
    ) {
        let Some(border) = border else { return };
        if !guard || border.style == BorderStyle::None {
            return;
        }
        if !self.wins_shared_edge(info.row, info.col, side, border.style) {
            return;
        }

        let color = border
            .color
            .as_ref()
            .and_then(|c| self.colors.resolve(c))
            .unwrap_or(Rgba::BLACK);
        let (x1, y1, x2, y2) = line;

        if border.style == BorderStyle::Double {
            // Two thin strokes with a thin-sized gap; a centered single
            // stroke would be swallowed by a neighbor's line.
            let thin = Pen {
                color,
                width: stroke_width(BorderStyle::Thin) * scaling,
                dash: DashStyle::Solid,
            };
            let offset = thin.width.max(0.7);
            match side {
                Side::Top | Side::Bottom => {
                    self.draw_cached(gfx, &thin, x1, y1 - offset, x2, y2 - offset);
                    self.draw_cached(gfx, &thin, x1, y1 + offset, x2, y2 + offset);
                }
                Side::Left | Side::Right => {
                    self.draw_cached(gfx, &thin, x1 - offset, y1, x2 - offset, y2);
                    self.draw_cached(gfx, &thin, x1 + offset, y1, x2 + offset, y2);
                }
            }
            return;
        }

        let pen = Pen {
            color,
            width: stroke_width(border.style) * scaling,
            dash: dash(border.style),
        };
        self.draw_cached(gfx, &pen, x1, y1, x2, y2);
    }

    fn draw_cached(
        &mut self,
        gfx: &mut dyn VirtualGraphics,
        pen: &Pen,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    ) {
        // Drawing the same segment twice darkens it on opacity-blending
        // sinks; skip repeats.
        if !self.drawn.insert(edge_key(x1, y1, x2, y2)) {
            return;
        }
        gfx.draw_line(pen, x1, y1, x2, y2);
    }

    /// The mirrored edge declared by the neighbor across this side.
    fn neighbor_style(&self, row: u32, col: u32, side: Side) -> BorderStyle {
        let mirrored = |r: u32, c: u32, pick: fn(&crate::types::Style) -> Option<&Border>| {
            self.ws
                .style(r, c)
                .and_then(pick)
                .map_or(BorderStyle::None, |b| b.style)
        };

        match side {
            Side::Left if col > 1 => mirrored(row, col - 1, |s| s.border_right.as_ref()),
            Side::Right => mirrored(row, col + 1, |s| s.border_left.as_ref()),
            Side::Top if row > 1 => mirrored(row - 1, col, |s| s.border_bottom.as_ref()),
            Side::Bottom => mirrored(row + 1, col, |s| s.border_top.as_ref()),
            // Sheet boundary: no neighbor, nothing to lose against.
            _ => BorderStyle::None,
        }
    }

    fn wins_shared_edge(&self, row: u32, col: u32, side: Side, style: BorderStyle) -> bool {
        let mine = rank(style);
        let theirs = rank(self.neighbor_style(row, col, side));

        if mine != theirs {
            return mine > theirs;
        }
        // Tie: only the Right/Bottom owner draws, so the edge lands once.
        matches!(side, Side::Right | Side::Bottom)
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

    #[test]
    fn test_rank_ordering() {
        assert!(rank(BorderStyle::Double) > rank(BorderStyle::Thick));
        assert!(rank(BorderStyle::Thick) > rank(BorderStyle::Medium));
        assert!(rank(BorderStyle::Medium) > rank(BorderStyle::Thin));
        assert_eq!(rank(BorderStyle::Thin), rank(BorderStyle::Dashed));
        assert!(rank(BorderStyle::Thin) > rank(BorderStyle::Hair));
        assert!(rank(BorderStyle::Hair) > rank(BorderStyle::None));
    }

    #[test]
    fn test_stroke_width_table() {
        assert_eq!(stroke_width(BorderStyle::None), 0.0);
        assert_eq!(stroke_width(BorderStyle::Thin), 0.5);
        assert_eq!(stroke_width(BorderStyle::Medium), 1.5);
        assert_eq!(stroke_width(BorderStyle::Thick), 2.5);
    }

    #[test]
    fn test_dash_fallback_is_solid() {
        assert_eq!(dash(BorderStyle::Medium), DashStyle::Solid);
        assert_eq!(dash(BorderStyle::Double), DashStyle::Solid);
        assert_eq!(dash(BorderStyle::Dotted), DashStyle::Dot);
        assert_eq!(dash(BorderStyle::DashDot), DashStyle::DashDot);
    }

    #[test]
    fn test_edge_key_normalizes_direction() {
        assert_eq!(edge_key(0.0, 10.0, 5.0, 10.0), edge_key(5.0, 10.0, 0.0, 10.0));
    }
}

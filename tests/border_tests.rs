//! Border precedence and suppression tests, observed as recorded line
//! commands.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod fixtures;

use fixtures::{box_border, drawn_lines, render_one, zero_margins, SheetBuilder};
use sheetpress::render::DashStyle;
use sheetpress::types::{Border, BorderStyle, Cell, ColorSpec, Style};

fn bordered(border: Style, text: &str) -> Cell {
    Cell::text(text).with_style(border)
}

fn right_border(style: BorderStyle) -> Style {
    Style {
        border_right: Some(Border::new(style)),
        ..Style::default()
    }
}

fn left_border(style: BorderStyle) -> Style {
    Style {
        border_left: Some(Border::new(style)),
        ..Style::default()
    }
}

// ============================================================================
// TIE-BREAKING ON SHARED EDGES
// ============================================================================

#[test]
fn test_equal_rank_shared_edge_draws_once() {
    // Both neighbors declare the shared edge as thin; exactly one segment
    // may land, owned by the left cell's Right side.
    let ws = SheetBuilder::new("Sheet1")
        .col_width_pt(1, 50.0)
        .col_width_pt(2, 50.0)
        .row_height_pt(1, 20.0)
        .cell(1, 1, bordered(right_border(BorderStyle::Thin), "a"))
        .cell(1, 2, bordered(left_border(BorderStyle::Thin), "b"))
        .setup(zero_margins)
        .build();

    let document = render_one(ws);
    let lines = drawn_lines(&document.pages()[0]);
    assert_eq!(lines.len(), 1);

    let (pen, from, to) = &lines[0];
    assert_eq!(pen.width, 0.5);
    // Vertical segment on the shared boundary at x = 50.
    assert!((from.0 - 50.0).abs() < 1e-9);
    assert!((to.0 - 50.0).abs() < 1e-9);
    assert!((from.1 - 0.0).abs() < 1e-9);
    assert!((to.1 - 20.0).abs() < 1e-9);
}

#[test]
fn test_higher_rank_neighbor_wins_shared_edge() {
    // Left cell says thin, right cell says medium: only the medium edge
    // draws.
    let ws = SheetBuilder::new("Sheet1")
        .col_width_pt(1, 50.0)
        .col_width_pt(2, 50.0)
        .row_height_pt(1, 20.0)
        .cell(1, 1, bordered(right_border(BorderStyle::Thin), "a"))
        .cell(1, 2, bordered(left_border(BorderStyle::Medium), "b"))
        .setup(zero_margins)
        .build();

    let document = render_one(ws);
    let lines = drawn_lines(&document.pages()[0]);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].0.width, 1.5);
}

#[test]
fn test_boundary_cell_with_no_neighbor_draws() {
    // A lone cell with a thin box: all four sides survive.
    let ws = SheetBuilder::new("Sheet1")
        .col_width_pt(1, 50.0)
        .row_height_pt(1, 20.0)
        .cell(1, 1, bordered(box_border(BorderStyle::Thin), "x"))
        .setup(zero_margins)
        .build();

    let document = render_one(ws);
    assert_eq!(drawn_lines(&document.pages()[0]).len(), 4);
}

// ============================================================================
// DOUBLE BORDERS
// ============================================================================

#[test]
fn test_double_border_is_two_parallel_strokes() {
    let style = Style {
        border_top: Some(Border::new(BorderStyle::Double)),
        ..Style::default()
    };
    let ws = SheetBuilder::new("Sheet1")
        .col_width_pt(1, 50.0)
        .row_height_pt(1, 20.0)
        .cell(1, 1, bordered(style, "x"))
        .setup(zero_margins)
        .build();

    let document = render_one(ws);
    let lines = drawn_lines(&document.pages()[0]);
    assert_eq!(lines.len(), 2, "double renders as exactly two strokes");

    // Strokes sit at nominal ± max(thin width, 0.7); never on the nominal
    // y = 0 itself.
    let ys: Vec<f64> = lines.iter().map(|(_, from, _)| from.1).collect();
    assert!(ys.contains(&-0.7));
    assert!(ys.contains(&0.7));
    for (pen, _, _) in &lines {
        assert_eq!(pen.width, 0.5);
        assert_eq!(pen.dash, DashStyle::Solid);
    }
}

#[test]
fn test_double_beats_every_single_style() {
    let ws = SheetBuilder::new("Sheet1")
        .col_width_pt(1, 50.0)
        .col_width_pt(2, 50.0)
        .row_height_pt(1, 20.0)
        .cell(1, 1, bordered(right_border(BorderStyle::Double), "a"))
        .cell(1, 2, bordered(left_border(BorderStyle::Thick), "b"))
        .setup(zero_margins)
        .build();

    let document = render_one(ws);
    let lines = drawn_lines(&document.pages()[0]);
    // The double side wins and contributes its two thin strokes.
    assert_eq!(lines.len(), 2);
    for (pen, _, _) in &lines {
        assert_eq!(pen.width, 0.5);
    }
}

// ============================================================================
// MERGE SUPPRESSION
// ============================================================================

#[test]
fn test_merge_interior_edges_are_suppressed() {
    // Both covered cells carry a full box; the interior vertical edge
    // between them must not draw.
    let ws = SheetBuilder::new("Sheet1")
        .col_width_pt(1, 50.0)
        .col_width_pt(2, 50.0)
        .row_height_pt(1, 20.0)
        .cell(1, 1, bordered(box_border(BorderStyle::Thin), "m"))
        .cell(1, 2, bordered(box_border(BorderStyle::Thin), ""))
        .merge(1, 1, 1, 2)
        .setup(zero_margins)
        .build();

    let document = render_one(ws);
    let lines = drawn_lines(&document.pages()[0]);

    // Outer boundary: two tops, two bottoms, one left, one right.
    assert_eq!(lines.len(), 6);
    for (_, from, to) in &lines {
        let is_interior_vertical =
            (from.0 - 50.0).abs() < 1e-9 && (to.0 - 50.0).abs() < 1e-9;
        assert!(!is_interior_vertical, "interior merge edge was drawn");
    }
}

// ============================================================================
// PENS AND DEDUPLICATION
// ============================================================================

#[test]
fn test_dash_styles_reach_the_pen() {
    let ws = SheetBuilder::new("Sheet1")
        .col_width_pt(1, 50.0)
        .row_height_pt(1, 20.0)
        .cell(
            1,
            1,
            bordered(
                Style {
                    border_top: Some(Border::new(BorderStyle::Dotted)),
                    ..Style::default()
                },
                "x",
            ),
        )
        .setup(zero_margins)
        .build();

    let document = render_one(ws);
    let lines = drawn_lines(&document.pages()[0]);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].0.dash, DashStyle::Dot);
    assert_eq!(lines[0].0.width, 1.0);
}

#[test]
fn test_pen_width_scales_with_page() {
    let ws = SheetBuilder::new("Sheet1")
        .col_width_pt(1, 50.0)
        .row_height_pt(1, 20.0)
        .cell(
            1,
            1,
            bordered(
                Style {
                    border_top: Some(Border::new(BorderStyle::Thick)),
                    ..Style::default()
                },
                "x",
            ),
        )
        .setup(|s| {
            zero_margins(s);
            s.scale = 50;
        })
        .build();

    let document = render_one(ws);
    let lines = drawn_lines(&document.pages()[0]);
    assert_eq!(lines[0].0.width, 1.25);
}

#[test]
fn test_border_color_resolves_or_defaults_to_black() {
    let style = Style {
        border_top: Some(Border {
            style: BorderStyle::Thin,
            color: Some(ColorSpec::argb("FFFF0000")),
        }),
        border_bottom: Some(Border::new(BorderStyle::Thin)),
        ..Style::default()
    };
    let ws = SheetBuilder::new("Sheet1")
        .col_width_pt(1, 50.0)
        .row_height_pt(1, 20.0)
        .cell(1, 1, bordered(style, "x"))
        .setup(zero_margins)
        .build();

    let document = render_one(ws);
    let lines = drawn_lines(&document.pages()[0]);
    assert_eq!(lines.len(), 2);

    let top = lines.iter().find(|(_, from, _)| from.1 == 0.0).unwrap();
    assert_eq!(top.0.color, sheetpress::Rgba::opaque(255, 0, 0));
    let bottom = lines.iter().find(|(_, from, _)| from.1 != 0.0).unwrap();
    assert_eq!(bottom.0.color, sheetpress::Rgba::BLACK);
}

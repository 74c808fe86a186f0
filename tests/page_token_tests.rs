//! Dynamic page token tests: `#Page`, `#PageCount` and `#PageOf` resolution
//! across single- and multi-page documents.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod fixtures;

use fixtures::{book_of, drawn_texts, render_one, zero_margins, SheetBuilder};
use sheetpress::render::{RecordingDocument, Renderer};
use sheetpress::types::Worksheet;

/// A sheet with `rows` single-row pages, each carrying `token` in column 1.
fn token_sheet(rows: u32, token: &str) -> Worksheet {
    let mut builder = SheetBuilder::new("Sheet1").setup(zero_margins);
    for row in 1..=rows {
        builder = builder.text(row, 1, token);
    }
    let mut ws = builder.build();
    ws.page_setup.row_breaks = (1..rows).collect();
    ws
}

#[test]
fn test_page_count_on_single_page_renders_one() {
    let document = render_one(token_sheet(1, "#PageCount"));
    assert_eq!(document.pages().len(), 1);
    assert_eq!(drawn_texts(&document.pages()[0]), vec!["1"]);
}

#[test]
fn test_page_count_renders_total_on_every_page() {
    let document = render_one(token_sheet(3, "#PageCount"));
    assert_eq!(document.pages().len(), 3);
    for page in document.pages() {
        assert_eq!(drawn_texts(page), vec!["3"]);
    }
}

#[test]
fn test_page_of_renders_current_over_total() {
    let document = render_one(token_sheet(3, "#PageOf(/)"));
    let texts: Vec<Vec<String>> = document.pages().iter().map(drawn_texts).collect();
    assert_eq!(texts, vec![vec!["1/3"], vec!["2/3"], vec!["3/3"]]);
}

#[test]
fn test_page_of_custom_separator() {
    let document = render_one(token_sheet(2, "#PageOf( of )"));
    assert_eq!(drawn_texts(&document.pages()[0]), vec!["1 of 2"]);
    assert_eq!(drawn_texts(&document.pages()[1]), vec!["2 of 2"]);
}

#[test]
fn test_page_token_resolves_immediately() {
    let document = render_one(token_sheet(3, "#Page"));
    let texts: Vec<Vec<String>> = document.pages().iter().map(drawn_texts).collect();
    assert_eq!(texts, vec![vec!["1"], vec!["2"], vec!["3"]]);
}

#[test]
fn test_token_literal_never_appears() {
    let document = render_one(token_sheet(2, "#PageCount"));
    for page in document.pages() {
        assert!(!drawn_texts(page).iter().any(|t| t.contains('#')));
    }
}

#[test]
fn test_token_requires_exact_full_text() {
    // Embedded or multi-line occurrences draw literally.
    let ws = SheetBuilder::new("Sheet1")
        .col_width_pt(1, 120.0)
        .row_height_pt(1, 20.0)
        .text(1, 1, "Page #PageCount")
        .text(2, 1, "#PageCount\nmore")
        .setup(zero_margins)
        .build();

    let document = render_one(ws);
    let texts = drawn_texts(&document.pages()[0]);
    assert!(texts.contains(&"Page #PageCount".to_string()));
    assert!(texts.contains(&"#PageCount".to_string()));
    assert!(texts.contains(&"more".to_string()));
}

#[test]
fn test_page_count_spans_sheets() {
    // The total is document-wide: a count recorded on sheet 1 sees sheet 2's
    // pages.
    let first = token_sheet(1, "#PageCount");
    let second = SheetBuilder::new("Sheet2")
        .text(1, 1, "data")
        .setup(zero_margins)
        .build();

    let book = book_of(vec![first, second]);
    let mut document = RecordingDocument::new();
    Renderer::new(&book).render_to(&mut document).unwrap();

    assert_eq!(document.pages().len(), 2);
    assert_eq!(drawn_texts(&document.pages()[0]), vec!["2"]);
}

//! Paper size mapping.
//!
//! Maps the page setup's numeric paper-size code (ECMA-376 §18.18.50) to
//! physical point dimensions. Codes without a mapping fall back to A4 so a
//! conversion never aborts on an exotic printer driver code.

use crate::units::{inch_to_point, mm_to_point};

/// Portrait (width, height) in points for a paper-size code.
pub fn paper_dimensions(code: u32) -> (f64, f64) {
    match code {
        // US sizes (inches)
        1 | 2 | 18 => inches(8.5, 11.0),     // Letter / Letter small / Note
        3 | 17 => inches(11.0, 17.0),        // Tabloid / 11x17
        4 => inches(17.0, 11.0),             // Ledger
        5 => inches(8.5, 14.0),              // Legal
        6 => inches(5.5, 8.5),               // Statement
        7 => inches(7.25, 10.5),             // Executive
        14 => inches(8.5, 13.0),             // Folio
        16 => inches(10.0, 14.0),            // 10x14
        39 => inches(14.875, 11.0),          // US fanfold
        40 => inches(8.5, 12.0),             // German std fanfold
        41 => inches(8.5, 13.0),             // German legal fanfold

        // ISO/JIS sizes (millimeters)
        66 => millimeters(420.0, 594.0),     // A2
        8 | 63 => millimeters(297.0, 420.0), // A3 / A3 extra
        9 | 10 => millimeters(210.0, 297.0), // A4 / A4 small
        60 => millimeters(210.0, 330.0),     // A4 plus
        11 => millimeters(148.0, 210.0),     // A5
        12 => millimeters(257.0, 364.0),     // B4 (JIS)
        13 => millimeters(182.0, 257.0),     // B5 (JIS)
        15 => millimeters(215.0, 275.0),     // Quarto

        // Envelopes and postcards
        19 => inches(3.875, 8.875),          // Envelope #9
        20 => inches(4.125, 9.5),            // Envelope #10
        21 => inches(4.5, 10.375),           // Envelope #11
        22 => inches(4.75, 11.0),            // Envelope #12
        23 => inches(5.0, 11.5),             // Envelope #14
        27 => millimeters(110.0, 220.0),     // Envelope DL
        28 => millimeters(162.0, 229.0),     // Envelope C5
        29 => millimeters(324.0, 458.0),     // Envelope C3
        30 => millimeters(229.0, 324.0),     // Envelope C4
        31 => millimeters(114.0, 162.0),     // Envelope C6
        32 => millimeters(114.0, 229.0),     // Envelope C65
        33 => millimeters(250.0, 353.0),     // Envelope B4
        34 => millimeters(176.0, 250.0),     // Envelope B5
        35 => millimeters(176.0, 125.0),     // Envelope B6
        36 => millimeters(110.0, 230.0),     // Envelope Italy
        37 => inches(3.875, 7.5),            // Envelope Monarch
        38 => inches(3.625, 6.5),            // Envelope 6 3/4
        43 => millimeters(200.0, 148.0),     // Japanese double postcard

        // Architectural C/D/E (inches)
        24 => inches(17.0, 22.0),
        25 => inches(22.0, 34.0),
        26 => inches(34.0, 44.0),

        other => {
            log::warn!("unmapped paper size code {other}, falling back to A4");
            millimeters(210.0, 297.0)
        }
    }
}

fn inches(w: f64, h: f64) -> (f64, f64) {
    (inch_to_point(w), inch_to_point(h))
}

fn millimeters(w: f64, h: f64) -> (f64, f64) {
    (mm_to_point(w), mm_to_point(h))
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
    fn test_letter() {
        let (w, h) = paper_dimensions(1);
        assert_eq!(w, 612.0);
        assert_eq!(h, 792.0);
    }

    #[test]
    fn test_a4() {
        let (w, h) = paper_dimensions(9);
        assert!((w - 595.2755905511811).abs() < 1e-9);
        assert!((h - 841.8897637795276).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_code_falls_back_to_a4() {
        assert_eq!(paper_dimensions(9999), paper_dimensions(9));
    }
}

//! Unit conversions between sheet-native units and points.
//!
//! Column widths are expressed in characters of the default font and go
//! through the spreadsheet's character→pixel formula before the 72/96
//! pixel→point conversion. Row heights are already points and need no
//! conversion.

/// Maximum digit width (MDW) of the default font, in pixels.
/// 8 matches the common Calibri 11 rendering.
const MAX_DIGIT_WIDTH: f64 = 8.0;

/// Points per inch.
const POINTS_PER_INCH: f64 = 72.0;

/// Screen pixels per inch assumed by the character-width formula.
const PIXELS_PER_INCH: f64 = 96.0;

/// Left+right cell padding in pixels: `2*ceil(MDW/4)+1`.
fn cell_padding_px() -> f64 {
    2.0 * (MAX_DIGIT_WIDTH / 4.0).ceil() + 1.0
}

pub fn pixel_to_point(px: f64) -> f64 {
    px * (POINTS_PER_INCH / PIXELS_PER_INCH)
}

pub fn point_to_pixel(pt: f64) -> f64 {
    pt * (PIXELS_PER_INCH / POINTS_PER_INCH)
}

pub fn inch_to_point(inch: f64) -> f64 {
    inch * POINTS_PER_INCH
}

pub fn mm_to_point(mm: f64) -> f64 {
    mm * POINTS_PER_INCH / 25.4
}

/// Character-count column width → pixels.
///
/// Below one character the mapping is linear over the padded glyph cell;
/// from one character up, the width is first rounded to 1/256 of a character
/// the way the spreadsheet stores it.
pub fn column_width_to_pixel(width: f64) -> f64 {
    let padding = cell_padding_px();

    if width < 1.0 {
        return width * (MAX_DIGIT_WIDTH + padding);
    }

    let noc256 = (256.0 * width + (128.0 / MAX_DIGIT_WIDTH).round()) / 256.0;
    noc256 * MAX_DIGIT_WIDTH + padding
}

/// Character-count column width → points.
pub fn column_width_to_point(width: f64) -> f64 {
    pixel_to_point(column_width_to_pixel(width))
}

/// Inverse of [`column_width_to_point`], used to express physical layouts
/// back in sheet units. Round-trips within ±0.01 characters.
pub fn point_to_column_width(pt: f64) -> f64 {
    let padding = cell_padding_px();
    let px = point_to_pixel(pt);

    if px < MAX_DIGIT_WIDTH + padding {
        return px / (MAX_DIGIT_WIDTH + padding);
    }

    (px - padding) / MAX_DIGIT_WIDTH - (128.0 / MAX_DIGIT_WIDTH).round() / 256.0
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
    fn test_pixel_point_ratio() {
        assert_eq!(pixel_to_point(96.0), 72.0);
        assert_eq!(point_to_pixel(72.0), 96.0);
    }

    #[test]
    fn test_inch_and_mm() {
        assert_eq!(inch_to_point(1.0), 72.0);
        assert!((mm_to_point(210.0) - 595.2755905511811).abs() < 1e-9);
    }

    #[test]
    fn test_default_column_width_pixels() {
        // 8.43 characters is the common default width; the formula lands a
        // hair under 73 pixels.
        let px = column_width_to_pixel(8.43);
        assert!((px - 72.94).abs() < 0.1, "got {px}");
    }

    #[test]
    fn test_narrow_column_is_linear() {
        assert_eq!(column_width_to_pixel(0.5), 0.5 * 13.0);
        assert_eq!(column_width_to_pixel(0.0), 0.0);
    }

    #[test_case(0.3)]
    #[test_case(0.9)]
    #[test_case(1.0)]
    #[test_case(8.43)]
    #[test_case(12.0)]
    #[test_case(60.0)]
    #[test_case(255.0)]
    fn test_round_trip_within_tolerance(width: f64) {
        let pt = column_width_to_point(width);
        let back = point_to_column_width(pt);
        assert!(
            (back - width).abs() <= 0.01,
            "width {width} round-tripped to {back}"
        );
    }

    #[test]
    fn test_inverse_targets_exact_points() {
        // Setting a column from a physical size must reproduce that size.
        let chars = point_to_column_width(50.0);
        assert!((column_width_to_point(chars) - 50.0).abs() < 1e-9);
    }
}

//! Color resolution utilities
//!
//! Handles theme colors, indexed colors, direct ARGB, and tint/shade
//! calculations. Resolution priority: direct ARGB > theme > indexed > auto.
//! A `None` result means "no color": callers skip the fill instead of
//! substituting a default.

use crate::types::{ColorSpec, Theme};

/// Backend-neutral color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);

    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Rgba { a, r, g, b }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Rgba { a: 255, r, g, b }
    }

    /// Build an opaque color from a packed `0xRRGGBB` value.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_rgb(rgb: u32) -> Self {
        Rgba {
            a: 255,
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
        }
    }
}

/// The spreadsheet legacy 64-entry indexed palette.
pub const INDEXED_COLORS: [u32; 64] = [
    0x000000, 0xFFFFFF, 0xFF0000, 0x00FF00, 0x0000FF, 0xFFFF00, 0xFF00FF, 0x00FFFF,
    0x000000, 0xFFFFFF, 0xFF0000, 0x00FF00, 0x0000FF, 0xFFFF00, 0xFF00FF, 0x00FFFF,
    0x800000, 0x008000, 0x000080, 0x808000, 0x800080, 0x008080, 0xC0C0C0, 0x808080,
    0x9999FF, 0x993366, 0xFFFFCC, 0xCCFFFF, 0x660066, 0xFF8080, 0x0066CC, 0xCCCCFF,
    0x000080, 0xFF00FF, 0xFFFF00, 0x00FFFF, 0x800080, 0x800000, 0x008080, 0x0000FF,
    0x00CCFF, 0xCCFFFF, 0xCCFFCC, 0xFFFF99, 0x99CCFF, 0xFF99CC, 0xCC99FF, 0xFFCC99,
    0x3366FF, 0x33CCCC, 0x99CC00, 0xFFCC00, 0xFF9900, 0xFF6600, 0x666699, 0x969696,
    0x003366, 0x339966, 0x003300, 0x333300, 0x993300, 0x993366, 0x333399, 0x333333,
];

/// Default theme palette (standard Office theme) used when the document theme
/// lacks a slot. Indices: 0 lt1, 1 dk1, 2 lt2, 3 dk2, 4-9 accent1-6,
/// 10 hlink, 11 folHlink.
pub const DEFAULT_THEME_COLORS: [u32; 12] = [
    0xFFFFFF, // 0: lt1 (Background 1)
    0x000000, // 1: dk1 (Text 1)
    0xE7E6E6, // 2: lt2 (Background 2)
    0x44546A, // 3: dk2 (Text 2)
    0x4472C4, // 4: accent1
    0xED7D31, // 5: accent2
    0xA5A5A5, // 6: accent3
    0xFFC000, // 7: accent4
    0x5B9BD5, // 8: accent5
    0x70AD47, // 9: accent6
    0x0563C1, // 10: hlink
    0x954F72, // 11: folHlink
];

/// Resolves `ColorSpec`s against a document theme.
#[derive(Debug, Clone, Copy)]
pub struct ColorResolver<'a> {
    theme: &'a Theme,
}

impl<'a> ColorResolver<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        ColorResolver { theme }
    }

    /// Resolve a `ColorSpec` to an absolute color, or `None` for "no color".
    pub fn resolve(&self, color: &ColorSpec) -> Option<Rgba> {
        if let Some(argb) = &color.argb {
            let parsed = parse_argb(argb)?;
            // Fully transparent counts as "no color".
            if parsed.a == 0 {
                return None;
            }
            return Some(parsed);
        }

        if let Some(theme_idx) = color.theme {
            let idx = theme_idx as usize;
            let base = self
                .theme
                .colors
                .get(idx)
                .copied()
                .or_else(|| DEFAULT_THEME_COLORS.get(idx).copied().map(Rgba::from_rgb))?;

            if let Some(tint) = color.tint {
                return Some(apply_tint(base, tint));
            }
            return Some(base);
        }

        if let Some(indexed) = color.indexed {
            if indexed == 64 {
                // 64 is "system foreground" - usually black
                return Some(Rgba::BLACK);
            }
            return INDEXED_COLORS
                .get(indexed as usize)
                .copied()
                .map(Rgba::from_rgb);
        }

        if color.auto {
            return Some(Rgba::BLACK);
        }

        None
    }
}

/// Apply a tint value to a color, per channel; alpha is untouched.
/// tint < 0: shade linearly toward black
/// tint > 0: tint linearly toward white
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn apply_tint(color: Rgba, tint: f64) -> Rgba {
    let channel = |c: u8| -> u8 {
        let c = f64::from(c);
        let out = if tint < 0.0 {
            c * (1.0 + tint)
        } else {
            tint * (255.0 - c) + c
        };
        out.round().clamp(0.0, 255.0) as u8
    };

    Rgba {
        a: color.a,
        r: channel(color.r),
        g: channel(color.g),
        b: channel(color.b),
    }
}

/// Parse an `AARRGGBB` / `RRGGBB` hex string (optional leading `#`).
fn parse_argb(src: &str) -> Option<Rgba> {
    let hex = src.trim_start_matches('#');
    let byte = |range: std::ops::Range<usize>| -> Option<u8> {
        hex.get(range).and_then(|s| u8::from_str_radix(s, 16).ok())
    };

    match hex.len() {
        8 => Some(Rgba {
            a: byte(0..2)?,
            r: byte(2..4)?,
            g: byte(4..6)?,
            b: byte(6..8)?,
        }),
        6 => Some(Rgba {
            a: 255,
            r: byte(0..2)?,
            g: byte(2..4)?,
            b: byte(4..6)?,
        }),
        _ => None,
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
    use crate::types::Theme;

    fn spec() -> ColorSpec {
        ColorSpec::default()
    }

    fn office_theme() -> Theme {
        Theme {
            colors: DEFAULT_THEME_COLORS.iter().map(|&c| Rgba::from_rgb(c)).collect(),
        }
    }

    #[test]
    fn test_tint_lighten() {
        // 50% tint on black should give mid gray
        let result = apply_tint(Rgba::BLACK, 0.5);
        assert_eq!(result, Rgba::opaque(128, 128, 128));
    }

    #[test]
    fn test_tint_darken() {
        // 50% shade on white should give mid gray
        let result = apply_tint(Rgba::opaque(255, 255, 255), -0.5);
        assert_eq!(result, Rgba::opaque(128, 128, 128));
    }

    #[test]
    fn test_tint_preserves_alpha() {
        let result = apply_tint(Rgba::new(40, 0, 0, 0), 0.5);
        assert_eq!(result.a, 40);
    }

    #[test]
    fn test_resolve_argb_opaque() {
        let theme = office_theme();
        let resolver = ColorResolver::new(&theme);
        let color = ColorSpec {
            argb: Some("FFFFFF00".to_string()),
            ..spec()
        };
        assert_eq!(resolver.resolve(&color), Some(Rgba::opaque(255, 255, 0)));
    }

    #[test]
    fn test_resolve_argb_six_digit() {
        let theme = office_theme();
        let resolver = ColorResolver::new(&theme);
        let color = ColorSpec {
            argb: Some("#FF0000".to_string()),
            ..spec()
        };
        assert_eq!(resolver.resolve(&color), Some(Rgba::opaque(255, 0, 0)));
    }

    #[test]
    fn test_resolve_argb_transparent_is_no_color() {
        let theme = office_theme();
        let resolver = ColorResolver::new(&theme);
        let color = ColorSpec {
            argb: Some("0000FF00".to_string()),
            ..spec()
        };
        assert_eq!(resolver.resolve(&color), None);
    }

    #[test]
    fn test_resolve_theme_accent1() {
        let theme = office_theme();
        let resolver = ColorResolver::new(&theme);
        let color = ColorSpec {
            theme: Some(4),
            ..spec()
        };
        assert_eq!(resolver.resolve(&color), Some(Rgba::from_rgb(0x4472C4)));
    }

    #[test]
    fn test_resolve_theme_with_tint_on_black() {
        let theme = office_theme();
        let resolver = ColorResolver::new(&theme);
        let color = ColorSpec {
            theme: Some(1), // dk1 = black
            tint: Some(0.5),
            ..spec()
        };
        assert_eq!(resolver.resolve(&color), Some(Rgba::opaque(128, 128, 128)));
    }

    #[test]
    fn test_empty_theme_uses_default_palette() {
        let theme = Theme { colors: Vec::new() };
        let resolver = ColorResolver::new(&theme);
        let color = ColorSpec {
            theme: Some(9), // accent6
            ..spec()
        };
        assert_eq!(resolver.resolve(&color), Some(Rgba::from_rgb(0x70AD47)));
    }

    #[test]
    fn test_invalid_theme_index() {
        let theme = office_theme();
        let resolver = ColorResolver::new(&theme);
        let color = ColorSpec {
            theme: Some(100),
            ..spec()
        };
        assert_eq!(resolver.resolve(&color), None);
    }

    #[test]
    fn test_resolve_indexed_common() {
        let theme = office_theme();
        let resolver = ColorResolver::new(&theme);
        let cases = [
            (0, Rgba::BLACK),
            (1, Rgba::opaque(255, 255, 255)),
            (2, Rgba::opaque(255, 0, 0)),
            (5, Rgba::opaque(255, 255, 0)),
            (22, Rgba::opaque(192, 192, 192)),
        ];
        for (indexed, expected) in cases {
            let color = ColorSpec {
                indexed: Some(indexed),
                ..spec()
            };
            assert_eq!(resolver.resolve(&color), Some(expected), "indexed {indexed}");
        }
    }

    #[test]
    fn test_resolve_indexed_64_system_foreground() {
        let theme = office_theme();
        let resolver = ColorResolver::new(&theme);
        let color = ColorSpec {
            indexed: Some(64),
            ..spec()
        };
        assert_eq!(resolver.resolve(&color), Some(Rgba::BLACK));
    }

    #[test]
    fn test_resolve_indexed_out_of_range() {
        let theme = office_theme();
        let resolver = ColorResolver::new(&theme);
        let color = ColorSpec {
            indexed: Some(100),
            ..spec()
        };
        assert_eq!(resolver.resolve(&color), None);
    }

    #[test]
    fn test_priority_argb_over_theme() {
        let theme = office_theme();
        let resolver = ColorResolver::new(&theme);
        let color = ColorSpec {
            argb: Some("FFFF0000".to_string()),
            theme: Some(4),
            ..spec()
        };
        assert_eq!(resolver.resolve(&color), Some(Rgba::opaque(255, 0, 0)));
    }

    #[test]
    fn test_priority_theme_over_indexed() {
        let theme = office_theme();
        let resolver = ColorResolver::new(&theme);
        let color = ColorSpec {
            theme: Some(4),
            indexed: Some(2),
            ..spec()
        };
        assert_eq!(resolver.resolve(&color), Some(Rgba::from_rgb(0x4472C4)));
    }

    #[test]
    fn test_resolve_auto_defaults_to_black() {
        let theme = office_theme();
        let resolver = ColorResolver::new(&theme);
        let color = ColorSpec {
            auto: true,
            ..spec()
        };
        assert_eq!(resolver.resolve(&color), Some(Rgba::BLACK));
    }

    #[test]
    fn test_empty_spec_is_no_color() {
        let theme = office_theme();
        let resolver = ColorResolver::new(&theme);
        assert_eq!(resolver.resolve(&spec()), None);
    }
}

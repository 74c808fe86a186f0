use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::Deref;
use std::sync::Arc;

/// A color reference as the document stores it: direct ARGB, theme slot with
/// optional tint, legacy indexed, or "automatic".
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ColorSpec {
    /// `AARRGGBB` or `RRGGBB` hex, optional leading `#`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub argb: Option<String>,
    /// Theme palette slot (0-11; 4-9 are the accents).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<u32>,
    /// Lighten (>0) / darken (<0) factor applied to the theme color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tint: Option<f64>,
    /// Legacy 64-entry palette index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexed: Option<u32>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub auto: bool,
}

impl ColorSpec {
    pub fn argb(hex: &str) -> Self {
        ColorSpec {
            argb: Some(hex.to_string()),
            ..ColorSpec::default()
        }
    }

    pub fn theme(slot: u32, tint: Option<f64>) -> Self {
        ColorSpec {
            theme: Some(slot),
            tint,
            ..ColorSpec::default()
        }
    }

    pub fn indexed(index: u32) -> Self {
        ColorSpec {
            indexed: Some(index),
            ..ColorSpec::default()
        }
    }
}

/// Resolved cell style.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    // Font
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_color: Option<ColorSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<UnderlineStyle>,

    // Fill (solid background)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<ColorSpec>,

    // Borders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_top: Option<Border>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_right: Option<Border>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_bottom: Option<Border>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_left: Option<Border>,

    // Alignment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_h: Option<HAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_v: Option<VAlign>,
    /// Text rotation: 0-180 per the sheet convention, or 255 for stacked
    /// vertical text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<u16>,

    /// Number format string; `;;;` suppresses the cell entirely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_format: Option<String>,
}

/// Shared style handle; merged ranges and styled columns reuse one `Style`.
#[derive(Debug, Clone)]
pub struct StyleRef(pub Arc<Style>);

impl StyleRef {
    pub fn new(style: Style) -> Self {
        StyleRef(Arc::new(style))
    }
}

impl Deref for StyleRef {
    type Target = Style;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Style> for StyleRef {
    fn from(style: Style) -> Self {
        StyleRef(Arc::new(style))
    }
}

impl Serialize for StyleRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for StyleRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let style = Style::deserialize(deserializer)?;
        Ok(Self(Arc::new(style)))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Border {
    pub style: BorderStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorSpec>,
}

impl Border {
    pub fn new(style: BorderStyle) -> Self {
        Border { style, color: None }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum BorderStyle {
    #[default]
    None,
    Thin,
    Medium,
    Thick,
    Dashed,
    Dotted,
    Double,
    Hair,
    MediumDashed,
    DashDot,
    MediumDashDot,
    DashDotDot,
    MediumDashDotDot,
    SlantDashDot,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum HAlign {
    General,
    Left,
    Center,
    Right,
    Fill,
    Justify,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum VAlign {
    Top,
    Center,
    Bottom,
    Justify,
    Distributed,
}

/// Underline style for font formatting.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum UnderlineStyle {
    Single,
    Double,
    SingleAccounting,
    DoubleAccounting,
    None,
}

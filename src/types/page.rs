use serde::{Deserialize, Serialize};

use crate::paper::paper_dimensions;

/// Page margins in inches.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub header: f64,
    pub footer: f64,
}

impl Default for Margins {
    /// The spreadsheet application's "Normal" margin preset.
    fn default() -> Self {
        Margins {
            left: 0.7,
            right: 0.7,
            top: 0.75,
            bottom: 0.75,
            header: 0.3,
            footer: 0.3,
        }
    }
}

impl Margins {
    pub fn zero() -> Self {
        Margins {
            left: 0.0,
            right: 0.0,
            top: 0.0,
            bottom: 0.0,
            header: 0.0,
            footer: 0.0,
        }
    }

    pub fn uniform(inches: f64) -> Self {
        Margins {
            left: inches,
            right: inches,
            top: inches,
            bottom: inches,
            header: 0.0,
            footer: 0.0,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Print settings for one sheet.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageSetup {
    #[serde(default)]
    pub margins: Margins,
    /// Paper size code (e.g. 1=Letter, 9=A4); `None` means A4.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper_size: Option<u32>,
    #[serde(default)]
    pub orientation: Orientation,
    /// Print scale percentage; 0 is treated as 100.
    #[serde(default = "default_scale")]
    pub scale: u32,
    #[serde(default)]
    pub center_horizontally: bool,
    #[serde(default)]
    pub center_vertically: bool,
    /// Fit the content width to the printable width of the page.
    #[serde(default)]
    pub fit_to_width: bool,
    /// Manual row breaks; each entry is the last row of a page.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub row_breaks: Vec<u32>,
    /// Manual column breaks; each entry is the last column of a page.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub col_breaks: Vec<u32>,
}

fn default_scale() -> u32 {
    100
}

impl Default for PageSetup {
    fn default() -> Self {
        PageSetup {
            margins: Margins::default(),
            paper_size: None,
            orientation: Orientation::Portrait,
            scale: 100,
            center_horizontally: false,
            center_vertically: false,
            fit_to_width: false,
            row_breaks: Vec::new(),
            col_breaks: Vec::new(),
        }
    }
}

impl PageSetup {
    /// Physical page (width, height) in points, orientation applied.
    pub fn page_dimensions(&self) -> (f64, f64) {
        let (w, h) = paper_dimensions(self.paper_size.unwrap_or(9));
        match self.orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }

    /// Effective scaling factor from the scale percentage (0 ⇒ 1.0).
    pub fn scale_factor(&self) -> f64 {
        if self.scale == 0 {
            1.0
        } else {
            f64::from(self.scale) / 100.0
        }
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
    fn test_landscape_swaps_dimensions() {
        let portrait = PageSetup::default();
        let landscape = PageSetup {
            orientation: Orientation::Landscape,
            ..PageSetup::default()
        };
        let (pw, ph) = portrait.page_dimensions();
        let (lw, lh) = landscape.page_dimensions();
        assert_eq!((pw, ph), (lh, lw));
    }

    #[test]
    fn test_zero_scale_means_unscaled() {
        let setup = PageSetup {
            scale: 0,
            ..PageSetup::default()
        };
        assert_eq!(setup.scale_factor(), 1.0);
        let setup = PageSetup {
            scale: 70,
            ..PageSetup::default()
        };
        assert_eq!(setup.scale_factor(), 0.7);
    }
}

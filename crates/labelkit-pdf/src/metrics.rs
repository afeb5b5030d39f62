//! Built-in font metrics
//!
//! Caption text uses the standard PDF base fonts, which need no embedding.
//! Advance widths for printable ASCII come from the Adobe core font
//! metrics, in 1/1000 em, so right and centered captions can be anchored
//! without a font parser.

use labelkit_core::units::pt_to_mm;
use printpdf::BuiltinFont;
use std::fmt;
use tracing::warn;

/// Widths of ASCII 32..=126
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[rustfmt::skip]
const TIMES_ROMAN: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

const COURIER_WIDTH: u16 = 600;

/// Base fonts available for captions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptionFont {
    #[default]
    Helvetica,
    HelveticaBold,
    TimesRoman,
    Courier,
    CourierBold,
}

impl CaptionFont {
    /// Look up a font by its PostScript name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "helvetica" | "arial" => Some(Self::Helvetica),
            "helvetica-bold" => Some(Self::HelveticaBold),
            "times" | "times-roman" => Some(Self::TimesRoman),
            "courier" => Some(Self::Courier),
            "courier-bold" => Some(Self::CourierBold),
            _ => None,
        }
    }

    /// Like [`CaptionFont::from_name`], falling back to Helvetica.
    pub fn resolve(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            warn!("Font '{}' is not a built-in PDF font, using Helvetica", name);
            Self::Helvetica
        })
    }

    pub fn builtin(self) -> BuiltinFont {
        match self {
            Self::Helvetica => BuiltinFont::Helvetica,
            Self::HelveticaBold => BuiltinFont::HelveticaBold,
            Self::TimesRoman => BuiltinFont::TimesRoman,
            Self::Courier => BuiltinFont::Courier,
            Self::CourierBold => BuiltinFont::CourierBold,
        }
    }

    /// Advance width of `c` in 1/1000 em
    pub fn char_width(self, c: char) -> u16 {
        let table = match self {
            Self::Helvetica => &HELVETICA,
            Self::HelveticaBold => &HELVETICA_BOLD,
            Self::TimesRoman => &TIMES_ROMAN,
            Self::Courier | Self::CourierBold => return COURIER_WIDTH,
        };
        // Non-ASCII glyphs are measured as a digit.
        let index = (c as u32).wrapping_sub(32) as usize;
        table.get(index).copied().unwrap_or(table[16])
    }

    /// Rendered width of `text` at `size_pt`, in millimeters
    pub fn text_width_mm(self, text: &str, size_pt: f64) -> f64 {
        let units: u32 = text.chars().map(|c| u32::from(self.char_width(c))).sum();
        pt_to_mm(units as f64 * size_pt / 1000.0)
    }
}

impl fmt::Display for CaptionFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
            Self::TimesRoman => "Times-Roman",
            Self::Courier => "Courier",
            Self::CourierBold => "Courier-Bold",
        };
        write!(f, "{}", name)
    }
}

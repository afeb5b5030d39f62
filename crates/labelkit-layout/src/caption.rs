//! Caption placement settings

use labelkit_core::units::pt_to_mm;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where the caption sits relative to the label content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptionMode {
    Top,
    #[default]
    Bottom,
    None,
}

impl fmt::Display for CaptionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptionMode::Top => write!(f, "top"),
            CaptionMode::Bottom => write!(f, "bottom"),
            CaptionMode::None => write!(f, "none"),
        }
    }
}

impl FromStr for CaptionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "top" => Ok(CaptionMode::Top),
            "bottom" => Ok(CaptionMode::Bottom),
            "none" => Ok(CaptionMode::None),
            other => Err(format!(
                "Invalid text position '{}'. Must be one of: top, bottom, none",
                other
            )),
        }
    }
}

/// Horizontal text anchoring
///
/// Only the marker caption honors this; code-pair captions are always
/// centered on their element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl fmt::Display for TextAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextAlign::Left => write!(f, "left"),
            TextAlign::Center => write!(f, "center"),
            TextAlign::Right => write!(f, "right"),
        }
    }
}

impl FromStr for TextAlign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" => Ok(TextAlign::Left),
            "center" => Ok(TextAlign::Center),
            "right" => Ok(TextAlign::Right),
            other => Err(format!(
                "Invalid text alignment '{}'. Must be one of: left, center, right",
                other
            )),
        }
    }
}

/// Caption geometry shared by both content resolvers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaptionStyle {
    pub mode: CaptionMode,
    pub align: TextAlign,
    /// Font size in points
    pub font_size_pt: f64,
    /// Gap between caption and cell edge or code (mm)
    pub margin_mm: f64,
}

impl CaptionStyle {
    /// Caption line height in millimeters
    pub fn font_size_mm(&self) -> f64 {
        pt_to_mm(self.font_size_pt)
    }

    pub fn is_visible(&self) -> bool {
        self.mode != CaptionMode::None
    }
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            mode: CaptionMode::Bottom,
            align: TextAlign::Center,
            font_size_pt: 10.0,
            margin_mm: 2.0,
        }
    }
}

//! # LabelKit Layout
//!
//! Geometry engine for label sheets. Resolves the page grid once, maps flat
//! label indices to cells, and places code pairs or markers with their
//! captions inside each cell. Everything here is pure millimeter arithmetic;
//! bitmaps and PDF output live in other crates.

pub mod caption;
pub mod content;
pub mod geometry;
pub mod grid;
pub mod marker;
pub mod page;

pub use caption::{CaptionMode, CaptionStyle, TextAlign};
pub use content::{Arrangement, CodePairParams, CodePairResolver, ContentLayout};
pub use geometry::{MmRect, Point};
pub use grid::{GridResolution, GridSpec, LabelPosition, ResolvedGrid};
pub use marker::{MarkerLayout, MarkerResolver};
pub use page::{PageSpec, A4_HEIGHT_MM, A4_WIDTH_MM};

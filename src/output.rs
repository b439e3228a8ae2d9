//! Render output: backend-agnostic pages of draw operations plus run stats.
//!
//! The layout engine never talks to a PDF writer directly. It fills
//! [`Page`]s with [`DrawOp`]s in PDF user space (points, origin bottom-left)
//! and [`crate::pipeline::pdf`] serialises them afterwards. Keeping the two
//! apart is what makes pagination testable: tests inspect the ops instead of
//! parsing PDF content streams.

use crate::error::RecordIssue;
use serde::{Deserialize, Serialize};

/// Standard PDF fonts used by the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Font {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    /// Symbol font; only used for star ratings.
    ZapfDingbats,
}

impl Font {
    pub const ALL: [Font; 4] = [
        Font::Helvetica,
        Font::HelveticaBold,
        Font::HelveticaOblique,
        Font::ZapfDingbats,
    ];

    /// PostScript name of the standard Type 1 font.
    pub const fn base_name(self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
            Font::HelveticaOblique => "Helvetica-Oblique",
            Font::ZapfDingbats => "ZapfDingbats",
        }
    }

    /// Name under which the font is registered in page resources.
    pub const fn resource_name(self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
            Font::HelveticaOblique => "F3",
            Font::ZapfDingbats => "F4",
        }
    }
}

/// An RGB fill colour, components in 0.0–1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const GREY: Color = Color::rgb(0.5, 0.5, 0.5);
    pub const DARK_GREEN: Color = Color::rgb(0.0, 0.392, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Font, size and colour of a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font: Font,
    pub size: f32,
    pub color: Color,
}

impl TextStyle {
    pub const fn new(font: Font, size: f32) -> Self {
        Self {
            font,
            size,
            color: Color::BLACK,
        }
    }

    pub const fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Default for TextStyle {
    /// Body text: Helvetica 11pt, black.
    fn default() -> Self {
        Self::new(Font::Helvetica, 11.0)
    }
}

/// One drawing instruction on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// Text with its baseline starting at (`x`, `y`).
    Text {
        x: f32,
        y: f32,
        text: String,
        style: TextStyle,
    },
    /// Horizontal black rule from `x1` to `x2` at height `y`.
    Rule { x1: f32, x2: f32, y: f32 },
    /// Clickable URI region `[x1, y1, x2, y2]`.
    Link { rect: [f32; 4], url: String },
}

/// A single page of draw operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based page number.
    pub number: usize,
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub fn new(number: usize) -> Self {
        Self {
            number,
            ops: Vec::new(),
        }
    }

    /// Text runs on this page in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Link targets on this page in drawing order.
    pub fn links(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Link { url, .. } => Some(url.as_str()),
            _ => None,
        })
    }
}

/// Counters collected while laying out one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    pub pages: usize,
    /// Day headings drawn.
    pub day_headings: usize,
    /// Time headings drawn.
    pub time_headings: usize,
    /// Wrapped body lines drawn (intro included).
    pub body_lines: usize,
    /// Default lines appended by section repair.
    pub synthesized_lines: usize,
    pub restaurants: usize,
    pub hotels: usize,
    /// Record lines left out because they did not fill a whole record.
    pub dropped_record_lines: usize,
}

/// The laid-out document, ready to be written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedDocument {
    pub title: String,
    pub destination: String,
    pub pages: Vec<Page>,
    pub stats: RenderStats,
    /// Non-fatal problems met while laying out record sections.
    pub issues: Vec<RecordIssue>,
}

impl RenderedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every text run in the document, in reading order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flat_map(Page::texts)
    }

    /// Every link target in the document, in reading order.
    pub fn links(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flat_map(Page::links)
    }
}

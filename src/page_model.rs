//! Page model – the intermediate representation between pagination and PDF
//! rendering. This is the "frozen" structure that encodes exactly what goes
//! on each page, including the resolved anchor positions the link pass
//! needs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A complete document layout ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentLayout {
    /// Document title embedded in the PDF metadata.
    pub title: String,
    /// Width of each page in PDF points (1 pt = 1/72 inch).
    pub page_width_pt: f32,
    /// Height of each page in PDF points.
    pub page_height_pt: f32,
    /// Ordered list of pages.
    pub pages: Vec<PageLayout>,
    /// Anchor id → resolved position, filled in during pagination.
    pub anchors: BTreeMap<String, AnchorPos>,
}

/// Where a named anchor landed after pagination.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnchorPos {
    /// Zero-based page index.
    pub page_index: usize,
    /// Distance from the top of the page, in points.
    pub y_pt: f32,
}

/// One page of content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageLayout {
    pub page_index: usize,
    pub boxes: Vec<PageBox>,
}

/// A positioned rectangle with optional content. Coordinates are relative
/// to the page top-left, in points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,

    /// Rectangle outline drawn around the box (TOC cells).
    pub border: Option<BorderStyle>,
    /// Horizontal line drawn along the top edge of the box.
    pub rule: Option<RuleStyle>,

    pub text: Option<TextContent>,
    /// The shared logo asset, scaled to this box.
    pub image: Option<ImageContent>,

    /// Anchor id this box links to (TOC version cells).
    pub link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorderStyle {
    pub width: f32,
    pub color: [f32; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleStyle {
    pub thickness: f32,
    pub color: [f32; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextContent {
    /// Pre-wrapped lines of text.
    pub lines: Vec<TextLine>,
    pub font_size: f32,
    pub bold: bool,
    pub color: [f32; 3],
    pub line_height: f32,
    /// Bullet prefix drawn left of the box (list items).
    pub list_marker: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextLine {
    pub text: String,
    /// X offset within the box (cell padding).
    pub x_offset: f32,
    /// Y offset from the top of the box.
    pub y_offset: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageContent {
    pub width: f32,
    pub height: f32,
}

impl DocumentLayout {
    pub fn new(title: &str, page_width_pt: f32, page_height_pt: f32) -> Self {
        Self {
            title: title.to_string(),
            page_width_pt,
            page_height_pt,
            pages: Vec::new(),
            anchors: BTreeMap::new(),
        }
    }

    /// Serialise to JSON (debug dumps and tests).
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }
}

impl PageBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            border: None,
            rule: None,
            text: None,
            image: None,
            link: None,
        }
    }
}

//! Fixed document template: page geometry, colours, and text styles.
//!
//! Every measurement is in PDF points (1 pt = 1/72 inch) on a US-letter
//! page. Vertical positions are measured from the top-left corner of the
//! page; the renderer converts to PDF's bottom-left origin at the end.

// ---------------------------------------------------------------------------
// Page geometry (US letter)
// ---------------------------------------------------------------------------

pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;

pub const MARGIN_LEFT: f32 = 50.0;
pub const MARGIN_RIGHT: f32 = 50.0;
/// Top margin leaves room for the logo and header rule.
pub const MARGIN_TOP: f32 = 100.0;
/// Bottom margin leaves room for the footer rule and attribution.
pub const MARGIN_BOTTOM: f32 = 80.0;

pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
pub const CONTENT_HEIGHT: f32 = PAGE_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

// ---------------------------------------------------------------------------
// Header / footer chrome
// ---------------------------------------------------------------------------

/// Top edge of the logo box.
pub const LOGO_TOP: f32 = 30.0;
/// All logo variants are scaled to this height; width follows the asset's
/// native aspect ratio.
pub const LOGO_HEIGHT: f32 = 50.0;
/// Width used only when the asset declares no dimensions at all.
pub const LOGO_FALLBACK_WIDTH: f32 = 400.0;
/// Top edge of the branding-text fallback (baseline sits 12 pt lower).
pub const BRAND_TEXT_TOP: f32 = 48.0;

/// Accent-coloured rule under the header region.
pub const HEADER_RULE_Y: f32 = 90.0;
/// Thin black rule above the footer.
pub const FOOTER_RULE_Y: f32 = 727.0;
/// Top edge of the footer text line.
pub const FOOTER_TEXT_TOP: f32 = 735.0;

pub const ATTRIBUTION: &str = "U.S. Department of Health and Human Services | National Institutes of Health | National Cancer Institute";
pub const BRAND_FALLBACK_TEXT: &str = "NATIONAL CANCER INSTITUTE";

// ---------------------------------------------------------------------------
// Body / list / TOC metrics
// ---------------------------------------------------------------------------

/// Line height as a multiple of font size.
pub const LINE_FACTOR: f32 = 1.2;

/// Left indent of list-item text relative to the content edge.
pub const LIST_INDENT: f32 = 20.0;
/// Additional indent per nesting level.
pub const NESTED_INDENT: f32 = 18.0;
/// Bullet marker is drawn this far left of the item text.
pub const MARKER_OFFSET: f32 = 16.0;

/// TOC column widths: 1.5 in version, 2.5 in date.
pub const TOC_VERSION_COL: f32 = 108.0;
pub const TOC_DATE_COL: f32 = 180.0;
/// Horizontal text inset inside a TOC cell.
pub const TOC_CELL_INSET: f32 = 2.0;
/// Vertical padding above cell text.
pub const TOC_CELL_PAD: f32 = 4.0;
/// Extra bottom padding under the header row.
pub const TOC_HEADER_PAD: f32 = 8.0;

// ---------------------------------------------------------------------------
// Colours
// ---------------------------------------------------------------------------

/// RGB colour, each channel 0.0 – 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Institutional blue used for titles, headings, and the header rule.
    pub const ACCENT: Self = Self {
        r: 0x2f as f32 / 255.0,
        g: 0x54 as f32 / 255.0,
        b: 0x96 as f32 / 255.0,
    };

    /// Pure blue used for TOC links.
    pub const LINK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 1.0,
    };

    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()? as f32 / 255.0;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()? as f32 / 255.0;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()? as f32 / 255.0;
        Some(Self { r, g, b })
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

// ---------------------------------------------------------------------------
// Text styles
// ---------------------------------------------------------------------------

/// One named slot in the fixed style sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub bold: bool,
    pub color: Color,
    /// Vertical gap inserted above the block.
    pub space_before: f32,
    /// Vertical gap inserted below the block.
    pub space_after: f32,
}

impl TextStyle {
    pub fn line_height(&self) -> f32 {
        self.size * LINE_FACTOR
    }
}

/// Release title, 24 pt bold accent.
pub const TITLE: TextStyle = TextStyle {
    size: 24.0,
    bold: true,
    color: Color::ACCENT,
    space_before: 0.0,
    space_after: 12.0,
};

/// "DATE OF RELEASE" line, 14 pt.
pub const DATE: TextStyle = TextStyle {
    size: 14.0,
    bold: false,
    color: Color::BLACK,
    space_before: 0.0,
    space_after: 20.0,
};

/// Section heading, 16 pt bold accent.
pub const SECTION: TextStyle = TextStyle {
    size: 16.0,
    bold: true,
    color: Color::ACCENT,
    space_before: 20.0,
    space_after: 8.0,
};

/// Subsection heading, 13 pt bold accent.
pub const SUBSECTION: TextStyle = TextStyle {
    size: 13.0,
    bold: true,
    color: Color::ACCENT,
    space_before: 12.0,
    space_after: 6.0,
};

/// Body paragraph, 11 pt.
pub const BODY: TextStyle = TextStyle {
    size: 11.0,
    bold: false,
    color: Color::BLACK,
    space_before: 0.0,
    space_after: 4.0,
};

/// Bulleted list item, 11 pt.
pub const LIST: TextStyle = TextStyle {
    size: 11.0,
    bold: false,
    color: Color::BLACK,
    space_before: 0.0,
    space_after: 2.0,
};

/// TOC header row, 12 pt bold.
pub const TOC_HEADER: TextStyle = TextStyle {
    size: 12.0,
    bold: true,
    color: Color::BLACK,
    space_before: 0.0,
    space_after: 0.0,
};

/// TOC body cell, 10 pt.
pub const TOC_BODY: TextStyle = TextStyle {
    size: 10.0,
    bold: false,
    color: Color::BLACK,
    space_before: 0.0,
    space_after: 0.0,
};

/// Footer and page counter, 9 pt.
pub const FOOTER: TextStyle = TextStyle {
    size: 9.0,
    bold: false,
    color: Color::BLACK,
    space_before: 0.0,
    space_after: 0.0,
};

/// Branding-text logo fallback, 16 pt bold accent.
pub const BRAND_TEXT: TextStyle = TextStyle {
    size: 16.0,
    bold: true,
    color: Color::ACCENT,
    space_before: 0.0,
    space_after: 0.0,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_from_hex() {
        let c = Color::from_hex("#2f5496").unwrap();
        assert!((c.r - 47.0 / 255.0).abs() < 1e-6);
        assert!((c.g - 84.0 / 255.0).abs() < 1e-6);
        assert!((c.b - 150.0 / 255.0).abs() < 1e-6);
        assert_eq!(c, Color::ACCENT);
    }

    #[test]
    fn content_box_dimensions() {
        assert!((CONTENT_WIDTH - 512.0).abs() < f32::EPSILON);
        assert!((CONTENT_HEIGHT - 612.0).abs() < f32::EPSILON);
    }
}

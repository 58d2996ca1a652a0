//! Logo asset resolution – vector logo preferred, raster fallback, plain
//! branding text as the last resort.
//!
//! Assets live alongside the input file. A missing or corrupt asset is
//! never fatal: each step logs a warning and falls through to the next. The
//! resolved asset is loaded once and reused for every page.

use std::fs;
use std::path::Path;

use printpdf::{ExternalXObject, PdfWarnMsg, RawImage, Svg};

use crate::dom::{self, DomNode, Tag};
use crate::theme;

pub const VECTOR_LOGO_FILE: &str = "Portal_Logo.svg";
pub const RASTER_LOGO_FILE: &str = "nih_logo.png";

/// The resolved logo, ready for rendering.
pub enum LogoAsset {
    /// Parsed SVG with its declared native dimensions. An SVG that declares
    /// no usable dimensions cannot be drawn at a predictable size, so it is
    /// rejected during resolution rather than carried here.
    Vector {
        svg: ExternalXObject,
        native: (f32, f32),
    },
    /// Decoded raster image (pixel dimensions come from the decode).
    Raster { image: RawImage },
    /// Bolded branding text drawn where the logo would sit.
    Branding(String),
}

impl LogoAsset {
    /// On-page logo size: scaled to [`theme::LOGO_HEIGHT`] preserving the
    /// asset's aspect ratio. `None` for the text fallback.
    pub fn scaled_size(&self) -> Option<(f32, f32)> {
        match self {
            LogoAsset::Vector { native, .. } => {
                Some(scale_to_height(Some(*native), theme::LOGO_HEIGHT))
            }
            LogoAsset::Raster { image } => Some(scale_to_height(
                Some((image.width as f32, image.height as f32)),
                theme::LOGO_HEIGHT,
            )),
            LogoAsset::Branding(_) => None,
        }
    }
}

/// Walk the fallback chain for the logo in `dir`.
pub fn resolve_logo(dir: &Path) -> LogoAsset {
    let svg_path = dir.join(VECTOR_LOGO_FILE);
    if svg_path.exists() {
        match fs::read_to_string(&svg_path) {
            Ok(text) => {
                let mut warnings: Vec<PdfWarnMsg> = Vec::new();
                match Svg::parse(&text, &mut warnings) {
                    Ok(svg) => match svg_dimensions(&text) {
                        Some(native) => {
                            log::info!("Using vector logo '{}'", svg_path.display());
                            return LogoAsset::Vector { svg, native };
                        }
                        None => log::warn!(
                            "'{}' declares no usable dimensions (width/height or viewBox); skipping",
                            svg_path.display()
                        ),
                    },
                    Err(e) => log::warn!("Could not parse '{}': {e}", svg_path.display()),
                }
            }
            Err(e) => log::warn!("Could not read '{}': {e}", svg_path.display()),
        }
    }

    let png_path = dir.join(RASTER_LOGO_FILE);
    if png_path.exists() {
        match fs::read(&png_path) {
            Ok(bytes) => {
                let mut warnings: Vec<PdfWarnMsg> = Vec::new();
                match RawImage::decode_from_bytes(&bytes, &mut warnings) {
                    Ok(image) => {
                        log::info!("Using raster logo '{}'", png_path.display());
                        return LogoAsset::Raster { image };
                    }
                    Err(e) => log::warn!("Could not decode '{}': {e}", png_path.display()),
                }
            }
            Err(e) => log::warn!("Could not read '{}': {e}", png_path.display()),
        }
    }

    log::warn!("No logo asset found; falling back to text branding");
    LogoAsset::Branding(theme::BRAND_FALLBACK_TEXT.to_string())
}

/// Scale `native` (width, height) to `target_height`, preserving aspect
/// ratio. Assets that declare no usable dimensions get the fixed fallback
/// width instead.
pub fn scale_to_height(native: Option<(f32, f32)>, target_height: f32) -> (f32, f32) {
    match native {
        Some((w, h)) if w > 0.0 && h > 0.0 => (w * target_height / h, target_height),
        _ => (theme::LOGO_FALLBACK_WIDTH, target_height),
    }
}

/// Read the native dimensions off the root `<svg>` element: `width` /
/// `height` attributes first, then the `viewBox`.
pub fn svg_dimensions(svg_text: &str) -> Option<(f32, f32)> {
    let nodes = dom::parse_fragment(svg_text).ok()?;
    let root = find_svg_root(&nodes)?;

    let width = root.attributes.get("width").and_then(|v| parse_dim(v));
    let height = root.attributes.get("height").and_then(|v| parse_dim(v));
    if let (Some(w), Some(h)) = (width, height) {
        return Some((w, h));
    }

    let view_box = root.attributes.get("viewBox")?;
    let parts: Vec<f32> = view_box
        .split_whitespace()
        .filter_map(|p| p.parse().ok())
        .collect();
    if parts.len() == 4 && parts[2] > 0.0 && parts[3] > 0.0 {
        Some((parts[2], parts[3]))
    } else {
        None
    }
}

fn find_svg_root(nodes: &[DomNode]) -> Option<&dom::ElementNode> {
    for node in nodes {
        if let DomNode::Element(e) = node {
            if matches!(&e.tag, Tag::Unknown(name) if name.eq_ignore_ascii_case("svg")) {
                return Some(e);
            }
        }
    }
    None
}

/// Parse the numeric prefix of a CSS-style length ("400", "400px", "50.5pt").
fn parse_dim(value: &str) -> Option<f32> {
    let numeric: String = value
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    numeric.parse().ok().filter(|v| *v > 0.0)
}

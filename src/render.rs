//! PDF renderer – takes a decorated [`DocumentLayout`] and produces PDF
//! bytes using `printpdf` (v0.8 ops-based API).
//!
//! The logo asset is registered once as an XObject and referenced from
//! every page. Link annotations are not emitted here; [`crate::links`]
//! patches them in afterwards.

use printpdf::*;

use crate::assets::LogoAsset;
use crate::page_model::{DocumentLayout, PageBox};
use crate::theme::MARKER_OFFSET;

/// Static descriptive metadata embedded in the output PDF.
#[derive(Debug, Clone)]
pub struct PdfMetadata {
    pub title: String,
    pub author: String,
    pub subject: String,
    pub creator: String,
    pub producer: String,
    pub keywords: Vec<String>,
}

impl Default for PdfMetadata {
    fn default() -> Self {
        Self {
            title: "CCDI Hub Release Notes".to_string(),
            author: "National Cancer Institute".to_string(),
            subject: "CCDI Hub Release Notes and Updates".to_string(),
            creator: "CCDI Hub Release Notes Generator".to_string(),
            producer: "notepress".to_string(),
            keywords: Vec::new(),
        }
    }
}

/// Render the layout into PDF bytes.
pub fn render_document(
    layout: &DocumentLayout,
    metadata: &PdfMetadata,
    logo: &LogoAsset,
) -> Vec<u8> {
    let page_w = Mm(layout.page_width_pt * 0.352778); // pt → mm
    let page_h = Mm(layout.page_height_pt * 0.352778);

    let mut doc = PdfDocument::new(&metadata.title);
    doc.metadata.info.author = metadata.author.clone();
    doc.metadata.info.subject = metadata.subject.clone();
    doc.metadata.info.creator = metadata.creator.clone();
    doc.metadata.info.producer = metadata.producer.clone();
    doc.metadata.info.keywords = metadata.keywords.clone();

    // ── Register the logo once ────────────────────────────────────────────
    // Both drawable variants carry known native dimensions, so every logo
    // box can be scaled to exactly the size the decorator reserved.
    let logo_resource: Option<(XObjectId, (f32, f32))> = match logo {
        LogoAsset::Raster { image } => Some((
            doc.add_image(image),
            (image.width as f32, image.height as f32),
        )),
        LogoAsset::Vector { svg, native } => Some((doc.add_xobject(svg), *native)),
        LogoAsset::Branding(_) => None,
    };

    // ── Render pages ──────────────────────────────────────────────────────
    let mut pages = Vec::new();
    for page_layout in &layout.pages {
        let mut ops = Vec::new();
        for pbox in &page_layout.boxes {
            render_box(&mut ops, pbox, layout.page_height_pt, &logo_resource);
        }
        pages.push(PdfPage::new(page_w, page_h, ops));
    }

    // Ensure at least one page.
    if pages.is_empty() {
        pages.push(PdfPage::new(page_w, page_h, Vec::new()));
    }

    doc.with_pages(pages);
    doc.save(&PdfSaveOptions::default(), &mut Vec::new())
}

/// Convert a UTF-8 string to raw Windows-1252 bytes then wrap in a String so
/// printpdf writes the bytes unchanged into the PDF stream (builtin fonts use
/// WinAnsiEncoding, so each glyph is one byte 0x00–0xFF).
fn to_winlatin(s: &str) -> String {
    let bytes: Vec<u8> = s
        .chars()
        .map(|c| match c {
            '\u{20AC}' => 0x80, // euro
            '\u{201A}' => 0x82, // single low-9 quote
            '\u{201E}' => 0x84, // double low-9 quote
            '\u{2026}' => 0x85, // ellipsis
            '\u{2018}' => 0x91, // left single quote
            '\u{2019}' => 0x92, // right single quote
            '\u{201C}' => 0x93, // left double quote
            '\u{201D}' => 0x94, // right double quote
            '\u{2022}' => 0x95, // bullet
            '\u{2013}' => 0x96, // en-dash
            '\u{2014}' => 0x97, // em-dash
            '\u{2122}' => 0x99, // trademark
            '\u{00A0}' => 0x20, // non-breaking space -> space
            c if (c as u32) < 256 => c as u8,
            _ => b'?',
        })
        .collect();
    // SAFETY: intentionally non-UTF-8 for 0x80-0x9F range; printpdf passes
    // these bytes straight to the PDF stream, decoded by WinAnsiEncoding.
    #[allow(unsafe_code)]
    unsafe {
        String::from_utf8_unchecked(bytes)
    }
}

fn rgb(color: [f32; 3]) -> Color {
    Color::Rgb(Rgb {
        r: color[0],
        g: color[1],
        b: color[2],
        icc_profile: None,
    })
}

/// Emit PDF ops for one page box.
fn render_box(
    ops: &mut Vec<Op>,
    pbox: &PageBox,
    page_height: f32,
    logo_resource: &Option<(XObjectId, (f32, f32))>,
) {
    // PDF coordinate system: origin at bottom-left.
    // Our layout uses origin at top-left. Convert:
    let pdf_y = page_height - pbox.y;

    // Border (TOC cell outline)
    if let Some(border) = &pbox.border {
        ops.push(Op::SetOutlineColor {
            col: rgb(border.color),
        });
        ops.push(Op::SetOutlineThickness {
            pt: Pt(border.width),
        });

        let x1 = pbox.x;
        let y1 = pdf_y - pbox.height;
        let x2 = pbox.x + pbox.width;
        let y2 = pdf_y;

        ops.push(Op::DrawLine {
            line: Line {
                points: vec![
                    LinePoint {
                        p: Point {
                            x: Pt(x1),
                            y: Pt(y2),
                        },
                        bezier: false,
                    },
                    LinePoint {
                        p: Point {
                            x: Pt(x2),
                            y: Pt(y2),
                        },
                        bezier: false,
                    },
                    LinePoint {
                        p: Point {
                            x: Pt(x2),
                            y: Pt(y1),
                        },
                        bezier: false,
                    },
                    LinePoint {
                        p: Point {
                            x: Pt(x1),
                            y: Pt(y1),
                        },
                        bezier: false,
                    },
                ],
                is_closed: true,
            },
        });
    }

    // Horizontal rule along the box top
    if let Some(rule) = &pbox.rule {
        ops.push(Op::SetOutlineColor {
            col: rgb(rule.color),
        });
        ops.push(Op::SetOutlineThickness {
            pt: Pt(rule.thickness),
        });
        ops.push(Op::DrawLine {
            line: Line {
                points: vec![
                    LinePoint {
                        p: Point {
                            x: Pt(pbox.x),
                            y: Pt(pdf_y),
                        },
                        bezier: false,
                    },
                    LinePoint {
                        p: Point {
                            x: Pt(pbox.x + pbox.width),
                            y: Pt(pdf_y),
                        },
                        bezier: false,
                    },
                ],
                is_closed: false,
            },
        });
    }

    // Text
    if let Some(text) = &pbox.text {
        let font = if text.bold {
            BuiltinFont::HelveticaBold
        } else {
            BuiltinFont::Helvetica
        };

        for tline in &text.lines {
            if tline.text.is_empty() {
                continue;
            }
            let text_x = pbox.x + tline.x_offset;
            // Baseline ≈ top of line + ascender (approx 0.75 × font_size)
            let ascender_offset = text.font_size * 0.75;
            let text_y = pdf_y - tline.y_offset - ascender_offset;

            ops.push(Op::StartTextSection);
            ops.push(Op::SetTextCursor {
                pos: Point {
                    x: Pt(text_x),
                    y: Pt(text_y),
                },
            });
            ops.push(Op::SetFontSizeBuiltinFont {
                size: Pt(text.font_size),
                font,
            });
            ops.push(Op::SetLineHeight {
                lh: Pt(text.line_height),
            });
            ops.push(Op::SetFillColor {
                col: rgb(text.color),
            });
            ops.push(Op::WriteTextBuiltinFont {
                items: vec![TextItem::Text(to_winlatin(&tline.text))],
                font,
            });
            ops.push(Op::EndTextSection);
        }

        // Bullet marker, left of the box
        if let Some(marker) = &text.list_marker {
            let marker_x = pbox.x - MARKER_OFFSET;
            let marker_y = pdf_y - text.font_size * 0.75;
            ops.push(Op::StartTextSection);
            ops.push(Op::SetTextCursor {
                pos: Point {
                    x: Pt(marker_x),
                    y: Pt(marker_y),
                },
            });
            ops.push(Op::SetFontSizeBuiltinFont {
                size: Pt(text.font_size),
                font: BuiltinFont::Helvetica,
            });
            ops.push(Op::SetFillColor {
                col: rgb(text.color),
            });
            ops.push(Op::WriteTextBuiltinFont {
                items: vec![TextItem::Text(to_winlatin(marker))],
                font: BuiltinFont::Helvetica,
            });
            ops.push(Op::EndTextSection);
        }
    }

    // Logo image – reference the pre-registered XObject
    if let Some(img) = &pbox.image {
        if let Some((xobj_id, (nw, nh))) = logo_resource {
            // translate_y = bottom edge of image in PDF coordinates.
            let img_bottom_y = page_height - pbox.y - img.height;

            // At dpi=72 printpdf renders 1 px = 1 pt, so
            // scale = desired_pt / native_dim.
            let (scale_x, scale_y) = if *nw > 0.0 && *nh > 0.0 {
                (img.width / nw, img.height / nh)
            } else {
                (1.0, 1.0)
            };

            ops.push(Op::UseXobject {
                id: xobj_id.clone(),
                transform: XObjectTransform {
                    translate_x: Some(Pt(pbox.x)),
                    translate_y: Some(Pt(img_bottom_y)),
                    dpi: Some(72.0),
                    scale_x: Some(scale_x),
                    scale_y: Some(scale_y),
                    rotate: None,
                },
            });
        }
    }
}

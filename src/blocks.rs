//! Markup block converter – walks a release body's DOM and emits an ordered
//! sequence of typed text blocks.
//!
//! The conversion is a pure function of the fragment string: headings come
//! from h1-h3 tags or from inline-style hints on paragraphs (the source app
//! writes section headings as `<p style="color: #2f5496; font-size: 16pt">`),
//! lists flatten into indented items, and a fragment that fails to parse
//! degrades to a single tag-stripped paragraph.

use crate::dom::{self, DomNode, ElementNode, Tag};
use crate::theme::Color;

/// One styled unit of release-body content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    SectionHeading(String),
    SubsectionHeading(String),
    Paragraph(String),
    ListItem { text: String, indent: usize },
}

/// Convert one HTML fragment into blocks. Never fails: a malformed fragment
/// yields its tag-stripped text as a single paragraph (or nothing at all).
pub fn convert_fragment(fragment: &str) -> Vec<Block> {
    if fragment.trim().is_empty() {
        return Vec::new();
    }

    match dom::parse_fragment(fragment) {
        Ok(nodes) => {
            let mut blocks = Vec::new();
            walk(&nodes, &mut blocks);
            blocks
        }
        Err(e) => {
            log::warn!("Malformed release body ({e}); falling back to stripped text");
            let plain = dom::strip_tags(fragment);
            let plain = plain.trim();
            if plain.is_empty() {
                Vec::new()
            } else {
                vec![Block::Paragraph(plain.to_string())]
            }
        }
    }
}

fn walk(nodes: &[DomNode], out: &mut Vec<Block>) {
    for node in nodes {
        let elem = match node {
            DomNode::Element(e) => e,
            DomNode::Text(_) => continue,
        };
        match &elem.tag {
            Tag::P => {
                let text = elem.inner_text();
                let text = text.trim();
                if text.is_empty() {
                    continue;
                }
                out.push(classify_paragraph(text, elem.inline_style()));
            }
            Tag::H1 => {
                let text = elem.inner_text();
                let text = text.trim();
                if !text.is_empty() {
                    out.push(Block::SectionHeading(text.to_string()));
                }
            }
            Tag::H2 | Tag::H3 => {
                let text = elem.inner_text();
                let text = text.trim();
                if !text.is_empty() {
                    out.push(Block::SubsectionHeading(text.to_string()));
                }
            }
            Tag::Ul => visit_list(elem, 0, out),
            Tag::Li => {
                // A list item with no wrapping <ul>; emit it on its own so
                // sloppy markup still renders.
                let text = elem.inner_text();
                let text = text.trim();
                if !text.is_empty() {
                    out.push(Block::ListItem {
                        text: text.to_string(),
                        indent: 0,
                    });
                }
            }
            Tag::Head => {}
            _ => walk(&elem.children, out),
        }
    }
}

/// Emit blocks for the *direct* list items of `ul`. Items owned by a nested
/// list are reached only through their parent item, never re-visited at the
/// outer level.
fn visit_list(ul: &ElementNode, indent: usize, out: &mut Vec<Block>) {
    for child in &ul.children {
        let li = match child {
            DomNode::Element(e) if e.tag == Tag::Li => e,
            _ => continue,
        };
        let text = li.inner_text();
        let text = text.trim();
        if text.is_empty() {
            continue;
        }

        if let Some(nested) = find_first_list(&li.children) {
            // The item introduces a sub-list. Its own label is the text up
            // to the first colon (the rest belongs to the nested items).
            let label = match text.split_once(':') {
                Some((head, _)) => head.trim_end(),
                None => text,
            };
            if !label.is_empty() {
                out.push(Block::ListItem {
                    text: label.to_string(),
                    indent,
                });
            }
            for nested_child in &nested.children {
                let nested_li = match nested_child {
                    DomNode::Element(e) if e.tag == Tag::Li => e,
                    _ => continue,
                };
                let nested_text = nested_li.inner_text();
                let nested_text = nested_text.trim();
                if !nested_text.is_empty() {
                    out.push(Block::ListItem {
                        text: nested_text.to_string(),
                        indent: indent + 1,
                    });
                }
            }
        } else {
            out.push(Block::ListItem {
                text: text.to_string(),
                indent,
            });
        }
    }
}

/// Depth-first search for the first `<ul>` descendant.
fn find_first_list(nodes: &[DomNode]) -> Option<&ElementNode> {
    for node in nodes {
        if let DomNode::Element(e) = node {
            if e.tag == Tag::Ul {
                return Some(e);
            }
            if let Some(found) = find_first_list(&e.children) {
                return Some(found);
            }
        }
    }
    None
}

/// Paragraphs styled in the heading colour are re-classified by font size:
/// ≥16 pt is a section heading, ≥13 pt a subsection heading.
fn classify_paragraph(text: &str, style: Option<&str>) -> Block {
    let text = text.to_string();
    let (color_matches, font_size) = parse_style_hints(style.unwrap_or(""));
    if color_matches {
        match font_size {
            Some(size) if size >= 16.0 => return Block::SectionHeading(text),
            Some(size) if size >= 13.0 => return Block::SubsectionHeading(text),
            _ => {}
        }
    }
    Block::Paragraph(text)
}

/// Pull the heading hints out of an inline-style string: whether `color`
/// names the accent blue, and any declared `font-size` in points.
fn parse_style_hints(style: &str) -> (bool, Option<f32>) {
    let mut color_matches = false;
    let mut font_size = None;
    for decl in style.split(';') {
        let mut parts = decl.splitn(2, ':');
        let prop = match parts.next() {
            Some(p) => p.trim().to_ascii_lowercase(),
            None => continue,
        };
        let val = match parts.next() {
            Some(v) => v.trim(),
            None => continue,
        };
        match prop.as_str() {
            "color" => {
                color_matches = Color::from_hex(val)
                    .map(|c| c == Color::ACCENT)
                    .unwrap_or(false);
            }
            "font-size" => {
                let num = val
                    .trim_end_matches("pt")
                    .trim_end_matches("px")
                    .trim();
                font_size = num.parse::<f32>().ok();
            }
            _ => {}
        }
    }
    (color_matches, font_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styled_paragraph_becomes_section_heading() {
        let blocks =
            convert_fragment(r#"<p style="color: #2f5496; font-size: 16pt">Overview</p>"#);
        assert_eq!(blocks, vec![Block::SectionHeading("Overview".to_string())]);
    }

    #[test]
    fn styled_paragraph_becomes_subsection_heading() {
        let blocks =
            convert_fragment(r#"<p style="color: #2f5496; font-size: 13pt">Details</p>"#);
        assert_eq!(
            blocks,
            vec![Block::SubsectionHeading("Details".to_string())]
        );
    }

    #[test]
    fn plain_paragraph_stays_paragraph() {
        let blocks = convert_fragment("<p>Just text</p>");
        assert_eq!(blocks, vec![Block::Paragraph("Just text".to_string())]);
        // Colour alone is not enough.
        let blocks = convert_fragment(r#"<p style="color: #2f5496">Just text</p>"#);
        assert_eq!(blocks, vec![Block::Paragraph("Just text".to_string())]);
    }

    #[test]
    fn heading_tags_map_directly() {
        let blocks = convert_fragment("<h1>Top</h1><h2>Mid</h2><h3>Low</h3>");
        assert_eq!(
            blocks,
            vec![
                Block::SectionHeading("Top".to_string()),
                Block::SubsectionHeading("Mid".to_string()),
                Block::SubsectionHeading("Low".to_string()),
            ]
        );
    }

    #[test]
    fn nested_list_splits_on_colon() {
        let blocks =
            convert_fragment("<ul><li>Group A: <ul><li>X</li><li>Y</li></ul></li></ul>");
        assert_eq!(
            blocks,
            vec![
                Block::ListItem {
                    text: "Group A".to_string(),
                    indent: 0
                },
                Block::ListItem {
                    text: "X".to_string(),
                    indent: 1
                },
                Block::ListItem {
                    text: "Y".to_string(),
                    indent: 1
                },
            ]
        );
    }

    #[test]
    fn nested_items_are_not_emitted_twice() {
        let blocks =
            convert_fragment("<ul><li>Outer<ul><li>Inner</li></ul></li><li>Second</li></ul>");
        let inner_count = blocks
            .iter()
            .filter(|b| matches!(b, Block::ListItem { text, .. } if text == "Inner"))
            .count();
        assert_eq!(inner_count, 1);
        assert_eq!(blocks.len(), 3);
    }

    #[test]
    fn orphan_list_item_is_kept() {
        let blocks = convert_fragment("<li>Lonely item</li>");
        assert_eq!(
            blocks,
            vec![Block::ListItem {
                text: "Lonely item".to_string(),
                indent: 0
            }]
        );
    }

    #[test]
    fn malformed_fragment_falls_back_to_stripped_text() {
        let blocks = convert_fragment("<p style=\"color: #2f5496>Broken but readable");
        assert_eq!(blocks.len(), 1);
        assert!(matches!(&blocks[0], Block::Paragraph(t) if t.contains("readable")));
    }

    #[test]
    fn empty_fragment_yields_nothing() {
        assert!(convert_fragment("").is_empty());
        assert!(convert_fragment("   \n  ").is_empty());
        assert!(convert_fragment("<p>   </p>").is_empty());
    }

    #[test]
    fn conversion_is_deterministic() {
        let fragment = "<h1>Release</h1><p>Body</p><ul><li>One</li><li>Two</li></ul>";
        assert_eq!(convert_fragment(fragment), convert_fragment(fragment));
    }
}

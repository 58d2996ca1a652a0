//! Vertical flow layout – turns the flat document flow into positioned
//! boxes in continuous document space.
//!
//! Y coordinates are absolute document positions starting at 0 (the top of
//! the first page's content area); pagination later subtracts each page's
//! start offset. The fixed template means there is no box nesting: every
//! box carries its own text lines and styling.

use crate::assemble::{FlowElement, TocRow};
use crate::fonts;
use crate::theme::{self, Color, TextStyle};

/// One laid-out rectangle in document space.
#[derive(Debug, Clone)]
pub struct PositionedBox {
    pub x: f32,
    /// Absolute document-space y of the box top.
    pub y: f32,
    pub width: f32,
    pub height: f32,

    /// Pre-wrapped text lines.
    pub lines: Vec<String>,
    pub style: TextStyle,
    /// Bullet marker drawn left of the box.
    pub marker: Option<String>,
    /// Horizontal text inset (cell padding).
    pub inset_x: f32,
    /// Vertical offset of the first line below the box top.
    pub pad_top: f32,

    /// Draw a 1 pt black outline (TOC cells).
    pub bordered: bool,
    /// Anchor id this box links to.
    pub link: Option<String>,
    /// Anchor id this box defines.
    pub anchor: Option<String>,
    /// Start a new page before this box.
    pub break_before: bool,
}

impl PositionedBox {
    fn text(x: f32, y: f32, width: f32, style: TextStyle, lines: Vec<String>) -> Self {
        let height = lines.len().max(1) as f32 * style.line_height();
        Self {
            x,
            y,
            width,
            height,
            lines,
            style,
            marker: None,
            inset_x: 0.0,
            pad_top: 0.0,
            bordered: false,
            link: None,
            anchor: None,
            break_before: false,
        }
    }
}

/// Lay out the document flow. Returns boxes in document order.
pub fn layout_flow(flow: &[FlowElement]) -> Vec<PositionedBox> {
    let mut boxes: Vec<PositionedBox> = Vec::new();
    let mut y = 0.0f32;
    let mut pending_break = false;

    for element in flow {
        match element {
            FlowElement::Spacer(gap) => y += gap,
            FlowElement::PageBreak => pending_break = true,

            FlowElement::Title { text, anchor } => {
                let style = theme::TITLE;
                let lines = fonts::wrap(text, style.size, style.bold, theme::CONTENT_WIDTH);
                let mut pbox =
                    PositionedBox::text(theme::MARGIN_LEFT, y, theme::CONTENT_WIDTH, style, lines);
                pbox.anchor = Some(anchor.clone());
                y += pbox.height + style.space_after;
                push(&mut boxes, pbox, &mut pending_break);
            }

            FlowElement::DateLine { date } => {
                let style = theme::DATE;
                let label = "DATE OF RELEASE:";
                let label_style = TextStyle { bold: true, ..style };
                let label_width = fonts::text_width(label, style.size, true);

                let label_box = PositionedBox::text(
                    theme::MARGIN_LEFT,
                    y,
                    label_width,
                    label_style,
                    vec![label.to_string()],
                );
                push(&mut boxes, label_box, &mut pending_break);

                let value_x = theme::MARGIN_LEFT + label_width + 4.0;
                let value_box = PositionedBox::text(
                    value_x,
                    y,
                    theme::CONTENT_WIDTH - label_width - 4.0,
                    style,
                    vec![date.clone()],
                );
                push(&mut boxes, value_box, &mut pending_break);

                y += style.line_height() + style.space_after;
            }

            FlowElement::SectionHeading(text) => {
                y += layout_block(&mut boxes, text, theme::SECTION, y, &mut pending_break);
            }
            FlowElement::SubsectionHeading(text) => {
                y += layout_block(&mut boxes, text, theme::SUBSECTION, y, &mut pending_break);
            }
            FlowElement::Paragraph(text) => {
                y += layout_block(&mut boxes, text, theme::BODY, y, &mut pending_break);
            }

            FlowElement::ListItem { text, indent } => {
                let style = theme::LIST;
                let indent_pt = theme::LIST_INDENT + *indent as f32 * theme::NESTED_INDENT;
                let x = theme::MARGIN_LEFT + indent_pt;
                let width = theme::CONTENT_WIDTH - indent_pt;
                let lines = fonts::wrap(text, style.size, style.bold, width);
                let mut pbox = PositionedBox::text(x, y, width, style, lines);
                pbox.marker = Some("\u{2022}".to_string());
                y += pbox.height + style.space_after;
                push(&mut boxes, pbox, &mut pending_break);
            }

            FlowElement::TocTable(rows) => {
                y += layout_toc_table(&mut boxes, rows, y, &mut pending_break);
            }
        }
    }

    boxes
}

fn push(boxes: &mut Vec<PositionedBox>, mut pbox: PositionedBox, pending_break: &mut bool) {
    if *pending_break {
        pbox.break_before = true;
        *pending_break = false;
    }
    boxes.push(pbox);
}

/// Lay out one full-width text block; returns the vertical space consumed.
fn layout_block(
    boxes: &mut Vec<PositionedBox>,
    text: &str,
    style: TextStyle,
    y: f32,
    pending_break: &mut bool,
) -> f32 {
    let top = y + style.space_before;
    let lines = fonts::wrap(text, style.size, style.bold, theme::CONTENT_WIDTH);
    let pbox = PositionedBox::text(theme::MARGIN_LEFT, top, theme::CONTENT_WIDTH, style, lines);
    let consumed = style.space_before + pbox.height + style.space_after;
    push(boxes, pbox, pending_break);
    consumed
}

/// Two bordered cells per row; the version cell is link-styled and carries
/// the row's anchor target.
fn layout_toc_table(
    boxes: &mut Vec<PositionedBox>,
    rows: &[TocRow],
    y: f32,
    pending_break: &mut bool,
) -> f32 {
    let mut cursor = y;

    // Header row.
    let header = theme::TOC_HEADER;
    let header_height = header.line_height() + theme::TOC_CELL_PAD + theme::TOC_HEADER_PAD;
    for (text, x, width) in [
        ("Version", theme::MARGIN_LEFT, theme::TOC_VERSION_COL),
        (
            "Date",
            theme::MARGIN_LEFT + theme::TOC_VERSION_COL,
            theme::TOC_DATE_COL,
        ),
    ] {
        let cell = toc_cell(x, cursor, width, header_height, header, text);
        push(boxes, cell, pending_break);
    }
    cursor += header_height;

    // Body rows.
    let body = theme::TOC_BODY;
    let row_height = body.line_height() + 2.0 * theme::TOC_CELL_PAD;
    for row in rows {
        let link_style = TextStyle {
            color: Color::LINK,
            ..body
        };
        let mut version_cell = toc_cell(
            theme::MARGIN_LEFT,
            cursor,
            theme::TOC_VERSION_COL,
            row_height,
            link_style,
            &row.version,
        );
        version_cell.link = Some(row.anchor.clone());
        boxes.push(version_cell);

        boxes.push(toc_cell(
            theme::MARGIN_LEFT + theme::TOC_VERSION_COL,
            cursor,
            theme::TOC_DATE_COL,
            row_height,
            body,
            &row.date,
        ));
        cursor += row_height;
    }

    cursor - y
}

fn toc_cell(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    style: TextStyle,
    text: &str,
) -> PositionedBox {
    let lines = fonts::wrap(
        text,
        style.size,
        style.bold,
        width - 2.0 * theme::TOC_CELL_INSET,
    );
    let mut cell = PositionedBox::text(x, y, width, style, lines);
    cell.height = height;
    cell.bordered = true;
    cell.inset_x = theme::TOC_CELL_INSET;
    cell.pad_top = theme::TOC_CELL_PAD;
    cell
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::{assemble, FlowElement};
    use crate::source::ReleaseEntry;

    fn sample_flow() -> Vec<FlowElement> {
        let entries = vec![
            ReleaseEntry {
                version: Some("1.0".to_string()),
                title: Some("First".to_string()),
                date: Some("Jan 1, 2025".to_string()),
                full_text: Some("<p>Body</p><ul><li>One</li></ul>".to_string()),
            },
            ReleaseEntry {
                version: Some("1.1".to_string()),
                title: Some("Second".to_string()),
                date: Some("Feb 1, 2025".to_string()),
                full_text: None,
            },
        ];
        assemble(&entries)
    }

    #[test]
    fn boxes_are_in_document_order() {
        let boxes = layout_flow(&sample_flow());
        assert!(!boxes.is_empty());
        for pair in boxes.windows(2) {
            assert!(
                pair[1].y >= pair[0].y,
                "box y went backwards: {} then {}",
                pair[0].y,
                pair[1].y
            );
        }
    }

    #[test]
    fn toc_cells_are_bordered_and_linked() {
        let boxes = layout_flow(&sample_flow());
        let bordered: Vec<&PositionedBox> = boxes.iter().filter(|b| b.bordered).collect();
        // Header row + one row per entry, two cells each.
        assert_eq!(bordered.len(), 6);
        let linked: Vec<&PositionedBox> = bordered
            .iter()
            .filter(|b| b.link.is_some())
            .copied()
            .collect();
        assert_eq!(linked.len(), 2);
        assert_eq!(linked[0].link.as_deref(), Some("release_0"));
    }

    #[test]
    fn list_items_are_indented_with_markers() {
        let boxes = layout_flow(&[FlowElement::ListItem {
            text: "Nested".to_string(),
            indent: 1,
        }]);
        assert_eq!(boxes.len(), 1);
        let item = &boxes[0];
        assert_eq!(item.marker.as_deref(), Some("\u{2022}"));
        let expected_x = theme::MARGIN_LEFT + theme::LIST_INDENT + theme::NESTED_INDENT;
        assert!((item.x - expected_x).abs() < f32::EPSILON);
    }

    #[test]
    fn page_break_marks_next_box() {
        let flow = vec![
            FlowElement::Paragraph("before".to_string()),
            FlowElement::PageBreak,
            FlowElement::Paragraph("after".to_string()),
        ];
        let boxes = layout_flow(&flow);
        assert_eq!(boxes.len(), 2);
        assert!(!boxes[0].break_before);
        assert!(boxes[1].break_before);
    }

    #[test]
    fn titles_carry_anchors() {
        let boxes = layout_flow(&sample_flow());
        let anchors: Vec<&str> = boxes.iter().filter_map(|b| b.anchor.as_deref()).collect();
        assert_eq!(anchors, vec!["release_0", "release_1"]);
    }
}

//! Pagination – splits the document-space box list into pages and resolves
//! anchor positions.
//!
//! All `PositionedBox.y` values are absolute document coordinates, so
//! `pbox.y - page_start_doc_y` gives the y-on-page for any box. A box
//! either starts a new page explicitly (`break_before`) or is pushed to the
//! next page when it would cross the bottom of the content area; boxes are
//! never split.

use crate::layout::PositionedBox;
use crate::page_model::{
    AnchorPos, BorderStyle, DocumentLayout, PageBox, PageLayout, TextContent, TextLine,
};
use crate::theme;

/// Convert positioned boxes into a paginated [`DocumentLayout`]. The total
/// page count is whatever this pass produces; the page decorator reads it
/// from `pages.len()` rather than assuming a constant.
pub fn paginate(boxes: &[PositionedBox], title: &str) -> DocumentLayout {
    let mut layout = DocumentLayout::new(title, theme::PAGE_WIDTH, theme::PAGE_HEIGHT);

    let mut current = PageLayout {
        page_index: 0,
        boxes: Vec::new(),
    };
    // Document-space y at which the current page begins.
    let mut page_start_doc_y = 0.0f32;

    for pbox in boxes {
        if pbox.break_before && !current.boxes.is_empty() {
            let finished = std::mem::replace(
                &mut current,
                PageLayout {
                    page_index: layout.pages.len() + 1,
                    boxes: Vec::new(),
                },
            );
            layout.pages.push(finished);
            page_start_doc_y = pbox.y;
        }

        let y_on_page = (pbox.y - page_start_doc_y).max(0.0);
        if y_on_page + pbox.height > theme::CONTENT_HEIGHT && !current.boxes.is_empty() {
            let finished = std::mem::replace(
                &mut current,
                PageLayout {
                    page_index: layout.pages.len() + 1,
                    boxes: Vec::new(),
                },
            );
            layout.pages.push(finished);
            page_start_doc_y = pbox.y;
        }

        let y_on_page = (pbox.y - page_start_doc_y).max(0.0);
        let abs_y = theme::MARGIN_TOP + y_on_page;

        if let Some(anchor) = &pbox.anchor {
            layout.anchors.insert(
                anchor.clone(),
                AnchorPos {
                    page_index: current.page_index,
                    y_pt: abs_y,
                },
            );
        }

        current.boxes.push(to_page_box(pbox, abs_y));
    }

    if !current.boxes.is_empty() {
        layout.pages.push(current);
    }
    if layout.pages.is_empty() {
        layout.pages.push(PageLayout {
            page_index: 0,
            boxes: Vec::new(),
        });
    }
    layout
}

/// Convert a document-space box to a page-absolute [`PageBox`].
fn to_page_box(pbox: &PositionedBox, abs_y: f32) -> PageBox {
    let mut out = PageBox::new(pbox.x, abs_y, pbox.width, pbox.height);

    if pbox.bordered {
        out.border = Some(BorderStyle {
            width: 1.0,
            color: theme::Color::BLACK.to_array(),
        });
    }

    let line_height = pbox.style.line_height();
    out.text = Some(TextContent {
        lines: pbox
            .lines
            .iter()
            .enumerate()
            .map(|(i, line)| TextLine {
                text: line.clone(),
                x_offset: pbox.inset_x,
                y_offset: pbox.pad_top + i as f32 * line_height,
            })
            .collect(),
        font_size: pbox.style.size,
        bold: pbox.style.bold,
        color: pbox.style.color.to_array(),
        line_height,
        list_marker: pbox.marker.clone(),
    });
    out.link = pbox.link.clone();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::{assemble, FlowElement};
    use crate::layout::layout_flow;
    use crate::source::ReleaseEntry;

    fn entry(version: &str, body: &str) -> ReleaseEntry {
        ReleaseEntry {
            version: Some(version.to_string()),
            title: Some(format!("Release {version}")),
            date: Some("Jan 1, 2025".to_string()),
            full_text: Some(body.to_string()),
        }
    }

    #[test]
    fn single_page_without_breaks() {
        let boxes = layout_flow(&[FlowElement::Paragraph("Short text".to_string())]);
        let layout = paginate(&boxes, "test");
        assert_eq!(layout.pages.len(), 1);
    }

    #[test]
    fn one_page_per_section_plus_toc() {
        let entries = vec![entry("1.0", "<p>A</p>"), entry("1.1", "<p>B</p>")];
        let boxes = layout_flow(&assemble(&entries));
        let layout = paginate(&boxes, "test");
        // TOC page + one page per release.
        assert_eq!(layout.pages.len(), 3);
    }

    #[test]
    fn overflowing_content_wraps_to_next_page() {
        let mut flow = Vec::new();
        for i in 0..80 {
            flow.push(FlowElement::Paragraph(format!("Paragraph {i} with some text")));
        }
        let boxes = layout_flow(&flow);
        let layout = paginate(&boxes, "test");
        assert!(
            layout.pages.len() > 1,
            "Expected multiple pages, got {}",
            layout.pages.len()
        );
        // Every box stays inside the content area of its page.
        for page in &layout.pages {
            for pbox in &page.boxes {
                assert!(pbox.y + pbox.height <= theme::MARGIN_TOP + theme::CONTENT_HEIGHT + 0.01);
            }
        }
    }

    #[test]
    fn anchors_resolve_to_their_pages() {
        let entries = vec![entry("1.0", ""), entry("1.1", ""), entry("1.2", "")];
        let boxes = layout_flow(&assemble(&entries));
        let layout = paginate(&boxes, "test");
        assert_eq!(layout.anchors.len(), 3);
        // TOC occupies page 0; section i starts on page i + 1.
        for i in 0..3 {
            let pos = layout.anchors[&format!("release_{i}")];
            assert_eq!(pos.page_index, i + 1);
            assert!((pos.y_pt - theme::MARGIN_TOP).abs() < 0.01);
        }
    }

    #[test]
    fn empty_input_still_produces_one_page() {
        let layout = paginate(&[], "test");
        assert_eq!(layout.pages.len(), 1);
        assert!(layout.pages[0].boxes.is_empty());
    }
}

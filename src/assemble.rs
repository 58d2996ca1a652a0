//! Document assembler – produces the flat flow of layout elements for the
//! whole document: a linked table of contents, then one anchored section per
//! release entry, separated by page breaks.
//!
//! The anchor for entry `i` is always `release_i`; the TOC row at position
//! `i` links to exactly that anchor, so TOC order, anchor order, and section
//! order are the same by construction.

use crate::blocks::{self, Block};
use crate::source::ReleaseEntry;

/// One row of the table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocRow {
    pub version: String,
    pub date: String,
    pub anchor: String,
}

/// One element of the flat document flow consumed by the layout stage.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowElement {
    /// Anchored release title.
    Title { text: String, anchor: String },
    /// Bolded "DATE OF RELEASE:" label followed by the upper-cased date.
    DateLine { date: String },
    SectionHeading(String),
    SubsectionHeading(String),
    Paragraph(String),
    ListItem { text: String, indent: usize },
    /// Two-column, fully bordered TOC table with a bold header row.
    TocTable(Vec<TocRow>),
    /// Fixed vertical gap in points.
    Spacer(f32),
    PageBreak,
}

/// Stable anchor id for the release entry at `index`.
pub fn anchor_id(index: usize) -> String {
    format!("release_{index}")
}

/// Build the full document flow from the loaded entries.
pub fn assemble(entries: &[ReleaseEntry]) -> Vec<FlowElement> {
    let mut flow = Vec::new();

    // Table of contents page.
    flow.push(FlowElement::SectionHeading("Table of Contents".to_string()));
    flow.push(FlowElement::Spacer(14.4));
    let rows = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| TocRow {
            version: entry.display_version().to_string(),
            date: entry.display_date().to_string(),
            anchor: anchor_id(i),
        })
        .collect();
    flow.push(FlowElement::TocTable(rows));
    flow.push(FlowElement::PageBreak);

    // One section per release.
    for (i, entry) in entries.iter().enumerate() {
        log::debug!(
            "Assembling release note {}/{}: {}",
            i + 1,
            entries.len(),
            entry.display_title()
        );

        flow.push(FlowElement::Title {
            text: entry.display_title().to_string(),
            anchor: anchor_id(i),
        });
        flow.push(FlowElement::DateLine {
            date: entry.display_date().to_uppercase(),
        });
        flow.push(FlowElement::Spacer(3.6));

        for block in blocks::convert_fragment(entry.body()) {
            flow.push(match block {
                Block::SectionHeading(t) => FlowElement::SectionHeading(t),
                Block::SubsectionHeading(t) => FlowElement::SubsectionHeading(t),
                Block::Paragraph(t) => FlowElement::Paragraph(t),
                Block::ListItem { text, indent } => FlowElement::ListItem { text, indent },
            });
        }

        if i + 1 < entries.len() {
            flow.push(FlowElement::PageBreak);
        }
    }

    flow
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(version: &str, title: &str, date: &str, body: &str) -> ReleaseEntry {
        ReleaseEntry {
            version: Some(version.to_string()),
            title: Some(title.to_string()),
            date: Some(date.to_string()),
            full_text: Some(body.to_string()),
        }
    }

    #[test]
    fn toc_rows_match_section_anchors() {
        let entries = vec![
            entry("1.0", "First", "Jan 1, 2025", "<p>A</p>"),
            entry("1.1", "Second", "Feb 1, 2025", "<p>B</p>"),
            entry("1.2", "Third", "Mar 1, 2025", "<p>C</p>"),
        ];
        let flow = assemble(&entries);

        let rows = flow
            .iter()
            .find_map(|el| match el {
                FlowElement::TocTable(rows) => Some(rows.clone()),
                _ => None,
            })
            .unwrap();
        let titles: Vec<&str> = flow
            .iter()
            .filter_map(|el| match el {
                FlowElement::Title { anchor, .. } => Some(anchor.as_str()),
                _ => None,
            })
            .collect();

        assert_eq!(rows.len(), titles.len());
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.anchor, anchor_id(i));
            assert_eq!(row.anchor, titles[i]);
        }
    }

    #[test]
    fn date_line_is_upper_cased() {
        let entries = vec![entry("1.0", "First", "March 3, 2025", "")];
        let flow = assemble(&entries);
        assert!(flow
            .iter()
            .any(|el| matches!(el, FlowElement::DateLine { date } if date == "MARCH 3, 2025")));
    }

    #[test]
    fn page_breaks_separate_sections_but_not_the_last() {
        let entries = vec![
            entry("1.0", "First", "Jan 1, 2025", ""),
            entry("1.1", "Second", "Feb 1, 2025", ""),
        ];
        let flow = assemble(&entries);
        let breaks = flow
            .iter()
            .filter(|el| matches!(el, FlowElement::PageBreak))
            .count();
        // One after the TOC, one between the two sections.
        assert_eq!(breaks, 2);
        assert!(!matches!(flow.last(), Some(FlowElement::PageBreak)));
    }

    #[test]
    fn missing_fields_use_display_fallbacks() {
        let flow = assemble(&[ReleaseEntry::default()]);
        assert!(flow.iter().any(
            |el| matches!(el, FlowElement::Title { text, .. } if text == "Unknown Release")
        ));
        assert!(flow
            .iter()
            .any(|el| matches!(el, FlowElement::DateLine { date } if date == "UNKNOWN DATE")));
        let rows = flow
            .iter()
            .find_map(|el| match el {
                FlowElement::TocTable(rows) => Some(rows.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(rows[0].version, "N/A");
    }
}

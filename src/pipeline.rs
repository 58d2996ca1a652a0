//! Pipeline – ties together loading, block conversion, assembly, layout,
//! pagination, page decoration, and rendering into a single call.

use std::fs;
use std::path::{Path, PathBuf};

use crate::assemble::assemble;
use crate::assets::resolve_logo;
use crate::decorate::decorate;
use crate::error::Error;
use crate::layout::layout_flow;
use crate::links::add_link_annotations;
use crate::page_model::DocumentLayout;
use crate::pagination::paginate;
use crate::render::render_document;
use crate::source::{self, ReleaseEntry};

pub use crate::render::PdfMetadata;

/// Configuration for one generation run.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Metadata embedded in the output PDF.
    pub metadata: PdfMetadata,
    /// Directory searched for the logo assets.
    pub asset_dir: PathBuf,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            metadata: PdfMetadata::default(),
            asset_dir: PathBuf::from("."),
        }
    }
}

/// Full pipeline: release entries → linked PDF bytes.
///
/// Returns the bytes together with the paginated layout (useful for
/// inspecting page count and anchor positions).
pub fn generate(
    entries: &[ReleaseEntry],
    options: &RenderOptions,
) -> Result<(Vec<u8>, DocumentLayout), Error> {
    // 1. Assemble the flat document flow (TOC + sections).
    let flow = assemble(entries);

    // 2. Lay out and paginate.
    let boxes = layout_flow(&flow);
    let mut layout = paginate(&boxes, &options.metadata.title);

    // 3. Decorate every page; the counter total comes from the actual
    //    pagination result.
    let logo = resolve_logo(&options.asset_dir);
    decorate(&mut layout, &logo);

    // 4. Render, then patch in the TOC link annotations.
    let bytes = render_document(&layout, &options.metadata, &logo);
    let bytes = add_link_annotations(&bytes, &layout)?;

    log::info!(
        "Rendered {} release notes across {} pages",
        entries.len(),
        layout.pages.len()
    );
    Ok((bytes, layout))
}

/// Load entries from `input` and write the finished PDF to `output`.
pub fn generate_to_file(
    input: &Path,
    output: &Path,
    options: &RenderOptions,
) -> Result<DocumentLayout, Error> {
    let entries = source::load_entries(input)?;
    let (bytes, layout) = generate(&entries, options)?;
    fs::write(output, &bytes).map_err(|source| Error::Io {
        path: output.to_path_buf(),
        source,
    })?;
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entries() -> Vec<ReleaseEntry> {
        vec![
            ReleaseEntry {
                version: Some("2.0".to_string()),
                title: Some("Major Release".to_string()),
                date: Some("June 1, 2025".to_string()),
                full_text: Some(
                    "<h1>Highlights</h1><p>New portal.</p><ul><li>Faster search</li></ul>"
                        .to_string(),
                ),
            },
            ReleaseEntry {
                version: Some("1.9".to_string()),
                title: Some("Maintenance".to_string()),
                date: Some("May 1, 2025".to_string()),
                full_text: Some("<p>Bug fixes.</p>".to_string()),
            },
        ]
    }

    #[test]
    fn pipeline_basic() {
        let dir = tempfile::tempdir().unwrap();
        let options = RenderOptions {
            asset_dir: dir.path().to_path_buf(),
            ..RenderOptions::default()
        };
        let (bytes, layout) = generate(&sample_entries(), &options).unwrap();
        assert_eq!(&bytes[0..5], b"%PDF-");
        // TOC page + one per release.
        assert_eq!(layout.pages.len(), 3);
        assert_eq!(layout.anchors.len(), 2);
    }

    #[test]
    fn pipeline_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let options = RenderOptions {
            asset_dir: dir.path().to_path_buf(),
            ..RenderOptions::default()
        };
        let entries = sample_entries();
        let (_, first) = generate(&entries, &options).unwrap();
        let (_, second) = generate(&entries, &options).unwrap();
        assert_eq!(first.to_json(), second.to_json());
    }
}

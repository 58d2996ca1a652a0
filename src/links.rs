//! Intra-document link annotations.
//!
//! printpdf's ops stream has no notion of link targets, so the TOC links
//! are patched into the finished PDF with `lopdf`: for each linking box, a
//! `GoTo` action pointing at the resolved anchor position, wrapped in a
//! borderless `Link` annotation on the source page.

use std::collections::HashMap;

use lopdf::{dictionary, Document, Object, ObjectId};

use crate::error::Error;
use crate::page_model::DocumentLayout;

/// Add one link annotation per linking box in `layout` and return the
/// re-serialised PDF. Boxes whose target anchor never resolved are skipped
/// with a warning.
pub fn add_link_annotations(pdf_bytes: &[u8], layout: &DocumentLayout) -> Result<Vec<u8>, Error> {
    let mut doc = Document::load_mem(pdf_bytes)?;
    // get_pages is keyed by 1-based page number; values iterate in order.
    let page_ids: Vec<ObjectId> = doc.get_pages().values().cloned().collect();
    let page_height = layout.page_height_pt;

    // Buffer the annotation objects first; page dictionaries are patched in
    // a second step.
    let mut annots_by_page: HashMap<usize, Vec<ObjectId>> = HashMap::new();

    for (page_idx, page) in layout.pages.iter().enumerate() {
        if page_idx >= page_ids.len() {
            break;
        }
        for pbox in &page.boxes {
            let target = match &pbox.link {
                Some(t) => t,
                None => continue,
            };
            let anchor = match layout.anchors.get(target) {
                Some(a) => a,
                None => {
                    log::warn!("Link target '{target}' has no anchor; skipping");
                    continue;
                }
            };
            if anchor.page_index >= page_ids.len() {
                continue;
            }

            let target_page_id = page_ids[anchor.page_index];
            let y_dest = page_height - anchor.y_pt;
            let dest = vec![
                Object::Reference(target_page_id),
                "FitH".into(),
                y_dest.into(),
            ];
            let action = dictionary! { "Type" => "Action", "S" => "GoTo", "D" => dest };
            let action_id = doc.add_object(action);

            let rect = vec![
                pbox.x.into(),
                (page_height - (pbox.y + pbox.height)).into(),
                (pbox.x + pbox.width).into(),
                (page_height - pbox.y).into(),
            ];
            let annot = dictionary! {
                "Type" => "Annot", "Subtype" => "Link", "Rect" => rect,
                "Border" => vec![0.into(), 0.into(), 0.into()], "A" => action_id,
            };
            let annot_id = doc.add_object(annot);
            annots_by_page.entry(page_idx).or_default().push(annot_id);
        }
    }

    for (page_idx, annot_ids) in annots_by_page {
        let page_dict = doc.get_object_mut(page_ids[page_idx])?.as_dict_mut()?;
        let refs: Vec<Object> = annot_ids.into_iter().map(Object::Reference).collect();
        match page_dict.get_mut(b"Annots") {
            Ok(Object::Array(existing)) => existing.extend(refs),
            _ => page_dict.set("Annots", Object::Array(refs)),
        }
    }

    let mut out = Vec::new();
    doc.save_to(&mut out).map_err(lopdf::Error::from)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::LogoAsset;
    use crate::page_model::{PageBox, PageLayout};
    use crate::render::{render_document, PdfMetadata};
    use crate::theme;

    #[test]
    fn unresolved_target_is_skipped_not_fatal() {
        let mut layout = DocumentLayout::new("test", theme::PAGE_WIDTH, theme::PAGE_HEIGHT);
        let mut pbox = PageBox::new(50.0, 100.0, 108.0, 20.0);
        pbox.link = Some("release_99".to_string());
        layout.pages.push(PageLayout {
            page_index: 0,
            boxes: vec![pbox],
        });

        let bytes = render_document(
            &layout,
            &PdfMetadata::default(),
            &LogoAsset::Branding("BRAND".to_string()),
        );
        let patched = add_link_annotations(&bytes, &layout).unwrap();
        assert_eq!(&patched[0..5], b"%PDF-");

        let doc = Document::load_mem(&patched).unwrap();
        for (_, page_id) in doc.get_pages() {
            let page = doc.get_object(page_id).unwrap().as_dict().unwrap();
            assert!(page.get(b"Annots").is_err(), "no annotations expected");
        }
    }
}

//! Page decorator – stamps the shared chrome onto every page after
//! pagination: logo (or branding text), header rule, footer rule,
//! attribution line, and the "Page N of total" counter.
//!
//! The total page count is read from the paginated layout itself, so the
//! counter is correct for any input size.

use crate::assets::LogoAsset;
use crate::fonts;
use crate::page_model::{DocumentLayout, ImageContent, PageBox, RuleStyle, TextContent, TextLine};
use crate::theme::{self, Color, TextStyle};

pub fn decorate(layout: &mut DocumentLayout, logo: &LogoAsset) {
    let total = layout.pages.len();

    for page in &mut layout.pages {
        let page_number = page.page_index + 1;

        // Logo, or branding text when no asset resolved.
        match logo.scaled_size() {
            Some((width, height)) => {
                let mut logo_box =
                    PageBox::new(theme::MARGIN_LEFT, theme::LOGO_TOP, width, height);
                logo_box.image = Some(ImageContent { width, height });
                page.boxes.push(logo_box);
            }
            None => {
                if let LogoAsset::Branding(text) = logo {
                    page.boxes.push(text_box(
                        theme::MARGIN_LEFT,
                        theme::BRAND_TEXT_TOP,
                        theme::BRAND_TEXT,
                        text,
                    ));
                }
            }
        }

        // Accent rule under the header region.
        page.boxes.push(rule_box(
            theme::HEADER_RULE_Y,
            RuleStyle {
                thickness: 1.0,
                color: Color::ACCENT.to_array(),
            },
        ));

        // Thin rule above the footer.
        page.boxes.push(rule_box(
            theme::FOOTER_RULE_Y,
            RuleStyle {
                thickness: 0.5,
                color: Color::BLACK.to_array(),
            },
        ));

        // Attribution, left-aligned.
        page.boxes.push(text_box(
            theme::MARGIN_LEFT,
            theme::FOOTER_TEXT_TOP,
            theme::FOOTER,
            theme::ATTRIBUTION,
        ));

        // Page counter, right-aligned against the content edge.
        let counter = format!("Page {page_number} of {total}");
        let counter_width = fonts::text_width(&counter, theme::FOOTER.size, theme::FOOTER.bold);
        page.boxes.push(text_box(
            theme::PAGE_WIDTH - theme::MARGIN_RIGHT - counter_width,
            theme::FOOTER_TEXT_TOP,
            theme::FOOTER,
            &counter,
        ));
    }
}

fn text_box(x: f32, y: f32, style: TextStyle, text: &str) -> PageBox {
    let mut pbox = PageBox::new(
        x,
        y,
        fonts::text_width(text, style.size, style.bold),
        style.line_height(),
    );
    pbox.text = Some(TextContent {
        lines: vec![TextLine {
            text: text.to_string(),
            x_offset: 0.0,
            y_offset: 0.0,
        }],
        font_size: style.size,
        bold: style.bold,
        color: style.color.to_array(),
        line_height: style.line_height(),
        list_marker: None,
    });
    pbox
}

fn rule_box(y: f32, rule: RuleStyle) -> PageBox {
    let mut pbox = PageBox::new(theme::MARGIN_LEFT, y, theme::CONTENT_WIDTH, 0.0);
    pbox.rule = Some(rule);
    pbox
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page_model::PageLayout;

    fn layout_with_pages(n: usize) -> DocumentLayout {
        let mut layout = DocumentLayout::new("test", theme::PAGE_WIDTH, theme::PAGE_HEIGHT);
        for i in 0..n {
            layout.pages.push(PageLayout {
                page_index: i,
                boxes: Vec::new(),
            });
        }
        layout
    }

    fn page_texts(page: &crate::page_model::PageLayout) -> Vec<String> {
        page.boxes
            .iter()
            .filter_map(|b| b.text.as_ref())
            .flat_map(|t| t.lines.iter().map(|l| l.text.clone()))
            .collect()
    }

    #[test]
    fn every_page_gets_counter_with_true_total() {
        let mut layout = layout_with_pages(3);
        decorate(&mut layout, &LogoAsset::Branding("BRAND".to_string()));
        for (i, page) in layout.pages.iter().enumerate() {
            let texts = page_texts(page);
            assert!(
                texts.contains(&format!("Page {} of 3", i + 1)),
                "page {i} texts: {texts:?}"
            );
            assert!(texts.contains(&theme::ATTRIBUTION.to_string()));
        }
    }

    #[test]
    fn branding_fallback_draws_text_not_image() {
        let mut layout = layout_with_pages(1);
        decorate(&mut layout, &LogoAsset::Branding("BRAND".to_string()));
        let page = &layout.pages[0];
        assert!(page.boxes.iter().all(|b| b.image.is_none()));
        assert!(page_texts(page).contains(&"BRAND".to_string()));
    }

    #[test]
    fn rules_are_drawn_on_each_page() {
        let mut layout = layout_with_pages(2);
        decorate(&mut layout, &LogoAsset::Branding("BRAND".to_string()));
        for page in &layout.pages {
            let rules: Vec<&PageBox> = page.boxes.iter().filter(|b| b.rule.is_some()).collect();
            assert_eq!(rules.len(), 2);
        }
    }
}

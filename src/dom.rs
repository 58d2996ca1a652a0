//! HTML fragment parser – converts a release-note body into a small DOM tree.
//!
//! Release bodies use a controlled subset of elements: p, h1-h3, ul, li,
//! with styling only via the `style` attribute. Anything else is kept as an
//! unknown container so its text is still reachable.

use std::collections::HashMap;

use thiserror::Error;

/// Raised when a fragment is structurally broken (a tag or quoted attribute
/// is left unterminated). Callers recover by stripping tags instead.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct FragmentError(String);

// ---------------------------------------------------------------------------
// DOM types
// ---------------------------------------------------------------------------

/// The tag name of a supported element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    P,
    H1,
    H2,
    H3,
    Ul,
    Li,
    Body,
    Html,
    Head,
    /// Catch-all for unknown tags – kept as transparent containers.
    Unknown(String),
}

impl Tag {
    pub fn from_str(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "p" => Tag::P,
            "h1" => Tag::H1,
            "h2" => Tag::H2,
            "h3" => Tag::H3,
            "ul" => Tag::Ul,
            "li" => Tag::Li,
            "body" => Tag::Body,
            "html" => Tag::Html,
            "head" => Tag::Head,
            _ => Tag::Unknown(s.to_string()),
        }
    }
}

/// A node in the fragment tree.
#[derive(Debug, Clone)]
pub enum DomNode {
    Element(ElementNode),
    Text(String),
}

/// An element node carrying tag, attributes, and children.
#[derive(Debug, Clone)]
pub struct ElementNode {
    pub tag: Tag,
    pub attributes: HashMap<String, String>,
    pub children: Vec<DomNode>,
}

impl ElementNode {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            attributes: HashMap::new(),
            children: Vec::new(),
        }
    }

    pub fn inline_style(&self) -> Option<&str> {
        self.attributes.get("style").map(|s| s.as_str())
    }

    /// Concatenated text of all descendant text nodes, in document order.
    pub fn inner_text(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }
}

fn collect_text(nodes: &[DomNode], out: &mut String) {
    for node in nodes {
        match node {
            DomNode::Text(t) => out.push_str(t),
            DomNode::Element(e) => collect_text(&e.children, out),
        }
    }
}

// ---------------------------------------------------------------------------
// Parser – simple recursive descent over the fragment
// ---------------------------------------------------------------------------

/// Parse an HTML fragment into a list of DOM nodes.
///
/// A hand-written parser for the controlled subset keeps dependencies
/// minimal; unclosed elements are tolerated (the element simply ends at
/// EOF), but a `<` opened and never closed, or an unterminated quoted
/// attribute, is reported as a [`FragmentError`].
pub fn parse_fragment(html: &str) -> Result<Vec<DomNode>, FragmentError> {
    let mut parser = Parser::new(html);
    let nodes = parser.parse_nodes();
    match parser.malformed {
        Some(msg) => Err(FragmentError(msg)),
        None => Ok(nodes),
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    malformed: Option<String>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            malformed: None,
        }
    }

    fn parse_nodes(&mut self) -> Vec<DomNode> {
        let mut nodes = Vec::new();
        loop {
            self.skip_whitespace_between_tags();
            if self.eof() || self.starts_with("</") || self.malformed.is_some() {
                break;
            }
            if let Some(node) = self.parse_node() {
                nodes.push(node);
            }
        }
        nodes
    }

    fn parse_node(&mut self) -> Option<DomNode> {
        if self.starts_with("<!--") {
            self.skip_comment();
            return None;
        }
        if self.starts_with("<!") || self.starts_with("<?") {
            // Skip doctype / processing instructions
            while !self.eof() && !self.starts_with(">") {
                self.advance(1);
            }
            if !self.eof() {
                self.advance(1); // skip '>'
            }
            return None;
        }
        if self.starts_with("<") {
            Some(self.parse_element())
        } else {
            Some(self.parse_text())
        }
    }

    fn parse_text(&mut self) -> DomNode {
        let start = self.pos;
        while !self.eof() && !self.starts_with("<") {
            self.advance(1);
        }
        let text = &self.input[start..self.pos];
        DomNode::Text(decode_entities(text))
    }

    fn parse_element(&mut self) -> DomNode {
        // Consume '<'
        self.advance(1);
        let tag_name = self.parse_tag_name();
        let tag = Tag::from_str(&tag_name);
        let mut elem = ElementNode::new(tag);

        // Parse attributes
        loop {
            self.skip_whitespace();
            if self.starts_with(">") || self.starts_with("/>") {
                break;
            }
            if self.eof() {
                self.malformed
                    .get_or_insert_with(|| format!("unterminated <{tag_name}> tag"));
                return DomNode::Element(elem);
            }
            let (key, value) = self.parse_attribute();
            if key.is_empty() {
                // Stray character inside the tag; skip it so the loop makes
                // progress.
                self.advance(1);
                continue;
            }
            elem.attributes.insert(key, value);
        }

        if self.starts_with("/>") {
            self.advance(2);
            return DomNode::Element(elem);
        }
        self.advance(1); // skip '>'

        // Parse children
        elem.children = self.parse_nodes();

        // Consume closing tag
        if self.starts_with("</") {
            self.advance(2);
            self.parse_tag_name(); // skip tag name
            self.skip_whitespace();
            if self.starts_with(">") {
                self.advance(1);
            }
        }

        DomNode::Element(elem)
    }

    fn parse_tag_name(&mut self) -> String {
        let start = self.pos;
        while !self.eof() {
            let c = self.current_char();
            if c.is_alphanumeric() || c == '-' || c == '_' {
                self.advance(1);
            } else {
                break;
            }
        }
        self.input[start..self.pos].to_string()
    }

    fn parse_attribute(&mut self) -> (String, String) {
        let key = self.parse_tag_name();
        self.skip_whitespace();
        if !self.starts_with("=") {
            return (key, String::new());
        }
        self.advance(1); // skip '='
        self.skip_whitespace();
        let value = self.parse_attr_value();
        (key, value)
    }

    fn parse_attr_value(&mut self) -> String {
        if self.starts_with("\"") || self.starts_with("'") {
            let quote = self.current_char();
            self.advance(1);
            let start = self.pos;
            while !self.eof() && self.current_char() != quote {
                self.advance(1);
            }
            let val = self.input[start..self.pos].to_string();
            if self.eof() {
                self.malformed
                    .get_or_insert_with(|| "unterminated quoted attribute value".to_string());
            } else {
                self.advance(1);
            }
            decode_entities(&val)
        } else {
            let start = self.pos;
            while !self.eof() {
                let c = self.current_char();
                if c.is_whitespace() || c == '>' || c == '/' {
                    break;
                }
                self.advance(1);
            }
            self.input[start..self.pos].to_string()
        }
    }

    fn skip_whitespace(&mut self) {
        while !self.eof() && self.current_char().is_whitespace() {
            self.advance(1);
        }
    }

    fn skip_whitespace_between_tags(&mut self) {
        // Skip runs of pure whitespace between elements; revert if the run
        // turns out to precede inline text.
        let saved = self.pos;
        while !self.eof() && self.current_char().is_whitespace() {
            self.advance(1);
        }
        if !self.eof() && !self.starts_with("<") {
            self.pos = saved;
        }
    }

    fn skip_comment(&mut self) {
        self.advance(4); // skip <!--
        while !self.eof() && !self.starts_with("-->") {
            self.advance(1);
        }
        if !self.eof() {
            self.advance(3);
        }
    }

    fn starts_with(&self, s: &str) -> bool {
        self.input[self.pos..].starts_with(s)
    }

    fn eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn current_char(&self) -> char {
        self.input[self.pos..].chars().next().unwrap()
    }

    fn advance(&mut self, n: usize) {
        // Advance by `n` characters (not bytes).
        for _ in 0..n {
            if let Some(c) = self.input[self.pos..].chars().next() {
                self.pos += c.len_utf8();
            }
        }
    }
}

fn decode_entities(s: &str) -> String {
    s.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", "\u{00A0}")
}

/// Remove everything between `<` and `>` and decode entities. The recovery
/// path for fragments [`parse_fragment`] rejects.
pub fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    decode_entities(&out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_styled_paragraph() {
        let html = r#"<p style="color: #2f5496; font-size: 16pt">Overview</p>"#;
        let nodes = parse_fragment(html).unwrap();
        assert_eq!(nodes.len(), 1);
        if let DomNode::Element(e) = &nodes[0] {
            assert_eq!(e.tag, Tag::P);
            assert_eq!(e.inline_style(), Some("color: #2f5496; font-size: 16pt"));
            assert_eq!(e.inner_text(), "Overview");
        } else {
            panic!("Expected element");
        }
    }

    #[test]
    fn parse_nested_list() {
        let html = "<ul><li>Group A: <ul><li>X</li><li>Y</li></ul></li></ul>";
        let nodes = parse_fragment(html).unwrap();
        assert_eq!(nodes.len(), 1);
        if let DomNode::Element(ul) = &nodes[0] {
            assert_eq!(ul.tag, Tag::Ul);
            assert_eq!(ul.children.len(), 1);
            assert_eq!(ul.inner_text(), "Group A: XY");
        } else {
            panic!("Expected ul element");
        }
    }

    #[test]
    fn unterminated_tag_is_rejected() {
        assert!(parse_fragment("<p style=\"color").is_err());
        assert!(parse_fragment("<p class=x").is_err());
    }

    #[test]
    fn unclosed_element_is_tolerated() {
        // Missing </p> just ends the element at EOF.
        let nodes = parse_fragment("<p>Dangling").unwrap();
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn entities_are_decoded() {
        let nodes = parse_fragment("<p>A &amp; B</p>").unwrap();
        if let DomNode::Element(e) = &nodes[0] {
            assert_eq!(e.inner_text(), "A & B");
        } else {
            panic!("Expected element");
        }
    }

    #[test]
    fn strip_tags_drops_markup() {
        assert_eq!(strip_tags("<p>Hello <b>world</b></p>"), "Hello world");
        assert_eq!(strip_tags("no markup"), "no markup");
    }
}

//! # notepress – YAML release notes → PDF generator
//!
//! This crate turns a YAML list of release-note entries (version, title,
//! date, HTML-formatted body) into a paginated, branded PDF with a linked
//! table of contents. The pipeline stages are:
//!
//! 1. **Load** – YAML file → ordered [`source::ReleaseEntry`] list ([`source`])
//! 2. **Convert** – each entry's HTML fragment → typed text blocks ([`blocks`])
//! 3. **Assemble** – TOC + anchored sections as one flat flow ([`assemble`])
//! 4. **Layout & paginate** – flow → positioned boxes → pages ([`layout`], [`pagination`])
//! 5. **Decorate** – per-page logo, rules, footer, page counter ([`decorate`])
//! 6. **Render** – emit PDF bytes via printpdf, then patch in intra-document
//!    link annotations with lopdf ([`render`], [`links`])

pub mod assemble;
pub mod assets;
pub mod blocks;
pub mod decorate;
pub mod dom;
pub mod error;
pub mod fonts;
pub mod layout;
pub mod links;
pub mod page_model;
pub mod pagination;
pub mod pipeline;
pub mod render;
pub mod source;
pub mod theme;

// Re-exports for convenience
pub use error::Error;
pub use pipeline::{generate, generate_to_file, PdfMetadata, RenderOptions};
pub use source::{load_entries, ReleaseEntry};

//! Error taxonomy for the generator.
//!
//! Input problems (unreadable file, bad YAML, missing top-level key) are
//! fatal and surface here. Malformed HTML fragments and missing logo assets
//! are *not* errors – those degrade locally inside [`crate::blocks`] and
//! [`crate::assets`] and rendering continues.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse release notes: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("release notes file has no 'releaseNotesList' key")]
    MissingKey,

    #[error("link annotation pass failed: {0}")]
    Annotate(#[from] lopdf::Error),
}

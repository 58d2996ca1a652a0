//! Source loader – reads the ordered release-note list from a YAML file.
//!
//! The file holds a single `releaseNotesList` key with one record per
//! release. Field order in the list is display order. Every field is
//! optional in the data; display accessors supply the documented fallbacks
//! so downstream stages never deal with `Option`s.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Error;

/// One release-note record as it appears in the YAML source.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReleaseEntry {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    /// HTML fragment with the formatted body text.
    #[serde(default, rename = "fullText")]
    pub full_text: Option<String>,
}

impl ReleaseEntry {
    pub fn display_version(&self) -> &str {
        self.version.as_deref().unwrap_or("N/A")
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Unknown Release")
    }

    pub fn display_date(&self) -> &str {
        self.date.as_deref().unwrap_or("Unknown Date")
    }

    pub fn body(&self) -> &str {
        self.full_text.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Deserialize)]
struct SourceFile {
    #[serde(rename = "releaseNotesList")]
    release_notes_list: Option<Vec<ReleaseEntry>>,
}

/// Parse release entries out of YAML text. [`Error::MissingKey`] if the
/// top-level `releaseNotesList` key is absent.
pub fn parse_entries(yaml: &str) -> Result<Vec<ReleaseEntry>, Error> {
    let file: SourceFile = serde_yaml::from_str(yaml)?;
    file.release_notes_list.ok_or(Error::MissingKey)
}

/// Load release entries from a YAML file on disk.
pub fn load_entries(path: &Path) -> Result<Vec<ReleaseEntry>, Error> {
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let entries = parse_entries(&text)?;
    log::info!(
        "Loaded {} release notes entries from '{}'",
        entries.len(),
        path.display()
    );
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_entries_in_order() {
        let yaml = r#"
releaseNotesList:
  - version: "2.1"
    title: "Spring Release"
    date: "March 3, 2025"
    fullText: "<p>Body</p>"
  - version: "2.0"
    title: "Winter Release"
    date: "January 10, 2025"
"#;
        let entries = parse_entries(yaml).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].display_version(), "2.1");
        assert_eq!(entries[1].display_title(), "Winter Release");
        assert_eq!(entries[1].body(), "");
    }

    #[test]
    fn missing_top_level_key_is_fatal() {
        let err = parse_entries("somethingElse: []").unwrap_err();
        assert!(matches!(err, Error::MissingKey));
    }

    #[test]
    fn unparsable_yaml_is_fatal() {
        let err = parse_entries("releaseNotesList: [ {").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn missing_fields_get_fallbacks() {
        let entry = ReleaseEntry::default();
        assert_eq!(entry.display_version(), "N/A");
        assert_eq!(entry.display_title(), "Unknown Release");
        assert_eq!(entry.display_date(), "Unknown Date");
    }

    #[test]
    fn missing_file_reports_io_error() {
        let err = load_entries(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}

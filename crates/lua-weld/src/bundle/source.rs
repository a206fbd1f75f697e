//! Loaded bundle inputs and the text helpers shared by every bundle shape

use crate::error::{WeldError, WeldResult};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::warn;

/// UTF-8 byte-order mark
pub const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Prefix marking the one-line description at the top of a script
pub const DESCRIPTION_PREFIX: &str = "--";

/// A resource file read fully into memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleSource {
    /// Path as supplied by the caller
    pub path: PathBuf,
    /// File contents with any leading BOM removed
    pub bytes: Vec<u8>,
}

impl BundleSource {
    /// Wrap in-memory contents; a leading BOM is dropped
    pub fn new(path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into();
        let bytes = match bytes.strip_prefix(UTF8_BOM) {
            Some(rest) => rest.to_vec(),
            None => bytes,
        };
        Self {
            path: path.into(),
            bytes,
        }
    }

    /// Read a file from disk
    pub fn load(path: &Path) -> WeldResult<Self> {
        let bytes = WeldError::read_source_bytes(path)?;
        Ok(Self::new(path, bytes))
    }

    /// Contents decoded as UTF-8, invalid sequences replaced
    pub fn text(&self) -> String {
        match String::from_utf8_lossy(&self.bytes) {
            Cow::Borrowed(text) => text.to_string(),
            Cow::Owned(text) => {
                warn!(
                    "{} is not valid UTF-8, invalid sequences replaced",
                    self.path.display()
                );
                text
            }
        }
    }

    /// File name without its last extension
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Name of the directory containing the file
    pub fn dir_name(&self) -> String {
        self.path
            .parent()
            .and_then(Path::file_name)
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Read every path in order; the first missing file aborts
pub fn load_sources<P: AsRef<Path>>(paths: &[P]) -> WeldResult<Vec<BundleSource>> {
    paths.iter().map(|p| BundleSource::load(p.as_ref())).collect()
}

/// Split off a leading `-- description` line
///
/// Returns the description (comment marker and surrounding whitespace
/// removed) and the remaining text. Without such a line the description is
/// empty and the text is returned whole.
pub fn split_description(text: &str) -> (String, &str) {
    let (first, rest) = match text.split_once('\n') {
        Some((first, rest)) => (first, rest),
        None => (text, ""),
    };
    match first.strip_prefix(DESCRIPTION_PREFIX) {
        Some(desc) => (desc.trim().to_string(), rest),
        None => (String::new(), text),
    }
}

/// Escape text for a double-quoted C string literal
pub fn escape_c_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
    out
}

/// Turn a file name into a C identifier fragment
pub fn c_identifier(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bom_is_stripped() {
        let source = BundleSource::new("a.lua", b"\xEF\xBB\xBFprint(1)".to_vec());
        assert_eq!(source.bytes, b"print(1)");

        let plain = BundleSource::new("b.lua", b"print(2)".to_vec());
        assert_eq!(plain.bytes, b"print(2)");
    }

    #[test]
    fn test_split_description() {
        let (desc, body) = split_description("-- Empty node script\nlocal M = {}\n");
        assert_eq!(desc, "Empty node script");
        assert_eq!(body, "local M = {}\n");

        let (desc, body) = split_description("local M = {}\nreturn M\n");
        assert_eq!(desc, "");
        assert_eq!(body, "local M = {}\nreturn M\n");

        let (desc, body) = split_description("--only a description");
        assert_eq!(desc, "only a description");
        assert_eq!(body, "");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let source = BundleSource::new("bad.lua", b"print(\xFF)".to_vec());
        assert_eq!(source.text(), "print(\u{FFFD})");

        let good = BundleSource::new("good.lua", b"print(1)".to_vec());
        assert_eq!(good.text(), "print(1)");
    }

    #[test]
    fn test_escape_c_string() {
        assert_eq!(escape_c_string(r#"print("a\b")"#), r#"print(\"a\\b\")"#);
    }

    #[test]
    fn test_names() {
        let source = BundleSource::new("templates/Node/empty.lua", Vec::new());
        assert_eq!(source.stem(), "empty");
        assert_eq!(source.dir_name(), "Node");
        assert_eq!(c_identifier("my-script.lua"), "my_script_lua");
    }
}

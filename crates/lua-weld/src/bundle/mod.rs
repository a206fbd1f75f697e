//! Resource bundling
//!
//! Embeds external script and text files into generated headers:
//! - `templates`: script templates as a `ScriptTemplate` table
//! - `codes`: raw scripts as byte-escaped `const char*` strings
//! - `licenses`: third-party licenses as a sentinel-terminated table
//!
//! Every shape strips a leading UTF-8 BOM and renders entirely in memory.

pub mod codes;
pub mod licenses;
pub mod source;
pub mod templates;

pub use codes::CodeBundle;
pub use licenses::LicenseBundle;
pub use source::{load_sources, BundleSource};
pub use templates::{TemplateBundle, TemplateEntry};

use crate::error::WeldResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A header layout for a list of bundled files
pub trait BundleFormat {
    /// Render the complete header for the given sources, in order
    fn render(&self, sources: &[BundleSource]) -> String;
}

/// The bundle shapes known to the CLI and configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleKind {
    /// Script template table
    Templates,
    /// Byte-escaped script strings
    Codes,
    /// License table
    Licenses,
}

impl BundleKind {
    /// Generator for this shape
    pub fn format(self) -> Box<dyn BundleFormat> {
        match self {
            BundleKind::Templates => Box::new(TemplateBundle),
            BundleKind::Codes => Box::new(CodeBundle),
            BundleKind::Licenses => Box::new(LicenseBundle::new()),
        }
    }

    /// Section and command name
    pub fn as_str(self) -> &'static str {
        match self {
            BundleKind::Templates => "templates",
            BundleKind::Codes => "codes",
            BundleKind::Licenses => "licenses",
        }
    }
}

/// Read `files` in order and render them with `format`
///
/// Nothing is rendered unless every file could be read.
pub fn bundle<P: AsRef<Path>>(format: &dyn BundleFormat, files: &[P]) -> WeldResult<String> {
    let sources = load_sources(files)?;
    Ok(format.render(&sources))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WeldError;

    #[test]
    fn test_bundle_reads_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.lua");
        let b = dir.path().join("b.lua");
        std::fs::write(&a, "A").unwrap();
        std::fs::write(&b, "B").unwrap();

        let header = bundle(BundleKind::Codes.format().as_ref(), &[&b, &a]).unwrap();
        let pos_b = header.find("code_b_lua").unwrap();
        let pos_a = header.find("code_a_lua").unwrap();
        assert!(pos_b < pos_a);
    }

    #[test]
    fn test_bundle_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone.lua");

        let err = bundle(&TemplateBundle, &[&missing]).unwrap_err();
        assert!(matches!(err, WeldError::SourceNotFound(_)));
    }
}

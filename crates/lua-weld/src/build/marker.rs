//! Staleness marker for the binding header
//!
//! The marker sits next to the header and records a SHA-256 fingerprint of
//! the header text followed by the declaration files that produced it. The
//! build system compares markers; lua-weld itself only uses one to avoid
//! rewriting an unchanged header.
//!
//! ```text
//! /* THIS FILE IS GENERATED DO NOT EDIT */
//! // 5f2b...e1
//! //wrapper/Foo.h
//! //wrapper/Bar.h
//! ```

use crate::codegen::GENERATED_BANNER;
use crate::error::{WeldError, WeldResult};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// Hex-encoded SHA-256 of generated text
pub fn fingerprint(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Parsed or to-be-written marker contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerFile {
    /// Fingerprint of the binding header
    pub fingerprint: String,
    /// Declaration files in input order
    pub sources: Vec<PathBuf>,
}

impl MarkerFile {
    /// Marker for a header text and its sources
    pub fn for_header(header: &str, sources: &[PathBuf]) -> Self {
        Self {
            fingerprint: fingerprint(header),
            sources: sources.to_vec(),
        }
    }

    /// Render the marker text
    pub fn render(&self) -> String {
        let mut output = format!("{}\n// {}\n", GENERATED_BANNER, self.fingerprint);
        for source in &self.sources {
            output.push_str(&format!("//{}\n", source.display()));
        }
        output
    }

    /// Parse marker text; `None` if it is not a marker
    pub fn parse(text: &str) -> Option<Self> {
        let mut lines = text.lines();
        if lines.next()? != GENERATED_BANNER {
            return None;
        }
        let fingerprint = lines.next()?.strip_prefix("// ")?.trim().to_string();
        if fingerprint.is_empty() {
            return None;
        }
        let sources = lines
            .map(|line| line.strip_prefix("//").map(PathBuf::from))
            .collect::<Option<Vec<_>>>()?;
        Some(Self {
            fingerprint,
            sources,
        })
    }

    /// Read a marker from disk; a missing or unrecognized file yields `None`
    pub fn read(path: &Path) -> WeldResult<Option<Self>> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(Self::parse(&text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(WeldError::io(path, e)),
        }
    }
}

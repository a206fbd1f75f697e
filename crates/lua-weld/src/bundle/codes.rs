//! Raw script code strings
//!
//! Embeds each script as a `const char*` whose every byte is written as a
//! `\xNN` escape, so no content can break out of the literal.

use crate::bundle::source::{c_identifier, BundleSource};
use crate::bundle::BundleFormat;
use crate::codegen::GENERATED_BANNER;
use std::fmt::Write;

/// Generator for the embedded script code header
#[derive(Debug, Clone, Default)]
pub struct CodeBundle;

impl CodeBundle {
    /// C variable name for a source: `code_` plus its sanitized file name
    pub fn variable_name(source: &BundleSource) -> String {
        let file_name = source
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("code_{}", c_identifier(&file_name))
    }

    /// Hex-escape every byte
    pub fn escape_bytes(bytes: &[u8]) -> String {
        let mut out = String::with_capacity(bytes.len() * 4);
        for b in bytes {
            let _ = write!(out, "\\x{b:02x}");
        }
        out
    }
}

impl BundleFormat for CodeBundle {
    fn render(&self, sources: &[BundleSource]) -> String {
        let mut output = String::new();
        output.push_str(GENERATED_BANNER);
        output.push('\n');
        output.push_str("#ifndef _LUA_CODES_GEN_H\n#define _LUA_CODES_GEN_H\n");
        for source in sources {
            output.push_str(&format!("\n// {}", source.path.display()));
            output.push_str(&format!(
                "\nconst char* {} = \"{}\";\n",
                Self::variable_name(source),
                Self::escape_bytes(&source.bytes)
            ));
        }
        output.push_str("\n#endif\n");
        output
    }
}

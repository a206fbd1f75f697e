//! Third-party license table
//!
//! Each license file is `<homepage>\n<license text>`. Paragraphs are folded
//! into one literal: non-empty lines are joined with spaces and blank lines
//! become `\n\n`.

use crate::bundle::source::{escape_c_string, BundleSource};
use crate::bundle::BundleFormat;
use crate::codegen::GENERATED_BANNER;

/// Generator for the license table header
#[derive(Debug, Clone)]
pub struct LicenseBundle {
    struct_name: String,
    table_name: String,
}

impl Default for LicenseBundle {
    fn default() -> Self {
        Self {
            struct_name: "SpikeLicenseInfo".to_string(),
            table_name: "SPIKE_LICENSE".to_string(),
        }
    }
}

impl LicenseBundle {
    /// Create a generator with the default struct and table names
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the emitted struct and table names
    pub fn with_names(mut self, struct_name: impl Into<String>, table_name: impl Into<String>) -> Self {
        self.struct_name = struct_name.into();
        self.table_name = table_name.into();
        self
    }

    /// `(name, homepage, folded license)` for one source
    pub fn entry(source: &BundleSource) -> (String, String, String) {
        let text = source.text();
        let mut lines = text.lines();
        let homepage = lines.next().unwrap_or_default().trim_end().to_string();

        let mut license = String::new();
        for line in lines {
            let line = line.trim_end();
            if line.is_empty() {
                license.push_str("\\n\\n");
            } else {
                license.push_str(&escape_c_string(line));
                license.push(' ');
            }
        }

        (source.stem(), homepage, license)
    }
}

impl BundleFormat for LicenseBundle {
    fn render(&self, sources: &[BundleSource]) -> String {
        let mut output = String::new();
        output.push_str(GENERATED_BANNER);
        output.push_str("\n\n#pragma once\n\n");
        output.push_str(&format!(
            "struct {} {{\n\tconst char* name;\n\tconst char* homepage;\n\tconst char* license;\n}};\n\n",
            self.struct_name
        ));
        output.push_str(&format!(
            "static const struct {} {}[] = {{\n",
            self.struct_name, self.table_name
        ));
        for source in sources {
            let (name, homepage, license) = Self::entry(source);
            output.push_str(&format!(
                "    {{ \"{}\", \"{}\", \"{}\", }},\n",
                escape_c_string(&name),
                escape_c_string(&homepage),
                license
            ));
        }
        output.push_str("    { nullptr, nullptr, nullptr },\n};\n");
        output
    }
}

//! Script template table
//!
//! Embeds Lua script templates as `ScriptLanguage::ScriptTemplate` entries.
//! Each file contributes its directory name, file stem, the text of its
//! `-- description` line and the remaining body.

use crate::bundle::source::{escape_c_string, split_description, BundleSource};
use crate::bundle::BundleFormat;
use crate::codegen::GENERATED_BANNER;

/// One template row before rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    /// Directory the template lives in (the class it inherits)
    pub dir: String,
    /// Template name
    pub name: String,
    /// Description taken from the first line
    pub description: String,
    /// Body, one `\n`-terminated line per source line, right-trimmed
    pub body: String,
}

impl TemplateEntry {
    /// Build the entry for a loaded source
    pub fn from_source(source: &BundleSource) -> Self {
        let text = source.text();
        let (description, rest) = split_description(&text);

        let mut body = String::new();
        for line in rest.lines() {
            body.push_str(line.trim_end_matches([' ', '\r', '\n', '\t']));
            body.push('\n');
        }

        Self {
            dir: source.dir_name(),
            name: source.stem(),
            description,
            body,
        }
    }

    fn render(&self) -> String {
        format!(
            "    {{ String(\"{}\"), String(\"{}\"), String(\"{}\"), String(\"{}\") }},\n",
            escape_c_string(&self.dir),
            escape_c_string(&self.name),
            escape_c_string(&self.description),
            escape_c_string(&self.body).replace('\n', "\\n"),
        )
    }
}

/// Generator for the script template table header
#[derive(Debug, Clone, Default)]
pub struct TemplateBundle;

impl BundleFormat for TemplateBundle {
    fn render(&self, sources: &[BundleSource]) -> String {
        let mut output = String::new();
        output.push_str(GENERATED_BANNER);
        output.push_str("\n\n");
        output.push_str("#ifndef _LUACODE_TEMPLATES_H\n#define _LUACODE_TEMPLATES_H\n\n");
        output.push_str(
            "#include \"core/object/object.h\"\n#include \"core/object/script_language.h\"\n\n",
        );
        output.push_str(&format!(
            "static const int LUA_TEMPLATES_ARRAY_SIZE = {};\n",
            sources.len()
        ));
        output.push_str("static const struct ScriptLanguage::ScriptTemplate LUA_TEMPLATES[] = {\n");
        for source in sources {
            output.push_str(&TemplateEntry::from_source(source).render());
        }
        output.push_str("    { String(), String(), String(), String() },\n");
        output.push_str("};\n\n#endif\n");
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_entry_strips_bom_and_description() {
        let source = BundleSource::new(
            "templates/Node/empty.lua",
            b"\xEF\xBB\xBF-- Empty node script\nlocal M = {}   \r\nreturn M\n".to_vec(),
        );

        let entry = TemplateEntry::from_source(&source);

        assert_eq!(
            entry,
            TemplateEntry {
                dir: "Node".into(),
                name: "empty".into(),
                description: "Empty node script".into(),
                body: "local M = {}\nreturn M\n".into(),
            }
        );
    }

    #[test]
    fn test_table_render() {
        let sources = vec![BundleSource::new(
            "templates/Object/hello.lua",
            b"-- Says hello\nprint(\"hello\")\n".to_vec(),
        )];

        let header = TemplateBundle.render(&sources);

        assert!(header.starts_with("/* THIS FILE IS GENERATED DO NOT EDIT */\n"));
        assert!(header.contains("static const int LUA_TEMPLATES_ARRAY_SIZE = 1;\n"));
        assert!(header.contains(
            "    { String(\"Object\"), String(\"hello\"), String(\"Says hello\"), String(\"print(\\\"hello\\\")\\n\") },\n"
        ));
        assert!(header.ends_with("    { String(), String(), String(), String() },\n};\n\n#endif\n"));
    }
}

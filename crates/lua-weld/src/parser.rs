//! Declaration scanner
//!
//! Recognizes member-function shapes in otherwise arbitrary declaration
//! text:
//!
//! ```text
//! line      := ws* word ws+ word ws* '(' args ')' any*
//! args      := <empty> | type (',' type)*
//! ```
//!
//! Lines that do not fit are skipped, never rejected.

use crate::error::{WeldError, WeldResult};
use crate::ir::{BindingSet, SignatureRecord, TypeName};
use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;
use tracing::{debug, trace};

lazy_static! {
    /// `returnType name(args)` anchored at line start, leading whitespace allowed
    static ref SIGNATURE_REGEX: Regex = Regex::new(r"^\s*(\w+)\s+(\w+)\s*\((.*)\)").unwrap();
}

/// Parse a single declaration line
///
/// Returns `None` for any line that is not shaped like a member signature.
pub fn parse_line(line: &str) -> Option<SignatureRecord> {
    let caps = SIGNATURE_REGEX.captures(line)?;
    Some(SignatureRecord {
        return_type: caps[1].to_string(),
        name: caps[2].to_string(),
        arg_types: split_args(&caps[3]),
    })
}

/// Split a raw argument list into type names
///
/// Each piece has surrounding whitespace trimmed; inner text is kept verbatim.
/// Empty pieces are dropped, so a blank list yields no arguments.
pub fn split_args(raw: &str) -> Vec<TypeName> {
    raw.split(',')
        .map(str::trim)
        .filter(|arg| !arg.is_empty())
        .map(str::to_string)
        .collect()
}

/// Extract every signature from declaration text, top to bottom
pub fn parse_declarations(text: &str) -> Vec<SignatureRecord> {
    let mut records = Vec::new();
    for (index, line) in text.lines().enumerate() {
        match parse_line(line) {
            Some(record) => records.push(record),
            None => trace!(line = index + 1, "skipping non-signature line"),
        }
    }
    records
}

/// Host type name for a declaration file: its file name up to the first `.`
pub fn type_name_from_path(path: &Path) -> TypeName {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match file_name.split_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => file_name,
    }
}

/// Read declaration files in order and collect them into a [`BindingSet`]
///
/// Every file is read before anything is returned; a missing or unreadable
/// file aborts the scan.
pub fn scan_files<P: AsRef<Path>>(paths: &[P]) -> WeldResult<BindingSet> {
    let mut set = BindingSet::new();
    for path in paths {
        let path = path.as_ref();
        let text = WeldError::read_source(path)?;
        let type_name = type_name_from_path(path);
        let records = parse_declarations(&text);
        debug!(
            "Scanned {} for {}: {} member(s)",
            path.display(),
            type_name,
            records.len()
        );
        set.add_source(&type_name, path, records);
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_signature() {
        let record = parse_line("int get_value(int)").unwrap();
        assert_eq!(record, SignatureRecord::new("int", "get_value").arg("int"));
    }

    #[test]
    fn test_leading_whitespace_and_trailing_text() {
        let record = parse_line("\t  void set_name(String);  // setter").unwrap();
        assert_eq!(record.return_type, "void");
        assert_eq!(record.name, "set_name");
        assert_eq!(record.arg_types, vec!["String"]);
    }

    #[test]
    fn test_empty_args_yield_no_types() {
        assert!(parse_line("String __tostring()").unwrap().arg_types.is_empty());
        assert!(parse_line("void clear(  )").unwrap().arg_types.is_empty());
    }

    #[test]
    fn test_multiple_args_trimmed() {
        let record = parse_line("bool move(int, float ,  String)").unwrap();
        assert_eq!(record.arg_types, vec!["int", "float", "String"]);
    }

    #[test]
    fn test_empty_pieces_dropped() {
        let record = parse_line("void f(int, )").unwrap();
        assert_eq!(record.arg_types, vec!["int"]);
        assert_eq!(parse_line("void g(, float,,)").unwrap().arg_types, vec!["float"]);
    }

    #[test]
    fn test_qualified_types_kept_verbatim() {
        let record = parse_line("void load(const String &path)").unwrap();
        assert_eq!(record.arg_types, vec!["const String &path"]);
    }

    #[test]
    fn test_non_matching_lines_skipped() {
        assert!(parse_line("").is_none());
        assert!(parse_line("// int commented(int)").is_none());
        assert!(parse_line("#include \"foo.h\"").is_none());
        assert!(parse_line("const String &name() const;").is_none());
        assert!(parse_line("get_value(int)").is_none());
        assert!(parse_line("int value;").is_none());
    }

    #[test]
    fn test_parse_declarations_keeps_file_order() {
        let text = "/* Foo members */\n\
                    int get_value(int)\n\
                    \n\
                    garbage line\n\
                    void set_name(String)\n\
                    String __tostring()\n";
        let names: Vec<_> = parse_declarations(text)
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["get_value", "set_name", "__tostring"]);
    }

    #[test]
    fn test_type_name_from_path() {
        assert_eq!(type_name_from_path(Path::new("wrapper/Foo.h")), "Foo");
        assert_eq!(type_name_from_path(Path::new("Node2D.gen.h")), "Node2D");
        assert_eq!(type_name_from_path(Path::new("Bare")), "Bare");
    }

    #[test]
    fn test_scan_files_missing_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("Foo.h");
        std::fs::write(&good, "int get_value(int)\n").unwrap();
        let missing = dir.path().join("Bar.h");

        let err = scan_files(&[good, missing.clone()]).unwrap_err();
        assert!(matches!(err, WeldError::SourceNotFound(p) if p == missing));
    }

    #[test]
    fn test_scan_files_empty_declaration_still_registers_type() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("Empty.h");
        std::fs::write(&empty, "// nothing to bind\n").unwrap();

        let set = scan_files(&[empty]).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.get("Empty").unwrap().members.is_empty());
    }
}

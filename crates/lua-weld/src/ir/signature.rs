//! Member signature records
//!
//! A [`SignatureRecord`] is what the declaration scanner produces for every
//! line shaped like `ReturnType name(ArgType, ...)`.

use serde::{Deserialize, Serialize};

/// Textual name of a host type. Compared verbatim, never normalized.
pub type TypeName = String;

/// Return type marking a member that produces no value
pub const VOID_TYPE: &str = "void";

/// Member name the guest runtime calls to turn a value into a string
pub const TOSTRING_MEMBER: &str = "__tostring";

/// Member name the guest runtime calls when collecting a value
pub const FINALIZER_MEMBER: &str = "__gc";

/// One member function extracted from declaration text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignatureRecord {
    /// Declared return type
    pub return_type: TypeName,
    /// Member name
    pub name: String,
    /// Argument types in declaration order (no parameter names)
    pub arg_types: Vec<TypeName>,
}

impl SignatureRecord {
    /// Create a record with no arguments
    pub fn new(return_type: impl Into<TypeName>, name: impl Into<String>) -> Self {
        Self {
            return_type: return_type.into(),
            name: name.into(),
            arg_types: Vec::new(),
        }
    }

    /// Append an argument type
    pub fn arg(mut self, ty: impl Into<TypeName>) -> Self {
        self.arg_types.push(ty.into());
        self
    }

    /// Replace the argument list
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<TypeName>,
    {
        self.arg_types = args.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the member returns nothing
    pub fn is_void(&self) -> bool {
        self.return_type == VOID_TYPE
    }

    /// Whether this is the string-conversion member
    pub fn is_tostring(&self) -> bool {
        self.name == TOSTRING_MEMBER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builder() {
        let record = SignatureRecord::new("int", "get_value").arg("int").arg("bool");

        assert_eq!(record.return_type, "int");
        assert_eq!(record.name, "get_value");
        assert_eq!(record.arg_types, vec!["int", "bool"]);
        assert!(!record.is_void());
        assert!(!record.is_tostring());
    }

    #[test]
    fn test_special_members() {
        assert!(SignatureRecord::new("void", "clear").is_void());
        assert!(SignatureRecord::new("String", "__tostring").is_tostring());
    }
}

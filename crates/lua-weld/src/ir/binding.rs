//! Host types queued for binding
//!
//! [`BindingSet`] keeps types in the order they were first encountered.
//! Header output, registration order and the umbrella entry point all follow
//! that order, so it is stored explicitly instead of relying on hash order.

use crate::ir::{SignatureRecord, TypeName};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One host type and the members extracted for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeBinding {
    /// Host type name
    pub type_name: TypeName,
    /// Declaration files that contributed members, in input order
    pub sources: Vec<PathBuf>,
    /// Extracted members in declaration order
    pub members: Vec<SignatureRecord>,
}

impl TypeBinding {
    /// Create a binding with no members
    pub fn new(type_name: impl Into<TypeName>) -> Self {
        Self {
            type_name: type_name.into(),
            sources: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Add a member
    pub fn member(mut self, record: SignatureRecord) -> Self {
        self.members.push(record);
        self
    }

    /// Name of the generated wrapper for a member
    pub fn wrapper_name(&self, member: &str) -> String {
        format!("godot_{}_{}", self.type_name, member)
    }

    /// Name of the generated registration function
    pub fn register_fn_name(&self) -> String {
        format!("register_godot_{}", self.type_name)
    }
}

/// Ordered collection of every type processed in one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingSet {
    types: IndexMap<TypeName, TypeBinding>,
}

impl BindingSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the entry for a type, creating it on first encounter
    pub fn entry(&mut self, type_name: &str) -> &mut TypeBinding {
        self.types
            .entry(type_name.to_string())
            .or_insert_with(|| TypeBinding::new(type_name))
    }

    /// Record the members extracted from one declaration file
    ///
    /// A type seen again (two files sharing a stem) keeps its original
    /// position and has the new members appended.
    pub fn add_source(&mut self, type_name: &str, path: &Path, records: Vec<SignatureRecord>) {
        let binding = self.entry(type_name);
        binding.sources.push(path.to_path_buf());
        binding.members.extend(records);
    }

    /// Add a fully built binding
    pub fn insert(&mut self, binding: TypeBinding) {
        let entry = self.entry(&binding.type_name);
        entry.sources.extend(binding.sources);
        entry.members.extend(binding.members);
    }

    /// Look up a type
    pub fn get(&self, type_name: &str) -> Option<&TypeBinding> {
        self.types.get(type_name)
    }

    /// Types in first-encounter order
    pub fn iter(&self) -> impl Iterator<Item = &TypeBinding> {
        self.types.values()
    }

    /// Number of types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no type has been added
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

//! Marshaling registry
//!
//! Two independent lookup tables drive value conversion across the
//! host/guest boundary:
//!
//! | Table     | Applies to               | Placeholder | Miss means                   |
//! |-----------|--------------------------|-------------|------------------------------|
//! | `extract` | argument positions only  | `{slot}`    | argument omitted from call   |
//! | `push`    | non-void return values   | `{value}`   | opaque-handle push fallback  |
//!
//! The registry is built once and handed to the emitter by reference; the
//! emitter never reaches for global state.
//!
//! ## Default Godot mapping
//!
//! | Host type              | Extract                                             | Push                                   |
//! |------------------------|-----------------------------------------------------|----------------------------------------|
//! | `int`                  | `luaL_optinteger(L, {slot}, 0)`                     | `lua_pushinteger(L, {value})`          |
//! | `bool`                 | `lua_toboolean(L, {slot})`                          | `lua_pushboolean(L, {value})`          |
//! | `float` `double` `real_t` | `luaL_optnumber(L, {slot}, 0)`                   | `lua_pushnumber(L, {value})`           |
//! | `String`               | `String::utf8(luaL_optstring(L, {slot}, ""))`        | `lua_pushstring(L, GD_UTF8_STR({value}))` |
//! | `StringName`           | `StringName(String::utf8(luaL_optstring(...)))`      | `lua_pushstring(L, GD_UTF8_NAME({value}))` |

use crate::error::{WeldError, WeldResult};
use crate::ir::TypeName;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Placeholder substituted with the call-frame slot in extract templates
pub const SLOT_PLACEHOLDER: &str = "{slot}";

/// Placeholder substituted with the value expression in push templates
pub const VALUE_PLACEHOLDER: &str = "{value}";

/// Which table a template belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarshalKind {
    /// Guest value at a frame slot -> host value
    Extract,
    /// Host value -> guest value pushed on the frame
    Push,
}

impl MarshalKind {
    /// Placeholder a template of this kind must contain
    pub fn placeholder(self) -> &'static str {
        match self {
            MarshalKind::Extract => SLOT_PLACEHOLDER,
            MarshalKind::Push => VALUE_PLACEHOLDER,
        }
    }

    fn label(self) -> &'static str {
        match self {
            MarshalKind::Extract => "extract",
            MarshalKind::Push => "push",
        }
    }
}

/// A code-generation rule converting one value across the boundary
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarshalTemplate {
    /// Host type this rule applies to
    pub type_name: TypeName,
    /// Table the rule lives in
    pub kind: MarshalKind,
    /// Expression text containing the kind's placeholder
    pub template: String,
}

impl MarshalTemplate {
    /// Create a template, checking that it carries its placeholder
    pub fn new(
        kind: MarshalKind,
        type_name: impl Into<TypeName>,
        template: impl Into<String>,
    ) -> WeldResult<Self> {
        let type_name = type_name.into();
        let template = template.into();
        if !template.contains(kind.placeholder()) {
            return Err(WeldError::InvalidTemplate {
                kind: kind.label(),
                type_name,
                placeholder: kind.placeholder(),
            });
        }
        Ok(Self {
            type_name,
            kind,
            template,
        })
    }

    /// Render an extraction expression for a 1-based frame slot
    pub fn render_extract(&self, slot: usize) -> String {
        self.template.replace(SLOT_PLACEHOLDER, &slot.to_string())
    }

    /// Render a push statement for a value expression
    pub fn render_push(&self, value: &str) -> String {
        self.template.replace(VALUE_PLACEHOLDER, value)
    }
}

/// One sub-table of the registry, keyed by exact type text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarshalTable {
    entries: IndexMap<TypeName, MarshalTemplate>,
}

impl MarshalTable {
    /// Insert or replace the template for its type
    pub fn insert(&mut self, template: MarshalTemplate) {
        self.entries.insert(template.type_name.clone(), template);
    }

    /// Look up a type by exact name
    pub fn lookup(&self, type_name: &str) -> Option<&MarshalTemplate> {
        self.entries.get(type_name)
    }

    /// Number of mapped types
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no type is mapped
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mapped type names in insertion order
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// The pair of extraction/push tables consulted by the wrapper emitter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarshalRegistry {
    extract: MarshalTable,
    push: MarshalTable,
}

impl MarshalRegistry {
    /// Create a registry with both tables empty
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry preloaded with the Godot primitive conversions
    pub fn godot() -> Self {
        let mut registry = Self::empty();

        let extract: &[(&str, &str)] = &[
            ("int", "luaL_optinteger(L, {slot}, 0)"),
            ("bool", "lua_toboolean(L, {slot})"),
            ("float", "luaL_optnumber(L, {slot}, 0)"),
            ("double", "luaL_optnumber(L, {slot}, 0)"),
            ("real_t", "luaL_optnumber(L, {slot}, 0)"),
            ("String", "String::utf8(luaL_optstring(L, {slot}, \"\"))"),
            (
                "StringName",
                "StringName(String::utf8(luaL_optstring(L, {slot}, \"\")))",
            ),
        ];
        let push: &[(&str, &str)] = &[
            ("int", "lua_pushinteger(L, {value})"),
            ("bool", "lua_pushboolean(L, {value})"),
            ("float", "lua_pushnumber(L, {value})"),
            ("double", "lua_pushnumber(L, {value})"),
            ("real_t", "lua_pushnumber(L, {value})"),
            ("String", "lua_pushstring(L, GD_UTF8_STR({value}))"),
            ("StringName", "lua_pushstring(L, GD_UTF8_NAME({value}))"),
        ];

        for (ty, template) in extract {
            registry.extract.insert(MarshalTemplate {
                type_name: ty.to_string(),
                kind: MarshalKind::Extract,
                template: template.to_string(),
            });
        }
        for (ty, template) in push {
            registry.push.insert(MarshalTemplate {
                type_name: ty.to_string(),
                kind: MarshalKind::Push,
                template: template.to_string(),
            });
        }

        registry
    }

    /// Add or override an argument extraction template
    pub fn with_extract(
        mut self,
        type_name: impl Into<TypeName>,
        template: impl Into<String>,
    ) -> WeldResult<Self> {
        self.extract
            .insert(MarshalTemplate::new(MarshalKind::Extract, type_name, template)?);
        Ok(self)
    }

    /// Add or override a return-value push template
    pub fn with_push(
        mut self,
        type_name: impl Into<TypeName>,
        template: impl Into<String>,
    ) -> WeldResult<Self> {
        self.push
            .insert(MarshalTemplate::new(MarshalKind::Push, type_name, template)?);
        Ok(self)
    }

    /// Look up the extraction rule for an argument type
    pub fn lookup_extract(&self, type_name: &str) -> Option<&MarshalTemplate> {
        self.extract.lookup(type_name)
    }

    /// Look up the push rule for a return type
    pub fn lookup_push(&self, type_name: &str) -> Option<&MarshalTemplate> {
        self.push.lookup(type_name)
    }

    /// The extraction table
    pub fn extract_table(&self) -> &MarshalTable {
        &self.extract
    }

    /// The push table
    pub fn push_table(&self) -> &MarshalTable {
        &self.push
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_godot_defaults() {
        let registry = MarshalRegistry::godot();

        assert_eq!(
            registry.lookup_extract("int").unwrap().render_extract(2),
            "luaL_optinteger(L, 2, 0)"
        );
        assert_eq!(
            registry.lookup_push("String").unwrap().render_push("ret"),
            "lua_pushstring(L, GD_UTF8_STR(ret))"
        );
        assert!(registry.lookup_extract("Vector2").is_none());
        assert!(registry.lookup_push("Ref<Resource>").is_none());
    }

    #[test]
    fn test_tables_are_independent() {
        let registry = MarshalRegistry::empty()
            .with_push("Vector2", "lua_push_vector2(L, {value})")
            .unwrap();

        assert!(registry.lookup_push("Vector2").is_some());
        assert!(registry.lookup_extract("Vector2").is_none());
    }

    #[test]
    fn test_lookup_is_textual() {
        let registry = MarshalRegistry::godot();
        assert!(registry.lookup_extract("const String &").is_none());
        assert!(registry.lookup_extract("int ").is_none());
    }

    #[test]
    fn test_override_replaces_default() {
        let registry = MarshalRegistry::godot()
            .with_extract("int", "luaL_checkinteger(L, {slot})")
            .unwrap();

        assert_eq!(
            registry.lookup_extract("int").unwrap().render_extract(3),
            "luaL_checkinteger(L, 3)"
        );
        assert_eq!(registry.extract_table().type_names().next(), Some("int"));
    }

    #[test]
    fn test_template_requires_placeholder() {
        let err = MarshalRegistry::empty()
            .with_extract("Vector2", "lua_to_vector2(L, 2)")
            .unwrap_err();
        assert!(matches!(err, WeldError::InvalidTemplate { placeholder: "{slot}", .. }));

        let err = MarshalRegistry::empty()
            .with_push("Vector2", "lua_push_vector2(L, ret)")
            .unwrap_err();
        assert!(matches!(err, WeldError::InvalidTemplate { placeholder: "{value}", .. }));
    }
}

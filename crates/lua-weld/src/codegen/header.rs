//! Binding header generator
//!
//! Assembles the wrappers and registration functions of every type into one
//! header. All text is built in memory; writing it is the caller's job.

use crate::codegen::{Degradation, RegistrationBuilder, WrapperEmitter, GENERATED_BANNER};
use crate::ir::{BindingSet, MarshalRegistry};

/// Include guard used when none is configured
pub const DEFAULT_GUARD: &str = "_WRAP_FOR_LUA_GEN_H";

/// Conversion API header included when none is configured
pub const DEFAULT_INCLUDE: &str = "../godot_lua_convert_api.h";

/// Result of generating a binding header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedHeader {
    /// Complete header text
    pub text: String,
    /// `(type, wrapper count)` in registration order
    pub wrapper_counts: Vec<(String, usize)>,
    /// Every workaround applied, in emission order
    pub degradations: Vec<Degradation>,
}

/// Generator for the complete binding header
pub struct BindingHeaderGenerator<'a> {
    set: &'a BindingSet,
    registry: &'a MarshalRegistry,
    include: String,
    guard: String,
}

impl<'a> BindingHeaderGenerator<'a> {
    /// Create a generator for a set of types
    pub fn new(set: &'a BindingSet, registry: &'a MarshalRegistry) -> Self {
        Self {
            set,
            registry,
            include: DEFAULT_INCLUDE.to_string(),
            guard: DEFAULT_GUARD.to_string(),
        }
    }

    /// Set the conversion API header to include
    pub fn with_include(mut self, include: impl Into<String>) -> Self {
        self.include = include.into();
        self
    }

    /// Set the include guard macro
    pub fn with_guard(mut self, guard: impl Into<String>) -> Self {
        self.guard = guard.into();
        self
    }

    /// Generate the header
    pub fn generate(&self) -> GeneratedHeader {
        let emitter = WrapperEmitter::new(self.registry);
        let mut wrapper_counts = Vec::with_capacity(self.set.len());
        let mut degradations = Vec::new();

        let mut output = String::new();
        output.push_str(GENERATED_BANNER);
        output.push('\n');
        output.push_str(&format!("#ifndef {}\n#define {}\n", self.guard, self.guard));
        output.push_str(&format!("#include \"{}\"\n\n", self.include));

        for binding in self.set.iter() {
            output.push_str(&format!(
                "/*\n * Generated members of: {}\n */\n",
                binding.type_name
            ));

            let wrappers = emitter.emit_all(binding);
            for wrapper in &wrappers {
                output.push_str(&wrapper.text);
                degradations.extend(wrapper.degradations.iter().cloned());
            }
            output.push_str(&RegistrationBuilder::build(binding, &wrappers));
            output.push('\n');

            wrapper_counts.push((binding.type_name.clone(), wrappers.len()));
        }

        output.push_str(&RegistrationBuilder::build_umbrella(self.set.iter()));
        output.push('\n');
        output.push_str("#endif\n");

        GeneratedHeader {
            text: output,
            wrapper_counts,
            degradations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{SignatureRecord, TypeBinding};
    use pretty_assertions::assert_eq;

    fn sample_set() -> BindingSet {
        let mut set = BindingSet::new();
        set.insert(
            TypeBinding::new("Foo")
                .member(SignatureRecord::new("int", "get_value").arg("int"))
                .member(SignatureRecord::new("String", "__tostring")),
        );
        set.insert(TypeBinding::new("Bar"));
        set
    }

    #[test]
    fn test_full_header() {
        let set = sample_set();
        let registry = MarshalRegistry::godot();
        let header = BindingHeaderGenerator::new(&set, &registry).generate();

        let expected = r#"/* THIS FILE IS GENERATED DO NOT EDIT */
#ifndef _WRAP_FOR_LUA_GEN_H
#define _WRAP_FOR_LUA_GEN_H
#include "../godot_lua_convert_api.h"

/*
 * Generated members of: Foo
 */
static int godot_Foo_get_value(lua_State *L) {
    auto self = TO_USERDATA(Foo, 1);
    auto arg0 = luaL_optinteger(L, 2, 0);
    auto ret = self->get_value(arg0);
    lua_pushinteger(L, ret);
    return 1;
}
static int godot_Foo___tostring(lua_State *L) {
    auto self = TO_USERDATA(Foo, 1);
    lua_pushfstring(L, "[Foo %s]", GD_STR_NAME_DATA(self->operator String()));
    return 1;
}
static int godot_Foo___gc(lua_State *L) {
    TO_USERDATA(Foo, 1)->~Foo();
    return 0;
}
static void register_godot_Foo(lua_State *L) {
    luatable_rawset(L, -1, "get_value", &godot_Foo_get_value);
    luatable_rawset(L, -1, "__tostring", &godot_Foo___tostring);
    luatable_rawset(L, -1, "__gc", &godot_Foo___gc);
}

/*
 * Generated members of: Bar
 */
static int godot_Bar___gc(lua_State *L) {
    TO_USERDATA(Bar, 1)->~Bar();
    return 0;
}
static void register_godot_Bar(lua_State *L) {
    luatable_rawset(L, -1, "__gc", &godot_Bar___gc);
}

// register for all types.
extern void register_godot_userdata_types(lua_State *L) {
    LuaScriptLanguage::add_register("Foo", &register_godot_Foo);
    LuaScriptLanguage::add_register("Bar", &register_godot_Bar);
}

#endif
"#;
        assert_eq!(header.text, expected);
        assert_eq!(
            header.wrapper_counts,
            vec![("Foo".to_string(), 3), ("Bar".to_string(), 1)]
        );
        assert!(header.degradations.is_empty());
    }

    #[test]
    fn test_generation_is_deterministic() {
        let set = sample_set();
        let registry = MarshalRegistry::godot();

        let first = BindingHeaderGenerator::new(&set, &registry).generate();
        let second = BindingHeaderGenerator::new(&set, &registry).generate();
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_guard_and_include() {
        let set = BindingSet::new();
        let registry = MarshalRegistry::godot();
        let header = BindingHeaderGenerator::new(&set, &registry)
            .with_guard("MY_BINDINGS_H")
            .with_include("convert.h")
            .generate();

        assert!(header.text.contains("#ifndef MY_BINDINGS_H\n#define MY_BINDINGS_H\n"));
        assert!(header.text.contains("#include \"convert.h\"\n"));
        assert!(header.text.contains("extern void register_godot_userdata_types(lua_State *L) {\n}\n"));
    }

    #[test]
    fn test_degradations_collected() {
        let mut set = BindingSet::new();
        set.insert(
            TypeBinding::new("Sprite")
                .member(SignatureRecord::new("Texture", "get_texture"))
                .member(SignatureRecord::new("void", "set_offset").arg("Vector2")),
        );
        let registry = MarshalRegistry::godot();

        let header = BindingHeaderGenerator::new(&set, &registry).generate();
        let types: Vec<_> = header.degradations.iter().map(|d| d.type_name()).collect();
        assert_eq!(types, vec!["Texture", "Vector2"]);
    }
}

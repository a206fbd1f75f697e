//! Method-table registration generator
//!
//! Emits one `register_godot_<Type>` function per type, binding each wrapper
//! into the table on top of the Lua stack, plus the single umbrella entry
//! point that hands every registration function to the script language.

use crate::codegen::Wrapper;
use crate::ir::TypeBinding;

/// Name of the umbrella registration entry point
pub const UMBRELLA_FN: &str = "register_godot_userdata_types";

/// Generator for registration functions
pub struct RegistrationBuilder;

impl RegistrationBuilder {
    /// Emit the registration function for one type
    ///
    /// One `luatable_rawset` per wrapper, in the order given (declaration
    /// order with the finalizer last when produced by `emit_all`).
    pub fn build(binding: &TypeBinding, wrappers: &[Wrapper]) -> String {
        let mut output = format!("static void {}(lua_State *L) {{\n", binding.register_fn_name());
        for wrapper in wrappers {
            output.push_str(&format!(
                "    luatable_rawset(L, -1, \"{}\", &{});\n",
                wrapper.member, wrapper.fn_name
            ));
        }
        output.push_str("}\n");
        output
    }

    /// Emit the umbrella entry point referencing every type exactly once
    pub fn build_umbrella<'b, I>(bindings: I) -> String
    where
        I: IntoIterator<Item = &'b TypeBinding>,
    {
        let mut output = String::from("// register for all types.\n");
        output.push_str(&format!("extern void {UMBRELLA_FN}(lua_State *L) {{\n"));
        for binding in bindings {
            output.push_str(&format!(
                "    LuaScriptLanguage::add_register(\"{}\", &{});\n",
                binding.type_name,
                binding.register_fn_name()
            ));
        }
        output.push_str("}\n");
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::WrapperEmitter;
    use crate::ir::{MarshalRegistry, SignatureRecord};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_registration_in_wrapper_order() {
        let registry = MarshalRegistry::godot();
        let binding = TypeBinding::new("Foo")
            .member(SignatureRecord::new("int", "get_value").arg("int"))
            .member(SignatureRecord::new("void", "set_name").arg("String"));
        let wrappers = WrapperEmitter::new(&registry).emit_all(&binding);

        assert_eq!(
            RegistrationBuilder::build(&binding, &wrappers),
            "static void register_godot_Foo(lua_State *L) {\n\
             \x20   luatable_rawset(L, -1, \"get_value\", &godot_Foo_get_value);\n\
             \x20   luatable_rawset(L, -1, \"set_name\", &godot_Foo_set_name);\n\
             \x20   luatable_rawset(L, -1, \"__gc\", &godot_Foo___gc);\n\
             }\n"
        );
    }

    #[test]
    fn test_memberless_type_binds_only_finalizer() {
        let registry = MarshalRegistry::godot();
        let binding = TypeBinding::new("Empty");
        let wrappers = WrapperEmitter::new(&registry).emit_all(&binding);

        let text = RegistrationBuilder::build(&binding, &wrappers);
        assert_eq!(text.matches("luatable_rawset").count(), 1);
        assert!(text.contains("\"__gc\", &godot_Empty___gc"));
    }

    #[test]
    fn test_umbrella_uses_each_type_name() {
        let types = [TypeBinding::new("Foo"), TypeBinding::new("Bar")];

        assert_eq!(
            RegistrationBuilder::build_umbrella(&types),
            "// register for all types.\n\
             extern void register_godot_userdata_types(lua_State *L) {\n\
             \x20   LuaScriptLanguage::add_register(\"Foo\", &register_godot_Foo);\n\
             \x20   LuaScriptLanguage::add_register(\"Bar\", &register_godot_Bar);\n\
             }\n"
        );
    }
}

//! Lua C-function wrapper generator
//!
//! Turns one [`SignatureRecord`] into a `static int godot_<Type>_<member>(lua_State *L)`
//! function that unwraps the receiver, extracts arguments, calls the host
//! member and pushes the result.
//!
//! Frame layout seen by every wrapper:
//!
//! | Slot | Content                          |
//! |------|----------------------------------|
//! | 1    | receiver userdata                |
//! | i+2  | declared argument `i` (0-based)  |

use crate::ir::{MarshalRegistry, SignatureRecord, TypeBinding, FINALIZER_MEMBER};
use tracing::warn;

const INDENT: &str = "    ";

/// Something the emitter had to work around instead of binding faithfully
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Degradation {
    /// Argument type has no extraction template; it is left out of the call
    OmittedArgument {
        owner: String,
        member: String,
        index: usize,
        type_name: String,
    },
    /// Return type has no push template; pushed as an opaque userdata handle
    OpaqueReturn {
        owner: String,
        member: String,
        type_name: String,
    },
    /// Declared `__gc` member ignored in favour of the synthesized finalizer
    DeclaredFinalizer { owner: String },
}

impl Degradation {
    /// Type the degradation is about, for error reporting
    pub fn type_name(&self) -> &str {
        match self {
            Degradation::OmittedArgument { type_name, .. }
            | Degradation::OpaqueReturn { type_name, .. } => type_name,
            Degradation::DeclaredFinalizer { owner } => owner,
        }
    }

    fn log(&self) {
        match self {
            Degradation::OmittedArgument {
                owner,
                member,
                index,
                type_name,
            } => warn!(
                "{}::{}: argument {} of type `{}` has no extraction template, omitted from call",
                owner, member, index, type_name
            ),
            Degradation::OpaqueReturn {
                owner,
                member,
                type_name,
            } => warn!(
                "{}::{}: return type `{}` has no push template, pushing as userdata",
                owner, member, type_name
            ),
            Degradation::DeclaredFinalizer { owner } => warn!(
                "{}: declared {} ignored, the finalizer is always synthesized",
                owner, FINALIZER_MEMBER
            ),
        }
    }
}

/// One generated wrapper function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wrapper {
    /// Key the wrapper is registered under in the type's method table
    pub member: String,
    /// Generated C function name
    pub fn_name: String,
    /// Number of values the wrapper returns to Lua
    pub pushed: usize,
    /// Argument locals passed to the host call, in order
    pub call_args: Vec<String>,
    /// Full function text, newline terminated
    pub text: String,
    /// Workarounds applied while emitting
    pub degradations: Vec<Degradation>,
}

/// Generator for per-member wrapper functions
pub struct WrapperEmitter<'a> {
    registry: &'a MarshalRegistry,
}

impl<'a> WrapperEmitter<'a> {
    /// Create an emitter over a marshaling registry
    pub fn new(registry: &'a MarshalRegistry) -> Self {
        Self { registry }
    }

    /// Emit the wrapper for one member of `binding`
    ///
    /// Never fails: unmapped argument types are dropped from the call and
    /// unmapped return types fall back to an opaque userdata push. Both are
    /// recorded in [`Wrapper::degradations`] and logged.
    pub fn emit(&self, binding: &TypeBinding, record: &SignatureRecord) -> Wrapper {
        let owner = &binding.type_name;
        let fn_name = binding.wrapper_name(&record.name);
        let mut degradations = Vec::new();
        let mut body = String::new();

        body.push_str(&format!("{INDENT}auto self = TO_USERDATA({owner}, 1);\n"));

        let mut call_args = Vec::new();
        for (index, arg_type) in record.arg_types.iter().enumerate() {
            match self.registry.lookup_extract(arg_type) {
                Some(template) => {
                    let local = format!("arg{index}");
                    body.push_str(&format!(
                        "{INDENT}auto {local} = {};\n",
                        template.render_extract(index + 2)
                    ));
                    call_args.push(local);
                }
                None => degradations.push(Degradation::OmittedArgument {
                    owner: owner.clone(),
                    member: record.name.clone(),
                    index,
                    type_name: arg_type.clone(),
                }),
            }
        }

        let pushed = if record.is_tostring() {
            body.push_str(&format!(
                "{INDENT}lua_pushfstring(L, \"[{owner} %s]\", GD_STR_NAME_DATA(self->operator {}()));\n",
                record.return_type
            ));
            1
        } else if record.is_void() {
            body.push_str(&format!(
                "{INDENT}self->{}({});\n",
                record.name,
                call_args.join(", ")
            ));
            0
        } else {
            body.push_str(&format!(
                "{INDENT}auto ret = self->{}({});\n",
                record.name,
                call_args.join(", ")
            ));
            match self.registry.lookup_push(&record.return_type) {
                Some(template) => {
                    body.push_str(&format!("{INDENT}{};\n", template.render_push("ret")));
                }
                None => {
                    body.push_str(&format!(
                        "{INDENT}LuaScriptLanguage::push_userdata(L, \"{}\", ret);\n",
                        record.return_type
                    ));
                    degradations.push(Degradation::OpaqueReturn {
                        owner: owner.clone(),
                        member: record.name.clone(),
                        type_name: record.return_type.clone(),
                    });
                }
            }
            1
        };

        body.push_str(&format!("{INDENT}return {pushed};\n"));

        for degradation in &degradations {
            degradation.log();
        }

        Wrapper {
            member: record.name.clone(),
            text: function_text(&fn_name, &body),
            fn_name,
            pushed,
            call_args,
            degradations,
        }
    }

    /// Emit the synthesized `__gc` wrapper that runs the receiver's destructor
    pub fn emit_finalizer(&self, binding: &TypeBinding) -> Wrapper {
        let owner = &binding.type_name;
        let fn_name = binding.wrapper_name(FINALIZER_MEMBER);
        let body = format!("{INDENT}TO_USERDATA({owner}, 1)->~{owner}();\n{INDENT}return 0;\n");

        Wrapper {
            member: FINALIZER_MEMBER.to_string(),
            text: function_text(&fn_name, &body),
            fn_name,
            pushed: 0,
            call_args: Vec::new(),
            degradations: Vec::new(),
        }
    }

    /// Emit every wrapper of a type: declared members in order, finalizer last
    pub fn emit_all(&self, binding: &TypeBinding) -> Vec<Wrapper> {
        let mut wrappers = Vec::with_capacity(binding.members.len() + 1);
        let mut shadowed = false;

        for record in &binding.members {
            if record.name == FINALIZER_MEMBER {
                shadowed = true;
                continue;
            }
            wrappers.push(self.emit(binding, record));
        }

        let mut finalizer = self.emit_finalizer(binding);
        if shadowed {
            let degradation = Degradation::DeclaredFinalizer {
                owner: binding.type_name.clone(),
            };
            degradation.log();
            finalizer.degradations.push(degradation);
        }
        wrappers.push(finalizer);
        wrappers
    }
}

fn function_text(fn_name: &str, body: &str) -> String {
    format!("static int {fn_name}(lua_State *L) {{\n{body}}}\n")
}

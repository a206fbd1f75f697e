//! Lua-Weld: Lua binding generation for Godot host types
//!
//! This crate provides the glue between Godot C++ types and the embedded
//! Lua runtime. It scans declaration files for member signatures and
//! generates `lua_CFunction` wrappers plus the registration code that
//! installs them into each type's method table. It also embeds Lua scripts
//! and license texts into generated headers.
//!
//! # Architecture
//!
//! - `ir`: Signature records, the ordered type table and the marshaling registry
//! - `parser`: Declaration scanner producing signature records
//! - `codegen`: Wrapper, registration and header generation
//! - `bundle`: Script and license embedding
//! - `build`: Build script utilities, marker files and `weld.toml` configuration
//!
//! # Usage
//!
//! In a `build.rs`:
//!
//! ```rust,ignore
//! use lua_weld::build::BindingBuilder;
//!
//! fn main() {
//!     BindingBuilder::new()
//!         .sources(&["wrapper/Foo.h", "wrapper/Bar.h"])
//!         .header_path("wrapper/wrap_for_lua.gen.h")
//!         .marker_path("wrap_for_lua.gen.stamp")
//!         .build()
//!         .expect("Failed to generate Lua bindings");
//! }
//! ```

pub mod build;
pub mod bundle;
pub mod codegen;
pub mod error;
pub mod ir;
pub mod parser;

// Re-export commonly used types
pub use build::{BindingBuilder, BindingOutput, BundleBuilder, MarkerFile, WeldConfig};
pub use bundle::{BundleFormat, BundleKind, CodeBundle, LicenseBundle, TemplateBundle};
pub use codegen::{
    BindingHeaderGenerator, Degradation, GeneratedHeader, RegistrationBuilder, Wrapper,
    WrapperEmitter,
};
pub use error::{WeldError, WeldResult};
pub use ir::{BindingSet, MarshalRegistry, MarshalTemplate, SignatureRecord, TypeBinding};
pub use parser::{parse_declarations, parse_line, scan_files};

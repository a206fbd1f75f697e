//! Code generation for lua-weld
//!
//! This module provides generators for:
//! - Per-member Lua C-function wrappers (`wrapper`)
//! - Per-type registration functions and the umbrella entry point (`registration`)
//! - The complete binding header (`header`)

pub mod header;
pub mod registration;
pub mod wrapper;

pub use header::{BindingHeaderGenerator, GeneratedHeader, DEFAULT_GUARD, DEFAULT_INCLUDE};
pub use registration::{RegistrationBuilder, UMBRELLA_FN};
pub use wrapper::{Degradation, Wrapper, WrapperEmitter};

/// First line of every generated file
pub const GENERATED_BANNER: &str = "/* THIS FILE IS GENERATED DO NOT EDIT */";

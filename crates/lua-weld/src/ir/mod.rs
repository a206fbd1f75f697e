//! Intermediate Representation (IR) for lua-weld
//!
//! This module provides the data model shared by the parser and the code
//! generators: extracted member signatures, the ordered table of host types
//! being bound, and the marshaling registry.

pub mod binding;
pub mod marshal;
pub mod signature;

pub use binding::*;
pub use marshal::*;
pub use signature::*;

//! Build utilities for lua-weld
//!
//! This module provides utilities for use in build.rs scripts and the CLI:
//! - `BindingBuilder` for the binding header and its marker
//! - `BundleBuilder` for embedded scripts and licenses
//! - `WeldConfig` for driving both from a `weld.toml`

pub mod binding;
pub mod bundler;
pub mod config;
pub mod marker;

pub use binding::{BindingBuilder, BindingOutput, DEFAULT_HEADER_NAME, DEFAULT_MARKER_NAME};
pub use bundler::BundleBuilder;
pub use config::{BindingsConfig, BundleConfig, WeldConfig};
pub use marker::{fingerprint, MarkerFile};

use crate::error::{WeldError, WeldResult};
use std::fs;
use std::path::Path;

/// Write one generated file in a single call, creating parent directories
pub(crate) fn write_output(path: &Path, contents: &str) -> WeldResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| WeldError::io(parent, e))?;
        }
    }
    fs::write(path, contents).map_err(|e| WeldError::io(path, e))
}

//! `weld.toml` configuration
//!
//! ```toml
//! strict = false
//!
//! [bindings]
//! sources = ["wrapper/Foo.h", "wrapper/Bar.h"]
//! header = "wrapper/wrap_for_lua.gen.h"
//! marker = "wrap_for_lua.gen.stamp"
//!
//! [extract]
//! Vector2 = "lua_to_godot_vector2(L, {slot})"
//!
//! [push]
//! Vector2 = "lua_push_godot_vector2(L, {value})"
//!
//! [templates]
//! sources = ["templates/Node/empty.lua"]
//! output = "lua_templates.gen.h"
//! ```
//!
//! Relative paths are resolved against the directory holding the file.

use crate::build::{BindingBuilder, BundleBuilder};
use crate::bundle::BundleKind;
use crate::error::{WeldError, WeldResult};
use crate::ir::MarshalRegistry;
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Binding header section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BindingsConfig {
    /// Declaration files, in processing order
    pub sources: Vec<PathBuf>,
    /// Generated header path
    pub header: PathBuf,
    /// Marker path
    #[serde(default)]
    pub marker: Option<PathBuf>,
    /// Conversion API header to include
    #[serde(default)]
    pub include: Option<String>,
    /// Include guard macro
    #[serde(default)]
    pub guard: Option<String>,
}

/// A bundle section (`templates`, `codes` or `licenses`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BundleConfig {
    /// Files to embed, in order
    pub sources: Vec<PathBuf>,
    /// Generated header path
    pub output: PathBuf,
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeldConfig {
    /// Fail on unmapped types instead of degrading
    pub strict: bool,
    /// Binding header generation
    pub bindings: Option<BindingsConfig>,
    /// Extra or overriding argument extraction templates
    pub extract: IndexMap<String, String>,
    /// Extra or overriding return push templates
    pub push: IndexMap<String, String>,
    /// Script template table
    pub templates: Option<BundleConfig>,
    /// Byte-escaped script strings
    pub codes: Option<BundleConfig>,
    /// License table
    pub licenses: Option<BundleConfig>,
}

impl WeldConfig {
    /// Load and resolve a configuration file
    pub fn load(path: &Path) -> WeldResult<Self> {
        let text = WeldError::read_source(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_toml_str(&text, base_dir).map_err(|e| match e {
            WeldError::Config { message, .. } => WeldError::config(path, message),
            other => other,
        })
    }

    /// Parse configuration text, resolving relative paths against `base_dir`
    pub fn from_toml_str(text: &str, base_dir: &Path) -> WeldResult<Self> {
        let mut config: WeldConfig =
            toml::from_str(text).map_err(|e| WeldError::config(base_dir, e.to_string()))?;
        config.resolve(base_dir);
        Ok(config)
    }

    fn resolve(&mut self, base_dir: &Path) {
        let join = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base_dir.join(&*p);
            }
        };

        if let Some(bindings) = self.bindings.as_mut() {
            bindings.sources.iter_mut().for_each(join);
            join(&mut bindings.header);
            if let Some(marker) = bindings.marker.as_mut() {
                join(marker);
            }
        }
        for section in [&mut self.templates, &mut self.codes, &mut self.licenses] {
            if let Some(section) = section.as_mut() {
                section.sources.iter_mut().for_each(join);
                join(&mut section.output);
            }
        }
    }

    /// Godot defaults with the `[extract]` and `[push]` tables applied
    pub fn registry(&self) -> WeldResult<MarshalRegistry> {
        let mut registry = MarshalRegistry::godot();
        for (ty, template) in &self.extract {
            registry = registry.with_extract(ty.as_str(), template.as_str())?;
        }
        for (ty, template) in &self.push {
            registry = registry.with_push(ty.as_str(), template.as_str())?;
        }
        Ok(registry)
    }

    /// Builder for the `[bindings]` section, if present
    pub fn binding_builder(&self) -> WeldResult<Option<BindingBuilder>> {
        let Some(bindings) = self.bindings.as_ref() else {
            return Ok(None);
        };

        let mut builder = BindingBuilder::new()
            .sources(&bindings.sources)
            .header_path(&bindings.header)
            .registry(self.registry()?)
            .strict(self.strict);
        if let Some(ref marker) = bindings.marker {
            builder = builder.marker_path(marker);
        }
        if let Some(ref include) = bindings.include {
            builder = builder.include(include.as_str());
        }
        if let Some(ref guard) = bindings.guard {
            builder = builder.guard(guard.as_str());
        }
        Ok(Some(builder))
    }

    /// Builders for every bundle section present, in a fixed order
    pub fn bundle_builders(&self) -> Vec<BundleBuilder> {
        [
            (BundleKind::Templates, &self.templates),
            (BundleKind::Codes, &self.codes),
            (BundleKind::Licenses, &self.licenses),
        ]
        .into_iter()
        .filter_map(|(kind, section)| {
            section.as_ref().map(|s| {
                BundleBuilder::new(kind)
                    .sources(&s.sources)
                    .output(&s.output)
            })
        })
        .collect()
    }
}

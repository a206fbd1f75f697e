//! BindingBuilder for build.rs scripts and the CLI
//!
//! This module provides a high-level API that scans declaration files,
//! generates the binding header and writes it together with its marker.

use crate::build::marker::MarkerFile;
use crate::build::write_output;
use crate::codegen::{
    BindingHeaderGenerator, Degradation, GeneratedHeader, DEFAULT_GUARD, DEFAULT_INCLUDE,
};
use crate::error::{WeldError, WeldResult};
use crate::ir::{MarshalRegistry, FINALIZER_MEMBER};
use crate::parser::scan_files;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Header file name used by [`BindingBuilder::out_dir`]
pub const DEFAULT_HEADER_NAME: &str = "wrap_for_lua.gen.h";

/// Marker file name used by [`BindingBuilder::out_dir`]
pub const DEFAULT_MARKER_NAME: &str = "wrap_for_lua.gen.stamp";

/// Everything one generation pass produced, before or after writing
#[derive(Debug, Clone)]
pub struct BindingOutput {
    /// The generated header
    pub header: GeneratedHeader,
    /// Marker describing the header
    pub marker: MarkerFile,
    /// Whether the header file was (re)written by `build`
    pub header_written: bool,
}

/// Builder for the Lua binding header
///
/// # Example
/// ```ignore
/// use lua_weld::build::BindingBuilder;
///
/// fn main() {
///     BindingBuilder::new()
///         .sources(&["wrapper/Foo.h", "wrapper/Bar.h"])
///         .out_dir()
///         .and_then(|b| b.emit_rerun_directives(true).build())
///         .expect("Failed to generate Lua bindings");
/// }
/// ```
pub struct BindingBuilder {
    sources: Vec<PathBuf>,
    header_path: Option<PathBuf>,
    marker_path: Option<PathBuf>,
    registry: MarshalRegistry,
    include: String,
    guard: String,
    strict: bool,
    rerun_directives: bool,
}

impl Default for BindingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BindingBuilder {
    /// Create a builder with the Godot marshaling defaults
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            header_path: None,
            marker_path: None,
            registry: MarshalRegistry::godot(),
            include: DEFAULT_INCLUDE.to_string(),
            guard: DEFAULT_GUARD.to_string(),
            strict: false,
            rerun_directives: false,
        }
    }

    /// Add a declaration file
    pub fn source(mut self, path: impl AsRef<Path>) -> Self {
        self.sources.push(path.as_ref().to_path_buf());
        self
    }

    /// Add declaration files, in order
    pub fn sources<P: AsRef<Path>>(mut self, paths: &[P]) -> Self {
        self.sources
            .extend(paths.iter().map(|p| p.as_ref().to_path_buf()));
        self
    }

    /// Set where the header is written
    pub fn header_path(mut self, path: impl AsRef<Path>) -> Self {
        self.header_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set where the marker is written
    pub fn marker_path(mut self, path: impl AsRef<Path>) -> Self {
        self.marker_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Place header and marker in cargo's `OUT_DIR` under their default names
    pub fn out_dir(self) -> WeldResult<Self> {
        let out_dir = env::var("OUT_DIR")
            .map_err(|_| WeldError::EnvVarMissing("OUT_DIR".to_string()))?;
        let out_path = Path::new(&out_dir);
        Ok(self
            .header_path(out_path.join(DEFAULT_HEADER_NAME))
            .marker_path(out_path.join(DEFAULT_MARKER_NAME)))
    }

    /// Replace the marshaling registry
    pub fn registry(mut self, registry: MarshalRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Set the conversion API header the output includes
    pub fn include(mut self, include: impl Into<String>) -> Self {
        self.include = include.into();
        self
    }

    /// Set the include guard macro
    pub fn guard(mut self, guard: impl Into<String>) -> Self {
        self.guard = guard.into();
        self
    }

    /// Fail instead of degrading on unmapped argument or return types
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Print `cargo:rerun-if-changed` for every declaration file
    pub fn emit_rerun_directives(mut self, enabled: bool) -> Self {
        self.rerun_directives = enabled;
        self
    }

    /// Declaration files in input order
    pub fn source_paths(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Generate in memory without touching the filesystem beyond reads
    pub fn generate(&self) -> WeldResult<BindingOutput> {
        let set = scan_files(&self.sources)?;
        let header = BindingHeaderGenerator::new(&set, &self.registry)
            .with_include(&self.include)
            .with_guard(&self.guard)
            .generate();

        if self.strict {
            if let Some(degradation) = header.degradations.first() {
                return Err(strict_error(degradation));
            }
        }

        let marker = MarkerFile::for_header(&header.text, &self.sources);
        debug!(
            "Generated bindings for {} type(s), fingerprint {}",
            header.wrapper_counts.len(),
            marker.fingerprint
        );

        Ok(BindingOutput {
            header,
            marker,
            header_written: false,
        })
    }

    /// Generate and write the header and marker
    ///
    /// All sources are read and the header is generated before the first
    /// write. The header is left untouched only when the existing marker
    /// already describes identical output and the header on disk still holds
    /// exactly the generated text.
    pub fn build(self) -> WeldResult<BindingOutput> {
        let header_path = self
            .header_path
            .clone()
            .ok_or(WeldError::OutputPathNotSet("binding header"))?;

        let mut output = self.generate()?;

        let previous = match self.marker_path {
            Some(ref marker_path) => MarkerFile::read(marker_path)?,
            None => None,
        };
        let unchanged = previous.as_ref() == Some(&output.marker)
            && fs::read_to_string(&header_path).is_ok_and(|text| text == output.header.text);

        if unchanged {
            info!("Lua bindings up to date: {}", header_path.display());
        } else {
            write_output(&header_path, &output.header.text)?;
            output.header_written = true;
            info!("Wrote Lua bindings: {}", header_path.display());
        }

        if let Some(ref marker_path) = self.marker_path {
            if !unchanged {
                write_output(marker_path, &output.marker.render())?;
            }
        }

        if self.rerun_directives {
            for source in &self.sources {
                println!("cargo:rerun-if-changed={}", source.display());
            }
        }

        Ok(output)
    }
}

fn strict_error(degradation: &Degradation) -> WeldError {
    match degradation {
        Degradation::OmittedArgument {
            owner,
            member,
            index,
            type_name,
        } => WeldError::Unsupported {
            owner: owner.clone(),
            member: member.clone(),
            type_name: type_name.clone(),
            position: format!("argument {}", index),
        },
        Degradation::OpaqueReturn {
            owner,
            member,
            type_name,
        } => WeldError::Unsupported {
            owner: owner.clone(),
            member: member.clone(),
            type_name: type_name.clone(),
            position: "return value".to_string(),
        },
        Degradation::DeclaredFinalizer { owner } => WeldError::Unsupported {
            owner: owner.clone(),
            member: FINALIZER_MEMBER.to_string(),
            type_name: owner.clone(),
            position: "declared finalizer".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_collects_sources() {
        let builder = BindingBuilder::new()
            .source("wrapper/Foo.h")
            .sources(&["wrapper/Bar.h", "wrapper/Baz.h"]);

        assert_eq!(
            builder.source_paths(),
            &[
                PathBuf::from("wrapper/Foo.h"),
                PathBuf::from("wrapper/Bar.h"),
                PathBuf::from("wrapper/Baz.h"),
            ]
        );
    }

    #[test]
    fn test_build_requires_header_path() {
        let err = BindingBuilder::new().build().unwrap_err();
        assert!(matches!(err, WeldError::OutputPathNotSet(_)));
    }

    #[test]
    fn test_strict_rejects_unmapped_argument() {
        let dir = tempfile::tempdir().unwrap();
        let decl = dir.path().join("Sprite.h");
        fs::write(&decl, "void set_offset(Vector2)\n").unwrap();

        let permissive = BindingBuilder::new().source(&decl).generate().unwrap();
        assert_eq!(permissive.header.degradations.len(), 1);

        let err = BindingBuilder::new().source(&decl).strict(true).generate().unwrap_err();
        assert!(matches!(
            err,
            WeldError::Unsupported { ref type_name, ref position, .. }
                if type_name == "Vector2" && position == "argument 0"
        ));
    }

    #[test]
    fn test_strict_accepts_registered_override() {
        let dir = tempfile::tempdir().unwrap();
        let decl = dir.path().join("Sprite.h");
        fs::write(&decl, "void set_offset(Vector2)\n").unwrap();

        let registry = MarshalRegistry::godot()
            .with_extract("Vector2", "lua_to_godot_vector2(L, {slot})")
            .unwrap();
        let output = BindingBuilder::new()
            .source(&decl)
            .registry(registry)
            .strict(true)
            .generate()
            .unwrap();

        assert!(output
            .header
            .text
            .contains("auto arg0 = lua_to_godot_vector2(L, 2);"));
    }

    #[test]
    fn test_edited_header_is_regenerated() {
        let dir = tempfile::tempdir().unwrap();
        let decl = dir.path().join("Foo.h");
        fs::write(&decl, "int get_value(int)\n").unwrap();
        let header = dir.path().join("wrap.gen.h");
        let marker = dir.path().join("wrap.gen.stamp");
        let builder = || {
            BindingBuilder::new()
                .source(&decl)
                .header_path(&header)
                .marker_path(&marker)
        };

        let first = builder().build().unwrap();
        fs::write(&header, "// edited by hand\n").unwrap();

        let second = builder().build().unwrap();
        assert!(second.header_written);
        assert_eq!(fs::read_to_string(&header).unwrap(), first.header.text);
    }

    #[test]
    fn test_missing_source_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let header = dir.path().join("out/wrap.gen.h");
        let marker = dir.path().join("out/wrap.gen.stamp");

        let err = BindingBuilder::new()
            .source(dir.path().join("Missing.h"))
            .header_path(&header)
            .marker_path(&marker)
            .build()
            .unwrap_err();

        assert!(matches!(err, WeldError::SourceNotFound(_)));
        assert!(!header.exists());
        assert!(!marker.exists());
    }
}

//! BundleBuilder for embedding script and license files

use crate::build::write_output;
use crate::bundle::{bundle, BundleKind};
use crate::error::{WeldError, WeldResult};
use std::path::{Path, PathBuf};
use tracing::info;

/// Builder for one bundled header
///
/// # Example
/// ```ignore
/// use lua_weld::build::BundleBuilder;
/// use lua_weld::bundle::BundleKind;
///
/// BundleBuilder::new(BundleKind::Templates)
///     .sources(&["templates/Node/empty.lua"])
///     .output("lua_templates.gen.h")
///     .build()
///     .expect("Failed to bundle templates");
/// ```
#[derive(Debug, Clone)]
pub struct BundleBuilder {
    kind: BundleKind,
    sources: Vec<PathBuf>,
    output: Option<PathBuf>,
    rerun_directives: bool,
}

impl BundleBuilder {
    /// Create a builder for a bundle shape
    pub fn new(kind: BundleKind) -> Self {
        Self {
            kind,
            sources: Vec::new(),
            output: None,
            rerun_directives: false,
        }
    }

    /// Add a resource file
    pub fn source(mut self, path: impl AsRef<Path>) -> Self {
        self.sources.push(path.as_ref().to_path_buf());
        self
    }

    /// Add resource files, in order
    pub fn sources<P: AsRef<Path>>(mut self, paths: &[P]) -> Self {
        self.sources
            .extend(paths.iter().map(|p| p.as_ref().to_path_buf()));
        self
    }

    /// Set the generated header path
    pub fn output(mut self, path: impl AsRef<Path>) -> Self {
        self.output = Some(path.as_ref().to_path_buf());
        self
    }

    /// Print `cargo:rerun-if-changed` for every resource file
    pub fn emit_rerun_directives(mut self, enabled: bool) -> Self {
        self.rerun_directives = enabled;
        self
    }

    /// Bundle shape this builder renders
    pub fn kind(&self) -> BundleKind {
        self.kind
    }

    /// Render the header without writing it
    pub fn generate(&self) -> WeldResult<String> {
        bundle(self.kind.format().as_ref(), &self.sources)
    }

    /// Render and write the header, returning its path
    pub fn build(self) -> WeldResult<PathBuf> {
        let output = self
            .output
            .clone()
            .ok_or(WeldError::OutputPathNotSet("bundle output"))?;
        let text = self.generate()?;
        write_output(&output, &text)?;
        info!(
            "Bundled {} file(s) into {}",
            self.sources.len(),
            output.display()
        );

        if self.rerun_directives {
            for source in &self.sources {
                println!("cargo:rerun-if-changed={}", source.display());
            }
        }
        Ok(output)
    }
}

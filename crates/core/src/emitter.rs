//! XState module emitter for proto files.
//!
//! The pipeline per file is:
//! 1. Gate: decide whether the file is generated and name the artifact
//! 2. Codegen: ProtoFile -> XStateModule (all naming resolved)
//! 3. Render: XStateModule -> String via the template

use tracing::debug;

use crate::config::GeneratorConfig;
use crate::descriptor::ProtoFile;
use crate::error::Result;
use crate::ir::gate::{self, EmitDecision};
use crate::ir::{Renderer, codegen_module};

/// A generated file ready to be handed back to protoc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Output path relative to the protoc output directory.
    pub name: String,
    /// File contents.
    pub content: String,
}

/// Generates XState modules with a fixed configuration.
#[derive(Debug)]
pub struct Generator {
    config: GeneratorConfig,
    renderer: Renderer,
}

impl Generator {
    /// Prepare a generator. Template problems surface here, before any file
    /// is processed.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        Ok(Self {
            config,
            renderer: Renderer::new()?,
        })
    }

    /// Generate the artifact for `file`, or `None` when the gate skips it.
    pub fn generate(&self, file: &ProtoFile) -> Result<Option<Artifact>> {
        let artifact = match gate::decide(file, &self.config) {
            EmitDecision::Emit { artifact } => artifact,
            EmitDecision::Skip(reason) => {
                debug!(file = %file.name, ?reason, "Skipping file.");
                return Ok(None);
            }
        };

        let module = codegen_module(file, &self.config);
        let content = self.renderer.render(&file.name, &module)?;

        debug!(
            file = %file.name,
            artifact = %artifact,
            services = file.services.len(),
            events = module.events.len(),
            "Generated XState module."
        );

        Ok(Some(Artifact {
            name: artifact,
            content,
        }))
    }
}

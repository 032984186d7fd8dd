//! Shader interface processing.
//!
//! Rewrites a vertex/fragment pair written against `attribute` / `varying` /
//! `uniform` declarations into explicit `layout(location = ...)` and
//! `layout(set = ..., binding = ...)` form, and builds the mesh-level binding
//! formats that match the emitted code.
//!
//! # Pipeline
//!
//! 1. [`extract`] - Cut declarations out of each stage, leaving one marker
//! 2. [`bind_attributes`] - Locations from vertex semantics, integer shims
//! 3. [`bind_vertex_varyings`] / [`bind_fragment_varyings`] - Shared varying locations
//! 4. [`bind_outputs`] - Fragment color output locations
//! 5. [`merge_uniforms`] / [`bind_uniforms`] - Mesh uniform buffer and bind group
//! 6. Compose - Generated blocks replace the marker in each stage
//!
//! # Example
//!
//! ```ignore
//! use redlilium_shader_interface::{
//!     ProcessingOptions, ShaderDefinition, ShaderProcessor, VertexSemantic,
//! };
//!
//! let definition = ShaderDefinition::new(vertex_source, fragment_source)
//!     .with_label("standard")
//!     .with_attribute("vertex_position", VertexSemantic::Position);
//!
//! let processed = ShaderProcessor::new().process(&definition, &ProcessingOptions::new())?;
//! if processed.failed() {
//!     // Diagnostics were already logged; do not create a pipeline.
//! }
//! ```

mod attributes;
mod config;
mod context;
mod declaration;
mod extract;
mod uniforms;
mod varyings;

use std::collections::HashMap;

use crate::bindings::{BindGroupFormat, ShaderStage, UniformBufferFormat};
use crate::error::{DiagnosticKind, Diagnostics, ProcessingResult, ShaderProcessingError};
use crate::profiling::profile_scope;
use crate::types::VertexSemantic;

pub use attributes::{AttributeBinding, AttributeBlock, bind_attributes};
pub use config::{DEFAULT_PRIVATE_ATTRIBUTE_PREFIX, ProcessorConfig};
pub use context::{ProcessingContext, ProcessingOptions};
pub use declaration::{Precision, UniformDeclaration};
pub use extract::{ExtractedDeclarations, MARKER, extract};
pub use uniforms::{UniformBindings, bind_uniforms, merge_uniforms};
pub use varyings::{
    VaryingBinding, VaryingBlock, VaryingLocations, bind_fragment_varyings, bind_outputs,
    bind_vertex_varyings,
};

/// Source pair and attribute semantics of one shader.
#[derive(Debug, Clone, Default)]
pub struct ShaderDefinition {
    /// Optional label used in log output.
    pub label: Option<String>,
    pub vertex: String,
    pub fragment: String,
    /// Attribute name to semantic, for this shader only.
    pub attributes: HashMap<String, VertexSemantic>,
}

impl ShaderDefinition {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            label: None,
            vertex: vertex.into(),
            fragment: fragment.into(),
            attributes: HashMap::new(),
        }
    }

    /// Set a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Map a vertex attribute name to a semantic.
    pub fn with_attribute(mut self, name: impl Into<String>, semantic: VertexSemantic) -> Self {
        self.attributes.insert(name.into(), semantic);
        self
    }
}

/// Result of processing a shader pair.
///
/// The mesh formats are owned by the caller and used later to create the mesh
/// bind group layout. Check [`failed`](Self::failed) before using the sources.
#[derive(Debug, Clone)]
pub struct ProcessedShader {
    pub vertex_source: String,
    pub fragment_source: String,
    /// Uniform buffer of the mesh bind group, `None` if the shader declares no
    /// mesh-level uniforms.
    pub mesh_uniform_buffer_format: Option<UniformBufferFormat>,
    pub mesh_bind_group_format: BindGroupFormat,
    pub attributes: Vec<AttributeBinding>,
    pub vertex_varyings: Vec<VaryingBinding>,
    pub fragment_varyings: Vec<VaryingBinding>,
    pub diagnostics: Diagnostics,
}

impl ProcessedShader {
    /// True if an error diagnostic was recorded; the shader must not be used.
    pub fn failed(&self) -> bool {
        self.diagnostics.failed()
    }
}

/// Rewrites shader pairs into explicit-binding form.
///
/// The processor keeps no state between calls and can be shared across
/// threads.
#[derive(Debug, Clone, Default)]
pub struct ShaderProcessor {
    config: ProcessorConfig,
}

impl ShaderProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProcessorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Process one vertex/fragment pair.
    ///
    /// Declaration and consistency problems are reported through the returned
    /// diagnostics. `Err` is only returned when a declared type has no entry in
    /// the lookup tables, or when the generated code has nowhere to go.
    pub fn process<C: ProcessingContext + ?Sized>(
        &self,
        definition: &ShaderDefinition,
        context: &C,
    ) -> ProcessingResult<ProcessedShader> {
        profile_scope!("shader_process");

        let label = definition.label.as_deref().unwrap_or("shader");
        let mut diagnostics = Diagnostics::new(label);

        let (vertex, fragment) = {
            profile_scope!("shader_extract");
            (extract(&definition.vertex), extract(&definition.fragment))
        };

        for output in &vertex.outputs {
            diagnostics.warning(
                DiagnosticKind::IgnoredVertexOutput,
                Some(ShaderStage::Vertex),
                format!("vertex stage output is removed, declare it as a varying: '{output}'"),
            );
        }

        let attributes = bind_attributes(
            &vertex.attributes,
            &definition.attributes,
            context,
            &self.config,
            &mut diagnostics,
        );
        let (vertex_varyings, varying_locations) =
            bind_vertex_varyings(&vertex.varyings, &mut diagnostics);
        let fragment_varyings =
            bind_fragment_varyings(&varying_locations, &fragment.varyings, &mut diagnostics);
        let outputs = bind_outputs(&fragment.outputs);

        let uniforms = {
            profile_scope!("shader_uniforms");
            let declarations = merge_uniforms(&vertex.uniforms, &fragment.uniforms, &mut diagnostics);
            bind_uniforms(&declarations, context)?
        };

        let vertex_block = format!(
            "{}\n{}\n{}",
            attributes.code, vertex_varyings.code, uniforms.code
        );
        let fragment_block = format!(
            "{}\n{}\n{}",
            fragment_varyings.code, outputs, uniforms.code
        );

        let vertex_source = compose(&vertex, &vertex_block, ShaderStage::Vertex)?;
        let fragment_source = compose(&fragment, &fragment_block, ShaderStage::Fragment)?;

        log::debug!(
            "[{label}] processed: {} attributes, {} varyings, mesh uniforms {} bytes, {} mesh textures",
            attributes.bindings.len(),
            vertex_varyings.bindings.len(),
            uniforms
                .mesh_uniform_buffer_format
                .as_ref()
                .map_or(0, UniformBufferFormat::byte_size),
            uniforms.mesh_bind_group_format.textures().len(),
        );

        Ok(ProcessedShader {
            vertex_source,
            fragment_source,
            mesh_uniform_buffer_format: uniforms.mesh_uniform_buffer_format,
            mesh_bind_group_format: uniforms.mesh_bind_group_format,
            attributes: attributes.bindings,
            vertex_varyings: vertex_varyings.bindings,
            fragment_varyings: fragment_varyings.bindings,
            diagnostics,
        })
    }
}

/// Substitute the generated block at the stage's marker.
fn compose(
    extracted: &ExtractedDeclarations,
    block: &str,
    stage: ShaderStage,
) -> ProcessingResult<String> {
    if !extracted.has_marker() {
        return Err(ShaderProcessingError::MissingRewriteMarker(stage));
    }
    Ok(extracted.source.replacen(MARKER, block, 1))
}

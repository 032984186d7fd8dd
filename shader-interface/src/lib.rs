//! # RedLilium Shader Interface
//!
//! Rewrites GLSL written against legacy `attribute` / `varying` / `uniform`
//! declarations into explicit `layout(set, binding, location)` form, and builds
//! the mesh uniform buffer and bind group formats that match the emitted code.
//!
//! ## Overview
//!
//! This crate provides:
//! - [`ShaderProcessor`] - Runs the whole rewrite for one vertex/fragment pair
//! - [`ProcessingContext`] - Bindings supplied by the view and material groups
//! - [`UniformBufferFormat`] / [`BindGroupFormat`] - Host-side binding layouts
//! - [`Diagnostics`] - Warnings and errors collected during a run
//! - [`types`] - Fixed GLSL type, sampler and vertex semantic tables
//!
//! ## Example
//!
//! ```ignore
//! use redlilium_shader_interface::{
//!     ProcessingOptions, ShaderDefinition, ShaderProcessor, VertexSemantic,
//! };
//!
//! let definition = ShaderDefinition::new(vertex_source, fragment_source)
//!     .with_attribute("vertex_position", VertexSemantic::Position);
//! let processed = ShaderProcessor::new().process(&definition, &ProcessingOptions::new())?;
//! assert!(!processed.failed());
//! ```

pub mod bindings;
pub mod error;
pub mod processor;
pub mod profiling;
pub mod types;

// Re-export main types for convenience
pub use bindings::{
    BIND_GROUP_MATERIAL, BIND_GROUP_MESH, BIND_GROUP_VIEW, BindBufferFormat, BindGroupFormat,
    BindTextureFormat, ShaderStage, ShaderStageFlags, UNIFORM_BUFFER_DEFAULT_SLOT_NAME,
    UniformBufferFormat, UniformField, bind_group_name,
};
pub use error::{
    Diagnostic, DiagnosticKind, Diagnostics, ProcessingResult, Severity, ShaderProcessingError,
};
pub use processor::{
    AttributeBinding, MARKER, ProcessedShader, ProcessingContext, ProcessingOptions,
    ProcessorConfig, ShaderDefinition, ShaderProcessor, VaryingBinding,
};
pub use types::{
    SampleType, SamplerType, TextureDimension, UniformType, VertexDataType, VertexElement,
    VertexSemantic,
};

/// Shader interface library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the shader interface subsystem.
pub fn init() {
    log::info!("RedLilium Shader Interface v{} initialized", VERSION);
}

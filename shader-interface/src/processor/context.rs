//! What the processor knows about bindings it does not own.
//!
//! Per-view and per-material uniforms and textures are supplied by formats the
//! caller already created. The processor skips anything those formats cover and
//! re-emits their declarations so every stage sees the full binding layout.

use std::collections::HashMap;

use crate::bindings::{BindGroupFormat, UniformBufferFormat};
use crate::types::{VertexElement, VertexSemantic};

/// Read-only view of the bindings and vertex formats around a shader.
pub trait ProcessingContext {
    /// True if an external uniform buffer already provides `name`.
    fn has_uniform(&self, name: &str) -> bool;

    /// True if an external bind group already provides texture `name`.
    fn has_texture(&self, name: &str) -> bool;

    /// Vertex buffer element feeding `semantic`, if the mesh format is known.
    fn vertex_element(&self, semantic: VertexSemantic) -> Option<VertexElement>;

    /// External uniform buffers, indexed by bind group. Gaps are `None`.
    fn uniform_formats(&self) -> &[Option<UniformBufferFormat>];

    /// External bind groups, indexed by bind group. Gaps are `None`.
    fn bind_group_formats(&self) -> &[Option<BindGroupFormat>];
}

/// Context built from explicit formats.
#[derive(Debug, Clone, Default)]
pub struct ProcessingOptions {
    uniform_formats: Vec<Option<UniformBufferFormat>>,
    bind_group_formats: Vec<Option<BindGroupFormat>>,
    vertex_elements: HashMap<VertexSemantic, VertexElement>,
}

impl ProcessingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supply the uniform buffer bound at `bind_group`.
    pub fn with_uniform_format(mut self, bind_group: u32, format: UniformBufferFormat) -> Self {
        let index = bind_group as usize;
        if self.uniform_formats.len() <= index {
            self.uniform_formats.resize(index + 1, None);
        }
        self.uniform_formats[index] = Some(format);
        self
    }

    /// Supply the bind group format at `bind_group`.
    pub fn with_bind_group_format(mut self, bind_group: u32, format: BindGroupFormat) -> Self {
        let index = bind_group as usize;
        if self.bind_group_formats.len() <= index {
            self.bind_group_formats.resize(index + 1, None);
        }
        self.bind_group_formats[index] = Some(format);
        self
    }

    /// Describe the vertex buffer element feeding `semantic`.
    pub fn with_vertex_element(mut self, semantic: VertexSemantic, element: VertexElement) -> Self {
        self.vertex_elements.insert(semantic, element);
        self
    }
}

impl ProcessingContext for ProcessingOptions {
    fn has_uniform(&self, name: &str) -> bool {
        self.uniform_formats
            .iter()
            .flatten()
            .any(|format| format.has_field(name))
    }

    fn has_texture(&self, name: &str) -> bool {
        self.bind_group_formats
            .iter()
            .flatten()
            .any(|format| format.has_texture(name))
    }

    fn vertex_element(&self, semantic: VertexSemantic) -> Option<VertexElement> {
        self.vertex_elements.get(&semantic).copied()
    }

    fn uniform_formats(&self) -> &[Option<UniformBufferFormat>] {
        &self.uniform_formats
    }

    fn bind_group_formats(&self) -> &[Option<BindGroupFormat>] {
        &self.bind_group_formats
    }
}

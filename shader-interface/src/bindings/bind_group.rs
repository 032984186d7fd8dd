//! Bind group formats.
//!
//! A [`BindGroupFormat`] lists the buffers and textures of one bind group and
//! assigns their binding slots. Buffers come first (slots `0..n`), then every
//! texture takes two consecutive slots: one for the texture view and one for
//! its sampler.

use std::borrow::Cow;
use std::fmt::Write;

use crate::types::{SampleType, TextureDimension};

use super::stage::ShaderStageFlags;

/// Bind group holding per-view bindings (camera, frame data).
pub const BIND_GROUP_VIEW: u32 = 0;
/// Bind group holding per-material bindings.
pub const BIND_GROUP_MATERIAL: u32 = 1;
/// Bind group holding per-mesh bindings, generated by the processor.
pub const BIND_GROUP_MESH: u32 = 2;

/// Slot name of the mesh uniform buffer.
pub const UNIFORM_BUFFER_DEFAULT_SLOT_NAME: &str = "default";

/// Name used in generated block names for a bind group index.
pub fn bind_group_name(index: u32) -> Cow<'static, str> {
    match index {
        BIND_GROUP_VIEW => Cow::Borrowed("view"),
        BIND_GROUP_MATERIAL => Cow::Borrowed("material"),
        BIND_GROUP_MESH => Cow::Borrowed("mesh"),
        other => Cow::Owned(format!("group{other}")),
    }
}

/// A uniform buffer binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindBufferFormat {
    pub name: String,
    pub visibility: ShaderStageFlags,
}

impl BindBufferFormat {
    pub fn new(name: impl Into<String>, visibility: ShaderStageFlags) -> Self {
        Self {
            name: name.into(),
            visibility,
        }
    }
}

/// A texture binding together with its sampler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindTextureFormat {
    pub name: String,
    pub visibility: ShaderStageFlags,
    pub dimension: TextureDimension,
    pub sample_type: SampleType,
}

impl BindTextureFormat {
    /// Create a filterable 2D texture binding.
    pub fn new(name: impl Into<String>, visibility: ShaderStageFlags) -> Self {
        Self {
            name: name.into(),
            visibility,
            dimension: TextureDimension::D2,
            sample_type: SampleType::Float,
        }
    }

    pub fn with_dimension(mut self, dimension: TextureDimension) -> Self {
        self.dimension = dimension;
        self
    }

    pub fn with_sample_type(mut self, sample_type: SampleType) -> Self {
        self.sample_type = sample_type;
        self
    }
}

/// Buffers and textures of one bind group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindGroupFormat {
    buffers: Vec<BindBufferFormat>,
    textures: Vec<BindTextureFormat>,
}

impl BindGroupFormat {
    pub fn new(buffers: Vec<BindBufferFormat>, textures: Vec<BindTextureFormat>) -> Self {
        Self { buffers, textures }
    }

    pub fn buffers(&self) -> &[BindBufferFormat] {
        &self.buffers
    }

    pub fn textures(&self) -> &[BindTextureFormat] {
        &self.textures
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty() && self.textures.is_empty()
    }

    pub fn has_texture(&self, name: &str) -> bool {
        self.textures.iter().any(|t| t.name == name)
    }

    /// Binding slot of a buffer.
    pub fn buffer_slot(&self, name: &str) -> Option<u32> {
        self.buffers
            .iter()
            .position(|b| b.name == name)
            .map(|index| index as u32)
    }

    /// Binding slot of a texture view. Its sampler is at the next slot.
    pub fn texture_slot(&self, name: &str) -> Option<u32> {
        self.textures
            .iter()
            .position(|t| t.name == name)
            .map(|index| self.buffers.len() as u32 + 2 * index as u32)
    }

    /// Total number of binding slots used.
    pub fn slot_count(&self) -> u32 {
        (self.buffers.len() + 2 * self.textures.len()) as u32
    }

    /// GLSL declarations of every texture and sampler in this group.
    pub fn shader_declaration_textures(&self, bind_group: u32) -> String {
        let mut code = String::new();
        let mut binding = self.buffers.len() as u32;

        for texture in &self.textures {
            let dimension_type = texture.dimension.glsl_texture_type();
            let texture_type = match texture.sample_type {
                SampleType::SInt => Cow::Owned(format!("i{dimension_type}")),
                SampleType::UInt => Cow::Owned(format!("u{dimension_type}")),
                _ => Cow::Borrowed(dimension_type),
            };
            let sampler_type = if texture.sample_type == SampleType::Depth {
                "samplerShadow"
            } else {
                "sampler"
            };

            // Array textures get their view renamed so the original name can be
            // a macro for the combined sampler the shader body expects.
            let is_array = texture.dimension == TextureDimension::D2Array;
            let view_postfix = if is_array { "_texture" } else { "" };
            let name = &texture.name;

            let _ = writeln!(
                code,
                "layout(set = {bind_group}, binding = {binding}) uniform {texture_type} {name}{view_postfix};"
            );
            let _ = writeln!(
                code,
                "layout(set = {bind_group}, binding = {}) uniform {sampler_type} {name}_sampler;",
                binding + 1
            );
            if is_array {
                let combined_type = match texture.sample_type {
                    SampleType::SInt => "isampler2DArray",
                    SampleType::UInt => "usampler2DArray",
                    SampleType::Depth => "sampler2DArrayShadow",
                    SampleType::Float | SampleType::UnfilterableFloat => "sampler2DArray",
                };
                let _ = writeln!(
                    code,
                    "#define {name} {combined_type}({name}{view_postfix}, {name}_sampler)"
                );
            }
            binding += 2;
        }

        code
    }
}

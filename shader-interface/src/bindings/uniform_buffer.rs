//! Uniform buffer byte layout.
//!
//! A [`UniformBufferFormat`] is built from an ordered list of fields and
//! computes a std140 layout for them. The same format produces the GLSL block
//! declaration, so the host-side offsets and the shader-side layout always
//! describe the same memory.

use std::fmt::Write;

use crate::error::{ProcessingResult, ShaderProcessingError};
use crate::types::UniformType;

use super::bind_group::bind_group_name;

/// A uniform to place into a uniform buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformField {
    /// Uniform name as declared in the shader.
    pub name: String,
    /// Value type.
    pub ty: UniformType,
    /// Number of array elements, 0 for a non-array uniform.
    pub array_size: u32,
}

impl UniformField {
    /// Create a non-array field.
    pub fn new(name: impl Into<String>, ty: UniformType) -> Self {
        Self {
            name: name.into(),
            ty,
            array_size: 0,
        }
    }

    /// Make this field an array of `size` elements.
    pub fn with_array_size(mut self, size: u32) -> Self {
        self.array_size = size;
        self
    }

    pub fn is_array(&self) -> bool {
        self.array_size > 0
    }

    /// Byte size occupied by this field, including array element padding.
    ///
    /// `None` if the size does not fit into `u32`.
    pub fn byte_size(&self) -> Option<u32> {
        if self.is_array() {
            self.ty.array_stride().checked_mul(self.array_size)
        } else {
            Some(self.ty.size())
        }
    }

    fn alignment(&self) -> u32 {
        if self.is_array() {
            16
        } else {
            self.ty.alignment()
        }
    }
}

fn round_up(value: u32, alignment: u32) -> Option<u32> {
    value.checked_next_multiple_of(alignment)
}

/// A field with its assigned byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformFieldLayout {
    pub field: UniformField,
    /// Byte offset from the start of the buffer.
    pub offset: u32,
}

/// Layout of a uniform buffer and its shader declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformBufferFormat {
    fields: Vec<UniformFieldLayout>,
    byte_size: u32,
}

impl UniformBufferFormat {
    /// Lay out `fields` in the given order.
    ///
    /// Fails if the buffer would be larger than `u32::MAX` bytes.
    pub fn new(fields: Vec<UniformField>) -> ProcessingResult<Self> {
        let mut offset = 0u32;
        let mut layouts = Vec::with_capacity(fields.len());

        for field in fields {
            let end = round_up(offset, field.alignment()).and_then(|field_offset| {
                let end = field_offset.checked_add(field.byte_size()?)?;
                Some((field_offset, end))
            });
            let Some((field_offset, end)) = end else {
                return Err(ShaderProcessingError::UniformBufferOverflow(field.name));
            };
            offset = end;
            layouts.push(UniformFieldLayout {
                field,
                offset: field_offset,
            });
        }

        let byte_size = round_up(offset, 16).ok_or_else(|| {
            let name = layouts
                .last()
                .map(|layout| layout.field.name.clone())
                .unwrap_or_default();
            ShaderProcessingError::UniformBufferOverflow(name)
        })?;

        Ok(Self {
            fields: layouts,
            byte_size,
        })
    }

    /// Total buffer size in bytes, rounded up to 16.
    pub fn byte_size(&self) -> u32 {
        self.byte_size
    }

    pub fn fields(&self) -> &[UniformFieldLayout] {
        &self.fields
    }

    /// Look up a field by uniform name.
    pub fn field(&self, name: &str) -> Option<&UniformFieldLayout> {
        self.fields.iter().find(|f| f.field.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// GLSL declaration of this buffer at `bind_group` / `binding`.
    pub fn shader_declaration(&self, bind_group: u32, binding: u32) -> String {
        let mut code = format!(
            "layout(set = {bind_group}, binding = {binding}, std140) uniform ub_{} {{\n",
            bind_group_name(bind_group)
        );
        for layout in &self.fields {
            let field = &layout.field;
            let _ = write!(code, "    {} {}", field.ty.glsl_name(), field.name);
            if field.is_array() {
                let _ = write!(code, "[{}]", field.array_size);
            }
            code.push_str(";\n");
        }
        code.push_str("};\n");
        code
    }
}

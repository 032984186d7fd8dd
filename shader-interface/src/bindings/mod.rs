//! Host-side binding descriptors.
//!
//! These are the formats the processor keeps in sync with the shader text it
//! writes:
//!
//! - [`UniformBufferFormat`] - Byte layout of a uniform buffer and its GLSL block
//! - [`BindGroupFormat`] - Buffer and texture slots of one bind group
//! - [`ShaderStageFlags`] - Which stages see a binding

mod bind_group;
mod stage;
mod uniform_buffer;

pub use bind_group::{
    BIND_GROUP_MATERIAL, BIND_GROUP_MESH, BIND_GROUP_VIEW, BindBufferFormat, BindGroupFormat,
    BindTextureFormat, UNIFORM_BUFFER_DEFAULT_SLOT_NAME, bind_group_name,
};
pub use stage::{ShaderStage, ShaderStageFlags};
pub use uniform_buffer::{UniformBufferFormat, UniformField, UniformFieldLayout};

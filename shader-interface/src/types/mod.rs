//! Fixed lookup tables shared by every processing run.
//!
//! The tables are closed enums resolved by exhaustive matches, so they are
//! immutable and safe to use from any thread.

mod texture;
mod uniform;
mod vertex;

pub use texture::{SampleType, SamplerType, TextureDimension};
pub use uniform::UniformType;
pub use vertex::{VertexDataType, VertexElement, VertexSemantic};

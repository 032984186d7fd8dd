//! Uniform value types that can live in a uniform buffer.

/// Type of a non-sampler uniform.
///
/// This is the closed set of GLSL base types the processor can place into a
/// uniform buffer. Anything else is rejected during processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformType {
    Bool,
    Int,
    Uint,
    Float,
    Vec2,
    Vec3,
    Vec4,
    IVec2,
    IVec3,
    IVec4,
    UVec2,
    UVec3,
    UVec4,
    BVec2,
    BVec3,
    BVec4,
    Mat2,
    Mat3,
    Mat4,
}

impl UniformType {
    /// Resolve a GLSL type name.
    pub fn from_glsl(name: &str) -> Option<Self> {
        let ty = match name {
            "bool" => Self::Bool,
            "int" => Self::Int,
            "uint" => Self::Uint,
            "float" => Self::Float,
            "vec2" => Self::Vec2,
            "vec3" => Self::Vec3,
            "vec4" => Self::Vec4,
            "ivec2" => Self::IVec2,
            "ivec3" => Self::IVec3,
            "ivec4" => Self::IVec4,
            "uvec2" => Self::UVec2,
            "uvec3" => Self::UVec3,
            "uvec4" => Self::UVec4,
            "bvec2" => Self::BVec2,
            "bvec3" => Self::BVec3,
            "bvec4" => Self::BVec4,
            "mat2" => Self::Mat2,
            "mat3" => Self::Mat3,
            "mat4" => Self::Mat4,
            _ => return None,
        };
        Some(ty)
    }

    /// GLSL spelling of this type.
    pub fn glsl_name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float => "float",
            Self::Vec2 => "vec2",
            Self::Vec3 => "vec3",
            Self::Vec4 => "vec4",
            Self::IVec2 => "ivec2",
            Self::IVec3 => "ivec3",
            Self::IVec4 => "ivec4",
            Self::UVec2 => "uvec2",
            Self::UVec3 => "uvec3",
            Self::UVec4 => "uvec4",
            Self::BVec2 => "bvec2",
            Self::BVec3 => "bvec3",
            Self::BVec4 => "bvec4",
            Self::Mat2 => "mat2",
            Self::Mat3 => "mat3",
            Self::Mat4 => "mat4",
        }
    }

    /// Size in bytes of one value in std140 layout.
    ///
    /// Matrix columns are padded to 16 bytes.
    pub fn size(&self) -> u32 {
        match self {
            Self::Bool | Self::Int | Self::Uint | Self::Float => 4,
            Self::Vec2 | Self::IVec2 | Self::UVec2 | Self::BVec2 => 8,
            Self::Vec3 | Self::IVec3 | Self::UVec3 | Self::BVec3 => 12,
            Self::Vec4 | Self::IVec4 | Self::UVec4 | Self::BVec4 => 16,
            Self::Mat2 => 32,
            Self::Mat3 => 48,
            Self::Mat4 => 64,
        }
    }

    /// Required alignment in bytes of one value in std140 layout.
    pub fn alignment(&self) -> u32 {
        match self {
            Self::Bool | Self::Int | Self::Uint | Self::Float => 4,
            Self::Vec2 | Self::IVec2 | Self::UVec2 | Self::BVec2 => 8,
            _ => 16,
        }
    }

    /// Distance in bytes between two elements of an array of this type.
    ///
    /// std140 pads every array element to a multiple of 16 bytes.
    pub fn array_stride(&self) -> u32 {
        self.size().next_multiple_of(16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glsl_name_roundtrip() {
        for name in ["bool", "uint", "vec3", "ivec4", "bvec2", "mat3"] {
            let ty = UniformType::from_glsl(name).unwrap();
            assert_eq!(ty.glsl_name(), name);
        }
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(UniformType::from_glsl("vec5"), None);
        assert_eq!(UniformType::from_glsl("sampler2D"), None);
        assert_eq!(UniformType::from_glsl("dmat4"), None);
    }

    #[test]
    fn test_std140_sizes() {
        assert_eq!(UniformType::Float.size(), 4);
        assert_eq!(UniformType::Vec3.size(), 12);
        assert_eq!(UniformType::Vec3.alignment(), 16);
        assert_eq!(UniformType::Vec2.alignment(), 8);
        assert_eq!(UniformType::Mat3.size(), 48);
    }

    #[test]
    fn test_array_stride() {
        assert_eq!(UniformType::Float.array_stride(), 16);
        assert_eq!(UniformType::Vec3.array_stride(), 16);
        assert_eq!(UniformType::Mat3.array_stride(), 48);
        assert_eq!(UniformType::Mat4.array_stride(), 64);
    }
}

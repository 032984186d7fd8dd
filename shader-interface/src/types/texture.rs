//! Sampler uniform types, texture dimensions and sample types.

/// Dimension of a bound texture view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextureDimension {
    #[default]
    D2,
    D2Array,
    Cube,
    D3,
}

impl TextureDimension {
    /// GLSL texture type for this dimension, without the sample type prefix.
    pub fn glsl_texture_type(&self) -> &'static str {
        match self {
            Self::D2 => "texture2D",
            Self::D2Array => "texture2DArray",
            Self::Cube => "textureCube",
            Self::D3 => "texture3D",
        }
    }
}

/// How a texture is sampled, which decides the binding layout entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SampleType {
    /// Float texture usable with a filtering sampler.
    #[default]
    Float,
    /// Float texture that must not be filtered (high precision formats).
    UnfilterableFloat,
    /// Depth texture sampled with a comparison sampler.
    Depth,
    /// Signed integer texture.
    SInt,
    /// Unsigned integer texture.
    UInt,
}

/// GLSL sampler type of a texture uniform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SamplerType {
    Sampler2D,
    Sampler3D,
    SamplerCube,
    Sampler2DArray,
    Sampler2DShadow,
    SamplerCubeShadow,
    Sampler2DArrayShadow,
    ISampler2D,
    USampler2D,
    ISampler3D,
    USampler3D,
    ISamplerCube,
    USamplerCube,
    ISampler2DArray,
    USampler2DArray,
}

impl SamplerType {
    /// Resolve a GLSL sampler type name.
    pub fn from_glsl(name: &str) -> Option<Self> {
        let ty = match name {
            "sampler2D" => Self::Sampler2D,
            "sampler3D" => Self::Sampler3D,
            "samplerCube" => Self::SamplerCube,
            "sampler2DArray" => Self::Sampler2DArray,
            "sampler2DShadow" => Self::Sampler2DShadow,
            "samplerCubeShadow" => Self::SamplerCubeShadow,
            "sampler2DArrayShadow" => Self::Sampler2DArrayShadow,
            "isampler2D" => Self::ISampler2D,
            "usampler2D" => Self::USampler2D,
            "isampler3D" => Self::ISampler3D,
            "usampler3D" => Self::USampler3D,
            "isamplerCube" => Self::ISamplerCube,
            "usamplerCube" => Self::USamplerCube,
            "isampler2DArray" => Self::ISampler2DArray,
            "usampler2DArray" => Self::USampler2DArray,
            _ => return None,
        };
        Some(ty)
    }

    /// Texture dimension. Shadow variants use the dimension of their base type.
    pub fn dimension(&self) -> TextureDimension {
        match self {
            Self::Sampler2D | Self::Sampler2DShadow | Self::ISampler2D | Self::USampler2D => {
                TextureDimension::D2
            }
            Self::Sampler3D | Self::ISampler3D | Self::USampler3D => TextureDimension::D3,
            Self::SamplerCube | Self::SamplerCubeShadow | Self::ISamplerCube | Self::USamplerCube => {
                TextureDimension::Cube
            }
            Self::Sampler2DArray
            | Self::Sampler2DArrayShadow
            | Self::ISampler2DArray
            | Self::USampler2DArray => TextureDimension::D2Array,
        }
    }

    /// True for depth-comparison samplers.
    pub fn is_shadow(&self) -> bool {
        matches!(
            self,
            Self::Sampler2DShadow | Self::SamplerCubeShadow | Self::Sampler2DArrayShadow
        )
    }
}

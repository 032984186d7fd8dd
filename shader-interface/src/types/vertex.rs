//! Vertex attribute semantics and vertex element formats.
//!
//! Semantics are used to match shader attribute names with vertex buffer
//! channels. Each semantic maps to a fixed attribute location shared by every
//! shader, so vertex buffer layouts can be built without looking at the shader.
//!
//! The generic `Attr*` semantics alias the named ones: `Attr0` and `Position`
//! both live at location 0. A shader that uses both gets a location collision.

use std::fmt;
use std::str::FromStr;

/// Semantic meaning of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexSemantic {
    Position,
    Normal,
    BlendWeight,
    BlendIndices,
    Color,
    TexCoord0,
    TexCoord1,
    TexCoord2,
    TexCoord3,
    TexCoord4,
    TexCoord5,
    TexCoord6,
    TexCoord7,
    Tangent,
    Attr0,
    Attr1,
    Attr2,
    Attr3,
    Attr4,
    Attr5,
    Attr6,
    Attr7,
    Attr8,
    Attr9,
    Attr10,
    Attr11,
    Attr12,
    Attr13,
    Attr14,
    Attr15,
}

impl VertexSemantic {
    /// Fixed attribute location for this semantic.
    pub fn location(&self) -> u32 {
        match self {
            Self::Position => 0,
            Self::Normal => 1,
            Self::BlendWeight => 2,
            Self::BlendIndices => 3,
            Self::Color => 4,
            Self::TexCoord0 => 5,
            Self::TexCoord1 => 6,
            Self::TexCoord2 => 7,
            Self::TexCoord3 => 8,
            Self::TexCoord4 => 9,
            Self::TexCoord5 => 10,
            Self::TexCoord6 => 11,
            Self::TexCoord7 => 12,
            Self::Tangent => 13,
            Self::Attr0 => 0,
            Self::Attr1 => 1,
            Self::Attr2 => 2,
            Self::Attr3 => 3,
            Self::Attr4 => 4,
            Self::Attr5 => 5,
            Self::Attr6 => 6,
            Self::Attr7 => 7,
            Self::Attr8 => 8,
            Self::Attr9 => 9,
            Self::Attr10 => 10,
            Self::Attr11 => 11,
            Self::Attr12 => 12,
            Self::Attr13 => 13,
            Self::Attr14 => 14,
            Self::Attr15 => 15,
        }
    }

    /// Engine name of the semantic, e.g. `POSITION` or `TEXCOORD0`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Position => "POSITION",
            Self::Normal => "NORMAL",
            Self::BlendWeight => "BLENDWEIGHT",
            Self::BlendIndices => "BLENDINDICES",
            Self::Color => "COLOR",
            Self::TexCoord0 => "TEXCOORD0",
            Self::TexCoord1 => "TEXCOORD1",
            Self::TexCoord2 => "TEXCOORD2",
            Self::TexCoord3 => "TEXCOORD3",
            Self::TexCoord4 => "TEXCOORD4",
            Self::TexCoord5 => "TEXCOORD5",
            Self::TexCoord6 => "TEXCOORD6",
            Self::TexCoord7 => "TEXCOORD7",
            Self::Tangent => "TANGENT",
            Self::Attr0 => "ATTR0",
            Self::Attr1 => "ATTR1",
            Self::Attr2 => "ATTR2",
            Self::Attr3 => "ATTR3",
            Self::Attr4 => "ATTR4",
            Self::Attr5 => "ATTR5",
            Self::Attr6 => "ATTR6",
            Self::Attr7 => "ATTR7",
            Self::Attr8 => "ATTR8",
            Self::Attr9 => "ATTR9",
            Self::Attr10 => "ATTR10",
            Self::Attr11 => "ATTR11",
            Self::Attr12 => "ATTR12",
            Self::Attr13 => "ATTR13",
            Self::Attr14 => "ATTR14",
            Self::Attr15 => "ATTR15",
        }
    }

    /// Every semantic, in declaration order.
    pub const ALL: [Self; 30] = [
        Self::Position,
        Self::Normal,
        Self::BlendWeight,
        Self::BlendIndices,
        Self::Color,
        Self::TexCoord0,
        Self::TexCoord1,
        Self::TexCoord2,
        Self::TexCoord3,
        Self::TexCoord4,
        Self::TexCoord5,
        Self::TexCoord6,
        Self::TexCoord7,
        Self::Tangent,
        Self::Attr0,
        Self::Attr1,
        Self::Attr2,
        Self::Attr3,
        Self::Attr4,
        Self::Attr5,
        Self::Attr6,
        Self::Attr7,
        Self::Attr8,
        Self::Attr9,
        Self::Attr10,
        Self::Attr11,
        Self::Attr12,
        Self::Attr13,
        Self::Attr14,
        Self::Attr15,
    ];
}

impl fmt::Display for VertexSemantic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VertexSemantic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|semantic| semantic.name() == s)
            .ok_or_else(|| format!("unknown vertex semantic: {s}"))
    }
}

/// Component data type of a vertex buffer element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexDataType {
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Float16,
    Float32,
}

impl VertexDataType {
    /// True for 16 and 32 bit float components.
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float16 | Self::Float32)
    }

    /// True for signed integer components.
    pub fn is_signed_int(&self) -> bool {
        matches!(self, Self::Int8 | Self::Int16 | Self::Int32)
    }
}

/// Format of the vertex buffer element feeding one semantic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexElement {
    /// Component data type.
    pub data_type: VertexDataType,
    /// Integer components are normalized to `[0, 1]` or `[-1, 1]` on fetch.
    pub normalized: bool,
    /// Integer components are read by the shader as integers.
    pub as_int: bool,
}

impl VertexElement {
    /// Create an element that is neither normalized nor read as integers.
    pub fn new(data_type: VertexDataType) -> Self {
        Self {
            data_type,
            normalized: false,
            as_int: false,
        }
    }

    /// Mark integer components as normalized.
    pub fn normalized(mut self) -> Self {
        self.normalized = true;
        self
    }

    /// Mark integer components as read by the shader as integers.
    pub fn as_int(mut self) -> Self {
        self.as_int = true;
        self
    }

    /// True if the vertex fetch delivers integers to a float-typed attribute,
    /// which explicit-binding APIs reject.
    pub fn needs_int_attribute(&self) -> bool {
        !self.data_type.is_float() && !self.normalized && !self.as_int
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semantic_locations() {
        assert_eq!(VertexSemantic::Position.location(), 0);
        assert_eq!(VertexSemantic::Color.location(), 4);
        assert_eq!(VertexSemantic::TexCoord7.location(), 12);
        assert_eq!(VertexSemantic::Tangent.location(), 13);
        assert_eq!(VertexSemantic::Attr15.location(), 15);
        assert_eq!(
            VertexSemantic::Attr0.location(),
            VertexSemantic::Position.location()
        );
    }

    #[test]
    fn test_semantic_from_str() {
        assert_eq!("NORMAL".parse::<VertexSemantic>(), Ok(VertexSemantic::Normal));
        assert_eq!("ATTR12".parse::<VertexSemantic>(), Ok(VertexSemantic::Attr12));
        assert!("normal".parse::<VertexSemantic>().is_err());
    }

    #[test]
    fn test_needs_int_attribute() {
        assert!(VertexElement::new(VertexDataType::Int8).needs_int_attribute());
        assert!(!VertexElement::new(VertexDataType::Float16).needs_int_attribute());
        assert!(
            !VertexElement::new(VertexDataType::Uint8)
                .normalized()
                .needs_int_attribute()
        );
        assert!(
            !VertexElement::new(VertexDataType::Uint16)
                .as_int()
                .needs_int_attribute()
        );
    }
}

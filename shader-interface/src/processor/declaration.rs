//! Uniform declaration parsing.

use crate::bindings::ShaderStage;
use crate::error::{DiagnosticKind, Diagnostics};
use crate::types::UniformType;

/// GLSL precision qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    Low,
    Medium,
    High,
}

impl Precision {
    pub fn from_glsl(word: &str) -> Option<Self> {
        match word {
            "lowp" => Some(Self::Low),
            "mediump" => Some(Self::Medium),
            "highp" => Some(Self::High),
            _ => None,
        }
    }
}

/// A parsed `uniform` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformDeclaration {
    /// Declaration body as extracted, e.g. `highp vec4 tints[4]`.
    pub line: String,
    pub precision: Option<Precision>,
    pub base_type: String,
    pub name: String,
    /// Number of array elements, 0 for a non-array uniform.
    pub array_size: u32,
    pub is_sampler: bool,
    pub is_signed_int: bool,
    pub is_unsigned_int: bool,
}

impl UniformDeclaration {
    /// Parse one declaration body.
    ///
    /// Problems are recorded in `diagnostics`. `None` is returned when no usable
    /// declaration can be recovered; a comma-separated line is reported but
    /// still parsed as its first uniform.
    pub fn parse(
        line: &str,
        stage: Option<ShaderStage>,
        diagnostics: &mut Diagnostics,
    ) -> Option<Self> {
        let mut words = line.split_whitespace().peekable();

        let precision = words.peek().and_then(|word| Precision::from_glsl(word));
        if precision.is_some() {
            words.next();
        }

        let Some(base_type) = words.next() else {
            diagnostics.error(
                DiagnosticKind::MalformedDeclaration,
                stage,
                format!("uniform declaration has no type: '{line}'"),
            );
            return None;
        };

        if line.contains(',') {
            diagnostics.error(
                DiagnosticKind::MultipleUniformsPerLine,
                stage,
                format!(
                    "a comma on a uniform line is not supported, split it into multiple uniforms: '{line}'"
                ),
            );
        }

        let rest = words.collect::<Vec<_>>().join(" ");
        let (name, array_size) = if rest.contains('[') {
            let Some((name, size)) = split_array(&rest) else {
                diagnostics.error(
                    DiagnosticKind::MalformedDeclaration,
                    stage,
                    format!("uniform array declaration cannot be parsed: '{line}'"),
                );
                return None;
            };
            match size.parse::<u32>() {
                Ok(size) if size > 0 && fits_uniform_buffer(base_type, size) => (name, size),
                Ok(size) if size > 0 => {
                    diagnostics.error(
                        DiagnosticKind::InvalidArraySize,
                        stage,
                        format!(
                            "uniform array of {size} elements does not fit into a uniform buffer: '{line}'"
                        ),
                    );
                    return None;
                }
                _ => {
                    diagnostics.error(
                        DiagnosticKind::InvalidArraySize,
                        stage,
                        format!(
                            "only numerically specified uniform array sizes are supported, this uniform is not supported: '{line}'"
                        ),
                    );
                    return None;
                }
            }
        } else {
            let Some(name) = rest.split([' ', ',']).next().filter(|n| !n.is_empty()) else {
                diagnostics.error(
                    DiagnosticKind::MalformedDeclaration,
                    stage,
                    format!("uniform declaration has no name: '{line}'"),
                );
                return None;
            };
            (name, 0)
        };

        Some(Self {
            line: line.to_string(),
            precision,
            base_type: base_type.to_string(),
            name: name.to_string(),
            array_size,
            is_sampler: base_type.contains("sampler"),
            is_signed_int: base_type.contains("isampler"),
            is_unsigned_int: base_type.contains("usampler"),
        })
    }
}

/// True if `size` elements of `base_type` have a byte size that fits `u32`.
///
/// Sampler arrays and unknown types are measured with a 16 byte stride.
fn fits_uniform_buffer(base_type: &str, size: u32) -> bool {
    UniformType::from_glsl(base_type)
        .map_or(16, |ty| ty.array_stride())
        .checked_mul(size)
        .is_some()
}

/// Split `name[size]` into its name and trimmed size expression.
fn split_array(text: &str) -> Option<(&str, &str)> {
    let open = text.find('[')?;
    let close = open + text[open..].find(']')?;
    let name = text[..open].trim();
    let valid_name = !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    valid_name.then(|| (name, text[open + 1..close].trim()))
}

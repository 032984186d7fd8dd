//! Uniform classification and mesh binding construction.
//!
//! Uniforms of both stages are merged, then split into textures and plain
//! values. Whatever the external view and material formats do not provide goes
//! into the mesh bind group: plain values into one uniform buffer, textures
//! into texture/sampler slot pairs after it.

use std::collections::{HashMap, HashSet};

use crate::bindings::{
    BIND_GROUP_MESH, BindBufferFormat, BindGroupFormat, BindTextureFormat, ShaderStage,
    ShaderStageFlags, UNIFORM_BUFFER_DEFAULT_SLOT_NAME, UniformBufferFormat, UniformField,
};
use crate::error::{DiagnosticKind, Diagnostics, ProcessingResult, ShaderProcessingError};
use crate::types::{SampleType, SamplerType, UniformType};

use super::context::ProcessingContext;
use super::declaration::{Precision, UniformDeclaration};

/// Mesh-level formats plus the declaration code for every bind group.
#[derive(Debug, Clone)]
pub struct UniformBindings {
    /// Declarations of the external groups followed by the mesh group.
    pub code: String,
    pub mesh_uniform_buffer_format: Option<UniformBufferFormat>,
    pub mesh_bind_group_format: BindGroupFormat,
}

/// Merge and parse the uniform declarations of both stages.
///
/// Identical declaration text is kept once, in first-seen order. A name
/// declared with different text is a type mismatch: the first declaration is
/// kept and an error recorded.
pub fn merge_uniforms(
    vertex: &[String],
    fragment: &[String],
    diagnostics: &mut Diagnostics,
) -> Vec<UniformDeclaration> {
    let mut seen_lines = HashSet::new();
    let mut lines_by_name: HashMap<String, String> = HashMap::new();
    let mut merged = Vec::new();

    let tagged = vertex
        .iter()
        .map(|line| (ShaderStage::Vertex, line))
        .chain(fragment.iter().map(|line| (ShaderStage::Fragment, line)));

    for (stage, line) in tagged {
        if !seen_lines.insert(line.as_str()) {
            continue;
        }
        let Some(declaration) = UniformDeclaration::parse(line, Some(stage), diagnostics) else {
            continue;
        };

        if let Some(existing) = lines_by_name.get(&declaration.name) {
            diagnostics.error(
                DiagnosticKind::UniformTypeMismatch,
                Some(stage),
                format!(
                    "vertex and fragment shaders cannot use the same uniform name with different types: '{existing}' and '{line}'"
                ),
            );
            continue;
        }

        lines_by_name.insert(declaration.name.clone(), line.clone());
        merged.push(declaration);
    }

    merged
}

/// Sample type a texture uniform is bound with.
fn sample_type(declaration: &UniformDeclaration, sampler: SamplerType) -> SampleType {
    if declaration.is_signed_int {
        SampleType::SInt
    } else if declaration.is_unsigned_int {
        SampleType::UInt
    } else if sampler.is_shadow() {
        SampleType::Depth
    } else if declaration.precision == Some(Precision::High) {
        SampleType::UnfilterableFloat
    } else {
        SampleType::Float
    }
}

/// Build the mesh bind group and emit the declarations of all bind groups.
pub fn bind_uniforms<C: ProcessingContext + ?Sized>(
    declarations: &[UniformDeclaration],
    context: &C,
) -> ProcessingResult<UniformBindings> {
    let mesh_index = BIND_GROUP_MESH as usize;
    if matches!(context.uniform_formats().get(mesh_index), Some(Some(_)))
        || matches!(context.bind_group_formats().get(mesh_index), Some(Some(_)))
    {
        return Err(ShaderProcessingError::ReservedBindGroup(BIND_GROUP_MESH));
    }

    let (samplers, values): (Vec<_>, Vec<_>) =
        declarations.iter().partition(|declaration| declaration.is_sampler);

    let mut fields = Vec::new();
    for declaration in values {
        if context.has_uniform(&declaration.name) {
            continue;
        }
        let ty = UniformType::from_glsl(&declaration.base_type).ok_or_else(|| {
            ShaderProcessingError::UnknownUniformType {
                type_name: declaration.base_type.clone(),
                line: declaration.line.clone(),
            }
        })?;
        fields.push(UniformField::new(&declaration.name, ty).with_array_size(declaration.array_size));
    }

    let mesh_uniform_buffer_format = if fields.is_empty() {
        None
    } else {
        Some(UniformBufferFormat::new(fields)?)
    };

    let mut buffers = Vec::new();
    if mesh_uniform_buffer_format.is_some() {
        buffers.push(BindBufferFormat::new(
            UNIFORM_BUFFER_DEFAULT_SLOT_NAME,
            ShaderStageFlags::VERTEX_FRAGMENT,
        ));
    }

    let mut textures = Vec::new();
    for declaration in samplers {
        if context.has_texture(&declaration.name) {
            continue;
        }
        let sampler = SamplerType::from_glsl(&declaration.base_type).ok_or_else(|| {
            ShaderProcessingError::UnknownSamplerType {
                type_name: declaration.base_type.clone(),
                line: declaration.line.clone(),
            }
        })?;
        textures.push(
            BindTextureFormat::new(&declaration.name, ShaderStageFlags::VERTEX_FRAGMENT)
                .with_dimension(sampler.dimension())
                .with_sample_type(sample_type(declaration, sampler)),
        );
    }

    let mesh_bind_group_format = BindGroupFormat::new(buffers, textures);

    let mut code = String::new();
    for (index, format) in context.uniform_formats().iter().enumerate() {
        if let Some(format) = format {
            code.push_str(&format.shader_declaration(index as u32, 0));
        }
    }
    if let Some(format) = &mesh_uniform_buffer_format {
        code.push_str(&format.shader_declaration(BIND_GROUP_MESH, 0));
    }
    for (index, format) in context.bind_group_formats().iter().enumerate() {
        if let Some(format) = format {
            code.push_str(&format.shader_declaration_textures(index as u32));
        }
    }
    code.push_str(&mesh_bind_group_format.shader_declaration_textures(BIND_GROUP_MESH));

    Ok(UniformBindings {
        code,
        mesh_uniform_buffer_format,
        mesh_bind_group_format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::BIND_GROUP_VIEW;
    use crate::processor::context::ProcessingOptions;
    use crate::types::TextureDimension;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn merged(vertex: &[&str], fragment: &[&str]) -> (Vec<UniformDeclaration>, Diagnostics) {
        let mut diagnostics = Diagnostics::new("test");
        let declarations = merge_uniforms(&lines(vertex), &lines(fragment), &mut diagnostics);
        (declarations, diagnostics)
    }

    #[test]
    fn test_identical_declarations_merge() {
        let (declarations, diagnostics) =
            merged(&["float time", "mat4 matrix_model"], &["float time"]);

        assert!(diagnostics.is_empty());
        let names: Vec<_> = declarations.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["time", "matrix_model"]);
    }

    #[test]
    fn test_type_mismatch_across_stages() {
        let (declarations, diagnostics) = merged(&["float time"], &["int time"]);

        assert_eq!(declarations.len(), 1);
        assert!(diagnostics.failed());
        let mismatch = diagnostics
            .of_kind(DiagnosticKind::UniformTypeMismatch)
            .next()
            .unwrap();
        assert_eq!(mismatch.stage, Some(ShaderStage::Fragment));
    }

    #[test]
    fn test_sample_type_inference() {
        let (declarations, _) = merged(
            &[
                "sampler2D diffuseMap",
                "highp sampler2D positionMap",
                "sampler2DShadow shadowMap",
                "highp samplerCubeShadow cubeShadow",
                "isampler2D ids",
                "usampler2DArray masks",
            ],
            &[],
        );
        let bindings = bind_uniforms(&declarations, &ProcessingOptions::new()).unwrap();
        let textures = bindings.mesh_bind_group_format.textures();

        let sample_types: Vec<_> = textures.iter().map(|t| t.sample_type).collect();
        assert_eq!(
            sample_types,
            vec![
                SampleType::Float,
                SampleType::UnfilterableFloat,
                SampleType::Depth,
                SampleType::Depth,
                SampleType::SInt,
                SampleType::UInt,
            ]
        );
        assert_eq!(textures[3].dimension, TextureDimension::Cube);
        assert_eq!(textures[5].dimension, TextureDimension::D2Array);
        assert!(bindings.mesh_uniform_buffer_format.is_none());
    }

    #[test]
    fn test_external_bindings_are_filtered() {
        let options = ProcessingOptions::new()
            .with_uniform_format(
                BIND_GROUP_VIEW,
                UniformBufferFormat::new(vec![UniformField::new(
                    "matrix_viewProjection",
                    UniformType::Mat4,
                )])
                .unwrap(),
            )
            .with_bind_group_format(
                BIND_GROUP_VIEW,
                BindGroupFormat::new(
                    vec![BindBufferFormat::new(
                        UNIFORM_BUFFER_DEFAULT_SLOT_NAME,
                        ShaderStageFlags::VERTEX_FRAGMENT,
                    )],
                    vec![BindTextureFormat::new(
                        "shadowAtlas",
                        ShaderStageFlags::VERTEX_FRAGMENT,
                    )],
                ),
            );
        let (declarations, _) = merged(
            &["mat4 matrix_viewProjection", "mat4 matrix_model"],
            &["sampler2D shadowAtlas", "sampler2D diffuseMap"],
        );

        let bindings = bind_uniforms(&declarations, &options).unwrap();
        let mesh_buffer = bindings.mesh_uniform_buffer_format.unwrap();

        assert_eq!(mesh_buffer.fields().len(), 1);
        assert!(mesh_buffer.has_field("matrix_model"));
        assert_eq!(bindings.mesh_bind_group_format.textures().len(), 1);
        assert!(bindings.mesh_bind_group_format.has_texture("diffuseMap"));
        assert_eq!(
            bindings.code,
            "layout(set = 0, binding = 0, std140) uniform ub_view {\n    mat4 matrix_viewProjection;\n};\n\
             layout(set = 2, binding = 0, std140) uniform ub_mesh {\n    mat4 matrix_model;\n};\n\
             layout(set = 0, binding = 1) uniform texture2D shadowAtlas;\n\
             layout(set = 0, binding = 2) uniform sampler shadowAtlas_sampler;\n\
             layout(set = 2, binding = 1) uniform texture2D diffuseMap;\n\
             layout(set = 2, binding = 2) uniform sampler diffuseMap_sampler;\n"
        );
    }

    #[test]
    fn test_unknown_uniform_type() {
        let (declarations, _) = merged(&["vec5 color"], &[]);
        let err = bind_uniforms(&declarations, &ProcessingOptions::new()).unwrap_err();

        assert_eq!(
            err,
            ShaderProcessingError::UnknownUniformType {
                type_name: "vec5".to_string(),
                line: "vec5 color".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_sampler_type() {
        let (declarations, _) = merged(&["sampler1D ramp"], &[]);
        let err = bind_uniforms(&declarations, &ProcessingOptions::new()).unwrap_err();

        assert!(matches!(err, ShaderProcessingError::UnknownSamplerType { .. }));
    }

    #[test]
    fn test_mesh_group_is_reserved() {
        let options = ProcessingOptions::new()
            .with_bind_group_format(BIND_GROUP_MESH, BindGroupFormat::default());
        let err = bind_uniforms(&[], &options).unwrap_err();

        assert_eq!(err, ShaderProcessingError::ReservedBindGroup(BIND_GROUP_MESH));
    }
}

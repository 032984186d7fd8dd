//! Checks that rewritten sources are accepted by a real GLSL front end.
//!
//! The processor never parses GLSL itself, so these tests run its output
//! through naga's GLSL parser and validator.

use naga::front::glsl::{Frontend, Options};
use naga::valid::{Capabilities, ValidationFlags, Validator};

use redlilium_shader_interface::{
    BIND_GROUP_VIEW, ProcessingOptions, ShaderDefinition, ShaderProcessor, UniformBufferFormat,
    UniformField, UniformType, VertexSemantic,
};

const VERTEX: &str = "#version 450
attribute vec3 vertex_position;
attribute vec3 vertex_normal;
uniform mat4 matrix_model;
uniform mat4 matrix_viewProjection;
varying vec3 worldNormal;
void main() {
    worldNormal = (matrix_model * vec4(vertex_normal, 0.0)).xyz;
    gl_Position = matrix_viewProjection * matrix_model * vec4(vertex_position, 1.0);
}
";

const FRAGMENT: &str = "#version 450
varying vec3 worldNormal;
uniform vec4 material_color;
uniform float material_intensity;
out vec4 fragColor;
void main() {
    float light = max(dot(normalize(worldNormal), vec3(0.0, 1.0, 0.0)), 0.0);
    fragColor = material_color * (light * material_intensity);
}
";

fn validate(source: &str, stage: naga::ShaderStage) {
    let mut frontend = Frontend::default();
    let module = frontend
        .parse(&Options::from(stage), source)
        .unwrap_or_else(|err| panic!("{stage:?} source does not parse: {err:?}\n{source}"));

    Validator::new(ValidationFlags::all(), Capabilities::all())
        .validate(&module)
        .unwrap_or_else(|err| panic!("{stage:?} module is invalid: {err:?}\n{source}"));
}

#[test]
fn test_rewritten_pair_is_valid_glsl() {
    let definition = ShaderDefinition::new(VERTEX, FRAGMENT)
        .with_label("lit")
        .with_attribute("vertex_position", VertexSemantic::Position)
        .with_attribute("vertex_normal", VertexSemantic::Normal);
    let options = ProcessingOptions::new().with_uniform_format(
        BIND_GROUP_VIEW,
        UniformBufferFormat::new(vec![UniformField::new(
            "matrix_viewProjection",
            UniformType::Mat4,
        )])
        .unwrap(),
    );

    let processed = ShaderProcessor::new()
        .process(&definition, &options)
        .unwrap();
    assert!(!processed.failed());

    validate(&processed.vertex_source, naga::ShaderStage::Vertex);
    validate(&processed.fragment_source, naga::ShaderStage::Fragment);
}

#[test]
fn test_varying_only_pair_is_valid_glsl() {
    let vertex = "#version 450
attribute vec2 vertex_position;
varying vec2 uv0;
void main() {
    uv0 = vertex_position * 0.5 + 0.5;
    gl_Position = vec4(vertex_position, 0.0, 1.0);
}
";
    let fragment = "#version 450
varying vec2 uv0;
out vec4 fragColor;
void main() {
    fragColor = vec4(uv0, 0.0, 1.0);
}
";
    let definition = ShaderDefinition::new(vertex, fragment)
        .with_attribute("vertex_position", VertexSemantic::Position);

    let processed = ShaderProcessor::new()
        .process(&definition, &ProcessingOptions::new())
        .unwrap();

    validate(&processed.vertex_source, naga::ShaderStage::Vertex);
    validate(&processed.fragment_source, naga::ShaderStage::Fragment);
}

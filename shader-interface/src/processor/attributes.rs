//! Vertex attribute location assignment.
//!
//! Attribute locations come from the semantic table, not from declaration
//! order. When the vertex buffer delivers raw integers to an attribute the
//! shader declares as float, the attribute is redeclared with an integer type
//! under a private name and a float local with the original name is
//! initialized from it, so the shader body compiles unchanged.

use std::collections::HashMap;
use std::fmt::Write;

use crate::bindings::ShaderStage;
use crate::error::{DiagnosticKind, Diagnostics};
use crate::types::{VertexElement, VertexSemantic};

use super::config::ProcessorConfig;
use super::context::ProcessingContext;
use super::varyings::type_and_name;

/// An attribute with its resolved location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeBinding {
    /// Name the attribute is declared under in the generated code.
    pub name: String,
    /// Type the attribute is declared with in the generated code.
    pub ty: String,
    pub semantic: VertexSemantic,
    pub location: u32,
}

/// Generated attribute declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeBlock {
    pub bindings: Vec<AttributeBinding>,
    pub code: String,
}

/// Component count from the trailing digit of a type name, 1 for scalars.
fn component_count(ty: &str) -> u32 {
    ty.chars()
        .last()
        .and_then(|c| c.to_digit(10))
        .unwrap_or(1)
}

/// Integer type matching `count` components of `element`.
fn integer_type(element: &VertexElement, count: u32) -> String {
    let signed = element.data_type.is_signed_int();
    match (count, signed) {
        (1, true) => "int".to_string(),
        (1, false) => "uint".to_string(),
        (n, true) => format!("ivec{n}"),
        (n, false) => format!("uvec{n}"),
    }
}

fn float_type(count: u32) -> String {
    if count == 1 {
        "float".to_string()
    } else {
        format!("vec{count}")
    }
}

/// Bind the vertex attributes that have a semantic in `semantics`.
pub fn bind_attributes<C: ProcessingContext + ?Sized>(
    lines: &[String],
    semantics: &HashMap<String, VertexSemantic>,
    context: &C,
    config: &ProcessorConfig,
    diagnostics: &mut Diagnostics,
) -> AttributeBlock {
    let mut block = AttributeBlock::default();
    let mut used_locations: HashMap<u32, VertexSemantic> = HashMap::new();

    for line in lines {
        let Some((declared_type, declared_name)) = type_and_name(line) else {
            diagnostics.error(
                DiagnosticKind::MalformedDeclaration,
                Some(ShaderStage::Vertex),
                format!("attribute declaration needs a type and a name: '{line}'"),
            );
            continue;
        };

        let Some(&semantic) = semantics.get(declared_name) else {
            diagnostics.warning(
                DiagnosticKind::UnmappedAttribute,
                Some(ShaderStage::Vertex),
                format!("attribute '{declared_name}' has no semantic and is not bound"),
            );
            continue;
        };

        let location = semantic.location();
        let previous = used_locations.insert(location, semantic);
        if let Some(previous) = previous.filter(|&previous| previous != semantic) {
            let message = format!(
                "two vertex attributes are mapped to the same location {location} in a shader: {previous} and {semantic}"
            );
            if config.attribute_collisions_are_errors {
                diagnostics.error(
                    DiagnosticKind::AttributeLocationCollision,
                    Some(ShaderStage::Vertex),
                    message,
                );
            } else {
                diagnostics.warning(
                    DiagnosticKind::AttributeLocationCollision,
                    Some(ShaderStage::Vertex),
                    message,
                );
            }
        }

        let mut ty = declared_type.to_string();
        let mut name = declared_name.to_string();
        let mut conversion = None;

        let element = context
            .vertex_element(semantic)
            .filter(VertexElement::needs_int_attribute);
        if let Some(element) = element {
            let count = component_count(declared_type);
            let private_name = format!("{}{declared_name}", config.private_attribute_prefix);
            let local_type = float_type(count);
            conversion = Some(format!(
                "{local_type} {declared_name} = {local_type}({private_name});\n"
            ));
            ty = integer_type(&element, count);
            name = private_name;
        }

        let _ = writeln!(block.code, "layout(location={location}) in {ty} {name};");
        if let Some(conversion) = conversion {
            block.code.push_str(&conversion);
        }
        block.bindings.push(AttributeBinding {
            name,
            ty,
            semantic,
            location,
        });
    }

    block
}

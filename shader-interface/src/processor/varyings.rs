//! Varying and fragment output location assignment.
//!
//! Varyings are bound in two phases. [`bind_vertex_varyings`] assigns
//! locations in declaration order and returns the name to location map;
//! [`bind_fragment_varyings`] only reads that map, so a fragment varying always
//! lands at the location its vertex producer was given.

use std::collections::HashMap;
use std::fmt::Write;

use crate::bindings::ShaderStage;
use crate::error::{DiagnosticKind, Diagnostics};

/// Name to location map produced by the vertex stage.
pub type VaryingLocations = HashMap<String, u32>;

/// A varying with its assigned location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaryingBinding {
    pub name: String,
    pub ty: String,
    pub location: u32,
}

/// Generated declarations of one stage's varyings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VaryingBlock {
    pub bindings: Vec<VaryingBinding>,
    pub code: String,
}

/// Split a declaration body into its type and name.
///
/// Whitespace runs are collapsed first; anything after the name is ignored.
pub(crate) fn type_and_name(line: &str) -> Option<(&str, &str)> {
    let mut words = line.split_whitespace();
    Some((words.next()?, words.next()?))
}

/// Assign locations `0, 1, 2, ...` to the vertex varyings in declaration order.
///
/// Malformed and repeated declarations are reported and take no location.
pub fn bind_vertex_varyings(
    lines: &[String],
    diagnostics: &mut Diagnostics,
) -> (VaryingBlock, VaryingLocations) {
    let mut block = VaryingBlock::default();
    let mut locations = VaryingLocations::new();

    for line in lines {
        let Some((ty, name)) = type_and_name(line) else {
            diagnostics.error(
                DiagnosticKind::MalformedDeclaration,
                Some(ShaderStage::Vertex),
                format!("varying declaration needs a type and a name: '{line}'"),
            );
            continue;
        };

        if let Some(&location) = locations.get(name) {
            diagnostics.warning(
                DiagnosticKind::DuplicateVarying,
                Some(ShaderStage::Vertex),
                format!("varying '{name}' is declared again and keeps location {location}"),
            );
            continue;
        }

        let location = locations.len() as u32;
        locations.insert(name.to_string(), location);

        let _ = writeln!(block.code, "layout(location = {location}) out {ty} {name};");
        block.bindings.push(VaryingBinding {
            name: name.to_string(),
            ty: ty.to_string(),
            location,
        });
    }

    (block, locations)
}

/// Bind the fragment varyings to the locations chosen by the vertex stage.
///
/// A varying the vertex stage does not produce is an error and is left out of
/// the generated code.
pub fn bind_fragment_varyings(
    locations: &VaryingLocations,
    lines: &[String],
    diagnostics: &mut Diagnostics,
) -> VaryingBlock {
    let mut block = VaryingBlock::default();

    for line in lines {
        let Some((ty, name)) = type_and_name(line) else {
            diagnostics.error(
                DiagnosticKind::MalformedDeclaration,
                Some(ShaderStage::Fragment),
                format!("varying declaration needs a type and a name: '{line}'"),
            );
            continue;
        };

        let Some(&location) = locations.get(name) else {
            diagnostics.error(
                DiagnosticKind::MissingVarying,
                Some(ShaderStage::Fragment),
                format!(
                    "fragment shader requires varying '{name}' but vertex shader does not generate it"
                ),
            );
            continue;
        };

        let _ = writeln!(block.code, "layout(location = {location}) in {ty} {name};");
        block.bindings.push(VaryingBinding {
            name: name.to_string(),
            ty: ty.to_string(),
            location,
        });
    }

    block
}

/// Assign locations to fragment color outputs in declaration order.
pub fn bind_outputs(lines: &[String]) -> String {
    let mut code = String::new();
    for (location, line) in lines.iter().enumerate() {
        let _ = writeln!(code, "layout(location = {location}) out {line};");
    }
    code
}

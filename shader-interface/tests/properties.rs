//! Property tests for the extractor, the uniform parser and varying binding.
//!
//! ```bash
//! cargo test -p redlilium-shader-interface --test properties
//! ```

use proptest::prelude::*;

use redlilium_shader_interface::Diagnostics;
use redlilium_shader_interface::processor::{
    MARKER, Precision, UniformDeclaration, bind_fragment_varyings, bind_vertex_varyings, extract,
};

const KEYWORDS: [&str; 4] = ["attribute", "varying", "out", "uniform"];
const TYPES: [&str; 9] = [
    "float", "vec2", "vec3", "vec4", "mat4", "ivec2", "uint", "sampler2D", "usampler2DArray",
];

/// Identifiers that can never collide with a declaration keyword.
fn identifier() -> impl Strategy<Value = String> {
    "v_[a-zA-Z0-9_]{0,10}"
}

fn glsl_type() -> impl Strategy<Value = &'static str> {
    prop::sample::select(TYPES.to_vec())
}

/// Unique names in generation order, paired with a shuffled copy.
fn names_and_shuffled() -> impl Strategy<Value = (Vec<String>, Vec<String>)> {
    prop::collection::btree_set(identifier(), 1..10)
        .prop_map(|names| names.into_iter().collect::<Vec<_>>())
        .prop_flat_map(|names| (Just(names.clone()), Just(names).prop_shuffle()))
}

proptest! {
    #[test]
    fn test_parse_recovers_every_part(
        precision in prop::option::of(prop::sample::select(vec!["lowp", "mediump", "highp"])),
        ty in glsl_type(),
        name in identifier(),
        array_size in prop::option::of(1..=4096u32),
    ) {
        let mut line = String::new();
        if let Some(precision) = precision {
            line.push_str(precision);
            line.push(' ');
        }
        line.push_str(ty);
        line.push(' ');
        line.push_str(&name);
        if let Some(size) = array_size {
            line.push_str(&format!("[{size}]"));
        }

        let mut diagnostics = Diagnostics::new("parse");
        let declaration = UniformDeclaration::parse(&line, None, &mut diagnostics);

        prop_assert!(diagnostics.is_empty());
        let declaration = declaration.unwrap();
        prop_assert_eq!(declaration.line.as_str(), line.as_str());
        prop_assert_eq!(declaration.precision, precision.and_then(Precision::from_glsl));
        prop_assert_eq!(declaration.base_type.as_str(), ty);
        prop_assert_eq!(declaration.name.as_str(), name.as_str());
        // No brackets means a non-array uniform.
        prop_assert_eq!(declaration.array_size, array_size.unwrap_or(0));
        prop_assert_eq!(declaration.is_sampler, ty.contains("sampler"));
        prop_assert_eq!(declaration.is_unsigned_int, ty.starts_with("usampler"));
    }

    #[test]
    fn test_varying_locations_are_dense_and_shared(
        (names, shuffled) in names_and_shuffled(),
    ) {
        let mut diagnostics = Diagnostics::new("varyings");
        let vertex_lines: Vec<String> = names.iter().map(|name| format!("vec4 {name}")).collect();
        let (vertex, locations) = bind_vertex_varyings(&vertex_lines, &mut diagnostics);

        let assigned: Vec<u32> = vertex.bindings.iter().map(|b| b.location).collect();
        prop_assert_eq!(assigned, (0..names.len() as u32).collect::<Vec<_>>());

        let fragment_lines: Vec<String> =
            shuffled.iter().map(|name| format!("vec4 {name}")).collect();
        let fragment = bind_fragment_varyings(&locations, &fragment_lines, &mut diagnostics);

        prop_assert!(diagnostics.is_empty());
        prop_assert_eq!(fragment.bindings.len(), names.len());
        for binding in &fragment.bindings {
            prop_assert_eq!(binding.location, locations[&binding.name]);
        }
    }

    #[test]
    fn test_extract_compose_round_trip(
        declarations in prop::collection::vec((0..4usize, glsl_type(), identifier()), 1..12),
        body_lines in 0..4usize,
    ) {
        let mut tail = String::from("// body\nvoid main() {\n");
        for i in 0..body_lines {
            tail.push_str(&format!("    float t{i} = 1.0;\n"));
        }
        tail.push_str("}\n");

        let mut source = String::from("#version 450\n");
        for (keyword, ty, name) in &declarations {
            source.push_str(&format!("{} {ty} {name};\n", KEYWORDS[*keyword]));
        }
        source.push_str(&tail);

        let original = extract(&source);
        prop_assert_eq!(original.source.matches(MARKER).count(), 1);
        prop_assert_eq!(
            original.attributes.len()
                + original.varyings.len()
                + original.outputs.len()
                + original.uniforms.len(),
            declarations.len()
        );

        // Put the declarations back at the marker and extract again.
        let mut block = String::new();
        for (keyword, bodies) in [
            ("attribute", &original.attributes),
            ("varying", &original.varyings),
            ("out", &original.outputs),
            ("uniform", &original.uniforms),
        ] {
            for body in bodies {
                block.push_str(&format!("{keyword} {body};\n"));
            }
        }
        let composed = original.source.replacen(MARKER, &block, 1);
        let again = extract(&composed);

        prop_assert_eq!(&again.attributes, &original.attributes);
        prop_assert_eq!(&again.varyings, &original.varyings);
        prop_assert_eq!(&again.outputs, &original.outputs);
        prop_assert_eq!(&again.uniforms, &original.uniforms);
        prop_assert!(again.source.ends_with(&tail));
        prop_assert!(extract(&again.source).is_empty());
    }
}

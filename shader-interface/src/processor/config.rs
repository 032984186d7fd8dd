//! Processor configuration.

/// Default prefix of a synthesized integer attribute name.
pub const DEFAULT_PRIVATE_ATTRIBUTE_PREFIX: &str = "_private_";

/// Options controlling how a [`ShaderProcessor`](super::ShaderProcessor) reports
/// and names things.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorConfig {
    /// Report two semantics sharing an attribute location as an error instead
    /// of a warning.
    pub attribute_collisions_are_errors: bool,
    /// Prefix applied to an attribute name when it is redeclared with an
    /// integer type.
    pub private_attribute_prefix: String,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            attribute_collisions_are_errors: false,
            private_attribute_prefix: DEFAULT_PRIVATE_ATTRIBUTE_PREFIX.to_string(),
        }
    }
}

impl ProcessorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Escalate attribute location collisions to errors.
    pub fn with_strict_attribute_locations(mut self, strict: bool) -> Self {
        self.attribute_collisions_are_errors = strict;
        self
    }

    pub fn with_private_attribute_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.private_attribute_prefix = prefix.into();
        self
    }
}

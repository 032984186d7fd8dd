//! Error and diagnostic types for shader processing.
//!
//! Two channels exist:
//!
//! - [`ShaderProcessingError`] aborts processing. It is only produced when a
//!   fixed lookup table has no entry for a declared type, or when an internal
//!   invariant of the processor is broken.
//! - [`Diagnostics`] collects everything else. Malformed declarations and
//!   cross-stage mismatches are recorded and processing continues, so a single
//!   run reports every problem in the shader. An error diagnostic marks the
//!   shader as failed; the caller must not use a failed shader.

use thiserror::Error;

use crate::bindings::ShaderStage;

/// Errors that abort shader processing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShaderProcessingError {
    #[error("uniform type `{type_name}` is not recognized on line [{line}]")]
    UnknownUniformType { type_name: String, line: String },
    #[error("sampler type `{type_name}` has no texture dimension on line [{line}]")]
    UnknownSamplerType { type_name: String, line: String },
    #[error("{0} source has no declaration to replace with generated bindings")]
    MissingRewriteMarker(ShaderStage),
    #[error("bind group {0} is reserved for mesh bindings")]
    ReservedBindGroup(u32),
    #[error("uniform buffer does not fit into 4 GiB, overflowing at field `{0}`")]
    UniformBufferOverflow(String),
}

pub type ProcessingResult<T> = Result<T, ShaderProcessingError>;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Reported, but the shader stays usable.
    Warning,
    /// The shader is marked as failed.
    Error,
}

/// What a diagnostic is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Several uniforms declared on one line, separated by commas.
    MultipleUniformsPerLine,
    /// Uniform array size that is not a positive integer literal.
    InvalidArraySize,
    /// Declaration missing its type or name.
    MalformedDeclaration,
    /// Same uniform name declared with different types in the two stages.
    UniformTypeMismatch,
    /// Vertex stage declares the same varying twice; the first one is kept.
    DuplicateVarying,
    /// Fragment stage consumes a varying the vertex stage does not produce.
    MissingVarying,
    /// Two semantics resolved to the same attribute location.
    AttributeLocationCollision,
    /// Vertex attribute without a semantic; it is left out of the output.
    UnmappedAttribute,
    /// `out` declaration in the vertex stage; only varyings are bound there.
    IgnoredVertexOutput,
}

/// A single message produced while processing a shader pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    /// Stage the offending declaration came from, when it belongs to one.
    pub stage: Option<ShaderStage>,
    pub message: String,
}

/// Accumulates diagnostics for one shader pair.
///
/// Every pushed diagnostic is also forwarded to the `log` facade.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    label: String,
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty collector. `label` prefixes log output.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            entries: Vec::new(),
        }
    }

    /// Record an error; the shader becomes failed.
    pub fn error(
        &mut self,
        kind: DiagnosticKind,
        stage: Option<ShaderStage>,
        message: impl Into<String>,
    ) {
        self.push(Severity::Error, kind, stage, message.into());
    }

    /// Record a warning.
    pub fn warning(
        &mut self,
        kind: DiagnosticKind,
        stage: Option<ShaderStage>,
        message: impl Into<String>,
    ) {
        self.push(Severity::Warning, kind, stage, message.into());
    }

    fn push(
        &mut self,
        severity: Severity,
        kind: DiagnosticKind,
        stage: Option<ShaderStage>,
        message: String,
    ) {
        match severity {
            Severity::Warning => log::warn!("[{}] {message}", self.label),
            Severity::Error => log::error!("[{}] {message}", self.label),
        }
        self.entries.push(Diagnostic {
            severity,
            kind,
            stage,
            message,
        });
    }

    /// True if any error was recorded.
    pub fn failed(&self) -> bool {
        self.entries.iter().any(|d| d.severity == Severity::Error)
    }

    /// True if a diagnostic of the given kind was recorded.
    pub fn contains(&self, kind: DiagnosticKind) -> bool {
        self.entries.iter().any(|d| d.kind == kind)
    }

    /// All diagnostics of the given kind, in the order they were recorded.
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ShaderProcessingError::UnknownUniformType {
            type_name: "vec5".to_string(),
            line: "vec5 color".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "uniform type `vec5` is not recognized on line [vec5 color]"
        );

        let err = ShaderProcessingError::MissingRewriteMarker(ShaderStage::Fragment);
        assert_eq!(
            err.to_string(),
            "fragment source has no declaration to replace with generated bindings"
        );
    }

    #[test]
    fn test_warnings_do_not_fail() {
        let mut diagnostics = Diagnostics::new("test");
        diagnostics.warning(
            DiagnosticKind::AttributeLocationCollision,
            Some(ShaderStage::Vertex),
            "collision",
        );
        assert!(!diagnostics.failed());
        assert_eq!(diagnostics.len(), 1);

        diagnostics.error(DiagnosticKind::InvalidArraySize, None, "bad size");
        assert!(diagnostics.failed());
        assert!(diagnostics.contains(DiagnosticKind::InvalidArraySize));
        assert_eq!(diagnostics.of_kind(DiagnosticKind::InvalidArraySize).count(), 1);
    }
}

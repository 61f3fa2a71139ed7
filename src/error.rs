//! Error types for flag resolution and toolchain detection.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Result type alias for compiler adapter operations.
pub type CompilerResult<T> = Result<T, CompilerError>;

/// Error raised by the compiler adapters.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum CompilerError {
    /// A build type or optimization key outside the closed vocabulary.
    /// Indicates a bug or bad config upstream, never a runtime condition.
    #[error("unknown {kind} `{key}` (expected one of: {expected})")]
    #[diagnostic(code(harbour::compiler::configuration))]
    Configuration {
        kind: &'static str,
        key: String,
        expected: String,
    },

    /// A compiler or its companion could not be run, or printed no
    /// usable version.
    #[error("failed to detect toolchain via `{program}`: {reason}")]
    #[diagnostic(
        code(harbour::compiler::detection),
        help("Check that the compiler is installed and its environment is initialised")
    )]
    ToolchainDetection { program: String, reason: String },
}

impl CompilerError {
    /// Build a configuration error for `key`, listing the accepted values.
    pub fn configuration(kind: &'static str, key: impl Into<String>, expected: &[&str]) -> Self {
        CompilerError::Configuration {
            kind,
            key: key.into(),
            expected: expected.join(", "),
        }
    }

    /// Build a detection error for `program`.
    pub fn detection(program: impl std::fmt::Display, reason: impl Into<String>) -> Self {
        CompilerError::ToolchainDetection {
            program: program.to_string(),
            reason: reason.into(),
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            CompilerError::Configuration {
                kind,
                key,
                expected,
            } => Diagnostic::error(format!("unknown {} `{}`", kind, key))
                .with_context(format!("valid values: {}", expected))
                .with_suggestion(suggestions::CONFIG_KEYS),

            CompilerError::ToolchainDetection { program, reason } => {
                let diag = Diagnostic::error(format!("failed to detect toolchain via `{}`", program))
                    .with_location(program)
                    .with_context(reason.clone());

                if program.to_ascii_lowercase().contains("cl.exe") || program == "cl" {
                    diag.with_suggestion(suggestions::NO_COMPANION)
                } else {
                    diag.with_suggestion(suggestions::NO_COMPILER)
                        .with_suggestion(suggestions::BANNER)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_message() {
        let err = CompilerError::configuration("build type", "fast", &["debug", "release"]);
        assert_eq!(
            err.to_string(),
            "unknown build type `fast` (expected one of: debug, release)"
        );
    }

    #[test]
    fn test_detection_diagnostic_suggests_companion() {
        let err = CompilerError::detection("cl.exe", "program not found");
        let output = err.to_diagnostic().format(false);
        assert!(output.contains("failed to detect toolchain via `cl.exe`"));
        assert!(output.contains("program not found"));
        assert!(output.contains(suggestions::NO_COMPANION));
    }

    #[test]
    fn test_detection_diagnostic_suggests_compiler() {
        let err = CompilerError::detection("/usr/bin/gcc", "not an Intel compiler");
        let output = err.to_diagnostic().format(false);
        assert!(output.contains(suggestions::NO_COMPILER));
    }
}

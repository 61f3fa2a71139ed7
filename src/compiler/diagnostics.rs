//! Promotion of option-misuse diagnostics to hard errors.
//!
//! Intel compilers warn and carry on when handed a malformed or unknown
//! option. A "does this flag compile" probe would then report the flag as
//! supported. Every probe therefore gets these diagnostics escalated to
//! errors before it is handed to the underlying [`CompileProbe`].
//!
//! [`CompileProbe`]: super::CompileProbe

use super::{CompileMode, CompilerFamily, ProbeOptions};

/// A diagnostic the Intel compilers emit for command-line misuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromotedDiagnostic {
    /// Diagnostic number as printed by the compiler
    pub code: u32,
    /// What the diagnostic reports
    pub reason: &'static str,
    /// Only emitted by the POSIX-style front end
    pub gnu_only: bool,
}

/// Diagnostics escalated to errors during probes.
pub const PROMOTED_DIAGNOSTICS: &[PromotedDiagnostic] = &[
    PromotedDiagnostic {
        code: 10006,
        reason: "ignoring unknown option",
        gnu_only: false,
    },
    PromotedDiagnostic {
        code: 10148,
        reason: "option not supported",
        gnu_only: false,
    },
    PromotedDiagnostic {
        code: 10155,
        reason: "ignoring option; argument required",
        gnu_only: false,
    },
    PromotedDiagnostic {
        code: 10156,
        reason: "ignoring option; no argument allowed",
        gnu_only: false,
    },
    PromotedDiagnostic {
        code: 10157,
        reason: "ignoring option; argument is of wrong type",
        gnu_only: false,
    },
    // Hit by e.g. `-foo-bar=baz` when `-foo=bar` is valid but `-foo-bar` is not
    PromotedDiagnostic {
        code: 10158,
        reason: "ignoring option; argument must be separate",
        gnu_only: false,
    },
    PromotedDiagnostic {
        code: 1292,
        reason: "unknown attribute",
        gnu_only: true,
    },
];

/// Appends diagnostic-promotion flags in one family's syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticPromotionPolicy {
    family: CompilerFamily,
}

impl DiagnosticPromotionPolicy {
    /// Create the policy for a compiler family.
    pub const fn new(family: CompilerFamily) -> Self {
        DiagnosticPromotionPolicy { family }
    }

    /// Diagnostics this family promotes, in flag order.
    pub fn codes(&self) -> impl Iterator<Item = &'static PromotedDiagnostic> + '_ {
        PROMOTED_DIAGNOSTICS
            .iter()
            .filter(move |d| !d.gnu_only || self.family == CompilerFamily::GnuLike)
    }

    /// The promotion flags alone.
    pub fn flags(&self) -> Vec<String> {
        let mut flags = Vec::new();
        for diag in self.codes() {
            match self.family {
                CompilerFamily::GnuLike => {
                    flags.push("-diag-error".to_string());
                    flags.push(diag.code.to_string());
                }
                CompilerFamily::VisualStudioLike => {
                    flags.push(format!("/Qdiag-error:{}", diag.code));
                }
            }
        }
        flags
    }

    /// Whether probes in `mode` get promoted.
    ///
    /// Link-stage diagnostics use a different code space on Windows, so
    /// link probes there are left alone.
    pub fn applies_to(&self, mode: CompileMode) -> bool {
        match self.family {
            CompilerFamily::GnuLike => true,
            CompilerFamily::VisualStudioLike => mode != CompileMode::Link,
        }
    }

    /// Caller arguments (absent means empty) followed by the promotion flags.
    pub fn promote(&self, extra_args: Option<&[String]>) -> Vec<String> {
        let mut args = extra_args.map(<[String]>::to_vec).unwrap_or_default();
        args.extend(self.flags());
        args
    }

    /// Probe options with promotion applied when the mode calls for it.
    pub fn augment(&self, options: &ProbeOptions) -> ProbeOptions {
        if !self.applies_to(options.mode) {
            return options.clone();
        }

        ProbeOptions {
            extra_args: self.promote(Some(&options.extra_args)),
            mode: options.mode,
        }
    }
}

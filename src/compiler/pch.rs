//! Precompiled header planning for the POSIX-style front end.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::Language;

/// Extension appended to a header's basename to name its precompiled form.
pub const PCH_SUFFIX: &str = "pchi";

/// A header to precompile and where its cache lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PchRequest {
    /// Header as passed on the command line
    pub header: PathBuf,
    /// Directory holding precompiled headers
    pub pch_dir: PathBuf,
    /// Language the header is written in
    pub language: Language,
}

impl PchRequest {
    /// Create a new request.
    pub fn new(header: impl Into<PathBuf>, pch_dir: impl Into<PathBuf>, language: Language) -> Self {
        PchRequest {
            header: header.into(),
            pch_dir: pch_dir.into(),
            language,
        }
    }
}

/// The artifact a [`PchRequest`] produces and the flags that reuse it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PchPlan {
    /// File name of the generated precompiled header
    pub artifact: String,
    /// Flags that make a translation unit use the precompiled header
    pub use_args: Vec<String>,
}

/// Derives precompiled-header names and use flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PchPlanner {
    suffix: &'static str,
}

impl PchPlanner {
    /// Planner producing `<basename>.<suffix>` artifacts.
    pub const fn new(suffix: &'static str) -> Self {
        PchPlanner { suffix }
    }

    /// Artifact suffix, without the leading dot.
    pub fn suffix(&self) -> &'static str {
        self.suffix
    }

    /// Artifact name for `header`; depends only on its basename.
    pub fn pch_name(&self, header: &Path) -> String {
        let base = header
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| header.display().to_string());
        format!("{}.{}", base, self.suffix)
    }

    /// Flags to include `header` through its precompiled form.
    ///
    /// The header is compiled in its own language, so the language is
    /// switched for the `-include` and back to detection by extension
    /// afterwards for the translation unit itself.
    pub fn use_args(&self, pch_dir: &Path, header: &Path, language: Language) -> Vec<String> {
        vec![
            "-pch".to_string(),
            "-pch_dir".to_string(),
            pch_dir.display().to_string(),
            "-x".to_string(),
            language.header_marker().to_string(),
            "-include".to_string(),
            header.display().to_string(),
            "-x".to_string(),
            "none".to_string(),
        ]
    }

    /// Plan the artifact and flags for a request.
    pub fn plan(&self, request: &PchRequest) -> PchPlan {
        PchPlan {
            artifact: self.pch_name(&request.header),
            use_args: self.use_args(&request.pch_dir, &request.header, request.language),
        }
    }
}

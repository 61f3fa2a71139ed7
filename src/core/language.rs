//! Source languages understood by the compiler adapters.

use serde::{Deserialize, Serialize};

/// Source language of a translation unit or header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    /// C language (default)
    #[default]
    #[serde(rename = "c")]
    C,
    /// C++ language
    #[serde(rename = "c++", alias = "cpp", alias = "cxx")]
    Cxx,
}

impl Language {
    /// Get the language name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Cxx => "c++",
        }
    }

    /// Value for `-x` when compiling a header of this language.
    pub fn header_marker(&self) -> &'static str {
        match self {
            Language::C => "c-header",
            Language::Cxx => "c++-header",
        }
    }

    /// File extension used for probe sources.
    pub fn source_extension(&self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Cxx => "cpp",
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "c" => Ok(Language::C),
            "c++" | "cpp" | "cxx" => Ok(Language::Cxx),
            _ => Err(format!("invalid language '{}', valid values: c, c++", s)),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

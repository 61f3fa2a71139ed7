//! Toolchain configuration files.
//!
//! Two locations are read:
//! - Global: `~/.harbour/toolchain.toml` - User-wide defaults
//! - Project: `.harbour/toolchain.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config, field by field.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::compiler::{BuildType, OptimizationLevel};
use crate::core::Language;

/// Toolchain configuration for the Intel compiler adapters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    /// Toolchain settings
    pub toolchain: ToolchainSettings,
}

/// Compiler selection and default build configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainSettings {
    /// Path to the compiler (e.g., /opt/intel/bin/icc or icl.exe)
    pub cc: Option<PathBuf>,

    /// Path to the companion MSVC compiler used for toolset detection
    pub cl: Option<PathBuf>,

    /// Compiler version override; skips version probing when set
    pub version: Option<String>,

    /// Source language probes and precompiled headers default to
    pub language: Option<Language>,

    /// Default build type
    pub buildtype: Option<BuildType>,

    /// Default optimization level
    pub optimization: Option<OptimizationLevel>,
}

impl ToolchainConfig {
    /// Load toolchain configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read toolchain config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse toolchain config: {}", path.display()))
    }

    /// Load toolchain configuration with fallback to defaults if the file
    /// doesn't exist or is malformed.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!(
                    "Failed to load toolchain config from {}: {:#}",
                    path.display(),
                    e
                );
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Check if any toolchain settings are configured.
    pub fn has_overrides(&self) -> bool {
        let tc = &self.toolchain;
        tc.cc.is_some()
            || tc.cl.is_some()
            || tc.version.is_some()
            || tc.language.is_some()
            || tc.buildtype.is_some()
            || tc.optimization.is_some()
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: ToolchainConfig) {
        let other = other.toolchain;
        let tc = &mut self.toolchain;

        if other.cc.is_some() {
            tc.cc = other.cc;
        }
        if other.cl.is_some() {
            tc.cl = other.cl;
        }
        if other.version.is_some() {
            tc.version = other.version;
        }
        if other.language.is_some() {
            tc.language = other.language;
        }
        if other.buildtype.is_some() {
            tc.buildtype = other.buildtype;
        }
        if other.optimization.is_some() {
            tc.optimization = other.optimization;
        }
    }
}

/// Load merged toolchain configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.harbour/toolchain.toml)
/// 2. Global config (~/.harbour/toolchain.toml)
/// 3. Defaults
pub fn load_toolchain_config(global_path: Option<&Path>, project_path: &Path) -> ToolchainConfig {
    let mut config = ToolchainConfig::default();

    if let Some(global) = global_path {
        config.merge(ToolchainConfig::load_or_default(global));
    }

    config.merge(ToolchainConfig::load_or_default(project_path));

    config
}

/// Get the global harbour config directory (~/.harbour).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".harbour"))
}

/// Get the global toolchain config path (~/.harbour/toolchain.toml).
pub fn global_toolchain_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("toolchain.toml"))
}

/// Get the project toolchain config path (.harbour/toolchain.toml).
pub fn project_toolchain_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".harbour").join("toolchain.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_toolchain_config_default() {
        let config = ToolchainConfig::default();
        assert!(config.toolchain.cc.is_none());
        assert!(config.toolchain.cl.is_none());
        assert!(config.toolchain.version.is_none());
        assert!(config.toolchain.buildtype.is_none());
        assert!(!config.has_overrides());
    }

    #[test]
    fn test_toolchain_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("toolchain.toml");

        std::fs::write(
            &config_path,
            r#"
[toolchain]
cc = "/opt/intel/bin/icc"
cl = "C:/VS/bin/cl.exe"
version = "19.0.1"
language = "c++"
buildtype = "debugoptimized"
optimization = "s"
"#,
        )
        .unwrap();

        let config = ToolchainConfig::load(&config_path).unwrap();
        let tc = &config.toolchain;
        assert_eq!(tc.cc, Some(PathBuf::from("/opt/intel/bin/icc")));
        assert_eq!(tc.cl, Some(PathBuf::from("C:/VS/bin/cl.exe")));
        assert_eq!(tc.version.as_deref(), Some("19.0.1"));
        assert_eq!(tc.language, Some(Language::Cxx));
        assert_eq!(tc.buildtype, Some(BuildType::DebugOptimized));
        assert_eq!(tc.optimization, Some(OptimizationLevel::Os));
        assert!(config.has_overrides());
    }

    #[test]
    fn test_toolchain_config_rejects_unknown_buildtype() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("toolchain.toml");
        std::fs::write(&config_path, "[toolchain]\nbuildtype = \"fast\"\n").unwrap();

        assert!(ToolchainConfig::load(&config_path).is_err());
        // The lenient loader falls back to defaults
        assert!(!ToolchainConfig::load_or_default(&config_path).has_overrides());
    }

    #[test]
    fn test_toolchain_config_merge() {
        let mut base = ToolchainConfig::default();
        base.toolchain.cc = Some(PathBuf::from("/usr/bin/icc"));
        base.toolchain.buildtype = Some(BuildType::Release);

        let mut override_cfg = ToolchainConfig::default();
        override_cfg.toolchain.cc = Some(PathBuf::from("/opt/intel/bin/icc"));

        base.merge(override_cfg);

        assert_eq!(base.toolchain.cc, Some(PathBuf::from("/opt/intel/bin/icc")));
        assert_eq!(base.toolchain.buildtype, Some(BuildType::Release));
    }

    #[test]
    fn test_load_toolchain_config_precedence() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");

        std::fs::write(
            &global_path,
            r#"
[toolchain]
cc = "/usr/bin/icc"
buildtype = "debug"
optimization = "0"
"#,
        )
        .unwrap();

        std::fs::write(
            &project_path,
            r#"
[toolchain]
optimization = "3"
"#,
        )
        .unwrap();

        let config = load_toolchain_config(Some(&global_path), &project_path);

        assert_eq!(config.toolchain.cc, Some(PathBuf::from("/usr/bin/icc")));
        assert_eq!(config.toolchain.buildtype, Some(BuildType::Debug));
        assert_eq!(config.toolchain.optimization, Some(OptimizationLevel::O3));
    }

    #[test]
    fn test_load_toolchain_config_missing_files() {
        let tmp = TempDir::new().unwrap();
        let config = load_toolchain_config(None, &tmp.path().join("missing.toml"));
        assert!(!config.has_overrides());
    }

    #[test]
    fn test_project_toolchain_config_path() {
        let path = project_toolchain_config_path(Path::new("/work/app"));
        assert_eq!(path, PathBuf::from("/work/app/.harbour/toolchain.toml"));
    }
}

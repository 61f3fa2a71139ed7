//! Compile probes backed by a real compiler run.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};

use crate::compiler::{CompileProbe, CompilerFamily, ProbeOptions, ProbeResult};
use crate::core::Language;
use crate::util::hash::Fingerprint;
use crate::util::process::ProcessRunner;

/// Compiles snippets in a scratch directory and reports the exit status.
///
/// Answers are cached in memory for the lifetime of the probe, keyed by
/// compiler, language, mode, arguments and code.
pub struct ProcessProbe {
    exe: PathBuf,
    family: CompilerFamily,
    language: Language,
    runner: Arc<dyn ProcessRunner>,
    cache: Mutex<HashMap<String, bool>>,
}

impl ProcessProbe {
    pub fn new(
        exe: impl Into<PathBuf>,
        family: CompilerFamily,
        language: Language,
        runner: Arc<dyn ProcessRunner>,
    ) -> Self {
        ProcessProbe {
            exe: exe.into(),
            family,
            language,
            runner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn exe(&self) -> &Path {
        &self.exe
    }

    fn cache_key(&self, code: &str, options: &ProbeOptions) -> String {
        let exe = self.exe.display().to_string();
        let mut fp = Fingerprint::new();
        fp.update_str(&exe)
            .update_str(self.language.as_str())
            .update_str(options.mode.as_str())
            .update_strs(options.extra_args.iter().map(String::as_str))
            .update_str(code);
        fp.finish()
    }

    fn run(&self, code: &str, options: &ProbeOptions) -> Result<bool> {
        let dir = tempfile::tempdir().context("failed to create probe directory")?;
        let source = dir
            .path()
            .join(format!("testfile.{}", self.language.source_extension()));
        fs::write(&source, code)
            .with_context(|| format!("failed to write {}", source.display()))?;

        let mut args = self.family.probe_args(options.mode, dir.path());
        args.extend(options.extra_args.iter().cloned());
        args.push(source.display().to_string());

        let output = self.runner.run(&self.exe, &args)?;
        if !output.success() {
            tracing::debug!(
                "probe failed with {:?}: {}",
                output.status,
                output.stderr.trim()
            );
        }
        Ok(output.success())
    }
}

impl CompileProbe for ProcessProbe {
    fn compiles(&self, code: &str, options: &ProbeOptions) -> Result<ProbeResult> {
        let key = self.cache_key(code, options);

        if let Some(&success) = self
            .cache
            .lock()
            .map_err(|_| anyhow::anyhow!("probe cache poisoned"))?
            .get(&key)
        {
            tracing::debug!("using cached probe result for {}", &key[..12]);
            return Ok(ProbeResult {
                success,
                cached: true,
            });
        }

        let success = self.run(code, options)?;
        self.cache
            .lock()
            .map_err(|_| anyhow::anyhow!("probe cache poisoned"))?
            .insert(key, success);

        Ok(ProbeResult {
            success,
            cached: false,
        })
    }
}

impl std::fmt::Debug for ProcessProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessProbe")
            .field("exe", &self.exe)
            .field("family", &self.family)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

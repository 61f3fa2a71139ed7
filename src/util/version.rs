//! Version string search and comparison.
//!
//! Compilers print their version inside free-form banners. These helpers
//! pull a dotted version out of such text and compare it against semver
//! requirements without insisting on strict three-component semver.

use std::sync::LazyLock;

use regex::Regex;
use semver::{Prerelease, Version, VersionReq};

/// One or two leading digits followed by one or more `.N` groups and an
/// optional `-suffix`. The leading group must not follow a digit or period.
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\d.])(\d{1,2}(?:\.\d+)+(?:-[a-zA-Z0-9]+)?)").unwrap()
});

/// Date-like versions such as `2020.01.100` or `2020.01`.
static FALLBACK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,4}\.\d{1,4}\.?\d{0,4}").unwrap());

/// Find the first version number in a compiler banner.
///
/// Returns `None` when the text contains nothing that looks like a version.
pub fn search_version(text: &str) -> Option<String> {
    if let Some(caps) = VERSION_RE.captures(text) {
        return Some(caps[1].to_string());
    }

    FALLBACK_RE.find(text).map(|m| m.as_str().to_string())
}

/// Parse a version string, allowing for incomplete or overlong versions.
///
/// `19` becomes `19.0.0`, `19.0.1.144` becomes `19.0.1`. A `-suffix` on
/// any component is dropped, so `15.0-beta` becomes `15.0.0`.
pub fn parse_version_lenient(s: &str) -> Option<Version> {
    let s = s.trim();

    // Try exact parse first
    if let Ok(v) = Version::parse(s) {
        return Some(v);
    }

    let mut components = s
        .split('.')
        .map(|part| part.split('-').next().unwrap_or(part).parse::<u64>());
    let major = components.next()?.ok()?;
    let minor = components.next().transpose().ok()?.unwrap_or(0);
    let patch = components.next().transpose().ok()?.unwrap_or(0);

    Some(Version::new(major, minor, patch))
}

/// Check a version string against a requirement such as `>=15.0.0`.
///
/// Only the numeric components are compared; a pre-release tag such as
/// `-beta1` does not make `16.0.4-beta1` older than `15.0.0`. An
/// unparseable version or requirement never satisfies the comparison.
pub fn version_compare(version: &str, requirement: &str) -> bool {
    let Some(mut parsed) = parse_version_lenient(version) else {
        tracing::debug!("cannot compare unparseable version `{}`", version);
        return false;
    };

    parsed.pre = Prerelease::EMPTY;

    match VersionReq::parse(requirement) {
        Ok(req) => req.matches(&parsed),
        Err(e) => {
            tracing::debug!("invalid version requirement `{}`: {}", requirement, e);
            false
        }
    }
}

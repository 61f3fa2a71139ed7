//! CLI integration tests for harbour-intel.
//!
//! No Intel compiler is installed on test machines, so these tests assume
//! a compiler with `--compiler-id` and `--compiler-version`, or point
//! `--cc` at something that is not one.

use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the harbour-intel binary command, isolated from the user's config.
fn harbour_intel(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("harbour-intel").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env_remove("HARBOUR_INTEL_CC");
    cmd
}

/// Create a temporary directory for test projects.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

fn icc_args() -> [&'static str; 4] {
    ["--compiler-id", "intel", "--compiler-version", "19.0.1"]
}

fn icl_args() -> [&'static str; 4] {
    ["--compiler-id", "intel-cl", "--compiler-version", "19.0.1.144"]
}

// ============================================================================
// harbour-intel flags
// ============================================================================

#[test]
fn test_flags_posix() {
    let tmp = temp_dir();

    harbour_intel(&tmp)
        .args(icc_args())
        .args(["flags", "--buildtype", "debug", "--optimization", "2"])
        .assert()
        .success()
        .stdout("-g -traceback -O2\n");
}

#[test]
fn test_flags_windows() {
    let tmp = temp_dir();

    harbour_intel(&tmp)
        .args(icl_args())
        .args(["flags", "--buildtype", "debugoptimized", "--optimization", "g"])
        .assert()
        .success()
        .stdout("/Zi /traceback /O0\n");
}

#[test]
fn test_flags_openmp_follows_version() {
    let tmp = temp_dir();

    harbour_intel(&tmp)
        .args(["--compiler-id", "intel", "--compiler-version", "14.0.3"])
        .args(["flags", "--buildtype", "release", "--optimization", "3", "--openmp"])
        .assert()
        .success()
        .stdout("-O3 -openmp\n");

    harbour_intel(&tmp)
        .args(["--compiler-id", "intel", "--compiler-version", "15.0.6"])
        .args(["flags", "--buildtype", "release", "--optimization", "3", "--openmp"])
        .assert()
        .success()
        .stdout("-O3 -qopenmp\n");
}

#[test]
fn test_flags_pgo() {
    let tmp = temp_dir();

    harbour_intel(&tmp)
        .args(icc_args())
        .args(["flags", "--buildtype", "plain", "--optimization", "s", "--pgo", "generate"])
        .assert()
        .success()
        .stdout("-Os -prof-gen=threadsafe\n");

    harbour_intel(&tmp)
        .args(icl_args())
        .args(["flags", "--buildtype", "plain", "--optimization", "1", "--pgo", "use"])
        .assert()
        .success()
        .stdout("/O1 /Qprof-use\n");
}

#[test]
fn test_flags_json() {
    let tmp = temp_dir();

    let output = harbour_intel(&tmp)
        .args(icc_args())
        .args(["flags", "--buildtype", "debug", "--optimization", "0", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["compiler"], "intel");
    assert_eq!(report["flags"]["buildtype"][1], "-traceback");
    assert_eq!(report["all"].as_array().unwrap().len(), 3);
}

#[test]
fn test_flags_unknown_buildtype() {
    let tmp = temp_dir();

    harbour_intel(&tmp)
        .args(icc_args())
        .args(["flags", "--buildtype", "profile", "--optimization", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown build type `profile`"))
        .stderr(predicate::str::contains("debugoptimized"));
}

#[test]
fn test_flags_defaults_from_project_config() {
    let tmp = temp_dir();
    fs::create_dir_all(tmp.path().join(".harbour")).unwrap();
    fs::write(
        tmp.path().join(".harbour/toolchain.toml"),
        "[toolchain]\nversion = \"19.0.1\"\nbuildtype = \"release\"\noptimization = \"3\"\n",
    )
    .unwrap();

    harbour_intel(&tmp)
        .args(["--compiler-id", "intel", "flags"])
        .assert()
        .success()
        .stdout("-O3\n");
}

#[test]
fn test_compiler_id_needs_version() {
    let tmp = temp_dir();

    harbour_intel(&tmp)
        .args(["--compiler-id", "intel", "flags"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("needs a compiler version"));
}

// ============================================================================
// harbour-intel show / pch / toolset
// ============================================================================

#[test]
fn test_show_assumed_compiler() {
    let tmp = temp_dir();

    harbour_intel(&tmp)
        .args(icc_args())
        .args(["--lang", "c++", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Compiler: intel"))
        .stdout(predicate::str::contains("icpc"))
        .stdout(predicate::str::contains("gnu-like"))
        .stdout(predicate::str::contains("b_pch"));
}

#[test]
fn test_pch_posix() {
    let tmp = temp_dir();

    harbour_intel(&tmp)
        .args(icc_args())
        .args(["pch", "include/foo.h", "--dir", "build/pch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Artifact: foo.h.pchi"))
        .stdout(predicate::str::contains(
            "-pch -pch_dir build/pch -x c-header -include include/foo.h -x none",
        ));
}

#[test]
fn test_pch_unsupported_on_windows() {
    let tmp = temp_dir();

    harbour_intel(&tmp)
        .args(icl_args())
        .args(["pch", "foo.h", "--dir", "pch"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not support precompiled headers"));
}

#[test]
fn test_toolset_posix_has_none() {
    let tmp = temp_dir();

    harbour_intel(&tmp)
        .args(icc_args())
        .arg("toolset")
        .assert()
        .success()
        .stdout(predicate::str::contains("does not target an MSVC toolset"));
}

#[test]
fn test_toolset_missing_companion() {
    let tmp = temp_dir();

    harbour_intel(&tmp)
        .args(icl_args())
        .args(["--cl", "/nonexistent/cl.exe", "toolset"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to detect toolchain"));
}

#[cfg(unix)]
#[test]
fn test_detect_rejects_non_intel_compiler() {
    let tmp = temp_dir();

    // echo answers `--version` without naming an Intel compiler
    harbour_intel(&tmp)
        .args(["--cc", "echo", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not an Intel compiler"));
}

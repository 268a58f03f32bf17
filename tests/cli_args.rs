//! CLI argument parsing and validation checks.

use assert_cmd::Command;
use bridgepack::cli::Args;
use clap::Parser;
use predicates::prelude::*;

#[test]
fn help_lists_the_pipeline_flags() {
    Command::cargo_bin("bridgepack")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--skip-pkg"))
        .stdout(predicate::str::contains("--ide"))
        .stdout(predicate::str::contains("--keep-prepared"));
}

#[test]
fn unknown_platform_fails_before_any_work() {
    Command::cargo_bin("bridgepack")
        .unwrap()
        .arg("windows")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid platform: windows"));
}

#[test]
fn trailing_args_are_captured_verbatim() {
    let args = Args::try_parse_from([
        "bridgepack",
        "android",
        "--debug",
        "--",
        "-PabiFilters=arm64-v8a",
        "--stacktrace",
    ])
    .unwrap();

    assert_eq!(args.platform, "android");
    assert!(args.debug);
    assert_eq!(args.forward, ["-PabiFilters=arm64-v8a", "--stacktrace"]);
}

#[test]
fn validate_accepts_both_platforms() {
    for platform in ["android", "ios"] {
        let args = Args::try_parse_from(["bridgepack", platform]).unwrap();
        assert!(args.validate().is_ok());
    }
}

#[test]
fn validate_rejects_unknown_platform() {
    let args = Args::try_parse_from(["bridgepack", "web"]).unwrap();
    let err = args.validate().unwrap_err();
    assert!(err.contains("Valid platforms: android, ios"));
}

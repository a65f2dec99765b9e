//! CLI end-to-end tests
//!
//! Argument handling and error surfacing for the mediagrab binary. The
//! container operations themselves need real media files and are covered by
//! the library crates' unit tests.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn mediagrab_cmd() -> Command {
    Command::cargo_bin("mediagrab").unwrap()
}

#[test]
fn no_args_shows_usage() {
    let mut cmd = mediagrab_cmd();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_lists_subcommands() {
    let mut cmd = mediagrab_cmd();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fetch"))
        .stdout(predicate::str::contains("remux"))
        .stdout(predicate::str::contains("clip"))
        .stdout(predicate::str::contains("split"))
        .stdout(predicate::str::contains("mux"));
}

#[test]
fn fetch_accepts_a_mime_hint() {
    let mut cmd = mediagrab_cmd();
    cmd.args(["fetch", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--mime"))
        .stdout(predicate::str::contains("--expect-size"));
}

#[test]
fn fetch_mux_accepts_per_stream_mime_hints() {
    let mut cmd = mediagrab_cmd();
    cmd.args(["fetch-mux", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--video-mime"))
        .stdout(predicate::str::contains("--audio-mime"));
}

#[test]
fn clip_rejects_inverted_window() {
    let mut cmd = mediagrab_cmd();
    cmd.args(["clip", "in.mp4", "out.mp4", "--start", "40", "--end", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid time range"));
}

#[test]
fn remux_reports_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.mp4");
    let output = dir.path().join("out.mkv");
    let mut cmd = mediagrab_cmd();
    cmd.arg("remux")
        .arg(&missing)
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open"));
}

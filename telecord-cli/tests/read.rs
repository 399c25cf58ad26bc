use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn read_adds_author_header() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("msg.md");
    fs::write(&input, "**hi** <@1>").unwrap();

    let mut cmd = cargo_bin_cmd!("telecord");
    cmd.arg("read").arg(&input).arg("--author").arg("xx");

    cmd.assert()
        .success()
        .stdout("<b>xx</b>: <strong>hi</strong> <code>@1</code>\n");
}

#[test]
fn read_header_limit_from_config() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("msg.md");
    fs::write(&input, "hello").unwrap();

    let config_path = dir.path().join("telecord.toml");
    fs::write(&config_path, "[telegram]\ninline_header_limit = 5\n").unwrap();

    let mut cmd = cargo_bin_cmd!("telecord");
    cmd.arg("read")
        .arg(&input)
        .arg("--author")
        .arg("xx")
        .arg("--config")
        .arg(&config_path);

    cmd.assert().success().stdout("<b>xx</b>:\nhello\n");
}

#[test]
fn read_json_reports_spoiler_streams() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("msg.md");
    fs::write(&input, "a ||b c||").unwrap();

    let mut cmd = cargo_bin_cmd!("telecord");
    cmd.arg("read")
        .arg(&input)
        .arg("--author")
        .arg("xx")
        .arg("--json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"redacted\": \"a █ █\""))
        .stdout(predicate::str::contains("\"revealed\": \"a b c\""));
}

#[test]
fn missing_config_file_fails() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("msg.md");
    fs::write(&input, "x").unwrap();

    let mut cmd = cargo_bin_cmd!("telecord");
    cmd.arg("read")
        .arg(&input)
        .arg("--author")
        .arg("xx")
        .arg("--config")
        .arg(dir.path().join("missing.toml"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

//! CLI binary smoke tests using assert_cmd.
//!
//! These tests exercise the compiled `spamfilter` binary to verify that
//! argument parsing, help text, the training pipeline and prediction work
//! end-to-end.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("spamfilter").unwrap()
}

fn write_corpus(dir: &Path) -> String {
    let mut text = String::from("label,message\n");
    for i in 0..15 {
        text.push_str(&format!(
            "spam,WINNER! Claim your free cash prize number {} now, text CLAIM\n",
            i
        ));
        text.push_str(&format!(
            "ham,Shall we grab lunch after the meeting on day {}?\n",
            i
        ));
    }
    let path = dir.join("spam.csv");
    fs::write(&path, text).unwrap();
    path.to_string_lossy().into_owned()
}

// ---------------------------------------------------------------------------
// Top-level
// ---------------------------------------------------------------------------

#[test]
fn no_args_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_flag() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("train"))
        .stdout(predicate::str::contains("predict"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("spamfilter"));
}

// ---------------------------------------------------------------------------
// Train subcommand
// ---------------------------------------------------------------------------

#[test]
fn train_no_config_prints_template() {
    cmd()
        .arg("train")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"data_path\""))
        .stdout(predicate::str::contains("\"classifiers\""))
        .stderr(predicate::str::contains("No config file provided"));
}

#[test]
fn train_nonexistent_config_errors() {
    cmd()
        .args(["train", "/nonexistent/config.json"])
        .assert()
        .failure();
}

#[test]
fn train_wrong_data_extension_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spam.txt");
    fs::write(&path, "label,message\n").unwrap();
    cmd()
        .args(["train", "-d", path.to_str().unwrap()])
        .assert()
        .failure();
}

#[test]
fn train_unmapped_label_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spam.csv");
    fs::write(&path, "label,message\nspam,free prize\njunk,hello there\n").unwrap();
    cmd()
        .args(["train", "-d", path.to_str().unwrap(), "-o"])
        .arg(dir.path().join("out"))
        .assert()
        .failure();
}

#[test]
fn train_then_predict() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_corpus(dir.path());
    let out = dir.path().join("out");

    cmd()
        .args(["train", "-d", &data, "--seed", "7", "--test-size", "0.3", "-o"])
        .arg(&out)
        .assert()
        .success();

    for file in [
        "models/logistic_model.json",
        "models/svm_model.json",
        "logistic_confusion.html",
        "logistic_roc.html",
        "svm_confusion.html",
        "svm_roc.html",
        "cml-report.md",
        "metrics.txt",
        "report.html",
    ] {
        assert!(out.join(file).exists(), "missing {}", file);
    }

    let summary = fs::read_to_string(out.join("cml-report.md")).unwrap();
    assert!(summary.contains("## Logistic Regression"));
    assert!(summary.contains("## SVM"));
    let metrics = fs::read_to_string(out.join("metrics.txt")).unwrap();
    assert!(metrics.contains("[logistic]"));
    assert!(metrics.contains("[svm]"));

    cmd()
        .args(["predict", "-m"])
        .arg(out.join("models/svm_model.json"))
        .args(["claim your free cash prize now", "lunch after the meeting?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("spam\tclaim your free cash prize now"))
        .stdout(predicate::str::contains("ham\tlunch after the meeting?"));
}

#[test]
fn train_without_html_report() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_corpus(dir.path());
    let out = dir.path().join("out");

    cmd()
        .args(["train", "-d", &data, "--no-html-report", "-o"])
        .arg(&out)
        .assert()
        .success();
    assert!(out.join("metrics.txt").exists());
    assert!(!out.join("report.html").exists());
}

// ---------------------------------------------------------------------------
// Predict subcommand
// ---------------------------------------------------------------------------

#[test]
fn predict_requires_model() {
    cmd()
        .args(["predict", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--model"));
}

#[test]
fn predict_nonexistent_model_errors() {
    cmd()
        .args(["predict", "-m", "/nonexistent/model.json", "hello"])
        .assert()
        .failure();
}

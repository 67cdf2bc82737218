// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

mod helpers;

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use helpers::client_ts_diff;

/// Binary with config, keys and cwd confined to `home`
fn procommit(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("procommit").unwrap();
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("PROCOMMIT_API_KEY", "test-key")
        .env("NO_COLOR", "1")
        .env_remove("PROCOMMIT_GENERATOR")
        .env_remove("PROCOMMIT_MODEL")
        .env_remove("PROCOMMIT_ENDPOINT")
        .env_remove("RUST_LOG");
    cmd
}

// ─── Surface ─────────────────────────────────────────────────────────────────

#[test]
fn help_lists_flags_and_commands() {
    let home = tempfile::tempdir().unwrap();
    procommit(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--generator")
                .and(predicate::str::contains("--diff-file"))
                .and(predicate::str::contains("--yes"))
                .and(predicate::str::contains("completions"))
                .and(predicate::str::contains("hook")),
        );
}

#[test]
fn completions_for_bash() {
    let home = tempfile::tempdir().unwrap();
    procommit(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("procommit"));
}

#[test]
fn unknown_language_is_rejected_by_parser() {
    let home = tempfile::tempdir().unwrap();
    procommit(home.path())
        .args(["--language", "klingon", "config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("klingon"));
}

// ─── Settings ────────────────────────────────────────────────────────────────

#[test]
fn set_then_show_config() {
    let home = tempfile::tempdir().unwrap();

    procommit(home.path())
        .args(["set", "model", "gpt-4.1-mini"])
        .assert()
        .success();
    procommit(home.path())
        .args(["set", "language", "german"])
        .assert()
        .success();

    procommit(home.path())
        .arg("config")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Model: gpt-4.1-mini")
                .and(predicate::str::contains("Language: german"))
                .and(predicate::str::contains("API key: ****")),
        );
}

#[test]
fn set_unknown_key_fails() {
    let home = tempfile::tempdir().unwrap();
    procommit(home.path())
        .args(["set", "colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown setting 'colour'"));
}

// ─── Generation ──────────────────────────────────────────────────────────────

#[test]
fn blank_diff_reports_no_staged_changes() {
    let home = tempfile::tempdir().unwrap();
    let diff = home.path().join("empty.diff");
    std::fs::write(&diff, "\n").unwrap();

    procommit(home.path())
        .args(["--generator", "ollama", "--yes", "--diff-file"])
        .arg(&diff)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No staged changes"));
}

#[test]
fn custom_generator_without_endpoint_fails() {
    let home = tempfile::tempdir().unwrap();
    let diff = home.path().join("staged.diff");
    std::fs::write(&diff, client_ts_diff()).unwrap();

    procommit(home.path())
        .args(["--generator", "custom", "--yes", "--diff-file"])
        .arg(&diff)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Custom endpoint is required"));
}

#[tokio::test(flavor = "multi_thread")]
async fn diff_file_end_to_end_with_project_config() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "FEAT(src/api/client.ts): add fetchUser request helper",
            "done": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    std::fs::write(
        home.path().join(".procommit.toml"),
        format!(
            "generator = \"ollama\"\nendpoint = \"{}\"\ninclude_file_extension = false\n",
            server.uri()
        ),
    )
    .unwrap();
    let diff = home.path().join("staged.diff");
    std::fs::write(&diff, client_ts_diff()).unwrap();
    let out = home.path().join("COMMIT_EDITMSG");

    procommit(home.path())
        .args(["--yes", "--diff-file"])
        .arg(&diff)
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    assert_eq!(
        std::fs::read_to_string(&out).unwrap(),
        "feat(client): add fetchUser request helper\n"
    );
}

#![allow(deprecated)] // TODO: cargo_bin → cargo_bin_cmd! へ移行

use assert_cmd::Command;
use predicates::prelude::*;
mod common;
use common::{TestProject, VALID_CONFIG};

/// CLIヘルプが正しく表示されることを確認
#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("runway").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("synth"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("version"));
}

/// バージョン表示が正しく動作することを確認
#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("runway").unwrap();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("runway"));
}

/// synthコマンドのヘルプにオプションが表示されることを確認
#[test]
fn test_synth_help() {
    let mut cmd = Command::cargo_bin("runway").unwrap();
    cmd.arg("synth")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--stack-name"))
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--timeout-secs"));
}

/// 正しい設定ファイルで validate が成功することを確認
#[test]
fn test_validate_valid_config() {
    let project = TestProject::new();
    project.write_config(VALID_CONFIG);

    project
        .command()
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("設定は正常です"))
        .stdout(predicate::str::contains("conn-a"))
        .stdout(predicate::str::contains("aws://unknown-account/unknown-region"));
}

/// 環境変数での上書きが validate に反映されることを確認
#[test]
fn test_validate_env_override() {
    let project = TestProject::new();
    project.write_config(VALID_CONFIG);

    project
        .command()
        .arg("validate")
        .env("RUNWAY_PORT", "9090")
        .env("RUNWAY_REGION", "ap-northeast-1")
        .assert()
        .success()
        .stdout(predicate::str::contains("port 9090"))
        .stdout(predicate::str::contains("aws://unknown-account/ap-northeast-1"));
}

/// min_size > max_size が検証で拒否されることを確認
#[test]
fn test_validate_rejects_inverted_bounds() {
    let project = TestProject::new();
    project.write_config(VALID_CONFIG);

    project
        .command()
        .arg("validate")
        .env("RUNWAY_MIN_SIZE", "5")
        .env("RUNWAY_MAX_SIZE", "2")
        .assert()
        .failure()
        .stderr(predicate::str::contains("min_size (5)"));
}

/// 必須項目が無い場合にエラーになることを確認
#[test]
fn test_validate_missing_field() {
    let project = TestProject::new();

    project
        .command()
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("source.repository_url"));
}

/// 不正な設定では AWS に接続する前に synth が失敗することを確認
#[test]
fn test_synth_rejects_invalid_config_before_lookup() {
    let project = TestProject::new();
    project.write_config(VALID_CONFIG);

    project
        .command()
        .arg("synth")
        .env("RUNWAY_PORT", "0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("source.port"))
        .stderr(predicate::str::contains("接続").not());

    assert!(!project.path().join("runway.out").exists());
}

/// 不正なスタック名では AWS に接続する前に synth が失敗することを確認
#[test]
fn test_synth_rejects_invalid_stack_name() {
    let project = TestProject::new();
    project.write_config(VALID_CONFIG);

    project
        .command()
        .arg("synth")
        .arg("--stack-name")
        .arg("../escaped")
        .assert()
        .failure()
        .stderr(predicate::str::contains("stack_name"))
        .stderr(predicate::str::contains("接続").not());

    assert!(!project.path().join("runway.out").exists());
    assert!(!project.path().join("escaped.template.json").exists());
}

/// タイムアウト 0 秒は受け付けないことを確認
#[test]
fn test_synth_rejects_zero_timeout() {
    let project = TestProject::new();
    project.write_config(VALID_CONFIG);

    project
        .command()
        .arg("synth")
        .arg("--timeout-secs")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--timeout-secs"));
}

/// 不正なコマンドでエラーになることを確認
#[test]
fn test_invalid_command() {
    let mut cmd = Command::cargo_bin("runway").unwrap();
    cmd.arg("invalid-command").assert().failure();
}

//! Integration tests for the Lumen CLI

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the lumen binary
#[allow(deprecated)]
fn lumen_cmd() -> Command {
    let mut cmd = Command::cargo_bin("lumen").unwrap();
    cmd.env_remove("DATABASE_URL");
    cmd
}

fn db_url(dir: &TempDir) -> String {
    format!("sqlite://{}", dir.path().join("lumen.db").display())
}

#[test]
fn test_help_command() {
    lumen_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Lumen CLI"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("migrate"))
        .stdout(predicate::str::contains("seed"))
        .stdout(predicate::str::contains("rollback"))
        .stdout(predicate::str::contains("health"))
        .stdout(predicate::str::contains("stats"));
}

#[test]
fn test_version_flag() {
    lumen_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lumen"));
}

#[test]
fn test_rollback_refuses_without_force() {
    let dir = TempDir::new().unwrap();
    lumen_cmd()
        .args(["--url", &db_url(&dir), "rollback"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_missing_database_url_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    lumen_cmd()
        .current_dir(dir.path())
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no database URL configured"));
}

#[test]
fn test_migrate_then_status() {
    let dir = TempDir::new().unwrap();
    let url = db_url(&dir);

    lumen_cmd()
        .args(["--url", &url, "migrate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("initial_schema"))
        .stdout(predicate::str::contains("3 applied"));

    lumen_cmd()
        .args(["--url", &url, "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("up to date"));
}

#[test]
fn test_init_seeds_after_migrating() {
    let dir = TempDir::new().unwrap();
    let url = db_url(&dir);

    lumen_cmd()
        .args(["--url", &url, "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Database initialized"));

    lumen_cmd()
        .args(["--url", &url, "health"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Database is healthy"));
}

#[test]
fn test_health_fails_on_empty_database() {
    let dir = TempDir::new().unwrap();
    lumen_cmd()
        .args(["--url", &db_url(&dir), "health"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_validate_on_migrated_database() {
    let dir = TempDir::new().unwrap();
    let url = db_url(&dir);

    lumen_cmd()
        .args(["--url", &url, "migrate"])
        .assert()
        .success();

    lumen_cmd()
        .args(["--url", &url, "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("consistent"));
}

#[test]
fn test_config_file_supplies_url() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("lumen.toml");
    std::fs::write(
        &config_path,
        format!("[database]\nurl = \"{}\"\n", db_url(&dir)),
    )
    .unwrap();

    lumen_cmd()
        .args(["--config", &config_path.display().to_string(), "migrate"])
        .assert()
        .success();
}

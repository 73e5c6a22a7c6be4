#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Run `neodash` inside `dir`, writing plots to `dir/plots`.
fn neodash(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("neodash").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("NEODASH_CONFIG")
        .env_remove("NEODASH_BASE_URL")
        .env("NEODASH_PLOT_DIR", dir.path().join("plots"));
    cmd
}

#[test]
fn config_json_shows_defaults() {
    let dir = TempDir::new().unwrap();
    let output = neodash(&dir)
        .args(["config", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["upstream"]["base_url"], "http://localhost:8080/");
    assert_eq!(value["server"]["port"], 5001);
    assert_eq!(value["max_span_days"], 7);
}

#[test]
fn config_file_values_are_applied() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("neodash.yaml");
    std::fs::write(
        &config,
        "upstream:\n  base_url: http://stats.internal:9000/\nmax_span_days: 3\n",
    )
    .unwrap();

    neodash(&dir)
        .arg("--config")
        .arg(&config)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("http://stats.internal:9000/"))
        .stdout(predicate::str::contains("max_span_days: 3"));
}

#[test]
fn local_config_file_is_picked_up() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("neodash.yaml"), "max_span_days: 2\n").unwrap();

    neodash(&dir)
        .args(["config", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"max_span_days\": 2"));
}

#[test]
fn config_write_saves_effective_config() {
    let dir = TempDir::new().unwrap();
    neodash(&dir)
        .args(["--base-url", "http://stats.internal:9000/", "config", "--write"])
        .assert()
        .success();

    let saved = std::fs::read_to_string(dir.path().join("neodash.yaml")).unwrap();
    assert!(saved.contains("http://stats.internal:9000/"));
    assert!(saved.contains("max_span_days: 7"));
}

#[test]
fn missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    neodash(&dir)
        .args(["--config", "does-not-exist.yaml", "config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("does-not-exist.yaml"));
}

#[test]
fn plot_rejects_malformed_date() {
    let dir = TempDir::new().unwrap();
    neodash(&dir)
        .args(["plot", "--start", "2024-13-01", "--end", "2024-01-02"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid date"));
}

#[test]
fn plot_rejects_overlong_range() {
    let dir = TempDir::new().unwrap();
    neodash(&dir)
        .args(["plot", "--start", "2024-01-01", "--end", "2024-02-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at most 7"));
}

#[test]
fn plot_with_failing_upstream_still_writes_file() {
    let mut server = mockito::Server::new();
    let _upstream = server
        .mock("GET", mockito::Matcher::Any)
        .with_status(500)
        .create();

    let dir = TempDir::new().unwrap();
    let plots = dir.path().join("plots");
    let output = neodash(&dir)
        .args(["--base-url", &server.url()])
        .args(["plot", "--start", "2024-01-01", "--end", "2024-01-03", "--json"])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["file_name"], "plot_2024-01-01_to_2024-01-03.png");
    assert_eq!(value["url"], "/plots/plot_2024-01-01_to_2024-01-03.png");
    assert!(plots.join("plot_2024-01-01_to_2024-01-03.png").is_file());
}

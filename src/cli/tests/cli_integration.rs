//! Integration test: run the `dockerlayers` binary against Dockerfiles on disk.
//!
//! Every invocation passes `--config` with an empty file so a per-user
//! `~/.dockerlayers/config.yaml` cannot change the results.

use std::path::Path;
use std::process::Command;

const MULTISTAGE: &str = r#"FROM golang:1.22 AS base
FROM base AS builder
ARG VERSION=1.0
COPY --from=base /src /src
FROM scratch
COPY --from=builder /bin/app /bin/app
ENTRYPOINT ["/bin/app"]
"#;

/// Run the binary in `dir` and return (stdout, stderr, success).
fn run_cmd(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let config = dir.join("dockerlayers.yaml");
    if !config.exists() {
        std::fs::write(&config, "").unwrap();
    }

    let output = Command::new(env!("CARGO_BIN_EXE_dockerlayers"))
        .current_dir(dir)
        .arg("--config")
        .arg(&config)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("Failed to run `dockerlayers {}`: {}", args.join(" "), e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

fn workspace_with(dockerfile: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("Dockerfile"), dockerfile).unwrap();
    dir
}

#[test]
fn test_analyze_default_dockerfile_text() {
    let dir = workspace_with(MULTISTAGE);
    let (stdout, stderr, success) = run_cmd(dir.path(), &["analyze"]);
    assert!(success, "stderr: {stderr}");

    assert!(stdout.starts_with("Dockerfile insight for "));
    assert!(stdout.contains("Stage 0 (base)"));
    assert!(stdout.contains("Stage 1 (builder)"));
    assert!(stdout.contains("Stage 2\n  Base image: scratch"));
    assert!(stdout.contains("Copies from stage 1 (builder)."));
    assert!(stdout.contains("Legend:"));
}

#[test]
fn test_analyze_json_with_file_flag() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("docker")).unwrap();
    std::fs::write(dir.path().join("docker/app.Dockerfile"), MULTISTAGE).unwrap();

    let (stdout, stderr, success) = run_cmd(
        dir.path(),
        &["analyze", "-f", "docker/app.Dockerfile", "--format", "json"],
    );
    assert!(success, "stderr: {stderr}");

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(json["file_path"].as_str().unwrap().ends_with("app.Dockerfile"));
    assert_eq!(json["stages"].as_array().unwrap().len(), 3);
    assert_eq!(json["stages"][1]["build_args"], 1);
}

#[test]
fn test_analyze_table_format() {
    let dir = workspace_with(MULTISTAGE);
    let (stdout, stderr, success) = run_cmd(dir.path(), &["analyze", "--format", "table"]);
    assert!(success, "stderr: {stderr}");
    assert!(stdout.contains("STAGE"));
    assert!(stdout.contains("builder"));
}

#[test]
fn test_analyze_config_file_sets_format() {
    let dir = workspace_with(MULTISTAGE);
    std::fs::write(dir.path().join("dockerlayers.yaml"), "format: json\n").unwrap();
    let (stdout, stderr, success) = run_cmd(dir.path(), &["analyze"]);
    assert!(success, "stderr: {stderr}");
    assert!(serde_json::from_str::<serde_json::Value>(&stdout).is_ok());
}

#[test]
fn test_verbose_logs_config_load() {
    let dir = workspace_with(MULTISTAGE);
    let (_, stderr, success) = run_cmd(dir.path(), &["-v", "analyze"]);
    assert!(success, "stderr: {stderr}");
    assert!(stderr.contains("Loaded config"), "stderr: {stderr}");
}

#[test]
fn test_analyze_missing_from_fails() {
    let dir = workspace_with("RUN echo hi\n");
    let (stdout, stderr, success) = run_cmd(dir.path(), &["analyze"]);
    assert!(!success);
    assert!(stdout.is_empty());
    assert!(
        stderr.contains("Error: line 1: Dockerfile must start with FROM (found RUN)"),
        "stderr: {stderr}"
    );
}

#[test]
fn test_analyze_dangling_continuation_fails() {
    let dir = workspace_with("FROM alpine\nRUN foo \\\n");
    let (_, stderr, success) = run_cmd(dir.path(), &["analyze"]);
    assert!(!success);
    assert!(stderr.contains("unterminated line continuation at end of file"));
}

#[test]
fn test_version() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, success) = run_cmd(dir.path(), &["version"]);
    assert!(success);
    assert!(stdout.starts_with("dockerlayers version "));
}

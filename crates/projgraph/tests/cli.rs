//! Binary-level tests: argument parsing, environment layering, exit status.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const TREE: &str = r#"
[root]
name = "case100"

[[project]]
path = ":app"
role = "application"
namespace = "com.sensor.case100"

[[project]]
path = ":path_provider"
role = "library"
"#;

/// Temp checkout with the build definition under `android/`
struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(temp_dir.path().join("android")).expect("Failed to create project dir");
        let ctx = Self { temp_dir };
        ctx.write("projgraph.toml", TREE);
        ctx
    }

    fn project_dir(&self) -> PathBuf {
        self.temp_dir.path().join("android")
    }

    fn build_dir(&self) -> PathBuf {
        self.temp_dir.path().join("build")
    }

    fn write(&self, name: &str, content: &str) -> &Self {
        fs::write(self.project_dir().join(name), content).expect("Failed to write file");
        self
    }

    /// Command running inside the project directory with a scrubbed environment
    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("projgraph").expect("Binary not found");
        cmd.current_dir(self.project_dir())
            .env_remove("TOOL_SDK")
            .env_remove("RUST_LOG")
            .env_remove("CI")
            .env_remove("FORCE_COLOR")
            .env("NO_COLOR", "1");
        for (key, _) in std::env::vars() {
            if key.starts_with("PROJGRAPH_") {
                cmd.env_remove(key);
            }
        }
        cmd
    }
}

fn path_str(path: &Path) -> String {
    path.display().to_string()
}

#[test]
fn test_help_lists_commands() {
    let ctx = TestContext::new();
    ctx.command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("materialize"))
        .stdout(predicate::str::contains("PROJGRAPH_WORKDIR"));
}

#[test]
fn test_version_subcommand() {
    let ctx = TestContext::new();
    ctx.command()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("projgraph "));
}

#[test]
fn test_missing_tool_location_fails_with_guidance() {
    let ctx = TestContext::new();
    ctx.command()
        .arg("plan")
        .assert()
        .failure()
        .stderr(predicate::str::contains("sdk.path=<path>"))
        .stderr(predicate::str::contains("TOOL_SDK"));
}

#[test]
fn test_plan_defaults_when_no_subcommand() {
    let ctx = TestContext::new();
    ctx.write("local.properties", "sdk.path=/opt/sdk\n");

    ctx.command()
        .assert()
        .success()
        .stdout(predicate::str::contains("/opt/sdk (file)"))
        .stdout(predicate::str::contains(":path_provider"));
}

#[test]
fn test_environment_fallback() {
    let ctx = TestContext::new();
    ctx.command()
        .env("TOOL_SDK", "/env/sdk")
        .arg("locate")
        .assert()
        .success()
        .stdout(predicate::str::contains("/env/sdk (environment)"));
}

#[test]
fn test_properties_file_wins_over_environment() {
    let ctx = TestContext::new();
    ctx.write("local.properties", "sdk.path=/file/sdk\n");

    ctx.command()
        .env("TOOL_SDK", "/env/sdk")
        .args(["--output", "json", "locate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"/file/sdk\""))
        .stdout(predicate::str::contains("FileConfig"));
}

#[test]
fn test_dotenv_configures_output() {
    let ctx = TestContext::new();
    ctx.write("local.properties", "sdk.path=/opt/sdk\n")
        .write(".env", "PROJGRAPH_OUTPUT=json\n");

    let output = ctx.command().arg("order").output().expect("Failed to run");
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is not JSON");
    assert_eq!(value["order"][0], ":");
}

#[test]
fn test_workdir_flag() {
    let ctx = TestContext::new();
    ctx.write("local.properties", "sdk.path=/opt/sdk\n");

    ctx.command()
        .current_dir(ctx.temp_dir.path())
        .args(["--workdir", "android", "order"])
        .assert()
        .success()
        .stdout(predicate::str::contains(":app"));
}

#[test]
fn test_materialize_then_clean() {
    let ctx = TestContext::new();
    ctx.write("local.properties", "sdk.path=/opt/sdk\n");

    ctx.command()
        .arg("materialize")
        .assert()
        .success()
        .stdout(predicate::str::contains(path_str(&ctx.build_dir().join("app"))));
    assert!(ctx.build_dir().join("path_provider").is_dir());

    ctx.command().arg("clean").assert().success();
    assert!(!ctx.build_dir().exists());
}

#[test]
fn test_duplicate_directory_is_fatal() {
    let ctx = TestContext::new();
    ctx.write("local.properties", "sdk.path=/opt/sdk\n").write(
        "projgraph.toml",
        r#"
[root]
name = "r"

[[project]]
path = ":a"
role = "library"

[[project]]
path = ":b"
role = "library"

[[project]]
path = ":a:common"
role = "library"

[[project]]
path = ":b:common"
role = "library"
"#,
    );

    ctx.command()
        .arg("materialize")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate output directory"));
    assert!(!ctx.build_dir().exists());
}

#[test]
fn test_invalid_log_format_rejected() {
    let ctx = TestContext::new();
    ctx.command()
        .args(["--log-format", "xml", "version"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("xml"));
}

//! Integration tests for the keg CLI

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// A prefix with an empty formula repository and a matching config file
struct Sandbox {
    root: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let root = TempDir::new().unwrap();
        std::fs::create_dir_all(root.path().join("Library/Formula")).unwrap();
        std::fs::write(
            root.path().join("config.toml"),
            format!(
                "[general]\ncolor = \"never\"\n\n[paths]\nprefix = \"{}\"\n",
                root.path().display()
            ),
        )
        .unwrap();
        Self { root }
    }

    fn prefix(&self) -> &Path {
        self.root.path()
    }

    fn formula(&self, name: &str, body: &str) {
        std::fs::write(
            self.prefix().join(format!("Library/Formula/{name}.toml")),
            body,
        )
        .unwrap();
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new(env!("CARGO_BIN_EXE_keg"));
        command
            .arg("--config")
            .arg(self.prefix().join("config.toml"))
            .args(args)
            .env_remove("RUST_LOG")
            .env_remove("KEG_PREFIX")
            .env_remove("KEG_CELLAR")
            .env_remove("KEG_REPOSITORY")
            .env_remove("KEG_OUTPUT")
            .env_remove("KEG_COLOR");
        command
    }

    fn keg(&self, args: &[&str]) -> Output {
        self.command(args).output().expect("Failed to execute keg")
    }
}

#[test]
fn test_cli_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_keg"))
        .arg("--version")
        .output()
        .expect("Failed to execute keg");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("keg"));
}

#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_keg"))
        .arg("--help")
        .output()
        .expect("Failed to execute keg");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("install"));
}

#[test]
fn test_install_help_hides_lowercase_head() {
    let output = Command::new(env!("CARGO_BIN_EXE_keg"))
        .args(["install", "--help"])
        .output()
        .expect("Failed to execute keg");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--HEAD"));
    assert!(stdout.contains("--force"));
    assert!(!stdout.contains("--head "));
}

#[test]
fn test_cli_invalid_command() {
    let output = Command::new(env!("CARGO_BIN_EXE_keg"))
        .arg("invalid-command")
        .output()
        .expect("Failed to execute keg");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unrecognized subcommand"));
}

#[test]
fn test_install_no_formulae() {
    let sandbox = Sandbox::new();
    let output = sandbox.keg(&["install"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("requires a formula argument"));
}

#[test]
fn test_install_lowercase_head() {
    let sandbox = Sandbox::new();
    let output = sandbox.keg(&["install", "--head", "wget"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Specify `--HEAD` in uppercase"));
}

#[test]
fn test_install_blacklisted_formula() {
    let sandbox = Sandbox::new();
    let output = sandbox.keg(&["install", "pip"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No available formula for pip"));
}

#[test]
fn test_install_unknown_formula() {
    let sandbox = Sandbox::new();
    let output = sandbox.keg(&["install", "definitely-not-a-formula"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("definitely-not-a-formula"));
}

#[test]
fn test_json_mode_keeps_stderr_quiet_on_error() {
    let sandbox = Sandbox::new();
    let output = sandbox.keg(&["--json", "install"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stderr.is_empty());
}

#[test]
fn test_json_output_from_environment_keeps_stderr_quiet() {
    let sandbox = Sandbox::new();
    let output = sandbox
        .command(&["install", "definitely-not-a-formula"])
        .env("KEG_OUTPUT", "json")
        .output()
        .expect("Failed to execute keg");

    assert_eq!(output.status.code(), Some(1));
    assert!(
        output.stderr.is_empty(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn test_install_into_sandbox_prefix() {
    let sandbox = Sandbox::new();
    sandbox.formula("hello", "version = \"2.12.1\"\ncaveats = \"Say hello.\"\n");

    let output = sandbox.keg(&["--json", "install", "hello"]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["type"], "InstallReport");
    assert_eq!(report["data"]["installed"][0], "hello");
    assert!(sandbox
        .prefix()
        .join("Cellar/hello/2.12.1/INSTALL_RECEIPT.json")
        .exists());
}

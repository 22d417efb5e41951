//! CLI smoke tests: verify basic binary behavior.

use std::io::Write;
use std::process::{Command, Stdio};

fn cli_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_nutri"));
    cmd.env_remove("NUTRI_CHAT_URL")
        .env_remove("NUTRI_TTS_URL")
        .env_remove("NUTRI_PROFILE_URL")
        .env_remove("NUTRI_USE_REMOTE_CHAT")
        .env_remove("NUTRI_USER_ID")
        .env("NUTRI_SEED", "7");
    cmd
}

#[test]
fn test_help_flag() {
    let output = cli_bin().arg("--help").output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"), "Expected usage info in --help output");
    assert!(stdout.contains("chat"));
    assert!(stdout.contains("serve"));
}

#[test]
fn test_version_flag() {
    let output = cli_bin().arg("--version").output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("nutri"), "Expected binary name in --version output");
}

#[test]
fn test_invalid_config_does_not_panic() {
    // A missing config file falls back to defaults
    let output = cli_bin()
        .arg("--config")
        .arg("/tmp/nonexistent_nutri_config_12345.toml")
        .arg("--help")
        .output()
        .expect("failed to run");
    assert!(output.status.success());
}

#[test]
fn test_chat_captures_name_from_stdin() {
    let mut child = cli_bin()
        .args([
            "--config",
            "/tmp/nonexistent_nutri_config_12345.toml",
            "chat",
            "--profile-name",
            "Carla",
        ])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run");

    child
        .stdin
        .take()
        .unwrap()
        .write_all("meu nome é Pedro\nquero emagrecer\nsair\n".as_bytes())
        .unwrap();

    let output = child.wait_with_output().expect("failed to wait");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("NutriAI - Carla"));
    assert!(stdout.contains("Pedro"), "reply should use the captured name: {stdout}");
    assert!(stdout.contains("Até logo!"));
}

#[test]
fn test_remote_chat_without_url_fails() {
    let output = cli_bin()
        .args(["--config", "/tmp/nonexistent_nutri_config_12345.toml", "chat", "--remote"])
        .stdin(Stdio::null())
        .output()
        .expect("failed to run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("chat_url"));
}

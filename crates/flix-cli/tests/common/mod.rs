use std::path::Path;
use std::process::{Child, Command, Output, Stdio};

pub const ADMIN_EMAIL: &str = "admin@bahamaflix.com";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const USER_EMAIL: &str = "user@example.com";
pub const USER_PASSWORD: &str = "user123";

/// Run the CLI binary against an isolated data directory.
pub fn run_cli(args: &[&str], data_dir: &Path) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_bahamaflix"));
    cmd.args(args);
    cmd.env("BAHAMAFLIX_DATA_DIR", data_dir);
    cmd.env_remove("BAHAMAFLIX_CATALOG");
    cmd.env_remove("RUST_LOG");
    cmd.env("NO_COLOR", "1");
    cmd.output().expect("Failed to execute CLI")
}

/// Start a long-running CLI command with piped stdout.
pub fn spawn_cli(args: &[&str], data_dir: &Path) -> Child {
    Command::new(env!("CARGO_BIN_EXE_bahamaflix"))
        .args(args)
        .env("BAHAMAFLIX_DATA_DIR", data_dir)
        .env_remove("BAHAMAFLIX_CATALOG")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("Failed to spawn CLI")
}

/// Run the CLI and expect success.
pub fn run_cli_success(args: &[&str], data_dir: &Path) -> String {
    let output = run_cli(args, data_dir);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI and parse its stdout as JSON.
pub fn run_cli_json(args: &[&str], data_dir: &Path) -> serde_json::Value {
    let stdout = run_cli_success(args, data_dir);
    serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("Invalid JSON ({}): {}", e, stdout))
}

pub fn login_admin(data_dir: &Path) {
    run_cli_success(
        &[
            "account",
            "login",
            "--email",
            ADMIN_EMAIL,
            "--password",
            ADMIN_PASSWORD,
        ],
        data_dir,
    );
}

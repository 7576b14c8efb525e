//! Build script to embed the release version in the `bahamaflix` binary.

use std::process::Command;

fn main() {
    // Rerun when a commit or tag moves HEAD
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    // Outside a git checkout (e.g. a packaged crate) fall back to Cargo.toml
    let version = git_version().unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=BAHAMAFLIX_VERSION={}", version);
}

fn git_version() -> Option<String> {
    // Nearest tag plus commit distance, or a bare hash when untagged
    let output = Command::new("git")
        .args(["describe", "--tags", "--always"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let version = String::from_utf8(output.stdout).ok()?;
    let version = version.trim();
    if version.is_empty() {
        return None;
    }

    // Release tags are named v1.2.3; clap prints the version as-is
    Some(version.strip_prefix('v').unwrap_or(version).to_string())
}

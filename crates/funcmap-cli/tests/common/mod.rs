#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;
use tempfile::TempDir;

pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

fn empty_config() -> &'static Path {
    static CONFIG_DIR: OnceLock<TempDir> = OnceLock::new();
    CONFIG_DIR
        .get_or_init(|| tempfile::tempdir().expect("failed to create config dir for tests"))
        .path()
}

/// Create a `funcmap` command isolated from the user's configuration.
pub fn funcmap_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("funcmap"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env("FUNCMAP_CONFIG", empty_config().join("config.toml"));
    cmd.env_remove("FUNCMAP_TIMEZONE");
    cmd
}

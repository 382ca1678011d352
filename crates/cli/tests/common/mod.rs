use assert_cmd::prelude::*;
use std::path::Path;
use std::process::Command;

/// The CLI with colors off and configuration read from `home`.
pub fn cli(home: &Path) -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("refactor-toolbox")?;
    cmd.env("HOME", home)
        .env("APPDATA", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    Ok(cmd)
}

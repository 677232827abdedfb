use assert_cmd::{cargo::cargo_bin_cmd, Command};
use serde_json::Value;
use std::path::Path;

pub fn healthgrid() -> Command {
    cargo_bin_cmd!("healthgrid")
}

/// Command running inside `dir`
pub fn healthgrid_in(dir: &Path) -> Command {
    let mut cmd = healthgrid();
    cmd.current_dir(dir).env_remove("HEALTHGRID_STORE");
    cmd
}

pub fn init_store(dir: &Path) {
    healthgrid_in(dir).arg("init").assert().success();
}

/// Run with `--format json` and parse stdout
#[allow(dead_code)]
pub fn json_output(dir: &Path, args: &[&str]) -> Value {
    let output = healthgrid_in(dir)
        .args(["--format", "json"])
        .args(args)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "command {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

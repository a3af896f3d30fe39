//! End-to-end tests of the `mkicns` binary using stand-in tools on PATH
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::Mutex;

// Writing an executable while another test forks can fail with ETXTBSY.
static SERIAL: Mutex<()> = Mutex::new(());

const FAKE_TOOL: &str = r#"#!/bin/sh
if [ "$1" = "--version" ]; then echo "fake 1.0"; exit 0; fi
while [ $# -gt 0 ]; do
  if [ "$1" = "-o" ]; then shift; printf 'fake' > "$1"; fi
  shift
done
"#;

const FAILING_TOOL: &str = r#"#!/bin/sh
if [ "$1" = "--version" ]; then echo "fake 1.0"; exit 0; fi
exit 3
"#;

struct Workspace {
    dir: tempfile::TempDir,
}

impl Workspace {
    /// A project root holding `Renamr/renamr_icon.svg` and an empty `bin/`
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("Renamr")).unwrap();
        fs::create_dir_all(dir.path().join("bin")).unwrap();
        fs::write(
            dir.path().join("Renamr/renamr_icon.svg"),
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"16\" height=\"16\"/>",
        )
        .unwrap();
        Self { dir }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn install(&self, name: &str, script: &str) {
        let path = self.root().join("bin").join(name);
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_mkicns"))
            .args(args)
            .current_dir(self.root())
            .env("PATH", self.root().join("bin"))
            .env_remove("RUST_LOG")
            .output()
            .expect("failed to run mkicns")
    }

    fn icns(&self) -> PathBuf {
        self.root().join("Renamr/Resources/Renamr.icns")
    }

    fn iconset(&self) -> PathBuf {
        self.root().join("Renamr/Resources/Renamr.iconset")
    }
}

#[test]
fn missing_rasterizer_exits_with_install_hint() {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let ws = Workspace::new();

    let out = ws.run(&[]);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("rsvg-convert is not installed"), "{}", stderr);
    assert!(stderr.contains("brew install librsvg"), "{}", stderr);
    assert!(!ws.iconset().exists());
    assert!(!ws.icns().exists());
}

#[test]
fn default_run_builds_icns_and_removes_iconset() {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let ws = Workspace::new();
    ws.install("rsvg-convert", FAKE_TOOL);
    ws.install("iconutil", FAKE_TOOL);

    for _ in 0..2 {
        let out = ws.run(&[]);
        assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

        let stdout = String::from_utf8_lossy(&out.stdout);
        let lines: Vec<&str> = stdout.lines().collect();
        assert_eq!(lines[0], "Creating iconset...");
        assert_eq!(lines[1], "Creating ICNS file...");
        assert_eq!(lines[2], "ICNS file created successfully at: Renamr/Resources/Renamr.icns");

        assert!(ws.icns().is_file());
        assert!(!ws.iconset().exists());
    }
}

#[test]
fn failing_rasterizer_propagates_exit_code() {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let ws = Workspace::new();
    ws.install("rsvg-convert", FAILING_TOOL);
    ws.install("iconutil", FAKE_TOOL);

    let out = ws.run(&[]);

    assert_eq!(out.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("rsvg-convert -w 16 -h 16"), "{}", stderr);
    assert!(stderr.contains("exit code 3"), "{}", stderr);
    assert!(!ws.iconset().exists());
    assert!(!ws.icns().exists());
}

#[test]
fn json_report_lists_outputs() {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let ws = Workspace::new();
    ws.install("rsvg-convert", FAKE_TOOL);
    ws.install("iconutil", FAKE_TOOL);

    let out = ws.run(&["--json", "--name", "Demo", "--output-dir", "build"]);

    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["output"], "build/Demo.icns");
    assert_eq!(report["images"].as_array().map(|a| a.len()), Some(13));
    assert!(ws.root().join("build/Demo.icns").is_file());
    assert!(!ws.root().join("build/Demo.iconset").exists());
}

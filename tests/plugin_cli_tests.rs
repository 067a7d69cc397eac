//! Integration tests for the plugin binary.
//!
//! These tests run the compiled binary against a fake proc root and verify the
//! Nagios contract: one stdout line and the matching exit code.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::{tempdir, TempDir};

fn fake_proc(open: u64, max: u64) -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");
    fs::create_dir_all(dir.path().join("sys/fs")).unwrap();
    fs::write(
        dir.path().join("sys/fs/file-nr"),
        format!("{}\t0\t{}\n", open, max),
    )
    .unwrap();
    dir
}

fn add_process(root: &Path, pid: u32, limit: u64, fds: usize, comm: &str) {
    let p = root.join(pid.to_string());
    fs::create_dir_all(p.join("fd")).unwrap();
    fs::write(
        p.join("limits"),
        format!("Max open files            {}                 4096                 files\n", limit),
    )
    .unwrap();
    for i in 0..fds {
        fs::write(p.join("fd").join(i.to_string()), "").unwrap();
    }
    fs::write(p.join("comm"), format!("{}\n", comm)).unwrap();
}

fn run_plugin(root: &Path, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_check_open_files"))
        .arg("--no-config")
        .arg("--proc-root")
        .arg(root)
        .args(extra)
        .output()
        .expect("Failed to run plugin binary")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_ok_exit_code_and_single_line() {
    let root = fake_proc(100_000, 200_000);
    add_process(root.path(), 1, 1024, 5, "init");

    let output = run_plugin(root.path(), &[]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout_lines(&output),
        ["OK: Both system-wide and per-process open files are well within their limits."]
    );
}

#[test]
fn test_warning_exit_code() {
    let root = fake_proc(10, 1000);
    add_process(root.path(), 321, 20, 17, "worker");

    let output = run_plugin(root.path(), &["-w", "80", "-c", "90"]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout_lines(&output),
        ["WARNING: PID 321(worker) open files reached 85.0% of max (20)"]
    );
}

#[test]
fn test_critical_exit_code() {
    let root = fake_proc(950, 1000);

    let output = run_plugin(root.path(), &[]);

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(
        stdout_lines(&output),
        ["CRITICAL: System-wide open files reached 95.0% of max (1000)"]
    );
}

#[test]
fn test_missing_counters_exit_unknown() {
    let root = tempdir().expect("Failed to create temp dir");

    let output = run_plugin(root.path(), &[]);

    assert_eq!(output.status.code(), Some(3));
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("UNKNOWN: "));
}

#[test]
fn test_invalid_thresholds_exit_unknown() {
    let root = fake_proc(10, 1000);

    let output = run_plugin(root.path(), &["-w", "95", "-c", "90"]);

    assert_eq!(output.status.code(), Some(3));
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("UNKNOWN: Configuration invalid"));
}

#[test]
fn test_bad_argument_exit_unknown() {
    let root = fake_proc(10, 1000);

    let output = run_plugin(root.path(), &["-w", "plenty"]);

    assert_eq!(output.status.code(), Some(3));
    assert!(stdout_lines(&output)[0].starts_with("UNKNOWN: "));
}

#[test]
fn test_logs_stay_off_stdout() {
    let root = fake_proc(10, 1000);
    add_process(root.path(), 2, 1024, 1, "kthreadd");

    let output = run_plugin(root.path(), &["--log-level", "trace"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_lines(&output).len(), 1);
    assert!(!output.stderr.is_empty());
}

#[test]
fn test_config_file_thresholds() {
    let root = fake_proc(10, 1000);
    add_process(root.path(), 8, 100, 55, "app");
    let cfg_dir = tempdir().expect("Failed to create temp dir");
    let cfg = cfg_dir.path().join("check.toml");
    fs::write(&cfg, "warning_percent = 50.0\ncritical_percent = 60.0\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_check_open_files"))
        .arg("--config")
        .arg(&cfg)
        .arg("--proc-root")
        .arg(root.path())
        .output()
        .expect("Failed to run plugin binary");

    assert_eq!(output.status.code(), Some(1));
}

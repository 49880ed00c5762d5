// Shared test helpers for integration tests
#![allow(dead_code)]

use api_runner_step::config::{HostOs, RunConfiguration};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

/// Completion markers printed by a successful runner.
pub const SUCCESS_OUTPUT: &str = "[INFO]  Project compile completed.\nRunning tests...\n Finished.";

pub fn unix_config(runner_path: &str) -> RunConfiguration {
    RunConfiguration {
        host: HostOs::Unix,
        ..RunConfiguration::new(runner_path)
    }
}

pub fn windows_config(runner_path: &str) -> RunConfiguration {
    RunConfiguration {
        host: HostOs::Windows,
        ..RunConfiguration::new(runner_path)
    }
}

/// A workspace directory plus a directory holding a fake `ApiTestRunner.exe`.
pub struct FakeRunnerEnv {
    pub root: TempDir,
    pub workspace: PathBuf,
    pub runner_dir: PathBuf,
}

/// Creates a fake runner: a shell script named `ApiTestRunner.exe` that prints
/// `stdout`/`stderr`, writes the report passed with `-o` when `write_report`
/// is set, and exits with `exit_code`. It is launched through `sh`, so the
/// configuration returned uses `launcher = "sh"`.
pub fn setup_fake_runner(
    stdout: &str,
    stderr: &str,
    write_report: bool,
    exit_code: i32,
) -> (FakeRunnerEnv, RunConfiguration) {
    let root = tempdir().expect("Failed to create temporary directory");
    let workspace = root.path().join("workspace");
    let runner_dir = root.path().join("runner");
    fs::create_dir_all(&workspace).expect("Failed to create workspace");
    fs::create_dir_all(&runner_dir).expect("Failed to create runner directory");

    let report_line = if write_report {
        r#"echo '<testsuites/>' > "$out""#
    } else {
        ":"
    };

    let script = format!(
        r#"#!/bin/sh
out=""
while [ "$#" -gt 0 ]; do
  if [ "$1" = "-o" ]; then out="$2"; shift; fi
  shift
done
{report_line}
cat <<'__STDOUT__'
{stdout}
__STDOUT__
cat >&2 <<'__STDERR__'
{stderr}
__STDERR__
exit {exit_code}
"#
    );
    fs::write(runner_dir.join("ApiTestRunner.exe"), script).expect("Failed to write fake runner");

    let config = RunConfiguration {
        launcher: Some("sh".to_string()),
        ..unix_config(&format!("{}/", runner_dir.display()))
    };

    (
        FakeRunnerEnv {
            root,
            workspace,
            runner_dir,
        },
        config,
    )
}

/// Writes a TOML step configuration into `dir` and returns its path.
pub fn write_config_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write configuration file");
    path
}

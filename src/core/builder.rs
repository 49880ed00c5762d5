//! # Command Builder Module / 命令构建模块
//!
//! Builds the command line that invokes the external runner in `test` mode.
//! The result is a `RunnerCommand`: a token list that renders to the exact
//! command-line string shown in build logs and also yields the raw argument
//! vector handed to the process spawner, so no shell re-parsing happens.
//!
//! 构建以 `test` 模式调用外部运行器的命令行。
//! 结果是一个 `RunnerCommand`：一个标记列表，既可渲染为构建日志中显示的命令行字符串，
//! 也可生成传递给进程派生器的原始参数向量，因此无需再次进行 shell 解析。

use serde::{Serialize, Serializer};
use std::fmt;

use crate::core::config::{HostOs, RunConfiguration};
use crate::core::path::normalize_path;

/// File name of the runner executable.
/// 运行器可执行文件的文件名。
pub const RUNNER_EXE: &str = "ApiTestRunner.exe";

/// Results subdirectory inside the workspace where the runner writes its report.
/// 工作区内运行器写入报告的结果子目录。
pub const RESULTS_DIR: &str = "ApiStudioResults";

/// Subcommand token of the runner.
pub const TEST_SUBCOMMAND: &str = "test";

/// One element of the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Rendered verbatim.
    Plain(String),
    /// Rendered inside double quotes.
    Quoted(String),
}

impl Token {
    /// The argument value as passed to the process, without quotes.
    pub fn value(&self) -> &str {
        match self {
            Token::Plain(v) | Token::Quoted(v) => v,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Plain(v) => f.write_str(v),
            Token::Quoted(v) => write!(f, "\"{v}\""),
        }
    }
}

/// A fully built runner invocation.
///
/// `Display` renders the command-line string (tokens joined by single spaces);
/// `program()` and `args()` give the unquoted form used to spawn the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerCommand {
    tokens: Vec<Token>,
}

impl RunnerCommand {
    fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    fn plain(&mut self, value: impl Into<String>) -> &mut Self {
        self.tokens.push(Token::Plain(value.into()));
        self
    }

    fn quoted(&mut self, value: impl Into<String>) -> &mut Self {
        self.tokens.push(Token::Quoted(value.into()));
        self
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The executable to spawn: the launcher when present, otherwise the runner.
    pub fn program(&self) -> &str {
        self.tokens.first().map(Token::value).unwrap_or_default()
    }

    /// Arguments following `program()`, unquoted.
    pub fn args(&self) -> Vec<&str> {
        self.tokens.iter().skip(1).map(Token::value).collect()
    }

    /// Program followed by its arguments, unquoted.
    pub fn argv(&self) -> Vec<&str> {
        self.tokens.iter().map(Token::value).collect()
    }
}

impl fmt::Display for RunnerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

impl Serialize for RunnerCommand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Turns a user-supplied runner path into the final executable path.
///
/// - A path ending with the host separator gets `ApiTestRunner.exe` appended.
/// - A path not ending (case-insensitively) with `ApiTestRunner.exe` gets the
///   separator and `ApiTestRunner.exe` appended.
/// - Otherwise the path is returned unchanged, which makes resolution idempotent.
///
/// 将用户提供的运行器路径转换为最终的可执行文件路径。
pub fn resolve_executable_path(runner_path: &str, host: HostOs) -> String {
    let separator = host.separator();
    if runner_path.ends_with(separator) {
        format!("{runner_path}{RUNNER_EXE}")
    } else if !runner_path
        .to_lowercase()
        .ends_with(&RUNNER_EXE.to_lowercase())
    {
        format!("{runner_path}{separator}{RUNNER_EXE}")
    } else {
        runner_path.to_string()
    }
}

/// Resolves the executable and returns it as command-line text, including
/// the launcher token on non-Windows hosts (e.g. `mono /opt/runner/ApiTestRunner.exe`).
///
/// 解析可执行文件并以命令行文本形式返回，在非 Windows 主机上包含启动器标记。
pub fn resolve_executable(config: &RunConfiguration) -> String {
    let path = resolve_executable_path(&config.runner_path, config.host);
    match config.launcher_token() {
        Some(launcher) => format!("{launcher} {path}"),
        None => path,
    }
}

/// Builds the runner command for one invocation.
///
/// Never fails: a malformed configuration yields a malformed but complete
/// command. Validation belongs to configuration entry.
///
/// # Arguments
/// * `config` - The step configuration
/// * `workspace` - The workspace root on the runner's host
/// * `output_file_name` - File name of the report, e.g. `ApiResults-1700000000000.xml`
///
/// 为一次调用构建运行器命令。
///
/// # Arguments
/// * `config` - 步骤配置
/// * `workspace` - 运行器主机上的工作区根目录
/// * `output_file_name` - 报告的文件名
pub fn build_command(
    config: &RunConfiguration,
    workspace: &str,
    output_file_name: &str,
) -> RunnerCommand {
    let host = config.host;
    let mut cmd = RunnerCommand::new();

    if let Some(launcher) = config.launcher_token() {
        cmd.plain(launcher);
    }
    cmd.plain(resolve_executable_path(&config.runner_path, host));
    cmd.plain(TEST_SUBCOMMAND);

    if let Some(project) = config.project.as_deref().filter(|p| !p.is_empty()) {
        cmd.plain("-p").quoted(normalize_path(workspace, project, host));
    }

    let prefix = host.current_dir_prefix();
    for entry in config.test_entries() {
        let test = if entry.starts_with(prefix) {
            entry.to_string()
        } else {
            format!("{prefix}{entry}")
        };
        cmd.plain("-t").quoted(test);
    }

    let results_path = format!("{RESULTS_DIR}{}{output_file_name}", host.separator());
    cmd.plain("-o")
        .quoted(normalize_path(workspace, &results_path, host));

    if config.save_contexts {
        cmd.plain("--save-contexts");
    }
    cmd.plain("--verbose-compile");
    cmd.plain("-f")
        .plain(if config.unit_report_format { "junit" } else { "junitsteps" });

    for variable in config.variable_entries() {
        cmd.plain("-v").plain(variable);
    }

    cmd
}

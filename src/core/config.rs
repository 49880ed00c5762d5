//! # Step Configuration Module / 步骤配置模块
//!
//! Defines the `RunConfiguration` of a single build step, the host OS flavour
//! that drives separator rules, and the configuration-entry validation that
//! runs before a configuration is accepted.
//!
//! 定义单个构建步骤的 `RunConfiguration`、决定分隔符规则的主机操作系统类型，
//! 以及在接受配置之前执行的配置录入校验。

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Default file name of the step configuration.
/// 步骤配置的默认文件名。
pub const DEFAULT_CONFIG_FILE: &str = "ApiTest.toml";

/// Launcher used to start the runner on hosts without a native .NET runtime.
pub const DEFAULT_LAUNCHER: &str = "mono";

/// Errors raised while loading or validating a step configuration.
/// 加载或校验步骤配置时产生的错误。
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("runner path is empty")]
    EmptyRunnerPath,

    #[error("runner path does not exist: {0}")]
    RunnerNotFound(PathBuf),

    #[error("failed to read configuration file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to expand runner path '{path}': {message}")]
    Expand { path: String, message: String },

    #[error("unknown host OS '{0}' (expected 'windows' or 'unix')")]
    UnknownHost(String),
}

/// The operating system flavour of the machine the runner executes on.
/// It selects the path separator and the executable-resolution rules.
///
/// 运行器所在机器的操作系统类型。
/// 它决定路径分隔符和可执行文件解析规则。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostOs {
    Windows,
    Unix,
}

impl HostOs {
    /// The flavour of the machine this process runs on.
    pub fn current() -> Self {
        if cfg!(windows) {
            HostOs::Windows
        } else {
            HostOs::Unix
        }
    }

    pub fn is_windows(self) -> bool {
        self == HostOs::Windows
    }

    /// Path separator of this host.
    pub fn separator(self) -> char {
        match self {
            HostOs::Windows => '\\',
            HostOs::Unix => '/',
        }
    }

    /// The current-directory prefix (`./` or `.\`) used for test entries.
    pub fn current_dir_prefix(self) -> &'static str {
        match self {
            HostOs::Windows => ".\\",
            HostOs::Unix => "./",
        }
    }

    /// Human readable name used in transcripts.
    pub fn display_name(self) -> &'static str {
        match self {
            HostOs::Windows => "Windows",
            HostOs::Unix => "Linux",
        }
    }
}

impl Default for HostOs {
    fn default() -> Self {
        HostOs::current()
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostOs::Windows => write!(f, "windows"),
            HostOs::Unix => write!(f, "unix"),
        }
    }
}

impl FromStr for HostOs {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "windows" | "win" => Ok(HostOs::Windows),
            "unix" | "linux" | "macos" => Ok(HostOs::Unix),
            other => Err(ConfigError::UnknownHost(other.to_string())),
        }
    }
}

/// Configuration of one API-test build step, loaded from a TOML file.
/// Immutable for the duration of an invocation.
///
/// 一个 API 测试构建步骤的配置，从 TOML 文件加载。
/// 在一次调用期间保持不变。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RunConfiguration {
    /// Path to the runner executable, or to the directory containing it.
    /// 运行器可执行文件的路径，或包含它的目录。
    pub runner_path: String,

    /// Path to the test project, relative to the workspace unless absolute.
    /// 测试项目的路径，除非是绝对路径，否则相对于工作区。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    /// Newline-delimited test identifiers. The file may also give a list.
    /// 以换行分隔的测试标识符。配置文件也可以给出列表。
    #[serde(
        default,
        deserialize_with = "deserialize_lines",
        skip_serializing_if = "Option::is_none"
    )]
    pub tests: Option<String>,

    /// When `false`, `--save-contexts` is not passed to the runner.
    #[serde(default = "default_true")]
    pub save_contexts: bool,

    /// `true` selects the `junit` report flavour, `false` selects `junitsteps`.
    #[serde(default)]
    pub unit_report_format: bool,

    /// Newline-delimited `name=value` runner variables.
    /// 以换行分隔的 `name=value` 运行器变量。
    #[serde(
        default,
        deserialize_with = "deserialize_lines",
        skip_serializing_if = "Option::is_none"
    )]
    pub variables: Option<String>,

    /// Host flavour; defaults to the machine this process runs on.
    #[serde(default)]
    pub host: HostOs,

    /// Launcher token placed before the executable on non-Windows hosts.
    /// `None` means `mono`; an empty string disables the launcher.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launcher: Option<String>,

    /// The language for console messages (e.g., "en", "zh-CN").
    #[serde(default = "default_language")]
    pub language: String,

    /// Accepted for compatibility with older step definitions; never emitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_from: Option<String>,

    /// Accepted for compatibility with older step definitions; never emitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_after: Option<String>,
}

impl Default for RunConfiguration {
    fn default() -> Self {
        Self {
            runner_path: String::new(),
            project: None,
            tests: None,
            save_contexts: true,
            unit_report_format: false,
            variables: None,
            host: HostOs::current(),
            launcher: None,
            language: default_language(),
            start_from: None,
            stop_after: None,
        }
    }
}

impl RunConfiguration {
    /// Creates a configuration for the given runner path with every other field at its default.
    pub fn new(runner_path: impl Into<String>) -> Self {
        Self {
            runner_path: runner_path.into(),
            ..Self::default()
        }
    }

    /// The launcher token for this configuration, if any.
    /// Windows hosts never use a launcher.
    ///
    /// 此配置的启动器标记（如果有）。Windows 主机从不使用启动器。
    pub fn launcher_token(&self) -> Option<&str> {
        if self.host.is_windows() {
            return None;
        }
        match self.launcher.as_deref() {
            None => Some(DEFAULT_LAUNCHER),
            Some(l) if l.trim().is_empty() => None,
            Some(l) => Some(l.trim()),
        }
    }

    /// Test entries after splitting on newlines and dropping empty lines.
    pub fn test_entries(&self) -> Vec<&str> {
        split_entries(self.tests.as_deref())
    }

    /// Variable entries after splitting on newlines and dropping empty lines.
    pub fn variable_entries(&self) -> Vec<&str> {
        split_entries(self.variables.as_deref())
    }

    /// Names of fields that are parsed but have no effect on the command.
    pub fn ignored_fields(&self) -> Vec<&'static str> {
        let mut ignored = Vec::new();
        if self.start_from.as_deref().is_some_and(|s| !s.trim().is_empty()) {
            ignored.push("start_from");
        }
        if self.stop_after.as_deref().is_some_and(|s| !s.trim().is_empty()) {
            ignored.push("stop_after");
        }
        ignored
    }
}

/// Splits a newline-delimited field into its non-empty entries.
/// A trailing `\r` is removed so files edited on Windows behave the same.
///
/// 将以换行分隔的字段拆分为非空条目。
pub fn split_entries(value: Option<&str>) -> Vec<&str> {
    value
        .unwrap_or_default()
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .collect()
}

/// Loads a step configuration from a TOML file and expands `~` and
/// environment variables in the runner path.
///
/// 从 TOML 文件加载步骤配置，并展开运行器路径中的 `~` 和环境变量。
pub fn load_run_config(path: &Path) -> Result<RunConfiguration, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config = parse_run_config(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.runner_path = expand_runner_path(&config.runner_path)?;
    Ok(config)
}

/// Parses a step configuration from TOML text without touching the file system.
pub fn parse_run_config(content: &str) -> Result<RunConfiguration, toml::de::Error> {
    toml::from_str(content)
}

fn expand_runner_path(raw: &str) -> Result<String, ConfigError> {
    shellexpand::full(raw)
        .map(|expanded| expanded.into_owned())
        .map_err(|e| ConfigError::Expand {
            path: raw.to_string(),
            message: e.to_string(),
        })
}

/// Configuration-entry check for the runner path: it must be non-empty and
/// must exist on disk. `run` does not repeat this check.
///
/// 运行器路径的配置录入检查：必须非空且必须存在于磁盘上。`run` 不会重复此检查。
pub fn validate_runner_path(runner_path: &str) -> Result<(), ConfigError> {
    if runner_path.trim().is_empty() {
        return Err(ConfigError::EmptyRunnerPath);
    }
    let path = PathBuf::from(runner_path);
    if !path.exists() {
        return Err(ConfigError::RunnerNotFound(path));
    }
    Ok(())
}

fn default_true() -> bool {
    true
}

fn default_language() -> String {
    "en".to_string()
}

/// Accepts either a newline-delimited string or a list of strings.
fn deserialize_lines<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lines {
        Text(String),
        List(Vec<String>),
    }

    Ok(match Option::<Lines>::deserialize(deserializer)? {
        None => None,
        Some(Lines::Text(text)) => Some(text),
        Some(Lines::List(items)) => Some(items.join("\n")),
    })
}

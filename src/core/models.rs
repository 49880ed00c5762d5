//! # Data Models Module / 数据模型模块
//!
//! This module defines the data structures shared by the execution engine,
//! the outcome classifiers and the reporters: the per-run `Invocation`, the
//! execution mode, the step outcome and the final `StepReport`.
//!
//! 此模块定义了执行引擎、结果分类器和报告器共享的数据结构：
//! 每次运行的 `Invocation`、执行模式、步骤结果以及最终的 `StepReport`。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::core::builder::{self, RESULTS_DIR, RunnerCommand};
use crate::core::config::{HostOs, RunConfiguration};
use crate::infra::t;

/// Where the step runs and, with it, how its outcome is classified.
/// 步骤的运行方式，以及相应的结果判定方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Runs on the controller; success means the report file exists.
    /// 在控制器上运行；报告文件存在即为成功。
    #[default]
    Local,
    /// Runs as agent work; success means the output carries the completion markers.
    /// 作为代理任务运行；输出包含完成标记即为成功。
    Agent,
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::Local => write!(f, "local"),
            ExecutionMode::Agent => write!(f, "agent"),
        }
    }
}

impl FromStr for ExecutionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(ExecutionMode::Local),
            "agent" | "remote" => Ok(ExecutionMode::Agent),
            other => Err(format!("unknown execution mode '{other}'")),
        }
    }
}

/// Derived data for one execution of the step. Built fresh per run and
/// discarded afterwards.
///
/// 一次步骤执行的派生数据。每次运行时新建，运行后丢弃。
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Workspace root as given by the orchestrator.
    pub workspace: PathBuf,
    /// Report file name, `ApiResults-<epoch-millis>.xml`.
    pub output_file_name: String,
    /// Where the report is expected on disk.
    pub results_path: PathBuf,
    /// The command handed to the process runner.
    pub command: RunnerCommand,
    /// Host flavour the command was built for.
    pub host: HostOs,
}

impl Invocation {
    /// Builds the invocation for `config` in `workspace` with the given report name.
    pub fn new(config: &RunConfiguration, workspace: &Path, output_file_name: String) -> Self {
        let command = builder::build_command(
            config,
            &workspace.to_string_lossy(),
            &output_file_name,
        );
        let results_path = workspace.join(RESULTS_DIR).join(&output_file_name);
        Self {
            workspace: workspace.to_path_buf(),
            output_file_name,
            results_path,
            command,
            host: config.host,
        }
    }
}

/// Generates the report file name for a run started at `now`.
/// 为在 `now` 时刻开始的运行生成报告文件名。
pub fn output_file_name(now: DateTime<Utc>) -> String {
    format!("ApiResults-{}.xml", now.timestamp_millis())
}

/// Everything the process runner produced for one invocation.
#[derive(Debug, Clone)]
pub struct CompletedRun {
    pub invocation: Invocation,
    /// The text forwarded to the build log.
    pub transcript: String,
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub duration: Duration,
}

/// Why a step was marked as failed.
/// 步骤被标记为失败的原因。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureReason {
    /// The runner did not produce the expected report file.
    /// 运行器没有生成预期的报告文件。
    MissingResultFile { path: PathBuf },
    /// The runner output lacks one or more of the completion markers.
    /// 运行器输出缺少一个或多个完成标记。
    MissingMarkers { markers: Vec<String> },
}

impl FailureReason {
    /// Localized, human readable description.
    pub fn describe(&self, locale: &str) -> String {
        match self {
            FailureReason::MissingResultFile { path } => {
                t!("report.missing_result_file", locale = locale, path = path.display()).to_string()
            }
            FailureReason::MissingMarkers { markers } => t!(
                "report.missing_markers",
                locale = locale,
                markers = markers.join(", ")
            )
            .to_string(),
        }
    }
}

/// Binary pass/fail of a build step.
/// 构建步骤的二元通过/失败结果。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    Success,
    Failure { reason: FailureReason },
}

impl StepOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, StepOutcome::Success)
    }

    pub fn failure(reason: FailureReason) -> Self {
        StepOutcome::Failure { reason }
    }

    /// Gets the status of the outcome as a string for display.
    /// 以字符串形式获取结果的状态以供显示。
    pub fn get_status_str(&self, locale: &str) -> String {
        match self {
            StepOutcome::Success => t!("report.status_passed", locale = locale).to_string(),
            StepOutcome::Failure { .. } => t!("report.status_failed", locale = locale).to_string(),
        }
    }
}

/// The final, serializable record of one build step.
/// 一次构建步骤的最终可序列化记录。
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub mode: ExecutionMode,
    pub host: HostOs,
    pub command: RunnerCommand,
    pub results_path: PathBuf,
    pub exit_code: Option<i32>,
    pub outcome: StepOutcome,
    pub duration_ms: u128,
    pub started_at: DateTime<Utc>,
    #[serde(skip)]
    pub transcript: String,
}

impl StepReport {
    pub fn from_run(
        run: CompletedRun,
        mode: ExecutionMode,
        outcome: StepOutcome,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            mode,
            host: run.invocation.host,
            command: run.invocation.command,
            results_path: run.invocation.results_path,
            exit_code: run.exit_code,
            outcome,
            duration_ms: run.duration.as_millis(),
            started_at,
            transcript: run.transcript,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(u64::try_from(self.duration_ms).unwrap_or(u64::MAX))
    }
}

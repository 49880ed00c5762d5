//! # Outcome Classification Module / 结果分类模块
//!
//! Decides whether a completed runner invocation counts as a successful build
//! step. The runner's exit code is not trusted for this; instead one of two
//! lenient strategies is used, selected by the execution mode:
//!
//! - `ResultFileCheck`: the expected report file exists.
//! - `MarkerScan`: the output contains the runner's completion markers.
//!
//! 判断一次已完成的运行器调用是否算作成功的构建步骤。
//! 不依赖运行器的退出码，而是根据执行模式选择两种宽松策略之一。

use crate::core::models::{CompletedRun, ExecutionMode, FailureReason, StepOutcome};

/// Printed by the runner when the whole run finished.
pub const FINISHED_MARKER: &str = " Finished.";

/// Printed by the runner after the project compiled.
pub const COMPILE_COMPLETED_MARKER: &str = "[INFO]  Project compile completed.";

/// Maps a completed run to a pass/fail outcome.
/// 将已完成的运行映射为通过/失败结果。
pub trait OutcomeClassifier: Send + Sync {
    fn classify(&self, run: &CompletedRun) -> StepOutcome;
}

/// Success iff the runner wrote its report to the expected location.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResultFileCheck;

impl OutcomeClassifier for ResultFileCheck {
    fn classify(&self, run: &CompletedRun) -> StepOutcome {
        let path = &run.invocation.results_path;
        if path.is_file() {
            StepOutcome::Success
        } else {
            StepOutcome::failure(FailureReason::MissingResultFile { path: path.clone() })
        }
    }
}

/// Success iff every marker appears somewhere in the transcript.
#[derive(Debug, Clone)]
pub struct MarkerScan {
    markers: Vec<String>,
}

impl MarkerScan {
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            markers: markers.into_iter().map(Into::into).collect(),
        }
    }

    /// Markers the runner prints on a successful run that compiled its project.
    pub fn runner_defaults() -> Self {
        Self::new([FINISHED_MARKER, COMPILE_COMPLETED_MARKER])
    }

    /// Markers not present in `text`, in declaration order.
    pub fn missing_in(&self, text: &str) -> Vec<String> {
        self.markers
            .iter()
            .filter(|marker| !text.contains(marker.as_str()))
            .cloned()
            .collect()
    }
}

impl Default for MarkerScan {
    fn default() -> Self {
        Self::runner_defaults()
    }
}

impl OutcomeClassifier for MarkerScan {
    fn classify(&self, run: &CompletedRun) -> StepOutcome {
        let missing = self.missing_in(&run.transcript);
        if missing.is_empty() {
            StepOutcome::Success
        } else {
            StepOutcome::failure(FailureReason::MissingMarkers { markers: missing })
        }
    }
}

impl ExecutionMode {
    /// The classifier used for this mode.
    /// 此模式使用的分类器。
    pub fn classifier(self) -> Box<dyn OutcomeClassifier> {
        match self {
            ExecutionMode::Local => Box::new(ResultFileCheck),
            ExecutionMode::Agent => Box::new(MarkerScan::runner_defaults()),
        }
    }
}

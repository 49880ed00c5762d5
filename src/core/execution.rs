//! # Step Execution Module / 步骤执行模块
//!
//! Runs one build step end to end: build the invocation, prepare the results
//! directory, spawn the runner, capture its output and classify the outcome.
//! Local and agent execution share the same command builder; they differ only
//! in how the transcript is assembled and which classifier judges it.
//!
//! 端到端运行一次构建步骤：构建调用、准备结果目录、派生运行器、捕获其输出并判定结果。
//! 本地执行和代理执行共享同一个命令构建器，区别仅在于记录的组装方式和判定所用的分类器。

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use colored::*;
use std::path::Path;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::{
    core::{
        config::RunConfiguration,
        models::{CompletedRun, ExecutionMode, Invocation, StepReport, output_file_name},
    },
    infra::{
        command::{self, CapturedOutput},
        fs, t,
    },
    reporting::console,
};

/// Builds the invocation for a run started at `started_at`, without side effects.
/// 为在 `started_at` 开始的运行构建调用，无副作用。
pub fn prepare_invocation(
    config: &RunConfiguration,
    workspace: &Path,
    started_at: DateTime<Utc>,
) -> Invocation {
    Invocation::new(config, workspace, output_file_name(started_at))
}

/// The main entry point for running the build step.
///
/// # Arguments
/// * `config` - The step configuration
/// * `workspace` - Workspace root supplied by the orchestrator
/// * `mode` - Local or agent execution; selects the outcome classifier
/// * `stop_token` - Cancelling it kills the runner and aborts the step
/// * `locale` - Language for console messages
///
/// # Returns
/// A `StepReport`. A runner that fails is reported through the outcome; only
/// failures to prepare or launch the process are returned as errors.
pub async fn run_step(
    config: &RunConfiguration,
    workspace: &Path,
    mode: ExecutionMode,
    stop_token: CancellationToken,
    locale: &str,
) -> Result<StepReport> {
    for field in config.ignored_fields() {
        tracing::warn!(field, "configuration field is accepted but has no effect on the runner command");
    }

    let workspace = fs::absolute_path(workspace)?;
    let workspace = workspace.as_path();

    let started_at = Utc::now();
    let invocation = prepare_invocation(config, workspace, started_at);
    tracing::debug!(mode = %mode, host = %invocation.host, report = %invocation.results_path.display(), "prepared invocation");

    if mode == ExecutionMode::Local {
        println!("{} {}", t!("run.command_prefix", locale = locale).blue(), invocation.command);
    }

    fs::prepare_results_dir(workspace)?;

    let mut cmd = command::to_process_command(&invocation.command);
    cmd.kill_on_drop(true).current_dir(workspace);

    let start_time = Instant::now();
    let (status_res, output) = tokio::select! {
        biased;
        _ = stop_token.cancelled() => {
            anyhow::bail!(t!("run.interrupted", locale = locale).to_string());
        }
        res = command::spawn_and_capture(cmd) => res,
    };
    let duration = start_time.elapsed();

    let status = status_res.with_context(|| {
        format!(
            "{}",
            t!("run.launch_failed", locale = locale, program = invocation.command.program())
        )
    })?;
    let exit_code = status.code();
    tracing::debug!(?exit_code, elapsed_ms = duration.as_millis(), "runner exited");

    let transcript = match mode {
        ExecutionMode::Local => local_transcript(&output),
        ExecutionMode::Agent => agent_transcript(&invocation, &output, exit_code),
    };

    match mode {
        ExecutionMode::Local => console::print_local_output(&output, locale),
        ExecutionMode::Agent => println!("{transcript}"),
    }

    let run = CompletedRun {
        invocation,
        transcript,
        exit_code,
        duration,
    };
    let outcome = mode.classifier().classify(&run);

    Ok(StepReport::from_run(run, mode, outcome, started_at))
}

/// Stdout followed by stderr, in the layout printed to the build log in local mode.
/// 本地模式下打印到构建日志的布局：先 stdout，后 stderr。
pub fn local_transcript(output: &CapturedOutput) -> String {
    let mut text = String::from("Command output:\n\n");
    push_lines(&mut text, &output.stdout);
    text.push_str("STD Error output (if any):\n\n");
    push_lines(&mut text, &output.stderr);
    text
}

/// The self-describing transcript produced by agent execution: host, command,
/// both streams and the exit code. The marker scan runs over this text.
///
/// 代理执行生成的自描述记录：主机、命令、两个输出流和退出码。标记扫描在此文本上进行。
pub fn agent_transcript(
    invocation: &Invocation,
    output: &CapturedOutput,
    exit_code: Option<i32>,
) -> String {
    let mut text = String::new();
    text.push_str(&format!("\nRunning OS: {}\n", invocation.host.display_name()));
    text.push_str(&format!("\nCommand: \n{}\n", invocation.command));
    text.push_str("\nCommand output:\n");
    push_lines(&mut text, &output.stdout);
    text.push_str("\nSTD Error output (if any):\n");
    push_lines(&mut text, &output.stderr);
    match exit_code {
        Some(code) => text.push_str(&format!("\nCommand exit code: {code} \n")),
        None => text.push_str("\nCommand exit code: terminated by signal \n"),
    }
    text
}

fn push_lines(text: &mut String, stream: &str) {
    for line in stream.lines() {
        text.push_str(line);
        text.push('\n');
    }
}

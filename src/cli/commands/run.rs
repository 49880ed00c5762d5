//! # Run Command Module / 运行命令模块
//!
//! This module implements the `run` command: it loads the step configuration,
//! runs the API-testing runner once and turns the outcome into the process
//! exit status seen by the build orchestrator.
//!
//! 此模块实现 `run` 命令：加载步骤配置，运行一次 API 测试运行器，
//! 并将结果转换为构建编排器看到的进程退出状态。

use anyhow::{Context, Result};
use colored::*;
use std::path::{Path, PathBuf};
use tokio::signal;
use tokio_util::sync::CancellationToken;

use crate::{
    core::{
        config::{self, HostOs, RunConfiguration},
        execution::run_step,
        models::ExecutionMode,
    },
    infra::{fs, t},
    reporting::{print_failure_details, print_summary, write_json_report},
};

/// Arguments of the `run` command.
#[derive(Debug, Clone)]
pub struct RunArgs {
    pub config: PathBuf,
    pub workspace: Option<PathBuf>,
    pub host: Option<HostOs>,
    pub mode: ExecutionMode,
    pub report: Option<PathBuf>,
    /// Explicit `--lang`; otherwise the configuration's language is used.
    pub lang: Option<&'static str>,
}

/// Executes the run command with the provided arguments.
///
/// # Returns
/// `Ok(())` when the step succeeded; an error when it failed or could not run.
pub async fn execute(args: RunArgs) -> Result<()> {
    let step_config = load_config(&args.config, args.host)?;
    let locale = args
        .lang
        .unwrap_or_else(|| crate::resolve_locale(&step_config.language));
    rust_i18n::set_locale(locale);

    let workspace = fs::resolve_workspace(args.workspace, fs::workspace_from_env())?;
    let workspace = fs::absolute_path(&workspace)?;

    println!(
        "{}",
        t!("loading_config", locale = locale, path = args.config.display())
    );
    println!(
        "{}",
        t!("workspace_detected", locale = locale, path = workspace.display())
    );
    println!(
        "{}",
        t!(
            "execution_mode",
            locale = locale,
            mode = args.mode,
            host = step_config.host
        )
        .cyan()
    );

    let stop_token = setup_signal_handler(locale);

    let report = run_step(&step_config, &workspace, args.mode, stop_token, locale).await?;

    print_summary(&report, locale);

    if let Some(report_path) = &args.report {
        println!(
            "\n{}",
            t!("writing_report", locale = locale, path = report_path.display())
        );
        if let Err(e) = write_json_report(&report, report_path) {
            eprintln!("{} {:#}", t!("report_write_failed", locale = locale).red(), e);
        }
    }

    if report.is_success() {
        println!("\n{}", t!("step_passed", locale = locale).green().bold());
        Ok(())
    } else {
        print_failure_details(&report, locale);
        anyhow::bail!(t!("step_failed", locale = locale).to_string());
    }
}

/// Loads the configuration and applies a host override from the command line.
pub fn load_config(path: &Path, host: Option<HostOs>) -> Result<RunConfiguration> {
    let mut step_config = config::load_run_config(path)
        .with_context(|| t!("config_load_failed", path = path.display()).to_string())?;
    if let Some(host) = host {
        step_config.host = host;
    }
    Ok(step_config)
}

/// Sets up a signal handler for graceful shutdown. Cancelling the token drops
/// the running step, which kills the runner process.
fn setup_signal_handler(locale: &str) -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();
    let locale = locale.to_string();

    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            println!("\n{}", t!("shutdown_signal", locale = &locale).yellow());
            token_clone.cancel();
        }
    });

    token
}

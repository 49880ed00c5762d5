//! # Print Command Module / 打印命令模块
//!
//! Prints the runner command line for a configuration without touching the
//! workspace or starting any process. Useful to preview a step or to hand the
//! command to another executor.
//!
//! 打印配置对应的运行器命令行，不修改工作区也不启动任何进程。

use anyhow::Result;
use chrono::Utc;
use std::path::{Path, PathBuf};

use crate::cli::commands::run::load_config;
use crate::core::builder::build_command;
use crate::core::config::HostOs;
use crate::core::models::output_file_name;
use crate::infra::fs;

/// Executes the `print-command` command.
///
/// # Arguments
/// * `config_path` - Step configuration file
/// * `workspace` - Workspace override; `$WORKSPACE` or the current directory otherwise
/// * `host` - Host flavour override
/// * `output_name` - Report file name; a fresh `ApiResults-<epoch-millis>.xml` otherwise
pub fn execute(
    config_path: &Path,
    workspace: Option<PathBuf>,
    host: Option<HostOs>,
    output_name: Option<String>,
) -> Result<()> {
    let step_config = load_config(config_path, host)?;
    let workspace = fs::resolve_workspace(workspace, fs::workspace_from_env())?;
    let output_name = output_name.unwrap_or_else(|| output_file_name(Utc::now()));

    let command = build_command(&step_config, &workspace.to_string_lossy(), &output_name);
    println!("{command}");
    Ok(())
}

//! # File System Operations Module / 文件系统操作模块
//!
//! Workspace resolution and preparation of the results subdirectory the
//! runner writes its report into.
//!
//! 工作区解析以及运行器写入报告的结果子目录的准备。

use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::builder::RESULTS_DIR;

/// Environment variable through which build orchestrators publish the workspace.
pub const WORKSPACE_ENV: &str = "WORKSPACE";

/// Picks the workspace root: an explicit path wins, then `$WORKSPACE`,
/// then the current directory.
///
/// # Arguments
/// * `explicit` - Path given on the command line, if any
/// * `env_value` - Value of `$WORKSPACE`, if set
pub fn resolve_workspace(explicit: Option<PathBuf>, env_value: Option<String>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    if let Some(value) = env_value.filter(|v| !v.trim().is_empty()) {
        return Ok(PathBuf::from(value));
    }
    env::current_dir().context("Failed to determine the current directory")
}

/// Reads `$WORKSPACE` from the process environment.
pub fn workspace_from_env() -> Option<String> {
    env::var(WORKSPACE_ENV).ok()
}

/// Ensures `<workspace>/ApiStudioResults` exists and is empty.
///
/// An existing directory has every entry removed (files and subdirectories);
/// a missing one is created.
///
/// # Returns
/// The path of the results directory.
///
/// 确保 `<workspace>/ApiStudioResults` 存在且为空。
pub fn prepare_results_dir(workspace: &Path) -> Result<PathBuf> {
    let results_dir = workspace.join(RESULTS_DIR);

    if is_directory(&results_dir) {
        let entries = fs::read_dir(&results_dir)
            .with_context(|| format!("Failed to list results directory: {}", results_dir.display()))?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()
            .with_context(|| format!("Failed to list results directory: {}", results_dir.display()))?;

        if !entries.is_empty() {
            tracing::debug!(count = entries.len(), dir = %results_dir.display(), "clearing previous results");
            fs_extra::remove_items(&entries).with_context(|| {
                format!("Failed to clear results directory: {}", results_dir.display())
            })?;
        }
    } else {
        fs::create_dir_all(&results_dir).with_context(|| {
            format!("Failed to create results directory: {}", results_dir.display())
        })?;
    }

    Ok(results_dir)
}

/// Makes a workspace path absolute against the current directory without
/// requiring it to exist. The runner is started inside the workspace, so a
/// relative workspace in its arguments would be resolved twice.
///
/// 将工作区路径相对于当前目录转换为绝对路径，不要求其存在。
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path)
        .with_context(|| format!("Failed to resolve path: {}", path.display()))
}

/// Checks if a path exists and is a directory.
pub fn is_directory(path: &Path) -> bool {
    path.exists() && path.is_dir()
}

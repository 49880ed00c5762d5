//! # JSON Reporting Module / JSON 报告模块
//!
//! Writes the `StepReport` as pretty-printed JSON so orchestrators can pick
//! up the outcome without scraping the console log.
//!
//! 将 `StepReport` 写为格式化的 JSON，使编排器无需解析控制台日志即可获取结果。

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::models::StepReport;

/// Serializes `report` and writes it to `output_path`, creating parent
/// directories as needed.
///
/// # Arguments / 参数
/// * `report` - The finished step report / 已完成的步骤报告
/// * `output_path` - Destination file / 目标文件
pub fn write_json_report(report: &StepReport, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create report directory: {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(report).context("Failed to serialize step report")?;
    fs::write(output_path, json)
        .with_context(|| format!("Failed to write step report: {}", output_path.display()))?;
    Ok(())
}

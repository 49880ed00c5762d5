//! # Console Reporting Module / 控制台报告模块
//!
//! This module forwards the runner's output to the build log and prints a
//! colorful, localized summary of the step outcome.
//!
//! 此模块将运行器的输出转发到构建日志，并打印步骤结果的彩色本地化摘要。

use colored::*;

use crate::core::models::{StepOutcome, StepReport};
use crate::infra::command::CapturedOutput;
use crate::infra::t;

/// Forwards the captured streams in local-mode layout: stdout first, then
/// stderr with every line highlighted as an error.
///
/// 以本地模式布局转发捕获的输出流：先 stdout，然后 stderr，每行都以错误样式突出显示。
pub fn print_local_output(output: &CapturedOutput, locale: &str) {
    println!("{}\n", t!("run.command_output", locale = locale));
    for line in output.stdout.lines() {
        println!("{line}");
    }

    println!("{}\n", t!("run.stderr_output", locale = locale));
    for line in output.stderr.lines() {
        println!("{} {}", "ERROR:".red().bold(), line);
    }
}

/// Prints a formatted summary of the step.
///
/// # Output Format / 输出格式
/// ```text
/// --- Step Summary ---
///   - Mode     | local
///   - Report   | /ws/ApiStudioResults/ApiResults-1700000000000.xml
///   - Exit     | 0
///   - Duration | 1.23s
///   - Status   | Passed
/// ```
pub fn print_summary(report: &StepReport, locale: &str) {
    println!("\n{}", t!("report.summary_banner", locale = locale).bold());

    let exit_str = report
        .exit_code
        .map(|c| c.to_string())
        .unwrap_or_else(|| "N/A".to_string());

    print_row(&t!("report.mode", locale = locale), &report.mode.to_string());
    print_row(
        &t!("report.results_file", locale = locale),
        &report.results_path.display().to_string(),
    );
    print_row(&t!("report.exit_code", locale = locale), &exit_str);
    print_row(
        &t!("report.duration", locale = locale),
        &format!("{:.2?}", report.duration()),
    );

    let status_str = report.outcome.get_status_str(locale);
    let status_colored = match &report.outcome {
        StepOutcome::Success => status_str.green(),
        StepOutcome::Failure { .. } => status_str.red(),
    };
    println!("  - {:<12} | {}", t!("report.status", locale = locale), status_colored);
}

fn print_row(label: &str, value: &str) {
    println!("  - {label:<12} | {value}");
}

/// Prints why a step failed. Does nothing for a successful step.
/// 打印步骤失败的原因。步骤成功时不执行任何操作。
pub fn print_failure_details(report: &StepReport, locale: &str) {
    let StepOutcome::Failure { reason } = &report.outcome else {
        return;
    };

    println!("\n{}", t!("report.failure_banner", locale = locale).red().bold());
    println!("{}", "-".repeat(80));
    println!("{}", reason.describe(locale).red());
    println!("{}", "-".repeat(80));
}

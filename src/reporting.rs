//! # Reporting Module / 报告模块
//!
//! This module handles the presentation of a finished build step: forwarding
//! runner output, printing a colorful summary to the console with
//! internationalization support, and writing a JSON report.
//!
//! 此模块处理已完成构建步骤的呈现：转发运行器输出、
//! 在控制台打印支持国际化的彩色摘要，以及写入 JSON 报告。

pub mod console;
pub mod json;

// Re-export common reporting functions
pub use console::{print_failure_details, print_summary};
pub use json::write_json_report;

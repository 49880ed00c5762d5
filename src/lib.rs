//! # API Runner Step Library / API Runner 构建步骤库
//!
//! This library provides the core functionality for the `api-runner-step` tool,
//! a build step that drives an external API-testing runner executable: it builds
//! the runner's command line, executes it and reports success or failure.
//!
//! 此库为 `api-runner-step` 工具提供核心功能，
//! 这是一个驱动外部 API 测试运行器的构建步骤：构建其命令行、执行并报告成功或失败。
//!
//! ## Modules / 模块
//!
//! - `core` - Configuration, command building, path normalization and step execution
//! - `infra` - Infrastructure services like process spawning, file system and logging
//! - `reporting` - Console summaries and JSON step reports
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 配置、命令构建、路径规范化和步骤执行
//! - `infra` - 基础设施服务，如进程派生、文件系统和日志
//! - `reporting` - 控制台摘要和 JSON 步骤报告
//! - `cli` - 命令行接口和命令

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use core::builder;
pub use core::config;
pub use core::execution;
pub use core::models;
pub use core::outcome;
pub use core::path;

/// Maps a requested locale onto one of the bundled translation files.
/// 将请求的区域设置映射到内置的翻译文件之一。
pub fn resolve_locale(requested: &str) -> &'static str {
    let available_locales = rust_i18n::available_locales!();

    let matched = available_locales
        .iter()
        .find(|l| l.eq_ignore_ascii_case(requested))
        .or_else(|| {
            let lang_code = requested.split(['-', '_']).next().unwrap_or(requested);
            available_locales
                .iter()
                .find(|l| l.eq_ignore_ascii_case(lang_code))
        });

    matched.copied().unwrap_or("en")
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");

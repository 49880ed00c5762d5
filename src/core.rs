//! # Core Module / 核心模块
//!
//! This module contains the core functionality of the build step:
//! configuration, path normalization, command building, outcome
//! classification and step execution.
//!
//! 此模块包含构建步骤的核心功能：
//! 配置、路径规范化、命令构建、结果分类和步骤执行。

pub mod builder;
pub mod config;
pub mod execution;
pub mod models;
pub mod outcome;
pub mod path;

// Re-exports
pub use builder::{RunnerCommand, build_command};
pub use config::{HostOs, RunConfiguration};
pub use execution::run_step;
pub use models::{ExecutionMode, StepOutcome, StepReport};

//! # Init Command Module / 初始化命令模块
//!
//! This module implements the `init` command, which creates a new step
//! configuration file, either from a template or through an interactive
//! wizard that validates the runner path as it is entered.
//!
//! 此模块实现了 `init` 命令，用于创建新的步骤配置文件，
//! 可以基于模板，也可以通过在输入时校验运行器路径的交互式向导。

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use std::{fs, path::Path};

use crate::core::config::{RunConfiguration, validate_runner_path};
use crate::infra::t;

const DEFAULT_CONFIG: &str = r#"# API Test Step Configuration / API 测试步骤配置

# Language for console messages / 控制台消息的语言
language = "en"

# Runner executable, or the directory containing ApiTestRunner.exe
# 运行器可执行文件，或包含 ApiTestRunner.exe 的目录
runner_path = "/opt/api-runner/"

# Test project, relative to the workspace unless absolute
# 测试项目，除非是绝对路径，否则相对于工作区
project = "tests/api"

# Tests to run, relative to the project / 要运行的测试，相对于项目
tests = ["login.test", "checkout.test"]

# Pass --save-contexts to the runner / 向运行器传递 --save-contexts
save_contexts = true

# true: -f junit, false: -f junitsteps
unit_report_format = false

# Runner variables as name=value / 以 name=value 形式给出的运行器变量
variables = ["env=staging"]

# Host flavour of the runner machine: "windows" or "unix" (defaults to this machine)
# 运行器所在机器的类型："windows" 或 "unix"（默认为本机）
# host = "unix"

# Launcher used on non-Windows hosts; "" disables it / 非 Windows 主机上使用的启动器；"" 表示禁用
# launcher = "mono"
"#;

/// Executes the init command.
///
/// # Arguments
/// * `output` - Path for the new configuration file
/// * `force` - Whether to overwrite an existing file
/// * `non_interactive` - Write the template instead of running the wizard
/// * `language` - Language for prompts and messages
///
/// # Returns
/// An error when `non_interactive` is set and `output` exists without `force`.
pub fn execute(output: &Path, force: bool, non_interactive: bool, language: &str) -> Result<()> {
    let theme = ColorfulTheme::default();

    if output.exists() && !force {
        if non_interactive {
            println!("{}", t!("init.use_force", locale = language).yellow());
            anyhow::bail!(
                t!("init.file_exists", locale = language, path = output.display()).to_string()
            );
        }

        let confirmation = Confirm::with_theme(&theme)
            .with_prompt(t!("init.overwrite_prompt", locale = language, path = output.display()))
            .default(false)
            .interact()
            .context(t!("init.user_confirmation_failed", locale = language).to_string())?;
        if !confirmation {
            println!("{}", t!("init.aborted", locale = language));
            return Ok(());
        }
    }

    let content = if non_interactive {
        DEFAULT_CONFIG.to_string()
    } else {
        println!("\n{}", t!("init.wizard_welcome", locale = language).cyan().bold());
        let step_config = run_wizard(&theme, language)?;
        toml::to_string_pretty(&step_config).context("Failed to serialize configuration")?
    };

    write_config(output, &content, language)
}

/// Asks for every field of the configuration. The runner path is validated
/// as it is entered.
fn run_wizard(theme: &ColorfulTheme, language: &str) -> Result<RunConfiguration> {
    let runner_path: String = Input::with_theme(theme)
        .with_prompt(t!("init.runner_path_prompt", locale = language))
        .validate_with(|input: &String| validate_runner_path(input).map_err(|e| e.to_string()))
        .interact_text()?;

    let project: String = Input::with_theme(theme)
        .with_prompt(t!("init.project_prompt", locale = language))
        .allow_empty(true)
        .interact_text()?;

    let tests: String = Input::with_theme(theme)
        .with_prompt(t!("init.tests_prompt", locale = language))
        .allow_empty(true)
        .interact_text()?;

    let variables: String = Input::with_theme(theme)
        .with_prompt(t!("init.variables_prompt", locale = language))
        .allow_empty(true)
        .interact_text()?;

    let save_contexts = Confirm::with_theme(theme)
        .with_prompt(t!("init.save_contexts_prompt", locale = language))
        .default(true)
        .interact()?;

    let unit_report_format = Confirm::with_theme(theme)
        .with_prompt(t!("init.unit_report_prompt", locale = language))
        .default(false)
        .interact()?;

    Ok(RunConfiguration {
        project: non_empty(project),
        tests: comma_list_to_lines(&tests),
        variables: comma_list_to_lines(&variables),
        save_contexts,
        unit_report_format,
        language: language.to_string(),
        ..RunConfiguration::new(runner_path)
    })
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Turns a comma-separated answer into the newline-delimited form of the configuration.
pub fn comma_list_to_lines(value: &str) -> Option<String> {
    let items: Vec<&str> = value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect();
    if items.is_empty() {
        None
    } else {
        Some(items.join("\n"))
    }
}

fn write_config(output: &Path, content: &str, language: &str) -> Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            fs::create_dir_all(parent).with_context(|| {
                t!("init.create_parent_dir_failed", locale = language, path = parent.display())
                    .to_string()
            })?;
        }
    }

    fs::write(output, content).with_context(|| {
        t!("init.write_failed", locale = language, path = output.display()).to_string()
    })?;

    println!(
        "{}",
        t!("init.success", locale = language, path = output.display()).green()
    );
    println!("{}", t!("init.next_steps", locale = language));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::parse_run_config;

    #[test]
    fn template_parses_as_configuration() {
        let config = parse_run_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.runner_path, "/opt/api-runner/");
        assert_eq!(config.test_entries(), vec!["login.test", "checkout.test"]);
        assert_eq!(config.variable_entries(), vec!["env=staging"]);
        assert!(config.save_contexts);
        assert!(!config.unit_report_format);
    }

    #[test]
    fn comma_answers_become_lines() {
        assert_eq!(comma_list_to_lines(" a, ,b "), Some("a\nb".to_string()));
        assert_eq!(comma_list_to_lines("  "), None);
    }
}

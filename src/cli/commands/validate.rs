//! # Validate Command Module / 校验命令模块
//!
//! Configuration-entry validation of a step file: the runner path must be
//! set and must exist. `run` trusts the configuration and does not repeat it.
//!
//! 步骤文件的配置录入校验：运行器路径必须已设置且必须存在。

use anyhow::Result;
use colored::*;
use std::path::Path;

use crate::cli::commands::run::load_config;
use crate::core::config::validate_runner_path;
use crate::infra::t;

/// Executes the `validate` command.
pub fn execute(config_path: &Path, lang: Option<&'static str>) -> Result<()> {
    let step_config = load_config(config_path, None)?;
    let locale = lang.unwrap_or_else(|| crate::resolve_locale(&step_config.language));

    if let Err(e) = validate_runner_path(&step_config.runner_path) {
        println!("{}", t!("validate.invalid", locale = locale, error = &e).red());
        return Err(e.into());
    }

    for field in step_config.ignored_fields() {
        println!(
            "{}",
            t!("validate.ignored_field", locale = locale, field = field).yellow()
        );
    }

    println!(
        "{}",
        t!("validate.ok", locale = locale, path = config_path.display()).green()
    );
    Ok(())
}

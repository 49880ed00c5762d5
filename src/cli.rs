// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::{env, path::PathBuf};

use crate::core::config::{DEFAULT_CONFIG_FILE, HostOs};
use crate::core::models::ExecutionMode;
use crate::infra::{logging, t};

pub mod commands;

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` argument.
fn pre_parse_language() -> String {
    let args: Vec<String> = env::args().collect();
    if let Some(pos) = args.iter().position(|arg| arg == "--lang") {
        if let Some(lang) = args.get(pos + 1) {
            return lang.clone();
        }
    }
    // Fallback to system language detection
    sys_locale::get_locale().unwrap_or_else(|| "en".to_string())
}

fn config_arg(locale: &str) -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .help(t!("arg_config", locale = locale).to_string())
        .value_name("CONFIG")
        .default_value(DEFAULT_CONFIG_FILE)
        .value_parser(clap::value_parser!(PathBuf))
        .action(ArgAction::Set)
}

fn workspace_arg(locale: &str) -> Arg {
    Arg::new("workspace")
        .short('w')
        .long("workspace")
        .help(t!("arg_workspace", locale = locale).to_string())
        .value_name("WORKSPACE")
        .value_parser(clap::value_parser!(PathBuf))
        .action(ArgAction::Set)
}

fn host_arg(locale: &str) -> Arg {
    Arg::new("host")
        .long("host")
        .help(t!("arg_host", locale = locale).to_string())
        .value_name("HOST")
        .value_parser(|s: &str| s.parse::<HostOs>())
        .action(ArgAction::Set)
}

pub fn build_cli(locale: &str) -> Command {
    Command::new("api-runner-step")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli_about", locale = locale).to_string())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli_lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help(t!("cli_verbose", locale = locale).to_string())
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("run")
                .about(t!("cmd_run_about", locale = locale).to_string())
                .arg(config_arg(locale))
                .arg(workspace_arg(locale))
                .arg(host_arg(locale))
                .arg(
                    Arg::new("mode")
                        .short('m')
                        .long("mode")
                        .help(t!("arg_mode", locale = locale).to_string())
                        .value_name("MODE")
                        .default_value("local")
                        .value_parser(|s: &str| s.parse::<ExecutionMode>())
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("report")
                        .long("report")
                        .help(t!("arg_report", locale = locale).to_string())
                        .value_name("REPORT")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("print-command")
                .about(t!("cmd_print_command_about", locale = locale).to_string())
                .arg(config_arg(locale))
                .arg(workspace_arg(locale))
                .arg(host_arg(locale))
                .arg(
                    Arg::new("output-name")
                        .long("output-name")
                        .help(t!("arg_output_name", locale = locale).to_string())
                        .value_name("FILE_NAME")
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("validate")
                .about(t!("cmd_validate_about", locale = locale).to_string())
                .arg(config_arg(locale)),
        )
        .subcommand(
            Command::new("init")
                .about(t!("cmd_init_about", locale = locale).to_string())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help(t!("arg_init_output", locale = locale).to_string())
                        .value_name("OUTPUT")
                        .default_value(DEFAULT_CONFIG_FILE)
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("force")
                        .long("force")
                        .help(t!("arg_init_force", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("non-interactive")
                        .long("non-interactive")
                        .help(t!("arg_init_non_interactive", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
}

/// Path arguments with a default value are always present.
fn path_arg(matches: &ArgMatches, id: &str) -> PathBuf {
    matches.get_one::<PathBuf>(id).cloned().unwrap_or_default()
}

pub async fn run() -> Result<()> {
    // Pre-parse language and initialize i18n first.
    let language = crate::resolve_locale(&pre_parse_language());
    rust_i18n::set_locale(language);

    let matches = build_cli(language).get_matches();
    logging::init_tracing(matches.get_flag("verbose"));

    // Only an explicit `--lang` overrides the language stored in the configuration.
    let explicit_lang = matches.get_one::<String>("lang").map(|l| crate::resolve_locale(l));

    match matches.subcommand() {
        Some(("run", run_matches)) => {
            commands::run::execute(commands::run::RunArgs {
                config: path_arg(run_matches, "config"),
                workspace: run_matches.get_one::<PathBuf>("workspace").cloned(),
                host: run_matches.get_one::<HostOs>("host").copied(),
                mode: run_matches
                    .get_one::<ExecutionMode>("mode")
                    .copied()
                    .unwrap_or_default(),
                report: run_matches.get_one::<PathBuf>("report").cloned(),
                lang: explicit_lang,
            })
            .await?;
        }
        Some(("print-command", print_matches)) => {
            commands::print_command::execute(
                &path_arg(print_matches, "config"),
                print_matches.get_one::<PathBuf>("workspace").cloned(),
                print_matches.get_one::<HostOs>("host").copied(),
                print_matches.get_one::<String>("output-name").cloned(),
            )?;
        }
        Some(("validate", validate_matches)) => {
            commands::validate::execute(&path_arg(validate_matches, "config"), explicit_lang)?;
        }
        Some(("init", init_matches)) => {
            let non_interactive = init_matches.get_flag("non-interactive");
            let force = init_matches.get_flag("force");
            let output = path_arg(init_matches, "output");

            // Show language detection message if it was auto-detected
            if explicit_lang.is_none() && !non_interactive {
                println!(
                    "🌐 {}",
                    t!("system_language_detected", locale = language, lang = language)
                );
            }
            commands::init::execute(&output, force, non_interactive, language)?;
        }
        _ => {
            // `subcommand_required` makes clap print help and exit before we get here.
        }
    }
    Ok(())
}

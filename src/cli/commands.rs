//! # Commands Module / 命令模块
//!
//! One module per CLI subcommand.
//! 每个 CLI 子命令对应一个模块。

pub mod init;
pub mod print_command;
pub mod run;
pub mod validate;

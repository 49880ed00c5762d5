//! # Process Runner Module / 进程运行模块
//!
//! Spawns the runner as a child process and captures its standard output and
//! standard error. Both pipes are drained concurrently so a chatty child can
//! never block on a full pipe buffer, and both are read to the end before
//! the exit status is reported.
//!
//! 将运行器作为子进程派生，并捕获其标准输出和标准错误。
//! 两个管道被并发读取，以免输出较多的子进程因管道缓冲区已满而阻塞；
//! 在报告退出状态之前，两者都会被完整读取。

use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;

use crate::core::builder::RunnerCommand;
use crate::infra::t;

/// Output captured from a child process, one buffer per stream.
/// 从子进程捕获的输出，每个流一个缓冲区。
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Creates the `tokio` command for a built runner invocation. Arguments are
/// passed as-is; the quotes of the rendered command line are not part of them.
///
/// 为已构建的运行器调用创建 `tokio` 命令。参数按原样传递。
pub fn to_process_command(command: &RunnerCommand) -> Command {
    let mut cmd = Command::new(command.program());
    cmd.args(command.args());
    cmd
}

/// Spawns a command and captures its stdout and stderr.
///
/// # Arguments
/// * `cmd` - The `tokio::process::Command` to execute.
///
/// # Returns
/// A tuple containing:
/// - The `ExitStatus` of the process wrapped in an `io::Result`.
/// - The captured output. Empty if the process could not be spawned.
///
/// 派生一个命令，捕获其 stdout 和 stderr。
///
/// # Returns
/// 一个元组，包含：
/// - 进程的 `ExitStatus`（包装在 `io::Result` 中）。
/// - 捕获的输出。如果进程无法派生则为空。
pub async fn spawn_and_capture(mut cmd: Command) -> (std::io::Result<ExitStatus>, CapturedOutput) {
    let mut child = match cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => return (Err(e), CapturedOutput::default()),
    };

    let Some(stdout) = child.stdout.take() else {
        return (
            Err(std::io::Error::other(t!("process.capture_stdout_failed").to_string())),
            CapturedOutput::default(),
        );
    };
    let Some(stderr) = child.stderr.take() else {
        return (
            Err(std::io::Error::other(t!("process.capture_stderr_failed").to_string())),
            CapturedOutput::default(),
        );
    };

    let stdout_handle = drain(stdout);
    let stderr_handle = drain(stderr);

    let status = child.wait().await;

    // Both readers must finish before the status is reported, otherwise
    // the tail of the output could be lost.
    // 在报告状态之前，两个读取任务都必须完成，否则输出的尾部可能丢失。
    let output = CapturedOutput {
        stdout: join_reader(stdout_handle, "stdout").await,
        stderr: join_reader(stderr_handle, "stderr").await,
    };

    (status, output)
}

fn drain<R>(mut reader: R) -> JoinHandle<String>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Err(e) = reader.read_to_end(&mut buf).await {
            tracing::warn!(error = %e, "reading child output stopped early");
        }
        String::from_utf8_lossy(&buf).into_owned()
    })
}

async fn join_reader(handle: JoinHandle<String>, stream: &str) -> String {
    match handle.await {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(stream, error = %e, "failed to join output reader task");
            String::new()
        }
    }
}

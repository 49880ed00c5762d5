//! # Path Normalization Module / 路径规范化模块
//!
//! Resolves possibly-relative paths against the workspace root using the
//! rules of the runner's host OS. Pure string manipulation: the paths refer
//! to the runner's machine, which need not be the machine evaluating them.
//!
//! 使用运行器主机操作系统的规则，将可能的相对路径解析到工作区根目录。
//! 纯字符串操作：这些路径指向运行器所在的机器，不一定是计算它们的机器。

use crate::core::config::HostOs;

/// Resolves `path` against `workspace` for the given host.
///
/// - Windows: `<letter>:\...` is kept as-is, anything else is joined to the
///   workspace; one trailing `\` is stripped from the result.
/// - Unix: a path starting with `/` is kept as-is, anything else is joined
///   to the workspace.
///
/// Joining always places exactly one separator between the two parts.
///
/// 为给定主机将 `path` 解析到 `workspace`。
pub fn normalize_path(workspace: &str, path: &str, host: HostOs) -> String {
    match host {
        HostOs::Windows => {
            let result = if is_drive_absolute(path) {
                path.to_string()
            } else {
                join(workspace, path, '\\')
            };
            match result.strip_suffix('\\') {
                Some(stripped) => stripped.to_string(),
                None => result,
            }
        }
        HostOs::Unix => {
            if path.starts_with('/') {
                path.to_string()
            } else {
                join(workspace, path, '/')
            }
        }
    }
}

/// Whether `path` is a drive-letter rooted Windows path such as `C:\tests`.
/// 判断 `path` 是否为以盘符开头的 Windows 绝对路径，例如 `C:\tests`。
pub fn is_drive_absolute(path: &str) -> bool {
    let mut chars = path.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(letter), Some(':'), Some('\\')) if letter.is_ascii_alphabetic()
    )
}

fn join(workspace: &str, path: &str, separator: char) -> String {
    let base = workspace.strip_suffix(separator).unwrap_or(workspace);
    let tail = path.strip_prefix(separator).unwrap_or(path);
    format!("{base}{separator}{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drive_detection() {
        assert!(is_drive_absolute("C:\\ws"));
        assert!(is_drive_absolute("d:\\"));
        assert!(!is_drive_absolute("C:/ws"));
        assert!(!is_drive_absolute("1:\\ws"));
        assert!(!is_drive_absolute("C:"));
        assert!(!is_drive_absolute("\\\\server\\share"));
    }

    #[test]
    fn join_never_doubles_separator() {
        assert_eq!(join("/ws/", "/p", '/'), "/ws/p");
        assert_eq!(join("/ws", "p", '/'), "/ws/p");
        assert_eq!(join("C:\\ws\\", "\\p", '\\'), "C:\\ws\\p");
    }
}

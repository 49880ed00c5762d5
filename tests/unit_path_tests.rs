//! # Path Normalizer Unit Tests / 路径规范化单元测试

use api_runner_step::config::HostOs;
use api_runner_step::path::{is_drive_absolute, normalize_path};

#[cfg(test)]
mod unix_tests {
    use super::*;

    #[test]
    fn test_absolute_paths_are_unchanged() {
        for path in ["/", "/srv/api", "/srv/api/", "//double"] {
            assert_eq!(normalize_path("/ws", path, HostOs::Unix), path);
        }
    }

    #[test]
    fn test_relative_paths_are_joined_with_one_separator() {
        assert_eq!(normalize_path("/ws", "proj", HostOs::Unix), "/ws/proj");
        assert_eq!(normalize_path("/ws", "a/b/c", HostOs::Unix), "/ws/a/b/c");
        assert_eq!(normalize_path("/ws", "./proj", HostOs::Unix), "/ws/./proj");
    }

    #[test]
    fn test_workspace_trailing_separator_is_not_doubled() {
        assert_eq!(normalize_path("/ws/", "proj", HostOs::Unix), "/ws/proj");
        assert_eq!(normalize_path("/", "proj", HostOs::Unix), "/proj");
    }

    #[test]
    fn test_trailing_separator_on_path_is_kept() {
        assert_eq!(normalize_path("/ws", "proj/", HostOs::Unix), "/ws/proj/");
    }
}

#[cfg(test)]
mod windows_tests {
    use super::*;

    #[test]
    fn test_drive_paths_are_unchanged_except_trailing_separator() {
        assert_eq!(
            normalize_path("C:\\ws", "D:\\projects\\api", HostOs::Windows),
            "D:\\projects\\api"
        );
        assert_eq!(
            normalize_path("C:\\ws", "D:\\projects\\api\\", HostOs::Windows),
            "D:\\projects\\api"
        );
        assert_eq!(normalize_path("C:\\ws", "e:\\", HostOs::Windows), "e:");
    }

    #[test]
    fn test_relative_paths_are_joined() {
        assert_eq!(normalize_path("C:\\ws", "proj", HostOs::Windows), "C:\\ws\\proj");
        assert_eq!(normalize_path("C:\\ws", "\\proj", HostOs::Windows), "C:\\ws\\proj");
        assert_eq!(normalize_path("C:\\ws\\", "proj", HostOs::Windows), "C:\\ws\\proj");
        assert_eq!(normalize_path("C:\\ws", "proj\\", HostOs::Windows), "C:\\ws\\proj");
    }

    #[test]
    fn test_forward_slash_drive_path_is_treated_as_relative() {
        assert_eq!(
            normalize_path("C:\\ws", "D:/api", HostOs::Windows),
            "C:\\ws\\D:/api"
        );
    }

    #[test]
    fn test_drive_detection() {
        assert!(is_drive_absolute("z:\\"));
        assert!(!is_drive_absolute("\\proj"));
        assert!(!is_drive_absolute("proj"));
    }
}

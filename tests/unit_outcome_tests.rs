//! # Outcome Classifier Unit Tests / 结果分类器单元测试

use api_runner_step::models::{
    CompletedRun, ExecutionMode, FailureReason, Invocation, StepOutcome, output_file_name,
};
use api_runner_step::outcome::{
    COMPILE_COMPLETED_MARKER, FINISHED_MARKER, MarkerScan, OutcomeClassifier, ResultFileCheck,
};
use chrono::{TimeZone, Utc};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::tempdir;

mod common;
use common::{SUCCESS_OUTPUT, unix_config};

fn completed_run(workspace: &Path, transcript: &str, exit_code: Option<i32>) -> CompletedRun {
    let config = unix_config("/opt/runner/");
    CompletedRun {
        invocation: Invocation::new(&config, workspace, "ApiResults-1.xml".to_string()),
        transcript: transcript.to_string(),
        exit_code,
        duration: Duration::from_millis(5),
    }
}

#[test]
fn test_output_file_name_uses_epoch_millis() {
    let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
    assert_eq!(output_file_name(at), "ApiResults-1700000000123.xml");
}

#[test]
fn test_invocation_results_path_is_under_results_dir() {
    let run = completed_run(Path::new("/ws"), "", Some(0));
    assert_eq!(
        run.invocation.results_path,
        Path::new("/ws").join("ApiStudioResults").join("ApiResults-1.xml")
    );
}

#[cfg(test)]
mod marker_scan_tests {
    use super::*;

    #[test]
    fn test_both_markers_present_is_success() {
        let run = completed_run(Path::new("/ws"), SUCCESS_OUTPUT, Some(0));
        assert_eq!(MarkerScan::runner_defaults().classify(&run), StepOutcome::Success);
    }

    #[test]
    fn test_exit_code_is_not_consulted() {
        let run = completed_run(Path::new("/ws"), SUCCESS_OUTPUT, Some(3));
        assert!(MarkerScan::default().classify(&run).is_success());
    }

    #[test]
    fn test_missing_compile_marker_fails() {
        let run = completed_run(Path::new("/ws"), "Run Finished.", Some(0));
        assert_eq!(
            MarkerScan::default().classify(&run),
            StepOutcome::failure(FailureReason::MissingMarkers {
                markers: vec![COMPILE_COMPLETED_MARKER.to_string()]
            })
        );
    }

    #[test]
    fn test_finished_marker_needs_leading_space() {
        let text = format!("{COMPILE_COMPLETED_MARKER}\nFinished.");
        let run = completed_run(Path::new("/ws"), &text, Some(0));
        assert_eq!(
            MarkerScan::default().missing_in(&run.transcript),
            vec![FINISHED_MARKER.to_string()]
        );
    }

    #[test]
    fn test_compile_marker_needs_two_spaces() {
        let text = "[INFO] Project compile completed.\n Finished.";
        assert_eq!(
            MarkerScan::default().missing_in(text),
            vec![COMPILE_COMPLETED_MARKER.to_string()]
        );
    }

    #[test]
    fn test_empty_output_misses_all_markers_in_order() {
        assert_eq!(
            MarkerScan::default().missing_in(""),
            vec![FINISHED_MARKER.to_string(), COMPILE_COMPLETED_MARKER.to_string()]
        );
    }

    #[test]
    fn test_custom_markers() {
        let scan = MarkerScan::new(["ALL GOOD"]);
        assert!(scan.missing_in("status: ALL GOOD").is_empty());
    }
}

#[cfg(test)]
mod result_file_tests {
    use super::*;

    #[test]
    fn test_existing_report_is_success_even_with_failing_exit_code() {
        let dir = tempdir().unwrap();
        let run = completed_run(dir.path(), "", Some(1));
        fs::create_dir_all(run.invocation.results_path.parent().unwrap()).unwrap();
        fs::write(&run.invocation.results_path, "<testsuites/>").unwrap();

        assert_eq!(ResultFileCheck.classify(&run), StepOutcome::Success);
    }

    #[test]
    fn test_missing_report_fails_with_its_path() {
        let dir = tempdir().unwrap();
        let run = completed_run(dir.path(), SUCCESS_OUTPUT, Some(0));

        assert_eq!(
            ResultFileCheck.classify(&run),
            StepOutcome::failure(FailureReason::MissingResultFile {
                path: run.invocation.results_path.clone()
            })
        );
    }

    #[test]
    fn test_directory_in_place_of_report_fails() {
        let dir = tempdir().unwrap();
        let run = completed_run(dir.path(), "", Some(0));
        fs::create_dir_all(&run.invocation.results_path).unwrap();

        assert!(!ResultFileCheck.classify(&run).is_success());
    }
}

#[cfg(test)]
mod mode_tests {
    use super::*;

    #[test]
    fn test_mode_selects_classifier() {
        let dir = tempdir().unwrap();
        let run = completed_run(dir.path(), SUCCESS_OUTPUT, Some(0));

        // No report on disk: the file check fails, the marker scan passes.
        assert!(!ExecutionMode::Local.classifier().classify(&run).is_success());
        assert!(ExecutionMode::Agent.classifier().classify(&run).is_success());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("local".parse::<ExecutionMode>().unwrap(), ExecutionMode::Local);
        assert_eq!("Agent".parse::<ExecutionMode>().unwrap(), ExecutionMode::Agent);
        assert_eq!("remote".parse::<ExecutionMode>().unwrap(), ExecutionMode::Agent);
        assert!("cloud".parse::<ExecutionMode>().is_err());
        assert_eq!(ExecutionMode::default(), ExecutionMode::Local);
    }
}

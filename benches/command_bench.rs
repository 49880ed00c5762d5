use api_runner_step::builder::build_command;
use api_runner_step::config::{HostOs, RunConfiguration};
use api_runner_step::outcome::MarkerScan;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_build_command(c: &mut Criterion) {
    let tests: Vec<String> = (0..50).map(|i| format!("suite/case_{i}.test")).collect();
    let config = RunConfiguration {
        host: HostOs::Unix,
        project: Some("tests/api".to_string()),
        tests: Some(tests.join("\n")),
        variables: Some("env=staging\nregion=eu".to_string()),
        ..RunConfiguration::new("/opt/runner/")
    };

    c.bench_function("build_command", |b| {
        b.iter(|| build_command(black_box(&config), "/ws", "ApiResults-1700000000000.xml").to_string());
    });
}

fn bench_marker_scan(c: &mut Criterion) {
    let mut transcript = "running step\n".repeat(20_000);
    transcript.push_str("[INFO]  Project compile completed.\n Finished.\n");
    let scan = MarkerScan::runner_defaults();

    c.bench_function("marker_scan", |b| {
        b.iter(|| scan.missing_in(black_box(&transcript)));
    });
}

criterion_group!(benches, bench_build_command, bench_marker_scan);
criterion_main!(benches);

use std::{
    env, fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

fn run_bin(args: &[&str], envs: &[(&str, &Path)]) -> Output {
    let bin = PathBuf::from(env!("CARGO_BIN_EXE_radon-report"));

    Command::new(bin)
        .args(args)
        .env_remove("RADON_REPORT_CONFIG")
        .envs(envs.iter().copied())
        .output()
        .expect("failed to execute command")
}

fn describe(output: &Output) -> String {
    let stdout_str = String::from_utf8_lossy(&output.stdout);
    let stderr_str = String::from_utf8_lossy(&output.stderr);
    format!("status: {:?}\nstdout:\n{stdout_str}\nstderr:\n{stderr_str}\n", output.status)
}

fn fresh_dir(name: &str) -> PathBuf {
    let test_dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(name);
    fs::remove_dir_all(&test_dir).ok();
    fs::create_dir_all(&test_dir).expect("failed to create test directory");
    test_dir
}

fn winter_export() -> String {
    let mut contents = String::from("recorded;RADON_SHORT_TERM_AVG Bq/m3;TEMP °C\n");
    let start = chrono::NaiveDate::from_ymd_opt(2021, 11, 1).expect("valid date");
    for day in 0..90 {
        let date = start + chrono::TimeDelta::days(day);
        contents += &format!("{date}T08:00:00;200;20.5\n");
    }
    contents
}

#[test]
fn basic_workflow() {
    let test_dir = fresh_dir("basic_workflow");
    let input = test_dir.join("basement.csv");
    fs::write(&input, winter_export()).expect("failed to write input file");

    let output = run_bin(&[input.to_str().expect("utf-8 path")], &[]);
    assert!(output.status.success(), "{}", describe(&output));

    let chart = test_dir.join("basement - Radon-rapport plot.csv");
    let chart_contents = fs::read_to_string(&chart).expect("failed to read chart data");
    assert_eq!(chart_contents.lines().count(), 91);

    let image = test_dir.join("basement - Radon-rapport plot.png");
    let image_len = fs::metadata(&image).expect("chart image is missing").len();
    assert!(image_len > 0);

    let report = test_dir.join("basement - Radon-rapport.json");
    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).expect("failed to read report"))
            .expect("report is not valid JSON");
    assert_eq!(report["corrected_mean"], 150.0);
    assert_eq!(report["evaluation_period"]["correction_factor"], 0.75);

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn config_file_overrides_factor() {
    let test_dir = fresh_dir("config_file_overrides_factor");
    let input = test_dir.join("basement.csv");
    fs::write(&input, winter_export()).expect("failed to write input file");
    let config = test_dir.join("radon-report.toml");
    fs::write(&config, "winter_correction_factor = 0.5\n").expect("failed to write config");

    let output = run_bin(
        &[input.to_str().expect("utf-8 path")],
        &[("RADON_REPORT_CONFIG", config.as_path())],
    );
    assert!(output.status.success(), "{}", describe(&output));

    let report = test_dir.join("basement - Radon-rapport.json");
    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).expect("failed to read report"))
            .expect("report is not valid JSON");
    assert_eq!(report["corrected_mean"], 100.0);

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn missing_argument_is_usage_error() {
    let output = run_bin(&[], &[]);
    assert_eq!(output.status.code(), Some(2), "{}", describe(&output));
}

#[test]
fn missing_file_is_parse_error() {
    let test_dir = fresh_dir("missing_file_is_parse_error");
    let input = test_dir.join("nowhere.csv");

    let output = run_bin(&[input.to_str().expect("utf-8 path")], &[]);
    assert_eq!(output.status.code(), Some(3), "{}", describe(&output));
    assert!(String::from_utf8_lossy(&output.stderr).contains("nowhere.csv"));

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn short_series_is_insufficient_data() {
    let test_dir = fresh_dir("short_series_is_insufficient_data");
    let input = test_dir.join("week.csv");
    let mut contents = String::from("recorded;RADON_SHORT_TERM_AVG Bq/m3\n");
    for hour in 0..10 {
        contents += &format!("2021-06-0{}T{:02}:00:00;50\n", 1 + hour / 2, hour);
    }
    fs::write(&input, contents).expect("failed to write input file");

    let output = run_bin(&[input.to_str().expect("utf-8 path")], &[]);
    assert_eq!(output.status.code(), Some(4), "{}", describe(&output));
    assert!(!test_dir.join("week - Radon-rapport.json").exists());

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn invalid_config_is_config_error() {
    let test_dir = fresh_dir("invalid_config_is_config_error");
    let input = test_dir.join("basement.csv");
    fs::write(&input, winter_export()).expect("failed to write input file");
    let config = test_dir.join("radon-report.toml");
    fs::write(&config, "trend_window_days = 0\n").expect("failed to write config");

    let output = run_bin(
        &[input.to_str().expect("utf-8 path")],
        &[("RADON_REPORT_CONFIG", config.as_path())],
    );
    assert_eq!(output.status.code(), Some(6), "{}", describe(&output));

    fs::remove_dir_all(&test_dir).ok();
}

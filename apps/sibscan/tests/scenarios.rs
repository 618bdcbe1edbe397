use serde_json::Value;
use sibscan::config::ScanConfig;
use sibscan::error::ConfigError;
use sibscan::models::rule::{MatchKind, RuleSpec};
use sibscan::models::Status;
use sibscan::output::{compose_report_json, render_json};
use sibscan::scan::run_scan;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn config(repos: &[&str], rules: Vec<RuleSpec>) -> ScanConfig {
    ScanConfig {
        repos: repos.iter().map(|s| s.to_string()).collect(),
        roots: Vec::new(),
        extensions: vec!["cpp".into(), "h".into()],
        exclude: Vec::new(),
        rules,
        noun: "item".into(),
        parallel: true,
    }
}

fn write_lines(path: &Path, at: usize, text: &str) {
    let mut body = String::new();
    for i in 1..at {
        body.push_str(&format!("int v{i} = {i};\n"));
    }
    body.push_str(text);
    body.push('\n');
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

#[test]
fn scenario_a_violation_is_error() {
    let dir = tempdir().unwrap();
    write_lines(&dir.path().join("repo/foo.cpp"), 10, "    std::span<int> s;");
    let cfg = config(&["repo"], vec![RuleSpec::violation("std::span")]);
    let report = run_scan(dir.path(), &cfg).unwrap();

    assert_eq!(report.status, Status::Error);
    assert_eq!(report.status.exit_code(), 1);
    let out = compose_report_json(&report).unwrap();
    assert_eq!(out["items"].as_array().unwrap().len(), 1);
    assert_eq!(
        out["items"][0],
        serde_json::json!({
            "file": "repo/foo.cpp",
            "line": 10,
            "feature": "std::span",
            "content": "std::span<int> s;"
        })
    );
}

#[test]
fn scenario_b_marker_is_warning() {
    let dir = tempdir().unwrap();
    write_lines(&dir.path().join("repo/bar.cpp"), 42, "// TODO: handle reconnect");
    let cfg = config(&["repo"], vec![RuleSpec::marker("TODO"), RuleSpec::marker("FIXME")]);
    let report = run_scan(dir.path(), &cfg).unwrap();

    assert_eq!(report.status, Status::Warning);
    assert_eq!(report.status.exit_code(), 2);
    let out = compose_report_json(&report).unwrap();
    assert_eq!(
        out["items"][0],
        serde_json::json!({
            "file": "repo/bar.cpp",
            "line": 42,
            "marker": "TODO",
            "comment": "handle reconnect"
        })
    );
    assert_eq!(out["details"]["items_count"], 1);
}

#[test]
fn scenario_c_no_repositories() {
    let dir = tempdir().unwrap();
    let cfg = config(&["engine", "runtime"], vec![RuleSpec::marker("TODO")]);
    let report = run_scan(dir.path(), &cfg).unwrap();
    let out = compose_report_json(&report).unwrap();
    assert_eq!(out["status"], "success");
    assert_eq!(out["details"]["repos_checked"], serde_json::json!([]));
    assert_eq!(out["details"]["files_checked"], 0);
    assert_eq!(out["items"], serde_json::json!([]));
    assert_eq!(report.status.exit_code(), 0);
}

#[test]
fn scenario_d_invalid_rule_is_fatal() {
    let dir = tempdir().unwrap();
    write_lines(&dir.path().join("repo/foo.cpp"), 1, "std::span<int> s;");
    let bad = RuleSpec::violation("broken").with_token("std::(span", MatchKind::Regex);
    let cfg = config(&["repo"], vec![RuleSpec::violation("std::span"), bad]);
    assert!(matches!(
        run_scan(dir.path(), &cfg),
        Err(ConfigError::InvalidRegex { .. })
    ));
}

#[test]
fn missing_repositories_are_left_out() {
    let dir = tempdir().unwrap();
    write_lines(&dir.path().join("tools/a.h"), 1, "// FIXME later");
    let cfg = config(&["engine", "tools", "runtime"], vec![RuleSpec::marker("FIXME")]);
    let report = run_scan(dir.path(), &cfg).unwrap();
    assert_eq!(report.details.repos_checked, vec!["tools"]);
    assert_eq!(report.details.items_count, report.items.len());
}

#[test]
fn mixed_categories_and_ordering() {
    let dir = tempdir().unwrap();
    let base = dir.path();
    write_lines(&base.join("b/z.cpp"), 3, "// TODO: std::format later");
    write_lines(&base.join("a/src/y.cpp"), 2, "auto s = std::format(\"{}\", 1); // TODO");
    write_lines(&base.join("a/x.cpp"), 5, "// nothing here");
    let rules = vec![RuleSpec::marker("TODO"), RuleSpec::violation("std::format")];
    let report = run_scan(base, &config(&["b", "a"], rules)).unwrap();

    assert_eq!(report.status, Status::Error);
    assert_eq!(report.details.repos_checked, vec!["b", "a"]);
    assert_eq!(report.details.files_checked, 3);
    let order: Vec<_> = report
        .items
        .iter()
        .map(|m| (m.file.as_str(), m.line, m.label.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("a/src/y.cpp", 2, "TODO"),
            ("a/src/y.cpp", 2, "std::format"),
            ("b/z.cpp", 3, "TODO"),
            ("b/z.cpp", 3, "std::format"),
        ]
    );
}

fn build_tree(base: &Path) {
    for r in ["one", "two"] {
        for i in 0..25 {
            let text = if i % 3 == 0 {
                "// TODO: fix \"quoted\" \\ path"
            } else {
                "// FIXME tidy"
            };
            write_lines(&base.join(format!("{r}/src/f{i:02}.cpp")), (i % 7) + 1, text);
        }
    }
}

#[test]
fn parallel_and_sequential_reports_match() {
    let dir = tempdir().unwrap();
    build_tree(dir.path());
    let rules = vec![RuleSpec::marker("TODO"), RuleSpec::marker("FIXME")];
    let mut cfg = config(&["one", "two"], rules);
    let par = render_json(&run_scan(dir.path(), &cfg).unwrap()).unwrap();
    cfg.parallel = false;
    let seq = render_json(&run_scan(dir.path(), &cfg).unwrap()).unwrap();
    assert_eq!(par, seq);
}

#[test]
fn repeated_scans_are_identical_and_parse() {
    let dir = tempdir().unwrap();
    build_tree(dir.path());
    let cfg = config(&["one", "two"], vec![RuleSpec::marker("TODO")]);
    let first = render_json(&run_scan(dir.path(), &cfg).unwrap()).unwrap();
    let second = render_json(&run_scan(dir.path(), &cfg).unwrap()).unwrap();
    assert_eq!(first, second);

    let parsed: Value = serde_json::from_str(&first).unwrap();
    assert_eq!(parsed["items"][0]["comment"], "fix \"quoted\" \\ path");
    assert_eq!(
        parsed["details"]["items_count"].as_u64().unwrap() as usize,
        parsed["items"].as_array().unwrap().len()
    );
}

#[test]
fn binary_zero_args_reports_success_without_repos() {
    let dir = tempdir().unwrap();
    let cwd = dir.path().join("work");
    fs::create_dir(&cwd).unwrap();
    let out = Command::new(env!("CARGO_BIN_EXE_find-todos"))
        .current_dir(&cwd)
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0));
    let report: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["status"], "success");
    assert_eq!(report["details"]["files_checked"], 0);
}

#[test]
fn binary_exit_codes_follow_status() {
    let dir = tempdir().unwrap();
    let cwd = dir.path().join("work");
    fs::create_dir(&cwd).unwrap();
    write_lines(&dir.path().join("engine/src/a.cpp"), 4, "co_await tick(); // TODO: drop");

    let features = Command::new(env!("CARGO_BIN_EXE_check-features"))
        .current_dir(&cwd)
        .output()
        .unwrap();
    assert_eq!(features.status.code(), Some(1));
    let report: Value = serde_json::from_slice(&features.stdout).unwrap();
    assert_eq!(report["items"][0]["feature"], "co_await");

    let markers = Command::new(env!("CARGO_BIN_EXE_find-todos"))
        .current_dir(&cwd)
        .output()
        .unwrap();
    assert_eq!(markers.status.code(), Some(2));
    let report: Value = serde_json::from_slice(&markers.stdout).unwrap();
    assert_eq!(report["items"][0]["comment"], "drop");
}

#[test]
fn binary_invalid_config_prints_no_report() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("sibscan.toml"),
        "[features]\nrules = [{ label = \"bad\", token = \"(\", kind = \"regex\", category = \"violation\" }]\n",
    )
    .unwrap();
    let out = Command::new(env!("CARGO_BIN_EXE_sibscan"))
        .args(["features"])
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(3));
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("invalid regex"));
}

#[test]
fn binary_usage_errors_exit_fatal() {
    let dir = tempdir().unwrap();
    let cases: [(&str, &[&str]); 4] = [
        (env!("CARGO_BIN_EXE_find-todos"), &["--bogus"]),
        (env!("CARGO_BIN_EXE_find-todos"), &["--output"]),
        (env!("CARGO_BIN_EXE_check-features"), &["--bogus"]),
        (env!("CARGO_BIN_EXE_sibscan"), &[]),
    ];
    for (bin, args) in cases {
        let out = Command::new(bin)
            .args(args)
            .current_dir(dir.path())
            .output()
            .unwrap();
        assert_eq!(out.status.code(), Some(3), "{bin} {args:?}");
        assert!(out.stdout.is_empty(), "{bin} {args:?}");
    }
}

#[test]
fn binary_help_and_version_exit_zero() {
    for flag in ["--help", "--version"] {
        let out = Command::new(env!("CARGO_BIN_EXE_find-todos"))
            .arg(flag)
            .output()
            .unwrap();
        assert_eq!(out.status.code(), Some(0), "{flag}");
        assert!(!out.stdout.is_empty(), "{flag}");
    }
}

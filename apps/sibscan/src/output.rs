//! Report rendering.
//!
//! Supports `json` (default) and `human` outputs. The JSON form is the fixed
//! report schema consumed by automation; `human` prints one colored line per
//! item plus the summary. Both leave the exit code to `ScanReport::status`.

use crate::error::ConfigError;
use crate::models::{Category, ScanReport, Status};
use crate::utils::use_colors;
use owo_colors::OwoColorize;
use serde_json::Value as JsonVal;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Json,
    Human,
}

impl FromStr for OutputMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputMode::Json),
            "human" => Ok(OutputMode::Human),
            other => Err(ConfigError::UnknownOutput(other.to_string())),
        }
    }
}

/// Compose the report JSON object (pure) for testing purposes.
pub fn compose_report_json(report: &ScanReport) -> serde_json::Result<JsonVal> {
    serde_json::to_value(report)
}

/// Render the report as the pretty-printed JSON document.
pub fn render_json(report: &ScanReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// Render the report for a terminal.
pub fn render_human(report: &ScanReport, color: bool) -> String {
    let mut out = String::new();
    for it in &report.items {
        let (icon, tag) = match it.category {
            Category::Violation => ("✖", "⟦error⟧"),
            Category::Marker => ("▲", "⟦warn⟧"),
        };
        let location = format!("{}:{}", it.file, it.line);
        let line = if color {
            let (icon, tag) = match it.category {
                Category::Violation => (icon.red().to_string(), tag.red().bold().to_string()),
                Category::Marker => (icon.yellow().to_string(), tag.yellow().bold().to_string()),
            };
            format!("{} {} {} ❲{}❳ {}", icon, tag, location.bold(), it.label, it.text())
        } else {
            format!("{} {} {} ❲{}❳ {}", icon, tag, location, it.label, it.text())
        };
        out.push_str(&line);
        out.push('\n');
    }
    let summary = format!("— {} — {}", report.status.as_str(), report.summary);
    if color {
        let painted = match report.status {
            Status::Success => summary.green().bold().to_string(),
            Status::Warning => summary.yellow().bold().to_string(),
            Status::Error => summary.red().bold().to_string(),
        };
        out.push_str(&painted);
    } else {
        out.push_str(&summary);
    }
    out
}

/// Print the report to stdout in the requested mode.
pub fn print_report(report: &ScanReport, mode: OutputMode) -> serde_json::Result<()> {
    match mode {
        OutputMode::Json => println!("{}", render_json(report)?),
        OutputMode::Human => println!("{}", render_human(report, use_colors())),
    }
    Ok(())
}

//! Result aggregation: a pure fold from per-file matches to a `ScanReport`.

use crate::models::{Category, Details, Match, ScanReport, Status};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Matches found in one successfully read file.
pub struct FileScan {
    pub file: String,
    pub matches: Vec<Match>,
}

#[derive(Debug, Default)]
/// Accumulates repositories, file counts, and matches across a scan.
pub struct Aggregator {
    files_checked: usize,
    repos_checked: Vec<String>,
    items: Vec<Match>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_repo(&mut self, name: &str) {
        self.repos_checked.push(name.to_string());
    }

    /// Count one examined file and keep its matches.
    pub fn add_file(&mut self, scan: FileScan) {
        self.files_checked += 1;
        if !scan.matches.is_empty() {
            log::debug!("{}: {} match(es)", scan.file, scan.matches.len());
        }
        self.items.extend(scan.matches);
    }

    /// Sort matches deterministically and derive status and summary.
    /// `noun` names one item in the summary line.
    pub fn finish(mut self, noun: &str) -> ScanReport {
        self.items.sort_by(|a, b| {
            a.file
                .cmp(&b.file)
                .then(a.line.cmp(&b.line))
                .then(a.rule_index.cmp(&b.rule_index))
        });
        let status = derive_status(&self.items);
        let details = Details {
            files_checked: self.files_checked,
            repos_checked: self.repos_checked,
            items_count: self.items.len(),
        };
        let summary = summarize(status, noun, &details);
        ScanReport {
            status,
            summary,
            details,
            items: self.items,
        }
    }
}

/// Fold repositories and per-file results into a report.
pub fn aggregate<I>(repos: &[String], files: I, noun: &str) -> ScanReport
where
    I: IntoIterator<Item = FileScan>,
{
    let mut agg = Aggregator::new();
    for r in repos {
        agg.add_repo(r);
    }
    for f in files {
        agg.add_file(f);
    }
    agg.finish(noun)
}

/// `success` with no matches, `error` if any violation, else `warning`.
pub fn derive_status(items: &[Match]) -> Status {
    if items.is_empty() {
        Status::Success
    } else if items.iter().any(|m| m.category == Category::Violation) {
        Status::Error
    } else {
        Status::Warning
    }
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{} {}", n, one)
    } else {
        format!("{} {}", n, many)
    }
}

fn summarize(status: Status, noun: &str, d: &Details) -> String {
    let scope = format!(
        "{} across {}",
        plural(d.files_checked, "file", "files"),
        plural(d.repos_checked.len(), "repository", "repositories")
    );
    match status {
        Status::Success => format!("No {}s found in {}", noun, scope),
        _ => {
            let many = format!("{}s", noun);
            format!("Found {} in {}", plural(d.items_count, noun, &many), scope)
        }
    }
}

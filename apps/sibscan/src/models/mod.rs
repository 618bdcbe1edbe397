//! Shared data models for scan rules, matches, and the final report.

pub mod rule;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// How a rule hit is classified in the report.
pub enum Category {
    /// Presence of the token is a failure.
    Violation,
    /// Presence of the token is informational.
    Marker,
}

impl Category {
    /// JSON keys used for the rule label and the captured text of an item.
    pub fn item_keys(self) -> (&'static str, &'static str) {
        match self {
            Category::Violation => ("feature", "content"),
            Category::Marker => ("marker", "comment"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
/// Overall outcome of a scan.
pub enum Status {
    Success,
    Warning,
    Error,
}

impl Status {
    /// Process exit code reported for this status.
    pub fn exit_code(self) -> i32 {
        match self {
            Status::Success => 0,
            Status::Error => 1,
            Status::Warning => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::Warning => "warning",
            Status::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One occurrence of a rule's token on a specific line of a specific file.
pub struct Match {
    /// Path relative to the scan base, `<repo>/<path inside repo>`.
    pub file: String,
    /// 1-based line number.
    pub line: usize,
    pub label: String,
    pub category: Category,
    /// Trimmed text of the matched line.
    pub content: String,
    /// Text following the token, captured for marker rules only.
    pub remainder: Option<String>,
    /// Position of the rule in the configured list; orders same-line hits.
    pub rule_index: usize,
}

impl Match {
    /// Text emitted in the report: the marker remainder when present,
    /// otherwise the trimmed line.
    pub fn text(&self) -> &str {
        self.remainder.as_deref().unwrap_or(&self.content)
    }
}

impl Serialize for Match {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (label_key, text_key) = self.category.item_keys();
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("file", &self.file)?;
        map.serialize_entry("line", &self.line)?;
        map.serialize_entry(label_key, &self.label)?;
        map.serialize_entry(text_key, self.text())?;
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Counters reported next to the item list.
pub struct Details {
    pub files_checked: usize,
    pub repos_checked: Vec<String>,
    pub items_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Final result of one scan invocation.
pub struct ScanReport {
    pub status: Status,
    pub summary: String,
    pub details: Details,
    pub items: Vec<Match>,
}

//! Line-oriented pattern matching.
//!
//! Rules are compiled once up front by `compile_rules`; an invalid regex or
//! empty token is reported before any file is touched. `match_line` is a
//! pure function over a single line, and `scan_file` applies it to every
//! line of one file.
//!
//! Matching semantics:
//! - Violation rules with a literal token match as plain substrings.
//! - Marker rules with a literal token match as a whole word, so `TODO`
//!   does not hit `TODOS` or `MY_TODO`.
//! - Regex rules are used as written for either category.
//! - A line yields at most one hit per rule, and every rule that hits is
//!   reported in rule order.

use crate::error::ConfigError;
use crate::models::rule::{MatchKind, RuleSpec};
use crate::models::{Category, Match};
use regex::Regex;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
enum Needle {
    Literal(String),
    Pattern(Regex),
}

#[derive(Debug, Clone)]
/// A rule ready to be evaluated against lines.
pub struct PatternRule {
    pub label: String,
    pub category: Category,
    needle: Needle,
}

impl PatternRule {
    /// Compile one rule. Literal marker tokens get word boundaries on each
    /// side that starts or ends with a word character.
    pub fn compile(spec: &RuleSpec) -> Result<Self, ConfigError> {
        let token = spec.token();
        if token.is_empty() {
            return Err(ConfigError::EmptyToken(spec.label.clone()));
        }
        let needle = match (spec.kind, spec.category) {
            (MatchKind::Literal, Category::Violation) => Needle::Literal(token.to_string()),
            (MatchKind::Literal, Category::Marker) => {
                let is_word = |c: char| c.is_alphanumeric() || c == '_';
                let mut src = String::new();
                if token.starts_with(is_word) {
                    src.push_str(r"\b");
                }
                src.push_str(&regex::escape(token));
                if token.ends_with(is_word) {
                    src.push_str(r"\b");
                }
                Needle::Pattern(compile_regex(&spec.label, &src)?)
            }
            (MatchKind::Regex, _) => Needle::Pattern(compile_regex(&spec.label, token)?),
        };
        Ok(Self {
            label: spec.label.clone(),
            category: spec.category,
            needle,
        })
    }

    /// Byte range of the first occurrence of the token in `line`.
    fn find(&self, line: &str) -> Option<(usize, usize)> {
        match &self.needle {
            Needle::Literal(tok) => line.find(tok.as_str()).map(|s| (s, s + tok.len())),
            Needle::Pattern(re) => re.find(line).map(|m| (m.start(), m.end())),
        }
    }
}

fn compile_regex(label: &str, src: &str) -> Result<Regex, ConfigError> {
    Regex::new(src).map_err(|source| ConfigError::InvalidRegex {
        label: label.to_string(),
        source,
    })
}

/// Compile the full rule list, failing on the first malformed rule.
pub fn compile_rules(specs: &[RuleSpec]) -> Result<Vec<PatternRule>, ConfigError> {
    specs.iter().map(PatternRule::compile).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A rule hit on one line, before file and line number are attached.
pub struct LineHit {
    pub rule_index: usize,
    pub label: String,
    pub category: Category,
    pub content: String,
    pub remainder: Option<String>,
}

/// Test every rule against `line` and return one hit per matching rule.
pub fn match_line(line: &str, rules: &[PatternRule]) -> Vec<LineHit> {
    let mut hits = Vec::new();
    for (rule_index, rule) in rules.iter().enumerate() {
        let Some((_, end)) = rule.find(line) else {
            continue;
        };
        let remainder = match rule.category {
            Category::Marker => Some(marker_remainder(&line[end..])),
            Category::Violation => None,
        };
        hits.push(LineHit {
            rule_index,
            label: rule.label.clone(),
            category: rule.category,
            content: line.trim().to_string(),
            remainder,
        });
    }
    hits
}

/// Free text following a marker token: `: fix race` -> `fix race`,
/// `(alice): fix race */` -> `fix race`.
fn marker_remainder(rest: &str) -> String {
    let mut s = rest.trim_start();
    if s.starts_with('(') {
        if let Some(close) = s.find(')') {
            s = &s[close + 1..];
        }
    }
    let s = s.trim_start_matches(|c: char| c == ':' || c == '-' || c.is_whitespace());
    let s = s.trim_end();
    let s = s.strip_suffix("*/").unwrap_or(s);
    s.trim().to_string()
}

/// Scan one file and return its matches, or `None` when the file cannot
/// be read or is not valid UTF-8. `display` is the path used in reports.
pub fn scan_file(path: &Path, display: &str, rules: &[PatternRule]) -> Option<Vec<Match>> {
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            log::debug!("skipping unreadable file {}: {}", path.display(), e);
            return None;
        }
    };
    let text = match String::from_utf8(bytes) {
        Ok(t) => t,
        Err(_) => {
            log::debug!("skipping non-UTF-8 file {}", path.display());
            return None;
        }
    };
    let mut matches = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        for hit in match_line(line, rules) {
            matches.push(Match {
                file: display.to_string(),
                line: idx + 1,
                label: hit.label,
                category: hit.category,
                content: hit.content,
                remainder: hit.remainder,
                rule_index: hit.rule_index,
            });
        }
    }
    Some(matches)
}

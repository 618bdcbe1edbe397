//! Built-in scan profiles.
//!
//! `features` denies C++20-and-later library and language features in a
//! C++17 code base. `markers` collects task-tracking comments. Both start
//! from the same sibling repository list and can be overridden by the
//! `[features]` / `[markers]` sections of a config file.

use crate::config::ScanConfig;
use crate::models::rule::{MatchKind, RuleSpec};

pub const DEFAULT_REPOS: &[&str] = &["engine", "runtime", "tools"];

const CPP_EXTENSIONS: &[&str] = &["cpp", "cc", "cxx", "h", "hpp", "hxx", "ipp"];

const MARKER_EXTENSIONS: &[&str] = &[
    "c", "cc", "cpp", "cxx", "h", "hh", "hpp", "hxx", "ipp", "py", "rs", "js", "ts", "sh", "cmake",
];

const MARKER_TOKENS: &[&str] = &["TODO", "FIXME", "HACK", "XXX", "BUG"];

/// Library names denied as qualified substrings.
const DENIED_NAMES: &[&str] = &[
    "std::span",
    "std::format",
    "std::ranges",
    "std::views",
    "std::jthread",
    "std::stop_token",
    "std::source_location",
    "std::bit_cast",
    "std::to_array",
    "std::expected",
    "std::print",
    "std::mdspan",
];

/// Headers that only exist from C++20 on.
const DENIED_HEADERS: &[&str] = &[
    "<span>",
    "<format>",
    "<ranges>",
    "<concepts>",
    "<coroutine>",
    "<source_location>",
    "<expected>",
    "<print>",
];

/// Keywords matched as whole words since they are not namespace-qualified.
const DENIED_KEYWORDS: &[&str] = &["co_await", "co_yield", "co_return", "consteval", "constinit"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Features,
    Markers,
}

impl Profile {
    /// Config-file section and log name of the profile.
    pub fn name(self) -> &'static str {
        match self {
            Profile::Features => "features",
            Profile::Markers => "markers",
        }
    }

    pub fn defaults(self) -> ScanConfig {
        match self {
            Profile::Features => features(),
            Profile::Markers => markers(),
        }
    }
}

fn owned(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

fn features() -> ScanConfig {
    let mut rules: Vec<RuleSpec> = DENIED_NAMES.iter().map(|n| RuleSpec::violation(n)).collect();
    rules.extend(DENIED_HEADERS.iter().map(|h| {
        RuleSpec::violation(&format!("#include {h}")).with_token(
            &format!(r"^\s*#\s*include\s*{}", regex::escape(h)),
            MatchKind::Regex,
        )
    }));
    rules.extend(DENIED_KEYWORDS.iter().map(|k| {
        RuleSpec::violation(k).with_token(&format!(r"\b{k}\b"), MatchKind::Regex)
    }));
    rules.push(RuleSpec::violation("operator<=>").with_token("<=>", MatchKind::Literal));
    ScanConfig {
        repos: owned(DEFAULT_REPOS),
        roots: owned(&["src", "include"]),
        extensions: owned(CPP_EXTENSIONS),
        exclude: Vec::new(),
        rules,
        noun: "forbidden feature usage".into(),
        parallel: true,
    }
}

fn markers() -> ScanConfig {
    ScanConfig {
        repos: owned(DEFAULT_REPOS),
        roots: Vec::new(),
        extensions: owned(MARKER_EXTENSIONS),
        exclude: owned(&[".git", "build", "third_party", "node_modules"]),
        rules: MARKER_TOKENS.iter().map(|t| RuleSpec::marker(t)).collect(),
        noun: "marker comment".into(),
        parallel: true,
    }
}

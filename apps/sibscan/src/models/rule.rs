//! Rule schema: what to search for and how a hit is classified.

use super::Category;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
/// How a rule's token is compared against a line.
pub enum MatchKind {
    #[default]
    Literal,
    Regex,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
/// A pattern rule as written in configuration.
pub struct RuleSpec {
    /// Human-readable name reported for each hit.
    pub label: String,
    /// Text or regex to search for; defaults to `label`.
    #[serde(default)]
    pub token: Option<String>,
    pub category: Category,
    #[serde(default)]
    pub kind: MatchKind,
}

impl RuleSpec {
    pub fn violation(label: &str) -> Self {
        Self {
            label: label.to_string(),
            token: None,
            category: Category::Violation,
            kind: MatchKind::Literal,
        }
    }

    pub fn marker(label: &str) -> Self {
        Self {
            label: label.to_string(),
            token: None,
            category: Category::Marker,
            kind: MatchKind::Literal,
        }
    }

    /// Override the searched token while keeping the label.
    pub fn with_token(mut self, token: &str, kind: MatchKind) -> Self {
        self.token = Some(token.to_string());
        self.kind = kind;
        self
    }

    pub fn token(&self) -> &str {
        self.token.as_deref().unwrap_or(&self.label)
    }
}

//! Configuration errors. These are the only fatal failures of a scan;
//! filesystem trouble while walking or reading files is skipped instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config {} is not valid {format}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        format: &'static str,
        message: String,
    },
    #[error("rule '{label}' has an invalid regex: {source}")]
    InvalidRegex {
        label: String,
        #[source]
        source: regex::Error,
    },
    #[error("rule '{0}' has an empty token")]
    EmptyToken(String),
    #[error("exclude pattern '{pattern}' is not a valid glob: {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    #[error("no pattern rules configured for profile '{0}'")]
    NoRules(String),
    #[error("unknown output mode '{0}' (expected json or human)")]
    UnknownOutput(String),
}

//! CLI argument parsing via `clap`.

use crate::config::Overrides;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sibscan",
    version,
    about = "Scan sibling repositories for forbidden features and marker comments",
    long_about = "Sibscan walks the configured sibling repositories, matches every line against a rule set, and prints one JSON report.\n\nExit codes: 0 success, 1 violations found, 2 only markers found, 3 configuration error.\nConfiguration precedence: CLI > sibscan.toml > built-in profile.",
    after_help = "Examples:\n  sibscan features\n  sibscan markers --output human\n  sibscan features --base ~/src --repo engine --repo tools",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands: one per built-in profile.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current sibscan version.")]
    Version,
    /// Deny C++20-and-later features
    #[command(
        about = "Check for forbidden language features",
        long_about = "Report every line using a denylisted feature. Any hit makes the status `error`.",
        after_help = "Examples:\n  sibscan features\n  sibscan features --output human --sequential"
    )]
    Features(ScanArgs),
    /// Collect TODO/FIXME style comments
    #[command(
        about = "Find marker comments",
        long_about = "Report every TODO/FIXME/HACK/XXX/BUG marker with the text that follows it. Hits make the status `warning`.",
        after_help = "Examples:\n  sibscan markers\n  sibscan markers --repo runtime"
    )]
    Markers(ScanArgs),
}

#[derive(Args, Debug, Default, Clone)]
/// Optional flags shared by every scan entry point; none are required.
pub struct ScanArgs {
    #[arg(long, help = "Directory holding the repositories (default: parent of current dir)")]
    pub base: Option<String>,
    #[arg(long, help = "Path to sibscan.toml|yaml (default: discovered upward)")]
    pub config: Option<String>,
    #[arg(long, help = "Output mode: json|human (default: json)")]
    pub output: Option<String>,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Scan files one at a time")]
    pub sequential: bool,
    #[arg(long = "repo", help = "Repository to scan; repeatable, replaces the configured list")]
    pub repos: Vec<String>,
    #[arg(short, long, action = clap::ArgAction::SetTrue, help = "Log skipped files and progress to stderr")]
    pub verbose: bool,
}

impl ScanArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            base: self.base.as_ref().map(PathBuf::from),
            config: self.config.as_ref().map(PathBuf::from),
            output: self.output.clone(),
            sequential: self.sequential,
            repos: self.repos.clone(),
        }
    }
}

#[derive(Parser)]
#[command(
    name = "check-features",
    version,
    about = "Check sibling repositories for forbidden language features (same as `sibscan features`)"
)]
pub struct CheckFeaturesCli {
    #[command(flatten)]
    pub args: ScanArgs,
}

#[derive(Parser)]
#[command(
    name = "find-todos",
    version,
    about = "Find marker comments in sibling repositories (same as `sibscan markers`)"
)]
pub struct FindTodosCli {
    #[command(flatten)]
    pub args: ScanArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_args_parse() {
        let c = CheckFeaturesCli::try_parse_from(["check-features"]).unwrap();
        assert!(c.args.base.is_none());
        assert!(c.args.repos.is_empty());
        assert!(!c.args.sequential);
        FindTodosCli::try_parse_from(["find-todos"]).unwrap();
    }

    #[test]
    fn test_subcommand_flags() {
        let cli = Cli::try_parse_from([
            "sibscan", "markers", "--repo", "a", "--repo", "b", "--output", "human", "-v",
        ])
        .unwrap();
        match cli.cmd {
            Commands::Markers(args) => {
                assert_eq!(args.repos, vec!["a", "b"]);
                assert!(args.verbose);
                let ov = args.overrides();
                assert_eq!(ov.output.as_deref(), Some("human"));
                assert_eq!(ov.repos.len(), 2);
            }
            _ => panic!("expected markers"),
        }
    }
}

//! Shared driver for the `sibscan` subcommands and the standalone tools.

use crate::cli::ScanArgs;
use crate::config;
use crate::output::{self, OutputMode};
use crate::profiles::Profile;
use crate::scan::run_scan;
use crate::utils::{error_prefix, init_logging, note_prefix};
use clap::error::ErrorKind;
use clap::Parser;

/// Exit code when the tool could not run at all. Distinct from the report
/// statuses (0, 1, 2) so callers can tell a failed run from findings.
pub const EXIT_FATAL: i32 = 3;

/// Parse the command line. Explicit `--help`/`--version` exit 0 through
/// clap; any other parse failure, including help shown for a missing
/// subcommand, is printed to stderr and mapped to `EXIT_FATAL` instead of
/// clap's own usage code, which would collide with the `warning` status.
pub fn parse_args<P: Parser>() -> Result<P, i32> {
    match P::try_parse() {
        Ok(cli) => Ok(cli),
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                Err(EXIT_FATAL)
            }
        },
    }
}

/// Resolve configuration, scan, print the report, and return the exit code.
/// Nothing is written to stdout unless the whole scan succeeds.
pub fn run_profile(profile: Profile, args: &ScanArgs) -> i32 {
    init_logging(args.verbose);
    let cwd = match std::env::current_dir() {
        Ok(d) => d,
        Err(e) => {
            eprintln!("{} cannot read working directory: {}", error_prefix(), e);
            return EXIT_FATAL;
        }
    };
    let eff = match config::resolve_effective(profile, &cwd, &args.overrides()) {
        Ok(eff) => eff,
        Err(e) => {
            eprintln!("{} {}", error_prefix(), e);
            return EXIT_FATAL;
        }
    };
    if eff.output == OutputMode::Human && eff.config_path.is_none() {
        eprintln!(
            "{} No sibscan.toml found; using built-in {} profile.",
            note_prefix(),
            profile.name()
        );
    }
    let report = match run_scan(&eff.base, &eff.scan) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{} {}", error_prefix(), e);
            return EXIT_FATAL;
        }
    };
    if let Err(e) = output::print_report(&report, eff.output) {
        eprintln!("{} failed to write report: {}", error_prefix(), e);
        return EXIT_FATAL;
    }
    report.status.exit_code()
}

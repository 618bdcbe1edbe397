//! Small helpers shared by the binaries: stderr prefixes and logger setup.

use owo_colors::OwoColorize;

/// Colors are on unless `NO_COLOR` is set.
pub fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

pub fn error_prefix() -> String {
    if use_colors() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

pub fn note_prefix() -> String {
    if use_colors() {
        "note:".cyan().bold().to_string()
    } else {
        "note:".to_string()
    }
}

/// Install the stderr logger. `RUST_LOG` wins; otherwise `warn`, or
/// `debug` when `verbose` is set.
pub fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

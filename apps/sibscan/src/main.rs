//! Sibscan CLI binary entry point.
//! Dispatches to the profile runner and exits with the report's code.

use sibscan::cli::{Cli, Commands};
use sibscan::profiles::Profile;
use sibscan::run::{parse_args, run_profile};

fn main() {
    let cli: Cli = match parse_args() {
        Ok(cli) => cli,
        Err(code) => std::process::exit(code),
    };
    let code = match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            0
        }
        Commands::Features(args) => run_profile(Profile::Features, &args),
        Commands::Markers(args) => run_profile(Profile::Markers, &args),
    };
    std::process::exit(code);
}

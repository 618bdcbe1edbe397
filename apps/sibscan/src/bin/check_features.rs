//! `check-features`: zero-argument denylist check over sibling repositories.

use sibscan::cli::CheckFeaturesCli;
use sibscan::profiles::Profile;
use sibscan::run::{parse_args, run_profile};

fn main() {
    let code = match parse_args::<CheckFeaturesCli>() {
        Ok(cli) => run_profile(Profile::Features, &cli.args),
        Err(code) => code,
    };
    std::process::exit(code);
}

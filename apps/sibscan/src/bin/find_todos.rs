//! `find-todos`: zero-argument marker comment report over sibling repositories.

use sibscan::cli::FindTodosCli;
use sibscan::profiles::Profile;
use sibscan::run::{parse_args, run_profile};

fn main() {
    let code = match parse_args::<FindTodosCli>() {
        Ok(cli) => run_profile(Profile::Markers, &cli.args),
        Err(code) => code,
    };
    std::process::exit(code);
}

//! Palimpsest CLI binary.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;

use palimpsest::cli::args::PalimpsestArgs;
use palimpsest::cli::commands::execute_command;

fn main() -> ExitCode {
    let args = PalimpsestArgs::parse();

    // PALIMPSEST_LOG, when set, takes precedence over -v/-q.
    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_env(Env::new().filter("PALIMPSEST_LOG"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{:<5} {}: {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    match execute_command(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("Command failed: {e:?}");
            eprintln!("palimpsest: {e}");
            ExitCode::FAILURE
        }
    }
}

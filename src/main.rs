use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use othello_search::driver::driver_loop::run_stdio_loop;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging (per-search statistics)
    #[arg(short, long)]
    debug: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    );
    // stdout carries the protocol; logs stay on stderr.
    builder
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .write_style(env_logger::WriteStyle::Never)
        .target(env_logger::Target::Stderr)
        .init();

    match run_stdio_loop() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

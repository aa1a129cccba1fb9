use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use dualstack_app::cli::{self, Cli};
use dualstack_core::logging;

fn fail(err: &anyhow::Error) -> ExitCode {
    let failure = cli::describe_failure(err);
    error!(target: logging::FAILURE_TARGET, exit_code = failure.exit_code, "{err:#}");
    eprintln!("error: {}", failure.message);
    ExitCode::from(failure.exit_code)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => return fail(&err),
    };

    let _log_guard = match logging::init_logging(&config.log_level) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("warning: file logging disabled: {e:#}");
            None
        }
    };

    match cli::run(cli, config, &mut std::io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => fail(&err),
    }
}

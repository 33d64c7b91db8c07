use std::process::ExitCode;

mod builder;
mod cli;
mod logging;
mod plan;
mod progress;
mod runner;
mod util;

fn main() -> ExitCode {
    let app = match cli::parse() {
        Ok(app) => app,
        Err(err) => {
            let _ = err.print();
            // --help and --version land here too and are not failures.
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    logging::init(app.verbose);
    match runner::run(app) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

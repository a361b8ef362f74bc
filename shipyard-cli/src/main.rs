//! Entry point for the `shipyard` binary.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = run() {
        report(&err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), shipyard_cli::CliError> {
    shipyard_cli::init_logging()?;
    shipyard_cli::run()
}

#[expect(clippy::print_stderr, reason = "fatal errors are reported on stderr")]
fn report(err: &shipyard_cli::CliError) {
    eprintln!("shipyard: {err}");
}

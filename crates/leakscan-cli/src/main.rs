mod error;
mod prompt;
mod report;
mod scan;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use crate::error::{exit_code_for, report_error};

#[derive(Debug, Parser)]
#[command(
    name = "leakscan",
    version,
    about = "Check address book phone numbers against leaked records"
)]
struct Cli {
    /// Account username (email address)
    #[arg(long, value_name = "EMAIL")]
    user: Option<String>,
    /// Account password; prompted for without echo when omitted
    #[arg(long, value_name = "PASSWORD")]
    pw: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli { user, pw } = cli;
    let credentials = prompt::resolve_credentials(user, pw)?;
    scan::scan(credentials)
}

fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
